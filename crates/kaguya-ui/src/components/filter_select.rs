//! Select control bound to one browse filter field.

use crate::features::browse::catalog::SelectOption;
use crate::features::browse::filters::FilterField;
use wasm_bindgen::JsCast;
use web_sys::{HtmlOptionElement, HtmlSelectElement};
use yew::prelude::*;

/// Filter select properties.
#[derive(Properties, PartialEq)]
pub struct FilterSelectProps {
    /// Field the control edits.
    pub field: FilterField,
    /// Visible label; also the placeholder.
    pub label: AttrValue,
    /// Catalog entries.
    pub options: Vec<SelectOption>,
    /// Currently selected wire tokens.
    #[prop_or_default]
    pub selected: Vec<String>,
    /// Whether an empty selection is allowed on a single-value control.
    #[prop_or(true)]
    pub clearable: bool,
    /// Emits the field and its selected tokens.
    pub on_change: Callback<(FilterField, Vec<String>)>,
}

/// Single or multi select; multi-value fields render as a multiple select.
#[function_component(FilterSelect)]
pub fn filter_select(props: &FilterSelectProps) -> Html {
    let multiple = props.field.is_multi();
    let onchange = {
        let field = props.field;
        let on_change = props.on_change.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
                on_change.emit((field, selected_tokens(&select)));
            }
        })
    };

    html! {
        <label class="form-control shrink-0 snap-start">
            <span class="label-text">{props.label.clone()}</span>
            <select
                class={classes!("select", "select-bordered", multiple.then_some("h-24"))}
                multiple={multiple}
                aria-label={props.label.clone()}
                {onchange}
            >
                if !multiple && props.clearable {
                    <option value="" selected={props.selected.is_empty()}>{props.label.clone()}</option>
                }
                { for props.options.iter().map(|option| html! {
                    <option
                        key={option.value.clone()}
                        value={option.value.clone()}
                        selected={props.selected.contains(&option.value)}
                    >
                        {option.label.clone()}
                    </option>
                }) }
            </select>
        </label>
    }
}

fn selected_tokens(select: &HtmlSelectElement) -> Vec<String> {
    let options = select.selected_options();
    (0..options.length())
        .filter_map(|index| options.item(index))
        .filter_map(|element| element.dyn_into::<HtmlOptionElement>().ok())
        .map(|option| option.value())
        .collect()
}
