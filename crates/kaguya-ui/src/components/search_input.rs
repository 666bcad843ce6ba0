//! Search input for the browse toolbar.
//!
//! # Design
//! - Keep local input state for immediate typing feedback.
//! - Emit every keystroke; the browse session owns the debounce.

use yew::prelude::*;

/// Search input properties.
#[derive(Properties, PartialEq)]
pub struct SearchInputProps {
    /// Value the input is (re)seeded with.
    #[prop_or_default]
    pub value: AttrValue,
    /// Visible label.
    #[prop_or_default]
    pub label: Option<AttrValue>,
    /// Extra wrapper classes.
    #[prop_or_default]
    pub class: Classes,
    /// Raw keystroke callback.
    #[prop_or_default]
    pub on_input: Callback<String>,
}

/// Text input with a search icon.
#[function_component(SearchInput)]
pub fn search_input(props: &SearchInputProps) -> Html {
    let value_state = use_state(|| props.value.to_string());

    {
        let value_state = value_state.clone();
        let incoming = props.value.clone();
        use_effect_with_deps(
            move |incoming| {
                let next = incoming.to_string();
                if *value_state != next {
                    value_state.set(next);
                }
                || ()
            },
            incoming,
        );
    }

    let oninput = {
        let on_input = props.on_input.clone();
        let value_state = value_state.clone();
        Callback::from(move |event: InputEvent| {
            if let Some(input) = event.target_dyn_into::<web_sys::HtmlInputElement>() {
                let next = input.value();
                value_state.set(next.clone());
                on_input.emit(next);
            }
        })
    };

    html! {
        <label class={classes!("form-control", "shrink-0", props.class.clone())}>
            if let Some(label) = props.label.clone() {
                <span class="label-text">{label.clone()}</span>
            }
            <span class="input input-bordered flex items-center gap-2">
                <span class="iconify lucide--search size-4"></span>
                <input
                    type="search"
                    class="grow"
                    value={AttrValue::from((*value_state).clone())}
                    aria-label={props.label.clone()}
                    {oninput}
                />
            </span>
        </label>
    }
}
