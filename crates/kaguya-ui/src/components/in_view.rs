//! Viewport sentinel backed by `IntersectionObserver`.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};
use yew::prelude::*;

/// Sentinel properties.
#[derive(Properties, PartialEq)]
pub struct InViewProps {
    /// Fired each time the sentinel enters the viewport.
    pub on_in_view: Callback<()>,
    /// Pre-load distance, as a CSS margin.
    #[prop_or(AttrValue::Static("200px"))]
    pub root_margin: AttrValue,
}

/// Invisible element that reports when it scrolls into view.
#[function_component(InView)]
pub fn in_view(props: &InViewProps) -> Html {
    let node = use_node_ref();
    let latest = use_mut_ref(|| props.on_in_view.clone());
    *latest.borrow_mut() = props.on_in_view.clone();

    {
        let node = node.clone();
        let margin = props.root_margin.clone();
        use_effect_with_deps(
            move |_| {
                let observer = node
                    .cast::<Element>()
                    .and_then(|element| observe(&element, &margin, &latest));
                move || {
                    if let Some((observer, _handler)) = observer {
                        observer.disconnect();
                    }
                }
            },
            (),
        );
    }

    html! { <div ref={node} class="h-px w-full" aria-hidden="true"></div> }
}

type EntryHandler = Closure<dyn FnMut(Array, IntersectionObserver)>;

fn observe(
    element: &Element,
    margin: &str,
    latest: &Rc<RefCell<Callback<()>>>,
) -> Option<(IntersectionObserver, EntryHandler)> {
    let latest = Rc::clone(latest);
    let handler: EntryHandler = Closure::wrap(Box::new(move |entries: Array, _observer| {
        let visible = entries.iter().any(|entry| {
            entry
                .dyn_into::<IntersectionObserverEntry>()
                .is_ok_and(|entry| entry.is_intersecting())
        });
        if visible {
            latest.borrow().emit(());
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_root_margin(margin);
    match IntersectionObserver::new_with_options(handler.as_ref().unchecked_ref(), &init) {
        Ok(observer) => {
            observer.observe(element);
            Some((observer, handler))
        }
        Err(err) => {
            console::error!("IntersectionObserver unavailable", err);
            None
        }
    }
}
