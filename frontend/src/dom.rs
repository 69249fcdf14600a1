//! Thin helpers over `web_sys` for the server-rendered markup.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

use crate::error::PageError;

pub type Listener = Closure<dyn FnMut(Event)>;

pub fn window() -> Result<Window, PageError> {
    web_sys::window().ok_or(PageError::MissingGlobal("window"))
}

pub fn document(window: &Window) -> Result<Document, PageError> {
    window.document().ok_or(PageError::MissingGlobal("document"))
}

pub fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

/// All elements matching `selector`, in document order. An invalid selector yields nothing.
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn set_style(element: &Element, property: &str, value: &str) {
    if let Some(html) = element.dyn_ref::<HtmlElement>() {
        if let Err(e) = html.style().set_property(property, value) {
            log::debug!("could not set {} on element: {:?}", property, e);
        }
    }
}

pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<Listener, PageError>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    Ok(closure)
}
