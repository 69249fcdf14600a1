use web_sys::{Document, Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::config::selectors;
use crate::dom::{self, Listener};
use crate::error::PageError;

/// The selector an in-page link points at, if it points anywhere. A bare `#` does not.
pub fn fragment_selector(href: &str) -> Option<&str> {
    (href.starts_with('#') && href.len() > 1).then_some(href)
}

/// Resolves the link target with `lookup`. Returns the element to scroll to; the caller
/// suppresses navigation only when this is `Some`.
pub fn resolve<T>(href: &str, lookup: impl FnOnce(&str) -> Option<T>) -> Option<T> {
    fragment_selector(href).and_then(lookup)
}

pub fn install(document: &Document, listeners: &mut Vec<Listener>) -> Result<(), PageError> {
    let mut wired = 0;
    for anchor in dom::query_all(document, selectors::ANCHORS) {
        let doc = document.clone();
        let link = anchor.clone();
        listeners.push(dom::listen(&anchor, "click", move |event| {
            let href = link.get_attribute("href").unwrap_or_default();
            if let Some(target) = resolve(&href, |selector| dom::query(&doc, selector)) {
                event.prevent_default();
                scroll_to_top_of_view(&target);
            }
        })?);
        wired += 1;
    }
    log::debug!("Wired {} in-page anchors", wired);
    Ok(())
}

fn scroll_to_top_of_view(target: &Element) {
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
    log::debug!("Scrolling to #{}", target.id());
}
