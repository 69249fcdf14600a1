use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::VisibilityOptions;
use crate::error::PageError;

type EntriesCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Watches elements until each one first becomes visible, calls `on_visible` for it
/// once and stops watching it.
pub struct OneShotObserver {
    observer: IntersectionObserver,
    _callback: EntriesCallback,
}

impl OneShotObserver {
    pub fn new<F>(options: VisibilityOptions, mut on_visible: F) -> Result<Self, PageError>
    where
        F: FnMut(Element) + 'static,
    {
        let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    observer.unobserve(&target);
                    on_visible(target);
                }
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(options.root_margin);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        Ok(Self { observer, _callback: callback })
    }

    pub fn observe_all(&self, elements: impl IntoIterator<Item = Element>) -> usize {
        elements
            .into_iter()
            .inspect(|element| self.observer.observe(element))
            .count()
    }
}
