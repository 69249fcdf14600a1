use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Window};

use crate::dom::{self, Listener};
use crate::error::PageError;
use crate::observer::OneShotObserver;
use crate::{anchors, contact, counter, effects, events, nav, validation};

/// Everything the script wires onto the page. Built once; dropping it would detach
/// every listener, so it is kept for the page lifetime.
pub struct PageController {
    listeners: Vec<Listener>,
    observers: Vec<OneShotObserver>,
}

/// Runs one feature's installer against the shared sink. Whatever it pushed before
/// failing stays in the sink; the failure is logged and the next feature still runs.
fn wire<T>(
    sink: &mut Vec<T>,
    feature: &str,
    install: impl FnOnce(&mut Vec<T>) -> Result<(), PageError>,
) -> bool {
    match install(sink) {
        Ok(()) => true,
        Err(e) => {
            log::error!("Could not wire {}: {}", feature, e);
            false
        }
    }
}

impl PageController {
    pub fn install(window: &Window, document: &Document) -> Self {
        spawn_local(events::load_events_and_update_counters(document.clone()));

        let mut listeners = Vec::new();
        wire(&mut listeners, "mobile menu", |sink| nav::install(document, sink));
        wire(&mut listeners, "anchor links", |sink| anchors::install(document, sink));
        wire(&mut listeners, "contact form", |sink| contact::install(document, sink));
        wire(&mut listeners, "navbar shadow", |sink| {
            sink.extend(effects::install_navbar_shadow(window, document)?);
            Ok(())
        });
        wire(&mut listeners, "field styling", |sink| validation::install(document, sink));
        wire(&mut listeners, "button press", |sink| effects::install_button_press(document, sink));
        wire(&mut listeners, "hero parallax", |sink| {
            sink.push(effects::install_parallax(window, document)?);
            Ok(())
        });

        let mut observers = Vec::new();
        wire(&mut observers, "stat counters", |sink| {
            sink.push(counter::install(window, document)?);
            Ok(())
        });
        wire(&mut observers, "fade-in sections", |sink| {
            sink.push(effects::install_fade_in(document)?);
            Ok(())
        });

        let controller = Self { listeners, observers };
        log::info!(
            "Page wired: {} listeners, {} visibility observers",
            controller.listeners.len(),
            controller.observers.len()
        );
        controller
    }

    pub fn keep_alive(self) {
        std::mem::forget(self);
    }
}

/// Installs the controller now, or on DOMContentLoaded if the document is still parsing.
pub fn start() -> Result<(), PageError> {
    let window = dom::window()?;
    let document = dom::document(&window)?;

    if let Some(marker) = effects::install_loaded_marker(&window, &document)? {
        marker.forget();
    }

    if document.ready_state() != "loading" {
        PageController::install(&window, &document).keep_alive();
        return Ok(());
    }

    let win = window.clone();
    let doc = document.clone();
    let mut installed = false;
    let ready = dom::listen(&document, "DOMContentLoaded", move |_| {
        if installed {
            return;
        }
        installed = true;
        PageController::install(&win, &doc).keep_alive();
    })?;
    ready.forget();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_feature_keeps_what_it_already_wired() {
        let mut sink = vec![1];
        let ok = wire(&mut sink, "half-wired", |sink| {
            sink.push(2);
            sink.push(3);
            Err(PageError::Dom("addEventListener threw".to_string()))
        });
        assert!(!ok);
        assert_eq!(sink, vec![1, 2, 3]);
    }

    #[test]
    fn later_features_still_run_after_a_failure() {
        let mut sink = Vec::new();
        wire(&mut sink, "broken", |_| Err(PageError::MissingGlobal("document")));
        let ok = wire(&mut sink, "working", |sink| {
            sink.push("listener");
            Ok(())
        });
        assert!(ok);
        assert_eq!(sink, vec!["listener"]);
    }
}
