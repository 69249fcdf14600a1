use gloo_timers::callback::Timeout;
use web_sys::{Document, Element, Window};

use crate::config::{self, classes, selectors};
use crate::dom::{self, Listener};
use crate::error::PageError;
use crate::observer::OneShotObserver;

pub const RESTING_SHADOW: &str = "0 2px 10px rgba(0, 0, 0, 0.1)";
pub const RAISED_SHADOW: &str = "0 4px 20px rgba(0, 0, 0, 0.15)";

pub fn navbar_shadow(scroll_y: f64) -> &'static str {
    if scroll_y > config::NAVBAR_SHADOW_OFFSET {
        RAISED_SHADOW
    } else {
        RESTING_SHADOW
    }
}

/// Hero background offset for the given scroll position.
pub fn parallax_position(scroll_y: f64) -> String {
    format!("{}px", scroll_y * config::PARALLAX_FACTOR)
}

pub fn presses(class_names: &str) -> bool {
    !class_names
        .split_whitespace()
        .any(|c| c == selectors::SUBMIT_BUTTON_CLASS)
}

fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

pub fn install_navbar_shadow(window: &Window, document: &Document) -> Result<Option<Listener>, PageError> {
    let Some(navbar) = dom::query(document, selectors::NAVBAR) else {
        log::debug!("No navbar on this page");
        return Ok(None);
    };
    let win = window.clone();
    let listener = dom::listen(window, "scroll", move |_| {
        dom::set_style(&navbar, "box-shadow", navbar_shadow(scroll_y(&win)));
    })?;
    Ok(Some(listener))
}

pub fn install_parallax(window: &Window, document: &Document) -> Result<Listener, PageError> {
    let win = window.clone();
    let doc = document.clone();
    dom::listen(window, "scroll", move |_| {
        if let Some(hero) = dom::query(&doc, selectors::HERO) {
            dom::set_style(&hero, "background-position-y", &parallax_position(scroll_y(&win)));
        }
    })
}

fn fade_in(element: Element) {
    dom::set_style(&element, "opacity", "0");
    dom::set_style(&element, "transform", "translateY(20px)");
    Timeout::new(config::FADE_DELAY_MS, move || {
        dom::set_style(&element, "transition", "opacity 0.6s ease, transform 0.6s ease");
        dom::set_style(&element, "opacity", "1");
        dom::set_style(&element, "transform", "translateY(0)");
    })
    .forget();
}

pub fn install_fade_in(document: &Document) -> Result<OneShotObserver, PageError> {
    let observer = OneShotObserver::new(config::FADE_VISIBILITY, fade_in)?;
    let count = observer.observe_all(dom::query_all(document, selectors::FADE_TARGETS));
    log::debug!("Observing {} fade-in sections", count);
    Ok(observer)
}

pub fn install_button_press(document: &Document, listeners: &mut Vec<Listener>) -> Result<(), PageError> {
    for button in dom::query_all(document, selectors::BUTTONS) {
        let pressed = button.clone();
        listeners.push(dom::listen(&button, "click", move |_| {
            if !presses(&pressed.class_name()) {
                return;
            }
            dom::set_style(&pressed, "transform", "scale(0.95)");
            let released = pressed.clone();
            Timeout::new(config::PRESS_RELEASE_MS, move || {
                dom::set_style(&released, "transform", "");
            })
            .forget();
        })?);
    }
    Ok(())
}

/// Adds `loaded` to `<body>` once the window has loaded, or right away if it already has.
pub fn install_loaded_marker(window: &Window, document: &Document) -> Result<Option<Listener>, PageError> {
    let doc = document.clone();
    let mark = move || {
        if let Some(body) = doc.body() {
            if let Err(e) = body.class_list().add_1(classes::LOADED) {
                log::debug!("could not mark body loaded: {:?}", e);
            }
        }
    };
    if document.ready_state() == "complete" {
        mark();
        return Ok(None);
    }
    let listener = dom::listen(window, "load", move |_| mark())?;
    Ok(Some(listener))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shadow_raises_past_threshold() {
        assert_eq!(navbar_shadow(0.0), RESTING_SHADOW);
        assert_eq!(navbar_shadow(100.0), RESTING_SHADOW);
        assert_eq!(navbar_shadow(100.5), RAISED_SHADOW);
        assert_eq!(navbar_shadow(2400.0), RAISED_SHADOW);
    }

    #[test]
    fn parallax_moves_at_half_speed() {
        assert_eq!(parallax_position(0.0), "0px");
        assert_eq!(parallax_position(100.0), "50px");
        assert_eq!(parallax_position(25.5), "12.75px");
    }

    #[test]
    fn submit_buttons_are_not_pressed() {
        assert!(presses("btn"));
        assert!(presses("btn btn-primary"));
        assert!(!presses("btn submit-btn"));
        assert!(!presses("submit-btn"));
        assert!(presses("submit-btn-like"));
    }
}
