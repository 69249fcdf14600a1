use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Window};

use crate::config::{self, classes, selectors};
use crate::dom;
use crate::error::PageError;
use crate::events::parse_int_prefix;
use crate::observer::OneShotObserver;

/// What the counter shows after one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Running(String),
    Finished(String),
}

impl Frame {
    pub fn text(&self) -> &str {
        match self {
            Frame::Running(text) | Frame::Finished(text) => text,
        }
    }
}

/// Counts from 0 up to `target` in fixed per-frame steps.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: i64,
    increment: f64,
    current: f64,
}

impl CounterAnimation {
    pub fn new(target: i64) -> Self {
        let frames = config::COUNTER_DURATION_MS / config::COUNTER_FRAME_MS;
        Self {
            target,
            increment: target as f64 / frames,
            current: 0.0,
        }
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn advance(&mut self) -> Frame {
        self.current += self.increment;
        if self.current < self.target as f64 {
            Frame::Running(group_thousands(self.current.floor() as i64))
        } else {
            Frame::Finished(group_thousands(self.target))
        }
    }
}

/// Formats with `,` between groups of three digits.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// The element a counter animation writes into.
pub trait CounterTarget {
    fn is_animated(&self) -> bool;
    fn mark_animated(&self);
    fn target_attr(&self) -> Option<String>;
}

impl CounterTarget for Element {
    fn is_animated(&self) -> bool {
        self.class_list().contains(classes::ANIMATED)
    }

    fn mark_animated(&self) {
        if let Err(e) = self.class_list().add_1(classes::ANIMATED) {
            log::debug!("could not mark counter animated: {:?}", e);
        }
    }

    fn target_attr(&self) -> Option<String> {
        self.get_attribute("data-target")
    }
}

/// Marks the element and hands back its animation, or `None` if it already ran.
/// A missing or unparseable target counts as 0.
pub fn claim<T: CounterTarget + ?Sized>(element: &T) -> Option<CounterAnimation> {
    if element.is_animated() {
        return None;
    }
    element.mark_animated();
    let target = element
        .target_attr()
        .as_deref()
        .and_then(parse_int_prefix)
        .unwrap_or(0);
    Some(CounterAnimation::new(target))
}

/// Drives `animation` on `element`, one step per animation frame. The first step runs now.
pub fn run(window: Window, element: Element, mut animation: CounterAnimation) {
    let frame = animation.advance();
    element.set_text_content(Some(frame.text()));
    if let Frame::Finished(_) = frame {
        return;
    }

    let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let scheduled = callback.clone();
    let window_clone = window.clone();

    *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let frame = animation.advance();
        element.set_text_content(Some(frame.text()));
        match frame {
            Frame::Running(_) => {
                if let Some(cb) = scheduled.borrow().as_ref() {
                    if window_clone.request_animation_frame(cb.as_ref().unchecked_ref()).is_err() {
                        log::warn!("requestAnimationFrame refused, counter stopped early");
                    }
                }
            }
            Frame::Finished(_) => {
                // Drop our handle so the closure is freed once it returns
                let _ = scheduled.borrow_mut().take();
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(cb) = callback.borrow().as_ref() {
        if window.request_animation_frame(cb.as_ref().unchecked_ref()).is_err() {
            log::warn!("requestAnimationFrame refused, counter not animated");
        }
    };
}

/// Starts each stat's counter the first time half of the stat block is on screen.
pub fn install(window: &Window, document: &Document) -> Result<OneShotObserver, PageError> {
    let window = window.clone();
    let observer = OneShotObserver::new(config::STATS_VISIBILITY, move |stat| {
        let Some(number) = stat.query_selector(selectors::STAT_NUMBER).ok().flatten() else {
            return;
        };
        if let Some(animation) = claim(&number) {
            log::debug!("Animating counter to {}", animation.target());
            run(window.clone(), number, animation);
        }
    })?;
    let count = observer.observe_all(dom::query_all(document, selectors::STAT));
    log::debug!("Observing {} stat blocks", count);
    Ok(observer)
}
