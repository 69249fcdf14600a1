use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event};

use crate::config::{classes, selectors};
use crate::dom::{self, Listener};
use crate::error::PageError;

/// Open/closed state of the mobile menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuState {
    open: bool,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self.open
    }

    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    pub fn closed(self) -> Self {
        Self { open: false }
    }

    /// Any click outside the nav wrapper closes the menu.
    pub fn after_document_click(self, inside_wrapper: bool) -> Self {
        if inside_wrapper {
            self
        } else {
            self.closed()
        }
    }
}

/// Class-list access the menu needs from an element.
pub trait MenuElement {
    fn has_class(&self, name: &str) -> bool;
    fn set_class(&self, name: &str, on: bool);
}

impl MenuElement for Element {
    fn has_class(&self, name: &str) -> bool {
        self.class_list().contains(name)
    }

    fn set_class(&self, name: &str, on: bool) {
        let list = self.class_list();
        let result = if on { list.add_1(name) } else { list.remove_1(name) };
        if let Err(e) = result {
            log::debug!("menu class update failed: {:?}", e);
        }
    }
}

/// Where a document click landed.
pub trait ClickTarget {
    fn within(&self, selector: &str) -> bool;
}

impl ClickTarget for Element {
    fn within(&self, selector: &str) -> bool {
        self.closest(selector).ok().flatten().is_some()
    }
}

/// The toggle button and the menu it controls, kept in sync.
#[derive(Clone)]
pub struct MobileMenu<E = Element> {
    toggle: E,
    menu: Option<E>,
    state: Rc<Cell<MenuState>>,
}

impl<E: MenuElement> MobileMenu<E> {
    /// The menu counts as open if either element ships with `active`; both are
    /// brought to that state straight away.
    pub fn new(toggle: E, menu: Option<E>) -> Self {
        let open = toggle.has_class(classes::ACTIVE)
            || menu.as_ref().is_some_and(|m| m.has_class(classes::ACTIVE));
        let controller = Self { toggle, menu, state: Rc::new(Cell::new(MenuState::default())) };
        controller.apply(MenuState { open });
        controller
    }

    pub fn state(&self) -> MenuState {
        self.state.get()
    }

    fn apply(&self, next: MenuState) {
        self.state.set(next);
        for element in std::iter::once(&self.toggle).chain(self.menu.as_ref()) {
            element.set_class(classes::ACTIVE, next.is_open());
        }
    }

    pub fn toggle(&self) {
        self.apply(self.state.get().toggled());
    }

    pub fn close(&self) {
        self.apply(self.state.get().closed());
    }

    /// A click with no element target counts as outside the nav wrapper.
    pub fn on_click_at<T: ClickTarget>(&self, target: Option<&T>) {
        let inside = target.is_some_and(|t| t.within(selectors::NAV_WRAPPER));
        self.apply(self.state.get().after_document_click(inside));
    }
}

impl MobileMenu<Element> {
    pub fn on_document_click(&self, event: &Event) {
        let target = event.target().and_then(|t| t.dyn_into::<Element>().ok());
        self.on_click_at(target.as_ref());
    }
}

/// Wires the toggle, nav links and outside clicks. Without a toggle nothing is wired.
pub fn install(document: &Document, listeners: &mut Vec<Listener>) -> Result<(), PageError> {
    let Some(toggle) = dom::query(document, selectors::MENU_TOGGLE) else {
        log::debug!("No mobile menu toggle on this page");
        return Ok(());
    };
    let menu = MobileMenu::new(toggle.clone(), dom::query(document, selectors::NAV_MENU));

    let on_toggle = menu.clone();
    listeners.push(dom::listen(&toggle, "click", move |_| on_toggle.toggle())?);

    for link in dom::query_all(document, selectors::NAV_LINKS) {
        let on_link = menu.clone();
        listeners.push(dom::listen(&link, "click", move |_| on_link.close())?);
    }

    let on_outside = menu;
    listeners.push(dom::listen(document, "click", move |e| on_outside.on_document_click(&e))?);

    Ok(())
}
