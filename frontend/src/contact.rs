use serde::Serialize;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::config::selectors;
use crate::dom::{self, Listener};
use crate::error::PageError;

pub const NOTICE_BACKGROUND: &str = "#d4edda";
pub const NOTICE_COLOR: &str = "#155724";
pub const NOTICE_BORDER: &str = "1px solid #c3e6cb";
pub const NOTICE_HTML: &str = "<strong>Thank you for contacting us!</strong><br>\
    We've received your message and will respond within 1-2 business days.";

/// What the visitor typed, captured at submit time. Nothing sends it anywhere yet.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

/// The parts of the contact form the submit handler touches.
pub trait ContactSurface {
    fn field_value(&self, id: &str) -> String;
    fn show_notice(&self);
    fn reset(&self);
    fn reveal_notice(&self);
}

/// Handles one submission: capture, confirm, clear. Field contents never change the outcome.
pub fn handle_submission<S: ContactSurface + ?Sized>(surface: &S) -> ContactDraft {
    let draft = ContactDraft {
        name: surface.field_value("name"),
        email: surface.field_value("email"),
        phone: surface.field_value("phone"),
        subject: surface.field_value("subject"),
        message: surface.field_value("message"),
    };
    surface.show_notice();
    surface.reset();
    surface.reveal_notice();
    draft
}

pub struct DomContactForm {
    document: Document,
    form: HtmlFormElement,
    notice: Option<Element>,
}

impl DomContactForm {
    pub fn find(document: &Document) -> Option<Self> {
        let form = document
            .get_element_by_id(selectors::CONTACT_FORM_ID)?
            .dyn_into::<HtmlFormElement>()
            .ok()?;
        Some(Self {
            document: document.clone(),
            form,
            notice: document.get_element_by_id(selectors::FORM_MESSAGE_ID),
        })
    }
}

pub fn control_value(element: &Element) -> String {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else {
        String::new()
    }
}

impl ContactSurface for DomContactForm {
    fn field_value(&self, id: &str) -> String {
        self.document
            .get_element_by_id(id)
            .map(|el| control_value(&el))
            .unwrap_or_default()
    }

    fn show_notice(&self) {
        let Some(notice) = &self.notice else {
            log::warn!("Contact form has no message container");
            return;
        };
        dom::set_style(notice, "display", "block");
        dom::set_style(notice, "background", NOTICE_BACKGROUND);
        dom::set_style(notice, "color", NOTICE_COLOR);
        dom::set_style(notice, "border", NOTICE_BORDER);
        notice.set_inner_html(NOTICE_HTML);
    }

    fn reset(&self) {
        self.form.reset();
    }

    fn reveal_notice(&self) {
        if let Some(notice) = &self.notice {
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Nearest);
            notice.scroll_into_view_with_scroll_into_view_options(&options);
        }
    }
}

pub fn install(document: &Document, listeners: &mut Vec<Listener>) -> Result<(), PageError> {
    let Some(form) = DomContactForm::find(document) else {
        log::debug!("No contact form on this page");
        return Ok(());
    };
    let target = form.form.clone();
    let listener = dom::listen(&target, "submit", move |event| {
        event.prevent_default();
        let draft = handle_submission(&form);
        match serde_json::to_string(&draft) {
            Ok(json) => log::debug!("Captured contact draft: {}", json),
            Err(e) => log::debug!("Captured contact draft (unserializable): {}", e),
        }
    })?;
    listeners.push(listener);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct FakeForm {
        fields: RefCell<HashMap<String, String>>,
        notice: RefCell<Option<String>>,
        calls: RefCell<Vec<&'static str>>,
    }

    impl FakeForm {
        fn with(fields: &[(&str, &str)]) -> Self {
            let form = FakeForm::default();
            for (id, value) in fields {
                form.fields.borrow_mut().insert(id.to_string(), value.to_string());
            }
            form
        }
    }

    impl ContactSurface for FakeForm {
        fn field_value(&self, id: &str) -> String {
            self.fields.borrow().get(id).cloned().unwrap_or_default()
        }
        fn show_notice(&self) {
            *self.notice.borrow_mut() = Some(NOTICE_HTML.to_string());
            self.calls.borrow_mut().push("show");
        }
        fn reset(&self) {
            self.fields.borrow_mut().values_mut().for_each(String::clear);
            self.calls.borrow_mut().push("reset");
        }
        fn reveal_notice(&self) {
            self.calls.borrow_mut().push("reveal");
        }
    }

    #[test]
    fn captures_fields_then_clears_them() {
        let form = FakeForm::with(&[
            ("name", "Ada"),
            ("email", "ada@example.org"),
            ("phone", "555-0100"),
            ("subject", "Volunteering"),
            ("message", "Saturdays work for me."),
        ]);
        let draft = handle_submission(&form);
        assert_eq!(draft.name, "Ada");
        assert_eq!(draft.subject, "Volunteering");
        assert!(form.fields.borrow().values().all(String::is_empty));
        assert_eq!(*form.calls.borrow(), vec!["show", "reset", "reveal"]);
    }

    #[test]
    fn empty_and_invalid_input_still_succeeds() {
        for fields in [vec![], vec![("email", "not-an-email")]] {
            let form = FakeForm::with(&fields);
            handle_submission(&form);
            assert_eq!(form.notice.borrow().as_deref(), Some(NOTICE_HTML));
            assert!(form.fields.borrow().values().all(String::is_empty));
        }
    }

    #[test]
    fn draft_serializes_with_field_names() {
        let draft = ContactDraft { name: "Ada".into(), ..Default::default() };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["name"], "Ada");
        assert_eq!(json["message"], "");
    }
}
