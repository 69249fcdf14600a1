use once_cell::sync::Lazy;
use regex::Regex;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

use crate::config::selectors;
use crate::contact::control_value;
use crate::dom::{self, Listener};
use crate::error::PageError;

pub const INVALID_BORDER: &str = "#dc3545";
pub const NEUTRAL_BORDER: &str = "#e0e0e0";
pub const FOCUS_BORDER: &str = "var(--primary-color)";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// A form control as seen on blur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSnapshot<'a> {
    pub required: bool,
    pub is_email: bool,
    pub value: &'a str,
}

/// Border colour for a control that just lost focus.
pub fn blur_border(field: FieldSnapshot<'_>) -> &'static str {
    if field.required && field.value.is_empty() {
        INVALID_BORDER
    } else if field.is_email && !field.value.is_empty() && !is_valid_email(field.value) {
        INVALID_BORDER
    } else {
        NEUTRAL_BORDER
    }
}

fn is_email_input(element: &Element) -> bool {
    element
        .dyn_ref::<HtmlInputElement>()
        .map(|input| input.type_().eq_ignore_ascii_case("email"))
        .unwrap_or(false)
}

pub fn install(document: &Document, listeners: &mut Vec<Listener>) -> Result<(), PageError> {
    for field in dom::query_all(document, selectors::FORM_FIELDS) {
        let on_blur = field.clone();
        listeners.push(dom::listen(&field, "blur", move |_| {
            let value = control_value(&on_blur);
            let border = blur_border(FieldSnapshot {
                required: on_blur.has_attribute("required"),
                is_email: is_email_input(&on_blur),
                value: &value,
            });
            dom::set_style(&on_blur, "border-color", border);
        })?);

        let on_focus = field.clone();
        listeners.push(dom::listen(&field, "focus", move |_| {
            dom::set_style(&on_focus, "border-color", FOCUS_BORDER);
        })?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(value: &str) -> FieldSnapshot<'_> {
        FieldSnapshot { required: false, is_email: true, value }
    }

    #[test]
    fn well_formed_email_is_never_flagged() {
        assert_eq!(blur_border(email("a@b.com")), NEUTRAL_BORDER);
        assert_eq!(
            blur_border(FieldSnapshot { required: true, ..email("a@b.com") }),
            NEUTRAL_BORDER
        );
    }

    #[test]
    fn malformed_email_is_flagged() {
        assert_eq!(blur_border(email("not-an-email")), INVALID_BORDER);
        assert_eq!(blur_border(email("a b@c.org")), INVALID_BORDER);
        assert_eq!(blur_border(email("a@b")), INVALID_BORDER);
    }

    #[test]
    fn empty_optional_email_is_neutral() {
        assert_eq!(blur_border(email("")), NEUTRAL_BORDER);
    }

    #[test]
    fn required_fields_must_not_be_empty() {
        let name = FieldSnapshot { required: true, is_email: false, value: "" };
        assert_eq!(blur_border(name), INVALID_BORDER);
        assert_eq!(blur_border(FieldSnapshot { value: "Ada", ..name }), NEUTRAL_BORDER);
    }

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("volunteer@food.bank.org"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("a@.com"));
    }
}
