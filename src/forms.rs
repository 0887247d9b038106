use gloo_timers::future::TimeoutFuture;
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{
    Document, Element, Event, HtmlButtonElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement,
};

use crate::config::SiteConfig;
use crate::dom;
use crate::error::Result;
use crate::notification::{show_notification, ToastKind};

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));
static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[1-9][0-9]{0,15}$").expect("phone pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Tel,
}

impl FieldKind {
    pub fn from_type(input_type: &str) -> Self {
        match input_type {
            "email" => FieldKind::Email,
            "tel" => FieldKind::Tel,
            _ => FieldKind::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRules {
    pub required: bool,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidEmail,
    InvalidPhone,
}

impl FieldError {
    pub fn message(self) -> &'static str {
        match self {
            FieldError::Required => "This field is required",
            FieldError::InvalidEmail => "Please enter a valid email address",
            FieldError::InvalidPhone => "Please enter a valid phone number",
        }
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// ASCII digits only once whitespace is gone, 1 to 16 of them, no leading
/// zero, optionally behind a `+`.
pub fn is_valid_phone(value: &str) -> bool {
    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    PHONE.is_match(&compact)
}

/// Checks a field's value against its rules. Optional empty fields pass.
pub fn validate(value: &str, rules: FieldRules) -> std::result::Result<(), FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return if rules.required {
            Err(FieldError::Required)
        } else {
            Ok(())
        };
    }
    match rules.kind {
        FieldKind::Email if !is_valid_email(value) => Err(FieldError::InvalidEmail),
        FieldKind::Tel if !is_valid_phone(value) => Err(FieldError::InvalidPhone),
        _ => Ok(()),
    }
}

/// Current value and rules of an `input`, `textarea` or `select`.
fn field_state(field: &Element) -> Option<(String, FieldRules)> {
    let required = field.has_attribute("required");
    if let Some(input) = field.dyn_ref::<HtmlInputElement>() {
        let kind = FieldKind::from_type(&input.type_());
        return Some((input.value(), FieldRules { required, kind }));
    }
    let value = if let Some(area) = field.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        field.dyn_ref::<HtmlSelectElement>()?.value()
    };
    Some((value, FieldRules { required, kind: FieldKind::Text }))
}

fn show_field_error(document: &Document, field: &Element, error: FieldError) -> Result<()> {
    dom::add_class(field, "error");
    let Some(parent) = field.parent_element() else {
        return Ok(());
    };
    let message = document.create_element("div")?;
    message.set_class_name("error-message");
    message.set_text_content(Some(error.message()));
    message.set_attribute(
        "style",
        "color: #e53e3e; font-size: 0.875rem; margin-top: 0.25rem;",
    )?;
    parent.append_child(&message)?;
    Ok(())
}

fn clear_field_error(field: &Element) {
    dom::remove_class(field, "error");
    if let Some(parent) = field.parent_element() {
        if let Some(message) = dom::query_in(&parent, ".error-message") {
            message.remove();
        }
    }
}

pub fn init_field_validation(document: &Document) -> Result<()> {
    let fields = dom::query_all(document, "input, textarea, select");
    for field in &fields {
        {
            let document = document.clone();
            let field = field.clone();
            dom::listen(&field.clone(), "blur", move |_| {
                clear_field_error(&field);
                let Some((value, rules)) = field_state(&field) else {
                    return;
                };
                if let Err(error) = validate(&value, rules) {
                    if let Err(err) = show_field_error(&document, &field, error) {
                        debug!("could not show field error: {}", err);
                    }
                }
            })?;
        }
        let target = field.clone();
        dom::listen(field, "input", move |_| clear_field_error(&target))?;
    }
    debug!("validating {} form fields", fields.len());
    Ok(())
}

/// Contact form submission.
///
/// There is no backend yet: after a fixed delay the form always reports
/// success. Replace the delay with the real request once an endpoint exists.
pub fn init_contact_form(document: &Document, config: &SiteConfig) -> Result<()> {
    let Some(form) = document.get_element_by_id("contact-form") else {
        debug!("no contact form on this page");
        return Ok(());
    };
    let delay_ms = config.submit_delay_ms;
    let toast_ms = config.toast_lifetime_ms;
    dom::listen(&form.clone(), "submit", move |e: Event| {
        e.prevent_default();
        let Some(form) = form.dyn_ref::<HtmlFormElement>().cloned() else {
            return;
        };
        let button = form
            .query_selector(r#"button[type="submit"]"#)
            .ok()
            .flatten()
            .and_then(|b| b.dyn_into::<HtmlButtonElement>().ok());
        let original = button.as_ref().map(|b| b.inner_html()).unwrap_or_default();
        if let Some(button) = &button {
            button.set_inner_html(r#"<i class="fas fa-spinner fa-spin"></i> Sending..."#);
            button.set_disabled(true);
        }
        info!("contact form submitted");

        spawn_local(async move {
            TimeoutFuture::new(delay_ms).await;
            if let Err(err) = show_notification(
                "Message sent successfully! We will get back to you soon.",
                ToastKind::Success,
                toast_ms,
            ) {
                warn!("could not show confirmation: {}", err);
            }
            form.reset();
            if let Some(button) = button {
                button.set_inner_html(&original);
                button.set_disabled(false);
            }
        });
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    const EMAIL_FIELD: FieldRules = FieldRules { required: false, kind: FieldKind::Email };
    const TEL_FIELD: FieldRules = FieldRules { required: false, kind: FieldKind::Tel };

    #[test_case("a@b.co", true; "plain address")]
    #[test_case("first.last@firm.example.com", true; "dotted local part")]
    #[test_case("a@b", false; "domain without dot")]
    #[test_case("@b.co", false; "empty local part")]
    #[test_case("a b@c.co", false; "space in local part")]
    #[test_case("a@@b.co", false; "double at")]
    fn email(value: &str, valid: bool) {
        assert_eq!(is_valid_email(value), valid);
    }

    #[test_case("+15551234567", true; "international")]
    #[test_case("555 123 4567", true; "spaced digits")]
    #[test_case("7", true; "single digit")]
    #[test_case("abc123", false; "letters")]
    #[test_case("12345678901234567890", false; "twenty digits")]
    #[test_case("0555123456", false; "leading zero")]
    #[test_case("+", false; "plus only")]
    #[test_case("555-1234", false; "dash")]
    #[test_case("+1٥٥٥١٢٣٤٥٦٧", false; "arabic indic digits")]
    #[test_case("１２３", false; "fullwidth digits")]
    fn phone(value: &str, valid: bool) {
        assert_eq!(is_valid_phone(value), valid);
    }

    #[test]
    fn required_blank_field_fails() {
        let rules = FieldRules { required: true, kind: FieldKind::Text };
        assert_eq!(validate("   ", rules), Err(FieldError::Required));
        assert_eq!(validate("Jane", rules), Ok(()));
    }

    #[test]
    fn optional_blank_fields_pass_format_checks() {
        assert_eq!(validate("", EMAIL_FIELD), Ok(()));
        assert_eq!(validate("", TEL_FIELD), Ok(()));
    }

    #[test]
    fn formats_are_checked_after_trimming() {
        assert_eq!(validate("  a@b.co  ", EMAIL_FIELD), Ok(()));
        assert_eq!(validate("a@b", EMAIL_FIELD), Err(FieldError::InvalidEmail));
        assert_eq!(validate("abc123", TEL_FIELD), Err(FieldError::InvalidPhone));
    }

    #[test]
    fn required_email_reports_required_before_format() {
        let rules = FieldRules { required: true, kind: FieldKind::Email };
        assert_eq!(validate("", rules), Err(FieldError::Required));
    }

    #[test]
    fn input_types_map_to_kinds() {
        assert_eq!(FieldKind::from_type("email"), FieldKind::Email);
        assert_eq!(FieldKind::from_type("tel"), FieldKind::Tel);
        assert_eq!(FieldKind::from_type("text"), FieldKind::Text);
        assert_eq!(FieldKind::from_type("number"), FieldKind::Text);
    }

    #[test]
    fn messages_match_copy() {
        assert_eq!(FieldError::Required.message(), "This field is required");
        assert_eq!(
            FieldError::InvalidEmail.message(),
            "Please enter a valid email address"
        );
    }
}
