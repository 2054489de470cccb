//! Contact form inquiries.

use serde::{Deserialize, Serialize};

use crate::types::{Email, EmailError};

/// Service named on an inquiry when the visitor picks none.
pub const DEFAULT_SERVICE: &str = "General Inquiry";

/// Longest accepted inquiry message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 5_000;

/// Reasons an inquiry is refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InquiryError {
    #[error("name and message are required")]
    MissingField,
    #[error("invalid email: {0}")]
    Email(#[from] EmailError),
    #[error("message must be at most {max} characters")]
    MessageTooLong { max: usize },
}

/// Contact form as posted by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InquiryForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub event_type: String,
    pub date: String,
    pub message: String,
    pub service: Option<String>,
}

/// A validated inquiry, serialized as the relay payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub event_type: String,
    pub date: String,
    pub message: String,
    pub service: String,
}

impl Inquiry {
    /// Validate a submitted form.
    ///
    /// # Errors
    ///
    /// Returns [`InquiryError`] when the name or message is blank, the email
    /// is malformed, or the message is too long.
    pub fn parse(form: InquiryForm) -> Result<Self, InquiryError> {
        let name = form.name.trim();
        let message = form.message.trim();
        if name.is_empty() || message.is_empty() {
            return Err(InquiryError::MissingField);
        }
        if message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(InquiryError::MessageTooLong {
                max: MAX_MESSAGE_CHARS,
            });
        }
        let email = Email::parse(&form.email)?;
        let service = form
            .service
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SERVICE);

        Ok(Self {
            name: name.to_string(),
            email,
            phone: form.phone.trim().to_string(),
            event_type: form.event_type.trim().to_string(),
            date: form.date.trim().to_string(),
            message: message.to_string(),
            service: service.to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form() -> InquiryForm {
        InquiryForm {
            name: "Ada".to_string(),
            email: "Ada@Example.com".to_string(),
            phone: " 0803 ".to_string(),
            event_type: "Wedding".to_string(),
            date: "2025-12-01".to_string(),
            message: "Need a bouquet".to_string(),
            service: None,
        }
    }

    #[test]
    fn test_parse_defaults_service() {
        let inquiry = Inquiry::parse(form()).unwrap();
        assert_eq!(inquiry.service, DEFAULT_SERVICE);
        assert_eq!(inquiry.email.as_str(), "ada@example.com");
        assert_eq!(inquiry.phone, "0803");
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        let mut f = form();
        f.message = "  ".to_string();
        assert_eq!(Inquiry::parse(f).unwrap_err(), InquiryError::MissingField);

        let mut f = form();
        f.email = "nope".to_string();
        assert!(matches!(
            Inquiry::parse(f).unwrap_err(),
            InquiryError::Email(_)
        ));
    }

    #[test]
    fn test_payload_uses_camel_case() {
        let payload = serde_json::to_value(Inquiry::parse(form()).unwrap()).unwrap();
        assert_eq!(payload["eventType"], "Wedding");
        assert_eq!(payload["email"], "ada@example.com");
    }

    #[test]
    fn test_form_accepts_partial_json() {
        let form: InquiryForm =
            serde_json::from_str(r#"{"name": "Ada", "email": "a@b.co", "message": "hi", "eventType": "Birthday"}"#)
                .unwrap();
        assert_eq!(form.event_type, "Birthday");
        assert!(form.service.is_none());
    }
}
