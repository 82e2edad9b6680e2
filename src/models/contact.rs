// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Contact form domain model and field validation (UI-agnostic).

use email_address::EmailAddress;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::attachment::Attachment;

/// Minimum trimmed name length under [`ValidationPolicy::Strict`].
pub const STRICT_MIN_NAME_CHARS: usize = 2;
/// Minimum trimmed message length under [`ValidationPolicy::Strict`].
pub const STRICT_MIN_MESSAGE_CHARS: usize = 10;

/// Text fields of the contact form, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    /// Human-readable label shown next to the input.
    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }

    /// Multipart form key used when submitting.
    pub fn form_key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        }
    }
}

/// How strictly user input is checked before submission.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    /// Required fields plus a loose `@`/`.` email shape check.
    #[default]
    Minimal,
    /// Adds minimum lengths for name and message and RFC email parsing.
    Strict,
}

/// A single field-level validation failure.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("{} is required.", .0.label())]
    Required(Field),
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("{} must be at least {min} characters.", .field.label())]
    TooShort { field: Field, min: usize },
}

impl FieldError {
    /// The field this error belongs to.
    pub fn field(&self) -> Field {
        match self {
            FieldError::Required(field) | FieldError::TooShort { field, .. } => *field,
            FieldError::InvalidEmail => Field::Email,
        }
    }
}

/// Raw, user-entered form values.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Subject => self.subject = value,
            Field::Message => self.message = value,
        }
    }
}

/// Validated, trimmed contact data ready for submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub attachment: Option<Attachment>,
}

impl ContactRequest {
    /// Attach (or detach) the optional file.
    pub fn with_attachment(mut self, attachment: Option<Attachment>) -> Self {
        self.attachment = attachment;
        self
    }

    /// Trimmed value of `field`.
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    /// Text parts in submission order as `(form key, value)` pairs.
    pub fn text_parts(&self) -> [(&'static str, &str); 4] {
        Field::ALL.map(|field| (field.form_key(), self.value(field)))
    }
}

/// Validate raw form input.
///
/// Every failing field is reported, in form order. On success the returned
/// request holds trimmed values and no attachment.
///
/// # Examples
///
/// ```rust,ignore
/// let fields = ContactFields { name: "Ada".into(), ..Default::default() };
/// let errors = validate(&fields, ValidationPolicy::Minimal).unwrap_err();
/// assert_eq!(errors[0].field(), Field::Email);
/// ```
pub fn validate(
    fields: &ContactFields,
    policy: ValidationPolicy,
) -> Result<ContactRequest, Vec<FieldError>> {
    let errors: Vec<FieldError> = Field::ALL
        .into_iter()
        .filter_map(|field| {
            let value = fields.get(field).trim();
            match field {
                Field::Email => check_email(value, policy),
                _ => check_text(field, value, policy),
            }
        })
        .collect();

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ContactRequest {
        name: fields.name.trim().to_string(),
        email: fields.email.trim().to_string(),
        subject: fields.subject.trim().to_string(),
        message: fields.message.trim().to_string(),
        attachment: None,
    })
}

fn check_text(field: Field, value: &str, policy: ValidationPolicy) -> Option<FieldError> {
    if value.is_empty() {
        return Some(FieldError::Required(field));
    }

    let min = match (policy, field) {
        (ValidationPolicy::Strict, Field::Name) => STRICT_MIN_NAME_CHARS,
        (ValidationPolicy::Strict, Field::Message) => STRICT_MIN_MESSAGE_CHARS,
        _ => return None,
    };

    (value.chars().count() < min).then_some(FieldError::TooShort { field, min })
}

fn check_email(value: &str, policy: ValidationPolicy) -> Option<FieldError> {
    if value.is_empty() {
        return Some(FieldError::Required(Field::Email));
    }
    if !value.contains('@') || !value.contains('.') {
        return Some(FieldError::InvalidEmail);
    }
    if policy == ValidationPolicy::Strict
        && EmailAddress::parse_with_options(value, Default::default()).is_err()
    {
        return Some(FieldError::InvalidEmail);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactFields {
        ContactFields {
            name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            subject: "Engines".into(),
            message: "About the analytical engine.".into(),
        }
    }

    #[test]
    fn valid_input_is_trimmed() {
        let mut fields = filled();
        fields.name = "  Ada  ".into();
        fields.message = "\n hello \t".into();

        let request = validate(&fields, ValidationPolicy::Minimal).expect("valid");

        assert_eq!(request.name, "Ada");
        assert_eq!(request.message, "hello");
        assert!(request.attachment.is_none());
    }

    #[test]
    fn whitespace_only_fields_are_required() {
        for field in Field::ALL {
            let mut fields = filled();
            fields.set(field, "   \t".into());

            let errors = validate(&fields, ValidationPolicy::Minimal).unwrap_err();

            assert_eq!(errors, vec![FieldError::Required(field)], "{field:?}");
            assert!(errors[0].to_string().contains(field.label()));
        }
    }

    #[test]
    fn all_failures_are_reported_in_form_order() {
        let errors = validate(&ContactFields::default(), ValidationPolicy::Minimal).unwrap_err();
        let fields: Vec<Field> = errors.iter().map(FieldError::field).collect();

        assert_eq!(fields, Field::ALL.to_vec());
    }

    #[test]
    fn email_without_at_or_dot_is_rejected() {
        for bad in ["ada.example.com", "ada@example", "plain"] {
            let mut fields = filled();
            fields.email = bad.into();

            let errors = validate(&fields, ValidationPolicy::Minimal).unwrap_err();

            assert_eq!(errors, vec![FieldError::InvalidEmail], "{bad}");
        }
    }

    #[test]
    fn minimal_policy_accepts_loose_email_shape() {
        let mut fields = filled();
        fields.email = "ada lovelace@example.com".into();

        assert!(validate(&fields, ValidationPolicy::Minimal).is_ok());
        assert_eq!(
            validate(&fields, ValidationPolicy::Strict).unwrap_err(),
            vec![FieldError::InvalidEmail]
        );
    }

    #[test]
    fn strict_policy_enforces_minimum_lengths() {
        let mut fields = filled();
        fields.name = "A".into();
        fields.message = "too short".into();

        assert!(validate(&fields, ValidationPolicy::Minimal).is_ok());

        let errors = validate(&fields, ValidationPolicy::Strict).unwrap_err();
        assert_eq!(
            errors,
            vec![
                FieldError::TooShort {
                    field: Field::Name,
                    min: STRICT_MIN_NAME_CHARS
                },
                FieldError::TooShort {
                    field: Field::Message,
                    min: STRICT_MIN_MESSAGE_CHARS
                },
            ]
        );
        assert_eq!(errors[0].to_string(), "Name must be at least 2 characters.");
    }

    #[test]
    fn strict_lengths_count_characters_not_bytes() {
        let mut fields = filled();
        fields.name = "Żó".into();

        assert!(validate(&fields, ValidationPolicy::Strict).is_ok());
    }

    #[test]
    fn text_parts_follow_form_order() {
        let request = validate(&filled(), ValidationPolicy::Minimal).unwrap();

        assert_eq!(
            request.text_parts(),
            [
                ("name", "Ada Lovelace"),
                ("email", "ada@example.com"),
                ("subject", "Engines"),
                ("message", "About the analytical engine."),
            ]
        );
    }

    #[test]
    fn policy_deserializes_from_lowercase() {
        let policy: ValidationPolicy = serde_json::from_str("\"strict\"").unwrap();
        assert_eq!(policy, ValidationPolicy::Strict);
    }
}
