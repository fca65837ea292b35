//! Field-level validation rules for the application form.
//!
//! Each field has a fixed rule list evaluated in order; the first failing rule wins. The same
//! résumé constraints are enforced again by the submission pipeline, which is authoritative.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::messages::{Locale, Message};

/// Largest accepted résumé, in bytes.
pub const MAX_RESUME_BYTES: u64 = 10 * 1024 * 1024;
/// The only accepted résumé content type.
pub const RESUME_CONTENT_TYPE: &str = "application/pdf";

const NAME_MIN_CHARS: usize = 2;
const PHONE_MIN_CHARS: usize = 9;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const PHONE_PATTERN: &str = r"^[0-9\s+\-()]+$";

/// Compiles `source` once per cell. Patterns are constants covered by tests, so `None` only
/// follows an edit that broke one; values then fail the format rule instead of panicking.
pub(crate) fn cached_pattern(
    cell: &'static OnceLock<Option<Regex>>,
    source: &str,
) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(source).ok()).as_ref()
}

fn email_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    cached_pattern(&PATTERN, EMAIL_PATTERN)
}

fn phone_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    cached_pattern(&PATTERN, PHONE_PATTERN)
}

/// Fields of the application form that carry validation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormField {
    Name,
    Email,
    Phone,
    Resume,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::Resume,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::Resume => "resume",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == raw)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the validator needs to know about an attached file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeMeta {
    pub content_type: String,
    pub size: u64,
}

/// First failing rule for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(FormField),
    #[error("{field} must be at least {min} characters")]
    TooShort { field: FormField, min: usize },
    #[error("{0} has an invalid format")]
    InvalidFormat(FormField),
    #[error("resume must be an application/pdf file")]
    ResumeNotPdf,
    #[error("resume exceeds the 10 MiB limit")]
    ResumeTooLarge,
}

impl ValidationError {
    pub fn field(self) -> FormField {
        match self {
            ValidationError::Required(field)
            | ValidationError::TooShort { field, .. }
            | ValidationError::InvalidFormat(field) => field,
            ValidationError::ResumeNotPdf | ValidationError::ResumeTooLarge => FormField::Resume,
        }
    }

    pub fn message(self, locale: Locale) -> &'static str {
        let message = match self {
            ValidationError::Required(FormField::Name) => Message::NameRequired,
            ValidationError::Required(FormField::Email) => Message::EmailRequired,
            ValidationError::Required(FormField::Phone) => Message::PhoneRequired,
            ValidationError::Required(FormField::Resume) => Message::ResumeRequired,
            ValidationError::TooShort {
                field: FormField::Phone,
                ..
            } => Message::PhoneTooShort,
            ValidationError::TooShort { .. } => Message::NameTooShort,
            ValidationError::InvalidFormat(FormField::Phone) => Message::PhoneInvalid,
            ValidationError::InvalidFormat(_) => Message::EmailInvalid,
            ValidationError::ResumeNotPdf => Message::ResumeNotPdf,
            ValidationError::ResumeTooLarge => Message::ResumeTooLarge,
        };
        message.text(locale)
    }
}

/// Validate a field by its form name. Names without rules always pass.
pub fn validate(
    field_name: &str,
    value: &str,
    file: Option<&ResumeMeta>,
) -> Result<(), ValidationError> {
    match FormField::parse(field_name) {
        Some(field) => validate_field(field, value, file),
        None => Ok(()),
    }
}

pub fn validate_field(
    field: FormField,
    value: &str,
    file: Option<&ResumeMeta>,
) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    match field {
        FormField::Name => {
            required(field, trimmed)?;
            min_chars(field, trimmed, NAME_MIN_CHARS)
        }
        FormField::Email => {
            required(field, trimmed)?;
            pattern(field, value, email_pattern())
        }
        FormField::Phone => {
            required(field, trimmed)?;
            min_chars(field, trimmed, PHONE_MIN_CHARS)?;
            pattern(field, value, phone_pattern())
        }
        FormField::Resume => {
            let file = file.ok_or(ValidationError::Required(field))?;
            if file.content_type != RESUME_CONTENT_TYPE {
                return Err(ValidationError::ResumeNotPdf);
            }
            if file.size > MAX_RESUME_BYTES {
                return Err(ValidationError::ResumeTooLarge);
            }
            Ok(())
        }
    }
}

fn required(field: FormField, trimmed: &str) -> Result<(), ValidationError> {
    if trimmed.is_empty() {
        Err(ValidationError::Required(field))
    } else {
        Ok(())
    }
}

fn min_chars(field: FormField, trimmed: &str, min: usize) -> Result<(), ValidationError> {
    if trimmed.chars().count() < min {
        Err(ValidationError::TooShort { field, min })
    } else {
        Ok(())
    }
}

// Patterns apply to the raw value, as typed.
fn pattern(
    field: FormField,
    value: &str,
    pattern: Option<&Regex>,
) -> Result<(), ValidationError> {
    if pattern.is_some_and(|pattern| pattern.is_match(value)) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat(field))
    }
}
