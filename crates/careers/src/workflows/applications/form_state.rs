use std::collections::BTreeMap;

use super::domain::ApplicationForm;
use super::validation::{validate_field, FormField, ResumeMeta, ValidationError};

/// Per-field interaction state. Errors only surface once a field is touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FieldState {
    #[default]
    Untouched,
    Valid,
    Invalid(ValidationError),
}

impl FieldState {
    pub fn is_touched(self) -> bool {
        !matches!(self, FieldState::Untouched)
    }

    fn from_result(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => FieldState::Valid,
            Err(error) => FieldState::Invalid(error),
        }
    }
}

/// Tracks touched/validated state for every form field.
///
/// Transitions: blur always validates and marks the field touched; a value change only
/// revalidates a field that is already touched; a submit attempt touches every field.
#[derive(Debug, Clone, Default)]
pub struct FormTracker {
    fields: BTreeMap<FormField, FieldState>,
}

impl FormTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, field: FormField) -> FieldState {
        self.fields.get(&field).copied().unwrap_or_default()
    }

    pub fn blur(
        &mut self,
        field: FormField,
        value: &str,
        file: Option<&ResumeMeta>,
    ) -> FieldState {
        let state = FieldState::from_result(validate_field(field, value, file));
        self.fields.insert(field, state);
        state
    }

    pub fn change(
        &mut self,
        field: FormField,
        value: &str,
        file: Option<&ResumeMeta>,
    ) -> FieldState {
        if !self.state(field).is_touched() {
            return FieldState::Untouched;
        }
        self.blur(field, value, file)
    }

    /// Touch and validate every field; returns whether the whole form is valid.
    pub fn submit_attempt(&mut self, form: &ApplicationForm, resume: Option<&ResumeMeta>) -> bool {
        let inputs = [
            (FormField::Name, form.name.as_str()),
            (FormField::Email, form.email.as_str()),
            (FormField::Phone, form.phone.as_str()),
            (FormField::Resume, ""),
        ];

        let mut valid = true;
        for (field, value) in inputs {
            if let FieldState::Invalid(_) = self.blur(field, value, resume) {
                valid = false;
            }
        }
        valid
    }

    pub fn visible_error(&self, field: FormField) -> Option<ValidationError> {
        match self.state(field) {
            FieldState::Invalid(error) => Some(error),
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.fields.clear();
    }
}
