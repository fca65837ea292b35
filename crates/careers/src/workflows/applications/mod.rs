//! Applicant-facing intake: field validation, form state, and the submission pipeline.

pub mod domain;
pub mod form_state;
pub mod messages;
pub mod repository;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{ApplicationForm, ApplicationRecord, ApplicationStatus, NewApplication, ResumeUpload};
pub use form_state::{FieldState, FormTracker};
pub use messages::{Locale, Message};
pub use repository::{
    normalize_file_name, ApplicationStore, ObjectStorage, StorageError, StorageKey, StoreError,
};
pub use router::intake_router;
pub use service::{
    ApplicationReceipt, IntakeError, IntakeService, IntakeSettings, SubmissionState,
};
pub use validation::{
    validate, validate_field, FormField, ResumeMeta, ValidationError, MAX_RESUME_BYTES,
    RESUME_CONTENT_TYPE,
};
