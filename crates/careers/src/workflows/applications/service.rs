use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::domain::{ApplicationForm, ApplicationRecord, NewApplication, ResumeUpload};
use super::messages::{Locale, Message};
use super::repository::{
    random_suffix, ApplicationStore, ObjectStorage, StorageError, StorageKey, StoreError,
};
use super::validation::{MAX_RESUME_BYTES, RESUME_CONTENT_TYPE};

/// Settings the intake pipeline needs from configuration.
#[derive(Debug, Clone)]
pub struct IntakeSettings {
    pub resume_folder: String,
    pub locale: Locale,
}

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub struct ApplicationReceipt {
    pub application: ApplicationRecord,
    pub storage_key: StorageKey,
}

/// State reported back to the application form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SubmissionState {
    Idle,
    Success { message: String },
    Error { message: String },
}

/// Orchestrates validation, résumé upload, and record insertion for one submission.
pub struct IntakeService<O, S> {
    storage: Arc<O>,
    store: Arc<S>,
    settings: IntakeSettings,
    clock: fn() -> DateTime<Utc>,
}

impl<O, S> IntakeService<O, S>
where
    O: ObjectStorage + 'static,
    S: ApplicationStore + 'static,
{
    pub fn new(storage: Arc<O>, store: Arc<S>, settings: IntakeSettings) -> Self {
        Self {
            storage,
            store,
            settings,
            clock: Utc::now,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn locale(&self) -> Locale {
        self.settings.locale
    }

    /// Run the pipeline. The record is inserted only after the upload succeeded.
    pub async fn submit(
        &self,
        form: ApplicationForm,
        resume: Option<ResumeUpload>,
    ) -> Result<ApplicationReceipt, IntakeError> {
        let name = form.name.trim();
        let email = form.email.trim();
        let phone = form.phone.trim();
        let vacancy_id = form.vacancy_id.trim();

        if [name, email, phone, vacancy_id].iter().any(|value| value.is_empty()) {
            return Err(IntakeError::MissingFields);
        }

        let resume = match resume {
            Some(resume) if resume.size() > 0 => resume,
            _ => return Err(IntakeError::MissingResume),
        };

        if resume.content_type != RESUME_CONTENT_TYPE {
            return Err(IntakeError::UnsupportedContentType(resume.content_type));
        }

        if resume.size() > MAX_RESUME_BYTES {
            return Err(IntakeError::ResumeTooLarge(resume.size()));
        }

        let key = StorageKey::for_resume(
            &self.settings.resume_folder,
            vacancy_id,
            (self.clock)(),
            &random_suffix(),
            &resume.file_name,
        );

        let ResumeUpload {
            content_type,
            bytes,
            ..
        } = resume;

        if let Err(err) = self.storage.upload(&key, &content_type, bytes).await {
            error!(key = %key, error = %err, "resume upload failed");
            return Err(IntakeError::Upload(err));
        }

        let resume_url = self.storage.public_url(&key).map_err(|err| {
            error!(key = %key, error = %err, "public url resolution failed");
            IntakeError::Unexpected(err.to_string())
        })?;

        let application = NewApplication {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            vacancy_id: vacancy_id.to_string(),
            resume: resume_url,
        };

        let stored = match self.store.insert(application).await {
            Ok(stored) => stored,
            Err(err) => {
                error!(error = %err, "application insert failed");
                warn!(key = %key, "uploaded resume left without an application record");
                return Err(IntakeError::Persist(err));
            }
        };

        info!(application_id = %stored.id, vacancy_id, "application submitted");

        Ok(ApplicationReceipt {
            application: stored,
            storage_key: key,
        })
    }

    /// Run the pipeline and translate the outcome for the form.
    pub async fn submit_form(
        &self,
        form: ApplicationForm,
        resume: Option<ResumeUpload>,
    ) -> SubmissionState {
        let result = self.submit(form, resume).await;
        self.outcome(&result)
    }

    pub fn outcome(&self, result: &Result<ApplicationReceipt, IntakeError>) -> SubmissionState {
        let locale = self.settings.locale;
        match result {
            Ok(_) => SubmissionState::Success {
                message: Message::Submitted.text(locale).to_string(),
            },
            Err(err) => {
                if err.is_user_correctable() {
                    debug!(error = %err, "submission rejected");
                }
                SubmissionState::Error {
                    message: err.message(locale).to_string(),
                }
            }
        }
    }
}

/// Error raised by the intake pipeline.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("required fields are missing")]
    MissingFields,
    #[error("resume file is missing or empty")]
    MissingResume,
    #[error("resume content type `{0}` is not application/pdf")]
    UnsupportedContentType(String),
    #[error("resume is {0} bytes, above the upload limit")]
    ResumeTooLarge(u64),
    #[error("resume upload failed: {0}")]
    Upload(#[source] StorageError),
    #[error("application insert failed: {0}")]
    Persist(#[source] StoreError),
    #[error("unexpected intake failure: {0}")]
    Unexpected(String),
}

impl IntakeError {
    /// Validation problems the applicant can fix by resubmitting.
    pub fn is_user_correctable(&self) -> bool {
        matches!(
            self,
            IntakeError::MissingFields
                | IntakeError::MissingResume
                | IntakeError::UnsupportedContentType(_)
                | IntakeError::ResumeTooLarge(_)
        )
    }

    pub fn message(&self, locale: Locale) -> &'static str {
        let message = match self {
            IntakeError::MissingFields => Message::MissingRequiredFields,
            IntakeError::MissingResume => Message::UploadResume,
            IntakeError::UnsupportedContentType(_) => Message::PdfOnly,
            IntakeError::ResumeTooLarge(_) => Message::FileTooLarge,
            IntakeError::Upload(_) => Message::UploadFailed,
            IntakeError::Persist(_) => Message::SaveFailed,
            IntakeError::Unexpected(_) => Message::Unexpected,
        };
        message.text(locale)
    }
}
