use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::applications::domain::{
    ApplicationForm, ApplicationRecord, ApplicationStatus, NewApplication, ResumeUpload,
};
use crate::workflows::applications::messages::Locale;
use crate::workflows::applications::repository::{
    ApplicationStore, ObjectStorage, StorageError, StorageKey, StoreError,
};
use crate::workflows::applications::service::{IntakeService, IntakeSettings};
use crate::workflows::applications::validation::{ResumeMeta, RESUME_CONTENT_TYPE};
use crate::workflows::review::{filter_applications, sort_applications, FilterCriteria};

pub(super) const BOUNDARY: &str = "careers-test-boundary";

pub(super) fn fixed_clock() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(1_700_000_000_000)
        .single()
        .expect("valid instant")
}

pub(super) fn form() -> ApplicationForm {
    ApplicationForm {
        name: "Ana Beridze".to_string(),
        email: "ana@example.com".to_string(),
        phone: "+995 555 123 456".to_string(),
        vacancy_id: "v1".to_string(),
    }
}

pub(super) fn pdf(size: usize) -> ResumeUpload {
    ResumeUpload {
        file_name: "Ana CV.pdf".to_string(),
        content_type: RESUME_CONTENT_TYPE.to_string(),
        bytes: vec![b'%'; size],
    }
}

pub(super) fn pdf_meta(size: u64) -> ResumeMeta {
    ResumeMeta {
        content_type: RESUME_CONTENT_TYPE.to_string(),
        size,
    }
}

pub(super) fn settings(locale: Locale) -> IntakeSettings {
    IntakeSettings {
        resume_folder: "resumes".to_string(),
        locale,
    }
}

pub(super) fn build_service() -> (
    IntakeService<MemoryStorage, MemoryStore>,
    Arc<MemoryStorage>,
    Arc<MemoryStore>,
) {
    service_with(MemoryStorage::default(), MemoryStore::default(), Locale::English)
}

pub(super) fn service_with(
    storage: MemoryStorage,
    store: MemoryStore,
    locale: Locale,
) -> (
    IntakeService<MemoryStorage, MemoryStore>,
    Arc<MemoryStorage>,
    Arc<MemoryStore>,
) {
    let storage = Arc::new(storage);
    let store = Arc::new(store);
    let service = IntakeService::new(storage.clone(), store.clone(), settings(locale))
        .with_clock(fixed_clock);
    (service, storage, store)
}

#[derive(Default)]
pub(super) struct MemoryStorage {
    objects: Mutex<Vec<(StorageKey, String, usize)>>,
    attempts: Mutex<usize>,
    failing: bool,
}

impl MemoryStorage {
    pub(super) fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub(super) fn attempts(&self) -> usize {
        *self.attempts.lock().expect("storage mutex poisoned")
    }

    pub(super) fn keys(&self) -> Vec<String> {
        self.objects
            .lock()
            .expect("storage mutex poisoned")
            .iter()
            .map(|(key, _, _)| key.to_string())
            .collect()
    }
}

#[async_trait]
impl ObjectStorage for MemoryStorage {
    async fn upload(
        &self,
        key: &StorageKey,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), StorageError> {
        *self.attempts.lock().expect("storage mutex poisoned") += 1;
        if self.failing {
            return Err(StorageError::Unavailable("bucket offline".to_string()));
        }

        let mut objects = self.objects.lock().expect("storage mutex poisoned");
        if objects.iter().any(|(existing, _, _)| existing == key) {
            return Err(StorageError::AlreadyExists(key.to_string()));
        }
        objects.push((key.clone(), content_type.to_string(), bytes.len()));
        Ok(())
    }

    fn public_url(&self, key: &StorageKey) -> Result<String, StorageError> {
        Ok(format!("https://storage.test/resume/{key}"))
    }
}

#[derive(Default)]
pub(super) struct MemoryStore {
    records: Mutex<Vec<ApplicationRecord>>,
    inserts: Mutex<usize>,
    failing: bool,
}

impl MemoryStore {
    pub(super) fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub(super) fn inserts(&self) -> usize {
        *self.inserts.lock().expect("store mutex poisoned")
    }

    pub(super) fn records(&self) -> Vec<ApplicationRecord> {
        self.records.lock().expect("store mutex poisoned").clone()
    }
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn insert(&self, application: NewApplication) -> Result<ApplicationRecord, StoreError> {
        *self.inserts.lock().expect("store mutex poisoned") += 1;
        if self.failing {
            return Err(StoreError::Unavailable("database offline".to_string()));
        }

        let mut records = self.records.lock().expect("store mutex poisoned");
        let record = ApplicationRecord {
            id: (records.len() + 1).to_string(),
            name: application.name,
            email: application.email,
            phone: application.phone,
            vacancy_id: Some(application.vacancy_id),
            resume: Some(application.resume),
            status: ApplicationStatus::Pending,
            created_at: Some(fixed_clock()),
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn list(&self, criteria: &FilterCriteria) -> Result<Vec<ApplicationRecord>, StoreError> {
        let records = self.records.lock().expect("store mutex poisoned");
        let filtered = filter_applications(&records, criteria);
        Ok(sort_applications(&filtered, criteria.sort))
    }
}

/// Encode a multipart/form-data body with text fields and an optional file part.
pub(super) fn multipart_body(fields: &[(&str, &str)], resume: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, content_type, bytes)) = resume {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub(super) fn form_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "Ana Beridze"),
        ("email", "ana@example.com"),
        ("phone", "+995 555 123 456"),
        ("vacancyId", "v1"),
    ]
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
