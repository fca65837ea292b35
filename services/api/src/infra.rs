use async_trait::async_trait;
use careers::workflows::applications::{
    ApplicationRecord, ApplicationStatus, ApplicationStore, NewApplication, ObjectStorage,
    StorageError, StorageKey, StoreError,
};
use careers::workflows::review::{filter_applications, sort_applications, FilterCriteria};
use careers::workflows::vacancies::{VacancyRecord, VacancyStore};
use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Local résumé bucket used when no Supabase project is configured.
#[derive(Default, Clone)]
pub(crate) struct InMemoryResumeStorage {
    objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryResumeStorage {
    #[cfg(test)]
    pub(crate) fn keys(&self) -> Vec<String> {
        let guard = self.objects.lock().expect("storage mutex poisoned");
        guard.keys().cloned().collect()
    }
}

#[async_trait]
impl ObjectStorage for InMemoryResumeStorage {
    async fn upload(
        &self,
        key: &StorageKey,
        _content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .objects
            .lock()
            .map_err(|_| StorageError::Unavailable("storage mutex poisoned".to_string()))?;
        if guard.contains_key(key.as_str()) {
            return Err(StorageError::AlreadyExists(key.to_string()));
        }
        guard.insert(key.to_string(), bytes);
        Ok(())
    }

    fn public_url(&self, key: &StorageKey) -> Result<String, StorageError> {
        Ok(format!("memory://resumes/{key}"))
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationStore {
    records: Arc<Mutex<Vec<ApplicationRecord>>>,
}

impl InMemoryApplicationStore {
    #[cfg(test)]
    pub(crate) fn with_records(records: Vec<ApplicationRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }
}

#[async_trait]
impl ApplicationStore for InMemoryApplicationStore {
    async fn insert(&self, application: NewApplication) -> Result<ApplicationRecord, StoreError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| StoreError::Unavailable("application mutex poisoned".to_string()))?;
        let record = ApplicationRecord {
            id: (guard.len() + 1).to_string(),
            name: application.name,
            email: application.email,
            phone: application.phone,
            vacancy_id: Some(application.vacancy_id),
            resume: Some(application.resume),
            status: ApplicationStatus::Pending,
            created_at: Some(Utc::now()),
        };
        guard.push(record.clone());
        Ok(record)
    }

    async fn list(&self, criteria: &FilterCriteria) -> Result<Vec<ApplicationRecord>, StoreError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| StoreError::Unavailable("application mutex poisoned".to_string()))?;
        let filtered = filter_applications(&guard, criteria);
        Ok(sort_applications(&filtered, criteria.sort))
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryVacancyStore {
    vacancies: Arc<Vec<VacancyRecord>>,
}

impl InMemoryVacancyStore {
    pub(crate) fn new(vacancies: Vec<VacancyRecord>) -> Self {
        Self {
            vacancies: Arc::new(vacancies),
        }
    }

    /// Postings served by a local run so the catalog and form have something to show.
    pub(crate) fn seeded() -> Self {
        Self::new(vec![
            VacancyRecord::new("1", "Backend Engineer"),
            VacancyRecord::new("2", "Product Designer"),
            VacancyRecord::new("3", "Customer Support Specialist"),
        ])
    }
}

#[async_trait]
impl VacancyStore for InMemoryVacancyStore {
    async fn list_vacancies(&self) -> Result<Vec<VacancyRecord>, StoreError> {
        Ok(self.vacancies.as_ref().clone())
    }
}
