//! Supabase adapter: Storage API for résumés, PostgREST for application and vacancy rows.

pub mod query;

use async_trait::async_trait;
use reqwest::{header, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::{StorageConfig, SupabaseConfig};
use crate::workflows::applications::{
    ApplicationRecord, ApplicationStore, NewApplication, ObjectStorage, StorageError, StorageKey,
    StoreError,
};
use crate::workflows::review::{matches_criteria, FilterCriteria};
use crate::workflows::vacancies::{VacancyRecord, VacancyStore};

#[derive(Debug, thiserror::Error)]
pub enum SupabaseError {
    #[error("invalid supabase url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("supabase responded with {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("unexpected supabase response: {0}")]
    Decode(String),
}

impl SupabaseError {
    fn is_client_error(&self) -> bool {
        matches!(self, SupabaseError::Status { status, .. } if status.is_client_error())
    }
}

impl From<SupabaseError> for StoreError {
    fn from(err: SupabaseError) -> Self {
        match err {
            SupabaseError::Decode(reason) => StoreError::Decode(reason),
            err if err.is_client_error() => StoreError::Rejected(err.to_string()),
            SupabaseError::InvalidUrl { .. } => StoreError::Rejected(err.to_string()),
            err => StoreError::Unavailable(err.to_string()),
        }
    }
}

/// HTTP client bound to one Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    bucket: String,
    applications_table: String,
    vacancies_table: String,
}

impl SupabaseClient {
    pub fn new(project: &SupabaseConfig, storage: &StorageConfig) -> Result<Self, SupabaseError> {
        let base_url = Url::parse(&project.url).map_err(|err| SupabaseError::InvalidUrl {
            url: project.url.clone(),
            reason: err.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(SupabaseError::InvalidUrl {
                url: project.url.clone(),
                reason: "not a base url".to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("careers/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            api_key: project.api_key.clone(),
            bucket: storage.resume_bucket.clone(),
            applications_table: storage.applications_table.clone(),
            vacancies_table: storage.vacancies_table.clone(),
        })
    }

    /// Backend selected by configuration, if a project is configured.
    pub fn from_config(storage: &StorageConfig) -> Result<Option<Self>, SupabaseError> {
        storage
            .supabase
            .as_ref()
            .map(|project| Self::new(project, storage))
            .transpose()
    }

    fn url(&self, segments: &[&str]) -> Result<Url, SupabaseError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| SupabaseError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "not a base url".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn object_url(&self, key: &StorageKey) -> Result<Url, SupabaseError> {
        let mut segments = vec!["storage", "v1", "object", self.bucket.as_str()];
        segments.extend(key.as_str().split('/'));
        self.url(&segments)
    }

    fn public_object_url(&self, key: &StorageKey) -> Result<Url, SupabaseError> {
        let mut segments = vec!["storage", "v1", "object", "public", self.bucket.as_str()];
        segments.extend(key.as_str().split('/'));
        self.url(&segments)
    }

    fn table_url(&self, table: &str) -> Result<Url, SupabaseError> {
        self.url(&["rest", "v1", table])
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn fetch_rows<T>(&self, table: &str, params: &[(String, String)]) -> Result<Vec<T>, SupabaseError>
    where
        T: DeserializeOwned,
    {
        let url = self.table_url(table)?;
        debug!(table, "selecting rows");
        let response = self
            .authorized(self.http.get(url))
            .query(params)
            .send()
            .await?;
        decode(ensure_success(response).await?).await
    }
}

async fn ensure_success(response: Response) -> Result<Response, SupabaseError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SupabaseError::Status { status, body })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, SupabaseError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|err| SupabaseError::Decode(err.to_string()))
}

/// Applies the status predicate that [`query::application_params`] leaves to the caller.
fn retain_status(rows: Vec<ApplicationRecord>, criteria: &FilterCriteria) -> Vec<ApplicationRecord> {
    let status_only = FilterCriteria {
        status: criteria.status,
        ..FilterCriteria::default()
    };
    rows.into_iter()
        .filter(|row| matches_criteria(row, &status_only))
        .collect()
}

fn storage_error(key: &StorageKey, err: SupabaseError) -> StorageError {
    match &err {
        SupabaseError::Status { status, body }
            if *status == StatusCode::CONFLICT
                || body.contains("Duplicate")
                || body.contains("already exists") =>
        {
            StorageError::AlreadyExists(key.to_string())
        }
        err if err.is_client_error() => StorageError::Rejected(err.to_string()),
        SupabaseError::InvalidUrl { .. } | SupabaseError::Decode(_) => {
            StorageError::Rejected(err.to_string())
        }
        _ => StorageError::Unavailable(err.to_string()),
    }
}

#[async_trait]
impl ObjectStorage for SupabaseClient {
    async fn upload(
        &self,
        key: &StorageKey,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), StorageError> {
        let url = self.object_url(key).map_err(|err| storage_error(key, err))?;
        let response = self
            .authorized(self.http.post(url))
            .header(header::CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .map_err(|err| storage_error(key, err.into()))?;

        ensure_success(response)
            .await
            .map(|_| ())
            .map_err(|err| storage_error(key, err))
    }

    fn public_url(&self, key: &StorageKey) -> Result<String, StorageError> {
        self.public_object_url(key)
            .map(String::from)
            .map_err(|err| StorageError::PublicUrl(format!("{key}: {err}")))
    }
}

#[async_trait]
impl ApplicationStore for SupabaseClient {
    async fn insert(&self, application: NewApplication) -> Result<ApplicationRecord, StoreError> {
        let url = self.table_url(&self.applications_table)?;
        let response = self
            .authorized(self.http.post(url))
            .header("Prefer", "return=representation")
            .json(&application)
            .send()
            .await
            .map_err(SupabaseError::from)?;

        let rows: Vec<ApplicationRecord> = decode(ensure_success(response).await?).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("insert returned no rows".to_string()))
    }

    async fn list(&self, criteria: &FilterCriteria) -> Result<Vec<ApplicationRecord>, StoreError> {
        let params = query::application_params(criteria);
        let rows = self.fetch_rows(&self.applications_table, &params).await?;
        Ok(retain_status(rows, criteria))
    }
}

#[async_trait]
impl VacancyStore for SupabaseClient {
    async fn list_vacancies(&self) -> Result<Vec<VacancyRecord>, StoreError> {
        Ok(self
            .fetch_rows(&self.vacancies_table, &query::vacancy_params())
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::review::ApplicationQuery;

    fn client(url: &str) -> SupabaseClient {
        let storage = StorageConfig {
            supabase: Some(SupabaseConfig {
                url: url.to_string(),
                api_key: "anon-key".to_string(),
            }),
            resume_bucket: "resume".to_string(),
            resume_folder: "resumes".to_string(),
            applications_table: "apply".to_string(),
            vacancies_table: "vacancies".to_string(),
        };
        SupabaseClient::from_config(&storage)
            .expect("valid config")
            .expect("configured project")
    }

    fn key(raw: &str) -> StorageKey {
        StorageKey::from(raw.to_string())
    }

    #[test]
    fn builds_storage_urls_under_the_bucket() {
        let client = client("https://demo.supabase.co");
        let key = key("resumes/7-1700000000000-deadbeef-cv.pdf");

        assert_eq!(
            client.object_url(&key).expect("url").as_str(),
            "https://demo.supabase.co/storage/v1/object/resume/resumes/7-1700000000000-deadbeef-cv.pdf"
        );
        assert_eq!(
            client.public_url(&key).expect("public url"),
            "https://demo.supabase.co/storage/v1/object/public/resume/resumes/7-1700000000000-deadbeef-cv.pdf"
        );
    }

    #[test]
    fn encodes_unsafe_characters_in_keys() {
        let client = client("https://demo.supabase.co/");
        let url = client
            .public_url(&key("resumes/1-1-abcd1234-cv#1?.pdf"))
            .expect("public url");
        assert!(url.ends_with("/resumes/1-1-abcd1234-cv%231%3F.pdf"));
    }

    #[test]
    fn table_urls_point_at_rest_api() {
        let client = client("https://demo.supabase.co");
        assert_eq!(
            client.table_url("apply").expect("url").as_str(),
            "https://demo.supabase.co/rest/v1/apply"
        );
    }

    #[test]
    fn rejects_unparseable_project_url() {
        let storage = StorageConfig {
            supabase: Some(SupabaseConfig {
                url: "not a url".to_string(),
                api_key: "anon-key".to_string(),
            }),
            resume_bucket: "resume".to_string(),
            resume_folder: "resumes".to_string(),
            applications_table: "apply".to_string(),
            vacancies_table: "vacancies".to_string(),
        };
        match SupabaseClient::from_config(&storage) {
            Err(SupabaseError::InvalidUrl { .. }) => {}
            other => panic!("expected invalid url, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_uploads_map_to_already_exists() {
        let key = key("resumes/a.pdf");
        let err = SupabaseError::Status {
            status: StatusCode::BAD_REQUEST,
            body: r#"{"statusCode":"409","error":"Duplicate","message":"The resource already exists"}"#
                .to_string(),
        };
        match storage_error(&key, err) {
            StorageError::AlreadyExists(existing) => assert_eq!(existing, "resumes/a.pdf"),
            other => panic!("expected already exists, got {other:?}"),
        }
    }

    #[test]
    fn rows_without_a_status_column_count_as_pending() {
        let rows: Vec<ApplicationRecord> = serde_json::from_value(serde_json::json!([
            {"id": 1, "name": "Ana", "email": "ana@example.com", "phone": "599000111",
             "vacanyId": 3, "resume": "https://files.test/a.pdf",
             "created_at": "2024-02-01T10:00:00+00:00"},
            {"id": 2, "name": "Beka", "email": "beka@example.com", "phone": "599000222",
             "vacanyId": 3, "resume": "https://files.test/b.pdf",
             "created_at": "2024-02-02T10:00:00+00:00"}
        ]))
        .expect("rows decode");

        let pending = FilterCriteria::from_query(&ApplicationQuery {
            status: Some("pending".to_string()),
            ..ApplicationQuery::default()
        });
        assert!(query::application_params(&pending)
            .iter()
            .all(|(name, _)| name != "status"));
        assert_eq!(retain_status(rows.clone(), &pending).len(), 2);

        let accepted = FilterCriteria::from_query(&ApplicationQuery {
            status: Some("accepted".to_string()),
            ..ApplicationQuery::default()
        });
        assert!(retain_status(rows.clone(), &accepted).is_empty());
        assert_eq!(retain_status(rows, &FilterCriteria::default()).len(), 2);
    }

    #[test]
    fn server_errors_map_to_unavailable() {
        let err = SupabaseError::Status {
            status: StatusCode::BAD_GATEWAY,
            body: String::new(),
        };
        match StoreError::from(err) {
            StoreError::Unavailable(_) => {}
            other => panic!("expected unavailable, got {other:?}"),
        }
    }
}
