use std::fmt;
use std::sync::OnceLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use uuid::Uuid;

use super::domain::{ApplicationRecord, NewApplication};
use super::validation::cached_pattern;
use crate::workflows::review::FilterCriteria;

/// Object storage holding uploaded résumés.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `bytes` at `key`. Must fail instead of overwriting an existing object.
    async fn upload(
        &self,
        key: &StorageKey,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), StorageError>;

    /// Publicly retrievable URL for a previously uploaded key.
    fn public_url(&self, key: &StorageKey) -> Result<String, StorageError>;
}

/// Record store abstraction for application rows.
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn insert(&self, application: NewApplication) -> Result<ApplicationRecord, StoreError>;

    /// Records matching `criteria`, already filtered and ordered by `criteria.sort`.
    async fn list(&self, criteria: &FilterCriteria) -> Result<Vec<ApplicationRecord>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("an object already exists at `{0}`")]
    AlreadyExists(String),
    #[error("storage rejected the upload: {0}")]
    Rejected(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("no public url available for `{0}`")]
    PublicUrl(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store rejected the request: {0}")]
    Rejected(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("unexpected store response: {0}")]
    Decode(String),
}

/// Destination key of an uploaded résumé inside the bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StorageKey(String);

impl StorageKey {
    /// `{folder}/{vacancy}-{epoch millis}-{suffix}-{normalized file name}`.
    ///
    /// Path separators in the vacancy id and file name become hyphens, so the key never leaves
    /// `folder`.
    pub fn for_resume(
        folder: &str,
        vacancy_id: &str,
        submitted_at: DateTime<Utc>,
        suffix: &str,
        file_name: &str,
    ) -> Self {
        let folder = folder.trim_matches('/');
        Self(format!(
            "{folder}/{vacancy}-{millis}-{suffix}-{name}",
            vacancy = without_separators(vacancy_id),
            millis = submitted_at.timestamp_millis(),
            name = normalize_file_name(file_name),
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for StorageKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Collapse whitespace runs into hyphens, drop path separators, and lower-case the name.
pub fn normalize_file_name(file_name: &str) -> String {
    static WHITESPACE: OnceLock<Option<Regex>> = OnceLock::new();
    let name = without_separators(file_name);
    match cached_pattern(&WHITESPACE, r"\s+") {
        Some(whitespace) => whitespace.replace_all(&name, "-").to_lowercase(),
        None => name.to_lowercase(),
    }
}

fn without_separators(segment: &str) -> String {
    segment.replace(['/', '\\'], "-")
}

/// Eight random hex characters separating same-millisecond submissions.
pub fn random_suffix() -> String {
    let mut suffix = Uuid::new_v4().simple().to_string();
    suffix.truncate(8);
    suffix
}
