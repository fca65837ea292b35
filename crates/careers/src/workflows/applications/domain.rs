use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::ResumeMeta;
use crate::workflows::wire::{
    deserialize_identifier, deserialize_nullable_text, deserialize_reference,
    deserialize_timestamp,
};

/// Review status of an application. This core only reads it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewed,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const ALL: [ApplicationStatus; 4] = [
        ApplicationStatus::Pending,
        ApplicationStatus::Reviewed,
        ApplicationStatus::Accepted,
        ApplicationStatus::Rejected,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(raw))
    }
}

/// A stored application as returned by the record store.
///
/// `vacanyId` keeps the store's column spelling on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    #[serde(deserialize_with = "deserialize_identifier")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_nullable_text")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_nullable_text")]
    pub email: String,
    #[serde(default, deserialize_with = "deserialize_nullable_text")]
    pub phone: String,
    #[serde(
        rename = "vacanyId",
        default,
        deserialize_with = "deserialize_reference"
    )]
    pub vacancy_id: Option<String>,
    #[serde(default)]
    pub resume: Option<String>,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ApplicationRecord {
    /// A record only counts once it references an uploaded résumé.
    pub fn is_complete(&self) -> bool {
        self.resume
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }
}

/// Insert payload for a new application; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewApplication {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "vacanyId")]
    pub vacancy_id: String,
    pub resume: String,
}

/// Raw text fields posted by the application form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, rename = "vacancyId")]
    pub vacancy_id: String,
}

/// Uploaded résumé file as received from the form boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeUpload {
    pub file_name: String,
    /// Declared content type; never sniffed from the bytes.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ResumeUpload {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn meta(&self) -> ResumeMeta {
        ResumeMeta {
            content_type: self.content_type.clone(),
            size: self.size(),
        }
    }
}
