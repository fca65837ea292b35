use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::workflows::wire::{deserialize_identifier, deserialize_timestamp};

/// An open job posting.
///
/// `avarage_review_time` keeps the store's column spelling on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacancyRecord {
    #[serde(deserialize_with = "deserialize_identifier")]
    pub id: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default, rename = "avarage_review_time")]
    pub average_review_time: Option<String>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl VacancyRecord {
    pub fn new(id: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Some(role.into()),
            description: None,
            kind: None,
            average_review_time: None,
            created_at: None,
        }
    }

    /// Display label: the role, or the id when the role is blank.
    pub fn label(&self) -> &str {
        self.role
            .as_deref()
            .map(str::trim)
            .filter(|role| !role.is_empty())
            .unwrap_or(self.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_store_row_with_legacy_columns() {
        let row = serde_json::json!({
            "id": 7,
            "role": "Backend Engineer",
            "name": "ignored legacy label",
            "description": "Rust services",
            "type": "full-time",
            "avarage_review_time": "5 days",
            "created_at": "2024-03-01T10:00:00+00:00"
        });

        let vacancy: VacancyRecord = serde_json::from_value(row).expect("decode");
        assert_eq!(vacancy.id, "7");
        assert_eq!(vacancy.label(), "Backend Engineer");
        assert_eq!(vacancy.kind.as_deref(), Some("full-time"));
        assert_eq!(vacancy.average_review_time.as_deref(), Some("5 days"));
        assert!(vacancy.created_at.is_some());
    }

    #[test]
    fn blank_role_falls_back_to_id() {
        let mut vacancy = VacancyRecord::new("42", "   ");
        assert_eq!(vacancy.label(), "42");
        vacancy.role = None;
        assert_eq!(vacancy.label(), "42");
    }
}
