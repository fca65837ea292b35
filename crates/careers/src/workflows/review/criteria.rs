use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::workflows::applications::ApplicationStatus;
use crate::workflows::wire::parse_timestamp;

/// Ordering applied to the application list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Newest first.
    #[default]
    Recent,
    Oldest,
    Az,
    Za,
}

impl SortKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            SortKey::Recent => "recent",
            SortKey::Oldest => "oldest",
            SortKey::Az => "az",
            SortKey::Za => "za",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "recent" => Some(SortKey::Recent),
            "oldest" => Some(SortKey::Oldest),
            "az" => Some(SortKey::Az),
            "za" => Some(SortKey::Za),
            _ => None,
        }
    }
}

/// Admin filter parameters exactly as they arrive in the URL query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationQuery {
    #[serde(default, rename = "vacancyId")]
    pub vacancy_id: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
}

impl ApplicationQuery {
    /// Requested page; anything unparseable means the first page.
    pub fn requested_page(&self) -> usize {
        self.page
            .as_deref()
            .and_then(|raw| raw.trim().parse::<usize>().ok())
            .unwrap_or(1)
    }
}

/// Normalized filter and sort selection. `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub vacancy_id: Option<String>,
    /// Inclusive lower bound on `created_at`.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `created_at`.
    pub to: Option<DateTime<Utc>>,
    pub status: Option<ApplicationStatus>,
    pub sort: SortKey,
    /// Trimmed, never empty.
    pub search: Option<String>,
}

impl FilterCriteria {
    pub fn from_query(query: &ApplicationQuery) -> Self {
        let sort = match query.sort.as_deref().map(str::trim) {
            None | Some("") => SortKey::default(),
            Some(raw) => SortKey::parse(raw).unwrap_or_else(|| {
                warn!(sort = raw, "unknown sort key, using recent");
                SortKey::default()
            }),
        };

        let status = non_empty(query.status.as_deref()).and_then(|raw| {
            let parsed = ApplicationStatus::parse(&raw);
            if parsed.is_none() {
                warn!(status = %raw, "unknown status filter ignored");
            }
            parsed
        });

        Self {
            vacancy_id: non_empty(query.vacancy_id.as_deref()),
            from: non_empty(query.from.as_deref()).and_then(|raw| bound(&raw, lower_bound)),
            to: non_empty(query.to.as_deref()).and_then(|raw| bound(&raw, upper_bound)),
            status,
            sort,
            search: non_empty(query.search.as_deref()),
        }
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = non_empty(Some(search));
        self
    }

    /// Lower-cased search term, if any.
    pub fn search_term(&self) -> Option<String> {
        self.search.as_ref().map(|term| term.to_lowercase())
    }
}

fn non_empty(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn bound(raw: &str, parse: fn(&str) -> Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
    let parsed = parse(raw);
    if parsed.is_none() {
        warn!(bound = raw, "unparseable date bound ignored");
    }
    parsed
}

/// Start of the day for a bare date, otherwise the exact instant.
pub fn lower_bound(raw: &str) -> Option<DateTime<Utc>> {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc()),
        Err(_) => parse_timestamp(raw),
    }
}

/// End of the day for a bare date, so the whole day is covered; otherwise the exact instant.
pub fn upper_bound(raw: &str) -> Option<DateTime<Utc>> {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => date
            .and_hms_nano_opt(23, 59, 59, 999_999_999)
            .map(|naive| naive.and_utc()),
        Err(_) => parse_timestamp(raw),
    }
}
