//! PostgREST query-string construction for the record store.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::workflows::review::{FilterCriteria, SortKey};

/// Column holding the vacancy reference, spelled as in the table.
pub const VACANCY_COLUMN: &str = "vacanyId";

/// Query parameters selecting the applications matching `criteria`, in `criteria.sort` order.
///
/// The status predicate is not pushed down: the table may lack the column, and rows without
/// one count as pending. Callers apply it to the fetched rows.
pub fn application_params(criteria: &FilterCriteria) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];

    if let Some(vacancy_id) = &criteria.vacancy_id {
        params.push((VACANCY_COLUMN.to_string(), format!("eq.{vacancy_id}")));
    }
    if let Some(from) = criteria.from {
        params.push(("created_at".to_string(), format!("gte.{}", timestamp(from))));
    }
    if let Some(to) = criteria.to {
        params.push(("created_at".to_string(), format!("lte.{}", timestamp(to))));
    }
    if let Some(term) = &criteria.search {
        let pattern = quote(&format!("*{}*", escape_like(term)));
        let clauses = ["name", "email", "phone"]
            .iter()
            .map(|column| format!("{column}.ilike.{pattern}"))
            .collect::<Vec<_>>()
            .join(",");
        params.push(("or".to_string(), format!("({clauses})")));
    }

    params.push(("order".to_string(), order(criteria.sort).to_string()));
    params
}

/// Query parameters listing every vacancy, newest first.
pub fn vacancy_params() -> Vec<(String, String)> {
    vec![
        ("select".to_string(), "*".to_string()),
        ("order".to_string(), "created_at.desc".to_string()),
    ]
}

/// Undated rows sort as the earliest instant.
pub fn order(sort: SortKey) -> &'static str {
    match sort {
        SortKey::Recent => "created_at.desc.nullslast",
        SortKey::Oldest => "created_at.asc.nullsfirst",
        SortKey::Az => "name.asc,created_at.desc.nullslast",
        SortKey::Za => "name.desc,created_at.desc.nullslast",
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Escape LIKE metacharacters so the pattern matches `term` as a plain substring.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Double-quote a filter value so commas and parentheses stay literal.
fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
