use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::VacancyRecord;
use super::repository::VacancyStore;
use crate::workflows::review::pagination::{PageView, PageWindow};

/// Placeholder shown when an application references no vacancy.
pub const MISSING_LABEL: &str = "-";

/// Public catalog filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFilter {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl CatalogFilter {
    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }

    fn role(&self) -> Option<&str> {
        self.role
            .as_deref()
            .map(str::trim)
            .filter(|role| !role.is_empty())
    }
}

/// Vacancies whose role or description contains the search term and whose role equals the
/// selected one. Order is preserved.
pub fn filter_vacancies(vacancies: &[VacancyRecord], filter: &CatalogFilter) -> Vec<VacancyRecord> {
    let term = filter.search_term();
    let role = filter.role();

    vacancies
        .iter()
        .filter(|vacancy| {
            let matches_search = term.as_deref().map_or(true, |term| {
                [vacancy.role.as_deref(), vacancy.description.as_deref()]
                    .into_iter()
                    .flatten()
                    .any(|text| text.to_lowercase().contains(term))
            });
            let matches_role =
                role.map_or(true, |role| vacancy.role.as_deref().map(str::trim) == Some(role));
            matches_search && matches_role
        })
        .cloned()
        .collect()
}

/// Unique non-blank roles in first-seen order.
pub fn distinct_roles(vacancies: &[VacancyRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    vacancies
        .iter()
        .filter_map(|vacancy| vacancy.role.as_deref().map(str::trim))
        .filter(|role| !role.is_empty())
        .filter(|role| seen.insert(role.to_string()))
        .map(str::to_string)
        .collect()
}

/// Lookup from vacancy id to display label.
#[derive(Debug, Clone, Default)]
pub struct VacancyDirectory {
    labels: HashMap<String, String>,
}

impl VacancyDirectory {
    pub fn new(vacancies: &[VacancyRecord]) -> Self {
        let labels = vacancies
            .iter()
            .map(|vacancy| (vacancy.id.clone(), vacancy.label().to_string()))
            .collect();
        Self { labels }
    }

    /// Label for a reference; unknown ids show as themselves.
    pub fn label_for(&self, vacancy_id: Option<&str>) -> String {
        match vacancy_id {
            Some(id) => self
                .labels
                .get(id)
                .cloned()
                .unwrap_or_else(|| id.to_string()),
            None => MISSING_LABEL.to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// One page of the public catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogPage {
    pub vacancies: Vec<VacancyRecord>,
    pub roles: Vec<String>,
    pub pagination: PageView,
}

/// Public vacancy listing backed by a [`VacancyStore`].
pub struct VacancyCatalog<V> {
    store: Arc<V>,
    page_size: usize,
}

impl<V> VacancyCatalog<V>
where
    V: VacancyStore + 'static,
{
    pub fn new(store: Arc<V>, page_size: usize) -> Self {
        Self { store, page_size }
    }

    /// All vacancies; a failing store yields an empty list.
    pub async fn vacancies(&self) -> Vec<VacancyRecord> {
        match self.store.list_vacancies().await {
            Ok(vacancies) => vacancies,
            Err(err) => {
                warn!(error = %err, "vacancy fetch failed, showing none");
                Vec::new()
            }
        }
    }

    pub async fn page(&self, filter: &CatalogFilter, requested_page: usize) -> CatalogPage {
        let all = self.vacancies().await;
        let roles = distinct_roles(&all);
        let matching = filter_vacancies(&all, filter);
        let window = PageWindow::new(matching.len(), self.page_size, requested_page);

        CatalogPage {
            vacancies: window.slice(&matching).to_vec(),
            roles,
            pagination: window.view(),
        }
    }
}
