use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use super::criteria::{FilterCriteria, SortKey};
use super::export::encode_csv;
use super::pagination::{PageView, PageWindow, Paginator};
use super::stats::{statistics, ApplicationStatistics};
use crate::workflows::applications::{ApplicationRecord, ApplicationStore, Locale};
use crate::workflows::vacancies::{VacancyDirectory, VacancyRecord, VacancyStore};

/// Application row enriched with its vacancy's display label.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRow {
    #[serde(flatten)]
    pub application: ApplicationRecord,
    pub vacancy_label: String,
}

/// Entry of the vacancy filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VacancyOption {
    pub id: String,
    pub label: String,
}

/// One page of the admin application list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPage {
    pub applications: Vec<ApplicationRow>,
    pub pagination: PageView,
    pub vacancies: Vec<VacancyOption>,
    pub sort: SortKey,
}

/// Counters for the whole set plus the size of the filtered subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStatistics {
    #[serde(flatten)]
    pub overall: ApplicationStatistics,
    pub filtered: usize,
}

/// Read side of the admin dashboard. Fetch failures degrade to empty sets.
pub struct ReviewService<S, V> {
    applications: Arc<S>,
    vacancies: Arc<V>,
    page_size: usize,
    locale: Locale,
}

impl<S, V> ReviewService<S, V>
where
    S: ApplicationStore + 'static,
    V: VacancyStore + 'static,
{
    pub fn new(applications: Arc<S>, vacancies: Arc<V>, page_size: usize, locale: Locale) -> Self {
        Self {
            applications,
            vacancies,
            page_size: page_size.max(1),
            locale,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Filtered and sorted applications; empty when the store fails.
    pub async fn applications(&self, criteria: &FilterCriteria) -> Vec<ApplicationRecord> {
        match self.applications.list(criteria).await {
            Ok(records) => {
                debug!(count = records.len(), "applications fetched");
                records
            }
            Err(err) => {
                warn!(error = %err, "application fetch failed, showing none");
                Vec::new()
            }
        }
    }

    /// Every vacancy; empty when the store fails.
    pub async fn vacancies(&self) -> Vec<VacancyRecord> {
        match self.vacancies.list_vacancies().await {
            Ok(vacancies) => vacancies,
            Err(err) => {
                warn!(error = %err, "vacancy fetch failed, showing none");
                Vec::new()
            }
        }
    }

    pub async fn page(&self, criteria: &FilterCriteria, requested_page: usize) -> ApplicationPage {
        let records = self.applications(criteria).await;
        let vacancies = self.vacancies().await;
        let directory = VacancyDirectory::new(&vacancies);
        let window = PageWindow::new(records.len(), self.page_size, requested_page);

        let applications = window
            .slice(&records)
            .iter()
            .map(|record| ApplicationRow {
                vacancy_label: directory.label_for(record.vacancy_id.as_deref()),
                application: record.clone(),
            })
            .collect();

        ApplicationPage {
            applications,
            pagination: window.view(),
            vacancies: vacancies
                .iter()
                .map(|vacancy| VacancyOption {
                    id: vacancy.id.clone(),
                    label: vacancy.label().to_string(),
                })
                .collect(),
            sort: criteria.sort,
        }
    }

    /// CSV of the whole filtered set, or `None` when there is nothing to export.
    pub async fn export(&self, criteria: &FilterCriteria) -> Result<Option<String>, csv::Error> {
        let records = self.applications(criteria).await;
        if records.is_empty() {
            return Ok(None);
        }

        let directory = VacancyDirectory::new(&self.vacancies().await);
        encode_csv(&records, &directory, self.locale).map(Some)
    }

    pub async fn statistics(&self, criteria: &FilterCriteria, today: NaiveDate) -> ReviewStatistics {
        let all = self.applications(&FilterCriteria::default()).await;
        let filtered = if *criteria == FilterCriteria::default() {
            all.len()
        } else {
            self.applications(criteria).await.len()
        };

        ReviewStatistics {
            overall: statistics(&all, today),
            filtered,
        }
    }
}

/// Admin view state: the active criteria and the page cursor over their result.
///
/// Changing the criteria moves the cursor back to the first page.
#[derive(Debug, Clone)]
pub struct ReviewSession {
    criteria: FilterCriteria,
    paginator: Paginator,
}

impl ReviewSession {
    pub fn new(page_size: usize) -> Self {
        Self {
            criteria: FilterCriteria::default(),
            paginator: Paginator::new(page_size),
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn current_page(&self) -> usize {
        self.paginator.current_page()
    }

    /// Replace the criteria; returns whether they changed.
    pub fn apply(&mut self, criteria: FilterCriteria) -> bool {
        if criteria == self.criteria {
            return false;
        }
        self.criteria = criteria;
        self.paginator.reset();
        true
    }

    pub fn paginator_mut(&mut self) -> &mut Paginator {
        &mut self.paginator
    }

    pub async fn load<S, V>(&self, service: &ReviewService<S, V>) -> ApplicationPage
    where
        S: ApplicationStore + 'static,
        V: VacancyStore + 'static,
    {
        service.page(&self.criteria, self.paginator.current_page()).await
    }
}
