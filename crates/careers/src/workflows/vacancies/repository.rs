use async_trait::async_trait;

use super::domain::VacancyRecord;
use crate::workflows::applications::StoreError;

/// Read access to the vacancy table.
#[async_trait]
pub trait VacancyStore: Send + Sync {
    /// Every vacancy, newest first.
    async fn list_vacancies(&self) -> Result<Vec<VacancyRecord>, StoreError>;
}
