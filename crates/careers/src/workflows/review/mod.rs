//! Admin review: criteria parsing, filter and sort pipelines, pagination, CSV export, and
//! dashboard statistics over stored applications.

pub mod auth;
pub mod criteria;
pub mod export;
pub mod filter;
pub mod pagination;
pub mod router;
pub mod service;
pub mod sort;
pub mod stats;

pub use auth::{require_admin, AdminToken};
pub use criteria::{ApplicationQuery, FilterCriteria, SortKey};
pub use export::{encode_csv, format_export_date, EXPORT_FILE_NAME};
pub use filter::{filter_applications, matches_criteria};
pub use pagination::{
    page_numbers, paginate, PageNumber, PageView, PageWindow, Paginator, MAX_VISIBLE_PAGES,
};
pub use router::admin_router;
pub use service::{
    ApplicationPage, ApplicationRow, ReviewService, ReviewSession, ReviewStatistics,
    VacancyOption,
};
pub use sort::sort_applications;
pub use stats::{statistics, ApplicationStatistics};
