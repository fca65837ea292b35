//! Public vacancy catalog and the id-to-label lookup used by the admin views.

pub mod catalog;
pub mod domain;
pub mod repository;
pub mod router;

pub use catalog::{
    distinct_roles, filter_vacancies, CatalogFilter, CatalogPage, VacancyCatalog,
    VacancyDirectory, MISSING_LABEL,
};
pub use domain::VacancyRecord;
pub use repository::VacancyStore;
pub use router::catalog_router;
