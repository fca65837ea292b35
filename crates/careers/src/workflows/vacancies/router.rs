use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::catalog::{CatalogFilter, CatalogPage, VacancyCatalog};
use super::repository::VacancyStore;

/// Query string of the public catalog listing.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct CatalogQuery {
    #[serde(default)]
    search: Option<String>,
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    page: Option<String>,
}

pub fn catalog_router<V>(catalog: Arc<VacancyCatalog<V>>) -> Router
where
    V: VacancyStore + 'static,
{
    Router::new()
        .route("/api/v1/vacancies", get(list_handler::<V>))
        .with_state(catalog)
}

pub(crate) async fn list_handler<V>(
    State(catalog): State<Arc<VacancyCatalog<V>>>,
    Query(query): Query<CatalogQuery>,
) -> Json<CatalogPage>
where
    V: VacancyStore + 'static,
{
    let page = query
        .page
        .as_deref()
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .unwrap_or(1);
    let filter = CatalogFilter {
        search: query.search,
        role: query.role,
    };

    Json(catalog.page(&filter, page).await)
}
