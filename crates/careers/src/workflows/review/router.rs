use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde_json::json;
use tracing::{error, info};

use super::auth::{require_admin, AdminToken};
use super::criteria::{ApplicationQuery, FilterCriteria};
use super::export::EXPORT_FILE_NAME;
use super::service::{ApplicationPage, ReviewService, ReviewStatistics};
use crate::workflows::applications::ApplicationStore;
use crate::workflows::vacancies::VacancyStore;

/// Router builder exposing the admin review endpoints behind the bearer token.
pub fn admin_router<S, V>(service: Arc<ReviewService<S, V>>, token: AdminToken) -> Router
where
    S: ApplicationStore + 'static,
    V: VacancyStore + 'static,
{
    Router::new()
        .route("/api/v1/admin/applications", get(list_handler::<S, V>))
        .route("/api/v1/admin/applications/export", get(export_handler::<S, V>))
        .route("/api/v1/admin/applications/stats", get(stats_handler::<S, V>))
        .route_layer(middleware::from_fn_with_state(token, require_admin))
        .with_state(service)
}

pub(crate) async fn list_handler<S, V>(
    State(service): State<Arc<ReviewService<S, V>>>,
    Query(query): Query<ApplicationQuery>,
) -> Json<ApplicationPage>
where
    S: ApplicationStore + 'static,
    V: VacancyStore + 'static,
{
    let criteria = FilterCriteria::from_query(&query);
    Json(service.page(&criteria, query.requested_page()).await)
}

pub(crate) async fn export_handler<S, V>(
    State(service): State<Arc<ReviewService<S, V>>>,
    Query(query): Query<ApplicationQuery>,
) -> Response
where
    S: ApplicationStore + 'static,
    V: VacancyStore + 'static,
{
    let criteria = FilterCriteria::from_query(&query);
    match service.export(&criteria).await {
        Ok(Some(csv)) => {
            info!(bytes = csv.len(), "applications exported");
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, mime::TEXT_CSV_UTF_8.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
                    ),
                ],
                csv,
            )
                .into_response()
        }
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            error!(error = %err, "csv export failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "export failed" })),
            )
                .into_response()
        }
    }
}

pub(crate) async fn stats_handler<S, V>(
    State(service): State<Arc<ReviewService<S, V>>>,
    Query(query): Query<ApplicationQuery>,
) -> Json<ReviewStatistics>
where
    S: ApplicationStore + 'static,
    V: VacancyStore + 'static,
{
    let criteria = FilterCriteria::from_query(&query);
    let today = Utc::now().date_naive();
    Json(service.statistics(&criteria, today).await)
}
