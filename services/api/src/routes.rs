use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use careers::config::AppConfig;
use careers::workflows::applications::{
    intake_router, ApplicationStore, IntakeService, IntakeSettings, ObjectStorage,
};
use careers::workflows::review::{admin_router, AdminToken, ReviewService};
use careers::workflows::vacancies::{catalog_router, VacancyCatalog, VacancyStore};
use serde_json::json;
use std::sync::Arc;

/// Storage backends shared by the intake, catalog, and admin routers.
pub(crate) struct Backends<O, S, V> {
    pub(crate) resumes: Arc<O>,
    pub(crate) applications: Arc<S>,
    pub(crate) vacancies: Arc<V>,
}

pub(crate) fn with_application_routes<O, S, V>(
    backends: Backends<O, S, V>,
    config: &AppConfig,
) -> axum::Router
where
    O: ObjectStorage + 'static,
    S: ApplicationStore + 'static,
    V: VacancyStore + 'static,
{
    let Backends {
        resumes,
        applications,
        vacancies,
    } = backends;

    let intake = IntakeService::new(
        resumes,
        applications.clone(),
        IntakeSettings {
            resume_folder: config.storage.resume_folder.clone(),
            locale: config.intake.locale,
        },
    );
    let review = ReviewService::new(
        applications,
        vacancies.clone(),
        config.review.applications_page_size,
        config.intake.locale,
    );
    let catalog = VacancyCatalog::new(vacancies, config.review.vacancies_page_size);
    let token = AdminToken::new(config.admin.api_token.clone());

    intake_router(Arc::new(intake))
        .merge(catalog_router(Arc::new(catalog)))
        .merge(admin_router(Arc::new(review), token))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
