use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryApplicationStore, InMemoryResumeStorage, InMemoryVacancyStore,
};
use crate::routes::{with_application_routes, Backends};
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use careers::config::AppConfig;
use careers::error::AppError;
use careers::supabase::SupabaseClient;
use careers::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    if config.admin.api_token.is_none() {
        warn!("ADMIN_API_TOKEN is not set; admin routes will reject every request");
    }

    let routes = match SupabaseClient::from_config(&config.storage)? {
        Some(client) => {
            let client = Arc::new(client);
            info!(bucket = %config.storage.resume_bucket, "using supabase backends");
            with_application_routes(
                Backends {
                    resumes: client.clone(),
                    applications: client.clone(),
                    vacancies: client,
                },
                &config,
            )
        }
        None => {
            warn!("no supabase project configured; records are kept in memory");
            with_application_routes(
                Backends {
                    resumes: Arc::new(InMemoryResumeStorage::default()),
                    applications: Arc::new(InMemoryApplicationStore::default()),
                    vacancies: Arc::new(InMemoryVacancyStore::seeded()),
                },
                &config,
            )
        }
    };

    let app = routes.layer(Extension(app_state)).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "careers portal ready");

    axum::serve(listener, app).await?;
    Ok(())
}
