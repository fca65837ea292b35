use careers::config::AppConfig;
use careers::error::AppError;
use careers::supabase::SupabaseClient;
use careers::telemetry;
use careers::workflows::applications::ApplicationStore;
use careers::workflows::review::{ApplicationQuery, FilterCriteria, ReviewService};
use careers::workflows::vacancies::VacancyStore;
use clap::Args;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Destination CSV file
    #[arg(long, default_value = "applications.csv")]
    pub(crate) output: PathBuf,
    /// Only export applications for this vacancy
    #[arg(long)]
    pub(crate) vacancy_id: Option<String>,
    /// Earliest submission date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub(crate) from: Option<String>,
    /// Latest submission date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub(crate) to: Option<String>,
    /// recent, oldest, az, or za
    #[arg(long)]
    pub(crate) sort: Option<String>,
    /// Case-insensitive match on name, email, or phone
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// pending, reviewed, accepted, or rejected
    #[arg(long)]
    pub(crate) status: Option<String>,
}

impl ExportArgs {
    pub(crate) fn query(&self) -> ApplicationQuery {
        ApplicationQuery {
            vacancy_id: self.vacancy_id.clone(),
            from: self.from.clone(),
            to: self.to.clone(),
            sort: self.sort.clone(),
            search: self.search.clone(),
            status: self.status.clone(),
            page: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExportOutcome {
    Written { bytes: usize },
    Empty,
    /// No Supabase project is configured, so there are no records to read.
    NoRecordStore,
}

pub(crate) async fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let criteria = FilterCriteria::from_query(&args.query());
    match export_from_config(&config, &criteria, &args.output).await? {
        ExportOutcome::Written { bytes } => {
            println!("Wrote {bytes} bytes to {}", args.output.display());
        }
        ExportOutcome::Empty => {
            println!("No applications match the filters; nothing was written.");
        }
        ExportOutcome::NoRecordStore => {
            println!(
                "No record store is configured (set SUPABASE_URL and SUPABASE_API_KEY); nothing was written."
            );
        }
    }
    Ok(())
}

/// Exports from the configured record store; in-memory runs keep no records to export.
pub(crate) async fn export_from_config(
    config: &AppConfig,
    criteria: &FilterCriteria,
    output: &Path,
) -> Result<ExportOutcome, AppError> {
    let Some(client) = SupabaseClient::from_config(&config.storage)? else {
        warn!("export requested without a supabase project");
        return Ok(ExportOutcome::NoRecordStore);
    };
    let client = Arc::new(client);
    let csv = export_applications(client.clone(), client, config, criteria).await?;
    write_export(csv, output)
}

pub(crate) async fn export_applications<S, V>(
    applications: Arc<S>,
    vacancies: Arc<V>,
    config: &AppConfig,
    criteria: &FilterCriteria,
) -> Result<Option<String>, AppError>
where
    S: ApplicationStore + 'static,
    V: VacancyStore + 'static,
{
    let service = ReviewService::new(
        applications,
        vacancies,
        config.review.applications_page_size,
        config.intake.locale,
    );
    Ok(service.export(criteria).await?)
}

/// Writes the encoded document, leaving `output` untouched when there is nothing to export.
pub(crate) fn write_export(csv: Option<String>, output: &Path) -> Result<ExportOutcome, AppError> {
    let Some(csv) = csv else {
        info!(path = %output.display(), "export skipped: no matching applications");
        return Ok(ExportOutcome::Empty);
    };
    std::fs::write(output, csv.as_bytes())?;
    info!(path = %output.display(), bytes = csv.len(), "applications exported");
    Ok(ExportOutcome::Written { bytes: csv.len() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{InMemoryApplicationStore, InMemoryVacancyStore};
    use careers::config::{
        AdminConfig, AppEnvironment, IntakeConfig, ReviewConfig, ServerConfig, StorageConfig,
        TelemetryConfig,
    };
    use careers::workflows::applications::{ApplicationRecord, ApplicationStatus, Locale};
    use chrono::{TimeZone, Utc};

    fn config(locale: Locale) -> AppConfig {
        AppConfig {
            environment: AppEnvironment::Test,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            telemetry: TelemetryConfig {
                log_level: "warn".to_string(),
            },
            intake: IntakeConfig { locale },
            storage: StorageConfig {
                supabase: None,
                resume_bucket: "resume".to_string(),
                resume_folder: "resumes".to_string(),
                applications_table: "applications".to_string(),
                vacancies_table: "vacancies".to_string(),
            },
            review: ReviewConfig {
                applications_page_size: 2,
                vacancies_page_size: 10,
            },
            admin: AdminConfig::default(),
        }
    }

    fn record(id: &str, name: &str, vacancy_id: &str, day: u32) -> ApplicationRecord {
        ApplicationRecord {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{id}@example.com"),
            phone: "+995 599 000 000".to_string(),
            vacancy_id: Some(vacancy_id.to_string()),
            resume: Some(format!("memory://resumes/{id}.pdf")),
            status: ApplicationStatus::Pending,
            created_at: Utc.with_ymd_and_hms(2024, 5, day, 8, 30, 0).single(),
        }
    }

    fn store() -> Arc<InMemoryApplicationStore> {
        Arc::new(InMemoryApplicationStore::with_records(vec![
            record("1", "Nino", "1", 1),
            record("2", "Ana", "2", 2),
            record("3", "Giorgi", "1", 3),
        ]))
    }

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("careers-export-{}-{name}", std::process::id()))
    }

    #[tokio::test]
    async fn export_ignores_page_size() {
        let criteria = FilterCriteria::from_query(&ApplicationQuery {
            vacancy_id: Some("1".to_string()),
            sort: Some("oldest".to_string()),
            ..ApplicationQuery::default()
        });
        let csv = export_applications(
            store(),
            Arc::new(InMemoryVacancyStore::seeded()),
            &config(Locale::English),
            &criteria,
        )
        .await
        .expect("export")
        .expect("rows");

        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with(r#""Nino","1@example.com","Backend Engineer""#));
        assert!(lines[2].starts_with(r#""Giorgi""#));
    }

    #[tokio::test]
    async fn empty_selection_writes_nothing() {
        let criteria = FilterCriteria::from_query(&ApplicationQuery {
            search: Some("nobody".to_string()),
            ..ApplicationQuery::default()
        });
        let csv = export_applications(
            store(),
            Arc::new(InMemoryVacancyStore::seeded()),
            &config(Locale::English),
            &criteria,
        )
        .await
        .expect("export");
        assert!(csv.is_none());

        let path = scratch_path("empty.csv");
        assert_eq!(write_export(csv, &path).expect("write"), ExportOutcome::Empty);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn export_without_a_record_store_reports_it() {
        let path = scratch_path("unconfigured.csv");
        let outcome = export_from_config(&config(Locale::English), &FilterCriteria::default(), &path)
            .await
            .expect("export");
        assert_eq!(outcome, ExportOutcome::NoRecordStore);
        assert!(!path.exists());
    }

    #[test]
    fn write_export_persists_the_document() {
        let path = scratch_path("rows.csv");
        let document = "\"Name\"\n\"Nino\"\n".to_string();

        let outcome = write_export(Some(document.clone()), &path).expect("write");
        assert_eq!(
            outcome,
            ExportOutcome::Written {
                bytes: document.len()
            }
        );
        assert_eq!(std::fs::read_to_string(&path).expect("read back"), document);
        std::fs::remove_file(&path).expect("cleanup");
    }
}
