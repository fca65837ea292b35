use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::workflows::applications::Locale;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub intake: IntakeConfig,
    pub storage: StorageConfig,
    pub review: ReviewConfig,
    pub admin: AdminConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let locale = match non_blank("APP_LOCALE") {
            Some(raw) => Locale::parse(&raw).ok_or(ConfigError::InvalidLocale(raw))?,
            None => Locale::English,
        };

        let supabase = match (non_blank("SUPABASE_URL"), non_blank("SUPABASE_API_KEY")) {
            (Some(url), Some(api_key)) => Some(SupabaseConfig {
                url: url.trim_end_matches('/').to_string(),
                api_key,
            }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::MissingVariable("SUPABASE_API_KEY")),
            (None, Some(_)) => return Err(ConfigError::MissingVariable("SUPABASE_URL")),
        };

        if supabase.is_none() && environment == AppEnvironment::Production {
            return Err(ConfigError::MissingVariable("SUPABASE_URL"));
        }

        let storage = StorageConfig {
            supabase,
            resume_bucket: non_blank("RESUME_BUCKET").unwrap_or_else(|| "resume".to_string()),
            resume_folder: non_blank("RESUME_FOLDER").unwrap_or_else(|| "resumes".to_string()),
            applications_table: non_blank("APPLICATIONS_TABLE")
                .unwrap_or_else(|| "apply".to_string()),
            vacancies_table: non_blank("VACANCIES_TABLE")
                .unwrap_or_else(|| "vacancies".to_string()),
        };

        let review = ReviewConfig {
            applications_page_size: page_size("APPLICATIONS_PAGE_SIZE", 10)?,
            vacancies_page_size: page_size("VACANCIES_PAGE_SIZE", 6)?,
        };

        let admin = AdminConfig {
            api_token: non_blank("ADMIN_API_TOKEN"),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            intake: IntakeConfig { locale },
            storage,
            review,
            admin,
        })
    }
}

fn non_blank(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn page_size(key: &'static str, default: usize) -> Result<usize, ConfigError> {
    match non_blank(key) {
        None => Ok(default),
        Some(raw) => match raw.parse::<usize>() {
            Ok(size) if size > 0 => Ok(size),
            _ => Err(ConfigError::InvalidPageSize(key)),
        },
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Applicant-facing intake settings.
#[derive(Debug, Clone, Copy)]
pub struct IntakeConfig {
    pub locale: Locale,
}

/// Record store and object storage settings.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// `None` selects the in-memory backends.
    pub supabase: Option<SupabaseConfig>,
    pub resume_bucket: String,
    pub resume_folder: String,
    pub applications_table: String,
    pub vacancies_table: String,
}

/// Connection details for the hosted Supabase project.
#[derive(Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub api_key: String,
}

impl fmt::Debug for SupabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupabaseConfig")
            .field("url", &self.url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Page sizes per listing.
#[derive(Debug, Clone, Copy)]
pub struct ReviewConfig {
    pub applications_page_size: usize,
    pub vacancies_page_size: usize,
}

#[derive(Clone, Default)]
pub struct AdminConfig {
    pub api_token: Option<String>,
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = self.api_token.as_ref().map(|_| "<redacted>");
        f.debug_struct("AdminConfig")
            .field("api_token", &token)
            .finish()
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidLocale(String),
    InvalidPageSize(&'static str),
    MissingVariable(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidLocale(value) => {
                write!(f, "APP_LOCALE '{value}' is not one of: en, ka")
            }
            ConfigError::InvalidPageSize(key) => {
                write!(f, "{key} must be a positive integer")
            }
            ConfigError::MissingVariable(key) => write!(f, "{key} must be set"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_LOCALE",
            "SUPABASE_URL",
            "SUPABASE_API_KEY",
            "RESUME_BUCKET",
            "RESUME_FOLDER",
            "APPLICATIONS_TABLE",
            "VACANCIES_TABLE",
            "ADMIN_API_TOKEN",
            "APPLICATIONS_PAGE_SIZE",
            "VACANCIES_PAGE_SIZE",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.intake.locale, Locale::English);
        assert!(config.storage.supabase.is_none());
        assert_eq!(config.storage.resume_bucket, "resume");
        assert_eq!(config.storage.resume_folder, "resumes");
        assert_eq!(config.storage.applications_table, "apply");
        assert_eq!(config.review.applications_page_size, 10);
        assert_eq!(config.review.vacancies_page_size, 6);
        assert!(config.admin.api_token.is_none());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn supabase_requires_both_url_and_key() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("SUPABASE_URL", "https://project.supabase.co/");
        match AppConfig::load() {
            Err(ConfigError::MissingVariable("SUPABASE_API_KEY")) => {}
            other => panic!("expected missing key error, got {other:?}"),
        }

        env::set_var("SUPABASE_API_KEY", "anon-key");
        let config = AppConfig::load().expect("config loads");
        let supabase = config.storage.supabase.expect("supabase configured");
        assert_eq!(supabase.url, "https://project.supabase.co");
        assert!(!format!("{supabase:?}").contains("anon-key"));
        reset_env();
    }

    #[test]
    fn production_requires_supabase() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "production");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::MissingVariable("SUPABASE_URL"))
        ));
        reset_env();
    }

    #[test]
    fn rejects_zero_page_size_and_unknown_locale() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APPLICATIONS_PAGE_SIZE", "0");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidPageSize("APPLICATIONS_PAGE_SIZE"))
        ));

        reset_env();
        env::set_var("APP_LOCALE", "fr");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidLocale(_))
        ));

        env::set_var("APP_LOCALE", "ka");
        let config = AppConfig::load().expect("georgian locale accepted");
        assert_eq!(config.intake.locale, Locale::Georgian);
        reset_env();
    }
}
