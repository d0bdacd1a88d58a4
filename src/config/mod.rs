//! Configuration management module.
//!
//! Supports loading configuration from:
//! - TOML files (config/default.toml, config/{profile}.toml)
//! - Environment variables with `BARCODE_WORKER__<SECTION>__<KEY>` pattern

mod barcode;
mod server;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::service::ean13;

pub use barcode::BarcodeConfig;
pub use server::ServerConfig;

/// Routes the metrics endpoint must not shadow.
const RESERVED_PATHS: [&str; 2] = ["/health", "/ready"];

/// Mount point of the barcode API.
const BARCODE_API_PREFIX: &str = "/v1/barcode";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Barcode generation configuration.
    #[serde(default)]
    pub barcode: BarcodeConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// Load configuration from files and environment.
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. `.env` in the working directory, if present, is merged into the process environment
    /// 2. `config/default.toml`
    /// 3. `config/{BARCODE_PROFILE}.toml` (if `BARCODE_PROFILE` is set)
    /// 4. Environment variables with `BARCODE_WORKER__` prefix
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        check_dotenv(dotenvy::dotenv().map(|_| ()))?;

        let profile =
            std::env::var("BARCODE_PROFILE").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{profile}")).required(false))
            // BARCODE_WORKER__BARCODE__MAX_BATCH=500 -> barcode.max_batch = 500
            .add_source(
                Environment::with_prefix("BARCODE_WORKER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app_config: Self = config.try_deserialize()?;
        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Message`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("server.port cannot be 0".to_string()));
        }

        if self.barcode.max_batch == 0 {
            return Err(ConfigError::Message(
                "barcode.max_batch cannot be 0".to_string(),
            ));
        }

        ean13::check_prefix(&self.barcode.default_prefix, self.barcode.prefix_policy).map_err(
            |e| {
                ConfigError::Message(format!(
                    "barcode.default_prefix is not allowed by the {} policy: {e}",
                    self.barcode.prefix_policy
                ))
            },
        )?;

        if !matches!(self.observability.log_format.as_str(), "text" | "json") {
            return Err(ConfigError::Message(format!(
                "observability.log_format must be \"text\" or \"json\", got {:?}",
                self.observability.log_format
            )));
        }

        let metrics_path = self.observability.metrics_path.as_str();
        if !metrics_path.starts_with('/') {
            return Err(ConfigError::Message(
                "observability.metrics_path must start with '/'".to_string(),
            ));
        }
        if RESERVED_PATHS.contains(&metrics_path) || metrics_path.starts_with(BARCODE_API_PREFIX) {
            return Err(ConfigError::Message(format!(
                "observability.metrics_path {metrics_path:?} collides with an API route"
            )));
        }

        Ok(())
    }
}

/// Accept a missing `.env` file, reject one that cannot be read or parsed.
fn check_dotenv(result: Result<(), dotenvy::Error>) -> Result<(), ConfigError> {
    match result {
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ConfigError::Message(format!("failed to load .env: {e}"))),
        Ok(()) => Ok(()),
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format: "text" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Enable Prometheus metrics endpoint.
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,

    /// Metrics endpoint path.
    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

const fn default_metrics_enabled() -> bool {
    true
}

fn default_metrics_path() -> String {
    "/metrics".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            metrics_enabled: true,
            metrics_path: default_metrics_path(),
        }
    }
}
