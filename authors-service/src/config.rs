use std::{env, net::SocketAddr, path::Path};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::AppResult;

/// Application configuration.
///
/// Contains all configuration settings for the authors service.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Distribution metadata configuration
    pub distribution: DistributionConfig,
    /// Server configuration settings
    pub server: ServerConfig,
    /// Tracing configuration
    pub tracing: TracingConfig,
}

/// Server configuration settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// HTTP server bind address
    pub http_address: SocketAddr,
}

/// Tracing configuration.
///
/// Controls how tracing data is output from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind")]
pub enum TracingConfig {
    /// Log events only, no span exporter
    Memory,
    /// Log events and export spans to standard output
    Stdout,
}

/// Distribution metadata configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DistributionConfig {
    /// Distribution name
    pub name: String,
    /// Distribution version
    pub version: Option<String>,
}

const CONFIG_PATH_ENV: &str = "AUTHORS_CONFIG_PATH";
const ENV_PREFIX: &str = "AUTHORS";
const VERSION: &str = env!("CARGO_PKG_VERSION");

const DISTRIBUTION_NAME_KEY: &str = "distribution.name";
const DISTRIBUTION_VERSION_KEY: &str = "distribution.version";
const SERVER_HTTP_ADDRESS_KEY: &str = "server.http_address";
const TRACING_KIND_KEY: &str = "tracing.kind";

impl AppConfig {
    /// Loads configuration from defaults, files and environment variables.
    ///
    /// Sources, lowest priority first: built-in defaults, `{dir}/default`,
    /// `{dir}/local`, then `AUTHORS__*` variables. `{dir}` is read from
    /// `AUTHORS_CONFIG_PATH` and defaults to `config`. Both files are optional.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file cannot be parsed or a value
    /// has the wrong type.
    pub fn load() -> AppResult<Self> {
        let config_path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config".to_string());
        let config_path = Path::new(&config_path);

        let config = Config::builder()
            .set_default(DISTRIBUTION_NAME_KEY, authors_api::model::author_service::API_NAME)?
            .set_default(DISTRIBUTION_VERSION_KEY, VERSION)?
            .set_default(SERVER_HTTP_ADDRESS_KEY, "127.0.0.1:8000")?
            .set_default(TRACING_KIND_KEY, "Stdout")?
            .add_source(File::from(config_path.join("default")).required(false))
            // Local overrides, not checked in
            .add_source(File::from(config_path.join("local")).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
