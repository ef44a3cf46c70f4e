//! HTTP server configuration loaded from `APP_*` environment variables

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// Deployment mode. Development relaxes the JWT secret requirement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Production,
    Development,
}

impl RunMode {
    pub fn is_development(self) -> bool {
        self == RunMode::Development
    }
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub env: RunMode,
    /// Origins allowed to call the API from a browser
    pub cors_origins: Vec<String>,
    /// Upper bound on a single request, storage calls included
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            env: RunMode::Production,
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:3001".to_string(),
            ],
            request_timeout_secs: 30,
        }
    }
}

impl AppConfig {
    /// Load from `APP_HOST`, `APP_PORT`, `APP_ENV`, `APP_CORS_ORIGINS`
    /// (comma separated) and `APP_REQUEST_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", defaults.port as i64)?
            .set_default("env", "production")?
            .set_default("cors_origins", defaults.cors_origins)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?
            .add_source(
                Environment::with_prefix("APP")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_origins"),
            )
            .build()?
            .try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
