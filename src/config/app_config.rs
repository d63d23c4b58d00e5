use config::Config;
use error_stack::{report, ResultExt};
use thiserror::Error;

use super::{log_config::LogConfig, sheets_config::SpreadsheetConfig};

pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "Config";
pub const ENV_PREFIX: &str = "SHEET_SYNC";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from '{0}'")]
    Load(String),
    #[error("Invalid configuration value at '{0}'")]
    InvalidField(String),
    #[error("Missing environment variable {0}")]
    MissingCredentials(String),
    #[error("Environment variable {0} does not hold a valid service account key")]
    InvalidCredentials(String),
}

#[derive(serde::Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub sheets: SpreadsheetConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// Defaults, then the optional file named by `CONFIG_PATH`, then `SHEET_SYNC__*` variables.
    pub fn load() -> error_stack::Result<Self, ConfigError> {
        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &str) -> error_stack::Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .change_context_lazy(|| ConfigError::Load(config_path.to_string()))?;

        let value = config
            .try_deserialize::<serde_json::Value>()
            .change_context_lazy(|| ConfigError::Load(config_path.to_string()))?;

        Self::from_value(value)
    }

    fn from_value(value: serde_json::Value) -> error_stack::Result<Self, ConfigError> {
        serde_path_to_error::deserialize::<_, AppConfig>(value).map_err(|err| {
            let path = err.path().to_string();
            report!(ConfigError::InvalidField(path.clone()))
                .attach_printable(format!("{}", err.into_inner()))
                .attach_printable("Check the configuration file and SHEET_SYNC__* variables")
        })
    }
}
