//! Configuration for the library catalog

use crate::domain::value_objects::{IdFormat, DEFAULT_ID_LENGTH, DEFAULT_SERIAL_LENGTH};
use crate::domain::DomainResult;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct IdentifierConfig {
    /// Length of book and member ids
    pub length: usize,
    /// Length of ISBN-like serial numbers
    pub serial_length: usize,
    /// Length of student and teacher card numbers
    pub card_length: usize,
}

impl IdentifierConfig {
    pub fn id_format(&self) -> DomainResult<IdFormat> {
        IdFormat::new(self.length)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    pub identifiers: IdentifierConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables.
    ///
    /// Later sources win: built-in defaults, `config/default`, `config/{RUN_MODE}`,
    /// then `LIBRARY__SECTION__KEY` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(
                Environment::with_prefix("LIBRARY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::from_config(config)
    }

    /// Load a single configuration file over the built-in defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()?;

        Self::from_config(config)
    }

    fn from_config(config: Config) -> Result<Self, ConfigError> {
        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let ids = &self.identifiers;
        if ids.length == 0 || ids.serial_length == 0 || ids.card_length == 0 {
            return Err(ConfigError::Message(
                "identifier lengths must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for IdentifierConfig {
    fn default() -> Self {
        Self {
            length: DEFAULT_ID_LENGTH,
            serial_length: DEFAULT_SERIAL_LENGTH,
            card_length: DEFAULT_ID_LENGTH,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
