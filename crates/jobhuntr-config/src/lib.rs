//! # jobhuntr-config
//!
//! Layered configuration loading for jobhuntr using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`JOBHUNTR_*` prefix, `__` as separator)
//! 2. Project-level `.jobhuntr/config.toml`
//! 3. User-level `~/.config/jobhuntr/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `JOBHUNTR_DATABASE__PATH` -> `database.path`,
//! `JOBHUNTR_SERVICE__OPERATION_TIMEOUT_MS` -> `service.operation_timeout_ms`.
//!
//! # Usage
//!
//! ```no_run
//! use jobhuntr_config::HuntConfig;
//!
//! let config = HuntConfig::load_with_dotenv().expect("config");
//! println!("database: {}", config.database.resolved_path().display());
//! ```

mod database;
mod error;
mod general;
mod service;

pub use database::{DatabaseConfig, IN_MEMORY};
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use service::ServiceConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HuntConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl HuntConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or layer extra providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".jobhuntr/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("JOBHUNTR_").split("__"))
    }

    /// Reject values the service cannot run with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero operation timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service.operation_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "service.operation_timeout_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("jobhuntr").join("config.toml"))
    }
}
