//! # aja-config
//!
//! Layered configuration loading for the AJALabs client using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`AJA_*` prefix, `__` as separator)
//! 2. Project-level `.ajalabs/config.toml`
//! 3. User-level `~/.config/ajalabs/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `AJA_API__AUDIT_URL` -> `api.audit_url`,
//! `AJA_GENERAL__PAGE_SIZE` -> `general.page_size`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use aja_config::AjaConfig;
//!
//! let config = AjaConfig::load_with_dotenv().expect("config");
//! println!("audit backend: {}", config.api.audit_base());
//! ```

mod api;
mod error;
mod general;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "AJA_";

/// Project-local config path, relative to the working directory.
pub const LOCAL_CONFIG_PATH: &str = ".ajalabs/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AjaConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl AjaConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does not read `.env`; use [`Self::load_with_dotenv`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed and
    /// the validation errors of [`ApiConfig::validate`].
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        // A missing .env is fine.
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check values that deserialize fine but cannot work.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] or [`ConfigError::NotConfigured`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        if self.general.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.page_size".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.general.history_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.history_limit".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    #[must_use]
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ajalabs").join("config.toml"))
    }
}
