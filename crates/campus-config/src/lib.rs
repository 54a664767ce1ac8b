//! # campus-config
//!
//! Layered configuration loading for Campus using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CAMPUS_*` prefix, `__` as separator)
//! 2. Project-level `.campus/config.toml`
//! 3. User-level `~/.config/campus/config.toml`
//! 4. `OPENAI_API_KEY` (fills `openai.api_key` only)
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `CAMPUS_DATABASE__PATH` -> `database.path`,
//! `CAMPUS_OPENAI__GRADING_MODEL` -> `openai.grading_model`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use campus_config::CampusConfig;
//!
//! let config = CampusConfig::load_with_dotenv().expect("config");
//! println!("database: {}", config.database.path);
//! ```

mod database;
mod error;
mod general;
mod openai;
mod storage;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use openai::OpenAiConfig;
pub use storage::StorageConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const ENV_PREFIX: &str = "CAMPUS_";
const LOCAL_CONFIG: &str = ".campus/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CampusConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub openai: OpenAiConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl CampusConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading a `.env` file, if one exists.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        figment = figment.merge(
            Env::raw()
                .only(&["OPENAI_API_KEY"])
                .map(|_| "openai.api_key".into()),
        );

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject values no command could work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "database.path",
                reason: "must not be empty",
            });
        }
        if self.general.default_limit == 0 {
            return Err(ConfigError::Invalid {
                field: "general.default_limit",
                reason: "must be at least 1",
            });
        }
        if self.openai.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "openai.timeout_secs",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// The `openai` section, or [`ConfigError::MissingSection`] when no key is set.
    pub fn require_openai(&self) -> Result<&OpenAiConfig, ConfigError> {
        if self.openai.is_configured() {
            Ok(&self.openai)
        } else {
            Err(ConfigError::MissingSection {
                section: "openai",
                hint: "set OPENAI_API_KEY or openai.api_key",
            })
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("campus").join("config.toml"))
    }

    /// Walks up from `CARGO_MANIFEST_DIR` (when set) looking for `.env`,
    /// then falls back to the current directory.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = CampusConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.openai.is_configured());
        assert_eq!(config.general.default_limit, 20);
    }

    #[test]
    fn require_openai_without_key() {
        let config = CampusConfig::default();
        let err = config.require_openai().unwrap_err();
        assert!(matches!(err, ConfigError::MissingSection { section: "openai", .. }));
    }

    #[test]
    fn zero_limit_is_invalid() {
        let mut config = CampusConfig::default();
        config.general.default_limit = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("general.default_limit"));
    }
}
