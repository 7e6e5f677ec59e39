//! `estimator.toml` settings.
//!
//! ```toml
//! [database]
//! backend = "sqlite"
//! connection_string = "estimates.db"
//!
//! [owner]
//! app_id = "default_app_id"
//! user_id = "default_user"
//!
//! [plaster.wall]
//! length = 8.0
//! height = 2.2
//! sides = 1
//! thickness_cm = 2.0
//!
//! [plaster.rates]
//! bag_yield_m2 = 4.5
//! bag_price = 35.0
//! labor_price_per_m2 = 25.0
//! sand_ratio = 4.0
//!
//! [budget]
//! labor_rate = 25.0
//! overhead_pct = 10.0
//! profit_pct = 10.0
//! tax_pct = 0.0
//! ```
//!
//! Every section and key is optional.

use std::path::{Path, PathBuf};

use estimator_core::db::DbConfig;
use estimator_core::{BudgetRates, EstimateOwner, MaterialRates, WallSpec};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub backend: String,
    pub connection_string: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection_string: "estimates.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlasterSection {
    pub wall: WallSpec,
    pub rates: MaterialRates,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseSection,
    pub owner: EstimateOwner,
    pub plaster: PlasterSection,
    pub budget: BudgetRates,
}

impl AppConfig {
    pub fn from_toml(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }

    /// Read `path`. A missing file yields `Ok(None)`.
    pub fn read(path: &Path) -> Result<Option<Self>, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::from_toml(&text)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            backend: self.database.backend.clone(),
            connection_string: self.database.connection_string.clone(),
            owner: self.owner.clone(),
        }
    }
}

/// Startup configuration together with whether saving is allowed.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub persistence_enabled: bool,
}

/// Load the configuration at startup.
///
/// A missing file means built-in defaults. A file that cannot be read or
/// parsed is logged as a warning; the defaults are used and persistence is
/// disabled for the run.
pub fn load(path: &Path) -> LoadedConfig {
    match AppConfig::read(path) {
        Ok(Some(config)) => {
            debug!(path = %path.display(), "configuration loaded");
            LoadedConfig {
                config,
                persistence_enabled: true,
            }
        }
        Ok(None) => {
            debug!(path = %path.display(), "no configuration file; using defaults");
            LoadedConfig {
                config: AppConfig::default(),
                persistence_enabled: true,
            }
        }
        Err(error) => {
            warn!(%error, "using default settings; saving is disabled for this run");
            LoadedConfig {
                config: AppConfig::default(),
                persistence_enabled: false,
            }
        }
    }
}
