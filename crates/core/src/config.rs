//! Application configuration
//!
//! Loaded from `sorteador.toml` in the platform config directory, or from an
//! explicit path. Every section is optional.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::DrawSettings;

const CONFIG_FILE: &str = "sorteador.toml";
const DATABASE_FILE: &str = "sorteador.db";

/// Top-level configuration file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    /// Defaults applied to draws when the command line does not override them
    pub draw: DrawSettings,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file; defaults to the platform data directory
    pub database_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Parse configuration from TOML content
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: AppConfig =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file, falling back to defaults if it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load from the platform default location
    pub fn load_default() -> Result<Self> {
        Self::load(&Self::default_config_path()?)
    }

    fn validate(&self) -> Result<()> {
        if self.draw.quantity < 1 {
            return Err(Error::Config("draw.quantity must be at least 1".into()));
        }
        if self.draw.fair_mode && self.draw.with_replacement {
            return Err(Error::Config(
                "draw.fair_mode and draw.with_replacement cannot both be enabled".into(),
            ));
        }
        Ok(())
    }

    /// Database path from config, or the platform data directory
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.storage.database_path {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join(DATABASE_FILE)),
        }
    }

    pub fn default_config_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join(CONFIG_FILE))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "onyx", "sorteador").ok_or_else(|| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine data directory",
        ))
    })
}
