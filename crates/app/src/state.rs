//! Application state management

use std::path::Path;

use sorteador_core::{AppConfig, Database, Error, Result};

/// Loaded configuration plus the open database
pub struct AppState {
    pub db: Database,
    pub config: AppConfig,
}

impl AppState {
    /// Open the configured database, creating its directory if needed
    pub fn new(config: AppConfig, database_override: Option<&Path>) -> Result<Self> {
        let db_path = match database_override {
            Some(path) => path.to_path_buf(),
            None => config.database_path()?,
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        tracing::debug!(path = %db_path.display(), "Opening database");
        let db = Database::open(&db_path)?;
        Ok(Self { db, config })
    }

    /// In-memory state for tests
    #[cfg(test)]
    pub fn in_memory(config: AppConfig) -> Result<Self> {
        Ok(Self {
            db: Database::open_in_memory()?,
            config,
        })
    }

    pub fn load_config(path: Option<&Path>) -> Result<AppConfig> {
        match path {
            Some(path) if !path.exists() => Err(Error::Config(format!(
                "Config file not found: {}",
                path.display()
            ))),
            Some(path) => AppConfig::load(path),
            None => AppConfig::load_default(),
        }
    }
}
