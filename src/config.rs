//! Runtime configuration
//!
//! Loaded from a JSON file; every field has a default so a partial file
//! (or none at all) is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::domain::{DomainError, DomainResult};
use crate::repository::IN_MEMORY;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite file, or ":memory:"
    pub db_path: PathBuf,
    /// Directory for rolling log files; no file logging when unset
    pub log_dir: Option<PathBuf>,
    /// Log file base name
    pub app_name: String,
    /// Populate default categories and locations on first open
    pub seed_defaults: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("packfast.db"),
            log_dir: None,
            app_name: "PackFast".to_string(),
            seed_defaults: true,
        }
    }
}

impl Config {
    /// Throwaway in-memory database, no file logging
    pub fn in_memory() -> Self {
        Self {
            db_path: PathBuf::from(IN_MEMORY),
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> DomainResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| DomainError::Validation(format!("Invalid config: {}", e)))
    }

    /// Read a config file; a missing file yields the defaults
    pub fn load(path: &Path) -> DomainResult<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)
            .map_err(|e| DomainError::Persistence(format!("Failed to read config: {}", e)))?;
        Self::from_json(&json)
    }
}
