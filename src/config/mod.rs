//! Persisted selection store.
//!
//! A small YAML file keeps the two chosen locations as `{name, country}`
//! pairs. Read once at startup to restore the prior choices, written every
//! time a selection changes.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{AppError, AppResult};
use crate::models::Location;

/// A persisted location reference; resolved back against the index at
/// startup (and silently dropped if the dataset no longer has it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedLocation {
    pub name: String,
    pub country: String,
}

impl PersistedLocation {
    pub fn from_location(location: &Location) -> Self {
        Self {
            name: location.name.clone(),
            country: location.country.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    pub location1: Option<PersistedLocation>,
    pub location2: Option<PersistedLocation>,
}

impl Settings {
    /// Standard configuration directory depending on the platform.
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("citytime")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".citytime")
        }
    }

    /// Full path of the default settings file.
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("citytime.conf")
    }

    /// Load settings from `path`; a missing file yields defaults, a
    /// malformed one is an error.
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Write settings to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| AppError::Config(format!("serialize settings: {e}")))?;
        fs::write(path, yaml)?;
        Ok(())
    }

    /// Record a slot's selection (slot_index is 0 or 1).
    pub fn remember(&mut self, slot_index: usize, location: &Location) {
        let entry = Some(PersistedLocation::from_location(location));
        match slot_index {
            0 => self.location1 = entry,
            _ => self.location2 = entry,
        }
    }

    pub fn slot(&self, slot_index: usize) -> Option<&PersistedLocation> {
        match slot_index {
            0 => self.location1.as_ref(),
            _ => self.location2.as_ref(),
        }
    }
}
