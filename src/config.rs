//! Configuration Module
//! Optional `coviz.json` next to the working directory.

use anyhow::{Context as _, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Startup configuration. Every field is optional; a missing file yields the
/// defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// CSV snapshot to load on startup. When unset the user browses for one.
    pub csv_path: Option<PathBuf>,
    /// Date for the point-in-time snapshot panel. No snapshot when unset;
    /// never inferred from the current date.
    pub reference_date: Option<NaiveDate>,
    /// Country highlighted before the user makes a selection.
    pub default_country: Option<String>,
}

impl DashboardConfig {
    pub const FILE_NAME: &'static str = "coviz.json";

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config =
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }

    /// Load the config file if present, falling back to defaults when it is
    /// absent or malformed.
    pub fn load_or_default() -> Self {
        let path = PathBuf::from(Self::FILE_NAME);
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring {}: {e:#}", Self::FILE_NAME);
                Self::default()
            }
        }
    }
}
