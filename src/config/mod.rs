// ==========================================
// Import configuration
// ==========================================
// Loaded from an optional JSON file; every field has a default so a
// partial (or absent) file works.
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Sheets of the reference workbook that carry metadata/options rather
/// than hierarchy data.
pub const DEFAULT_SKIP_SHEETS: [&str; 2] = ["General", "OptionalFields"];

/// Configuration error type
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(String),

    #[error("config file invalid: {path}: {message}")]
    Invalid { path: String, message: String },
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Sheet names never treated as hierarchy groups.
    pub skip_sheets: Vec<String>,
    /// Default database location.
    pub db_path: String,
    /// Default reference workbook for hierarchy imports.
    pub workbook_path: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            skip_sheets: DEFAULT_SKIP_SHEETS.iter().map(|s| s.to_string()).collect(),
            db_path: "maintenance.db".to_string(),
            workbook_path: "Konfiguration.xlsx".to_string(),
        }
    }
}

impl ImportConfig {
    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::NotFound(path.display().to_string()))?;
        serde_json::from_str(&raw).map_err(|e| ConfigError::Invalid {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load from the given path if it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(&path) {
            Ok(config) => config,
            Err(ConfigError::NotFound(_)) => Self::default(),
            Err(e) => {
                tracing::warn!("ignoring invalid config: {}", e);
                Self::default()
            }
        }
    }

    pub fn is_skipped_sheet(&self, sheet_name: &str) -> bool {
        self.skip_sheets.iter().any(|s| s == sheet_name)
    }
}
