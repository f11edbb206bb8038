//! Read-only configuration.
//!
//! Settings are read once per invocation from the platform config directory.
//! Nothing is ever written back.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::report::html::DEFAULT_PLOTLY_CDN;

/// Report file name used when no output path is configured
pub const DEFAULT_REPORT_NAME: &str = "wrx_analysis.html";

/// Invocation settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Settings {
    /// Settings file version for migration support
    #[serde(default = "default_version")]
    pub version: u32,
    /// Directory holding the tuning-table sheets
    #[serde(default = "default_tables_dir")]
    pub tables_dir: PathBuf,
    /// Where to write the report; defaults to beside the selected log
    #[serde(default)]
    pub output_file: Option<PathBuf>,
    /// Open the finished report in the default browser
    #[serde(default = "default_true")]
    pub open_report: bool,
    /// Plotly script URL embedded in the report
    #[serde(default = "default_plotly_cdn")]
    pub plotly_cdn: String,
}

fn default_version() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_plotly_cdn() -> String {
    DEFAULT_PLOTLY_CDN.to_string()
}

fn default_tables_dir() -> PathBuf {
    dirs::document_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_default()
        .join("WRX")
        .join("rom_tables")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            tables_dir: default_tables_dir(),
            output_file: None,
            open_report: true,
            plotly_cdn: default_plotly_cdn(),
        }
    }
}

impl Settings {
    /// Get the config directory path for wotlog
    pub fn get_config_dir() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::data_dir().map(|p| p.join("wotlog"))
        }
        #[cfg(not(target_os = "macos"))]
        {
            dirs::config_dir().map(|p| p.join("wotlog"))
        }
    }

    /// Get the path to the settings JSON file
    pub fn get_settings_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|p| p.join("settings.json"))
    }

    /// Load settings from the config directory, falling back to defaults
    pub fn load() -> Self {
        match Self::get_settings_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load settings from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid settings file {}: {}", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                tracing::warn!("Failed to read settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Where the report for a given log is written
    pub fn report_path(&self, log_path: &Path) -> PathBuf {
        match &self.output_file {
            Some(path) => path.clone(),
            None => log_path
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(DEFAULT_REPORT_NAME),
        }
    }
}
