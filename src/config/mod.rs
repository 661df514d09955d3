//! Configuration management for photo triage.
//!
//! Settings live in a JSON file, by default
//! `{config_dir}/photo-triage/config.json`. Every field is optional in the
//! file; a missing file means all defaults. The folder layout (`keep/`,
//! `delete/`, supported extensions) is fixed and not configurable.

use crate::core::quality::{DEFAULT_ANALYSIS_SIZE, DEFAULT_BLUR_THRESHOLD};
use crate::core::screenshot::ScreenshotConfidence;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_DIR_NAME: &str = "photo-triage";
const CONFIG_FILE_NAME: &str = "config.json";

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageConfig {
    /// Laplacian variance below which `blur` flags a photo
    #[serde(default = "default_blur_threshold")]
    pub blur_threshold: f64,

    /// Longest edge photos are scaled to before blur analysis (0 keeps full size)
    #[serde(default = "default_analysis_size")]
    pub blur_analysis_size: u32,

    #[serde(default = "default_min_confidence")]
    pub screenshot_min_confidence: ScreenshotConfidence,

    /// Also write logs to `{log_dir}/photo-triage.log`
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

fn default_blur_threshold() -> f64 {
    DEFAULT_BLUR_THRESHOLD
}
fn default_analysis_size() -> u32 {
    DEFAULT_ANALYSIS_SIZE
}
fn default_min_confidence() -> ScreenshotConfidence {
    ScreenshotConfidence::Medium
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            blur_threshold: default_blur_threshold(),
            blur_analysis_size: default_analysis_size(),
            screenshot_min_confidence: default_min_confidence(),
            log_dir: None,
        }
    }
}

impl TriageConfig {
    /// `{config_dir}/photo-triage/config.json`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config = serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// The file `load_or_default` reads: `path` if given, else the default location
    pub fn resolve_path(path: Option<&Path>) -> Option<PathBuf> {
        path.map(Path::to_path_buf).or_else(Self::default_path)
    }

    /// Load `path` (or the default location), falling back to defaults when
    /// the file does not exist. A file that exists but is broken is an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match Self::resolve_path(path) {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Write as pretty JSON, creating parent folders
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let write_error = |e: std::io::Error| ConfigError::Write {
            path: path.to_path_buf(),
            source: e,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        fs::write(path, json).map_err(write_error)
    }
}
