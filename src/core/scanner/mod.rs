//! # Scanner Module
//!
//! Lists the photos of a single folder in review order.
//!
//! ## Supported Formats
//! - JPEG (.jpg, .jpeg)
//! - PNG (.png)
//!
//! Matching is case-insensitive. Subdirectories (including `keep/` and
//! `delete/`) are never descended into.
//!
//! ## Example
//! ```rust,ignore
//! use photo_triage::core::scanner::DirectoryScanner;
//!
//! let queue = DirectoryScanner::new().scan("/Users/me/Photos".as_ref())?;
//! ```

mod filter;
mod walker;

pub use filter::ImageFilter;
pub use walker::DirectoryScanner;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A photo found in the scanned folder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannedPhoto {
    /// File name within the folder (the queue key)
    pub name: String,
    /// Full path at scan time
    pub path: PathBuf,
    /// Effective creation time (EXIF date or filesystem fallback)
    pub created: DateTime<Utc>,
    /// Detected image format
    pub format: ImageFormat,
}

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Unknown,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => ImageFormat::Jpeg,
            "png" => ImageFormat::Png,
            _ => ImageFormat::Unknown,
        }
    }

    /// Detect format from the suffix after the last dot of the file name.
    ///
    /// Unlike `Path::extension`, a bare `.jpg` counts as a JPEG.
    pub fn from_path(path: &std::path::Path) -> Self {
        path.file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.rsplit_once('.'))
            .map(|(_, ext)| Self::from_extension(ext))
            .unwrap_or(ImageFormat::Unknown)
    }

    /// Check if this format is supported
    pub fn is_supported(&self) -> bool {
        !matches!(self, ImageFormat::Unknown)
    }
}
