//! # Error Module
//!
//! Error types for the photo triage engine.
//!
//! ## Design Principles
//! - **Never panic** on user data - return errors instead
//! - **Include context** - paths, file names, what went wrong
//! - **Leave state untouched** - a failed decision or undo changes nothing
//! - **Recovery hints** - suggest how to fix when possible

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum TriageError {
    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),

    #[error("Relocation error: {0}")]
    Relocation(#[from] RelocationError),

    #[error("Decoding error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The inverse move of an undo failed. The history entry is kept so the
    /// undo can be retried.
    #[error("Could not undo the last decision on {filename}: {source}")]
    Undo {
        filename: String,
        #[source]
        source: RelocationError,
    },

    #[error("No folder is open. Open a folder before reviewing photos.")]
    NoSession,
}

/// Errors that occur while listing a folder for review
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that occur while moving a photo between folders
#[derive(Error, Debug)]
pub enum RelocationError {
    #[error("Source file not found: {path}")]
    SourceMissing { path: PathBuf },

    #[error("Failed to create directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot restore to {path}: a different file already uses that name. Rename or move it and try again.")]
    DestinationOccupied { path: PathBuf },

    #[error("Failed to move {from} to {to}: {source}")]
    Io {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Copy verification failed for {path}: source {source_bytes} bytes, destination {dest_bytes} bytes")]
    CopyVerification {
        path: PathBuf,
        source_bytes: u64,
        dest_bytes: u64,
    },
}

/// Errors that occur while decoding an image
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Failed to open image file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode image {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
}

/// Errors that occur while loading or saving configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {reason}. Fix or delete this file to use defaults.")]
    Parse { path: PathBuf, reason: String },

    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, TriageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_error_includes_path() {
        let error = ScanError::NotADirectory {
            path: PathBuf::from("/photos/vacation.jpg"),
        };
        let message = error.to_string();
        assert!(message.contains("/photos/vacation.jpg"));
    }

    #[test]
    fn relocation_error_includes_both_paths() {
        let error = RelocationError::Io {
            from: PathBuf::from("/photos/a.jpg"),
            to: PathBuf::from("/photos/delete/a.jpg"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = error.to_string();
        assert!(message.contains("/photos/a.jpg"));
        assert!(message.contains("/photos/delete/a.jpg"));
    }

    #[test]
    fn occupied_destination_suggests_recovery() {
        let error = RelocationError::DestinationOccupied {
            path: PathBuf::from("/photos/a.jpg"),
        };
        assert!(error.to_string().contains("try again"));
    }

    #[test]
    fn undo_error_names_the_file() {
        let error = TriageError::Undo {
            filename: "beach.jpg".to_string(),
            source: RelocationError::SourceMissing {
                path: PathBuf::from("/photos/keep/beach.jpg"),
            },
        };
        let message = error.to_string();
        assert!(message.contains("beach.jpg"));
        assert!(message.contains("undo"));
    }
}
