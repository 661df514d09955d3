//! # Relocator Module
//!
//! Moves photos between the review folder and its category subfolders
//! without ever overwriting a file.
//!
//! ## Layout
//! ```text
//! <base>/            photos still to review
//! <base>/keep/       photos marked Keep
//! <base>/delete/     photos marked Delete
//! ```
//!
//! A name already taken at the destination gets a numeric suffix:
//! `photo.jpg` -> `photo_1.jpg` -> `photo_2.jpg`.

use crate::error::RelocationError;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Subfolder receiving kept photos
pub const KEEP_DIR_NAME: &str = "keep";
/// Subfolder receiving photos marked for deletion
pub const DELETE_DIR_NAME: &str = "delete";

/// Collision-safe mover bound to one review folder
#[derive(Debug, Clone)]
pub struct FileRelocator {
    base_dir: PathBuf,
    keep_dir: PathBuf,
    delete_dir: PathBuf,
}

impl FileRelocator {
    /// Bind to `base_dir`, creating `keep/` and `delete/` if missing.
    ///
    /// Existing contents of those folders are left untouched.
    pub fn new(base_dir: &Path) -> Result<Self, RelocationError> {
        let relocator = Self {
            base_dir: base_dir.to_path_buf(),
            keep_dir: base_dir.join(KEEP_DIR_NAME),
            delete_dir: base_dir.join(DELETE_DIR_NAME),
        };

        create_dir(&relocator.keep_dir)?;
        create_dir(&relocator.delete_dir)?;

        Ok(relocator)
    }

    /// Bind to `base_dir` without touching the filesystem.
    ///
    /// Destination folders are created by the first move into them.
    pub fn lazy(base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            keep_dir: base_dir.join(KEEP_DIR_NAME),
            delete_dir: base_dir.join(DELETE_DIR_NAME),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn keep_dir(&self) -> &Path {
        &self.keep_dir
    }

    pub fn delete_dir(&self) -> &Path {
        &self.delete_dir
    }

    /// Move `filename` from `from_dir` into `to_dir`.
    ///
    /// Never overwrites: if the name is taken, the file lands under the first
    /// free `{stem}_{n}{ext}` name. Returns the final destination path.
    pub fn move_file(
        &self,
        filename: &str,
        from_dir: &Path,
        to_dir: &Path,
    ) -> Result<PathBuf, RelocationError> {
        let source = from_dir.join(filename);
        if !source.is_file() {
            return Err(RelocationError::SourceMissing { path: source });
        }

        create_dir(to_dir)?;

        let destination = unique_destination(to_dir, filename);
        if destination.file_name() != Some(OsStr::new(filename)) {
            info!(
                "{} already exists in {}, saving as {}",
                filename,
                to_dir.display(),
                destination.display()
            );
        }

        move_path(&source, &destination)?;
        debug!("Moved {} -> {}", source.display(), destination.display());

        Ok(destination)
    }

    /// Move a photo from the review folder into `delete/`
    pub fn to_delete(&self, filename: &str) -> Result<PathBuf, RelocationError> {
        self.move_file(filename, &self.base_dir, &self.delete_dir)
    }

    /// Move a photo from the review folder into `keep/`
    pub fn to_keep(&self, filename: &str) -> Result<PathBuf, RelocationError> {
        self.move_file(filename, &self.base_dir, &self.keep_dir)
    }

    /// Move `stored_name` out of `delete/` back to `original_name` in the review folder
    pub fn restore_from_delete(
        &self,
        stored_name: &str,
        original_name: &str,
    ) -> Result<PathBuf, RelocationError> {
        self.restore(&self.delete_dir, stored_name, original_name)
    }

    /// Move `stored_name` out of `keep/` back to `original_name` in the review folder
    pub fn restore_from_keep(
        &self,
        stored_name: &str,
        original_name: &str,
    ) -> Result<PathBuf, RelocationError> {
        self.restore(&self.keep_dir, stored_name, original_name)
    }

    /// Move `stored_name` out of `from_dir` back to `original_name` in the review folder.
    ///
    /// Unlike [`move_file`](Self::move_file) this refuses to rename: the photo
    /// must come back under the name the review queue knows it by.
    pub fn restore(
        &self,
        from_dir: &Path,
        stored_name: &str,
        original_name: &str,
    ) -> Result<PathBuf, RelocationError> {
        let source = from_dir.join(stored_name);
        if !source.is_file() {
            return Err(RelocationError::SourceMissing { path: source });
        }

        let destination = self.base_dir.join(original_name);
        if destination.exists() {
            return Err(RelocationError::DestinationOccupied { path: destination });
        }

        move_path(&source, &destination)?;
        debug!("Restored {} -> {}", source.display(), destination.display());

        Ok(destination)
    }
}

/// First free path for `filename` inside `dir`
pub fn unique_destination(dir: &Path, filename: &str) -> PathBuf {
    let candidate = dir.join(filename);
    if !candidate.exists() {
        return candidate;
    }

    let name = Path::new(filename);
    let stem = name
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);
    let ext = name.extension().and_then(|e| e.to_str()).unwrap_or("");

    let mut counter = 1;
    loop {
        let new_name = if ext.is_empty() {
            format!("{}_{}", stem, counter)
        } else {
            format!("{}_{}.{}", stem, counter, ext)
        };
        let new_path = dir.join(new_name);
        if !new_path.exists() {
            return new_path;
        }
        counter += 1;
    }
}

fn create_dir(dir: &Path) -> Result<(), RelocationError> {
    fs::create_dir_all(dir).map_err(|e| RelocationError::CreateDirectory {
        path: dir.to_path_buf(),
        source: e,
    })
}

/// Rename, or copy-verify-delete when rename is impossible (e.g. across volumes).
///
/// On failure the source is still in place and no copy is left behind.
fn move_path(source: &Path, destination: &Path) -> Result<(), RelocationError> {
    let rename_error = match fs::rename(source, destination) {
        Ok(()) => return Ok(()),
        Err(e) => e,
    };

    debug!(
        "rename {} failed ({}), falling back to copy",
        source.display(),
        rename_error
    );

    let io_error = |e: std::io::Error| RelocationError::Io {
        from: source.to_path_buf(),
        to: destination.to_path_buf(),
        source: e,
    };

    let source_size = fs::metadata(source).map_err(io_error)?.len();
    if let Err(e) = fs::copy(source, destination) {
        let _ = fs::remove_file(destination);
        return Err(io_error(e));
    }

    let dest_size = fs::metadata(destination).map_err(io_error)?.len();
    if dest_size != source_size {
        // Copy was incomplete, don't delete source
        let _ = fs::remove_file(destination);
        return Err(RelocationError::CopyVerification {
            path: source.to_path_buf(),
            source_bytes: source_size,
            dest_bytes: dest_size,
        });
    }

    if let Err(e) = fs::remove_file(source) {
        warn!(
            "Copied {} but could not remove it, rolling back the copy",
            source.display()
        );
        let _ = fs::remove_file(destination);
        return Err(io_error(e));
    }

    Ok(())
}
