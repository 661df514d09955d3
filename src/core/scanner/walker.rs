//! Directory listing implementation using walkdir.

use super::{filter::ImageFilter, ScannedPhoto};
use crate::core::metadata::creation_time;
use crate::error::ScanError;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Lists the photos directly inside one folder, oldest first
#[derive(Debug, Clone, Default)]
pub struct DirectoryScanner {
    filter: ImageFilter,
}

impl DirectoryScanner {
    /// Create a scanner accepting every supported photo
    pub fn new() -> Self {
        Self {
            filter: ImageFilter::new(),
        }
    }

    /// Include or exclude hidden files
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.filter = self.filter.with_hidden(include);
        self
    }

    /// Scan a folder and return its photos ordered by creation time.
    ///
    /// Ties keep file-name order, so repeated scans of an unchanged folder
    /// produce the same queue.
    pub fn scan(&self, root: &Path) -> Result<Vec<ScannedPhoto>, ScanError> {
        if !root.exists() {
            return Err(ScanError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        if !root.is_dir() {
            return Err(ScanError::NotADirectory {
                path: root.to_path_buf(),
            });
        }

        // Surface an unreadable folder as a hard error instead of an empty queue
        fs::read_dir(root).map_err(|e| ScanError::ReadDirectory {
            path: root.to_path_buf(),
            source: e,
        })?;

        let walker = WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        let mut photos = Vec::new();

        for entry_result in walker {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", root.display(), e);
                    continue;
                }
            };

            let path = entry.path();

            // Follows symlinks: linked files count, linked directories don't
            if !path.is_file() || !self.filter.should_include(path) {
                continue;
            }

            let name = match entry.file_name().to_str() {
                Some(name) => name.to_string(),
                None => {
                    warn!("Skipping file with non UTF-8 name: {}", path.display());
                    continue;
                }
            };

            photos.push(ScannedPhoto {
                created: creation_time(path),
                format: self.filter.get_format(path),
                path: path.to_path_buf(),
                name,
            });
        }

        // Stable sort keeps the file-name order for equal timestamps
        photos.sort_by_key(|photo| photo.created);

        debug!("Scanned {}: {} photos", root.display(), photos.len());

        Ok(photos)
    }

    /// Scan a folder and return only the ordered file names
    pub fn scan_names(&self, root: &Path) -> Result<Vec<String>, ScanError> {
        Ok(self.scan(root)?.into_iter().map(|p| p.name).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_photo(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        // Write minimal JPEG header
        file.write_all(&[0xFF, 0xD8, 0xFF, 0xE0]).unwrap();
        path
    }

    #[test]
    fn scan_empty_directory_returns_empty_vec() {
        let temp_dir = TempDir::new().unwrap();
        let result = DirectoryScanner::new().scan(temp_dir.path()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn scan_finds_single_photo() {
        let temp_dir = TempDir::new().unwrap();
        create_test_photo(&temp_dir, "photo.jpg");

        let result = DirectoryScanner::new().scan(temp_dir.path()).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "photo.jpg");
    }

    #[test]
    fn scan_excludes_non_image_files() {
        let temp_dir = TempDir::new().unwrap();
        create_test_photo(&temp_dir, "photo.jpg");
        File::create(temp_dir.path().join("document.txt")).unwrap();
        File::create(temp_dir.path().join("clip.heic")).unwrap();

        let names = DirectoryScanner::new()
            .scan_names(temp_dir.path())
            .unwrap();

        assert_eq!(names, vec!["photo.jpg".to_string()]);
    }

    #[test]
    fn scan_matches_extensions_case_insensitively() {
        let temp_dir = TempDir::new().unwrap();
        create_test_photo(&temp_dir, "upper.JPG");
        create_test_photo(&temp_dir, "mixed.JpEg");
        create_test_photo(&temp_dir, "shout.PNG");

        let result = DirectoryScanner::new().scan(temp_dir.path()).unwrap();

        assert_eq!(result.len(), 3);
    }

    #[test]
    fn scan_accepts_file_named_only_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        create_test_photo(&temp_dir, ".jpg");
        create_test_photo(&temp_dir, "a.jpg");

        let mut names = DirectoryScanner::new()
            .scan_names(temp_dir.path())
            .unwrap();
        names.sort();

        assert_eq!(names, vec![".jpg".to_string(), "a.jpg".to_string()]);
    }

    #[test]
    fn scan_does_not_descend_into_subdirectories() {
        let temp_dir = TempDir::new().unwrap();
        create_test_photo(&temp_dir, "root.jpg");

        let keep = temp_dir.path().join("keep");
        fs::create_dir(&keep).unwrap();
        File::create(keep.join("kept.jpg")).unwrap();

        // A directory whose name looks like a photo is still a directory
        fs::create_dir(temp_dir.path().join("album.jpg")).unwrap();

        let names = DirectoryScanner::new()
            .scan_names(temp_dir.path())
            .unwrap();

        assert_eq!(names, vec!["root.jpg".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn scan_excludes_symlinked_directories() {
        let temp_dir = TempDir::new().unwrap();
        let target = TempDir::new().unwrap();
        create_test_photo(&temp_dir, "photo.jpg");
        std::os::unix::fs::symlink(target.path(), temp_dir.path().join("linked.jpg")).unwrap();

        let names = DirectoryScanner::new()
            .scan_names(temp_dir.path())
            .unwrap();

        assert_eq!(names, vec!["photo.jpg".to_string()]);
    }

    #[test]
    fn scan_can_exclude_hidden_files() {
        let temp_dir = TempDir::new().unwrap();
        create_test_photo(&temp_dir, "visible.jpg");
        create_test_photo(&temp_dir, ".hidden.jpg");

        let all = DirectoryScanner::new().scan(temp_dir.path()).unwrap();
        let visible = DirectoryScanner::new()
            .with_hidden(false)
            .scan(temp_dir.path())
            .unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(visible.len(), 1);
    }

    #[test]
    fn scan_nonexistent_directory_returns_error() {
        let result = DirectoryScanner::new().scan(Path::new("/nonexistent/path/12345"));
        assert!(matches!(result, Err(ScanError::DirectoryNotFound { .. })));
    }

    #[test]
    fn scan_file_instead_of_directory_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let file = create_test_photo(&temp_dir, "photo.jpg");

        let result = DirectoryScanner::new().scan(&file);

        assert!(matches!(result, Err(ScanError::NotADirectory { .. })));
    }
}
