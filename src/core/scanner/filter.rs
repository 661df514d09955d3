//! File filtering logic for the scanner.

use super::ImageFormat;
use std::path::Path;

/// Decides which directory entries are reviewable photos
#[derive(Debug, Clone)]
pub struct ImageFilter {
    /// Whether to include hidden files (starting with .)
    include_hidden: bool,
}

impl ImageFilter {
    /// Create a filter accepting every supported photo, hidden or not
    pub fn new() -> Self {
        Self {
            include_hidden: true,
        }
    }

    /// Include or exclude hidden files
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Check if a file name should be included
    pub fn should_include(&self, path: &Path) -> bool {
        if !self.include_hidden {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with('.') {
                    return false;
                }
            }
        }

        self.get_format(path).is_supported()
    }

    /// Get the image format for a path
    pub fn get_format(&self, path: &Path) -> ImageFormat {
        ImageFormat::from_path(path)
    }
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_includes_jpeg_and_png() {
        let filter = ImageFilter::new();
        assert!(filter.should_include(Path::new("/photos/image.jpg")));
        assert!(filter.should_include(Path::new("/photos/image.JPEG")));
        assert!(filter.should_include(Path::new("/photos/graphic.Png")));
    }

    #[test]
    fn filter_excludes_other_formats() {
        let filter = ImageFilter::new();
        assert!(!filter.should_include(Path::new("/photos/IMG_1234.HEIC")));
        assert!(!filter.should_include(Path::new("/photos/document.pdf")));
        assert!(!filter.should_include(Path::new("/photos/video.mp4")));
    }

    #[test]
    fn filter_includes_hidden_by_default() {
        let filter = ImageFilter::new();
        assert!(filter.should_include(Path::new("/photos/.hidden.jpg")));
    }

    #[test]
    fn filter_can_exclude_hidden() {
        let filter = ImageFilter::new().with_hidden(false);
        assert!(!filter.should_include(Path::new("/photos/.hidden.jpg")));
        assert!(filter.should_include(Path::new("/photos/visible.jpg")));
    }

    #[test]
    fn filter_handles_no_extension() {
        let filter = ImageFilter::new();
        assert!(!filter.should_include(Path::new("/photos/no_extension")));
        assert!(!filter.should_include(Path::new("/photos/jpg")));
    }

    #[test]
    fn filter_accepts_bare_extension_name() {
        let filter = ImageFilter::new();
        assert!(filter.should_include(Path::new("/photos/.jpg")));
        assert!(!filter.with_hidden(false).should_include(Path::new("/photos/.jpg")));
    }
}
