//! Screenshot detection using multiple methods.
//!
//! Checked cheapest first: EXIF software tag, filename, known screen
//! resolutions, then the pixels themselves (large flat regions framed by
//! long straight edges, the way application windows look).

use crate::core::decode::FastDecoder;
use crate::core::metadata::{extract_metadata, PhotoMetadata};
use crate::error::DecodeError;
use image::imageops::FilterType;
use image::{DynamicImage, GrayImage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;

/// How sure a detection is, ordered `Low < Medium < High`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenshotConfidence {
    /// Screen-sized or UI-looking pixels
    Low,
    /// Filename pattern
    Medium,
    /// EXIF software tag of a capture tool
    High,
}

impl fmt::Display for ScreenshotConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        })
    }
}

/// Why a photo was flagged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenshotDetection {
    pub confidence: ScreenshotConfidence,
    pub reason: String,
}

/// Common screenshot filename patterns
const SCREENSHOT_PATTERNS: &[&str] = &[
    "screenshot",
    "screen shot",
    "screen_shot",
    "simulator screen shot",
    "capture",
    "cleanshot",
    "snagit",
    "monosnap",
    "skitch",
    "snip",
];

/// Known screenshot software signatures in EXIF
const SCREENSHOT_SOFTWARE: &[&str] = &[
    "screencaptureui",
    "screenshot",
    "snipping tool",
    "snip & sketch",
    "cleanshot",
    "snagit",
    "monosnap",
    "lightshot",
    "greenshot",
];

/// Known screen dimensions (width x height), matched in either orientation
const KNOWN_SCREEN_DIMENSIONS: &[(u32, u32)] = &[
    (1170, 2532), // iPhone 12-15
    (1125, 2436), // iPhone X, XS, 11 Pro
    (1080, 2340),
    (750, 1334), // iPhone 8, SE
    (1242, 2688),
    (1284, 2778),
    (2048, 1536), // iPad
    (2224, 1668),
    (2732, 2048),
    (1440, 900),
    (1680, 1050),
    (2560, 1600),
    (2560, 1440),
    (3440, 1440),
    (1920, 1080),
];

/// Gray level above which a pixel counts as flat white background
const LIGHT_LEVEL: u8 = 250;
/// Gray level below which a pixel counts as flat dark background
const DARK_LEVEL: u8 = 30;
/// Share of the image that must be flat background
const MIN_UNIFORM_RATIO: f64 = 0.25;
/// Step between neighbouring pixels that counts as an edge
const EDGE_STEP: i16 = 50;
/// Share of a row/column an edge must span to count as a straight line
const MIN_LINE_SPAN: f64 = 0.2;
/// Straight lines needed in each direction
const MIN_LINES: usize = 3;

fn detect_from_metadata(metadata: &PhotoMetadata) -> Option<ScreenshotDetection> {
    let software = metadata.software.as_deref()?;
    let lower = software.to_lowercase();
    SCREENSHOT_SOFTWARE
        .iter()
        .find(|known| lower.contains(*known))
        .map(|_| ScreenshotDetection {
            confidence: ScreenshotConfidence::High,
            reason: format!("EXIF software tag indicates a capture tool: {}", software),
        })
}

fn detect_from_filename(filename: &str) -> Option<ScreenshotDetection> {
    let lower = filename.to_lowercase();
    SCREENSHOT_PATTERNS
        .iter()
        .find(|pattern| lower.contains(*pattern))
        .map(|pattern| ScreenshotDetection {
            confidence: ScreenshotConfidence::Medium,
            reason: format!("Filename contains '{}'", pattern),
        })
}

fn detect_from_dimensions(width: u32, height: u32) -> Option<ScreenshotDetection> {
    KNOWN_SCREEN_DIMENSIONS
        .iter()
        .any(|&(w, h)| (width, height) == (w, h) || (width, height) == (h, w))
        .then(|| ScreenshotDetection {
            confidence: ScreenshotConfidence::Low,
            reason: format!("Dimensions {}x{} match a known screen", width, height),
        })
}

/// Flat background plus several long horizontal and vertical edges
fn detect_from_pixels(gray: &GrayImage) -> Option<ScreenshotDetection> {
    let (width, height) = gray.dimensions();
    if width < 2 || height < 2 {
        return None;
    }

    let total = f64::from(width) * f64::from(height);
    let light = gray.pixels().filter(|p| p[0] > LIGHT_LEVEL).count() as f64;
    let dark = gray.pixels().filter(|p| p[0] < DARK_LEVEL).count() as f64;
    let uniform_ratio = (light / total).max(dark / total);

    let level = |x: u32, y: u32| i16::from(gray.get_pixel(x, y)[0]);

    let horizontal = (1..height)
        .filter(|&y| {
            let edge = (0..width)
                .filter(|&x| (level(x, y) - level(x, y - 1)).abs() > EDGE_STEP)
                .count();
            edge as f64 >= f64::from(width) * MIN_LINE_SPAN
        })
        .count();
    let vertical = (1..width)
        .filter(|&x| {
            let edge = (0..height)
                .filter(|&y| (level(x, y) - level(x - 1, y)).abs() > EDGE_STEP)
                .count();
            edge as f64 >= f64::from(height) * MIN_LINE_SPAN
        })
        .count();

    debug!(
        "uniform ratio {:.3}, {} horizontal / {} vertical lines",
        uniform_ratio, horizontal, vertical
    );

    (horizontal >= MIN_LINES && vertical >= MIN_LINES && uniform_ratio > MIN_UNIFORM_RATIO).then(
        || ScreenshotDetection {
            confidence: ScreenshotConfidence::Low,
            reason: format!(
                "{:.0}% flat background with {} horizontal and {} vertical edges",
                uniform_ratio * 100.0,
                horizontal,
                vertical
            ),
        },
    )
}

/// Flags screenshots at or above a minimum confidence
#[derive(Debug, Clone)]
pub struct ScreenshotDetector {
    min_confidence: ScreenshotConfidence,
    analysis_size: u32,
}

impl Default for ScreenshotDetector {
    fn default() -> Self {
        Self::new(ScreenshotConfidence::Medium)
    }
}

impl ScreenshotDetector {
    pub fn new(min_confidence: ScreenshotConfidence) -> Self {
        Self {
            min_confidence,
            analysis_size: 512,
        }
    }

    pub fn with_analysis_size(mut self, size: u32) -> Self {
        self.analysis_size = size.max(1);
        self
    }

    pub fn min_confidence(&self) -> ScreenshotConfidence {
        self.min_confidence
    }

    /// Detect from what is known without decoding pixels
    pub fn detect(&self, path: &Path, metadata: &PhotoMetadata) -> Option<ScreenshotDetection> {
        let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or("");

        detect_from_metadata(metadata)
            .or_else(|| detect_from_filename(filename))
            .or_else(|| match (metadata.width, metadata.height) {
                (Some(w), Some(h)) => detect_from_dimensions(w, h),
                _ => None,
            })
            .filter(|d| d.confidence >= self.min_confidence)
    }

    /// Full detection on a file, decoding it only for the low-confidence checks
    pub fn detect_file(&self, path: &Path) -> Result<Option<ScreenshotDetection>, DecodeError> {
        let metadata = extract_metadata(path);
        if let Some(detection) = self.detect(path, &metadata) {
            return Ok(Some(detection));
        }

        if self.min_confidence > ScreenshotConfidence::Low {
            return Ok(None);
        }

        let image = FastDecoder::decode(path)?;
        Ok(self.detect_image(&image))
    }

    /// Screen dimensions and pixel layout of a decoded image
    pub fn detect_image(&self, image: &DynamicImage) -> Option<ScreenshotDetection> {
        if let Some(detection) = detect_from_dimensions(image.width(), image.height()) {
            return Some(detection).filter(|d| d.confidence >= self.min_confidence);
        }

        let gray = if image.width() > self.analysis_size || image.height() > self.analysis_size {
            image
                .resize(self.analysis_size, self.analysis_size, FilterType::Triangle)
                .to_luma8()
        } else {
            image.to_luma8()
        };

        detect_from_pixels(&gray).filter(|d| d.confidence >= self.min_confidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma};

    /// White canvas with a 2x3 grid of dark panels
    fn window_like_image() -> DynamicImage {
        DynamicImage::ImageLuma8(ImageBuffer::from_fn(200, 200, |x, y| {
            let in_column = (20..=80).contains(&x) || (120..=180).contains(&x);
            let in_row =
                (20..=50).contains(&y) || (80..=110).contains(&y) || (140..=170).contains(&y);
            if in_column && in_row {
                Luma([10])
            } else {
                Luma([255])
            }
        }))
    }

    fn gradient_image() -> DynamicImage {
        DynamicImage::ImageLuma8(ImageBuffer::from_fn(200, 200, |x, y| {
            Luma([((x + y) / 2 % 256) as u8])
        }))
    }

    #[test]
    fn confidence_is_ordered() {
        assert!(ScreenshotConfidence::Low < ScreenshotConfidence::Medium);
        assert!(ScreenshotConfidence::Medium < ScreenshotConfidence::High);
    }

    #[test]
    fn filename_pattern_is_medium() {
        let det = detect_from_filename("Screenshot 2024-01-15.png").unwrap();
        assert_eq!(det.confidence, ScreenshotConfidence::Medium);
        assert!(det.reason.contains("screenshot"));
        assert!(detect_from_filename("CleanShot 2024-01-15.png").is_some());
        assert!(detect_from_filename("IMG_0042.jpg").is_none());
    }

    #[test]
    fn software_tag_is_high() {
        let metadata = PhotoMetadata {
            software: Some("screencaptureui".to_string()),
            ..Default::default()
        };

        let det = detect_from_metadata(&metadata).unwrap();

        assert_eq!(det.confidence, ScreenshotConfidence::High);
        assert!(det.reason.contains("screencaptureui"));
    }

    #[test]
    fn software_wins_over_filename() {
        let metadata = PhotoMetadata {
            software: Some("CleanShot X".to_string()),
            ..Default::default()
        };
        let detector = ScreenshotDetector::new(ScreenshotConfidence::Low);

        let det = detector
            .detect(Path::new("Screenshot 1.png"), &metadata)
            .unwrap();

        assert_eq!(det.confidence, ScreenshotConfidence::High);
    }

    #[test]
    fn screen_dimensions_match_either_orientation() {
        assert!(detect_from_dimensions(1170, 2532).is_some());
        assert!(detect_from_dimensions(2532, 1170).is_some());
        assert!(detect_from_dimensions(6000, 4000).is_none());
    }

    #[test]
    fn minimum_confidence_filters_weak_detections() {
        let metadata = PhotoMetadata {
            width: Some(1920),
            height: Some(1080),
            ..Default::default()
        };
        let path = Path::new("IMG_0001.jpg");

        assert!(ScreenshotDetector::new(ScreenshotConfidence::Low)
            .detect(path, &metadata)
            .is_some());
        assert!(ScreenshotDetector::new(ScreenshotConfidence::Medium)
            .detect(path, &metadata)
            .is_none());
    }

    #[test]
    fn regular_photo_is_not_flagged() {
        let metadata = PhotoMetadata {
            camera_make: Some("Canon".to_string()),
            camera_model: Some("EOS R5".to_string()),
            width: Some(6000),
            height: Some(4000),
            ..Default::default()
        };
        let detector = ScreenshotDetector::new(ScreenshotConfidence::Low);

        assert!(detector
            .detect(Path::new("photo_20240115_001.jpg"), &metadata)
            .is_none());
    }

    #[test]
    fn window_layout_is_detected_from_pixels() {
        let detector = ScreenshotDetector::new(ScreenshotConfidence::Low);
        let det = detector.detect_image(&window_like_image()).unwrap();
        assert_eq!(det.confidence, ScreenshotConfidence::Low);
    }

    #[test]
    fn smooth_photo_is_not_detected_from_pixels() {
        let detector = ScreenshotDetector::new(ScreenshotConfidence::Low);
        assert!(detector.detect_image(&gradient_image()).is_none());
    }
}
