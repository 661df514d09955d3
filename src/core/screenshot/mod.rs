//! Screenshot detection module.
//!
//! Detects screenshots using EXIF metadata, filename patterns, screen
//! resolutions and a pixel layout heuristic.

mod detector;

pub use detector::{ScreenshotConfidence, ScreenshotDetection, ScreenshotDetector};
