//! Per-photo verdicts used by the batch sorter.

use crate::core::quality::BlurDetector;
use crate::core::screenshot::ScreenshotDetector;
use crate::error::DecodeError;
use std::path::Path;

/// Decides whether a photo belongs in a category folder.
///
/// Implementations are called from several threads at once.
pub trait Classifier: Send + Sync {
    /// Name of the subfolder flagged photos are moved into
    fn category(&self) -> &str;

    /// `Some(reason)` when the photo should be moved
    fn classify(&self, path: &Path) -> Result<Option<String>, DecodeError>;
}

/// Flags photos whose Laplacian variance is under the threshold
#[derive(Debug, Clone, Default)]
pub struct BlurClassifier {
    detector: BlurDetector,
}

impl BlurClassifier {
    pub fn new(detector: BlurDetector) -> Self {
        Self { detector }
    }
}

impl Classifier for BlurClassifier {
    fn category(&self) -> &str {
        "blurry"
    }

    fn classify(&self, path: &Path) -> Result<Option<String>, DecodeError> {
        let sharpness = self.detector.measure_file(path)?;
        if sharpness.is_blurry(self.detector.threshold()) {
            Ok(Some(format!(
                "Laplacian variance {:.2} below {:.2}",
                sharpness.variance,
                self.detector.threshold()
            )))
        } else {
            Ok(None)
        }
    }
}

/// Flags screenshots at or above the detector's minimum confidence
#[derive(Debug, Clone, Default)]
pub struct ScreenshotClassifier {
    detector: ScreenshotDetector,
}

impl ScreenshotClassifier {
    pub fn new(detector: ScreenshotDetector) -> Self {
        Self { detector }
    }
}

impl Classifier for ScreenshotClassifier {
    fn category(&self) -> &str {
        "screenshots"
    }

    fn classify(&self, path: &Path) -> Result<Option<String>, DecodeError> {
        Ok(self
            .detector
            .detect_file(path)?
            .map(|d| format!("{} confidence: {}", d.confidence, d.reason)))
    }
}
