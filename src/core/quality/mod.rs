//! # Quality Module
//!
//! Blur detection by Laplacian variance.
//!
//! The image is converted to grayscale at full resolution and convolved
//! with the 4-neighbour Laplacian kernel. A sharp image has strong
//! edges and therefore a wide spread of Laplacian responses; a blurry one
//! doesn't. Variance below the threshold means blurry.
//!
//! The threshold is calibrated for full-resolution images. Downscaling
//! averages out noise and inflates the variance, so a nonzero
//! `analysis_size` needs a higher threshold to flag the same photos.

use crate::core::decode::FastDecoder;
use crate::error::DecodeError;
use image::imageops::FilterType;
use image::{DynamicImage, GrayImage};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Variance below which a photo counts as blurry
pub const DEFAULT_BLUR_THRESHOLD: f64 = 90.0;

/// Longest edge an image is scaled down to before analysis (0 keeps full size)
pub const DEFAULT_ANALYSIS_SIZE: u32 = 0;

/// Measured sharpness of one image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sharpness {
    /// Variance of the Laplacian (0 for a flat image, thousands for fine detail)
    pub variance: f64,
}

impl Sharpness {
    pub fn is_blurry(&self, threshold: f64) -> bool {
        self.variance < threshold
    }
}

/// Scores photos for sharpness
#[derive(Debug, Clone)]
pub struct BlurDetector {
    analysis_size: u32,
    threshold: f64,
}

impl Default for BlurDetector {
    fn default() -> Self {
        Self {
            analysis_size: DEFAULT_ANALYSIS_SIZE,
            threshold: DEFAULT_BLUR_THRESHOLD,
        }
    }
}

impl BlurDetector {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Scale the longest edge down to `size` before analysis (0 analyzes at full size)
    pub fn with_analysis_size(mut self, size: u32) -> Self {
        self.analysis_size = size;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Decode and score a photo file
    pub fn measure_file(&self, path: &Path) -> Result<Sharpness, DecodeError> {
        let image = FastDecoder::decode(path)?;
        Ok(self.measure(&image))
    }

    pub fn measure(&self, image: &DynamicImage) -> Sharpness {
        let gray = if self.analysis_size > 0
            && (image.width() > self.analysis_size || image.height() > self.analysis_size)
        {
            image
                .resize(self.analysis_size, self.analysis_size, FilterType::Triangle)
                .to_luma8()
        } else {
            image.to_luma8()
        };

        Sharpness {
            variance: laplacian_variance(&gray),
        }
    }

    pub fn is_blurry(&self, image: &DynamicImage) -> bool {
        self.measure(image).is_blurry(self.threshold)
    }
}

/// Variance of the Laplacian over interior pixels
fn laplacian_variance(gray: &GrayImage) -> f64 {
    let (width, height) = gray.dimensions();
    if width < 3 || height < 3 {
        return 0.0;
    }

    let at = |x: u32, y: u32| f64::from(gray.get_pixel(x, y)[0]);

    // Kernel: [0, 1, 0; 1, -4, 1; 0, 1, 0]
    let mut sum = 0.0;
    let mut sum_sq = 0.0;
    let mut n = 0.0;
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let response =
                at(x, y - 1) + at(x, y + 1) + at(x - 1, y) + at(x + 1, y) - 4.0 * at(x, y);
            sum += response;
            sum_sq += response * response;
            n += 1.0;
        }
    }

    let mean = sum / n;
    (sum_sq / n - mean * mean).max(0.0)
}
