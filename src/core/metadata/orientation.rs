//! EXIF orientation codes as a lookup table.
//!
//! Each code maps to a clockwise rotation followed by an optional flip.
//! Applying the transform to the stored pixels yields the upright image.

use image::DynamicImage;

/// Mirror applied after rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flip {
    None,
    Horizontal,
    Vertical,
}

/// Correction for one EXIF orientation code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orientation {
    /// EXIF code (1-8)
    pub code: u16,
    /// Clockwise rotation in degrees (0, 90, 180 or 270)
    pub rotation: u16,
    /// Mirror applied after the rotation
    pub flip: Flip,
    /// Whether width and height trade places
    pub swaps_dimensions: bool,
}

const ORIENTATIONS: [Orientation; 8] = [
    Orientation { code: 1, rotation: 0, flip: Flip::None, swaps_dimensions: false },
    Orientation { code: 2, rotation: 0, flip: Flip::Horizontal, swaps_dimensions: false },
    Orientation { code: 3, rotation: 180, flip: Flip::None, swaps_dimensions: false },
    Orientation { code: 4, rotation: 0, flip: Flip::Vertical, swaps_dimensions: false },
    Orientation { code: 5, rotation: 90, flip: Flip::Horizontal, swaps_dimensions: true },
    Orientation { code: 6, rotation: 90, flip: Flip::None, swaps_dimensions: true },
    Orientation { code: 7, rotation: 270, flip: Flip::Horizontal, swaps_dimensions: true },
    Orientation { code: 8, rotation: 270, flip: Flip::None, swaps_dimensions: true },
];

impl Orientation {
    /// Look up the correction for an EXIF orientation code.
    ///
    /// Returns `None` for codes outside 1-8.
    pub fn from_exif(code: u16) -> Option<Self> {
        ORIENTATIONS.iter().find(|o| o.code == code).copied()
    }

    /// The identity transform (code 1)
    pub fn upright() -> Self {
        ORIENTATIONS[0]
    }

    pub fn is_identity(&self) -> bool {
        self.rotation == 0 && self.flip == Flip::None
    }

    /// Apply the correction to a decoded image
    pub fn apply(&self, image: DynamicImage) -> DynamicImage {
        let rotated = match self.rotation {
            90 => image.rotate90(),
            180 => image.rotate180(),
            270 => image.rotate270(),
            _ => image,
        };

        match self.flip {
            Flip::None => rotated,
            Flip::Horizontal => rotated.fliph(),
            Flip::Vertical => rotated.flipv(),
        }
    }
}
