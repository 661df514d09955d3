//! # Metadata Module
//!
//! Extracts EXIF metadata from photo files.
//!
//! ## Extracted Fields
//! - Date taken (DateTimeOriginal, then DateTimeDigitized, then DateTime)
//! - Image dimensions (width x height)
//! - Camera make/model and software
//! - Orientation
//!
//! Every reader here degrades instead of failing: a missing or corrupt EXIF
//! block yields the filesystem timestamp or the unrotated image.

mod orientation;

pub use orientation::{Flip, Orientation};

use crate::core::decode::FastDecoder;
use crate::error::DecodeError;
use chrono::{DateTime, NaiveDateTime, Utc};
use exif::{Exif, In, Reader, Tag, Value};
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use std::time::SystemTime;
use tracing::{debug, warn};

/// EXIF date format: "YYYY:MM:DD HH:MM:SS"
const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Date tags in order of preference
const DATE_TAGS: [Tag; 3] = [Tag::DateTimeOriginal, Tag::DateTimeDigitized, Tag::DateTime];

/// Extracted photo metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhotoMetadata {
    /// Capture date/time
    pub date_taken: Option<DateTime<Utc>>,
    /// Image width in pixels
    pub width: Option<u32>,
    /// Image height in pixels
    pub height: Option<u32>,
    /// Camera make (e.g., "Apple", "Canon")
    pub camera_make: Option<String>,
    /// Camera model (e.g., "iPhone 15 Pro")
    pub camera_model: Option<String>,
    /// Software that wrote the file (e.g., "screencaptureui")
    pub software: Option<String>,
    /// Image orientation (1-8, where 1 is normal)
    pub orientation: Option<u16>,
}

/// Extract EXIF metadata from a photo file
pub fn extract_metadata(path: &Path) -> PhotoMetadata {
    let mut metadata = PhotoMetadata::default();

    let exif = match read_exif(path) {
        Some(exif) => exif,
        None => return metadata,
    };

    metadata.date_taken = date_from_exif(&exif);

    // Prefer actual pixel dimensions
    metadata.width = exif
        .get_field(Tag::PixelXDimension, In::PRIMARY)
        .or_else(|| exif.get_field(Tag::ImageWidth, In::PRIMARY))
        .and_then(|f| f.value.get_uint(0));
    metadata.height = exif
        .get_field(Tag::PixelYDimension, In::PRIMARY)
        .or_else(|| exif.get_field(Tag::ImageLength, In::PRIMARY))
        .and_then(|f| f.value.get_uint(0));

    metadata.camera_make = exif
        .get_field(Tag::Make, In::PRIMARY)
        .and_then(|f| get_string_value(&f.value));
    metadata.camera_model = exif
        .get_field(Tag::Model, In::PRIMARY)
        .and_then(|f| get_string_value(&f.value));
    metadata.software = exif
        .get_field(Tag::Software, In::PRIMARY)
        .and_then(|f| get_string_value(&f.value));

    metadata.orientation = exif
        .get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|f| f.value.get_uint(0))
        .and_then(|v| u16::try_from(v).ok());

    metadata
}

/// Best-effort creation time of a photo.
///
/// Tries the EXIF date tags in order of preference; the first one present
/// and parseable wins. Falls back to the filesystem creation time, then the
/// modification time. Never fails.
pub fn creation_time(path: &Path) -> DateTime<Utc> {
    if let Some(taken) = read_exif(path).as_ref().and_then(date_from_exif) {
        return taken;
    }

    filesystem_time(path)
}

/// Decode a photo and rotate/flip it upright according to its EXIF orientation.
///
/// Returns `Ok(None)` when the file does not exist. A missing, unreadable or
/// out-of-range orientation leaves the image as stored.
pub fn load_normalized(path: &Path) -> Result<Option<DynamicImage>, DecodeError> {
    if !path.exists() {
        return Ok(None);
    }

    let image = FastDecoder::decode(path)?;

    let orientation = match read_orientation(path) {
        Ok(Some(code)) => match Orientation::from_exif(code) {
            Some(orientation) => orientation,
            None => {
                warn!(
                    "Ignoring invalid EXIF orientation {} in {}",
                    code,
                    path.display()
                );
                Orientation::upright()
            }
        },
        Ok(None) => Orientation::upright(),
        Err(e) => {
            warn!(
                "Could not read orientation of {}, showing unrotated: {}",
                path.display(),
                e
            );
            Orientation::upright()
        }
    };

    if orientation.is_identity() {
        return Ok(Some(image));
    }

    debug!(
        "Applying orientation {} to {}",
        orientation.code,
        path.display()
    );
    Ok(Some(orientation.apply(image)))
}

fn read_exif(path: &Path) -> Option<Exif> {
    let file = File::open(path).ok()?;
    let mut bufreader = BufReader::new(file);
    match Reader::new().read_from_container(&mut bufreader) {
        Ok(exif) => Some(exif),
        Err(e) => {
            debug!("No usable EXIF in {}: {}", path.display(), e);
            None
        }
    }
}

/// Orientation code, `Ok(None)` when the file simply has none
fn read_orientation(path: &Path) -> Result<Option<u16>, exif::Error> {
    let file = File::open(path)?;
    let mut bufreader = BufReader::new(file);
    let exif = match Reader::new().read_from_container(&mut bufreader) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(_)) => return Ok(None),
        Err(e) => return Err(e),
    };

    Ok(exif
        .get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|f| f.value.get_uint(0))
        .map(|v| u16::try_from(v).unwrap_or(0)))
}

fn date_from_exif(exif: &Exif) -> Option<DateTime<Utc>> {
    DATE_TAGS.iter().find_map(|tag| {
        let field = exif.get_field(*tag, In::PRIMARY)?;
        let text = get_string_value(&field.value)?;
        match NaiveDateTime::parse_from_str(&text, EXIF_DATE_FORMAT) {
            Ok(naive) => Some(DateTime::from_naive_utc_and_offset(naive, Utc)),
            Err(_) => {
                debug!("Unparseable {} value {:?}", tag, text);
                None
            }
        }
    })
}

fn filesystem_time(path: &Path) -> DateTime<Utc> {
    let time = fs::metadata(path)
        .and_then(|meta| meta.created().or_else(|_| meta.modified()))
        .unwrap_or_else(|e| {
            warn!("No filesystem timestamp for {}: {}", path.display(), e);
            SystemTime::UNIX_EPOCH
        });
    DateTime::<Utc>::from(time)
}

/// Helper to extract string from EXIF ASCII value
fn get_string_value(value: &Value) -> Option<String> {
    if let Value::Ascii(ref vec) = value {
        if let Some(bytes) = vec.first() {
            if let Ok(s) = std::str::from_utf8(bytes) {
                let trimmed = s.trim_end_matches('\0').trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
    }
    None
}
