//! # Core Module
//!
//! The front-end agnostic triage engine.
//!
//! ## Modules
//! - `scanner` - Lists the photos of a folder, oldest first
//! - `metadata` - EXIF capture time and orientation
//! - `decode` - Fast image decoding
//! - `relocator` - Collision-safe moves into category folders
//! - `triage` - The keep/delete/skip/undo review session
//! - `quality` - Blur detection
//! - `screenshot` - Screenshot detection
//! - `sorter` - Batch moves driven by `quality` and `screenshot`

pub mod decode;
pub mod metadata;
pub mod quality;
pub mod relocator;
pub mod scanner;
pub mod screenshot;
pub mod sorter;
pub mod triage;

// Re-export commonly used types
pub use metadata::{Orientation, PhotoMetadata};
pub use relocator::FileRelocator;
pub use scanner::{DirectoryScanner, ScannedPhoto};
pub use sorter::{BatchSorter, SortReport};
pub use triage::{Counters, Decision, Presentation, TriageEngine};
