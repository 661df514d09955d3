//! # Triage Module
//!
//! The interactive keep/delete review.
//!
//! A [`TriageEngine`] opens a folder, orders its photos oldest first and
//! walks a cursor over them. Every keep or delete is a real file move into
//! `keep/` or `delete/` and can be undone, most recent first. Skipped photos
//! come back once the cursor wraps around.
//!
//! ## Example
//! ```rust,ignore
//! let mut engine = TriageEngine::new();
//! engine.open_session(Path::new("/photos/holiday"))?;
//!
//! while let Presentation::Current(photo) = engine.present_current()? {
//!     engine.decide(Decision::Keep)?;
//! }
//! ```

mod engine;
mod session;
mod types;

pub use engine::TriageEngine;
pub use session::Session;
pub use types::{
    Counters, CurrentPhoto, Decision, HistoryEntry, ItemStatus, Presentation, QueueSnapshot,
};
