//! Event type definitions for decision and progress reporting.

use crate::core::triage::{Counters, Decision};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Interactive review session events
    Triage(TriageEvent),
    /// Batch sorter events
    Sort(SortEvent),
}

/// Events from a review session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TriageEvent {
    /// A folder was opened for review
    SessionOpened {
        session_id: String,
        directory: PathBuf,
        total_photos: usize,
    },
    /// A photo was kept or deleted
    Decided {
        filename: String,
        decision: Decision,
        destination: PathBuf,
        counters: Counters,
    },
    /// A photo was deferred to a later pass
    Skipped { filename: String },
    /// The cursor wrapped around; skipped photos are up for review again
    PassRestarted { requeued: usize },
    /// The last decision was reverted
    Undone {
        filename: String,
        decision: Decision,
        counters: Counters,
    },
    /// Every photo has been kept or deleted
    Completed { counters: Counters },
    /// The session was discarded
    SessionReset { session_id: String },
}

/// Events from a batch sorter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SortEvent {
    /// Sorting has started
    Started {
        category: String,
        total_photos: usize,
    },
    /// Progress update during classification
    Progress(SortProgress),
    /// A flagged photo was moved into the category folder
    Moved { from: PathBuf, to: PathBuf },
    /// A photo could not be processed; sorting continues
    Error { path: PathBuf, message: String },
    /// Sorting completed
    Completed {
        processed: usize,
        moved: usize,
        failed: usize,
    },
}

/// Progress information during classification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortProgress {
    /// Number of photos classified so far
    pub completed: usize,
    /// Total number of photos to classify
    pub total: usize,
    /// Photo just classified
    pub current_path: PathBuf,
}
