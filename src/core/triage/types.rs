//! Types shared by the review session and its front ends.

use crate::core::scanner::ScannedPhoto;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A terminal verdict on a photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Keep,
    Delete,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Keep => "keep",
            Self::Delete => "delete",
        }
    }

    /// Status a photo takes on after this decision
    pub fn status(&self) -> ItemStatus {
        match self {
            Self::Keep => ItemStatus::Kept,
            Self::Delete => ItemStatus::Deleted,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a photo stands in the review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    Unseen,
    Kept,
    Deleted,
    Skipped,
}

impl ItemStatus {
    /// Kept or Deleted: the photo has left the review folder
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Kept | Self::Deleted)
    }
}

/// Running totals of decisions currently in effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Counters {
    pub kept: usize,
    pub deleted: usize,
}

impl Counters {
    pub fn total(&self) -> usize {
        self.kept + self.deleted
    }

    pub(crate) fn increment(&mut self, decision: Decision) {
        match decision {
            Decision::Keep => self.kept += 1,
            Decision::Delete => self.deleted += 1,
        }
    }

    pub(crate) fn decrement(&mut self, decision: Decision) {
        match decision {
            Decision::Keep => self.kept = self.kept.saturating_sub(1),
            Decision::Delete => self.deleted = self.deleted.saturating_sub(1),
        }
    }
}

/// One undoable decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Queue name of the photo
    pub filename: String,
    pub decision: Decision,
    /// Name inside keep/ or delete/ (differs from `filename` after a collision)
    pub stored_name: String,
}

/// The photo currently up for review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentPhoto {
    pub filename: String,
    /// Path inside the review folder
    pub path: PathBuf,
    /// 1-based position in the queue
    pub position: usize,
    pub total: usize,
    /// Unseen, or Skipped when deferred earlier
    pub status: ItemStatus,
}

/// What the front end should show next
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Presentation {
    /// A photo awaiting a decision
    Current(CurrentPhoto),
    /// Every photo is kept or deleted
    Completed(Counters),
    /// The folder holds no photos
    Empty,
}

/// The queue as built when a folder is opened
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueSnapshot {
    pub session_id: String,
    pub directory: PathBuf,
    /// Photos in review order
    pub photos: Vec<ScannedPhoto>,
}

impl QueueSnapshot {
    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}
