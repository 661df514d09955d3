//! The review session state machine.
//!
//! Per-photo transitions:
//! ```text
//! Unseen  -> Kept | Deleted | Skipped
//! Skipped -> Kept | Deleted | Unseen (when the cursor wraps)
//! Kept | Deleted -> Unseen (undo only)
//! ```
//!
//! Status, history and counters change together in `commit_*` and only after
//! the filesystem move succeeded.

use super::types::*;
use crate::core::relocator::FileRelocator;
use crate::core::scanner::{DirectoryScanner, ScannedPhoto};
use crate::error::{Result, TriageError};
use crate::events::{null_sender, Event, EventSender, TriageEvent};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// All state of one folder review
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    relocator: FileRelocator,
    queue: Vec<String>,
    cursor: usize,
    /// Absent entries are Unseen
    statuses: HashMap<String, ItemStatus>,
    history: Vec<HistoryEntry>,
    counters: Counters,
    completion_reported: bool,
    events: EventSender,
}

impl Session {
    /// Scan `directory` and prepare it for review.
    ///
    /// Creates `keep/` and `delete/` inside the folder.
    pub fn open(
        directory: &Path,
        scanner: &DirectoryScanner,
        events: EventSender,
    ) -> Result<(Self, Vec<ScannedPhoto>)> {
        let photos = scanner.scan(directory)?;
        let relocator = FileRelocator::new(directory)?;

        let session = Self {
            id: Uuid::new_v4(),
            relocator,
            queue: photos.iter().map(|p| p.name.clone()).collect(),
            cursor: 0,
            statuses: HashMap::new(),
            history: Vec::new(),
            counters: Counters::default(),
            completion_reported: false,
            events,
        };

        info!(
            "Opened {} with {} photos (session {})",
            directory.display(),
            session.queue.len(),
            session.id
        );
        session.emit(TriageEvent::SessionOpened {
            session_id: session.id.to_string(),
            directory: directory.to_path_buf(),
            total_photos: session.queue.len(),
        });

        Ok((session, photos))
    }

    /// Open without event reporting
    pub fn open_quiet(directory: &Path) -> Result<Self> {
        Self::open(directory, &DirectoryScanner::new(), null_sender()).map(|(s, _)| s)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn directory(&self) -> &Path {
        self.relocator.base_dir()
    }

    /// File names in review order
    pub fn queue(&self) -> &[String] {
        &self.queue
    }

    /// 0-based index of the photo under review
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn status(&self, filename: &str) -> ItemStatus {
        self.statuses.get(filename).copied().unwrap_or_default()
    }

    /// Undoable decisions, oldest first
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }

    /// Photos neither kept nor deleted yet
    pub fn remaining(&self) -> usize {
        self.queue
            .iter()
            .filter(|name| !self.status(name).is_resolved())
            .count()
    }

    /// True when every photo is kept or deleted (vacuously true when empty)
    pub fn is_complete(&self) -> bool {
        self.queue.iter().all(|name| self.status(name).is_resolved())
    }

    /// Counters and history agree with the status map
    pub fn is_consistent(&self) -> bool {
        let kept = self
            .statuses
            .values()
            .filter(|s| **s == ItemStatus::Kept)
            .count();
        let deleted = self
            .statuses
            .values()
            .filter(|s| **s == ItemStatus::Deleted)
            .count();

        self.counters == Counters { kept, deleted } && self.history.len() == kept + deleted
    }

    /// Advance past resolved photos and describe what to show.
    ///
    /// Reports `Completed` without moving the cursor once every photo is
    /// kept or deleted.
    pub fn advance_and_present(&mut self) -> Presentation {
        if self.queue.is_empty() {
            return Presentation::Empty;
        }

        if self.cursor >= self.queue.len() {
            self.cursor = 0;
        }

        if self.check_completion() {
            return Presentation::Completed(self.counters);
        }

        self.skip_resolved();
        Presentation::Current(self.current_photo())
    }

    /// Keep or delete the photo under the cursor.
    ///
    /// Does nothing when the queue is empty or the current photo is already
    /// resolved. On a failed move nothing changes and the error is returned.
    pub fn decide(&mut self, decision: Decision) -> Result<Counters> {
        let filename = match self.current_unresolved() {
            Some(name) => name.to_string(),
            None => {
                debug!("Ignoring {} with no photo awaiting a decision", decision);
                return Ok(self.counters);
            }
        };

        let moved = match decision {
            Decision::Keep => self.relocator.to_keep(&filename),
            Decision::Delete => self.relocator.to_delete(&filename),
        };
        let destination = moved.map_err(|e| {
            warn!("Could not {} {}: {}", decision, filename, e);
            TriageError::from(e)
        })?;

        self.commit_decision(&filename, decision, &destination);

        self.cursor += 1;
        if self.cursor >= self.queue.len() {
            self.cursor = 0;
        }

        if !self.check_completion() {
            self.skip_resolved();
        }

        debug_assert!(self.is_consistent());
        Ok(self.counters)
    }

    /// Defer the photo under the cursor to a later pass.
    ///
    /// When the cursor wraps past the end, every Skipped photo becomes
    /// Unseen again. Skipping a kept or deleted photo does nothing.
    pub fn skip(&mut self) {
        let filename = match self.queue.get(self.cursor) {
            Some(name) => name.clone(),
            None => return,
        };

        if self.status(&filename).is_resolved() {
            debug!("Ignoring skip on already resolved {}", filename);
            return;
        }

        self.statuses.insert(filename.clone(), ItemStatus::Skipped);
        self.emit(TriageEvent::Skipped { filename });

        self.cursor += 1;
        if self.cursor >= self.queue.len() {
            self.cursor = 0;
            self.restart_pass();
        }

        if !self.check_completion() {
            self.skip_resolved();
        }
    }

    /// Revert the most recent decision.
    ///
    /// Returns `Ok(None)` when there is nothing to undo. If the photo cannot
    /// be moved back, the decision stays in the history and nothing changes.
    pub fn undo(&mut self) -> Result<Option<HistoryEntry>> {
        let entry = match self.history.last() {
            Some(entry) => entry.clone(),
            None => return Ok(None),
        };

        let restored = match entry.decision {
            Decision::Delete => self
                .relocator
                .restore_from_delete(&entry.stored_name, &entry.filename),
            Decision::Keep => self
                .relocator
                .restore_from_keep(&entry.stored_name, &entry.filename),
        };

        if let Err(source) = restored {
            error!("Undo of {} {} failed: {}", entry.decision, entry.filename, source);
            return Err(TriageError::Undo {
                filename: entry.filename,
                source,
            });
        }

        self.commit_undo();

        if let Some(position) = self.queue.iter().position(|n| *n == entry.filename) {
            self.cursor = position;
        }

        info!("Undid {} of {}", entry.decision, entry.filename);
        self.emit(TriageEvent::Undone {
            filename: entry.filename.clone(),
            decision: entry.decision,
            counters: self.counters,
        });

        debug_assert!(self.is_consistent());
        Ok(Some(entry))
    }

    pub(crate) fn emit_reset(&self) {
        self.emit(TriageEvent::SessionReset {
            session_id: self.id.to_string(),
        });
    }

    fn commit_decision(&mut self, filename: &str, decision: Decision, destination: &Path) {
        let stored_name = destination
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| filename.to_string());

        self.statuses.insert(filename.to_string(), decision.status());
        self.history.push(HistoryEntry {
            filename: filename.to_string(),
            decision,
            stored_name,
        });
        self.counters.increment(decision);

        info!("{} {} -> {}", decision, filename, destination.display());
        self.emit(TriageEvent::Decided {
            filename: filename.to_string(),
            decision,
            destination: destination.to_path_buf(),
            counters: self.counters,
        });
    }

    fn commit_undo(&mut self) {
        if let Some(entry) = self.history.pop() {
            self.counters.decrement(entry.decision);
            self.statuses.remove(&entry.filename);
            self.completion_reported = false;
        }
    }

    /// Forget Skipped marks so deferred photos get another look
    fn restart_pass(&mut self) {
        let before = self.statuses.len();
        self.statuses.retain(|_, status| status.is_resolved());
        let requeued = before - self.statuses.len();

        debug!("Cursor wrapped, {} skipped photos back in review", requeued);
        self.emit(TriageEvent::PassRestarted { requeued });
    }

    /// Move the cursor forward (wrapping) to the next unresolved photo.
    ///
    /// Callers guarantee at least one unresolved photo exists.
    fn skip_resolved(&mut self) {
        let len = self.queue.len();
        while self.status(&self.queue[self.cursor]).is_resolved() {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    fn check_completion(&mut self) -> bool {
        if !self.is_complete() {
            return false;
        }

        if !self.completion_reported {
            self.completion_reported = true;
            info!(
                "Review complete: {} kept, {} deleted",
                self.counters.kept, self.counters.deleted
            );
            self.emit(TriageEvent::Completed {
                counters: self.counters,
            });
        }
        true
    }

    fn current_unresolved(&self) -> Option<&str> {
        let name = self.queue.get(self.cursor)?;
        if self.status(name).is_resolved() {
            None
        } else {
            Some(name)
        }
    }

    fn current_photo(&self) -> CurrentPhoto {
        let filename = self.queue[self.cursor].clone();
        CurrentPhoto {
            path: self.photo_path(&filename),
            status: self.status(&filename),
            position: self.cursor + 1,
            total: self.queue.len(),
            filename,
        }
    }

    fn photo_path(&self, filename: &str) -> PathBuf {
        self.relocator.base_dir().join(filename)
    }

    fn emit(&self, event: TriageEvent) {
        self.events.send(Event::Triage(event));
    }
}
