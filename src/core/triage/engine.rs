//! Front-end facing controller around a [`Session`].

use super::session::Session;
use super::types::*;
use crate::core::scanner::DirectoryScanner;
use crate::error::{Result, TriageError};
use crate::events::{null_sender, EventSender};
use std::path::Path;
use tracing::info;

/// Owns at most one review session and forwards every operation to it.
///
/// Front ends only ever read from the engine between calls; all mutation
/// goes through these methods.
#[derive(Debug)]
pub struct TriageEngine {
    scanner: DirectoryScanner,
    events: EventSender,
    session: Option<Session>,
}

impl TriageEngine {
    pub fn new() -> Self {
        Self {
            scanner: DirectoryScanner::new(),
            events: null_sender(),
            session: None,
        }
    }

    /// Use a differently configured scanner for future sessions
    pub fn with_scanner(mut self, scanner: DirectoryScanner) -> Self {
        self.scanner = scanner;
        self
    }

    /// Report session activity on `events`
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = events;
        self
    }

    /// Start reviewing `directory`, replacing any open session.
    ///
    /// On error the previous session (if any) stays open.
    pub fn open_session(&mut self, directory: &Path) -> Result<QueueSnapshot> {
        let (session, photos) = Session::open(directory, &self.scanner, self.events.clone())?;

        if let Some(previous) = self.session.take() {
            previous.emit_reset();
        }

        let snapshot = QueueSnapshot {
            session_id: session.id().to_string(),
            directory: directory.to_path_buf(),
            photos,
        };
        self.session = Some(session);

        Ok(snapshot)
    }

    /// The photo to show next, or the end of the review
    pub fn present_current(&mut self) -> Result<Presentation> {
        Ok(self.session_mut()?.advance_and_present())
    }

    pub fn decide(&mut self, decision: Decision) -> Result<Counters> {
        self.session_mut()?.decide(decision)
    }

    pub fn skip(&mut self) -> Result<()> {
        self.session_mut()?.skip();
        Ok(())
    }

    pub fn undo(&mut self) -> Result<Option<HistoryEntry>> {
        self.session_mut()?.undo()
    }

    /// Drop the open session and return to the pre-open state
    pub fn reset_session(&mut self) {
        if let Some(session) = self.session.take() {
            info!("Closing session {}", session.id());
            session.emit_reset();
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    fn session_mut(&mut self) -> Result<&mut Session> {
        self.session.as_mut().ok_or(TriageError::NoSession)
    }
}

impl Default for TriageEngine {
    fn default() -> Self {
        Self::new()
    }
}
