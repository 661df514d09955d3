//! # Sorter Module
//!
//! One-shot batch sorters that move flagged photos of a folder into a
//! category subfolder (`blurry/`, `screenshots/`).
//!
//! Classification runs in parallel with rayon; moves run one at a time
//! through the [`FileRelocator`](crate::core::relocator::FileRelocator), so
//! they never overwrite and can be undone with [`BatchSorter::undo`].

mod classifier;

pub use classifier::{BlurClassifier, Classifier, ScreenshotClassifier};

use crate::core::relocator::{unique_destination, FileRelocator};
use crate::core::scanner::DirectoryScanner;
use crate::error::{Result, TriageError};
use crate::events::{null_sender, Event, EventSender, SortEvent, SortProgress};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{info, warn};

/// One photo moved (or, in a dry run, to be moved) into the category folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Name in the scanned folder
    pub filename: String,
    /// Name inside the category folder
    pub stored_name: String,
    pub category_dir: PathBuf,
    /// Why the classifier flagged it
    pub reason: String,
}

impl MoveRecord {
    pub fn destination(&self) -> PathBuf {
        self.category_dir.join(&self.stored_name)
    }
}

/// Outcome of one batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortReport {
    pub directory: PathBuf,
    pub category: String,
    pub dry_run: bool,
    /// Photos classified without error
    pub processed: usize,
    pub moved: Vec<MoveRecord>,
    /// Photos that could not be decoded or moved
    pub failed: usize,
}

/// Runs a [`Classifier`] over every photo of a folder
#[derive(Debug, Clone, Default)]
pub struct BatchSorter {
    scanner: DirectoryScanner,
    dry_run: bool,
}

impl BatchSorter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify only; leave every file where it is
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_scanner(mut self, scanner: DirectoryScanner) -> Self {
        self.scanner = scanner;
        self
    }

    /// Sort without event reporting
    pub fn run(&self, directory: &Path, classifier: &dyn Classifier) -> Result<SortReport> {
        self.run_with_events(directory, classifier, &null_sender())
    }

    /// Sort `directory`, reporting progress on `events`.
    ///
    /// Only an unusable directory is an error; per-photo failures are
    /// logged, counted and skipped.
    pub fn run_with_events(
        &self,
        directory: &Path,
        classifier: &dyn Classifier,
        events: &EventSender,
    ) -> Result<SortReport> {
        let photos = self.scanner.scan(directory)?;
        let total = photos.len();
        let category = classifier.category().to_string();
        let category_dir = directory.join(&category);

        info!(
            "Sorting {} photos of {} into {}/",
            total,
            directory.display(),
            category
        );
        events.send(Event::Sort(SortEvent::Started {
            category: category.clone(),
            total_photos: total,
        }));

        let completed = AtomicUsize::new(0);
        let verdicts: Vec<_> = photos
            .par_iter()
            .map(|photo| {
                let verdict = classifier.classify(&photo.path);
                events.send(Event::Sort(SortEvent::Progress(SortProgress {
                    completed: completed.fetch_add(1, Ordering::SeqCst) + 1,
                    total,
                    current_path: photo.path.clone(),
                })));
                (photo, verdict)
            })
            .collect();

        let relocator = FileRelocator::lazy(directory);
        let mut report = SortReport {
            directory: directory.to_path_buf(),
            category,
            dry_run: self.dry_run,
            processed: 0,
            moved: Vec::new(),
            failed: 0,
        };

        for (photo, verdict) in verdicts {
            let reason = match verdict {
                Ok(Some(reason)) => reason,
                Ok(None) => {
                    report.processed += 1;
                    continue;
                }
                Err(e) => {
                    warn!("Could not classify {}: {}", photo.path.display(), e);
                    report.failed += 1;
                    events.send(Event::Sort(SortEvent::Error {
                        path: photo.path.clone(),
                        message: e.to_string(),
                    }));
                    continue;
                }
            };
            report.processed += 1;

            let destination = if self.dry_run {
                unique_destination(&category_dir, &photo.name)
            } else {
                match relocator.move_file(&photo.name, directory, &category_dir) {
                    Ok(destination) => destination,
                    Err(e) => {
                        warn!("Could not move {}: {}", photo.path.display(), e);
                        report.failed += 1;
                        events.send(Event::Sort(SortEvent::Error {
                            path: photo.path.clone(),
                            message: e.to_string(),
                        }));
                        continue;
                    }
                }
            };

            info!("{} -> {} ({})", photo.name, destination.display(), reason);
            events.send(Event::Sort(SortEvent::Moved {
                from: photo.path.clone(),
                to: destination.clone(),
            }));

            let stored_name = destination
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| photo.name.clone());
            report.moved.push(MoveRecord {
                filename: photo.name.clone(),
                stored_name,
                category_dir: category_dir.clone(),
                reason,
            });
        }

        events.send(Event::Sort(SortEvent::Completed {
            processed: report.processed,
            moved: report.moved.len(),
            failed: report.failed,
        }));

        Ok(report)
    }

    /// Move every photo of `report` back, most recent first.
    ///
    /// Stops at the first photo that cannot be restored and returns
    /// [`TriageError::Undo`]; photos restored before it stay restored.
    pub fn undo(report: &SortReport) -> Result<usize> {
        if report.dry_run {
            return Ok(0);
        }

        let relocator = FileRelocator::lazy(&report.directory);
        let mut restored = 0;

        for record in report.moved.iter().rev() {
            relocator
                .restore(&record.category_dir, &record.stored_name, &record.filename)
                .map_err(|source| {
                    warn!("Could not restore {}: {}", record.filename, source);
                    TriageError::Undo {
                        filename: record.filename.clone(),
                        source,
                    }
                })?;
            restored += 1;
        }

        info!(
            "Restored {} photos from {}/",
            restored, report.category
        );
        Ok(restored)
    }
}
