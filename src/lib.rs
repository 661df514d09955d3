//! # Photo Triage
//!
//! Sort a folder of photos into `keep/` and `delete/` one photo at a time,
//! with every decision undoable.
//!
//! ## Core Philosophy
//! - **Nothing is deleted** - "delete" only moves a photo into `delete/`
//! - **Nothing is overwritten** - name clashes get a numeric suffix
//! - **Every decision can be undone** - most recent first
//!
//! ## Architecture
//! The library is split into a core engine (front-end agnostic) and presentation layers:
//! - `core` - Scanner, EXIF resolver, relocator, review session, batch sorters
//! - `config` - User settings
//! - `events` - Event-driven reporting
//! - `error` - User-friendly error types
//! - `cli` - Command-line interface (binary only)

pub mod config;
pub mod core;
pub mod error;
pub mod events;

// Re-export commonly used types at the crate root
pub use config::TriageConfig;
pub use error::{Result, TriageError};

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// File name of the optional log file
pub const LOG_FILE_NAME: &str = "photo-triage.log";

/// Initialize tracing for the library
///
/// Logs go to stderr, filtered by `RUST_LOG` (default `warn`, or `debug`
/// with `verbose`). With a `log_dir`, everything is also appended to
/// `{log_dir}/photo-triage.log`; keep the returned guard alive until exit
/// so buffered lines get flushed.
///
/// Calling this twice leaves the first subscriber in place.
pub fn init_tracing(log_dir: Option<&Path>, verbose: bool) -> Option<WorkerGuard> {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let appender = log_dir.and_then(|dir| {
        RollingFileAppender::builder()
            .rotation(Rotation::NEVER)
            .filename_prefix(LOG_FILE_NAME)
            .build(dir)
            .map_err(|e| eprintln!("Not logging to {}: {}", dir.display(), e))
            .ok()
    });

    let (file_layer, guard) = match appender {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    if installed.is_err() {
        return None;
    }

    guard
}
