//! # photo-triage CLI
//!
//! Command-line interface for photo triage.
//!
//! ## Usage
//! ```bash
//! photo-triage review ~/Pictures/holiday
//! photo-triage blur ~/Pictures/holiday --dry-run
//! ```

mod cli;

use photo_triage::Result;

fn main() -> Result<()> {
    cli::run()
}
