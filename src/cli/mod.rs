//! # CLI Module
//!
//! Command-line interface for photo triage.
//!
//! ## Usage
//! ```bash
//! # Review a folder photo by photo
//! photo-triage review ~/Pictures/holiday
//!
//! # Show the review order
//! photo-triage list ~/Pictures/holiday --output json
//!
//! # Move blurry photos into blurry/
//! photo-triage blur ~/Pictures/holiday --threshold 100
//!
//! # See which photos would go to screenshots/ without moving them
//! photo-triage screenshots ~/Pictures/holiday --min-confidence low --dry-run
//! ```

mod review;

use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use photo_triage::config::TriageConfig;
use photo_triage::core::quality::BlurDetector;
use photo_triage::core::scanner::DirectoryScanner;
use photo_triage::core::screenshot::{ScreenshotConfidence, ScreenshotDetector};
use photo_triage::core::sorter::{
    BatchSorter, BlurClassifier, Classifier, ScreenshotClassifier, SortReport,
};
use photo_triage::error::Result;
use photo_triage::events::{Event, EventChannel, SortEvent};
use std::path::{Path, PathBuf};
use std::thread;
use tracing::info;

/// Photo Triage - keep or delete your photos one at a time, undo anything
#[derive(Parser, Debug)]
#[command(name = "photo-triage")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Review a folder interactively: keep, delete, skip or undo each photo
    Review {
        /// Folder to review
        directory: PathBuf,

        /// Include hidden files
        #[arg(long)]
        include_hidden: bool,
    },

    /// Print the review order of a folder
    List {
        directory: PathBuf,

        /// Include hidden files
        #[arg(long)]
        include_hidden: bool,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },

    /// Move blurry photos into blurry/
    Blur {
        directory: PathBuf,

        /// Laplacian variance below which a photo is blurry
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Report what would move without moving anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Move screenshots into screenshots/
    Screenshots {
        directory: PathBuf,

        /// Weakest detection that still counts
        #[arg(short, long)]
        min_confidence: Option<Confidence>,

        /// Report what would move without moving anything
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Confidence {
    /// Screen resolutions and window-like pixels too
    Low,
    /// Screenshot-like file names
    Medium,
    /// Capture tool recorded in EXIF only
    High,
}

impl From<Confidence> for ScreenshotConfidence {
    fn from(confidence: Confidence) -> Self {
        match confidence {
            Confidence::Low => ScreenshotConfidence::Low,
            Confidence::Medium => ScreenshotConfidence::Medium,
            Confidence::High => ScreenshotConfidence::High,
        }
    }
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let loaded = TriageConfig::load_or_default(cli.config.as_deref());
    let _log_guard = photo_triage::init_tracing(
        loaded.as_ref().ok().and_then(|c| c.log_dir.as_deref()),
        cli.verbose,
    );
    let config = loaded?;
    // After init_tracing so this reaches the log file too
    match TriageConfig::resolve_path(cli.config.as_deref()) {
        Some(path) if path.exists() => info!("Using config {}", path.display()),
        Some(path) => info!("No config at {}, using defaults", path.display()),
        None => info!("No config directory, using defaults"),
    }

    match cli.command {
        Commands::Review {
            directory,
            include_hidden,
        } => review::run(directory, DirectoryScanner::new().with_hidden(include_hidden)),
        Commands::List {
            directory,
            include_hidden,
            output,
        } => run_list(
            &directory,
            &DirectoryScanner::new().with_hidden(include_hidden),
            output,
        ),
        Commands::Blur {
            directory,
            threshold,
            dry_run,
        } => {
            let detector = BlurDetector::new(threshold.unwrap_or(config.blur_threshold))
                .with_analysis_size(config.blur_analysis_size);
            run_sort(&directory, &BlurClassifier::new(detector), dry_run)
        }
        Commands::Screenshots {
            directory,
            min_confidence,
            dry_run,
        } => {
            let min_confidence = min_confidence
                .map(ScreenshotConfidence::from)
                .unwrap_or(config.screenshot_min_confidence);
            let classifier = ScreenshotClassifier::new(ScreenshotDetector::new(min_confidence));
            run_sort(&directory, &classifier, dry_run)
        }
    }
}

fn run_list(directory: &Path, scanner: &DirectoryScanner, output: OutputFormat) -> Result<()> {
    let photos = scanner.scan(directory)?;

    match output {
        OutputFormat::Json => match serde_json::to_string_pretty(&photos) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Could not serialize photo list: {}", e),
        },
        OutputFormat::Pretty => {
            let term = Term::stdout();
            term.write_line(&format!(
                "{} photos in {}",
                style(photos.len()).cyan(),
                directory.display()
            ))
            .ok();
            for (i, photo) in photos.iter().enumerate() {
                term.write_line(&format!(
                    "  {:>4}  {}  {}",
                    style(i + 1).dim(),
                    photo.created.format("%Y-%m-%d %H:%M:%S"),
                    photo.name
                ))
                .ok();
            }
        }
    }

    Ok(())
}

fn run_sort(directory: &Path, classifier: &dyn Classifier, dry_run: bool) -> Result<()> {
    let term = Term::stderr();
    let sorter = BatchSorter::new().dry_run(dry_run);

    let (sender, receiver) = EventChannel::new();

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );
    let progress = pb.clone();

    // Handle events in a separate thread
    let event_thread = thread::spawn(move || {
        for event in receiver.iter() {
            match event {
                Event::Sort(SortEvent::Started { total_photos, .. }) => {
                    progress.set_length(total_photos as u64);
                }
                Event::Sort(SortEvent::Progress(p)) => {
                    progress.set_position(p.completed as u64);
                    progress.set_message(
                        p.current_path
                            .file_name()
                            .unwrap_or_default()
                            .to_string_lossy()
                            .into_owned(),
                    );
                }
                Event::Sort(SortEvent::Completed { .. }) => progress.finish_and_clear(),
                _ => {}
            }
        }
    });

    let result = sorter.run_with_events(directory, classifier, &sender);

    // Drop sender to signal event thread to finish
    drop(sender);
    event_thread.join().ok();
    pb.finish_and_clear();

    print_sort_report(&term, &result?);
    Ok(())
}

fn print_sort_report(term: &Term, report: &SortReport) {
    let verb = if report.dry_run { "would move" } else { "moved" };

    term.write_line(&format!(
        "{} {} photos checked, {} {} to {}/, {} failed",
        style("✓").green().bold(),
        style(report.processed).cyan(),
        style(report.moved.len()).yellow(),
        verb,
        report.category,
        style(report.failed).red()
    ))
    .ok();

    for record in &report.moved {
        term.write_line(&format!(
            "    {} -> {}  {}",
            record.filename,
            record.stored_name,
            style(&record.reason).dim()
        ))
        .ok();
    }
}
