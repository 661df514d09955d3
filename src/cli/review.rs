//! Interactive keep/delete review in the terminal.

use console::{style, Key, Term};
use photo_triage::core::metadata::load_normalized;
use photo_triage::core::scanner::DirectoryScanner;
use photo_triage::core::triage::{
    Counters, CurrentPhoto, Decision, ItemStatus, Presentation, TriageEngine,
};
use photo_triage::error::Result;
use std::path::PathBuf;

const HELP: &str = "←/j delete   →/l keep   ↓/k skip   z undo   q quit";

/// What the user asked for on the current photo
enum Action {
    Decide(Decision),
    Skip,
    Undo,
    Quit,
    Ignore,
}

fn action_for(key: Key) -> Action {
    match key {
        Key::ArrowLeft | Key::Char('j') => Action::Decide(Decision::Delete),
        Key::ArrowRight | Key::Char('l') => Action::Decide(Decision::Keep),
        Key::ArrowDown | Key::Char('k') => Action::Skip,
        Key::Char('z') | Key::Char('u') => Action::Undo,
        Key::Char('q') | Key::Escape => Action::Quit,
        _ => Action::Ignore,
    }
}

/// How a finished (or abandoned) folder ends
enum Next {
    Folder(PathBuf),
    Quit,
}

pub fn run(mut directory: PathBuf, scanner: DirectoryScanner) -> Result<()> {
    let term = Term::stderr();
    let mut engine = TriageEngine::new().with_scanner(scanner);

    loop {
        let snapshot = match engine.open_session(&directory) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                term.write_line(&format!("{} {}", style("✗").red().bold(), e))
                    .ok();
                match ask_next_folder(&term) {
                    Next::Folder(next) => {
                        directory = next;
                        continue;
                    }
                    Next::Quit => return Err(e),
                }
            }
        };
        term.write_line(&format!(
            "{} {} photos in {}",
            style("Reviewing").bold().cyan(),
            snapshot.len(),
            directory.display()
        ))
        .ok();
        term.write_line(&format!("{}", style(HELP).dim())).ok();

        match review_folder(&term, &mut engine)? {
            Next::Folder(next) => {
                engine.reset_session();
                directory = next;
            }
            Next::Quit => return Ok(()),
        }
    }
}

fn review_folder(term: &Term, engine: &mut TriageEngine) -> Result<Next> {
    loop {
        let photo = match engine.present_current()? {
            Presentation::Current(photo) => photo,
            Presentation::Empty => {
                term.write_line("No photos to review in this folder.").ok();
                return Ok(ask_next_folder(term));
            }
            Presentation::Completed(counters) => {
                print_summary(term, counters);
                term.write_line(&format!(
                    "{}",
                    style("z undo the last decision, n review another folder, q quit").dim()
                ))
                .ok();
                match term.read_key() {
                    Ok(Key::Char('z')) | Ok(Key::Char('u')) => {
                        undo(term, engine);
                        continue;
                    }
                    Ok(Key::Char('n')) => return Ok(ask_next_folder(term)),
                    _ => return Ok(Next::Quit),
                }
            }
        };

        show_photo(term, &photo, current_counters(engine));

        let key = match term.read_key() {
            Ok(key) => key,
            Err(_) => return Ok(Next::Quit),
        };

        match action_for(key) {
            Action::Decide(decision) => {
                if let Err(e) = engine.decide(decision) {
                    term.write_line(&format!("{} {}", style("✗").red().bold(), e))
                        .ok();
                }
            }
            Action::Skip => engine.skip()?,
            Action::Undo => undo(term, engine),
            Action::Quit => {
                print_stopped(term, engine);
                return Ok(Next::Quit);
            }
            Action::Ignore => {
                term.write_line(&format!("{}", style(HELP).dim())).ok();
            }
        }
    }
}

fn undo(term: &Term, engine: &mut TriageEngine) {
    match engine.undo() {
        Ok(Some(entry)) => {
            term.write_line(&format!(
                "{} undid {} of {}",
                style("↺").yellow(),
                entry.decision,
                entry.filename
            ))
            .ok();
        }
        Ok(None) => {
            term.write_line(&format!("{}", style("Nothing to undo").dim()))
                .ok();
        }
        Err(e) => {
            term.write_line(&format!("{} {}", style("✗").red().bold(), e))
                .ok();
        }
    }
}

fn current_counters(engine: &TriageEngine) -> Counters {
    engine.session().map(|s| s.counters()).unwrap_or_default()
}

fn show_photo(term: &Term, photo: &CurrentPhoto, counters: Counters) {
    let dimensions = match load_normalized(&photo.path) {
        Ok(Some(image)) => format!("{}x{}", image.width(), image.height()),
        Ok(None) => "missing".to_string(),
        Err(_) => "unreadable".to_string(),
    };

    let skipped = if photo.status == ItemStatus::Skipped {
        style(" (skipped before)").yellow().to_string()
    } else {
        String::new()
    };

    term.write_line(&format!(
        "Image {} of {}: {}{}  {}  {}",
        photo.position,
        photo.total,
        style(&photo.filename).bold(),
        skipped,
        style(dimensions).dim(),
        style(format!(
            "kept {} / deleted {}",
            counters.kept, counters.deleted
        ))
        .dim()
    ))
    .ok();
}

fn print_summary(term: &Term, counters: Counters) {
    term.write_line("").ok();
    term.write_line(&format!(
        "{} Review complete: {} kept, {} deleted",
        style("✓").green().bold(),
        style(counters.kept).cyan(),
        style(counters.deleted).yellow()
    ))
    .ok();
}

fn print_stopped(term: &Term, engine: &TriageEngine) {
    let counters = current_counters(engine);
    let remaining = engine.session().map(|s| s.remaining()).unwrap_or(0);

    term.write_line("").ok();
    term.write_line(&format!(
        "{} Review stopped: {} kept, {} deleted, {} left to review",
        style("■").yellow().bold(),
        style(counters.kept).cyan(),
        style(counters.deleted).yellow(),
        style(remaining).bold()
    ))
    .ok();
}

fn ask_next_folder(term: &Term) -> Next {
    term.write_str("Folder to review next (empty to quit): ").ok();
    match term.read_line() {
        Ok(line) if !line.trim().is_empty() => Next::Folder(PathBuf::from(line.trim())),
        _ => Next::Quit,
    }
}
