//! Integration tests for the blur and screenshot sorters.

mod common;

use assert_fs::prelude::*;
use assert_fs::TempDir;
use photo_triage::core::quality::BlurDetector;
use photo_triage::core::screenshot::{ScreenshotConfidence, ScreenshotDetector};
use photo_triage::core::sorter::{BatchSorter, BlurClassifier, ScreenshotClassifier};
use photo_triage::events::{Event, EventChannel, SortEvent};
use predicates::prelude::*;

#[test]
fn blurry_photos_move_to_blurry_folder() {
    let temp = TempDir::new().unwrap();
    temp.child("flat.png").write_binary(&common::flat_png(64)).unwrap();
    temp.child("sharp.png").write_binary(&common::sharp_png(64)).unwrap();
    temp.child("notes.txt").write_str("not a photo").unwrap();

    let report = BatchSorter::new()
        .run(temp.path(), &BlurClassifier::new(BlurDetector::new(90.0)))
        .unwrap();

    assert_eq!(report.processed, 2);
    assert_eq!(report.moved.len(), 1);
    temp.child("blurry/flat.png").assert(predicate::path::is_file());
    temp.child("sharp.png").assert(predicate::path::is_file());
    temp.child("notes.txt").assert(predicate::path::is_file());
}

#[test]
fn large_soft_photo_is_flagged_with_default_settings() {
    let temp = TempDir::new().unwrap();
    temp.child("soft.png")
        .write_binary(&common::soft_noise_png(1024, 3.0))
        .unwrap();

    let report = BatchSorter::new()
        .run(temp.path(), &BlurClassifier::default())
        .unwrap();

    assert_eq!(report.moved.len(), 1);
    temp.child("blurry/soft.png").assert(predicate::path::is_file());
}

#[test]
fn unreadable_photo_is_counted_and_left_alone() {
    let temp = TempDir::new().unwrap();
    temp.child("corrupt.jpg").write_str("this is not a jpeg").unwrap();
    temp.child("flat.png").write_binary(&common::flat_png(32)).unwrap();

    let report = BatchSorter::new()
        .run(temp.path(), &BlurClassifier::default())
        .unwrap();

    assert_eq!(report.failed, 1);
    assert_eq!(report.processed, 1);
    temp.child("corrupt.jpg").assert(predicate::path::is_file());
}

#[test]
fn screenshots_are_found_by_name() {
    let temp = TempDir::new().unwrap();
    temp.child("Screenshot 2024-05-01 at 10.00.00.png")
        .write_binary(&common::flat_png(16))
        .unwrap();
    temp.child("IMG_0001.png")
        .write_binary(&common::flat_png(16))
        .unwrap();

    let classifier =
        ScreenshotClassifier::new(ScreenshotDetector::new(ScreenshotConfidence::Medium));
    let report = BatchSorter::new().run(temp.path(), &classifier).unwrap();

    assert_eq!(report.moved.len(), 1);
    temp.child("screenshots/Screenshot 2024-05-01 at 10.00.00.png")
        .assert(predicate::path::exists());
    temp.child("IMG_0001.png").assert(predicate::path::exists());
}

#[test]
fn dry_run_reports_without_moving() {
    let temp = TempDir::new().unwrap();
    temp.child("Screen Shot 1.png")
        .write_binary(&common::flat_png(16))
        .unwrap();

    let report = BatchSorter::new()
        .dry_run(true)
        .run(temp.path(), &ScreenshotClassifier::default())
        .unwrap();

    assert!(report.dry_run);
    assert_eq!(report.moved.len(), 1);
    temp.child("Screen Shot 1.png").assert(predicate::path::exists());
    temp.child("screenshots").assert(predicate::path::missing());
}

#[test]
fn sort_can_be_undone() {
    let temp = TempDir::new().unwrap();
    temp.child("a.png").write_binary(&common::flat_png(16)).unwrap();
    temp.child("b.png").write_binary(&common::flat_png(16)).unwrap();

    let report = BatchSorter::new()
        .run(temp.path(), &BlurClassifier::default())
        .unwrap();
    assert_eq!(report.moved.len(), 2);

    let restored = BatchSorter::undo(&report).unwrap();

    assert_eq!(restored, 2);
    temp.child("a.png").assert(predicate::path::is_file());
    temp.child("b.png").assert(predicate::path::is_file());
    temp.child("blurry/a.png").assert(predicate::path::missing());
}

#[test]
fn progress_events_cover_every_photo() {
    let temp = TempDir::new().unwrap();
    for name in ["1.png", "2.png", "3.png"] {
        temp.child(name).write_binary(&common::sharp_png(16)).unwrap();
    }
    let (sender, receiver) = EventChannel::new();

    BatchSorter::new()
        .run_with_events(temp.path(), &BlurClassifier::default(), &sender)
        .unwrap();

    let events = receiver.drain();
    let progress = events
        .iter()
        .filter(|e| matches!(e, Event::Sort(SortEvent::Progress(_))))
        .count();
    assert_eq!(progress, 3);
    assert!(matches!(
        events.last(),
        Some(Event::Sort(SortEvent::Completed {
            processed: 3,
            moved: 0,
            failed: 0
        }))
    ));
}
