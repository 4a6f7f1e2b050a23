//! End-to-end: swipe an item on the dashboard, complete it through the
//! source, re-triage, and compute the celebration.

use std::cell::RefCell;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDateTime;
use studynext_core::assignment::parse_due_date;
use studynext_core::error::Result;
use studynext_core::{
    triage, Assignment, AssignmentPatch, AssignmentSource, Celebration, Config, CoreError,
    Event, MemorySource, Priority, Progress, SwipeToComplete,
};

const USER: &str = "student-1";

fn at(s: &str) -> NaiveDateTime {
    parse_due_date(s).unwrap()
}

fn seeded() -> (MemorySource, Vec<Assignment>) {
    let mut source = MemorySource::new();
    let items = vec![
        Assignment::new("Math", "Worksheet 4", at("2026-02-03"))
            .unwrap()
            .with_priority(Some(Priority::High)),
        Assignment::new("History", "Chapter notes", at("2026-02-05"))
            .unwrap()
            .with_priority(Some(Priority::Low)),
        Assignment::new("Biology", "Lab report", at("2026-02-06")).unwrap(),
    ];
    for a in &items {
        source.insert(USER, a);
    }
    (source, items)
}

#[test]
fn swipe_completes_and_retriage_drops_item() {
    let config = Config::default();
    let (source, items) = seeded();
    let now = at("2026-02-05T20:00");
    let source = RefCell::new(source);

    let before = source.borrow().get_all(USER).unwrap();
    let progress_before = Progress::from_assignments(&before, now.date(), &config.rewards);
    let dashboard = triage(&before, now, &config.triage);
    let target = dashboard.visible[0].assignment.id.clone();
    assert_eq!(target, items[0].id);

    let mut item = SwipeToComplete::new(target.clone(), config.swipe.clone(), |id: &str| -> Result<()> {
        source
            .borrow_mut()
            .update(USER, id, &AssignmentPatch::complete(now))
    });
    item.pointer_down(12.0);
    item.pointer_move(60.0);
    item.pointer_move(180.0);
    assert!(matches!(item.pointer_up(5_000), Some(Event::CommitScheduled { .. })));
    assert!(item.tick(5_200).unwrap().is_none());
    assert!(matches!(
        item.tick(5_300).unwrap(),
        Some(Event::AssignmentCompleted { .. })
    ));
    drop(item);

    let after = source.borrow().get_all(USER).unwrap();
    let dashboard = triage(&after, now, &config.triage);
    assert!(dashboard.ordered.iter().all(|e| e.assignment.id != target));
    assert_eq!(dashboard.counts.overdue, 0);

    let progress_after = Progress::from_assignments(&after, now.date(), &config.rewards);
    let celebration = Celebration::between(target, &progress_before, &progress_after);
    assert_eq!(celebration.xp_gained, 30);
    assert_eq!(celebration.streak_days, 1);
    assert!(celebration.streak_extended);
}

#[test]
fn failed_update_leaves_source_untouched() {
    let config = Config::default();
    let (source, _) = seeded();
    let source = RefCell::new(source);

    let mut item = SwipeToComplete::new("ghost", config.swipe.clone(), |id: &str| -> Result<()> {
        source
            .borrow_mut()
            .update(USER, id, &AssignmentPatch::complete(at("2026-02-05T20:00")))
    });
    item.pointer_down(0.0);
    item.pointer_move(150.0);
    item.pointer_up(0);
    assert!(matches!(item.tick(300), Err(CoreError::Source(_))));
    drop(item);

    // Owner reloads from the source of truth.
    let reloaded = source.borrow().get_all(USER).unwrap();
    assert!(reloaded.iter().all(|a| !a.completed));
}

#[tokio::test(start_paused = true)]
async fn released_swipe_completes_through_owned_timer() {
    let config = Config::default();
    let (source, items) = seeded();
    let id = items[2].id.clone();
    let source = Arc::new(Mutex::new(source));

    let handler = {
        let source = Arc::clone(&source);
        move |id: &str| -> Result<()> {
            source
                .lock()
                .unwrap()
                .update(USER, id, &AssignmentPatch::complete(at("2026-02-05T20:00")))
        }
    };
    let mut item = SwipeToComplete::new(id.clone(), config.swipe.clone(), handler);
    item.pointer_down(0.0);
    item.pointer_move(250.0);
    assert!(matches!(item.release(1_000), Some(Event::CommitScheduled { .. })));

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!source.lock().unwrap().get_all(USER).unwrap()[2].completed);

    let event = item.settle().await.unwrap();
    assert!(matches!(event, Some(Event::AssignmentCompleted { ref assignment_id, .. }) if *assignment_id == id));
    assert!(source.lock().unwrap().get_all(USER).unwrap()[2].completed);
}

#[tokio::test(start_paused = true)]
async fn unmounting_before_delay_leaves_source_untouched() {
    let config = Config::default();
    let (source, items) = seeded();
    let source = Arc::new(Mutex::new(source));

    let handler = {
        let source = Arc::clone(&source);
        move |id: &str| -> Result<()> {
            source
                .lock()
                .unwrap()
                .update(USER, id, &AssignmentPatch::complete(at("2026-02-05T20:00")))
        }
    };
    let mut item = SwipeToComplete::new(items[0].id.clone(), config.swipe.clone(), handler);
    item.pointer_down(0.0);
    item.pointer_move(250.0);
    item.release(0);

    tokio::time::sleep(Duration::from_millis(299)).await;
    item.unmount();
    tokio::time::sleep(Duration::from_secs(2)).await;

    assert!(source
        .lock()
        .unwrap()
        .get_all(USER)
        .unwrap()
        .iter()
        .all(|a| !a.completed));
}

#[test]
fn swiping_twice_does_not_move_completion_time() {
    let config = Config::default();
    let (source, items) = seeded();
    let source = RefCell::new(source);
    let first = at("2026-01-20T18:00");
    let id = items[0].id.clone();
    source
        .borrow_mut()
        .update(USER, &id, &AssignmentPatch::complete(first))
        .unwrap();

    let mut item = SwipeToComplete::new(id.clone(), config.swipe.clone(), |id: &str| -> Result<()> {
        source
            .borrow_mut()
            .update(USER, id, &AssignmentPatch::complete(at("2026-02-05T10:00")))
    });
    item.pointer_down(0.0);
    item.pointer_move(200.0);
    item.pointer_up(0);
    assert!(item.tick(300).unwrap().is_some());
    drop(item);

    let stored = source.borrow().get_all(USER).unwrap();
    assert_eq!(stored[0].completed_at, Some(first));
    let progress = Progress::from_assignments(&stored, at("2026-02-05").date(), &config.rewards);
    assert_eq!(progress.streak_days, 0);
}
