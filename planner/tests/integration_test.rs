//! Integration tests for the weekly planner
//!
//! These tests verify end-to-end functionality including:
//! - Loading and saving the snapshot file, including unreadable ones
//! - Debounced writes through the application state
//! - Clearing the week
//! - The focus timer cycle

use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use weekplanner::app::AppState;
use weekplanner::config::STORAGE_KEY;
use weekplanner::document::{MetaField, PlannerDocument, TaskPatch, Weekday};
use weekplanner::services::{
    AppSettings, FixedAnswer, FocusTimerService, PersistenceScheduler, PlannerService, SaveStatus,
};
use weekplanner::storage::{FileSnapshotStore, MemorySnapshotStore, SnapshotStore};
use weekplanner::timer::{Phase, TimerPreset};

fn snapshot_path(temp: &TempDir) -> std::path::PathBuf {
    temp.path().join(format!("{}.json", STORAGE_KEY))
}

async fn settle(ms: u64) {
    tokio::time::advance(Duration::from_millis(ms)).await;
    for _ in 0..5 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_week_survives_restart() {
    let temp_dir = TempDir::new().unwrap();

    let expected = {
        let mut state = AppState::initialize(temp_dir.path().to_path_buf())
            .await
            .unwrap();

        let gym = state.planner.add_task(Weekday::Monday, "Gym").unwrap();
        state.planner.add_task(Weekday::Monday, "Read").unwrap();
        state.planner.toggle_done(Weekday::Monday, gym);
        state.planner.update_task(
            Weekday::Monday,
            gym,
            &TaskPatch {
                label: Some("Gym (legs)".to_string()),
                done: None,
            },
        );
        state.planner.add_deadline("Essay", "2024-05-01").unwrap();
        state.planner.set_meta(MetaField::WeekLabel, "Week 18");
        state.planner.set_notes("Sleep early");

        state.shutdown();
        assert_eq!(state.planner.status(), SaveStatus::Saved);
        state.planner.document().clone()
    };

    assert!(snapshot_path(&temp_dir).exists());

    let state = AppState::initialize(temp_dir.path().to_path_buf())
        .await
        .unwrap();
    assert_eq!(state.planner.document(), &expected);
    assert_eq!(state.planner.document().days.monday[0].label, "Gym (legs)");
    assert!(state.planner.document().days.monday[0].done);
}

#[tokio::test]
async fn test_malformed_snapshot_starts_fresh() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(snapshot_path(&temp_dir), "{ definitely not json").unwrap();

    let state = AppState::initialize(temp_dir.path().to_path_buf())
        .await
        .unwrap();

    assert_eq!(state.planner.document(), &PlannerDocument::empty());
    assert_eq!(state.planner.status(), SaveStatus::Saved);
}

#[tokio::test]
async fn test_unreadable_snapshot_starts_fresh() {
    let temp_dir = TempDir::new().unwrap();
    // A directory in place of the snapshot file cannot be read
    std::fs::create_dir(snapshot_path(&temp_dir)).unwrap();

    let state = AppState::initialize(temp_dir.path().to_path_buf())
        .await
        .unwrap();

    assert_eq!(state.planner.document(), &PlannerDocument::empty());
    assert_eq!(state.planner.status(), SaveStatus::Saved);
}

#[tokio::test(start_paused = true)]
async fn test_typing_burst_is_written_once_to_disk() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(FileSnapshotStore::new(temp_dir.path(), STORAGE_KEY));
    let mut planner = PlannerService::load(PersistenceScheduler::new(store.clone()));

    // One keystroke every 100ms
    for text in ["P", "Pl", "Pla", "Plan"] {
        planner.set_notes(text);
        assert_eq!(planner.status(), SaveStatus::Saving);
        settle(100).await;
    }
    assert!(store.read().unwrap().is_none());

    settle(500).await;
    let stored = PlannerDocument::from_json(&store.read().unwrap().unwrap()).unwrap();
    assert_eq!(stored.notes, "Plan");
    assert_eq!(planner.status(), SaveStatus::Saved);
}

#[tokio::test(start_paused = true)]
async fn test_clear_week_removes_snapshot_file() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(FileSnapshotStore::new(temp_dir.path(), STORAGE_KEY));
    let mut planner = PlannerService::load(PersistenceScheduler::new(store.clone()));

    planner.add_task(Weekday::Sunday, "Meal prep").unwrap();
    settle(600).await;
    assert!(store.path().exists());

    // Declined: nothing changes
    assert!(!planner.clear_week(&FixedAnswer(false)).unwrap());
    assert!(store.path().exists());
    assert_eq!(planner.document().days.sunday.len(), 1);

    // An edit still waiting for its window must not bring the file back
    planner.set_notes("about to be cleared");
    assert!(planner.clear_week(&FixedAnswer(true)).unwrap());
    assert!(!store.path().exists());
    assert_eq!(planner.document(), &PlannerDocument::empty());

    settle(1_000).await;
    assert!(!store.path().exists());
}

#[tokio::test(start_paused = true)]
async fn test_write_failure_recovers_on_next_change() {
    let temp_dir = TempDir::new().unwrap();
    let store = Arc::new(MemorySnapshotStore::new());
    let mut state = AppState::new(
        temp_dir.path().to_path_buf(),
        AppSettings::default(),
        store.clone(),
    );
    let mut status = state.planner.subscribe_status();

    store.set_fail_writes(true);
    state.planner.add_task(Weekday::Thursday, "Pay rent").unwrap();
    settle(600).await;
    assert_eq!(*status.borrow_and_update(), SaveStatus::Error);

    store.set_fail_writes(false);
    state.planner.add_task(Weekday::Thursday, "Water plants").unwrap();
    assert_eq!(*status.borrow_and_update(), SaveStatus::Saving);
    settle(600).await;
    assert_eq!(*status.borrow_and_update(), SaveStatus::Saved);

    let stored = PlannerDocument::from_json(&store.contents().unwrap()).unwrap();
    assert_eq!(stored.days.thursday.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_focus_timer_full_cycle() {
    let mut timer = FocusTimerService::new(TimerPreset::custom(5, 3).unwrap());
    timer.start();

    for _ in 0..5 {
        settle(1_000).await;
    }
    let snapshot = timer.snapshot();
    assert_eq!(snapshot.phase(), Phase::Break);
    assert_eq!(snapshot.seconds_left(), 3);

    for _ in 0..3 {
        settle(1_000).await;
    }
    let snapshot = timer.snapshot();
    assert_eq!(snapshot.phase(), Phase::Work);
    assert_eq!(snapshot.display(), "00:05");
    assert!(snapshot.is_running());
}
