//! Integration tests for the full session lifecycle.
//!
//! These tests drive the controller the way the CLI does: start a
//! session, tick it forward, stop or reset, and verify what lands in
//! durable history and how it categorizes.

use podium_core::{
    CoreError, Database, DisplayState, Mode, Outcome, SessionController, ThresholdKind, TimeField,
    TimerState, ValidationError,
};

fn controller() -> SessionController {
    SessionController::init(Database::open_memory().unwrap()).unwrap()
}

fn run_session(ctl: &mut SessionController, speaker: &str, mode: Mode, ticks: u64) {
    ctl.start(speaker, mode).unwrap();
    for _ in 0..ticks {
        ctl.tick();
    }
    ctl.stop().unwrap();
}

#[test]
fn test_session_walks_display_states_and_records_on_time() {
    // Introductions defaults are 0:30 / 0:45 / 1:00.
    let mut ctl = controller();
    ctl.start("Dana", Mode::Introductions).unwrap();
    assert_eq!(ctl.state(), TimerState::Running);
    assert_eq!(ctl.display_state(), DisplayState::Default);

    for _ in 0..50 {
        ctl.tick();
    }
    assert_eq!(ctl.elapsed_secs(), 50);
    assert_eq!(ctl.display_state(), DisplayState::Warning);

    let entry = ctl.stop().unwrap().unwrap();
    assert_eq!(entry.speaker, "Dana");
    assert_eq!(entry.duration_secs, 50);
    assert_eq!(Outcome::for_entry(&entry), Outcome::OnTime);
    assert_eq!(ctl.state(), TimerState::Idle);
}

#[test]
fn test_outcomes_partition_by_mode_and_bucket() {
    let mut ctl = controller();
    run_session(&mut ctl, "short", Mode::Introductions, 10);
    run_session(&mut ctl, "on-time", Mode::Introductions, 50);
    run_session(&mut ctl, "long", Mode::Introductions, 65);
    run_session(&mut ctl, "topics", Mode::TableTopics, 90);

    let categorized = ctl.categorized();
    let intro = &categorized[&Mode::Introductions];
    assert_eq!(intro.too_short[0].speaker, "short");
    assert_eq!(intro.on_time[0].speaker, "on-time");
    assert_eq!(intro.over_time[0].speaker, "long");

    // 90s sits inside Table Topics' 1:00..=2:00 on-time range.
    assert_eq!(categorized[&Mode::TableTopics].on_time[0].speaker, "topics");
}

#[test]
fn test_reset_abandons_the_session_without_recording() {
    let mut ctl = controller();
    ctl.start("Dana", Mode::Speeches).unwrap();
    for _ in 0..120 {
        ctl.tick();
    }
    ctl.reset();

    assert_eq!(ctl.state(), TimerState::Idle);
    assert_eq!(ctl.elapsed_secs(), 0);
    assert!(ctl.history().is_empty());
}

#[test]
fn test_history_survives_reopening_the_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("podium.db");

    {
        let mut ctl = SessionController::init(Database::open_path(&path).unwrap()).unwrap();
        run_session(&mut ctl, "Dana", Mode::Speeches, 320);
        run_session(&mut ctl, "Evan", Mode::TableTopics, 40);
    }

    let ctl = SessionController::init(Database::open_path(&path).unwrap()).unwrap();
    let entries = ctl.history().entries();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].speaker, "Dana");
    assert_eq!(entries[0].duration_secs, 320);
    assert_eq!(entries[0].mode, Mode::Speeches);
    assert_eq!(entries[0].thresholds.over_time_secs, 7 * 60);
    assert_eq!(entries[1].speaker, "Evan");
}

#[test]
fn test_threshold_edits_apply_to_the_next_session_only() {
    let mut ctl = controller();

    // Session one runs against the 0:30 on-pace default; the mid-session
    // edit to 0:05 must not reclassify it.
    ctl.start("frozen", Mode::Introductions).unwrap();
    ctl.set_threshold(
        Mode::Introductions,
        ThresholdKind::OnPace,
        TimeField::Seconds,
        5,
    )
    .unwrap();
    for _ in 0..10 {
        ctl.tick();
    }
    let first = ctl.stop().unwrap().unwrap();
    assert_eq!(first.thresholds.on_pace_secs, 30);
    assert_eq!(Outcome::for_entry(&first), Outcome::TooShort);

    // Session two picks up the edited set.
    ctl.start("fresh", Mode::Introductions).unwrap();
    for _ in 0..10 {
        ctl.tick();
    }
    let second = ctl.stop().unwrap().unwrap();
    assert_eq!(second.thresholds.on_pace_secs, 5);
    assert_eq!(Outcome::for_entry(&second), Outcome::OnTime);
}

#[test]
fn test_invalid_starts_are_rejected_without_state_change() {
    let mut ctl = controller();

    let err = ctl.start("   ", Mode::Speeches).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::EmptySpeakerName)
    ));

    // Warning below on-pace breaks the ordering for the next start.
    ctl.set_threshold(Mode::Speeches, ThresholdKind::Warning, TimeField::Minutes, 2)
        .unwrap();
    let err = ctl.start("Dana", Mode::Speeches).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Validation(ValidationError::ThresholdOrder { .. })
    ));

    assert_eq!(ctl.state(), TimerState::Idle);
    assert_eq!(ctl.elapsed_secs(), 0);
    assert!(ctl.history().is_empty());
}

#[test]
fn test_clear_history_empties_durable_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("podium.db");

    let mut ctl = SessionController::init(Database::open_path(&path).unwrap()).unwrap();
    run_session(&mut ctl, "Dana", Mode::Speeches, 30);
    run_session(&mut ctl, "Evan", Mode::Speeches, 40);
    assert_eq!(ctl.clear_history().unwrap(), 2);
    drop(ctl);

    let ctl = SessionController::init(Database::open_path(&path).unwrap()).unwrap();
    assert!(ctl.history().is_empty());
}
