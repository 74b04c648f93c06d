//! Integration tests for the liftwave binary.
//!
//! These tests verify end-to-end behavior including:
//! - The workout lifecycle (start, log, finish)
//! - Baseline weight management and automatic progression
//! - Cardio logging, adherence output, and CSV rollup
//! - Two-phase session deletion
//! - Recovery from corrupted data files

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the path to the CLI binary
fn cli() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("liftwave"))
}

fn run_stdout(data_dir: &Path, args: &[&str]) -> String {
    let output = cli()
        .args(args)
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success();
    String::from_utf8(output.get_output().stdout.clone()).expect("stdout not UTF-8")
}

#[test]
fn test_cli_help() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wave-loading workout tracker"));
}

#[test]
fn test_status_fresh_start() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(&data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Week 1 • Heavy Day • Cycle 1"));

    assert!(data_dir.join("wal").exists());
}

#[test]
fn test_weights_set_and_status_targets() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args(["weights", "set", "squat", "100"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("squat baseline set to 100 kg"));

    // Week 1 Heavy day: full multiplier, 8 reps
    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 sets × 8 reps × 100 kg"));

    let list = run_stdout(data_dir, &["weights", "list"]);
    assert!(list.contains("squat"), "list missing squat: {}", list);
    assert!(list.contains("100"), "list missing baseline: {}", list);
}

#[test]
fn test_weights_set_unknown_exercise_fails() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["weights", "set", "curls", "20"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure();
}

#[test]
fn test_workout_flow_advances_day() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("start")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Started workout"));

    cli()
        .args(["log", "squat", "60", "8"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success();

    cli()
        .arg("finish")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Week 1 • Medium Day • Cycle 1"));

    // Active session file is gone, history has one session with one set
    assert!(!data_dir.join("active_session.json").exists());
    let history = run_stdout(data_dir, &["history"]);
    assert!(history.contains("1 sets"), "unexpected history: {}", history);
}

#[test]
fn test_start_twice_fails() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .arg("start")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success();

    cli()
        .arg("start")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .failure();
}

#[test]
fn test_log_without_start_fails() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["log", "squat", "60", "8"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure();
}

#[test]
fn test_level_up_after_two_qualifying_sets() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    // Place the clock in the final Heavy workout of the cycle
    fs::write(
        data_dir.join("state.json"),
        r#"{"position":{"week":5,"day":"heavy","cycle":1},"weights":{"squat":100.0}}"#,
    )
    .unwrap();

    cli()
        .arg("start")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success();

    // Week 5 prescribes 2 reps; first hit is not enough
    cli()
        .args(["log", "squat", "100", "2"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Level up!").not());

    cli()
        .args(["log", "squat", "100", "2"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("squat baseline is now 110 kg"));

    let list = run_stdout(data_dir, &["weights", "list"]);
    assert!(list.contains("110"), "baseline not raised: {}", list);
}

#[test]
fn test_cardio_add_and_status() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args(["cardio", "add", "running", "30"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Zone 2: 30/150 min"));

    // Interval work does not count toward zone 2
    cli()
        .args(["cardio", "add", "running", "25", "--interval"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Zone 2: 30/150 min"));

    cli()
        .args(["cardio", "status"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Next 4x4 due"));
}

#[test]
fn test_rollup_creates_csv() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args(["cardio", "add", "cycling", "45"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success();

    cli()
        .args(["rollup", "--cleanup"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Rolled up 1 sessions"));

    assert!(data_dir.join("cardio.csv").exists());

    // Rolled-up sessions still count toward adherence (read back from CSV)
    cli()
        .args(["cardio", "status"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Zone 2: 45/150 min"));
}

#[test]
fn test_delete_requires_confirmation() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli().arg("start").arg("--data-dir").arg(data_dir).assert().success();
    cli().arg("finish").arg("--data-dir").arg(data_dir).assert().success();

    let history = run_stdout(data_dir, &["history"]);
    let session_id = history
        .split_whitespace()
        .next()
        .expect("history is empty")
        .to_string();

    // First invocation only arms the delete
    let requested = run_stdout(data_dir, &["delete", &session_id]);
    assert!(
        requested.contains("Confirm with"),
        "missing confirmation hint: {}",
        requested
    );
    let token = requested
        .lines()
        .find(|line| line.contains("--confirm"))
        .and_then(|line| line.split_whitespace().last())
        .expect("no token in output")
        .to_string();

    let history = run_stdout(data_dir, &["history"]);
    assert!(history.contains(&session_id), "session deleted prematurely");

    // Second invocation with the token performs it
    cli()
        .args(["delete", &session_id, "--confirm", &token])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted session"));

    cli()
        .arg("history")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("No workouts recorded yet"));
}

#[test]
fn test_delete_wrong_token_fails() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli().arg("start").arg("--data-dir").arg(data_dir).assert().success();
    cli().arg("finish").arg("--data-dir").arg(data_dir).assert().success();

    let history = run_stdout(data_dir, &["history"]);
    let session_id = history.split_whitespace().next().unwrap().to_string();

    run_stdout(data_dir, &["delete", &session_id]);

    cli()
        .args([
            "delete",
            &session_id,
            "--confirm",
            "00000000-0000-0000-0000-000000000000",
        ])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .failure();

    let history = run_stdout(data_dir, &["history"]);
    assert!(history.contains(&session_id), "session should survive");
}

#[test]
fn test_delete_unknown_session_fails() {
    let temp_dir = setup_test_dir();

    cli()
        .args(["delete", "11111111-1111-1111-1111-111111111111"])
        .arg("--data-dir")
        .arg(temp_dir.path())
        .assert()
        .failure();
}

#[test]
fn test_corrupted_state_file_falls_back_to_defaults() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    fs::write(data_dir.join("state.json"), "{ invalid json }}}}").unwrap();

    cli()
        .arg("status")
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Week 1 • Heavy Day • Cycle 1"));
}

#[test]
fn test_corrupted_wal_lines_are_skipped() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    cli()
        .args(["cardio", "add", "rowing", "20"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success();

    // Append garbage to the WAL; the good record must still be counted
    let wal_path = data_dir.join("wal/cardio_sessions.wal");
    let mut contents = fs::read_to_string(&wal_path).unwrap();
    contents.push_str("{ not json }\n");
    fs::write(&wal_path, contents).unwrap();

    cli()
        .args(["cardio", "status"])
        .arg("--data-dir")
        .arg(data_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Zone 2: 20/150 min"));
}
