//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data
//! directory.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_focustimer"))
        .args(args)
        .env("FOCUSTIMER_DATA_DIR", dir)
        .env_remove("FOCUSTIMER_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_ok(dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    stdout
}

/// Commands print single-line events followed by a pretty snapshot; the
/// snapshot is everything from the first line that opens an object alone.
fn last_json(stdout: &str) -> serde_json::Value {
    let start = stdout
        .lines()
        .position(|l| l == "{")
        .expect("no pretty JSON object in output");
    let body: Vec<&str> = stdout.lines().skip(start).collect();
    serde_json::from_str(&body.join("\n")).expect("invalid JSON output")
}

fn event_types(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter(|l| l.starts_with("{\""))
        .filter_map(|l| serde_json::from_str::<serde_json::Value>(l).ok())
        .filter_map(|v| v["type"].as_str().map(str::to_string))
        .collect()
}

#[test]
fn test_timer_status_defaults() {
    let dir = TempDir::new().unwrap();
    let snapshot = last_json(&run_ok(dir.path(), &["timer", "status"]));
    assert_eq!(snapshot["type"], "StateSnapshot");
    assert_eq!(snapshot["phase"], "idle");
    assert_eq!(snapshot["kind"], "work");
    assert_eq!(snapshot["remaining_secs"], 25 * 60);
    assert_eq!(snapshot["clock"], "25:00");
}

#[test]
fn test_timer_start_pause_persist() {
    let dir = TempDir::new().unwrap();
    let out = run_ok(dir.path(), &["timer", "start"]);
    assert!(event_types(&out).contains(&"CountdownStarted".to_string()));
    assert_eq!(last_json(&out)["phase"], "running");

    let out = run_ok(dir.path(), &["timer", "pause"]);
    assert_eq!(last_json(&out)["phase"], "paused");

    let status = last_json(&run_ok(dir.path(), &["timer", "status"]));
    assert_eq!(status["phase"], "paused");
}

#[test]
fn test_timer_reset_records_interrupted_session() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["timer", "title", "Write report"]);
    run_ok(dir.path(), &["timer", "start"]);
    let out = run_ok(dir.path(), &["timer", "reset"]);
    assert!(event_types(&out).contains(&"SessionRecorded".to_string()));
    assert_eq!(last_json(&out)["phase"], "idle");

    let history = run_ok(dir.path(), &["history", "list", "--filter", "interrupted"]);
    let days: serde_json::Value = serde_json::from_str(&history).unwrap();
    let session = &days[0]["sessions"][0];
    assert_eq!(session["title"], "Write report");
    assert_eq!(session["record"]["is_completed"], false);
}

#[test]
fn test_timer_skip_switches_to_break() {
    let dir = TempDir::new().unwrap();
    let out = run_ok(dir.path(), &["timer", "skip"]);
    assert!(event_types(&out).contains(&"KindChanged".to_string()));
    let snapshot = last_json(&out);
    assert_eq!(snapshot["kind"], "break");
    assert_eq!(snapshot["remaining_secs"], 5 * 60);
}

#[test]
fn test_stats_daily_empty() {
    let dir = TempDir::new().unwrap();
    let out = run_ok(dir.path(), &["stats", "daily"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["report"]["basic"]["total_sessions"], 0);
    assert_eq!(json["report"]["histogram"]["type"], "hourly");
    assert_eq!(json["display"]["total_focus"], "0m");
}

#[test]
fn test_stats_monthly_has_no_goal() {
    let dir = TempDir::new().unwrap();
    let out = run_ok(dir.path(), &["stats", "monthly"]);
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!(json["report"]["goal"].is_null());
    assert_eq!(json["report"]["histogram"]["buckets"].as_array().unwrap().len(), 30);
}

#[test]
fn test_config_set_and_get() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["config", "set", "timer.focus_duration", "50"]);
    let out = run_ok(dir.path(), &["config", "get", "timer.focus_duration"]);
    assert_eq!(out.trim(), "50");

    let snapshot = last_json(&run_ok(dir.path(), &["timer", "status"]));
    assert_eq!(snapshot["remaining_secs"], 50 * 60);
}

#[test]
fn test_config_rejects_out_of_range() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "timer.focus_duration", "90"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_config_list_and_reset() {
    let dir = TempDir::new().unwrap();
    run_ok(dir.path(), &["config", "set", "ui.theme", "dark"]);
    let list: serde_json::Value =
        serde_json::from_str(&run_ok(dir.path(), &["config", "list"])).unwrap();
    assert_eq!(list["ui.theme"], "dark");

    run_ok(dir.path(), &["config", "reset"]);
    let out = run_ok(dir.path(), &["config", "get", "ui.theme"]);
    assert_eq!(out.trim(), "system");
}

#[test]
fn test_history_delete_unknown_fails() {
    let dir = TempDir::new().unwrap();
    let (_, _, code) = run_cli(
        dir.path(),
        &["history", "delete", "00000000-0000-4000-8000-000000000000"],
    );
    assert_eq!(code, 1);
}

#[test]
fn test_history_clear_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["history", "clear"]);
    assert_eq!(code, 1);
    run_ok(dir.path(), &["history", "clear", "--yes"]);
}
