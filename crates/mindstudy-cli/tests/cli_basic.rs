//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Only
//! offline commands are exercised; everything runs against the dev data
//! directory.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "mindstudy-cli", "--"])
        .args(args)
        .env("MINDSTUDY_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_timer_presets() {
    let (stdout, _, code) = run_cli(&["timer", "presets"]);
    assert_eq!(code, 0, "timer presets failed");
    assert!(stdout.contains("Pomodoro"));
    assert!(stdout.contains("45m study / 10m break"));
    assert!(stdout.contains("Flow"));
}

#[test]
fn test_relax_lists_activities() {
    let (stdout, _, code) = run_cli(&["relax"]);
    assert_eq!(code, 0, "relax failed");
    assert!(stdout.contains("Swimming"));
    assert!(stdout.contains("Listening to music"));
}

#[test]
fn test_profile_set_show_clear() {
    let (stdout, _, code) = run_cli(&["profile", "set", "Linh", "linh@example.com"]);
    assert_eq!(code, 0, "profile set failed");
    assert!(stdout.contains("welcome, Linh!"));

    let (stdout, _, code) = run_cli(&["profile", "show"]);
    assert_eq!(code, 0, "profile show failed");
    assert!(stdout.contains("Linh <linh@example.com>"));

    let (_, _, code) = run_cli(&["profile", "clear"]);
    assert_eq!(code, 0, "profile clear failed");
}

#[test]
fn test_config_list_is_valid_json() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "config list failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("config list output");
    assert!(parsed.get("timer").is_some());
    assert!(parsed.get("ai").is_some());
}

#[test]
fn test_config_get_default() {
    let (stdout, _, code) = run_cli(&["config", "get", "ai.voice"]);
    assert_eq!(code, 0, "config get failed");
    assert_eq!(stdout.trim(), "Kore");
}

#[test]
fn test_chat_without_api_key_reports_error() {
    let output = Command::new("cargo")
        .args(["run", "-p", "mindstudy-cli", "--", "chat", "hello"])
        .env("MINDSTUDY_ENV", "dev")
        .env_remove("GEMINI_API_KEY")
        .output()
        .expect("Failed to execute CLI command");
    assert_ne!(output.status.code().unwrap_or(-1), 0);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("GEMINI_API_KEY"));
}
