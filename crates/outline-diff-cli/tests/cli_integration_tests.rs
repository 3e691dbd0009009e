//! CLI integration tests
//!
//! These tests run the built `outline` binary against outline files in a
//! temporary directory.

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_outline"))
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_cli_show_prints_indented_tree() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "tree.txt", "Mail / Inbox\nMail / Sent\nNotes\n");

    let output = run(&["show", file.to_str().unwrap()]);

    assert!(
        output.status.success(),
        "show should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(stdout(&output), "Mail\n  Inbox\n  Sent\nNotes\n");
}

#[test]
fn test_cli_export_prints_slash_lines() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "tree.txt", "Mail\n  Inbox\nNotes\n");

    let output = run(&["export", file.to_str().unwrap()]);

    assert!(output.status.success());
    assert_eq!(stdout(&output), "Mail\nMail / Inbox\nNotes\n");
}

#[test]
fn test_cli_diff_json_is_edit_script() {
    let dir = TempDir::new().unwrap();
    let old = write_file(&dir, "old.txt", "A\n");
    let new = write_file(&dir, "new.txt", "A\nB\n");

    let output = run(&["diff", old.to_str().unwrap(), new.to_str().unwrap(), "--json"]);

    assert!(output.status.success());
    let script: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(script[0]["op"], "insert");
    assert_eq!(script[0]["id"], "B");
    assert_eq!(script[0]["index"], 1);
    assert!(script[0]["parent"].is_null());
}

#[test]
fn test_cli_diff_summary() {
    let dir = TempDir::new().unwrap();
    let old = write_file(&dir, "old.txt", "A\nB\n");
    let new = write_file(&dir, "new.txt", "B\nA\n");

    let output = run(&["diff", old.to_str().unwrap(), new.to_str().unwrap()]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("**Moves**: 1"));
    assert!(text.contains("1. move"));
}

#[test]
fn test_cli_reconcile_reports_kept_state() {
    let dir = TempDir::new().unwrap();
    let old = write_file(&dir, "old.txt", "A\n  A1\nB\n  B1\n");
    let new = write_file(&dir, "new.txt", "B\n  B1\n  A1\n");

    let output = run(&[
        "reconcile",
        old.to_str().unwrap(),
        new.to_str().unwrap(),
        "--select",
        "A1",
    ]);

    assert!(
        output.status.success(),
        "reconcile should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let text = stdout(&output);
    assert!(text.contains("Expanded rows kept: 1/2"));
    assert!(text.contains("Selected rows kept: 1/1"));
    assert!(text.contains("    A1 *"));
}

#[test]
fn test_cli_reports_invalid_text() {
    let dir = TempDir::new().unwrap();
    let file = write_file(&dir, "bad.txt", "  indented first\n");

    let output = run(&["show", file.to_str().unwrap()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERR_INVALID_TEXT"));
}

#[test]
fn test_cli_reports_missing_file() {
    let output = run(&["show", "/definitely/not/here.txt"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_IO"));
}
