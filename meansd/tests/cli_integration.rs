//! Integration tests for meansd CLI

use std::path::{Path, PathBuf};
use std::process::Command;

use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

fn run_meansd(args: &[&str]) -> (String, String, bool) {
    let mut cmd_args = vec!["run", "-p", "meansd", "--"];
    cmd_args.extend(args);

    let output = Command::new("cargo")
        .args(&cmd_args)
        .current_dir(env!("CARGO_MANIFEST_DIR").to_string() + "/..")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

/// Write a two-sheet workbook (Mean, SD) into a fresh temp dir.
fn fixture() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("stats.xlsx");

    let mut workbook = Workbook::new();
    for (name, haem, breast) in [("Mean", 12.0, 8.5), ("SD", 3.0, 1.25)] {
        let sheet = workbook.add_worksheet();
        sheet.set_name(name).unwrap();
        sheet.write_string(0, 0, "Sheet").unwrap();
        sheet.write_string(0, 1, "FIRST_VISIT_TO_ACCEPT").unwrap();
        sheet.write_string(1, 0, "Haematological").unwrap();
        sheet.write_number(1, 1, haem).unwrap();
        sheet.write_string(2, 0, "Breast").unwrap();
        sheet.write_number(2, 1, breast).unwrap();
        sheet.write_string(3, 0, "Non-specific").unwrap();
        sheet.write_string(3, 1, "pending").unwrap();
    }
    workbook.save(&path).expect("Failed to write fixture");

    (dir, path)
}

fn arg(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

#[test]
fn test_cli_help() {
    let (stdout, _, success) = run_meansd(&["--help"]);

    assert!(success);
    assert!(stdout.contains("meansd"));
    assert!(stdout.contains("--mean"));
    assert!(stdout.contains("--sd"));
    assert!(stdout.contains("--decimals"));
    assert!(stdout.contains("--output"));
}

#[test]
fn test_cli_version() {
    let (stdout, _, success) = run_meansd(&["--version"]);

    assert!(success);
    assert!(stdout.contains("meansd"));
}

#[test]
fn test_table_output() {
    let (_dir, path) = fixture();
    let (stdout, stderr, success) = run_meansd(&[&arg(&path), "--output", "text"]);

    assert!(success, "stderr: {stderr}");
    assert!(stdout.contains("Category"));
    assert!(stdout.contains("First visit to acceptance"));
    assert!(stdout.contains("Haematological"));
    assert!(stdout.contains("12 (3)"));
    assert!(stdout.contains("Retinoblastoma"));
    assert!(stdout.contains('\u{2013}'));
    // "pending" is not a number
    assert!(stderr.contains("warning:"));
}

#[test]
fn test_decimals_flag() {
    let (_dir, path) = fixture();
    let (stdout, _, success) = run_meansd(&[&arg(&path), "--output", "text", "-d", "1"]);

    assert!(success);
    assert!(stdout.contains("8.5 (1.3)"));
}

#[test]
fn test_json_output() {
    let (_dir, path) = fixture();
    let (stdout, _, success) = run_meansd(&[&arg(&path), "--output", "json"]);

    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    assert_eq!(parsed["table"]["headers"][0], "Category");
    assert_eq!(parsed["table"]["rows"].as_array().unwrap().len(), 12);
    assert_eq!(parsed["table"]["rows"][0]["category"], "Haematological");
    assert_eq!(parsed["table"]["rows"][0]["values"][0], "12 (3)");
    assert!(parsed["notices"]
        .as_array()
        .unwrap()
        .iter()
        .any(|n| n["kind"] == "parse_warning"));
}

#[test]
fn test_csv_output() {
    let (_dir, path) = fixture();
    let (stdout, _, success) = run_meansd(&[&arg(&path), "--csv"]);

    assert!(success);
    let mut lines = stdout.lines();
    assert!(lines.next().unwrap().starts_with("Category,First visit to acceptance"));
    assert!(lines.next().unwrap().starts_with("Haematological,12 (3)"));
    assert_eq!(stdout.lines().count(), 13);
}

#[test]
fn test_build_subcommand() {
    let (_dir, path) = fixture();
    let (stdout, _, success) = run_meansd(&[
        "build",
        &arg(&path),
        "--mean",
        "Mean",
        "--sd",
        "SD",
        "--output",
        "text",
    ]);

    assert!(success);
    assert!(stdout.contains("12 (3)"));
}

#[test]
fn test_write_xlsx() {
    let (dir, path) = fixture();
    let out = dir.path().join("Mean_SD_Table.xlsx");
    let (_, stderr, success) = run_meansd(&[&arg(&path), "--csv", "--write", &arg(&out)]);

    assert!(success);
    assert!(out.exists());
    assert!(stderr.contains("Wrote"));

    let (stdout, _, success) = run_meansd(&["sheets", &arg(&out)]);
    assert!(success);
    assert_eq!(stdout.trim(), "Mean_SD_Table");
}

#[test]
fn test_sheets_command() {
    let (_dir, path) = fixture();
    let (stdout, _, success) = run_meansd(&["sheets", &arg(&path)]);

    assert!(success);
    assert_eq!(stdout.lines().collect::<Vec<_>>(), vec!["Mean", "SD"]);
}

#[test]
fn test_sheets_json_output() {
    let (_dir, path) = fixture();
    let (stdout, _, success) = run_meansd(&["sheets", &arg(&path), "--output", "json"]);

    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    assert_eq!(parsed["sheets"], serde_json::json!(["Mean", "SD"]));
}

#[test]
fn test_preview_command() {
    let (_dir, path) = fixture();
    let (stdout, _, success) =
        run_meansd(&["preview", &arg(&path), "Mean", "--rows", "1", "--output", "text"]);

    assert!(success);
    assert!(stdout.contains("FIRST_VISIT_TO_ACCEPT"));
    assert!(stdout.contains("Haematological"));
    assert!(!stdout.contains("Breast"));
}

#[test]
fn test_unknown_sheet() {
    let (_dir, path) = fixture();
    let (_, stderr, success) = run_meansd(&[&arg(&path), "--mean", "Nope"]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("Nope"));
}

#[test]
fn test_invalid_path() {
    let (_, stderr, success) = run_meansd(&["/nonexistent/stats.xlsx"]);

    assert!(!success);
    assert!(stderr.contains("Error:"));
}
