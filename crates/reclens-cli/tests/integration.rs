//! Integration tests for the reclens CLI
//!
//! These run the built binary as a subprocess against snapshot and transcript
//! fixtures written to a temp directory.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

const BIN: &str = env!("CARGO_BIN_EXE_reclens");

const SNAPSHOT: &str = r#"<!DOCTYPE html>
<html>
<head><title>Acme Payroll</title></head>
<body>
  <h1>Payroll for startups</h1>
  <p>Teams across many industries run their weekly pay cycles here.
     Every filing deadline gets tracked automatically and nothing slips
     through. Thousands of growing firms have switched over the years and
     keep renewing because the busywork simply went away for them.</p>
  <h2>FAQ</h2>
  <p>Answers to the questions founders ask most often.</p>
  <a href="/about">About</a>
  <a href="mailto:hello@acme.com">Email us</a>
</body>
</html>"#;

const CLEAR_TRANSCRIPT: &str = "\
Category/Type: Payroll software
Who it is for: Startups
What problem it solves: Manual payroll
What it offers: Automated payroll and filings
1-sentence plain summary: Runs payroll for small teams.";

fn fixture(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("reclens-test-{}-{name}", std::process::id()));
    fs::write(&path, contents).expect("failed to write fixture");
    path
}

fn run_cli(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(BIN).args(args).output().expect("failed to run CLI");
    (
        String::from_utf8(output.stdout).unwrap(),
        String::from_utf8(output.stderr).unwrap(),
        output.status.success(),
    )
}

#[test]
fn test_help() {
    let (stdout, _, success) = run_cli(&["--help"]);
    assert!(success);
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("--cold"));
    assert!(stdout.contains("--compare"));
}

#[test]
fn test_version() {
    let (stdout, _, success) = run_cli(&["--version"]);
    assert!(success);
    assert!(stdout.contains("reclens 0.1.0"));
}

#[test]
fn test_snapshot_text_report() {
    let page = fixture("page.html", SNAPSHOT);
    let (stdout, _, success) =
        run_cli(&[page.to_str().unwrap(), "--url", "https://acme.com/"]);

    assert!(success);
    assert!(stdout.contains("Score    : 50/100"));
    assert!(stdout.contains("Entity Clarity"));
    assert!(stdout.contains("Emerging option"));
    assert!(stdout.contains("Top fix"));
}

#[test]
fn test_snapshot_json_report() {
    let page = fixture("page-json.html", SNAPSHOT);
    let (stdout, _, success) =
        run_cli(&[page.to_str().unwrap(), "--url", "https://acme.com/", "--json"]);

    assert!(success);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("invalid JSON output");
    assert_eq!(parsed["status"], "ok");
    assert_eq!(parsed["score"], 50);
    assert!(parsed["breakdown"].as_array().unwrap().len() > 10);
}

#[test]
fn test_cold_transcript_report() {
    let transcript = fixture("run.txt", CLEAR_TRANSCRIPT);
    let (stdout, _, success) = run_cli(&["--cold", transcript.to_str().unwrap()]);

    assert!(success);
    assert!(stdout.contains("Clarity      : 5/5"));
}

#[test]
fn test_cold_aggregate_report() {
    let a = fixture("run-a.txt", CLEAR_TRANSCRIPT);
    let b = fixture("run-b.txt", CLEAR_TRANSCRIPT);
    let c = fixture("run-c.txt", CLEAR_TRANSCRIPT);
    let (stdout, _, success) =
        run_cli(&["--cold", a.to_str().unwrap(), b.to_str().unwrap(), c.to_str().unwrap()]);

    assert!(success);
    assert!(stdout.contains("Consistency  : Stable"));
    assert!(stdout.contains("Representative run"));
}

#[test]
fn test_compare_report() {
    let weak = fixture(
        "weak.html",
        r#"<html><head><title>Acme Payroll</title></head><body>
        <h1>Payroll for startups</h1>
        <p>Short pages still need enough body copy to count as rendered, so
        here is a paragraph describing nothing in particular at modest but
        sufficient length for the snapshot to be considered usable by the
        scanner. It keeps going a little longer than feels natural.</p>
        </body></html>"#,
    );
    let strong = fixture("strong.html", SNAPSHOT);
    let (stdout, _, success) = run_cli(&[
        weak.to_str().unwrap(),
        "--compare",
        strong.to_str().unwrap(),
        "--url",
        "https://acme.com/",
    ]);

    assert!(success);
    assert!(stdout.contains("Score delta"));
    assert!(stdout.contains("Biggest gaps:"));
}

#[test]
fn test_missing_file_fails() {
    let (_, stderr, success) = run_cli(&["/nonexistent/reclens-missing.html"]);
    assert!(!success);
    assert!(stderr.contains("failed to read"));
}

#[test]
fn test_unknown_flag_fails() {
    let (_, stderr, success) = run_cli(&["--frobnicate"]);
    assert!(!success);
    assert!(!stderr.is_empty());
}
