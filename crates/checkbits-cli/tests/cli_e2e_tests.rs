//! End-to-end tests for the `checkbits` binary.
//!
//! These tests exercise the compiled binary with assert_cmd against
//! temporary trees built with `TestArchive`.

use assert_cmd::Command;
use checkbits_test_utils::TestArchive;
use predicates::prelude::*;
use std::fs;

/// Get a Command for the checkbits binary
fn checkbits_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("checkbits"));
    cmd.env("NO_COLOR", "1").env_remove("CHECKBITS_MAX_FILES");
    cmd
}

fn sample_archive() -> TestArchive {
    let archive = TestArchive::new();
    archive.write("a.txt", b"alpha");
    archive.write("photos/b.jpg", b"jpeg bytes");
    archive.write("photos/c.jpg", b"more jpeg bytes");
    archive
}

fn manifest_json(archive: &TestArchive) -> serde_json::Value {
    let bytes = fs::read(archive.path(".checkbits.json")).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// ============================================================================
// Help and Version Tests
// ============================================================================

#[test]
fn test_help_output() {
    checkbits_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("silent corruption"))
        .stdout(predicate::str::contains("--max-files"));
}

#[test]
fn test_version_output() {
    checkbits_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("checkbits"));
}

#[test]
fn test_missing_root_argument() {
    checkbits_cmd().assert().failure();
}

// ============================================================================
// Fatal Errors
// ============================================================================

#[test]
fn test_nonexistent_root_exits_one() {
    let archive = TestArchive::new();
    checkbits_cmd()
        .arg(archive.path("missing"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_file_as_root_exits_one() {
    let archive = TestArchive::new();
    archive.write("plain.txt", b"x");
    checkbits_cmd()
        .arg(archive.path("plain.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn test_malformed_settings_file_exits_one() {
    let archive = sample_archive();
    archive.write(".checkbits.toml", b"max_file_size = \"big\"\n");
    checkbits_cmd().arg(archive.root()).assert().code(1);
    archive.assert_file_not_exists(".checkbits.json");
}

// ============================================================================
// Verification Runs
// ============================================================================

#[test]
fn test_first_run_reports_new_files() {
    let archive = sample_archive();

    checkbits_cmd()
        .arg(archive.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking"))
        .stdout(predicate::str::contains("new"))
        .stdout(predicate::str::contains("photos/b.jpg"))
        .stdout(predicate::str::contains("No corruption detected"));

    let manifest = manifest_json(&archive);
    assert_eq!(manifest["version"], 1);
    assert_eq!(manifest["entries"].as_object().unwrap().len(), 3);
}

#[test]
fn test_second_run_verifies() {
    let archive = sample_archive();
    checkbits_cmd().arg(archive.root()).assert().success();

    checkbits_cmd()
        .arg(archive.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("verified"));
}

#[test]
fn test_quiet_hides_verified_lines() {
    let archive = sample_archive();
    checkbits_cmd().arg(archive.root()).assert().success();

    checkbits_cmd()
        .arg("--quiet")
        .arg(archive.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("verified a.txt").not());
}

#[test]
fn test_corruption_is_reported_with_success_status() {
    let archive = sample_archive();
    checkbits_cmd().arg(archive.root()).assert().success();
    archive.tamper("photos/b.jpg", b"jpeg bytez");

    checkbits_cmd()
        .arg(archive.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("CORRUPTED"))
        .stdout(predicate::str::contains("Corrupted files"))
        .stdout(predicate::str::contains("1 corrupted file(s) found"));
}

#[test]
fn test_edit_is_reported_as_changed() {
    let archive = sample_archive();
    checkbits_cmd().arg(archive.root()).assert().success();
    archive.edit("a.txt", b"alpha v2");

    checkbits_cmd()
        .arg(archive.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("changed"))
        .stdout(predicate::str::contains("No corruption detected"));
}

#[test]
fn test_accept_policy_clears_corruption_on_next_run() {
    let archive = sample_archive();
    checkbits_cmd().arg(archive.root()).assert().success();
    archive.tamper("a.txt", b"alphA");

    checkbits_cmd()
        .args(["--corruption-policy", "accept"])
        .arg(archive.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("CORRUPTED"));

    checkbits_cmd()
        .arg(archive.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("CORRUPTED").not());
}

#[test]
fn test_oversized_file_is_skipped() {
    let archive = sample_archive();
    archive.write(".checkbits.toml", b"max_file_size = 12\n");

    checkbits_cmd()
        .arg(archive.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("skip"))
        .stdout(predicate::str::contains("photos/c.jpg"));

    let manifest = manifest_json(&archive);
    assert!(manifest["entries"].get("photos/c.jpg").is_none());
}

#[test]
fn test_json_lists_skip_reason() {
    let archive = sample_archive();
    archive.write(".checkbits.toml", b"max_file_size = 12\n");

    let output = checkbits_cmd()
        .arg("--json")
        .arg(archive.root())
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let skipped = &report["report"]["skipped"][0];
    assert_eq!(skipped["path"], "photos/c.jpg");
    assert_eq!(skipped["reason"], "oversized");
    assert_eq!(skipped["size"], 15);
}

#[test]
fn test_budget_limits_files_checked() {
    let archive = sample_archive();

    checkbits_cmd()
        .args(["--max-files", "1"])
        .arg(archive.root())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Budget reached"));

    let manifest = manifest_json(&archive);
    assert_eq!(manifest["entries"].as_object().unwrap().len(), 1);
}

// ============================================================================
// JSON Output
// ============================================================================

#[test]
fn test_json_output() {
    let archive = sample_archive();
    checkbits_cmd().arg(archive.root()).assert().success();
    archive.tamper("a.txt", b"alphX");

    let output = checkbits_cmd()
        .arg("--json")
        .arg(archive.root())
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["source"], "primary");
    assert_eq!(report["entries"], 3);
    assert_eq!(report["report"]["total"], 3);
    assert_eq!(report["report"]["verified"], 2);
    assert_eq!(report["report"]["outcome"]["status"], "completed");
    assert_eq!(
        report["report"]["anomalies"]["corrupted"][0]["path"],
        "a.txt"
    );
}
