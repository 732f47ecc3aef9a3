//! CLI smoke tests
//!
//! Every test runs in its own temporary working directory so the catalog
//! and config files never leak between tests. Nothing here shells out to
//! ffmpeg; the cases stop at argument and catalog handling.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn clipcut(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("clipcut").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

#[test]
fn help_lists_all_commands() {
    let dir = TempDir::new().unwrap();
    clipcut(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("trim"))
        .stdout(predicate::str::contains("preview"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("remove"))
        .stdout(predicate::str::contains("clear"));
}

#[test]
fn list_reports_empty_catalog() {
    let dir = TempDir::new().unwrap();
    clipcut(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Catalog is empty"));
}

#[test]
fn list_json_emits_empty_array() {
    let dir = TempDir::new().unwrap();
    clipcut(&dir)
        .args(["list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[]"));
}

#[test]
fn remove_of_absent_id_succeeds() {
    let dir = TempDir::new().unwrap();
    clipcut(&dir)
        .args(["remove", "--id", "clip_000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed clip_000"));
}

#[test]
fn clear_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    clipcut(&dir)
        .arg("clear")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn clear_with_confirmation_succeeds_on_empty_catalog() {
    let dir = TempDir::new().unwrap();
    clipcut(&dir)
        .args(["clear", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Catalog cleared"));
}

#[test]
fn trim_rejects_malformed_time() {
    let dir = TempDir::new().unwrap();
    clipcut(&dir)
        .args(["trim", "--input", "video.mp4", "--start", "abc", "--end", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid start time"));
}

#[test]
fn trim_requires_input_argument() {
    let dir = TempDir::new().unwrap();
    clipcut(&dir)
        .args(["trim", "--start", "0", "--end", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--input"));
}
