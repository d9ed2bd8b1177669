//! End-to-end tests for the `stamps` binary.

mod common;

use assert_cmd::Command;
use image::GenericImageView;
use predicates::prelude::*;
use tempfile::TempDir;

use common::{open_profile_zip, write_png, write_stamps};

fn stamps_cmd() -> Command {
    let mut cmd = Command::cargo_bin("stamps").unwrap();
    // Keep the ambient environment from steering defaults
    cmd.env_remove("STAMPS_DIR").env_remove("STAMPS_FORMAT");
    cmd
}

#[test]
fn bare_invocation_prints_quick_start() {
    stamps_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("QUICK START"));
}

#[test]
fn robot_quick_start_is_json() {
    let output = stamps_cmd().arg("--robot").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["tool"], "stamps");
}

#[test]
fn version_prints_build_info() {
    stamps_cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("stamps 0.1.0"));
}

#[test]
fn profile_builds_archive_from_library() {
    let stamps_dir = TempDir::new().unwrap();
    write_stamps(stamps_dir.path(), 1..=3);
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("cli.ulanziDeckProfile");

    stamps_cmd()
        .arg("profile")
        .arg(&output)
        .arg("--stamps-dir")
        .arg(stamps_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated Ulanzi profile"))
        .stdout(predicate::str::contains("Ctrl+Shift+Alt+A-C"));

    let mut archive = open_profile_zip(&output);
    // root manifest + icon + page manifest + 3 thumbnails
    assert_eq!(archive.len(), 6);
    let _ = archive.by_index(0).unwrap();
}

#[test]
fn profile_robot_mode_reports_summary() {
    let stamps_dir = TempDir::new().unwrap();
    write_stamps(stamps_dir.path(), 1..=2);
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("cli.ulanziDeckProfile");

    let assert = stamps_cmd()
        .arg("--robot")
        .arg("profile")
        .arg(&output)
        .arg("--stamps-dir")
        .arg(stamps_dir.path())
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["placed"], 2);
    assert_eq!(value["discovered"], 2);
    assert_eq!(value["last_hotkey_letter"], "B");
}

#[test]
fn profile_fails_on_empty_library() {
    let stamps_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("cli.ulanziDeckProfile");

    stamps_cmd()
        .arg("profile")
        .arg(&output)
        .arg("--stamps-dir")
        .arg(stamps_dir.path())
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No stamp images found"));

    assert!(!output.exists());
}

#[test]
fn profile_robot_error_is_json() {
    let stamps_dir = TempDir::new().unwrap();
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("cli.ulanziDeckProfile");

    // --quiet keeps JSON log lines off stderr so only the error object remains
    let assert = stamps_cmd()
        .arg("--robot")
        .arg("--quiet")
        .arg("profile")
        .arg(&output)
        .arg("--stamps-dir")
        .arg(stamps_dir.path())
        .assert()
        .failure();

    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stderr).unwrap();
    assert_eq!(value["error"], true);
    assert_eq!(value["recoverable"], true);
}

#[test]
fn profile_honors_layout_overrides() {
    let stamps_dir = TempDir::new().unwrap();
    write_stamps(stamps_dir.path(), 1..=5);
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("cli.ulanziDeckProfile");
    let layout = out_dir.path().join("layout.toml");
    std::fs::write(&layout, "max_actions = 2\n").unwrap();

    let assert = stamps_cmd()
        .arg("--robot")
        .arg("profile")
        .arg(&output)
        .arg("--stamps-dir")
        .arg(stamps_dir.path())
        .arg("--layout")
        .arg(&layout)
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["placed"], 2);
    assert_eq!(value["dropped"], 3);
}

#[test]
fn resize_reports_old_and_new_dimensions() {
    let tmp = TempDir::new().unwrap();
    let img = tmp.path().join("wide.png");
    write_png(&img, 100, 50, [10, 20, 30, 255]);

    stamps_cmd()
        .arg("resize")
        .arg(&img)
        .arg("--height")
        .arg("25")
        .assert()
        .success()
        .stdout(predicate::str::contains("Current size: 100x50"))
        .stdout(predicate::str::contains("Resized to: 50x25"));

    let resized = image::open(&img).unwrap();
    assert_eq!((resized.width(), resized.height()), (50, 25));
}

#[test]
fn import_normalizes_into_library() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("new-stamp.png");
    write_png(&src, 300, 200, [90, 10, 200, 255]);
    let library = tmp.path().join("stamps");

    stamps_cmd()
        .arg("import")
        .arg("3")
        .arg(&src)
        .arg("--stamps-dir")
        .arg(&library)
        .arg("--size")
        .arg("64")
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved stamp 3"));

    let stored = image::open(library.join("3.png")).unwrap();
    assert_eq!((stored.width(), stored.height()), (64, 64));
}

#[test]
fn import_rejects_non_positive_index() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("new-stamp.png");
    write_png(&src, 32, 32, [1, 2, 3, 255]);

    stamps_cmd()
        .arg("import")
        .arg("0")
        .arg(&src)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid stamp index"));
}

#[test]
fn completions_emit_shell_script() {
    stamps_cmd()
        .arg("completions")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("stamps"));
}
