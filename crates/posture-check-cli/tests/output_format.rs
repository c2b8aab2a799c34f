//! Output format validation tests.
//!
//! Tests JSON/JSONL output format correctness and required field presence.

#![allow(clippy::unwrap_used, clippy::expect_used, deprecated)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use posture_check_core::LandmarkSet;
use posture_check_test_support::PoseFixture;
use serde_json::Value;

/// Writes a small frame plus its landmark sidecar into `dir`.
fn write_frame_with_pose(dir: &Path, name: &str, landmarks: &LandmarkSet) -> PathBuf {
    let path = dir.join(name);
    PoseFixture::frame(64, 64).image.save(&path).unwrap();
    posture_check_adapters::save_landmark_file(&path, landmarks).unwrap();
    path
}

// === JSONL Format Tests ===

#[test]
fn test_jsonl_format_single_object_per_line() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_frame_with_pose(temp_dir.path(), "squat.png", &PoseFixture::deep_squat());

    let mut cmd = Command::cargo_bin("posture-check").unwrap();
    cmd.arg("--format").arg("jsonl").arg(temp_dir.path());

    let output = cmd.output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    // Each line should be valid JSON, objects rather than arrays
    for line in stdout.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let parsed: Value = serde_json::from_str(line).expect("valid JSON line");
        assert!(parsed.is_object(), "JSONL line should be an object");
    }
}

#[test]
fn test_jsonl_format_one_line_per_frame() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_frame_with_pose(temp_dir.path(), "a.png", &PoseFixture::deep_squat());
    write_frame_with_pose(temp_dir.path(), "b.png", &PoseFixture::shallow_squat());

    let mut cmd = Command::cargo_bin("posture-check").unwrap();
    cmd.arg("--format").arg("jsonl").arg(temp_dir.path());

    let output = cmd.output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let json_lines: Vec<_> = stdout.lines().filter(|l| !l.trim().is_empty()).collect();

    assert_eq!(json_lines.len(), 2, "Should have one line per frame");
}

#[test]
fn test_jsonl_is_the_default_format() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_frame_with_pose(temp_dir.path(), "squat.png", &PoseFixture::deep_squat());

    let mut cmd = Command::cargo_bin("posture-check").unwrap();
    cmd.arg(temp_dir.path());

    let output = cmd.output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(
        stdout.trim_start().starts_with('{'),
        "Default output should be JSONL objects, got: {stdout}"
    );
}

// === JSON Format Tests ===

#[test]
fn test_json_format_is_array() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_frame_with_pose(temp_dir.path(), "a.png", &PoseFixture::deep_squat());
    write_frame_with_pose(temp_dir.path(), "b.png", &PoseFixture::shallow_squat());

    let mut cmd = Command::cargo_bin("posture-check").unwrap();
    cmd.arg("--format").arg("json").arg(temp_dir.path());

    let output = cmd.output().unwrap();
    let parsed: Value = serde_json::from_slice(&output.stdout).expect("valid JSON document");

    let array = parsed.as_array().expect("top-level array");
    assert_eq!(array.len(), 2);
}

#[test]
fn test_json_format_empty_batch_is_empty_array() {
    let temp_dir = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("posture-check").unwrap();
    cmd.arg("--format").arg("json").arg(temp_dir.path());

    let output = cmd.output().unwrap();
    let parsed: Value = serde_json::from_slice(&output.stdout).expect("valid JSON document");

    assert_eq!(parsed, Value::Array(vec![]));
}

#[test]
fn test_pretty_json_is_indented() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_frame_with_pose(temp_dir.path(), "squat.png", &PoseFixture::deep_squat());

    let mut cmd = Command::cargo_bin("posture-check").unwrap();
    cmd.arg("--format")
        .arg("json")
        .arg("--pretty")
        .arg(temp_dir.path());

    let output = cmd.output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("\n  "), "Pretty output should be indented");
    let parsed: Value = serde_json::from_str(&stdout).expect("valid JSON document");
    assert!(parsed.is_array());
}

#[test]
fn test_compact_json_has_no_indentation() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_frame_with_pose(temp_dir.path(), "squat.png", &PoseFixture::deep_squat());

    let mut cmd = Command::cargo_bin("posture-check").unwrap();
    cmd.arg("--format").arg("json").arg(temp_dir.path());

    let output = cmd.output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.trim_start().starts_with('['));
    assert!(!stdout.contains("\n  "));
}

// === Report Field Tests ===

#[test]
fn test_report_has_required_fields() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_frame_with_pose(temp_dir.path(), "squat.png", &PoseFixture::deep_squat());

    let mut cmd = Command::cargo_bin("posture-check").unwrap();
    cmd.arg(temp_dir.path());

    let output = cmd.output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let report: Value = serde_json::from_str(stdout.lines().next().unwrap()).unwrap();

    assert!(report["path"].as_str().unwrap().ends_with("squat.png"));
    assert!(report["timestamp"].as_str().unwrap().contains('T'));
    assert_eq!(report["dimensions"]["width"].as_u64(), Some(64));
    assert_eq!(report["dimensions"]["height"].as_u64(), Some(64));
    assert_eq!(report["activity"].as_str(), Some("squat"));
    assert!(report["issues"].is_array());
    assert!(report["has_bad_posture"].is_boolean());
}

#[test]
fn test_activity_field_follows_flag() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_frame_with_pose(temp_dir.path(), "desk.png", &PoseFixture::upright_sitting());

    let mut cmd = Command::cargo_bin("posture-check").unwrap();
    cmd.arg("--activity").arg("sitting").arg(temp_dir.path());

    let output = cmd.output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let report: Value = serde_json::from_str(stdout.lines().next().unwrap()).unwrap();

    assert_eq!(report["activity"].as_str(), Some("sitting"));
}

#[test]
fn test_measured_issue_carries_angle() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_frame_with_pose(
        temp_dir.path(),
        "squat.png",
        &PoseFixture::forward_lean_squat(),
    );

    let mut cmd = Command::cargo_bin("posture-check").unwrap();
    cmd.arg(temp_dir.path());

    let output = cmd.output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let report: Value = serde_json::from_str(stdout.lines().next().unwrap()).unwrap();

    let issues = report["issues"].as_array().unwrap();
    assert!(!issues.is_empty());
    for issue in issues {
        assert!(issue["type"].is_string());
        assert!(issue["message"].is_string());
    }
    let lean = issues
        .iter()
        .find(|i| i["type"].as_str() == Some("back_too_forward"))
        .expect("back lean issue");
    assert!(lean["angle"].is_number());
}

#[test]
fn test_positional_issue_omits_angle() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_frame_with_pose(
        temp_dir.path(),
        "squat.png",
        &PoseFixture::left_knee_past_toe(),
    );

    let mut cmd = Command::cargo_bin("posture-check").unwrap();
    cmd.arg(temp_dir.path());

    let output = cmd.output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let report: Value = serde_json::from_str(stdout.lines().next().unwrap()).unwrap();

    let issues = report["issues"].as_array().unwrap();
    let knee = issues
        .iter()
        .find(|i| i["type"].as_str() == Some("left_knee_over_toe"))
        .expect("knee issue");
    assert!(knee.get("angle").is_none());
}

#[test]
fn test_annotated_image_absent_without_flag() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_frame_with_pose(temp_dir.path(), "squat.png", &PoseFixture::deep_squat());

    let mut cmd = Command::cargo_bin("posture-check").unwrap();
    cmd.arg(temp_dir.path());

    let output = cmd.output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let report: Value = serde_json::from_str(stdout.lines().next().unwrap()).unwrap();

    assert!(report.get("annotated_image").is_none());
}

#[test]
fn test_annotated_image_present_with_flag() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_frame_with_pose(temp_dir.path(), "squat.png", &PoseFixture::deep_squat());
    let annotate_dir = temp_dir.path().join("out");

    let mut cmd = Command::cargo_bin("posture-check").unwrap();
    cmd.arg("--annotate-dir")
        .arg(&annotate_dir)
        .arg(temp_dir.path());

    let output = cmd.output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let report: Value = serde_json::from_str(stdout.lines().next().unwrap()).unwrap();

    assert!(report["annotated_image"]
        .as_str()
        .unwrap()
        .ends_with("squat.annotated.png"));
}
