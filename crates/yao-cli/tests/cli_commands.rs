//! End-to-end tests of the yao CLI binary.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PILLARS: &str = "甲子 丙寅 甲子 甲子";

fn yao() -> Command {
    Command::cargo_bin("yao").unwrap()
}

// ---------------------------------------------------------------------------
// cast
// ---------------------------------------------------------------------------

#[test]
fn cast_number_prints_tally() {
    yao()
        .args(["cast", "number", "7", "8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("886887").and(predicate::str::contains("老阴")));
}

#[test]
fn cast_random_is_seeded() {
    let first = yao()
        .args(["cast", "random", "--seed", "11"])
        .output()
        .unwrap();
    let second = yao()
        .args(["cast", "random", "--seed", "11"])
        .output()
        .unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn cast_coins_accepts_faces() {
    yao()
        .args(["cast", "coin", "htt", "1", "1", "1", "1", "1"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("  877777"));
}

#[test]
fn cast_rejects_unknown_mode() {
    yao()
        .args(["cast", "tarot"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: unknown mode"));
}

#[test]
fn cast_rejects_short_coin_list() {
    yao()
        .args(["cast", "coin", "1", "2", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 6 coin throws"));
}

// ---------------------------------------------------------------------------
// analyze
// ---------------------------------------------------------------------------

#[test]
fn analyze_renders_tables() {
    yao()
        .args(["analyze", "886887", "--pillars", PILLARS, "-q", "财运"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("山地剥（乾宫五世）")
                .and(predicate::str::contains("艮为山"))
                .and(predicate::str::contains("用神体系")),
        );
}

#[test]
fn analyze_header_and_harmony_element() {
    yao()
        .args(["analyze", "886887", "--pillars", PILLARS])
        .assert()
        .success()
        .stdout(predicate::str::contains("上艮山 下坤地").and(predicate::str::contains("世在5爻")));

    // 丑 month harmonizes the 子 line of 乾为天 into earth.
    yao()
        .args(["analyze", "777777", "--pillars", "甲子 丁丑 甲子 甲子"])
        .assert()
        .success()
        .stdout(predicate::str::contains("合土"));
}

#[test]
fn analyze_json_output() {
    let output = yao()
        .args(["analyze", "777777", "--pillars", PILLARS, "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["base"]["name"], "乾为天");
    assert_eq!(report["structures"]["six_clash"]["is_full"], true);
    assert!(report["transformed"].is_null());
}

#[test]
fn analyze_with_builtin_calendar() {
    let output = yao()
        .args(["analyze", "777777", "--at", "2000-01-01T12:00", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["time"]["day"]["stem"], "Wu");
    assert_eq!(report["time"]["day"]["branch"], "Wu");
}

#[test]
fn analyze_rejects_bad_digits() {
    yao()
        .args(["analyze", "786", "--pillars", PILLARS])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 6 line digits"));
}

#[test]
fn analyze_rejects_bad_pillars() {
    yao()
        .args(["analyze", "777777", "--pillars", "甲丑 丙寅 甲子 甲子"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid pillars"));
}

#[test]
fn analyze_out_of_range_year() {
    yao()
        .args(["analyze", "777777", "--at", "1850-06-01T10:00"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside the supported range"));
}

// ---------------------------------------------------------------------------
// divine
// ---------------------------------------------------------------------------

#[test]
fn divine_number_json() {
    let output = yao()
        .args([
            "divine", "number", "7", "8", "--pillars", PILLARS, "-q", "工作", "--json",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["classification"]["category"], "career");
    assert_eq!(report["classification"]["relation"], "Officer");
    assert_eq!(report["transformed"]["name"], "艮为山");
}

#[test]
fn divine_time_mode_uses_at() {
    yao()
        .args(["divine", "time", "--at", "2024-03-15T09:30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("本卦"));
}

// ---------------------------------------------------------------------------
// request
// ---------------------------------------------------------------------------

#[test]
fn request_with_lines() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("req.json");
    fs::write(
        &path,
        r#"{
    "lines": ["YoungYin", "YoungYin", "OldYin", "YoungYin", "YoungYin", "YoungYang"],
    "question": "考试",
    "when": "2024-03-15T09:30:00"
}"#,
    )
    .unwrap();

    yao()
        .args(["request", path.to_str().unwrap(), "--pillars", PILLARS])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"山地剥\"").and(predicate::str::contains("\"study\"")));
}

#[test]
fn request_with_cast_mode() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("req.json");
    fs::write(
        &path,
        r#"{"mode": "coin", "coin_throws": [1, 1, 1, 1, 1, 1], "question": "", "when": "2024-03-15T09:30:00"}"#,
    )
    .unwrap();

    yao()
        .args(["request", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"乾为天\""));
}

#[test]
fn request_reports_structured_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("req.json");
    fs::write(
        &path,
        r#"{"mode": "number", "number_pair": [0, 3], "when": "2024-03-15T09:30:00"}"#,
    )
    .unwrap();

    yao()
        .args(["request", path.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"kind\": \"InvalidCast\""))
        .stderr(predicate::str::contains("error: invalid cast"));
}

#[test]
fn request_without_timestamp_is_invalid_request() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("req.json");
    fs::write(&path, r#"{"lines": ["YoungYang"]}"#).unwrap();

    yao()
        .args(["request", path.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("\"kind\": \"InvalidRequest\""))
        .stderr(predicate::str::contains("error: invalid request"));
}

#[test]
fn request_missing_file() {
    yao()
        .args(["request", "/nonexistent/req.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}
