use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../tests/fixtures").join(name)
}

#[test]
fn info_emits_stable_json_contract() {
    let output = cargo_bin_cmd!("leafturn-cli")
        .arg("info")
        .arg(fixture("small-score.json"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let mut value: Value =
        serde_json::from_slice(&output).expect("stdout should contain valid json");
    value["path"] = Value::String("<FIXTURE>".to_owned());

    insta::assert_json_snapshot!("cli_info_small_score", value);
}

#[test]
fn pages_prints_one_line_per_page() {
    cargo_bin_cmd!("leafturn-cli")
        .arg("pages")
        .arg(fixture("medium-score.json"))
        .arg("--height")
        .arg("300")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("page 1: systems 1-2")
                .and(predicate::str::contains("page 2: systems 3-4"))
                .and(predicate::str::contains("page 4:")),
        );
}

#[test]
fn narrow_viewport_splits_into_more_pages() {
    let wide = cargo_bin_cmd!("leafturn-cli")
        .arg("info")
        .arg(fixture("medium-score.json"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let narrow = cargo_bin_cmd!("leafturn-cli")
        .arg("info")
        .arg(fixture("medium-score.json"))
        .arg("--height")
        .arg("250")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let wide: Value = serde_json::from_slice(&wide).expect("valid json expected");
    let narrow: Value = serde_json::from_slice(&narrow).expect("valid json expected");

    assert!(narrow["page_count"].as_u64() > wide["page_count"].as_u64());
    assert_eq!(wide["total_systems"], narrow["total_systems"]);
}

#[test]
fn info_writes_report_file_when_output_given() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let output_path = temp.path().join("report.json");

    cargo_bin_cmd!("leafturn-cli")
        .arg("info")
        .arg(fixture("small-score.json"))
        .arg("--output")
        .arg(&output_path)
        .assert()
        .success();

    assert!(output_path.exists(), "report file should exist");

    let bytes = std::fs::read(&output_path).expect("report should be readable");
    let value: Value = serde_json::from_slice(&bytes).expect("report should be valid json");
    assert_eq!(value["total_systems"].as_u64(), Some(3));
}

#[test]
fn info_fails_for_missing_file() {
    cargo_bin_cmd!("leafturn-cli")
        .arg("info")
        .arg(fixture("missing-score.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("file does not exist"));
}

#[test]
fn info_fails_for_invalid_score() {
    cargo_bin_cmd!("leafturn-cli")
        .arg("info")
        .arg(fixture("invalid.json"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load score"));
}
