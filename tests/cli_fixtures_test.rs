//! Integration tests for `fq fixtures`.

mod common;

use common::fq;
use predicates::prelude::*;

#[test]
fn test_validate_passes_on_embedded_fixtures() {
    fq().args(["fixtures", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""valid":true"#));
}

#[test]
fn test_validate_human_output() {
    fq().args(["-H", "fixtures", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fixtures OK"));
}

#[test]
fn test_stats_counts_are_consistent() {
    let output = fq().args(["fixtures", "stats"]).assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed["nodes"].as_u64().unwrap() >= 2);
    assert!(parsed["edges"].as_u64().unwrap() >= 1);
    assert_eq!(parsed["storylines"].as_u64().unwrap(), 2);
    assert!(parsed["events"].as_u64().unwrap() > 0);
    assert!(parsed["anomalies"].as_u64().unwrap() > 0);
}
