//! Integration tests for `fq session check`.

mod common;

use common::fq;
use predicates::prelude::*;

#[test]
fn test_valid_credentials_authenticate() {
    fq().args(["session", "check", "officer@forensiq.gov", "forensiq123"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""authenticated":true"#))
        .stdout(predicate::str::contains("Ravi Sharma"));
}

#[test]
fn test_credential_never_appears_in_output() {
    let output = fq()
        .args(["session", "check", "admin@forensiq.gov", "admin123"])
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    assert!(!stdout.contains("admin123"));
    assert!(stdout.contains("Priya Mehta"));
}

#[test]
fn test_wrong_credential_fails_without_detail() {
    let output = fq()
        .args(["session", "check", "officer@forensiq.gov", "wrong"])
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed["authenticated"], false);
    assert!(parsed.get("identity").is_none());
}

#[test]
fn test_unknown_email_fails_identically() {
    let wrong_pass = fq()
        .args(["session", "check", "officer@forensiq.gov", "bad"])
        .output()
        .unwrap();
    let unknown_email = fq()
        .args(["session", "check", "nobody@forensiq.gov", "forensiq123"])
        .output()
        .unwrap();
    // Unified failure: the two cases are indistinguishable.
    assert_eq!(wrong_pass.stdout, unknown_email.stdout);
}

#[test]
fn test_human_output_on_failure() {
    fq().args(["-H", "session", "check", "officer@forensiq.gov", "bad"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Authentication failed"));
}
