//! Smoke tests for the Forensiq CLI.
//!
//! These tests verify basic CLI functionality:
//! - `fq --version` outputs version info
//! - `fq --help` outputs help text
//! - `fq` (no args) outputs valid JSON

mod common;

use common::fq;
use predicates::prelude::*;

#[test]
fn test_version_flag() {
    fq().arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fq"))
        .stdout(predicate::str::contains("0.3.1"));
}

#[test]
fn test_help_flag() {
    fq().arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("Options:"));
}

#[test]
fn test_help_flag_short() {
    fq().arg("-h").assert().success().stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_no_args_outputs_stats_json() {
    let output = fq().assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed["nodes"].as_u64().unwrap() > 0);
    assert!(parsed["records"].as_u64().unwrap() >= 3);
}

#[test]
fn test_human_readable_flag() {
    fq().arg("-H")
        .assert()
        .success()
        .stdout(predicate::str::contains("Entities:"));
}

#[test]
fn test_invalid_command() {
    fq().arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_build_info() {
    fq().args(["system", "build-info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("version"))
        .stdout(predicate::str::contains("commit"));
}
