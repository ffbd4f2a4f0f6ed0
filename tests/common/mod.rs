//! Common test utilities for forensiq integration tests.
//!
//! Provides an `fq()` command factory that isolates each invocation from
//! the user's real `~/.config/forensiq/config.toml` via the `FQ_CONFIG`
//! environment variable, making tests parallel-safe.

#![allow(dead_code)]

use assert_cmd::Command;

/// Get a Command for the fq binary with config isolation.
pub fn fq() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_fq"));
    // Point at a path that never exists so the built-in defaults apply.
    cmd.env("FQ_CONFIG", "/nonexistent/forensiq-test-config.toml");
    cmd.env_remove("FQ_LOG");
    cmd
}
