//! # GPA Bot Integration Test Common Helpers
//!
//! File: bot/tests/common.rs
//!
//! Shared helpers for the integration tests in `bot/tests/`.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;

/// An `assert_cmd::Command` for the compiled `gpabot` binary.
///
/// Panics if the binary cannot be found.
pub fn gpabot_cmd() -> Command {
    Command::cargo_bin("gpabot").expect("Failed to find gpabot binary for testing")
}

/// A `gpabot` command isolated from the caller's environment: runs in `dir`,
/// with no token or port variables and with `dir` as HOME / config root so no
/// user config file is picked up.
pub fn isolated_cmd(dir: &Path) -> Command {
    let mut cmd = gpabot_cmd();
    cmd.current_dir(dir)
        .env_remove("TELEGRAM_TOKEN")
        .env_remove("PORT")
        .env_remove("GPABOT_HOST")
        .env_remove("RUST_LOG")
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir);
    cmd
}
