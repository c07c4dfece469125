//! # GPA Bot Command Modules
//!
//! File: bot/src/commands/mod.rs
//!
//! ## Overview
//!
//! Top-level subcommands of the `gpabot` binary. Each module defines its own
//! argument struct and a `handle_*` function that `main.rs` routes to.
//!
//! - `run`: start the Telegram bot and the liveness server
//! - `calc`: run the GPA conversation in the terminal
//!

/// Console GPA calculator (`gpabot calc`).
pub mod calc;
/// Telegram bot plus liveness server (`gpabot run`).
pub mod run;
