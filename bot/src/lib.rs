//! # GPA Bot
//!
//! File: bot/src/lib.rs
//!
//! ## Overview
//!
//! A Telegram bot that asks how many courses you took, collects a letter grade
//! and credit hours for each, and reports your credit-weighted GPA. A small
//! HTTP endpoint answers uptime monitors while the bot runs.
//!
//! ## Architecture
//!
//! - `conversation`: the dialogue state machine, grade table and GPA report
//! - `telegram`: teloxide dispatcher feeding messages to the engine
//! - `liveness`: Axum server returning a fixed "alive" response
//! - `commands`: `run` and `calc` subcommands
//! - `core`: configuration, errors and shutdown signalling
//!
pub mod commands;
pub mod conversation;
pub mod core;
pub mod liveness;
pub mod telegram;
