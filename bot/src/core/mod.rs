//! # GPA Bot Core Infrastructure
//!
//! File: bot/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces shared by the commands and transports:
//! - `config`: configuration loading, merging and validation
//! - `error`: error types and the crate-wide `Result` alias
//! - `shutdown`: the process-level shutdown signal
//!
pub mod config;
pub mod error;
pub mod shutdown;
