//! # GPA Bot Error Types
//!
//! File: bot/src/core/error.rs
//!
//! ## Overview
//!
//! Error types used throughout the bot. There are two families:
//! - `GpaBotError`: application-level failures (configuration, transports).
//!   These propagate up to `main` through `anyhow` and end the process.
//! - `InputError`: a user typed something the current conversation step can't
//!   accept. These never leave the conversation engine; they are turned into a
//!   re-prompt and the session stays where it was.
//!
//! `Result<T>` is an alias for `anyhow::Result<T>` so call sites can attach
//! context with `.context(...)` the same way everywhere.
//!
//! ## Examples
//!
//! ```rust,ignore
//! let token = cfg.telegram.token.filter(|t| !t.trim().is_empty())
//!     .ok_or_else(|| GpaBotError::Config("no bot token configured".into()))?;
//! ```
//!
use thiserror::Error;

/// Application-level errors.
#[derive(Error, Debug)]
pub enum GpaBotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Liveness server error: {0}")]
    Liveness(String),

    #[error("Telegram transport error: {source}")]
    Telegram {
        #[from]
        source: teloxide::RequestError,
    },
}

/// Rejected user input. Each variant maps to one re-prompt message.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    #[error("input is not a whole number")]
    NotANumber,

    #[error("number must be greater than zero")]
    NotPositive,

    #[error("input is not a recognised letter grade")]
    UnknownGrade,
}

/// Type alias for Result using anyhow::Error.
pub type Result<T> = anyhow::Result<T>;
