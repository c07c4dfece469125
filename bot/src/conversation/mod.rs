//! # Conversation Engine
//!
//! File: bot/src/conversation/mod.rs
//!
//! ## Overview
//!
//! The GPA dialogue: ask how many courses, then a grade and credit hours for
//! each, then report the credit-weighted GPA.
//!
//! ## Architecture
//!
//! - `grades`: the fixed letter-grade scale
//! - `session`: per-user conversation record and state enum
//! - `transition`: pure step function applying one input to a session
//! - `report`: GPA arithmetic
//! - `prompts`: every outbound message
//! - `engine`: the session store and the async handle shared by transports
//!
pub mod engine;
pub mod grades;
pub mod prompts;
pub mod report;
pub mod session;
pub mod transition;

#[cfg(test)]
mod proptests;

pub use engine::{ConversationEngine, Event, SessionStore, UserKey};
pub use grades::Grade;
pub use prompts::Reply;
pub use report::GpaReport;
pub use session::{ConversationState, Course, Session};
