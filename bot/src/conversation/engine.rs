//! # Conversation Engine
//!
//! File: bot/src/conversation/engine.rs
//!
//! ## Overview
//!
//! Owns the map of active sessions and routes each inbound event to the right
//! one. The engine is transport-agnostic: the Telegram dispatcher and the
//! console calculator both turn what they receive into an `Event` and send
//! back whatever `Reply` comes out.
//!
//! ## Session lifecycle
//!
//! - `Event::Start` creates a session, replacing any existing one.
//! - `Event::Text` advances the caller's session; without one it gets a hint.
//! - `Event::Cancel` removes the session.
//! - A session that reaches `Terminal` is removed right after its final reply.
//!
//! The store lock is a plain `std::sync::Mutex` held only for the synchronous
//! transition, never across an `.await`; replies are sent after it is released.
//!
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::info;

use super::prompts::{self, Reply};
use super::session::Session;
use super::transition;

/// Identity of a conversing user (the Telegram user id, or a fixed id in the
/// console calculator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserKey(pub u64);

/// Something a user did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// `/start`. `mention` is the HTML used to greet the user.
    Start { mention: String },
    /// `/cancel`.
    Cancel,
    /// `/help`.
    Help,
    /// Free text.
    Text(String),
}

/// Active sessions keyed by user.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<UserKey, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user: UserKey) -> Option<&Session> {
        self.sessions.get(&user)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Applies `event` for `user`, returning the reply to send.
    pub fn dispatch(&mut self, user: UserKey, event: Event) -> Reply {
        match event {
            Event::Start { mention } => {
                if self.sessions.insert(user, Session::new()).is_some() {
                    info!(user = user.0, "session restarted");
                } else {
                    info!(user = user.0, "session started");
                }
                prompts::greeting(&mention)
            }

            Event::Cancel => match self.sessions.remove(&user) {
                Some(mut session) => {
                    info!(user = user.0, "session cancelled");
                    transition::cancel(&mut session)
                }
                None => prompts::nothing_to_cancel(),
            },

            Event::Help => prompts::help(),

            Event::Text(text) => {
                let Some(session) = self.sessions.get_mut(&user) else {
                    return prompts::idle_hint();
                };
                let reply = transition::apply_text(session, &text);
                if session.is_terminal() {
                    info!(
                        user = user.0,
                        courses = session.courses().len(),
                        "session completed"
                    );
                    self.sessions.remove(&user);
                }
                reply
            }
        }
    }
}

/// Shared handle used by the transports.
#[derive(Debug, Default)]
pub struct ConversationEngine {
    store: Mutex<SessionStore>,
}

impl ConversationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self, user: UserKey, event: Event) -> Reply {
        self.store().dispatch(user, event)
    }

    /// Number of conversations currently in progress.
    pub fn active_sessions(&self) -> usize {
        self.store().len()
    }

    /// Snapshot of `user`'s session, if one is active.
    pub fn session(&self, user: UserKey) -> Option<Session> {
        self.store().get(user).cloned()
    }

    // Every transition leaves the map consistent, so a poisoned lock is still usable.
    fn store(&self) -> MutexGuard<'_, SessionStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
