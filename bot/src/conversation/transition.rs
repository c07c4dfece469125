//! # Conversation Transitions
//!
//! File: bot/src/conversation/transition.rs
//!
//! ## Overview
//!
//! The step function of the GPA dialogue. Given a session and one line of user
//! text it validates the input, updates the session and returns the single
//! reply to send. It performs no I/O, so every path is unit-testable.
//!
//! ```text
//! AwaitingCourseCount --n>0--> AwaitingGrade --grade--> AwaitingCredits{grade}
//!                                   ^                          |
//!                                   +---- credits>0, more -----+
//!                                                              |
//!                              Terminal <--- credits>0, last --+
//! ```
//!
//! Rejected input leaves the session untouched and yields an error reply.
//!
use tracing::debug;

use super::grades::Grade;
use super::prompts::{self, Reply};
use super::report::GpaReport;
use super::session::{ConversationState, Course, Session};
use crate::core::error::InputError;

/// Parses a strictly positive whole number, trimming surrounding whitespace.
///
/// Signs are accepted so that `-3` is reported as non-positive rather than as
/// not a number. Values too large for `u32` count as not a number.
pub fn parse_positive(text: &str) -> Result<u32, InputError> {
    let value: i64 = text.trim().parse().map_err(|_| InputError::NotANumber)?;
    if value <= 0 {
        return Err(InputError::NotPositive);
    }
    u32::try_from(value).map_err(|_| InputError::NotANumber)
}

/// Applies one line of user text to `session` and returns the reply.
///
/// Terminal sessions are left alone and answered with the idle hint; the
/// engine normally drops them before that can happen.
pub fn apply_text(session: &mut Session, text: &str) -> Reply {
    match session.state {
        ConversationState::AwaitingCourseCount => match parse_positive(text) {
            Ok(total) => {
                session.total_courses = total;
                session.current_course = 1;
                session.courses.clear();
                session.state = ConversationState::AwaitingGrade;
                prompts::course_count_accepted(total)
            }
            Err(err) => {
                debug!(input = text, %err, "course count rejected");
                prompts::course_count_rejected(err)
            }
        },

        ConversationState::AwaitingGrade => match text.parse::<Grade>() {
            Ok(grade) => {
                session.state = ConversationState::AwaitingCredits { grade };
                prompts::grade_accepted(grade)
            }
            Err(err) => {
                debug!(input = text, %err, "grade rejected");
                prompts::grade_rejected()
            }
        },

        ConversationState::AwaitingCredits { grade } => match parse_positive(text) {
            Ok(credits) => {
                session.courses.push(Course { grade, credits });
                if session.current_course < session.total_courses {
                    session.current_course += 1;
                    session.state = ConversationState::AwaitingGrade;
                    prompts::next_grade(session.current_course)
                } else {
                    session.state = ConversationState::Terminal;
                    prompts::final_report(&GpaReport::from_courses(&session.courses))
                }
            }
            Err(err) => {
                debug!(input = text, %err, "credit hours rejected");
                prompts::credits_rejected(err)
            }
        },

        ConversationState::Terminal => prompts::idle_hint(),
    }
}

/// Ends the conversation on request.
pub fn cancel(session: &mut Session) -> Reply {
    session.state = ConversationState::Terminal;
    prompts::cancelled()
}
