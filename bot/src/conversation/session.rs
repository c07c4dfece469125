//! # Conversation Session
//!
//! File: bot/src/conversation/session.rs
//!
//! Per-user record of an in-progress GPA calculation.
//!
use super::grades::Grade;

/// The step a conversation is waiting on.
///
/// The grade collected in the grade step travels inside `AwaitingCredits`, so
/// credits can never be recorded without one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    AwaitingCourseCount,
    AwaitingGrade,
    AwaitingCredits { grade: Grade },
    Terminal,
}

/// One completed course entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Course {
    pub grade: Grade,
    pub credits: u32,
}

/// Mutable conversation data for a single user.
///
/// Invariants:
/// - `courses.len() == current_course - 1` while awaiting a grade or credits.
/// - `courses.len() == total_courses` once the state is `Terminal` after a
///   completed calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub(crate) total_courses: u32,
    pub(crate) current_course: u32,
    pub(crate) courses: Vec<Course>,
    pub(crate) state: ConversationState,
}

impl Session {
    /// A fresh session waiting for the number of courses.
    pub fn new() -> Self {
        Self {
            total_courses: 0,
            current_course: 0,
            courses: Vec::new(),
            state: ConversationState::AwaitingCourseCount,
        }
    }

    pub fn state(&self) -> ConversationState {
        self.state
    }

    /// Number of courses announced by the user (0 until the count is given).
    pub fn total_courses(&self) -> u32 {
        self.total_courses
    }

    /// 1-based index of the course currently being entered.
    pub fn current_course(&self) -> u32 {
        self.current_course
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    /// The grade waiting for its credit hours, if any.
    pub fn pending_grade(&self) -> Option<Grade> {
        match self.state {
            ConversationState::AwaitingCredits { grade } => Some(grade),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.state == ConversationState::Terminal
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_awaits_course_count() {
        let session = Session::new();
        assert_eq!(session.state(), ConversationState::AwaitingCourseCount);
        assert_eq!(session.total_courses(), 0);
        assert!(session.courses().is_empty());
        assert_eq!(session.pending_grade(), None);
        assert!(!session.is_terminal());
    }

    #[test]
    fn pending_grade_comes_from_credit_state() {
        let session = Session {
            total_courses: 1,
            current_course: 1,
            courses: Vec::new(),
            state: ConversationState::AwaitingCredits { grade: Grade::BPlus },
        };
        assert_eq!(session.pending_grade(), Some(Grade::BPlus));
    }
}
