//! Property-based tests for the conversation state machine.

use super::grades::Grade;
use super::session::{ConversationState, Session};
use super::transition::{apply_text, parse_positive};
use super::GpaReport;
use proptest::prelude::*;

fn arb_grade() -> impl Strategy<Value = Grade> {
    prop::sample::select(Grade::ALL.to_vec())
}

/// A grade token as a user might type it: any case, padded.
fn arb_grade_text() -> impl Strategy<Value = String> {
    (arb_grade(), any::<bool>(), " {0,2}", " {0,2}").prop_map(|(g, lower, pre, post)| {
        let token = if lower {
            g.token().to_lowercase()
        } else {
            g.token().to_string()
        };
        format!("{pre}{token}{post}")
    })
}

/// Typical credit hours most of the time, any accepted value otherwise.
fn arb_credits() -> impl Strategy<Value = u32> {
    prop_oneof![3 => 1u32..=12, 1 => 1u32..=u32::MAX]
}

fn arb_course() -> impl Strategy<Value = (Grade, u32)> {
    (arb_grade(), arb_credits())
}

/// Text that is not a strictly positive whole number.
fn arb_bad_number() -> impl Strategy<Value = String> {
    prop_oneof![
        (i64::MIN..=0).prop_map(|n| n.to_string()),
        "[a-zA-Z.,!? ]{0,12}",
        (1u32..100).prop_map(|n| format!("{n}.5")),
    ]
    .prop_filter("must be rejected", |s| parse_positive(s).is_err())
}

fn arb_bad_grade() -> impl Strategy<Value = String> {
    "\\PC{0,6}".prop_filter("must not be a grade", |s| s.parse::<Grade>().is_err())
}

/// A session partway through: count given and `done` courses entered.
fn session_after(courses: &[(Grade, u32)], done: usize) -> Session {
    let mut session = Session::new();
    apply_text(&mut session, &courses.len().to_string());
    for (grade, credits) in &courses[..done] {
        apply_text(&mut session, grade.token());
        apply_text(&mut session, &credits.to_string());
    }
    session
}

proptest! {
    #[test]
    fn n_valid_courses_reach_terminal_exactly_at_the_end(
        courses in prop::collection::vec((arb_grade_text(), arb_credits()), 1..15),
    ) {
        let mut session = Session::new();
        apply_text(&mut session, &courses.len().to_string());

        for (typed, credits) in &courses {
            prop_assert_eq!(session.state(), ConversationState::AwaitingGrade);
            prop_assert_eq!(session.courses().len(), session.current_course() as usize - 1);

            apply_text(&mut session, typed);
            let expected: Grade = typed.parse().unwrap();
            prop_assert_eq!(session.pending_grade(), Some(expected));
            apply_text(&mut session, &credits.to_string());
        }

        prop_assert!(session.is_terminal());
        prop_assert_eq!(session.courses().len(), courses.len());
    }

    #[test]
    fn user_styled_grades_are_accepted(text in arb_grade_text()) {
        let mut session = session_after(&[(Grade::A, 1)], 0);
        apply_text(&mut session, &text);
        prop_assert!(session.pending_grade().is_some());
    }

    #[test]
    fn bad_course_count_never_advances(inputs in prop::collection::vec(arb_bad_number(), 1..8)) {
        let mut session = Session::new();
        for input in &inputs {
            apply_text(&mut session, input);
        }
        prop_assert_eq!(session, Session::new());
    }

    #[test]
    fn bad_credits_never_mutate_the_session(
        courses in prop::collection::vec(arb_course(), 2..6),
        grade in arb_grade(),
        inputs in prop::collection::vec(arb_bad_number(), 1..8),
    ) {
        let mut session = session_after(&courses, 1);
        apply_text(&mut session, grade.token());
        let before = session.clone();
        for input in &inputs {
            apply_text(&mut session, input);
        }
        prop_assert_eq!(session, before);
    }

    #[test]
    fn bad_grades_stay_in_grade_step(
        courses in prop::collection::vec(arb_course(), 2..6),
        inputs in prop::collection::vec(arb_bad_grade(), 1..8),
    ) {
        let mut session = session_after(&courses, 1);
        let before = session.clone();
        for input in &inputs {
            apply_text(&mut session, input);
            prop_assert_eq!(session.state(), ConversationState::AwaitingGrade);
        }
        prop_assert_eq!(session, before);
    }

    #[test]
    fn gpa_stays_within_scale(courses in prop::collection::vec(arb_course(), 0..20)) {
        let courses: Vec<_> = courses
            .into_iter()
            .map(|(grade, credits)| super::session::Course { grade, credits })
            .collect();
        let report = GpaReport::from_courses(&courses);
        prop_assert!(report.gpa >= 0.0 && report.gpa <= 4.0 + 1e-9);
        prop_assert_eq!(
            report.total_credits,
            courses.iter().map(|c| u64::from(c.credits)).sum::<u64>()
        );
    }
}
