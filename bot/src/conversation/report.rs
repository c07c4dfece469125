//! # GPA Report
//!
//! File: bot/src/conversation/report.rs
//!
//! ## Overview
//!
//! Credit-weighted GPA over a list of completed courses:
//!
//! ```text
//! total_points  = Σ points(grade) × credits
//! total_credits = Σ credits
//! gpa           = total_points / total_credits   (0 when total_credits == 0)
//! ```
//!
use super::session::Course;

/// Totals and GPA for a finished calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpaReport {
    pub total_credits: u64,
    pub total_points: f64,
    pub gpa: f64,
}

impl GpaReport {
    pub fn from_courses(courses: &[Course]) -> Self {
        let (total_points, total_credits) =
            courses
                .iter()
                .fold((0.0_f64, 0_u64), |(points, credits), course| {
                    (
                        points + course.grade.points() * f64::from(course.credits),
                        credits + u64::from(course.credits),
                    )
                });

        let gpa = if total_credits > 0 {
            total_points / total_credits as f64
        } else {
            0.0
        };

        Self {
            total_credits,
            total_points,
            gpa,
        }
    }

    /// GPA rounded to two decimal places, as shown to the user.
    pub fn gpa_display(&self) -> String {
        format!("{:.2}", self.gpa)
    }

    pub fn total_points_display(&self) -> String {
        format!("{:.2}", self.total_points)
    }
}
