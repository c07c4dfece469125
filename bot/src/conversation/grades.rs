//! # Grade Table
//!
//! File: bot/src/conversation/grades.rs
//!
//! ## Overview
//!
//! The fixed letter-grade scale and its grade-point values. The scale is a
//! closed `enum` so a stored course can never carry an unknown token; parsing
//! from user text is the only fallible step and is case-insensitive and
//! whitespace-trimmed.
//!
//! | Token | Points |
//! |-------|--------|
//! | A+    | 4.0    |
//! | A     | 4.0    |
//! | A-    | 3.75   |
//! | B+    | 3.5    |
//! | B     | 3.0    |
//! | B-    | 2.75   |
//! | C+    | 2.5    |
//! | C     | 2.0    |
//! | D     | 1.0    |
//! | F     | 0.0    |
//!
use std::fmt;
use std::str::FromStr;

use crate::core::error::InputError;

/// A letter grade from the scale above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    D,
    F,
}

impl Grade {
    /// Every grade, in the order they are listed to the user.
    pub const ALL: [Grade; 10] = [
        Grade::APlus,
        Grade::A,
        Grade::AMinus,
        Grade::BPlus,
        Grade::B,
        Grade::BMinus,
        Grade::CPlus,
        Grade::C,
        Grade::D,
        Grade::F,
    ];

    /// The canonical (upper-case) token for this grade.
    pub fn token(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    /// Grade points awarded per credit hour.
    pub fn points(self) -> f64 {
        match self {
            Grade::APlus | Grade::A => 4.0,
            Grade::AMinus => 3.75,
            Grade::BPlus => 3.5,
            Grade::B => 3.0,
            Grade::BMinus => 2.75,
            Grade::CPlus => 2.5,
            Grade::C => 2.0,
            Grade::D => 1.0,
            Grade::F => 0.0,
        }
    }

    /// Comma-separated list of valid tokens, e.g. `"A+, A, A-, ..."`.
    pub fn token_list() -> String {
        Grade::ALL
            .iter()
            .map(|g| g.token())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Grade {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        Grade::ALL
            .into_iter()
            .find(|g| g.token() == wanted)
            .ok_or(InputError::UnknownGrade)
    }
}
