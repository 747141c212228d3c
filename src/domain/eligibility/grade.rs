//! Fixed letter-grade scale shared by every minimum-grade comparison.

use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;

/// Letter grade on the national secondary-school scale.
///
/// Variants are declared from best to worst; [`Grade::points`] gives the
/// ordinal weight used for comparisons. Serialized as its symbol and
/// deserialized through [`FromStr`], so stored documents get the same
/// case and whitespace tolerance as user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SerializeDisplay, DeserializeFromStr)]
pub enum Grade {
    APlus,
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Grade {
    /// All grades, best first.
    pub const ALL: [Grade; 7] = [
        Grade::APlus,
        Grade::A,
        Grade::B,
        Grade::C,
        Grade::D,
        Grade::E,
        Grade::F,
    ];

    /// Point weight of the grade, 7 for `A*` down to 1 for `F`.
    pub fn points(self) -> u8 {
        match self {
            Grade::APlus => 7,
            Grade::A => 6,
            Grade::B => 5,
            Grade::C => 4,
            Grade::D => 3,
            Grade::E => 2,
            Grade::F => 1,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Grade::APlus => "A*",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::E => "E",
            Grade::F => "F",
        }
    }

    /// Returns true if this grade is at least as good as `minimum`.
    pub fn meets(self, minimum: Grade) -> bool {
        self.points() >= minimum.points()
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error returned when a string is not one of the seven grade symbols.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown grade symbol '{0}'")]
pub struct UnknownGrade(pub String);

impl FromStr for Grade {
    type Err = UnknownGrade;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Grade::ALL
            .into_iter()
            .find(|g| g.symbol().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownGrade(s.to_string()))
    }
}

/// Point weight for a raw grade symbol as stored on a student record.
///
/// Unknown symbols weigh 0, so they never satisfy a minimum-grade requirement.
pub fn grade_points(symbol: &str) -> u8 {
    symbol.parse::<Grade>().map(Grade::points).unwrap_or(0)
}
