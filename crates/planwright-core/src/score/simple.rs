use std::fmt;

use super::{parse_level, ParseableScore, Score, ScoreParseError};

/// One integer level, typically minus the number of broken constraints.
///
/// ```
/// use planwright_core::{Score, SimpleScore};
///
/// assert!(SimpleScore::of(-1) > SimpleScore::of(-4));
/// assert!(SimpleScore::of(0).is_feasible());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimpleScore(i64);

impl SimpleScore {
    pub const fn of(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i64 {
        self.0
    }
}

impl Score for SimpleScore {
    fn is_feasible(&self) -> bool {
        self.0 >= 0
    }

    fn to_level_numbers(&self) -> Vec<i64> {
        vec![self.0]
    }
}

impl fmt::Display for SimpleScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ParseableScore for SimpleScore {
    fn parse(text: &str) -> Result<Self, ScoreParseError> {
        parse_level(text, "").map(Self)
    }
}
