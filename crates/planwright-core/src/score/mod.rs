//! Score values that rank candidate solutions.
//!
//! The engine only needs a total order (to decide whether a snapshot is a
//! new best), a feasibility test (for `best_score_feasible`) and the
//! per-level numbers (for simulated annealing). Score limits in config are
//! strings, hence [`ParseableScore`].

use std::fmt::{Debug, Display};
use std::num::ParseIntError;

mod hard_soft;
mod simple;

#[cfg(test)]
mod tests;

pub use hard_soft::HardSoftScore;
pub use simple::SimpleScore;

/// Quality of a planning solution. Greater is better.
pub trait Score: Copy + Debug + Display + Default + Send + Sync + Ord + 'static {
    /// Whether no hard constraint is broken.
    fn is_feasible(&self) -> bool;

    /// Level values, most significant first.
    fn to_level_numbers(&self) -> Vec<i64>;
}

/// A score that can be read back from its `Display` form.
pub trait ParseableScore: Score {
    fn parse(text: &str) -> Result<Self, ScoreParseError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoreParseError {
    #[error("'{text}' is not a whole number: {source}")]
    Number { text: String, source: ParseIntError },

    #[error("'{text}' does not end with '{suffix}'")]
    MissingSuffix { text: String, suffix: &'static str },

    #[error("'{text}' needs {expected} '/'-separated levels")]
    LevelCount { text: String, expected: usize },
}

/// Reads one level such as `-3hard`, with an empty `suffix` for bare numbers.
pub(crate) fn parse_level(text: &str, suffix: &'static str) -> Result<i64, ScoreParseError> {
    let text = text.trim();
    let digits = text
        .strip_suffix(suffix)
        .ok_or_else(|| ScoreParseError::MissingSuffix {
            text: text.to_string(),
            suffix,
        })?;
    digits
        .trim()
        .parse()
        .map_err(|source| ScoreParseError::Number {
            text: text.to_string(),
            source,
        })
}
