use std::fmt;

use super::{parse_level, ParseableScore, Score, ScoreParseError};

/// Hard constraints decide feasibility; soft ones only break ties.
///
/// Field order gives the derived `Ord` its lexicographic meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HardSoftScore {
    hard: i64,
    soft: i64,
}

impl HardSoftScore {
    pub const fn of(hard: i64, soft: i64) -> Self {
        Self { hard, soft }
    }

    pub const fn hard(self) -> i64 {
        self.hard
    }

    pub const fn soft(self) -> i64 {
        self.soft
    }
}

impl Score for HardSoftScore {
    fn is_feasible(&self) -> bool {
        self.hard >= 0
    }

    fn to_level_numbers(&self) -> Vec<i64> {
        vec![self.hard, self.soft]
    }
}

impl fmt::Display for HardSoftScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}hard/{}soft", self.hard, self.soft)
    }
}

impl ParseableScore for HardSoftScore {
    fn parse(text: &str) -> Result<Self, ScoreParseError> {
        let levels: Vec<&str> = text.split('/').collect();
        let [hard, soft] = levels.as_slice() else {
            return Err(ScoreParseError::LevelCount {
                text: text.trim().to_string(),
                expected: 2,
            });
        };
        Ok(Self::of(parse_level(hard, "hard")?, parse_level(soft, "soft")?))
    }
}
