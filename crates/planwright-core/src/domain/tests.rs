use super::*;
use crate::score::SimpleScore;

#[derive(Clone, Debug)]
struct Board {
    rows: Vec<Option<usize>>,
    score: Option<SimpleScore>,
}

impl PlanningSolution for Board {
    type Score = SimpleScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }

    fn is_initialized(&self) -> bool {
        self.rows.iter().all(Option::is_some)
    }
}

#[derive(Clone, Debug)]
struct Empty {
    score: Option<SimpleScore>,
}

impl PlanningSolution for Empty {
    type Score = SimpleScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }
}

#[test]
fn test_score_round_trip() {
    let mut board = Board {
        rows: vec![Some(0), Some(1)],
        score: None,
    };
    assert_eq!(board.score(), None);

    board.set_score(Some(SimpleScore::of(-2)));
    assert_eq!(board.score(), Some(SimpleScore::of(-2)));
}

#[test]
fn test_custom_is_initialized() {
    let partial = Board {
        rows: vec![Some(0), None],
        score: None,
    };
    assert!(!partial.is_initialized());

    let full = Board {
        rows: vec![Some(0), Some(3)],
        score: None,
    };
    assert!(full.is_initialized());
}

#[test]
fn test_default_is_initialized() {
    assert!(Empty { score: None }.is_initialized());
}
