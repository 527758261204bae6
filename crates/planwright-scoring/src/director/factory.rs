//! Score director factory for creating score directors.

use std::fmt;
use std::marker::PhantomData;

use planwright_core::PlanningSolution;

use super::simple::SimpleScoreDirector;

/// Factory for creating score directors.
///
/// The calculator function is stored as a concrete generic type parameter,
/// not as `Arc<dyn Fn>`. A solver engine keeps one factory for its whole
/// lifetime and builds a fresh director for every run.
pub struct ScoreDirectorFactory<S: PlanningSolution, C> {
    score_calculator: C,
    _phantom: PhantomData<fn() -> S>,
}

impl<S, C> ScoreDirectorFactory<S, C>
where
    S: PlanningSolution,
    C: Fn(&S) -> S::Score + Send + Sync,
{
    /// Creates a new ScoreDirectorFactory.
    pub fn new(score_calculator: C) -> Self {
        Self {
            score_calculator,
            _phantom: PhantomData,
        }
    }

    /// Creates a new score director for the given solution.
    pub fn build_score_director(&self, solution: S) -> SimpleScoreDirector<S, &C> {
        SimpleScoreDirector::new(solution, &self.score_calculator)
    }

    /// Scores a solution without building a director.
    pub fn calculate_score(&self, solution: &S) -> S::Score {
        (self.score_calculator)(solution)
    }
}

impl<S: PlanningSolution, C: Clone> Clone for ScoreDirectorFactory<S, C> {
    fn clone(&self) -> Self {
        Self {
            score_calculator: self.score_calculator.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<S: PlanningSolution, C> fmt::Debug for ScoreDirectorFactory<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoreDirectorFactory")
            .field("solution", &std::any::type_name::<S>())
            .finish()
    }
}
