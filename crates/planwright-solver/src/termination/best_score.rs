//! Score-based termination conditions.

use planwright_core::{PlanningSolution, Score};

use super::Termination;
use crate::scope::SolverScope;

/// Terminates when the best score reaches or exceeds a target.
///
/// # Example
///
/// ```
/// use planwright_solver::termination::BestScoreTermination;
/// use planwright_core::score::SimpleScore;
///
/// let term = BestScoreTermination::new(SimpleScore::of(0));
/// ```
#[derive(Debug, Clone)]
pub struct BestScoreTermination<Sc: Score> {
    target_score: Sc,
}

impl<Sc: Score> BestScoreTermination<Sc> {
    pub fn new(target_score: Sc) -> Self {
        Self { target_score }
    }
}

impl<S, Sc> Termination<S> for BestScoreTermination<Sc>
where
    S: PlanningSolution<Score = Sc>,
    Sc: Score,
{
    fn is_terminated(&self, solver_scope: &SolverScope<'_, S>) -> bool {
        solver_scope
            .best_score()
            .is_some_and(|score| score >= self.target_score)
    }
}

/// Terminates as soon as the best score is feasible.
#[derive(Debug, Clone, Default)]
pub struct BestScoreFeasibleTermination;

impl BestScoreFeasibleTermination {
    pub fn new() -> Self {
        Self
    }
}

impl<S: PlanningSolution> Termination<S> for BestScoreFeasibleTermination {
    fn is_terminated(&self, solver_scope: &SolverScope<'_, S>) -> bool {
        solver_scope
            .best_score()
            .is_some_and(|score| score.is_feasible())
    }
}
