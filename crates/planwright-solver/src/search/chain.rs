//! Sequential composition of search algorithms.

use std::fmt::{self, Debug};

use tracing::debug;

use planwright_core::PlanningSolution;

use super::{NextMove, SearchAlgorithm};
use crate::scope::SolverScope;

/// Runs algorithms one after another, moving on when the current one is
/// exhausted. A restart goes back to the first algorithm, so a chain of
/// construction then local search re-initializes entities added by a
/// problem fact change before improving again.
pub struct SearchChain<S: PlanningSolution> {
    algorithms: Vec<Box<dyn SearchAlgorithm<S>>>,
    current: usize,
}

impl<S: PlanningSolution> SearchChain<S> {
    pub fn new(algorithms: Vec<Box<dyn SearchAlgorithm<S>>>) -> Self {
        Self {
            algorithms,
            current: 0,
        }
    }

    /// Appends an algorithm to the chain.
    pub fn then(mut self, algorithm: Box<dyn SearchAlgorithm<S>>) -> Self {
        self.algorithms.push(algorithm);
        self
    }

    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }

    /// Index of the algorithm currently producing moves.
    pub fn current_index(&self) -> usize {
        self.current
    }
}

impl<S: PlanningSolution> Debug for SearchChain<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.algorithms.iter().map(|a| a.algorithm_name()).collect();
        f.debug_struct("SearchChain")
            .field("algorithms", &names)
            .field("current", &self.current)
            .finish()
    }
}

impl<S: PlanningSolution> SearchAlgorithm<S> for SearchChain<S> {
    fn solving_started(&mut self, solver_scope: &mut SolverScope<'_, S>) {
        self.current = 0;
        if let Some(first) = self.algorithms.first_mut() {
            first.solving_started(solver_scope);
        }
    }

    fn solving_restarted(&mut self, solver_scope: &mut SolverScope<'_, S>) {
        self.current = 0;
        if let Some(first) = self.algorithms.first_mut() {
            first.solving_restarted(solver_scope);
        }
    }

    fn next_move(&mut self, solver_scope: &mut SolverScope<'_, S>) -> NextMove<S> {
        while let Some(algorithm) = self.algorithms.get_mut(self.current) {
            match algorithm.next_move(solver_scope) {
                NextMove::Exhausted => {
                    debug!(
                        event = "algorithm_exhausted",
                        algorithm = algorithm.algorithm_name(),
                        step = solver_scope.total_step_count(),
                    );
                    self.current += 1;
                    if let Some(next) = self.algorithms.get_mut(self.current) {
                        next.solving_started(solver_scope);
                    }
                }
                other => return other,
            }
        }
        NextMove::Exhausted
    }

    fn step_ended(&mut self, step_score: &S::Score) {
        if let Some(algorithm) = self.algorithms.get_mut(self.current) {
            algorithm.step_ended(step_score);
        }
    }

    fn algorithm_name(&self) -> &'static str {
        "SearchChain"
    }
}
