//! First fit construction heuristic.

use std::fmt::{self, Debug};

use tracing::debug;

use planwright_core::PlanningSolution;
use planwright_scoring::{RecordingScoreDirector, ScoreDirector};

use super::moves::{ChangeMove, Move};
use super::{NextMove, SearchAlgorithm};
use crate::scope::SolverScope;

/// Assigns uninitialized entities in index order, one per step.
///
/// Each step tries every value for the first unassigned entity and
/// returns the assignment with the best resulting score. Exhausted once
/// every entity has a value, or when the value range is empty.
pub struct FirstFitConstruction<S, V> {
    entity_count: fn(&S) -> usize,
    values: fn(&S) -> Vec<V>,
    getter: fn(&S, usize) -> Option<V>,
    setter: fn(&mut S, usize, Option<V>),
    variable_name: &'static str,
}

impl<S, V> FirstFitConstruction<S, V> {
    pub fn new(
        entity_count: fn(&S) -> usize,
        values: fn(&S) -> Vec<V>,
        getter: fn(&S, usize) -> Option<V>,
        setter: fn(&mut S, usize, Option<V>),
        variable_name: &'static str,
    ) -> Self {
        Self {
            entity_count,
            values,
            getter,
            setter,
            variable_name,
        }
    }

    fn first_unassigned(&self, solution: &S) -> Option<usize> {
        (0..(self.entity_count)(solution)).find(|&i| (self.getter)(solution, i).is_none())
    }
}

impl<S, V> Debug for FirstFitConstruction<S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirstFitConstruction")
            .field("variable_name", &self.variable_name)
            .finish()
    }
}

impl<S, V> SearchAlgorithm<S> for FirstFitConstruction<S, V>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
{
    fn next_move(&mut self, solver_scope: &mut SolverScope<'_, S>) -> NextMove<S> {
        let director = solver_scope.score_director_mut();
        let Some(entity_index) = self.first_unassigned(director.working_solution()) else {
            return NextMove::Exhausted;
        };

        let mut best: Option<(ChangeMove<S, V>, S::Score)> = None;
        for value in (self.values)(director.working_solution()) {
            let candidate = ChangeMove::new(
                entity_index,
                Some(value),
                self.getter,
                self.setter,
                self.variable_name,
            );
            let score = {
                let mut recording = RecordingScoreDirector::new(&mut *director);
                candidate.do_move(&mut recording);
                let score = recording.calculate_score();
                recording.undo_changes();
                score
            };
            if best.as_ref().map_or(true, |(_, s)| score > *s) {
                best = Some((candidate, score));
            }
        }

        match best {
            Some((chosen, _)) => NextMove::Found(Box::new(chosen)),
            None => {
                debug!(
                    event = "construction_stuck",
                    entity_index,
                    variable = self.variable_name,
                    "empty value range"
                );
                NextMove::Exhausted
            }
        }
    }

    fn algorithm_name(&self) -> &'static str {
        "FirstFitConstruction"
    }
}
