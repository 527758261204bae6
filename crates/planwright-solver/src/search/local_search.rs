//! Sampling local search.

use std::fmt::{self, Debug};

use tracing::trace;

use planwright_config::LocalSearchConfig;
use planwright_core::{PlanningSolution, SolverError};
use planwright_scoring::{RecordingScoreDirector, ScoreDirector};

use super::acceptor::{acceptor_from_config, Acceptor, HillClimbingAcceptor};
use super::moves::Move;
use super::selector::MoveSelector;
use super::{NextMove, SearchAlgorithm};
use crate::scope::SolverScope;

const DEFAULT_MOVE_SAMPLE_SIZE: usize = 100;
const DEFAULT_ACCEPTED_COUNT_LIMIT: usize = 1;

/// Local search that improves an initialized solution.
///
/// Each step:
/// 1. Samples up to `move_sample_size` candidate moves
/// 2. Evaluates each doable candidate and undoes it
/// 3. Asks the acceptor whether its score is acceptable
/// 4. Returns the best accepted candidate once `accepted_count_limit`
///    candidates were accepted or the samples run out
///
/// Never finishes on its own. If nothing is accepted in a step the engine
/// counts the step and asks again, so a termination must end the run.
pub struct LocalSearch<S: PlanningSolution> {
    selector: Box<dyn MoveSelector<S>>,
    acceptor: Box<dyn Acceptor<S>>,
    move_sample_size: usize,
    accepted_count_limit: usize,
}

impl<S: PlanningSolution> LocalSearch<S> {
    /// Hill climbing over `selector` with default sizes.
    pub fn new(selector: Box<dyn MoveSelector<S>>) -> Self {
        Self {
            selector,
            acceptor: Box::new(HillClimbingAcceptor::new()),
            move_sample_size: DEFAULT_MOVE_SAMPLE_SIZE,
            accepted_count_limit: DEFAULT_ACCEPTED_COUNT_LIMIT,
        }
    }

    /// Builds a local search from its config section.
    pub fn from_config(
        config: &LocalSearchConfig,
        selector: Box<dyn MoveSelector<S>>,
    ) -> Result<Self, SolverError> {
        config
            .validate()
            .map_err(|e| SolverError::Config(e.to_string()))?;

        let mut search = Self::new(selector)
            .with_acceptor(acceptor_from_config(config.acceptor.as_ref())?);
        if let Some(size) = config.move_sample_size {
            search = search.with_move_sample_size(size);
        }
        if let Some(limit) = config.accepted_count_limit {
            search = search.with_accepted_count_limit(limit);
        }
        Ok(search)
    }

    pub fn with_acceptor(mut self, acceptor: Box<dyn Acceptor<S>>) -> Self {
        self.acceptor = acceptor;
        self
    }

    /// Candidates sampled per step; zero is raised to one.
    pub fn with_move_sample_size(mut self, size: usize) -> Self {
        self.move_sample_size = size.max(1);
        self
    }

    /// Accepted candidates after which a step stops sampling; zero is
    /// raised to one.
    pub fn with_accepted_count_limit(mut self, limit: usize) -> Self {
        self.accepted_count_limit = limit.max(1);
        self
    }

    pub fn move_sample_size(&self) -> usize {
        self.move_sample_size
    }

    pub fn accepted_count_limit(&self) -> usize {
        self.accepted_count_limit
    }
}

impl<S: PlanningSolution> Debug for LocalSearch<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSearch")
            .field("selector", &self.selector)
            .field("acceptor", &self.acceptor)
            .field("move_sample_size", &self.move_sample_size)
            .field("accepted_count_limit", &self.accepted_count_limit)
            .finish()
    }
}

impl<S: PlanningSolution> SearchAlgorithm<S> for LocalSearch<S> {
    fn solving_started(&mut self, solver_scope: &mut SolverScope<'_, S>) {
        let score = solver_scope.calculate_score();
        solver_scope.set_last_step_score(score);
        self.acceptor.phase_started(&score);
    }

    fn next_move(&mut self, solver_scope: &mut SolverScope<'_, S>) -> NextMove<S> {
        let last_step_score = match solver_scope.last_step_score() {
            Some(score) => score,
            None => {
                let score = solver_scope.calculate_score();
                solver_scope.set_last_step_score(score);
                score
            }
        };

        let (director, rng) = solver_scope.director_and_rng();
        let mut best: Option<(Box<dyn Move<S>>, S::Score)> = None;
        let mut accepted_count = 0;

        for _ in 0..self.move_sample_size {
            let Some(candidate) = self.selector.sample(director.working_solution(), rng) else {
                break;
            };
            if !candidate.is_doable(&*director) {
                continue;
            }

            let move_score = {
                let mut recording = RecordingScoreDirector::new(&mut *director);
                candidate.do_move(&mut recording);
                let score = recording.calculate_score();
                recording.undo_changes();
                score
            };

            if !self.acceptor.is_accepted(&last_step_score, &move_score, rng) {
                continue;
            }
            accepted_count += 1;
            if best.as_ref().map_or(true, |(_, s)| move_score > *s) {
                best = Some((candidate, move_score));
            }
            if accepted_count >= self.accepted_count_limit {
                break;
            }
        }

        match best {
            Some((chosen, score)) => {
                trace!(event = "move_chosen", ?score, accepted = accepted_count);
                NextMove::Found(chosen)
            }
            None => NextMove::NotFound,
        }
    }

    fn step_ended(&mut self, step_score: &S::Score) {
        self.acceptor.step_ended(step_score);
    }

    fn algorithm_name(&self) -> &'static str {
        "LocalSearch"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{change_selector, nqueens_scope};
    use planwright_config::{AcceptorConfig, LateAcceptanceConfig};
    use planwright_core::score::SimpleScore;
    use planwright_test::NQueensSolution;

    fn run_steps(
        search: &mut LocalSearch<NQueensSolution>,
        rows: &[i64],
        steps: usize,
    ) -> SimpleScore {
        let mut scope = nqueens_scope(rows, Some(17));
        search.solving_started(&mut scope);
        for _ in 0..steps {
            if let NextMove::Found(mv) = search.next_move(&mut scope) {
                mv.do_move(scope.score_director_mut());
                let score = scope.calculate_score();
                scope.set_last_step_score(score);
                search.step_ended(&score);
            }
        }
        scope.calculate_score()
    }

    #[test]
    fn test_next_move_leaves_solution_untouched() {
        let mut scope = nqueens_scope(&[0, 0, 0, 0], Some(5));
        let mut search = LocalSearch::new(change_selector());
        search.solving_started(&mut scope);

        let before = scope.working_solution().rows();
        let next = search.next_move(&mut scope);
        assert!(matches!(next, NextMove::Found(_)));
        assert_eq!(scope.working_solution().rows(), before);
    }

    #[test]
    fn test_hill_climbing_never_worsens() {
        let mut search = LocalSearch::new(change_selector());
        let final_score = run_steps(&mut search, &[0, 0, 0, 0], 50);
        assert!(final_score > SimpleScore::of(-6));
    }

    #[test]
    fn test_finds_the_single_fixing_move() {
        let mut search = LocalSearch::new(change_selector()).with_move_sample_size(500);
        let final_score = run_steps(&mut search, &[1, 3, 0, 0], 1);
        assert_eq!(final_score, SimpleScore::of(0));
    }

    #[test]
    fn test_optimum_has_no_improving_move() {
        let mut scope = nqueens_scope(&[1, 3, 0, 2], Some(9));
        let mut search = LocalSearch::new(change_selector());
        search.solving_started(&mut scope);
        assert!(matches!(search.next_move(&mut scope), NextMove::NotFound));
    }

    #[test]
    fn test_from_config() {
        let config = LocalSearchConfig {
            acceptor: Some(AcceptorConfig::LateAcceptance(LateAcceptanceConfig {
                late_acceptance_size: Some(20),
            })),
            accepted_count_limit: Some(4),
            move_sample_size: Some(50),
        };
        let search = LocalSearch::from_config(&config, change_selector()).unwrap();
        assert_eq!(search.move_sample_size(), 50);
        assert_eq!(search.accepted_count_limit(), 4);

        let invalid = LocalSearchConfig {
            move_sample_size: Some(0),
            ..LocalSearchConfig::default()
        };
        assert!(matches!(
            LocalSearch::<NQueensSolution>::from_config(&invalid, change_selector()),
            Err(SolverError::Config(_))
        ));
    }
}
