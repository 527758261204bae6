//! Solver-level scope.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use planwright_core::PlanningSolution;
use planwright_scoring::ScoreDirector;

/// State of one solving run, handed to search algorithms and terminations.
///
/// Owns the score director (and through it the working solution) for the
/// duration of the run. Step counters and the restart clock are reset
/// whenever problem fact changes restart the search; the run clock is not.
pub struct SolverScope<'a, S: PlanningSolution> {
    score_director: Box<dyn ScoreDirector<S> + 'a>,
    rng: StdRng,
    run_started: Instant,
    restarted: Instant,
    total_step_count: u64,
    step_count_since_restart: u64,
    last_improvement_step: u64,
    last_improvement_time: Instant,
    best_score: Option<S::Score>,
    last_step_score: Option<S::Score>,
    restart_count: u32,
}

impl<'a, S: PlanningSolution> SolverScope<'a, S> {
    pub fn new(score_director: Box<dyn ScoreDirector<S> + 'a>) -> Self {
        Self::with_rng(score_director, StdRng::from_os_rng())
    }

    pub fn with_seed(score_director: Box<dyn ScoreDirector<S> + 'a>, seed: u64) -> Self {
        Self::with_rng(score_director, StdRng::seed_from_u64(seed))
    }

    /// Seeds from `seed` when given, from the OS otherwise.
    pub fn with_optional_seed(
        score_director: Box<dyn ScoreDirector<S> + 'a>,
        seed: Option<u64>,
    ) -> Self {
        match seed {
            Some(seed) => Self::with_seed(score_director, seed),
            None => Self::new(score_director),
        }
    }

    fn with_rng(score_director: Box<dyn ScoreDirector<S> + 'a>, rng: StdRng) -> Self {
        let now = Instant::now();
        Self {
            score_director,
            rng,
            run_started: now,
            restarted: now,
            total_step_count: 0,
            step_count_since_restart: 0,
            last_improvement_step: 0,
            last_improvement_time: now,
            best_score: None,
            last_step_score: None,
            restart_count: 0,
        }
    }

    pub fn score_director(&self) -> &dyn ScoreDirector<S> {
        self.score_director.as_ref()
    }

    pub fn score_director_mut(&mut self) -> &mut dyn ScoreDirector<S> {
        self.score_director.as_mut()
    }

    /// Splits the scope into the director and the random generator so both
    /// can be borrowed mutably at once.
    pub fn director_and_rng(&mut self) -> (&mut dyn ScoreDirector<S>, &mut StdRng) {
        (self.score_director.as_mut(), &mut self.rng)
    }

    pub fn working_solution(&self) -> &S {
        self.score_director.working_solution()
    }

    pub fn calculate_score(&mut self) -> S::Score {
        self.score_director.calculate_score()
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Time since the run started, across restarts.
    pub fn elapsed(&self) -> Duration {
        self.run_started.elapsed()
    }

    /// Time since the run started or last restarted.
    pub fn time_since_restart(&self) -> Duration {
        self.restarted.elapsed()
    }

    pub fn total_step_count(&self) -> u64 {
        self.total_step_count
    }

    pub fn step_count_since_restart(&self) -> u64 {
        self.step_count_since_restart
    }

    pub fn increment_step_count(&mut self) -> u64 {
        self.total_step_count += 1;
        self.step_count_since_restart += 1;
        self.total_step_count
    }

    pub fn best_score(&self) -> Option<S::Score> {
        self.best_score
    }

    /// Records a new best score and resets the unimproved counters.
    pub fn set_best_score(&mut self, score: Option<S::Score>) {
        self.best_score = score;
        self.last_improvement_step = self.total_step_count;
        self.last_improvement_time = Instant::now();
    }

    pub fn last_step_score(&self) -> Option<S::Score> {
        self.last_step_score
    }

    pub fn set_last_step_score(&mut self, score: S::Score) {
        self.last_step_score = Some(score);
    }

    pub fn steps_since_improvement(&self) -> u64 {
        self.total_step_count - self.last_improvement_step
    }

    pub fn time_since_improvement(&self) -> Duration {
        self.last_improvement_time.elapsed()
    }

    pub fn restart_count(&self) -> u32 {
        self.restart_count
    }

    /// Restarts secondary termination clocks after problem fact changes.
    ///
    /// The working solution has been replaced, so the last step score no
    /// longer describes it.
    pub fn restart(&mut self) {
        let now = Instant::now();
        self.restarted = now;
        self.step_count_since_restart = 0;
        self.last_improvement_step = self.total_step_count;
        self.last_improvement_time = now;
        self.last_step_score = None;
        self.restart_count += 1;
    }
}

impl<S: PlanningSolution> std::fmt::Debug for SolverScope<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverScope")
            .field("total_step_count", &self.total_step_count)
            .field("step_count_since_restart", &self.step_count_since_restart)
            .field("best_score", &self.best_score)
            .field("restart_count", &self.restart_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::nqueens_scope;
    use planwright_core::score::SimpleScore;

    #[test]
    fn test_step_counters_reset_on_restart() {
        let mut scope = nqueens_scope(&[0, 0, 0, 0], Some(1));
        scope.increment_step_count();
        scope.increment_step_count();
        assert_eq!(scope.total_step_count(), 2);
        assert_eq!(scope.steps_since_improvement(), 2);

        scope.restart();
        assert_eq!(scope.total_step_count(), 2);
        assert_eq!(scope.step_count_since_restart(), 0);
        assert_eq!(scope.steps_since_improvement(), 0);
        assert_eq!(scope.restart_count(), 1);
    }

    #[test]
    fn test_best_score_resets_unimproved_steps() {
        let mut scope = nqueens_scope(&[0, 0, 0, 0], Some(1));
        scope.increment_step_count();
        scope.set_best_score(Some(SimpleScore::of(-3)));
        scope.increment_step_count();

        assert_eq!(scope.best_score(), Some(SimpleScore::of(-3)));
        assert_eq!(scope.steps_since_improvement(), 1);
    }

    #[test]
    fn test_seeded_scopes_draw_the_same_numbers() {
        use rand::Rng;

        let mut a = nqueens_scope(&[0, 0], Some(42));
        let mut b = nqueens_scope(&[0, 0], Some(42));
        let xs: Vec<u32> = (0..8).map(|_| a.rng().random_range(0..1000)).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.rng().random_range(0..1000)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_restart_clears_last_step_score() {
        let mut scope = nqueens_scope(&[0, 0], None);
        let score = scope.calculate_score();
        scope.set_last_step_score(score);
        assert_eq!(scope.last_step_score(), Some(SimpleScore::of(-1)));

        scope.restart();
        assert_eq!(scope.last_step_score(), None);
    }
}
