//! Simple score director with full recalculation.

use planwright_core::PlanningSolution;

use super::traits::ScoreDirector;

/// A score director that recalculates the full score whenever the
/// working solution changed since the last calculation.
///
/// The calculator is stored as a concrete generic type parameter, not as
/// `Arc<dyn Fn>`.
///
/// # Example
///
/// ```
/// use planwright_core::{PlanningSolution, score::SimpleScore};
/// use planwright_scoring::{ScoreDirector, SimpleScoreDirector};
///
/// #[derive(Clone)]
/// struct Counter { value: i64, score: Option<SimpleScore> }
///
/// impl PlanningSolution for Counter {
///     type Score = SimpleScore;
///     fn score(&self) -> Option<Self::Score> { self.score }
///     fn set_score(&mut self, score: Option<Self::Score>) { self.score = score; }
/// }
///
/// let mut director = SimpleScoreDirector::new(
///     Counter { value: -3, score: None },
///     |c: &Counter| SimpleScore::of(c.value),
/// );
/// assert_eq!(director.calculate_score(), SimpleScore::of(-3));
///
/// director.working_solution_mut().value = 0;
/// assert_eq!(director.calculate_score(), SimpleScore::of(0));
/// assert_eq!(director.calculation_count(), 2);
/// ```
pub struct SimpleScoreDirector<S: PlanningSolution, C> {
    working_solution: S,
    score_calculator: C,
    score_dirty: bool,
    cached_score: Option<S::Score>,
    calculation_count: u64,
}

impl<S, C> SimpleScoreDirector<S, C>
where
    S: PlanningSolution,
    C: Fn(&S) -> S::Score + Send + Sync,
{
    /// Creates a new SimpleScoreDirector.
    pub fn new(solution: S, score_calculator: C) -> Self {
        SimpleScoreDirector {
            working_solution: solution,
            score_calculator,
            score_dirty: true,
            cached_score: None,
            calculation_count: 0,
        }
    }

    /// Returns true if the next `calculate_score` will recalculate.
    pub fn is_score_dirty(&self) -> bool {
        self.score_dirty
    }

    /// Consumes the director and returns its working solution.
    pub fn into_working_solution(self) -> S {
        self.working_solution
    }

    fn mark_dirty(&mut self) {
        self.score_dirty = true;
    }
}

impl<S, C> ScoreDirector<S> for SimpleScoreDirector<S, C>
where
    S: PlanningSolution,
    C: Fn(&S) -> S::Score + Send + Sync,
{
    fn working_solution(&self) -> &S {
        &self.working_solution
    }

    fn working_solution_mut(&mut self) -> &mut S {
        self.mark_dirty();
        &mut self.working_solution
    }

    fn set_working_solution(&mut self, solution: S) {
        self.working_solution = solution;
        self.cached_score = None;
        self.mark_dirty();
    }

    fn calculate_score(&mut self) -> S::Score {
        if !self.score_dirty {
            if let Some(score) = self.cached_score {
                return score;
            }
        }

        let score = (self.score_calculator)(&self.working_solution);
        self.working_solution.set_score(Some(score));
        self.cached_score = Some(score);
        self.score_dirty = false;
        self.calculation_count += 1;
        score
    }

    fn clone_working_solution(&self) -> S {
        self.working_solution.clone()
    }

    fn before_variable_changed(&mut self, _entity_index: usize, _variable_name: &str) {
        self.mark_dirty();
    }

    fn after_variable_changed(&mut self, _entity_index: usize, _variable_name: &str) {
        // Already marked dirty in before_variable_changed
    }

    fn before_problem_fact_changed(&mut self, _fact: &str) {
        self.mark_dirty();
    }

    fn after_problem_fact_changed(&mut self, _fact: &str) {}

    fn calculation_count(&self) -> u64 {
        self.calculation_count
    }
}
