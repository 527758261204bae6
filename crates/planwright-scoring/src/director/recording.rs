// Recording score director for automatic undo tracking.
//
// The `RecordingScoreDirector` wraps an existing score director and stores
// typed undo closures registered by moves:
//
// ```text
// let mut recording = RecordingScoreDirector::new(&mut inner_sd);
// mv.do_move(&mut recording);  // Move registers typed undo closure
// let score = recording.calculate_score();
// recording.undo_changes();  // Calls undo closures in reverse order
// ```

use planwright_core::PlanningSolution;

use super::ScoreDirector;

/// A score director wrapper that stores typed undo closures.
///
/// Local search evaluates candidate moves on the live working solution
/// through this wrapper and rolls each one back before trying the next.
///
/// # Example
///
/// ```
/// use planwright_core::{PlanningSolution, score::SimpleScore};
/// use planwright_scoring::{RecordingScoreDirector, ScoreDirector, SimpleScoreDirector};
///
/// #[derive(Clone)]
/// struct Solution { value: i64, score: Option<SimpleScore> }
///
/// impl PlanningSolution for Solution {
///     type Score = SimpleScore;
///     fn score(&self) -> Option<Self::Score> { self.score }
///     fn set_score(&mut self, score: Option<Self::Score>) { self.score = score; }
/// }
///
/// let mut sd = SimpleScoreDirector::new(
///     Solution { value: 10, score: None },
///     |s: &Solution| SimpleScore::of(s.value),
/// );
///
/// let mut recording = RecordingScoreDirector::new(&mut sd);
/// let old_value = recording.working_solution().value;
/// recording.working_solution_mut().value = 20;
/// recording.register_undo(Box::new(move |s| s.value = old_value));
/// assert_eq!(recording.calculate_score(), SimpleScore::of(20));
///
/// recording.undo_changes();
/// assert_eq!(recording.working_solution().value, 10);
/// ```
pub struct RecordingScoreDirector<'a, S: PlanningSolution> {
    inner: &'a mut dyn ScoreDirector<S>,
    undo_stack: Vec<Box<dyn FnOnce(&mut S) + Send>>,
    // Entities touched since the last undo, re-announced after rollback.
    modified_entities: Vec<usize>,
}

impl<'a, S: PlanningSolution> RecordingScoreDirector<'a, S> {
    /// Creates a new recording score director wrapping the inner director.
    pub fn new(inner: &'a mut dyn ScoreDirector<S>) -> Self {
        Self {
            inner,
            undo_stack: Vec::with_capacity(16),
            modified_entities: Vec::with_capacity(8),
        }
    }

    /// Undoes all recorded changes in reverse order.
    pub fn undo_changes(&mut self) {
        for &entity_index in &self.modified_entities {
            self.inner.before_variable_changed(entity_index, "");
        }

        while let Some(undo) = self.undo_stack.pop() {
            undo(self.inner.working_solution_mut());
        }

        for entity_index in self.modified_entities.drain(..) {
            self.inner.after_variable_changed(entity_index, "");
        }
    }

    /// Forgets recorded changes without undoing them.
    pub fn commit(&mut self) {
        self.undo_stack.clear();
        self.modified_entities.clear();
    }

    /// Returns the number of recorded undo closures.
    pub fn change_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Returns true if there are no recorded changes.
    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }
}

impl<S: PlanningSolution> ScoreDirector<S> for RecordingScoreDirector<'_, S> {
    fn working_solution(&self) -> &S {
        self.inner.working_solution()
    }

    fn working_solution_mut(&mut self) -> &mut S {
        self.inner.working_solution_mut()
    }

    fn set_working_solution(&mut self, solution: S) {
        self.commit();
        self.inner.set_working_solution(solution);
    }

    fn calculate_score(&mut self) -> S::Score {
        self.inner.calculate_score()
    }

    fn clone_working_solution(&self) -> S {
        self.inner.clone_working_solution()
    }

    fn before_variable_changed(&mut self, entity_index: usize, variable_name: &str) {
        self.inner.before_variable_changed(entity_index, variable_name);
    }

    fn after_variable_changed(&mut self, entity_index: usize, variable_name: &str) {
        self.inner.after_variable_changed(entity_index, variable_name);

        if !self.modified_entities.contains(&entity_index) {
            self.modified_entities.push(entity_index);
        }
    }

    fn before_problem_fact_changed(&mut self, fact: &str) {
        self.inner.before_problem_fact_changed(fact);
    }

    fn after_problem_fact_changed(&mut self, fact: &str) {
        self.inner.after_problem_fact_changed(fact);
    }

    fn trigger_variable_listeners(&mut self) {
        self.inner.trigger_variable_listeners();
    }

    fn calculation_count(&self) -> u64 {
        self.inner.calculation_count()
    }

    fn register_undo(&mut self, undo: Box<dyn FnOnce(&mut S) + Send>) {
        self.undo_stack.push(undo);
    }
}
