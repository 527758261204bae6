//! Problem change trait for real-time planning.

use std::fmt::{self, Debug};
use std::marker::PhantomData;

use planwright_core::{PlanningSolution, ProblemChangeError};
use planwright_scoring::ScoreDirector;

/// A change to the problem that can be applied during solving.
///
/// Changes are queued and applied exactly once, by the solving thread,
/// at a step boundary.
///
/// # Implementation Notes
///
/// - Mutate the solution through `score_director.working_solution_mut()`
/// - Announce additions, removals and fact updates through the matching
///   `before_*` / `after_*` calls so the score is recalculated
/// - Return an error instead of panicking when a referenced entity or fact
///   is gone; the run is aborted and the error handed back to the caller
///   of `solve`
pub trait ProblemChange<S: PlanningSolution>: Send + Debug {
    /// Applies this change to the working solution.
    fn apply(&self, score_director: &mut dyn ScoreDirector<S>) -> Result<(), ProblemChangeError>;
}

/// A boxed problem change for type-erased storage.
pub type BoxedProblemChange<S> = Box<dyn ProblemChange<S>>;

/// A problem change implemented as a closure.
///
/// # Example
///
/// ```
/// use planwright_core::{PlanningSolution, ProblemChangeError, score::SimpleScore};
/// use planwright_solver::realtime::ClosureProblemChange;
///
/// #[derive(Clone, Debug)]
/// struct Solution {
///     capacity: u32,
///     score: Option<SimpleScore>,
/// }
///
/// impl PlanningSolution for Solution {
///     type Score = SimpleScore;
///     fn score(&self) -> Option<Self::Score> { self.score }
///     fn set_score(&mut self, score: Option<Self::Score>) { self.score = score; }
/// }
///
/// let change = ClosureProblemChange::<Solution, _>::new("double_capacity", |sd| {
///     sd.before_problem_fact_changed("capacity");
///     sd.working_solution_mut().capacity *= 2;
///     sd.after_problem_fact_changed("capacity");
///     Ok(())
/// });
/// assert_eq!(change.name(), "double_capacity");
/// ```
pub struct ClosureProblemChange<S: PlanningSolution, F>
where
    F: Fn(&mut dyn ScoreDirector<S>) -> Result<(), ProblemChangeError> + Send,
{
    name: &'static str,
    change_fn: F,
    _phantom: PhantomData<fn() -> S>,
}

impl<S, F> ClosureProblemChange<S, F>
where
    S: PlanningSolution,
    F: Fn(&mut dyn ScoreDirector<S>) -> Result<(), ProblemChangeError> + Send,
{
    /// Creates a new closure-based problem change.
    pub fn new(name: &'static str, change_fn: F) -> Self {
        Self {
            name,
            change_fn,
            _phantom: PhantomData,
        }
    }

    /// Returns the descriptive name of this change.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<S, F> Debug for ClosureProblemChange<S, F>
where
    S: PlanningSolution,
    F: Fn(&mut dyn ScoreDirector<S>) -> Result<(), ProblemChangeError> + Send,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureProblemChange")
            .field("name", &self.name)
            .finish()
    }
}

impl<S, F> ProblemChange<S> for ClosureProblemChange<S, F>
where
    S: PlanningSolution,
    F: Fn(&mut dyn ScoreDirector<S>) -> Result<(), ProblemChangeError> + Send,
{
    fn apply(&self, score_director: &mut dyn ScoreDirector<S>) -> Result<(), ProblemChangeError> {
        (self.change_fn)(score_director)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planwright_core::score::SimpleScore;
    use planwright_scoring::SimpleScoreDirector;
    use planwright_test::nqueens::{calculate_conflicts, NQueensSolution, Queen};

    #[derive(Debug)]
    struct AddQueen {
        row: i64,
    }

    impl ProblemChange<NQueensSolution> for AddQueen {
        fn apply(
            &self,
            sd: &mut dyn ScoreDirector<NQueensSolution>,
        ) -> Result<(), ProblemChangeError> {
            let index = sd.working_solution().queens.len();
            sd.before_entity_added(index);
            sd.working_solution_mut()
                .queens
                .push(Queen::assigned(index as i64, index as i64, self.row));
            sd.after_entity_added(index);
            Ok(())
        }
    }

    #[test]
    fn test_struct_change_adds_entity() {
        let mut director =
            SimpleScoreDirector::new(NQueensSolution::with_rows(&[0]), calculate_conflicts);
        assert_eq!(director.calculate_score(), SimpleScore::of(0));

        AddQueen { row: 0 }.apply(&mut director).unwrap();
        assert_eq!(director.working_solution().queens.len(), 2);
        assert_eq!(director.calculate_score(), SimpleScore::of(-1));
    }

    #[test]
    fn test_closure_change_reports_missing_entity() {
        let change = ClosureProblemChange::<NQueensSolution, _>::new("remove_queen_9", |sd| {
            let index = sd
                .working_solution()
                .queen_index(9)
                .ok_or_else(|| ProblemChangeError::entity_not_found("queen 9"))?;
            sd.before_entity_removed(index);
            sd.working_solution_mut().queens.remove(index);
            sd.after_entity_removed(index);
            Ok(())
        });

        let mut director =
            SimpleScoreDirector::new(NQueensSolution::with_rows(&[0, 2]), calculate_conflicts);
        let err = change.apply(&mut director).unwrap_err();
        assert_eq!(err, ProblemChangeError::entity_not_found("queen 9"));
        assert_eq!(director.working_solution().queens.len(), 2);
        assert!(format!("{change:?}").contains("remove_queen_9"));
    }
}
