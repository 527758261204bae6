use crate::score::Score;

/// The problem a solver run works on, together with its current assignment.
///
/// The engine clones it into best snapshots and shares those with other
/// threads through an `Arc`, hence the `Clone + Send + Sync` bounds.
///
/// ```
/// use planwright_core::{PlanningSolution, SimpleScore};
///
/// #[derive(Clone)]
/// struct Seating {
///     seats: Vec<Option<u32>>,
///     score: Option<SimpleScore>,
/// }
///
/// impl PlanningSolution for Seating {
///     type Score = SimpleScore;
///
///     fn score(&self) -> Option<SimpleScore> {
///         self.score
///     }
///
///     fn set_score(&mut self, score: Option<SimpleScore>) {
///         self.score = score;
///     }
///
///     fn is_initialized(&self) -> bool {
///         self.seats.iter().all(Option::is_some)
///     }
/// }
/// ```
pub trait PlanningSolution: Clone + Send + Sync + 'static {
    type Score: Score;

    /// `None` until the solution has been evaluated.
    fn score(&self) -> Option<Self::Score>;

    fn set_score(&mut self, score: Option<Self::Score>);

    /// Whether every planning variable holds a value. An uninitialized
    /// solution is never published with a score.
    fn is_initialized(&self) -> bool {
        true
    }
}
