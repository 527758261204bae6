//! Real-time planning support.
//!
//! Allows submitting problem fact changes while the solver is running, or
//! before it starts. Changes are queued here and applied by the solving
//! thread between steps, in the order they were submitted.
//!
//! # Overview
//!
//! Real-time planning enables dynamic updates to the problem during solving:
//! - Add new entities (e.g., new orders, tasks, employees)
//! - Remove entities (e.g., cancelled orders)
//! - Modify problem facts (e.g., a shrinking board, a closed room)
//!
//! # Example
//!
//! ```
//! use planwright_core::{PlanningSolution, ProblemChangeError, score::SimpleScore};
//! use planwright_scoring::ScoreDirector;
//! use planwright_solver::realtime::{FactChangeQueue, ProblemChange};
//!
//! #[derive(Clone, Debug)]
//! struct Schedule {
//!     tasks: Vec<usize>,
//!     score: Option<SimpleScore>,
//! }
//!
//! impl PlanningSolution for Schedule {
//!     type Score = SimpleScore;
//!     fn score(&self) -> Option<Self::Score> { self.score }
//!     fn set_score(&mut self, score: Option<Self::Score>) { self.score = score; }
//! }
//!
//! #[derive(Debug)]
//! struct AddTask { id: usize }
//!
//! impl ProblemChange<Schedule> for AddTask {
//!     fn apply(&self, sd: &mut dyn ScoreDirector<Schedule>) -> Result<(), ProblemChangeError> {
//!         let index = sd.working_solution().tasks.len();
//!         sd.before_entity_added(index);
//!         sd.working_solution_mut().tasks.push(self.id);
//!         sd.after_entity_added(index);
//!         Ok(())
//!     }
//! }
//!
//! let queue = FactChangeQueue::<Schedule>::new();
//! assert!(queue.enqueue(Box::new(AddTask { id: 7 })));
//! assert!(!queue.is_every_change_processed());
//! ```

mod problem_change;
mod queue;

pub use problem_change::{BoxedProblemChange, ClosureProblemChange, ProblemChange};
pub use queue::FactChangeQueue;
