//! Termination conditions for solving runs.
//!
//! Two layers decide when a run stops:
//! - [`TerminationGate`] holds the run flags other threads flip
//!   (`is_solving`, the sticky early-termination request)
//! - [`Termination`] implementations are secondary conditions (time, steps,
//!   score targets) polled by the solving thread after every step

mod best_score;
mod composite;
mod config;
mod gate;
mod step_count;
mod time;
mod unimproved;

use std::fmt::Debug;

use planwright_core::PlanningSolution;

use crate::scope::SolverScope;

pub use best_score::{BestScoreFeasibleTermination, BestScoreTermination};
pub use composite::{AndTermination, OrTermination};
pub use config::terminations_from_config;
pub use gate::{SolverState, TerminationGate};
pub use step_count::StepCountTermination;
pub use time::TimeTermination;
pub use unimproved::{UnimprovedStepCountTermination, UnimprovedTimeTermination};

/// Trait for determining when to stop solving.
///
/// Implementations read everything they need from the scope, so a single
/// instance can be shared by consecutive runs of the same engine.
pub trait Termination<S: PlanningSolution>: Send + Sync + Debug {
    /// Returns true if solving should terminate.
    fn is_terminated(&self, solver_scope: &SolverScope<'_, S>) -> bool;
}

impl<S: PlanningSolution> Termination<S> for Box<dyn Termination<S>> {
    fn is_terminated(&self, solver_scope: &SolverScope<'_, S>) -> bool {
        self.as_ref().is_terminated(solver_scope)
    }
}
