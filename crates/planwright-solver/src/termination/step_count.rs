//! Step count termination.

use planwright_core::PlanningSolution;

use super::Termination;
use crate::scope::SolverScope;

/// Terminates after a number of steps since the last restart.
///
/// # Example
///
/// ```
/// use planwright_solver::termination::StepCountTermination;
///
/// let term = StepCountTermination::new(1000);
/// ```
#[derive(Debug, Clone)]
pub struct StepCountTermination {
    limit: u64,
}

impl StepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl<S: PlanningSolution> Termination<S> for StepCountTermination {
    fn is_terminated(&self, solver_scope: &SolverScope<'_, S>) -> bool {
        solver_scope.step_count_since_restart() >= self.limit
    }
}
