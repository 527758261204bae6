//! Termination conditions based on lack of improvement.

use std::time::Duration;

use planwright_core::PlanningSolution;

use super::Termination;
use crate::scope::SolverScope;

/// Terminates if the best score has not improved for a number of steps.
///
/// A restart counts as an improvement, so fact changes give the search a
/// fresh allowance.
///
/// # Example
///
/// ```
/// use planwright_solver::termination::UnimprovedStepCountTermination;
///
/// let term = UnimprovedStepCountTermination::new(100);
/// ```
#[derive(Debug, Clone)]
pub struct UnimprovedStepCountTermination {
    limit: u64,
}

impl UnimprovedStepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }
}

impl<S: PlanningSolution> Termination<S> for UnimprovedStepCountTermination {
    fn is_terminated(&self, solver_scope: &SolverScope<'_, S>) -> bool {
        solver_scope.steps_since_improvement() >= self.limit
    }
}

/// Terminates if the best score has not improved for a duration.
#[derive(Debug, Clone)]
pub struct UnimprovedTimeTermination {
    limit: Duration,
}

impl UnimprovedTimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }
}

impl<S: PlanningSolution> Termination<S> for UnimprovedTimeTermination {
    fn is_terminated(&self, solver_scope: &SolverScope<'_, S>) -> bool {
        solver_scope.time_since_improvement() >= self.limit
    }
}
