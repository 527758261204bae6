//! Time-based termination.

use std::time::Duration;

use planwright_core::PlanningSolution;

use super::Termination;
use crate::scope::SolverScope;

/// Terminates after a time limit, measured from the last restart.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use planwright_solver::termination::TimeTermination;
///
/// let term = TimeTermination::new(Duration::from_secs(30));
/// let term = TimeTermination::seconds(30);
/// let term = TimeTermination::millis(500);
/// ```
#[derive(Debug, Clone)]
pub struct TimeTermination {
    limit: Duration,
}

impl TimeTermination {
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

impl<S: PlanningSolution> Termination<S> for TimeTermination {
    fn is_terminated(&self, solver_scope: &SolverScope<'_, S>) -> bool {
        solver_scope.time_since_restart() >= self.limit
    }
}
