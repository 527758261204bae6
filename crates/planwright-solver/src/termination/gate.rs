//! Run flags shared between the solving thread and its controllers.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use planwright_core::SolverError;

const SOLVING: u8 = 0b01;
const TERMINATE_EARLY: u8 = 0b10;

/// Observable lifecycle state of a solver engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    /// No run is active.
    NotSolving,
    /// A run is active and has not been asked to stop.
    Solving,
    /// A run is active and will stop at the next step boundary.
    TerminatingEarly,
}

/// Cooperative stop signal for one engine.
///
/// Both flags live in a single atomic byte so `try_start` can claim a run
/// and clear a stale early-termination request in one transition, and
/// `request_terminate_early` can refuse when no run is active.
///
/// # Example
///
/// ```
/// use planwright_solver::termination::{SolverState, TerminationGate};
///
/// let gate = TerminationGate::new();
/// assert!(!gate.request_terminate_early());
///
/// gate.try_start().unwrap();
/// assert!(gate.request_terminate_early());
/// assert!(!gate.request_terminate_early());
/// assert_eq!(gate.state(), SolverState::TerminatingEarly);
///
/// gate.finish();
/// assert!(gate.is_terminate_early());
/// assert!(!gate.is_solving());
/// ```
pub struct TerminationGate {
    flags: AtomicU8,
}

impl TerminationGate {
    pub fn new() -> Self {
        Self {
            flags: AtomicU8::new(0),
        }
    }

    /// Claims the gate for a new run and clears the early-termination flag.
    ///
    /// Fails without side effects if a run is already active.
    pub fn try_start(&self) -> Result<(), SolverError> {
        self.flags
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |flags| {
                (flags & SOLVING == 0).then_some(SOLVING)
            })
            .map(|_| ())
            .map_err(|_| SolverError::AlreadySolving)
    }

    /// Ends the active run. The early-termination flag stays set until the
    /// next `try_start`.
    pub fn finish(&self) {
        self.flags.fetch_and(!SOLVING, Ordering::SeqCst);
    }

    /// Requests the active run to stop at its next step boundary.
    ///
    /// Returns true only for the call that set the flag during an active
    /// run.
    pub fn request_terminate_early(&self) -> bool {
        self.flags
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |flags| {
                (flags == SOLVING).then_some(SOLVING | TERMINATE_EARLY)
            })
            .is_ok()
    }

    pub fn is_terminate_early(&self) -> bool {
        self.flags.load(Ordering::SeqCst) & TERMINATE_EARLY != 0
    }

    pub fn is_solving(&self) -> bool {
        self.flags.load(Ordering::SeqCst) & SOLVING != 0
    }

    pub fn state(&self) -> SolverState {
        let flags = self.flags.load(Ordering::SeqCst);
        if flags & SOLVING == 0 {
            SolverState::NotSolving
        } else if flags & TERMINATE_EARLY != 0 {
            SolverState::TerminatingEarly
        } else {
            SolverState::Solving
        }
    }

    /// Returns false once early termination is requested or `secondary`
    /// reports the run done.
    pub fn should_continue(&self, secondary: impl FnOnce() -> bool) -> bool {
        !self.is_terminate_early() && !secondary()
    }
}

impl Default for TerminationGate {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TerminationGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerminationGate")
            .field("state", &self.state())
            .field("terminate_early", &self.is_terminate_early())
            .finish()
    }
}
