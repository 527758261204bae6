//! Planwright - a long-running planning solver
//!
//! Solve on one thread while others feed problem fact changes, stop the run
//! early, read the best solution so far, or listen for improvements.
//!
//! # Example
//!
//! ```rust
//! use planwright::prelude::*;
//!
//! // Score types are re-exported
//! let score = HardSoftScore::of(0, -100);
//! assert_eq!(score.hard(), 0);
//! assert_eq!(score.soft(), -100);
//! ```

// Score types
pub use planwright_core::score::{HardSoftScore, ParseableScore, Score, SimpleScore};

// Domain and errors
pub use planwright_core::{PlanningSolution, ProblemChangeError, SolverError};

// Configuration
pub use planwright_config::SolverConfig;

// Evaluation
pub use planwright_scoring::{ScoreDirector, ScoreDirectorFactory};

// Engine and its collaborators
pub use planwright_solver::{
    BestSolutionChangedEvent, ChannelEventListener, ClosureProblemChange, ListenerHandle,
    LoggingEventListener, ProblemChange, RunOutcome, SolverEngine, SolverEventListener,
    SolverState,
};

#[cfg(feature = "console")]
pub mod console;

mod solver;
pub use solver::{basic_engine, run_solver, spawn_solve, BasicVariable};

pub mod prelude {
    pub use super::{HardSoftScore, ParseableScore, Score, SimpleScore};
    pub use super::{PlanningSolution, ProblemChangeError, SolverError};
    pub use super::{
        BestSolutionChangedEvent, ProblemChange, ScoreDirector, SolverConfig, SolverEngine,
        SolverEventListener,
    };
    pub use super::{basic_engine, run_solver, BasicVariable};
}
