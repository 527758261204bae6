//! Error types for planwright

use thiserror::Error;

/// Main error type for solver operations.
///
/// Variants follow the failure taxonomy of a solving run: configuration
/// errors and concurrent misuse are rejected before any state changes,
/// problem change failures abort the run, listener faults never do.
#[derive(Debug, Error)]
pub enum SolverError {
    /// Invalid or missing evaluator/algorithm wiring.
    #[error("Configuration error: {0}")]
    Config(String),

    /// `solve` was called while the same engine was already solving.
    #[error("Solver is already solving")]
    AlreadySolving,

    /// A problem fact change failed to apply; the run was aborted.
    #[error("Problem change {change} failed: {source}")]
    ProblemChange {
        /// Debug rendering of the failing change.
        change: String,
        #[source]
        source: ProblemChangeError,
    },

    /// One or more event listeners faulted during dispatch. The engine
    /// logs these and keeps solving; `solve` never returns this variant.
    #[error(transparent)]
    Listener(#[from] DispatchError),
}

/// Error returned by a problem fact change that cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProblemChangeError {
    /// The change references an entity that is not in the working solution.
    #[error("entity {entity} not found")]
    EntityNotFound { entity: String },

    /// The change references a problem fact that is not in the working solution.
    #[error("problem fact {fact} not found")]
    FactNotFound { fact: String },

    /// Any other failure.
    #[error("{0}")]
    Other(String),
}

impl ProblemChangeError {
    pub fn entity_not_found(entity: impl ToString) -> Self {
        ProblemChangeError::EntityNotFound {
            entity: entity.to_string(),
        }
    }

    pub fn fact_not_found(fact: impl ToString) -> Self {
        ProblemChangeError::FactNotFound {
            fact: fact.to_string(),
        }
    }

    pub fn other(message: impl Into<String>) -> Self {
        ProblemChangeError::Other(message.into())
    }
}

/// A single listener fault caught during event dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerFault {
    /// Registration handle id of the faulting listener.
    pub handle: u64,
    /// Debug rendering of the listener.
    pub listener: String,
    /// Panic message, if one could be extracted.
    pub message: String,
}

/// Faults collected while dispatching one event to every listener.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} event listener(s) faulted while handling {event}", faults.len())]
pub struct DispatchError {
    /// Name of the event being dispatched.
    pub event: &'static str,
    /// Faults in dispatch order.
    pub faults: Vec<ListenerFault>,
}

/// Result type alias for solver operations
pub type Result<T> = std::result::Result<T, SolverError>;
