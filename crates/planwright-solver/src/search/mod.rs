//! Reference search algorithms.
//!
//! The engine drives any [`SearchAlgorithm`]: once per step it asks for the
//! next move, applies it, and reports the resulting score back. The
//! algorithms here cover the common setups:
//! - [`FirstFitConstruction`] assigns uninitialized entities one per step
//! - [`LocalSearch`] samples moves and applies the best accepted one
//! - [`SearchChain`] runs algorithms one after another

mod acceptor;
mod chain;
mod construction;
mod local_search;
mod moves;
mod selector;

use std::fmt::Debug;

use planwright_core::PlanningSolution;

use crate::scope::SolverScope;

pub use acceptor::{
    acceptor_from_config, Acceptor, HillClimbingAcceptor, LateAcceptanceAcceptor,
    SimulatedAnnealingAcceptor,
};
pub use chain::SearchChain;
pub use construction::FirstFitConstruction;
pub use local_search::LocalSearch;
pub use moves::{ChangeMove, Move, SwapMove};
pub use selector::{ChangeMoveSelector, MoveSelector, SwapMoveSelector, UnionMoveSelector};

/// Outcome of asking a search algorithm for its next step.
pub enum NextMove<S: PlanningSolution> {
    /// A move to apply as this step.
    Found(Box<dyn Move<S>>),
    /// Nothing acceptable this time; the engine counts the step and asks
    /// again.
    NotFound,
    /// The algorithm has nothing left to do for the current problem.
    Exhausted,
}

impl<S: PlanningSolution> Debug for NextMove<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NextMove::Found(m) => f.debug_tuple("Found").field(m).finish(),
            NextMove::NotFound => f.write_str("NotFound"),
            NextMove::Exhausted => f.write_str("Exhausted"),
        }
    }
}

/// A pluggable search strategy.
///
/// Algorithms may mutate the working solution while evaluating candidates
/// but must leave it unchanged when `next_move` returns; the engine applies
/// the chosen move itself.
pub trait SearchAlgorithm<S: PlanningSolution>: Send + Debug {
    /// Called once per run before the first step.
    fn solving_started(&mut self, _solver_scope: &mut SolverScope<'_, S>) {}

    /// Called after problem fact changes replaced the working solution.
    fn solving_restarted(&mut self, solver_scope: &mut SolverScope<'_, S>) {
        self.solving_started(solver_scope);
    }

    /// Picks the move for the next step.
    fn next_move(&mut self, solver_scope: &mut SolverScope<'_, S>) -> NextMove<S>;

    /// Called after the engine applied the chosen move.
    fn step_ended(&mut self, _step_score: &S::Score) {}

    /// Short name for logging.
    fn algorithm_name(&self) -> &'static str;
}
