//! Planwright Solver Engine
//!
//! This crate provides the long-running solver engine:
//! - `SolverEngine`, one blocking run at a time with thread-safe control
//! - Problem fact changes applied between steps (realtime module)
//! - Cooperative early termination and secondary termination conditions
//! - Best solution events with per-listener fault isolation
//! - Reference search algorithms (construction, local search, chains)

pub mod engine;
pub mod event;
pub mod realtime;
pub mod scope;
pub mod search;
pub mod termination;

#[cfg(test)]
pub(crate) mod test_utils;

pub use engine::{RunOutcome, SolverEngine};
pub use event::{
    BestSolutionChangedEvent, ChannelEventListener, CountingEventListener, EventBus,
    ListenerHandle, LoggingEventListener, SolverEventListener,
};
pub use realtime::{BoxedProblemChange, ClosureProblemChange, FactChangeQueue, ProblemChange};
pub use scope::SolverScope;
pub use search::{
    acceptor_from_config, Acceptor, ChangeMove, ChangeMoveSelector, FirstFitConstruction,
    HillClimbingAcceptor, LateAcceptanceAcceptor, LocalSearch, Move, MoveSelector, NextMove,
    SearchAlgorithm, SearchChain, SimulatedAnnealingAcceptor, SwapMove, SwapMoveSelector,
    UnionMoveSelector,
};
pub use termination::{
    terminations_from_config, AndTermination, BestScoreFeasibleTermination, BestScoreTermination,
    OrTermination, SolverState, StepCountTermination, Termination, TerminationGate,
    TimeTermination, UnimprovedStepCountTermination, UnimprovedTimeTermination,
};
