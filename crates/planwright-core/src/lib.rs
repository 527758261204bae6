//! Planwright Core - Core types and traits for long-running optimization jobs
//!
//! This crate provides the fundamental abstractions shared by the other
//! planwright crates:
//! - Score types for representing solution quality
//! - The `PlanningSolution` domain trait
//! - The solver error taxonomy

pub mod domain;
pub mod error;
pub mod score;

pub use domain::PlanningSolution;
pub use error::{DispatchError, ListenerFault, ProblemChangeError, SolverError};
pub use score::{HardSoftScore, ParseableScore, Score, ScoreParseError, SimpleScore};
