//! Shared test fixtures for planwright crates.
//!
//! This crate provides data types and pure functions for testing.
//! It does NOT depend on `planwright-scoring` so that crate can use it as a
//! dev-dependency without a cycle.
//!
//! - [`nqueens`] - N-Queens problem data types and conflict calculation
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! planwright-test = { workspace = true }
//! ```

pub mod nqueens;

pub use nqueens::{NQueensSolution, Queen};
