//! Domain model traits.

mod traits;

#[cfg(test)]
mod tests;

pub use traits::PlanningSolution;
