//! Score director implementations.
//!
//! - [`SimpleScoreDirector`] - Full recalculation with a dirty flag
//! - [`RecordingScoreDirector`] - Automatic undo tracking wrapper

mod factory;
mod simple;
mod traits;

pub mod recording;

#[cfg(test)]
mod recording_tests;
#[cfg(test)]
mod tests;

pub use factory::ScoreDirectorFactory;
pub use recording::RecordingScoreDirector;
pub use simple::SimpleScoreDirector;
pub use traits::ScoreDirector;
