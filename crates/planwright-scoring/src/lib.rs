//! Score calculation for planwright.
//!
//! A score director owns the working solution of a solving run, tracks
//! whether its score is stale, and lets moves and problem fact changes
//! announce what they modify so the score can be recalculated on demand.

pub mod director;

pub use director::{
    RecordingScoreDirector, ScoreDirector, ScoreDirectorFactory, SimpleScoreDirector,
};
