//! Builds secondary terminations from configuration.

use planwright_config::TerminationConfig;
use planwright_core::{ParseableScore, PlanningSolution, SolverError};

use super::{
    BestScoreFeasibleTermination, BestScoreTermination, StepCountTermination, Termination,
    TimeTermination, UnimprovedStepCountTermination, UnimprovedTimeTermination,
};

/// Converts a termination config into the list of conditions it names.
///
/// The engine stops when any returned condition is met. An unparsable
/// `best_score_limit` is a configuration error.
pub fn terminations_from_config<S>(
    config: &TerminationConfig,
) -> Result<Vec<Box<dyn Termination<S>>>, SolverError>
where
    S: PlanningSolution,
    S::Score: ParseableScore,
{
    let mut terminations: Vec<Box<dyn Termination<S>>> = Vec::new();

    if let Some(limit) = config.time_limit() {
        terminations.push(Box::new(TimeTermination::new(limit)));
    }
    if let Some(limit) = config.step_count_limit {
        terminations.push(Box::new(StepCountTermination::new(limit)));
    }
    if let Some(text) = &config.best_score_limit {
        let target = S::Score::parse(text).map_err(|e| {
            SolverError::Config(format!("invalid best_score_limit {text:?}: {e}"))
        })?;
        terminations.push(Box::new(BestScoreTermination::new(target)));
    }
    if config.best_score_feasible {
        terminations.push(Box::new(BestScoreFeasibleTermination::new()));
    }
    if let Some(limit) = config.unimproved_step_count_limit {
        terminations.push(Box::new(UnimprovedStepCountTermination::new(limit)));
    }
    if let Some(limit) = config.unimproved_time_limit() {
        terminations.push(Box::new(UnimprovedTimeTermination::new(limit)));
    }
    if terminations.is_empty() {
        tracing::debug!(event = "no_termination", "No termination configured");
    }

    Ok(terminations)
}

