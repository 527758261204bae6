//! Solver entry points that hide the engine wiring.

use std::sync::Arc;
use std::thread;

use tokio::sync::oneshot;
use tracing::info;

use planwright_config::SolverConfig;
use planwright_core::{ParseableScore, PlanningSolution, SolverError};
use planwright_scoring::ScoreDirectorFactory;
use planwright_solver::{
    ChangeMoveSelector, FirstFitConstruction, LocalSearch, MoveSelector, SearchChain,
    SolverEngine, SwapMoveSelector, UnionMoveSelector,
};

/// Accessors for one planning variable of type `V`, shared by every entity
/// of the solution.
pub struct BasicVariable<S, V> {
    pub entity_count: fn(&S) -> usize,
    pub values: fn(&S) -> Vec<V>,
    pub getter: fn(&S, usize) -> Option<V>,
    pub setter: fn(&mut S, usize, Option<V>),
    pub name: &'static str,
}

impl<S, V> Clone for BasicVariable<S, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, V> Copy for BasicVariable<S, V> {}

/// Builds an engine that first assigns every uninitialized entity and then
/// improves the solution with local search, wired from `config`.
pub fn basic_engine<S, V, C>(
    calculator: C,
    variable: BasicVariable<S, V>,
    config: SolverConfig,
) -> Result<SolverEngine<S, C>, SolverError>
where
    S: PlanningSolution,
    S::Score: ParseableScore,
    V: Clone + PartialEq + Send + Sync + std::fmt::Debug + 'static,
    C: Fn(&S) -> S::Score + Send + Sync,
{
    let selector = UnionMoveSelector::new(vec![
        Box::new(ChangeMoveSelector::new(
            variable.entity_count,
            variable.values,
            variable.getter,
            variable.setter,
            variable.name,
        )) as Box<dyn MoveSelector<S>>,
        Box::new(SwapMoveSelector::new(
            variable.entity_count,
            variable.getter,
            variable.setter,
            variable.name,
        )),
    ]);
    let local_search = LocalSearch::from_config(
        &config.local_search.clone().unwrap_or_default(),
        Box::new(selector),
    )?;
    let construction = FirstFitConstruction::new(
        variable.entity_count,
        variable.values,
        variable.getter,
        variable.setter,
        variable.name,
    );
    let chain = SearchChain::new(Vec::new())
        .then(Box::new(construction))
        .then(Box::new(local_search));

    Ok(SolverEngine::new(ScoreDirectorFactory::new(calculator))
        .with_search(Box::new(chain))
        .with_config(config))
}

/// Solves `problem` with the config in `solver.toml`, or defaults when the
/// file is missing or invalid.
///
/// Without a termination section the run ends only when the search is
/// exhausted, so configure at least one limit for local search.
pub fn run_solver<S, V, C>(
    problem: S,
    calculator: C,
    variable: BasicVariable<S, V>,
) -> Result<S, SolverError>
where
    S: PlanningSolution,
    S::Score: ParseableScore,
    V: Clone + PartialEq + Send + Sync + std::fmt::Debug + 'static,
    C: Fn(&S) -> S::Score + Send + Sync,
{
    let config = SolverConfig::load("solver.toml").unwrap_or_default();
    basic_engine(calculator, variable, config)?.solve(problem)
}

/// Runs `engine.solve(problem)` on a dedicated thread.
///
/// The receiver resolves with the solve result; keep the engine handle to
/// submit fact changes or terminate early meanwhile.
pub fn spawn_solve<S, C>(
    engine: Arc<SolverEngine<S, C>>,
    problem: S,
) -> oneshot::Receiver<Result<S, SolverError>>
where
    S: PlanningSolution,
    C: Fn(&S) -> S::Score + Send + Sync + 'static,
{
    let (sender, receiver) = oneshot::channel();
    thread::spawn(move || {
        let result = engine.solve(problem);
        if sender.send(result).is_err() {
            info!(event = "solve_result_dropped");
        }
    });
    receiver
}

#[cfg(test)]
mod tests {
    use super::*;
    use planwright_config::TerminationConfig;
    use planwright_core::score::SimpleScore;
    use planwright_solver::StepCountTermination;
    use planwright_test::nqueens::{
        calculate_conflicts, get_queen_row, queen_count, row_values, set_queen_row,
        NQueensSolution,
    };

    fn rows() -> BasicVariable<NQueensSolution, i64> {
        BasicVariable {
            entity_count: queen_count,
            values: row_values,
            getter: get_queen_row,
            setter: set_queen_row,
            name: "row",
        }
    }

    fn step_limited(steps: u64) -> SolverConfig {
        SolverConfig::new()
            .with_random_seed(3)
            .with_termination(TerminationConfig {
                step_count_limit: Some(steps),
                ..TerminationConfig::default()
            })
    }

    #[test]
    fn test_basic_engine_solves_from_scratch() {
        let engine = basic_engine(calculate_conflicts, rows(), step_limited(300)).unwrap();
        let solved = engine.solve(NQueensSolution::uninitialized(6)).unwrap();

        assert!(solved.queens.iter().all(|q| q.row.is_some()));
        assert!(solved.score.unwrap() <= SimpleScore::of(0));
    }

    #[tokio::test]
    async fn test_spawn_solve_resolves_with_the_result() {
        let engine = Arc::new(
            SolverEngine::new(ScoreDirectorFactory::new(calculate_conflicts))
                .with_search(Box::new(LocalSearch::new(Box::new(ChangeMoveSelector::new(
                    queen_count,
                    row_values,
                    get_queen_row,
                    set_queen_row,
                    "row",
                )))))
                .with_termination(Box::new(StepCountTermination::new(50))),
        );

        let solved = spawn_solve(Arc::clone(&engine), NQueensSolution::all_in_first_row(4))
            .await
            .unwrap()
            .unwrap();

        assert!(solved.score.unwrap() > SimpleScore::of(-6));
        assert!(!engine.is_solving());
    }
}
