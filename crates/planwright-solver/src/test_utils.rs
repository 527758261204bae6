//! Test utilities for planwright-solver
//!
//! Builds scopes, selectors and algorithms over the shared N-Queens fixture.

use planwright_scoring::{ScoreDirectorFactory, SimpleScoreDirector};
use planwright_test::nqueens::{
    calculate_conflicts, get_queen_row, queen_count, row_values, set_queen_row, NQueensSolution,
};

use crate::scope::SolverScope;
use crate::search::{ChangeMoveSelector, FirstFitConstruction, MoveSelector};

/// Calculator type of the N-Queens fixture.
pub type NQueensCalculator = fn(&NQueensSolution) -> planwright_core::score::SimpleScore;

/// A scope over a board with queens at `rows`, one per column.
pub fn nqueens_scope(rows: &[i64], seed: Option<u64>) -> SolverScope<'static, NQueensSolution> {
    nqueens_scope_for(NQueensSolution::with_rows(rows), seed)
}

pub fn nqueens_scope_for(
    solution: NQueensSolution,
    seed: Option<u64>,
) -> SolverScope<'static, NQueensSolution> {
    let director = SimpleScoreDirector::new(solution, calculate_conflicts);
    SolverScope::with_optional_seed(Box::new(director), seed)
}

pub fn nqueens_factory() -> ScoreDirectorFactory<NQueensSolution, NQueensCalculator> {
    ScoreDirectorFactory::new(calculate_conflicts as NQueensCalculator)
}

pub fn change_selector() -> Box<dyn MoveSelector<NQueensSolution>> {
    Box::new(ChangeMoveSelector::new(
        queen_count,
        row_values,
        get_queen_row,
        set_queen_row,
        "row",
    ))
}

pub fn construction() -> FirstFitConstruction<NQueensSolution, i64> {
    FirstFitConstruction::new(queen_count, row_values, get_queen_row, set_queen_row, "row")
}
