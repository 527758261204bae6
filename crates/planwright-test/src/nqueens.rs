//! N-Queens problem test fixtures.
//!
//! The N-Queens problem places N queens on an N×N chessboard such that no
//! two queens threaten each other. Each queen owns a fixed column and a
//! planning variable `row`. The board size `n` is a problem fact, so fact
//! changes can grow or shrink the board while a solver is running.
//!
//! # Example
//!
//! ```
//! use planwright_core::score::SimpleScore;
//! use planwright_test::nqueens::{calculate_conflicts, NQueensSolution};
//!
//! let solution = NQueensSolution::with_rows(&[1, 3, 0, 2]);
//! assert_eq!(calculate_conflicts(&solution), SimpleScore::of(0));
//! ```

use planwright_core::score::SimpleScore;
use planwright_core::PlanningSolution;

/// A queen entity in the N-Queens problem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Queen {
    pub id: i64,
    pub column: i64,
    pub row: Option<i64>,
}

impl Queen {
    /// Creates a new queen at the given column with an optional row.
    pub fn new(id: i64, column: i64, row: Option<i64>) -> Self {
        Self { id, column, row }
    }

    /// Creates a queen with an assigned row.
    pub fn assigned(id: i64, column: i64, row: i64) -> Self {
        Self::new(id, column, Some(row))
    }

    /// Creates a queen with no row assigned.
    pub fn unassigned(id: i64, column: i64) -> Self {
        Self::new(id, column, None)
    }
}

/// N-Queens problem solution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NQueensSolution {
    /// Board size; rows range over `0..n`.
    pub n: i64,
    pub queens: Vec<Queen>,
    pub score: Option<SimpleScore>,
}

impl NQueensSolution {
    /// Creates a solution with the given queens on an `n`×`n` board.
    pub fn new(n: i64, queens: Vec<Queen>) -> Self {
        Self {
            n,
            queens,
            score: None,
        }
    }

    /// Creates a solution with n queens and no row assigned.
    pub fn uninitialized(n: usize) -> Self {
        let queens = (0..n)
            .map(|i| Queen::unassigned(i as i64, i as i64))
            .collect();
        Self::new(n as i64, queens)
    }

    /// Creates a solution with queens at the specified rows, one per column.
    pub fn with_rows(rows: &[i64]) -> Self {
        let queens = rows
            .iter()
            .enumerate()
            .map(|(i, &row)| Queen::assigned(i as i64, i as i64, row))
            .collect();
        Self::new(rows.len() as i64, queens)
    }

    /// Creates a solution with every queen on row 0, the worst start.
    pub fn all_in_first_row(n: usize) -> Self {
        Self::with_rows(&vec![0; n])
    }

    /// Returns the index of the queen with the given id.
    pub fn queen_index(&self, id: i64) -> Option<usize> {
        self.queens.iter().position(|q| q.id == id)
    }

    /// Returns the assigned rows in column order.
    pub fn rows(&self) -> Vec<Option<i64>> {
        self.queens.iter().map(|q| q.row).collect()
    }
}

impl PlanningSolution for NQueensSolution {
    type Score = SimpleScore;

    fn score(&self) -> Option<Self::Score> {
        self.score
    }

    fn set_score(&mut self, score: Option<Self::Score>) {
        self.score = score;
    }

    fn is_initialized(&self) -> bool {
        self.queens.iter().all(|q| q.row.is_some())
    }
}

/// Returns the number of queens.
pub fn queen_count(s: &NQueensSolution) -> usize {
    s.queens.len()
}

/// Gets the row value for a queen at the given index.
///
/// This is the typed getter for the planning variable.
pub fn get_queen_row(s: &NQueensSolution, idx: usize) -> Option<i64> {
    s.queens.get(idx).and_then(|q| q.row)
}

/// Sets the row value for a queen at the given index.
///
/// This is the typed setter for the planning variable.
pub fn set_queen_row(s: &mut NQueensSolution, idx: usize, v: Option<i64>) {
    if let Some(queen) = s.queens.get_mut(idx) {
        queen.row = v;
    }
}

/// Returns the candidate rows for the current board size.
pub fn row_values(s: &NQueensSolution) -> Vec<i64> {
    (0..s.n).collect()
}

/// Calculates the number of conflicts in an N-Queens solution.
///
/// Counts row conflicts and diagonal conflicts between all pairs of
/// assigned queens, plus one per queen placed outside the board.
/// Returns a negative score where 0 means no conflicts.
pub fn calculate_conflicts(solution: &NQueensSolution) -> SimpleScore {
    let mut conflicts = 0i64;
    let queens = &solution.queens;

    for (i, queen) in queens.iter().enumerate() {
        if queen.row.is_some_and(|row| row < 0 || row >= solution.n) {
            conflicts += 1;
        }
        for other in &queens[i + 1..] {
            if let (Some(row_i), Some(row_j)) = (queen.row, other.row) {
                if row_i == row_j {
                    conflicts += 1;
                }
                let col_diff = (other.column - queen.column).abs();
                if (row_i - row_j).abs() == col_diff {
                    conflicts += 1;
                }
            }
        }
    }

    SimpleScore::of(-conflicts)
}
