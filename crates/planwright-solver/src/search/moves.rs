//! Move types.
//!
//! Moves store typed getter/setter function pointers that operate directly
//! on the solution, and register their own undo closures so a
//! `RecordingScoreDirector` can roll them back.

use std::fmt::{self, Debug};

use planwright_core::PlanningSolution;
use planwright_scoring::ScoreDirector;

/// A move that modifies one or more planning variables.
pub trait Move<S: PlanningSolution>: Send + Debug {
    /// Returns true if executing this move would change the solution.
    fn is_doable(&self, score_director: &dyn ScoreDirector<S>) -> bool;

    /// Executes this move, notifying the director and registering undo.
    fn do_move(&self, score_director: &mut dyn ScoreDirector<S>);

    /// Returns the entity indices involved in this move.
    fn entity_indices(&self) -> &[usize];

    /// Returns the variable name this move affects.
    fn variable_name(&self) -> &str;
}

/// A move that assigns a value to an entity's variable.
#[derive(Clone, Copy)]
pub struct ChangeMove<S, V> {
    entity_index: usize,
    to_value: Option<V>,
    getter: fn(&S, usize) -> Option<V>,
    setter: fn(&mut S, usize, Option<V>),
    variable_name: &'static str,
}

impl<S, V: Debug> Debug for ChangeMove<S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeMove")
            .field("entity_index", &self.entity_index)
            .field("variable_name", &self.variable_name)
            .field("to_value", &self.to_value)
            .finish()
    }
}

impl<S, V> ChangeMove<S, V> {
    pub fn new(
        entity_index: usize,
        to_value: Option<V>,
        getter: fn(&S, usize) -> Option<V>,
        setter: fn(&mut S, usize, Option<V>),
        variable_name: &'static str,
    ) -> Self {
        Self {
            entity_index,
            to_value,
            getter,
            setter,
            variable_name,
        }
    }

    pub fn entity_index(&self) -> usize {
        self.entity_index
    }

    pub fn to_value(&self) -> Option<&V> {
        self.to_value.as_ref()
    }
}

impl<S, V> Move<S> for ChangeMove<S, V>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
{
    fn is_doable(&self, score_director: &dyn ScoreDirector<S>) -> bool {
        let current = (self.getter)(score_director.working_solution(), self.entity_index);
        current != self.to_value
    }

    fn do_move(&self, score_director: &mut dyn ScoreDirector<S>) {
        let old_value = (self.getter)(score_director.working_solution(), self.entity_index);

        score_director.before_variable_changed(self.entity_index, self.variable_name);
        (self.setter)(
            score_director.working_solution_mut(),
            self.entity_index,
            self.to_value.clone(),
        );
        score_director.after_variable_changed(self.entity_index, self.variable_name);

        let setter = self.setter;
        let idx = self.entity_index;
        score_director.register_undo(Box::new(move |s: &mut S| {
            setter(s, idx, old_value);
        }));
    }

    fn entity_indices(&self) -> &[usize] {
        std::slice::from_ref(&self.entity_index)
    }

    fn variable_name(&self) -> &str {
        self.variable_name
    }
}

/// A move that exchanges the values of one variable between two entities.
#[derive(Clone, Copy)]
pub struct SwapMove<S, V> {
    indices: [usize; 2],
    getter: fn(&S, usize) -> Option<V>,
    setter: fn(&mut S, usize, Option<V>),
    variable_name: &'static str,
}

impl<S, V> Debug for SwapMove<S, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwapMove")
            .field("left", &self.indices[0])
            .field("right", &self.indices[1])
            .field("variable_name", &self.variable_name)
            .finish()
    }
}

impl<S, V> SwapMove<S, V> {
    pub fn new(
        left: usize,
        right: usize,
        getter: fn(&S, usize) -> Option<V>,
        setter: fn(&mut S, usize, Option<V>),
        variable_name: &'static str,
    ) -> Self {
        Self {
            indices: [left, right],
            getter,
            setter,
            variable_name,
        }
    }
}

impl<S, V> Move<S> for SwapMove<S, V>
where
    S: PlanningSolution,
    V: Clone + PartialEq + Send + Sync + Debug + 'static,
{
    fn is_doable(&self, score_director: &dyn ScoreDirector<S>) -> bool {
        let solution = score_director.working_solution();
        let [left, right] = self.indices;
        left != right && (self.getter)(solution, left) != (self.getter)(solution, right)
    }

    fn do_move(&self, score_director: &mut dyn ScoreDirector<S>) {
        let [left, right] = self.indices;
        let left_value = (self.getter)(score_director.working_solution(), left);
        let right_value = (self.getter)(score_director.working_solution(), right);

        score_director.before_variable_changed(left, self.variable_name);
        score_director.before_variable_changed(right, self.variable_name);
        let solution = score_director.working_solution_mut();
        (self.setter)(solution, left, right_value.clone());
        (self.setter)(solution, right, left_value.clone());
        score_director.after_variable_changed(left, self.variable_name);
        score_director.after_variable_changed(right, self.variable_name);

        let setter = self.setter;
        score_director.register_undo(Box::new(move |s: &mut S| {
            setter(s, left, left_value);
            setter(s, right, right_value);
        }));
    }

    fn entity_indices(&self) -> &[usize] {
        &self.indices
    }

    fn variable_name(&self) -> &str {
        self.variable_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planwright_core::score::SimpleScore;
    use planwright_scoring::{RecordingScoreDirector, SimpleScoreDirector};
    use planwright_test::nqueens::{
        calculate_conflicts, get_queen_row, set_queen_row, NQueensSolution,
    };

    fn change(idx: usize, row: i64) -> ChangeMove<NQueensSolution, i64> {
        ChangeMove::new(idx, Some(row), get_queen_row, set_queen_row, "row")
    }

    fn swap(left: usize, right: usize) -> SwapMove<NQueensSolution, i64> {
        SwapMove::new(left, right, get_queen_row, set_queen_row, "row")
    }

    #[test]
    fn test_change_move_is_doable() {
        let director =
            SimpleScoreDirector::new(NQueensSolution::with_rows(&[0, 1]), calculate_conflicts);
        assert!(!change(0, 0).is_doable(&director));
        assert!(change(0, 3).is_doable(&director));
    }

    #[test]
    fn test_change_move_do_and_undo() {
        let mut director =
            SimpleScoreDirector::new(NQueensSolution::with_rows(&[0, 0, 0, 0]), calculate_conflicts);
        let before = director.calculate_score();

        {
            let mut recording = RecordingScoreDirector::new(&mut director);
            change(1, 2).do_move(&mut recording);
            assert_eq!(get_queen_row(recording.working_solution(), 1), Some(2));
            assert!(recording.calculate_score() > before);
            recording.undo_changes();
        }

        assert_eq!(get_queen_row(director.working_solution(), 1), Some(0));
        assert_eq!(director.calculate_score(), before);
    }

    #[test]
    fn test_swap_move_do_and_undo() {
        let mut director =
            SimpleScoreDirector::new(NQueensSolution::with_rows(&[0, 1, 2]), calculate_conflicts);
        let mv = swap(0, 2);
        assert!(mv.is_doable(&director));
        assert_eq!(mv.entity_indices(), &[0, 2]);

        {
            let mut recording = RecordingScoreDirector::new(&mut director);
            mv.do_move(&mut recording);
            assert_eq!(
                recording.working_solution().rows(),
                vec![Some(2), Some(1), Some(0)]
            );
            recording.undo_changes();
        }

        assert_eq!(
            director.working_solution().rows(),
            vec![Some(0), Some(1), Some(2)]
        );
    }

    #[test]
    fn test_swap_of_equal_values_is_not_doable() {
        let director =
            SimpleScoreDirector::new(NQueensSolution::with_rows(&[3, 3]), calculate_conflicts);
        assert!(!swap(0, 1).is_doable(&director));
        assert!(!swap(1, 1).is_doable(&director));
    }

    #[test]
    fn test_applied_move_without_recording_sticks() {
        let mut director =
            SimpleScoreDirector::new(NQueensSolution::with_rows(&[1, 3, 0, 0]), calculate_conflicts);
        change(3, 2).do_move(&mut director);
        assert_eq!(director.calculate_score(), SimpleScore::of(0));
    }
}
