//! Tests for RecordingScoreDirector.

use super::recording::RecordingScoreDirector;
use super::{ScoreDirector, SimpleScoreDirector};
use planwright_core::score::SimpleScore;
use planwright_test::nqueens::{calculate_conflicts, get_queen_row, set_queen_row, NQueensSolution};

#[test]
fn test_recording_register_undo() {
    let mut inner =
        SimpleScoreDirector::new(NQueensSolution::with_rows(&[0]), calculate_conflicts);

    {
        let mut recording = RecordingScoreDirector::new(&mut inner);

        let old_value = get_queen_row(recording.working_solution(), 0);
        recording.before_variable_changed(0, "row");
        set_queen_row(recording.working_solution_mut(), 0, Some(5));
        recording.after_variable_changed(0, "row");
        recording.register_undo(Box::new(move |s: &mut NQueensSolution| {
            set_queen_row(s, 0, old_value);
        }));

        assert_eq!(recording.change_count(), 1);
        assert_eq!(get_queen_row(recording.working_solution(), 0), Some(5));

        recording.undo_changes();
        assert!(recording.is_empty());
    }

    assert_eq!(get_queen_row(inner.working_solution(), 0), Some(0));
}

#[test]
fn test_recording_multiple_undo_in_reverse_order() {
    let mut inner =
        SimpleScoreDirector::new(NQueensSolution::with_rows(&[0, 1, 2]), calculate_conflicts);

    {
        let mut recording = RecordingScoreDirector::new(&mut inner);

        for i in 0..3 {
            let old = get_queen_row(recording.working_solution(), i);
            set_queen_row(recording.working_solution_mut(), i, Some(10 + i as i64));
            recording.register_undo(Box::new(move |s: &mut NQueensSolution| {
                set_queen_row(s, i, old);
            }));
        }
        // Second change to the same queen must unwind to the original value.
        let old = get_queen_row(recording.working_solution(), 0);
        set_queen_row(recording.working_solution_mut(), 0, Some(99));
        recording.register_undo(Box::new(move |s: &mut NQueensSolution| {
            set_queen_row(s, 0, old);
        }));

        assert_eq!(recording.change_count(), 4);
        recording.undo_changes();
    }

    assert_eq!(inner.working_solution().rows(), vec![Some(0), Some(1), Some(2)]);
}

#[test]
fn test_undo_restores_score() {
    let mut inner =
        SimpleScoreDirector::new(NQueensSolution::with_rows(&[1, 3, 0, 2]), calculate_conflicts);
    assert_eq!(inner.calculate_score(), SimpleScore::of(0));

    {
        let mut recording = RecordingScoreDirector::new(&mut inner);
        recording.before_variable_changed(0, "row");
        set_queen_row(recording.working_solution_mut(), 0, Some(3));
        recording.after_variable_changed(0, "row");
        recording.register_undo(Box::new(|s: &mut NQueensSolution| {
            set_queen_row(s, 0, Some(1));
        }));

        assert!(recording.calculate_score() < SimpleScore::of(0));
        recording.undo_changes();
        assert_eq!(recording.calculate_score(), SimpleScore::of(0));
    }
}

#[test]
fn test_commit_keeps_changes() {
    let mut inner =
        SimpleScoreDirector::new(NQueensSolution::with_rows(&[0, 0]), calculate_conflicts);

    {
        let mut recording = RecordingScoreDirector::new(&mut inner);
        set_queen_row(recording.working_solution_mut(), 1, Some(3));
        recording.register_undo(Box::new(|s: &mut NQueensSolution| {
            set_queen_row(s, 1, Some(0));
        }));
        recording.commit();
        assert!(recording.is_empty());
        recording.undo_changes();
    }

    assert_eq!(get_queen_row(inner.working_solution(), 1), Some(3));
}
