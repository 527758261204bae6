//! Tests for SimpleScoreDirector and ScoreDirectorFactory.

use super::{ScoreDirector, ScoreDirectorFactory, SimpleScoreDirector};
use planwright_core::score::SimpleScore;
use planwright_test::nqueens::{calculate_conflicts, set_queen_row, NQueensSolution, Queen};

#[test]
fn test_simple_director_caches_clean_score() {
    let mut director =
        SimpleScoreDirector::new(NQueensSolution::with_rows(&[0, 0, 0]), calculate_conflicts);
    assert!(director.is_score_dirty());

    assert_eq!(director.calculate_score(), SimpleScore::of(-3));
    assert_eq!(director.calculate_score(), SimpleScore::of(-3));
    assert_eq!(director.calculation_count(), 1);
    assert!(!director.is_score_dirty());
}

#[test]
fn test_calculate_score_writes_back_to_solution() {
    let mut director =
        SimpleScoreDirector::new(NQueensSolution::with_rows(&[1, 3, 0, 2]), calculate_conflicts);
    director.calculate_score();
    assert_eq!(director.working_solution().score, Some(SimpleScore::of(0)));
}

#[test]
fn test_variable_change_marks_dirty() {
    let mut director =
        SimpleScoreDirector::new(NQueensSolution::with_rows(&[0, 0]), calculate_conflicts);
    assert_eq!(director.calculate_score(), SimpleScore::of(-1));

    director.before_variable_changed(1, "row");
    set_queen_row(director.working_solution_mut(), 1, Some(1));
    director.after_variable_changed(1, "row");

    assert_eq!(director.calculate_score(), SimpleScore::of(-1));
    assert_eq!(director.calculation_count(), 2);
}

#[test]
fn test_entity_added_and_fact_changed_mark_dirty() {
    let mut director =
        SimpleScoreDirector::new(NQueensSolution::with_rows(&[1, 3, 0, 2]), calculate_conflicts);
    assert_eq!(director.calculate_score(), SimpleScore::of(0));

    director.before_entity_added(4);
    director
        .working_solution_mut()
        .queens
        .push(Queen::assigned(4, 4, 4));
    director.after_entity_added(4);
    assert_eq!(director.calculate_score(), SimpleScore::of(-1));

    director.before_problem_fact_changed("n");
    director.working_solution_mut().n = 5;
    director.after_problem_fact_changed("n");
    assert!(director.is_score_dirty());
    assert_eq!(director.calculate_score(), SimpleScore::of(0));
    assert_eq!(director.calculation_count(), 3);
}

#[test]
fn test_set_working_solution_discards_cache() {
    let mut director =
        SimpleScoreDirector::new(NQueensSolution::with_rows(&[0, 0]), calculate_conflicts);
    director.calculate_score();

    director.set_working_solution(NQueensSolution::with_rows(&[1, 3, 0, 2]));
    assert_eq!(director.calculate_score(), SimpleScore::of(0));
    assert_eq!(director.into_working_solution().queens.len(), 4);
}

#[test]
fn test_factory_builds_independent_directors() {
    let factory = ScoreDirectorFactory::new(calculate_conflicts);

    let mut first = factory.build_score_director(NQueensSolution::with_rows(&[0, 0]));
    let mut second = factory.build_score_director(NQueensSolution::with_rows(&[0, 1]));

    assert_eq!(first.calculate_score(), SimpleScore::of(-1));
    assert_eq!(second.calculate_score(), SimpleScore::of(-1));
    assert_eq!(
        factory.calculate_score(&NQueensSolution::with_rows(&[1, 3, 0, 2])),
        SimpleScore::of(0)
    );
    assert_eq!(first.calculation_count(), 1);
}
