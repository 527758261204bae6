use super::*;

#[test]
fn test_simple_score_order_and_feasibility() {
    assert!(SimpleScore::of(-1) > SimpleScore::of(-3));
    assert!(SimpleScore::of(0).is_feasible());
    assert!(!SimpleScore::of(-2).is_feasible());
    assert_eq!(SimpleScore::default(), SimpleScore::of(0));
}

#[test]
fn test_simple_score_parse() {
    assert_eq!(SimpleScore::parse(" -12 "), Ok(SimpleScore::of(-12)));
    assert_eq!(SimpleScore::parse(&SimpleScore::of(7).to_string()), Ok(SimpleScore::of(7)));
    assert!(matches!(
        SimpleScore::parse("abc"),
        Err(ScoreParseError::Number { .. })
    ));
}

#[test]
fn test_hard_level_dominates_soft() {
    let infeasible = HardSoftScore::of(-1, 0);
    let feasible = HardSoftScore::of(0, -500);
    assert!(feasible > infeasible);
    assert!(HardSoftScore::of(0, -10) > HardSoftScore::of(0, -20));
    assert!(feasible.is_feasible());
    assert!(!infeasible.is_feasible());
    assert_eq!(infeasible.to_level_numbers(), vec![-1, 0]);
}

#[test]
fn test_hard_soft_parse() {
    assert_eq!(
        HardSoftScore::parse(" -1hard / 5soft "),
        Ok(HardSoftScore::of(-1, 5))
    );
    assert_eq!(
        HardSoftScore::parse(&HardSoftScore::of(-3, 4).to_string()),
        Ok(HardSoftScore::of(-3, 4))
    );
    assert!(matches!(
        HardSoftScore::parse("0hard"),
        Err(ScoreParseError::LevelCount { expected: 2, .. })
    ));
    assert!(matches!(
        HardSoftScore::parse("0soft/0hard"),
        Err(ScoreParseError::MissingSuffix { suffix: "hard", .. })
    ));
}
