use ironrank::*;

#[test]
fn direction_codes_and_names() {
    assert_eq!(Direction::from_code(0).ok(), Some(Direction::Top));
    assert_eq!(Direction::from_code(1).ok(), Some(Direction::Bottom));
    assert!(matches!(
        Direction::from_code(2),
        Err(SelectError::InvalidDirection(_))
    ));
    assert_eq!(Direction::Bottom.code(), 1);

    assert_eq!(" TOP ".parse::<Direction>().ok(), Some(Direction::Top));
    assert_eq!("bottom".parse::<Direction>().ok(), Some(Direction::Bottom));
    assert_eq!("1".parse::<Direction>().ok(), Some(Direction::Bottom));
    let err = "sideways".parse::<Direction>().unwrap_err();
    assert!(err.is_validation());
    assert_eq!(Direction::Top.to_string(), "top");
}

#[test]
fn numeric_args_follow_topn_primitive() {
    let req = SelectRequest::from_numeric_args(1.0, 20.0, 1.0).expect("valid args");
    assert_eq!(req, SelectRequest::bottom(1, 20.0));

    let req = SelectRequest::from_numeric_args(0.0, 100.0, 0.0).expect("valid args");
    assert_eq!(req.direction, Direction::Top);

    assert!(matches!(
        SelectRequest::from_numeric_args(0.0, 10.0, 2.0),
        Err(SelectError::InvalidDirection(_))
    ));
    assert!(matches!(
        SelectRequest::from_numeric_args(0.0, 10.0, 0.5),
        Err(SelectError::InvalidDirection(_))
    ));
    assert!(matches!(
        SelectRequest::from_numeric_args(1.5, 10.0, 0.0),
        Err(SelectError::ColumnOutOfRange { .. })
    ));
    assert!(matches!(
        SelectRequest::from_numeric_args(-1.0, 10.0, 0.0),
        Err(SelectError::ColumnOutOfRange { .. })
    ));
    assert!(matches!(
        SelectRequest::from_numeric_args(0.0, 0.0, 0.0),
        Err(SelectError::InvalidPercentage(_))
    ));
}

#[test]
fn row_budget_rounds_to_nearest() {
    let req = SelectRequest::top(0, 20.0);
    assert_eq!(req.row_budget(7), 1); // 1.4
    assert_eq!(req.row_budget(8), 2); // 1.6
    assert_eq!(req.row_budget(0), 0);
    assert_eq!(SelectRequest::top(0, 50.0).row_budget(5), 3); // 2.5
    assert_eq!(SelectRequest::top(0, 100.0).row_budget(1_000_003), 1_000_003);
}

#[test]
fn validate_checks_percentage_then_column() {
    assert!(SelectRequest::top(0, 100.0).validate(1).is_ok());
    assert!(SelectRequest::top(0, 1e-9).validate(1).is_ok());
    assert!(matches!(
        SelectRequest::top(1, 50.0).validate(1),
        Err(SelectError::ColumnOutOfRange {
            index: 1,
            columns: 1
        })
    ));
    assert!(matches!(
        SelectRequest::top(3, 150.0).validate(1),
        Err(SelectError::InvalidPercentage(p)) if p == 150.0
    ));
}
