use junction_core::{
    ConfigurationIssue, EdgeStrategy, JunctionError, JunctionErrorCode, PointError,
    PointErrorCode, PointStore,
};
use rstest::rstest;

#[rstest]
#[case(PointError::WrongArity { entry: 1, found: 2 }, PointErrorCode::WrongArity)]
#[case(
    PointError::NotANumber { entry: 2, field: 1, value: "x".to_owned() },
    PointErrorCode::NotANumber,
)]
#[case(
    PointError::NonFinite { entry: 3, field: 3, value: f64::INFINITY },
    PointErrorCode::NonFinite,
)]
#[case(
    PointError::Read { entry: 4, message: "broken pipe".to_owned() },
    PointErrorCode::Read,
)]
fn returns_expected_point_code(#[case] error: PointError, #[case] expected: PointErrorCode) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().to_string(), expected.as_str());
}

#[rstest]
#[case(
    JunctionError::Parse { error: PointError::WrongArity { entry: 1, found: 4 } },
    JunctionErrorCode::Parse,
    Some(PointErrorCode::WrongArity),
)]
#[case(JunctionError::InvalidInput { points: 1 }, JunctionErrorCode::InvalidInput, None)]
#[case(
    JunctionError::InvalidConfiguration { issue: ConfigurationIssue::ZeroTopM },
    JunctionErrorCode::InvalidConfiguration,
    None,
)]
#[case(
    JunctionError::BackendUnavailable { requested: EdgeStrategy::Parallel },
    JunctionErrorCode::BackendUnavailable,
    None,
)]
#[case(JunctionError::ProductOverflow { top_m: 3 }, JunctionErrorCode::ProductOverflow, None)]
#[case(
    JunctionError::DistanceOverflow { a: 0, b: 1 },
    JunctionErrorCode::DistanceOverflow,
    None,
)]
#[case(
    JunctionError::EdgeSetMismatch { points: 3, edge_points: 4 },
    JunctionErrorCode::EdgeSetMismatch,
    None,
)]
#[case(
    JunctionError::InvariantViolation { invariant: "test", points: 2, clusters: 1 },
    JunctionErrorCode::InvariantViolation,
    None,
)]
fn returns_expected_junction_code(
    #[case] error: JunctionError,
    #[case] expected: JunctionErrorCode,
    #[case] point: Option<PointErrorCode>,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.point_code(), point);
}

#[rstest]
#[case(JunctionErrorCode::Parse, "JUNCTION_PARSE")]
#[case(JunctionErrorCode::InvalidInput, "JUNCTION_INVALID_INPUT")]
#[case(JunctionErrorCode::InvalidConfiguration, "JUNCTION_INVALID_CONFIGURATION")]
#[case(JunctionErrorCode::ProductOverflow, "JUNCTION_PRODUCT_OVERFLOW")]
#[case(JunctionErrorCode::DistanceOverflow, "JUNCTION_DISTANCE_OVERFLOW")]
#[case(JunctionErrorCode::InvariantViolation, "JUNCTION_INVARIANT_VIOLATION")]
fn junction_codes_are_stable(#[case] code: JunctionErrorCode, #[case] expected: &str) {
    assert_eq!(code.as_str(), expected);
}

#[test]
fn merge_target_message_names_the_limit() {
    let issue = ConfigurationIssue::MergeTargetTooLarge {
        requested: 10,
        points: 5,
    };
    assert_eq!(
        issue.to_string(),
        "merge target 10 exceeds 5 points (at most 4 merges)"
    );
}

#[test]
fn parse_failures_convert_into_junction_errors() {
    let err: JunctionError = PointStore::parse_str("1,2\n")
        .map_err(JunctionError::from)
        .expect_err("two coordinates are rejected");
    assert_eq!(err.code(), JunctionErrorCode::Parse);
    assert_eq!(err.point_code(), Some(PointErrorCode::WrongArity));
}
