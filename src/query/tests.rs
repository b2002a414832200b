//! Tests for query planning

use super::*;
use crate::types::{AttrValue, Record, GOALS, NATIONAL_TEAM, PK, SK};
use pretty_assertions::assert_eq;

fn rapinoe() -> Record {
    Record::new("USA", "WNT", "Megan", "Rapinoe", 63, 73, 197)
}

// ============================================================================
// Plan Shape Tests
// ============================================================================

#[test]
fn test_team_listing_shape() {
    let plan = team_listing("USA", "WNT").unwrap();
    assert_eq!(plan.index(), IndexKind::Primary);
    assert!(plan.filter().is_none());
    assert!(!plan.is_scan());

    let key = plan.key_condition().unwrap();
    assert_eq!(key.partition_condition().attribute(), PK);
    let sort = key.sort_condition().unwrap();
    assert_eq!(sort.attribute(), SK);
    assert_eq!(sort.op(), ConditionOp::BeginsWith);
    assert_eq!(sort.value(), &AttrValue::from("WNT#"));
}

#[test]
fn test_goal_filter_shape() {
    let plan = team_listing_with_goal_filter("USA", "WNT", 10).unwrap();
    assert_eq!(plan.index(), IndexKind::Primary);
    let filter = plan.filter().unwrap();
    assert_eq!(filter.attribute(), GOALS);
    assert_eq!(filter.op(), ConditionOp::GreaterThanEqual);
    assert_eq!(filter.value(), &AttrValue::N(10));
}

#[test]
fn test_by_goals_shape() {
    let plan = team_listing_by_goals("USA", "WNT", 10).unwrap();
    assert_eq!(plan.index(), IndexKind::Goals);

    let sort = plan.key_condition().unwrap().sort_condition().unwrap();
    assert_eq!(sort.attribute(), GOALS);
    assert_eq!(sort.op(), ConditionOp::GreaterThanEqual);

    let filter = plan.filter().unwrap();
    assert_eq!(filter.attribute(), NATIONAL_TEAM);
    assert_eq!(filter.value(), &AttrValue::from("WNT"));
}

#[test]
fn test_full_scan_shape() {
    let plan = full_scan();
    assert!(plan.is_scan());
    assert!(plan.filter().is_none());
    assert!(plan.matches_key(&rapinoe()));
}

// ============================================================================
// Evaluation Tests
// ============================================================================

#[test]
fn test_key_and_filter_evaluation() {
    let record = rapinoe();

    let plan = team_listing_with_goal_filter("USA", "WNT", 10).unwrap();
    assert!(plan.matches_key(&record));
    assert!(plan.matches_filter(&record));

    let plan = team_listing_with_goal_filter("USA", "WNT", 64).unwrap();
    assert!(plan.matches_key(&record));
    assert!(!plan.matches_filter(&record));

    let plan = team_listing("USA", "MNT").unwrap();
    assert!(!plan.matches_key(&record));

    let plan = team_listing("Portugal", "WNT").unwrap();
    assert!(!plan.matches_key(&record));
}

#[test]
fn test_team_prefix_does_not_match_longer_team_name() {
    let record = Record::new("USA", "WNTX", "Jane", "Doe", 1, 0, 1);
    let plan = team_listing("USA", "WNT").unwrap();
    assert!(!plan.matches_key(&record));
}

#[test]
fn test_mismatched_operand_types_never_match() {
    let record = rapinoe();
    assert!(!Condition::greater_than_equal(GOALS, "10").matches(&record));
    assert!(!Condition::equal(GOALS, "63").matches(&record));
    assert!(Condition::equal(GOALS, 63_i64).matches(&record));
    assert!(!Condition::equal("unknown", "x").matches(&record));
}

// ============================================================================
// Build Error Tests
// ============================================================================

#[test]
fn test_invalid_attribute_name_is_build_error() {
    let err = QueryPlan::builder()
        .with_key_condition(KeyCondition::partition("USA"))
        .with_filter(Condition::equal("bad name!", "x"))
        .build()
        .unwrap_err();
    assert!(err.is_build_error());
    assert!(!err.is_transport_error());

    let err = QueryPlan::builder()
        .with_key_condition(KeyCondition::partition("USA"))
        .with_filter(Condition::equal("", "x"))
        .build()
        .unwrap_err();
    assert!(err.is_build_error());
}

#[test]
fn test_sort_condition_must_fit_index() {
    let err = QueryPlan::builder()
        .with_key_condition(KeyCondition::partition("USA").and(Condition::begins_with(SK, "WNT#")))
        .with_index(IndexKind::Goals)
        .build()
        .unwrap_err();
    assert!(err.is_build_error());

    let err = QueryPlan::builder()
        .with_key_condition(
            KeyCondition::partition("USA").and(Condition::greater_than_equal(GOALS, 1_i64)),
        )
        .build()
        .unwrap_err();
    assert!(err.is_build_error());
}

#[test]
fn test_index_query_needs_key_condition() {
    let err = QueryPlan::builder()
        .with_index(IndexKind::Goals)
        .build()
        .unwrap_err();
    assert!(err.is_build_error());
}

// ============================================================================
// Expression Rendering Tests
// ============================================================================

#[test]
fn test_render_team_listing() {
    let expression = Expression::from_plan(&team_listing("USA", "WNT").unwrap());
    assert_eq!(
        expression.key_condition.as_deref(),
        Some("#n0 = :v0 AND begins_with(#n1, :v1)")
    );
    assert!(expression.filter.is_none());
    assert_eq!(expression.names.get("#n0").map(String::as_str), Some(PK));
    assert_eq!(expression.names.get("#n1").map(String::as_str), Some(SK));
    assert_eq!(expression.values.get(":v0"), Some(&AttrValue::from("USA")));
    assert_eq!(expression.values.get(":v1"), Some(&AttrValue::from("WNT#")));
}

#[test]
fn test_render_by_goals() {
    let expression = Expression::from_plan(&team_listing_by_goals("USA", "WNT", 10).unwrap());
    assert_eq!(
        expression.key_condition.as_deref(),
        Some("#n0 = :v0 AND #n1 >= :v1")
    );
    assert_eq!(expression.filter.as_deref(), Some("#n2 = :v2"));
    assert_eq!(expression.names.get("#n2").map(String::as_str), Some(NATIONAL_TEAM));
    assert_eq!(expression.values.get(":v1"), Some(&AttrValue::N(10)));
}

#[test]
fn test_render_reuses_name_placeholders() {
    let plan = QueryPlan::builder()
        .with_key_condition(
            KeyCondition::partition("USA").and(Condition::greater_than_equal(GOALS, 10_i64)),
        )
        .with_filter(Condition::equal(GOALS, 63_i64))
        .with_index(IndexKind::Goals)
        .build()
        .unwrap();
    let expression = Expression::from_plan(&plan);
    assert_eq!(expression.filter.as_deref(), Some("#n1 = :v2"));
    assert_eq!(expression.names.len(), 2);
    assert_eq!(expression.values.len(), 3);
}

#[test]
fn test_render_scan() {
    let expression = Expression::from_plan(&full_scan());
    assert_eq!(expression, Expression::default());
}
