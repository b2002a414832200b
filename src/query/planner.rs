//! Plan shapes for each listing mode

use super::types::{Condition, KeyCondition, QueryPlan};
use crate::error::Result;
use crate::keys::{IndexKind, SEPARATOR};
use crate::types::{GOALS, NATIONAL_TEAM, SK};

fn team_prefix(national_team: &str) -> String {
    format!("{national_team}{SEPARATOR}")
}

/// `pk = country AND begins_with(sk, team#)` on the base table
pub fn team_listing(country: &str, national_team: &str) -> Result<QueryPlan> {
    QueryPlan::builder()
        .with_key_condition(
            KeyCondition::partition(country)
                .and(Condition::begins_with(SK, team_prefix(national_team))),
        )
        .build()
}

/// Team listing with `goals >= threshold` applied after the page limit
pub fn team_listing_with_goal_filter(
    country: &str,
    national_team: &str,
    goal_threshold: u32,
) -> Result<QueryPlan> {
    QueryPlan::builder()
        .with_key_condition(
            KeyCondition::partition(country)
                .and(Condition::begins_with(SK, team_prefix(national_team))),
        )
        .with_filter(Condition::greater_than_equal(GOALS, goal_threshold))
        .build()
}

/// `pk = country AND goals >= threshold` on the goals index, filtered by team
///
/// The index key does not carry the team, so records of other teams in the
/// same country still count against the page limit before the filter runs.
pub fn team_listing_by_goals(
    country: &str,
    national_team: &str,
    goal_threshold: u32,
) -> Result<QueryPlan> {
    QueryPlan::builder()
        .with_key_condition(
            KeyCondition::partition(country)
                .and(Condition::greater_than_equal(GOALS, goal_threshold)),
        )
        .with_filter(Condition::equal(NATIONAL_TEAM, national_team))
        .with_index(IndexKind::Goals)
        .build()
}

/// Unrestricted scan of the base table
pub fn full_scan() -> QueryPlan {
    QueryPlan::scan()
}
