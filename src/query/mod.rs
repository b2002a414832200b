//! Query planning
//!
//! Builds declarative query plans (key condition, optional filter, target
//! index) for each listing mode, and renders them into store expressions.
//!
//! # Overview
//!
//! A [`QueryPlan`] is built once per call and never mutated. Invalid input
//! (bad attribute names, a key condition that does not fit the target index)
//! fails at build time with a plan error, before any request is issued.

mod expression;
mod planner;
mod types;

pub use expression::Expression;
pub use planner::{full_scan, team_listing, team_listing_by_goals, team_listing_with_goal_filter};
pub use types::{Condition, ConditionOp, KeyCondition, QueryPlan, QueryPlanBuilder};

pub use crate::keys::IndexKind;

#[cfg(test)]
mod tests;
