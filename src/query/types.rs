//! Query plan types

use crate::error::{Error, Result};
use crate::keys::IndexKind;
use crate::types::{AttrValue, Record, GOALS, PK, SK};

// ============================================================================
// Conditions
// ============================================================================

/// Comparison applied by a condition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionOp {
    /// `attr = value`
    Equal,
    /// `attr >= value`
    GreaterThanEqual,
    /// `begins_with(attr, value)`, strings only
    BeginsWith,
}

/// A single `attribute <op> value` predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    attribute: String,
    op: ConditionOp,
    value: AttrValue,
}

impl Condition {
    /// `attribute = value`
    pub fn equal(attribute: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self {
            attribute: attribute.into(),
            op: ConditionOp::Equal,
            value: value.into(),
        }
    }

    /// `attribute >= value`
    pub fn greater_than_equal(attribute: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self {
            attribute: attribute.into(),
            op: ConditionOp::GreaterThanEqual,
            value: value.into(),
        }
    }

    /// `begins_with(attribute, prefix)`
    pub fn begins_with(attribute: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            op: ConditionOp::BeginsWith,
            value: AttrValue::S(prefix.into()),
        }
    }

    /// Attribute name the condition reads
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Comparison operator
    pub fn op(&self) -> ConditionOp {
        self.op
    }

    /// Operand
    pub fn value(&self) -> &AttrValue {
        &self.value
    }

    /// Evaluate against a record
    ///
    /// Missing attributes and operands of a different type never match.
    pub fn matches(&self, record: &Record) -> bool {
        let Some(actual) = record.attribute(&self.attribute) else {
            return false;
        };
        match (self.op, &actual, &self.value) {
            (ConditionOp::BeginsWith, AttrValue::S(actual), AttrValue::S(prefix)) => {
                actual.starts_with(prefix.as_str())
            }
            (ConditionOp::BeginsWith, _, _) => false,
            (ConditionOp::Equal, actual, expected) => actual == expected,
            (ConditionOp::GreaterThanEqual, AttrValue::N(a), AttrValue::N(b)) => a >= b,
            (ConditionOp::GreaterThanEqual, AttrValue::S(a), AttrValue::S(b)) => a >= b,
            (ConditionOp::GreaterThanEqual, _, _) => false,
        }
    }

    fn validate(&self) -> Result<()> {
        validate_attribute_name(&self.attribute)?;
        if self.op == ConditionOp::BeginsWith && !matches!(self.value, AttrValue::S(_)) {
            return Err(Error::plan(format!(
                "begins_with on '{}' needs a string operand",
                self.attribute
            )));
        }
        Ok(())
    }
}

fn validate_attribute_name(name: &str) -> Result<()> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.');
    if valid {
        Ok(())
    } else {
        Err(Error::invalid_attribute(name))
    }
}

// ============================================================================
// Key Condition
// ============================================================================

/// Partition equality plus an optional sort attribute condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCondition {
    partition: Condition,
    sort: Option<Condition>,
}

impl KeyCondition {
    /// `pk = value`
    pub fn partition(value: impl Into<String>) -> Self {
        Self {
            partition: Condition::equal(PK, AttrValue::S(value.into())),
            sort: None,
        }
    }

    /// Restrict the sort attribute as well
    #[must_use]
    pub fn and(mut self, sort: Condition) -> Self {
        self.sort = Some(sort);
        self
    }

    /// The partition equality condition
    pub fn partition_condition(&self) -> &Condition {
        &self.partition
    }

    /// The optional sort attribute condition
    pub fn sort_condition(&self) -> Option<&Condition> {
        self.sort.as_ref()
    }

    /// Evaluate against a record
    pub fn matches(&self, record: &Record) -> bool {
        self.partition.matches(record) && self.sort.as_ref().map_or(true, |c| c.matches(record))
    }

    fn validate(&self, index: IndexKind) -> Result<()> {
        self.partition.validate()?;
        if self.partition.attribute != PK || self.partition.op != ConditionOp::Equal {
            return Err(Error::plan(format!(
                "key condition must test '{PK}' for equality"
            )));
        }

        if let Some(sort) = &self.sort {
            sort.validate()?;
            let expected = match index {
                IndexKind::Primary => SK,
                IndexKind::Goals => GOALS,
            };
            if sort.attribute != expected {
                return Err(Error::plan(format!(
                    "sort condition on '{}' does not fit index {index:?} (sort attribute '{expected}')",
                    sort.attribute
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Query Plan
// ============================================================================

/// Immutable description of one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPlan {
    key_condition: Option<KeyCondition>,
    filter: Option<Condition>,
    index: IndexKind,
}

impl QueryPlan {
    /// Start building a plan
    pub fn builder() -> QueryPlanBuilder {
        QueryPlanBuilder::default()
    }

    /// Unrestricted scan of the base table
    pub fn scan() -> Self {
        Self {
            key_condition: None,
            filter: None,
            index: IndexKind::Primary,
        }
    }

    /// Key condition; `None` for an unrestricted scan
    pub fn key_condition(&self) -> Option<&KeyCondition> {
        self.key_condition.as_ref()
    }

    /// Post-limit filter, if any
    pub fn filter(&self) -> Option<&Condition> {
        self.filter.as_ref()
    }

    /// Target index
    pub fn index(&self) -> IndexKind {
        self.index
    }

    /// Whether this plan is a full table scan
    pub fn is_scan(&self) -> bool {
        self.key_condition.is_none()
    }

    /// Whether a record satisfies the key condition
    pub fn matches_key(&self, record: &Record) -> bool {
        self.key_condition
            .as_ref()
            .map_or(true, |k| k.matches(record))
    }

    /// Whether a record passes the filter
    pub fn matches_filter(&self, record: &Record) -> bool {
        self.filter.as_ref().map_or(true, |f| f.matches(record))
    }
}

/// Builder for [`QueryPlan`]
#[derive(Debug, Clone, Default)]
pub struct QueryPlanBuilder {
    key_condition: Option<KeyCondition>,
    filter: Option<Condition>,
    index: IndexKind,
}

impl QueryPlanBuilder {
    /// Set the key condition
    #[must_use]
    pub fn with_key_condition(mut self, key_condition: KeyCondition) -> Self {
        self.key_condition = Some(key_condition);
        self
    }

    /// Set the filter
    #[must_use]
    pub fn with_filter(mut self, filter: Condition) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Target an index other than the base table
    #[must_use]
    pub fn with_index(mut self, index: IndexKind) -> Self {
        self.index = index;
        self
    }

    /// Validate and freeze the plan
    pub fn build(self) -> Result<QueryPlan> {
        if let Some(key_condition) = &self.key_condition {
            key_condition.validate(self.index)?;
        } else if self.index != IndexKind::Primary {
            return Err(Error::plan("an index query needs a key condition"));
        }
        if let Some(filter) = &self.filter {
            filter.validate()?;
        }

        Ok(QueryPlan {
            key_condition: self.key_condition,
            filter: self.filter,
            index: self.index,
        })
    }
}
