//! Rendering plans into placeholder-based store expressions
//!
//! Attribute names become `#nN` placeholders and operands become `:vN`
//! placeholders, so reserved words and arbitrary values never appear inline.

use super::types::{Condition, ConditionOp, QueryPlan};
use crate::types::AttrValue;
use std::collections::HashMap;

/// A plan rendered to expression strings plus their placeholder maps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expression {
    /// Key condition expression, `None` for scans
    pub key_condition: Option<String>,
    /// Filter expression
    pub filter: Option<String>,
    /// `#nN` -> attribute name
    pub names: HashMap<String, String>,
    /// `:vN` -> operand
    pub values: HashMap<String, AttrValue>,
}

impl Expression {
    /// Render a plan
    pub fn from_plan(plan: &QueryPlan) -> Self {
        let mut expression = Self::default();

        if let Some(key_condition) = plan.key_condition() {
            let mut parts = vec![expression.render(key_condition.partition_condition())];
            if let Some(sort) = key_condition.sort_condition() {
                parts.push(expression.render(sort));
            }
            expression.key_condition = Some(parts.join(" AND "));
        }

        if let Some(filter) = plan.filter() {
            expression.filter = Some(expression.render(filter));
        }

        expression
    }

    fn name_placeholder(&mut self, attribute: &str) -> String {
        if let Some((placeholder, _)) = self.names.iter().find(|(_, name)| *name == attribute) {
            return placeholder.clone();
        }
        let placeholder = format!("#n{}", self.names.len());
        self.names.insert(placeholder.clone(), attribute.to_string());
        placeholder
    }

    fn value_placeholder(&mut self, value: &AttrValue) -> String {
        let placeholder = format!(":v{}", self.values.len());
        self.values.insert(placeholder.clone(), value.clone());
        placeholder
    }

    fn render(&mut self, condition: &Condition) -> String {
        let name = self.name_placeholder(condition.attribute());
        let value = self.value_placeholder(condition.value());
        match condition.op() {
            ConditionOp::Equal => format!("{name} = {value}"),
            ConditionOp::GreaterThanEqual => format!("{name} >= {value}"),
            ConditionOp::BeginsWith => format!("begins_with({name}, {value})"),
        }
    }
}
