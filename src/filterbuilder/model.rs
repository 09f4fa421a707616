//! # Domain Model: Filter Records and Their Classification
//!
//! This module defines the core data structures for the builder: [`FilterRecord`],
//! [`Condition`] and [`Operator`], plus the pure functions that decide whether a
//! record (or a whole collection) is ready to be applied.
//!
//! ## The Shape of a Row
//!
//! ```text
//! [operator]  field      condition     values
//!   Where     country    IS            US, CA
//!   AND       name       IS_BLANK      (none)
//!   OR        city       STARTS_WITH   San
//! ```
//!
//! - The first row has no operator (it renders as "Where").
//! - `field` is an empty string until the user picks one.
//! - `condition` is `None` until the user picks one (new rows default to `IS`).
//! - `values` is an ordered set: insertion order is kept, duplicates are refused.
//!
//! ## Protocol Constants
//!
//! Callers may inspect the Apply payload, so the wire spelling of conditions and
//! operators is fixed: `IS`, `IS_NOT`, `CONTAINS`, `STARTS_WITH`, `IS_BLANK`,
//! `IS_NOT_BLANK`, `AND`, `OR`. `Display` and `FromStr` use the same spelling.
//!
//! ## Completeness
//!
//! Completeness is structural only. Nothing here checks that a condition makes
//! sense for a field; a record is complete once it has a field, a condition, and
//! values when the condition needs them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::FilterError;

/// Logical conjunction joining a row to the one above it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    And,
    Or,
}

impl Operator {
    pub const ALL: [Operator; 2] = [Operator::And, Operator::Or];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
        }
    }
}

impl Default for Operator {
    fn default() -> Self {
        Self::And
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AND" => Ok(Operator::And),
            "OR" => Ok(Operator::Or),
            other => Err(FilterError::UnknownOperator(other.to_string())),
        }
    }
}

/// Comparison kind applied between a field and the row's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Condition {
    Is,
    IsNot,
    Contains,
    StartsWith,
    IsBlank,
    IsNotBlank,
}

impl Condition {
    /// Every condition, in the order the condition selector lists them.
    pub const ALL: [Condition; 6] = [
        Condition::Is,
        Condition::IsNot,
        Condition::Contains,
        Condition::StartsWith,
        Condition::IsBlank,
        Condition::IsNotBlank,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Is => "IS",
            Condition::IsNot => "IS_NOT",
            Condition::Contains => "CONTAINS",
            Condition::StartsWith => "STARTS_WITH",
            Condition::IsBlank => "IS_BLANK",
            Condition::IsNotBlank => "IS_NOT_BLANK",
        }
    }

    /// Human label for selectors.
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Is => "is",
            Condition::IsNot => "is not",
            Condition::Contains => "contains",
            Condition::StartsWith => "starts with",
            Condition::IsBlank => "is blank",
            Condition::IsNotBlank => "is not blank",
        }
    }

    /// Value-less conditions never need values.
    pub fn requires_values(&self) -> bool {
        !matches!(self, Condition::IsBlank | Condition::IsNotBlank)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| FilterError::UnknownCondition(s.to_string()))
    }
}

/// One `[operator] field condition values` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRecord {
    pub id: Uuid,
    /// `None` only for the first record of a collection.
    pub operator: Option<Operator>,
    /// Empty string means no field has been picked yet.
    pub field: String,
    pub condition: Option<Condition>,
    #[serde(default)]
    pub values: Vec<String>,
}

impl FilterRecord {
    /// Creates a record with a fresh id. Used by callers that resume a previous
    /// session; records created by the builder go through [`create_empty_record`].
    pub fn new(
        operator: Option<Operator>,
        field: impl Into<String>,
        condition: Option<Condition>,
        values: Vec<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            operator,
            field: field.into(),
            condition,
            values,
        }
    }

    pub fn is_complete(&self) -> bool {
        is_record_complete(self)
    }
}

/// Whether a condition needs at least one value to be complete.
///
/// An unset condition counts as needing values, so an untouched row is never
/// mistaken for a complete one.
pub fn condition_requires_values(condition: Option<Condition>) -> bool {
    match condition {
        Some(c) => c.requires_values(),
        None => true,
    }
}

/// Field, then condition, then the value requirement.
pub fn is_record_complete(record: &FilterRecord) -> bool {
    if record.field.is_empty() {
        return false;
    }
    if record.condition.is_none() {
        return false;
    }
    !condition_requires_values(record.condition) || !record.values.is_empty()
}

/// An empty collection is never valid: there is nothing to apply.
pub fn is_collection_valid(records: &[FilterRecord]) -> bool {
    !records.is_empty() && records.iter().all(is_record_complete)
}

pub fn create_empty_record(is_first: bool) -> FilterRecord {
    FilterRecord {
        id: Uuid::new_v4(),
        operator: if is_first { None } else { Some(Operator::And) },
        field: String::new(),
        condition: Some(Condition::Is),
        values: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(field: &str, condition: Option<Condition>, values: &[&str]) -> FilterRecord {
        FilterRecord::new(
            None,
            field,
            condition,
            values.iter().map(|v| v.to_string()).collect(),
        )
    }

    #[test]
    fn test_value_less_conditions() {
        assert!(!condition_requires_values(Some(Condition::IsBlank)));
        assert!(!condition_requires_values(Some(Condition::IsNotBlank)));
        assert!(condition_requires_values(Some(Condition::Is)));
        assert!(condition_requires_values(Some(Condition::IsNot)));
        assert!(condition_requires_values(Some(Condition::Contains)));
        assert!(condition_requires_values(Some(Condition::StartsWith)));
    }

    #[test]
    fn test_unset_condition_requires_values() {
        assert!(condition_requires_values(None));
    }

    #[test]
    fn test_record_without_field_is_incomplete() {
        assert!(!is_record_complete(&record("", Some(Condition::Is), &["US"])));
    }

    #[test]
    fn test_record_without_condition_is_incomplete() {
        assert!(!is_record_complete(&record("country", None, &["US"])));
    }

    #[test]
    fn test_record_needing_values_is_incomplete_without_them() {
        assert!(!is_record_complete(&record("country", Some(Condition::Is), &[])));
        assert!(is_record_complete(&record("country", Some(Condition::Is), &["US"])));
    }

    #[test]
    fn test_value_less_record_is_complete_without_values() {
        assert!(is_record_complete(&record("name", Some(Condition::IsBlank), &[])));
        assert!(is_record_complete(&record(
            "name",
            Some(Condition::IsNotBlank),
            &[]
        )));
    }

    #[test]
    fn test_empty_collection_is_invalid() {
        assert!(!is_collection_valid(&[]));
    }

    #[test]
    fn test_collection_valid_only_when_all_complete() {
        let complete = record("country", Some(Condition::Is), &["US"]);
        let incomplete = record("city", Some(Condition::Contains), &[]);

        assert!(is_collection_valid(&[complete.clone()]));
        assert!(!is_collection_valid(&[complete, incomplete]));
    }

    #[test]
    fn test_create_empty_record() {
        let first = create_empty_record(true);
        assert_eq!(first.operator, None);
        assert_eq!(first.field, "");
        assert_eq!(first.condition, Some(Condition::Is));
        assert!(first.values.is_empty());

        let other = create_empty_record(false);
        assert_eq!(other.operator, Some(Operator::And));
        assert_ne!(first.id, other.id);
    }

    #[test]
    fn test_condition_wire_names() {
        let names: Vec<&str> = Condition::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(
            names,
            vec!["IS", "IS_NOT", "CONTAINS", "STARTS_WITH", "IS_BLANK", "IS_NOT_BLANK"]
        );
        for condition in Condition::ALL {
            let json = serde_json::to_string(&condition).unwrap();
            assert_eq!(json, format!("\"{}\"", condition.as_str()));
            assert_eq!(condition.as_str().parse::<Condition>().unwrap(), condition);
        }
    }

    #[test]
    fn test_operator_wire_names() {
        assert_eq!(serde_json::to_string(&Operator::And).unwrap(), "\"AND\"");
        assert_eq!(serde_json::to_string(&Operator::Or).unwrap(), "\"OR\"");
        assert_eq!("OR".parse::<Operator>().unwrap(), Operator::Or);
    }

    #[test]
    fn test_parse_unknown_constants() {
        assert!(matches!(
            "LIKE".parse::<Condition>(),
            Err(FilterError::UnknownCondition(s)) if s == "LIKE"
        ));
        assert!(matches!(
            "and".parse::<Operator>(),
            Err(FilterError::UnknownOperator(s)) if s == "and"
        ));
    }

    #[test]
    fn test_record_serializes_absent_operator_as_null() {
        let rec = create_empty_record(true);
        let value = serde_json::to_value(&rec).unwrap();
        assert!(value["operator"].is_null());
        assert_eq!(value["condition"], "IS");
        assert_eq!(value["field"], "");
    }
}
