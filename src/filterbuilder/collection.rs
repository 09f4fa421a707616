//! # Filter Collection State
//!
//! [`FilterCollection`] owns the canonical, ordered list of [`FilterRecord`]s and
//! is the only writer to it. Every edit the user makes goes through one of the
//! operations below.
//!
//! ## Totality
//!
//! None of the operations fail. An id that is not in the collection (a row that
//! was deleted while a stale control still pointed at it) is ignored, and so is
//! an out-of-range reorder. The last writer wins.
//!
//! ## The Operator Invariant
//!
//! ```text
//! index 0   -> operator: None        (renders as "Where")
//! index 1.. -> operator: AND | OR
//! ```
//!
//! It is re-established after every insert, delete and reorder:
//! - `add_record` creates the first record without an operator and later ones with `AND`.
//! - `remove_record` clears the operator of whichever record becomes first.
//! - `reorder` re-derives every operator: index 0 loses its operator, every other
//!   record keeps its own or falls back to `AND`.
//!
//! ## Validity
//!
//! Validity is never stored. [`FilterCollection::is_valid`] recomputes it from the
//! current records on each call, so it cannot go stale across mutations.

use std::collections::HashSet;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::model::{
    condition_requires_values, create_empty_record, is_collection_valid, Condition,
    FilterRecord, Operator,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCollection {
    records: Vec<FilterRecord>,
}

impl FilterCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a collection from caller-supplied records (e.g. a previous session),
    /// normalizing them so every collection invariant holds:
    /// - records with an id already seen are dropped (first one wins)
    /// - values are trimmed; blank and repeated values are dropped
    /// - value-less conditions lose their values
    /// - operators are re-derived the same way [`reorder`](Self::reorder) does
    pub fn from_records(records: Vec<FilterRecord>) -> Self {
        let mut seen = HashSet::new();
        let records = records
            .into_iter()
            .filter(|r| seen.insert(r.id))
            .map(normalize_record)
            .collect();

        let mut collection = Self { records };
        collection.rederive_operators();
        debug!(count = collection.len(), "filter collection restored");
        collection
    }

    pub fn records(&self) -> &[FilterRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&FilterRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn index_of(&self, id: Uuid) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    /// Whether the collection can be applied. Recomputed on every call.
    pub fn is_valid(&self) -> bool {
        is_collection_valid(&self.records)
    }

    /// Appends an empty record and returns its id.
    pub fn add_record(&mut self) -> Uuid {
        let record = create_empty_record(self.records.is_empty());
        let id = record.id;
        self.records.push(record);
        debug!(%id, index = self.records.len() - 1, "filter record added");
        id
    }

    pub fn remove_record(&mut self, id: Uuid) {
        let Some(index) = self.index_of(id) else {
            trace!(%id, "remove ignored: unknown record");
            return;
        };

        self.records.remove(index);
        if index == 0 {
            if let Some(first) = self.records.first_mut() {
                first.operator = None;
            }
        }
        debug!(%id, index, remaining = self.records.len(), "filter record removed");
    }

    pub fn update_field(&mut self, id: Uuid, field: impl Into<String>) {
        let field = field.into();
        let Some(record) = self.record_mut(id) else {
            trace!(%id, "field update ignored: unknown record");
            return;
        };
        debug!(%id, field = %field, "filter field updated");
        record.field = field;
    }

    /// Sets the condition. Switching to a value-less condition clears the values.
    pub fn update_condition(&mut self, id: Uuid, condition: Option<Condition>) {
        let Some(record) = self.record_mut(id) else {
            trace!(%id, "condition update ignored: unknown record");
            return;
        };

        record.condition = condition;
        if condition.is_some_and(|c| !c.requires_values()) {
            record.values.clear();
        }
        debug!(%id, condition = ?condition, "filter condition updated");
    }

    /// Sets the operator joining this record to the previous one.
    ///
    /// The first record never carries an operator, so an update aimed at it is
    /// ignored.
    pub fn update_operator(&mut self, id: Uuid, operator: Operator) {
        match self.index_of(id) {
            None => trace!(%id, "operator update ignored: unknown record"),
            Some(0) => trace!(%id, "operator update ignored: first record"),
            Some(index) => {
                self.records[index].operator = Some(operator);
                debug!(%id, %operator, "filter operator updated");
            }
        }
    }

    /// Appends a trimmed value. Blank values, values already present and values
    /// aimed at a value-less condition are ignored.
    pub fn add_value(&mut self, id: Uuid, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            trace!(%id, "value ignored: blank");
            return;
        }
        let Some(record) = self.record_mut(id) else {
            trace!(%id, "value ignored: unknown record");
            return;
        };
        if !condition_requires_values(record.condition) {
            trace!(%id, value, "value ignored: condition takes no values");
            return;
        }
        if record.values.iter().any(|v| v == value) {
            trace!(%id, value, "value ignored: duplicate");
            return;
        }
        record.values.push(value.to_string());
        debug!(%id, value, "filter value added");
    }

    pub fn remove_value(&mut self, id: Uuid, value: &str) {
        let Some(record) = self.record_mut(id) else {
            trace!(%id, "value removal ignored: unknown record");
            return;
        };
        if let Some(pos) = record.values.iter().position(|v| v == value) {
            record.values.remove(pos);
            debug!(%id, value, "filter value removed");
        }
    }

    /// Moves the record at `from` so that it ends up at `to`, then re-derives
    /// every operator. Out-of-range indices leave the collection untouched.
    pub fn reorder(&mut self, from: usize, to: usize) {
        let len = self.records.len();
        if from >= len || to >= len {
            trace!(from, to, len, "reorder ignored: index out of range");
            return;
        }

        let record = self.records.remove(from);
        self.records.insert(to, record);
        self.rederive_operators();
        debug!(from, to, "filter records reordered");
    }

    /// Hands the records over, consuming the collection.
    pub fn into_records(self) -> Vec<FilterRecord> {
        self.records
    }

    fn record_mut(&mut self, id: Uuid) -> Option<&mut FilterRecord> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    fn rederive_operators(&mut self) {
        for (index, record) in self.records.iter_mut().enumerate() {
            record.operator = if index == 0 {
                None
            } else {
                Some(record.operator.unwrap_or_default())
            };
        }
    }
}

fn normalize_record(mut record: FilterRecord) -> FilterRecord {
    if record.condition.is_some_and(|c| !c.requires_values()) {
        record.values.clear();
        return record;
    }

    let mut values: Vec<String> = Vec::with_capacity(record.values.len());
    for value in record.values.drain(..) {
        let value = value.trim();
        if !value.is_empty() && !values.iter().any(|v| v == value) {
            values.push(value.to_string());
        }
    }
    record.values = values;
    record
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(collection: &FilterCollection) -> Vec<Uuid> {
        collection.records().iter().map(|r| r.id).collect()
    }

    fn operators(collection: &FilterCollection) -> Vec<Option<Operator>> {
        collection.records().iter().map(|r| r.operator).collect()
    }

    fn complete(collection: &mut FilterCollection, id: Uuid) {
        collection.update_field(id, "country");
        collection.update_condition(id, Some(Condition::Is));
        collection.add_value(id, "US");
    }

    #[test]
    fn test_add_first_record() {
        let mut c = FilterCollection::new();
        let id = c.add_record();

        assert_eq!(c.len(), 1);
        let rec = c.get(id).unwrap();
        assert_eq!(rec.operator, None);
        assert_eq!(rec.condition, Some(Condition::Is));
        assert!(rec.values.is_empty());
        assert!(!c.is_valid());
    }

    #[test]
    fn test_add_later_records_default_to_and() {
        let mut c = FilterCollection::new();
        c.add_record();
        let second = c.add_record();
        assert_eq!(c.get(second).unwrap().operator, Some(Operator::And));
    }

    #[test]
    fn test_remove_first_clears_new_first_operator() {
        let mut c = FilterCollection::new();
        let first = c.add_record();
        let second = c.add_record();
        c.update_operator(second, Operator::Or);

        c.remove_record(first);

        assert_eq!(ids(&c), vec![second]);
        assert_eq!(c.get(second).unwrap().operator, None);
    }

    #[test]
    fn test_remove_middle_keeps_operators() {
        let mut c = FilterCollection::new();
        c.add_record();
        let middle = c.add_record();
        let last = c.add_record();
        c.update_operator(last, Operator::Or);

        c.remove_record(middle);

        assert_eq!(operators(&c), vec![None, Some(Operator::Or)]);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut c = FilterCollection::new();
        c.add_record();
        let before = c.clone();
        c.remove_record(Uuid::new_v4());
        assert_eq!(c, before);
    }

    #[test]
    fn test_remove_last_remaining_record() {
        let mut c = FilterCollection::new();
        let id = c.add_record();
        c.remove_record(id);
        assert!(c.is_empty());
        assert!(!c.is_valid());
    }

    #[test]
    fn test_updates_on_unknown_id_are_ignored() {
        let mut c = FilterCollection::new();
        c.add_record();
        let before = c.clone();
        let ghost = Uuid::new_v4();

        c.update_field(ghost, "country");
        c.update_condition(ghost, Some(Condition::IsBlank));
        c.update_operator(ghost, Operator::Or);
        c.add_value(ghost, "US");
        c.remove_value(ghost, "US");

        assert_eq!(c, before);
    }

    #[test]
    fn test_update_operator_on_first_is_ignored() {
        let mut c = FilterCollection::new();
        let first = c.add_record();
        c.update_operator(first, Operator::Or);
        assert_eq!(c.get(first).unwrap().operator, None);
    }

    #[test]
    fn test_value_less_condition_clears_values() {
        let mut c = FilterCollection::new();
        let id = c.add_record();
        c.update_field(id, "country");
        c.add_value(id, "US");
        c.add_value(id, "CA");

        c.update_condition(id, Some(Condition::IsBlank));

        let rec = c.get(id).unwrap();
        assert!(rec.values.is_empty());
        assert!(rec.is_complete());
        assert!(c.is_valid());
    }

    #[test]
    fn test_condition_requiring_values_keeps_values() {
        let mut c = FilterCollection::new();
        let id = c.add_record();
        c.add_value(id, "US");
        c.update_condition(id, Some(Condition::Contains));
        assert_eq!(c.get(id).unwrap().values, vec!["US"]);

        c.update_condition(id, None);
        assert_eq!(c.get(id).unwrap().values, vec!["US"]);
    }

    #[test]
    fn test_add_value_trims_and_dedupes() {
        let mut c = FilterCollection::new();
        let id = c.add_record();

        c.add_value(id, "  ");
        c.add_value(id, " US ");
        c.add_value(id, "US");
        c.add_value(id, "CA");

        assert_eq!(c.get(id).unwrap().values, vec!["US", "CA"]);
    }

    #[test]
    fn test_add_value_to_value_less_condition_is_ignored() {
        let mut c = FilterCollection::new();
        let id = c.add_record();
        c.update_field(id, "name");
        c.update_condition(id, Some(Condition::IsBlank));

        c.add_value(id, "US");
        assert!(c.get(id).unwrap().values.is_empty());

        c.update_condition(id, Some(Condition::IsNotBlank));
        c.add_value(id, "US");
        assert!(c.get(id).unwrap().values.is_empty());
        assert!(c.is_valid());

        c.update_condition(id, Some(Condition::StartsWith));
        c.add_value(id, "US");
        assert_eq!(c.get(id).unwrap().values, vec!["US"]);
    }

    #[test]
    fn test_remove_value() {
        let mut c = FilterCollection::new();
        let id = c.add_record();
        c.add_value(id, "US");
        c.add_value(id, "CA");
        c.add_value(id, "MX");

        c.remove_value(id, "CA");
        c.remove_value(id, "FR");

        assert_eq!(c.get(id).unwrap().values, vec!["US", "MX"]);
    }

    #[test]
    fn test_validity_tracks_mutations() {
        let mut c = FilterCollection::new();
        let id = c.add_record();
        assert!(!c.is_valid());

        complete(&mut c, id);
        assert!(c.is_valid());

        c.remove_value(id, "US");
        assert!(!c.is_valid());
    }

    #[test]
    fn test_reorder_last_to_first() {
        let mut c = FilterCollection::new();
        let a = c.add_record();
        let b = c.add_record();
        let d = c.add_record();
        c.update_operator(b, Operator::Or);

        c.reorder(2, 0);

        assert_eq!(ids(&c), vec![d, a, b]);
        assert_eq!(
            operators(&c),
            vec![None, Some(Operator::And), Some(Operator::Or)]
        );
    }

    #[test]
    fn test_reorder_first_to_last() {
        let mut c = FilterCollection::new();
        let a = c.add_record();
        let b = c.add_record();
        let d = c.add_record();
        c.update_operator(b, Operator::Or);

        c.reorder(0, 2);

        assert_eq!(ids(&c), vec![b, d, a]);
        // the record that was first had no operator and now defaults to AND
        assert_eq!(
            operators(&c),
            vec![None, Some(Operator::And), Some(Operator::And)]
        );
    }

    #[test]
    fn test_reorder_round_trip_restores_order() {
        let mut c = FilterCollection::new();
        for _ in 0..4 {
            c.add_record();
        }
        let original = ids(&c);

        c.reorder(1, 3);
        c.reorder(3, 1);

        assert_eq!(ids(&c), original);
    }

    #[test]
    fn test_reorder_out_of_range_is_noop() {
        let mut c = FilterCollection::new();
        c.add_record();
        c.add_record();
        let before = c.clone();

        c.reorder(0, 2);
        c.reorder(5, 0);

        assert_eq!(c, before);
    }

    #[test]
    fn test_from_records_normalizes() {
        let shared = FilterRecord::new(
            Some(Operator::Or),
            "country",
            Some(Condition::Is),
            vec![" US".into(), "US".into(), "".into(), "CA".into()],
        );
        let duplicate_id = FilterRecord {
            field: "ignored".into(),
            ..shared.clone()
        };
        let blank = FilterRecord::new(
            None,
            "name",
            Some(Condition::IsBlank),
            vec!["leftover".into()],
        );

        let c = FilterCollection::from_records(vec![shared.clone(), duplicate_id, blank.clone()]);

        assert_eq!(ids(&c), vec![shared.id, blank.id]);
        assert_eq!(operators(&c), vec![None, Some(Operator::And)]);
        assert_eq!(c.records()[0].values, vec!["US", "CA"]);
        assert!(c.records()[1].values.is_empty());
        assert!(c.is_valid());
    }
}
