//! The Apply payload.
//!
//! A [`FilterSnapshot`] is what the caller receives when the user applies the
//! builder. It is a frozen copy: nothing in it can be edited, and resuming a
//! session goes back through [`FilterCollection::from_records`], which
//! re-establishes every collection invariant.
//!
//! ```json
//! { "filters": [
//!     { "id": "…", "operator": null, "field": "country", "condition": "IS", "values": ["US"] },
//!     { "id": "…", "operator": "OR", "field": "name", "condition": "IS_BLANK", "values": [] }
//! ] }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::collection::FilterCollection;
use crate::error::Result;
use crate::model::FilterRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSnapshot {
    #[serde(alias = "records")]
    filters: Vec<FilterRecord>,
}

impl FilterSnapshot {
    pub fn from_collection(collection: &FilterCollection) -> Self {
        Self {
            filters: collection.records().to_vec(),
        }
    }

    pub fn filters(&self) -> &[FilterRecord] {
        &self.filters
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Turns the snapshot back into an editable collection, e.g. to seed the
    /// next builder session.
    pub fn into_collection(self) -> FilterCollection {
        FilterCollection::from_records(self.filters)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes a payload, normalizing it the same way a resumed session is.
    pub fn from_json(source: &str) -> Result<Self> {
        let raw: FilterSnapshot = serde_json::from_str(source)?;
        Ok(Self::from_collection(&raw.into_collection()))
    }
}

/// One-line summary, e.g. `Where country IS US, CA AND name IS_BLANK`.
impl fmt::Display for FilterSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, record) in self.filters.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            match record.operator {
                Some(op) if index > 0 => write!(f, "{}", op)?,
                _ => f.write_str("Where")?,
            }
            let condition = record.condition.map(|c| c.as_str()).unwrap_or("?");
            write!(f, " {} {}", record.field, condition)?;
            if !record.values.is_empty() {
                write!(f, " {}", record.values.join(", "))?;
            }
        }
        Ok(())
    }
}
