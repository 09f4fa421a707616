//! Per-row text buffer for entering values as tags.
//!
//! Typing only touches the buffer. Pressing Enter with something other than
//! whitespace commits the trimmed text as a value and clears the buffer.

use tracing::trace;
use uuid::Uuid;

use crate::collection::FilterCollection;

/// Keys the tag input reacts to. Only [`InputKey::Enter`] commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    Enter,
    Escape,
    Tab,
    Backspace,
    Other,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagInput {
    buffer: String,
}

impl TagInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// The uncommitted text, as the input control should display it.
    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn on_change(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    /// Returns the trimmed value to commit when `key` is Enter and the buffer is
    /// not blank. The buffer is cleared on commit; otherwise it is left alone.
    pub fn on_key(&mut self, key: InputKey) -> Option<String> {
        if key != InputKey::Enter {
            return None;
        }
        let value = self.buffer.trim();
        if value.is_empty() {
            trace!("tag commit ignored: blank input");
            return None;
        }
        let value = value.to_string();
        self.buffer.clear();
        Some(value)
    }

    /// Handles `key` and, on commit, adds the value to record `id`.
    pub fn commit_into(
        &mut self,
        key: InputKey,
        collection: &mut FilterCollection,
        id: Uuid,
    ) -> bool {
        match self.on_key(key) {
            Some(value) => {
                collection.add_value(id, &value);
                true
            }
            None => false,
        }
    }
}
