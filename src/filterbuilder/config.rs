//! # Configuration
//!
//! The builder's user-facing strings live in [`BuilderConfig`]. The library never
//! reads files or environment variables on its own; an embedding application
//! either uses the defaults or hands over a TOML document it loaded itself.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `where_label` | `Where` | Shown in place of the operator on the first row |
//! | `add_label` | `Add condition` | Label of the add-row action |
//! | `apply_label` | `Apply` | Label of the apply action |
//! | `empty_message` | `No filters applied. Add a condition to get started.` | Shown when there are no rows |
//! | `value_placeholder` | `Type a value and press Enter` | Placeholder of the tag input |
//! | `no_value_placeholder` | `No value required` | Shown instead of the tag editor for value-less conditions |
//!
//! [`BuilderConfig::template`] renders a commented sample file.

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::error::{FilterError, Result};

/// Labels and placeholders for the builder surface.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct BuilderConfig {
    /// Shown in place of the operator selector on the first row.
    #[config(default = "Where")]
    pub where_label: String,

    /// Label of the action that appends a new row.
    #[config(default = "Add condition")]
    pub add_label: String,

    /// Label of the action that hands the filters to the caller.
    #[config(default = "Apply")]
    pub apply_label: String,

    /// Message shown when there are no rows.
    #[config(default = "No filters applied. Add a condition to get started.")]
    pub empty_message: String,

    /// Placeholder of the tag input.
    #[config(default = "Type a value and press Enter")]
    pub value_placeholder: String,

    /// Shown instead of the tag editor when the condition takes no values.
    #[config(default = "No value required")]
    pub no_value_placeholder: String,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            where_label: "Where".to_string(),
            add_label: "Add condition".to_string(),
            apply_label: "Apply".to_string(),
            empty_message: "No filters applied. Add a condition to get started.".to_string(),
            value_placeholder: "Type a value and press Enter".to_string(),
            no_value_placeholder: "No value required".to_string(),
        }
    }
}

impl BuilderConfig {
    /// Parses overrides from a TOML document. Missing keys keep their defaults.
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| FilterError::Config(e.to_string()))
    }

    /// A commented sample configuration listing every key and its default.
    pub fn template() -> String {
        confique::toml::template::<BuilderConfig>(confique::toml::FormatOptions::default())
    }
}
