//! # Filterbuilder Architecture
//!
//! Filterbuilder is a **UI-agnostic engine for advanced filter builders**: the
//! "Where [field] [condition] [values] AND/OR …" rows found in dashboards. It owns
//! the state and the rules; any UI (web, desktop, terminal) owns the pixels.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Surface (builder.rs, view.rs, render.rs)                   │
//! │  - Dispatches BuilderEvents, produces a BuilderView         │
//! │  - Delegates controls to a ControlRenderer                  │
//! │  - Emits the Apply snapshot through a FilterSink            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engines (collection.rs, drag.rs, tag_input.rs)             │
//! │  - FilterCollection: the single writer of the records       │
//! │  - DragState: gesture → reorder intent                      │
//! │  - TagInput: text buffer → committed values                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Model (model.rs, snapshot.rs)                              │
//! │  - FilterRecord, Condition, Operator                        │
//! │  - Pure completeness / validity predicates                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O in the Core
//!
//! Nothing in this crate writes to a terminal, reads files or environment
//! variables, or spawns work. Every transition happens synchronously inside the
//! call that triggered it, so two events are always applied in the order they
//! were dispatched.
//!
//! ## Errors
//!
//! Editing never fails: unknown ids are ignored and incompleteness only shows up
//! as a disabled Apply action. Errors are reserved for parsing protocol
//! constants, decoding payloads, and using a builder after it was closed.
//!
//! ## Module Overview
//!
//! - [`model`]: Core data types and completeness predicates
//! - [`collection`]: The ordered, invariant-keeping record list
//! - [`drag`]: Drag-and-drop gesture tracking
//! - [`tag_input`]: Tag entry buffer
//! - [`builder`]: The surface tying everything together
//! - [`view`]: View model and the control renderer trait
//! - [`render`]: Plain-text renderer
//! - [`snapshot`]: The Apply payload
//! - [`config`]: Labels and placeholders
//! - [`error`]: Error types

pub mod builder;
pub mod collection;
pub mod config;
pub mod drag;
pub mod error;
pub mod model;
pub mod render;
pub mod snapshot;
pub mod tag_input;
pub mod view;

pub use builder::{BuilderEvent, FilterBuilder, FilterSink};
pub use collection::FilterCollection;
pub use config::BuilderConfig;
pub use drag::{DragState, HandleProps, ReorderIntent};
pub use error::{FilterError, Result};
pub use model::{Condition, FilterRecord, Operator};
pub use snapshot::FilterSnapshot;
pub use tag_input::{InputKey, TagInput};
pub use view::{BuilderView, ControlRenderer, SelectOption};
