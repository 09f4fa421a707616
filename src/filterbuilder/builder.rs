//! # Builder Surface
//!
//! [`FilterBuilder`] composes the collection, the drag engine and one tag input
//! per row into the "Where … AND/OR …" surface. It is the controlling owner of
//! the [`FilterCollection`]: no one else can mutate it.
//!
//! ## Event Flow
//!
//! ```text
//!  UI control ──BuilderEvent──▶ FilterBuilder::handle ──▶ FilterCollection / DragState / TagInput
//!                                        │
//!  UI layer ◀──── BuilderView ◀── FilterBuilder::view (validity recomputed here)
//! ```
//!
//! Every event is applied synchronously, in dispatch order. There is no
//! background work and nothing to wait on.
//!
//! ## Outbound Results
//!
//! The caller injects a [`FilterSink`]. Apply hands it an immutable
//! [`FilterSnapshot`] and then closes; Close just closes. Either way the builder
//! is done: any further event is a programming error and returns
//! [`FilterError::BuilderClosed`].

use std::collections::HashMap;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::collection::FilterCollection;
use crate::config::BuilderConfig;
use crate::drag::DragState;
use crate::error::{FilterError, Result};
use crate::model::{condition_requires_values, Condition, FilterRecord, Operator};
use crate::snapshot::FilterSnapshot;
use crate::tag_input::{InputKey, TagInput};
use crate::view::{
    render_view, BuilderBody, BuilderView, ControlRenderer, OperatorSlot, RowView,
    SelectOption, SelectView, ValueSlot, CONDITION_OPTIONS, OPERATOR_OPTIONS,
};

/// Receives the builder's outcome.
pub trait FilterSink {
    /// The user applied a valid set of filters.
    fn apply(&mut self, snapshot: FilterSnapshot);

    /// The builder is done, whether or not it was applied.
    fn close(&mut self);
}

/// A discrete user action, carrying the id of the row it targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderEvent {
    AddRecord,
    RemoveRecord(Uuid),
    SetField { id: Uuid, field: String },
    SetCondition { id: Uuid, condition: Option<Condition> },
    SetOperator { id: Uuid, operator: Operator },
    InputChanged { id: Uuid, text: String },
    InputKey { id: Uuid, key: InputKey },
    RemoveValue { id: Uuid, value: String },
    DragStart(usize),
    DragEnter(usize),
    DragLeave(usize),
    Drop(usize),
    DragEnd,
    Apply,
    Close,
}

impl BuilderEvent {
    /// Event for a condition select reporting the option id it selected.
    pub fn condition_selected(id: Uuid, option_id: &str) -> Result<Self> {
        Ok(Self::SetCondition {
            id,
            condition: Some(option_id.parse()?),
        })
    }

    /// Event for an operator select reporting the option id it selected.
    pub fn operator_selected(id: Uuid, option_id: &str) -> Result<Self> {
        Ok(Self::SetOperator {
            id,
            operator: option_id.parse()?,
        })
    }
}

pub struct FilterBuilder<S: FilterSink> {
    collection: FilterCollection,
    drag: DragState,
    inputs: HashMap<Uuid, TagInput>,
    filter_options: Vec<SelectOption>,
    config: BuilderConfig,
    sink: S,
    open: bool,
}

impl<S: FilterSink> FilterBuilder<S> {
    pub fn new(filter_options: Vec<SelectOption>, sink: S) -> Self {
        Self {
            collection: FilterCollection::new(),
            drag: DragState::new(),
            inputs: HashMap::new(),
            filter_options,
            config: BuilderConfig::default(),
            sink,
            open: true,
        }
    }

    /// Resumes a previous session.
    pub fn with_initial_filters(mut self, records: Vec<FilterRecord>) -> Self {
        self.collection = FilterCollection::from_records(records);
        self.inputs.clear();
        self
    }

    pub fn with_config(mut self, config: BuilderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn collection(&self) -> &FilterCollection {
        &self.collection
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the Apply action is enabled.
    pub fn is_valid(&self) -> bool {
        self.collection.is_valid()
    }

    /// The uncommitted tag text of row `id`.
    pub fn input_value(&self, id: Uuid) -> &str {
        self.inputs.get(&id).map(TagInput::value).unwrap_or("")
    }

    /// Applies one event.
    pub fn handle(&mut self, event: BuilderEvent) -> Result<()> {
        self.ensure_open()?;
        trace!(?event, "builder event");

        match event {
            BuilderEvent::AddRecord => {
                self.collection.add_record();
            }
            BuilderEvent::RemoveRecord(id) => {
                if self.collection.index_of(id).is_some() {
                    // indices shift under an in-flight gesture
                    self.drag.cancel();
                }
                self.collection.remove_record(id);
                self.inputs.remove(&id);
            }
            BuilderEvent::SetField { id, field } => self.collection.update_field(id, field),
            BuilderEvent::SetCondition { id, condition } => {
                self.collection.update_condition(id, condition);
                if !condition_requires_values(condition) {
                    // no tag editor is shown for this row any more
                    self.inputs.remove(&id);
                }
            }
            BuilderEvent::SetOperator { id, operator } => {
                self.collection.update_operator(id, operator)
            }
            BuilderEvent::InputChanged { id, text } => {
                if self.collection.get(id).is_some() {
                    self.inputs.entry(id).or_default().on_change(text);
                }
            }
            BuilderEvent::InputKey { id, key } => {
                let accepts_values = self
                    .collection
                    .get(id)
                    .is_some_and(|record| condition_requires_values(record.condition));
                if !accepts_values {
                    trace!(%id, "input key ignored: row takes no values");
                } else if let Some(input) = self.inputs.get_mut(&id) {
                    input.commit_into(key, &mut self.collection, id);
                }
            }
            BuilderEvent::RemoveValue { id, value } => self.collection.remove_value(id, &value),
            BuilderEvent::DragStart(index) => {
                if index < self.collection.len() {
                    self.drag.start(index);
                }
            }
            BuilderEvent::DragEnter(index) => {
                if index < self.collection.len() {
                    self.drag.enter(index);
                }
            }
            BuilderEvent::DragLeave(index) => {
                if index < self.collection.len() {
                    self.drag.leave(index);
                }
            }
            BuilderEvent::Drop(index) => {
                let collection = &mut self.collection;
                self.drag
                    .drop_with(index, |from, to| collection.reorder(from, to));
            }
            BuilderEvent::DragEnd => self.drag.cancel(),
            BuilderEvent::Apply => {
                self.apply()?;
            }
            BuilderEvent::Close => self.close()?,
        }
        Ok(())
    }

    /// Hands a snapshot to the sink and closes, when the filters are valid.
    /// Returns whether anything was applied.
    pub fn apply(&mut self) -> Result<bool> {
        self.ensure_open()?;
        if !self.collection.is_valid() {
            trace!("apply ignored: filters incomplete");
            return Ok(false);
        }

        let collection = std::mem::take(&mut self.collection);
        let snapshot = FilterSnapshot::from_collection(&collection);
        debug!(count = snapshot.len(), "filters applied");
        self.sink.apply(snapshot);
        self.finish();
        Ok(true)
    }

    /// Discards the filters without emitting them.
    pub fn close(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.collection = FilterCollection::new();
        debug!("filter builder closed");
        self.finish();
        Ok(())
    }

    pub fn view(&self) -> BuilderView {
        let body = if self.collection.is_empty() {
            BuilderBody::Empty {
                message: self.config.empty_message.clone(),
            }
        } else {
            BuilderBody::Rows(
                self.collection
                    .records()
                    .iter()
                    .enumerate()
                    .map(|(index, record)| self.row_view(index, record))
                    .collect(),
            )
        };

        BuilderView {
            body,
            add_label: self.config.add_label.clone(),
            apply_label: self.config.apply_label.clone(),
            apply_enabled: self.collection.is_valid(),
        }
    }

    pub fn render<R: ControlRenderer + ?Sized>(&self, renderer: &mut R) {
        render_view(&self.view(), renderer);
    }

    fn row_view(&self, index: usize, record: &FilterRecord) -> RowView {
        let operator = match record.operator {
            Some(op) if index > 0 => OperatorSlot::Select(SelectView {
                options: OPERATOR_OPTIONS.to_vec(),
                current: Some(op.as_str().to_string()),
            }),
            _ => OperatorSlot::Where {
                label: self.config.where_label.clone(),
            },
        };

        let values = if condition_requires_values(record.condition) {
            ValueSlot::Tags {
                values: record.values.clone(),
                input: self.input_value(record.id).to_string(),
                placeholder: self.config.value_placeholder.clone(),
            }
        } else {
            ValueSlot::Disabled {
                placeholder: self.config.no_value_placeholder.clone(),
            }
        };

        RowView {
            id: record.id,
            index,
            handle: self.drag.handle_props(index),
            operator,
            field: SelectView {
                options: self.filter_options.clone(),
                current: (!record.field.is_empty()).then(|| record.field.clone()),
            },
            condition: SelectView {
                options: CONDITION_OPTIONS.to_vec(),
                current: record.condition.map(|c| c.as_str().to_string()),
            },
            values,
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.open {
            Ok(())
        } else {
            Err(FilterError::BuilderClosed)
        }
    }

    fn finish(&mut self) {
        self.drag.cancel();
        self.inputs.clear();
        self.open = false;
        self.sink.close();
    }
}
