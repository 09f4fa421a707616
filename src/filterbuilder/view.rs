//! # View Model
//!
//! The builder never draws anything itself. [`FilterBuilder::view`] returns a
//! [`BuilderView`]: plain data describing every row, which a UI layer turns into
//! widgets. Select-type controls and the tag list are delegated to external
//! collaborators through [`ControlRenderer`].
//!
//! ```text
//! BuilderView
//! ├── body: Empty { message }            (no rows)
//! │         Rows(Vec<RowView>)
//! │           ├── handle     HandleProps       drag handle + drop zone
//! │           ├── operator   Where | Select    row 0 shows the label
//! │           ├── field      SelectView        caller's field options
//! │           ├── condition  SelectView        fixed condition list
//! │           └── values     Tags | Disabled   depends on the condition
//! ├── add_label
//! └── apply_label, apply_enabled
//! ```
//!
//! [`FilterBuilder::view`]: crate::builder::FilterBuilder::view

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::drag::HandleProps;
use crate::model::{Condition, Operator};

/// One entry of a select control: the id reported back on change, and the text shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub id: String,
    pub text: String,
}

impl SelectOption {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

pub static CONDITION_OPTIONS: Lazy<Vec<SelectOption>> = Lazy::new(|| {
    Condition::ALL
        .iter()
        .map(|c| SelectOption::new(c.as_str(), c.label()))
        .collect()
});

pub static OPERATOR_OPTIONS: Lazy<Vec<SelectOption>> = Lazy::new(|| {
    Operator::ALL
        .iter()
        .map(|op| SelectOption::new(op.as_str(), op.as_str()))
        .collect()
});

/// A select control: its options and the currently selected option id, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectView {
    pub options: Vec<SelectOption>,
    pub current: Option<String>,
}

impl SelectView {
    /// The text of the selected option.
    pub fn current_text(&self) -> Option<&str> {
        let current = self.current.as_deref()?;
        self.options
            .iter()
            .find(|o| o.id == current)
            .map(|o| o.text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperatorSlot {
    Where { label: String },
    Select(SelectView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSlot {
    Tags {
        values: Vec<String>,
        input: String,
        placeholder: String,
    },
    Disabled {
        placeholder: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: Uuid,
    pub index: usize,
    pub handle: HandleProps,
    pub operator: OperatorSlot,
    pub field: SelectView,
    pub condition: SelectView,
    pub values: ValueSlot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderBody {
    Empty { message: String },
    Rows(Vec<RowView>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderView {
    pub body: BuilderBody,
    pub add_label: String,
    pub apply_label: String,
    pub apply_enabled: bool,
}

impl BuilderView {
    pub fn rows(&self) -> &[RowView] {
        match &self.body {
            BuilderBody::Rows(rows) => rows,
            BuilderBody::Empty { .. } => &[],
        }
    }
}

/// Which select control of a row is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectSlot {
    Operator,
    Field,
    Condition,
}

/// External collaborator that turns view data into actual controls.
///
/// Implementations report user changes back to the builder as
/// [`BuilderEvent`](crate::builder::BuilderEvent)s carrying the row's id.
pub trait ControlRenderer {
    fn empty(&mut self, message: &str);

    fn begin_row(&mut self, _row: &RowView) {}

    fn where_label(&mut self, label: &str);

    fn select(&mut self, slot: SelectSlot, view: &SelectView);

    /// Committed values as tokens, followed by the input for the next one.
    fn tags(&mut self, values: &[String], input: &str, placeholder: &str);

    /// Placeholder region shown when the condition takes no values.
    fn disabled(&mut self, placeholder: &str);

    fn end_row(&mut self, _row: &RowView) {}

    fn actions(&mut self, add_label: &str, apply_label: &str, apply_enabled: bool);
}

/// Walks `view` in display order, handing each part to `renderer`.
pub fn render_view<R: ControlRenderer + ?Sized>(view: &BuilderView, renderer: &mut R) {
    match &view.body {
        BuilderBody::Empty { message } => renderer.empty(message),
        BuilderBody::Rows(rows) => {
            for row in rows {
                renderer.begin_row(row);
                match &row.operator {
                    OperatorSlot::Where { label } => renderer.where_label(label),
                    OperatorSlot::Select(select) => renderer.select(SelectSlot::Operator, select),
                }
                renderer.select(SelectSlot::Field, &row.field);
                renderer.select(SelectSlot::Condition, &row.condition);
                match &row.values {
                    ValueSlot::Tags {
                        values,
                        input,
                        placeholder,
                    } => renderer.tags(values, input, placeholder),
                    ValueSlot::Disabled { placeholder } => renderer.disabled(placeholder),
                }
                renderer.end_row(row);
            }
        }
    }
    renderer.actions(&view.add_label, &view.apply_label, view.apply_enabled);
}
