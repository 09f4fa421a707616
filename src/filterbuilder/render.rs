//! Plain-text [`ControlRenderer`].
//!
//! Renders a builder as aligned lines of text, one per row. It is handy for
//! terminal front ends, logs and tests; richer UIs implement [`ControlRenderer`]
//! with their own widgets. Column math is Unicode-aware so labels such as
//! "Où" or "条件" stay aligned.
//!
//! ```text
//! ⠿ Where Country is       [US] [CA] _
//! ⠿ AND   Name    is blank (No value required)
//! [Add condition] [Apply]
//! ```

use unicode_width::UnicodeWidthStr;

use crate::view::{ControlRenderer, RowView, SelectSlot, SelectView};

pub const HANDLE: &str = "⠿";
pub const HANDLE_DRAGGING: &str = "✥";
pub const DROP_MARKER: &str = "▸";
const UNSET: &str = "—";

#[derive(Debug, Default)]
struct Cells {
    handle: String,
    operator: String,
    field: String,
    condition: String,
    values: String,
}

/// Collects rows and lays them out once every width is known.
#[derive(Debug, Default)]
pub struct TextRenderer {
    rows: Vec<Cells>,
    current: Option<Cells>,
    empty: Option<String>,
    footer: String,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The rendered text. Columns are padded to the widest cell.
    pub fn finish(self) -> String {
        let mut out = String::new();

        if let Some(message) = &self.empty {
            out.push_str(message);
            out.push('\n');
        }

        let operator_width = column_width(&self.rows, |c| &c.operator);
        let field_width = column_width(&self.rows, |c| &c.field);
        let condition_width = column_width(&self.rows, |c| &c.condition);

        for cells in &self.rows {
            let line = format!(
                "{} {} {} {} {}",
                cells.handle,
                pad(&cells.operator, operator_width),
                pad(&cells.field, field_width),
                pad(&cells.condition, condition_width),
                cells.values
            );
            out.push_str(line.trim_end());
            out.push('\n');
        }

        out.push_str(&self.footer);
        out.push('\n');
        out
    }

    fn cells(&mut self) -> &mut Cells {
        self.current.get_or_insert_with(Cells::default)
    }
}

impl ControlRenderer for TextRenderer {
    fn empty(&mut self, message: &str) {
        self.empty = Some(message.to_string());
    }

    fn begin_row(&mut self, row: &RowView) {
        let handle = if row.handle.is_dragging {
            HANDLE_DRAGGING
        } else if row.handle.is_drop_target {
            DROP_MARKER
        } else {
            HANDLE
        };
        self.current = Some(Cells {
            handle: handle.to_string(),
            ..Cells::default()
        });
    }

    fn where_label(&mut self, label: &str) {
        self.cells().operator = label.to_string();
    }

    fn select(&mut self, slot: SelectSlot, view: &SelectView) {
        // an id missing from the options is shown as is
        let text = view
            .current_text()
            .or(view.current.as_deref())
            .unwrap_or(UNSET)
            .to_string();
        let cells = self.cells();
        match slot {
            SelectSlot::Operator => cells.operator = text,
            SelectSlot::Field => cells.field = text,
            SelectSlot::Condition => cells.condition = text,
        }
    }

    fn tags(&mut self, values: &[String], input: &str, _placeholder: &str) {
        let mut parts: Vec<String> = values.iter().map(|v| format!("[{}]", v)).collect();
        parts.push(if input.is_empty() {
            "_".to_string()
        } else {
            format!("{}_", input)
        });
        self.cells().values = parts.join(" ");
    }

    fn disabled(&mut self, placeholder: &str) {
        self.cells().values = format!("({})", placeholder);
    }

    fn end_row(&mut self, _row: &RowView) {
        if let Some(cells) = self.current.take() {
            self.rows.push(cells);
        }
    }

    fn actions(&mut self, add_label: &str, apply_label: &str, apply_enabled: bool) {
        self.footer = if apply_enabled {
            format!("[{}] [{}]", add_label, apply_label)
        } else {
            format!("[{}] ({})", add_label, apply_label)
        };
    }
}

fn column_width<F>(rows: &[Cells], cell: F) -> usize
where
    F: Fn(&Cells) -> &String,
{
    rows.iter().map(|c| cell(c).width()).max().unwrap_or(0)
}

fn pad(s: &str, width: usize) -> String {
    let padding = " ".repeat(width.saturating_sub(s.width()));
    format!("{}{}", s, padding)
}
