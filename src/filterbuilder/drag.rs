//! # Drag Reorder Engine
//!
//! An index-based gesture tracker that turns "lift row i, hover row j, release on
//! row k" into a single reorder intent. It knows nothing about what is being
//! reordered; the builder feeds its intents to
//! [`FilterCollection::reorder`](crate::collection::FilterCollection::reorder).
//!
//! ## States
//!
//! ```text
//!            start(i)                 enter(j), j != i
//!   Idle ─────────────▶ Dragging{i} ──────────────────▶ Dragging{i, over: j}
//!    ▲                      │  ▲                               │
//!    │                      │  └──────── leave(j) ─────────────┘
//!    │   drop(k) / cancel   │
//!    └──────────────────────┘
//! ```
//!
//! - `drop(k)` yields a [`ReorderIntent`] only when `k != i`; either way the
//!   gesture ends.
//! - `cancel` ends the gesture and discards whatever was hovered.
//! - An intent is produced at most once per gesture, and only at the drop.
//!
//! Any toolkit's pointer or drag primitives can drive this, as long as they report
//! start, hover, leave, drop and cancel with row indices.

use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Gesture {
    #[default]
    Idle,
    Dragging { from: usize, over: Option<usize> },
}

/// A completed gesture: move the row at `from` so it ends up at `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReorderIntent {
    pub from: usize,
    pub to: usize,
}

/// What a row's drag handle and drop zone need to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandleProps {
    pub index: usize,
    pub is_dragging: bool,
    pub is_drop_target: bool,
}

/// Ephemeral state of the current drag gesture, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragState {
    gesture: Gesture,
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer down on the handle of row `index`. Starting while another gesture
    /// is in flight replaces it.
    pub fn start(&mut self, index: usize) {
        debug!(index, "drag started");
        self.gesture = Gesture::Dragging {
            from: index,
            over: None,
        };
    }

    /// Pointer entered the drop zone of row `index`. Hovering the lifted row
    /// itself clears the target, since dropping there does nothing.
    pub fn enter(&mut self, index: usize) {
        if let Gesture::Dragging { from, over } = &mut self.gesture {
            *over = (index != *from).then_some(index);
        }
    }

    /// Pointer left the drop zone of row `index`. The drag continues.
    pub fn leave(&mut self, index: usize) {
        if let Gesture::Dragging { over, .. } = &mut self.gesture {
            if *over == Some(index) {
                *over = None;
            }
        }
    }

    /// Pointer released over row `index`. Ends the gesture and returns the
    /// reorder to perform, if any.
    pub fn drop_on(&mut self, index: usize) -> Option<ReorderIntent> {
        let gesture = std::mem::take(&mut self.gesture);
        match gesture {
            Gesture::Dragging { from, .. } if from != index => {
                debug!(from, to = index, "drag dropped");
                Some(ReorderIntent { from, to: index })
            }
            Gesture::Dragging { from, .. } => {
                trace!(index = from, "drop on dragged row ignored");
                None
            }
            Gesture::Idle => None,
        }
    }

    /// Same as [`drop_on`](Self::drop_on), invoking `on_reorder(from, to)` when
    /// the gesture produced a move.
    pub fn drop_with<F>(&mut self, index: usize, on_reorder: F) -> bool
    where
        F: FnOnce(usize, usize),
    {
        match self.drop_on(index) {
            Some(intent) => {
                on_reorder(intent.from, intent.to);
                true
            }
            None => false,
        }
    }

    /// Drag ended without a drop.
    pub fn cancel(&mut self) {
        if self.is_active() {
            debug!("drag cancelled");
        }
        self.gesture = Gesture::Idle;
    }

    pub fn is_active(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    pub fn dragged_index(&self) -> Option<usize> {
        match self.gesture {
            Gesture::Dragging { from, .. } => Some(from),
            Gesture::Idle => None,
        }
    }

    pub fn drop_target_index(&self) -> Option<usize> {
        match self.gesture {
            Gesture::Dragging { over, .. } => over,
            Gesture::Idle => None,
        }
    }

    pub fn is_dragging(&self, index: usize) -> bool {
        self.dragged_index() == Some(index)
    }

    pub fn is_drop_target(&self, index: usize) -> bool {
        self.drop_target_index() == Some(index)
    }

    pub fn handle_props(&self, index: usize) -> HandleProps {
        HandleProps {
            index,
            is_dragging: self.is_dragging(index),
            is_drop_target: self.is_drop_target(index),
        }
    }
}
