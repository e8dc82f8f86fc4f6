//! Droppable regions and the per-render registry.
//!
//! The render pass registers the rectangle of every column container and
//! task card it draws; collision detection reads the registry on the next
//! pointer event. The registry is rebuilt from scratch every frame, so a
//! region that was not drawn cannot be hit.

use ratatui::layout::Rect;

use super::geometry;

/// Identifies the entity being dragged. The kind is resolved once at drag
/// start, so no id-set membership check is repeated per frame.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragId {
    Column(String),
    Task(String),
}

impl DragId {
    /// Return the raw id string.
    ///
    pub fn id(&self) -> &str {
        match self {
            DragId::Column(id) | DragId::Task(id) => id,
        }
    }

    pub fn is_column(&self) -> bool {
        matches!(self, DragId::Column(_))
    }
}

/// Identifies the region a drag is currently over.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropTarget {
    Column(String),
    Task(String),
}

impl DropTarget {
    /// Return the raw id string.
    ///
    pub fn id(&self) -> &str {
        match self {
            DropTarget::Column(id) | DropTarget::Task(id) => id,
        }
    }
}

/// One droppable region: a column container or a task card, with the cell
/// rectangle it was last drawn at. Task regions carry the id of the column
/// they were drawn in.
///
#[derive(Clone, Debug)]
pub struct Droppable {
    pub target: DropTarget,
    pub rect: Rect,
    pub column_id: String,
}

/// Registry of droppable regions for the current frame.
///
#[derive(Default)]
pub struct DroppableMap {
    entries: Vec<Droppable>,
}

impl DroppableMap {
    /// Clear the registry for a new render pass.
    ///
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Register a column container region.
    ///
    pub fn register_column(&mut self, column_id: &str, rect: Rect) {
        self.entries.push(Droppable {
            target: DropTarget::Column(column_id.to_owned()),
            rect,
            column_id: column_id.to_owned(),
        });
    }

    /// Register a task card region drawn inside the given column.
    ///
    pub fn register_task(&mut self, task_id: &str, column_id: &str, rect: Rect) {
        self.entries.push(Droppable {
            target: DropTarget::Task(task_id.to_owned()),
            rect,
            column_id: column_id.to_owned(),
        });
    }

    pub fn entries(&self) -> &[Droppable] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the registered rect of a target.
    ///
    pub fn rect_of(&self, target: &DropTarget) -> Option<Rect> {
        self.entries
            .iter()
            .find(|d| &d.target == target)
            .map(|d| d.rect)
    }

    /// Return the column container regions.
    ///
    pub fn columns(&self) -> impl Iterator<Item = &Droppable> {
        self.entries
            .iter()
            .filter(|d| matches!(d.target, DropTarget::Column(_)))
    }

    /// Return the task card regions drawn inside the given column.
    ///
    pub fn tasks_in_column<'a>(
        &'a self,
        column_id: &'a str,
    ) -> impl Iterator<Item = &'a Droppable> {
        self.entries
            .iter()
            .filter(move |d| matches!(d.target, DropTarget::Task(_)) && d.column_id == column_id)
    }

    /// Return the innermost droppable under the cell, preferring task cards
    /// over their enclosing column container. Used to pick up the entity
    /// under the pointer on mouse-down.
    ///
    pub fn hit_test(&self, x: u16, y: u16) -> Option<&Droppable> {
        self.entries
            .iter()
            .filter(|d| geometry::contains_point(d.rect, x, y))
            .max_by_key(|d| matches!(d.target, DropTarget::Task(_)))
    }
}
