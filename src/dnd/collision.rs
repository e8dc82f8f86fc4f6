//! Drop-target resolution for an in-flight drag.
//!
//! Naive closest-center over every droppable makes cards jump between
//! columns of uneven height under fast pointer movement. Resolution here is
//! an ordered fallback instead: pointer-within first, then rectangle
//! intersection, then the cached last target, with the active id itself
//! standing in for one frame right after a cross-column splice while the
//! layout settles.

use ratatui::layout::Rect;

use super::droppable::{DragId, Droppable, DropTarget, DroppableMap};
use super::geometry;
use crate::board::BoardStore;

/// Per-gesture collision bookkeeping. Created with the drag session and
/// discarded with it.
///
#[derive(Debug, Default)]
pub struct CollisionState {
    last_over: Option<DropTarget>,
    recently_moved: bool,
}

impl CollisionState {
    /// Record that the active task was just spliced into a new column. The
    /// flag holds until [`CollisionState::settle`] runs on the next tick.
    ///
    pub fn mark_moved(&mut self) {
        self.recently_moved = true;
    }

    /// Clear the recently-moved flag. Called once per event-loop tick.
    ///
    pub fn settle(&mut self) {
        self.recently_moved = false;
    }

    pub fn recently_moved(&self) -> bool {
        self.recently_moved
    }

    pub fn last_over(&self) -> Option<&DropTarget> {
        self.last_over.as_ref()
    }

    /// Resolve the droppable region the drag is currently over.
    ///
    /// Tie-break order:
    /// 1. Column drags consider column containers only, by closest center
    ///    to the dragged rectangle.
    /// 2. Task drags take pointer-within candidates first, falling back to
    ///    rectangle-intersection candidates.
    /// 3. A winning column container that currently holds tasks is narrowed
    ///    to the closest task card inside it.
    /// 4. The result is cached; with no candidates the cached target is
    ///    returned, or the active id itself while `recently_moved` is set.
    ///
    pub fn resolve(
        &mut self,
        active: &DragId,
        pointer: (u16, u16),
        active_rect: Rect,
        droppables: &DroppableMap,
        store: &BoardStore,
    ) -> Option<DropTarget> {
        if let DragId::Column(_) = active {
            let nearest = droppables
                .columns()
                .min_by_key(|d| geometry::center_distance_sq(active_rect, d.rect))
                .map(|d| d.target.clone());
            if nearest.is_some() {
                self.last_over = nearest.clone();
            }
            return nearest.or_else(|| self.last_over.clone());
        }

        let first = self
            .pointer_within(pointer, droppables)
            .or_else(|| self.rect_intersection(active_rect, droppables));

        let first = match first {
            Some(target) => target,
            None => {
                // The dragged card was just spliced into a new column and
                // its registered geometry has not settled; treat the card
                // itself as the target for this frame to avoid flicker.
                if self.recently_moved {
                    self.last_over = Some(DropTarget::Task(active.id().to_owned()));
                }
                return self.last_over.clone();
            }
        };

        let narrowed = match &first {
            DropTarget::Column(column_id) if !store.column_tasks(column_id).is_empty() => {
                // Over a populated column container: narrow to the closest
                // card inside it so insertion lands next to a neighbor.
                droppables
                    .tasks_in_column(column_id)
                    .min_by_key(|d| geometry::center_distance_sq(active_rect, d.rect))
                    .map(|d| d.target.clone())
            }
            _ => None,
        };
        let resolved = narrowed.unwrap_or(first);

        self.last_over = Some(resolved.clone());
        Some(resolved)
    }

    /// Return the best candidate whose rect contains the pointer cell,
    /// nearest center first.
    ///
    fn pointer_within(
        &self,
        pointer: (u16, u16),
        droppables: &DroppableMap,
    ) -> Option<DropTarget> {
        droppables
            .entries()
            .iter()
            .filter(|d| geometry::contains_point(d.rect, pointer.0, pointer.1))
            .min_by_key(|d| geometry::point_center_distance_sq(d.rect, pointer.0, pointer.1))
            .map(|d| d.target.clone())
    }

    /// Return the candidate with the largest overlap against the dragged
    /// rectangle.
    ///
    fn rect_intersection(
        &self,
        active_rect: Rect,
        droppables: &DroppableMap,
    ) -> Option<DropTarget> {
        droppables
            .entries()
            .iter()
            .map(|d| (d, geometry::overlap_area(active_rect, d.rect)))
            .filter(|(_, area)| *area > 0)
            .max_by_key(|(_, area)| *area)
            .map(|(d, _)| d.target.clone())
    }
}

/// Convenience used by highlighting code: whether the droppable is the
/// currently cached target.
///
#[allow(dead_code)]
pub fn is_last_over(state: &CollisionState, droppable: &Droppable) -> bool {
    state.last_over() == Some(&droppable.target)
}
