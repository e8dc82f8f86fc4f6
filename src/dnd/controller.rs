//! Drag gesture lifecycle.
//!
//! One gesture at a time: Idle until a grab, Dragging across any number of
//! drag-over frames, committed (or abandoned) on release. Cross-column
//! moves happen live during drag-over; in-column reordering and column
//! reordering are deferred to the drop. Splices applied during drag-over
//! are not rolled back when the gesture ends without a target — the card
//! stays in the last column it visibly entered.

use log::*;
use ratatui::layout::Rect;

use super::collision::CollisionState;
use super::droppable::{DragId, DropTarget, DroppableMap};
use super::geometry;
use crate::board::{array_move, BoardStore};

/// The mutation committed by a finished gesture, for sync dispatch.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    TaskMoved {
        task_id: String,
        to_column: String,
        index: usize,
    },
    ColumnMoved {
        column_id: String,
        index: usize,
    },
}

/// Ephemeral per-gesture state. Created on grab, discarded on release.
///
struct DragSession {
    active: DragId,
    grab_offset: (u16, u16),
    size: (u16, u16),
    collision: CollisionState,
}

/// Orchestrates drag start/over/end against a board store handed in by the
/// caller. The controller owns no board data, so one controller per board
/// instance composes freely.
///
#[derive(Default)]
pub struct DragController {
    session: Option<DragSession>,
}

impl DragController {
    /// Return whether a gesture is in flight.
    ///
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Return the id being dragged, if any.
    ///
    pub fn active(&self) -> Option<&DragId> {
        self.session.as_ref().map(|s| &s.active)
    }

    /// Begin a gesture on the entity grabbed at `pointer` inside `rect`.
    /// Ignored while another gesture is active.
    ///
    pub fn on_drag_start(&mut self, active: DragId, rect: Rect, pointer: (u16, u16)) {
        if self.session.is_some() {
            return;
        }
        debug!("Starting drag gesture for '{}'...", active.id());
        self.session = Some(DragSession {
            active,
            grab_offset: (
                pointer.0.saturating_sub(rect.x),
                pointer.1.saturating_sub(rect.y),
            ),
            size: (rect.width, rect.height),
            collision: CollisionState::default(),
        });
    }

    /// Return the dragged rectangle translated to follow the pointer. Used
    /// for collision and for the drag ghost.
    ///
    pub fn translated_rect(&self, pointer: (u16, u16)) -> Option<Rect> {
        self.session.as_ref().map(|s| {
            Rect::new(
                pointer.0.saturating_sub(s.grab_offset.0),
                pointer.1.saturating_sub(s.grab_offset.1),
                s.size.0,
                s.size.1,
            )
        })
    }

    /// Process a pointer move while dragging. Cross-column moves are
    /// applied immediately; same-column positions are left alone until the
    /// drop. Returns whether the store was mutated.
    ///
    pub fn on_drag_over(
        &mut self,
        store: &mut BoardStore,
        droppables: &DroppableMap,
        pointer: (u16, u16),
    ) -> bool {
        let translated = match self.translated_rect(pointer) {
            Some(rect) => rect,
            None => return false,
        };
        let session = self.session.as_mut().expect("translated_rect implies session");

        // Column reordering is deferred to the drop.
        if session.active.is_column() {
            return false;
        }

        let over = match session.collision.resolve(
            &session.active,
            pointer,
            translated,
            droppables,
            store,
        ) {
            Some(over) => over,
            None => return false,
        };

        let active_id = session.active.id().to_owned();
        let source = match store.column_of(&active_id) {
            Some(column_id) => column_id.to_owned(),
            None => {
                warn!("Dragged task '{}' is in no column; ignoring.", active_id);
                return false;
            }
        };
        let dest = match resolve_column(store, &over) {
            Some(column_id) => column_id,
            None => return false,
        };
        if source == dest {
            return false;
        }

        let index = match &over {
            DropTarget::Column(_) => store.column_tasks(&dest).len(),
            DropTarget::Task(task_id) => {
                let target_index = store
                    .column_tasks(&dest)
                    .iter()
                    .position(|t| t.id == *task_id)
                    .unwrap_or(0);
                let below = droppables
                    .rect_of(&over)
                    .map(|rect| pointer.1 > geometry::mid_row(rect))
                    .unwrap_or(false);
                if below {
                    target_index + 1
                } else {
                    target_index
                }
            }
        };

        // Remove from source and splice into dest in one atomic replacement
        // of the tasks mapping.
        let mut updated = store.tasks().clone();
        let position = updated[&source]
            .iter()
            .position(|t| t.id == active_id)
            .expect("column_of and task list agree");
        let task = updated
            .get_mut(&source)
            .expect("source column exists")
            .remove(position);
        let dest_list = updated.entry(dest.to_owned()).or_default();
        dest_list.insert(index.min(dest_list.len()), task);
        store.move_task(updated);

        session.collision.mark_moved();
        true
    }

    /// Finish the gesture. Column drags reorder the column list; task drags
    /// commit an in-column reorder when the resolved index differs. With no
    /// resolvable target the pending commit is skipped — splices already
    /// applied during drag-over stay.
    ///
    pub fn on_drag_end(
        &mut self,
        store: &mut BoardStore,
        droppables: &DroppableMap,
        pointer: (u16, u16),
    ) -> Option<DragOutcome> {
        let translated = self.translated_rect(pointer)?;
        let mut session = self.session.take()?;
        let over = session.collision.resolve(
            &session.active,
            pointer,
            translated,
            droppables,
            store,
        )?;

        match session.active {
            DragId::Column(ref column_id) => {
                let over_id = match over {
                    DropTarget::Column(id) => id,
                    DropTarget::Task(_) => return None,
                };
                if over_id == *column_id {
                    return None;
                }
                let from = store.column_index(column_id)?;
                let to = store.column_index(&over_id)?;
                let mut columns = store.columns().to_vec();
                array_move(&mut columns, from, to);
                store.move_column(columns);
                Some(DragOutcome::ColumnMoved {
                    column_id: column_id.to_owned(),
                    index: to,
                })
            }
            DragId::Task(ref task_id) => {
                let source = match store.column_of(task_id) {
                    Some(column_id) => column_id.to_owned(),
                    None => {
                        warn!("Dropped task '{}' is in no column; ignoring.", task_id);
                        return None;
                    }
                };
                let dest = resolve_column(store, &over)?;
                let active_index = store
                    .column_tasks(&source)
                    .iter()
                    .position(|t| t.id == *task_id)
                    .expect("column_of and task list agree");

                if source == dest {
                    let target_index = match &over {
                        DropTarget::Task(over_id) => store
                            .column_tasks(&dest)
                            .iter()
                            .position(|t| t.id == *over_id)
                            .unwrap_or(active_index),
                        DropTarget::Column(_) => active_index,
                    };
                    if target_index == active_index {
                        return None;
                    }
                    store.move_task_within(&source, active_index, target_index);
                    Some(DragOutcome::TaskMoved {
                        task_id: task_id.to_owned(),
                        to_column: dest,
                        index: target_index,
                    })
                } else {
                    // Release landed on a column the gesture never visibly
                    // entered (no drag-over frame fired for it); complete
                    // the move the same way drag-over would have.
                    let index = match &over {
                        DropTarget::Column(_) => store.column_tasks(&dest).len(),
                        DropTarget::Task(over_id) => store
                            .column_tasks(&dest)
                            .iter()
                            .position(|t| t.id == *over_id)
                            .unwrap_or(0),
                    };
                    store.move_task_to_column(task_id, &dest, index);
                    Some(DragOutcome::TaskMoved {
                        task_id: task_id.to_owned(),
                        to_column: dest,
                        index,
                    })
                }
            }
        }
    }

    /// Abandon the gesture without the final commit. Splices already
    /// applied during drag-over stay.
    ///
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            debug!("Cancelled drag gesture for '{}'.", session.active.id());
        }
    }

    /// Event-loop tick: let collision bookkeeping settle.
    ///
    pub fn settle(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.collision.settle();
        }
    }
}

/// Map a drop target to the column it lives in.
///
fn resolve_column(store: &BoardStore, over: &DropTarget) -> Option<String> {
    match over {
        DropTarget::Column(id) => Some(id.to_owned()),
        DropTarget::Task(id) => store.column_of(id).map(|c| c.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Column, Task};
    use fake::{Fake, Faker};
    use std::collections::{HashMap, HashSet};

    fn task_with_id(id: &str) -> Task {
        let mut task: Task = Faker.fake();
        task.id = id.to_string();
        task
    }

    fn column(id: &str) -> Column {
        Column {
            id: id.to_string(),
            name: id.to_uppercase(),
        }
    }

    /// Board {a: [t1, t2], b: [t3]} with side-by-side column rects and one
    /// card rect per task.
    ///
    fn board_and_registry() -> (BoardStore, DroppableMap) {
        let mut tasks = HashMap::new();
        tasks.insert(
            "a".to_string(),
            vec![task_with_id("t1"), task_with_id("t2")],
        );
        tasks.insert("b".to_string(), vec![task_with_id("t3")]);
        let store = BoardStore::new(vec![column("a"), column("b")], tasks);

        let mut map = DroppableMap::default();
        map.register_column("a", Rect::new(0, 0, 20, 30));
        map.register_task("t1", "a", Rect::new(1, 1, 18, 4));
        map.register_task("t2", "a", Rect::new(1, 6, 18, 4));
        map.register_column("b", Rect::new(20, 0, 20, 30));
        map.register_task("t3", "b", Rect::new(21, 1, 18, 4));
        (store, map)
    }

    fn column_ids(store: &BoardStore) -> Vec<&str> {
        store.columns().iter().map(|c| c.id.as_str()).collect()
    }

    fn ids(store: &BoardStore, column: &str) -> Vec<String> {
        store
            .column_tasks(column)
            .iter()
            .map(|t| t.id.to_owned())
            .collect()
    }

    fn assert_task_uniqueness(store: &BoardStore) {
        let mut seen = HashSet::new();
        for tasks in store.tasks().values() {
            for task in tasks {
                assert!(seen.insert(task.id.to_owned()), "{} duplicated", task.id);
            }
        }
    }

    #[test]
    fn cross_column_move_above_midpoint_inserts_before_target() {
        let (mut store, map) = board_and_registry();
        let mut controller = DragController::default();
        controller.on_drag_start(
            DragId::Task("t1".to_string()),
            Rect::new(1, 1, 18, 4),
            (5, 2),
        );
        // t3's rect spans rows 1..5, midpoint row 3; pointer row 2 is above.
        let moved = controller.on_drag_over(&mut store, &map, (25, 2));
        assert!(moved);
        assert_eq!(ids(&store, "a"), vec!["t2"]);
        assert_eq!(ids(&store, "b"), vec!["t1", "t3"]);
        assert_task_uniqueness(&store);
    }

    #[test]
    fn cross_column_move_below_midpoint_inserts_after_target() {
        let (mut store, map) = board_and_registry();
        let mut controller = DragController::default();
        controller.on_drag_start(
            DragId::Task("t1".to_string()),
            Rect::new(1, 1, 18, 4),
            (5, 2),
        );
        let moved = controller.on_drag_over(&mut store, &map, (25, 4));
        assert!(moved);
        assert_eq!(ids(&store, "a"), vec!["t2"]);
        assert_eq!(ids(&store, "b"), vec!["t3", "t1"]);
        assert_task_uniqueness(&store);
    }

    #[test]
    fn drop_on_empty_column_container_appends() {
        let mut tasks = HashMap::new();
        tasks.insert("todo".to_string(), vec![task_with_id("t1")]);
        tasks.insert("done".to_string(), vec![]);
        let mut store = BoardStore::new(vec![column("todo"), column("done")], tasks);

        let mut map = DroppableMap::default();
        map.register_column("todo", Rect::new(0, 0, 20, 30));
        map.register_task("t1", "todo", Rect::new(1, 1, 18, 4));
        map.register_column("done", Rect::new(20, 0, 20, 30));

        let mut controller = DragController::default();
        controller.on_drag_start(
            DragId::Task("t1".to_string()),
            Rect::new(1, 1, 18, 4),
            (5, 2),
        );
        controller.on_drag_over(&mut store, &map, (30, 10));
        controller.on_drag_end(&mut store, &map, (30, 10));
        assert!(ids(&store, "todo").is_empty());
        assert_eq!(ids(&store, "done"), vec!["t1"]);
        assert_task_uniqueness(&store);
    }

    #[test]
    fn same_column_over_is_a_noop() {
        let (mut store, map) = board_and_registry();
        let before = store.revision();
        let mut controller = DragController::default();
        controller.on_drag_start(
            DragId::Task("t1".to_string()),
            Rect::new(1, 1, 18, 4),
            (5, 2),
        );
        // Pointer over t2, same column: live reordering is deferred.
        let moved = controller.on_drag_over(&mut store, &map, (5, 7));
        assert!(!moved);
        assert_eq!(store.revision(), before);
    }

    #[test]
    fn in_column_reorder_commits_on_drop() {
        let (mut store, map) = board_and_registry();
        let mut controller = DragController::default();
        controller.on_drag_start(
            DragId::Task("t1".to_string()),
            Rect::new(1, 1, 18, 4),
            (5, 2),
        );
        let outcome = controller.on_drag_end(&mut store, &map, (5, 7));
        assert_eq!(
            outcome,
            Some(DragOutcome::TaskMoved {
                task_id: "t1".to_string(),
                to_column: "a".to_string(),
                index: 1,
            })
        );
        assert_eq!(ids(&store, "a"), vec!["t2", "t1"]);
        assert!(!controller.is_dragging());
    }

    #[test]
    fn drop_on_itself_leaves_board_unchanged() {
        let (mut store, map) = board_and_registry();
        let before = store.revision();
        let mut controller = DragController::default();
        controller.on_drag_start(
            DragId::Task("t1".to_string()),
            Rect::new(1, 1, 18, 4),
            (5, 2),
        );
        let outcome = controller.on_drag_end(&mut store, &map, (5, 2));
        assert_eq!(outcome, None);
        assert_eq!(store.revision(), before);
        assert_eq!(ids(&store, "a"), vec!["t1", "t2"]);
    }

    #[test]
    fn column_drag_reorders_on_drop() {
        let mut tasks = HashMap::new();
        for id in ["c1", "c2", "c3"] {
            tasks.insert(id.to_string(), vec![]);
        }
        let mut store =
            BoardStore::new(vec![column("c1"), column("c2"), column("c3")], tasks);

        let mut map = DroppableMap::default();
        map.register_column("c1", Rect::new(0, 0, 20, 30));
        map.register_column("c2", Rect::new(20, 0, 20, 30));
        map.register_column("c3", Rect::new(40, 0, 20, 30));

        let mut controller = DragController::default();
        controller.on_drag_start(
            DragId::Column("c1".to_string()),
            Rect::new(0, 0, 20, 30),
            (10, 1),
        );
        // Drag-over never mutates for column drags.
        assert!(!controller.on_drag_over(&mut store, &map, (50, 1)));
        let outcome = controller.on_drag_end(&mut store, &map, (50, 1));
        assert_eq!(
            outcome,
            Some(DragOutcome::ColumnMoved {
                column_id: "c1".to_string(),
                index: 2,
            })
        );
        assert_eq!(column_ids(&store), vec!["c2", "c3", "c1"]);
    }

    #[test]
    fn column_reorder_preserves_id_set() {
        let mut tasks = HashMap::new();
        for id in ["c1", "c2", "c3"] {
            tasks.insert(id.to_string(), vec![task_with_id(&format!("{}-t", id))]);
        }
        let mut store =
            BoardStore::new(vec![column("c1"), column("c2"), column("c3")], tasks);

        let mut map = DroppableMap::default();
        map.register_column("c1", Rect::new(0, 0, 20, 30));
        map.register_column("c2", Rect::new(20, 0, 20, 30));
        map.register_column("c3", Rect::new(40, 0, 20, 30));

        let mut controller = DragController::default();
        controller.on_drag_start(
            DragId::Column("c3".to_string()),
            Rect::new(40, 0, 20, 30),
            (50, 1),
        );
        controller.on_drag_end(&mut store, &map, (10, 1));
        let mut before = vec!["c1", "c2", "c3"];
        let mut after = column_ids(&store);
        before.sort();
        after.sort();
        assert_eq!(before, after);
        store.validate().unwrap();
    }

    #[test]
    fn abandoned_gesture_keeps_prior_splices() {
        let (mut store, map) = board_and_registry();
        let mut controller = DragController::default();
        controller.on_drag_start(
            DragId::Task("t1".to_string()),
            Rect::new(1, 1, 18, 4),
            (5, 2),
        );
        controller.on_drag_over(&mut store, &map, (25, 2));
        assert_eq!(ids(&store, "b"), vec!["t1", "t3"]);

        // Abandoning the gesture skips only the final commit; the
        // cross-column splice already applied is sticky.
        controller.cancel();
        assert!(!controller.is_dragging());
        assert_eq!(ids(&store, "a"), vec!["t2"]);
        assert_eq!(ids(&store, "b"), vec!["t1", "t3"]);
        assert_task_uniqueness(&store);
    }

    #[test]
    fn release_with_nothing_resolvable_aborts_without_mutation() {
        let (mut store, _map) = board_and_registry();
        let before = store.revision();
        let mut controller = DragController::default();
        controller.on_drag_start(
            DragId::Task("t1".to_string()),
            Rect::new(1, 1, 18, 4),
            (5, 2),
        );
        // No drag-over ever fired, nothing cached, registry empty: the
        // resolution comes up empty and the drop is a no-op.
        let empty = DroppableMap::default();
        let outcome = controller.on_drag_end(&mut store, &empty, (200, 200));
        assert_eq!(outcome, None);
        assert!(!controller.is_dragging());
        assert_eq!(store.revision(), before);
        assert_eq!(ids(&store, "a"), vec!["t1", "t2"]);
    }

    #[test]
    fn unknown_task_id_is_a_logged_noop() {
        let (mut store, map) = board_and_registry();
        let before = store.revision();
        let mut controller = DragController::default();
        controller.on_drag_start(
            DragId::Task("ghost".to_string()),
            Rect::new(1, 1, 18, 4),
            (5, 2),
        );
        assert!(!controller.on_drag_over(&mut store, &map, (25, 2)));
        assert_eq!(controller.on_drag_end(&mut store, &map, (25, 2)), None);
        assert_eq!(store.revision(), before);
    }

    #[test]
    fn second_grab_during_gesture_is_ignored() {
        let (mut _store, _map) = board_and_registry();
        let mut controller = DragController::default();
        controller.on_drag_start(
            DragId::Task("t1".to_string()),
            Rect::new(1, 1, 18, 4),
            (5, 2),
        );
        controller.on_drag_start(
            DragId::Task("t2".to_string()),
            Rect::new(1, 6, 18, 4),
            (5, 7),
        );
        assert_eq!(
            controller.active(),
            Some(&DragId::Task("t1".to_string()))
        );
    }

    #[test]
    fn cancel_discards_session_without_commit() {
        let (mut store, map) = board_and_registry();
        let mut controller = DragController::default();
        controller.on_drag_start(
            DragId::Task("t1".to_string()),
            Rect::new(1, 1, 18, 4),
            (5, 2),
        );
        controller.cancel();
        assert!(!controller.is_dragging());
        assert_eq!(controller.on_drag_end(&mut store, &map, (5, 7)), None);
        assert_eq!(ids(&store, "a"), vec!["t1", "t2"]);
    }

    #[test]
    fn drag_sequence_preserves_task_uniqueness() {
        let (mut store, map) = board_and_registry();
        let mut controller = DragController::default();
        controller.on_drag_start(
            DragId::Task("t2".to_string()),
            Rect::new(1, 6, 18, 4),
            (5, 7),
        );
        controller.on_drag_over(&mut store, &map, (25, 2));
        controller.on_drag_over(&mut store, &map, (5, 2));
        controller.on_drag_over(&mut store, &map, (25, 4));
        controller.on_drag_end(&mut store, &map, (25, 4));
        assert_task_uniqueness(&store);
        assert_eq!(store.task_count(), 3);
        store.validate().unwrap();
    }
}
