//! Single source of truth for column order and per-column task order.
//!
//! The store performs no invariant checking on mutation; callers (the drag
//! controller and the keyboard move handlers) are responsible for keeping
//! every task in exactly one column. `validate` exists for the load
//! boundary, where upstream data cannot be trusted.

use super::error::BoardError;
use super::resource::{Column, Task};
use std::collections::{HashMap, HashSet};

/// Move an element of `list` from one index to another, preserving the
/// relative order of everything else.
///
pub fn array_move<T>(list: &mut Vec<T>, from: usize, to: usize) {
    if from >= list.len() || from == to {
        return;
    }
    let item = list.remove(from);
    let to = to.min(list.len());
    list.insert(to, item);
}

/// Holds the ordered columns of one board and the ordered tasks of each
/// column.
///
pub struct BoardStore {
    columns: Vec<Column>,
    tasks: HashMap<String, Vec<Task>>,
    revision: u64,
}

impl Default for BoardStore {
    fn default() -> BoardStore {
        BoardStore {
            columns: vec![],
            tasks: HashMap::new(),
            revision: 0,
        }
    }
}

impl BoardStore {
    /// Return a new store with the given columns and tasks mapping.
    ///
    pub fn new(columns: Vec<Column>, tasks: HashMap<String, Vec<Task>>) -> BoardStore {
        BoardStore {
            columns,
            tasks,
            revision: 0,
        }
    }

    /// Return the ordered column list.
    ///
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Return the tasks mapping.
    ///
    pub fn tasks(&self) -> &HashMap<String, Vec<Task>> {
        &self.tasks
    }

    /// Return the ordered task list of one column, or an empty slice for an
    /// unknown column id.
    ///
    pub fn column_tasks(&self, column_id: &str) -> &[Task] {
        self.tasks.get(column_id).map(|t| t.as_slice()).unwrap_or(&[])
    }

    /// Return the current revision. The revision is bumped on every
    /// mutation so observers can recompute derived views without comparing
    /// structures.
    ///
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the entire tasks mapping. No validation is performed; the
    /// caller guarantees the union-of-tasks invariant holds afterwards.
    ///
    pub fn move_task(&mut self, updated: HashMap<String, Vec<Task>>) -> &mut Self {
        self.tasks = updated;
        self.revision += 1;
        self
    }

    /// Replace the column order. No validation is performed.
    ///
    pub fn move_column(&mut self, updated: Vec<Column>) -> &mut Self {
        self.columns = updated;
        self.revision += 1;
        self
    }

    /// Append a task to the end of a column's list.
    ///
    pub fn insert_task(&mut self, column_id: &str, task: Task) -> &mut Self {
        self.tasks.entry(column_id.to_owned()).or_default().push(task);
        self.revision += 1;
        self
    }

    /// Append a column to the end of the column list, with an empty task
    /// list.
    ///
    pub fn add_column(&mut self, column: Column) -> &mut Self {
        self.tasks.entry(column.id.to_owned()).or_default();
        self.columns.push(column);
        self.revision += 1;
        self
    }

    /// Return the id of the column currently containing the task, or None
    /// if the task is absent from every column.
    ///
    pub fn column_of(&self, task_id: &str) -> Option<&str> {
        self.tasks.iter().find_map(|(column_id, tasks)| {
            tasks
                .iter()
                .any(|t| t.id == task_id)
                .then(|| column_id.as_str())
        })
    }

    /// Return the column id and index of the task within that column.
    ///
    pub fn task_position(&self, task_id: &str) -> Option<(&str, usize)> {
        self.tasks.iter().find_map(|(column_id, tasks)| {
            tasks
                .iter()
                .position(|t| t.id == task_id)
                .map(|index| (column_id.as_str(), index))
        })
    }

    /// Return the position of a column in the display order.
    ///
    pub fn column_index(&self, column_id: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.id == column_id)
    }

    /// Return whether the id names a column of this board.
    ///
    pub fn is_column(&self, id: &str) -> bool {
        self.columns.iter().any(|c| c.id == id)
    }

    /// Reorder one column's task list with array-move semantics.
    ///
    pub fn move_task_within(&mut self, column_id: &str, from: usize, to: usize) -> &mut Self {
        if let Some(tasks) = self.tasks.get_mut(column_id) {
            array_move(tasks, from, to);
            self.revision += 1;
        }
        self
    }

    /// Remove a task from its current column and splice it into the
    /// destination column at the given index, clamped to the destination
    /// length. No-op when the task is absent from every column.
    ///
    pub fn move_task_to_column(
        &mut self,
        task_id: &str,
        dest_column_id: &str,
        index: usize,
    ) -> &mut Self {
        let source = match self.column_of(task_id) {
            Some(column_id) => column_id.to_owned(),
            None => return self,
        };
        let position = self.tasks[&source]
            .iter()
            .position(|t| t.id == task_id)
            .expect("column_of and task list agree");
        let task = self
            .tasks
            .get_mut(&source)
            .expect("source column exists")
            .remove(position);
        let dest = self.tasks.entry(dest_column_id.to_owned()).or_default();
        dest.insert(index.min(dest.len()), task);
        self.revision += 1;
        self
    }

    /// Check the board invariants: unique column ids, every tasks key names
    /// an existing column, and every task id appears in exactly one column
    /// list. Used at the load boundary only; interactive mutation paths
    /// trust their callers.
    ///
    pub fn validate(&self) -> Result<(), BoardError> {
        let mut column_ids = HashSet::new();
        for column in &self.columns {
            if !column_ids.insert(column.id.as_str()) {
                return Err(BoardError::DuplicateColumn {
                    id: column.id.to_owned(),
                });
            }
        }
        for key in self.tasks.keys() {
            if !column_ids.contains(key.as_str()) {
                return Err(BoardError::UnknownColumn { id: key.to_owned() });
            }
        }
        let mut task_ids = HashSet::new();
        for tasks in self.tasks.values() {
            for task in tasks {
                if !task_ids.insert(task.id.as_str()) {
                    return Err(BoardError::DuplicateTask {
                        id: task.id.to_owned(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Return the total number of tasks across all columns.
    ///
    pub fn task_count(&self) -> usize {
        self.tasks.values().map(|t| t.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};

    fn task_with_id(id: &str) -> Task {
        let mut task: Task = Faker.fake();
        task.id = id.to_string();
        task
    }

    fn column_with_id(id: &str) -> Column {
        Column {
            id: id.to_string(),
            name: id.to_uppercase(),
        }
    }

    fn two_column_store() -> BoardStore {
        let mut tasks = HashMap::new();
        tasks.insert(
            "todo".to_string(),
            vec![task_with_id("t1"), task_with_id("t2")],
        );
        tasks.insert("done".to_string(), vec![task_with_id("t3")]);
        BoardStore::new(vec![column_with_id("todo"), column_with_id("done")], tasks)
    }

    #[test]
    fn array_move_reorders() {
        let mut list = vec![1, 2, 3, 4];
        array_move(&mut list, 0, 2);
        assert_eq!(list, vec![2, 3, 1, 4]);
        array_move(&mut list, 3, 0);
        assert_eq!(list, vec![4, 2, 3, 1]);
    }

    #[test]
    fn array_move_out_of_range_is_noop() {
        let mut list = vec![1, 2];
        array_move(&mut list, 5, 0);
        assert_eq!(list, vec![1, 2]);
        array_move(&mut list, 0, 9);
        assert_eq!(list, vec![2, 1]);
    }

    #[test]
    fn column_of_and_task_position() {
        let store = two_column_store();
        assert_eq!(store.column_of("t3"), Some("done"));
        assert_eq!(store.task_position("t2"), Some(("todo", 1)));
        assert_eq!(store.column_of("missing"), None);
    }

    #[test]
    fn move_task_replaces_mapping_and_bumps_revision() {
        let mut store = two_column_store();
        let before = store.revision();
        let mut updated = store.tasks().clone();
        let task = updated.get_mut("todo").unwrap().remove(0);
        updated.get_mut("done").unwrap().insert(0, task);
        store.move_task(updated);
        assert_eq!(store.column_of("t1"), Some("done"));
        assert!(store.revision() > before);
    }

    #[test]
    fn move_task_to_column_splices_once() {
        let mut store = two_column_store();
        store.move_task_to_column("t1", "done", 1);
        assert_eq!(store.column_tasks("todo").len(), 1);
        let done: Vec<&str> = store
            .column_tasks("done")
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(done, vec!["t3", "t1"]);
        store.validate().unwrap();
    }

    #[test]
    fn move_task_to_column_missing_task_is_noop() {
        let mut store = two_column_store();
        let before = store.revision();
        store.move_task_to_column("missing", "done", 0);
        assert_eq!(store.revision(), before);
        store.validate().unwrap();
    }

    #[test]
    fn move_column_preserves_id_set() {
        let mut store = two_column_store();
        let mut ids_before: Vec<String> =
            store.columns().iter().map(|c| c.id.to_owned()).collect();
        let mut reordered = store.columns().to_vec();
        reordered.reverse();
        store.move_column(reordered);
        let mut ids_after: Vec<String> =
            store.columns().iter().map(|c| c.id.to_owned()).collect();
        ids_before.sort();
        ids_after.sort();
        assert_eq!(ids_before, ids_after);
    }

    #[test]
    fn validate_accepts_generated_ids() {
        let mut tasks = HashMap::new();
        let list: Vec<Task> = (0..16)
            .map(|_| task_with_id(&uuid::Uuid::new_v4().to_string()))
            .collect();
        tasks.insert("todo".to_string(), list);
        let store = BoardStore::new(vec![column_with_id("todo")], tasks);
        store.validate().unwrap();
        assert_eq!(store.task_count(), 16);
    }

    #[test]
    fn validate_rejects_duplicate_task() {
        let mut store = two_column_store();
        let mut tasks = store.tasks().clone();
        let duplicate = tasks["todo"][0].clone();
        tasks.get_mut("done").unwrap().push(duplicate);
        store.move_task(tasks);
        assert!(matches!(
            store.validate(),
            Err(BoardError::DuplicateTask { .. })
        ));
    }

    #[test]
    fn validate_rejects_unknown_column_key() {
        let mut store = two_column_store();
        let mut tasks = store.tasks().clone();
        tasks.insert("ghost".to_string(), vec![task_with_id("t9")]);
        store.move_task(tasks);
        assert!(matches!(
            store.validate(),
            Err(BoardError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn insert_task_lands_at_end() {
        let mut store = two_column_store();
        store.insert_task("todo", task_with_id("t4"));
        let todo: Vec<&str> = store
            .column_tasks("todo")
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(todo, vec!["t1", "t2", "t4"]);
    }

    #[test]
    fn add_column_creates_empty_task_list() {
        let mut store = two_column_store();
        store.add_column(column_with_id("review"));
        assert_eq!(store.column_index("review"), Some(2));
        assert!(store.column_tasks("review").is_empty());
        store.validate().unwrap();
    }
}
