//! Filter/search overlay over a board.
//!
//! Deriving a filtered view never mutates the store; the result is a fresh
//! tasks-by-column mapping that the UI renders in place of the full board.

use super::resource::{Priority, Status, Task};
use super::store::BoardStore;
use std::collections::HashMap;

/// Conjunction of task predicates. An empty dimension matches everything.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskFilters {
    pub name_query: String,
    pub assignee_ids: Vec<String>,
    pub statuses: Vec<Status>,
    pub priorities: Vec<Priority>,
    pub reporter_ids: Vec<String>,
    pub label: Option<String>,
}

impl TaskFilters {
    /// Return whether no dimension is active.
    ///
    pub fn is_empty(&self) -> bool {
        self.name_query.is_empty()
            && self.assignee_ids.is_empty()
            && self.statuses.is_empty()
            && self.priorities.is_empty()
            && self.reporter_ids.is_empty()
            && self.label.is_none()
    }

    /// Return whether the task passes every active dimension.
    ///
    pub fn matches(&self, task: &Task) -> bool {
        if !self.name_query.is_empty() {
            let query = self.name_query.to_lowercase();
            if !task.name.to_lowercase().contains(&query) {
                return false;
            }
        }
        if !self.assignee_ids.is_empty()
            && !self.assignee_ids.iter().any(|id| task.has_assignee(id))
        {
            return false;
        }
        if !self.statuses.is_empty() && !self.statuses.contains(&task.status) {
            return false;
        }
        if !self.priorities.is_empty() && !self.priorities.contains(&task.priority) {
            return false;
        }
        if !self.reporter_ids.is_empty()
            && !self.reporter_ids.iter().any(|id| &task.reporter.id == id)
        {
            return false;
        }
        if let Some(label) = &self.label {
            if !task.labels.iter().any(|l| l == label) {
                return false;
            }
        }
        true
    }
}

/// Return the tasks-by-column view of the board narrowed to tasks passing
/// the filters. Pure function of `(board, filters)`.
///
pub fn filter_board(store: &BoardStore, filters: &TaskFilters) -> HashMap<String, Vec<Task>> {
    store
        .tasks()
        .iter()
        .map(|(column_id, tasks)| {
            let visible = tasks
                .iter()
                .filter(|t| filters.matches(t))
                .cloned()
                .collect();
            (column_id.to_owned(), visible)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::resource::{Column, User};
    use fake::{Fake, Faker};

    fn store_with_tasks(tasks: Vec<Task>) -> BoardStore {
        let column = Column {
            id: "inbox".to_string(),
            name: "Inbox".to_string(),
        };
        let mut map = HashMap::new();
        map.insert("inbox".to_string(), tasks);
        BoardStore::new(vec![column], map)
    }

    #[test]
    fn empty_filters_match_everything() {
        let filters = TaskFilters::default();
        assert!(filters.is_empty());
        let task: Task = Faker.fake();
        assert!(filters.matches(&task));
    }

    #[test]
    fn name_query_is_case_insensitive_substring() {
        let mut task: Task = Faker.fake();
        task.name = "Fix broken video player".to_string();
        let filters = TaskFilters {
            name_query: "BROKEN VID".to_string(),
            ..TaskFilters::default()
        };
        assert!(filters.matches(&task));
        let filters = TaskFilters {
            name_query: "quiz".to_string(),
            ..TaskFilters::default()
        };
        assert!(!filters.matches(&task));
    }

    #[test]
    fn dimensions_are_conjunctive() {
        let assignee: User = Faker.fake();
        let mut task: Task = Faker.fake();
        task.name = "Review flagged comment".to_string();
        task.status = Status::Open;
        task.assignees = vec![assignee.to_owned()];

        let mut filters = TaskFilters {
            name_query: "flagged".to_string(),
            assignee_ids: vec![assignee.id.to_owned()],
            statuses: vec![Status::Open],
            ..TaskFilters::default()
        };
        assert!(filters.matches(&task));

        // One failing dimension fails the conjunction.
        filters.statuses = vec![Status::Closed];
        assert!(!filters.matches(&task));
    }

    #[test]
    fn reporter_and_label_dimensions() {
        let mut task: Task = Faker.fake();
        task.labels = vec!["quiz".to_string(), "video".to_string()];
        let filters = TaskFilters {
            reporter_ids: vec![task.reporter.id.to_owned()],
            label: Some("video".to_string()),
            ..TaskFilters::default()
        };
        assert!(filters.matches(&task));
        let filters = TaskFilters {
            label: Some("audio".to_string()),
            ..TaskFilters::default()
        };
        assert!(!filters.matches(&task));
    }

    #[test]
    fn filter_board_is_pure_and_stable() {
        let mut named: Task = Faker.fake();
        named.name = "Escalate refund ticket".to_string();
        let other: Task = Faker.fake();
        let store = store_with_tasks(vec![named.to_owned(), other.to_owned()]);
        let revision = store.revision();
        let filters = TaskFilters {
            name_query: "refund".to_string(),
            ..TaskFilters::default()
        };

        let first = filter_board(&store, &filters);
        let second = filter_board(&store, &filters);
        assert_eq!(first, second);
        // The store itself is untouched.
        assert_eq!(store.revision(), revision);
        assert_eq!(store.column_tasks("inbox").len(), 2);
        assert_eq!(first["inbox"].len(), 1);
        assert_eq!(first["inbox"][0].id, named.id);
    }

    #[test]
    fn filter_board_keeps_emptied_columns_as_keys() {
        let task: Task = Faker.fake();
        let store = store_with_tasks(vec![task]);
        let filters = TaskFilters {
            name_query: "no task has this name, surely".to_string(),
            ..TaskFilters::default()
        };
        let view = filter_board(&store, &filters);
        assert!(view.contains_key("inbox"));
        assert!(view["inbox"].is_empty());
    }
}
