//! Wire models for Console API payloads.
//!
//! These mirror the backend's JSON shapes; `resource` types are built from
//! them so the rest of the application never sees wire structure.

use crate::board::{Attachment, Column, Comment, DueRange, Priority, Status, Task, User};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Every Console API response nests its payload under `data`.
///
#[derive(Deserialize)]
pub struct Wrapper<T> {
    pub data: T,
}

#[derive(Deserialize, Serialize)]
pub struct UserModel {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<UserModel> for User {
    fn from(m: UserModel) -> User {
        User {
            id: m.id,
            name: m.name,
            email: m.email,
        }
    }
}

#[derive(Deserialize)]
pub struct CommentModel {
    pub id: String,
    pub author: UserModel,
    pub text: String,
    pub created_at: Option<String>,
}

#[derive(Deserialize)]
pub struct AttachmentModel {
    pub id: String,
    pub name: String,
    pub url: String,
}

#[derive(Deserialize)]
pub struct TaskModel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub status: String,
    pub priority: String,
    #[serde(default)]
    pub assignees: Vec<UserModel>,
    pub reporter: UserModel,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub comments: Vec<CommentModel>,
    #[serde(default)]
    pub attachments: Vec<AttachmentModel>,
    pub due_start: Option<NaiveDate>,
    pub due_end: Option<NaiveDate>,
}

impl From<TaskModel> for Task {
    fn from(m: TaskModel) -> Task {
        Task {
            id: m.id,
            name: m.name,
            description: m.description,
            status: parse_status(&m.status),
            priority: parse_priority(&m.priority),
            assignees: m.assignees.into_iter().map(User::from).collect(),
            reporter: m.reporter.into(),
            labels: m.labels,
            comments: m
                .comments
                .into_iter()
                .map(|c| Comment {
                    id: c.id,
                    author: c.author.into(),
                    text: c.text,
                    created_at: c.created_at,
                })
                .collect(),
            attachments: m
                .attachments
                .into_iter()
                .map(|a| Attachment {
                    id: a.id,
                    name: a.name,
                    url: a.url,
                })
                .collect(),
            due: match (m.due_start, m.due_end) {
                (Some(start), Some(end)) => Some(DueRange { start, end }),
                _ => None,
            },
        }
    }
}

#[derive(Deserialize)]
pub struct ColumnModel {
    pub id: String,
    pub name: String,
}

impl From<ColumnModel> for Column {
    fn from(m: ColumnModel) -> Column {
        Column {
            id: m.id,
            name: m.name,
        }
    }
}

#[derive(Deserialize)]
pub struct BoardModel {
    pub columns: Vec<ColumnModel>,
    pub tasks: HashMap<String, Vec<TaskModel>>,
}

/// Unknown statuses land on Open rather than failing the whole board load.
///
fn parse_status(value: &str) -> Status {
    match value {
        "in_progress" => Status::InProgress,
        "resolved" => Status::Resolved,
        "closed" => Status::Closed,
        _ => Status::Open,
    }
}

fn parse_priority(value: &str) -> Priority {
    match value {
        "low" => Priority::Low,
        "high" => Priority::High,
        "urgent" => Priority::Urgent,
        _ => Priority::Medium,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_model_maps_into_task() {
        let json = r#"{
            "id": "t1",
            "name": "Flagged comment",
            "status": "in_progress",
            "priority": "urgent",
            "reporter": {"id": "u1", "name": "Dana", "email": "dana@example.com"},
            "labels": ["abuse"],
            "due_start": "2026-08-01",
            "due_end": "2026-08-03"
        }"#;
        let model: TaskModel = serde_json::from_str(json).unwrap();
        let task: Task = model.into();
        assert_eq!(task.status, Status::InProgress);
        assert_eq!(task.priority, Priority::Urgent);
        assert_eq!(task.reporter.name, "Dana");
        assert!(task.assignees.is_empty());
        let due = task.due.unwrap();
        assert_eq!(due.end.to_string(), "2026-08-03");
    }

    #[test]
    fn unknown_status_defaults_to_open() {
        assert_eq!(parse_status("archived"), Status::Open);
        assert_eq!(parse_priority("mystery"), Priority::Medium);
    }
}
