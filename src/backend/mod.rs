//! Console API module.
//!
//! Responsible for asynchronous interaction with the platform's Console
//! API, including transformation of response data into board types. Only
//! the in-memory contract matters to the rest of the application; every
//! call here is best-effort.

mod client;
mod error;
mod models;

pub use error::ApiError;

use crate::board::{BoardKind, BoardStore, Column, Task};
use client::Client;
use log::*;
use models::{BoardModel, ColumnModel, TaskModel};
use serde_json::json;
use std::collections::HashMap;

/// Console API facade for board fetches and reorder/create calls.
///
pub struct Console {
    client: Client,
}

impl Console {
    /// Return a new instance for the given base URL and optional token.
    ///
    pub fn new(base_url: &str, access_token: Option<&str>) -> Console {
        debug!("Initializing Console API client for {}...", base_url);
        Console {
            client: Client::new(base_url, access_token),
        }
    }

    /// Fetch one board and build its store.
    ///
    pub async fn board(&self, kind: BoardKind) -> Result<BoardStore, ApiError> {
        debug!("Requesting board '{}'...", kind.key());
        let model: BoardModel = self.client.get(&format!("boards/{}", kind.key())).await?;
        let columns: Vec<Column> = model.columns.into_iter().map(Column::from).collect();
        let tasks: HashMap<String, Vec<Task>> = model
            .tasks
            .into_iter()
            .map(|(column_id, tasks)| {
                (
                    column_id,
                    tasks.into_iter().map(Task::from).collect::<Vec<Task>>(),
                )
            })
            .collect();
        Ok(BoardStore::new(columns, tasks))
    }

    /// Report a task move to the backend.
    ///
    pub async fn move_task(
        &self,
        task_id: &str,
        to_column: &str,
        index: usize,
    ) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .client
            .post(
                &format!("tasks/{}/move", task_id),
                json!({ "column": to_column, "index": index }),
            )
            .await?;
        Ok(())
    }

    /// Report a column reorder to the backend.
    ///
    pub async fn move_column(&self, column_id: &str, index: usize) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .client
            .post(
                &format!("columns/{}/move", column_id),
                json!({ "index": index }),
            )
            .await?;
        Ok(())
    }

    /// Create a task at the end of a column and return it as stored by the
    /// backend.
    ///
    pub async fn create_task(
        &self,
        column_id: &str,
        name: &str,
        description: &str,
        reporter_id: &str,
    ) -> Result<Task, ApiError> {
        let model: TaskModel = self
            .client
            .post(
                &format!("columns/{}/tasks", column_id),
                json!({
                    "name": name,
                    "description": description,
                    "reporter": reporter_id,
                }),
            )
            .await?;
        Ok(model.into())
    }

    /// Create a column at the end of a board.
    ///
    pub async fn create_column(&self, kind: BoardKind, name: &str) -> Result<Column, ApiError> {
        let model: ColumnModel = self
            .client
            .post(
                &format!("boards/{}/columns", kind.key()),
                json!({ "name": name }),
            )
            .await?;
        Ok(model.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn reporter_json() -> serde_json::Value {
        json!({"id": "u1", "name": "Dana", "email": "dana@example.com"})
    }

    #[tokio::test]
    async fn board_fetch_builds_valid_store() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/boards/support");
                then.status(200).json_body(json!({
                    "data": {
                        "columns": [
                            {"id": "new", "name": "New"},
                            {"id": "resolved", "name": "Resolved"}
                        ],
                        "tasks": {
                            "new": [{
                                "id": "t1",
                                "name": "Seats not provisioned",
                                "status": "open",
                                "priority": "high",
                                "reporter": reporter_json()
                            }],
                            "resolved": []
                        }
                    }
                }));
            })
            .await;

        let console = Console::new(&server.base_url(), Some("token"));
        let store = console.board(BoardKind::Support).await.unwrap();
        mock.assert_async().await;
        store.validate().unwrap();
        assert_eq!(store.columns().len(), 2);
        assert_eq!(store.column_tasks("new")[0].name, "Seats not provisioned");
    }

    #[tokio::test]
    async fn move_task_posts_column_and_index() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/tasks/t1/move")
                    .json_body(json!({"column": "done", "index": 2}));
                then.status(200).json_body(json!({"data": {"ok": true}}));
            })
            .await;

        let console = Console::new(&server.base_url(), None);
        console.move_task("t1", "done", 2).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn move_column_posts_index() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/columns/escalated/move")
                    .json_body(json!({"index": 0}));
                then.status(200).json_body(json!({"data": {"ok": true}}));
            })
            .await;

        let console = Console::new(&server.base_url(), None);
        console.move_column("escalated", 0).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn create_task_returns_backend_task() {
        let server = MockServer::start_async().await;
        let _mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/columns/new/tasks");
                then.status(200).json_body(json!({
                    "data": {
                        "id": "t9",
                        "name": "Password reset loop",
                        "status": "open",
                        "priority": "medium",
                        "reporter": reporter_json()
                    }
                }));
            })
            .await;

        let console = Console::new(&server.base_url(), None);
        let task = console
            .create_task("new", "Password reset loop", "", "u1")
            .await
            .unwrap();
        assert_eq!(task.id, "t9");
    }

    #[tokio::test]
    async fn error_status_surfaces_as_api_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/boards/moderation");
                then.status(500).body("boom");
            })
            .await;

        let console = Console::new(&server.base_url(), None);
        let result = console.board(BoardKind::Moderation).await;
        assert!(matches!(
            result,
            Err(ApiError::Status { status: 500, .. })
        ));
    }
}
