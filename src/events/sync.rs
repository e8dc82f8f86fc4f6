use crate::backend::Console;
use crate::board::{sample_board, BoardKind};
use crate::state::State;
use anyhow::Result;
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Specify different sync event types.
///
#[derive(Debug, Clone)]
pub enum Event {
    LoadBoard {
        kind: BoardKind,
    },
    TaskMoved {
        task_id: String,
        to_column: String,
        index: usize,
    },
    ColumnMoved {
        column_id: String,
        index: usize,
    },
    TaskCreated {
        board: BoardKind,
        column_id: String,
        name: String,
        description: String,
    },
    ColumnCreated {
        board: BoardKind,
        name: String,
    },
}

/// Specify struct for managing state with sync events.
///
pub struct Handler<'a> {
    state: &'a Arc<Mutex<State>>,
    console: Option<Console>,
}

impl<'a> Handler<'a> {
    /// Return new instance with reference to state. With no Console API
    /// configured the handler serves generated boards and keeps reorder
    /// reports local.
    ///
    pub fn new(state: &'a Arc<Mutex<State>>, console: Option<Console>) -> Self {
        Handler { state, console }
    }

    /// Handle sync events by type.
    ///
    pub async fn handle(&mut self, event: Event) -> Result<()> {
        debug!("Processing sync event '{:?}'...", event);
        match event {
            Event::LoadBoard { kind } => self.load_board(kind).await,
            Event::TaskMoved {
                task_id,
                to_column,
                index,
            } => self.task_moved(task_id, to_column, index).await,
            Event::ColumnMoved { column_id, index } => {
                self.column_moved(column_id, index).await
            }
            Event::TaskCreated {
                board,
                column_id,
                name,
                description,
            } => self.task_created(board, column_id, name, description).await,
            Event::ColumnCreated { board, name } => self.column_created(board, name).await,
        }
        Ok(())
    }

    /// Fetch a board from the backend, falling back to a generated board
    /// offline or when the fetch fails or produces invalid data.
    ///
    async fn load_board(&mut self, kind: BoardKind) {
        let store = match &self.console {
            Some(console) => match console.board(kind).await {
                Ok(store) => match store.validate() {
                    Ok(()) => {
                        info!(
                            "Loaded board '{}' with {} tasks.",
                            kind.key(),
                            store.task_count()
                        );
                        store
                    }
                    Err(e) => {
                        error!("Rejected board '{}': {}", kind.key(), e);
                        sample_board(kind)
                    }
                },
                Err(e) => {
                    warn!(
                        "Failed to fetch board '{}' ({}); using generated data.",
                        kind.key(),
                        e
                    );
                    sample_board(kind)
                }
            },
            None => {
                info!("Offline mode: generating board '{}'.", kind.key());
                sample_board(kind)
            }
        };
        let mut state = self.state.lock().await;
        state.set_board(kind, store);
    }

    /// Report a task move. Failures are logged and swallowed; the board
    /// already reflects the move.
    ///
    async fn task_moved(&mut self, task_id: String, to_column: String, index: usize) {
        if let Some(console) = &self.console {
            if let Err(e) = console.move_task(&task_id, &to_column, index).await {
                error!("Failed to report move of task '{}': {}", task_id, e);
            }
        }
    }

    /// Report a column reorder. Failures are logged and swallowed.
    ///
    async fn column_moved(&mut self, column_id: String, index: usize) {
        if let Some(console) = &self.console {
            if let Err(e) = console.move_column(&column_id, index).await {
                error!("Failed to report move of column '{}': {}", column_id, e);
            }
        }
    }

    /// Report a created task. The local insert already happened; failures
    /// are logged and swallowed.
    ///
    async fn task_created(
        &mut self,
        _board: BoardKind,
        column_id: String,
        name: String,
        description: String,
    ) {
        if let Some(console) = &self.console {
            let operator_id = {
                let state = self.state.lock().await;
                state.get_operator().id.to_owned()
            };
            if let Err(e) = console
                .create_task(&column_id, &name, &description, &operator_id)
                .await
            {
                error!("Failed to report created task '{}': {}", name, e);
            }
        }
    }

    /// Report a created column. Failures are logged and swallowed.
    ///
    async fn column_created(&mut self, board: BoardKind, name: String) {
        if let Some(console) = &self.console {
            if let Err(e) = console.create_column(board, &name).await {
                error!("Failed to report created column '{}': {}", name, e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn offline_load_installs_generated_board() {
        let state = Arc::new(Mutex::new(State::default()));
        let mut handler = Handler::new(&state, None);
        handler
            .handle(Event::LoadBoard {
                kind: BoardKind::Support,
            })
            .await
            .unwrap();
        let state = state.lock().await;
        assert!(state.has_board(BoardKind::Support));
    }

    #[tokio::test]
    async fn move_report_without_console_is_silent() {
        let state = Arc::new(Mutex::new(State::default()));
        let mut handler = Handler::new(&state, None);
        handler
            .handle(Event::TaskMoved {
                task_id: "t1".to_string(),
                to_column: "done".to_string(),
                index: 0,
            })
            .await
            .unwrap();
    }
}
