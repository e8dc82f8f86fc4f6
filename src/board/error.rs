//! Board-specific error types.

/// Errors that can occur when loading or validating board data.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// A task id appears in more than one column list
    #[error("Task {id} appears in more than one column")]
    DuplicateTask { id: String },

    /// The tasks mapping references a column that does not exist
    #[error("Tasks mapped to unknown column {id}")]
    UnknownColumn { id: String },

    /// Two columns share the same id
    #[error("Duplicate column id {id}")]
    DuplicateColumn { id: String },

    /// Generic board error
    #[error("Board error: {0}")]
    #[allow(dead_code)]
    Other(String),
}
