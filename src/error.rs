use crate::domain::task::TaskStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaskOpsError>;

/// Reasons a task move is rejected by the transition orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("Transition {from} -> {to} is not allowed by the workflow")]
    IllegalTransition { from: TaskStatus, to: TaskStatus },

    #[error("Column {to} is missing from the workflow")]
    UnknownColumn { to: TaskStatus },

    #[error("Column {column_id} is full ({current_count}/{limit})")]
    WipLimitExceeded {
        column_id: TaskStatus,
        limit: u32,
        current_count: usize,
    },
}

#[derive(Debug, Error)]
pub enum TaskOpsError {
    #[error(transparent)]
    Move(#[from] MoveError),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Task already exists: {0}")]
    DuplicateTask(String),

    #[error("Invalid task ID: {0:?}")]
    InvalidTaskId(String),

    #[error("Invalid task status: {0}")]
    InvalidStatus(String),

    #[error("Invalid priority: {0}")]
    InvalidPriority(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("WIP limit for column {0} must be positive")]
    InvalidWipLimit(TaskStatus),

    #[error("Workflow has more than one column for {0}")]
    DuplicateColumn(TaskStatus),

    #[error("Sprint end {end} must be after start {start}")]
    InvalidSprintRange { start: String, end: String },

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
