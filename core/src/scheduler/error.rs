//! Errors that abort a scheduler walk.
//!
//! A walk is all-or-nothing: the first error stops it and no further tasks
//! are emitted for subtrees not yet visited.

use thiserror::Error;

use crate::task::{TaskError, TaskId};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// A worker (or task construction) reported a failure for this task.
    #[error("task {task_id} failed: {source}")]
    Task {
        task_id: TaskId,
        #[source]
        source: TaskError,
    },

    /// Nobody is listening for tasks anymore.
    #[error("task channel closed")]
    TaskChannelClosed,

    /// The result channel closed while waiting for a task's result.
    #[error("result channel closed while waiting for task {0}")]
    ResultChannelClosed(TaskId),

    /// Operator nesting exceeded the configured limit.
    #[error("evaluation depth {depth} exceeds maximum of {max_depth}")]
    DepthExceeded { depth: usize, max_depth: usize },
}

impl EvalError {
    /// The task-level cause, if this error came back through a result.
    pub fn task_error(&self) -> Option<&TaskError> {
        match self {
            EvalError::Task { source, .. } => Some(source),
            _ => None,
        }
    }
}
