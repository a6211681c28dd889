//! Atomic units of remote work and their results.
//!
//! These are the shapes that cross the bridge between the scheduler and the
//! workers. Field names follow the wire format used by task transports
//! (`operation_time`, `task_id`, `result`).

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::parser::Operator;

/// Correlation id linking a [`Task`] to its [`TaskResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Errors carried inside tasks and results.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum TaskError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("unknown operator '{0}'")]
    UnknownOperator(String),
}

/// One binary operation with both operands already resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub arg1: f64,
    pub arg2: f64,
    /// Operator symbol. Kept as text so that workers validate it themselves.
    pub operation: String,
    /// Simulated cost in milliseconds.
    #[serde(rename = "operation_time")]
    pub duration_ms: u64,
    /// Failure detected while building the task (e.g. division by zero).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<TaskError>,
}

impl Task {
    pub fn new(op: Operator, arg1: f64, arg2: f64, duration_ms: u64) -> Self {
        let error = (op == Operator::Div && arg2 == 0.0).then_some(TaskError::DivisionByZero);
        Self {
            id: TaskId::new(),
            arg1,
            arg2,
            operation: op.symbol().to_string(),
            duration_ms,
            error,
        }
    }

    pub fn operator(&self) -> Result<Operator, TaskError> {
        Operator::from_symbol(&self.operation)
            .ok_or_else(|| TaskError::UnknownOperator(self.operation.clone()))
    }
}

/// Outcome of one task, correlated by `task_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    pub task_id: TaskId,
    #[serde(rename = "result")]
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<TaskError>,
}

impl TaskResult {
    pub fn ok(task_id: TaskId, value: f64) -> Self {
        Self {
            task_id,
            value,
            error: None,
        }
    }

    pub fn failed(task_id: TaskId, error: TaskError) -> Self {
        Self {
            task_id,
            value: 0.0,
            error: Some(error),
        }
    }

    pub fn into_result(self) -> Result<f64, TaskError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.value),
        }
    }
}
