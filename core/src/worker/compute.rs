use core::time::Duration;

use crate::parser::Operator;
use crate::task::{Task, TaskError};

/// Perform one task, sleeping for its simulated cost first.
///
/// A task that already carries an error, or names an unknown operator, fails
/// immediately without sleeping.
pub async fn compute(task: &Task) -> Result<f64, TaskError> {
    if let Some(error) = &task.error {
        return Err(error.clone());
    }
    let op = task.operator()?;

    tokio::time::sleep(Duration::from_millis(task.duration_ms)).await;

    if op == Operator::Div && task.arg2 == 0.0 {
        return Err(TaskError::DivisionByZero);
    }
    Ok(op.apply(task.arg1, task.arg2))
}
