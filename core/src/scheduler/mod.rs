//! Distributed AST evaluator.
//!
//! The scheduler owns the evaluation order of one expression. It walks the
//! tree depth-first, left before right, and for every operator node sends a
//! [`Task`](crate::task::Task) on its task channel, then blocks on its
//! result channel until the matching [`TaskResult`](crate::task::TaskResult)
//! arrives.
//!
//! ## Example
//!
//! ```ignore
//! use quotient_core::{api::CostTable, parser, scheduler};
//! use quotient_core::task::{Task, TaskResult};
//! use tokio::sync::mpsc;
//!
//! let ast = parser::parse("2 + 2")?;
//! let (task_tx, task_rx) = mpsc::channel::<Task>(1);
//! let (result_tx, mut result_rx) = mpsc::channel::<TaskResult>(1);
//! // ... hand task_rx / result_tx to a worker ...
//! let value = scheduler::evaluate(&ast, &CostTable::default(), &task_tx, &mut result_rx).await?;
//! assert_eq!(value, 4.0);
//! ```

mod error;
mod eval;


pub use error::EvalError;
pub use eval::Scheduler;

use tokio::sync::mpsc;

use crate::{
    api::{CostTable, ExecutionOptions},
    parser::Ast,
    task::{Task, TaskResult},
};

/// Evaluate `ast` with default limits.
///
/// Uses default stack depth limit of 1000.
pub async fn evaluate(
    ast: &Ast,
    costs: &CostTable,
    tasks: &mpsc::Sender<Task>,
    results: &mut mpsc::Receiver<TaskResult>,
) -> Result<f64, EvalError> {
    evaluate_with_options(ExecutionOptions::default(), ast, costs, tasks, results).await
}

/// Evaluate `ast` with custom execution options.
pub async fn evaluate_with_options(
    options: ExecutionOptions,
    ast: &Ast,
    costs: &CostTable,
    tasks: &mpsc::Sender<Task>,
    results: &mut mpsc::Receiver<TaskResult>,
) -> Result<f64, EvalError> {
    Scheduler::new(options, ast, costs, tasks, results).run().await
}
