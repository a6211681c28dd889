//! Quotient - distributed arithmetic expression evaluation
//!
//! # Overview
//!
//! Quotient compiles arithmetic expressions (`+ - * /`, parentheses, decimal
//! numbers, unary minus on literals) into an expression tree, then evaluates
//! the tree by handing one task per operator to a pool of workers. Each
//! operation carries a configurable simulated cost, so the pool behaves like
//! a cluster of slow remote calculators.
//!
//! # Quick Start
//!
//! ```ignore
//! use quotient::{Coordinator, EngineOptions, render_error};
//!
//! #[tokio::main]
//! async fn main() {
//!     let coordinator = Coordinator::new(EngineOptions::from_env());
//!     let workers = coordinator.spawn_workers();
//!
//!     let source = "2 + 2 * 2";
//!     match coordinator.evaluate(source).await {
//!         Ok(value) => println!("{value}"),
//!         Err(e) => render_error(&e, source),
//!     }
//!
//!     workers.shutdown().await;
//! }
//! ```

// Re-export public API from quotient_core
pub use quotient_core::api::{
    BridgeConfig, Coordinator, CostTable, Diagnostic, EngineOptions, Error, ExecutionOptions,
    Severity, WorkerOptions,
};

pub use quotient_core::lifecycle::{ExpressionId, ExpressionRecord, ExpressionStatus};
pub use quotient_core::parser::{self, Ast, Operator};
pub use quotient_core::worker::{FixedBackoff, RetryPolicy, TaskSource, WorkerPool};
pub use quotient_core::{bridge, scheduler, task};

// Re-export errors
pub use quotient_core::parser::CompileError;
pub use quotient_core::scheduler::EvalError;

mod error_renderer;

pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};
