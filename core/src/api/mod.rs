//! Public API for quotient.
//!
//! The [`Coordinator`] accepts arithmetic expressions, compiles them to an
//! AST, and evaluates each one by sending a task per operator through a
//! shared [`Bridge`](crate::bridge::Bridge) to a pool of workers.
//!
//! # Example
//!
//! ```ignore
//! use quotient_core::api::{Coordinator, EngineOptions};
//!
//! let coordinator = Coordinator::new(EngineOptions::default());
//! let workers = coordinator.spawn_workers();
//!
//! // Fire and forget, then poll.
//! let id = coordinator.submit("(1 + 2) * 3")?;
//! // ... later ...
//! let record = coordinator.expression(id).unwrap();
//! println!("{} = {:?} ({})", record.expression, record.result, record.status);
//!
//! workers.shutdown().await;
//! ```

pub mod coordinator;
pub mod error;
pub mod options;


pub use coordinator::Coordinator;
pub use error::{Diagnostic, Error, Severity};
pub use options::{BridgeConfig, CostTable, EngineOptions, ExecutionOptions, WorkerOptions};
