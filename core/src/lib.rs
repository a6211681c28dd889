//! Distributed evaluation of arithmetic expressions.
//!
//! Source text is tokenized and parsed into an [`parser::Ast`]. A
//! [`scheduler::Scheduler`] walks the tree and sends one [`task::Task`] per
//! operator through a [`bridge::Bridge`] to a [`worker::WorkerPool`], waiting
//! for each result before moving on. The [`api::Coordinator`] ties these
//! together and tracks every expression in a [`lifecycle::ExpressionStore`].

pub mod api;
pub mod bridge;
pub mod lifecycle;
pub mod parser;
pub mod scheduler;
pub mod task;
pub mod worker;

#[cfg(test)]
mod property_test;
