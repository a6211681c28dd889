//! Expression lifecycle state.
//!
//! Every submitted expression gets a record that starts out `processing` and
//! moves exactly once to `DONE` (with a value) or `error`.

mod store;


pub use store::{ExpressionStore, MemoryStore, StoreError};

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpressionId(pub Uuid);

impl ExpressionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ExpressionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExpressionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpressionStatus {
    #[serde(rename = "processing")]
    Processing,
    #[serde(rename = "DONE")]
    Done,
    #[serde(rename = "error")]
    Error,
}

impl ExpressionStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, ExpressionStatus::Processing)
    }
}

impl fmt::Display for ExpressionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionStatus::Processing => write!(f, "processing"),
            ExpressionStatus::Done => write!(f, "DONE"),
            ExpressionStatus::Error => write!(f, "error"),
        }
    }
}

/// How an expression ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Done(f64),
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionRecord {
    pub id: ExpressionId,
    pub expression: String,
    pub status: ExpressionStatus,
    /// Present only when `status` is `DONE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<f64>,
    /// Insertion order within the store.
    #[serde(skip)]
    pub seq: u64,
}

impl ExpressionRecord {
    pub fn processing(id: ExpressionId, expression: impl Into<String>) -> Self {
        Self {
            id,
            expression: expression.into(),
            status: ExpressionStatus::Processing,
            result: None,
            seq: 0,
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Done(value) => {
                self.status = ExpressionStatus::Done;
                self.result = Some(value);
            }
            Outcome::Failed => {
                self.status = ExpressionStatus::Error;
                self.result = None;
            }
        }
    }
}
