//! Public error types for the quotient API.
//!
//! Internal errors are converted to these public types at API boundaries.

use core::fmt;

use thiserror::Error as ThisError;

use crate::lifecycle::StoreError;
use crate::parser::{CompileError, Span};
use crate::scheduler::EvalError;

/// Public error type for all quotient operations.
#[derive(Debug, ThisError)]
pub enum Error {
    /// The expression could not be tokenized or parsed.
    ///
    /// Contains a diagnostic with source location and context.
    #[error("Compilation failed: {}", .diagnostic.message)]
    Compilation {
        diagnostic: Diagnostic,
        #[source]
        source: CompileError,
    },

    /// Evaluation was aborted (task failure, closed channels, depth limit).
    #[error("Evaluation failed: {0}")]
    Evaluation(#[from] EvalError),

    /// Expression bookkeeping failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Error {
    /// The compile diagnostic, if this is a compilation error.
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            Error::Compilation { diagnostic, .. } => Some(diagnostic),
            _ => None,
        }
    }
}

impl From<CompileError> for Error {
    fn from(err: CompileError) -> Self {
        Error::Compilation {
            diagnostic: err.to_diagnostic(),
            source: err,
        }
    }
}

/// A diagnostic message with source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Severity level (error, warning, info).
    pub severity: Severity,

    /// Primary diagnostic message.
    pub message: String,

    /// Source location of the primary issue.
    pub span: Span,

    /// Optional help text suggesting how to fix the issue.
    pub help: Option<String>,

    /// Optional error code (e.g., "C001") for documentation lookup.
    pub code: Option<String>,
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Error - the expression cannot be evaluated.
    Error,
    /// Warning - suspicious input that might be wrong.
    Warning,
    /// Info - informational message.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}
