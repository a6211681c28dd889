use thiserror::Error;

use crate::api::{Diagnostic, Severity};
use crate::parser::Span;

/// Errors detected while turning source text into an AST.
///
/// All of these are raised before any task is emitted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    #[error("invalid character: {ch}")]
    InvalidCharacter { ch: char, span: Span },

    #[error("mismatched parentheses")]
    MismatchedParentheses { span: Span },

    #[error("malformed token '{token}'")]
    MalformedToken { token: String, span: Span },

    #[error("invalid postfix expression: {reason}")]
    InvalidPostfix { reason: String, span: Span },
}

impl CompileError {
    pub fn span(&self) -> &Span {
        match self {
            CompileError::InvalidCharacter { span, .. }
            | CompileError::MismatchedParentheses { span }
            | CompileError::MalformedToken { span, .. }
            | CompileError::InvalidPostfix { span, .. } => span,
        }
    }

    /// Convert to a Diagnostic for API boundary
    pub fn to_diagnostic(&self) -> Diagnostic {
        let (code, help) = match self {
            CompileError::InvalidCharacter { .. } => (
                "C001",
                Some("Only digits, '.', '+', '-', '*', '/', parentheses and whitespace are allowed"),
            ),
            CompileError::MismatchedParentheses { .. } => {
                ("C002", Some("Check that every '(' has a matching ')'"))
            }
            CompileError::MalformedToken { .. } => ("C003", Some("Check the number format")),
            CompileError::InvalidPostfix { .. } => (
                "C004",
                Some("Every operator needs a left and a right operand"),
            ),
        };

        Diagnostic {
            severity: Severity::Error,
            message: self.to_string(),
            span: self.span().clone(),
            help: help.map(str::to_string),
            code: Some(code.to_string()),
        }
    }
}
