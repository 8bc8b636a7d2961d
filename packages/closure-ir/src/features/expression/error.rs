//! Expression compilation errors
//!
//! These never leave the compiler's public entry point: they are turned into
//! `Node::Error` at the closure boundary.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// Literal token whose text does not fit its kind (overflow, bad escape)
    #[error("Malformed {kind} literal '{text}': {reason}")]
    MalformedLiteral {
        kind: String,
        text: String,
        reason: String,
    },

    /// Production missing a child the translation requires
    #[error("Missing {expected} in {kind}")]
    MissingChild { kind: String, expected: String },

    #[error("{0}")]
    Internal(String),
}

impl CompileError {
    pub fn malformed(kind: impl Into<String>, text: impl Into<String>, reason: impl ToString) -> Self {
        CompileError::MalformedLiteral {
            kind: kind.into(),
            text: text.into(),
            reason: reason.to_string(),
        }
    }

    pub fn missing(kind: impl Into<String>, expected: impl Into<String>) -> Self {
        CompileError::MissingChild {
            kind: kind.into(),
            expected: expected.into(),
        }
    }
}
