//! Code generation error types

use thiserror::Error;

/// Emission error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmitError {
    /// A `Ref` holding a host-resolved symbol has no textual form
    #[error("Cannot serialize resolved reference '{name}': only textual references are emittable")]
    UnserializableReference { name: String },
}

/// Error reading emitted code back into a node tree
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReadError {
    #[error("Unexpected end of input at {pos}: expected {expected}")]
    UnexpectedEnd { pos: usize, expected: String },

    #[error("Unexpected input at {pos}: expected {expected}, found '{found}'")]
    Unexpected {
        pos: usize,
        expected: String,
        found: String,
    },

    #[error("Unknown node variant '{0}'")]
    UnknownVariant(String),

    #[error("{variant} takes {expected} children, found {found}")]
    Arity {
        variant: String,
        expected: String,
        found: usize,
    },

    #[error("Invalid number literal '{0}'")]
    InvalidNumber(String),

    #[error("Trailing input at {0}")]
    TrailingInput(usize),
}
