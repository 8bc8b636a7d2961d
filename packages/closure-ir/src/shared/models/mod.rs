//! Shared models

mod error;
mod span;

pub use error::{ClosureIrError, ErrorKind, Result};
pub use span::{Span, TextRange};
