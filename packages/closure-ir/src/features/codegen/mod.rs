//! Code generation Feature
//!
//! Turns `Node` trees into Kotlin source and reads that source back.
//!
//! ## Structure
//! - `emitter` - Node → constructor-call text
//! - `reader` - constructor-call text → Node
//! - `error` - EmitError, ReadError

mod emitter;
mod error;
mod reader;

pub use emitter::{emit, emit_literal, QQQ};
pub use error::{EmitError, ReadError};
pub use reader::NodeReader;
