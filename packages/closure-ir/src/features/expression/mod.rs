//! Expression Feature
//!
//! Compiles closure literals into introspectable `Node` trees.
//!
//! ## Structure
//! - `domain/` - Node, Literal, Reference, CompilerOptions, Context
//! - `ports/` - SymbolResolver trait
//! - `application/` - ExpressionCompiler, literal decoding

pub mod application;
pub mod domain;
pub mod error;
pub mod ports;

// Re-exports
pub use application::{decode_literal, lambda_parameter_names, ExpressionCompiler, LiteralKind};
pub use domain::{
    BinaryOp, CompilerOptions, Context, Literal, Node, QualifiedName, RawSyntax, Reference,
    ResolvedSymbol, SymbolType, UnaryOp,
};
pub use error::CompileError;
pub use ports::SymbolResolver;
