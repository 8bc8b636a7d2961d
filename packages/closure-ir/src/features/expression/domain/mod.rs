//! Expression domain models

mod context;
mod node;
mod options;

pub use context::Context;
pub use node::{
    BinaryOp, Literal, Node, QualifiedName, RawSyntax, Reference, ResolvedSymbol, UnaryOp,
};
pub use options::{CompilerOptions, SymbolType, BUILTIN_SYMBOL_TYPES};
