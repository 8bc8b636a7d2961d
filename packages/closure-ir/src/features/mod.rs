//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains:
//! - domain/     - Pure data types (no external dependencies)
//! - ports/      - Interface definitions (traits)
//! - application/ - Use cases
//! - infrastructure/ - External dependency implementations
//!
//! Data flows parsing → splicing (locate) → expression (compile) → codegen (emit)
//! → splicing (rewrite).

pub mod parsing;

// Closure → Node tree compiler
pub mod expression;

// Node tree ↔ constructor-call code
pub mod codegen;

// Closure location, marker annotations, source rewriting
pub mod splicing;
