//! Parsing Feature
//!
//! Responsible for turning Kotlin source into an owned syntax tree and normalizing it.
//!
//! ## Structure
//! - `domain/` - ParsedTree, SyntaxNode models
//! - `ports/` - Parser trait
//! - `application/` - ParseFileUseCase, normalize
//! - `infrastructure/` - KotlinParser (tree-sitter)

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

// Re-exports
pub use application::{normalize, ParseFileUseCase};
pub use domain::{ParseError, ParsedTree, SyntaxNode};
pub use infrastructure::tree_sitter::languages::kotlin::node_kinds;
pub use infrastructure::KotlinParser;
pub use ports::Parser;
