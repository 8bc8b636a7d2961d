//! Shared module - Common types
//!
//! Types shared across all features. No tree-sitter here.

pub mod models;

// Re-exports for convenience
pub use models::*;
