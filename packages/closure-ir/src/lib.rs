/*
 * Closure IR - Kotlin closure → expression tree rewriter
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (Span, TextRange, ClosureIrError)
 * - features/    : Vertical slices (parsing → expression → codegen → splicing)
 * - pipeline/    : Per-file rewrite, processing session
 * - config/      : YAML-loadable configuration
 *
 * Every located closure `{ … }` is replaced by
 * `withExpression<N>({ … }, { <constructor-call tree> })`, keeping the closure
 * callable while exposing its structure to the runtime.
 */

#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

/// Shared models and utilities
pub mod shared;

/// Feature modules (parse, compile, emit, splice)
pub mod features;

/// Pipeline orchestration
pub mod pipeline;

/// Configuration system
pub mod config;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{ClosureIrConfig, ConfigError};
pub use features::codegen::{emit, EmitError, NodeReader, ReadError};
pub use features::expression::{
    BinaryOp, CompileError, CompilerOptions, ExpressionCompiler, Literal, Node, Reference,
    ResolvedSymbol, SymbolResolver, SymbolType, UnaryOp,
};
pub use features::parsing::{KotlinParser, ParsedTree, Parser, SyntaxNode};
pub use features::splicing::{ClosureSplicer, MarkerAnnotation, ParsedSpan, SpanLocator};
pub use pipeline::{preprocess, process_file_content, ProcessingSession, SourceFile};
pub use shared::models::{ClosureIrError, ErrorKind, Result};
