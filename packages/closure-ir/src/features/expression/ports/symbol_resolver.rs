//! Symbol resolution port
//!
//! The compiler only stores qualified names. Turning `a.b::c` or `Pair::class` into
//! something invocable is a host capability.

use crate::features::expression::domain::ResolvedSymbol;

/// Host capability mapping a qualified name to an invocable handle
pub trait SymbolResolver: Send + Sync {
    /// Resolve a qualified name (`a.b::c`, `::sin`, `Pair::class`). `None` keeps the
    /// reference textual.
    fn resolve(&self, qualified_name: &str) -> Option<ResolvedSymbol>;
}
