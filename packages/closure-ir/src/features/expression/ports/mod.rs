//! Expression ports (interfaces)

mod symbol_resolver;

pub use symbol_resolver::SymbolResolver;
