//! Compilation scope
//!
//! Threaded by value through the recursive translation and only ever narrowed.

use super::options::{CompilerOptions, SymbolType};

/// Per-recursion scoping record
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    /// Closure parameter names, index = position
    pub lambda_argument_names: &'a [String],

    /// Unqualified names denote bindings captured at the call site
    pub locals_as_vals: bool,

    /// Dotted path prefix for references reached through a member chain
    pub qualification: Option<&'a str>,

    pub options: &'a CompilerOptions,
}

impl<'a> Context<'a> {
    /// Closure-level scope
    pub fn root(lambda_argument_names: &'a [String], options: &'a CompilerOptions) -> Self {
        Self {
            lambda_argument_names,
            locals_as_vals: true,
            qualification: None,
            options,
        }
    }

    /// Scope for the property side of a member access
    pub fn property_scope(self, qualification: Option<&'a str>) -> Self {
        Self {
            locals_as_vals: false,
            qualification: qualification.or(self.qualification),
            ..self
        }
    }

    pub fn lambda_argument(&self, name: &str) -> Option<usize> {
        self.lambda_argument_names.iter().position(|n| n == name)
    }

    pub fn symbol_type(&self, name: &str) -> Option<SymbolType> {
        self.options.symbol_type(name)
    }
}
