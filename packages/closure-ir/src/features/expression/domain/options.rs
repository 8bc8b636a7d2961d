//! Compiler options
//!
//! Explicit configuration passed by reference to every closure compilation.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How a bare name is classified when it could be either a call target or a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolType {
    /// Left as a plain `Identifier`
    Identifier,

    /// Treated as a class constructor reference (`Name::class`)
    Constructor,
}

lazy_static! {
    /// Classifications that are always present under user ones
    pub static ref BUILTIN_SYMBOL_TYPES: HashMap<&'static str, SymbolType> = {
        let mut m = HashMap::with_capacity(4);

        // Ambiguous collection factories
        m.insert("listOf", SymbolType::Identifier);
        m.insert("setOf", SymbolType::Identifier);
        m.insert("mapOf", SymbolType::Identifier);

        // Definitely constructors
        m.insert("Pair", SymbolType::Constructor);

        m
    };
}

/// Expression compiler options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompilerOptions {
    /// Per-name classification overrides
    pub symbol_types: HashMap<String, SymbolType>,

    /// An uppercase-leading bare call name is a constructor reference
    pub upper_case_is_class_name: bool,

    /// Only process closures in declarations carrying the marker annotation
    pub only_if_annotation_present: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            symbol_types: HashMap::new(),
            upper_case_is_class_name: true,
            only_if_annotation_present: false,
        }
    }
}

impl CompilerOptions {
    pub fn with_symbol_type(mut self, name: impl Into<String>, symbol_type: SymbolType) -> Self {
        self.symbol_types.insert(name.into(), symbol_type);
        self
    }

    pub fn upper_case_is_class_name(mut self, value: bool) -> Self {
        self.upper_case_is_class_name = value;
        self
    }

    pub fn only_if_annotation_present(mut self, value: bool) -> Self {
        self.only_if_annotation_present = value;
        self
    }

    /// Classification of a name; user entries win over built-in ones
    pub fn symbol_type(&self, name: &str) -> Option<SymbolType> {
        self.symbol_types
            .get(name)
            .copied()
            .or_else(|| BUILTIN_SYMBOL_TYPES.get(name).copied())
    }
}
