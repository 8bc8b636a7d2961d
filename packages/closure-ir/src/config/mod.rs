//! Configuration System
//!
//! Programmatic builders for embedding hosts, or a versioned YAML file:
//!
//! ```rust,ignore
//! use closure_ir::config::ClosureIrConfig;
//! use closure_ir::CompilerOptions;
//!
//! let config = ClosureIrConfig::new(CompilerOptions::default().only_if_annotation_present(true));
//!
//! let config = ClosureIrConfig::from_yaml("closure-ir.yaml")?;
//! ```
//!
//! Files must carry `version: 1`; unknown fields are rejected and every loaded
//! configuration is validated.

pub mod closure_ir_config;
pub mod error;
pub mod io;
pub mod validation;

// Re-exports
pub use closure_ir_config::{
    ClosureIrConfig, DebugDumpConfig, PreludeConfig, DEFAULT_PRELUDE_IMPORTS, DEFAULT_STUB_MARKER,
};
pub use error::{ConfigError, ConfigResult};
pub use io::{ConfigFileV1, CONFIG_VERSION};
pub use validation::Validatable;
