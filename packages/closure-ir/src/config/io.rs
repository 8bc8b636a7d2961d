//! Configuration I/O
//!
//! YAML schema types. Loading and validation live in `closure_ir_config.rs`.

use super::closure_ir_config::{DebugDumpConfig, PreludeConfig};
use crate::features::expression::CompilerOptions;
use serde::{Deserialize, Serialize};

/// Current schema version
pub const CONFIG_VERSION: u32 = 1;

/// YAML Schema v1
///
/// ```yaml
/// version: 1
/// compiler:
///   only_if_annotation_present: true
///   symbol_types:
///     Money: Constructor
/// marker: Kotlinq
/// debug:
///   enabled: true
///   dir: build/closure-ir
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1); optional here so a missing field gets a
    /// dedicated error
    #[serde(default)]
    pub version: Option<u32>,

    #[serde(default)]
    pub compiler: CompilerOptions,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,

    #[serde(default)]
    pub prelude: PreludeConfig,

    #[serde(default)]
    pub debug: DebugDumpConfig,
}
