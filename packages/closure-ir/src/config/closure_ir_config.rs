//! Top-level configuration
//!
//! `ClosureIrConfig` bundles the compiler options with the settings of the file
//! pipeline around it (marker name, prelude imports, debug dumps).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigFileV1, CONFIG_VERSION};
use super::validation::{is_identifier, Validatable};
use crate::features::expression::CompilerOptions;
use crate::features::splicing::{MarkerAnnotation, DEFAULT_MARKER};

/// Imports that make the rewritten calls resolvable
pub const DEFAULT_PRELUDE_IMPORTS: [&str; 2] =
    ["io.github.kotlinq.*", "io.github.kotlinq.expression.node.*"];

/// Placeholder text left by the IDE-side stubs, removed before parsing
pub const DEFAULT_STUB_MARKER: &str = " with Expression";

/// Source preparation before parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreludeConfig {
    /// Appended to the `package` line as `;import <x>;...`
    pub imports: Vec<String>,

    /// Text removed everywhere in the file
    pub stub_marker: String,
}

impl Default for PreludeConfig {
    fn default() -> Self {
        Self {
            imports: DEFAULT_PRELUDE_IMPORTS.iter().map(|s| s.to_string()).collect(),
            stub_marker: DEFAULT_STUB_MARKER.to_string(),
        }
    }
}

impl Validatable for PreludeConfig {
    fn validate(&self) -> ConfigResult<()> {
        for import in &self.imports {
            if import.trim().is_empty() {
                return Err(ConfigError::invalid("prelude.imports", "empty import"));
            }
            if import.contains([';', '\n', '\r']) {
                return Err(ConfigError::invalid(
                    "prelude.imports",
                    format!("'{}' must be a single import path", import),
                ));
            }
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "PreludeConfig"
    }
}

/// Rewritten-file dumps for inspecting the generated code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DebugDumpConfig {
    pub enabled: bool,

    /// Files are written as `<dir>/<file_stem>_<n>.kt`
    pub dir: PathBuf,
}

impl Default for DebugDumpConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            dir: PathBuf::from("build/closure-ir"),
        }
    }
}

impl DebugDumpConfig {
    pub fn enabled_in(dir: impl Into<PathBuf>) -> Self {
        Self {
            enabled: true,
            dir: dir.into(),
        }
    }
}

impl Validatable for DebugDumpConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.enabled && self.dir.as_os_str().is_empty() {
            return Err(ConfigError::invalid(
                "debug.dir",
                "a dump directory is required when dumping is enabled",
            ));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "DebugDumpConfig"
    }
}

impl Validatable for CompilerOptions {
    fn validate(&self) -> ConfigResult<()> {
        if let Some(name) = self.symbol_types.keys().find(|name| !is_identifier(name)) {
            return Err(ConfigError::invalid(
                "compiler.symbol_types",
                format!("'{}' is not a simple name", name),
            ));
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "CompilerOptions"
    }
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ClosureIrConfig {
    pub compiler: CompilerOptions,

    /// Simple name of the marker annotation
    pub marker: String,

    pub prelude: PreludeConfig,

    pub debug: DebugDumpConfig,
}

impl Default for ClosureIrConfig {
    fn default() -> Self {
        Self {
            compiler: CompilerOptions::default(),
            marker: DEFAULT_MARKER.to_string(),
            prelude: PreludeConfig::default(),
            debug: DebugDumpConfig::default(),
        }
    }
}

impl ClosureIrConfig {
    pub fn new(compiler: CompilerOptions) -> Self {
        Self {
            compiler,
            ..Self::default()
        }
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn with_prelude(mut self, prelude: PreludeConfig) -> Self {
        self.prelude = prelude;
        self
    }

    pub fn with_debug_dump(mut self, debug: DebugDumpConfig) -> Self {
        self.debug = debug;
        self
    }

    pub fn marker_annotation(&self) -> MarkerAnnotation {
        MarkerAnnotation::new(self.marker.as_str())
    }

    /// Load from YAML file (v1 schema)
    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        match file.version {
            None => return Err(ConfigError::MissingVersion),
            Some(found) if found != CONFIG_VERSION => {
                return Err(ConfigError::UnsupportedVersion {
                    found,
                    supported: vec![CONFIG_VERSION],
                })
            }
            Some(_) => {}
        }

        let config = Self {
            compiler: file.compiler,
            marker: file.marker.unwrap_or_else(|| DEFAULT_MARKER.to_string()),
            prelude: file.prelude,
            debug: file.debug,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(CONFIG_VERSION),
            compiler: self.compiler.clone(),
            marker: Some(self.marker.clone()),
            prelude: self.prelude.clone(),
            debug: self.debug.clone(),
        };
        Ok(serde_yaml::to_string(&file)?)
    }
}

impl Validatable for ClosureIrConfig {
    fn validate(&self) -> ConfigResult<()> {
        if !is_identifier(&self.marker) {
            return Err(ConfigError::invalid(
                "marker",
                format!("'{}' is not a valid annotation name", self.marker),
            ));
        }
        self.compiler.validate()?;
        self.prelude.validate()?;
        self.debug.validate()
    }

    fn config_name(&self) -> &'static str {
        "ClosureIrConfig"
    }
}
