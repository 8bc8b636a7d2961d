//! Error types for the closure-ir crate
//!
//! Unified error handling across the parse → locate → compile → emit → splice pipeline.
//! Per-closure compile problems never surface here: they are reported as `Error` /
//! `Unknown` nodes inside the rewritten source.

use std::fmt;

/// Error kind categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Parsing errors (tree-sitter setup, no tree produced)
    Parse,
    /// Code emission errors (non-serializable references)
    Emit,
    /// Errors reading emitted code back into a node tree
    Read,
    /// Source splicing errors
    Splice,
    /// Configuration errors
    Config,
    /// IO errors (debug dumps, config files)
    IO,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Parse => "parse",
            ErrorKind::Emit => "emit",
            ErrorKind::Read => "read",
            ErrorKind::Splice => "splice",
            ErrorKind::Config => "config",
            ErrorKind::IO => "io",
        }
    }
}

/// Unified error type
#[derive(Debug)]
pub struct ClosureIrError {
    pub kind: ErrorKind,
    pub message: String,
    pub file_path: Option<String>,
    pub line: Option<u32>,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ClosureIrError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            file_path: None,
            line: None,
            source: None,
        }
    }

    pub fn with_file(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    // Convenience constructors
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse, message)
    }

    pub fn emit(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Emit, message)
    }

    pub fn splice(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Splice, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::IO, message)
    }
}

impl fmt::Display for ClosureIrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.as_str(), self.message)?;
        if let Some(ref file) = self.file_path {
            write!(f, " in {}", file)?;
            if let Some(line) = self.line {
                write!(f, ":{}", line)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ClosureIrError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, ClosureIrError>;

impl From<std::io::Error> for ClosureIrError {
    fn from(err: std::io::Error) -> Self {
        ClosureIrError::io(format!("IO error: {}", err)).with_source(err)
    }
}

impl From<crate::features::codegen::EmitError> for ClosureIrError {
    fn from(err: crate::features::codegen::EmitError) -> Self {
        ClosureIrError::emit(err.to_string()).with_source(err)
    }
}

impl From<crate::features::codegen::ReadError> for ClosureIrError {
    fn from(err: crate::features::codegen::ReadError) -> Self {
        ClosureIrError::new(ErrorKind::Read, err.to_string()).with_source(err)
    }
}

impl From<crate::config::ConfigError> for ClosureIrError {
    fn from(err: crate::config::ConfigError) -> Self {
        ClosureIrError::config(err.to_string()).with_source(err)
    }
}
