//! Per-file processing
//!
//! preprocess → parse → locate → compile/emit/splice. Each call is independent and
//! holds no state between files.

use tracing::debug;

use super::preprocess::preprocess;
use crate::config::ClosureIrConfig;
use crate::features::parsing::{KotlinParser, ParseFileUseCase};
use crate::features::splicing::{ClosureSplicer, SpanLocator};
use crate::shared::models::Result;

/// File name used in diagnostics for in-memory content
pub const IN_MEMORY_FILE: &str = "<memory>";

/// Rewrite a file's closures; `None` when no closure was selected
pub fn process_file_content(content: &str, config: &ClosureIrConfig) -> Result<Option<String>> {
    process_source(content, IN_MEMORY_FILE, config)
}

/// Same as [`process_file_content`], naming the file in logs and errors
pub fn process_source(
    content: &str,
    file_path: &str,
    config: &ClosureIrConfig,
) -> Result<Option<String>> {
    let prepared = preprocess(content, &config.prelude);

    let tree = ParseFileUseCase::new(KotlinParser::new())
        .execute(&prepared, file_path)
        .map_err(|e| e.with_file(file_path))?;

    let spans = SpanLocator::new(config.marker_annotation())
        .locate(&tree, config.compiler.only_if_annotation_present);
    if spans.is_empty() {
        debug!(file = file_path, "No closures selected");
        return Ok(None);
    }

    ClosureSplicer::new(&config.compiler).rewrite(&tree, &spans)
}
