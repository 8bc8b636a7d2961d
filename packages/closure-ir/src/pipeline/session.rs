//! Processing session
//!
//! Shared by reference across worker threads. The dump counter is the only mutable
//! state; it numbers every processed file, rewritten or not.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{info, warn};

use super::processor::process_source;
use crate::config::ClosureIrConfig;
use crate::shared::models::Result;

/// Source file handed to a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Outcome of one file in a batch
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,

    /// `Ok(None)` when the file was left unchanged
    pub result: Result<Option<String>>,
}

/// Processing session
#[derive(Debug)]
pub struct ProcessingSession {
    config: Arc<ClosureIrConfig>,
    counter: AtomicUsize,
}

impl ProcessingSession {
    pub fn new(config: ClosureIrConfig) -> Self {
        Self::with_shared_config(Arc::new(config))
    }

    pub fn with_shared_config(config: Arc<ClosureIrConfig>) -> Self {
        Self {
            config,
            counter: AtomicUsize::new(0),
        }
    }

    pub fn config(&self) -> &ClosureIrConfig {
        &self.config
    }

    /// Number of files processed so far
    pub fn processed(&self) -> usize {
        self.counter.load(Ordering::SeqCst)
    }

    /// Rewrite one file; `None` when nothing changed
    pub fn process(&self, path: &Path, content: &str) -> Result<Option<String>> {
        let number = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let file = path.display().to_string();

        let rewritten = process_source(content, &file, &self.config)?;
        if let Some(text) = &rewritten {
            info!(file = %file, "Rewrote closures");
            if self.config.debug.enabled {
                self.dump(path, number, text)?;
            }
        }
        Ok(rewritten)
    }

    /// Rewritten text, or the original when nothing changed or processing failed
    pub fn patch(&self, path: &Path, content: &str) -> String {
        match self.process(path, content) {
            Ok(Some(rewritten)) => rewritten,
            Ok(None) => content.to_string(),
            Err(e) => {
                warn!(file = %path.display(), error = %e, "Leaving file unchanged");
                content.to_string()
            }
        }
    }

    /// Process files in parallel; outcomes keep input order
    pub fn process_batch(&self, files: &[SourceFile]) -> Vec<FileOutcome> {
        let outcomes: Vec<FileOutcome> = files
            .par_iter()
            .map(|file| FileOutcome {
                path: file.path.clone(),
                result: self.process(&file.path, &file.content),
            })
            .collect();

        let rewritten = outcomes
            .iter()
            .filter(|o| matches!(o.result, Ok(Some(_))))
            .count();
        info!(
            files = files.len(),
            rewritten,
            "Batch processing complete"
        );
        outcomes
    }

    fn dump(&self, path: &Path, number: usize, text: &str) -> Result<PathBuf> {
        let dir = &self.config.debug.dir;
        fs::create_dir_all(dir)?;

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("source");
        let target = dir.join(format!("{}_{}.kt", stem, number));

        info!(path = %target.display(), "Writing debug dump");
        fs::write(&target, text)?;
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DebugDumpConfig;

    const SOURCE: &str = "package a\nfun f() = xs.map { it }\n";

    #[test]
    fn test_patch_returns_original_when_unchanged() {
        let session = ProcessingSession::new(ClosureIrConfig::default());
        let content = "package a\nval x = 1\n";
        assert_eq!(session.patch(Path::new("A.kt"), content), content);
        assert_eq!(session.processed(), 1);
    }

    #[test]
    fn test_debug_dump_written() {
        let dir = tempfile::tempdir().unwrap();
        let config = ClosureIrConfig::default()
            .with_debug_dump(DebugDumpConfig::enabled_in(dir.path().join("dumps")));
        let session = ProcessingSession::new(config);

        session.process(Path::new("src/Unchanged.kt"), "val x = 1\n").unwrap();
        let rewritten = session.process(Path::new("src/Repo.kt"), SOURCE).unwrap().unwrap();

        let dumped = fs::read_to_string(dir.path().join("dumps").join("Repo_2.kt")).unwrap();
        assert_eq!(dumped, rewritten);
        assert!(!dir.path().join("dumps").join("Unchanged_1.kt").exists());
    }

    #[test]
    fn test_batch_keeps_order_and_counts() {
        let session = ProcessingSession::new(ClosureIrConfig::default());
        let files: Vec<SourceFile> = (0..8)
            .map(|i| {
                let content = if i % 2 == 0 { SOURCE } else { "val x = 1\n" };
                SourceFile::new(format!("F{}.kt", i), content)
            })
            .collect();

        let outcomes = session.process_batch(&files);
        assert_eq!(session.processed(), 8);
        for (i, outcome) in outcomes.iter().enumerate() {
            assert_eq!(outcome.path, PathBuf::from(format!("F{}.kt", i)));
            let changed = outcome.result.as_ref().unwrap().is_some();
            assert_eq!(changed, i % 2 == 0);
        }
    }
}
