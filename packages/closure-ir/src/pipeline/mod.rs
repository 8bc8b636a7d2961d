//! Pipeline orchestration
//!
//! File-level driver around the features: source preparation, the per-file
//! rewrite, and a session that numbers debug dumps and runs batches on rayon.

pub mod preprocess;
pub mod processor;
pub mod session;

pub use preprocess::preprocess;
pub use processor::{process_file_content, process_source, IN_MEMORY_FILE};
pub use session::{FileOutcome, ProcessingSession, SourceFile};
