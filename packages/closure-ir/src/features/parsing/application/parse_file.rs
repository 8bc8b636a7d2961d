//! Parse file use case

use crate::features::parsing::domain::ParsedTree;
use crate::features::parsing::ports::Parser;
use crate::shared::models::Result;

/// Parse file use case
pub struct ParseFileUseCase<P: Parser> {
    parser: P,
}

impl<P: Parser> ParseFileUseCase<P> {
    pub fn new(parser: P) -> Self {
        Self { parser }
    }

    /// Execute the parse operation
    ///
    /// Recoverable syntax errors are kept on the tree; only a missing tree is an error.
    pub fn execute(&self, source: &str, file_path: &str) -> Result<ParsedTree> {
        let tree = self.parser.parse(source, file_path)?;
        if tree.has_errors {
            tracing::debug!(
                file = file_path,
                errors = tree.errors.len(),
                "Parsed with syntax errors"
            );
        }
        Ok(tree)
    }

    pub fn parser(&self) -> &P {
        &self.parser
    }
}
