//! Located closure span

use crate::features::parsing::SyntaxNode;
use crate::shared::models::TextRange;

/// A closure literal selected for rewriting
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSpan {
    /// Normalized closure literal
    pub lambda: SyntaxNode,

    /// Byte offsets into the parsed text
    pub start: usize,
    pub end: usize,
}

impl ParsedSpan {
    pub fn new(lambda: SyntaxNode) -> Self {
        let TextRange { start, end } = lambda.range;
        Self { lambda, start, end }
    }

    pub fn range(&self) -> TextRange {
        TextRange::new(self.start, self.end)
    }
}
