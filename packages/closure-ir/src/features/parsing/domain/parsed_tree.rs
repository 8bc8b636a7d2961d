//! Parsed tree representation
//!
//! Abstracts the parsed source file for downstream processing.

use super::syntax_node::SyntaxNode;
use crate::shared::models::Span;

/// Parsed syntax tree
#[derive(Debug, Clone)]
pub struct ParsedTree {
    /// Root node of the tree
    pub root: SyntaxNode,

    /// Source code the byte offsets refer to
    pub source: String,

    /// File path (for error messages)
    pub file_path: String,

    pub language: String,

    /// Whether parsing had errors
    pub has_errors: bool,

    /// Parse errors (if any)
    pub errors: Vec<ParseError>,
}

/// Parse error
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParsedTree {
    pub fn new(root: SyntaxNode, source: String, file_path: String, language: String) -> Self {
        Self {
            root,
            source,
            file_path,
            language,
            has_errors: false,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(mut self, errors: Vec<ParseError>) -> Self {
        self.has_errors = !errors.is_empty();
        self.errors = errors;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::TextRange;

    #[test]
    fn test_parsed_tree_new() {
        let source = "package a\nval x = { it }".to_string();
        let lambda = SyntaxNode::new("lambda_literal", TextRange::new(18, 24));
        let root = SyntaxNode::new("source_file", TextRange::new(0, source.len()))
            .with_children(vec![lambda.clone()]);
        let tree = ParsedTree::new(root, source, "A.kt".to_string(), "kotlin".to_string());

        assert_eq!(lambda.text_in(&tree.source), "{ it }");
        assert!(!tree.has_errors);
    }
}
