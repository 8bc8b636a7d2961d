//! Tree-sitter parser implementation
//!
//! This is where the tree-sitter dependency lives.

use tree_sitter::{Parser as TSParser, Tree};

use super::languages::kotlin;
use crate::features::parsing::domain::{ParseError, ParsedTree, SyntaxNode};
use crate::features::parsing::ports::Parser;
use crate::shared::models::{ClosureIrError, Result, Span, TextRange};

/// Tree-sitter based Kotlin parser
#[derive(Debug, Default, Clone, Copy)]
pub struct KotlinParser;

impl KotlinParser {
    pub fn new() -> Self {
        Self
    }

    fn get_ts_language(&self) -> tree_sitter::Language {
        tree_sitter_kotlin::language()
    }

    /// Convert tree-sitter tree to our domain model
    fn convert_tree(&self, tree: &Tree, source: &str, file_path: &str) -> ParsedTree {
        let root_node = tree.root_node();
        let root = self.convert_node(&root_node, source);

        let mut errors = Vec::new();
        self.collect_errors(&root_node, &mut errors);

        ParsedTree::new(
            root,
            source.to_string(),
            file_path.to_string(),
            self.language_name().to_string(),
        )
        .with_errors(errors)
    }

    /// Convert a tree-sitter node to SyntaxNode
    fn convert_node(&self, node: &tree_sitter::Node, source: &str) -> SyntaxNode {
        let range = TextRange::new(node.start_byte(), node.end_byte());

        let children: Vec<SyntaxNode> = (0..node.child_count())
            .filter_map(|i| node.child(i))
            .map(|c| self.convert_node(&c, source))
            .collect();

        let mut converted = SyntaxNode::new(node.kind(), range)
            .with_span(to_span(node))
            .with_children(children);
        if node.child_count() == 0 {
            converted = converted.with_text(source.get(node.byte_range()).unwrap_or(""));
        }
        if !node.is_named() {
            converted = converted.anonymous();
        }
        if node.is_extra() || kotlin::is_comment(node.kind()) {
            converted = converted.extra();
        }
        converted
    }

    /// Collect parse errors
    fn collect_errors(&self, node: &tree_sitter::Node, errors: &mut Vec<ParseError>) {
        if node.is_error() || node.is_missing() {
            errors.push(ParseError {
                message: format!("Parse error at {:?}", node.kind()),
                span: to_span(node),
            });
        }

        for i in 0..node.child_count() {
            if let Some(child) = node.child(i) {
                self.collect_errors(&child, errors);
            }
        }
    }
}

fn to_span(node: &tree_sitter::Node) -> Span {
    Span::new(
        node.start_position().row as u32 + 1,
        node.start_position().column as u32,
        node.end_position().row as u32 + 1,
        node.end_position().column as u32,
    )
}

impl Parser for KotlinParser {
    fn parse(&self, source: &str, file_path: &str) -> Result<ParsedTree> {
        let mut parser = TSParser::new();
        parser
            .set_language(&self.get_ts_language())
            .map_err(|e| ClosureIrError::parse(format!("Failed to set language: {}", e)))?;

        let tree = parser.parse(source, None).ok_or_else(|| {
            ClosureIrError::parse("Failed to parse source code").with_file(file_path)
        })?;

        Ok(self.convert_tree(&tree, source, file_path))
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext, "kt" | "kts")
    }

    fn language_name(&self) -> &'static str {
        "kotlin"
    }
}
