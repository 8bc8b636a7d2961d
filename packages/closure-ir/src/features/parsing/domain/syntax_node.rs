//! Generic syntax node representation
//!
//! Owned copy of a parser tree: production kind tag, ordered children, leaf text and
//! byte offsets. Everything downstream (normalizer, compiler, locator) works on this
//! type only, never on tree-sitter nodes.

use crate::shared::models::{Span, TextRange};

/// Generic syntax node
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
    /// Grammar production kind (e.g. `lambda_literal`, `+`)
    pub kind: String,

    /// Named production (false for anonymous tokens like `(` or `&&`)
    pub named: bool,

    /// Token on a non-default channel (comments)
    pub extra: bool,

    /// Byte range in the parsed source
    pub range: TextRange,

    pub span: Span,

    /// Token text (leaves only)
    pub text: Option<String>,

    pub children: Vec<SyntaxNode>,
}

impl SyntaxNode {
    pub fn new(kind: impl Into<String>, range: TextRange) -> Self {
        Self {
            kind: kind.into(),
            named: true,
            extra: false,
            range,
            span: Span::zero(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Anonymous token leaf
    pub fn token(text: impl Into<String>, range: TextRange) -> Self {
        let text = text.into();
        Self {
            kind: text.clone(),
            named: false,
            extra: false,
            range,
            span: Span::zero(),
            text: Some(text),
            children: Vec::new(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn anonymous(mut self) -> Self {
        self.named = false;
        self
    }

    pub fn extra(mut self) -> Self {
        self.extra = true;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }

    /// Source text covered by this node
    pub fn text_in<'s>(&self, source: &'s str) -> &'s str {
        self.range.slice(source)
    }

    /// Find first direct child of given kind
    pub fn find_child(&self, kind: &str) -> Option<&SyntaxNode> {
        self.children.iter().find(|c| c.kind == kind)
    }

    /// Find all direct children of given kind
    pub fn find_children(&self, kind: &str) -> Vec<&SyntaxNode> {
        self.children.iter().filter(|c| c.kind == kind).collect()
    }

    /// Named, non-comment direct children
    pub fn named_children(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter(|c| c.named && !c.extra)
    }

    /// Find the first descendant (pre-order, self excluded) of given kind
    pub fn find_descendant(&self, kind: &str) -> Option<&SyntaxNode> {
        let mut stack: Vec<&SyntaxNode> = self.children.iter().rev().collect();
        while let Some(current) = stack.pop() {
            if current.kind == kind {
                return Some(current);
            }
            stack.extend(current.children.iter().rev());
        }
        None
    }

    /// All descendants (pre-order, self excluded) of given kind
    pub fn find_descendants(&self, kind: &str) -> Vec<&SyntaxNode> {
        let mut result = Vec::new();
        let mut stack: Vec<&SyntaxNode> = self.children.iter().rev().collect();
        while let Some(current) = stack.pop() {
            if current.kind == kind {
                result.push(current);
            }
            stack.extend(current.children.iter().rev());
        }
        result
    }

    /// Descendants of given kind that contain no further descendant of that kind
    pub fn innermost_descendants(&self, kind: &str) -> Vec<&SyntaxNode> {
        self.find_descendants(kind)
            .into_iter()
            .filter(|n| n.find_descendant(kind).is_none())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str, start: usize) -> SyntaxNode {
        SyntaxNode::new("simple_identifier", TextRange::new(start, start + name.len()))
            .with_text(name)
    }

    #[test]
    fn test_innermost_descendants_skip_enclosing() {
        let inner = SyntaxNode::new("lambda_literal", TextRange::new(4, 10))
            .with_children(vec![ident("it", 6)]);
        let outer = SyntaxNode::new("lambda_literal", TextRange::new(0, 12))
            .with_children(vec![inner.clone()]);
        let root = SyntaxNode::new("source_file", TextRange::new(0, 12))
            .with_children(vec![outer]);

        assert_eq!(root.find_descendants("lambda_literal").len(), 2);
        assert_eq!(root.innermost_descendants("lambda_literal"), vec![&inner]);
    }

    #[test]
    fn test_named_children_skip_tokens_and_comments() {
        let node = SyntaxNode::new("value_arguments", TextRange::new(0, 8)).with_children(vec![
            SyntaxNode::token("(", TextRange::new(0, 1)),
            ident("a", 1),
            SyntaxNode::new("line_comment", TextRange::new(2, 7)).extra(),
            SyntaxNode::token(")", TextRange::new(7, 8)),
        ]);
        let named: Vec<_> = node.named_children().map(|c| c.kind.as_str()).collect();
        assert_eq!(named, vec!["simple_identifier"]);
    }
}
