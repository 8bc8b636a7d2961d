//! Syntax normalization
//!
//! Collapses a raw tree into its canonical form before translation: comments are
//! dropped and single-child wrapper productions are unwrapped recursively, so a closure
//! body with one statement ends up as a single expression subtree.

use crate::features::parsing::domain::SyntaxNode;
use crate::features::parsing::infrastructure::tree_sitter::languages::kotlin::{
    self, node_kinds,
};

/// Normalize a subtree. Returns `None` for suppressed content (comments).
pub fn normalize(node: &SyntaxNode) -> Option<SyntaxNode> {
    if node.extra {
        return None;
    }
    if node.is_leaf() {
        return Some(node.clone());
    }
    // Interpolation delimiters are located by offset, keep the literal as parsed
    if node.is(node_kinds::STRING_LITERAL) {
        return Some(node.clone());
    }

    let children: Vec<SyntaxNode> = node.children.iter().filter_map(normalize).collect();

    if kotlin::is_structural(&node.kind) {
        return Some(rebuild(node, children));
    }

    match children.as_slice() {
        [only] if !only.named && only.is_leaf() => Some(rebuild(node, children)),
        [_] => children.into_iter().next(),
        _ => Some(rebuild(node, children)),
    }
}

fn rebuild(node: &SyntaxNode, children: Vec<SyntaxNode>) -> SyntaxNode {
    SyntaxNode {
        kind: node.kind.clone(),
        named: node.named,
        extra: false,
        range: node.range,
        span: node.span,
        text: node.text.clone(),
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::models::TextRange;

    fn ident(name: &str, start: usize) -> SyntaxNode {
        SyntaxNode::new("simple_identifier", TextRange::new(start, start + name.len()))
            .with_text(name)
    }

    #[test]
    fn test_comment_collapses_to_none() {
        let comment = SyntaxNode::new("line_comment", TextRange::new(0, 4))
            .with_text("// x")
            .extra();
        assert_eq!(normalize(&comment), None);
    }

    #[test]
    fn test_single_child_wrappers_unwrap_recursively() {
        let inner = ident("a", 2);
        let wrapped = SyntaxNode::new("value_argument", TextRange::new(2, 3)).with_children(vec![
            SyntaxNode::new("parenthesized_wrapper", TextRange::new(2, 3))
                .with_children(vec![inner.clone()]),
        ]);
        assert_eq!(normalize(&wrapped), Some(inner));
    }

    #[test]
    fn test_single_token_child_keeps_node() {
        let node = SyntaxNode::new("boolean_literal", TextRange::new(0, 4))
            .with_children(vec![SyntaxNode::token("true", TextRange::new(0, 4))]);
        assert_eq!(normalize(&node), Some(node.clone()));
    }

    #[test]
    fn test_multiple_children_drop_comments() {
        let node = SyntaxNode::new("additive_expression", TextRange::new(0, 12)).with_children(vec![
            ident("a", 0),
            SyntaxNode::new("multiline_comment", TextRange::new(2, 7)).extra(),
            SyntaxNode::token("+", TextRange::new(8, 9)),
            ident("b", 10),
        ]);
        let normalized = normalize(&node).unwrap();
        let kinds: Vec<_> = normalized.children.iter().map(|c| c.kind.as_str()).collect();
        assert_eq!(kinds, vec!["simple_identifier", "+", "simple_identifier"]);
    }

    #[test]
    fn test_statements_are_never_unwrapped() {
        let statements = SyntaxNode::new("statements", TextRange::new(2, 4))
            .with_children(vec![ident("it", 2)]);
        let lambda = SyntaxNode::new("lambda_literal", TextRange::new(0, 6)).with_children(vec![
            SyntaxNode::token("{", TextRange::new(0, 1)),
            statements.clone(),
            SyntaxNode::token("}", TextRange::new(5, 6)),
        ]);
        let normalized = normalize(&lambda).unwrap();
        assert_eq!(normalized.kind, "lambda_literal");
        assert_eq!(normalized.children[1], statements);
    }
}
