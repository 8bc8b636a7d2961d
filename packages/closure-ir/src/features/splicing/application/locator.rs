//! Span locator
//!
//! Finds the closure literals to rewrite. Only leaf closures (closures containing no
//! other closure) are candidates, so located spans never nest.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::marker::{MarkerAnnotation, MarkerState};
use crate::features::parsing::{node_kinds, normalize, ParsedTree, SyntaxNode};
use crate::features::splicing::domain::ParsedSpan;
use crate::shared::models::TextRange;

/// Closure span locator
#[derive(Debug, Clone, Default)]
pub struct SpanLocator {
    marker: MarkerAnnotation,
}

impl SpanLocator {
    pub fn new(marker: MarkerAnnotation) -> Self {
        Self { marker }
    }

    /// Locate eligible closures, sorted by start offset.
    ///
    /// With `only_if_annotation_present`, closures are taken from marked-on classes,
    /// marked-on top-level functions and marked-on annotated closures; off markers on
    /// any of those subtract.
    pub fn locate(&self, tree: &ParsedTree, only_if_annotation_present: bool) -> Vec<ParsedSpan> {
        let root = &tree.root;
        let source = tree.source.as_str();

        let scopes = self.marked_scopes(root, source);

        let on: Vec<&SyntaxNode> = if only_if_annotation_present {
            scopes
                .iter()
                .filter(|(_, state)| *state == MarkerState::On)
                .flat_map(|&(scope, _)| leaf_closures(scope))
                .collect()
        } else {
            root.innermost_descendants(node_kinds::LAMBDA_LITERAL)
        };
        if on.is_empty() {
            return Vec::new();
        }

        let off: HashSet<TextRange> = scopes
            .iter()
            .filter(|(_, state)| *state == MarkerState::Off)
            .flat_map(|&(scope, _)| leaf_closures(scope))
            .map(|lambda| lambda.range)
            .collect();

        let mut seen = HashSet::new();
        let mut spans: Vec<ParsedSpan> = on
            .into_iter()
            .filter(|lambda| !off.contains(&lambda.range) && seen.insert(lambda.range))
            .filter_map(normalize)
            .map(ParsedSpan::new)
            .collect();
        spans.sort_by_key(|span| span.start);

        debug!(
            file = %tree.file_path,
            spans = spans.len(),
            excluded = off.len(),
            "Located closures"
        );
        spans
    }

    /// Declarations and closures carrying the marker, with its state.
    ///
    /// A marker on its own line ahead of a declaration wins over one in the
    /// declaration's modifiers, as it comes first.
    fn marked_scopes<'t>(
        &self,
        root: &'t SyntaxNode,
        source: &str,
    ) -> Vec<(&'t SyntaxNode, MarkerState)> {
        let mut detached = HashMap::new();
        self.collect_detached(root, source, &mut detached);

        let mut candidates = root.find_descendants(node_kinds::CLASS_DECLARATION);
        candidates.extend(root.find_children(node_kinds::FUNCTION_DECLARATION));
        candidates.extend(root.find_descendants(node_kinds::ANNOTATED_LAMBDA));

        candidates
            .into_iter()
            .filter_map(|scope| {
                detached
                    .get(&scope.range)
                    .copied()
                    .or_else(|| self.marker.state_of(scope, source))
                    .map(|state| (scope, state))
            })
            .collect()
    }

    /// Pair own-line markers with the declaration right after them
    fn collect_detached(
        &self,
        node: &SyntaxNode,
        source: &str,
        out: &mut HashMap<TextRange, MarkerState>,
    ) {
        let mut pending = None;
        for child in node.children.iter().filter(|c| !c.extra) {
            if let Some(state) = self.marker.state_of_detached(child, source) {
                pending = Some(state);
                continue;
            }
            if let Some(state) = pending.take() {
                if child.is(node_kinds::CLASS_DECLARATION)
                    || child.is(node_kinds::FUNCTION_DECLARATION)
                {
                    out.insert(child.range, state);
                }
            }
            self.collect_detached(child, source, out);
        }
    }
}

fn leaf_closures(scope: &SyntaxNode) -> Vec<&SyntaxNode> {
    scope.innermost_descendants(node_kinds::LAMBDA_LITERAL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::parsing::{KotlinParser, Parser};

    fn locate(source: &str, only_if_annotation_present: bool) -> Vec<String> {
        let tree = KotlinParser::new().parse(source, "Test.kt").unwrap();
        SpanLocator::default()
            .locate(&tree, only_if_annotation_present)
            .iter()
            .map(|span| source[span.start..span.end].to_string())
            .collect()
    }

    #[test]
    fn test_all_leaf_closures_without_annotation_filter() {
        let source = "fun f() {\n  val a = list.map { it + 1 }\n  val b = run { listOf(1).filter { it > 0 } }\n}\n";
        assert_eq!(locate(source, false), vec!["{ it + 1 }", "{ it > 0 }"]);
    }

    #[test]
    fn test_unmarked_declarations_are_skipped() {
        let source = "fun f() = list.map { it + 1 }\nclass A { val b = list.map { it } }\n";
        assert!(locate(source, true).is_empty());
    }

    #[test]
    fn test_marked_on_class_and_function() {
        let source = "@Kotlinq\nclass A { val b = list.map { it } }\n\n@Kotlinq\nfun f() = list.map { it + 1 }\n\nfun g() = list.map { it + 2 }\n";
        assert_eq!(locate(source, true), vec!["{ it }", "{ it + 1 }"]);
    }

    #[test]
    fn test_off_markers_subtract() {
        let source = "@Kotlinq\nclass A {\n  val b = list.map { it }\n  val c = list.sortedBy @Kotlinq(true) { it }\n}\n";
        assert_eq!(locate(source, true), vec!["{ it }"]);

        let source = "@Kotlinq(true)\nfun f() = list.map { it + 1 }\nfun g() = list.map { it + 2 }\n";
        assert_eq!(locate(source, false), vec!["{ it + 2 }"]);
    }

    #[test]
    fn test_own_line_off_marker_excludes_class() {
        let source = "@Kotlinq(true)\nclass A {\n  val b = list.map { it }\n}\nval c = list.map { it + 1 }\n";
        assert_eq!(locate(source, false), vec!["{ it + 1 }"]);
    }

    #[test]
    fn test_own_line_on_marker_selects_class() {
        let source = "@Kotlinq(false)\nclass A {\n  val b = list.map { it }\n}\nclass B { val c = list.map { it + 1 } }\n";
        assert_eq!(locate(source, true), vec!["{ it }"]);
    }

    #[test]
    fn test_own_line_off_marker_on_first_of_two_functions() {
        let source = "@Kotlinq(true)\nfun f() = list.map { it + 1 }\n\nfun g() = list.map { it + 2 }\n";
        assert_eq!(locate(source, false), vec!["{ it + 2 }"]);
        assert!(locate(source, true).is_empty());
    }

    #[test]
    fn test_individually_marked_closure() {
        let source = "fun f() = list.filter @Kotlinq { it > 0 }.map { it }\n";
        assert_eq!(locate(source, true), vec!["{ it > 0 }"]);
    }
}
