//! Marker annotation recognition
//!
//! Mirrors the runtime declaration `annotation class Kotlinq(val off: Boolean = false)`:
//! `@Kotlinq` switches processing on, `@Kotlinq(true)` switches it off.

use crate::features::expression::{decode_literal, Literal, LiteralKind};
use crate::features::parsing::{node_kinds, SyntaxNode};

pub const DEFAULT_MARKER: &str = "Kotlinq";

/// Marker switch carried by an annotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerState {
    On,
    Off,
}

/// Recognizer for the processing marker annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerAnnotation {
    name: String,
}

impl Default for MarkerAnnotation {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}

impl MarkerAnnotation {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Marker state of a class/function declaration or annotated closure.
    ///
    /// Looks at annotations in the node's `modifiers` and at direct `annotation`
    /// children; the first marker found decides.
    pub fn state_of(&self, node: &SyntaxNode, source: &str) -> Option<MarkerState> {
        let in_modifiers = node
            .find_children(node_kinds::MODIFIERS)
            .into_iter()
            .flat_map(|m| m.find_children(node_kinds::ANNOTATION));
        let direct = node.find_children(node_kinds::ANNOTATION).into_iter();

        in_modifiers
            .chain(direct)
            .find_map(|annotation| self.state_of_annotation(annotation, source))
    }

    /// `None` when the annotation is not the marker
    pub fn state_of_annotation(&self, annotation: &SyntaxNode, source: &str) -> Option<MarkerState> {
        if annotation_name(annotation, source)? != self.name {
            return None;
        }
        let argument = annotation
            .find_descendant(node_kinds::VALUE_ARGUMENTS)
            .and_then(|arguments| arguments.named_children().find(|c| !c.extra))
            .and_then(|argument| value_literal(argument, source));
        Some(state_for(argument))
    }

    /// Marker written on its own line ahead of a declaration.
    ///
    /// `@Kotlinq(true)` followed by a line break parses as a prefix expression
    /// (the annotation applied to `(true)`) sitting next to the declaration rather
    /// than inside its modifiers. `None` unless `node` is such a marker.
    pub fn state_of_detached(&self, node: &SyntaxNode, source: &str) -> Option<MarkerState> {
        if !node.is(node_kinds::PREFIX_EXPRESSION) {
            return None;
        }
        let mut parts = node.named_children().filter(|c| !c.extra);
        let annotation = parts.next().filter(|c| c.is(node_kinds::ANNOTATION))?;
        if annotation.find_descendant(node_kinds::VALUE_ARGUMENTS).is_some() {
            return self.state_of_annotation(annotation, source);
        }
        if annotation_name(annotation, source)? != self.name {
            return None;
        }
        let argument = parts
            .next()
            .filter(|c| c.is(node_kinds::PARENTHESIZED_EXPRESSION))
            .and_then(|parens| value_literal(parens, source));
        Some(state_for(argument))
    }
}

/// Simple name of an annotation type: last identifier of `@a.b.Name`
fn annotation_name<'s>(annotation: &SyntaxNode, source: &'s str) -> Option<&'s str> {
    let user_type = annotation.find_descendant(node_kinds::USER_TYPE)?;
    user_type
        .find_descendants(node_kinds::TYPE_IDENTIFIER)
        .last()
        .map(|ident| ident.text_in(source))
}

fn state_for(argument: Option<Literal>) -> MarkerState {
    match argument.as_ref().and_then(Literal::as_bool) {
        Some(true) => MarkerState::Off,
        _ => MarkerState::On,
    }
}

/// Literal constant held by an argument or a parenthesized expression
fn value_literal(holder: &SyntaxNode, source: &str) -> Option<Literal> {
    // `off = true` keeps the value as the last child
    let value = holder
        .children
        .iter()
        .rev()
        .find(|c| !c.extra && (c.named || c.is(node_kinds::NULL_LITERAL)))?;
    let kind = LiteralKind::from_node_kind(&value.kind)?;
    decode_literal(kind, value.text_in(source)).ok().flatten()
}
