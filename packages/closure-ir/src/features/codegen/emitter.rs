//! Code emitter
//!
//! Serializes a `Node` tree into Kotlin constructor calls that rebuild an equal tree
//! when compiled against the runtime node library.

use super::error::EmitError;
use crate::features::expression::domain::{Literal, Node, Reference};

/// Raw-string delimiter
pub const QQQ: &str = "\"\"\"";

/// Raw strings have no escapes, so `$` and quote runs go through template expressions
pub(crate) const DOLLAR_ESCAPE: &str = "${'$'}";
pub(crate) const QUOTE_ESCAPE: &str = "${'\"'}";

/// Emit a node tree as source text
pub fn emit(node: &Node) -> Result<String, EmitError> {
    let mut out = String::new();
    emit_into(node, &mut out)?;
    Ok(out)
}

fn emit_into(node: &Node, out: &mut String) -> Result<(), EmitError> {
    match node {
        Node::Identifier(name) => {
            out.push_str(&format!("Identifier(\"{}\")", name));
        }
        Node::Value(literal) => {
            out.push_str("Value(");
            out.push_str(&emit_literal(literal));
            out.push(')');
        }
        // Bare name re-captures the live binding at the call site
        Node::Val { name, .. } => {
            out.push_str(&format!("Val(\"{}\", {})", name, name));
        }
        Node::Ref(Reference::Named(name)) => {
            out.push_str(&format!("Ref({})", name));
        }
        Node::Ref(Reference::Resolved(symbol)) => {
            return Err(EmitError::UnserializableReference {
                name: symbol.name.clone(),
            });
        }
        Node::LambdaArgument(index) => {
            out.push_str(&format!("LambdaArgument({})", index));
        }
        Node::Error(message) => {
            out.push_str(&format!("Error({})", raw_string(message)));
        }
        Node::Unknown(raw) => {
            out.push_str(&format!(
                "Unknown({},{})",
                raw_string(&raw.kind),
                raw_string(&raw.text)
            ));
        }
        Node::Unary(..)
        | Node::Binary(..)
        | Node::GetProperty(..)
        | Node::Call { .. }
        | Node::Concat(_) => {
            out.push_str(node.variant_name());
            out.push('(');
            for (i, child) in node.children().into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                emit_into(child, out)?;
            }
            out.push(')');
        }
    }
    Ok(())
}

/// Kotlin source form of a literal; numbers keep their type suffix
pub fn emit_literal(literal: &Literal) -> String {
    match literal {
        Literal::Null => "null".to_string(),
        Literal::Boolean(b) => b.to_string(),
        Literal::Int(v) => v.to_string(),
        Literal::Long(v) => format!("{}L", v),
        // Debug formatting always carries a '.' or an exponent
        Literal::Float(v) => format!("{:?}f", v),
        Literal::Double(v) => format!("{:?}", v),
        Literal::Str(s) => raw_string(s),
    }
}

/// Kotlin raw string holding exactly `text`.
///
/// A third quote in a row would close the string, and so would trailing quotes
/// running into the delimiter; those quotes are escaped along with every `$`.
fn raw_string(text: &str) -> String {
    let tail = text.trim_end_matches('"').len();
    let mut out = String::with_capacity(text.len() + 2 * QQQ.len());
    out.push_str(QQQ);
    let mut run = 0;
    for (i, c) in text.char_indices() {
        match c {
            '$' => {
                out.push_str(DOLLAR_ESCAPE);
                run = 0;
            }
            '"' if run == 2 || i >= tail => {
                out.push_str(QUOTE_ESCAPE);
                run = 0;
            }
            '"' => {
                out.push('"');
                run += 1;
            }
            _ => {
                out.push(c);
                run = 0;
            }
        }
    }
    out.push_str(QQQ);
    out
}
