//! Literal token decoding
//!
//! Maps literal-constant tokens to typed values with Kotlin's suffix rules.

use crate::features::expression::domain::Literal;
use crate::features::expression::error::CompileError;
use crate::features::parsing::node_kinds;

/// Lexical literal kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Integer,
    Long,
    /// Always single precision
    Float,
    /// Single precision with an `f` suffix, double otherwise
    Real,
    Double,
    Boolean,
    Null,
    String,
}

impl LiteralKind {
    /// Literal kind of a tree-sitter production, if it is one
    pub fn from_node_kind(kind: &str) -> Option<Self> {
        match kind {
            node_kinds::INTEGER_LITERAL => Some(LiteralKind::Integer),
            node_kinds::LONG_LITERAL => Some(LiteralKind::Long),
            node_kinds::REAL_LITERAL => Some(LiteralKind::Real),
            node_kinds::BOOLEAN_LITERAL => Some(LiteralKind::Boolean),
            node_kinds::NULL_LITERAL => Some(LiteralKind::Null),
            node_kinds::STRING_LITERAL => Some(LiteralKind::String),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LiteralKind::Integer => "integer",
            LiteralKind::Long => "long",
            LiteralKind::Float => "float",
            LiteralKind::Real => "real",
            LiteralKind::Double => "double",
            LiteralKind::Boolean => "boolean",
            LiteralKind::Null => "null",
            LiteralKind::String => "string",
        }
    }
}

/// Decode a literal token.
///
/// `Ok(None)` means "not a plain literal" and lets the caller fall through to richer
/// handling (hex/binary numbers, raw or templated strings).
pub fn decode_literal(kind: LiteralKind, text: &str) -> Result<Option<Literal>, CompileError> {
    let text = text.trim();
    let malformed = |reason: String| CompileError::malformed(kind.as_str(), text, reason);

    let literal = match kind {
        LiteralKind::Integer => {
            if is_radix_prefixed(text) {
                return Ok(None);
            }
            Literal::Int(digits(text).parse::<i32>().map_err(|e| malformed(e.to_string()))?)
        }
        LiteralKind::Long => {
            let body = text.trim_end_matches(['L', 'l']);
            if is_radix_prefixed(body) {
                return Ok(None);
            }
            Literal::Long(digits(body).parse::<i64>().map_err(|e| malformed(e.to_string()))?)
        }
        LiteralKind::Float => {
            let body = text.trim_end_matches(['f', 'F']);
            Literal::Float(digits(body).parse::<f32>().map_err(|e| malformed(e.to_string()))?)
        }
        LiteralKind::Real => {
            if text.ends_with(['f', 'F']) {
                let body = &text[..text.len() - 1];
                Literal::Float(digits(body).parse::<f32>().map_err(|e| malformed(e.to_string()))?)
            } else {
                Literal::Double(digits(text).parse::<f64>().map_err(|e| malformed(e.to_string()))?)
            }
        }
        LiteralKind::Double => {
            Literal::Double(digits(text).parse::<f64>().map_err(|e| malformed(e.to_string()))?)
        }
        LiteralKind::Boolean => match text {
            "true" => Literal::Boolean(true),
            "false" => Literal::Boolean(false),
            other => return Err(malformed(format!("'{}' is not a boolean", other))),
        },
        LiteralKind::Null => Literal::Null,
        LiteralKind::String => {
            if text.starts_with("\"\"\"") || text.len() < 2 {
                return Ok(None);
            }
            let body = &text[1..text.len() - 1];
            if has_template(body) {
                return Ok(None);
            }
            Literal::Str(unescape(body)?)
        }
    };
    match literal {
        Literal::Float(v) if !v.is_finite() => Err(malformed("out of range".to_string())),
        Literal::Double(v) if !v.is_finite() => Err(malformed("out of range".to_string())),
        literal => Ok(Some(literal)),
    }
}

/// Resolve Kotlin escape sequences in a line-string segment
pub fn unescape(raw: &str) -> Result<String, CompileError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let escaped = chars
            .next()
            .ok_or_else(|| CompileError::malformed("string", raw, "dangling escape"))?;
        match escaped {
            't' => out.push('\t'),
            'b' => out.push('\u{8}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            '\'' | '"' | '\\' | '$' => out.push(escaped),
            'u' => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .and_then(char::from_u32)
                    .ok_or_else(|| {
                        CompileError::malformed("string", raw, format!("bad unicode escape \\u{}", hex))
                    })?;
                out.push(decoded);
            }
            other => {
                return Err(CompileError::malformed(
                    "string",
                    raw,
                    format!("unknown escape \\{}", other),
                ))
            }
        }
    }
    Ok(out)
}

/// Unescaped `$name` or `${` inside a line-string body
fn has_template(body: &str) -> bool {
    let bytes = body.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'$' => {
                if let Some(&next) = bytes.get(i + 1) {
                    if next == b'{' || next == b'_' || next.is_ascii_alphabetic() {
                        return true;
                    }
                }
                i += 1;
            }
            _ => i += 1,
        }
    }
    false
}

fn is_radix_prefixed(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    lower.starts_with("0x") || lower.starts_with("0b")
}

/// Drop `_` digit separators
fn digits(text: &str) -> String {
    text.chars().filter(|c| *c != '_').collect()
}
