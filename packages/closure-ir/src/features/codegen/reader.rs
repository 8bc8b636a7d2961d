//! Node reader
//!
//! Reads emitted code back into a `Node` tree. This is the inverse of `emit` and is how
//! round-trips are checked without a Kotlin toolchain: `Val` bindings can be re-captured
//! from a value table and `Ref` names resolved through a host `SymbolResolver`.

use std::collections::HashMap;

use super::emitter::{DOLLAR_ESCAPE, QQQ, QUOTE_ESCAPE};
use super::error::ReadError;
use crate::features::expression::domain::{
    BinaryOp, Literal, Node, RawSyntax, Reference, UnaryOp,
};
use crate::features::expression::ports::SymbolResolver;

type ReadResult<T> = std::result::Result<T, ReadError>;

/// Reader for emitted node code
#[derive(Default)]
pub struct NodeReader<'r> {
    bindings: HashMap<String, Literal>,
    resolver: Option<&'r dyn SymbolResolver>,
}

impl<'r> NodeReader<'r> {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            resolver: None,
        }
    }

    /// Live values captured by `Val("name", name)`
    pub fn with_bindings(mut self, bindings: HashMap<String, Literal>) -> Self {
        self.bindings = bindings;
        self
    }

    pub fn with_resolver(mut self, resolver: &'r dyn SymbolResolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn read(&self, code: &str) -> ReadResult<Node> {
        let mut cursor = Cursor::new(code);
        let node = self.read_node(&mut cursor)?;
        cursor.skip_ws();
        if !cursor.at_end() {
            return Err(ReadError::TrailingInput(cursor.pos));
        }
        Ok(node)
    }

    fn read_node(&self, cursor: &mut Cursor<'_>) -> ReadResult<Node> {
        cursor.skip_ws();
        let variant = cursor.ident()?;
        cursor.expect("(")?;

        let node = match variant {
            "Identifier" => Node::Identifier(cursor.quoted()?.to_string()),
            "Value" => Node::Value(cursor.literal()?),
            "Val" => {
                let name = cursor.quoted()?.to_string();
                cursor.expect(",")?;
                let binding = cursor.ident()?;
                if binding != name {
                    return Err(cursor.unexpected(&format!("binding '{}'", name), binding));
                }
                Node::Val {
                    value: self.bindings.get(&name).cloned(),
                    name,
                }
            }
            "Ref" => {
                let name = cursor.until(')')?.trim();
                Node::Ref(self.reference(name))
            }
            "LambdaArgument" => {
                let digits = cursor.take_while(|c| c.is_ascii_digit());
                let index = digits
                    .parse::<usize>()
                    .map_err(|_| ReadError::InvalidNumber(digits.to_string()))?;
                Node::LambdaArgument(index)
            }
            "Error" => Node::Error(cursor.raw_string()?),
            "Unknown" => {
                let kind = cursor.raw_string()?;
                cursor.expect(",")?;
                let text = cursor.raw_string()?;
                Node::Unknown(RawSyntax { kind, text })
            }
            other => {
                let children = self.read_children(cursor)?;
                return build_composite(other, children);
            }
        };
        cursor.expect(")")?;
        Ok(node)
    }

    /// Comma-separated children up to and including the closing parenthesis
    fn read_children(&self, cursor: &mut Cursor<'_>) -> ReadResult<Vec<Node>> {
        let mut children = Vec::new();
        cursor.skip_ws();
        if cursor.eat(")") {
            return Ok(children);
        }
        loop {
            children.push(self.read_node(cursor)?);
            cursor.skip_ws();
            if cursor.eat(")") {
                return Ok(children);
            }
            cursor.expect(",")?;
        }
    }

    fn reference(&self, name: &str) -> Reference {
        self.resolver
            .and_then(|r| r.resolve(name))
            .map(Reference::Resolved)
            .unwrap_or_else(|| Reference::Named(name.to_string()))
    }
}

fn build_composite(variant: &str, mut children: Vec<Node>) -> ReadResult<Node> {
    let arity = |expected: &str, found: usize| ReadError::Arity {
        variant: variant.to_string(),
        expected: expected.to_string(),
        found,
    };

    if let Some(op) = UnaryOp::from_name(variant) {
        let found = children.len();
        return match children.pop() {
            Some(child) if found == 1 => Ok(Node::unary(op, child)),
            _ => Err(arity("1", found)),
        };
    }

    let pair = |children: Vec<Node>| -> ReadResult<(Node, Node)> {
        let found = children.len();
        let mut it = children.into_iter();
        match (it.next(), it.next(), it.next()) {
            (Some(left), Some(right), None) => Ok((left, right)),
            _ => Err(arity("2", found)),
        }
    };

    if let Some(op) = BinaryOp::from_name(variant) {
        let (left, right) = pair(children)?;
        return Ok(Node::binary(op, left, right));
    }

    match variant {
        "GetProperty" => {
            let (object, property) = pair(children)?;
            Ok(Node::get_property(object, property))
        }
        "Call" => {
            if children.is_empty() {
                return Err(arity("at least 1", 0));
            }
            let callee = children.remove(0);
            Ok(Node::call(callee, children))
        }
        "Concat" => Ok(Node::Concat(children)),
        other => Err(ReadError::UnknownVariant(other.to_string())),
    }
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn skip_ws(&mut self) {
        self.take_while(char::is_whitespace);
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token: &str) -> ReadResult<()> {
        self.skip_ws();
        if self.eat(token) {
            return Ok(());
        }
        Err(self.unexpected(&format!("'{}'", token), self.peek_word()))
    }

    fn ident(&mut self) -> ReadResult<&'a str> {
        self.skip_ws();
        let word = self.take_while(|c| c.is_alphanumeric() || c == '_');
        if word.is_empty() {
            return Err(self.unexpected("identifier", self.peek_word()));
        }
        Ok(word)
    }

    /// `"..."` without escapes
    fn quoted(&mut self) -> ReadResult<&'a str> {
        self.expect("\"")?;
        let content = self.until('"')?;
        self.pos += 1;
        Ok(content)
    }

    /// Content up to (not including) `end`
    fn until(&mut self, end: char) -> ReadResult<&'a str> {
        let rest = self.rest();
        match rest.find(end) {
            Some(len) => {
                self.pos += len;
                Ok(&rest[..len])
            }
            None => Err(self.end(&format!("'{}'", end))),
        }
    }

    /// Raw string; a run of more than three closing quotes keeps the extras as content
    fn raw_string(&mut self) -> ReadResult<String> {
        self.expect(QQQ)?;
        let rest = self.rest();
        let close = rest.find(QQQ).ok_or_else(|| self.end("closing raw string"))?;
        let run = rest[close..].chars().take_while(|c| *c == '"').count();
        let content_len = close + run - QQQ.len();
        self.pos += close + run;
        Ok(unescape_raw(&rest[..content_len]))
    }

    fn literal(&mut self) -> ReadResult<Literal> {
        self.skip_ws();
        if self.eat("null") {
            return Ok(Literal::Null);
        }
        if self.eat("true") {
            return Ok(Literal::Boolean(true));
        }
        if self.eat("false") {
            return Ok(Literal::Boolean(false));
        }
        if self.rest().starts_with(QQQ) {
            return Ok(Literal::Str(self.raw_string()?));
        }
        self.number()
    }

    fn number(&mut self) -> ReadResult<Literal> {
        let rest = self.rest();
        let mut len = 0;
        let mut prev = ' ';
        for c in rest.chars() {
            let sign_in_exponent = (c == '-' || c == '+') && (prev == 'e' || prev == 'E' || len == 0);
            if c.is_ascii_digit() || c == '.' || c == 'e' || c == 'E' || sign_in_exponent {
                len += c.len_utf8();
                prev = c;
            } else {
                break;
            }
        }
        let body = &rest[..len];
        if body.is_empty() {
            return Err(self.unexpected("literal", self.peek_word()));
        }
        self.pos += len;

        let invalid = || ReadError::InvalidNumber(body.to_string());
        if self.eat("L") {
            return body.parse::<i64>().map(Literal::Long).map_err(|_| invalid());
        }
        if self.eat("f") {
            return body.parse::<f32>().map(Literal::Float).map_err(|_| invalid());
        }
        if body.contains(['.', 'e', 'E']) {
            return body.parse::<f64>().map(Literal::Double).map_err(|_| invalid());
        }
        body.parse::<i32>().map(Literal::Int).map_err(|_| invalid())
    }

    fn peek_word(&self) -> &'a str {
        let rest = self.rest();
        let len = rest
            .char_indices()
            .nth(12)
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        &rest[..len]
    }

    fn unexpected(&self, expected: &str, found: &str) -> ReadError {
        if self.at_end() && found.is_empty() {
            return self.end(expected);
        }
        ReadError::Unexpected {
            pos: self.pos,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    fn end(&self, expected: &str) -> ReadError {
        ReadError::UnexpectedEnd {
            pos: self.pos,
            expected: expected.to_string(),
        }
    }
}

/// Undo the `${'$'}` / `${'"'}` escapes the emitter puts into raw strings
fn unescape_raw(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(at) = rest.find("${'") {
        out.push_str(&rest[..at]);
        let tail = &rest[at..];
        if let Some(after) = tail.strip_prefix(DOLLAR_ESCAPE) {
            out.push('$');
            rest = after;
        } else if let Some(after) = tail.strip_prefix(QUOTE_ESCAPE) {
            out.push('"');
            rest = after;
        } else {
            out.push('$');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::codegen::emit;
    use crate::features::expression::domain::ResolvedSymbol;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn round_trip(node: Node) {
        let code = emit(&node).unwrap();
        assert_eq!(NodeReader::new().read(&code).unwrap(), node, "code: {}", code);
    }

    #[test]
    fn test_round_trip_every_variant() {
        round_trip(Node::identifier("listOf"));
        round_trip(Node::val("a"));
        round_trip(Node::reference("a.b::c"));
        round_trip(Node::LambdaArgument(3));
        round_trip(Node::error("Too complex lambda"));
        round_trip(Node::unknown("if_expression", "if (a) \"b\" else c"));
        round_trip(Node::unary(UnaryOp::UnaryMinus, Node::IT));
        round_trip(Node::call(Node::reference("::println"), vec![]));
        round_trip(Node::Concat(vec![
            Node::value(Literal::str("3 * ")),
            Node::IT,
            Node::value(Literal::str("say \"hi\"")),
        ]));
        for op in BinaryOp::ALL {
            round_trip(Node::binary(op, Node::IT, Node::val("b")));
        }
    }

    #[test]
    fn test_round_trip_literals() {
        for literal in [
            Literal::Null,
            Literal::Boolean(false),
            Literal::Int(42),
            Literal::Long(90000000),
            Literal::Float(44.4),
            Literal::Double(5.5),
            Literal::Double(5.0),
            Literal::Double(1e300),
            Literal::str(""),
            Literal::str("multi\nline"),
        ] {
            round_trip(Node::value(literal));
        }
    }

    #[test]
    fn test_round_trip_escaped_strings() {
        for text in [
            "cost ${x}",
            "$",
            r#"a"""b"#,
            r#"say "hi""#,
            "\"",
            "\"\"",
            r#""""raw""""#,
            "${'$'} stays literal",
        ] {
            round_trip(Node::value(Literal::str(text)));
            round_trip(Node::unknown("string_literal", text));
            round_trip(Node::error(text));
        }
    }

    #[test]
    fn test_bindings_recapture_values() {
        let mut bindings = HashMap::new();
        bindings.insert("zadavali".to_string(), Literal::Boolean(true));
        let reader = NodeReader::new().with_bindings(bindings);

        let node = reader
            .read(r#"And(LambdaArgument(0),Val("zadavali", zadavali))"#)
            .unwrap();
        assert_eq!(
            node,
            Node::binary(
                BinaryOp::And,
                Node::IT,
                Node::Val {
                    name: "zadavali".to_string(),
                    value: Some(Literal::Boolean(true)),
                },
            )
        );
    }

    struct MathResolver;

    impl SymbolResolver for MathResolver {
        fn resolve(&self, qualified_name: &str) -> Option<ResolvedSymbol> {
            (qualified_name == "::sin").then(|| ResolvedSymbol {
                name: qualified_name.to_string(),
                handle: Arc::new(f64::sin as fn(f64) -> f64),
            })
        }
    }

    #[test]
    fn test_resolver_resolves_refs() {
        let reader = NodeReader::new().with_resolver(&MathResolver);
        let node = reader.read("Call(Ref(::sin),LambdaArgument(0))").unwrap();
        match node {
            Node::Call { callee, .. } => match *callee {
                Node::Ref(Reference::Resolved(symbol)) => {
                    let f = symbol.handle.downcast_ref::<fn(f64) -> f64>().unwrap();
                    assert_eq!(f(0.0), 0.0);
                }
                other => panic!("expected resolved ref, got {:?}", other),
            },
            other => panic!("expected call, got {:?}", other),
        }

        let unresolved = reader.read("Ref(::cos)").unwrap();
        assert!(matches!(unresolved, Node::Ref(Reference::Named(ref n)) if n == "::cos"));
    }

    #[test]
    fn test_read_errors() {
        let reader = NodeReader::new();
        assert_eq!(
            reader.read("Frobnicate(LambdaArgument(0))"),
            Err(ReadError::UnknownVariant("Frobnicate".to_string()))
        );
        assert!(matches!(
            reader.read("Plus(LambdaArgument(0))"),
            Err(ReadError::Arity { .. })
        ));
        assert!(matches!(
            reader.read("LambdaArgument(0"),
            Err(ReadError::UnexpectedEnd { .. })
        ));
        assert_eq!(
            reader.read("LambdaArgument(0) x"),
            Err(ReadError::TrailingInput(18))
        );
    }
}
