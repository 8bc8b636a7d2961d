//! Expression compiler
//!
//! Recursive translation from normalized Kotlin syntax to `Node` trees.
//!
//! ## Resolution order
//! Bare names resolve as closure parameter, then explicit classification, then the
//! scope default (captured binding or qualified reference), then plain identifier.
//! Call targets use the constructor heuristics first and never consult parameters.
//!
//! Operator chains are folded left over `[operand, op, operand, ...]`; member chains
//! recurse on the object and narrow the `Context` for the property side.

use tracing::{debug, warn};

use super::literal::{decode_literal, unescape, LiteralKind};
use crate::features::expression::domain::{
    BinaryOp, CompilerOptions, Context, Literal, Node, QualifiedName, SymbolType, UnaryOp,
};
use crate::features::expression::error::CompileError;
use crate::features::parsing::infrastructure::tree_sitter::languages::kotlin;
use crate::features::parsing::{node_kinds, normalize, SyntaxNode};

pub const EMPTY_LAMBDA: &str = "Lambda is empty";
pub const TOO_COMPLEX_LAMBDA: &str = "Too complex lambda";

/// Implicit parameter name when a closure declares none
pub const IMPLICIT_PARAMETER: &str = "it";

type CompileResult = std::result::Result<Node, CompileError>;

/// Closure-to-tree compiler
#[derive(Debug, Clone, Copy)]
pub struct ExpressionCompiler<'a> {
    options: &'a CompilerOptions,
}

impl<'a> ExpressionCompiler<'a> {
    pub fn new(options: &'a CompilerOptions) -> Self {
        Self { options }
    }

    /// Compile a closure literal. Never fails: rejections and internal errors come back
    /// as `Node::Error`, unsupported syntax as `Node::Unknown`.
    pub fn compile(&self, closure: &SyntaxNode, source: &str) -> Node {
        let Some(lambda) = normalize(closure) else {
            return Node::error(EMPTY_LAMBDA);
        };

        let statements: Vec<&SyntaxNode> = lambda
            .find_child(node_kinds::STATEMENTS)
            .map(|s| s.children.iter().filter(|c| c.kind != ";").collect())
            .unwrap_or_default();

        let statement = match statements.as_slice() {
            [] => {
                warn!(text = lambda.text_in(source), "Rejected empty closure");
                return Node::error(EMPTY_LAMBDA);
            }
            [single] => *single,
            _ => {
                warn!(
                    statements = statements.len(),
                    text = lambda.text_in(source),
                    "Rejected multi-statement closure"
                );
                return Node::error(TOO_COMPLEX_LAMBDA);
            }
        };

        let mut names = lambda_parameter_names(&lambda, source);
        if names.is_empty() {
            names.push(IMPLICIT_PARAMETER.to_string());
        }
        let ctx = Context::root(&names, self.options);

        match self.compile_node(statement, ctx, source) {
            Ok(node) => node,
            Err(e) => {
                warn!(error = %e, text = lambda.text_in(source), "Closure compilation failed");
                Node::error(e.to_string())
            }
        }
    }

    fn compile_node(&self, node: &SyntaxNode, ctx: Context<'_>, source: &str) -> CompileResult {
        let kind = node.kind.as_str();
        match kind {
            node_kinds::STRING_LITERAL => self.compile_string(node, ctx, source),
            _ if kind_is_literal(kind) => self.compile_literal(node, source),
            _ if kotlin::is_binary_expression(kind) => self.fold_binary(node, ctx, source),
            node_kinds::CALL_EXPRESSION => self.compile_call(node, ctx, source),
            node_kinds::NAVIGATION_EXPRESSION => self.compile_navigation(node, ctx, source),
            node_kinds::INFIX_EXPRESSION => self.compile_infix(node, ctx, source),
            node_kinds::CHECK_EXPRESSION => self.compile_check(node, ctx, source),
            node_kinds::PREFIX_EXPRESSION => self.compile_prefix(node, ctx, source),
            node_kinds::PARENTHESIZED_EXPRESSION | node_kinds::VALUE_ARGUMENT => {
                match node.children.iter().rev().find(|c| c.named || is_null(c)) {
                    Some(inner) => self.compile_node(inner, ctx, source),
                    None => Err(CompileError::missing(kind, "expression")),
                }
            }
            node_kinds::INTERPOLATED_EXPRESSION => self.compile_by_shape(node, ctx, source),
            node_kinds::SIMPLE_IDENTIFIER => Ok(resolve_identifier(node.text_in(source), ctx)),
            _ => Ok(self.unknown(node, source)),
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Literals
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    fn compile_literal(&self, node: &SyntaxNode, source: &str) -> CompileResult {
        let decoded = match LiteralKind::from_node_kind(&node.kind) {
            Some(kind) => decode_literal(kind, node.text_in(source))?,
            None => None,
        };
        Ok(match decoded {
            Some(literal) => Node::value(literal),
            None => self.unknown(node, source),
        })
    }

    /// Plain strings decode to `Value`; templates split into `Concat` parts
    fn compile_string(&self, node: &SyntaxNode, ctx: Context<'_>, source: &str) -> CompileResult {
        let text = node.text_in(source);
        if text.starts_with("\"\"\"") {
            return Ok(self.unknown(node, source));
        }

        let pieces: Vec<&SyntaxNode> = node
            .children
            .iter()
            .filter(|c| {
                c.is(node_kinds::INTERPOLATED_IDENTIFIER) || c.is(node_kinds::INTERPOLATED_EXPRESSION)
            })
            .collect();
        if pieces.is_empty() {
            return self.compile_literal(node, source);
        }

        let body_end = node.range.end.saturating_sub(1);
        let mut cursor = node.range.start + 1;
        let mut parts = Vec::with_capacity(pieces.len() * 2 + 1);

        for piece in pieces {
            let (delim_start, delim_end) = if piece.is(node_kinds::INTERPOLATED_IDENTIFIER) {
                (piece.range.start.saturating_sub(1), piece.range.end)
            } else {
                let before = source.get(cursor..piece.range.start).unwrap_or("");
                let open = before
                    .rfind("${")
                    .map(|i| cursor + i)
                    .ok_or_else(|| CompileError::missing(&node.kind, "'${'"))?;
                let after = source.get(piece.range.end..body_end).unwrap_or("");
                let close = after
                    .find('}')
                    .map(|i| piece.range.end + i + 1)
                    .ok_or_else(|| CompileError::missing(&node.kind, "'}'"))?;
                (open, close)
            };

            push_text(&mut parts, source.get(cursor..delim_start).unwrap_or(""))?;

            if piece.is(node_kinds::INTERPOLATED_IDENTIFIER) {
                let name = piece.text_in(source);
                parts.push(match ctx.lambda_argument(name) {
                    Some(index) => Node::LambdaArgument(index),
                    None => Node::value(Literal::str(format!("${}", name))),
                });
            } else {
                let expression = normalize(piece)
                    .ok_or_else(|| CompileError::missing(&node.kind, "template expression"))?;
                parts.push(self.compile_node(&expression, ctx, source)?);
            }
            cursor = delim_end;
        }
        push_text(&mut parts, source.get(cursor..body_end).unwrap_or(""))?;

        Ok(Node::Concat(parts))
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Operators
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// Left fold over `[operand, op, operand, op, operand...]`
    fn fold_binary(&self, node: &SyntaxNode, ctx: Context<'_>, source: &str) -> CompileResult {
        let mut items = node.children.iter();
        let first = items
            .next()
            .ok_or_else(|| CompileError::missing(&node.kind, "left operand"))?;
        let mut acc = self.compile_node(first, ctx, source)?;

        while let Some(op) = items.next() {
            let Some(op) = BinaryOp::from_token(&op.kind).filter(|_| !op.named) else {
                return Ok(self.unknown(node, source));
            };
            let right = items
                .next()
                .ok_or_else(|| CompileError::missing(&node.kind, "right operand"))?;
            acc = Node::binary(op, acc, self.compile_node(right, ctx, source)?);
        }
        Ok(acc)
    }

    fn compile_prefix(&self, node: &SyntaxNode, ctx: Context<'_>, source: &str) -> CompileResult {
        match node.children.as_slice() {
            [op, operand] if !op.named => match UnaryOp::from_token(&op.kind) {
                Some(op) => Ok(Node::unary(op, self.compile_node(operand, ctx, source)?)),
                None => Ok(self.unknown(node, source)),
            },
            _ => Ok(self.unknown(node, source)),
        }
    }

    /// `x op y` becomes a call of `op`
    fn compile_infix(&self, node: &SyntaxNode, ctx: Context<'_>, source: &str) -> CompileResult {
        let named: Vec<&SyntaxNode> = node.named_children().collect();
        match named.as_slice() {
            [left, op, right] if op.is(node_kinds::SIMPLE_IDENTIFIER) => Ok(Node::call(
                Node::identifier(op.text_in(source)),
                vec![
                    self.compile_node(left, ctx, source)?,
                    self.compile_node(right, ctx, source)?,
                ],
            )),
            _ => Ok(self.unknown(node, source)),
        }
    }

    /// `x in y` / `x !in y`; type checks stay unknown
    fn compile_check(&self, node: &SyntaxNode, ctx: Context<'_>, source: &str) -> CompileResult {
        let op = node
            .children
            .iter()
            .find(|c| !c.named && (c.kind == "in" || c.kind == "!in"));
        match (op, node.children.first(), node.children.last()) {
            (Some(op), Some(left), Some(right)) if node.children.len() == 3 => Ok(Node::call(
                Node::identifier(op.kind.as_str()),
                vec![
                    self.compile_node(left, ctx, source)?,
                    self.compile_node(right, ctx, source)?,
                ],
            )),
            _ => Ok(self.unknown(node, source)),
        }
    }

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Calls and member access
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    fn compile_call(&self, node: &SyntaxNode, ctx: Context<'_>, source: &str) -> CompileResult {
        let (callee, suffix) = match node.children.as_slice() {
            [callee, suffix] => (callee, suffix),
            _ => return Ok(self.unknown(node, source)),
        };

        let callee = if callee.is(node_kinds::SIMPLE_IDENTIFIER) {
            resolve_call_target(callee.text_in(source), ctx)
        } else {
            self.compile_node(callee, ctx, source)?
        };

        let args = call_arguments(suffix)
            .into_iter()
            .map(|arg| self.compile_node(arg, ctx, source))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Node::call(callee, args))
    }

    fn compile_navigation(&self, node: &SyntaxNode, ctx: Context<'_>, source: &str) -> CompileResult {
        let (object, suffix) = match node.children.as_slice() {
            [object, suffix] if suffix.is(node_kinds::NAVIGATION_SUFFIX) => (object, suffix),
            _ => return Ok(self.unknown(node, source)),
        };
        let member_access = suffix
            .children
            .first()
            .map_or(false, |op| op.kind == "." || op.kind == "?.");
        let property = match suffix.find_child(node_kinds::SIMPLE_IDENTIFIER) {
            Some(property) if member_access => property,
            _ => return Ok(self.unknown(node, source)),
        };

        let object = self.compile_node(object, ctx, source)?;
        let qualification = object
            .qualified_name()
            .map(|name| QualifiedName::new(&name).path());
        let property_ctx = ctx.property_scope(qualification.as_deref());
        let property = resolve_identifier(property.text_in(source), property_ctx);

        Ok(Node::get_property(object, property))
    }

    /// Interpolated expressions whose production tag was replaced by the alias
    fn compile_by_shape(&self, node: &SyntaxNode, ctx: Context<'_>, source: &str) -> CompileResult {
        match node.children.as_slice() {
            [_, suffix] if suffix.is(node_kinds::NAVIGATION_SUFFIX) => {
                self.compile_navigation(node, ctx, source)
            }
            [_, suffix]
                if suffix.is(node_kinds::VALUE_ARGUMENTS) || suffix.is(node_kinds::CALL_SUFFIX) =>
            {
                self.compile_call(node, ctx, source)
            }
            [_, op, _, ..] if !op.named && BinaryOp::from_token(&op.kind).is_some() => {
                self.fold_binary(node, ctx, source)
            }
            _ => Ok(self.unknown(node, source)),
        }
    }

    fn unknown(&self, node: &SyntaxNode, source: &str) -> Node {
        let text = node.text_in(source);
        debug!(kind = %node.kind, text, "No translation rule");
        Node::unknown(node.kind.as_str(), text)
    }
}

/// Declared closure parameter names, in declaration order
pub fn lambda_parameter_names(lambda: &SyntaxNode, source: &str) -> Vec<String> {
    let Some(parameters) = lambda.find_child(node_kinds::LAMBDA_PARAMETERS) else {
        return Vec::new();
    };
    parameters
        .named_children()
        .map(|param| {
            let name_node = if param.is(node_kinds::VARIABLE_DECLARATION) {
                param.find_child(node_kinds::SIMPLE_IDENTIFIER).unwrap_or(param)
            } else {
                param
            };
            name_node.text_in(source).to_string()
        })
        .collect()
}

/// Bare name outside a call
fn resolve_identifier(name: &str, ctx: Context<'_>) -> Node {
    if let Some(index) = ctx.lambda_argument(name) {
        return Node::LambdaArgument(index);
    }
    if ctx.symbol_type(name) == Some(SymbolType::Identifier) {
        return Node::identifier(name);
    }
    if ctx.locals_as_vals {
        return Node::val(name);
    }
    match ctx.qualification {
        Some(q) => Node::reference(format!("{}::{}", q, name)),
        None => Node::identifier(name),
    }
}

/// Bare name in call position
fn resolve_call_target(name: &str, ctx: Context<'_>) -> Node {
    let upper = name.chars().next().map_or(false, char::is_uppercase);
    let symbol_type = ctx.symbol_type(name);

    if (ctx.options.upper_case_is_class_name && upper)
        || symbol_type == Some(SymbolType::Constructor)
    {
        return Node::reference(format!("{}::class", name));
    }
    if symbol_type == Some(SymbolType::Identifier) {
        return Node::identifier(name);
    }
    if ctx.locals_as_vals {
        return Node::reference(format!("::{}", name));
    }
    match ctx.qualification {
        Some(q) => Node::reference(format!("{}::{}", q, name)),
        None => Node::identifier(name),
    }
}

/// Argument nodes of a (normalized) call suffix
fn call_arguments(suffix: &SyntaxNode) -> Vec<&SyntaxNode> {
    match suffix.kind.as_str() {
        node_kinds::VALUE_ARGUMENTS => suffix.named_children().collect(),
        node_kinds::CALL_SUFFIX => suffix
            .named_children()
            .flat_map(|part| match part.kind.as_str() {
                node_kinds::VALUE_ARGUMENTS => part.named_children().collect(),
                node_kinds::TYPE_ARGUMENTS => Vec::new(),
                _ => vec![part],
            })
            .collect(),
        // Trailing closure only: `f { ... }`
        _ => vec![suffix],
    }
}

fn push_text(parts: &mut Vec<Node>, raw: &str) -> Result<(), CompileError> {
    if !raw.is_empty() {
        parts.push(Node::value(Literal::Str(unescape(raw)?)));
    }
    Ok(())
}

fn kind_is_literal(kind: &str) -> bool {
    kind != node_kinds::STRING_LITERAL && LiteralKind::from_node_kind(kind).is_some()
}

fn is_null(node: &SyntaxNode) -> bool {
    node.is(node_kinds::NULL_LITERAL)
}
