//! Expression tree model
//!
//! A closed sum type describing one closure body. Trees are built by the compiler,
//! turned into source text by the emitter and read back by the reader; equality is
//! structural over exactly the variant fields.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Literal constant carried by `Value` (and by `Val` once re-captured)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    Null,
    Str(String),
}

impl Literal {
    pub fn str(text: impl Into<String>) -> Self {
        Literal::Str(text.into())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Literal::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

/// Symbol handle produced by a host `SymbolResolver`
#[derive(Clone)]
pub struct ResolvedSymbol {
    pub name: String,
    pub handle: Arc<dyn Any + Send + Sync>,
}

impl fmt::Debug for ResolvedSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedSymbol")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Reference target of a `Ref` node
#[derive(Debug, Clone)]
pub enum Reference {
    /// Textual qualified name (`a.b::c`, `::sin`, `Pair::class`)
    Named(String),

    /// Host-resolved symbol. Not emittable.
    Resolved(ResolvedSymbol),
}

impl Reference {
    pub fn name(&self) -> &str {
        match self {
            Reference::Named(name) => name,
            Reference::Resolved(symbol) => &symbol.name,
        }
    }
}

// References compare by qualified name; the resolved handle is opaque
impl PartialEq for Reference {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

/// Raw syntax preserved by `Unknown` for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSyntax {
    /// Grammar production kind
    pub kind: String,

    /// Source text of the subtree
    pub text: String,
}

/// Unary operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    UnaryMinus,
    UnaryPlus,
    UnaryBang,
}

impl UnaryOp {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "-" => Some(UnaryOp::UnaryMinus),
            "+" => Some(UnaryOp::UnaryPlus),
            "!" => Some(UnaryOp::UnaryBang),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::UnaryMinus => "UnaryMinus",
            UnaryOp::UnaryPlus => "UnaryPlus",
            UnaryOp::UnaryBang => "UnaryBang",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        [UnaryOp::UnaryMinus, UnaryOp::UnaryPlus, UnaryOp::UnaryBang]
            .into_iter()
            .find(|op| op.as_str() == name)
    }
}

/// Binary operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    // Arithmetic
    Plus,
    Minus,
    Multiply,
    Divide,

    // Logical
    And,
    Or,

    // Comparison
    Equal,
    NotEqual,
    Less,
    Greater,
    LessOrEqual,
    GreaterOrEqual,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 12] = [
        BinaryOp::Plus,
        BinaryOp::Minus,
        BinaryOp::Multiply,
        BinaryOp::Divide,
        BinaryOp::And,
        BinaryOp::Or,
        BinaryOp::Equal,
        BinaryOp::NotEqual,
        BinaryOp::Less,
        BinaryOp::Greater,
        BinaryOp::LessOrEqual,
        BinaryOp::GreaterOrEqual,
    ];

    /// Operator selected by a concrete source token
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "+" => Some(BinaryOp::Plus),
            "-" => Some(BinaryOp::Minus),
            "*" => Some(BinaryOp::Multiply),
            "/" => Some(BinaryOp::Divide),
            "&&" => Some(BinaryOp::And),
            "||" => Some(BinaryOp::Or),
            "==" => Some(BinaryOp::Equal),
            "!=" => Some(BinaryOp::NotEqual),
            "<" => Some(BinaryOp::Less),
            ">" => Some(BinaryOp::Greater),
            "<=" => Some(BinaryOp::LessOrEqual),
            ">=" => Some(BinaryOp::GreaterOrEqual),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Plus => "Plus",
            BinaryOp::Minus => "Minus",
            BinaryOp::Multiply => "Multiply",
            BinaryOp::Divide => "Divide",
            BinaryOp::And => "And",
            BinaryOp::Or => "Or",
            BinaryOp::Equal => "Equal",
            BinaryOp::NotEqual => "NotEqual",
            BinaryOp::Less => "Less",
            BinaryOp::Greater => "Greater",
            BinaryOp::LessOrEqual => "LessOrEqual",
            BinaryOp::GreaterOrEqual => "GreaterOrEqual",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }
}

/// Expression tree node
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Leaves
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    /// Plain name, left for the consumer to interpret: `listOf`, `in`
    Identifier(String),

    /// Literal constant: `3`, `"a"`, `null`
    Value(Literal),

    /// Named binding captured at the closure's call site
    Val { name: String, value: Option<Literal> },

    /// Qualified reference to a callable, constructor or property
    Ref(Reference),

    /// Positional closure parameter
    LambdaArgument(usize),

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Operations
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    Unary(UnaryOp, Box<Node>),

    Binary(BinaryOp, Box<Node>, Box<Node>),

    /// Member access: `obj.prop`
    GetProperty(Box<Node>, Box<Node>),

    /// Invocation: `callee(args...)`
    Call { callee: Box<Node>, args: Vec<Node> },

    /// String template parts
    Concat(Vec<Node>),

    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    // Diagnostics
    // ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
    /// Rejected closure or internal failure
    Error(String),

    /// Syntax with no translation rule
    Unknown(RawSyntax),
}

impl Node {
    /// The implicit single parameter
    pub const IT: Node = Node::LambdaArgument(0);

    pub fn identifier(name: impl Into<String>) -> Self {
        Node::Identifier(name.into())
    }

    pub fn value(literal: Literal) -> Self {
        Node::Value(literal)
    }

    pub fn val(name: impl Into<String>) -> Self {
        Node::Val {
            name: name.into(),
            value: None,
        }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        Node::Ref(Reference::Named(name.into()))
    }

    pub fn unary(op: UnaryOp, child: Node) -> Self {
        Node::Unary(op, Box::new(child))
    }

    pub fn binary(op: BinaryOp, left: Node, right: Node) -> Self {
        Node::Binary(op, Box::new(left), Box::new(right))
    }

    pub fn get_property(object: Node, property: Node) -> Self {
        Node::GetProperty(Box::new(object), Box::new(property))
    }

    pub fn call(callee: Node, args: Vec<Node>) -> Self {
        Node::Call {
            callee: Box::new(callee),
            args,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Node::Error(message.into())
    }

    pub fn unknown(kind: impl Into<String>, text: impl Into<String>) -> Self {
        Node::Unknown(RawSyntax {
            kind: kind.into(),
            text: text.into(),
        })
    }

    /// Constructor name used in emitted code
    pub fn variant_name(&self) -> &'static str {
        match self {
            Node::Identifier(_) => "Identifier",
            Node::Value(_) => "Value",
            Node::Val { .. } => "Val",
            Node::Ref(_) => "Ref",
            Node::LambdaArgument(_) => "LambdaArgument",
            Node::Unary(op, _) => op.as_str(),
            Node::Binary(op, _, _) => op.as_str(),
            Node::GetProperty(_, _) => "GetProperty",
            Node::Call { .. } => "Call",
            Node::Concat(_) => "Concat",
            Node::Error(_) => "Error",
            Node::Unknown(_) => "Unknown",
        }
    }

    /// Structural children, in emission order
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Unary(_, child) => vec![child.as_ref()],
            Node::Binary(_, left, right) | Node::GetProperty(left, right) => {
                vec![left.as_ref(), right.as_ref()]
            }
            Node::Call { callee, args } => std::iter::once(callee.as_ref()).chain(args).collect(),
            Node::Concat(parts) => parts.iter().collect(),
            _ => Vec::new(),
        }
    }

    /// Pre-order traversal
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }

    /// Highest `LambdaArgument` index referenced anywhere in the tree
    pub fn max_lambda_argument(&self) -> Option<usize> {
        let mut max = None;
        self.walk(&mut |node| {
            if let Node::LambdaArgument(index) = node {
                max = Some(max.map_or(*index, |m: usize| m.max(*index)));
            }
        });
        max
    }

    /// Qualified name of an identifiable node: `Val`, `Ref`, or a property chain of them
    pub fn qualified_name(&self) -> Option<String> {
        match self {
            Node::Val { name, .. } => Some(name.clone()),
            Node::Ref(reference) => Some(reference.name().to_string()),
            Node::GetProperty(object, property) => {
                let object = object.qualified_name()?;
                let property = property.qualified_name()?;
                let object = QualifiedName::new(&object);
                Some(format!(
                    "{}::{}",
                    object.path(),
                    QualifiedName::new(&property).name_without_prefix()
                ))
            }
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Node::Error(_))
    }
}

/// View over a `prefix::name` qualified name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualifiedName<'a>(&'a str);

impl<'a> QualifiedName<'a> {
    pub fn new(name: &'a str) -> Self {
        Self(name)
    }

    /// Segment before the first `::`, if any
    pub fn prefix(&self) -> Option<&'a str> {
        self.0.split_once("::").map(|(prefix, _)| prefix)
    }

    /// Segment after the last `::`
    pub fn name_without_prefix(&self) -> &'a str {
        self.0.rsplit("::").next().unwrap_or(self.0)
    }

    /// `"prefix."`, or empty when unqualified
    pub fn insertable_prefix(&self) -> String {
        self.prefix().map(|p| format!("{}.", p)).unwrap_or_default()
    }

    /// Dotted path: `a.b::c` becomes `a.b.c`
    pub fn path(&self) -> String {
        format!("{}{}", self.insertable_prefix(), self.name_without_prefix())
    }
}
