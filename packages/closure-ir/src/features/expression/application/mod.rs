//! Expression application layer

mod compiler;
mod literal;

pub use compiler::{
    lambda_parameter_names, ExpressionCompiler, EMPTY_LAMBDA, IMPLICIT_PARAMETER,
    TOO_COMPLEX_LAMBDA,
};
pub use literal::{decode_literal, unescape, LiteralKind};
