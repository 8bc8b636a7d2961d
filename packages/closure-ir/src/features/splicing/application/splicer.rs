//! Source splicer
//!
//! Replaces located closures with `withExpressionN(<closure>, { <tree> })` calls.
//! Spans are applied in descending start order so earlier offsets stay valid.
//!
//! A closure preceded (within 3 bytes) by `)` is a trailing closure; its range is
//! widened back to that `)` and the call is appended as an extra argument:
//!
//! ```text
//! foo(a) { it }   →  foo(a, withExpression1({ it }, { LambdaArgument(0) }))
//! map { it }      →  map (withExpression1({ it }, { LambdaArgument(0) }))
//! ```

use tracing::debug;

use crate::features::codegen::emit;
use crate::features::expression::{lambda_parameter_names, CompilerOptions, ExpressionCompiler};
use crate::features::parsing::ParsedTree;
use crate::features::splicing::domain::ParsedSpan;
use crate::shared::models::{ClosureIrError, Result};

/// Runtime helper the rewritten calls go through, suffixed by arity
pub const WRAP_NAME: &str = "withExpression";

const LOOK_BACK: usize = 3;

/// Apply `fragment(original, span, trailing)` to every span.
///
/// `original` is the trimmed closure text. Returns `None` when there is nothing to
/// replace. Errors carry the start line of the closure they came from.
pub fn splice<F>(text: &str, spans: &[ParsedSpan], mut fragment: F) -> Result<Option<String>>
where
    F: FnMut(&str, &ParsedSpan, bool) -> Result<String>,
{
    if spans.is_empty() {
        return Ok(None);
    }

    let mut ordered: Vec<&ParsedSpan> = spans.iter().collect();
    ordered.sort_by(|a, b| b.start.cmp(&a.start));

    let mut out = text.to_string();
    for span in ordered {
        let line = span.lambda.span.start_line;
        if span.start > span.end
            || span.end > out.len()
            || !out.is_char_boundary(span.start)
            || !out.is_char_boundary(span.end)
        {
            return Err(ClosureIrError::splice(format!(
                "span {}..{} out of bounds for text of {} bytes",
                span.start,
                span.end,
                out.len()
            ))
            .with_line(line));
        }

        let original = out[span.start..span.end].trim().to_string();
        let trailing = follows_call_parens(&out, span.start);
        let start = if trailing {
            out[..span.start].rfind(')').unwrap_or(span.start)
        } else {
            span.start
        };

        let replacement = fragment(&original, span, trailing).map_err(|e| e.with_line(line))?;
        out.replace_range(start..span.end, &replacement);
    }
    Ok(Some(out))
}

/// Whether the last non-blank char in the few bytes before `pos` is `)`
fn follows_call_parens(text: &str, pos: usize) -> bool {
    let mut from = pos.saturating_sub(LOOK_BACK);
    while !text.is_char_boundary(from) {
        from += 1;
    }
    text[from..pos].trim().ends_with(')')
}

/// Compiles located closures and splices the wrapped calls into the source
#[derive(Debug, Clone, Copy)]
pub struct ClosureSplicer<'a> {
    compiler: ExpressionCompiler<'a>,
}

impl<'a> ClosureSplicer<'a> {
    pub fn new(options: &'a CompilerOptions) -> Self {
        Self {
            compiler: ExpressionCompiler::new(options),
        }
    }

    pub fn rewrite(&self, tree: &ParsedTree, spans: &[ParsedSpan]) -> Result<Option<String>> {
        splice(&tree.source, spans, |original, span, trailing| {
            self.fragment(original, span, trailing, &tree.source)
                .map_err(|e| e.with_file(tree.file_path.clone()))
        })
    }

    /// Replacement text for a single closure
    pub fn fragment(
        &self,
        original: &str,
        span: &ParsedSpan,
        trailing: bool,
        source: &str,
    ) -> Result<String> {
        let tree = self.compiler.compile(&span.lambda, source);
        let declared = lambda_parameter_names(&span.lambda, source).len();
        let used = tree.max_lambda_argument().map_or(0, |i| i + 1);
        let arity = declared.max(used);
        let code = emit(&tree)?;

        debug!(start = span.start, arity, trailing, "Wrapping closure");

        let prefix = if trailing { ", " } else { "(" };
        Ok(format!("{prefix}{WRAP_NAME}{arity}({original}, {{ {code} }}))"))
    }
}
