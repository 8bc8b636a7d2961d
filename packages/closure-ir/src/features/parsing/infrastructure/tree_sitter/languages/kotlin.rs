//! Kotlin-specific tree-sitter configuration

/// Kotlin node kinds for quick lookup
pub mod node_kinds {
    // Declarations
    pub const SOURCE_FILE: &str = "source_file";
    pub const CLASS_DECLARATION: &str = "class_declaration";
    pub const FUNCTION_DECLARATION: &str = "function_declaration";
    pub const MODIFIERS: &str = "modifiers";
    pub const ANNOTATION: &str = "annotation";
    pub const USER_TYPE: &str = "user_type";
    pub const CONSTRUCTOR_INVOCATION: &str = "constructor_invocation";
    pub const VARIABLE_DECLARATION: &str = "variable_declaration";
    pub const TYPE_IDENTIFIER: &str = "type_identifier";

    // Closures
    pub const LAMBDA_LITERAL: &str = "lambda_literal";
    pub const LAMBDA_PARAMETERS: &str = "lambda_parameters";
    pub const ANNOTATED_LAMBDA: &str = "annotated_lambda";
    pub const STATEMENTS: &str = "statements";

    // Expressions
    pub const SIMPLE_IDENTIFIER: &str = "simple_identifier";
    pub const CALL_EXPRESSION: &str = "call_expression";
    pub const CALL_SUFFIX: &str = "call_suffix";
    pub const VALUE_ARGUMENTS: &str = "value_arguments";
    pub const VALUE_ARGUMENT: &str = "value_argument";
    pub const TYPE_ARGUMENTS: &str = "type_arguments";
    pub const NAVIGATION_EXPRESSION: &str = "navigation_expression";
    pub const NAVIGATION_SUFFIX: &str = "navigation_suffix";
    pub const PARENTHESIZED_EXPRESSION: &str = "parenthesized_expression";
    pub const PREFIX_EXPRESSION: &str = "prefix_expression";
    pub const INFIX_EXPRESSION: &str = "infix_expression";
    pub const CHECK_EXPRESSION: &str = "check_expression";
    pub const ADDITIVE_EXPRESSION: &str = "additive_expression";
    pub const MULTIPLICATIVE_EXPRESSION: &str = "multiplicative_expression";
    pub const COMPARISON_EXPRESSION: &str = "comparison_expression";
    pub const EQUALITY_EXPRESSION: &str = "equality_expression";
    pub const CONJUNCTION_EXPRESSION: &str = "conjunction_expression";
    pub const DISJUNCTION_EXPRESSION: &str = "disjunction_expression";

    // Literals
    pub const INTEGER_LITERAL: &str = "integer_literal";
    pub const LONG_LITERAL: &str = "long_literal";
    pub const REAL_LITERAL: &str = "real_literal";
    pub const BOOLEAN_LITERAL: &str = "boolean_literal";
    pub const NULL_LITERAL: &str = "null";
    pub const STRING_LITERAL: &str = "string_literal";
    pub const STRING_CONTENT: &str = "string_content";
    pub const INTERPOLATED_IDENTIFIER: &str = "interpolated_identifier";
    pub const INTERPOLATED_EXPRESSION: &str = "interpolated_expression";

    // Comments
    pub const LINE_COMMENT: &str = "line_comment";
    pub const MULTILINE_COMMENT: &str = "multiline_comment";
}

/// Check if a node kind is a comment
pub fn is_comment(kind: &str) -> bool {
    matches!(
        kind,
        node_kinds::LINE_COMMENT | node_kinds::MULTILINE_COMMENT
    )
}

/// Kinds the normalizer must never unwrap, even with a single child
pub fn is_structural(kind: &str) -> bool {
    matches!(
        kind,
        node_kinds::LAMBDA_LITERAL
            | node_kinds::LAMBDA_PARAMETERS
            | node_kinds::STATEMENTS
            | node_kinds::STRING_LITERAL
    )
}

/// Check if a node kind is a binary operator production
pub fn is_binary_expression(kind: &str) -> bool {
    matches!(
        kind,
        node_kinds::ADDITIVE_EXPRESSION
            | node_kinds::MULTIPLICATIVE_EXPRESSION
            | node_kinds::COMPARISON_EXPRESSION
            | node_kinds::EQUALITY_EXPRESSION
            | node_kinds::CONJUNCTION_EXPRESSION
            | node_kinds::DISJUNCTION_EXPRESSION
    )
}
