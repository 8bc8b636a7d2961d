//! Splicing domain models

mod parsed_span;

pub use parsed_span::ParsedSpan;
