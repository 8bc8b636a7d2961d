//! Splicing Feature
//!
//! Locates the closures of a parsed file and rewrites them in place.
//!
//! ## Structure
//! - `domain/` - ParsedSpan
//! - `application/` - SpanLocator, MarkerAnnotation, ClosureSplicer

pub mod application;
pub mod domain;

pub use application::{
    splice, ClosureSplicer, MarkerAnnotation, MarkerState, SpanLocator, DEFAULT_MARKER, WRAP_NAME,
};
pub use domain::ParsedSpan;
