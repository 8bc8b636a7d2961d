//! Splicing use cases

mod locator;
mod marker;
mod splicer;

pub use locator::SpanLocator;
pub use marker::{MarkerAnnotation, MarkerState, DEFAULT_MARKER};
pub use splicer::{splice, ClosureSplicer, WRAP_NAME};
