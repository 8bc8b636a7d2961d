//! Parsing application layer

mod normalize;
mod parse_file;

pub use normalize::normalize;
pub use parse_file::ParseFileUseCase;
