//! Component value trees.
//!
//! A value string is parsed into a sequence of [`ComponentValue`] nodes that
//! keep their source text, so untouched content serializes back exactly as
//! it was written.

mod error;
mod node;
mod parser;

pub use error::ParseError;
pub use node::{
    BlockKind, ComponentValue, FunctionNode, SimpleBlock, TokenKind, TokenNode, serialize,
};
pub use parser::{ValueSegment, parse_comma_separated_list, parse_list};
