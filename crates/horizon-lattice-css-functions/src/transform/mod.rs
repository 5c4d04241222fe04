//! Substitution of custom function calls in declaration values.

mod arguments;
mod diagnostic;
mod engine;
mod invoke;
mod matcher;

pub use arguments::split_arguments;
pub use diagnostic::Diagnostic;
pub use engine::{Transformation, transform_value};
pub use invoke::invoke;
pub use matcher::FunctionMatcher;
