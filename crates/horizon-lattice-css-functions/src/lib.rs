//! User-defined CSS functions for Horizon Lattice.
//!
//! This crate lets stylesheets call functions implemented in Rust. A call
//! such as `--negative(10px)` inside a declaration value is replaced by the
//! text its callback returns, while everything else in the value is kept
//! exactly as written:
//!
//! - **Component value trees**: Values are parsed with `cssparser` into a
//!   source-preserving tree of tokens, functions and blocks
//! - **Nested calls**: Calls inside other calls, blocks and list items are resolved
//! - **Recoverable failures**: Malformed calls and failing callbacks produce
//!   diagnostics and are left untouched
//! - **Stylesheet processing**: Rewrite every declaration of a stylesheet in place
//!
//! # Example
//!
//! ```ignore
//! use horizon_lattice_css_functions::prelude::*;
//!
//! let registry = FunctionRegistry::new()
//!     .with("--negative", |args| match args.first() {
//!         Some(value) => Ok(format!("calc(-1 * {value})")),
//!         None => Err("expected one argument".into()),
//!     });
//!
//! let result = transform_value("--negative( 10px )", &registry);
//! assert_eq!(result.replacement.as_deref(), Some("calc(-1 * 10px)"));
//!
//! let processor = CustomFunctionProcessor::new(registry);
//! let output = processor.process_stylesheet(".a { margin-top: --negative(4px); }");
//! for warning in &output.warnings {
//!     eprintln!("{}", warning);
//! }
//! ```

pub mod declaration;
pub mod logging;
pub mod processor;
pub mod registry;
pub mod stylesheet;
pub mod transform;
pub mod tree;

mod error;

pub use error::{Error, Result};
pub use transform::{Diagnostic, Transformation, transform_value};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::declaration::{Declaration, Warning};
    pub use crate::processor::CustomFunctionProcessor;
    pub use crate::registry::{BoxError, CustomFunction, CustomFunctionResult, FunctionRegistry};
    pub use crate::stylesheet::ProcessedStylesheet;
    pub use crate::transform::{Diagnostic, Transformation, transform_value};
    pub use crate::tree::{ComponentValue, ParseError, parse_comma_separated_list, parse_list};
}
