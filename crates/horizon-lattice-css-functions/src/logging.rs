//! Logging and debugging facilities for custom function processing.
//!
//! This module provides:
//! - Target and span names for filtering the crate's `tracing` output
//! - Debug visualization for component value trees
//!
//! # Tracing Integration
//!
//! The crate only emits `tracing` events. To see them, install a subscriber
//! in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_max_level(tracing::Level::DEBUG)
//!     .init();
//! ```
//!
//! Every diagnostic is logged at `warn` level under [`targets::TRANSFORM`];
//! successful substitutions are logged at `debug` level.
//!
//! # Debug Visualization
//!
//! ```ignore
//! use horizon_lattice_css_functions::logging::ComponentTreeDebug;
//!
//! let values = parse_list("--shadow(red, 2px)")?;
//! println!("{}", ComponentTreeDebug::new().format_values(&values));
//! ```

use std::fmt::Write as FmtWrite;

use crate::tree::{ComponentValue, TokenKind};

/// Span names used by this crate.
pub mod span_names {
    /// Transformation of one declaration value.
    pub const TRANSFORM_VALUE: &str = "horizon_lattice::css_functions::transform_value";
    /// Processing of a whole stylesheet.
    pub const PROCESS_STYLESHEET: &str = "horizon_lattice::css_functions::process_stylesheet";
}

/// Target names for log filtering.
pub mod targets {
    /// Value transformation and substitution.
    pub const TRANSFORM: &str = "horizon_lattice_css_functions::transform";
    /// Callback invocation.
    pub const INVOKE: &str = "horizon_lattice_css_functions::invoke";
    /// Declaration and stylesheet processing.
    pub const PROCESSOR: &str = "horizon_lattice_css_functions::processor";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

/// Configuration for component tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show the source text of tokens.
    pub show_source: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_source: true,
            max_depth: None,
            indent_size: 2,
        }
    }
}

impl TreeFormatOptions {
    /// Create options for minimal output.
    pub fn minimal() -> Self {
        Self {
            show_source: false,
            ..Default::default()
        }
    }
}

/// Debug utility for visualizing component value trees.
#[derive(Debug, Clone, Default)]
pub struct ComponentTreeDebug {
    options: TreeFormatOptions,
}

impl ComponentTreeDebug {
    /// Create a new debug visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a debug visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format a sequence of sibling values, one line per node.
    pub fn format_values(&self, values: &[ComponentValue]) -> String {
        let mut output = String::new();
        if values.is_empty() {
            output.push_str("(empty)\n");
        }
        self.format_children_into(values, 0, &mut Vec::new(), &mut output);
        output
    }

    /// `ancestors` holds, for each enclosing level below the roots, whether
    /// that ancestor was the last of its siblings.
    fn format_children_into(
        &self,
        values: &[ComponentValue],
        depth: usize,
        ancestors: &mut Vec<bool>,
        output: &mut String,
    ) {
        let count = values.len();
        for (i, value) in values.iter().enumerate() {
            self.format_value_into(value, depth, i + 1 == count, ancestors, output);
        }
    }

    fn format_value_into(
        &self,
        value: &ComponentValue,
        depth: usize,
        is_last: bool,
        ancestors: &mut Vec<bool>,
        output: &mut String,
    ) {
        if let Some(max) = self.options.max_depth
            && depth > max
        {
            return;
        }

        output.push_str(&self.build_prefix(ancestors, depth, is_last));

        match value {
            ComponentValue::Token(token) => {
                let _ = write!(output, "{}", token_label(token.kind));
                if self.options.show_source {
                    let _ = write!(output, " {:?}", token.source);
                }
            }
            ComponentValue::Function(function) => {
                let _ = write!(output, "Function {}", function.name);
                if !function.closed {
                    output.push_str(" (unclosed)");
                }
            }
            ComponentValue::Block(block) => {
                let _ = write!(
                    output,
                    "Block {}{}",
                    block.kind.opening(),
                    block.kind.closing()
                );
                if !block.closed {
                    output.push_str(" (unclosed)");
                }
            }
        }
        output.push('\n');

        if depth == 0 {
            self.format_children_into(value.children(), depth + 1, ancestors, output);
        } else {
            ancestors.push(is_last);
            self.format_children_into(value.children(), depth + 1, ancestors, output);
            ancestors.pop();
        }
    }

    /// Build the prefix string for a tree node.
    fn build_prefix(&self, ancestors: &[bool], depth: usize, is_last: bool) -> String {
        if depth == 0 {
            return String::new();
        }

        let (branch, corner, last) = match self.options.style {
            TreeStyle::Ascii => ("|", "+--", "`--"),
            TreeStyle::Unicode => ("\u{2502}", "\u{251c}\u{2500}\u{2500}", "\u{2514}\u{2500}\u{2500}"),
            TreeStyle::Compact => ("", "-", "-"),
        };

        let mut prefix = String::new();
        for &finished in ancestors {
            if finished {
                prefix.extend(branch.chars().map(|_| ' '));
            } else {
                prefix.push_str(branch);
            }
            for _ in 0..self.options.indent_size {
                prefix.push(' ');
            }
        }
        prefix.push_str(if is_last { last } else { corner });
        prefix.push(' ');
        prefix
    }
}

fn token_label(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::Whitespace => "Whitespace",
        TokenKind::Comment => "Comment",
        TokenKind::Comma => "Comma",
        TokenKind::Colon => "Colon",
        TokenKind::Semicolon => "Semicolon",
        TokenKind::Ident => "Ident",
        TokenKind::AtKeyword => "AtKeyword",
        TokenKind::Hash => "Hash",
        TokenKind::String => "String",
        TokenKind::Url => "Url",
        TokenKind::Number => "Number",
        TokenKind::Percentage => "Percentage",
        TokenKind::Dimension => "Dimension",
        TokenKind::Delim => "Delim",
        TokenKind::Other => "Token",
    }
}
