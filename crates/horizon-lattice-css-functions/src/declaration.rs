//! Declarations and the warnings attributed to them.

use std::fmt;

use crate::transform::Diagnostic;

/// A single style declaration (`property: value [!important]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Property name as written.
    pub property: String,
    /// Value text, without surrounding whitespace or `!important`.
    pub value: String,
    /// Whether the declaration was marked as `!important`.
    pub important: bool,
    /// Line of the declaration in its stylesheet (1-indexed, 0 if unknown).
    pub line: u32,
    /// Column of the declaration in its stylesheet (1-indexed, 0 if unknown).
    pub column: u32,
}

impl Declaration {
    /// Create a declaration with no source location.
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
            important: false,
            line: 0,
            column: 0,
        }
    }

    /// Set the source location.
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = line;
        self.column = column;
        self
    }
}

/// A diagnostic attributed to the declaration it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    /// The diagnostic message.
    pub message: String,
    /// Property of the declaration being processed.
    pub property: String,
    /// Custom function whose call failed, if any.
    pub function: Option<String>,
    /// Line of the declaration (1-indexed, 0 if unknown).
    pub line: u32,
    /// Column of the declaration (1-indexed, 0 if unknown).
    pub column: u32,
}

impl Warning {
    /// Attribute a diagnostic to a declaration.
    pub fn new(declaration: &Declaration, diagnostic: &Diagnostic) -> Self {
        Self {
            message: diagnostic.message(),
            property: declaration.property.clone(),
            function: diagnostic.function().map(str::to_string),
            line: declaration.line,
            column: declaration.column,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "{}: {}", self.property, self.message)
        } else {
            write!(
                f,
                "{} at {}:{}: {}",
                self.property, self.line, self.column, self.message
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn warning_display() {
        let diagnostic = Diagnostic::from(Error::callback("--error", "boom"));
        let declaration = Declaration::new("margin", "--error()");

        let warning = Warning::new(&declaration, &diagnostic);
        assert_eq!(warning.to_string(), "margin: boom");
        assert_eq!(warning.function.as_deref(), Some("--error"));

        let warning = Warning::new(&declaration.at(3, 5), &diagnostic);
        assert_eq!(warning.to_string(), "margin at 3:5: boom");
    }
}
