//! Non-fatal diagnostics.

use std::fmt;

use crate::error::Error;

/// A recoverable problem found while transforming a value.
///
/// The affected call or segment is left as written; the rest of the value is
/// still processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    error: Error,
}

impl Diagnostic {
    /// Human-readable message.
    pub fn message(&self) -> String {
        self.error.to_string()
    }

    /// Name of the custom function whose call produced this diagnostic.
    pub fn function(&self) -> Option<&str> {
        self.error.function()
    }

    /// The underlying error.
    pub fn error(&self) -> &Error {
        &self.error
    }
}

impl From<Error> for Diagnostic {
    fn from(error: Error) -> Self {
        Self { error }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}
