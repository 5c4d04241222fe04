//! Error types for custom function processing.

use crate::tree::ParseError;

/// Result type alias for custom function operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while substituting a custom function call.
///
/// None of these abort a transformation; each is reported as a
/// [`Diagnostic`](crate::Diagnostic) and the affected content is left as written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The value (or one of its comma-separated segments) could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A call contains an argument with no meaningful content, such as `--negative(,)`.
    #[error("Custom function '{function}' has an empty argument")]
    EmptyArgument { function: String },

    /// The callback reported a failure. Displays the callback's own message.
    #[error("{message}")]
    Callback { function: String, message: String },

    /// The text returned by the callback is not a valid component value list.
    #[error("Invalid result from custom function '{function}': {source}")]
    InvalidResult {
        function: String,
        #[source]
        source: ParseError,
    },
}

impl Error {
    /// Create an empty argument error.
    pub fn empty_argument(function: impl Into<String>) -> Self {
        Self::EmptyArgument {
            function: function.into(),
        }
    }

    /// Create a callback error.
    pub fn callback(function: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Callback {
            function: function.into(),
            message: message.into(),
        }
    }

    /// Create an invalid result error.
    pub fn invalid_result(function: impl Into<String>, source: ParseError) -> Self {
        Self::InvalidResult {
            function: function.into(),
            source,
        }
    }

    /// Name of the custom function involved, if any.
    pub fn function(&self) -> Option<&str> {
        match self {
            Self::Parse(_) => None,
            Self::EmptyArgument { function }
            | Self::Callback { function, .. }
            | Self::InvalidResult { function, .. } => Some(function),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_error_displays_message_only() {
        let error = Error::callback("--error", "custom function error");
        assert_eq!(error.to_string(), "custom function error");
        assert_eq!(error.function(), Some("--error"));
    }

    #[test]
    fn parse_error_is_transparent() {
        let error = Error::from(ParseError::new("invalid url", 1, 2));
        assert_eq!(error.to_string(), "CSS parse error at 1:2: invalid url");
        assert_eq!(error.function(), None);
    }
}
