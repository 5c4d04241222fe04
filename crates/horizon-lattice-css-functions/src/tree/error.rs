//! Component value parse errors.

use cssparser::{BasicParseErrorKind, ParseErrorKind, Token};

/// Parse error with location information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The error message describing what went wrong.
    pub message: String,
    /// Line number where the error occurred (1-indexed).
    pub line: u32,
    /// Column number where the error occurred (1-indexed).
    pub column: u32,
}

impl ParseError {
    /// Create a new parse error with the given message and location.
    pub fn new(message: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CSS parse error at {}:{}: {}", self.line, self.column, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Reasons the tree builder rejects a token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeErrorKind {
    /// A string literal interrupted by a newline.
    BadString,
    /// A `url(...)` with invalid content.
    BadUrl,
}

impl<'i> From<cssparser::ParseError<'i, TreeErrorKind>> for ParseError {
    fn from(error: cssparser::ParseError<'i, TreeErrorKind>) -> Self {
        let message = match error.kind {
            ParseErrorKind::Custom(TreeErrorKind::BadString) => {
                "unterminated string".to_string()
            }
            ParseErrorKind::Custom(TreeErrorKind::BadUrl) => "invalid url".to_string(),
            ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(token)) => {
                format!("unexpected token {}", describe_token(&token))
            }
            ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => {
                "unexpected end of input".to_string()
            }
            ParseErrorKind::Basic(kind) => format!("{:?}", kind),
        };

        // cssparser lines are 0-indexed, columns 1-indexed.
        Self::new(message, error.location.line + 1, error.location.column)
    }
}

fn describe_token(token: &Token<'_>) -> String {
    match token {
        Token::Ident(name) => format!("identifier '{}'", name),
        Token::Function(name) => format!("function '{}('", name),
        Token::Delim(c) => format!("'{}'", c),
        other => format!("{:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_location() {
        let error = ParseError::new("unterminated string", 1, 7);
        assert_eq!(error.to_string(), "CSS parse error at 1:7: unterminated string");
    }
}
