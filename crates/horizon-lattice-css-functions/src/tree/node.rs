//! Component value node types.
//!
//! Every node keeps the exact source text it was parsed from, so serializing
//! an untouched tree reproduces the input byte-for-byte.

use std::fmt;

use cssparser::ToCss;

/// A single component value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentValue {
    /// A preserved token.
    Token(TokenNode),
    /// A function call: `name(...)`.
    Function(FunctionNode),
    /// A simple block: `(...)`, `[...]` or `{...}`.
    Block(SimpleBlock),
}

impl ComponentValue {
    /// Whether this node is a whitespace token.
    pub fn is_whitespace(&self) -> bool {
        matches!(self, Self::Token(token) if token.kind == TokenKind::Whitespace)
    }

    /// Whether this node is a comma token.
    pub fn is_comma(&self) -> bool {
        matches!(self, Self::Token(token) if token.kind == TokenKind::Comma)
    }

    /// Get the function node, if this is one.
    pub fn as_function(&self) -> Option<&FunctionNode> {
        match self {
            Self::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Inner values of functions and blocks.
    pub fn children(&self) -> &[ComponentValue] {
        match self {
            Self::Token(_) => &[],
            Self::Function(function) => &function.value,
            Self::Block(block) => &block.value,
        }
    }
}

impl ToCss for ComponentValue {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        match self {
            Self::Token(token) => token.to_css(dest),
            Self::Function(function) => function.to_css(dest),
            Self::Block(block) => block.to_css(dest),
        }
    }
}

impl fmt::Display for ComponentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_css(f)
    }
}

/// Kind of a preserved token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Whitespace,
    Comment,
    Comma,
    Colon,
    Semicolon,
    Ident,
    AtKeyword,
    Hash,
    String,
    Url,
    Number,
    Percentage,
    Dimension,
    Delim,
    /// Attribute matchers (`~=`, `|=`, ...), `<!--`/`-->` and closing
    /// brackets with no matching opener.
    Other,
}

/// A single token and the source text it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenNode {
    pub kind: TokenKind,
    pub source: String,
}

impl TokenNode {
    /// Create a token node.
    pub fn new(kind: TokenKind, source: impl Into<String>) -> Self {
        Self {
            kind,
            source: source.into(),
        }
    }
}

impl ToCss for TokenNode {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        dest.write_str(&self.source)
    }
}

/// A function call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionNode {
    /// Unescaped function name, compared against registered names.
    pub name: String,
    /// The opening text as written, including the `(`.
    pub opening: String,
    /// Argument content between the parentheses.
    pub value: Vec<ComponentValue>,
    /// Whether the closing `)` was present in the source.
    pub closed: bool,
}

impl ToCss for FunctionNode {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        dest.write_str(&self.opening)?;
        for value in &self.value {
            value.to_css(dest)?;
        }
        if self.closed {
            dest.write_char(')')?;
        }
        Ok(())
    }
}

/// Bracket type of a simple block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Parenthesis,
    Square,
    Curly,
}

impl BlockKind {
    /// The opening character.
    pub fn opening(self) -> char {
        match self {
            Self::Parenthesis => '(',
            Self::Square => '[',
            Self::Curly => '{',
        }
    }

    /// The closing character.
    pub fn closing(self) -> char {
        match self {
            Self::Parenthesis => ')',
            Self::Square => ']',
            Self::Curly => '}',
        }
    }
}

/// A bracketed block that is not a function call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleBlock {
    pub kind: BlockKind,
    pub value: Vec<ComponentValue>,
    /// Whether the closing bracket was present in the source.
    pub closed: bool,
}

impl ToCss for SimpleBlock {
    fn to_css<W>(&self, dest: &mut W) -> fmt::Result
    where
        W: fmt::Write,
    {
        dest.write_char(self.kind.opening())?;
        for value in &self.value {
            value.to_css(dest)?;
        }
        if self.closed {
            dest.write_char(self.kind.closing())?;
        }
        Ok(())
    }
}

/// Serialize a sequence of component values.
pub fn serialize(values: &[ComponentValue]) -> String {
    let mut output = String::new();
    for value in values {
        // Writing to a String cannot fail.
        let _ = value.to_css(&mut output);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> ComponentValue {
        ComponentValue::Token(TokenNode::new(TokenKind::Ident, name))
    }

    #[test]
    fn serialize_function() {
        let function = ComponentValue::Function(FunctionNode {
            name: "--f".to_string(),
            opening: "--f(".to_string(),
            value: vec![ident("a")],
            closed: true,
        });

        assert_eq!(function.to_css_string(), "--f(a)");
        assert_eq!(function.children().len(), 1);
    }

    #[test]
    fn serialize_unclosed_block() {
        let block = ComponentValue::Block(SimpleBlock {
            kind: BlockKind::Square,
            value: vec![ident("a")],
            closed: false,
        });

        assert_eq!(serialize(&[ident("x"), block]), "x[a");
    }

    #[test]
    fn node_predicates() {
        let space = ComponentValue::Token(TokenNode::new(TokenKind::Whitespace, " "));
        let comma = ComponentValue::Token(TokenNode::new(TokenKind::Comma, ","));

        assert!(space.is_whitespace());
        assert!(!space.is_comma());
        assert!(comma.is_comma());
        assert!(ident("a").as_function().is_none());
    }
}
