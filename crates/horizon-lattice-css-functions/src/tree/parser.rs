//! Component value parsing on top of the `cssparser` tokenizer.

use cssparser::{Delimiter, ParseError as CssParseError, Parser, ParserInput, Token};

use super::error::{ParseError, TreeErrorKind};
use super::node::{BlockKind, ComponentValue, FunctionNode, SimpleBlock, TokenKind, TokenNode};

/// One top-level, comma-delimited segment of a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueSegment {
    /// The segment text exactly as it appeared in the input.
    pub source: String,
    /// The parsed segment, or the reason it could not be parsed.
    pub nodes: std::result::Result<Vec<ComponentValue>, ParseError>,
}

/// Parse a string into a list of component values.
///
/// Commas are kept as tokens, as are closing brackets with no matching
/// opener. Fails on bad strings and bad urls.
///
/// # Example
///
/// ```ignore
/// let values = parse_list("calc(1px + 2px) red")?;
/// assert_eq!(values.len(), 3);
/// ```
pub fn parse_list(css: &str) -> std::result::Result<Vec<ComponentValue>, ParseError> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    consume_component_values(&mut parser).map_err(ParseError::from)
}

/// Parse a string as a comma-separated list of component values.
///
/// The input is split at top-level commas only; commas inside functions and
/// blocks stay in their inner sequences. Each segment is parsed on its own, so
/// a lexical error in one segment leaves the others intact. An empty input
/// yields a single empty segment.
pub fn parse_comma_separated_list(css: &str) -> Vec<ValueSegment> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut segments = vec![];

    loop {
        let start = parser.position();
        let nodes = parser
            .parse_until_before(Delimiter::Comma, |p| consume_component_values(p))
            .map_err(ParseError::from);

        segments.push(ValueSegment {
            source: parser.slice_from(start).to_string(),
            nodes,
        });

        match parser.next_including_whitespace_and_comments() {
            Ok(Token::Comma) => continue,
            _ => break,
        }
    }

    segments
}

/// Consume component values until the parser is exhausted.
fn consume_component_values<'i>(
    input: &mut Parser<'i, '_>,
) -> std::result::Result<Vec<ComponentValue>, CssParseError<'i, TreeErrorKind>> {
    let mut values = vec![];

    loop {
        let start = input.position();
        let location = input.current_source_location();
        let token = match input.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => return Ok(values),
        };

        let value = match token {
            Token::Function(name) => {
                let opening = input.slice_from(start).to_string();
                let (value, closed) = consume_block_contents(input)?;
                ComponentValue::Function(FunctionNode {
                    name: name.to_string(),
                    opening,
                    value,
                    closed,
                })
            }
            Token::ParenthesisBlock => consume_simple_block(input, BlockKind::Parenthesis)?,
            Token::SquareBracketBlock => consume_simple_block(input, BlockKind::Square)?,
            Token::CurlyBracketBlock => consume_simple_block(input, BlockKind::Curly)?,
            Token::BadString(_) => {
                return Err(location.new_custom_error(TreeErrorKind::BadString));
            }
            Token::BadUrl(_) => return Err(location.new_custom_error(TreeErrorKind::BadUrl)),
            other => ComponentValue::Token(TokenNode::new(
                token_kind(&other),
                input.slice_from(start),
            )),
        };

        values.push(value);
    }
}

fn consume_simple_block<'i>(
    input: &mut Parser<'i, '_>,
    kind: BlockKind,
) -> std::result::Result<ComponentValue, CssParseError<'i, TreeErrorKind>> {
    let (value, closed) = consume_block_contents(input)?;
    Ok(ComponentValue::Block(SimpleBlock {
        kind,
        value,
        closed,
    }))
}

/// Consume the contents of the block that was just opened, and report
/// whether its closing bracket was present.
fn consume_block_contents<'i>(
    input: &mut Parser<'i, '_>,
) -> std::result::Result<(Vec<ComponentValue>, bool), CssParseError<'i, TreeErrorKind>> {
    let (value, inner_end) = input.parse_nested_block(|nested| {
        consume_component_values(nested).map(|value| (value, nested.position()))
    })?;

    // Anything consumed after the inner content is the closing bracket.
    let closed = !input.slice(inner_end..input.position()).is_empty();
    Ok((value, closed))
}

fn token_kind(token: &Token<'_>) -> TokenKind {
    match token {
        Token::WhiteSpace(_) => TokenKind::Whitespace,
        Token::Comment(_) => TokenKind::Comment,
        Token::Comma => TokenKind::Comma,
        Token::Colon => TokenKind::Colon,
        Token::Semicolon => TokenKind::Semicolon,
        Token::Ident(_) => TokenKind::Ident,
        Token::AtKeyword(_) => TokenKind::AtKeyword,
        Token::Hash(_) | Token::IDHash(_) => TokenKind::Hash,
        Token::QuotedString(_) => TokenKind::String,
        Token::UnquotedUrl(_) => TokenKind::Url,
        Token::Number { .. } => TokenKind::Number,
        Token::Percentage { .. } => TokenKind::Percentage,
        Token::Dimension { .. } => TokenKind::Dimension,
        Token::Delim(_) => TokenKind::Delim,
        _ => TokenKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::serialize;

    fn round_trip(css: &str) -> String {
        serialize(&parse_list(css).unwrap())
    }

    #[test]
    fn parse_tokens_and_functions() {
        let values = parse_list("--shadow(red) 10px").unwrap();

        assert_eq!(values.len(), 3);
        let function = values[0].as_function().unwrap();
        assert_eq!(function.name, "--shadow");
        assert_eq!(function.opening, "--shadow(");
        assert!(function.closed);
        assert!(values[1].is_whitespace());
        assert!(matches!(&values[2], ComponentValue::Token(t) if t.kind == TokenKind::Dimension));
    }

    #[test]
    fn nested_commas_stay_inside_functions() {
        let values = parse_list("rgb(1, 2, 3), blue").unwrap();

        assert_eq!(values.len(), 4);
        assert!(values[1].is_comma());
        let function = values[0].as_function().unwrap();
        assert_eq!(function.value.iter().filter(|v| v.is_comma()).count(), 2);
    }

    #[test]
    fn round_trip_preserves_formatting() {
        for css in [
            "  a   b  ",
            "calc( 1px  +  2px )",
            "/* note */ 1px",
            "url(foo.png) 'str' \"x\"",
            "[a b] {c} (d)",
            "1E3 +.5 -0px 10%",
            "\\66 oo(bar)",
            "--f(a, --g( b ))",
            "",
        ] {
            assert_eq!(round_trip(css), css);
        }
    }

    #[test]
    fn round_trip_unclosed_blocks() {
        assert_eq!(round_trip("--f(a"), "--f(a");
        assert_eq!(round_trip("a [b (c"), "a [b (c");

        let values = parse_list("--f(a").unwrap();
        assert!(!values[0].as_function().unwrap().closed);
    }

    #[test]
    fn escaped_function_name_is_unescaped() {
        let values = parse_list("\\66 oo(bar)").unwrap();
        assert_eq!(values[0].as_function().unwrap().name, "foo");
    }

    #[test]
    fn unmatched_close_is_a_token() {
        let values = parse_list("a)").unwrap();
        assert_eq!(values.len(), 2);
        assert!(matches!(&values[1], ComponentValue::Token(t) if t.kind == TokenKind::Other));

        for css in ["a)", "(a]", "a }", ") --f(b) ]"] {
            assert_eq!(round_trip(css), css);
        }

        let values = parse_list(") --f(b)").unwrap();
        assert_eq!(values[2].as_function().unwrap().name, "--f");
    }

    #[test]
    fn bad_string_is_an_error() {
        let error = parse_list("'abc\ndef'").unwrap_err();
        assert_eq!(error.message, "unterminated string");
        assert_eq!(error.line, 1);
        assert_eq!(error.column, 1);
    }

    #[test]
    fn bad_url_is_an_error() {
        let error = parse_list("url(a b)").unwrap_err();
        assert_eq!(error.message, "invalid url");
    }

    #[test]
    fn comma_separated_segments() {
        let segments = parse_comma_separated_list("a, fn(b, c) ,d");

        let sources: Vec<_> = segments.iter().map(|s| s.source.as_str()).collect();
        assert_eq!(sources, ["a", " fn(b, c) ", "d"]);
        assert!(segments.iter().all(|s| s.nodes.is_ok()));
    }

    #[test]
    fn comma_separated_keeps_empty_segments() {
        let sources: Vec<_> = parse_comma_separated_list("a,,")
            .into_iter()
            .map(|s| s.source)
            .collect();
        assert_eq!(sources, ["a", "", ""]);

        assert_eq!(parse_comma_separated_list("").len(), 1);
    }

    #[test]
    fn comma_separated_isolates_bad_segment() {
        let segments = parse_comma_separated_list("a, 'b\n, d");

        assert_eq!(segments.len(), 3);
        assert!(segments[0].nodes.is_ok());
        assert!(segments[1].nodes.is_err());
        assert_eq!(segments[1].source, " 'b\n");
        assert!(segments[2].nodes.is_ok());
    }
}
