//! Stylesheet-level processing.
//!
//! Walks a stylesheet with `cssparser`, runs every declaration value through
//! the processor and splices replaced values back into the source. Text
//! outside replaced values (selectors, comments, formatting, `!important`)
//! is kept byte-for-byte.

use std::ops::Range;

use cssparser::{
    ParseError as CssParseError, Parser, ParserInput, SourceLocation, SourcePosition, Token,
};

use crate::declaration::{Declaration, Warning};
use crate::logging::{span_names, targets};
use crate::processor::CustomFunctionProcessor;

/// Result of processing a stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedStylesheet {
    /// The rewritten stylesheet.
    pub css: String,
    /// Warnings from every declaration, in source order.
    pub warnings: Vec<Warning>,
    /// Number of declaration values that were replaced.
    pub replaced: usize,
}

impl CustomFunctionProcessor {
    /// Process every declaration in a stylesheet.
    ///
    /// Declarations are found in style rules, at-rule blocks and nested
    /// rules. Malformed rules are skipped, never rejected.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let processor = CustomFunctionProcessor::new(registry);
    /// let output = processor.process_stylesheet(".a { margin: --negative(4px); }");
    /// assert_eq!(output.css, ".a { margin: calc(-1 * 4px); }");
    /// ```
    pub fn process_stylesheet(&self, css: &str) -> ProcessedStylesheet {
        let _span = tracing::debug_span!(target: targets::PROCESSOR, span_names::PROCESS_STYLESHEET)
            .entered();
        self.process_source(css, true)
    }

    /// Process a bare declaration list, such as the content of a `style`
    /// attribute.
    pub fn process_declaration_list(&self, css: &str) -> ProcessedStylesheet {
        self.process_source(css, false)
    }

    fn process_source(&self, css: &str, top_level: bool) -> ProcessedStylesheet {
        let mut input = ParserInput::new(css);
        let mut parser = Parser::new(&mut input);

        let mut walker = StylesheetWalker {
            processor: self,
            origin: parser.position(),
            edits: vec![],
            warnings: vec![],
        };
        walker.walk_block(&mut parser, top_level);

        let replaced = walker.edits.len();
        tracing::debug!(
            target: targets::PROCESSOR,
            replaced,
            warnings = walker.warnings.len(),
            "stylesheet processed"
        );

        ProcessedStylesheet {
            css: apply_edits(css, &walker.edits),
            warnings: walker.warnings,
            replaced,
        }
    }
}

/// A replacement of a byte range of the source.
struct Edit {
    range: Range<usize>,
    replacement: String,
}

struct StylesheetWalker<'a> {
    processor: &'a CustomFunctionProcessor,
    origin: SourcePosition,
    edits: Vec<Edit>,
    warnings: Vec<Warning>,
}

impl StylesheetWalker<'_> {
    /// Walk the items of a rule list or declaration block.
    fn walk_block(&mut self, input: &mut Parser<'_, '_>, top_level: bool) {
        loop {
            let location = input.current_source_location();
            let token = match input.next_including_whitespace_and_comments() {
                Ok(token) => token.clone(),
                Err(_) => return,
            };

            match token {
                Token::WhiteSpace(_) | Token::Comment(_) | Token::Semicolon => {}
                Token::CurlyBracketBlock => self.walk_nested(input),
                Token::Ident(name) if !top_level => {
                    self.walk_declaration(input, name.to_string(), location);
                }
                _ => self.skip_rule(input),
            }
        }
    }

    /// Walk the content of the block that was just opened.
    fn walk_nested(&mut self, input: &mut Parser<'_, '_>) {
        let _ = input.parse_nested_block(|nested| {
            self.walk_block(nested, false);
            Ok::<_, CssParseError<'_, ()>>(())
        });
    }

    /// Skip a rule prelude, walking its block if it has one.
    fn skip_rule(&mut self, input: &mut Parser<'_, '_>) {
        loop {
            match input.next_including_whitespace_and_comments() {
                Ok(Token::Semicolon) | Err(_) => return,
                Ok(Token::CurlyBracketBlock) => {
                    self.walk_nested(input);
                    return;
                }
                Ok(_) => {}
            }
        }
    }

    /// Handle an item starting with an identifier: a declaration, or a
    /// nested rule such as `a:hover { ... }`.
    fn walk_declaration(
        &mut self,
        input: &mut Parser<'_, '_>,
        property: String,
        location: SourceLocation,
    ) {
        let state = input.state();
        if input.expect_colon().is_err() {
            input.reset(&state);
            self.skip_rule(input);
            return;
        }

        let value_start = input.position();
        let value_end = loop {
            let before = input.position();
            match input.next_including_whitespace_and_comments() {
                Ok(Token::Semicolon) | Err(_) => break before,
                Ok(Token::CurlyBracketBlock) if !property.starts_with("--") => {
                    self.walk_nested(input);
                    return;
                }
                Ok(_) => {}
            }
        };

        let raw = input.slice(value_start..value_end);
        let offset = input.slice(self.origin..value_start).len();
        let (leading, text, important) = split_value(raw);

        let mut declaration = Declaration {
            property,
            value: text.to_string(),
            important,
            line: location.line + 1,
            column: location.column,
        };
        let warnings = self.processor.process_declaration(&mut declaration);
        self.warnings.extend(warnings);

        if declaration.value != text {
            let start = offset + leading;
            self.edits.push(Edit {
                range: start..start + text.len(),
                replacement: declaration.value,
            });
        }
    }
}

/// Split raw declaration value text into (leading whitespace length, value,
/// important flag).
fn split_value(raw: &str) -> (usize, &str, bool) {
    let leading = raw.len() - raw.trim_start().len();
    let text = raw.trim();
    match strip_important(text) {
        Some(head) => (leading, head, true),
        None => (leading, text, false),
    }
}

fn strip_important(text: &str) -> Option<&str> {
    let bang = text.rfind('!')?;
    let tail = text[bang + 1..].trim_start();
    tail.eq_ignore_ascii_case("important")
        .then(|| text[..bang].trim_end())
}

fn apply_edits(css: &str, edits: &[Edit]) -> String {
    let mut output = String::with_capacity(css.len());
    let mut last = 0;
    for edit in edits {
        output.push_str(&css[last..edit.range.start]);
        output.push_str(&edit.replacement);
        last = edit.range.end;
    }
    output.push_str(&css[last..]);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FunctionRegistry;

    fn processor() -> CustomFunctionProcessor {
        CustomFunctionProcessor::new(
            FunctionRegistry::new()
                .with("--negative", |args| Ok(format!("calc(-1 * {})", args[0])))
                .with("--list", |_| Ok("10px, 20px".to_string()))
                .with("--error", |_| Err("custom function error".into())),
        )
    }

    #[test]
    fn process_simple_rule() {
        let output = processor().process_stylesheet(".a { margin: --negative(4px); }");

        assert_eq!(output.css, ".a { margin: calc(-1 * 4px); }");
        assert_eq!(output.replaced, 1);
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn preserves_important_and_formatting() {
        let css = "Button {\n  margin :  --negative(1px)  !important ;\n  color: red\n}\n";
        let output = processor().process_stylesheet(css);

        assert_eq!(
            output.css,
            "Button {\n  margin :  calc(-1 * 1px)  !important ;\n  color: red\n}\n"
        );
    }

    #[test]
    fn last_declaration_without_semicolon() {
        let output = processor().process_stylesheet("a{margin:--list()}");
        assert_eq!(output.css, "a{margin:10px, 20px}");
    }

    #[test]
    fn walks_at_rules_and_nested_rules() {
        let css = "@media (min-width: 10px) { .a { top: --negative(1px) } }\n\
                   .b { &:hover { left: --negative(2px); } right: --negative(3px); }\n\
                   .c:hover { bottom: --negative(4px) }";
        let output = processor().process_stylesheet(css);

        assert_eq!(output.replaced, 4);
        assert!(output.css.contains("top: calc(-1 * 1px) }"));
        assert!(output.css.contains("left: calc(-1 * 2px);"));
        assert!(output.css.contains("right: calc(-1 * 3px);"));
        assert!(output.css.contains("bottom: calc(-1 * 4px) }"));
    }

    #[test]
    fn nested_rule_with_pseudo_class_selector() {
        let css = ".a { b:hover { top: --negative(1px) } }";
        let output = processor().process_stylesheet(css);
        assert_eq!(output.css, ".a { b:hover { top: calc(-1 * 1px) } }");
    }

    #[test]
    fn warnings_carry_location() {
        let css = ".a {\n  color: red;\n  margin: --error() --error();\n}";
        let output = processor().process_stylesheet(css);

        assert_eq!(output.css, css);
        assert_eq!(output.replaced, 0);
        assert_eq!(output.warnings.len(), 2);
        assert_eq!(output.warnings[0].property, "margin");
        assert_eq!(output.warnings[0].line, 3);
        assert_eq!(output.warnings[0].column, 3);
    }

    #[test]
    fn ignores_selectors_and_comments() {
        let css = "/* --negative(1px) */ .x[data-a=\"--negative(1px)\"] { }";
        let output = processor().process_stylesheet(css);
        assert_eq!(output.css, css);
        assert_eq!(output.replaced, 0);
    }

    #[test]
    fn custom_property_values_are_processed() {
        let output = processor().process_stylesheet(":root { --gap: --negative(8px); }");
        assert_eq!(output.css, ":root { --gap: calc(-1 * 8px); }");
    }

    #[test]
    fn declaration_list() {
        let output = processor().process_declaration_list("top: --negative(1px); left: 0");
        assert_eq!(output.css, "top: calc(-1 * 1px); left: 0");
    }

    #[test]
    fn split_value_strips_important() {
        assert_eq!(split_value("  a b  "), (2, "a b", false));
        assert_eq!(split_value(" a ! IMPORTANT "), (1, "a", true));
        assert_eq!(split_value(" \"x!important\""), (1, "\"x!important\"", false));
    }
}
