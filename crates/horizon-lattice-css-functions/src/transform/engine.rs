//! The substitution engine.
//!
//! Parses a declaration value, resolves every call to a registered function
//! and serializes the result. Failures are collected as diagnostics and the
//! affected call or segment is emitted as written.

use crate::error::{Error, Result};
use crate::logging::{ComponentTreeDebug, span_names, targets};
use crate::registry::{CustomFunction, FunctionRegistry};
use crate::tree::{
    ComponentValue, FunctionNode, parse_comma_separated_list, parse_list, serialize,
};

use super::arguments::split_arguments;
use super::diagnostic::Diagnostic;
use super::invoke::invoke;
use super::matcher::FunctionMatcher;

/// Outcome of transforming one value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transformation {
    /// The new value, present only if it differs from the input.
    pub replacement: Option<String>,
    /// Problems found along the way.
    pub diagnostics: Vec<Diagnostic>,
}

impl Transformation {
    /// A transformation that leaves the value alone.
    pub fn unchanged() -> Self {
        Self::default()
    }

    /// Check if the value needs to be replaced.
    pub fn is_changed(&self) -> bool {
        self.replacement.is_some()
    }

    /// Write the replacement into `value`. Returns whether it changed.
    pub fn apply(&self, value: &mut String) -> bool {
        match &self.replacement {
            Some(replacement) => {
                value.clone_from(replacement);
                true
            }
            None => false,
        }
    }
}

/// Replace every registered custom function call in `value`.
///
/// Calls nested in other calls, simple blocks or list items are resolved too.
/// Nested calls are resolved before the call that contains them, so an outer
/// callback receives already substituted arguments. Callback output is
/// inserted as-is and is not searched for further calls.
///
/// Values that do not textually contain `name(` for any registered name are
/// returned unchanged without being parsed.
///
/// # Example
///
/// ```ignore
/// let registry = FunctionRegistry::new()
///     .with("--negative", |args| match args.first() {
///         Some(value) => Ok(format!("calc(-1 * {value})")),
///         None => Err("expected one argument".into()),
///     });
///
/// let result = transform_value("--negative( 10px )", &registry);
/// assert_eq!(result.replacement.as_deref(), Some("calc(-1 * 10px)"));
/// ```
pub fn transform_value(value: &str, registry: &FunctionRegistry) -> Transformation {
    let matcher = FunctionMatcher::new(registry);
    if !matcher.may_match(value) {
        tracing::trace!(target: targets::TRANSFORM, value, "no custom function referenced");
        return Transformation::unchanged();
    }

    let _span = tracing::debug_span!(target: targets::TRANSFORM, span_names::TRANSFORM_VALUE, value)
        .entered();

    let mut substitution = Substitution::new(matcher);
    let mut segments = vec![];

    for segment in parse_comma_separated_list(value) {
        match segment.nodes {
            Ok(nodes) => {
                if tracing::enabled!(target: targets::TRANSFORM, tracing::Level::TRACE) {
                    tracing::trace!(
                        target: targets::TRANSFORM,
                        "segment tree:\n{}",
                        ComponentTreeDebug::new().format_values(&nodes)
                    );
                }
                segments.push(serialize(&substitution.replace_all(nodes)));
            }
            Err(error) => {
                substitution.report(Error::Parse(error));
                segments.push(segment.source);
            }
        }
    }

    let modified = segments.join(",");
    let replacement = if modified == value {
        None
    } else {
        tracing::debug!(target: targets::TRANSFORM, from = value, to = %modified, "value rewritten");
        Some(modified)
    };

    Transformation {
        replacement,
        diagnostics: substitution.diagnostics,
    }
}

/// State of one transformation pass.
struct Substitution<'r> {
    matcher: FunctionMatcher<'r>,
    diagnostics: Vec<Diagnostic>,
}

impl<'r> Substitution<'r> {
    fn new(matcher: FunctionMatcher<'r>) -> Self {
        Self {
            matcher,
            diagnostics: vec![],
        }
    }

    /// Map a sequence of values to a new sequence with every registered call
    /// replaced. One call may expand to any number of siblings.
    fn replace_all(&mut self, values: Vec<ComponentValue>) -> Vec<ComponentValue> {
        let mut output = Vec::with_capacity(values.len());

        for value in values {
            match value {
                ComponentValue::Function(mut function) => {
                    function.value = self.replace_all(std::mem::take(&mut function.value));

                    let Some(callback) = self.matcher.match_function(&function) else {
                        output.push(ComponentValue::Function(function));
                        continue;
                    };

                    match self.call(&function, callback) {
                        Ok(replacement) => output.extend(replacement),
                        Err(error) => {
                            self.report(error);
                            output.push(ComponentValue::Function(function));
                        }
                    }
                }
                ComponentValue::Block(mut block) => {
                    block.value = self.replace_all(std::mem::take(&mut block.value));
                    output.push(ComponentValue::Block(block));
                }
                token => output.push(token),
            }
        }

        output
    }

    /// Resolve a single matched call into its replacement nodes.
    fn call(
        &self,
        function: &FunctionNode,
        callback: &CustomFunction,
    ) -> Result<Vec<ComponentValue>> {
        let args = split_arguments(function)?;
        let result = invoke(&function.name, callback, &args)?;
        let replacement =
            parse_list(&result).map_err(|error| Error::invalid_result(&function.name, error))?;

        tracing::debug!(
            target: targets::TRANSFORM,
            function = %function.name,
            result = %result,
            "custom function substituted"
        );
        Ok(replacement)
    }

    fn report(&mut self, error: Error) {
        tracing::warn!(
            target: targets::TRANSFORM,
            function = error.function().unwrap_or_default(),
            "{}",
            error
        );
        self.diagnostics.push(Diagnostic::from(error));
    }
}
