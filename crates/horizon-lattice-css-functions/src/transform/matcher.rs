//! Matching function nodes against the registry.

use crate::registry::{CustomFunction, FunctionRegistry};
use crate::tree::{ComponentValue, FunctionNode};

/// Looks up function nodes in a [`FunctionRegistry`].
#[derive(Debug, Clone, Copy)]
pub struct FunctionMatcher<'r> {
    registry: &'r FunctionRegistry,
}

impl<'r> FunctionMatcher<'r> {
    /// Create a matcher over a registry.
    pub fn new(registry: &'r FunctionRegistry) -> Self {
        Self { registry }
    }

    /// Textual pre-check: does `value` contain `name(` for any registered name?
    ///
    /// This may report false positives (a name inside a string literal or a
    /// comment) but never false negatives, so a `false` result means the
    /// value can be skipped without parsing.
    pub fn may_match(&self, value: &str) -> bool {
        self.registry.names().any(|name| {
            value
                .match_indices(name)
                .any(|(index, _)| value[index + name.len()..].starts_with('('))
        })
    }

    /// Get the callback registered for a function node's name.
    pub fn match_function(&self, function: &FunctionNode) -> Option<&'r CustomFunction> {
        self.registry.get(&function.name)
    }

    /// Get the callback for a node, if it is a call to a registered function.
    pub fn match_node(&self, node: &ComponentValue) -> Option<&'r CustomFunction> {
        node.as_function().and_then(|function| self.match_function(function))
    }
}
