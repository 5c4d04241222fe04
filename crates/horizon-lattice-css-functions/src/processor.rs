//! Per-declaration processing.

use crate::declaration::{Declaration, Warning};
use crate::logging::targets;
use crate::registry::FunctionRegistry;
use crate::transform::{Transformation, transform_value};

/// Applies a [`FunctionRegistry`] to declarations and stylesheets.
///
/// The processor holds no mutable state, so one instance can be shared by
/// any number of threads processing different declarations.
#[derive(Debug, Clone, Default)]
pub struct CustomFunctionProcessor {
    registry: FunctionRegistry,
}

impl CustomFunctionProcessor {
    /// Create a processor for a registry.
    pub fn new(registry: FunctionRegistry) -> Self {
        Self { registry }
    }

    /// The registry in use.
    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Transform a raw value.
    pub fn transform(&self, value: &str) -> Transformation {
        transform_value(value, &self.registry)
    }

    /// Process one declaration.
    ///
    /// The value is replaced at most once, and only if the result differs.
    /// Every diagnostic is returned as a [`Warning`] attributed to the
    /// declaration.
    pub fn process_declaration(&self, declaration: &mut Declaration) -> Vec<Warning> {
        let transformation = self.transform(&declaration.value);

        let warnings = transformation
            .diagnostics
            .iter()
            .map(|diagnostic| Warning::new(declaration, diagnostic))
            .collect();

        if transformation.apply(&mut declaration.value) {
            tracing::debug!(
                target: targets::PROCESSOR,
                property = %declaration.property,
                value = %declaration.value,
                "declaration value replaced"
            );
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn processor() -> CustomFunctionProcessor {
        CustomFunctionProcessor::new(
            FunctionRegistry::new()
                .with("--negative", |args| Ok(format!("calc(-1 * {})", args[0])))
                .with("--error", |_| Err("custom function error".into())),
        )
    }

    #[test]
    fn process_declaration_replaces_value() {
        let mut declaration = Declaration::new("margin-top", "--negative(4px)");
        let warnings = processor().process_declaration(&mut declaration);

        assert!(warnings.is_empty());
        assert_eq!(declaration.value, "calc(-1 * 4px)");
    }

    #[test]
    fn process_declaration_attributes_warnings() {
        let mut declaration = Declaration::new("margin", "--error() --error()").at(2, 9);
        let warnings = processor().process_declaration(&mut declaration);

        assert_eq!(declaration.value, "--error() --error()");
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|w| w.property == "margin" && w.line == 2));
        assert!(warnings.iter().all(|w| w.message == "custom function error"));
    }

    #[test]
    fn empty_registry_changes_nothing() {
        let processor = CustomFunctionProcessor::default();
        let mut declaration = Declaration::new("color", "--negative(1px)");

        assert!(processor.process_declaration(&mut declaration).is_empty());
        assert_eq!(declaration.value, "--negative(1px)");
    }
}
