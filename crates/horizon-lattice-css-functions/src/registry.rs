//! Registry of user-defined functions.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Boxed error returned by a failing custom function.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Return type of a custom function callback.
pub type CustomFunctionResult = std::result::Result<String, BoxError>;

type Callback = dyn Fn(&[String]) -> CustomFunctionResult + Send + Sync;

/// A user-supplied function callback.
///
/// The callback receives the call's arguments in source order, each trimmed
/// of surrounding whitespace, and returns replacement CSS text.
#[derive(Clone)]
pub struct CustomFunction {
    callback: Arc<Callback>,
}

impl CustomFunction {
    /// Wrap a callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&[String]) -> CustomFunctionResult + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// Invoke the callback.
    pub fn call(&self, args: &[String]) -> CustomFunctionResult {
        (self.callback)(args)
    }
}

impl fmt::Debug for CustomFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomFunction").finish_non_exhaustive()
    }
}

/// Mapping from function name to callback.
///
/// Names are matched case-sensitively against the unescaped function name,
/// and conventionally look like custom properties (`--negative`). The
/// registry is immutable while values are being transformed and can be
/// shared across threads.
///
/// # Example
///
/// ```ignore
/// let registry = FunctionRegistry::new()
///     .with("--negative", |args| match args.first() {
///         Some(value) => Ok(format!("calc(-1 * {value})")),
///         None => Err("expected one argument".into()),
///     });
/// ```
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, CustomFunction>,
}

impl FunctionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration.
    pub fn with<F>(mut self, name: impl Into<String>, callback: F) -> Self
    where
        F: Fn(&[String]) -> CustomFunctionResult + Send + Sync + 'static,
    {
        self.register(name, callback);
        self
    }

    /// Register a function, returning the one it replaced.
    pub fn register<F>(&mut self, name: impl Into<String>, callback: F) -> Option<CustomFunction>
    where
        F: Fn(&[String]) -> CustomFunctionResult + Send + Sync + 'static,
    {
        self.functions
            .insert(name.into(), CustomFunction::new(callback))
    }

    /// Get a function by name.
    pub fn get(&self, name: &str) -> Option<&CustomFunction> {
        self.functions.get(name)
    }

    /// Check if a function is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Iterate over registered names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(|k| k.as_str())
    }

    /// Number of registered functions.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Check if no functions are registered.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("FunctionRegistry")
            .field("functions", &names)
            .finish()
    }
}
