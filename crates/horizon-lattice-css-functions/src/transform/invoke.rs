//! Invoking custom function callbacks.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::error::{Error, Result};
use crate::logging::targets;
use crate::registry::CustomFunction;

/// Call `function` with `args`.
///
/// A failing callback becomes [`Error::Callback`] carrying the callback's
/// message, so one failing call never affects the rest of the value. A
/// panicking callback is reported the same way, using the panic message.
pub fn invoke(name: &str, function: &CustomFunction, args: &[String]) -> Result<String> {
    tracing::trace!(target: targets::INVOKE, function = name, ?args, "invoking custom function");

    match panic::catch_unwind(AssertUnwindSafe(|| function.call(args))) {
        Ok(result) => result.map_err(|error| Error::callback(name, error.to_string())),
        Err(payload) => Err(Error::callback(name, panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "custom function panicked".to_string()
    }
}
