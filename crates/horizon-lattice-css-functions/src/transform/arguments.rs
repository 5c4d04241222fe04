//! Splitting a call's arguments at top-level commas.

use crate::error::{Error, Result};
use crate::tree::{ComponentValue, FunctionNode, serialize};

/// Split a function call's content into argument strings.
///
/// Commas that are direct children of the call separate arguments; commas
/// nested in inner functions or blocks belong to those nodes. Each argument
/// is trimmed of surrounding whitespace and serialized as written.
///
/// A call with no content, or with only whitespace, has zero arguments. An
/// argument that is empty after trimming (`--f(,)`, `--f(a, )`) makes the
/// whole call malformed.
pub fn split_arguments(function: &FunctionNode) -> Result<Vec<String>> {
    let values = function.value.as_slice();
    if values.iter().all(ComponentValue::is_whitespace) {
        return Ok(vec![]);
    }

    values
        .split(ComponentValue::is_comma)
        .map(|segment| {
            let trimmed = trim_whitespace(segment);
            if trimmed.is_empty() {
                Err(Error::empty_argument(&function.name))
            } else {
                Ok(serialize(trimmed))
            }
        })
        .collect()
}

/// Strip leading and trailing whitespace nodes.
fn trim_whitespace(values: &[ComponentValue]) -> &[ComponentValue] {
    let start = values
        .iter()
        .position(|value| !value.is_whitespace())
        .unwrap_or(values.len());
    let end = values
        .iter()
        .rposition(|value| !value.is_whitespace())
        .map_or(start, |index| index + 1);
    &values[start..end]
}
