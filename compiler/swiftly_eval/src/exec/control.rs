//! Control flow helpers: loop iteration and `try` handling.

use crate::errors::unsupported_unary;
use crate::{ControlAction, EvalError, Value};

/// Items a `for` loop visits, copied out before the body runs.
///
/// Sequences and sets yield their elements, mappings their keys, strings
/// their characters. Mutating the container inside the loop body does not
/// change the iteration.
pub fn iteration_snapshot(iterable: &Value) -> Result<Vec<Value>, EvalError> {
    match iterable {
        Value::Sequence(items) => Ok(items.borrow().clone()),
        Value::Set(set) => Ok(set.borrow().iter().cloned().collect()),
        Value::Mapping(map) => Ok(map.borrow().keys().cloned().collect()),
        Value::Str(s) => Ok(s.chars().map(|c| Value::string(c.to_string())).collect()),
        _ => Err(unsupported_unary("for", iterable)),
    }
}

/// Text bound to a `try` block's error variable.
///
/// A raised value is stringified; a built-in error yields its message.
/// `Return` is not caught and is handed back unchanged.
pub fn caught_error_text(action: ControlAction) -> Result<String, ControlAction> {
    match action {
        ControlAction::Raise(value) => Ok(value.display_value()),
        ControlAction::Error(err) => Ok(err.message),
        ControlAction::Return(_) => Err(action),
    }
}

