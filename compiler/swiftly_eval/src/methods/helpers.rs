//! Argument validation and shared utility functions.

use crate::errors::{unhashable, wrong_arg_count, EvalError};
use crate::Value;

/// Check that a method received exactly `expected` arguments.
#[inline]
pub fn require_args(method: &str, expected: usize, actual: usize) -> Result<(), EvalError> {
    if actual == expected {
        Ok(())
    } else {
        Err(wrong_arg_count(method, expected, actual))
    }
}

/// Require that a value can be a set element or mapping key.
#[inline]
pub fn require_hashable(value: &Value) -> Result<(), EvalError> {
    if value.is_hashable() {
        Ok(())
    } else {
        Err(unhashable(value))
    }
}

/// Convert a collection length to a number value.
#[inline]
#[allow(
    clippy::cast_precision_loss,
    reason = "collection lengths stay far below 2^53"
)]
pub fn len_to_value(len: usize) -> Value {
    Value::Number(len as f64)
}

/// Take the single argument of a one-argument method.
#[inline]
pub fn single_arg(method: &str, args: Vec<Value>) -> Result<Value, EvalError> {
    require_args(method, 1, args.len())?;
    args.into_iter()
        .next()
        .ok_or_else(|| wrong_arg_count(method, 1, 0))
}
