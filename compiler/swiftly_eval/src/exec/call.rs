//! Function call helpers: argument validation and parameter binding.

use crate::errors::{missing_receiver, wrong_arg_count};
use crate::{EvalError, FunctionValue, Value};

/// Check that `args` fills `params` exactly.
///
/// `name` is the callee as reported in the error.
pub fn check_arg_count(name: &str, params: &[String], args: &[Value]) -> Result<(), EvalError> {
    if params.len() != args.len() {
        return Err(wrong_arg_count(name, params.len(), args.len()));
    }
    Ok(())
}

/// Pair parameter names with argument values, in order.
///
/// Callers check the arity first.
pub fn bind_parameters<'p>(
    params: &'p [String],
    args: Vec<Value>,
) -> impl Iterator<Item = (String, Value)> + 'p {
    params.iter().cloned().zip(args)
}

/// Split a method's parameters into the receiver slot and the rest.
///
/// A method declared without parameters cannot take its receiver.
pub fn split_receiver<'f>(
    class_name: &str,
    method: &'f FunctionValue,
) -> Result<(&'f String, &'f [String]), EvalError> {
    method
        .params()
        .split_first()
        .ok_or_else(|| missing_receiver(class_name, method.name()))
}
