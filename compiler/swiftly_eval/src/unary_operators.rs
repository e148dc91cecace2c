//! Unary operator implementations for the evaluator.

use swiftly_ir::UnaryOp;

use crate::errors::{unsupported_unary, EvalError};
use crate::Value;

/// Evaluate a unary operation using direct pattern matching.
pub fn evaluate_unary(operand: &Value, op: UnaryOp) -> Result<Value, EvalError> {
    match op {
        UnaryOp::Not => Ok(Value::Bool(!operand.is_truthy())),
        UnaryOp::Neg => match operand {
            Value::Number(n) => Ok(Value::Number(-n)),
            _ => Err(unsupported_unary(op.as_symbol(), operand)),
        },
    }
}
