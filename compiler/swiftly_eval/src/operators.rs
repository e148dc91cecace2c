//! Binary operator implementations for the evaluator.
//!
//! Provides direct enum-based dispatch for binary operations. The type set
//! is fixed (not user-extensible), so pattern matching is preferred over
//! trait objects.
//!
//! Both operands are already evaluated when these functions run: `and` and
//! `or` do not short-circuit, they only choose which operand to return.

use std::cmp::Ordering;

use swiftly_ir::BinaryOp;

use crate::errors::{division_by_zero, modulo_by_zero, unsupported_binary, EvalError};
use crate::Value;

/// Evaluate a binary operation using direct pattern matching.
pub fn evaluate_binary(left: Value, right: Value, op: BinaryOp) -> Result<Value, EvalError> {
    match op {
        BinaryOp::And => Ok(if left.is_truthy() { right } else { left }),
        BinaryOp::Or => Ok(if left.is_truthy() { left } else { right }),
        BinaryOp::Eq => Ok(Value::Bool(left == right)),
        BinaryOp::NotEq => Ok(Value::Bool(left != right)),
        op if op.is_comparison() => eval_ordering(&left, &right, op),
        BinaryOp::Add => eval_add(&left, &right),
        _ => eval_arithmetic(&left, &right, op),
    }
}

/// `+`: string concatenation when either side is a string, else numeric.
fn eval_add(left: &Value, right: &Value) -> Result<Value, EvalError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::Str(_), _) | (_, Value::Str(_)) => {
            let mut joined = left.display_value();
            joined.push_str(&right.display_value());
            Ok(Value::string(joined))
        }
        _ => Err(unsupported_binary(BinaryOp::Add.as_symbol(), left, right)),
    }
}

/// `-`, `*`, `/`, `%` on numbers.
fn eval_arithmetic(left: &Value, right: &Value, op: BinaryOp) -> Result<Value, EvalError> {
    let (Value::Number(a), Value::Number(b)) = (left, right) else {
        return Err(unsupported_binary(op.as_symbol(), left, right));
    };
    let (a, b) = (*a, *b);
    match op {
        BinaryOp::Sub => Ok(Value::Number(a - b)),
        BinaryOp::Mul => Ok(Value::Number(a * b)),
        BinaryOp::Div => {
            if b == 0.0 {
                Err(division_by_zero())
            } else {
                Ok(Value::Number(a / b))
            }
        }
        BinaryOp::Mod => {
            if b == 0.0 {
                Err(modulo_by_zero())
            } else {
                Ok(Value::Number(floored_mod(a, b)))
            }
        }
        _ => Err(unsupported_binary(op.as_symbol(), left, right)),
    }
}

/// Remainder with the sign of the divisor.
#[inline]
fn floored_mod(a: f64, b: f64) -> f64 {
    let r = a % b;
    if r != 0.0 && (r < 0.0) != (b < 0.0) {
        r + b
    } else {
        r
    }
}

/// `<`, `<=`, `>`, `>=` on number pairs and string pairs.
fn eval_ordering(left: &Value, right: &Value, op: BinaryOp) -> Result<Value, EvalError> {
    let ordering = match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::Str(a), Value::Str(b)) => Some(a.as_str().cmp(b.as_str())),
        _ => return Err(unsupported_binary(op.as_symbol(), left, right)),
    };
    // NaN compares false under every ordering operator
    let Some(ordering) = ordering else {
        return Ok(Value::Bool(false));
    };
    let result = match op {
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::LtEq => ordering != Ordering::Greater,
        BinaryOp::Gt => ordering == Ordering::Greater,
        BinaryOp::GtEq => ordering != Ordering::Less,
        _ => return Err(unsupported_binary(op.as_symbol(), left, right)),
    };
    Ok(Value::Bool(result))
}
