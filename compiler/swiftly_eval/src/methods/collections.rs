//! Method dispatch for container types (sequence, set, mapping).
//!
//! Arity and capability are checked by the caller; each function here
//! only implements the behavior. Mutating methods return `null`.

use crate::errors::{empty_sequence, no_such_method, EvalError};
use crate::value::{MapValue, SetValue, Shared};
use crate::Value;

use super::helpers::{len_to_value, require_hashable, single_arg};
use super::{BuiltinMethod, ContainerKind};

#[cold]
fn unsupported(kind: ContainerKind, method: &str) -> EvalError {
    no_such_method(kind.name(), method)
}

/// Dispatch methods on sequence values.
pub fn dispatch_sequence_method(
    items: &Shared<Vec<Value>>,
    builtin: BuiltinMethod,
    method: &str,
    args: Vec<Value>,
) -> Result<Value, EvalError> {
    match builtin {
        BuiltinMethod::Size => Ok(len_to_value(items.borrow().len())),
        BuiltinMethod::IsEmpty => Ok(Value::Bool(items.borrow().is_empty())),
        BuiltinMethod::Contains => {
            let needle = single_arg(method, args)?;
            Ok(Value::Bool(items.borrow().contains(&needle)))
        }
        BuiltinMethod::Push => {
            let value = single_arg(method, args)?;
            items.borrow_mut().push(value);
            Ok(Value::Null)
        }
        BuiltinMethod::Pop => items.borrow_mut().pop().ok_or_else(|| empty_sequence(method)),
        BuiltinMethod::First => Ok(items.borrow().first().cloned().unwrap_or(Value::Null)),
        BuiltinMethod::Last => Ok(items.borrow().last().cloned().unwrap_or(Value::Null)),
        BuiltinMethod::Clear => {
            items.borrow_mut().clear();
            Ok(Value::Null)
        }
        _ => Err(unsupported(ContainerKind::Sequence, method)),
    }
}

/// Dispatch methods on set values.
pub fn dispatch_set_method(
    items: &Shared<SetValue>,
    builtin: BuiltinMethod,
    method: &str,
    args: Vec<Value>,
) -> Result<Value, EvalError> {
    match builtin {
        BuiltinMethod::Size => Ok(len_to_value(items.borrow().len())),
        BuiltinMethod::IsEmpty => Ok(Value::Bool(items.borrow().is_empty())),
        BuiltinMethod::Contains => {
            let needle = single_arg(method, args)?;
            require_hashable(&needle)?;
            Ok(Value::Bool(items.borrow().contains(&needle)))
        }
        BuiltinMethod::Add => {
            let value = single_arg(method, args)?;
            require_hashable(&value)?;
            items.borrow_mut().insert(value);
            Ok(Value::Null)
        }
        BuiltinMethod::Remove => {
            let value = single_arg(method, args)?;
            require_hashable(&value)?;
            items.borrow_mut().remove(&value);
            Ok(Value::Null)
        }
        BuiltinMethod::Clear => {
            items.borrow_mut().clear();
            Ok(Value::Null)
        }
        _ => Err(unsupported(ContainerKind::Set, method)),
    }
}

/// Dispatch methods on mapping values.
pub fn dispatch_mapping_method(
    entries: &Shared<MapValue>,
    builtin: BuiltinMethod,
    method: &str,
    args: Vec<Value>,
) -> Result<Value, EvalError> {
    match builtin {
        BuiltinMethod::Size => Ok(len_to_value(entries.borrow().len())),
        BuiltinMethod::IsEmpty => Ok(Value::Bool(entries.borrow().is_empty())),
        BuiltinMethod::Keys => Ok(Value::sequence(entries.borrow().keys().cloned().collect())),
        BuiltinMethod::Values => Ok(Value::sequence(
            entries.borrow().values().cloned().collect(),
        )),
        BuiltinMethod::Items => {
            let pairs = entries
                .borrow()
                .iter()
                .map(|(k, v)| Value::sequence(vec![k.clone(), v.clone()]))
                .collect();
            Ok(Value::sequence(pairs))
        }
        BuiltinMethod::Get => {
            let key = single_arg(method, args)?;
            require_hashable(&key)?;
            Ok(entries.borrow().get(&key).cloned().unwrap_or(Value::Null))
        }
        BuiltinMethod::HasKey => {
            let key = single_arg(method, args)?;
            require_hashable(&key)?;
            Ok(Value::Bool(entries.borrow().contains_key(&key)))
        }
        _ => Err(unsupported(ContainerKind::Mapping, method)),
    }
}
