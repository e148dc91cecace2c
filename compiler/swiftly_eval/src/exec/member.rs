//! Instance member access.
//!
//! Fields live on the instance and are created by assignment; methods live
//! on the class. On read, a field shadows a method of the same name.

use crate::errors::{invalid_assignment_target, undefined_member};
use crate::{BoundMethodValue, EvalError, InstanceValue, Shared, Value};

/// Read `name` from an instance: its field, else a method bound to it.
///
/// `receiver` is the instance as a `Value`, captured by the bound method.
pub fn get_member(
    receiver: &Value,
    instance: &Shared<InstanceValue>,
    name: &str,
) -> Result<Value, EvalError> {
    let instance = instance.borrow();
    if let Some(field) = instance.field(name) {
        return Ok(field.clone());
    }
    match instance.class.method(name) {
        Some(method) => Ok(Value::bound_method(BoundMethodValue {
            receiver: receiver.clone(),
            class_name: instance.class.name.clone(),
            method: method.clone(),
        })),
        None => Err(undefined_member(instance.class_name(), name)),
    }
}

/// Write a field on an instance, creating it if new.
///
/// Any other target fails with `InvalidAssignmentTarget`.
pub fn set_member(target: &Value, field: &str, value: Value) -> Result<(), EvalError> {
    match target {
        Value::Instance(instance) => {
            instance.borrow_mut().set_field(field, value);
            Ok(())
        }
        _ => Err(invalid_assignment_target(target, field)),
    }
}
