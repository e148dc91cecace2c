//! Method dispatch, member access and class instantiation.
//!
//! Instances dispatch to their class's method table; every other receiver
//! goes to the built-in container methods.

use swiftly_ir::ClassDecl;

use super::Interpreter;
use crate::errors::{undefined_member, wrong_arg_count};
use crate::exec::member::get_member;
use crate::{dispatch_builtin_method, ClassValue, EvalResult, Heap, InstanceValue, Value};

impl Interpreter {
    /// `object.member` without a call.
    ///
    /// On an instance this reads a field or binds a method. On anything else
    /// it is a zero-argument built-in method call, so `xs.length` works.
    pub(super) fn eval_member_access(&mut self, object: &Value, member: &str) -> EvalResult {
        match object {
            Value::Instance(instance) => Ok(get_member(object, instance, member)?),
            _ => Ok(dispatch_builtin_method(object, member, Vec::new())?),
        }
    }

    /// `receiver.method(args)` with everything already evaluated.
    ///
    /// On an instance the class method wins; a callable stored in a field
    /// of that name is the fallback.
    pub(super) fn eval_method_call(
        &mut self,
        receiver: &Value,
        method: &str,
        args: Vec<Value>,
    ) -> EvalResult {
        let Value::Instance(instance) = receiver else {
            return Ok(dispatch_builtin_method(receiver, method, args)?);
        };
        // Release the borrow before running user code, which may write fields.
        let (class, field) = {
            let instance = instance.borrow();
            (instance.class.clone(), instance.field(method).cloned())
        };
        if let Some(func) = class.method(method) {
            return self.call_method(receiver.clone(), &class.name, func, args);
        }
        match field {
            Some(callee) => self.call_value(&callee, args),
            None => Err(undefined_member(&class.name, method).into()),
        }
    }

    /// Allocate an instance and run `init` on it, if the class has one.
    ///
    /// The result is always the instance; whatever `init` returns is
    /// discarded.
    #[tracing::instrument(level = "debug", skip_all, fields(class = %class.name))]
    pub fn instantiate(&mut self, class: &Heap<ClassValue>, args: Vec<Value>) -> EvalResult {
        let instance = Value::instance(InstanceValue::new(class.clone()));
        match class.method("init") {
            Some(init) => {
                self.call_method(instance.clone(), &class.name, init, args)?;
            }
            None if !args.is_empty() => {
                return Err(wrong_arg_count(&class.name, 0, args.len()).into());
            }
            None => {}
        }
        Ok(instance)
    }

    /// Register a class for `new` and bind it as a value in the current frame.
    pub fn declare_class(&mut self, decl: &ClassDecl) -> Value {
        let value = Value::class(ClassValue::from_decl(decl));
        if let Value::Class(class) = &value {
            self.classes.declare(class.clone());
        }
        self.env.declare(decl.name.as_str(), value.clone());
        value
    }
}
