//! Function call evaluation methods for the Interpreter.

use swiftly_ir::Node;

use super::Interpreter;
use crate::errors::{not_callable, undefined_variable};
use crate::exec::call::{bind_parameters, check_arg_count, split_receiver};
use crate::{ControlAction, EvalResult, FunctionValue, Value};

/// Name of the built-in output function. Resolved before any lookup, so a
/// user binding named `print` never shadows it.
const PRINT: &str = "print";

impl Interpreter {
    /// Evaluate `name(args)` with the arguments already evaluated.
    pub(super) fn eval_named_call(&mut self, name: &str, args: Vec<Value>) -> EvalResult {
        if name == PRINT {
            self.builtin_print(&args);
            return Ok(Value::Null);
        }
        let callee = self
            .env
            .lookup(name)
            .ok_or_else(|| undefined_variable(name))?;
        self.call_value(&callee, args)
    }

    /// Write the arguments' display forms, space-separated, as one line.
    fn builtin_print(&self, args: &[Value]) {
        let line = args
            .iter()
            .map(Value::display_value)
            .collect::<Vec<_>>()
            .join(" ");
        self.print_handler.println(&line);
    }

    /// Call any callable value.
    ///
    /// Functions take their arguments positionally, bound methods prepend
    /// their receiver, and classes instantiate.
    pub fn call_value(&mut self, callee: &Value, args: Vec<Value>) -> EvalResult {
        match callee {
            Value::Function(func) => self.call_function(func, args),
            Value::BoundMethod(bound) => {
                self.call_method(bound.receiver.clone(), &bound.class_name, &bound.method, args)
            }
            Value::Class(class) => self.instantiate(class, args),
            _ => Err(not_callable(callee).into()),
        }
    }

    /// Invoke a user function in a fresh frame.
    ///
    /// The result is the value of a `return`, or `null` if the body
    /// completes without one.
    #[tracing::instrument(level = "debug", skip_all, fields(function = func.name()))]
    pub(super) fn call_function(&mut self, func: &FunctionValue, args: Vec<Value>) -> EvalResult {
        check_arg_count(func.name(), func.params(), &args)?;
        self.invoke(
            func.name().to_string(),
            bind_parameters(func.params(), args),
            func.body(),
        )
    }

    /// Invoke a method with `receiver` bound to its first parameter.
    #[tracing::instrument(level = "debug", skip_all, fields(class = class_name, method = method.name()))]
    pub(super) fn call_method(
        &mut self,
        receiver: Value,
        class_name: &str,
        method: &FunctionValue,
        args: Vec<Value>,
    ) -> EvalResult {
        let (receiver_param, params) = split_receiver(class_name, method)?;
        let qualified = format!("{class_name}.{}", method.name());
        check_arg_count(&qualified, params, &args)?;
        let bindings =
            std::iter::once((receiver_param.clone(), receiver)).chain(bind_parameters(params, args));
        self.invoke(qualified, bindings, method.body())
    }

    /// Run a body as a call: one call-stack entry, one frame.
    ///
    /// `return` is discharged here. Errors leaving the call pick up a
    /// backtrace; raises pass through untouched.
    fn invoke<I>(&mut self, frame_name: String, bindings: I, body: &[Node]) -> EvalResult
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        self.call_stack.push(frame_name)?;
        let result = match self.with_bindings(bindings, |scoped| scoped.eval_block(body)) {
            Ok(_) => Ok(Value::Null),
            Err(ControlAction::Return(value)) => Ok(value),
            Err(ControlAction::Error(err)) => {
                Err(ControlAction::Error(self.call_stack.attach_backtrace(err)))
            }
            Err(raised @ ControlAction::Raise(_)) => Err(raised),
        };
        self.call_stack.pop();
        result
    }
}
