//! Tree-walking interpreter for Swiftly.
//!
//! # Architecture
//!
//! `eval(&Node)` dispatches on the node kind and recurses into children.
//! Every node yields an `EvalResult`: `Ok(value)` for normal completion,
//! `Err(ControlAction)` for `return`, `raise` and runtime errors. A
//! statement sequence stops at the first `Err` and hands it upward.
//!
//! Helper modules:
//!
//! - `function_call` - bare calls, `print`, invoking functions and bound methods
//! - `method_dispatch` - method calls, instantiation, class declaration
//! - `scope_guard` - RAII call frames
//! - `crate::exec` - shared helpers for calls, members and control flow
//!
//! # State
//!
//! The global frame and the class registry live here, owned by the
//! interpreter, not in process-wide singletons. Two interpreters never
//! share state.

mod builder;
mod function_call;
mod method_dispatch;
mod scope_guard;

pub use builder::InterpreterBuilder;
pub use scope_guard::ScopedInterpreter;

use std::rc::Rc;

use swiftly_ir::{AssignTarget, Node, Program, TryBlock};

use crate::class_registry::ClassRegistry;
use crate::diagnostics::CallStack;
use crate::errors::{class_not_found, undefined_variable, ControlAction, EvalError, EvalResult};
use crate::exec::control::{caught_error_text, iteration_snapshot};
use crate::exec::member::set_member;
use crate::methods::require_hashable;
use crate::print_handler::SharedPrintHandler;
use crate::stack::ensure_sufficient_stack;
use crate::value::{FunctionValue, MapValue, SetValue};
use crate::{evaluate_binary, evaluate_unary, AssignError, Environment, Value};

/// Default limit on nested user calls.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;

/// Tree-walking interpreter: global frame, class registry, call stack and
/// output destination.
pub struct Interpreter {
    /// Variable frames.
    pub(crate) env: Environment,
    /// Declared classes, for `new`.
    pub(crate) classes: ClassRegistry,
    /// Active user calls, for the recursion limit and backtraces.
    pub(crate) call_stack: CallStack,
    /// Destination of the built-in `print`.
    pub(crate) print_handler: SharedPrintHandler,
}

impl Interpreter {
    /// Create a new interpreter that prints to stdout.
    ///
    /// For more configuration options, use `Interpreter::builder()`.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    /// Create an interpreter builder for more configuration options.
    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Run a whole program.
    ///
    /// Returns the value of the last top-level statement, or the value of a
    /// top-level `return`, which ends the program early. A `raise` that no
    /// `try` catches becomes an `Uncaught` error.
    #[tracing::instrument(level = "debug", skip_all, fields(statements = program.items.len()))]
    pub fn run(&mut self, program: &Program) -> Result<Value, EvalError> {
        let result = self
            .eval_block(&program.items)
            .or_else(ControlAction::into_program_result);
        if let Err(err) = &result {
            tracing::debug!(error = %err, "program terminated");
        }
        result
    }

    /// Evaluate a statement sequence in the current frame.
    ///
    /// Completes with the value of the last statement (`null` when empty).
    /// The first non-normal signal stops the sequence and propagates.
    pub fn eval_block(&mut self, nodes: &[Node]) -> EvalResult {
        let mut last = Value::Null;
        for node in nodes {
            last = self.eval(node)?;
        }
        Ok(last)
    }

    /// Evaluate a single node.
    pub fn eval(&mut self, node: &Node) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(node))
    }

    fn eval_inner(&mut self, node: &Node) -> EvalResult {
        match node {
            // Literals
            Node::Number(n) => Ok(Value::Number(*n)),
            Node::Str(s) => Ok(Value::string(s.as_str())),
            Node::Bool(b) => Ok(Value::Bool(*b)),
            Node::Null => Ok(Value::Null),

            Node::Ident(name) => self
                .env
                .lookup(name)
                .ok_or_else(|| undefined_variable(name).into()),

            // Bindings
            Node::Let { name, value } => {
                let value = self.eval(value)?;
                self.env.declare(name.as_str(), value);
                Ok(Value::Null)
            }
            Node::Assign { target, value } => self.eval_assign(target, value),

            // Operators
            Node::Binary { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Ok(evaluate_binary(left, right, *op)?)
            }
            Node::Unary { op, operand } => {
                let operand = self.eval(operand)?;
                Ok(evaluate_unary(&operand, *op)?)
            }

            // Container literals
            Node::Sequence(elements) => Ok(Value::sequence(self.eval_args(elements)?)),
            Node::Set(elements) => self.eval_set_literal(elements),
            Node::Mapping(pairs) => self.eval_mapping_literal(pairs),

            // Access and calls
            Node::Member { object, member } => {
                let object = self.eval(object)?;
                self.eval_member_access(&object, member)
            }
            Node::MethodCall {
                object,
                method,
                args,
            } => {
                let receiver = self.eval(object)?;
                let args = self.eval_args(args)?;
                self.eval_method_call(&receiver, method, args)
            }
            Node::Call { callee, args } => {
                let args = self.eval_args(args)?;
                self.eval_named_call(callee, args)
            }
            Node::New { class_name, args } => {
                let class = self
                    .classes
                    .lookup(class_name)
                    .ok_or_else(|| class_not_found(class_name))?;
                let args = self.eval_args(args)?;
                self.instantiate(&class, args)
            }

            // Declarations
            Node::Function(decl) => {
                let func = FunctionValue::new(Rc::clone(decl));
                self.env.declare(decl.name.as_str(), Value::function(func));
                Ok(Value::Null)
            }
            Node::Class(decl) => {
                self.declare_class(decl);
                Ok(Value::Null)
            }

            // Control flow
            Node::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.eval(condition)?.is_truthy() {
                    self.eval_block(then_branch)?;
                } else if let Some(else_branch) = else_branch {
                    self.eval_block(else_branch)?;
                }
                Ok(Value::Null)
            }
            Node::While { condition, body } => {
                while self.eval(condition)?.is_truthy() {
                    self.eval_block(body)?;
                }
                Ok(Value::Null)
            }
            Node::For {
                var,
                iterable,
                body,
            } => self.eval_for(var, iterable, body),
            Node::Return(value) => {
                let value = match value {
                    Some(value) => self.eval(value)?,
                    None => Value::Null,
                };
                Err(ControlAction::Return(value))
            }
            Node::Raise(value) => {
                let value = self.eval(value)?;
                Err(ControlAction::Raise(value))
            }
            Node::Try(block) => self.eval_try(block),
        }
    }

    /// Evaluate arguments (or elements) left to right.
    fn eval_args(&mut self, nodes: &[Node]) -> Result<Vec<Value>, ControlAction> {
        nodes.iter().map(|node| self.eval(node)).collect()
    }

    fn eval_set_literal(&mut self, elements: &[Node]) -> EvalResult {
        let mut set = SetValue::new();
        for element in elements {
            let value = self.eval(element)?;
            require_hashable(&value)?;
            set.insert(value);
        }
        Ok(Value::set(set))
    }

    fn eval_mapping_literal(&mut self, pairs: &[(Node, Node)]) -> EvalResult {
        let mut map = MapValue::new();
        for (key, value) in pairs {
            let key = self.eval(key)?;
            require_hashable(&key)?;
            let value = self.eval(value)?;
            map.insert(key, value);
        }
        Ok(Value::mapping(map))
    }

    /// `name = value` or `object.field = value`.
    ///
    /// The value is evaluated before the target object.
    fn eval_assign(&mut self, target: &AssignTarget, value: &Node) -> EvalResult {
        let value = self.eval(value)?;
        match target {
            AssignTarget::Name(name) => self
                .env
                .assign(name, value)
                .map_err(|AssignError::Undefined| undefined_variable(name))?,
            AssignTarget::Member { object, field } => {
                let object = self.eval(object)?;
                set_member(&object, field, value)?;
            }
        }
        Ok(Value::Null)
    }

    /// `for var in iterable`: iterates a snapshot taken before the body runs.
    fn eval_for(&mut self, var: &str, iterable: &Node, body: &[Node]) -> EvalResult {
        let iterable = self.eval(iterable)?;
        for item in iteration_snapshot(&iterable)? {
            self.env.declare(var, item);
            self.eval_block(body)?;
        }
        Ok(Value::Null)
    }

    /// `try` / `except`: always completes normally unless the handler itself
    /// raises or a `return` passes through.
    fn eval_try(&mut self, block: &TryBlock) -> EvalResult {
        let Err(action) = self.eval_block(&block.body) else {
            return Ok(Value::Null);
        };
        let text = caught_error_text(action)?;
        tracing::debug!(error = %text, "try caught");
        if let Some(var) = &block.error_var {
            self.env.declare(var.as_str(), Value::string(text));
        }
        if let Some(handler) = &block.handler {
            self.eval_block(handler)?;
        }
        Ok(Value::Null)
    }

    /// Get a reference to the environment.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Get a mutable reference to the environment.
    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    /// Get the class registry.
    pub fn classes(&self) -> &ClassRegistry {
        &self.classes
    }

    /// Get the print handler.
    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Number of user calls currently active.
    pub fn call_depth(&self) -> usize {
        self.call_stack.depth()
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
