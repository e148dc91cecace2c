//! Error types and control-flow signals for the evaluator.
//!
//! # Structured Error Categories
//!
//! `EvalErrorKind` is the typed category of a built-in runtime error.
//! Factory functions (e.g. `undefined_variable()`) are the only
//! constructors used by the evaluator; they populate both `kind` and
//! `message`.
//!
//! # Control Flow
//!
//! `return` and `raise` are not errors, but they unwind the same way.
//! They travel as the `Err` arm of `EvalResult` inside `ControlAction`
//! and are discharged at call boundaries (`Return`) or `try` boundaries
//! (`Raise` and `Error`).

use std::fmt;

use crate::Value;

/// Result of evaluating a node.
pub type EvalResult = Result<Value, ControlAction>;

/// Typed error category.
///
/// The `Display` impl produces the user-facing message; it is also the
/// string bound to the error variable when a `try` catches the error.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    // Access
    #[error("undefined variable '{name}'")]
    UndefinedVariable { name: String },
    #[error("'{type_name}' has no member '{member}'")]
    UndefinedMember { type_name: String, member: String },
    #[error("class '{name}' is not defined")]
    ClassNotFound { name: String },

    // Operators
    #[error("unsupported operand type(s) for {op}: {operands}")]
    UnsupportedOperation { op: String, operands: String },
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,

    // Built-in methods
    #[error("'{type_name}' has no method '{method}'")]
    UnsupportedMethod { type_name: String, method: String },
    #[error("{method} from empty sequence")]
    EmptySequence { method: String },
    #[error("unhashable type: '{type_name}'")]
    Unhashable { type_name: String },

    // Assignment
    #[error("cannot assign field '{field}' on a value of type '{type_name}'")]
    InvalidAssignmentTarget { type_name: String, field: String },

    // Calls
    #[error("'{name}' expects {expected} argument(s), got {got}")]
    ArityMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
    #[error("'{type_name}' is not callable")]
    NotCallable { type_name: String },
    #[error("expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },
    #[error("maximum recursion depth of {depth} exceeded")]
    RecursionLimit { depth: usize },

    // Program
    #[error("uncaught raise: {value}")]
    Uncaught { value: String },
}

/// Names of the user calls active when an error first crossed a call
/// boundary, most recent first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalBacktrace {
    frames: Vec<String>,
}

impl EvalBacktrace {
    pub fn new(frames: Vec<String>) -> Self {
        Self { frames }
    }

    pub fn frames(&self) -> &[String] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl fmt::Display for EvalBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.frames.is_empty() {
            return Ok(());
        }
        writeln!(f, "stack backtrace:")?;
        for (i, frame) in self.frames.iter().enumerate() {
            writeln!(f, "  {i}: {frame}")?;
        }
        Ok(())
    }
}

/// A built-in runtime error.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()`.
    pub message: String,
    /// Call stack at the point the error left its innermost user call.
    pub backtrace: Option<EvalBacktrace>,
}

impl EvalError {
    /// Create an error from a structured kind.
    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            backtrace: None,
        }
    }

    /// Attach a backtrace to this error.
    #[must_use]
    pub fn with_backtrace(mut self, backtrace: EvalBacktrace) -> Self {
        self.backtrace = Some(backtrace);
        self
    }
}

/// Non-normal completion of a node.
///
/// `Return` unwinds to the nearest call boundary. `Raise` (a user `raise`
/// of any value) and `Error` (a built-in runtime error) unwind to the
/// nearest `try` or out of the program.
#[derive(Clone, Debug, PartialEq)]
pub enum ControlAction {
    Return(Value),
    Raise(Value),
    Error(EvalError),
}

impl ControlAction {
    /// Resolve a signal that reached the top of the program.
    ///
    /// A top-level `return` ends the program with its value; an escaped
    /// `raise` becomes `Uncaught`.
    pub fn into_program_result(self) -> Result<Value, EvalError> {
        match self {
            ControlAction::Return(value) => Ok(value),
            ControlAction::Raise(value) => Err(uncaught(&value)),
            ControlAction::Error(err) => Err(err),
        }
    }
}

impl From<EvalError> for ControlAction {
    #[inline]
    fn from(err: EvalError) -> Self {
        ControlAction::Error(err)
    }
}

// Access Errors

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_member(type_name: &str, member: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedMember {
        type_name: type_name.to_string(),
        member: member.to_string(),
    })
}

#[cold]
pub fn class_not_found(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ClassNotFound {
        name: name.to_string(),
    })
}

// Operator Errors

/// Binary operator applied to operand kinds it does not support.
#[cold]
pub fn unsupported_binary(op: &str, left: &Value, right: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedOperation {
        op: op.to_string(),
        operands: format!("'{}' and '{}'", left.type_name(), right.type_name()),
    })
}

/// Unary operator (or `for` iteration) applied to an unsupported kind.
#[cold]
pub fn unsupported_unary(op: &str, operand: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedOperation {
        op: op.to_string(),
        operands: format!("'{}'", operand.type_name()),
    })
}

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

// Built-in Method Errors

#[cold]
pub fn no_such_method(type_name: &str, method: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedMethod {
        type_name: type_name.to_string(),
        method: method.to_string(),
    })
}

#[cold]
pub fn empty_sequence(method: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::EmptySequence {
        method: method.to_string(),
    })
}

#[cold]
pub fn unhashable(value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Unhashable {
        type_name: value.type_name().to_string(),
    })
}

// Assignment Errors

#[cold]
pub fn invalid_assignment_target(target: &Value, field: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidAssignmentTarget {
        type_name: target.type_name().to_string(),
        field: field.to_string(),
    })
}

// Call Errors

#[cold]
pub fn wrong_arg_count(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn not_callable(value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable {
        type_name: value.type_name().to_string(),
    })
}

/// A method declared without a receiver parameter was invoked on an instance.
#[cold]
pub fn missing_receiver(class_name: &str, method: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: "a receiver parameter".to_string(),
        got: format!("'{class_name}.{method}' with no parameters"),
    })
}

#[cold]
pub fn recursion_limit_exceeded(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { depth })
}

// Program Errors

#[cold]
pub fn uncaught(value: &Value) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Uncaught {
        value: value.display_value(),
    })
}
