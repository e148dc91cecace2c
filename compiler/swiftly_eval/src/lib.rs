//! Swiftly Eval - tree-walking evaluator for the Swiftly scripting language.
//!
//! # Architecture
//!
//! The evaluator uses:
//! - `Environment`: variable frames, with every call frame parented to the global frame
//! - `evaluate_binary` / `evaluate_unary`: direct enum-based operator dispatch
//! - `dispatch_builtin_method`: capability-table dispatch for container methods
//! - `ClassRegistry`: classes by name, for instantiation
//! - `ControlAction`: `return`, `raise` and runtime errors as the `Err` arm of `EvalResult`
//!
//! Programs arrive as `swiftly_ir::Program` trees; decode them with
//! `swiftly_ir::parse_program` and hand them to [`Interpreter::run`].

mod class_registry;
mod diagnostics;
mod environment;
pub mod errors;
pub mod exec;
pub mod interpreter;
mod methods;
mod operators;
mod print_handler;
mod stack;
mod unary_operators;
mod value;

pub use value::{
    BoundMethodValue, ClassValue, FunctionValue, Heap, InstanceValue, MapValue, SetValue, Shared,
    Value,
};

pub use errors::{ControlAction, EvalBacktrace, EvalError, EvalErrorKind, EvalResult};

pub use class_registry::ClassRegistry;
pub use diagnostics::CallStack;
pub use environment::{AssignError, Environment, LocalScope, Scope};
pub use interpreter::{Interpreter, InterpreterBuilder, ScopedInterpreter, DEFAULT_MAX_CALL_DEPTH};
pub use methods::{dispatch_builtin_method, EVAL_BUILTIN_METHODS};
pub use operators::evaluate_binary;
pub use print_handler::{
    buffer_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl, SharedPrintHandler,
    StdoutPrintHandler,
};
pub use unary_operators::evaluate_unary;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for evaluator diagnostics.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=swiftly_eval=debug` or `RUST_LOG=swiftly_eval=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "test code: failures should panic")]
mod tests;
