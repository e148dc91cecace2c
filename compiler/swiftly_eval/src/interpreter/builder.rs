//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use super::{Interpreter, DEFAULT_MAX_CALL_DEPTH};
use crate::class_registry::ClassRegistry;
use crate::diagnostics::CallStack;
use crate::{stdout_handler, Environment, SharedPrintHandler};

/// Builder for creating Interpreter instances with various configurations.
pub struct InterpreterBuilder {
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: usize,
}

impl InterpreterBuilder {
    /// Create a new builder: stdout output, default call depth limit.
    pub fn new() -> Self {
        Self {
            print_handler: None,
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }

    /// Set the destination of the built-in `print`.
    ///
    /// Use `buffer_handler()` to capture output.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Limit on nested user calls before `RecursionLimit` is reported.
    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    pub fn build(self) -> Interpreter {
        Interpreter {
            env: Environment::new(),
            classes: ClassRegistry::new(),
            call_stack: CallStack::new(self.max_call_depth),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
        }
    }
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
