//! RAII-style call frames for the interpreter.
//!
//! The [`ScopedInterpreter`] guard pushes a frame when created and pops it
//! when dropped, including during unwinding and on early `?` returns. Every
//! signal that leaves a call (`return`, `raise`, errors) therefore leaves
//! the frame stack balanced.
//!
//! The guard holds `&mut Interpreter` and implements `Deref`/`DerefMut`, so
//! evaluation code uses it exactly like the interpreter itself.
//!
//! ```text
//! interpreter.with_bindings(params.zip(args), |scoped| scoped.eval_block(body))
//! ```

use std::ops::{Deref, DerefMut};

use super::Interpreter;
use crate::Value;

/// RAII guard that pops the current call frame on drop.
pub struct ScopedInterpreter<'guard> {
    interpreter: &'guard mut Interpreter,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        self.interpreter.env.pop_frame();
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Push a fresh call frame and return a guard that pops it on drop.
    ///
    /// The new frame's parent is the global frame, never the caller's frame.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_> {
        self.env.push_frame();
        ScopedInterpreter { interpreter: self }
    }

    /// Run `f` inside a fresh call frame.
    pub fn with_env_scope<T, F>(&mut self, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
    {
        let mut scoped = self.scoped();
        f(&mut scoped)
    }

    /// Run `f` inside a fresh call frame pre-populated with `bindings`.
    pub fn with_bindings<T, F, I>(&mut self, bindings: I, f: F) -> T
    where
        F: FnOnce(&mut ScopedInterpreter<'_>) -> T,
        I: IntoIterator<Item = (String, Value)>,
    {
        self.with_env_scope(|scoped| {
            for (name, value) in bindings {
                scoped.env.declare(name, value);
            }
            f(scoped)
        })
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::items_after_statements,
    reason = "test code: relaxed style for readability"
)]
mod tests;
