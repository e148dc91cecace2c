//! Environment for variable scoping in the interpreter.
//!
//! A stack of call frames over a single global frame. Each call frame's
//! parent is the global frame, never the caller's frame: functions have no
//! lexical closures, and declarations only happen at global or call-local
//! scope. Lookups and assignments walk the parent chain; declarations are
//! always frame-local.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::Value;

/// Error returned by `Scope::assign` when no frame binds the name.
///
/// Assignment never creates a binding; the caller turns this into an
/// `UndefinedVariable` error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// Variable not found in any frame.
    Undefined,
}

/// A single-threaded wrapper for reference-counted interior mutability.
///
/// All frame allocations go through `LocalScope::new()`. Not thread-safe:
/// the interpreter runs single-threaded.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    /// Create a new `LocalScope` wrapping the given value.
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    /// Borrow the inner value immutably.
    #[inline]
    pub fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    /// Borrow the inner value mutably.
    #[inline]
    pub fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T: Default> Default for LocalScope<T> {
    fn default() -> Self {
        LocalScope::new(T::default())
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A single frame of variable bindings.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<String, Value>,
    /// Parent frame: the global frame for call frames, `None` for the global frame.
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    /// Create a new empty scope with no parent.
    pub fn new() -> Self {
        Scope::default()
    }

    /// Create a new scope with a parent.
    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Bind a name in this scope, replacing a same-scope binding.
    #[inline]
    pub fn declare(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Look up a name, walking outward.
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        if let Some(parent) = &self.parent {
            return parent.borrow().lookup(name);
        }
        None
    }

    /// Mutate the nearest existing binding of `name`.
    #[inline]
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), AssignError> {
        if let Some(slot) = self.bindings.get_mut(name) {
            *slot = value;
            return Ok(());
        }
        if let Some(parent) = &self.parent {
            return parent.borrow_mut().assign(name, value);
        }
        Err(AssignError::Undefined)
    }
}

/// Environment for the interpreter using a frame stack.
///
/// Frames are pushed and popped by the interpreter's scope guard; the
/// global frame is never popped.
pub struct Environment {
    /// Stack of frames, with the current frame at the top.
    frames: Vec<LocalScope<Scope>>,
    /// Global frame (always at the bottom).
    global: LocalScope<Scope>,
}

impl Environment {
    /// Create a new environment with only the global frame.
    pub fn new() -> Self {
        let global = LocalScope::new(Scope::new());
        Environment {
            frames: vec![global.clone()],
            global,
        }
    }

    /// Number of frames, including the global frame.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Push a call frame whose parent is the global frame.
    #[inline]
    pub fn push_frame(&mut self) {
        let frame = LocalScope::new(Scope::with_parent(self.global.clone()));
        self.frames.push(frame);
        tracing::trace!(depth = self.frames.len(), "push frame");
    }

    /// Pop the current call frame. The global frame is never popped.
    #[inline]
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
            tracing::trace!(depth = self.frames.len(), "pop frame");
        }
    }

    #[inline]
    fn current_frame(&self) -> &LocalScope<Scope> {
        self.frames.last().unwrap_or(&self.global)
    }

    /// Bind a name in the current frame, shadowing outer bindings.
    #[inline]
    pub fn declare(&mut self, name: impl Into<String>, value: Value) {
        self.current_frame().borrow_mut().declare(name, value);
    }

    /// Look up a name from the current frame outward.
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.current_frame().borrow().lookup(name)
    }

    /// Mutate the nearest existing binding of `name`.
    #[inline]
    pub fn assign(&mut self, name: &str, value: Value) -> Result<(), AssignError> {
        self.current_frame().borrow_mut().assign(name, value)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
