//! Registry of declared classes.
//!
//! Instantiation (`new Name(..)`) resolves class names here, not through
//! the environment, so a variable that shadows a class name does not break
//! `new`. Owned by the interpreter; there is no process-wide registry.

use rustc_hash::FxHashMap;

use crate::value::{ClassValue, Heap};

/// Classes keyed by name.
#[derive(Clone, Debug, Default)]
pub struct ClassRegistry {
    classes: FxHashMap<String, Heap<ClassValue>>,
}

impl ClassRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        ClassRegistry::default()
    }

    /// Register a class. Re-declaring a name replaces the earlier class.
    pub fn declare(&mut self, class: Heap<ClassValue>) {
        tracing::trace!(
            class = %class.name,
            methods = class.method_count(),
            "declare class"
        );
        self.classes.insert(class.name.clone(), class);
    }

    /// Look up a class by name.
    pub fn lookup(&self, name: &str) -> Option<Heap<ClassValue>> {
        self.classes.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
