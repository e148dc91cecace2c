//! Composite value payloads: functions, classes, instances, bound methods,
//! and the insertion-ordered set and mapping containers.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use swiftly_ir::{ClassDecl, FunctionDecl, Node};

use super::{Heap, Value};

// FunctionValue

/// A user-defined function or method.
///
/// Wraps the declaration node; there is no captured environment. Two
/// function values are equal only when they come from the same declaration.
#[derive(Clone)]
pub struct FunctionValue {
    decl: Rc<FunctionDecl>,
}

impl FunctionValue {
    pub fn new(decl: Rc<FunctionDecl>) -> Self {
        FunctionValue { decl }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.decl.name
    }

    #[inline]
    pub fn params(&self) -> &[String] {
        &self.decl.params
    }

    #[inline]
    pub fn body(&self) -> &[Node] {
        &self.decl.body
    }
}

impl PartialEq for FunctionValue {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.decl, &other.decl)
    }
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FunctionValue({}/{})", self.name(), self.params().len())
    }
}

// ClassValue

/// A declared class: its name and method table.
///
/// Immutable once built. The parent name is kept for display and
/// diagnostics only; method lookup never consults it.
#[derive(Debug)]
pub struct ClassValue {
    pub name: String,
    pub parent: Option<String>,
    methods: FxHashMap<String, FunctionValue>,
}

impl ClassValue {
    /// Build the method table from a class declaration.
    ///
    /// A later method with the same name replaces an earlier one.
    pub fn from_decl(decl: &ClassDecl) -> Self {
        let methods = decl
            .methods
            .iter()
            .map(|m| (m.name.clone(), FunctionValue::new(Rc::clone(m))))
            .collect();
        ClassValue {
            name: decl.name.clone(),
            parent: decl.parent.clone(),
            methods,
        }
    }

    /// Look up a method by name.
    #[inline]
    pub fn method(&self, name: &str) -> Option<&FunctionValue> {
        self.methods.get(name)
    }

    pub fn method_count(&self) -> usize {
        self.methods.len()
    }
}

// InstanceValue

/// An instance: a shared reference to its class and its own fields.
#[derive(Debug)]
pub struct InstanceValue {
    pub class: Heap<ClassValue>,
    fields: FxHashMap<String, Value>,
}

impl InstanceValue {
    pub fn new(class: Heap<ClassValue>) -> Self {
        InstanceValue {
            class,
            fields: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Write a field, creating it when absent.
    #[inline]
    pub fn set_field(&mut self, name: impl Into<String>, value: Value) {
        self.fields.insert(name.into(), value);
    }

    pub fn class_name(&self) -> &str {
        &self.class.name
    }
}

// BoundMethodValue

/// A method paired with the instance it was read from.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundMethodValue {
    /// Always a `Value::Instance`.
    pub receiver: Value,
    pub class_name: String,
    pub method: FunctionValue,
}

// SetValue

/// Deduplicated elements in insertion order.
///
/// Membership is by value equality. Callers check hashability before
/// inserting or probing.
#[derive(Clone, Debug, Default)]
pub struct SetValue {
    items: Vec<Value>,
}

impl SetValue {
    pub fn new() -> Self {
        SetValue::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.items.contains(value)
    }

    /// Insert a value; returns `false` if it was already present.
    pub fn insert(&mut self, value: Value) -> bool {
        if self.contains(&value) {
            return false;
        }
        self.items.push(value);
        true
    }

    /// Remove a value; returns `false` if it was absent.
    pub fn remove(&mut self, value: &Value) -> bool {
        match self.items.iter().position(|item| item == value) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }
}

impl PartialEq for SetValue {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|item| other.contains(item))
    }
}

// MapValue

/// Key-value pairs in insertion order.
///
/// Re-inserting an existing key replaces its value in place.
#[derive(Clone, Debug, Default)]
pub struct MapValue {
    entries: Vec<(Value, Value)>,
}

impl MapValue {
    pub fn new() -> Self {
        MapValue::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.get(key).is_some()
    }

    pub fn insert(&mut self, key: Value, value: Value) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (Value, Value)> {
        self.entries.iter()
    }
}

impl PartialEq for MapValue {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|ov| ov == v))
    }
}
