//! Runtime values for the Swiftly interpreter.
//!
//! # Heap Enforcement
//!
//! Heap payloads are wrapped in `Heap<T>` (immutable) or `Shared<T>`
//! (mutable in place). Both have `pub(super)` constructors, so values are
//! only created through the factory methods on `Value`:
//!
//! ```text
//! let s = Value::string("hello");          // OK
//! let xs = Value::sequence(vec![]);        // OK
//! let s = Value::Str(Heap::new(...));      // ERROR: Heap::new is pub(super)
//! ```
//!
//! # Reference Semantics
//!
//! Sequences, sets, mappings and instances are shared: cloning a `Value`
//! clones the handle, and a mutation through one alias is visible through
//! every other. Strings, classes and bound methods are immutable.
//!
//! # Thread Safety
//!
//! Evaluation is single-threaded, so handles are `Rc`-based. `Value` is
//! neither `Send` nor `Sync`.

mod composite;
mod heap;

use std::fmt;

pub use composite::{BoundMethodValue, ClassValue, FunctionValue, InstanceValue, MapValue, SetValue};
pub use heap::{Heap, Shared};

/// Runtime value in the Swiftly interpreter.
#[derive(Clone)]
pub enum Value {
    // Primitives (inline, no heap allocation)
    /// Every number is a double; there is no separate integer type.
    Number(f64),
    Bool(bool),
    Null,

    // Immutable heap values
    Str(Heap<String>),

    // Containers (shared, mutable in place)
    Sequence(Shared<Vec<Value>>),
    Set(Shared<SetValue>),
    Mapping(Shared<MapValue>),

    // Callables and objects
    Function(FunctionValue),
    Class(Heap<ClassValue>),
    Instance(Shared<InstanceValue>),
    BoundMethod(Heap<BoundMethodValue>),
}

// Factory methods

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create a sequence value.
    #[inline]
    pub fn sequence(items: Vec<Value>) -> Self {
        Value::Sequence(Shared::new(items))
    }

    /// Create a set value.
    #[inline]
    pub fn set(items: SetValue) -> Self {
        Value::Set(Shared::new(items))
    }

    /// Create a mapping value.
    #[inline]
    pub fn mapping(entries: MapValue) -> Self {
        Value::Mapping(Shared::new(entries))
    }

    #[inline]
    pub fn function(func: FunctionValue) -> Self {
        Value::Function(func)
    }

    #[inline]
    pub fn class(class: ClassValue) -> Self {
        Value::Class(Heap::new(class))
    }

    #[inline]
    pub fn instance(instance: InstanceValue) -> Self {
        Value::Instance(Shared::new(instance))
    }

    #[inline]
    pub fn bound_method(bound: BoundMethodValue) -> Self {
        Value::BoundMethod(Heap::new(bound))
    }
}

// Inspection

impl Value {
    /// Name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::Null => "null",
            Value::Str(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Set(_) => "set",
            Value::Mapping(_) => "mapping",
            Value::Function(_) => "function",
            Value::Class(_) => "class",
            Value::Instance(_) => "instance",
            Value::BoundMethod(_) => "bound method",
        }
    }

    /// Truthiness: `null`, `false`, zero, the empty string and empty
    /// containers are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Sequence(items) => !items.borrow().is_empty(),
            Value::Set(items) => !items.borrow().is_empty(),
            Value::Mapping(entries) => !entries.borrow().is_empty(),
            Value::Function(_) | Value::Class(_) | Value::Instance(_) | Value::BoundMethod(_) => {
                true
            }
        }
    }

    /// Whether this value may be a set element or a mapping key.
    ///
    /// Mutable containers are excluded; instances hash by identity.
    #[inline]
    pub fn is_hashable(&self) -> bool {
        !matches!(
            self,
            Value::Sequence(_) | Value::Set(_) | Value::Mapping(_)
        )
    }

    /// Display value for user output: strings unquoted at the top level.
    ///
    /// Used by `print`, string concatenation and the `try` error binding.
    pub fn display_value(&self) -> String {
        match self {
            Value::Str(s) => s.to_string(),
            other => other.to_string(),
        }
    }
}

/// Equality as seen by `==`, `contains` and key lookup.
///
/// Containers compare structurally (sets and mappings ignore order);
/// functions, classes and instances compare by identity. A container pair
/// met again while it is still being compared counts as equal, so
/// self-referencing containers terminate.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        eq_tracked(self, other, &mut Vec::new())
    }
}

/// Container pairs under comparison, outermost first.
type ActivePairs = Vec<(*const (), *const ())>;

fn eq_tracked(a: &Value, b: &Value, active: &mut ActivePairs) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Null, Value::Null) => true,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Sequence(a), Value::Sequence(b)) => {
            container_eq(a.addr(), b.addr(), active, |active| {
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len()
                    && a.iter().zip(b.iter()).all(|(x, y)| eq_tracked(x, y, active))
            })
        }
        // Set elements are hashable, so they never hold containers
        (Value::Set(a), Value::Set(b)) => a.ptr_eq(b) || *a.borrow() == *b.borrow(),
        (Value::Mapping(a), Value::Mapping(b)) => {
            container_eq(a.addr(), b.addr(), active, |active| {
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len()
                    && a.iter().all(|(key, x)| {
                        b.get(key).is_some_and(|y| eq_tracked(x, y, active))
                    })
            })
        }
        (Value::Function(a), Value::Function(b)) => a == b,
        (Value::Class(a), Value::Class(b)) => a.ptr_eq(b),
        (Value::Instance(a), Value::Instance(b)) => a.ptr_eq(b),
        (Value::BoundMethod(a), Value::BoundMethod(b)) => {
            a.receiver == b.receiver && a.method == b.method
        }
        _ => false,
    }
}

fn container_eq(
    a: *const (),
    b: *const (),
    active: &mut ActivePairs,
    compare: impl FnOnce(&mut ActivePairs) -> bool,
) -> bool {
    if a == b || active.contains(&(a, b)) {
        return true;
    }
    active.push((a, b));
    let equal = compare(active);
    active.pop();
    equal
}

/// Writes `value` in nested form, tracking the containers currently open.
///
/// A container reached again from inside itself prints as `[...]` or
/// `{...}`.
fn write_tracked(
    f: &mut fmt::Formatter<'_>,
    value: &Value,
    open: &mut Vec<*const ()>,
) -> fmt::Result {
    match value {
        Value::Sequence(items) => {
            write_container(f, items.addr(), ('[', ']'), open, |f, open| {
                write_joined(f, items.borrow().iter(), open)
            })
        }
        Value::Set(items) => {
            write_container(f, items.addr(), ('{', '}'), open, |f, open| {
                write_joined(f, items.borrow().iter(), open)
            })
        }
        Value::Mapping(entries) => {
            write_container(f, entries.addr(), ('{', '}'), open, |f, open| {
                for (i, (k, v)) in entries.borrow().iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_tracked(f, k, open)?;
                    f.write_str(": ")?;
                    write_tracked(f, v, open)?;
                }
                Ok(())
            })
        }
        Value::Number(n) => write!(f, "{n}"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Null => f.write_str("null"),
        Value::Str(s) => write!(f, "\"{}\"", &**s),
        Value::Function(func) => write!(f, "<function {}>", func.name()),
        Value::Class(class) => write!(f, "<class {}>", class.name),
        Value::Instance(inst) => write!(f, "<{} instance>", inst.borrow().class_name()),
        Value::BoundMethod(bound) => write!(
            f,
            "<bound method {}.{}>",
            bound.class_name,
            bound.method.name()
        ),
    }
}

fn write_container(
    f: &mut fmt::Formatter<'_>,
    addr: *const (),
    (open_ch, close_ch): (char, char),
    open: &mut Vec<*const ()>,
    body: impl FnOnce(&mut fmt::Formatter<'_>, &mut Vec<*const ()>) -> fmt::Result,
) -> fmt::Result {
    if open.contains(&addr) {
        return write!(f, "{open_ch}...{close_ch}");
    }
    open.push(addr);
    let result = write!(f, "{open_ch}").and_then(|()| body(f, open));
    open.pop();
    result?;
    write!(f, "{close_ch}")
}

fn write_joined<'a>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = &'a Value>,
    open: &mut Vec<*const ()>,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_tracked(f, item, open)?;
    }
    Ok(())
}

/// Nested form: strings are quoted so container contents stay readable.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tracked(f, self, &mut Vec::new())
    }
}

/// Containers print their contents through `Display`, which stops at
/// self-references.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "Number({n:?})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Null => f.write_str("Null"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::Sequence(_) => write!(f, "Sequence({self})"),
            Value::Set(_) => write!(f, "Set({self})"),
            Value::Mapping(_) => write!(f, "Mapping({self})"),
            Value::Function(_) => write!(f, "Function({self})"),
            Value::Class(_) => write!(f, "Class({self})"),
            Value::Instance(_) => write!(f, "Instance({self})"),
            Value::BoundMethod(_) => write!(f, "BoundMethod({self})"),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}
