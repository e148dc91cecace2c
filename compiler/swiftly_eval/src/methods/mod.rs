//! Built-in method dispatch for container values.
//!
//! A fixed capability table keyed by (container kind, method). Both keys
//! are closed enums, so resolution is an exhaustive match rather than a
//! runtime name lookup. Calling a method on a kind that lacks it, calling
//! an unknown name, or calling anything on a non-container fails with
//! `UnsupportedMethod`.

mod collections;
mod helpers;

pub(crate) use helpers::require_hashable;

use crate::errors::{no_such_method, EvalError};
use crate::Value;

use collections::{dispatch_mapping_method, dispatch_sequence_method, dispatch_set_method};

/// All built-in methods, as `(receiver kind, method name)`.
///
/// Sorted by kind then method. Aliases are listed under each spelling.
pub const EVAL_BUILTIN_METHODS: &[(&str, &str)] = &[
    ("mapping", "get"),
    ("mapping", "has_key"),
    ("mapping", "is_empty"),
    ("mapping", "items"),
    ("mapping", "keys"),
    ("mapping", "length"),
    ("mapping", "size"),
    ("mapping", "values"),
    ("sequence", "clear"),
    ("sequence", "contains"),
    ("sequence", "first"),
    ("sequence", "is_empty"),
    ("sequence", "last"),
    ("sequence", "length"),
    ("sequence", "pop"),
    ("sequence", "push"),
    ("sequence", "size"),
    ("set", "add"),
    ("set", "clear"),
    ("set", "contains"),
    ("set", "is_empty"),
    ("set", "length"),
    ("set", "remove"),
    ("set", "size"),
];

/// Receiver kinds that have built-in methods.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContainerKind {
    Sequence,
    Set,
    Mapping,
}

impl ContainerKind {
    /// The container kind of a value, if it is one.
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Sequence(_) => Some(Self::Sequence),
            Value::Set(_) => Some(Self::Set),
            Value::Mapping(_) => Some(Self::Mapping),
            _ => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Sequence => "sequence",
            Self::Set => "set",
            Self::Mapping => "mapping",
        }
    }
}

/// Every built-in method name, independent of receiver kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BuiltinMethod {
    /// `size` or `length`.
    Size,
    Contains,
    Push,
    Pop,
    Add,
    Remove,
    First,
    Last,
    IsEmpty,
    Clear,
    Keys,
    Values,
    Items,
    Get,
    HasKey,
}

impl BuiltinMethod {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "size" | "length" => Self::Size,
            "contains" => Self::Contains,
            "push" => Self::Push,
            "pop" => Self::Pop,
            "add" => Self::Add,
            "remove" => Self::Remove,
            "first" => Self::First,
            "last" => Self::Last,
            "is_empty" => Self::IsEmpty,
            "clear" => Self::Clear,
            "keys" => Self::Keys,
            "values" => Self::Values,
            "items" => Self::Items,
            "get" => Self::Get,
            "has_key" => Self::HasKey,
            _ => return None,
        })
    }

    /// Number of arguments the method takes.
    pub const fn arity(self) -> usize {
        match self {
            Self::Contains | Self::Push | Self::Add | Self::Remove | Self::Get | Self::HasKey => 1,
            Self::Size
            | Self::Pop
            | Self::First
            | Self::Last
            | Self::IsEmpty
            | Self::Clear
            | Self::Keys
            | Self::Values
            | Self::Items => 0,
        }
    }

    /// Whether the capability table has an entry for `(kind, self)`.
    pub const fn supports(self, kind: ContainerKind) -> bool {
        match kind {
            ContainerKind::Sequence => matches!(
                self,
                Self::Size
                    | Self::Contains
                    | Self::Push
                    | Self::Pop
                    | Self::First
                    | Self::Last
                    | Self::IsEmpty
                    | Self::Clear
            ),
            ContainerKind::Set => matches!(
                self,
                Self::Size | Self::Contains | Self::Add | Self::Remove | Self::IsEmpty | Self::Clear
            ),
            ContainerKind::Mapping => matches!(
                self,
                Self::Size
                    | Self::IsEmpty
                    | Self::Keys
                    | Self::Values
                    | Self::Items
                    | Self::Get
                    | Self::HasKey
            ),
        }
    }
}

/// Dispatch a built-in method call on a non-instance receiver.
///
/// `method` is the name as written, so error messages echo the caller's
/// spelling (`length` vs `size`).
#[tracing::instrument(level = "trace", skip(receiver, args), fields(receiver = receiver.type_name()))]
pub fn dispatch_builtin_method(
    receiver: &Value,
    method: &str,
    args: Vec<Value>,
) -> Result<Value, EvalError> {
    let resolved = ContainerKind::of(receiver).and_then(|kind| {
        BuiltinMethod::from_name(method).filter(|builtin| builtin.supports(kind))
    });
    let Some(builtin) = resolved else {
        return Err(no_such_method(receiver.type_name(), method));
    };
    helpers::require_args(method, builtin.arity(), args.len())?;

    match receiver {
        Value::Sequence(items) => dispatch_sequence_method(items, builtin, method, args),
        Value::Set(items) => dispatch_set_method(items, builtin, method, args),
        Value::Mapping(entries) => dispatch_mapping_method(entries, builtin, method, args),
        _ => Err(no_such_method(receiver.type_name(), method)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_capabilities() {
        let kinds = [
            ContainerKind::Sequence,
            ContainerKind::Set,
            ContainerKind::Mapping,
        ];
        for &(kind_name, method) in EVAL_BUILTIN_METHODS {
            let kind = kinds
                .iter()
                .copied()
                .find(|k| k.name() == kind_name)
                .unwrap_or_else(|| panic!("unknown kind {kind_name}"));
            let builtin = BuiltinMethod::from_name(method)
                .unwrap_or_else(|| panic!("unknown method {method}"));
            assert!(builtin.supports(kind), "{kind_name}.{method}");
        }
    }

    #[test]
    fn table_is_sorted() {
        let mut sorted = EVAL_BUILTIN_METHODS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, EVAL_BUILTIN_METHODS);
    }

    #[test]
    fn unknown_names_do_not_resolve() {
        assert_eq!(BuiltinMethod::from_name("append"), None);
        assert_eq!(BuiltinMethod::from_name("length"), Some(BuiltinMethod::Size));
    }
}
