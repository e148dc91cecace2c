//! Evaluation helpers shared by the interpreter.
//!
//! These are free functions over values and environments; the interpreter
//! owns the recursion and calls into them.
//!
//! - `call` - arity checks and parameter binding
//! - `control` - loop iteration and `try` handling
//! - `member` - instance field and method access

pub mod call;
pub mod control;
pub mod member;
