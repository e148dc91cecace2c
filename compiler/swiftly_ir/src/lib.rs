//! Swiftly IR - syntax tree types for the Swiftly evaluator.
//!
//! This crate contains the tree the evaluator walks and the decoder that
//! produces it from the external parser's output:
//! - `Node`: every statement and expression kind, lowered and normalized
//! - `FunctionDecl` / `ClassDecl`: shared declaration payloads (`Rc`)
//! - `BinaryOp` / `UnaryOp`: operator enums
//! - `Program`: a top-level statement list
//!
//! # Wire Format
//!
//! The external parser emits JSON objects tagged with a `kind` field. The
//! decoder accepts the transformer's spellings (including the historical
//! aliases such as `var`/`identifier` or `error_var`/`except_var`) and
//! lowers them into one canonical `Node` per construct. Shape problems
//! (missing fields, wrong JSON types, unknown kinds or operators) are
//! reported as a [`DecodeError`] before anything runs.

pub mod ast;
mod decode;

pub use ast::{AssignTarget, BinaryOp, ClassDecl, FunctionDecl, Node, Program, TryBlock, UnaryOp};
pub use decode::{parse_program, DecodeError, ShapeError};
