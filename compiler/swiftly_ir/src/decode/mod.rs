//! Structural decoding of the external parser's JSON tree.
//!
//! Decoding happens in two layers:
//! - `RawNode` mirrors the wire format one-to-one (`kind` tag, transformer
//!   field names and their aliases) and is driven by `serde`.
//! - `TryFrom<RawNode> for Node` lowers each raw node into its canonical
//!   form: the dedicated operator kinds fold into `Node::Binary`, argument
//!   bearing member accesses become method calls, class bodies are reduced
//!   to their method declarations.
//!
//! Only shape is checked here. Whether a name is bound or a value has the
//! right runtime kind is the evaluator's business.

use std::rc::Rc;

use serde::Deserialize;

use crate::ast::{AssignTarget, BinaryOp, ClassDecl, FunctionDecl, Node, TryBlock, UnaryOp};
use crate::Program;

/// A syntax tree that could not be decoded.
///
/// Wraps the `serde_json` error, which already carries the path-less
/// description (`missing field`, `unknown variant`, lowering failures)
/// and the input position when decoding from text.
#[derive(Debug, thiserror::Error)]
#[error("malformed syntax tree: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

impl DecodeError {
    /// Line of the offending input, when decoding from text.
    pub fn line(&self) -> usize {
        self.0.line()
    }

    /// Column of the offending input, when decoding from text.
    pub fn column(&self) -> usize {
        self.0.column()
    }
}

/// A well-formed JSON node whose fields do not lower to a `Node`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("unknown binary operator `{0}`")]
    UnknownOperator(String),
    #[error("assignment target must be an identifier or member access, found `{0}`")]
    InvalidTarget(&'static str),
}

/// Decode a program from the external parser's JSON text.
///
/// The top level is an array of statement nodes.
pub fn parse_program(json: &str) -> Result<Program, DecodeError> {
    Ok(serde_json::from_str(json)?)
}

// Wire format

/// `left`/`right` payload of the dedicated operator kinds (`add`, `eq`, ...).
#[derive(Deserialize)]
pub(crate) struct Operands {
    left: Box<Node>,
    right: Box<Node>,
}

#[derive(Deserialize)]
pub(crate) struct Pair {
    key: Node,
    value: Node,
}

/// Assignment target: the transformer emits either a bare name or a node.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum RawTarget {
    Name(String),
    Node(Box<Node>),
}

/// One node exactly as the external transformer writes it.
#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum RawNode {
    Number {
        value: f64,
    },
    #[serde(rename = "string")]
    Str {
        value: String,
    },
    Bool {
        value: bool,
    },
    Null {},
    #[serde(alias = "var")]
    Identifier {
        name: String,
    },
    VariableDecl {
        name: String,
        value: Box<Node>,
    },
    Assignment {
        #[serde(alias = "name")]
        target: RawTarget,
        value: Box<Node>,
    },
    BinaryOp {
        op: String,
        left: Box<Node>,
        right: Box<Node>,
    },
    Add(Operands),
    Sub(Operands),
    Mul(Operands),
    Div(Operands),
    Mod(Operands),
    Eq(Operands),
    Neq(Operands),
    Lt(Operands),
    Le(Operands),
    Gt(Operands),
    Ge(Operands),
    And(Operands),
    Or(Operands),
    Not {
        #[serde(alias = "operand")]
        value: Box<Node>,
    },
    Neg {
        #[serde(alias = "operand")]
        value: Box<Node>,
    },
    #[serde(alias = "array")]
    ArrayLiteral {
        #[serde(default)]
        elements: Vec<Node>,
    },
    #[serde(alias = "set")]
    SetLiteral {
        #[serde(default)]
        elements: Vec<Node>,
    },
    #[serde(alias = "mapping")]
    DictLiteral {
        #[serde(default)]
        pairs: Vec<Pair>,
    },
    MemberAccess {
        object: Box<Node>,
        #[serde(alias = "member")]
        method: String,
        #[serde(default)]
        args: Option<Vec<Node>>,
    },
    MethodCall {
        object: Box<Node>,
        method: String,
        #[serde(default)]
        args: Vec<Node>,
    },
    FunctionCall {
        name: String,
        #[serde(default)]
        args: Vec<Node>,
    },
    FunctionDecl {
        name: String,
        #[serde(default)]
        params: Vec<String>,
        body: Vec<Node>,
    },
    ClassDecl {
        name: String,
        #[serde(default)]
        parent: Option<String>,
        body: Vec<Node>,
    },
    NewInstance {
        class_name: String,
        #[serde(default)]
        args: Vec<Node>,
    },
    #[serde(alias = "if")]
    IfStmt {
        condition: Box<Node>,
        then: Vec<Node>,
        #[serde(default, rename = "else")]
        otherwise: Option<Vec<Node>>,
    },
    #[serde(alias = "while")]
    WhileStmt {
        condition: Box<Node>,
        body: Vec<Node>,
    },
    #[serde(alias = "for")]
    ForStmt {
        var: String,
        iterable: Box<Node>,
        body: Vec<Node>,
    },
    #[serde(alias = "return")]
    ReturnStmt {
        #[serde(default)]
        value: Option<Box<Node>>,
    },
    Raise {
        value: Box<Node>,
    },
    Try {
        try_block: Vec<Node>,
        #[serde(default, alias = "error_var")]
        except_var: Option<String>,
        #[serde(default, alias = "catch_block")]
        except_block: Option<Vec<Node>>,
    },
}

fn binary(op: BinaryOp, operands: Operands) -> Node {
    Node::Binary {
        op,
        left: operands.left,
        right: operands.right,
    }
}

fn lower_target(target: RawTarget) -> Result<AssignTarget, ShapeError> {
    match target {
        RawTarget::Name(name) => Ok(AssignTarget::Name(name)),
        RawTarget::Node(node) => match *node {
            Node::Ident(name) => Ok(AssignTarget::Name(name)),
            Node::Member { object, member } => Ok(AssignTarget::Member {
                object,
                field: member,
            }),
            other => Err(ShapeError::InvalidTarget(other.kind_name())),
        },
    }
}

fn lower_class(name: String, parent: Option<String>, body: Vec<Node>) -> ClassDecl {
    let mut methods = Vec::with_capacity(body.len());
    for member in body {
        match member {
            Node::Function(decl) => methods.push(decl),
            other => {
                tracing::debug!(
                    class = %name,
                    kind = other.kind_name(),
                    "ignoring non-method class member"
                );
            }
        }
    }
    ClassDecl {
        name,
        parent,
        methods,
    }
}

impl TryFrom<RawNode> for Node {
    type Error = ShapeError;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        Ok(match raw {
            RawNode::Number { value } => Node::Number(value),
            RawNode::Str { value } => Node::Str(value),
            RawNode::Bool { value } => Node::Bool(value),
            RawNode::Null {} => Node::Null,
            RawNode::Identifier { name } => Node::Ident(name),
            RawNode::VariableDecl { name, value } => Node::Let { name, value },
            RawNode::Assignment { target, value } => Node::Assign {
                target: lower_target(target)?,
                value,
            },
            RawNode::BinaryOp { op, left, right } => Node::Binary {
                op: op.parse()?,
                left,
                right,
            },
            RawNode::Add(o) => binary(BinaryOp::Add, o),
            RawNode::Sub(o) => binary(BinaryOp::Sub, o),
            RawNode::Mul(o) => binary(BinaryOp::Mul, o),
            RawNode::Div(o) => binary(BinaryOp::Div, o),
            RawNode::Mod(o) => binary(BinaryOp::Mod, o),
            RawNode::Eq(o) => binary(BinaryOp::Eq, o),
            RawNode::Neq(o) => binary(BinaryOp::NotEq, o),
            RawNode::Lt(o) => binary(BinaryOp::Lt, o),
            RawNode::Le(o) => binary(BinaryOp::LtEq, o),
            RawNode::Gt(o) => binary(BinaryOp::Gt, o),
            RawNode::Ge(o) => binary(BinaryOp::GtEq, o),
            RawNode::And(o) => binary(BinaryOp::And, o),
            RawNode::Or(o) => binary(BinaryOp::Or, o),
            RawNode::Not { value } => Node::Unary {
                op: UnaryOp::Not,
                operand: value,
            },
            RawNode::Neg { value } => Node::Unary {
                op: UnaryOp::Neg,
                operand: value,
            },
            RawNode::ArrayLiteral { elements } => Node::Sequence(elements),
            RawNode::SetLiteral { elements } => Node::Set(elements),
            RawNode::DictLiteral { pairs } => {
                Node::Mapping(pairs.into_iter().map(|p| (p.key, p.value)).collect())
            }
            RawNode::MemberAccess {
                object,
                method,
                args,
            } => match args {
                Some(args) if !args.is_empty() => Node::MethodCall {
                    object,
                    method,
                    args,
                },
                _ => Node::Member {
                    object,
                    member: method,
                },
            },
            RawNode::MethodCall {
                object,
                method,
                args,
            } => Node::MethodCall {
                object,
                method,
                args,
            },
            RawNode::FunctionCall { name, args } => Node::Call { callee: name, args },
            RawNode::FunctionDecl { name, params, body } => {
                Node::Function(Rc::new(FunctionDecl { name, params, body }))
            }
            RawNode::ClassDecl { name, parent, body } => {
                Node::Class(Rc::new(lower_class(name, parent, body)))
            }
            RawNode::NewInstance { class_name, args } => Node::New { class_name, args },
            RawNode::IfStmt {
                condition,
                then,
                otherwise,
            } => Node::If {
                condition,
                then_branch: then,
                else_branch: otherwise,
            },
            RawNode::WhileStmt { condition, body } => Node::While { condition, body },
            RawNode::ForStmt {
                var,
                iterable,
                body,
            } => Node::For {
                var,
                iterable,
                body,
            },
            RawNode::ReturnStmt { value } => Node::Return(value),
            RawNode::Raise { value } => Node::Raise(value),
            RawNode::Try {
                try_block,
                except_var,
                except_block,
            } => Node::Try(TryBlock {
                body: try_block,
                error_var: except_var,
                handler: except_block,
            }),
        })
    }
}
