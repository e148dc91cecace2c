//! Syntax tree nodes.
//!
//! One `Node` enum covers statements and expressions: the external tree puts
//! both in the same statement lists, and an expression used as a statement
//! simply completes with its value.
//!
//! Function and class declarations are reference-counted so the runtime can
//! hold on to a declaration (as a `Function` or `Class` value) without
//! copying its body.

mod operators;

use std::rc::Rc;

use serde::Deserialize;

pub use operators::{BinaryOp, UnaryOp};

/// A syntax tree node, already normalized by the decoder.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "crate::decode::RawNode")]
pub enum Node {
    // Literals
    Number(f64),
    Str(String),
    Bool(bool),
    Null,

    /// Variable reference.
    Ident(String),

    // Bindings
    /// `let name = value`: always a new binding in the current frame.
    Let { name: String, value: Box<Node> },
    /// `target = value`: mutates an existing binding or an instance field.
    Assign {
        target: AssignTarget,
        value: Box<Node>,
    },

    // Operators
    Binary {
        op: BinaryOp,
        left: Box<Node>,
        right: Box<Node>,
    },
    Unary { op: UnaryOp, operand: Box<Node> },

    // Container literals
    Sequence(Vec<Node>),
    Set(Vec<Node>),
    Mapping(Vec<(Node, Node)>),

    // Access and calls
    /// `object.member` without call arguments.
    Member { object: Box<Node>, member: String },
    /// `object.method(args)`.
    MethodCall {
        object: Box<Node>,
        method: String,
        args: Vec<Node>,
    },
    /// `name(args)`.
    Call { callee: String, args: Vec<Node> },
    /// `new ClassName(args)`.
    New { class_name: String, args: Vec<Node> },

    // Declarations
    Function(Rc<FunctionDecl>),
    Class(Rc<ClassDecl>),

    // Control flow
    If {
        condition: Box<Node>,
        then_branch: Vec<Node>,
        else_branch: Option<Vec<Node>>,
    },
    While { condition: Box<Node>, body: Vec<Node> },
    For {
        var: String,
        iterable: Box<Node>,
        body: Vec<Node>,
    },
    Return(Option<Box<Node>>),
    Raise(Box<Node>),
    Try(TryBlock),
}

impl Node {
    /// Short name of the node kind, for logs and diagnostics.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Node::Number(_) => "number",
            Node::Str(_) => "string",
            Node::Bool(_) => "bool",
            Node::Null => "null",
            Node::Ident(_) => "identifier",
            Node::Let { .. } => "variable_decl",
            Node::Assign { .. } => "assignment",
            Node::Binary { .. } => "binary_op",
            Node::Unary { .. } => "unary_op",
            Node::Sequence(_) => "array_literal",
            Node::Set(_) => "set_literal",
            Node::Mapping(_) => "dict_literal",
            Node::Member { .. } => "member_access",
            Node::MethodCall { .. } => "method_call",
            Node::Call { .. } => "function_call",
            Node::New { .. } => "new_instance",
            Node::Function(_) => "function_decl",
            Node::Class(_) => "class_decl",
            Node::If { .. } => "if_stmt",
            Node::While { .. } => "while_stmt",
            Node::For { .. } => "for_stmt",
            Node::Return(_) => "return_stmt",
            Node::Raise(_) => "raise",
            Node::Try(_) => "try",
        }
    }

    /// Decode a single node from an already-parsed JSON value.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, crate::DecodeError> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Left-hand side of an assignment.
#[derive(Clone, Debug, PartialEq)]
pub enum AssignTarget {
    /// A plain identifier.
    Name(String),
    /// `object.field`.
    Member { object: Box<Node>, field: String },
}

/// A function or method declaration.
///
/// Methods are ordinary functions whose first parameter names the receiver.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<String>,
    pub body: Vec<Node>,
}

/// A class declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassDecl {
    pub name: String,
    /// Parsed but not applied: there is no inheritance.
    pub parent: Option<String>,
    /// Function-declaration members of the class body, in source order.
    pub methods: Vec<Rc<FunctionDecl>>,
}

/// A `try` / `except` statement.
#[derive(Clone, Debug, PartialEq)]
pub struct TryBlock {
    pub body: Vec<Node>,
    /// Name bound to the stringified error before the handler runs.
    pub error_var: Option<String>,
    pub handler: Option<Vec<Node>>,
}

/// A whole program: the top-level statement list.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Program {
    pub items: Vec<Node>,
}

impl Program {
    /// Decode a program from an already-parsed JSON value.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, crate::DecodeError> {
        Ok(serde_json::from_value(value)?)
    }
}
