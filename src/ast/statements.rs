//! Statement nodes used inside action bodies.

use std::fmt::Display;

use crate::Span;

use super::expressions::{ArithOp, Expr};

/// The only shapes an assignment may write to.
#[derive(Debug, Clone, PartialEq)]
pub enum LValue {
    Identifier(String),
    PropertyAccess { target: Box<Expr>, property: String },
}

impl Display for LValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LValue::Identifier(name) => write!(f, "{}", name),
            LValue::PropertyAccess { target, property } => write!(f, "{}.{}", target, property),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    For {
        variable: String,
        collection: Expr,
        body: Block,
    },
    While {
        condition: Expr,
        body: Block,
    },
    Assignment {
        target: LValue,
        value: Expr,
    },
    CompoundAssignment {
        target: LValue,
        op: ArithOp,
        value: Expr,
    },
    ExpressionStatement(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

/// A brace-delimited statement list, or a single statement written without braces.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Stmt>,
    pub span: Span,
}
