//! Expression nodes.
//!
//! Binary operators are split at parse time into arithmetic (`MathBinary`)
//! and boolean-valued (`BoolBinary`) nodes so the checker can type each
//! family without re-inspecting the operator.

use std::fmt::Display;

use crate::{lexer::tokens::TokenKind, Span};

use super::types::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    /// Maps `+ - * /` and their compound forms (`+=` ...) to an operator.
    pub fn from_token(kind: TokenKind) -> Option<ArithOp> {
        match kind {
            TokenKind::Plus | TokenKind::PlusEquals => Some(ArithOp::Add),
            TokenKind::Dash | TokenKind::MinusEquals => Some(ArithOp::Sub),
            TokenKind::Star | TokenKind::StarEquals => Some(ArithOp::Mul),
            TokenKind::Slash | TokenKind::SlashEquals => Some(ArithOp::Div),
            _ => None,
        }
    }
}

impl Display for ArithOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
        };
        write!(f, "{}", symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoolOp {
    And,
    Or,
    Equals,
    NotEquals,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
}

impl BoolOp {
    pub fn from_token(kind: TokenKind) -> Option<BoolOp> {
        match kind {
            TokenKind::And => Some(BoolOp::And),
            TokenKind::Or => Some(BoolOp::Or),
            TokenKind::Equals => Some(BoolOp::Equals),
            TokenKind::NotEquals => Some(BoolOp::NotEquals),
            TokenKind::Less => Some(BoolOp::Less),
            TokenKind::LessEquals => Some(BoolOp::LessEquals),
            TokenKind::Greater => Some(BoolOp::Greater),
            TokenKind::GreaterEquals => Some(BoolOp::GreaterEquals),
            _ => None,
        }
    }

    pub fn is_logical(&self) -> bool {
        matches!(self, BoolOp::And | BoolOp::Or)
    }

    pub fn is_equality(&self) -> bool {
        matches!(self, BoolOp::Equals | BoolOp::NotEquals)
    }
}

impl Display for BoolOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            BoolOp::And => "&&",
            BoolOp::Or => "||",
            BoolOp::Equals => "==",
            BoolOp::NotEquals => "!=",
            BoolOp::Less => "<",
            BoolOp::LessEquals => "<=",
            BoolOp::Greater => ">",
            BoolOp::GreaterEquals => ">=",
        };
        write!(f, "{}", symbol)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
    Increment,
    Decrement,
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            UnaryOp::Negate => "-",
            UnaryOp::Increment => "++",
            UnaryOp::Decrement => "--",
        };
        write!(f, "{}", symbol)
    }
}

/// `(target) => filter`, a single-argument boolean test.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub target: String,
    pub filter: Box<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Identifier(String),
    Number(i64),
    String(String),
    Boolean(bool),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
        is_postfix: bool,
    },
    MathBinary {
        left: Box<Expr>,
        op: ArithOp,
        right: Box<Expr>,
    },
    BoolBinary {
        left: Box<Expr>,
        op: BoolOp,
        right: Box<Expr>,
    },
    /// `@` joins directly, `@@` (comparative) joins with a space.
    Concat {
        left: Box<Expr>,
        right: Box<Expr>,
        is_comparative: bool,
    },
    PropertyAccess {
        target: Box<Expr>,
        property: String,
    },
    Indexing {
        collection: Box<Expr>,
        index: Box<Expr>,
    },
    MethodCall {
        target: Box<Expr>,
        method: String,
        args: Vec<Expr>,
    },
    Predicate(Predicate),
    /// A type keyword used as a value, e.g. `Amount: Number` in `Params`.
    DataType(Type),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }

    /// Whether the node is boolean-shaped without looking at any types.
    pub fn is_structurally_bool(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::BoolBinary { .. } | ExprKind::Boolean(_)
        )
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ExprKind::Identifier(name) => write!(f, "{}", name),
            ExprKind::Number(value) => write!(f, "{}", value),
            ExprKind::String(value) => write!(f, "{:?}", value),
            ExprKind::Boolean(value) => write!(f, "{}", value),
            ExprKind::Unary {
                op,
                operand,
                is_postfix: true,
            } => write!(f, "{}{}", operand, op),
            ExprKind::Unary { op, operand, .. } => write!(f, "{}{}", op, operand),
            ExprKind::MathBinary { left, op, right } => write!(f, "({} {} {})", left, op, right),
            ExprKind::BoolBinary { left, op, right } => write!(f, "({} {} {})", left, op, right),
            ExprKind::Concat {
                left,
                right,
                is_comparative,
            } => {
                let op = if *is_comparative { "@@" } else { "@" };
                write!(f, "({} {} {})", left, op, right)
            }
            ExprKind::PropertyAccess { target, property } => write!(f, "{}.{}", target, property),
            ExprKind::Indexing { collection, index } => write!(f, "{}[{}]", collection, index),
            ExprKind::MethodCall {
                target,
                method,
                args,
            } => {
                let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
                write!(f, "{}.{}({})", target, method, args.join(", "))
            }
            ExprKind::Predicate(predicate) => {
                write!(f, "({}) => {}", predicate.target, predicate.filter)
            }
            ExprKind::DataType(ty) => write!(f, "{}", ty),
        }
    }
}
