//! Semantic types.
//!
//! The type set is closed: every expression the checker accepts has one of
//! these types. `Var` stands in for loop-bound values whose element type is
//! not tracked, `Predicate` is the type of a `(x) => filter` literal.

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Int,
    Text,
    Bool,
    Card,
    CardList,
    Predicate,
    Void,
    Var,
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Type::Int => "Int",
            Type::Text => "Text",
            Type::Bool => "Bool",
            Type::Card => "Card",
            Type::CardList => "CardList",
            Type::Predicate => "Predicate",
            Type::Void => "Void",
            Type::Var => "Var",
        };

        write!(f, "{}", name)
    }
}
