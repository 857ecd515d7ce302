//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into a [`Program`](crate::ast::ast::Program). It uses a Pratt parser for
//! expressions and handles:
//!
//! - Top-level `effect` and `card` declarations and their keyed blocks
//! - Activation blocks, selectors, effect builders and `PostAction` chains
//! - Statements (loops, assignments, compound assignments, calls)
//! - Expressions (binary ops, concatenation, member access, predicates)
//!
//! Parsing is fail-fast: the first unexpected token ends it with a
//! `SyntaxError`.

pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
