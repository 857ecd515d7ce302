//! Semantic checking.
//!
//! This module checks a parsed [`Program`](crate::ast::ast::Program)
//! without rewriting it:
//!
//! - Types every expression and statement of every action body
//! - Records each effect's parameter contract and verifies every call site
//! - Resolves property and method access through a [`catalog::TypeCatalog`]
//! - Resolves each activation block's selector, inheriting along `PostAction` chains
//!
//! Scopes form a borrowed chain per traversal; all other state lives in the
//! [`type_checker::CheckSession`] returned by a successful check.

pub mod catalog;
pub mod expr;
pub mod scope;
pub mod stmt;
pub mod type_checker;

#[cfg(test)]
mod tests;
