//! Program, declarations and the keyed-block nodes.
//!
//! Every node owns its children. The single exception is the link from a
//! `PostAction` block back to the block that contains it, which is stored
//! as the parent's [`NodeId`] rather than a second owner.

use crate::Span;

use super::{
    expressions::{Expr, Predicate},
    statements::Block,
};

/// Parser-assigned identity of an activation block.
pub type NodeId = i32;

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub declarations: Vec<TopLevelDecl>,
    pub span: Span,
}

impl Program {
    /// Builds a program with effects moved ahead of cards.
    ///
    /// Cards may reference effects declared later in the source, so the
    /// checker must see every effect's contract first. The sort is stable,
    /// keeping source order inside each class.
    pub fn new(mut declarations: Vec<TopLevelDecl>, span: Span) -> Self {
        declarations.sort_by_key(TopLevelDecl::priority);
        Program { declarations, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TopLevelDecl {
    Effect(EffectDecl),
    Card(CardDecl),
}

impl TopLevelDecl {
    fn priority(&self) -> u8 {
        match self {
            TopLevelDecl::Effect(_) => 0,
            TopLevelDecl::Card(_) => 1,
        }
    }
}

/// `Ident = expr` or `Ident: expr` inside `Params` or an effect builder.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EffectDecl {
    pub name: String,
    pub params: Vec<Binding>,
    pub action: ActionBlock,
    pub span: Span,
}

/// `(target, context) => { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct ActionBlock {
    pub target_param: String,
    pub context_param: String,
    pub body: Block,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardDecl {
    pub name: Expr,
    pub card_type: String,
    pub effect_refs: Vec<String>,
    pub faction: Option<String>,
    pub power: Option<Expr>,
    pub range: Vec<String>,
    pub on_activation: Vec<ActivationBlock>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivationBlock {
    pub id: NodeId,
    /// Set only on blocks parsed as a `PostAction`.
    pub parent: Option<NodeId>,
    pub effect: Option<EffectBuilder>,
    pub selector: Option<Selector>,
    pub post_action: Option<Box<ActivationBlock>>,
    pub span: Span,
}

/// Call site of an effect: its name plus the parameter values supplied.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectBuilder {
    pub name: String,
    pub assignments: Vec<Binding>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    pub source: String,
    pub single: Option<Expr>,
    pub predicate: Option<Predicate>,
    pub span: Span,
}
