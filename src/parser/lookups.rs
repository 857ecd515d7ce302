use std::collections::HashMap;

use crate::{
    ast::{ast::TopLevelDecl, expressions::Expr, statements::Stmt},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{decl::*, expr::*, parser::Parser, stmt::*};

/// Operator precedence, weakest first.
///
/// Additive, relational, equality and logical operators share one level
/// and associate to the left; `(a < b) && (c < d)` needs its parentheses.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Assignment,
    Additive,
    Concat,
    Multiplicative,
    Unary,
    Member,
}

pub type DeclHandler = fn(&mut Parser) -> Result<TopLevelDecl, Error>;
pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Error>;
pub type NUDHandler = fn(&mut Parser) -> Result<Expr, Error>;
pub type LEDHandler = fn(&mut Parser, Expr, BindingPower) -> Result<Expr, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Level 1: additive, logical, relational
    parser.led(TokenKind::Plus, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Dash, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::And, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Or, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Equals, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::NotEquals, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Less, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::LessEquals, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::Greater, BindingPower::Additive, parse_binary_expr);
    parser.led(TokenKind::GreaterEquals, BindingPower::Additive, parse_binary_expr);

    // Concatenation, right-associative
    parser.led(TokenKind::SimpleConcat, BindingPower::Concat, parse_concat_expr);
    parser.led(TokenKind::CompConcat, BindingPower::Concat, parse_concat_expr);

    // Level 2
    parser.led(TokenKind::Star, BindingPower::Multiplicative, parse_binary_expr);
    parser.led(TokenKind::Slash, BindingPower::Multiplicative, parse_binary_expr);

    // Postfix
    parser.led(TokenKind::PlusPlus, BindingPower::Unary, parse_postfix_expr);
    parser.led(TokenKind::MinusMinus, BindingPower::Unary, parse_postfix_expr);

    // Member
    parser.led(TokenKind::Dot, BindingPower::Member, parse_member_expr);
    parser.led(TokenKind::OpenBracket, BindingPower::Member, parse_index_expr);

    // Literals and symbols
    parser.nud(TokenKind::Number, parse_primary_expr);
    parser.nud(TokenKind::Identifier, parse_primary_expr);
    parser.nud(TokenKind::String, parse_primary_expr);
    parser.nud(TokenKind::True, parse_primary_expr);
    parser.nud(TokenKind::False, parse_primary_expr);
    parser.nud(TokenKind::NumberType, parse_data_type_expr);
    parser.nud(TokenKind::StringType, parse_data_type_expr);
    parser.nud(TokenKind::BoolType, parse_data_type_expr);
    parser.nud(TokenKind::Dash, parse_prefix_expr);
    parser.nud(TokenKind::PlusPlus, parse_prefix_expr);
    parser.nud(TokenKind::MinusMinus, parse_prefix_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);

    // Statements
    parser.stmt(TokenKind::For, parse_for_stmt);
    parser.stmt(TokenKind::While, parse_while_stmt);

    // Declarations
    parser.decl(TokenKind::EffectDecl, parse_effect_decl);
    parser.decl(TokenKind::Card, parse_card_decl);
}

// Lookup tables inside parser struct, so it's easier
pub type DeclLookup = HashMap<TokenKind, DeclHandler>;
pub type StmtLookup = HashMap<TokenKind, StmtHandler>;
pub type NUDLookup = HashMap<TokenKind, NUDHandler>;
pub type LEDLookup = HashMap<TokenKind, LEDHandler>;
pub type BPLookup = HashMap<TokenKind, BindingPower>;
