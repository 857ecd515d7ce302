//! Top-level declarations and the keyed blocks nested inside them.
//!
//! Keyed blocks are `{ Key: value, ... }`. Entries may be separated by
//! commas or not at all, a trailing comma is fine, and a repeated key
//! overwrites the earlier value (card `Effect` entries accumulate instead).

use crate::{
    ast::{
        ast::{
            ActionBlock, ActivationBlock, Binding, CardDecl, EffectBuilder, EffectDecl, NodeId,
            Selector, TopLevelDecl,
        },
        expressions::{Expr, ExprKind},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

use super::{expr::parse_expr, lookups::BindingPower, parser::Parser, stmt::parse_block};

/// Skips the optional separator after a keyed entry.
fn skip_separator(parser: &mut Parser) {
    if !parser.eat(TokenKind::Comma) {
        parser.eat(TokenKind::Semicolon);
    }
}

/// Error for a keyed block that closed before a required key appeared.
fn missing_key(key: &str, closing: &Token) -> Error {
    Error::new(
        ErrorImpl::SyntaxError {
            expected: String::from(key),
            found: closing.kind.to_string(),
        },
        closing.span.start.clone(),
    )
}

fn parse_key_value_separator(parser: &mut Parser) -> Result<(), Error> {
    parser.expect(TokenKind::Colon)?;
    Ok(())
}

fn parse_string(parser: &mut Parser) -> Result<String, Error> {
    Ok(parser.expect(TokenKind::String)?.value)
}

/// `Ident = expr` or `Ident: expr`.
fn parse_binding(parser: &mut Parser) -> Result<Binding, Error> {
    let name_token = parser.expect(TokenKind::Identifier)?;

    if !parser.eat(TokenKind::Assignment) {
        let error = parser.syntax_error("`=` or `:` after parameter name");
        parser.expect_error(TokenKind::Colon, Some(error))?;
    }

    let value = parse_expr(parser, BindingPower::Assignment)?;
    let span = Span {
        start: name_token.span.start,
        end: value.span.end.clone(),
    };
    skip_separator(parser);

    Ok(Binding {
        name: name_token.value,
        value,
        span,
    })
}

fn parse_params(parser: &mut Parser) -> Result<Vec<Binding>, Error> {
    parser.expect(TokenKind::OpenCurly)?;

    let mut params = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly {
        params.push(parse_binding(parser)?);
    }

    parser.expect(TokenKind::CloseCurly)?;
    Ok(params)
}

/// `(target, context) => block`
fn parse_action_block(parser: &mut Parser) -> Result<ActionBlock, Error> {
    let start = parser.expect(TokenKind::OpenParen)?.span.start;
    let target_param = parser.expect(TokenKind::Identifier)?.value;
    parser.expect(TokenKind::Comma)?;

    let context_token = parser.expect(TokenKind::Identifier)?;
    if context_token.value == target_param {
        return Err(Error::new(
            ErrorImpl::SyntaxError {
                expected: String::from("context parameter distinct from target"),
                found: context_token.value,
            },
            context_token.span.start,
        ));
    }

    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::Arrow)?;

    let body = parse_block(parser)?;
    let span = Span {
        start,
        end: body.span.end.clone(),
    };

    Ok(ActionBlock {
        target_param,
        context_param: context_token.value,
        body,
        span,
    })
}

/// `effect { Name: "...", Params: { ... }, Action: (t, c) => { ... } }`
pub fn parse_effect_decl(parser: &mut Parser) -> Result<TopLevelDecl, Error> {
    let start = parser.advance().span.start.clone();
    parser.expect(TokenKind::OpenCurly)?;

    let mut name = None;
    let mut params = vec![];
    let mut action = None;

    while parser.current_token_kind() != TokenKind::CloseCurly {
        match parser.current_token_kind() {
            TokenKind::Name => {
                parser.advance();
                parse_key_value_separator(parser)?;
                name = Some(parse_string(parser)?);
            }
            TokenKind::Params => {
                parser.advance();
                parse_key_value_separator(parser)?;
                params = parse_params(parser)?;
            }
            TokenKind::Action => {
                parser.advance();
                parse_key_value_separator(parser)?;
                action = Some(parse_action_block(parser)?);
            }
            _ => return Err(parser.syntax_error("Name, Params or Action")),
        }
        skip_separator(parser);
    }

    let closing = parser.expect(TokenKind::CloseCurly)?;

    let name = name.ok_or_else(|| missing_key("Name", &closing))?;
    let action = action.ok_or_else(|| missing_key("Action", &closing))?;

    Ok(TopLevelDecl::Effect(EffectDecl {
        name,
        params,
        action,
        span: Span {
            start,
            end: closing.span.end,
        },
    }))
}

fn parse_range(parser: &mut Parser) -> Result<Vec<String>, Error> {
    parser.expect(TokenKind::OpenBracket)?;

    let mut range = vec![];
    while parser.current_token_kind() != TokenKind::CloseBracket {
        range.push(parse_string(parser)?);
        parser.eat(TokenKind::Comma);
    }

    parser.expect(TokenKind::CloseBracket)?;
    Ok(range)
}

fn parse_on_activation(parser: &mut Parser) -> Result<Vec<ActivationBlock>, Error> {
    parser.expect(TokenKind::OpenBracket)?;

    let mut blocks = vec![];
    while parser.current_token_kind() != TokenKind::CloseBracket {
        blocks.push(parse_activation_block(parser, None)?);
        parser.eat(TokenKind::Comma);
    }

    parser.expect(TokenKind::CloseBracket)?;
    Ok(blocks)
}

/// `card { Name: ..., Type: "...", Effect: "...", Range: [...], Power: ..., Faction: "...", OnActivation: [...] }`
pub fn parse_card_decl(parser: &mut Parser) -> Result<TopLevelDecl, Error> {
    let start = parser.advance().span.start.clone();
    parser.expect(TokenKind::OpenCurly)?;

    let mut name = None;
    let mut card_type = None;
    let mut effect_refs = vec![];
    let mut faction = None;
    let mut power = None;
    let mut range = vec![];
    let mut on_activation = vec![];

    while parser.current_token_kind() != TokenKind::CloseCurly {
        let key = parser.current_token_kind();
        match key {
            TokenKind::Name
            | TokenKind::Type
            | TokenKind::EffectKeyword
            | TokenKind::Range
            | TokenKind::Power
            | TokenKind::Faction
            | TokenKind::OnActivation => {
                parser.advance();
                parse_key_value_separator(parser)?;
            }
            _ => {
                return Err(parser.syntax_error(
                    "Name, Type, Effect, Range, Power, Faction or OnActivation",
                ))
            }
        }

        match key {
            TokenKind::Name => name = Some(parse_expr(parser, BindingPower::Assignment)?),
            TokenKind::Type => card_type = Some(parse_string(parser)?),
            TokenKind::EffectKeyword => effect_refs.push(parse_string(parser)?),
            TokenKind::Range => range = parse_range(parser)?,
            TokenKind::Power => power = Some(parse_expr(parser, BindingPower::Assignment)?),
            TokenKind::Faction => faction = Some(parse_string(parser)?),
            _ => on_activation = parse_on_activation(parser)?,
        }

        skip_separator(parser);
    }

    let closing = parser.expect(TokenKind::CloseCurly)?;

    let name = name.ok_or_else(|| missing_key("Name", &closing))?;
    let card_type = card_type.ok_or_else(|| missing_key("Type", &closing))?;

    Ok(TopLevelDecl::Card(CardDecl {
        name,
        card_type,
        effect_refs,
        faction,
        power,
        range,
        on_activation,
        span: Span {
            start,
            end: closing.span.end,
        },
    }))
}

/// `Effect: "Name"` or `Effect: { Name: "Name", Amount: 3, ... }`
fn parse_effect_builder(parser: &mut Parser) -> Result<EffectBuilder, Error> {
    let start = parser.get_position();

    if parser.current_token_kind() == TokenKind::String {
        let token = parser.advance().clone();
        return Ok(EffectBuilder {
            name: token.value,
            assignments: vec![],
            span: token.span,
        });
    }

    parser.expect(TokenKind::OpenCurly)?;

    let mut name = None;
    let mut assignments = vec![];

    while parser.current_token_kind() != TokenKind::CloseCurly {
        if parser.current_token_kind() == TokenKind::Name {
            parser.advance();
            parse_key_value_separator(parser)?;
            name = Some(parse_string(parser)?);
            skip_separator(parser);
        } else {
            assignments.push(parse_binding(parser)?);
        }
    }

    let closing = parser.expect(TokenKind::CloseCurly)?;
    let name = name.ok_or_else(|| missing_key("Name", &closing))?;

    Ok(EffectBuilder {
        name,
        assignments,
        span: Span {
            start,
            end: closing.span.end,
        },
    })
}

/// `Selector: { Source: board, Single: false, Predicate: (unit) => ... }`
fn parse_selector(parser: &mut Parser) -> Result<Selector, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.span.start;

    let mut source = None;
    let mut single = None;
    let mut predicate = None;

    while parser.current_token_kind() != TokenKind::CloseCurly {
        match parser.current_token_kind() {
            TokenKind::Source => {
                parser.advance();
                parse_key_value_separator(parser)?;
                match parser.current_token_kind() {
                    TokenKind::Identifier | TokenKind::String => {
                        source = Some(parser.advance().value.clone());
                    }
                    _ => return Err(parser.syntax_error("zone name")),
                }
            }
            TokenKind::Single => {
                parser.advance();
                parse_key_value_separator(parser)?;
                let expr = parse_expr(parser, BindingPower::Assignment)?;

                if !expr.is_structurally_bool() {
                    return Err(Error::new(
                        ErrorImpl::SyntaxError {
                            expected: String::from("boolean expression for Single"),
                            found: expr.to_string(),
                        },
                        expr.span.start,
                    ));
                }

                single = Some(expr);
            }
            TokenKind::Predicate => {
                parser.advance();
                parse_key_value_separator(parser)?;
                let expr = parse_expr(parser, BindingPower::Assignment)?;

                match expr.kind {
                    ExprKind::Predicate(parsed) => predicate = Some(parsed),
                    kind => {
                        return Err(Error::new(
                            ErrorImpl::SyntaxError {
                                expected: String::from("predicate `(x) => filter`"),
                                found: Expr::new(kind, expr.span.clone()).to_string(),
                            },
                            expr.span.start,
                        ))
                    }
                }
            }
            _ => return Err(parser.syntax_error("Source, Single or Predicate")),
        }
        skip_separator(parser);
    }

    let closing = parser.expect(TokenKind::CloseCurly)?;
    let source = source.ok_or_else(|| missing_key("Source", &closing))?;

    Ok(Selector {
        source,
        single,
        predicate,
        span: Span {
            start,
            end: closing.span.end,
        },
    })
}

/// An activation block; `parent` is set for blocks nested as `PostAction`.
pub fn parse_activation_block(
    parser: &mut Parser,
    parent: Option<NodeId>,
) -> Result<ActivationBlock, Error> {
    let start: Position = parser.expect(TokenKind::OpenCurly)?.span.start;
    let id = parser.advance_id();

    let mut effect = None;
    let mut selector = None;
    let mut post_action = None;

    while parser.current_token_kind() != TokenKind::CloseCurly {
        match parser.current_token_kind() {
            TokenKind::EffectKeyword => {
                parser.advance();
                parse_key_value_separator(parser)?;
                effect = Some(parse_effect_builder(parser)?);
            }
            TokenKind::Selector => {
                parser.advance();
                parse_key_value_separator(parser)?;
                selector = Some(parse_selector(parser)?);
            }
            TokenKind::PostAction => {
                parser.advance();
                parse_key_value_separator(parser)?;
                post_action = Some(Box::new(parse_activation_block(parser, Some(id))?));
            }
            _ => return Err(parser.syntax_error("Effect, Selector or PostAction")),
        }
        skip_separator(parser);
    }

    let end = parser.expect(TokenKind::CloseCurly)?.span.end;

    Ok(ActivationBlock {
        id,
        parent,
        effect,
        selector,
        post_action,
        span: Span { start, end },
    })
}
