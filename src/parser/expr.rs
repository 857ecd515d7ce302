use crate::{
    ast::{
        expressions::{ArithOp, BoolOp, Expr, ExprKind, Predicate, UnaryOp},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud_fn) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.syntax_error("expression"));
    };

    let mut left = nud_fn(parser)?;

    // While the next operator binds tighter than the current level, extend lhs
    loop {
        let token_kind = parser.current_token_kind();
        let Some(next_bp) = parser.get_bp_lookup().get(&token_kind).copied() else {
            break;
        };
        if next_bp <= bp {
            break;
        }

        let Some(led_fn) = parser.get_led_lookup().get(&token_kind).copied() else {
            return Err(parser.syntax_error("operator"));
        };

        left = led_fn(parser, left, next_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance().clone();

    let kind = match token.kind {
        TokenKind::Number => match token.value.parse::<i64>() {
            Ok(value) => ExprKind::Number(value),
            Err(_) => {
                return Err(Error::new(
                    ErrorImpl::NumberParseError { token: token.value },
                    token.span.start,
                ))
            }
        },
        TokenKind::Identifier => ExprKind::Identifier(token.value),
        TokenKind::String => ExprKind::String(token.value),
        TokenKind::True => ExprKind::Boolean(true),
        TokenKind::False => ExprKind::Boolean(false),
        _ => {
            return Err(Error::new(
                ErrorImpl::SyntaxError {
                    expected: String::from("literal or identifier"),
                    found: token.kind.to_string(),
                },
                token.span.start,
            ))
        }
    };

    Ok(Expr::new(kind, token.span))
}

pub fn parse_data_type_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance().clone();

    let ty = match token.kind {
        TokenKind::NumberType => Type::Int,
        TokenKind::StringType => Type::Text,
        _ => Type::Bool,
    };

    Ok(Expr::new(ExprKind::DataType(ty), token.span))
}

/// Builds either a `MathBinary` or a `BoolBinary` depending on the operator.
pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();

    let right = parse_expr(parser, bp)?;

    let span = Span {
        start: left.span.start.clone(),
        end: right.span.end.clone(),
    };

    let kind = if let Some(op) = BoolOp::from_token(operator_token.kind) {
        ExprKind::BoolBinary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    } else if let Some(op) = ArithOp::from_token(operator_token.kind) {
        ExprKind::MathBinary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    } else {
        return Err(Error::new(
            ErrorImpl::SyntaxError {
                expected: String::from("binary operator"),
                found: operator_token.kind.to_string(),
            },
            operator_token.span.start,
        ));
    };

    Ok(Expr::new(kind, span))
}

/// `a @ b @ c` nests to the right: `a @ (b @ c)`.
///
/// Concatenation deliberately binds tighter than comparison, so
/// `x == "a" @@ "b"` compares against the joined text instead of
/// concatenating onto a boolean.
pub fn parse_concat_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();

    // One level below concat so a following `@` is taken by the right side
    let right = parse_expr(parser, BindingPower::Additive)?;

    let span = Span {
        start: left.span.start.clone(),
        end: right.span.end.clone(),
    };

    Ok(Expr::new(
        ExprKind::Concat {
            left: Box::new(left),
            right: Box::new(right),
            is_comparative: operator_token.kind == TokenKind::CompConcat,
        },
        span,
    ))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let operand = parse_expr(parser, BindingPower::Unary)?;

    let op = match operator_token.kind {
        TokenKind::PlusPlus => UnaryOp::Increment,
        TokenKind::MinusMinus => UnaryOp::Decrement,
        _ => UnaryOp::Negate,
    };

    let span = Span {
        start: operator_token.span.start,
        end: operand.span.end.clone(),
    };

    Ok(Expr::new(
        ExprKind::Unary {
            op,
            operand: Box::new(operand),
            is_postfix: false,
        },
        span,
    ))
}

pub fn parse_postfix_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();

    let op = if operator_token.kind == TokenKind::PlusPlus {
        UnaryOp::Increment
    } else {
        UnaryOp::Decrement
    };

    let span = Span {
        start: left.span.start.clone(),
        end: operator_token.span.end,
    };

    Ok(Expr::new(
        ExprKind::Unary {
            op,
            operand: Box::new(left),
            is_postfix: true,
        },
        span,
    ))
}

/// Parenthesised expression, or a predicate literal `(x) => filter`.
///
/// A predicate is only recognised once the closing parenthesis has been
/// consumed and the next token is `=>`, so the parser never needs more
/// than one token of lookahead.
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start.clone();
    let inner = parse_expr(parser, BindingPower::Assignment)?;
    parser.expect(TokenKind::CloseParen)?;

    if parser.current_token_kind() != TokenKind::Arrow {
        return Ok(inner);
    }

    let target = match &inner.kind {
        ExprKind::Identifier(name) => name.clone(),
        _ => {
            return Err(Error::new(
                ErrorImpl::SyntaxError {
                    expected: String::from("single identifier before `=>`"),
                    found: inner.to_string(),
                },
                inner.span.start,
            ))
        }
    };

    parser.advance();
    let filter = parse_expr(parser, BindingPower::Assignment)?;

    if !filter.is_structurally_bool() {
        return Err(Error::new(
            ErrorImpl::SyntaxError {
                expected: String::from("boolean predicate filter"),
                found: filter.to_string(),
            },
            filter.span.start,
        ));
    }

    let span = Span {
        start,
        end: filter.span.end.clone(),
    };

    Ok(Expr::new(
        ExprKind::Predicate(Predicate {
            target,
            filter: Box::new(filter),
            span: span.clone(),
        }),
        span,
    ))
}

/// Reads a property name after `.`; key keywords such as `Power` count as names.
pub fn parse_property_name(parser: &mut Parser) -> Result<String, Error> {
    let kind = parser.current_token_kind();
    if kind == TokenKind::Identifier || kind.is_property_key() {
        Ok(parser.advance().value.clone())
    } else {
        Err(parser.syntax_error("property name"))
    }
}

/// `target.property` or `target.method(args)`.
pub fn parse_member_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let name = parse_property_name(parser)?;

    if parser.current_token_kind() != TokenKind::OpenParen {
        let span = Span {
            start: left.span.start.clone(),
            end: parser.previous_end(),
        };

        return Ok(Expr::new(
            ExprKind::PropertyAccess {
                target: Box::new(left),
                property: name,
            },
            span,
        ));
    }

    parser.advance();

    let mut args = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
            continue;
        }

        args.push(parse_expr(parser, BindingPower::Assignment)?);
    }

    let end = parser.expect(TokenKind::CloseParen)?.span.end;

    let span = Span {
        start: left.span.start.clone(),
        end,
    };

    Ok(Expr::new(
        ExprKind::MethodCall {
            target: Box::new(left),
            method: name,
            args,
        },
        span,
    ))
}

pub fn parse_index_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let index = parse_expr(parser, BindingPower::Assignment)?;
    let end = parser.expect(TokenKind::CloseBracket)?.span.end;

    let span = Span {
        start: left.span.start.clone(),
        end,
    };

    Ok(Expr::new(
        ExprKind::Indexing {
            collection: Box::new(left),
            index: Box::new(index),
        },
        span,
    ))
}
