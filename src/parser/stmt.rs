use crate::{
    ast::{
        expressions::{ArithOp, Expr, ExprKind, UnaryOp},
        statements::{Block, LValue, Stmt, StmtKind},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::parser::Parser;

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let kind = parser.current_token_kind();
    if let Some(stmt_fn) = parser.get_stmt_lookup().get(&kind).copied() {
        return stmt_fn(parser);
    }

    let start = parser.get_position();
    let expr = parse_expr(parser, BindingPower::Assignment)?;

    // One token of lookahead separates assignments from expression statements
    let operator = parser.current_token_kind();
    let kind = if operator.is_assignment_operator() {
        let target = into_lvalue(expr)?;
        parser.advance();
        let value = parse_expr(parser, BindingPower::Assignment)?;

        match ArithOp::from_token(operator) {
            Some(op) => StmtKind::CompoundAssignment { target, op, value },
            None => StmtKind::Assignment { target, value },
        }
    } else {
        if !is_effectful(&expr) {
            return Err(Error::new(
                ErrorImpl::SyntaxError {
                    expected: String::from("assignment, method call or property access"),
                    found: expr.to_string(),
                },
                expr.span.start,
            ));
        }

        StmtKind::ExpressionStatement(expr)
    };

    let end = parser.expect(TokenKind::Semicolon)?.span.end;

    Ok(Stmt::new(kind, Span { start, end }))
}

fn into_lvalue(expr: Expr) -> Result<LValue, Error> {
    match expr.kind {
        ExprKind::Identifier(name) => Ok(LValue::Identifier(name)),
        ExprKind::PropertyAccess { target, property } => {
            Ok(LValue::PropertyAccess { target, property })
        }
        kind => {
            let found = Expr::new(kind, expr.span.clone()).to_string();
            Err(Error::new(
                ErrorImpl::SyntaxError {
                    expected: String::from("identifier or property access"),
                    found,
                },
                expr.span.start,
            ))
        }
    }
}

/// Method calls, property accesses and `++`/`--` on an assignable operand.
fn is_effectful(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::MethodCall { .. } | ExprKind::PropertyAccess { .. } => true,
        ExprKind::Unary {
            op: UnaryOp::Increment | UnaryOp::Decrement,
            operand,
            ..
        } => matches!(
            operand.kind,
            ExprKind::Identifier(_) | ExprKind::PropertyAccess { .. }
        ),
        _ => false,
    }
}

/// Parses `{ stmt* }` (optionally followed by `;`) or a single statement.
pub fn parse_block(parser: &mut Parser) -> Result<Block, Error> {
    let start = parser.get_position();

    if parser.current_token_kind() != TokenKind::OpenCurly {
        let stmt = parse_stmt(parser)?;
        let end = stmt.span.end.clone();

        return Ok(Block {
            statements: vec![stmt],
            span: Span { start, end },
        });
    }

    parser.advance();

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if !parser.has_tokens() {
            return Err(parser.syntax_error(TokenKind::CloseCurly.to_string()));
        }
        statements.push(parse_stmt(parser)?);
    }

    let end = parser.expect(TokenKind::CloseCurly)?.span.end;
    parser.eat(TokenKind::Semicolon);

    Ok(Block {
        statements,
        span: Span { start, end },
    })
}

pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    parser.expect(TokenKind::OpenParen)?;
    let variable = parser.expect(TokenKind::Identifier)?.value;
    parser.expect(TokenKind::In)?;
    let collection = parse_expr(parser, BindingPower::Assignment)?;
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_block(parser)?;
    let end = body.span.end.clone();

    Ok(Stmt::new(
        StmtKind::For {
            variable,
            collection,
            body,
        },
        Span { start, end },
    ))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    parser.expect(TokenKind::OpenParen)?;
    let condition = parse_expr(parser, BindingPower::Assignment)?;
    parser.expect(TokenKind::CloseParen)?;

    let body = parse_block(parser)?;
    let end = body.span.end.clone();

    Ok(Stmt::new(
        StmtKind::While { condition, body },
        Span { start, end },
    ))
}
