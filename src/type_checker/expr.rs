use crate::{
    ast::{
        expressions::{Expr, ExprKind, Predicate},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{catalog::ObjectKind, scope::Scope, type_checker::CheckSession};

/// Fails with `TypeMismatchError` unless `found` is `expected`.
pub fn expect_type(expected: Type, found: Type, expr: &Expr) -> Result<(), Error> {
    if expected == found {
        Ok(())
    } else {
        Err(Error::new(
            ErrorImpl::TypeMismatchError {
                expected: expected.to_string(),
                found: found.to_string(),
                expression: expr.to_string(),
            },
            expr.span.start.clone(),
        ))
    }
}

/// Which member table applies to `target`.
///
/// A name registered as a structured kind wins; otherwise cards and card
/// lists are recognised by their type.
fn receiver_kind(scope: &Scope<'_>, target: &Expr, ty: Type) -> Option<ObjectKind> {
    if let ExprKind::Identifier(name) = &target.kind {
        if let Some(kind) = scope.resolve_kind(name) {
            return Some(kind);
        }
    }

    match ty {
        Type::Card => Some(ObjectKind::Card),
        Type::CardList => Some(ObjectKind::CardList),
        _ => None,
    }
}

/// Type of `expr` where a loop-bound card counts as a `Card`.
fn effective_type(scope: &Scope<'_>, expr: &Expr, ty: Type) -> Type {
    if ty == Type::Var && receiver_kind(scope, expr, ty) == Some(ObjectKind::Card) {
        Type::Card
    } else {
        ty
    }
}

/// Type of `target.property`.
pub fn type_check_property(
    session: &CheckSession<'_>,
    scope: &Scope<'_>,
    target: &Expr,
    property: &str,
    position: &Position,
) -> Result<Type, Error> {
    let target_type = type_check_expr(session, scope, target)?;

    receiver_kind(scope, target, target_type)
        .and_then(|kind| session.catalog().property_type(kind, property))
        .ok_or_else(|| {
            Error::new(
                ErrorImpl::UnresolvedPropertyError {
                    target: target.to_string(),
                    property: property.to_string(),
                },
                position.clone(),
            )
        })
}

fn type_check_method_call(
    session: &CheckSession<'_>,
    scope: &Scope<'_>,
    expr: &Expr,
    target: &Expr,
    method: &str,
    args: &[Expr],
) -> Result<Type, Error> {
    let target_type = type_check_expr(session, scope, target)?;

    let signature = receiver_kind(scope, target, target_type)
        .and_then(|kind| session.catalog().method_signature(kind, method))
        .ok_or_else(|| {
            Error::new(
                ErrorImpl::UnresolvedMethodError {
                    target: target.to_string(),
                    method: method.to_string(),
                },
                expr.span.start.clone(),
            )
        })?;

    let mut arg_types = vec![];
    for arg in args {
        let ty = type_check_expr(session, scope, arg)?;
        arg_types.push((effective_type(scope, arg, ty), arg));
    }

    let allowed = if signature.argument == Type::Void { 0 } else { 1 };

    if let Some((found, arg)) = arg_types.get(allowed) {
        // Surplus argument
        return Err(Error::new(
            ErrorImpl::TypeMismatchError {
                expected: Type::Void.to_string(),
                found: found.to_string(),
                expression: arg.to_string(),
            },
            arg.span.start.clone(),
        ));
    }

    match arg_types.first() {
        Some((found, arg)) => expect_type(signature.argument, *found, arg)?,
        None if signature.argument != Type::Void => {
            expect_type(signature.argument, Type::Void, expr)?
        }
        None => {}
    }

    Ok(signature.returns)
}

/// `(target) => filter`: the target is a card, the filter must be boolean.
pub fn type_check_predicate(
    session: &CheckSession<'_>,
    scope: &Scope<'_>,
    predicate: &Predicate,
) -> Result<Type, Error> {
    let mut predicate_scope = scope.child();
    predicate_scope.declare(&predicate.target, Type::Card, &predicate.span.start)?;
    predicate_scope.register_kind(&predicate.target, ObjectKind::Card);

    let filter_type = type_check_expr(session, &predicate_scope, &predicate.filter)?;
    expect_type(Type::Bool, filter_type, &predicate.filter)?;

    Ok(Type::Predicate)
}

pub fn type_check_expr(
    session: &CheckSession<'_>,
    scope: &Scope<'_>,
    expr: &Expr,
) -> Result<Type, Error> {
    match &expr.kind {
        ExprKind::Identifier(name) => scope.resolve(name).ok_or_else(|| {
            Error::new(
                ErrorImpl::UndeclaredVariableError {
                    variable: name.clone(),
                },
                expr.span.start.clone(),
            )
        }),
        ExprKind::Number(_) => Ok(Type::Int),
        ExprKind::String(_) => Ok(Type::Text),
        ExprKind::Boolean(_) => Ok(Type::Bool),
        ExprKind::DataType(ty) => Ok(*ty),
        ExprKind::Unary { operand, .. } => {
            let operand_type = type_check_expr(session, scope, operand)?;
            expect_type(Type::Int, operand_type, operand)?;
            Ok(Type::Int)
        }
        ExprKind::MathBinary { left, right, .. } => {
            let left_type = type_check_expr(session, scope, left)?;
            expect_type(Type::Int, left_type, left)?;
            let right_type = type_check_expr(session, scope, right)?;
            expect_type(Type::Int, right_type, right)?;
            Ok(Type::Int)
        }
        ExprKind::BoolBinary { left, op, right } => {
            let left_type = type_check_expr(session, scope, left)?;
            let right_type = type_check_expr(session, scope, right)?;

            if op.is_equality() {
                let left_type = effective_type(scope, left, left_type);
                let right_type = effective_type(scope, right, right_type);
                expect_type(left_type, right_type, right)?;
            } else {
                let operand_type = if op.is_logical() { Type::Bool } else { Type::Int };
                expect_type(operand_type, left_type, left)?;
                expect_type(operand_type, right_type, right)?;
            }

            Ok(Type::Bool)
        }
        ExprKind::Concat { left, right, .. } => {
            let left_type = type_check_expr(session, scope, left)?;
            expect_type(Type::Text, left_type, left)?;
            let right_type = type_check_expr(session, scope, right)?;
            expect_type(Type::Text, right_type, right)?;
            Ok(Type::Text)
        }
        ExprKind::PropertyAccess { target, property } => {
            type_check_property(session, scope, target, property, &expr.span.start)
        }
        ExprKind::Indexing { collection, index } => {
            let collection_type = type_check_expr(session, scope, collection)?;
            expect_type(Type::CardList, collection_type, collection)?;
            let index_type = type_check_expr(session, scope, index)?;
            expect_type(Type::Int, index_type, index)?;
            Ok(Type::Card)
        }
        ExprKind::MethodCall {
            target,
            method,
            args,
        } => type_check_method_call(session, scope, expr, target, method, args),
        ExprKind::Predicate(predicate) => type_check_predicate(session, scope, predicate),
    }
}
