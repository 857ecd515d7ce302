use crate::{
    ast::{
        expressions::ExprKind,
        statements::{Block, LValue, Stmt, StmtKind},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{
    catalog::ObjectKind,
    expr::{expect_type, type_check_expr, type_check_property},
    scope::Scope,
    type_checker::CheckSession,
};

fn lvalue_type(
    session: &CheckSession<'_>,
    scope: &Scope<'_>,
    target: &LValue,
    position: &Position,
) -> Result<Type, Error> {
    match target {
        LValue::Identifier(name) => scope.resolve(name).ok_or_else(|| {
            Error::new(
                ErrorImpl::UndeclaredVariableError {
                    variable: name.clone(),
                },
                position.clone(),
            )
        }),
        LValue::PropertyAccess { target, property } => {
            type_check_property(session, scope, target, property, position)
        }
    }
}

/// Checks statements in order inside `scope`, without opening a new one.
pub fn type_check_stmts(
    session: &CheckSession<'_>,
    scope: &mut Scope<'_>,
    statements: &[Stmt],
) -> Result<(), Error> {
    for stmt in statements {
        type_check_stmt(session, scope, stmt)?;
    }

    Ok(())
}

/// Checks a block in a fresh child scope.
pub fn type_check_block(
    session: &CheckSession<'_>,
    scope: &Scope<'_>,
    block: &Block,
) -> Result<(), Error> {
    let mut block_scope = scope.child();
    type_check_stmts(session, &mut block_scope, &block.statements)
}

pub fn type_check_stmt(
    session: &CheckSession<'_>,
    scope: &mut Scope<'_>,
    stmt: &Stmt,
) -> Result<(), Error> {
    match &stmt.kind {
        StmtKind::For {
            variable,
            collection,
            body,
        } => {
            let collection_type = type_check_expr(session, scope, collection)?;

            // An untyped value may be iterated, a structured one never
            let untracked = collection_type == Type::Var
                && match &collection.kind {
                    ExprKind::Identifier(name) => scope.resolve_kind(name).is_none(),
                    _ => true,
                };
            if !untracked {
                expect_type(Type::CardList, collection_type, collection)?;
            }

            let mut loop_scope = scope.child();
            loop_scope.declare(variable, Type::Var, &stmt.span.start)?;
            if collection_type == Type::CardList {
                loop_scope.register_kind(variable, ObjectKind::Card);
            }

            type_check_block(session, &loop_scope, body)
        }
        StmtKind::While { condition, body } => {
            let condition_type = type_check_expr(session, scope, condition)?;
            expect_type(Type::Bool, condition_type, condition)?;

            type_check_block(session, scope, body)
        }
        StmtKind::Assignment { target, value } => {
            let value_type = type_check_expr(session, scope, value)?;

            match target {
                LValue::Identifier(name) => {
                    scope.declare(name, value_type, &stmt.span.start)?;

                    // Aliases of a structured value keep its members
                    if let ExprKind::Identifier(source) = &value.kind {
                        if let Some(kind) = scope.resolve_kind(source) {
                            scope.register_kind(name, kind);
                        }
                    }

                    Ok(())
                }
                LValue::PropertyAccess { .. } => {
                    let target_type = lvalue_type(session, scope, target, &stmt.span.start)?;
                    expect_type(target_type, value_type, value)
                }
            }
        }
        StmtKind::CompoundAssignment { target, value, .. } => {
            let target_type = lvalue_type(session, scope, target, &stmt.span.start)?;
            if target_type != Type::Int {
                return Err(Error::new(
                    ErrorImpl::TypeMismatchError {
                        expected: Type::Int.to_string(),
                        found: target_type.to_string(),
                        expression: target.to_string(),
                    },
                    stmt.span.start.clone(),
                ));
            }

            let value_type = type_check_expr(session, scope, value)?;
            expect_type(Type::Int, value_type, value)
        }
        StmtKind::ExpressionStatement(expr) => {
            type_check_expr(session, scope, expr)?;
            Ok(())
        }
    }
}
