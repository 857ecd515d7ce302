use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::SyntaxError { .. } => "SyntaxError",
            ErrorImpl::RedeclarationError { .. } => "RedeclarationError",
            ErrorImpl::TypeMismatchError { .. } => "TypeMismatchError",
            ErrorImpl::ContractMismatchError { .. } => "ContractMismatchError",
            ErrorImpl::MissingSelectorError => "MissingSelectorError",
            ErrorImpl::UnresolvedPropertyError { .. } => "UnresolvedPropertyError",
            ErrorImpl::UnresolvedMethodError { .. } => "UnresolvedMethodError",
            ErrorImpl::UndeclaredVariableError { .. } => "UndeclaredVariableError",
            ErrorImpl::UndeclaredEffectError { .. } => "UndeclaredEffectError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::SyntaxError { expected, found } => ErrorTip::Suggestion(format!(
                "Expected {} on line {}, found `{}`",
                expected, self.position.line, found
            )),
            ErrorImpl::RedeclarationError {
                name,
                existing,
                attempted,
            } => ErrorTip::Suggestion(format!(
                "`{}` is already `{}` in this scope and cannot become `{}`",
                name, existing, attempted
            )),
            ErrorImpl::TypeMismatchError {
                expected,
                found,
                expression,
            } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, found `{}` in `{}`",
                expected, found, expression
            )),
            ErrorImpl::ContractMismatchError { effect, missing } => {
                ErrorTip::Suggestion(format!(
                    "Effect `{}` requires parameters that were not supplied: {}",
                    effect,
                    missing.join(", ")
                ))
            }
            ErrorImpl::MissingSelectorError => ErrorTip::Suggestion(String::from(
                "Only a PostAction may omit its Selector",
            )),
            ErrorImpl::UnresolvedPropertyError { target, property } => ErrorTip::Suggestion(
                format!("`{}` has no property `{}`", target, property),
            ),
            ErrorImpl::UnresolvedMethodError { target, method } => {
                ErrorTip::Suggestion(format!("`{}` has no method `{}`", target, method))
            }
            ErrorImpl::UndeclaredVariableError { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::UndeclaredEffectError { effect } => {
                ErrorTip::Suggestion(format!("Effect `{}` is never declared", effect))
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (line {})", self.internal_error, self.position.line)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("syntax error: expected {expected}, found {found:?}")]
    SyntaxError { expected: String, found: String },
    #[error("{name:?} is already declared as {existing} in this scope, cannot redeclare as {attempted}")]
    RedeclarationError {
        name: String,
        existing: String,
        attempted: String,
    },
    #[error("types do not match: expected {expected}, found {found} in {expression:?}")]
    TypeMismatchError {
        expected: String,
        found: String,
        expression: String,
    },
    #[error("effect {effect:?} is missing parameters {missing:?}")]
    ContractMismatchError { effect: String, missing: Vec<String> },
    #[error("activation block has no selector and no parent to inherit one from")]
    MissingSelectorError,
    #[error("{target:?} has no property {property:?}")]
    UnresolvedPropertyError { target: String, property: String },
    #[error("{target:?} has no method {method:?}")]
    UnresolvedMethodError { target: String, method: String },
    #[error("variable {variable:?} not declared")]
    UndeclaredVariableError { variable: String },
    #[error("effect {effect:?} not declared")]
    UndeclaredEffectError { effect: String },
}
