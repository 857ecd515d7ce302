use std::collections::HashMap;

use crate::{
    ast::types::Type,
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::catalog::ObjectKind;

/// One lexical level of name bindings.
///
/// Besides variable types a scope records which names refer to structured
/// values (a card, the context), so member lookups are resolved through the
/// same chain as the variables themselves and never leak between siblings.
/// A child borrows its parent, so no scope can outlive the traversal that
/// opened it.
#[derive(Debug, Default)]
pub struct Scope<'a> {
    vars: HashMap<String, Type>,
    kinds: HashMap<String, ObjectKind>,
    parent: Option<&'a Scope<'a>>,
}

impl<'a> Scope<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a scope nested in this one.
    pub fn child(&self) -> Scope<'_> {
        Scope {
            vars: HashMap::new(),
            kinds: HashMap::new(),
            parent: Some(self),
        }
    }

    /// Binds `name` in this scope.
    ///
    /// Rebinding a name this scope already holds is a no-op when the type
    /// is unchanged and a `RedeclarationError` otherwise. Bindings in outer
    /// scopes are shadowed, not checked.
    pub fn declare(&mut self, name: &str, ty: Type, position: &Position) -> Result<(), Error> {
        match self.vars.get(name) {
            Some(existing) if *existing != ty => Err(Error::new(
                ErrorImpl::RedeclarationError {
                    name: name.to_string(),
                    existing: existing.to_string(),
                    attempted: ty.to_string(),
                },
                position.clone(),
            )),
            Some(_) => Ok(()),
            None => {
                self.vars.insert(name.to_string(), ty);
                Ok(())
            }
        }
    }

    /// Nearest binding of `name`, searching outward.
    pub fn resolve(&self, name: &str) -> Option<Type> {
        match self.vars.get(name) {
            Some(ty) => Some(*ty),
            None => self.parent.and_then(|parent| parent.resolve(name)),
        }
    }

    pub fn contains_var(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    pub fn register_kind(&mut self, name: &str, kind: ObjectKind) {
        self.kinds.insert(name.to_string(), kind);
    }

    /// Structured kind of the nearest binding of `name`.
    pub fn resolve_kind(&self, name: &str) -> Option<ObjectKind> {
        if self.vars.contains_key(name) {
            return self.kinds.get(name).copied();
        }
        self.parent.and_then(|parent| parent.resolve_kind(name))
    }
}
