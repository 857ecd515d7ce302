use std::collections::HashMap;

use crate::{
    ast::{
        ast::{
            ActionBlock, ActivationBlock, CardDecl, EffectBuilder, EffectDecl, NodeId, Program,
            Selector, TopLevelDecl,
        },
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{
    catalog::{BuiltinCatalog, ObjectKind, TypeCatalog},
    expr::{expect_type, type_check_expr, type_check_predicate},
    scope::Scope,
    stmt::type_check_stmts,
};

/// An effect's declared parameters, in declaration order.
pub type Contract = Vec<(String, Type)>;

/// Structured kinds bound by name inside one effect's action.
pub type KindRegistry = HashMap<String, ObjectKind>;

/// State owned by one `check` run.
///
/// Holds the effect contracts recorded so far, the structured kinds each
/// action binds and the selector each activation block resolved to. Nothing here is shared between runs, so
/// separate programs can be checked independently. After a successful check
/// the session is handed back so later stages can reuse what it learned.
pub struct CheckSession<'ast> {
    catalog: Box<dyn TypeCatalog>,
    contracts: HashMap<String, Contract>,
    action_kinds: HashMap<String, KindRegistry>,
    resolved_selectors: HashMap<NodeId, &'ast Selector>,
}

impl std::fmt::Debug for CheckSession<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckSession")
            .field("contracts", &self.contracts)
            .field("action_kinds", &self.action_kinds)
            .field("resolved_selectors", &self.resolved_selectors)
            .finish_non_exhaustive()
    }
}

impl<'ast> CheckSession<'ast> {
    pub fn new(catalog: Box<dyn TypeCatalog>) -> Self {
        CheckSession {
            catalog,
            contracts: HashMap::new(),
            action_kinds: HashMap::new(),
            resolved_selectors: HashMap::new(),
        }
    }

    pub fn catalog(&self) -> &dyn TypeCatalog {
        self.catalog.as_ref()
    }

    /// The recorded parameters of `effect`.
    pub fn contract(&self, effect: &str) -> Option<&Contract> {
        self.contracts.get(effect)
    }

    /// The structured kinds `effect`'s action parameters are bound to.
    pub fn action_kinds(&self, effect: &str) -> Option<&KindRegistry> {
        self.action_kinds.get(effect)
    }

    /// The selector an activation block resolved to, own or inherited.
    pub fn resolved_selector(&self, block: NodeId) -> Option<&'ast Selector> {
        self.resolved_selectors.get(&block).copied()
    }

    fn check_declaration(&mut self, declaration: &'ast TopLevelDecl) -> Result<(), Error> {
        match declaration {
            TopLevelDecl::Effect(effect) => self.check_effect(effect),
            TopLevelDecl::Card(card) => self.check_card(card),
        }
    }

    /// Records the effect's contract, then checks its action body.
    ///
    /// The contract is stored before the body is visited so an action can
    /// be checked against a complete table.
    fn check_effect(&mut self, effect: &'ast EffectDecl) -> Result<(), Error> {
        let mut effect_scope = Scope::new();
        let mut contract = Contract::new();

        for param in &effect.params {
            let ty = type_check_expr(self, &effect_scope, &param.value)?;
            effect_scope.declare(&param.name, ty, &param.span.start)?;

            match contract.iter_mut().find(|(name, _)| *name == param.name) {
                Some(entry) => entry.1 = ty,
                None => contract.push((param.name.clone(), ty)),
            }
        }

        self.contracts.insert(effect.name.clone(), contract);

        let mut kinds = KindRegistry::new();
        kinds.insert(effect.action.target_param.clone(), ObjectKind::CardList);
        kinds.insert(effect.action.context_param.clone(), ObjectKind::Context);
        self.action_kinds.insert(effect.name.clone(), kinds);

        self.check_action(&effect_scope, &effect.action)
    }

    fn check_action(&self, scope: &Scope<'_>, action: &ActionBlock) -> Result<(), Error> {
        let mut action_scope = scope.child();

        action_scope.declare(&action.target_param, Type::CardList, &action.span.start)?;
        action_scope.declare(&action.context_param, Type::Var, &action.span.start)?;
        action_scope.register_kind(&action.context_param, ObjectKind::Context);

        type_check_stmts(self, &mut action_scope, &action.body.statements)
    }

    fn check_card(&mut self, card: &'ast CardDecl) -> Result<(), Error> {
        let card_scope = Scope::new();

        let name_type = type_check_expr(self, &card_scope, &card.name)?;
        expect_type(Type::Text, name_type, &card.name)?;

        if let Some(power) = &card.power {
            let power_type = type_check_expr(self, &card_scope, power)?;
            expect_type(Type::Int, power_type, power)?;
        }

        for effect in &card.effect_refs {
            if !self.contracts.contains_key(effect) {
                return Err(Error::new(
                    ErrorImpl::UndeclaredEffectError {
                        effect: effect.clone(),
                    },
                    card.span.start.clone(),
                ));
            }
        }

        for block in &card.on_activation {
            self.check_activation(&card_scope, block)?;
        }

        Ok(())
    }

    /// Checks the effect call, then the selector, then the follow-up block.
    ///
    /// A block without its own selector takes the one its parent resolved
    /// to; a block with neither fails with `MissingSelectorError`. The
    /// result is recorded once per block and never recomputed.
    fn check_activation(
        &mut self,
        scope: &Scope<'_>,
        block: &'ast ActivationBlock,
    ) -> Result<(), Error> {
        let block_scope = scope.child();

        if let Some(builder) = &block.effect {
            self.check_effect_builder(&block_scope, builder)?;
        }

        let selector = match (&block.selector, block.parent) {
            (Some(selector), _) => {
                self.check_selector(&block_scope, selector)?;
                selector
            }
            (None, Some(parent)) => self
                .resolved_selector(parent)
                .ok_or_else(|| Error::new(ErrorImpl::MissingSelectorError, block.span.start.clone()))?,
            (None, None) => {
                return Err(Error::new(
                    ErrorImpl::MissingSelectorError,
                    block.span.start.clone(),
                ))
            }
        };

        self.resolved_selectors.insert(block.id, selector);

        if let Some(post_action) = &block.post_action {
            self.check_activation(&block_scope, post_action)?;
        }

        Ok(())
    }

    /// Every declared parameter must be supplied with the declared type.
    /// Extra bindings are accepted.
    fn check_effect_builder(&self, scope: &Scope<'_>, builder: &EffectBuilder) -> Result<(), Error> {
        let Some(contract) = self.contracts.get(&builder.name) else {
            return Err(Error::new(
                ErrorImpl::UndeclaredEffectError {
                    effect: builder.name.clone(),
                },
                builder.span.start.clone(),
            ));
        };

        let mut builder_scope = scope.child();
        let mut supplied = vec![];

        for assignment in &builder.assignments {
            let ty = type_check_expr(self, &builder_scope, &assignment.value)?;
            builder_scope.declare(&assignment.name, ty, &assignment.span.start)?;
            supplied.push((assignment.name.clone(), ty));
        }

        let missing: Vec<String> = contract
            .iter()
            .filter(|param| !supplied.contains(param))
            .map(|(name, ty)| format!("{}: {}", name, ty))
            .collect();

        if !missing.is_empty() {
            return Err(Error::new(
                ErrorImpl::ContractMismatchError {
                    effect: builder.name.clone(),
                    missing,
                },
                builder.span.start.clone(),
            ));
        }

        Ok(())
    }

    fn check_selector(&self, scope: &Scope<'_>, selector: &Selector) -> Result<(), Error> {
        if !self.catalog.is_zone(&selector.source) {
            return Err(Error::new(
                ErrorImpl::UnresolvedPropertyError {
                    target: String::from("Source"),
                    property: selector.source.clone(),
                },
                selector.span.start.clone(),
            ));
        }

        if let Some(single) = &selector.single {
            let single_type = type_check_expr(self, scope, single)?;
            expect_type(Type::Bool, single_type, single)?;
        }

        if let Some(predicate) = &selector.predicate {
            type_check_predicate(self, scope, predicate)?;
        }

        Ok(())
    }
}

/// Checks a parsed program against the builtin engine API.
///
/// Declarations are visited in program order, which lists every effect
/// before every card. The first violation aborts the check.
pub fn check(program: &Program) -> Result<CheckSession<'_>, Error> {
    check_with_catalog(program, Box::new(BuiltinCatalog))
}

/// Like [`check`], with a host-supplied catalog.
pub fn check_with_catalog(
    program: &Program,
    catalog: Box<dyn TypeCatalog>,
) -> Result<CheckSession<'_>, Error> {
    let mut session = CheckSession::new(catalog);

    for declaration in &program.declarations {
        session.check_declaration(declaration)?;
    }

    Ok(session)
}
