//! Unit tests for the semantic checker.
//!
//! This module contains tests for:
//! - Scope declaration, shadowing and kind lookup
//! - Effect contracts and their call sites
//! - Selector resolution along `PostAction` chains
//! - Expression and statement typing inside action bodies
//! - Catalog lookups for properties and methods

use std::rc::Rc;

use pretty_assertions::assert_eq;

use super::{
    catalog::{BuiltinCatalog, MethodSignature, ObjectKind, TypeCatalog},
    scope::Scope,
    type_checker::{check, check_with_catalog},
};
use crate::{
    ast::{
        ast::{Program, TopLevelDecl},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
    parser::parser::parse,
    Position,
};

fn parse_source(source: &str) -> Program {
    let tokens = tokenize(source.to_string(), Some("test.cards".to_string())).unwrap();
    parse(tokens, Rc::new("test.cards".to_string())).unwrap()
}

fn check_source(source: &str) -> Result<(), Error> {
    let program = parse_source(source);
    check(&program)?;
    Ok(())
}

fn check_error(source: &str) -> ErrorImpl {
    check_source(source).unwrap_err().get_kind().clone()
}

/// Wraps `body` in an effect whose action binds `targets` and `context`.
fn action(body: &str) -> String {
    format!(
        "effect {{ Name: \"Test\", Params: {{ Amount: Number }}, Action: (targets, context) => {{ {} }} }}",
        body
    )
}

const DAMAGE: &str = "effect {
    Name: \"Damage\",
    Params: { Amount: Number },
    Action: (targets, context) => {
        for (target in targets) {
            i = 0;
            while (i < Amount) {
                target.Power -= 1;
                i++;
            };
        };
    }
}";

fn card_with_activation(activation: &str) -> String {
    format!(
        "{}\ncard {{ Name: \"Beluga\", Type: \"Oro\", Power: 10, OnActivation: [ {} ] }}",
        DAMAGE, activation
    )
}

fn position() -> Position {
    Position::new(0, 1, Rc::new("test.cards".to_string()))
}

#[test]
fn test_scope_declare_and_resolve() {
    let mut root = Scope::new();
    root.declare("x", Type::Int, &position()).unwrap();

    let mut child = root.child();
    child.declare("y", Type::Text, &position()).unwrap();

    assert_eq!(child.resolve("x"), Some(Type::Int));
    assert_eq!(child.resolve("y"), Some(Type::Text));
    assert!(child.contains_var("x"));
    assert!(!root.contains_var("y"));
}

#[test]
fn test_scope_redeclaration() {
    let mut scope = Scope::new();
    scope.declare("x", Type::Int, &position()).unwrap();

    assert!(scope.declare("x", Type::Int, &position()).is_ok());

    let error = scope.declare("x", Type::Text, &position()).unwrap_err();
    assert_eq!(
        error.get_kind(),
        &ErrorImpl::RedeclarationError {
            name: "x".to_string(),
            existing: "Int".to_string(),
            attempted: "Text".to_string(),
        }
    );
}

#[test]
fn test_scope_shadowing() {
    let mut root = Scope::new();
    root.declare("x", Type::Int, &position()).unwrap();
    root.register_kind("x", ObjectKind::Context);

    let mut child = root.child();
    child.declare("x", Type::Text, &position()).unwrap();

    assert_eq!(child.resolve("x"), Some(Type::Text));
    assert_eq!(child.resolve_kind("x"), None);
    assert_eq!(root.resolve_kind("x"), Some(ObjectKind::Context));
}

#[test]
fn test_builtin_catalog() {
    let catalog = BuiltinCatalog;

    assert_eq!(catalog.property_type(ObjectKind::Card, "Power"), Some(Type::Int));
    assert_eq!(catalog.property_type(ObjectKind::Context, "Hand"), Some(Type::CardList));
    assert_eq!(catalog.property_type(ObjectKind::Card, "Hand"), None);
    assert_eq!(
        catalog.method_signature(ObjectKind::CardList, "Find"),
        Some(MethodSignature::new(Type::Predicate, Type::CardList))
    );
    assert_eq!(catalog.method_signature(ObjectKind::Context, "Push"), None);
    assert!(catalog.is_zone("otherField"));
    assert!(!catalog.is_zone("graveyard"));
}

#[test]
fn test_effect_contract_recorded() {
    let program = parse_source(
        "effect { Name: \"Buff\", Params: { Amount: Number, Tag = \"x\", Loud = true }, Action: (t, c) => { } }",
    );
    let session = check(&program).unwrap();

    assert_eq!(
        session.contract("Buff"),
        Some(&vec![
            ("Amount".to_string(), Type::Int),
            ("Tag".to_string(), Type::Text),
            ("Loud".to_string(), Type::Bool),
        ])
    );
    assert_eq!(session.contract("Missing"), None);

    let kinds = session.action_kinds("Buff").unwrap();
    assert_eq!(kinds.get("t"), Some(&ObjectKind::CardList));
    assert_eq!(kinds.get("c"), Some(&ObjectKind::Context));
    assert_eq!(session.action_kinds("Missing"), None);
}

#[test]
fn test_contract_missing_parameter() {
    let error = check_error(&card_with_activation(
        "{ Effect: \"Damage\", Selector: { Source: board } }",
    ));

    assert_eq!(
        error,
        ErrorImpl::ContractMismatchError {
            effect: "Damage".to_string(),
            missing: vec!["Amount: Int".to_string()],
        }
    );
}

#[test]
fn test_contract_wrong_parameter_type() {
    let error = check_error(&card_with_activation(
        "{ Effect: { Name: \"Damage\", Amount: \"five\" }, Selector: { Source: board } }",
    ));

    assert!(matches!(error, ErrorImpl::ContractMismatchError { .. }));
}

#[test]
fn test_contract_satisfied_with_extra_bindings() {
    let result = check_source(&card_with_activation(
        "{ Effect: { Name: \"Damage\", Amount: 5, Reason: \"spite\" }, Selector: { Source: board } }",
    ));

    assert!(result.is_ok());
}

#[test]
fn test_undeclared_effect() {
    let error = check_error(
        "card { Name: \"C\", Type: \"Gold\", OnActivation: [{ Effect: \"Heal\", Selector: { Source: hand } }] }",
    );

    assert_eq!(
        error,
        ErrorImpl::UndeclaredEffectError {
            effect: "Heal".to_string()
        }
    );

    let error = check_error("card { Name: \"C\", Type: \"Gold\", Effect: \"Heal\" }");
    assert!(matches!(error, ErrorImpl::UndeclaredEffectError { .. }));
}

#[test]
fn test_card_may_reference_later_effect() {
    let source = format!(
        "card {{ Name: \"Early\", Type: \"Gold\", Effect: \"Damage\", OnActivation: [{{ Effect: {{ Name: \"Damage\", Amount: 2 }}, Selector: {{ Source: field }} }}] }}\n{}",
        DAMAGE
    );

    assert!(check_source(&source).is_ok());
}

#[test]
fn test_post_action_inherits_parent_selector() {
    let program = parse_source(&card_with_activation(
        "{
            Effect: { Name: \"Damage\", Amount: 1 },
            Selector: { Source: board, Single: false },
            PostAction: {
                Effect: { Name: \"Damage\", Amount: 2 },
                PostAction: { Effect: { Name: \"Damage\", Amount: 3 } }
            }
        }",
    ));
    let session = check(&program).unwrap();

    let TopLevelDecl::Card(card) = &program.declarations[1] else {
        panic!("expected the card second");
    };
    let root = &card.on_activation[0];
    let post = root.post_action.as_ref().unwrap();
    let last = post.post_action.as_ref().unwrap();
    let own = root.selector.as_ref().unwrap();

    assert!(std::ptr::eq(session.resolved_selector(root.id).unwrap(), own));
    assert!(std::ptr::eq(session.resolved_selector(post.id).unwrap(), own));
    assert!(std::ptr::eq(session.resolved_selector(last.id).unwrap(), own));
}

#[test]
fn test_post_action_own_selector_wins() {
    let program = parse_source(&card_with_activation(
        "{
            Effect: { Name: \"Damage\", Amount: 1 },
            Selector: { Source: board },
            PostAction: { Effect: { Name: \"Damage\", Amount: 2 }, Selector: { Source: hand } }
        }",
    ));
    let session = check(&program).unwrap();

    let TopLevelDecl::Card(card) = &program.declarations[1] else {
        panic!("expected the card second");
    };
    let post = card.on_activation[0].post_action.as_ref().unwrap();

    assert_eq!(session.resolved_selector(post.id).unwrap().source, "hand");
}

#[test]
fn test_missing_selector() {
    let error = check_error(&card_with_activation(
        "{ Effect: { Name: \"Damage\", Amount: 1 } }",
    ));

    assert_eq!(error, ErrorImpl::MissingSelectorError);
}

#[test]
fn test_unknown_selector_source() {
    let error = check_error(&card_with_activation(
        "{ Effect: { Name: \"Damage\", Amount: 1 }, Selector: { Source: graveyard } }",
    ));

    assert_eq!(
        error,
        ErrorImpl::UnresolvedPropertyError {
            target: "Source".to_string(),
            property: "graveyard".to_string(),
        }
    );
}

#[test]
fn test_selector_predicate_and_single() {
    let ok = card_with_activation(
        "{
            Effect: { Name: \"Damage\", Amount: 1 },
            Selector: {
                Source: board,
                Single: (1 < 2),
                Predicate: (unit) => ((unit.Power > 3) && (unit.Faction == \"Northern Realms\"))
            }
        }",
    );
    assert!(check_source(&ok).is_ok());

    let bad_filter = card_with_activation(
        "{
            Effect: { Name: \"Damage\", Amount: 1 },
            Selector: { Source: board, Predicate: (unit) => (unit.Faction == 3) }
        }",
    );
    assert!(matches!(
        check_error(&bad_filter),
        ErrorImpl::TypeMismatchError { expected, found, .. } if expected == "Text" && found == "Int"
    ));

    let bad_single = card_with_activation(
        "{
            Effect: { Name: \"Damage\", Amount: 1 },
            Selector: { Source: board, Single: (1 && 2) }
        }",
    );
    assert!(matches!(
        check_error(&bad_single),
        ErrorImpl::TypeMismatchError { expected, .. } if expected == "Bool"
    ));
}

#[test]
fn test_card_fields_typed() {
    assert!(matches!(
        check_error("card { Name: 5, Type: \"Gold\" }"),
        ErrorImpl::TypeMismatchError { expected, found, .. } if expected == "Text" && found == "Int"
    ));
    assert!(matches!(
        check_error("card { Name: \"C\", Type: \"Gold\", Power: \"high\" }"),
        ErrorImpl::TypeMismatchError { expected, .. } if expected == "Int"
    ));
    assert!(check_source("card { Name: \"Hero\" @@ \"of\" @@ \"Rivia\", Type: \"Gold\", Power: 2 * 5 }").is_ok());
}

#[test]
fn test_while_condition_must_be_bool() {
    let error = check_error(&action("while (5) targets.Shuffle();"));

    assert_eq!(
        error,
        ErrorImpl::TypeMismatchError {
            expected: "Bool".to_string(),
            found: "Int".to_string(),
            expression: "5".to_string(),
        }
    );
}

#[test]
fn test_action_body_sees_params_and_bindings() {
    let source = action(
        "
        i = Amount;
        context.Hand.Push(targets[0]);
        top = context.Deck.Pop();
        top.Power += i;
        mine = context.HandOfPlayer(context.TriggerPlayer);
        strong = mine.Find((unit) => (unit.Power >= 5));
        for (unit in strong) unit.Power = unit.Power * 2;
        label = \"Power\" @ \": \" @ top.Name;
        ",
    );

    assert!(check_source(&source).is_ok());
}

#[test]
fn test_undeclared_variable() {
    let error = check_error(&action("x = y + 1;"));

    assert_eq!(
        error,
        ErrorImpl::UndeclaredVariableError {
            variable: "y".to_string()
        }
    );
}

#[test]
fn test_assignment_redeclaration_in_same_scope() {
    let error = check_error(&action("x = 1; x = \"one\";"));

    assert!(matches!(error, ErrorImpl::RedeclarationError { name, .. } if name == "x"));
}

#[test]
fn test_inner_block_may_shadow() {
    assert!(check_source(&action("x = 1; while (x < 2) { x = \"two\"; };")).is_ok());
}

#[test]
fn test_unresolved_property() {
    let error = check_error(&action("targets[0].Armor = 3;"));

    assert_eq!(
        error,
        ErrorImpl::UnresolvedPropertyError {
            target: "targets[0]".to_string(),
            property: "Armor".to_string(),
        }
    );
}

#[test]
fn test_unresolved_method() {
    let error = check_error(&action("context.Teleport(1);"));

    assert_eq!(
        error,
        ErrorImpl::UnresolvedMethodError {
            target: "context".to_string(),
            method: "Teleport".to_string(),
        }
    );
}

#[test]
fn test_method_argument_mismatch() {
    let error = check_error(&action("context.Hand.Push(5);"));
    assert_eq!(
        error,
        ErrorImpl::TypeMismatchError {
            expected: "Card".to_string(),
            found: "Int".to_string(),
            expression: "5".to_string(),
        }
    );

    let error = check_error(&action("context.Hand.Shuffle(1);"));
    assert!(matches!(error, ErrorImpl::TypeMismatchError { expected, .. } if expected == "Void"));

    let error = check_error(&action("context.Hand.Push();"));
    assert!(matches!(error, ErrorImpl::TypeMismatchError { found, .. } if found == "Void"));
}

#[test]
fn test_operator_typing() {
    assert!(matches!(
        check_error(&action("x = 1 + \"a\";")),
        ErrorImpl::TypeMismatchError { expected, .. } if expected == "Int"
    ));
    assert!(matches!(
        check_error(&action("x = \"a\" @ 1;")),
        ErrorImpl::TypeMismatchError { expected, .. } if expected == "Text"
    ));
    assert!(matches!(
        check_error(&action("x = (1 < 2) && 3;")),
        ErrorImpl::TypeMismatchError { expected, .. } if expected == "Bool"
    ));
    assert!(matches!(
        check_error(&action("x = 1 == \"1\";")),
        ErrorImpl::TypeMismatchError { expected, found, .. } if expected == "Int" && found == "Text"
    ));
    assert!(matches!(
        check_error(&action("x = \"a\"; x++;")),
        ErrorImpl::TypeMismatchError { expected, .. } if expected == "Int"
    ));
    assert!(matches!(
        check_error(&action("x = targets[\"first\"];")),
        ErrorImpl::TypeMismatchError { expected, .. } if expected == "Int"
    ));
}

#[test]
fn test_compound_assignment_requires_int() {
    let error = check_error(&action("targets[0].Name += 1;"));

    assert!(matches!(error, ErrorImpl::TypeMismatchError { expected, found, .. } if expected == "Int" && found == "Text"));
}

#[test]
fn test_for_requires_collection() {
    let error = check_error(&action("for (unit in 5) unit.Power = 1;"));

    assert!(matches!(error, ErrorImpl::TypeMismatchError { expected, .. } if expected == "CardList"));
}

#[test]
fn test_for_rejects_structured_values() {
    let error = check_error(&action("for (c in context) { context.Hand.Shuffle(); };"));
    assert_eq!(
        error,
        ErrorImpl::TypeMismatchError {
            expected: "CardList".to_string(),
            found: "Var".to_string(),
            expression: "context".to_string(),
        }
    );

    let error = check_error(&action("for (c in targets) for (d in c) d.Power = 1;"));
    assert!(matches!(error, ErrorImpl::TypeMismatchError { expected, .. } if expected == "CardList"));
}

#[test]
fn test_loop_card_compares_with_card() {
    let source = action(
        "for (c in targets) { while (c == targets[0]) targets.Shuffle(); while (targets[0] != c) targets.Shuffle(); };",
    );

    assert!(check_source(&source).is_ok());
    assert!(matches!(
        check_error(&action("for (c in targets) { while (c == 1) targets.Shuffle(); };")),
        ErrorImpl::TypeMismatchError { expected, found, .. } if expected == "Card" && found == "Int"
    ));
}

#[test]
fn test_loop_variable_does_not_leak() {
    let error = check_error(&action("for (unit in targets) unit.Power = 1; unit.Power = 2;"));

    assert_eq!(
        error,
        ErrorImpl::UndeclaredVariableError {
            variable: "unit".to_string()
        }
    );
}

#[test]
fn test_check_is_repeatable() {
    let valid = parse_source(&card_with_activation(
        "{ Effect: { Name: \"Damage\", Amount: 1 }, Selector: { Source: board } }",
    ));
    let invalid = parse_source(&card_with_activation(
        "{ Effect: \"Damage\", Selector: { Source: board } }",
    ));

    assert!(check(&valid).is_ok());
    assert!(check(&valid).is_ok());

    let first = check(&invalid).unwrap_err();
    let second = check(&invalid).unwrap_err();
    assert_eq!(first.get_kind(), second.get_kind());
}

/// A catalog where cards also expose `Armor`.
struct ArmoredCatalog;

impl TypeCatalog for ArmoredCatalog {
    fn property_type(&self, kind: ObjectKind, property: &str) -> Option<Type> {
        match (kind, property) {
            (ObjectKind::Card, "Armor") => Some(Type::Int),
            _ => BuiltinCatalog.property_type(kind, property),
        }
    }

    fn method_signature(&self, kind: ObjectKind, method: &str) -> Option<MethodSignature> {
        BuiltinCatalog.method_signature(kind, method)
    }

    fn is_zone(&self, source: &str) -> bool {
        BuiltinCatalog.is_zone(source)
    }
}

#[test]
fn test_custom_catalog() {
    let program = parse_source(&action("targets[0].Armor = 3;"));

    assert!(check(&program).is_err());
    assert!(check_with_catalog(&program, Box::new(ArmoredCatalog)).is_ok());
}
