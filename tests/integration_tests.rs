//! Integration tests for the whole front end.
//!
//! Each test runs a complete card script through tokenization, parsing and
//! checking, the way the CLI does.

use std::rc::Rc;

use cardscript::{
    ast::ast::{Program, TopLevelDecl},
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::type_checker::check,
};
use pretty_assertions::assert_eq;

fn front_end(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source.to_string(), Some("deck.cards".to_string()))?;
    let program = parse(tokens, Rc::new("deck.cards".to_string()))?;
    check(&program)?;
    Ok(program)
}

const DECK: &str = r#"
effect {
    Name: "Damage",
    Params: {
        Amount: Number
    },
    Action: (targets, context) => {
        for (target in targets) {
            i = 0;
            while (i < Amount) {
                target.Power -= 1;
                i++;
            };
        };
    }
}

effect {
    Name: "Draw",
    Action: (targets, context) => {
        topCard = context.Deck.Pop();
        context.Hand.Add(topCard);
        context.Hand.Shuffle();
    }
}

effect {
    Name: "ReturnToDeck",
    Action: (targets, context) => {
        for (target in targets) {
            owner = target.Owner;
            deck = context.DeckOfPlayer(owner);
            deck.Push(target);
            deck.Shuffle();
            context.Board.Remove(target);
        };
    }
}

card {
    Type: "Oro",
    Name: "Beluga",
    Faction: "Northern Realms",
    Power: 10,
    Range: ["Melee", "Ranged"],
    OnActivation: [
        {
            Effect: {
                Name: "Damage",
                Amount: 5,
            },
            Selector: {
                Source: "board",
                Single: false,
                Predicate: (unit) => (unit.Faction == "Northern" @@ "Realms")
            },
            PostAction: {
                Effect: "ReturnToDeck",
                Selector: {
                    Source: "parent",
                    Single: false,
                    Predicate: (unit) => (unit.Power < 1)
                },
            },
        },
        {
            Effect: "Draw"
        }
    ]
}
"#;

#[test]
fn test_deck_with_unknown_method_is_rejected() {
    // `Add` is not part of the card list API
    let error = front_end(DECK).unwrap_err();

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::UnresolvedMethodError {
            target: "context.Hand".to_string(),
            method: "Add".to_string(),
        }
    );
    assert_eq!(error.get_position().line, 22);
}

#[test]
fn test_deck_missing_selector_is_rejected() {
    let deck = DECK.replace("context.Hand.Add(topCard)", "context.Hand.Push(topCard)");
    let error = front_end(&deck).unwrap_err();

    assert_eq!(error.get_kind(), &ErrorImpl::MissingSelectorError);
}

#[test]
fn test_full_deck() {
    let deck = DECK
        .replace("context.Hand.Add(topCard)", "context.Hand.Push(topCard)")
        .replace(
            "Effect: \"Draw\"\n",
            "Effect: \"Draw\",\n            Selector: { Source: \"deck\" }\n",
        );
    let program = front_end(&deck).unwrap();

    assert_eq!(program.declarations.len(), 4);

    let TopLevelDecl::Card(card) = &program.declarations[3] else {
        panic!("expected a card last");
    };
    assert_eq!(card.card_type, "Oro");
    assert_eq!(card.range, vec!["Melee".to_string(), "Ranged".to_string()]);
    assert_eq!(card.on_activation.len(), 2);

    let post = card.on_activation[0].post_action.as_ref().unwrap();
    assert_eq!(post.parent, Some(card.on_activation[0].id));
    assert_eq!(post.selector.as_ref().unwrap().source, "parent");
}

#[test]
fn test_cards_may_precede_effects() {
    let source = r#"
card {
    Name: "Dandelion",
    Type: "Silver",
    Effect: "Inspire",
}

effect {
    Name: "Inspire",
    Params: { Bonus: Number },
    Action: (targets, context) => for (t in targets) t.Power += Bonus;
}
"#;
    let program = front_end(source).unwrap();

    assert!(matches!(program.declarations[0], TopLevelDecl::Effect(_)));
    assert!(matches!(program.declarations[1], TopLevelDecl::Card(_)));
}

#[test]
fn test_lexical_error_surfaces_first() {
    let error = front_end("effect { Name: \"Bad\", Action: (t, c) => { x = 1 # 2; } }").unwrap_err();

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::UnrecognisedToken {
            token: "#".to_string()
        }
    );
}

#[test]
fn test_syntax_error_reports_line() {
    let source = "effect {\n    Name: \"Broken\",\n    Action: (t, c) => {\n        t.Shuffle()\n    }\n}";
    let error = front_end(source).unwrap_err();

    assert!(matches!(error.get_kind(), ErrorImpl::SyntaxError { .. }));
    assert_eq!(error.get_position().line, 5);
}

#[test]
fn test_type_error_in_predicate() {
    let source = r#"
effect { Name: "Noop", Action: (t, c) => { } }
card {
    Name: "Odd",
    Type: "Gold",
    OnActivation: [{
        Effect: "Noop",
        Selector: { Source: "hand", Predicate: (unit) => (unit.Power == "high") }
    }]
}
"#;
    let error = front_end(source).unwrap_err();

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::TypeMismatchError {
            expected: "Int".to_string(),
            found: "Text".to_string(),
            expression: "\"high\"".to_string(),
        }
    );
}
