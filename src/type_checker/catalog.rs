//! What the game engine exposes to card scripts.
//!
//! The checker never hard-codes engine knowledge; it asks a [`TypeCatalog`]
//! which properties and methods a structured value has. [`BuiltinCatalog`]
//! describes the stock engine API.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::ast::types::Type;

/// The structured values whose members the catalog can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Card,
    CardList,
    Context,
}

/// A built-in method takes at most one argument. `Void` means none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MethodSignature {
    pub argument: Type,
    pub returns: Type,
}

impl MethodSignature {
    pub const fn new(argument: Type, returns: Type) -> Self {
        MethodSignature { argument, returns }
    }
}

pub trait TypeCatalog {
    /// Type of `property` on a value of `kind`, if it exists.
    fn property_type(&self, kind: ObjectKind, property: &str) -> Option<Type>;

    /// Signature of `method` callable on a value of `kind`, if it exists.
    fn method_signature(&self, kind: ObjectKind, method: &str) -> Option<MethodSignature>;

    /// Whether `source` names a zone a selector may draw targets from.
    fn is_zone(&self, source: &str) -> bool;
}

lazy_static! {
    static ref PROPERTIES: HashMap<ObjectKind, HashMap<&'static str, Type>> = {
        let mut context = HashMap::new();
        context.insert("TriggerPlayer", Type::Int);
        context.insert("Board", Type::CardList);
        context.insert("Hand", Type::CardList);
        context.insert("Deck", Type::CardList);
        context.insert("Field", Type::CardList);
        context.insert("Graveyard", Type::CardList);

        let mut card = HashMap::new();
        card.insert("Power", Type::Int);
        card.insert("Name", Type::Text);
        card.insert("Type", Type::Text);
        card.insert("Faction", Type::Text);
        card.insert("Owner", Type::Int);

        let mut map = HashMap::new();
        map.insert(ObjectKind::Context, context);
        map.insert(ObjectKind::Card, card);
        map.insert(ObjectKind::CardList, HashMap::new());
        map
    };

    static ref METHODS: HashMap<ObjectKind, HashMap<&'static str, MethodSignature>> = {
        let mut context = HashMap::new();
        context.insert("HandOfPlayer", MethodSignature::new(Type::Int, Type::CardList));
        context.insert("DeckOfPlayer", MethodSignature::new(Type::Int, Type::CardList));
        context.insert("FieldOfPlayer", MethodSignature::new(Type::Int, Type::CardList));
        context.insert("GraveyardOfPlayer", MethodSignature::new(Type::Int, Type::CardList));

        let mut list = HashMap::new();
        list.insert("Find", MethodSignature::new(Type::Predicate, Type::CardList));
        list.insert("Push", MethodSignature::new(Type::Card, Type::Void));
        list.insert("SendBottom", MethodSignature::new(Type::Card, Type::Void));
        list.insert("Remove", MethodSignature::new(Type::Card, Type::Void));
        list.insert("Pop", MethodSignature::new(Type::Void, Type::Card));
        list.insert("Shuffle", MethodSignature::new(Type::Void, Type::Void));

        let mut map = HashMap::new();
        map.insert(ObjectKind::Context, context);
        map.insert(ObjectKind::CardList, list);
        map.insert(ObjectKind::Card, HashMap::new());
        map
    };

    static ref ZONES: Vec<&'static str> = vec![
        "board",
        "hand",
        "otherHand",
        "deck",
        "otherDeck",
        "field",
        "otherField",
        "parent",
    ];
}

/// The engine's stock API.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinCatalog;

impl TypeCatalog for BuiltinCatalog {
    fn property_type(&self, kind: ObjectKind, property: &str) -> Option<Type> {
        PROPERTIES.get(&kind)?.get(property).copied()
    }

    fn method_signature(&self, kind: ObjectKind, method: &str) -> Option<MethodSignature> {
        METHODS.get(&kind)?.get(method).copied()
    }

    fn is_zone(&self, source: &str) -> bool {
        ZONES.contains(&source)
    }
}
