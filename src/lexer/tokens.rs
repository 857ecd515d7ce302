use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("effect", TokenKind::EffectDecl);
        map.insert("card", TokenKind::Card);
        map.insert("Name", TokenKind::Name);
        map.insert("Params", TokenKind::Params);
        map.insert("Action", TokenKind::Action);
        map.insert("Type", TokenKind::Type);
        map.insert("Effect", TokenKind::EffectKeyword);
        map.insert("Range", TokenKind::Range);
        map.insert("Power", TokenKind::Power);
        map.insert("Faction", TokenKind::Faction);
        map.insert("OnActivation", TokenKind::OnActivation);
        map.insert("Selector", TokenKind::Selector);
        map.insert("Source", TokenKind::Source);
        map.insert("Single", TokenKind::Single);
        map.insert("Predicate", TokenKind::Predicate);
        map.insert("PostAction", TokenKind::PostAction);
        map.insert("for", TokenKind::For);
        map.insert("while", TokenKind::While);
        map.insert("in", TokenKind::In);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("Number", TokenKind::NumberType);
        map.insert("String", TokenKind::StringType);
        map.insert("Bool", TokenKind::BoolType);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Dot,
    Semicolon,
    Colon,
    Comma,
    Arrow, // =>

    SimpleConcat, // @
    CompConcat,   // @@

    PlusPlus,
    MinusMinus,
    PlusEquals,
    MinusEquals,
    SlashEquals,
    StarEquals,

    Plus,
    Dash,
    Slash,
    Star,

    // Declarations
    EffectDecl,
    Card,

    // Block keys
    Name,
    Params,
    Action,
    Type,
    EffectKeyword,
    Range,
    Power,
    Faction,
    OnActivation,
    Selector,
    Source,
    Single,
    Predicate,
    PostAction,

    // Reserved
    For,
    While,
    In,
    True,
    False,

    // Type keywords
    NumberType,
    StringType,
    BoolType,
}

impl TokenKind {
    /// Keys that may also be read as property names (`target.Power`).
    pub fn is_property_key(&self) -> bool {
        matches!(
            self,
            TokenKind::Name
                | TokenKind::Type
                | TokenKind::Range
                | TokenKind::Power
                | TokenKind::Faction
        )
    }

    pub fn is_assignment_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Assignment
                | TokenKind::PlusEquals
                | TokenKind::MinusEquals
                | TokenKind::StarEquals
                | TokenKind::SlashEquals
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: u32,
    pub span: Span,
}
