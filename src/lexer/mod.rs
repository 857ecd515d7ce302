//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts card-language
//! source into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using regex patterns
//! - Recognition of declaration keywords, block keys, literals and operators
//! - Token line and position tracking for error reporting
//! - Comments and whitespace handling

pub mod lexer;
pub mod tokens;
