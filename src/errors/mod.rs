//! Error types and error handling for the front end.
//!
//! This module defines the error types shared by every phase:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, parsing and semantic checking
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions
//!
//! Every phase is fail-fast: the first error aborts the phase and is
//! returned to the caller as a single `Error`.

pub mod errors;
