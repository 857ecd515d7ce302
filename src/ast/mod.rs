/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Program, declarations and the keyed-block nodes (activation, selector, builder)
/// - expressions: Expression nodes and operators
/// - statements: Statement nodes, blocks and assignable targets
/// - types: The closed set of semantic types
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
