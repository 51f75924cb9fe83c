/// AST (Abstract Syntax Tree) module
/// Contains the node definitions the parser hands to the type checker
///
/// Submodules:
/// - ast: Core AST traits, wrappers and node tags
/// - expressions: Definitions for various expression types
/// - statements: Definitions for various statement and declaration types
///
/// Type annotations are `TypeWrapper`s which may still hold unresolved
/// `SymbolType` names; the type checker resolves them.
pub mod ast;
pub mod expressions;
pub mod statements;
