//! Scope and symbol table module.
//!
//! Holds everything the type checker declares while walking a program:
//!
//! - Lexical scopes chained to their parent for fallback lookup
//! - Symbols (variables, parameters, functions, operators, types, namespaces)
//! - The program-wide registry of named types, independent of lexical scoping
//!
//! Scopes live in an arena addressed by index and follow strict stack
//! discipline: the current scope is always the most recently pushed one.

pub mod symbol;
pub mod symbol_table;

#[cfg(test)]
mod tests;
