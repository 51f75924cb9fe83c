//! Type checking and semantic analysis module.
//!
//! A single recursive walk over the AST that:
//!
//! - Resolves identifiers through the scope chain and type names through the registry
//! - Validates operands, calls, member and index access against the compatibility rules
//! - Tracks loop, switch, function, try and object context for statement legality
//! - Registers functions, operators, objects, structs, enums, aliases and namespaces
//! - Binds template parameters for the declaration they wrap
//!
//! Every violation is pushed to the checker's `Diagnostics` and replaced by the
//! `Error` type, so a single run reports every defect it can find.

pub mod builtins;
pub mod expr;
pub mod stmt;
pub mod type_checker;
