//! Type representation for the language.
//!
//! This module defines the closed set of type variants and the rules
//! relating them, including:
//!
//! - The `data{bits:alignment}` primitive every scalar derives from
//! - Composite types (arrays, pointers, functions)
//! - User-declared types (objects, packed/aligned structs, enums)
//! - Placeholders (template parameters, unresolved names, the error type)
//! - Assignability, implicit conversion and common-type derivation
//!
//! Types are immutable and shared through `TypeWrapper`; bit-level size and
//! alignment are answered by each variant on its own.

pub mod compatibility;
pub mod composite;
pub mod nominal;
pub mod primitive;
pub mod types;

#[cfg(test)]
mod tests;
