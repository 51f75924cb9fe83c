//! Error types and diagnostics for the type checker.
//!
//! This module defines the diagnostics reported while checking a program.
//! It includes:
//!
//! - The diagnostic taxonomy (`ErrorCode`) handed to the driver
//! - Fine-grained error causes with source span information
//! - Helpful error messages and suggestions
//! - The append-only collector shared by a single type-checking run

pub mod errors;

#[cfg(test)]
mod tests;
