//! Utility macros for the type checker.
//!
//! This module defines helper macros used throughout the crate:
//!
//! - `IMPL_STMT!` - Implements the `Stmt` trait for a statement node
//! - `IMPL_EXPR!` - Implements the `Expr` trait for an expression node
//! - `DOWNCAST!` - Recovers the concrete node behind a wrapper
//!
//! These macros reduce boilerplate in the AST node definitions.

/// Implements `Stmt` for a `Clone` node with a `span` field.
///
/// # Arguments
///
/// * `$node` - The node struct
/// * `$kind` - The StmtType variant reported by the node
///
/// # Example
///
/// ```ignore
/// IMPL_STMT!(BreakStmt, StmtType::BreakStmt);
/// ```
#[macro_export]
macro_rules! IMPL_STMT {
    ($node:ty, $kind:expr) => {
        impl $crate::ast::ast::Stmt for $node {
            fn get_stmt_type(&self) -> $crate::ast::ast::StmtType {
                $kind
            }
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
            fn clone_wrapper(&self) -> $crate::ast::ast::StmtWrapper {
                $crate::ast::ast::StmtWrapper::new(self.clone())
            }
            fn get_span(&self) -> &$crate::Span {
                &self.span
            }
        }
    };
}

/// Implements `Expr` for a `Clone` node with a `span` field.
///
/// # Example
///
/// ```ignore
/// IMPL_EXPR!(SymbolExpr, ExprType::Symbol);
/// ```
#[macro_export]
macro_rules! IMPL_EXPR {
    ($node:ty, $kind:expr) => {
        impl $crate::ast::ast::Expr for $node {
            fn get_expr_type(&self) -> $crate::ast::ast::ExprType {
                $kind
            }
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
            fn clone_wrapper(&self) -> $crate::ast::ast::ExprWrapper {
                $crate::ast::ast::ExprWrapper::new(self.clone())
            }
            fn get_span(&self) -> &$crate::Span {
                &self.span
            }
        }
    };
}

/// Downcasts a statement or expression wrapper to the node its tag names.
///
/// A tag that disagrees with the concrete node is a broken parser contract,
/// not a user error, so this panics.
///
/// # Example
///
/// ```ignore
/// let call = DOWNCAST!(expr, CallExpr);
/// ```
#[macro_export]
macro_rules! DOWNCAST {
    ($node:expr, $target:ty) => {
        $node
            .as_any()
            .downcast_ref::<$target>()
            .unwrap_or_else(|| {
                panic!(
                    "AST node tag does not match node type `{}`",
                    stringify!($target)
                )
            })
    };
}
