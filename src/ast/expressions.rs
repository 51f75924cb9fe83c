use crate::{types::types::TypeWrapper, Span, IMPL_EXPR};

use super::ast::{ExprType, ExprWrapper};

// LITERALS

/// Integer Expression
/// Represents an integer literal in the AST.
#[derive(Debug, Clone)]
pub struct IntegerExpr {
    pub value: i128,
    pub span: Span,
}

IMPL_EXPR!(IntegerExpr, ExprType::Integer);

/// Float Expression
/// Represents a floating-point literal in the AST.
#[derive(Debug, Clone)]
pub struct FloatExpr {
    pub value: f64,
    pub span: Span,
}

IMPL_EXPR!(FloatExpr, ExprType::Float);

/// String Expression
/// Represents a string literal in the AST.
#[derive(Debug, Clone)]
pub struct StringExpr {
    pub value: String,
    pub span: Span,
}

IMPL_EXPR!(StringExpr, ExprType::String);

#[derive(Debug, Clone)]
pub struct CharExpr {
    pub value: char,
    pub span: Span,
}

IMPL_EXPR!(CharExpr, ExprType::Char);

#[derive(Debug, Clone)]
pub struct BoolExpr {
    pub value: bool,
    pub span: Span,
}

IMPL_EXPR!(BoolExpr, ExprType::Bool);

/// Symbol Expression
/// Represents an identifier in the AST. This includes functions.
#[derive(Debug, Clone)]
pub struct SymbolExpr {
    pub value: String,
    pub span: Span,
}

IMPL_EXPR!(SymbolExpr, ExprType::Symbol);

/// `this` inside an object method.
#[derive(Debug, Clone)]
pub struct ThisExpr {
    pub span: Span,
}

IMPL_EXPR!(ThisExpr, ExprType::This);

// COMPLEX

/// Binary Expression
/// Represents an arithmetic, comparison, logical or bitwise operation.
#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub left: ExprWrapper,
    pub operator: String,
    pub right: ExprWrapper,
    pub span: Span,
}

IMPL_EXPR!(BinaryExpr, ExprType::Binary);

/// Unary Expression
/// Prefix (`-x`, `!x`, `~x`, `&x`, `*p`, `++x`) or postfix (`x++`) operation.
#[derive(Debug, Clone)]
pub struct UnaryExpr {
    pub operator: String,
    pub operand: ExprWrapper,
    pub is_postfix: bool,
    pub span: Span,
}

IMPL_EXPR!(UnaryExpr, ExprType::Unary);

/// Assignment Expression
/// `=` or a compound assignment such as `+=`.
#[derive(Debug, Clone)]
pub struct AssignmentExpr {
    pub assignee: ExprWrapper,
    pub operator: String,
    pub value: ExprWrapper,
    pub span: Span,
}

IMPL_EXPR!(AssignmentExpr, ExprType::Assignment);

/// Call Expression
/// Represents a function call, method call or object construction.
#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: ExprWrapper,
    pub arguments: Vec<ExprWrapper>,
    /// Explicit template arguments, `f<int>(x)`.
    pub template_arguments: Vec<TypeWrapper>,
    pub span: Span,
}

IMPL_EXPR!(CallExpr, ExprType::CallExpr);

/// Member access through `.`, or through `->` when `is_arrow` is set.
#[derive(Debug, Clone)]
pub struct MemberExpr {
    pub object: ExprWrapper,
    pub property: String,
    pub is_arrow: bool,
    pub span: Span,
}

IMPL_EXPR!(MemberExpr, ExprType::Member);

#[derive(Debug, Clone)]
pub struct IndexExpr {
    pub array: ExprWrapper,
    pub index: ExprWrapper,
    pub span: Span,
}

IMPL_EXPR!(IndexExpr, ExprType::Index);

#[derive(Debug, Clone)]
pub struct TernaryExpr {
    pub condition: ExprWrapper,
    pub then_expr: ExprWrapper,
    pub else_expr: ExprWrapper,
    pub span: Span,
}

IMPL_EXPR!(TernaryExpr, ExprType::Ternary);

/// Explicit conversion, `(T)value`.
#[derive(Debug, Clone)]
pub struct CastExpr {
    pub target: TypeWrapper,
    pub value: ExprWrapper,
    pub span: Span,
}

IMPL_EXPR!(CastExpr, ExprType::Cast);

#[derive(Debug, Clone)]
pub struct ArrayLiteralExpr {
    pub elements: Vec<ExprWrapper>,
    pub span: Span,
}

IMPL_EXPR!(ArrayLiteralExpr, ExprType::ArrayLiteral);

/// Struct Initialization Expression
/// Represents the initialization of a struct in the AST.
#[derive(Debug, Clone)]
pub struct StructInitExpr {
    pub name: String,
    pub fields: Vec<(String, ExprWrapper)>,
    pub span: Span,
}

IMPL_EXPR!(StructInitExpr, ExprType::StructInit);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutQuery {
    Size,
    Alignment,
}

/// `sizeof(T)` / `alignof(T)`, answered in bits.
#[derive(Debug, Clone)]
pub struct SizeOfExpr {
    pub target: TypeWrapper,
    pub query: LayoutQuery,
    pub span: Span,
}

IMPL_EXPR!(SizeOfExpr, ExprType::SizeOf);

/// `Scope::member`, for enumerators and namespace members.
#[derive(Debug, Clone)]
pub struct ScopeAccessExpr {
    pub scope: String,
    pub member: String,
    pub span: Span,
}

IMPL_EXPR!(ScopeAccessExpr, ExprType::ScopeAccess);
