use std::slice::Iter;

use crate::{types::types::TypeWrapper, Span, IMPL_STMT};

use super::ast::{ExprWrapper, StmtType, StmtWrapper};

#[derive(Debug, Clone)]
pub struct BlockStmt {
    pub body: Vec<StmtWrapper>,
    pub span: Span,
}

impl BlockStmt {
    pub fn iter(&self) -> Iter<'_, StmtWrapper> {
        self.body.iter()
    }
}

IMPL_STMT!(BlockStmt, StmtType::BlockStmt);

#[derive(Debug, Clone)]
pub struct ExpressionStmt {
    pub expression: ExprWrapper,
    pub span: Span,
}

IMPL_STMT!(ExpressionStmt, StmtType::ExpressionStmt);

/// Variable declaration. Without an explicit type the initialiser decides it.
#[derive(Debug, Clone)]
pub struct VarDeclStmt {
    pub identifier: String,
    pub is_constant: bool,
    pub is_volatile: bool,
    pub assigned_value: Option<ExprWrapper>,
    pub explicit_type: Option<TypeWrapper>,
    pub span: Span,
}

IMPL_STMT!(VarDeclStmt, StmtType::VarDeclStmt);

#[derive(Debug, Clone)]
pub struct IfStmt {
    pub condition: ExprWrapper,
    pub then_body: StmtWrapper,
    pub else_body: Option<StmtWrapper>,
    pub span: Span,
}

IMPL_STMT!(IfStmt, StmtType::IfStmt);

/// `while` loop, or `do { } while` when `is_do_while` is set.
#[derive(Debug, Clone)]
pub struct WhileStmt {
    pub condition: ExprWrapper,
    pub body: StmtWrapper,
    pub is_do_while: bool,
    pub span: Span,
}

IMPL_STMT!(WhileStmt, StmtType::WhileStmt);

#[derive(Debug, Clone)]
pub struct ForStmt {
    pub initializer: Option<StmtWrapper>,
    pub condition: Option<ExprWrapper>,
    pub update: Option<ExprWrapper>,
    pub body: StmtWrapper,
    pub span: Span,
}

IMPL_STMT!(ForStmt, StmtType::ForStmt);

#[derive(Debug, Clone)]
pub struct BreakStmt {
    pub span: Span,
}

IMPL_STMT!(BreakStmt, StmtType::BreakStmt);

#[derive(Debug, Clone)]
pub struct ContinueStmt {
    pub span: Span,
}

IMPL_STMT!(ContinueStmt, StmtType::ContinueStmt);

#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub value: Option<ExprWrapper>,
    pub span: Span,
}

IMPL_STMT!(ReturnStmt, StmtType::ReturnStmt);

#[derive(Debug, Clone)]
pub struct CatchClause {
    pub identifier: String,
    /// `None` catches anything.
    pub catch_type: Option<TypeWrapper>,
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct TryStmt {
    pub body: BlockStmt,
    pub catches: Vec<CatchClause>,
    pub span: Span,
}

IMPL_STMT!(TryStmt, StmtType::TryStmt);

#[derive(Debug, Clone)]
pub struct ThrowStmt {
    pub value: ExprWrapper,
    pub span: Span,
}

IMPL_STMT!(ThrowStmt, StmtType::ThrowStmt);

#[derive(Debug, Clone)]
pub struct SwitchCase {
    /// `None` for `default`.
    pub pattern: Option<ExprWrapper>,
    pub body: BlockStmt,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct SwitchStmt {
    pub scrutinee: ExprWrapper,
    pub cases: Vec<SwitchCase>,
    pub span: Span,
}

IMPL_STMT!(SwitchStmt, StmtType::SwitchStmt);

#[derive(Debug, Clone)]
pub struct Parameter {
    pub identifier: String,
    pub param_type: TypeWrapper,
    pub is_constant: bool,
    pub span: Span,
}

/// Function declaration. A missing body makes it a prototype.
#[derive(Debug, Clone)]
pub struct FnDeclStmt {
    pub identifier: String,
    pub parameters: Vec<Parameter>,
    pub return_type: TypeWrapper,
    pub body: Option<BlockStmt>,
    pub span: Span,
}

IMPL_STMT!(FnDeclStmt, StmtType::FnDeclStmt);

/// `operator(T a, T b)[+] -> T { ... }`
#[derive(Debug, Clone)]
pub struct OperatorDeclStmt {
    pub operator: String,
    pub parameters: Vec<Parameter>,
    pub return_type: TypeWrapper,
    pub body: Option<BlockStmt>,
    pub span: Span,
}

IMPL_STMT!(OperatorDeclStmt, StmtType::OperatorDeclStmt);

#[derive(Debug, Clone)]
pub struct MemberDecl {
    pub identifier: String,
    pub member_type: TypeWrapper,
    pub is_constant: bool,
    pub is_volatile: bool,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ObjectDeclStmt {
    pub name: String,
    pub members: Vec<MemberDecl>,
    pub methods: Vec<FnDeclStmt>,
    pub span: Span,
}

IMPL_STMT!(ObjectDeclStmt, StmtType::ObjectDeclStmt);

#[derive(Debug, Clone)]
pub struct FieldDecl {
    pub identifier: String,
    pub field_type: TypeWrapper,
    pub alignment: Option<u64>,
    pub is_volatile: bool,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct StructDeclStmt {
    pub name: String,
    pub fields: Vec<FieldDecl>,
    pub is_packed: bool,
    pub alignment: Option<u64>,
    pub span: Span,
}

IMPL_STMT!(StructDeclStmt, StmtType::StructDeclStmt);

/// Enumerators without a value continue from the previous one.
#[derive(Debug, Clone)]
pub struct EnumDeclStmt {
    pub name: String,
    pub enumerators: Vec<(String, Option<i64>)>,
    pub span: Span,
}

IMPL_STMT!(EnumDeclStmt, StmtType::EnumDeclStmt);

/// `unsigned data{16} as u16;`
#[derive(Debug, Clone)]
pub struct TypeAliasStmt {
    pub name: String,
    pub target: TypeWrapper,
    pub span: Span,
}

IMPL_STMT!(TypeAliasStmt, StmtType::TypeAliasStmt);

#[derive(Debug, Clone)]
pub struct NamespaceDeclStmt {
    pub name: String,
    pub body: BlockStmt,
    pub span: Span,
}

IMPL_STMT!(NamespaceDeclStmt, StmtType::NamespaceDeclStmt);

/// `template <T> ...` wrapping a function, operator or object declaration.
#[derive(Debug, Clone)]
pub struct TemplateDeclStmt {
    pub parameters: Vec<String>,
    pub declaration: StmtWrapper,
    pub span: Span,
}

IMPL_STMT!(TemplateDeclStmt, StmtType::TemplateDeclStmt);
