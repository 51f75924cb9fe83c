//! Unit tests for scopes and the symbol table.

use crate::{
    errors::errors::ErrorCode,
    types::{
        composite::FunctionType,
        primitive::{BuiltinType, DataType},
        types::{Type, TypeWrapper},
    },
    Span,
};

use super::{
    symbol::{Symbol, SymbolKind},
    symbol_table::SymbolTable,
};

fn variable(name: &str, bits: u64) -> Symbol {
    Symbol::new(
        name,
        SymbolKind::Variable,
        TypeWrapper::new(DataType::signed(bits)),
        Span::null(),
    )
}

#[test]
fn test_declare_and_lookup() {
    let mut table = SymbolTable::new();
    assert!(table.declare_symbol(variable("x", 32)).is_ok());

    let symbol = table.lookup_symbol("x").map(|s| s.symbol_type.size_in_bits());
    assert_eq!(symbol, Some(32));
    assert!(table.lookup_symbol("y").is_none());
}

#[test]
fn test_shadowing_in_nested_scope() {
    let mut table = SymbolTable::new();
    table.declare_symbol(variable("x", 32)).unwrap();

    table.push_scope();
    assert!(table.declare_symbol(variable("x", 16)).is_ok());
    assert_eq!(table.lookup_symbol("x").map(|s| s.symbol_type.size_in_bits()), Some(16));

    table.pop_scope();
    assert_eq!(table.lookup_symbol("x").map(|s| s.symbol_type.size_in_bits()), Some(32));
}

#[test]
fn test_redeclaration_in_same_scope() {
    let mut table = SymbolTable::new();
    table.declare_symbol(variable("x", 32)).unwrap();

    let error = table.declare_symbol(variable("x", 8)).unwrap_err();
    assert_eq!(error.get_error_code(), ErrorCode::Redeclaration);
    assert_eq!(table.lookup_symbol("x").map(|s| s.symbol_type.size_in_bits()), Some(32));
}

#[test]
fn test_lookup_walks_to_root() {
    let mut table = SymbolTable::new();
    table.declare_symbol(variable("global", 64)).unwrap();
    table.push_scope();
    table.push_scope();
    table.push_scope();

    assert_eq!(table.depth(), 4);
    assert!(table.lookup_symbol("global").is_some());
    assert!(table.lookup_local("global").is_none());
}

#[test]
fn test_pop_scope_drops_its_symbols() {
    let mut table = SymbolTable::new();
    table.push_scope();
    table.declare_symbol(variable("inner", 8)).unwrap();

    let popped = table.pop_scope().unwrap();
    assert!(popped.contains("inner"));
    assert!(table.lookup_symbol("inner").is_none());
    assert!(table.is_global_scope());
}

#[test]
fn test_global_scope_cannot_be_popped() {
    let mut table = SymbolTable::new();
    table.declare_symbol(variable("x", 32)).unwrap();

    assert!(table.pop_scope().is_none());
    assert_eq!(table.depth(), 1);
    assert!(table.lookup_global("x").is_some());
}

#[test]
fn test_type_registry_is_independent_of_scopes() {
    let mut table = SymbolTable::new();
    table.push_scope();
    table
        .declare_type("u16", TypeWrapper::new(DataType::unsigned(16)), &Span::null())
        .unwrap();
    table.pop_scope();

    assert_eq!(table.lookup_type("u16").map(|t| t.size_in_bits()), Some(16));
    assert!(table.lookup_symbol("u16").is_none());

    let error = table
        .declare_type("u16", TypeWrapper::new(DataType::unsigned(8)), &Span::null())
        .unwrap_err();
    assert_eq!(error.get_error_code(), ErrorCode::Redeclaration);
}

#[test]
fn test_callable_symbol_signature() {
    let int = TypeWrapper::new(DataType::signed(32));
    let function = Symbol::new(
        "f",
        SymbolKind::Function,
        TypeWrapper::new(FunctionType::new(
            vec![int.clone()],
            TypeWrapper::new(BuiltinType::void()),
        )),
        Span::null(),
    );

    assert!(function.is_callable());
    assert_eq!(function.parameter_types().map(|p| p.len()), Some(1));
    assert_eq!(function.return_type().map(|r| r.name()), Some("void".to_string()));
    assert!(!variable("x", 32).is_callable());
}

#[test]
fn test_mark_defined_is_scope_local() {
    let mut table = SymbolTable::new();
    let signature = TypeWrapper::new(FunctionType::new(
        vec![],
        TypeWrapper::new(BuiltinType::void()),
    ));
    table
        .declare_symbol(Symbol::new("f", SymbolKind::Function, signature, Span::null()))
        .unwrap();
    assert!(table.lookup_symbol("f").is_some_and(|f| !f.is_defined));

    table.push_scope();
    assert!(!table.mark_defined("f"));
    table.pop_scope();

    assert!(table.mark_defined("f"));
    assert!(table.lookup_symbol("f").is_some_and(|f| f.is_defined));
}
