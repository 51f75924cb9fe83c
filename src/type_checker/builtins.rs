use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::{
    errors::errors::Error,
    symbol_table::symbol_table::SymbolTable,
    types::{
        composite::ArrayType,
        primitive::{BuiltinType, DataType},
        types::{Type, TypeWrapper},
    },
    Span,
};

/// Shape of a builtin scalar. `TypeWrapper` is not `Sync`, so the table stores
/// descriptions and types are built per checker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BuiltinScalar {
    Void,
    UnknownVoid,
    Data { bits: u64, is_signed: bool },
    Float { bits: u64 },
    /// Dynamic array of `char`.
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorCategory {
    Arithmetic,
    Comparison,
    Logical,
    Bitwise,
}

lazy_static! {
    pub static ref BUILTIN_SCALARS: HashMap<&'static str, BuiltinScalar> = {
        let mut map = HashMap::new();
        map.insert("void", BuiltinScalar::Void);
        map.insert("!void", BuiltinScalar::UnknownVoid);
        map.insert("bool", BuiltinScalar::Data { bits: 1, is_signed: false });
        map.insert("char", BuiltinScalar::Data { bits: 8, is_signed: false });
        map.insert("byte", BuiltinScalar::Data { bits: 8, is_signed: false });
        map.insert("u8", BuiltinScalar::Data { bits: 8, is_signed: false });
        map.insert("i8", BuiltinScalar::Data { bits: 8, is_signed: true });
        map.insert("i16", BuiltinScalar::Data { bits: 16, is_signed: true });
        map.insert("int", BuiltinScalar::Data { bits: 32, is_signed: true });
        map.insert("i32", BuiltinScalar::Data { bits: 32, is_signed: true });
        map.insert("i64", BuiltinScalar::Data { bits: 64, is_signed: true });
        map.insert("u16", BuiltinScalar::Data { bits: 16, is_signed: false });
        map.insert("uint", BuiltinScalar::Data { bits: 32, is_signed: false });
        map.insert("u32", BuiltinScalar::Data { bits: 32, is_signed: false });
        map.insert("u64", BuiltinScalar::Data { bits: 64, is_signed: false });
        map.insert("float32", BuiltinScalar::Float { bits: 32 });
        map.insert("float", BuiltinScalar::Float { bits: 64 });
        map.insert("float64", BuiltinScalar::Float { bits: 64 });
        map.insert("string", BuiltinScalar::String);
        map
    };

    pub static ref OPERATOR_CATEGORIES: HashMap<&'static str, OperatorCategory> = {
        let mut map = HashMap::new();
        map.insert("+", OperatorCategory::Arithmetic);
        map.insert("-", OperatorCategory::Arithmetic);
        map.insert("*", OperatorCategory::Arithmetic);
        map.insert("/", OperatorCategory::Arithmetic);
        map.insert("%", OperatorCategory::Arithmetic);
        map.insert("==", OperatorCategory::Comparison);
        map.insert("!=", OperatorCategory::Comparison);
        map.insert("<", OperatorCategory::Comparison);
        map.insert(">", OperatorCategory::Comparison);
        map.insert("<=", OperatorCategory::Comparison);
        map.insert(">=", OperatorCategory::Comparison);
        map.insert("&&", OperatorCategory::Logical);
        map.insert("||", OperatorCategory::Logical);
        map.insert("and", OperatorCategory::Logical);
        map.insert("or", OperatorCategory::Logical);
        map.insert("&", OperatorCategory::Bitwise);
        map.insert("|", OperatorCategory::Bitwise);
        map.insert("^", OperatorCategory::Bitwise);
        map.insert("<<", OperatorCategory::Bitwise);
        map.insert(">>", OperatorCategory::Bitwise);
        map
    };
}

pub fn operator_category(operator: &str) -> Option<OperatorCategory> {
    OPERATOR_CATEGORIES.get(operator).copied()
}

/// `+=` -> `+`. Plain `=` has no underlying operator.
pub fn compound_base(operator: &str) -> Option<&str> {
    if operator == "=" {
        return None;
    }
    operator
        .strip_suffix('=')
        .filter(|base| {
            matches!(
                operator_category(base),
                Some(OperatorCategory::Arithmetic | OperatorCategory::Bitwise)
            )
        })
}

/// Symbol name an operator overload is declared under, e.g. `operator+(Vec2, Vec2)`.
pub fn operator_symbol_name(operator: &str, operands: &[TypeWrapper]) -> String {
    let operands: Vec<String> = operands.iter().map(|operand| operand.name()).collect();
    format!("operator{}({})", operator, operands.join(", "))
}

pub fn build_scalar(name: &str, scalar: BuiltinScalar) -> TypeWrapper {
    match scalar {
        BuiltinScalar::Void => TypeWrapper::new(BuiltinType::void()),
        BuiltinScalar::UnknownVoid => TypeWrapper::new(BuiltinType::unknown_void()),
        BuiltinScalar::Data { bits, is_signed } => {
            TypeWrapper::new(DataType::new(bits, is_signed).with_alias(name))
        }
        BuiltinScalar::Float { bits } => TypeWrapper::new(DataType::float(bits).with_alias(name)),
        BuiltinScalar::String => TypeWrapper::new(ArrayType::new(
            TypeWrapper::new(DataType::unsigned(8).with_alias("char")),
            None,
        )),
    }
}

/// Registers every builtin scalar in the named-type registry of `table`.
pub fn register_builtins(table: &mut SymbolTable) -> Result<(), Error> {
    let mut names: Vec<(&&str, &BuiltinScalar)> = BUILTIN_SCALARS.iter().collect();
    names.sort_by_key(|(name, _)| **name);

    for (name, scalar) in names {
        table.declare_type(name, build_scalar(name, *scalar), &Span::null())?;
    }

    tracing::trace!(count = BUILTIN_SCALARS.len(), "registered builtin types");
    Ok(())
}
