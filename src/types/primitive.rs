//! Scalar and placeholder types.
//!
//! `DataType` is the only true primitive of the language; `int`, `float`,
//! `bool` and friends are `DataType` instances registered under those names.

use std::any::Any;

use crate::Position;

use super::types::{Type, TypeKind, TypeWrapper};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinKind {
    Void,
    /// `!void`: a return type whose value is unknown or absent.
    UnknownVoid,
}

/// Represents `void` and `!void`.
#[derive(Debug, Clone)]
pub struct BuiltinType {
    pub kind: BuiltinKind,
}

impl BuiltinType {
    pub fn void() -> Self {
        BuiltinType {
            kind: BuiltinKind::Void,
        }
    }

    pub fn unknown_void() -> Self {
        BuiltinType {
            kind: BuiltinKind::UnknownVoid,
        }
    }
}

impl Type for BuiltinType {
    fn clone_wrapper(&self) -> TypeWrapper {
        TypeWrapper::new(self.clone())
    }
    fn get_type_kind(&self) -> TypeKind {
        TypeKind::Builtin
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn name(&self) -> String {
        match self.kind {
            BuiltinKind::Void => String::from("void"),
            BuiltinKind::UnknownVoid => String::from("!void"),
        }
    }
    fn size_in_bits(&self) -> u64 {
        0
    }
    fn alignment_in_bits(&self) -> u64 {
        0
    }
    fn equals(&self, other: &dyn Type) -> bool {
        match other.as_any().downcast_ref::<BuiltinType>() {
            Some(other) => other.kind == self.kind,
            None => false,
        }
    }
    fn is_assignable_from(&self, other: &dyn Type) -> bool {
        match self.kind {
            BuiltinKind::Void => self.equals(other),
            // Anything with a value may flow into `!void`.
            BuiltinKind::UnknownVoid => !BuiltinType::void().equals(other),
        }
    }
    fn is_implicitly_convertible_to(&self, other: &dyn Type) -> bool {
        match self.kind {
            BuiltinKind::Void => self.equals(other),
            BuiltinKind::UnknownVoid => !BuiltinType::void().equals(other),
        }
    }
}

/// Represents `data{bits:alignment}`.
///
/// `alignment` of 0 means packed: the natural alignment equals `bits`.
#[derive(Debug, Clone)]
pub struct DataType {
    pub bits: u64,
    pub is_signed: bool,
    pub is_volatile: bool,
    pub alignment: u64,
    /// Floating-point encoding. Only consulted by common-type derivation.
    pub is_float: bool,
    /// Name the type was registered under, e.g. `int`.
    pub alias: Option<String>,
}

impl DataType {
    pub fn new(bits: u64, is_signed: bool) -> Self {
        DataType {
            bits,
            is_signed,
            is_volatile: false,
            alignment: 0,
            is_float: false,
            alias: None,
        }
    }

    pub fn signed(bits: u64) -> Self {
        DataType::new(bits, true)
    }

    pub fn unsigned(bits: u64) -> Self {
        DataType::new(bits, false)
    }

    pub fn float(bits: u64) -> Self {
        DataType {
            is_float: true,
            ..DataType::new(bits, true)
        }
    }

    pub fn with_alignment(mut self, alignment: u64) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_volatile(mut self, is_volatile: bool) -> Self {
        self.is_volatile = is_volatile;
        self
    }

    pub fn with_alias(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_string());
        self
    }

    /// `data{bits:alignment}` spelling, ignoring any alias.
    pub fn spelling(&self) -> String {
        let sign = if self.is_signed { "signed" } else { "unsigned" };
        let volatile = if self.is_volatile { "volatile " } else { "" };
        if self.alignment == 0 {
            format!("{}{} data{{{}}}", volatile, sign, self.bits)
        } else {
            format!("{}{} data{{{}:{}}}", volatile, sign, self.bits, self.alignment)
        }
    }
}

impl Type for DataType {
    fn clone_wrapper(&self) -> TypeWrapper {
        TypeWrapper::new(self.clone())
    }
    fn get_type_kind(&self) -> TypeKind {
        TypeKind::Data
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn name(&self) -> String {
        match &self.alias {
            Some(alias) => alias.clone(),
            None => self.spelling(),
        }
    }
    fn size_in_bits(&self) -> u64 {
        self.bits
    }
    fn alignment_in_bits(&self) -> u64 {
        if self.alignment != 0 {
            self.alignment
        } else {
            self.bits
        }
    }
    fn equals(&self, other: &dyn Type) -> bool {
        match other.as_any().downcast_ref::<DataType>() {
            Some(other) => {
                self.bits == other.bits
                    && self.is_signed == other.is_signed
                    && self.is_float == other.is_float
                    && self.is_volatile == other.is_volatile
                    && self.alignment_in_bits() == other.alignment_in_bits()
            }
            None => false,
        }
    }
    fn is_assignable_from(&self, other: &dyn Type) -> bool {
        if self.equals(other) {
            return true;
        }
        match other.as_any().downcast_ref::<DataType>() {
            Some(other) => self.is_signed == other.is_signed && self.bits >= other.bits,
            None => false,
        }
    }
    fn is_implicitly_convertible_to(&self, other: &dyn Type) -> bool {
        if self.equals(other) {
            return true;
        }
        match other.as_any().downcast_ref::<DataType>() {
            Some(other) => self.is_signed == other.is_signed && self.bits <= other.bits,
            None => false,
        }
    }
}

/// Placeholder produced after a diagnostic so that checking can continue.
///
/// Absorbs every operation: it is assignable from and convertible to anything.
#[derive(Debug, Clone)]
pub struct ErrorType;

impl Type for ErrorType {
    fn clone_wrapper(&self) -> TypeWrapper {
        TypeWrapper::new(ErrorType)
    }
    fn get_type_kind(&self) -> TypeKind {
        TypeKind::Error
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn name(&self) -> String {
        String::from("<error>")
    }
    fn size_in_bits(&self) -> u64 {
        0
    }
    fn alignment_in_bits(&self) -> u64 {
        0
    }
    fn equals(&self, other: &dyn Type) -> bool {
        other.get_type_kind() == TypeKind::Error
    }
    fn is_assignable_from(&self, _other: &dyn Type) -> bool {
        true
    }
    fn is_implicitly_convertible_to(&self, _other: &dyn Type) -> bool {
        true
    }
}

/// Represents a symbolic type reference that needs resolution.
///
/// During parsing, type references are stored as symbols and later
/// resolved to concrete types during type checking.
#[derive(Debug, Clone)]
pub struct SymbolType {
    pub name: String,
    pub position: Position,
}

impl SymbolType {
    pub fn new(name: &str) -> Self {
        SymbolType {
            name: name.to_string(),
            position: Position::null(),
        }
    }

    pub fn get_position(&self) -> Position {
        self.position.clone()
    }
}

impl Type for SymbolType {
    fn clone_wrapper(&self) -> TypeWrapper {
        TypeWrapper::new(self.clone())
    }
    fn get_type_kind(&self) -> TypeKind {
        TypeKind::Symbol
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn name(&self) -> String {
        self.name.clone()
    }
    // Unresolved references have no layout
    fn size_in_bits(&self) -> u64 {
        0
    }
    fn alignment_in_bits(&self) -> u64 {
        0
    }
    fn equals(&self, other: &dyn Type) -> bool {
        match other.as_any().downcast_ref::<SymbolType>() {
            Some(other) => other.name == self.name,
            None => false,
        }
    }
}

/// A template parameter such as `T`, unbound until instantiation.
#[derive(Debug, Clone)]
pub struct TemplateParameterType {
    pub name: String,
}

impl TemplateParameterType {
    pub fn new(name: &str) -> Self {
        TemplateParameterType {
            name: name.to_string(),
        }
    }
}

impl Type for TemplateParameterType {
    fn clone_wrapper(&self) -> TypeWrapper {
        TypeWrapper::new(self.clone())
    }
    fn get_type_kind(&self) -> TypeKind {
        TypeKind::TemplateParameter
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn name(&self) -> String {
        self.name.clone()
    }
    fn size_in_bits(&self) -> u64 {
        0
    }
    fn alignment_in_bits(&self) -> u64 {
        0
    }
    fn equals(&self, other: &dyn Type) -> bool {
        match other.as_any().downcast_ref::<TemplateParameterType>() {
            Some(other) => other.name == self.name,
            None => false,
        }
    }
}
