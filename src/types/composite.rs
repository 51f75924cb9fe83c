use std::any::Any;

use super::{
    primitive::{BuiltinKind, BuiltinType},
    types::{Type, TypeKind, TypeWrapper},
};

/// Width of pointers and function values.
pub const POINTER_BITS: u64 = 64;

/// Represents `T[n]`, or `T[]` when the size is dynamic.
#[derive(Debug, Clone)]
pub struct ArrayType {
    pub element: TypeWrapper,
    pub size: Option<u64>,
}

impl ArrayType {
    pub fn new(element: TypeWrapper, size: Option<u64>) -> Self {
        ArrayType { element, size }
    }

    pub fn is_dynamic(&self) -> bool {
        self.size.is_none()
    }
}

impl Type for ArrayType {
    fn clone_wrapper(&self) -> TypeWrapper {
        TypeWrapper::new(ArrayType {
            element: self.element.clone_wrapper(),
            size: self.size,
        })
    }
    fn get_type_kind(&self) -> TypeKind {
        TypeKind::Array
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn name(&self) -> String {
        match self.size {
            Some(size) => format!("{}[{}]", self.element.name(), size),
            None => format!("{}[]", self.element.name()),
        }
    }
    fn size_in_bits(&self) -> u64 {
        match self.size {
            Some(size) => self.element.size_in_bits().saturating_mul(size),
            None => 0,
        }
    }
    fn alignment_in_bits(&self) -> u64 {
        self.element.alignment_in_bits()
    }
    fn equals(&self, other: &dyn Type) -> bool {
        match other.as_any().downcast_ref::<ArrayType>() {
            Some(other) => other.size == self.size && self.element.equals(&other.element),
            None => false,
        }
    }
    fn is_assignable_from(&self, other: &dyn Type) -> bool {
        match other.as_any().downcast_ref::<ArrayType>() {
            Some(other) => {
                other.element.is_error() || self.element.is_assignable_from(&other.element)
            }
            None => false,
        }
    }
}

/// Represents `T*`. Always pointer-sized, whatever the pointee.
#[derive(Debug, Clone)]
pub struct PointerType {
    pub pointee: TypeWrapper,
    pub is_const: bool,
    pub is_volatile: bool,
}

impl PointerType {
    pub fn new(pointee: TypeWrapper) -> Self {
        PointerType {
            pointee,
            is_const: false,
            is_volatile: false,
        }
    }

    pub fn with_qualifiers(mut self, is_const: bool, is_volatile: bool) -> Self {
        self.is_const = is_const;
        self.is_volatile = is_volatile;
        self
    }

    fn points_to_void(&self) -> bool {
        matches!(
            self.pointee.downcast_ref::<BuiltinType>(),
            Some(BuiltinType {
                kind: BuiltinKind::Void
            })
        )
    }
}

impl Type for PointerType {
    fn clone_wrapper(&self) -> TypeWrapper {
        TypeWrapper::new(PointerType {
            pointee: self.pointee.clone_wrapper(),
            is_const: self.is_const,
            is_volatile: self.is_volatile,
        })
    }
    fn get_type_kind(&self) -> TypeKind {
        TypeKind::Pointer
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn name(&self) -> String {
        let mut name = String::new();
        if self.is_const {
            name.push_str("const ");
        }
        if self.is_volatile {
            name.push_str("volatile ");
        }
        name.push_str(&self.pointee.name());
        name.push('*');
        name
    }
    fn size_in_bits(&self) -> u64 {
        POINTER_BITS
    }
    fn alignment_in_bits(&self) -> u64 {
        POINTER_BITS
    }
    fn equals(&self, other: &dyn Type) -> bool {
        match other.as_any().downcast_ref::<PointerType>() {
            Some(other) => {
                other.is_const == self.is_const
                    && other.is_volatile == self.is_volatile
                    && self.pointee.equals(&other.pointee)
            }
            None => false,
        }
    }
    fn is_assignable_from(&self, other: &dyn Type) -> bool {
        let other = match other.as_any().downcast_ref::<PointerType>() {
            Some(other) => other,
            None => return false,
        };

        // Qualifiers may be added on assignment, never dropped.
        if other.is_const && !self.is_const {
            return false;
        }
        if other.is_volatile && !self.is_volatile {
            return false;
        }

        self.points_to_void() || other.pointee.is_error() || self.pointee.equals(&other.pointee)
    }
}

/// Represents `def (params) -> return_type` values.
#[derive(Debug, Clone)]
pub struct FunctionType {
    pub parameters: Vec<TypeWrapper>,
    pub return_type: TypeWrapper,
}

impl FunctionType {
    pub fn new(parameters: Vec<TypeWrapper>, return_type: TypeWrapper) -> Self {
        FunctionType {
            parameters,
            return_type,
        }
    }
}

impl Type for FunctionType {
    fn clone_wrapper(&self) -> TypeWrapper {
        TypeWrapper::new(FunctionType {
            parameters: self
                .parameters
                .iter()
                .map(|parameter| parameter.clone_wrapper())
                .collect(),
            return_type: self.return_type.clone_wrapper(),
        })
    }
    fn get_type_kind(&self) -> TypeKind {
        TypeKind::Function
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn name(&self) -> String {
        let parameters = self
            .parameters
            .iter()
            .map(|parameter| parameter.name())
            .collect::<Vec<String>>()
            .join(", ");
        format!("def ({}) -> {}", parameters, self.return_type.name())
    }
    fn size_in_bits(&self) -> u64 {
        POINTER_BITS
    }
    fn alignment_in_bits(&self) -> u64 {
        POINTER_BITS
    }
    fn equals(&self, other: &dyn Type) -> bool {
        match other.as_any().downcast_ref::<FunctionType>() {
            Some(other) => {
                other.parameters.len() == self.parameters.len()
                    && self.return_type.equals(&other.return_type)
                    && self
                        .parameters
                        .iter()
                        .zip(other.parameters.iter())
                        .all(|(ours, theirs)| ours.equals(theirs))
            }
            None => false,
        }
    }
}
