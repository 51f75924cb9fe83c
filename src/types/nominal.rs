//! User-declared types: objects, structs and enums.
//!
//! These compare nominally, by declared name.

use std::any::Any;

use super::{
    primitive::DataType,
    types::{align_to, Type, TypeKind, TypeWrapper},
};

/// Smallest alignment a struct or object can report.
pub const MIN_AGGREGATE_ALIGNMENT: u64 = 8;

/// Width of enum values.
pub const ENUM_BITS: u64 = 32;

#[derive(Debug, Clone)]
pub struct ObjectMember {
    pub name: String,
    pub ty: TypeWrapper,
    pub is_const: bool,
    pub is_volatile: bool,
}

/// Object type. Methods are members of function type.
#[derive(Debug, Clone)]
pub struct ObjectType {
    pub name: String,
    pub members: Vec<ObjectMember>,
}

impl ObjectType {
    pub fn get_member(&self, member: &str) -> Option<&ObjectMember> {
        self.members.iter().find(|m| m.name == member)
    }
}

impl Type for ObjectType {
    fn clone_wrapper(&self) -> TypeWrapper {
        TypeWrapper::new(ObjectType {
            name: self.name.clone(),
            members: self
                .members
                .iter()
                .map(|member| ObjectMember {
                    ty: member.ty.clone_wrapper(),
                    ..member.clone()
                })
                .collect(),
        })
    }
    fn get_type_kind(&self) -> TypeKind {
        TypeKind::Object
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn name(&self) -> String {
        self.name.clone()
    }
    fn size_in_bits(&self) -> u64 {
        self.members
            .iter()
            .map(|member| member.ty.size_in_bits())
            .fold(0, u64::saturating_add)
    }
    fn alignment_in_bits(&self) -> u64 {
        self.members
            .iter()
            .map(|member| member.ty.alignment_in_bits())
            .fold(MIN_AGGREGATE_ALIGNMENT, u64::max)
    }
    fn equals(&self, other: &dyn Type) -> bool {
        match other.as_any().downcast_ref::<ObjectType>() {
            Some(other) => other.name == self.name,
            None => false,
        }
    }
    fn get_member_type(&self, member: &str) -> Option<TypeWrapper> {
        self.get_member(member).map(|m| m.ty.clone())
    }
}

#[derive(Debug, Clone)]
pub struct StructField {
    pub name: String,
    pub ty: TypeWrapper,
    /// Overrides the field type's natural alignment.
    pub alignment: Option<u64>,
    pub is_volatile: bool,
}

impl StructField {
    pub fn effective_alignment(&self) -> u64 {
        self.alignment.unwrap_or_else(|| self.ty.alignment_in_bits())
    }
}

#[derive(Debug, Clone)]
pub struct StructType {
    pub name: String,
    pub fields: Vec<StructField>,
    pub is_packed: bool,
    pub alignment: Option<u64>,
}

impl StructType {
    pub fn get_field(&self, field: &str) -> Option<&StructField> {
        self.fields.iter().find(|f| f.name == field)
    }

    /// Bit offset of every field, in declaration order.
    pub fn field_offsets(&self) -> Vec<(String, u64)> {
        let mut offsets = Vec::with_capacity(self.fields.len());
        let mut total: u64 = 0;

        for field in self.fields.iter() {
            if !self.is_packed {
                total = align_to(total, field.effective_alignment());
            }
            offsets.push((field.name.clone(), total));
            total = total.saturating_add(field.ty.size_in_bits());
        }

        offsets
    }
}

impl Type for StructType {
    fn clone_wrapper(&self) -> TypeWrapper {
        TypeWrapper::new(StructType {
            name: self.name.clone(),
            fields: self
                .fields
                .iter()
                .map(|field| StructField {
                    ty: field.ty.clone_wrapper(),
                    ..field.clone()
                })
                .collect(),
            is_packed: self.is_packed,
            alignment: self.alignment,
        })
    }
    fn get_type_kind(&self) -> TypeKind {
        TypeKind::Struct
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn name(&self) -> String {
        self.name.clone()
    }
    fn size_in_bits(&self) -> u64 {
        if self.is_packed {
            return self
                .fields
                .iter()
                .map(|field| field.ty.size_in_bits())
                .fold(0, u64::saturating_add);
        }

        let mut total: u64 = 0;
        for field in self.fields.iter() {
            total = align_to(total, field.effective_alignment());
            total = total.saturating_add(field.ty.size_in_bits());
        }
        total
    }
    fn alignment_in_bits(&self) -> u64 {
        if let Some(alignment) = self.alignment {
            return alignment;
        }
        self.fields
            .iter()
            .map(|field| field.effective_alignment())
            .fold(MIN_AGGREGATE_ALIGNMENT, u64::max)
    }
    fn equals(&self, other: &dyn Type) -> bool {
        match other.as_any().downcast_ref::<StructType>() {
            Some(other) => other.name == self.name,
            None => false,
        }
    }
    fn get_member_type(&self, member: &str) -> Option<TypeWrapper> {
        self.get_field(member).map(|f| f.ty.clone())
    }
}

#[derive(Debug, Clone)]
pub struct EnumType {
    pub name: String,
    pub enumerators: Vec<(String, i64)>,
}

impl EnumType {
    pub fn get_value(&self, enumerator: &str) -> Option<i64> {
        self.enumerators
            .iter()
            .find(|(name, _)| name == enumerator)
            .map(|(_, value)| *value)
    }
}

impl Type for EnumType {
    fn clone_wrapper(&self) -> TypeWrapper {
        TypeWrapper::new(self.clone())
    }
    fn get_type_kind(&self) -> TypeKind {
        TypeKind::Enum
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn name(&self) -> String {
        self.name.clone()
    }
    fn size_in_bits(&self) -> u64 {
        ENUM_BITS
    }
    fn alignment_in_bits(&self) -> u64 {
        ENUM_BITS
    }
    fn equals(&self, other: &dyn Type) -> bool {
        match other.as_any().downcast_ref::<EnumType>() {
            Some(other) => other.name == self.name,
            None => false,
        }
    }
    fn is_implicitly_convertible_to(&self, other: &dyn Type) -> bool {
        self.equals(other) || other.as_any().downcast_ref::<DataType>().is_some()
    }
    fn get_member_type(&self, member: &str) -> Option<TypeWrapper> {
        self.get_value(member)
            .map(|_| TypeWrapper::new(self.clone()))
    }
}
