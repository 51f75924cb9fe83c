//! Type compatibility and conversion.
//!
//! Pure functions over pairs of types. The directional rules themselves live
//! on each variant (`is_assignable_from`, `is_implicitly_convertible_to`);
//! this module adds error absorption, the symmetric relaxations, and numeric
//! promotion.

use std::collections::HashMap;

use super::{
    composite::{ArrayType, FunctionType, PointerType},
    nominal::ENUM_BITS,
    primitive::{BuiltinKind, BuiltinType, DataType, ErrorType, TemplateParameterType},
    types::{Type, TypeKind, TypeWrapper},
};

/// Types that absorb every check so one root cause reports once.
pub fn absorbs(ty: &dyn Type) -> bool {
    match ty.get_type_kind() {
        TypeKind::Error => true,
        TypeKind::Builtin => matches!(
            ty.as_any().downcast_ref::<BuiltinType>(),
            Some(BuiltinType {
                kind: BuiltinKind::UnknownVoid
            })
        ),
        _ => false,
    }
}

pub fn is_void(ty: &dyn Type) -> bool {
    matches!(
        ty.as_any().downcast_ref::<BuiltinType>(),
        Some(BuiltinType {
            kind: BuiltinKind::Void
        })
    )
}

/// Returns `true` if a value of type `source` can be stored into a location of type `target`.
pub fn is_assignable(target: &dyn Type, source: &dyn Type) -> bool {
    if target.get_type_kind() == TypeKind::Error || source.get_type_kind() == TypeKind::Error {
        return true;
    }
    if (absorbs(target) || absorbs(source)) && !is_void(target) && !is_void(source) {
        return true;
    }
    target.is_assignable_from(source)
}

/// Symmetric relaxation used for comparisons, ternary branches and case patterns.
pub fn is_compatible(a: &dyn Type, b: &dyn Type) -> bool {
    a.equals(b) || is_assignable(a, b) || is_assignable(b, a)
}

pub fn is_implicitly_convertible(source: &dyn Type, target: &dyn Type) -> bool {
    if source.get_type_kind() == TypeKind::Error || target.get_type_kind() == TypeKind::Error {
        return true;
    }
    source.is_implicitly_convertible_to(target)
}

/// Assignment in checker contexts (initialisers, arguments, returns): the
/// directional rule, or an implicit conversion from `source`.
pub fn can_assign(target: &dyn Type, source: &dyn Type) -> bool {
    is_assignable(target, source) || is_implicitly_convertible(source, target)
}

pub fn as_data(ty: &dyn Type) -> Option<&DataType> {
    ty.as_any().downcast_ref::<DataType>()
}

pub fn is_numeric(ty: &dyn Type) -> bool {
    matches!(
        ty.get_type_kind(),
        TypeKind::Data | TypeKind::Enum | TypeKind::Error
    )
}

pub fn is_float(ty: &dyn Type) -> bool {
    as_data(ty).map(|data| data.is_float).unwrap_or(false)
}

pub fn is_integral(ty: &dyn Type) -> bool {
    match ty.get_type_kind() {
        TypeKind::Data => !is_float(ty),
        TypeKind::Enum | TypeKind::Error => true,
        _ => false,
    }
}

pub fn is_boolean_convertible(ty: &dyn Type) -> bool {
    matches!(
        ty.get_type_kind(),
        TypeKind::Data | TypeKind::Enum | TypeKind::Pointer | TypeKind::Error
    ) || absorbs(ty)
}

/// Enums take part in arithmetic as their underlying signed value.
fn promote(ty: &TypeWrapper) -> TypeWrapper {
    if ty.is_kind(TypeKind::Enum) {
        TypeWrapper::new(DataType::signed(ENUM_BITS))
    } else {
        ty.clone()
    }
}

/// Result type of a binary operation between two operand types.
///
/// Equal types yield themselves. Numeric pairs promote: a float operand wins
/// over an integer one, otherwise the wider operand wins (left on ties) and
/// the result is unsigned when either side is. Anything else is `Error`.
pub fn get_common_type(a: &TypeWrapper, b: &TypeWrapper) -> TypeWrapper {
    if a.is_error() || b.is_error() {
        return TypeWrapper::new(ErrorType);
    }
    if a.equals(b) {
        return a.clone();
    }
    if !is_numeric(a) || !is_numeric(b) {
        return TypeWrapper::new(ErrorType);
    }

    let (left, right) = (promote(a), promote(b));
    let (left_data, right_data) = match (as_data(&left), as_data(&right)) {
        (Some(l), Some(r)) => (l, r),
        _ => return TypeWrapper::new(ErrorType),
    };

    match (left_data.is_float, right_data.is_float) {
        (true, false) => return left.clone(),
        (false, true) => return right.clone(),
        (true, true) => {
            return if right_data.bits > left_data.bits {
                right.clone()
            } else {
                left.clone()
            }
        }
        (false, false) => {}
    }

    let (wider, wider_data) = if right_data.bits > left_data.bits {
        (&right, right_data)
    } else {
        (&left, left_data)
    };

    if wider_data.is_signed && !(left_data.is_signed && right_data.is_signed) {
        let mut unsigned = wider_data.clone();
        unsigned.is_signed = false;
        unsigned.alias = None;
        return TypeWrapper::new(unsigned);
    }

    wider.clone()
}

/// Rebuilds `ty` with template parameters replaced by their bindings.
///
/// Unbound parameters are left in place.
pub fn substitute(ty: &TypeWrapper, bindings: &HashMap<String, TypeWrapper>) -> TypeWrapper {
    match ty.get_type_kind() {
        TypeKind::TemplateParameter => match ty.downcast_ref::<TemplateParameterType>() {
            Some(parameter) => bindings
                .get(&parameter.name)
                .cloned()
                .unwrap_or_else(|| ty.clone()),
            None => ty.clone(),
        },
        TypeKind::Array => match ty.downcast_ref::<ArrayType>() {
            Some(array) => TypeWrapper::new(ArrayType::new(
                substitute(&array.element, bindings),
                array.size,
            )),
            None => ty.clone(),
        },
        TypeKind::Pointer => match ty.downcast_ref::<PointerType>() {
            Some(pointer) => TypeWrapper::new(
                PointerType::new(substitute(&pointer.pointee, bindings))
                    .with_qualifiers(pointer.is_const, pointer.is_volatile),
            ),
            None => ty.clone(),
        },
        TypeKind::Function => match ty.downcast_ref::<FunctionType>() {
            Some(function) => TypeWrapper::new(FunctionType::new(
                function
                    .parameters
                    .iter()
                    .map(|parameter| substitute(parameter, bindings))
                    .collect(),
                substitute(&function.return_type, bindings),
            )),
            None => ty.clone(),
        },
        _ => ty.clone(),
    }
}

/// Binds template parameters appearing in `pattern` against the concrete `actual` type.
///
/// The first binding for a name wins; later conflicting occurrences are left
/// for the ordinary assignability check to report.
pub fn deduce_bindings(
    pattern: &TypeWrapper,
    actual: &TypeWrapper,
    bindings: &mut HashMap<String, TypeWrapper>,
) {
    match pattern.get_type_kind() {
        TypeKind::TemplateParameter => {
            if let Some(parameter) = pattern.downcast_ref::<TemplateParameterType>() {
                if !actual.is_error() {
                    bindings
                        .entry(parameter.name.clone())
                        .or_insert_with(|| actual.clone());
                }
            }
        }
        TypeKind::Array => {
            if let (Some(pattern), Some(actual)) = (
                pattern.downcast_ref::<ArrayType>(),
                actual.downcast_ref::<ArrayType>(),
            ) {
                deduce_bindings(&pattern.element, &actual.element, bindings);
            }
        }
        TypeKind::Pointer => {
            if let (Some(pattern), Some(actual)) = (
                pattern.downcast_ref::<PointerType>(),
                actual.downcast_ref::<PointerType>(),
            ) {
                deduce_bindings(&pattern.pointee, &actual.pointee, bindings);
            }
        }
        _ => {}
    }
}

/// Whether `ty` still mentions an unbound template parameter.
pub fn contains_template_parameter(ty: &TypeWrapper) -> bool {
    match ty.get_type_kind() {
        TypeKind::TemplateParameter => true,
        TypeKind::Array => ty
            .downcast_ref::<ArrayType>()
            .map(|array| contains_template_parameter(&array.element))
            .unwrap_or(false),
        TypeKind::Pointer => ty
            .downcast_ref::<PointerType>()
            .map(|pointer| contains_template_parameter(&pointer.pointee))
            .unwrap_or(false),
        TypeKind::Function => ty
            .downcast_ref::<FunctionType>()
            .map(|function| {
                contains_template_parameter(&function.return_type)
                    || function.parameters.iter().any(contains_template_parameter)
            })
            .unwrap_or(false),
        _ => false,
    }
}
