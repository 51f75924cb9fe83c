use std::{any::Any, fmt::Debug, fmt::Display, rc::Rc};

/// Type Kinds
///
/// The closed set of type variants understood by the checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Builtin,
    Data,
    Array,
    Pointer,
    Function,
    Object,
    Struct,
    Enum,
    TemplateParameter,
    /// A named reference produced by the parser that has not been resolved yet.
    Symbol,
    Error,
}

/// Type Trait
///
/// Every variant answers the full query interface on its own, without consulting
/// a symbol table. Implementations are immutable once constructed.
pub trait Type: Debug {
    /// Deep copy into a fresh, independent wrapper.
    fn clone_wrapper(&self) -> TypeWrapper;
    fn get_type_kind(&self) -> TypeKind;
    /// Type conversion purposes - used with `.downcast_ref<T>()`
    fn as_any(&self) -> &dyn Any;
    fn name(&self) -> String;
    fn size_in_bits(&self) -> u64;
    fn alignment_in_bits(&self) -> u64;
    /// Structural equality, except for user types which compare by declared name.
    fn equals(&self, other: &dyn Type) -> bool;
    /// Can a value of type `other` be stored into a location of this type.
    fn is_assignable_from(&self, other: &dyn Type) -> bool {
        self.equals(other)
    }
    fn is_implicitly_convertible_to(&self, other: &dyn Type) -> bool {
        self.equals(other)
    }
    /// Returns the declared type of a member, field or enumerator.
    fn get_member_type(&self, _member: &str) -> Option<TypeWrapper> {
        None
    }
}

/// Type Wrapper
///
/// Shared, read-only handle to a type. `clone()` shares the same instance,
/// `clone_wrapper()` produces an independent deep copy.
#[derive(Debug, Clone)]
pub struct TypeWrapper(Rc<dyn Type>);

impl TypeWrapper {
    pub fn new<T: Type + 'static>(type_: T) -> Self {
        TypeWrapper(Rc::new(type_))
    }

    pub fn downcast_ref<T: Type + 'static>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }

    pub fn is_kind(&self, kind: TypeKind) -> bool {
        self.0.get_type_kind() == kind
    }

    pub fn is_error(&self) -> bool {
        self.is_kind(TypeKind::Error)
    }

    /// Whether both handles point at the same instance.
    pub fn ptr_eq(&self, other: &TypeWrapper) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Type for TypeWrapper {
    fn clone_wrapper(&self) -> TypeWrapper {
        self.0.clone_wrapper()
    }
    fn get_type_kind(&self) -> TypeKind {
        self.0.get_type_kind()
    }
    fn as_any(&self) -> &dyn Any {
        self.0.as_any()
    }
    fn name(&self) -> String {
        self.0.name()
    }
    fn size_in_bits(&self) -> u64 {
        self.0.size_in_bits()
    }
    fn alignment_in_bits(&self) -> u64 {
        self.0.alignment_in_bits()
    }
    fn equals(&self, other: &dyn Type) -> bool {
        self.0.equals(other)
    }
    fn is_assignable_from(&self, other: &dyn Type) -> bool {
        self.0.is_assignable_from(other)
    }
    fn is_implicitly_convertible_to(&self, other: &dyn Type) -> bool {
        self.0.is_implicitly_convertible_to(other)
    }
    fn get_member_type(&self, member: &str) -> Option<TypeWrapper> {
        self.0.get_member_type(member)
    }
}

impl Display for TypeWrapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.name())
    }
}

impl PartialEq for TypeWrapper {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

/// Rounds `value` up to the next multiple of `align`. An alignment of 0 or 1 leaves it unchanged.
/// Sizes past `u64::MAX` saturate.
pub fn align_to(value: u64, align: u64) -> u64 {
    if align <= 1 {
        return value;
    }
    value.div_ceil(align).saturating_mul(align)
}
