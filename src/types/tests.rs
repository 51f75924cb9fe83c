//! Unit tests for type representation and compatibility rules.

use std::collections::HashMap;

use super::{
    compatibility::{
        can_assign, deduce_bindings, get_common_type, is_assignable, is_compatible,
        is_implicitly_convertible, substitute,
    },
    composite::{ArrayType, FunctionType, PointerType},
    nominal::{EnumType, ObjectMember, ObjectType, StructField, StructType},
    primitive::{BuiltinType, DataType, ErrorType, TemplateParameterType},
    types::{align_to, Type, TypeKind, TypeWrapper},
};

fn data(bits: u64, is_signed: bool) -> TypeWrapper {
    TypeWrapper::new(DataType::new(bits, is_signed))
}

fn field(name: &str, ty: TypeWrapper, alignment: Option<u64>) -> StructField {
    StructField {
        name: name.to_string(),
        ty,
        alignment,
        is_volatile: false,
    }
}

fn sample_types() -> Vec<TypeWrapper> {
    let int = TypeWrapper::new(DataType::signed(32).with_alias("int"));
    vec![
        TypeWrapper::new(BuiltinType::void()),
        TypeWrapper::new(BuiltinType::unknown_void()),
        int.clone(),
        TypeWrapper::new(DataType::unsigned(12).with_alignment(16)),
        TypeWrapper::new(ArrayType::new(int.clone(), Some(4))),
        TypeWrapper::new(ArrayType::new(int.clone(), None)),
        TypeWrapper::new(PointerType::new(int.clone()).with_qualifiers(true, false)),
        TypeWrapper::new(FunctionType::new(vec![int.clone()], int.clone())),
        TypeWrapper::new(ObjectType {
            name: "Widget".to_string(),
            members: vec![ObjectMember {
                name: "id".to_string(),
                ty: int.clone(),
                is_const: true,
                is_volatile: false,
            }],
        }),
        TypeWrapper::new(StructType {
            name: "Header".to_string(),
            fields: vec![field("tag", data(8, false), None)],
            is_packed: true,
            alignment: None,
        }),
        TypeWrapper::new(EnumType {
            name: "Color".to_string(),
            enumerators: vec![("Red".to_string(), 0), ("Green".to_string(), 1)],
        }),
        TypeWrapper::new(TemplateParameterType::new("T")),
        TypeWrapper::new(ErrorType),
    ]
}

#[test]
fn test_clone_is_equal_and_self_assignable() {
    for ty in sample_types() {
        let copy = ty.clone_wrapper();
        assert!(ty.equals(&copy), "{} should equal its clone", ty);
        assert!(!ty.ptr_eq(&copy), "{} clone should be a new instance", ty);
        assert!(ty.is_assignable_from(&ty), "{} should accept itself", ty);
    }
}

#[test]
fn test_data_narrowing_rule() {
    let int32 = data(32, true);

    assert!(int32.is_assignable_from(&data(16, true)));
    assert!(!int32.is_assignable_from(&data(16, false)));
    assert!(!int32.is_assignable_from(&data(64, true)));
}

#[test]
fn test_data_widening_conversion() {
    assert!(data(16, true).is_implicitly_convertible_to(&data(32, true)));
    assert!(!data(64, true).is_implicitly_convertible_to(&data(32, true)));
    assert!(!data(16, false).is_implicitly_convertible_to(&data(32, true)));
}

#[test]
fn test_data_size_and_alignment() {
    let packed = DataType::unsigned(12);
    assert_eq!(packed.size_in_bits(), 12);
    assert_eq!(packed.alignment_in_bits(), 12);

    let aligned = DataType::unsigned(12).with_alignment(16);
    assert_eq!(aligned.size_in_bits(), 12);
    assert_eq!(aligned.alignment_in_bits(), 16);
}

#[test]
fn test_data_names() {
    assert_eq!(DataType::signed(32).with_alias("int").name(), "int");
    assert_eq!(DataType::unsigned(16).name(), "unsigned data{16}");
    assert_eq!(
        DataType::signed(24).with_alignment(32).with_volatile(true).name(),
        "volatile signed data{24:32}"
    );
}

#[test]
fn test_struct_packing() {
    let packed = StructType {
        name: "myStruct1".to_string(),
        fields: vec![field("a", data(8, false), None), field("b", data(32, false), None)],
        is_packed: true,
        alignment: None,
    };
    assert_eq!(packed.size_in_bits(), 40);

    let aligned = StructType {
        name: "myStruct2".to_string(),
        fields: vec![
            field("a", data(8, false), None),
            field("b", data(32, false), Some(32)),
        ],
        is_packed: false,
        alignment: None,
    };
    assert_eq!(aligned.size_in_bits(), 64);
    assert_eq!(
        aligned.field_offsets(),
        vec![("a".to_string(), 0), ("b".to_string(), 32)]
    );
}

#[test]
fn test_struct_padding_between_misaligned_fields() {
    let mixed = StructType {
        name: "Mixed".to_string(),
        fields: vec![
            field("flag", data(1, false), None),
            field("half", data(16, false), None),
            field("byte", data(8, false), None),
        ],
        is_packed: false,
        alignment: None,
    };

    // flag @0, half padded to 16, byte @32
    assert_eq!(mixed.size_in_bits(), 40);
    assert_eq!(mixed.alignment_in_bits(), 16);
}

#[test]
fn test_struct_alignment() {
    let small = StructType {
        name: "Small".to_string(),
        fields: vec![field("bit", data(1, false), None)],
        is_packed: false,
        alignment: None,
    };
    assert_eq!(small.alignment_in_bits(), 8);

    let explicit = StructType {
        name: "Explicit".to_string(),
        fields: vec![field("bit", data(1, false), None)],
        is_packed: false,
        alignment: Some(64),
    };
    assert_eq!(explicit.alignment_in_bits(), 64);
}

#[test]
fn test_object_size_is_sum_of_members() {
    let object = ObjectType {
        name: "Pair".to_string(),
        members: vec![
            ObjectMember {
                name: "a".to_string(),
                ty: data(8, true),
                is_const: false,
                is_volatile: false,
            },
            ObjectMember {
                name: "b".to_string(),
                ty: data(32, true),
                is_const: false,
                is_volatile: false,
            },
        ],
    };

    assert_eq!(object.size_in_bits(), 40);
    assert_eq!(object.get_member_type("b").map(|t| t.size_in_bits()), Some(32));
    assert!(object.get_member_type("c").is_none());
}

#[test]
fn test_array_sizes() {
    let fixed = ArrayType::new(data(16, true), Some(10));
    assert_eq!(fixed.size_in_bits(), 160);
    assert_eq!(fixed.alignment_in_bits(), 16);

    let dynamic = ArrayType::new(data(16, true), None);
    assert!(dynamic.is_dynamic());
    assert_eq!(dynamic.size_in_bits(), 0);
}

#[test]
fn test_oversized_layouts_saturate() {
    let huge = TypeWrapper::new(ArrayType::new(data(32, true), Some(u64::MAX)));
    assert_eq!(huge.size_in_bits(), u64::MAX);

    let nested = ArrayType::new(huge.clone(), Some(2));
    assert_eq!(nested.size_in_bits(), u64::MAX);

    let padded = StructType {
        name: "Huge".to_string(),
        fields: vec![
            field("head", data(8, false), None),
            field("body", huge.clone(), None),
            field("tail", data(8, false), None),
        ],
        is_packed: false,
        alignment: None,
    };
    assert_eq!(padded.size_in_bits(), u64::MAX);
    assert_eq!(padded.field_offsets()[2], ("tail".to_string(), u64::MAX));

    let packed = StructType {
        is_packed: true,
        ..padded
    };
    assert_eq!(packed.size_in_bits(), u64::MAX);

    let object = ObjectType {
        name: "Blob".to_string(),
        members: vec![
            ObjectMember {
                name: "data".to_string(),
                ty: huge,
                is_const: false,
                is_volatile: false,
            },
            ObjectMember {
                name: "len".to_string(),
                ty: data(64, false),
                is_const: false,
                is_volatile: false,
            },
        ],
    };
    assert_eq!(object.size_in_bits(), u64::MAX);
    assert_eq!(align_to(u64::MAX - 3, 8), u64::MAX);
}

#[test]
fn test_array_assignability_follows_elements() {
    let wide = TypeWrapper::new(ArrayType::new(data(32, true), None));
    let narrow = TypeWrapper::new(ArrayType::new(data(16, true), Some(3)));

    assert!(wide.is_assignable_from(&narrow));
    assert!(!narrow.is_assignable_from(&wide));
}

#[test]
fn test_pointer_layout_is_fixed() {
    let pointer = PointerType::new(TypeWrapper::new(StructType {
        name: "Big".to_string(),
        fields: vec![field("a", data(512, false), None)],
        is_packed: true,
        alignment: None,
    }));

    assert_eq!(pointer.size_in_bits(), 64);
    assert_eq!(pointer.alignment_in_bits(), 64);
}

#[test]
fn test_pointer_qualifiers_can_be_added_not_dropped() {
    let int = data(32, true);
    let plain = TypeWrapper::new(PointerType::new(int.clone()));
    let constant = TypeWrapper::new(PointerType::new(int.clone()).with_qualifiers(true, false));

    assert!(constant.is_assignable_from(&plain));
    assert!(!plain.is_assignable_from(&constant));
}

#[test]
fn test_void_pointer_accepts_any_pointer() {
    let void_pointer = TypeWrapper::new(PointerType::new(TypeWrapper::new(BuiltinType::void())));
    let int_pointer = TypeWrapper::new(PointerType::new(data(32, true)));

    assert!(void_pointer.is_assignable_from(&int_pointer));
    assert!(!int_pointer.is_assignable_from(&void_pointer));
}

#[test]
fn test_user_types_are_nominal() {
    let first = StructType {
        name: "A".to_string(),
        fields: vec![field("x", data(32, true), None)],
        is_packed: false,
        alignment: None,
    };
    let second = StructType {
        name: "B".to_string(),
        ..first.clone()
    };

    assert!(!first.equals(&second));
    assert!(first.equals(&first.clone()));
}

#[test]
fn test_enum_converts_to_data() {
    let color = TypeWrapper::new(EnumType {
        name: "Color".to_string(),
        enumerators: vec![("Red".to_string(), 0)],
    });

    assert_eq!(color.size_in_bits(), 32);
    assert!(is_implicitly_convertible(&color, &data(8, false)));
    assert!(!is_implicitly_convertible(&data(32, true), &color));
    assert!(can_assign(&data(32, true), &color));
}

#[test]
fn test_error_type_absorbs() {
    let error = TypeWrapper::new(ErrorType);
    let object = TypeWrapper::new(ObjectType {
        name: "Thing".to_string(),
        members: vec![],
    });

    assert!(is_assignable(&object, &error));
    assert!(is_assignable(&error, &object));
    assert!(is_implicitly_convertible(&error, &object));
    assert!(is_compatible(&error, &data(8, true)));
}

#[test]
fn test_unknown_void_never_accepts_void() {
    let unknown = TypeWrapper::new(BuiltinType::unknown_void());
    let void = TypeWrapper::new(BuiltinType::void());

    assert!(is_assignable(&unknown, &data(32, true)));
    assert!(!is_assignable(&unknown, &void));
    assert!(!is_assignable(&data(32, true), &void));
}

#[test]
fn test_compatibility_is_symmetric() {
    let narrow = data(16, true);
    let wide = data(32, true);

    assert!(is_compatible(&narrow, &wide));
    assert!(is_compatible(&wide, &narrow));
    assert!(!is_compatible(&wide, &data(32, false)));
}

#[test]
fn test_common_type() {
    let common = get_common_type(&data(16, true), &data(32, true));
    assert_eq!(common.size_in_bits(), 32);

    let int = TypeWrapper::new(DataType::signed(32).with_alias("int"));
    let float = TypeWrapper::new(DataType::float(64).with_alias("float"));
    assert!(get_common_type(&int, &float).equals(&float));
    assert!(get_common_type(&float, &int).equals(&float));

    let float32 = TypeWrapper::new(DataType::float(32));
    assert!(get_common_type(&float32, &int).equals(&float32));
}

#[test]
fn test_common_type_prefers_unsigned_and_left_on_ties() {
    let common = get_common_type(&data(32, true), &data(16, false));
    let data_type = common.downcast_ref::<DataType>().map(|d| (d.bits, d.is_signed));
    assert_eq!(data_type, Some((32, false)));

    let left = TypeWrapper::new(DataType::signed(32).with_alignment(64));
    let right = TypeWrapper::new(DataType::signed(32));
    assert_eq!(get_common_type(&left, &right).alignment_in_bits(), 64);
}

#[test]
fn test_common_type_of_non_numeric_is_error() {
    let object = TypeWrapper::new(ObjectType {
        name: "Thing".to_string(),
        members: vec![],
    });

    assert!(get_common_type(&object, &data(32, true)).is_error());
    assert!(get_common_type(&object, &object).equals(&object));
}

#[test]
fn test_substitute_template_parameters() {
    let t = TypeWrapper::new(TemplateParameterType::new("T"));
    let function = TypeWrapper::new(FunctionType::new(
        vec![TypeWrapper::new(PointerType::new(t.clone()))],
        TypeWrapper::new(ArrayType::new(t.clone(), Some(2))),
    ));

    let mut bindings = HashMap::new();
    bindings.insert("T".to_string(), data(16, false));

    let concrete = substitute(&function, &bindings);
    let expected = FunctionType::new(
        vec![TypeWrapper::new(PointerType::new(data(16, false)))],
        TypeWrapper::new(ArrayType::new(data(16, false), Some(2))),
    );
    assert!(concrete.equals(&expected));
    assert_eq!(concrete.get_type_kind(), TypeKind::Function);
}

#[test]
fn test_deduce_bindings_through_pointers() {
    let pattern = TypeWrapper::new(PointerType::new(TypeWrapper::new(
        TemplateParameterType::new("T"),
    )));
    let actual = TypeWrapper::new(PointerType::new(data(8, false)));

    let mut bindings = HashMap::new();
    deduce_bindings(&pattern, &actual, &mut bindings);
    assert_eq!(bindings.get("T").map(|t| t.size_in_bits()), Some(8));
}

#[test]
fn test_align_to() {
    assert_eq!(align_to(8, 32), 32);
    assert_eq!(align_to(32, 32), 32);
    assert_eq!(align_to(33, 8), 40);
    assert_eq!(align_to(5, 0), 5);
}
