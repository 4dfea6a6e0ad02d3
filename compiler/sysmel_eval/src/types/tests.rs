use super::*;
use pretty_assertions::assert_eq;
use sysmel_ir::{ArenaIndex, Interner};

fn registry() -> (Interner, TypeRegistry) {
    let interner = Interner::new();
    let mut types = TypeRegistry::new();
    types.basic_types(&interner);
    (interner, types)
}

#[test]
fn test_basic_types_are_created_once_in_order() {
    let interner = Interner::new();
    let mut types = TypeRegistry::new();
    assert!(!types.is_initialized());

    let first = types.basic_types(&interner);
    let second = types.basic_types(&interner);
    assert_eq!(first, second);
    assert_eq!(types.len(), BASIC_COUNT);

    for (kind, id) in first.iter() {
        assert_eq!(id, kind.id());
        assert_eq!(types.name(id, &interner), kind.name());
        assert!(id.is_basic());
    }
    assert_eq!(first.get(BasicKind::Integer), TypeId::INTEGER);
    assert_eq!(first.get(BasicKind::Dictionary), TypeId::DICTIONARY);
}

#[test]
fn test_builtin_hierarchy() {
    let (_, types) = registry();
    assert!(types.is_subtype(TypeId::INT8, TypeId::INTEGER));
    assert!(types.is_subtype(TypeId::UINT64, TypeId::ANY));
    assert!(types.is_subtype(TypeId::FLOAT32, TypeId::FLOAT));
    assert!(!types.is_subtype(TypeId::FLOAT32, TypeId::INTEGER));
    assert!(!types.is_subtype(TypeId::ANY, TypeId::INTEGER));
    assert_eq!(types.get(TypeId::ANY).supertype, None);
    assert_eq!(types.get(TypeId::BOX).supertype, None);
    assert!(!types.is_subtype(TypeId::BOX, TypeId::ANY));
}

#[test]
fn test_layouts() {
    let (_, types) = registry();
    let layout = |id: TypeId| (types.get(id).size, types.get(id).alignment);
    assert_eq!(layout(TypeId::INT8), (1, 1));
    assert_eq!(layout(TypeId::UINT16), (2, 2));
    assert_eq!(layout(TypeId::FLOAT32), (4, 4));
    assert_eq!(layout(TypeId::INT64), (8, 8));
    assert_eq!(layout(TypeId::VOID), (0, 1));
}

#[test]
fn test_method_lookup_walks_supertypes() {
    let (interner, mut types) = registry();
    let selector = interner.intern("frob");
    let on_any = FunctionId::from_raw(0);
    let on_integer = FunctionId::from_raw(1);

    types.add_method(TypeId::ANY, selector, on_any);
    assert_eq!(types.lookup_method(TypeId::INT32, selector), Some(on_any));

    types.add_method(TypeId::INTEGER, selector, on_integer);
    assert_eq!(types.lookup_method(TypeId::INT32, selector), Some(on_integer));
    assert_eq!(types.lookup_method(TypeId::FLOAT, selector), Some(on_any));
    assert_eq!(types.lookup_method(TypeId::BOX, selector), None);
    assert_eq!(
        types.lookup_method(TypeId::INT32, interner.intern("missing")),
        None
    );
}

#[test]
fn test_define_record() {
    let (interner, mut types) = registry();
    let x = interner.intern("x");
    let y = interner.intern("y");
    let point = types.define_record(
        &interner,
        Some(interner.intern("Point")),
        vec![
            Field { name: x, ty: TypeId::INTEGER },
            Field { name: y, ty: TypeId::INTEGER },
        ],
    );

    assert!(!point.is_basic());
    assert_eq!(types.name(point, &interner), "Point");
    assert_eq!(types.get(point).supertype, Some(TypeId::ANY));
    let TypeKind::Record { fields } = &types.get(point).kind else {
        panic!("expected a record type");
    };
    assert_eq!(fields.iter().map(|field| field.name).collect::<Vec<_>>(), vec![x, y]);
}

#[test]
fn test_define_sum_positions() {
    let (interner, mut types) = registry();
    let number = types.define_sum(
        &interner,
        Some(interner.intern("Number")),
        vec![TypeId::INTEGER, TypeId::FLOAT, TypeId::INTEGER],
    );

    let ty = types.get(number);
    assert_eq!(ty.alternative_index(TypeId::INTEGER), Some(0));
    assert_eq!(ty.alternative_index(TypeId::FLOAT), Some(1));
    assert_eq!(ty.alternative_index(TypeId::STRING), None);
    assert_eq!(types.get(TypeId::INTEGER).alternative_index(TypeId::INTEGER), None);
}

#[test]
fn test_define_enum_constants_carry_the_enum_type() {
    let (interner, mut types) = registry();
    let red = interner.intern("red");
    let color = types.define_enum(
        &interner,
        Some(interner.intern("Color")),
        TypeId::INT32,
        vec![(red, Payload::Integer(1))],
    );

    let TypeKind::Enum { base, values } = &types.get(color).kind else {
        panic!("expected an enum type");
    };
    assert_eq!(*base, TypeId::INT32);
    assert_eq!(values, &vec![(red, Value::new(color, Payload::Integer(1)))]);
    assert_eq!((types.get(color).size, types.get(color).alignment), (4, 4));
}

#[test]
fn test_anonymous_type_name() {
    let (interner, mut types) = registry();
    let anonymous = types.define_record(&interner, None, Vec::new());
    assert_eq!(types.name(anonymous, &interner), "<anonymous>");
}

#[test]
fn test_declaring_before_basic_types_creates_them_first() {
    let interner = Interner::new();
    let mut types = TypeRegistry::new();
    let record = types.define_record(&interner, None, Vec::new());
    assert!(types.is_initialized());
    assert_eq!(record.raw() as usize, BASIC_COUNT);
}
