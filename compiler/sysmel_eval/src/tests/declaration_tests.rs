//! Records, sums, enums and instantiation of built-in types.

use pretty_assertions::assert_eq;
use sysmel_ir::Interner;

use super::Session;
use crate::{EvalErrorKind, Payload, TypeId, Value};

/// `:Point := Record(#Point, #(#x #y))`
fn declare_point(s: &mut Session<'_>) {
    let b = s.syntax;
    let declaration = b.apply(
        b.identifier("Record"),
        vec![
            b.symbol("Point"),
            b.array(vec![b.symbol("x"), b.symbol("y")]),
        ],
    );
    s.value(&b.assign(b.bindable("Point"), declaration));
}

#[test]
fn record_field_sugar_reads_and_writes() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    declare_point(&mut s);
    let b = s.syntax;

    let point = b.apply(b.identifier("Point"), vec![b.integer(1), b.integer(2)]);
    let r = s.value(&b.assign(b.bindable("r"), point));

    assert_eq!(s.value(&b.unary(b.identifier("r"), "x")), Value::integer(1));
    let written = s.value(&b.send(b.identifier("r"), "x:", vec![b.integer(10)]));
    assert_eq!(written, r);
    assert_eq!(s.value(&b.unary(b.identifier("r"), "x")), Value::integer(10));
    assert_eq!(s.print(&b.identifier("r")), "Point(x: 10, y: 2)");
}

#[test]
fn record_instantiation_pads_missing_fields() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    declare_point(&mut s);
    let b = s.syntax;

    let partial = b.apply(b.identifier("Point"), vec![b.integer(1)]);
    assert_eq!(s.print(&partial), "Point(x: 1, y: void)");

    let too_many = b.apply(
        b.identifier("Point"),
        vec![b.integer(1), b.integer(2), b.integer(3)],
    );
    assert_eq!(
        s.error_kind(&too_many),
        EvalErrorKind::ArityMismatch {
            name: "Point".to_owned(),
            expected: 2,
            got: 3,
        }
    );
}

#[test]
fn record_fields_can_be_typed() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;

    let declaration = b.apply(
        b.identifier("Record"),
        vec![
            b.symbol("Pixel"),
            b.array(vec![
                b.association(b.symbol("x"), Some(b.identifier("Int32"))),
                b.symbol("label"),
            ]),
        ],
    );
    let Some(pixel) = s.value(&declaration).as_type() else {
        panic!("Record yields a type");
    };
    let crate::TypeKind::Record { fields } = &s.interpreter.types().get(pixel).kind else {
        panic!("Record declares a record type");
    };
    assert_eq!(
        fields.iter().map(|field| field.ty).collect::<Vec<_>>(),
        vec![TypeId::INT32, TypeId::ANY]
    );
}

#[test]
fn duplicate_record_fields_are_rejected() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;

    let declaration = b.apply(
        b.identifier("Record"),
        vec![
            b.symbol("Broken"),
            b.array(vec![b.symbol("x"), b.symbol("x")]),
        ],
    );
    assert!(matches!(
        s.error_kind(&declaration),
        EvalErrorKind::InvalidBinding { name, .. } if name == "x"
    ));
}

#[test]
fn sum_instantiation_selects_the_alternative() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;

    let declaration = b.apply(
        b.identifier("Sum"),
        vec![
            b.symbol("Number"),
            b.tuple(vec![b.identifier("Integer"), b.identifier("Float")]),
        ],
    );
    s.value(&b.assign(b.bindable("Number"), declaration));

    assert_eq!(
        s.print(&b.apply(b.identifier("Number"), vec![b.float(2.5)])),
        "Number(2.5)"
    );
    let wrong = b.apply(b.identifier("Number"), vec![b.string("two")]);
    assert_eq!(
        s.error_kind(&wrong),
        EvalErrorKind::TypeMismatch {
            expected: "an alternative of Number".to_owned(),
            got: "String".to_owned(),
        }
    );
    let narrow = b.apply(
        b.identifier("Number"),
        vec![b.apply(b.identifier("Int32"), vec![b.integer(3)])],
    );
    assert_eq!(s.print(&narrow), "Number(3)");
    let narrow = s.value(&narrow);
    let Payload::Aggregate(id) = narrow.payload else {
        panic!("sum values are aggregates");
    };
    let crate::Aggregate::Sum { alternative, payload } = s.interpreter.heap().aggregate(id) else {
        panic!("Number values are sums");
    };
    assert_eq!(*alternative, 0);
    assert_eq!(payload.ty, TypeId::INT32);

    let alternative = b.unary(b.identifier("Number"), "Float");
    assert_eq!(s.value(&alternative), Value::type_ref(TypeId::FLOAT));
}

#[test]
fn sum_falls_back_to_a_gradual_alternative() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;

    let declaration = b.apply(
        b.identifier("Sum"),
        vec![
            b.symbol("Loose"),
            b.tuple(vec![b.identifier("Integer"), b.identifier("Any")]),
        ],
    );
    s.value(&b.assign(b.bindable("Loose"), declaration));

    let value = s.value(&b.apply(b.identifier("Loose"), vec![b.string("s")]));
    let Payload::Aggregate(id) = value.payload else {
        panic!("sum values are aggregates");
    };
    assert!(matches!(
        s.interpreter.heap().aggregate(id),
        crate::Aggregate::Sum { alternative: 1, .. }
    ));
}

#[test]
fn enum_constants() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;

    let declaration = b.apply(
        b.identifier("Enum"),
        vec![
            b.symbol("Color"),
            b.identifier("Integer"),
            b.dictionary(vec![
                b.association(b.symbol("red"), Some(b.integer(1))),
                b.association(b.symbol("green"), Some(b.integer(2))),
            ]),
        ],
    );
    s.value(&b.assign(b.bindable("Color"), declaration));

    assert_eq!(s.print(&b.unary(b.identifier("Color"), "red")), "Color red");
    assert_eq!(
        s.print(&b.apply(b.identifier("Color"), vec![b.integer(2)])),
        "Color green"
    );
    assert!(matches!(
        s.error_kind(&b.apply(b.identifier("Color"), vec![b.integer(3)])),
        EvalErrorKind::TypeMismatch { .. }
    ));

    let by_color = b.switch(
        b.unary(b.identifier("Color"), "green"),
        vec![
            (b.unary(b.identifier("Color"), "red"), b.string("stop")),
            (b.unary(b.identifier("Color"), "green"), b.string("go")),
        ],
    );
    assert_eq!(s.value(&by_color), Value::string("go"));
}

#[test]
fn enum_constants_convert_to_the_base_type() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;

    let declaration = b.apply(
        b.identifier("Enum"),
        vec![
            b.symbol("Flag"),
            b.identifier("UInt8"),
            b.dictionary(vec![b.association(b.symbol("on"), Some(b.integer(1)))]),
        ],
    );
    s.value(&b.assign(b.bindable("Flag"), declaration));
    let on = s.value(&b.unary(b.identifier("Flag"), "on"));
    assert_eq!(on.payload, Payload::Unsigned(1));
}

#[test]
fn builtin_types_convert_and_pack() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;

    assert_eq!(
        s.value(&b.apply(b.identifier("Float"), vec![b.integer(3)])),
        Value::float(3.0)
    );
    assert_eq!(
        s.value(&b.apply(b.identifier("Integer"), vec![b.float(-2.7)])),
        Value::integer(-2)
    );
    assert_eq!(
        s.value(&b.apply(b.identifier("Character"), vec![b.integer(65)])),
        Value::character('A')
    );
    assert_eq!(
        s.value(&b.apply(b.identifier("String"), vec![b.symbol("abc")])),
        Value::string("abc")
    );
    assert_eq!(
        s.print(&b.apply(b.identifier("Array"), vec![b.integer(1), b.integer(2)])),
        "[1. 2]"
    );
    assert_eq!(
        s.error_kind(&b.apply(b.identifier("Boolean"), vec![b.integer(1)])),
        EvalErrorKind::UnsupportedApplication {
            type_name: "Boolean".to_owned(),
        }
    );
}

#[test]
fn type_names_are_not_values() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;
    assert!(matches!(
        s.error_kind(&b.identifier("Integer")),
        EvalErrorKind::InvalidBinding { name, .. } if name == "Integer"
    ));
}

#[test]
fn non_callable_values_cannot_be_applied() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;
    assert_eq!(
        s.error_kind(&b.apply(b.integer(3), vec![])),
        EvalErrorKind::UnsupportedApplication {
            type_name: "Integer".to_owned(),
        }
    );
}
