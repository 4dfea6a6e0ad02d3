//! Closures, mutable boxes and lexical capture.

use pretty_assertions::assert_eq;
use sysmel_ir::Interner;

use super::Session;
use crate::{Binding, EvalErrorKind, Payload, Value};

#[test]
fn mutable_box_is_updated_in_place_and_seen_by_closures() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;

    let boxes_before = s.interpreter.heap().box_count();
    let declared = s.value(&b.assign(b.mutable_bindable("x"), b.integer(1)));
    assert_eq!(s.interpreter.heap().box_count(), boxes_before + 1);
    let captured = b.assign(b.bindable("readX"), b.block(vec![], b.identifier("x")));
    s.value(&captured);

    let first = s.eval(&b.identifier("x")).unwrap_or_else(|e| panic!("{e}"));
    let stored = s
        .eval(&b.assign(b.identifier("x"), b.integer(2)))
        .unwrap_or_else(|e| panic!("{e}"));
    let second = s.eval(&b.identifier("x")).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(s.interpreter.heap().box_count(), boxes_before + 1);

    assert!(matches!(first.payload, Payload::Box(_)));
    assert_eq!(first, second);
    assert_eq!(stored, first);
    assert_eq!(declared, Value::integer(1));
    assert_eq!(s.value(&b.identifier("x")), Value::integer(2));
    assert_eq!(s.value(&b.apply(b.identifier("readX"), vec![])), Value::integer(2));
    assert_eq!(s.interpreter.heap().box_count(), boxes_before + 1);
}

#[test]
fn immutable_binding_is_not_boxed() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;

    s.value(&b.assign(b.bindable("x"), b.integer(1)));
    let x = interner.intern("x");
    assert_eq!(
        s.interpreter.lookup(s.env, x),
        Some(&Binding::Value(Value::integer(1)))
    );
}

#[test]
fn assigning_an_immutable_name_sends_assign() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;

    s.value(&b.assign(b.bindable("x"), b.integer(1)));
    let kind = s.error_kind(&b.assign(b.identifier("x"), b.integer(2)));
    assert_eq!(
        kind,
        EvalErrorKind::NoMatchingMethod {
            selector: ":=".to_owned(),
            type_name: "Integer".to_owned(),
        }
    );
}

#[test]
fn mutable_declaration_without_value_is_uninitialized() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;

    s.eval(&b.mutable_bindable("pending"))
        .unwrap_or_else(|e| panic!("{e}"));
    let kind = s.error_kind(&b.unary(b.identifier("pending"), "printString"));
    assert_eq!(kind, EvalErrorKind::UninitializedBox);

    s.value(&b.assign(b.identifier("pending"), b.integer(5)));
    assert_eq!(s.print(&b.identifier("pending")), "5");
}

#[test]
fn closure_applies_its_parameters() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;

    let add = b.block(
        vec![b.bindable("a"), b.bindable("b")],
        b.binary_sequence(b.identifier("a"), vec![("+", b.identifier("b"))]),
    );
    s.value(&b.assign(b.bindable("add"), add));
    let call = b.apply(b.identifier("add"), vec![b.integer(3), b.integer(4)]);
    assert_eq!(s.value(&call), Value::integer(7));
}

#[test]
fn closure_arity_is_checked() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;

    s.value(&b.assign(
        b.bindable("id"),
        b.block(vec![b.bindable("v")], b.identifier("v")),
    ));
    let kind = s.error_kind(&b.apply(b.identifier("id"), vec![b.integer(1), b.integer(2)]));
    assert_eq!(
        kind,
        EvalErrorKind::ArityMismatch {
            name: "<block>".to_owned(),
            expected: 1,
            got: 2,
        }
    );
}

#[test]
fn duplicate_parameters_are_rejected() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;

    let kind = s.error_kind(&b.block(
        vec![b.bindable("v"), b.bindable("v")],
        b.identifier("v"),
    ));
    assert!(matches!(kind, EvalErrorKind::InvalidBinding { name, .. } if name == "v"));
}

#[test]
fn mutable_parameter_is_a_fresh_box_per_call() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;

    let bump = b.block(
        vec![b.mutable_bindable("n")],
        b.sequence(vec![
            b.assign(
                b.identifier("n"),
                b.binary_sequence(b.identifier("n"), vec![("+", b.integer(1))]),
            ),
            b.identifier("n"),
        ]),
    );
    s.value(&b.assign(b.bindable("bump"), bump));
    s.value(&b.assign(b.bindable("five"), b.integer(5)));

    let call = b.apply(b.identifier("bump"), vec![b.identifier("five")]);
    assert_eq!(s.value(&call), Value::integer(6));
    assert_eq!(s.value(&call), Value::integer(6));
    assert_eq!(s.value(&b.identifier("five")), Value::integer(5));
}

#[test]
fn counter_closure_keeps_its_activation_alive() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;

    let increment = b.block(
        vec![],
        b.sequence(vec![
            b.assign(
                b.identifier("count"),
                b.binary_sequence(b.identifier("count"), vec![("+", b.integer(1))]),
            ),
            b.identifier("count"),
        ]),
    );
    let make_counter = b.block(
        vec![],
        b.sequence(vec![
            b.assign(b.mutable_bindable("count"), b.integer(0)),
            increment,
        ]),
    );
    s.value(&b.assign(b.bindable("makeCounter"), make_counter));
    s.value(&b.assign(
        b.bindable("counter"),
        b.apply(b.identifier("makeCounter"), vec![]),
    ));
    s.value(&b.assign(
        b.bindable("other"),
        b.apply(b.identifier("makeCounter"), vec![]),
    ));

    let tick = b.apply(b.identifier("counter"), vec![]);
    assert_eq!(s.value(&tick), Value::integer(1));
    assert_eq!(s.value(&tick), Value::integer(2));
    assert_eq!(
        s.value(&b.apply(b.identifier("other"), vec![])),
        Value::integer(1)
    );
}

/// `:(:n) fact := if (n <= 1) 1 else n * fact(n - 1)`
fn define_factorial(s: &mut Session<'_>) {
    let b = s.syntax;
    let n = || b.identifier("n");
    let body = b.if_(
        b.binary_sequence(n(), vec![("<=", b.integer(1))]),
        Some(b.integer(1)),
        Some(b.binary_sequence(
            n(),
            vec![(
                "*",
                b.apply(
                    b.identifier("fact"),
                    vec![b.binary_sequence(n(), vec![("-", b.integer(1))])],
                ),
            )],
        )),
    );
    let signature = b.function_type(vec![b.bindable("n")], None);
    s.value(&b.assign(b.typed_bindable(signature, Some("fact")), body));
}

#[test]
fn named_closure_can_recurse() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    define_factorial(&mut s);
    let b = s.syntax;

    assert_eq!(
        s.value(&b.apply(b.identifier("fact"), vec![b.integer(10)])),
        Value::integer(3_628_800)
    );
    assert_eq!(s.print(&b.identifier("fact")), "<function fact>");
}

#[test]
fn deep_recursion_does_not_overflow_the_stack() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;

    // :(:n) down := if (n = 0) 0 else down(n - 1)
    let body = b.if_(
        b.binary_sequence(b.identifier("n"), vec![("=", b.integer(0))]),
        Some(b.integer(0)),
        Some(b.apply(
            b.identifier("down"),
            vec![b.binary_sequence(b.identifier("n"), vec![("-", b.integer(1))])],
        )),
    );
    let signature = b.function_type(vec![b.bindable("n")], None);
    s.value(&b.assign(b.typed_bindable(signature, Some("down")), body));

    let call = b.apply(b.identifier("down"), vec![b.integer(20_000)]);
    assert_eq!(s.value(&call), Value::integer(0));
}

#[test]
fn lexical_block_scopes_its_bindings() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;

    s.value(&b.assign(b.bindable("x"), b.integer(1)));
    let block = b.lexical_block(b.sequence(vec![
        b.assign(b.bindable("x"), b.integer(2)),
        b.identifier("x"),
    ]));
    assert_eq!(s.value(&block), Value::integer(2));
    assert_eq!(s.value(&b.identifier("x")), Value::integer(1));
}
