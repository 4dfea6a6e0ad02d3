//! Message sends, cascades, binary sequences and built-in methods.

use pretty_assertions::assert_eq;
use sysmel_ir::{Interner, Syntax, SyntaxBuilder};

use super::Session;
use crate::{EvalErrorKind, EvalResult, Interpreter, Payload, TypeId, Value};

fn print_me(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    let text = interpreter.display_string(&arguments[0]);
    interpreter.print_handler().println(&text);
    Ok(arguments[0].clone())
}

fn squared(interpreter: &mut Interpreter<'_>, arguments: &[Value]) -> EvalResult {
    match arguments[0].payload {
        Payload::Integer(n) => Ok(Value::integer(n * n)),
        _ => Err(interpreter.receiver_mismatch("Integer", &arguments[0])),
    }
}

fn sum(b: SyntaxBuilder<'_>, first: i64, rest: &[(&'static str, i64)]) -> Syntax {
    b.binary_sequence(
        b.integer(first),
        rest.iter()
            .map(|(operator, operand)| (*operator, b.integer(*operand)))
            .collect(),
    )
}

#[test]
fn cascade_sends_every_message_to_one_receiver() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    s.interpreter.define_primitive(TypeId::INTEGER, "printMe", print_me);
    s.interpreter.define_primitive(TypeId::INTEGER, "squared", squared);
    let b = s.syntax;

    let node = b.cascade(
        b.integer(3),
        vec![
            b.cascade_message("printMe", vec![]),
            b.cascade_message("printMe", vec![]),
            b.cascade_message("squared", vec![]),
        ],
    );
    assert_eq!(s.value(&node), Value::integer(9));
    assert_eq!(s.output(), "3\n3\n");
}

#[test]
fn cascade_evaluates_its_receiver_once() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    s.interpreter.define_primitive(TypeId::INTEGER, "printMe", print_me);
    let b = s.syntax;

    let receiver = b.unary(b.integer(7), "printMe");
    let node = b.cascade(
        receiver,
        vec![
            b.cascade_message("yourself", vec![]),
            b.cascade_message("+", vec![b.integer(1)]),
        ],
    );
    assert_eq!(s.value(&node), Value::integer(8));
    assert_eq!(s.output(), "7\n");
}

#[test]
fn malformed_cascade_is_rejected_before_evaluation() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    s.interpreter.define_primitive(TypeId::INTEGER, "printMe", print_me);
    let b = s.syntax;

    let node = b.cascade(
        b.unary(b.integer(1), "printMe"),
        vec![b.cascade_message("yourself", vec![]), b.integer(2)],
    );
    assert_eq!(
        s.error_kind(&node),
        EvalErrorKind::MalformedCascade {
            found: "integer literal".to_owned(),
        }
    );
    assert_eq!(s.output(), "");
}

#[test]
fn binary_sequence_folds_left_to_right() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;
    assert_eq!(s.value(&sum(b, 2, &[("+", 3), ("*", 4)])), Value::integer(20));
    assert_eq!(s.value(&sum(b, 10, &[("-", 3), ("-", 2)])), Value::integer(5));
}

#[test]
fn integer_arithmetic() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;
    assert_eq!(s.value(&sum(b, 7, &[("/", 2)])), Value::integer(3));
    assert_eq!(s.value(&sum(b, -7, &[("//", 2)])), Value::integer(-4));
    assert_eq!(s.value(&sum(b, -7, &[("%", 2)])), Value::integer(1));
    assert_eq!(s.value(&b.unary(b.integer(5), "negated")), Value::integer(-5));
    assert_eq!(
        s.error_kind(&sum(b, 1, &[("/", 0)])),
        EvalErrorKind::DivisionByZero
    );
    assert_eq!(
        s.error_kind(&sum(b, 1, &[("%", 0)])),
        EvalErrorKind::DivisionByZero
    );
}

#[test]
fn mixed_arithmetic_is_floating_point() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;
    let node = b.binary_sequence(b.integer(1), vec![("+", b.float(0.5))]);
    assert_eq!(s.value(&node), Value::float(1.5));
    let node = b.binary_sequence(b.float(1.0), vec![("/", b.integer(0))]);
    assert_eq!(s.value(&node), Value::float(f64::INFINITY));
}

#[test]
fn comparisons() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;
    let t = Value::boolean(true);
    let f = Value::boolean(false);
    assert_eq!(s.value(&sum(b, 1, &[("<", 2)])), t);
    assert_eq!(s.value(&sum(b, 2, &[("<=", 2)])), t);
    assert_eq!(s.value(&sum(b, 1, &[(">", 2)])), f);
    assert_eq!(s.value(&sum(b, 2, &[("~=", 2)])), f);
    let node = b.binary_sequence(b.integer(2), vec![("=", b.float(2.0))]);
    assert_eq!(s.value(&node), t);
    let node = b.binary_sequence(b.integer(2), vec![("=", b.string("2"))]);
    assert_eq!(s.value(&node), f);
}

#[test]
fn fixed_width_integers_wrap() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;
    let byte = b.apply(b.identifier("UInt8"), vec![b.integer(250)]);
    let node = b.binary_sequence(byte, vec![("+", b.integer(10))]);
    assert_eq!(
        s.value(&node),
        Value::new(TypeId::UINT8, Payload::Unsigned(4))
    );
    let small = b.apply(b.identifier("Int8"), vec![b.integer(200)]);
    assert_eq!(s.print(&small), "-56");
}

#[test]
fn boolean_macros_skip_the_branch_not_taken() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;
    let unbound = || b.lexical_block(b.identifier("nowhere"));

    let node = b.send(b.identifier("false"), "and:", vec![unbound()]);
    assert_eq!(s.value(&node), Value::boolean(false));
    let node = b.send(b.identifier("true"), "or:", vec![unbound()]);
    assert_eq!(s.value(&node), Value::boolean(true));
    let node = b.send(
        b.identifier("true"),
        "ifTrue:ifFalse:",
        vec![b.lexical_block(b.string("yes")), unbound()],
    );
    assert_eq!(s.value(&node), Value::string("yes"));
    let node = b.send(b.identifier("true"), "ifFalse:", vec![unbound()]);
    assert_eq!(s.value(&node), Value::void());

    let node = b.send(b.identifier("true"), "and:", vec![unbound()]);
    assert_eq!(
        s.error_kind(&node),
        EvalErrorKind::UnboundIdentifier {
            name: "nowhere".to_owned(),
        }
    );
}

#[test]
fn boolean_operators() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;
    let node = b.send(b.identifier("true"), "&", vec![b.identifier("false")]);
    assert_eq!(s.value(&node), Value::boolean(false));
    let node = b.send(b.identifier("false"), "|", vec![b.identifier("true")]);
    assert_eq!(s.value(&node), Value::boolean(true));
    assert_eq!(
        s.value(&b.unary(b.identifier("true"), "not")),
        Value::boolean(false)
    );
}

#[test]
fn unknown_selector_is_reported_with_the_receiver_type() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;
    assert_eq!(
        s.error_kind(&b.unary(b.string("text"), "frobnicate")),
        EvalErrorKind::NoMatchingMethod {
            selector: "frobnicate".to_owned(),
            type_name: "String".to_owned(),
        }
    );
}

#[test]
fn boxes_forward_messages_to_their_contents() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;
    s.value(&b.assign(b.mutable_bindable("x"), b.integer(4)));
    let node = b.binary_sequence(b.identifier("x"), vec![("*", b.integer(2))]);
    assert_eq!(s.value(&node), Value::integer(8));
    assert_eq!(s.value(&b.unary(b.identifier("x"), "value")), Value::integer(4));
    assert_eq!(s.print(&b.unary(b.identifier("x"), "printString")), "\"4\"");
}

#[test]
fn root_methods_apply_to_every_type() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;
    assert_eq!(
        s.value(&b.unary(b.symbol("sym"), "printString")),
        Value::string("#sym")
    );
    let node = b.send(b.symbol("a"), "==", vec![b.symbol("a")]);
    assert_eq!(s.value(&node), Value::boolean(true));
    let node = b.send(b.identifier("nil"), "==", vec![b.identifier("void")]);
    assert_eq!(s.value(&node), Value::boolean(false));
    let node = b.unary(b.string("hello"), "printLine");
    assert_eq!(s.value(&node), Value::string("hello"));
    assert_eq!(s.output(), "hello\n");
}

#[test]
fn strings_and_symbols() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;
    let node = b.send(b.string("foo"), ",", vec![b.string("bar")]);
    assert_eq!(s.value(&node), Value::string("foobar"));
    let node = b.send(b.symbol("foo"), ",", vec![b.string(":")]);
    assert_eq!(s.value(&node), Value::symbol(interner.intern("foo:")));
    assert_eq!(s.value(&b.unary(b.string("héllo"), "size")), Value::integer(5));
    assert_eq!(
        s.value(&b.unary(b.string("key"), "asSymbol")),
        Value::symbol(interner.intern("key"))
    );
}

#[test]
fn namespace_sends_reach_exported_bindings() {
    let interner = Interner::new();
    let mut s = Session::new(&interner);
    let b = s.syntax;
    let body = b.sequence(vec![
        b.assign(b.bindable("origin"), b.integer(0)),
        b.assign(
            b.bindable("twice"),
            b.block(
                vec![b.bindable("v")],
                b.binary_sequence(b.identifier("v"), vec![("*", b.integer(2))]),
            ),
        ),
    ]);
    s.value(&b.namespace("Geometry", Some(body)));
    s.value(&b.send(b.identifier("Geometry"), "export:", vec![b.symbol("origin")]));
    s.value(&b.send(b.identifier("Geometry"), "export:", vec![b.symbol("twice")]));

    assert_eq!(
        s.value(&b.unary(b.identifier("Geometry"), "origin")),
        Value::integer(0)
    );
    let call = b.send(b.identifier("Geometry"), "twice", vec![b.integer(21)]);
    assert_eq!(s.value(&call), Value::integer(42));
    assert_eq!(s.print(&b.identifier("Geometry")), "<namespace Geometry>");
}
