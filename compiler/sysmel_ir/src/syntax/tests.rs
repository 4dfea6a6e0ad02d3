use super::*;
use crate::Interner;
use pretty_assertions::assert_eq;

#[test]
fn test_builder_interns_selectors() {
    let interner = Interner::new();
    let build = SyntaxBuilder::new(&interner);

    let node = build.send(build.integer(3), "+", vec![build.integer(4)]);
    let NodeKind::MessageSend {
        receiver,
        selector,
        arguments,
    } = &node.kind
    else {
        panic!("expected a message send, got {node:?}");
    };

    assert_eq!(receiver.kind, NodeKind::LiteralInteger(3));
    assert_eq!(selector.kind, NodeKind::LiteralSymbol(interner.intern("+")));
    assert_eq!(arguments.len(), 1);
}

#[test]
fn test_binary_sequence_interleaves_operators() {
    let interner = Interner::new();
    let build = SyntaxBuilder::new(&interner);

    let node = build.binary_sequence(
        build.integer(1),
        vec![("+", build.integer(2)), ("*", build.integer(3))],
    );
    let NodeKind::BinaryOperatorSequence(elements) = &node.kind else {
        panic!("expected a binary operator sequence");
    };

    let kinds: Vec<&NodeKind> = elements.iter().map(|element| &element.kind).collect();
    assert_eq!(
        kinds,
        vec![
            &NodeKind::LiteralInteger(1),
            &NodeKind::LiteralSymbol(interner.intern("+")),
            &NodeKind::LiteralInteger(2),
            &NodeKind::LiteralSymbol(interner.intern("*")),
            &NodeKind::LiteralInteger(3),
        ]
    );
}

#[test]
fn test_lexical_block_has_no_function_type() {
    let interner = Interner::new();
    let build = SyntaxBuilder::new(&interner);

    let block = build.lexical_block(build.integer(1));
    assert!(matches!(
        block.kind,
        NodeKind::BlockClosure {
            function_type: None,
            ..
        }
    ));

    let closure = build.block(vec![build.bindable("x")], build.identifier("x"));
    assert!(matches!(
        closure.kind,
        NodeKind::BlockClosure {
            function_type: Some(_),
            ..
        }
    ));
}

#[test]
fn test_structural_equality() {
    let interner = Interner::new();
    let build = SyntaxBuilder::new(&interner);
    assert_eq!(
        build.array(vec![build.string("a"), build.character('b')]),
        build.array(vec![build.string("a"), build.character('b')])
    );
    assert_ne!(build.integer(1), build.integer(2));
}

#[test]
fn test_kind_names() {
    let interner = Interner::new();
    let build = SyntaxBuilder::new(&interner);
    assert_eq!(build.wildcard().kind.name(), "identifier");
    assert_eq!(build.namespace("Foo", None).kind.name(), "namespace definition");
    assert!(build.symbol("x").kind.is_literal());
    assert!(!build.identifier("x").kind.is_literal());
}
