use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_display_without_span() {
    assert_eq!(
        unbound_identifier("foo").to_string(),
        "unbound identifier `foo`"
    );
    assert_eq!(division_by_zero().to_string(), "integer division by zero");
}

#[test]
fn test_display_with_span_prefixes_position() {
    let error = type_mismatch("Boolean", "Integer").with_span(Span::new(12, 20));
    assert_eq!(
        error.to_string(),
        "12: type mismatch: expected Boolean, got Integer"
    );
}

#[test]
fn test_or_span_keeps_innermost_location() {
    let error = no_matching_method("frob", "Integer")
        .or_span(Span::new(4, 8))
        .or_span(Span::new(0, 30));
    assert_eq!(error.span, Some(Span::new(4, 8)));
}

#[test]
fn test_assertion_message_is_optional() {
    assert_eq!(assertion_failure(None).to_string(), "assertion failed");
    assert_eq!(
        assertion_failure(Some("x must be positive".to_owned())).to_string(),
        "assertion failed: x must be positive"
    );
}

#[test]
fn test_source_is_kind() {
    use std::error::Error;
    let error = uninitialized_box();
    let source = error.source().map(ToString::to_string);
    assert_eq!(source.as_deref(), Some("read of an uninitialized mutable box"));
}

#[test]
fn test_notes_accumulate() {
    let error = arity_mismatch("Point", 2, 3)
        .with_note(EvalNote::new("type instantiation"))
        .with_note(EvalNote::with_span("declared here", Span::new(1, 2)));
    assert_eq!(error.notes.len(), 2);
    assert_eq!(error.kind.to_string(), "Point expects 2 argument(s), got 3");
}

#[test]
fn test_stale_handle_names_the_handle() {
    assert_eq!(
        stale_handle("environment").to_string(),
        "stale environment handle from before the last runtime reset"
    );
}
