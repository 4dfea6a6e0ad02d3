use super::*;

#[test]
fn buffer_handler_println_appends_newline() {
    let handler = BufferPrintHandler::new();
    handler.println("3");
    handler.println("3");
    assert_eq!(handler.get_output(), "3\n3\n");
}

#[test]
fn buffer_handler_print_has_no_newline() {
    let handler = BufferPrintHandler::new();
    handler.print("a");
    handler.print("b");
    assert_eq!(handler.get_output(), "ab");
}

#[test]
fn buffer_handler_clear_empties_buffer() {
    let handler = buffer_handler();
    handler.println("hello");
    assert!(!handler.get_output().is_empty());
    handler.clear();
    assert!(handler.get_output().is_empty());
}

#[test]
fn silent_and_stdout_capture_nothing() {
    let silent = silent_handler();
    silent.println("dropped");
    assert_eq!(silent.get_output(), "");
    assert_eq!(stdout_handler().get_output(), "");
}
