use pretty_assertions::assert_eq;
use snek_vm::{buffer_handler_with_input, RuntimeConfig, SharedIoHandler};
use snekc::run_repl;

/// Feed `lines` to a REPL; returns (prompts, output, errors).
fn session(lines: &str) -> (String, String, String) {
    let io: SharedIoHandler = buffer_handler_with_input(lines);
    let mut prompts = Vec::new();
    run_repl(RuntimeConfig::default().with_io(io.clone()), &mut prompts).unwrap();
    (
        String::from_utf8(prompts).unwrap(),
        io.output(),
        io.errors(),
    )
}

#[test]
fn values_are_echoed_and_bindings_persist() {
    let (prompts, out, err) = session("let x = 20\n(+ x 22)\n");
    assert_eq!(out, "42\n");
    assert_eq!(err, "");
    assert_eq!(prompts, ">>> >>> >>> ");
}

#[test]
fn unit_is_not_echoed() {
    let (_, out, _) = session("(println \"hi\")\n");
    assert_eq!(out, "hi\n");
}

#[test]
fn runtime_error_resets_but_keeps_going() {
    let (_, out, err) = session("let y = 2\n(match 1 [ { 2 -> 2 } ])\n(+ y 1)\n");
    assert!(err.starts_with("Fail: no match\n"));
    assert_eq!(out, "3\n");
}

#[test]
fn syntax_error_is_reported_and_skipped() {
    let (_, out, err) = session("let = 1\n(+ 1 1)\n");
    assert!(err.starts_with("error: "));
    assert_eq!(out, "2\n");
}

#[test]
fn blank_line_ends_the_session() {
    let (_, out, _) = session("(+ 1 0)\n\n(+ 2 0)\n");
    assert_eq!(out, "1\n");
}
