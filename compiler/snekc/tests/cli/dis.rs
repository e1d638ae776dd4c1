use pretty_assertions::assert_eq;
use snek_vm::SnekError;
use snekc::{disassemble, CliError};

use crate::common::Project;

#[test]
fn listing_shows_index_line_and_opcode() {
    let project = Project::new();
    let path = project.file("main.snek", "(println 1)");
    let listing = disassemble(&path).unwrap();
    assert_eq!(
        listing,
        "   0    1  LoadNumber 1\n   1    1  LoadName println\n   2    1  Call 1\n"
    );
}

#[test]
fn function_bodies_are_nested() {
    let project = Project::new();
    let path = project.file("main.snek", "let f = { x ->\n  (+ x 1)\n}\n(f 2)");
    let listing = disassemble(&path).unwrap();
    assert!(listing.contains("LoadFunction/1"));
    assert!(listing
        .lines()
        .any(|line| line.starts_with("    ") && line.trim_start().starts_with('0')));
}

#[test]
fn compile_errors_surface() {
    let project = Project::new();
    let path = project.file("main.snek", "(match 1 2)");
    let err = disassemble(&path).unwrap_err();
    assert!(matches!(err, CliError::Snek(SnekError::Compile(_))));
}
