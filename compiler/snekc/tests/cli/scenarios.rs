use pretty_assertions::assert_eq;
use proptest::prelude::*;
use snek_vm::{buffer_handler, SnekError};
use snekc::{CliError, RunOptions};

use crate::common::{run_script, run_script_with_input, Project};

#[test]
fn hello_world() {
    let o = run_script("(println \"Hello World!\")");
    assert!(o.is_ok());
    assert_eq!(o.out, "Hello World!\n");
    assert_eq!(o.err, "");
}

#[test]
fn reads_a_number_and_doubles_it() {
    let source = "let n = (to_num (input \"Enter a number: \"))\n(println (* 2 n))";
    let o = run_script_with_input(source, "42");
    assert_eq!(o.out, "Enter a number: \n84\n");
}

#[test]
fn prints_a_list_as_nested_cons_cells() {
    let o = run_script("(println [1 2 3 4 5])");
    assert_eq!(o.out, "(:: 1 (:: 2 (:: 3 (:: 4 (:: 5 Empty)))))\n");
}

#[test]
fn match_countdown() {
    let source = "\
let countdown = { n ->
  (match n [
    { 0 -> (println \"Foo\") }
    { _ -> let _ = (println n) (. (- n 1)) }
  ])
}
(countdown 5)";
    let o = run_script(source);
    assert_eq!(o.out, "5\n4\n3\n2\n1\nFoo\n");
}

#[test]
fn partial_application_in_two_steps() {
    let source = "\
let show3 = { a b c ->
  let _ = (println a)
  let _ = (println b)
  (println c)
}
let rest = (show3 1 2)
(rest 3)";
    let o = run_script(source);
    assert_eq!(o.out, "1\n2\n3\n");
}

#[test]
fn closure_sees_sibling_bound_after_it() {
    let source = "\
let f = { ->
  let g = { -> (println a) }
  let a = \"local\"
  (g)
}
(f)";
    let o = run_script(source);
    assert_eq!(o.out, "local\n");
    assert_eq!(o.err, "");
}

#[test]
fn closure_called_before_sibling_is_bound() {
    let source = "\
let f = { ->
  let g = { -> (println a) }
  let _ = (g)
  let a = \"local\"
  ()
}
(f)";
    let o = run_script(source);
    assert_eq!(o.out, "");
    assert_eq!(
        o.err,
        "Access of name 'a' before assignment\n    in <function main.snek:2> at line 2\n  from <function main.snek:1> at line 3\n  from <module main.snek> at line 7\n"
    );
    let err = o.result.unwrap_err();
    assert!(err.is_reported());
}

#[test]
fn user_types_and_matching() {
    let source = "\
type Shape = Circle r | Rect w h | Dot
let area = { s ->
  (match s [
    { (Circle r) -> (* 3 (* r r)) }
    { (Rect w h) -> (* w h) }
    { (Dot) -> 0 }
  ])
}
(println (map area [(Circle 1) (Rect 2 3) Dot]))";
    let o = run_script(source);
    assert_eq!(o.out, "(:: 3 (:: 6 (:: 0 Empty)))\n");
}

#[test]
fn no_matching_case_is_fatal() {
    let o = run_script("(println (match 3 [ { 1 -> \"one\" } ]))");
    assert_eq!(o.out, "");
    assert!(o.err.starts_with("Fail: no match\n"));
    assert!(matches!(
        o.result,
        Err(CliError::Snek(SnekError::Runtime(_)))
    ));
}

#[test]
fn deep_tail_recursion_through_the_prelude() {
    let o = run_script("(println (length (range 0 100000)))");
    assert_eq!(o.out, "100000\n");
}

#[test]
fn deep_non_tail_recursion_is_limited() {
    let project = Project::new();
    project.file(
        "main.snek",
        "let down = { n -> (match n [ { 0 -> 0 } { _ -> (+ 1 (down (- n 1))) } ]) }\n(down 1000)",
    );
    let options = RunOptions {
        max_call_depth: Some(50),
        ..RunOptions::default()
    };
    let o = project.run_with("main.snek", &options, buffer_handler());
    assert!(o.err.starts_with("Maximum call depth of 50 exceeded\n"));
}

#[test]
fn no_prelude_leaves_only_builtins() {
    let project = Project::new();
    project.file("main.snek", "(println (length []))");
    let options = RunOptions {
        prelude: false,
        ..RunOptions::default()
    };
    let o = project.run_with("main.snek", &options, buffer_handler());
    assert!(o.err.starts_with("Name 'length' not found"));
}

#[test]
fn syntax_errors_are_left_to_the_caller() {
    let o = run_script("let = 1");
    let err = o.result.unwrap_err();
    assert!(matches!(err, CliError::Snek(SnekError::Parse(_))));
    assert!(!err.is_reported());
    assert_eq!(o.err, "");
}

#[test]
fn illegal_tail_call_is_a_compile_error() {
    let o = run_script("let f = { n -> (+ 1 (. n)) }\n(f 1)");
    assert!(matches!(
        o.result,
        Err(CliError::Snek(SnekError::Compile(_)))
    ));
    assert_eq!(o.out, "");
}

#[test]
fn missing_script() {
    let project = Project::new();
    let o = project.run("nope.snek");
    assert!(matches!(o.result, Err(CliError::NotFound { .. })));
}

fn cons_string(items: &[u32]) -> String {
    items
        .iter()
        .rev()
        .fold("Empty".to_string(), |acc, n| format!("(:: {n} {acc})"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn list_literals_print_in_order(items in prop::collection::vec(0u32..1000, 0..12)) {
        let literal = items.iter().map(u32::to_string).collect::<Vec<_>>().join(" ");
        let o = run_script(&format!("(println [{literal}])"));
        prop_assert_eq!(o.out, format!("{}\n", cons_string(&items)));
    }

    #[test]
    fn reverse_of_reverse_is_identity(items in prop::collection::vec(0u32..1000, 0..12)) {
        let literal = items.iter().map(u32::to_string).collect::<Vec<_>>().join(" ");
        let o = run_script(&format!("(println (reverse (reverse [{literal}])))"));
        prop_assert_eq!(o.out, format!("{}\n", cons_string(&items)));
    }
}
