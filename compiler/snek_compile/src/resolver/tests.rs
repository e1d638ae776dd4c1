use snek_ir::{Decl, Expr, Pattern, Program};

use super::*;

fn parse(source: &str) -> Program {
    snek_parse::parse(source).unwrap()
}

fn root_binding(program: &Program, index: usize) -> &Binding {
    match &program.root.decls[index] {
        Decl::Binding(b) => b,
        other => panic!("expected binding, got {other:?}"),
    }
}

fn leaf_id(pattern: &Pattern) -> NodeId {
    match pattern {
        Pattern::Name(leaf) => leaf.id,
        other => panic!("expected name pattern, got {other}"),
    }
}

fn name_id(expr: &Expr) -> NodeId {
    match expr {
        Expr::Name(q) => q.id,
        other => panic!("expected name, got {other:?}"),
    }
}

#[test]
fn forward_reference_within_group() {
    // `a` refers to `b`, which is declared after it.
    let program = parse("let a = b\nlet b = 1");
    let res = Resolver::resolve(&program);

    let a = root_binding(&program, 0);
    let b = root_binding(&program, 1);
    let usage = res.get(name_id(&a.block.expr)).unwrap();
    assert_eq!(usage, res.get(leaf_id(&b.pattern)).unwrap());
}

#[test]
fn inner_group_shadows_outer() {
    let program = parse("let x = 1\nlet f = { x -> x }");
    let res = Resolver::resolve(&program);

    let outer = res.get(leaf_id(&root_binding(&program, 0).pattern)).unwrap();
    let Expr::Lambda(lambda) = &root_binding(&program, 1).block.expr else {
        panic!("expected lambda");
    };
    let param = res.get(leaf_id(&lambda.params[0])).unwrap();
    let usage = res.get(name_id(&lambda.block.expr)).unwrap();

    assert_eq!(usage, param);
    assert_ne!(usage, outer);
}

#[test]
fn unknown_and_qualified_names_stay_dynamic() {
    let program = parse("let y = (+ A.b c)");
    let res = Resolver::resolve(&program);

    let Expr::Call(call) = &root_binding(&program, 0).block.expr else {
        panic!("expected call");
    };
    assert!(res.get(name_id(&call.callable)).is_none());
    assert!(res.get(name_id(&call.args[0])).is_none());
    assert!(res.get(name_id(&call.args[1])).is_none());
}

#[test]
fn block_siblings_share_declarations_with_closures() {
    let program = parse(
        r#"
        let main = { ->
            let f = { -> later }
            let later = 5
            (f)
        }
        "#,
    );
    let res = Resolver::resolve(&program);

    let Expr::Lambda(main) = &root_binding(&program, 0).block.expr else {
        panic!("expected lambda");
    };
    let Expr::Lambda(f) = &main.block.bindings[0].block.expr else {
        panic!("expected inner lambda");
    };
    let later = res.get(leaf_id(&main.block.bindings[1].pattern)).unwrap();
    assert_eq!(res.get(name_id(&f.block.expr)).unwrap(), later);
}

#[test]
fn duplicate_leaves_in_one_group_share_a_slot() {
    let program = parse("let [x x] = [1 2]");
    let res = Resolver::resolve(&program);

    let Pattern::List(leaves) = &root_binding(&program, 0).pattern else {
        panic!("expected list pattern");
    };
    assert_eq!(res.get(leaf_id(&leaves[0])), res.get(leaf_id(&leaves[1])));
}

#[test]
fn trailing_call_sees_root_bindings() {
    let program = parse("let greeting = 'hi'\n(println greeting)");
    let res = Resolver::resolve(&program);

    let decl = res.get(leaf_id(&root_binding(&program, 0).pattern)).unwrap();
    let call = program.expr.as_ref().unwrap();
    assert_eq!(res.get(name_id(&call.args[0])).unwrap(), decl);
}

#[test]
fn nested_namespace_sees_enclosing_bindings() {
    let program = parse(
        r#"
        let base = 1
        namespace Inner {
            public let derived = base
        }
        "#,
    );
    let res = Resolver::resolve(&program);

    let base = res.get(leaf_id(&root_binding(&program, 0).pattern)).unwrap();
    let Decl::Namespace(inner) = &program.root.decls[1] else {
        panic!("expected namespace");
    };
    let Decl::Binding(derived) = &inner.decls[0] else {
        panic!("expected binding");
    };
    assert_eq!(res.get(name_id(&derived.block.expr)).unwrap(), base);
}
