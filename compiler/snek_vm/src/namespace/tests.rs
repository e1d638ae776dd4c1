use pretty_assertions::assert_eq;

use super::*;

fn path(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|p| (*p).to_string()).collect()
}

fn shape_cases() -> Vec<CaseSpec> {
    vec![
        CaseSpec {
            name: "Circle".into(),
            arity: 1,
        },
        CaseSpec {
            name: "Dot".into(),
            arity: 0,
        },
    ]
}

#[test]
fn make_namespace_creates_missing_segments() {
    let root = Namespace::new(true);
    make_namespace(&root, &path(&["a", "b"]), true).unwrap();
    assert!(find_namespace(&root, &path(&["a", "b"])).is_ok());
    assert!(find_namespace(&root, &path(&["a"])).unwrap().borrow().is_public());
}

#[test]
fn public_under_private_is_rejected() {
    let root = Namespace::new(true);
    make_namespace(&root, &path(&["hidden"]), false).unwrap();
    let err = make_namespace(&root, &path(&["hidden", "open"]), true).unwrap_err();
    assert!(matches!(err, RuntimeErrorKind::PublicUnderPrivate { .. }));

    // Private under private is fine.
    make_namespace(&root, &path(&["hidden", "inner"]), false).unwrap();
}

#[test]
fn define_type_registers_cases_and_values() {
    let root = Namespace::new(true);
    let parent = root.borrow_mut().define_type("Shape", &shape_cases());
    assert_eq!(parent.cases.len(), 2);

    let ns = root.borrow();
    assert!(matches!(ns.get_type("Shape"), Some(Type::Parent(_))));
    assert!(matches!(ns.get_type("Circle"), Some(Type::Case(_))));
    assert!(matches!(ns.binding("Circle"), Some(Value::Constructor(_))));
    assert!(matches!(ns.binding("Dot"), Some(Value::Singleton(_))));
}

#[test]
fn qualified_lookup() {
    let root = Namespace::new(true);
    let geo = make_namespace(&root, &path(&["geo"]), true).unwrap();
    geo.borrow_mut().bind("pi", Value::Number(3.0));

    assert_eq!(find_name(&root, &path(&["geo", "pi"])).unwrap(), Value::Number(3.0));
    let err = find_name(&root, &path(&["geo", "tau"])).unwrap_err();
    assert_eq!(err.to_string(), "Name 'geo.tau' not found");
    let err = find_type(&root, &path(&["nowhere", "T"])).unwrap_err();
    assert_eq!(err.to_string(), "Type 'nowhere.T' not found");
}

#[test]
fn import_all_skips_private_children() {
    let src = Namespace::new(true);
    src.borrow_mut().bind("top", Value::Number(1.0));
    make_namespace(&src, &path(&["open"]), true)
        .unwrap()
        .borrow_mut()
        .bind("x", Value::Number(2.0));
    make_namespace(&src, &path(&["closed"]), false)
        .unwrap()
        .borrow_mut()
        .bind("y", Value::Number(3.0));

    let target = Namespace::new(true);
    import_all(&src, &target);

    assert_eq!(find_name(&target, &path(&["top"])).unwrap(), Value::Number(1.0));
    assert_eq!(find_name(&target, &path(&["open", "x"])).unwrap(), Value::Number(2.0));
    assert!(find_namespace(&target, &path(&["closed"])).is_err());
}

#[test]
fn import_selected_places_entry_at_same_path() {
    let src = Namespace::new(true);
    make_namespace(&src, &path(&["math"]), true)
        .unwrap()
        .borrow_mut()
        .bind("double", Value::Number(2.0));

    let target = Namespace::new(true);
    import_selected(&src, &target, &path(&["math", "double"])).unwrap();
    assert_eq!(
        find_name(&target, &path(&["math", "double"])).unwrap(),
        Value::Number(2.0)
    );
}

#[test]
fn import_selected_checks_every_segment() {
    let src = Namespace::new(true);
    make_namespace(&src, &path(&["secret"]), false)
        .unwrap()
        .borrow_mut()
        .bind("key", Value::Number(1.0));

    let target = Namespace::new(true);
    let err = import_selected(&src, &target, &path(&["secret", "key"])).unwrap_err();
    assert_eq!(
        err,
        RuntimeErrorKind::PrivateImport {
            name: "secret".into()
        }
    );
    let err = import_selected(&src, &target, &path(&["secret"])).unwrap_err();
    assert!(matches!(err, RuntimeErrorKind::PrivateImport { .. }));
    let err = import_selected(&src, &target, &path(&["missing"])).unwrap_err();
    assert!(matches!(err, RuntimeErrorKind::ImportNotFound { .. }));
}

#[test]
fn import_selected_brings_type_with_its_name() {
    let src = Namespace::new(true);
    src.borrow_mut().define_type("Shape", &shape_cases());

    let target = Namespace::new(true);
    import_selected(&src, &target, &path(&["Circle"])).unwrap();
    let ns = target.borrow();
    assert!(matches!(ns.binding("Circle"), Some(Value::Constructor(_))));
    assert!(matches!(ns.get_type("Circle"), Some(Type::Case(_))));
    assert!(ns.get_type("Shape").is_none());
}

#[test]
fn import_all_keeps_private_target_namespaces_closed() {
    let src = Namespace::new(true);
    make_namespace(&src, &path(&["bar"]), true)
        .unwrap()
        .borrow_mut()
        .bind("x", Value::Number(1.0));

    let target = Namespace::new(true);
    let foo = make_namespace(&target, &path(&["foo"]), false).unwrap();
    import_all(&src, &foo);

    let bar = find_namespace(&target, &path(&["foo", "bar"])).unwrap();
    assert!(!bar.borrow().is_public());
    assert_eq!(find_name(&target, &path(&["foo", "bar", "x"])).unwrap(), Value::Number(1.0));
}

#[test]
fn import_selected_keeps_private_target_namespaces_closed() {
    let src = Namespace::new(true);
    make_namespace(&src, &path(&["bar", "deep"]), true)
        .unwrap()
        .borrow_mut()
        .bind("x", Value::Number(1.0));

    let target = Namespace::new(true);
    let foo = make_namespace(&target, &path(&["foo"]), false).unwrap();
    import_selected(&src, &foo, &path(&["bar", "deep"])).unwrap();

    for walked in [&["foo", "bar"][..], &["foo", "bar", "deep"][..]] {
        let ns = find_namespace(&target, &path(walked)).unwrap();
        assert!(!ns.borrow().is_public(), "{walked:?} should stay private");
    }
    assert_eq!(
        find_name(&target, &path(&["foo", "bar", "deep", "x"])).unwrap(),
        Value::Number(1.0)
    );
}

#[test]
fn public_target_namespaces_stay_public_after_import() {
    let src = Namespace::new(true);
    make_namespace(&src, &path(&["bar"]), true)
        .unwrap()
        .borrow_mut()
        .bind("x", Value::Number(1.0));

    let target = Namespace::new(true);
    import_selected(&src, &target, &path(&["bar", "x"])).unwrap();
    let bar = find_namespace(&target, &path(&["bar"])).unwrap();
    assert!(bar.borrow().is_public());
}
