use pretty_assertions::assert_eq;
use snek_vm::buffer_handler;
use snekc::RunOptions;

use crate::common::Project;

const GEOMETRY: &str = "\
public namespace geo {
  public namespace flat {
    public let area = { w h -> (* w h) }
  }
  namespace internal {
    public let scale = 10
  }
}
public type Shape = Circle r | Dot
let hidden = 1";

#[test]
fn import_everything() {
    let project = Project::new();
    project.file("geometry.snek", GEOMETRY);
    project.file(
        "main.snek",
        "import \"geometry.snek\"\n(println (geo.flat.area 2 3))",
    );
    let o = project.run("main.snek");
    assert_eq!(o.err, "");
    assert_eq!(o.out, "6\n");
}

#[test]
fn import_everything_skips_private_namespaces() {
    let project = Project::new();
    project.file("geometry.snek", GEOMETRY);
    project.file(
        "main.snek",
        "import \"geometry.snek\"\n(println geo.internal.scale)",
    );
    let o = project.run("main.snek");
    assert!(o.err.starts_with("Name 'geo.internal.scale' not found"));
}

#[test]
fn imported_types_construct_and_match() {
    let project = Project::new();
    project.file("geometry.snek", GEOMETRY);
    project.file(
        "main.snek",
        "\
import \"geometry.snek\"
let radius = { s -> (match s [ { (Circle r) -> r } { (Dot) -> 0 } ]) }
(println [(radius (Circle 4)) (radius Dot)])",
    );
    let o = project.run("main.snek");
    assert_eq!(o.out, "(:: 4 (:: 0 Empty))\n");
}

#[test]
fn import_selected_name_keeps_its_path() {
    let project = Project::new();
    project.file("geometry.snek", GEOMETRY);
    project.file(
        "main.snek",
        "import geo.flat.area from \"geometry.snek\"\n(println (geo.flat.area 4 5))",
    );
    let o = project.run("main.snek");
    assert_eq!(o.out, "20\n");
}

#[test]
fn import_selected_brings_only_what_was_named() {
    let project = Project::new();
    project.file("geometry.snek", GEOMETRY);
    project.file(
        "main.snek",
        "import Circle from \"geometry.snek\"\n(println Dot)",
    );
    let o = project.run("main.snek");
    assert!(o.err.starts_with("Name 'Dot' not found"));
}

#[test]
fn importing_through_a_private_namespace_fails() {
    let project = Project::new();
    project.file("geometry.snek", GEOMETRY);
    project.file(
        "main.snek",
        "import geo.internal.scale from \"geometry.snek\"\n(println 1)",
    );
    let o = project.run("main.snek");
    assert_eq!(o.out, "");
    assert!(o.err.starts_with("Cannot import private name 'geo.internal'"));
}

#[test]
fn private_bindings_are_not_exported() {
    let project = Project::new();
    project.file("geometry.snek", GEOMETRY);
    project.file(
        "main.snek",
        "import hidden from \"geometry.snek\"\n(println 1)",
    );
    let o = project.run("main.snek");
    assert!(o.err.starts_with("Module has no public name 'hidden'"));
}

#[test]
fn modules_run_once_per_program() {
    let project = Project::new();
    project.file(
        "counter.snek",
        "public let start = 0\n(println \"counter loaded\")",
    );
    project.file(
        "wrapper.snek",
        "import \"counter.snek\"\npublic let next = (+ start 1)",
    );
    project.file(
        "main.snek",
        "import \"counter.snek\"\nimport \"wrapper.snek\"\n(println next)",
    );
    let o = project.run("main.snek");
    assert_eq!(o.out, "counter loaded\n1\n");
}

#[test]
fn imports_resolve_against_the_configured_root() {
    let project = Project::new();
    project.file("lib/geometry.snek", GEOMETRY);
    project.file(
        "app/main.snek",
        "import \"geometry.snek\"\n(println (geo.flat.area 1 1))",
    );
    let options = RunOptions {
        root: Some(project.path().join("lib")),
        ..RunOptions::default()
    };
    let o = project.run_with("app/main.snek", &options, buffer_handler());
    assert_eq!(o.out, "1\n");
}

#[test]
fn missing_module_is_reported() {
    let project = Project::new();
    project.file("main.snek", "import \"nowhere.snek\"\n(println 1)");
    let o = project.run("main.snek");
    assert_eq!(o.out, "");
    assert!(o.err.starts_with("Cannot read module 'nowhere.snek'"));
}

#[test]
fn broken_module_names_the_file() {
    let project = Project::new();
    project.file("broken.snek", "let = 1");
    project.file("main.snek", "import \"broken.snek\"\n(println 1)");
    let o = project.run("main.snek");
    assert!(o.err.starts_with("Syntax error in module 'broken.snek'"));
}

#[test]
fn prelude_can_be_imported_by_name() {
    let project = Project::new();
    project.file("main.snek", "import reverse from \"prelude\"\n(println (reverse [1 2]))");
    let options = RunOptions {
        prelude: false,
        ..RunOptions::default()
    };
    let o = project.run_with("main.snek", &options, buffer_handler());
    assert_eq!(o.out, "(:: 2 (:: 1 Empty))\n");
}
