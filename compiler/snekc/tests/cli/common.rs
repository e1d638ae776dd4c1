//! Shared helpers: a scratch project directory and captured runs.

use std::fs;
use std::path::{Path, PathBuf};

use snek_vm::{buffer_handler, buffer_handler_with_input, SharedIoHandler, Value};
use snekc::{run_file, CliError, RunOptions};
use tempfile::TempDir;

/// What a script printed and how it ended.
pub struct Outcome {
    pub result: Result<Option<Value>, CliError>,
    pub out: String,
    pub err: String,
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// A temporary directory of `.snek` files.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        Project {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `source` to `name`, creating parent directories.
    pub fn file(&self, name: &str, source: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, source).unwrap();
        path
    }

    pub fn run(&self, name: &str) -> Outcome {
        self.run_with(name, &RunOptions::default(), buffer_handler())
    }

    pub fn run_with(&self, name: &str, options: &RunOptions, io: SharedIoHandler) -> Outcome {
        let result = run_file(&self.dir.path().join(name), options, io.clone());
        Outcome {
            result,
            out: io.output(),
            err: io.errors(),
        }
    }
}

/// Run `source` as a one-file project.
pub fn run_script(source: &str) -> Outcome {
    let project = Project::new();
    project.file("main.snek", source);
    project.run("main.snek")
}

/// Run `source` with `input` queued for the `input` builtin.
pub fn run_script_with_input(source: &str, input: &str) -> Outcome {
    let project = Project::new();
    project.file("main.snek", source);
    project.run_with(
        "main.snek",
        &RunOptions::default(),
        buffer_handler_with_input(input),
    )
}
