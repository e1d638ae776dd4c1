//! Command handlers for the `snek` CLI.
//!
//! Each handler returns a [`CliError`] rather than exiting, so the binary
//! decides how to report and tests can inspect the failure.

use std::path::{Path, PathBuf};

use snek_vm::{RuntimeConfig, SharedIoHandler, SnekError};
use thiserror::Error;

mod dis;
mod repl;
mod run;

pub use dis::disassemble;
pub use repl::run_repl;
pub use run::run_file;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot find file '{path}'")]
    NotFound { path: String },

    #[error("error reading '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Snek(#[from] SnekError),
}

impl CliError {
    /// Runtime errors are written to the IO handler's error stream (with
    /// their frame list) as they unwind, so the caller should only set the
    /// exit status.
    pub fn is_reported(&self) -> bool {
        matches!(self, CliError::Snek(SnekError::Runtime(_)))
    }
}

/// Options shared by every command that runs code.
#[derive(Clone, Debug)]
pub struct RunOptions {
    /// Directory imports resolve against. Falls back to `SNEK_ROOT`, then
    /// to the script's own directory.
    pub root: Option<PathBuf>,
    pub prelude: bool,
    pub max_call_depth: Option<usize>,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            root: None,
            prelude: true,
            max_call_depth: RuntimeConfig::default().max_call_depth,
        }
    }
}

impl RunOptions {
    pub fn config(&self, script: Option<&Path>, io: SharedIoHandler) -> RuntimeConfig {
        let root = self
            .root
            .clone()
            .or_else(|| std::env::var_os("SNEK_ROOT").map(PathBuf::from))
            .or_else(|| {
                script
                    .and_then(Path::parent)
                    .filter(|dir| !dir.as_os_str().is_empty())
                    .map(Path::to_path_buf)
            })
            .unwrap_or_else(|| PathBuf::from("."));

        RuntimeConfig::default()
            .with_app_root(root)
            .with_prelude(self.prelude)
            .with_max_call_depth(self.max_call_depth)
            .with_io(io)
    }
}

pub(crate) fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => CliError::NotFound {
            path: path.display().to_string(),
        },
        _ => CliError::Read {
            path: path.display().to_string(),
            source: e,
        },
    })
}

/// The name a script runs under: its file name, as it would be spelled in
/// an import from the same directory.
pub(crate) fn module_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
