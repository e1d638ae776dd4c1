//! The `run` command: parse, compile and execute a script file.

use std::path::Path;

use snek_vm::{run_source, Runtime, SharedIoHandler, Value};

use super::{module_name, read_file, CliError, RunOptions};

/// Run the script at `path`, writing through `io`.
///
/// Returns the value of the script's trailing call, if it has one.
pub fn run_file(
    path: &Path,
    options: &RunOptions,
    io: SharedIoHandler,
) -> Result<Option<Value>, CliError> {
    let source = read_file(path)?;
    let runtime = Runtime::new(options.config(Some(path), io));
    let name = module_name(path);
    tracing::debug!(module = %name, root = %runtime.config().app_root.display(), "running script");
    Ok(run_source(&runtime, &name, &source)?)
}
