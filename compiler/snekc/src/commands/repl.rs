//! The `repl` command.

use std::io::Write;

use snek_vm::{ReplSession, Runtime, RuntimeConfig, SnekError};

use super::CliError;

/// Read lines from the runtime's input stream until EOF or a blank line,
/// evaluating each against one persistent session.
///
/// `prompt` receives the `>>> ` prompt before each read. Values other than
/// `Unit` are printed to the output stream; parse and compile errors go to
/// the error stream and the session carries on.
pub fn run_repl(config: RuntimeConfig, mut prompt: impl Write) -> Result<(), CliError> {
    let runtime = Runtime::new(config);
    let io = runtime.io().clone();
    let mut session = ReplSession::new(runtime)?;

    loop {
        write!(prompt, ">>> ")?;
        prompt.flush()?;

        let Some(line) = io.input().filter(|line| !line.trim().is_empty()) else {
            break;
        };

        match session.eval_line(&line) {
            Ok(Some(value)) => io.out(&value.to_string()),
            Ok(None) | Err(SnekError::Runtime(_)) => {}
            Err(err) => io.err(&format!("error: {err}")),
        }
    }
    Ok(())
}
