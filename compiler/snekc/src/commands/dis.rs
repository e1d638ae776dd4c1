//! The `dis` command: print the compiled instruction listing of a file.

use std::path::Path;

use snek_vm::SnekError;

use super::{read_file, CliError};

pub fn disassemble(path: &Path) -> Result<String, CliError> {
    let source = read_file(path)?;
    let program = snek_parse::parse(&source).map_err(SnekError::from)?;
    let code = snek_compile::compile(&program).map_err(SnekError::from)?;
    Ok(code.to_string())
}
