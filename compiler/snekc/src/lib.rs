//! Snek command-line driver.
//!
//! The binary in `main.rs` only parses arguments; everything it runs lives
//! here so integration tests can drive it with a buffer IO handler.

pub mod commands;
mod tracing_setup;

pub use commands::{disassemble, run_file, run_repl, CliError, RunOptions};
pub use tracing_setup::init_tracing;
