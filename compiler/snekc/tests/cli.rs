// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end tests through the `snek` command handlers.
//!
//! Every test writes its script to a temporary directory and runs it with a
//! buffer IO handler, so output, errors and `input` are all deterministic.
//!
//! - `scenarios` - whole programs and their exact output
//! - `modules` - imports, visibility and the module cache
//! - `repl` - line-at-a-time sessions
//! - `dis` - disassembly listings

#[path = "cli/common.rs"]
mod common;

#[path = "cli/scenarios.rs"]
mod scenarios;

#[path = "cli/modules.rs"]
mod modules;

#[path = "cli/repl.rs"]
mod repl;

#[path = "cli/dis.rs"]
mod dis;
