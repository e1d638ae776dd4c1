//! Output, error and input streams for running programs.
//!
//! Every interpreter writes through a [`SharedIoHandler`]:
//! - `Stdio`: the process streams (CLI and REPL)
//! - `Buffer`: captured text and a scripted input queue (tests)
//! - `Silent`: discards output, reads EOF
//!
//! Enum dispatch rather than a trait object; `println` is on the hot path
//! of most programs.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// Writes to the process's stdout/stderr and reads stdin.
#[derive(Default)]
pub struct StdioHandler;

impl StdioHandler {
    pub fn out(&self, line: &str) {
        let mut stdout = io::stdout().lock();
        // A closed stdout is not the program's error.
        let _ = writeln!(stdout, "{line}");
        let _ = stdout.flush();
    }

    pub fn err(&self, line: &str) {
        eprintln!("{line}");
    }

    /// One line without its terminator; `None` at EOF or on a read error.
    pub fn input(&self) -> Option<String> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                let trimmed = line.trim_end_matches(['\n', '\r']).len();
                line.truncate(trimmed);
                Some(line)
            }
        }
    }
}

/// Captures output and error text; serves input from a queue of lines.
#[derive(Default)]
pub struct BufferHandler {
    output: Mutex<String>,
    errors: Mutex<String>,
    input: Mutex<VecDeque<String>>,
}

impl BufferHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `input` split into lines.
    pub fn with_input(input: &str) -> Self {
        BufferHandler {
            input: Mutex::new(input.lines().map(str::to_string).collect()),
            ..Self::default()
        }
    }

    pub fn out(&self, line: &str) {
        let mut buf = self.output.lock();
        buf.push_str(line);
        buf.push('\n');
    }

    pub fn err(&self, line: &str) {
        let mut buf = self.errors.lock();
        buf.push_str(line);
        buf.push('\n');
    }

    pub fn input(&self) -> Option<String> {
        self.input.lock().pop_front()
    }

    pub fn output(&self) -> String {
        self.output.lock().clone()
    }

    pub fn errors(&self) -> String {
        self.errors.lock().clone()
    }
}

pub enum IoHandler {
    Stdio(StdioHandler),
    Buffer(BufferHandler),
    Silent,
}

impl IoHandler {
    /// Write one line to the output stream.
    pub fn out(&self, line: &str) {
        match self {
            Self::Stdio(h) => h.out(line),
            Self::Buffer(h) => h.out(line),
            Self::Silent => {}
        }
    }

    /// Write one line to the error stream.
    pub fn err(&self, line: &str) {
        match self {
            Self::Stdio(h) => h.err(line),
            Self::Buffer(h) => h.err(line),
            Self::Silent => {}
        }
    }

    pub fn input(&self) -> Option<String> {
        match self {
            Self::Stdio(h) => h.input(),
            Self::Buffer(h) => h.input(),
            Self::Silent => None,
        }
    }

    /// Captured output; empty for handlers that don't capture.
    pub fn output(&self) -> String {
        match self {
            Self::Buffer(h) => h.output(),
            Self::Stdio(_) | Self::Silent => String::new(),
        }
    }

    /// Captured error text; empty for handlers that don't capture.
    pub fn errors(&self) -> String {
        match self {
            Self::Buffer(h) => h.errors(),
            Self::Stdio(_) | Self::Silent => String::new(),
        }
    }
}

pub type SharedIoHandler = Arc<IoHandler>;

pub fn stdio_handler() -> SharedIoHandler {
    Arc::new(IoHandler::Stdio(StdioHandler))
}

pub fn buffer_handler() -> SharedIoHandler {
    Arc::new(IoHandler::Buffer(BufferHandler::new()))
}

pub fn buffer_handler_with_input(input: &str) -> SharedIoHandler {
    Arc::new(IoHandler::Buffer(BufferHandler::with_input(input)))
}

pub fn silent_handler() -> SharedIoHandler {
    Arc::new(IoHandler::Silent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_captures_lines() {
        let io = buffer_handler();
        io.out("hello");
        io.out("world");
        io.err("oops");
        assert_eq!(io.output(), "hello\nworld\n");
        assert_eq!(io.errors(), "oops\n");
    }

    #[test]
    fn buffer_input_reads_lines_then_eof() {
        let io = buffer_handler_with_input("42\nabc");
        assert_eq!(io.input().as_deref(), Some("42"));
        assert_eq!(io.input().as_deref(), Some("abc"));
        assert_eq!(io.input(), None);
    }

    #[test]
    fn silent_discards() {
        let io = silent_handler();
        io.out("ignored");
        assert_eq!(io.output(), "");
        assert_eq!(io.input(), None);
    }
}
