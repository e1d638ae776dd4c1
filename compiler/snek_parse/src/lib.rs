//! Snek front end: scanner and parser.
//!
//! Turns source text into a [`snek_ir::Program`]. The scanner is a `logos`
//! token enum; the parser is hand-written recursive descent over the token
//! vector with no error recovery: the first error aborts the parse.

mod cursor;
mod error;
mod lexer;
mod parser;

pub use error::ParseError;
pub use lexer::{tokenize, SpannedToken, Token};
pub use parser::parse;
