/*!
# Rust Language Module

This Rust module provides lexical analysis and parsing of the BASIC language.

*/

#[macro_use]
mod error;
mod lex;
mod line;
mod parse;

pub mod ast;
pub mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::lex;
pub use line::Line;
pub use parse::parse;

/// Line numbers are unsigned. Direct commands have none.
pub type LineNumber = u64;

/// Longest line the terminal accepts. Files and the library take any length.
pub const MAX_LINE_LEN: usize = 255;
