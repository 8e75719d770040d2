//! Lexical analysis for search queries.
//!
//! Converts a query string into a stream of tokens for the parser:
//!
//! - KEY tokens recognised by a caller-supplied regex
//! - `(`, `)`, `!`, `&` and `|` operators
//! - whitespace, which is skipped
//!
//! Every token records its byte span for error reporting.

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
