#![allow(clippy::module_inception)]

use regex::Regex;

use crate::{
    ast::expressions::SearchExpression,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
    resolver::PredicateResolver,
};

pub mod ast;
pub mod config;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod resolver;
pub mod results;

extern crate regex;

/// Byte offset into the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(pub usize);

impl Position {
    pub fn null() -> Self {
        Position(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Tokenizes and parses `query` in one step.
///
/// `key_pattern` decides which character runs form KEY tokens; the text of
/// every KEY token is handed to `resolver` exactly once, in source order.
pub fn parse_query<R>(
    query: &str,
    key_pattern: &Regex,
    resolver: &R,
) -> Result<SearchExpression<R::Predicate>, Error>
where
    R: PredicateResolver + ?Sized,
{
    let tokens = tokenize(query, key_pattern)?;
    parse(tokens, resolver)
}

/// Returns the 1-based line number, the line text and the offset within
/// that line for a byte offset into `source`.
pub fn get_line_at_position(source: &str, position: usize) -> Option<(usize, String, usize)> {
    let mut start = 0;
    let mut line_number = 1;

    for line in source.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&position) {
            let line_pos = position - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    // errors at end of input point just past the last character
    if position == source.len() {
        let line = source.rsplit('\n').next().unwrap_or("");
        let line_number = source.matches('\n').count() + 1;
        return Some((line_number, line.to_string(), line.len()));
    }

    None
}


/// Renders an error against the query it was produced from.
///
/// ```text
/// Error: UnexpectedToken (Unexpected token: `)`, ...)
///   |
/// 1 | tit:a & )
///   | --------^
/// ```
pub fn render_error(error: &Error, query: &str) -> String {
    let position = error.get_position();

    let mut out = String::new();
    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }

    let Some((line, line_text, line_pos)) = get_line_at_position(query, position.0) else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    // the caret column counts characters, `line_pos` counts bytes
    let column = line_text
        .get(..line_pos)
        .map(|prefix| prefix.chars().count())
        .unwrap_or(line_pos);
    let arrows = column.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
