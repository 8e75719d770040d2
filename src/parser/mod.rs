//! Parser module for building search expressions.
//!
//! This module contains the recursive descent parser that turns a token
//! stream into a [`SearchExpression`](crate::ast::expressions::SearchExpression).
//! Precedence is layered over three mutually recursive functions, lowest
//! first:
//!
//! ```text
//! orChain  := andChain ( '|' andChain )*
//! andChain := term ( '&' term )*
//! term     := KEY | '!' term | '(' orChain ')'
//! ```
//!
//! Both binary operators are left associative. KEY tokens are resolved
//! to predicates as they are reduced.

pub mod expr;
pub mod parser;

#[cfg(test)]
mod tests;
