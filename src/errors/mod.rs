//! Error types and error handling for query parsing.
//!
//! This module defines the error types produced while turning a query
//! string into a search expression. It includes:
//!
//! - Error structures with query offset information
//! - Specific error variants for the lexing, resolution and parsing phases
//! - Error classification and helpful suggestions

pub mod errors;
