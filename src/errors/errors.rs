use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// The offending token text, if the error is tied to one.
    pub fn get_token(&self) -> Option<&str> {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { token }
            | ErrorImpl::UnexpectedToken { token }
            | ErrorImpl::UnexpectedTokenDetailed { token, .. }
            | ErrorImpl::UnclosedParen { token }
            | ErrorImpl::NestingTooDeep { token, .. } => Some(token),
            ErrorImpl::UnresolvedKey { key } => Some(key),
            ErrorImpl::InvalidKeyPattern { .. } => None,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnresolvedKey { .. } => "UnresolvedKey",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::UnclosedParen { .. } => "UnclosedParen",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
            ErrorImpl::InvalidKeyPattern { .. } => "InvalidKeyPattern",
        }
    }

    pub fn get_error_class(&self) -> ErrorClass {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorClass::Lexical,
            ErrorImpl::UnresolvedKey { .. } => ErrorClass::Resolution,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::UnclosedParen { .. }
            | ErrorImpl::NestingTooDeep { .. } => ErrorClass::Syntax,
            ErrorImpl::InvalidKeyPattern { .. } => ErrorClass::Configuration,
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnresolvedKey { key } => ErrorTip::Suggestion(format!(
                "Search key `{}` did not resolve to any predicate, is the key supported?",
                key
            )),
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a search key?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::UnclosedParen { token } => ErrorTip::Suggestion(format!(
                "Expected `)` but found `{}`, is a parenthesis left open?",
                token
            )),
            ErrorImpl::NestingTooDeep { limit, .. } => ErrorTip::Suggestion(format!(
                "Query nests deeper than {} levels, can it be split up?",
                limit
            )),
            ErrorImpl::InvalidKeyPattern { pattern, .. } => {
                ErrorTip::Suggestion(format!("Key pattern `{}` is not a valid regex", pattern))
            }
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at offset {}", self.internal_error, self.position.0)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.internal_error)
    }
}

/// The phase an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Lexical,
    Resolution,
    Syntax,
    Configuration,
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("search key {key:?} resolved to no predicate")]
    UnresolvedKey { key: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message:?}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("unclosed parenthesis, found {token:?}")]
    UnclosedParen { token: String },
    #[error("query nests deeper than {limit} levels at {token:?}")]
    NestingTooDeep { token: String, limit: usize },
    #[error("invalid key pattern {pattern:?}: {message}")]
    InvalidKeyPattern { pattern: String, message: String },
}
