use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    ast::expressions::SearchExpression,
    errors::errors::{Error, ErrorImpl},
    lexer::lexer::tokenize,
    parser::parser::{parse_with_max_depth, DEFAULT_MAX_DEPTH},
    resolver::PredicateResolver,
    Position,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryConfig {
    /// Regex recognising KEY tokens.
    pub key_pattern: String,
    /// Deepest expression tree a query may produce.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl QueryConfig {
    pub fn new(key_pattern: impl Into<String>) -> Self {
        QueryConfig {
            key_pattern: key_pattern.into(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Compiles the key pattern and pairs it with `resolver`.
    pub fn compile<R: PredicateResolver>(&self, resolver: R) -> Result<QueryParser<R>, Error> {
        let key_pattern = Regex::new(&self.key_pattern).map_err(|e| {
            Error::new(
                ErrorImpl::InvalidKeyPattern {
                    pattern: self.key_pattern.clone(),
                    message: e.to_string(),
                },
                Position::null(),
            )
        })?;

        Ok(QueryParser::new(key_pattern, resolver).with_max_depth(self.max_depth))
    }
}

/// A compiled KEY pattern and the resolver its keys are handed to.
///
/// Holds no per-parse state, so one instance can serve any number of
/// threads when the resolver allows it.
#[derive(Debug, Clone)]
pub struct QueryParser<R> {
    key_pattern: Regex,
    resolver: R,
    max_depth: usize,
}

impl<R: PredicateResolver> QueryParser<R> {
    pub fn new(key_pattern: Regex, resolver: R) -> Self {
        QueryParser {
            key_pattern,
            resolver,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn key_pattern(&self) -> &Regex {
        &self.key_pattern
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn parse(&self, query: &str) -> Result<SearchExpression<R::Predicate>, Error> {
        let tokens = tokenize(query, &self.key_pattern)?;
        parse_with_max_depth(tokens, &self.resolver, self.max_depth)
    }
}
