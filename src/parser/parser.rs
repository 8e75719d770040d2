//! Parser state and the parsing entry point.
//!
//! The parser is a cursor over the token vector plus a borrowed predicate
//! resolver. It never recovers from an error: the first failure aborts the
//! parse and no partial tree is returned.

use tracing::{debug, trace, warn};

use crate::{
    ast::expressions::SearchExpression,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    resolver::PredicateResolver,
    Position, Span, MK_TOKEN,
};

use super::expr::parse_or_chain;

/// Deepest expression tree a parse may build unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// The main parser structure that maintains parsing state.
pub struct Parser<'r, R: PredicateResolver + ?Sized> {
    /// The list of tokens to parse, always ending in `EOF`
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// Turns KEY text into predicates
    resolver: &'r R,
    /// Deepest tree, and deepest `!`/`(` nesting, accepted
    max_depth: usize,
    /// Open `!` and `(` terms on the recursion stack
    nesting: usize,
}

impl<'r, R: PredicateResolver + ?Sized> Parser<'r, R> {
    pub fn new(mut tokens: Vec<Token>, resolver: &'r R) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let end = tokens.last().map(|token| token.span.end).unwrap_or(Position::null());
            tokens.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), Span { start: end, end }));
        }

        Parser {
            tokens,
            pos: 0,
            resolver,
            max_depth: DEFAULT_MAX_DEPTH,
            nesting: 0,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Records one more open `!` or `(` term before recursing into it.
    pub fn enter(&mut self) -> Result<(), Error> {
        self.nesting += 1;
        if self.nesting > self.max_depth {
            return Err(self.too_deep(self.current_token()));
        }
        Ok(())
    }

    pub fn leave(&mut self) {
        self.nesting = self.nesting.saturating_sub(1);
    }

    /// Fails when a subtree built at `token` is deeper than allowed.
    pub fn check_depth(&self, depth: usize, token: &Token) -> Result<usize, Error> {
        if depth > self.max_depth {
            return Err(self.too_deep(token));
        }
        Ok(depth)
    }

    fn too_deep(&self, token: &Token) -> Error {
        Error::new(
            ErrorImpl::NestingTooDeep {
                token: token.value.clone(),
                limit: self.max_depth,
            },
            token.position(),
        )
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Advances to the next token and returns the previous one.
    ///
    /// The cursor never moves past the trailing `EOF`.
    pub fn advance(&mut self) -> &Token {
        let current = self.pos;
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        &self.tokens[current]
    }

    /// Expects a token of the specified kind, with optional custom error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        let token = self.current_token();
        if token.kind != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: token.value.clone(),
                    },
                    token.position(),
                )),
            }
        } else {
            Ok(self.advance().clone())
        }
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Returns true while the current token is not `EOF`.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Byte offset of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().position()
    }

    /// Builds a `Variable` from the first predicate `token` resolves to.
    ///
    /// Any further predicates for the same text are dropped.
    pub fn resolve_key(&self, token: &Token) -> Result<SearchExpression<R::Predicate>, Error> {
        let predicates = self.resolver.resolve(&token.value);
        trace!(key = %token.value, predicates = predicates.len(), "resolved search key");

        if predicates.len() > 1 {
            warn!(
                key = %token.value,
                discarded = predicates.len() - 1,
                "search key resolved to several predicates, keeping the first"
            );
        }

        predicates
            .into_iter()
            .next()
            .map(SearchExpression::Variable)
            .ok_or_else(|| {
                Error::new(
                    ErrorImpl::UnresolvedKey {
                        key: token.value.clone(),
                    },
                    token.position(),
                )
            })
    }
}

/// Parses a token stream into a search expression.
///
/// The whole stream must form a single `orChain`; anything left over is a
/// syntax error naming the first trailing token. Trees deeper than
/// [`DEFAULT_MAX_DEPTH`] are rejected.
pub fn parse<R>(tokens: Vec<Token>, resolver: &R) -> Result<SearchExpression<R::Predicate>, Error>
where
    R: PredicateResolver + ?Sized,
{
    parse_with_max_depth(tokens, resolver, DEFAULT_MAX_DEPTH)
}

/// Like [`parse`], failing with `NestingTooDeep` once the tree or the
/// `!`/`(` nesting would exceed `max_depth`.
pub fn parse_with_max_depth<R>(
    tokens: Vec<Token>,
    resolver: &R,
    max_depth: usize,
) -> Result<SearchExpression<R::Predicate>, Error>
where
    R: PredicateResolver + ?Sized,
{
    let mut parser = Parser::new(tokens, resolver).with_max_depth(max_depth);
    let (expr, depth) = parse_or_chain(&mut parser)?;

    if parser.has_tokens() {
        let token = parser.current_token();
        let message = if token.kind == TokenKind::CloseParen {
            "no matching `(`"
        } else {
            "expected `&`, `|` or end of query"
        };

        return Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: token.value.clone(),
                message: String::from(message),
            },
            token.position(),
        ));
    }

    debug!(depth, "parsed search expression");
    Ok(expr)
}
