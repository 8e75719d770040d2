use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN,
};

use super::tokens::{Token, TokenKind};

lazy_static! {
    static ref OPEN_PAREN: Regex = Regex::new(r"^\(").unwrap();
    static ref CLOSE_PAREN: Regex = Regex::new(r"^\)").unwrap();
    static ref NOT: Regex = Regex::new(r"^!").unwrap();
    static ref AND: Regex = Regex::new(r"^&").unwrap();
    static ref OR: Regex = Regex::new(r"^\|").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"^\s+").unwrap();
}

/// Called with the byte length of the match at the lexer's current offset.
pub type RegexHandler = fn(&mut Lexer, usize);

/// Where a pattern is matched from.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MatchScope {
    /// The pattern carries its own `^` and sees only the unread input.
    Remainder,
    /// The pattern is used as the caller built it and sees the whole
    /// query, so its flags and look-around assertions keep their context.
    Source,
}

#[derive(Clone)]
pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
    scope: MatchScope,
}

pub struct Lexer {
    patterns: Vec<RegexPattern>,
    tokens: Vec<Token>,
    source: String,
    pos: usize,
}

impl Lexer {
    /// Builds a lexer whose KEY tokens are recognised by `key_pattern`.
    ///
    /// The KEY pattern is tried before any operator, so a pattern that
    /// swallows operator characters takes priority over them.
    pub fn new(source: &str, key_pattern: &Regex) -> Lexer {
        use MatchScope::{Remainder, Source};

        Lexer {
            pos: 0,
            tokens: vec![],
            patterns: vec![
                RegexPattern { regex: key_pattern.clone(), handler: key_handler, scope: Source },
                RegexPattern { regex: OPEN_PAREN.clone(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "("), scope: Remainder },
                RegexPattern { regex: CLOSE_PAREN.clone(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")"), scope: Remainder },
                RegexPattern { regex: NOT.clone(), handler: MK_DEFAULT_HANDLER!(TokenKind::Not, "!"), scope: Remainder },
                RegexPattern { regex: AND.clone(), handler: MK_DEFAULT_HANDLER!(TokenKind::And, "&"), scope: Remainder },
                RegexPattern { regex: OR.clone(), handler: MK_DEFAULT_HANDLER!(TokenKind::Or, "|"), scope: Remainder },
                RegexPattern { regex: WHITESPACE.clone(), handler: skip_handler, scope: Remainder },
            ],
            source: source.to_string(),
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        trace!(kind = %token.kind, value = %token.value, start = token.span.start.0, "token");
        self.tokens.push(token);
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Length of the first non-empty pattern match at the current offset.
    fn match_here(&self) -> Option<(RegexHandler, usize)> {
        self.patterns.iter().find_map(|pattern| {
            let len = match pattern.scope {
                MatchScope::Remainder => pattern
                    .regex
                    .find(self.remainder())
                    .filter(|m| m.start() == 0)
                    .map(|m| m.end()),
                MatchScope::Source => pattern
                    .regex
                    .find_at(&self.source, self.pos)
                    .filter(|m| m.start() == self.pos)
                    .map(|m| m.end() - self.pos),
            };

            len.filter(|len| *len > 0).map(|len| (pattern.handler, len))
        })
    }
}

fn skip_handler(lexer: &mut Lexer, len: usize) {
    lexer.advance_n(len);
}

fn key_handler(lexer: &mut Lexer, len: usize) {
    let start = lexer.pos;
    let value = lexer.source[start..start + len].to_string();

    lexer.push(MK_TOKEN!(TokenKind::Key, value, Span { start: Position(start), end: Position(start + len) }));
    lexer.advance_n(len);
}

/// Splits `source` into tokens, always terminated by an `EOF` token.
pub fn tokenize(source: &str, key_pattern: &Regex) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, key_pattern);

    while !lex.at_eof() {
        match lex.match_here() {
            Some((handler, len)) => handler(&mut lex, len),
            None => {
                let token = lex.at().map(String::from).unwrap_or_default();
                return Err(Error::new(ErrorImpl::UnrecognisedToken { token }, Position(lex.pos)));
            }
        }
    }

    lex.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), Span { start: Position(lex.pos), end: Position(lex.pos) }));
    debug!(tokens = lex.tokens.len(), "tokenized query");
    Ok(lex.tokens)
}
