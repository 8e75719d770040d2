//! Unit tests for the lexer module.
//!
//! Covers KEY recognition through the caller pattern, the fixed operator
//! set, whitespace handling, spans and lexical errors.

use regex::{Regex, RegexBuilder};

use super::{lexer::tokenize, tokens::TokenKind};
use crate::errors::errors::ErrorClass;

fn key_pattern() -> Regex {
    Regex::new(r"[a-z]+:[a-z0-9]+").unwrap()
}

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source, &key_pattern())
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("( ) ! & |"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::Not,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_keys() {
    let tokens = tokenize("tit:rust & com:zbw2", &key_pattern()).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Key);
    assert_eq!(tokens[0].value, "tit:rust");
    assert_eq!(tokens[1].kind, TokenKind::And);
    assert_eq!(tokens[2].kind, TokenKind::Key);
    assert_eq!(tokens[2].value, "com:zbw2");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_without_whitespace() {
    assert_eq!(
        kinds("(tit:a|com:b)&!zdb:c"),
        vec![
            TokenKind::OpenParen,
            TokenKind::Key,
            TokenKind::Or,
            TokenKind::Key,
            TokenKind::CloseParen,
            TokenKind::And,
            TokenKind::Not,
            TokenKind::Key,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_whitespace_is_never_emitted() {
    assert_eq!(kinds("  \t\n "), vec![TokenKind::EOF]);
    assert_eq!(kinds(""), vec![TokenKind::EOF]);
}

#[test]
fn test_token_spans() {
    let tokens = tokenize("  tit:a  & com:b", &key_pattern()).unwrap();

    assert_eq!(tokens[0].span.start.0, 2);
    assert_eq!(tokens[0].span.end.0, 7);
    assert_eq!(tokens[1].position().0, 9);
    assert_eq!(tokens[2].position().0, 11);
    assert_eq!(tokens[3].kind, TokenKind::EOF);
    assert_eq!(tokens[3].position().0, 16);
}

#[test]
fn test_span_offsets_are_bytes() {
    let pattern = Regex::new(r"\w+:\w+").unwrap();
    let tokens = tokenize("tit:ä", &pattern).unwrap();

    assert_eq!(tokens[0].value, "tit:ä");
    assert_eq!(tokens[1].kind, TokenKind::EOF);
    assert_eq!(tokens[1].position().0, 6);
}

#[test]
fn test_unrecognised_token() {
    let error = tokenize("tit:a & #", &key_pattern()).unwrap_err();

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(error.get_error_class(), ErrorClass::Lexical);
    assert_eq!(error.get_token(), Some("#"));
    assert_eq!(error.get_position().0, 8);
}

#[test]
fn test_text_outside_key_pattern_is_lexical_error() {
    let error = tokenize("xyz", &key_pattern()).unwrap_err();

    assert_eq!(error.get_error_class(), ErrorClass::Lexical);
    assert_eq!(error.get_token(), Some("x"));
    assert_eq!(error.get_position().0, 0);
}

#[test]
fn test_key_pattern_takes_priority() {
    let pattern = Regex::new(r"[a-z!]+").unwrap();
    let tokens = tokenize("!abc", &pattern).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Key);
    assert_eq!(tokens[0].value, "!abc");
}

#[test]
fn test_empty_key_match_is_ignored() {
    let pattern = Regex::new(r"\w*").unwrap();

    assert_eq!(
        kinds_with("(abc)", &pattern),
        vec![
            TokenKind::OpenParen,
            TokenKind::Key,
            TokenKind::CloseParen,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_key_pattern_is_anchored() {
    // an unanchored search would find "b:c" further on
    let error = tokenize("# b:c", &key_pattern()).unwrap_err();

    assert_eq!(error.get_position().0, 0);
}

fn kinds_with(source: &str, pattern: &Regex) -> Vec<TokenKind> {
    tokenize(source, pattern)
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_key_pattern_keeps_builder_options() {
    let pattern = RegexBuilder::new("tit:[a-z]+")
        .case_insensitive(true)
        .build()
        .unwrap();
    let tokens = tokenize("TIT:RUST | tit:Go", &pattern).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Key);
    assert_eq!(tokens[0].value, "TIT:RUST");
    assert_eq!(tokens[2].value, "tit:Go");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_key_pattern_sees_whole_query() {
    // `^` still means the start of the query, not the start of each token
    let pattern = Regex::new(r"^[a-z]+:[a-z]+").unwrap();

    assert_eq!(kinds_with("tit:a", &pattern), vec![TokenKind::Key, TokenKind::EOF]);

    let error = tokenize("tit:a & tit:b", &pattern).unwrap_err();
    assert_eq!(error.get_position().0, 8);
}
