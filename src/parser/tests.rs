//! Unit tests for the parser module.
//!
//! This module contains tests for:
//! - Operator precedence and associativity
//! - Negation and grouping
//! - Predicate resolution
//! - Syntax and resolution errors

use std::cell::RefCell;

use regex::Regex;

use super::parser::{parse, parse_with_max_depth, DEFAULT_MAX_DEPTH};
use crate::{
    ast::expressions::SearchExpression,
    errors::errors::{Error, ErrorClass},
    lexer::lexer::tokenize,
};

type Expr = SearchExpression<String>;

fn identity(text: &str) -> Vec<String> {
    vec![text.to_string()]
}

fn parse_source(source: &str) -> Result<Expr, Error> {
    let pattern = Regex::new("[a-z]+").unwrap();
    let tokens = tokenize(source, &pattern)?;
    parse(tokens, &identity)
}

fn var(name: &str) -> Expr {
    SearchExpression::variable(name.to_string())
}

#[test]
fn test_parse_single_key() {
    assert_eq!(parse_source("a").unwrap(), var("a"));
}

#[test]
fn test_and_binds_tighter_than_or() {
    assert_eq!(
        parse_source("a&b|c").unwrap(),
        Expr::or(Expr::and(var("a"), var("b")), var("c"))
    );
    assert_eq!(
        parse_source("a|b&c").unwrap(),
        Expr::or(var("a"), Expr::and(var("b"), var("c")))
    );
}

#[test]
fn test_operators_are_left_associative() {
    assert_eq!(
        parse_source("a & b & c").unwrap(),
        Expr::and(Expr::and(var("a"), var("b")), var("c"))
    );
    assert_eq!(
        parse_source("a | b | c").unwrap(),
        Expr::or(Expr::or(var("a"), var("b")), var("c"))
    );
}

#[test]
fn test_not_binds_to_single_term() {
    assert_eq!(
        parse_source("!a&b").unwrap(),
        Expr::and(Expr::not(var("a")), var("b"))
    );
    assert_eq!(parse_source("!!a").unwrap(), Expr::not(Expr::not(var("a"))));
    assert_eq!(
        parse_source("!(a|b)").unwrap(),
        Expr::not(Expr::or(var("a"), var("b")))
    );
}

#[test]
fn test_parentheses_reenter_or_chain() {
    assert_eq!(
        parse_source("(a|b)&c").unwrap(),
        Expr::and(Expr::or(var("a"), var("b")), var("c"))
    );
    assert_eq!(parse_source("((a))").unwrap(), var("a"));
}

#[test]
fn test_unclosed_paren() {
    let error = parse_source("(a&b").unwrap_err();

    assert_eq!(error.get_error_name(), "UnclosedParen");
    assert_eq!(error.get_error_class(), ErrorClass::Syntax);
    assert_eq!(error.get_token(), Some("EOF"));
    assert_eq!(error.get_position().0, 4);
}

#[test]
fn test_unmatched_close_paren() {
    let error = parse_source("a)").unwrap_err();

    assert_eq!(error.get_error_class(), ErrorClass::Syntax);
    assert_eq!(error.get_token(), Some(")"));
    assert_eq!(error.get_position().0, 1);
}

#[test]
fn test_trailing_tokens() {
    let error = parse_source("a b").unwrap_err();

    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
    assert_eq!(error.get_token(), Some("b"));
}

#[test]
fn test_missing_term() {
    for (source, token) in [("", "EOF"), ("a&", "EOF"), ("&a", "&"), ("a|)", ")"), ("!", "EOF")] {
        let error = parse_source(source).unwrap_err();
        assert_eq!(error.get_error_class(), ErrorClass::Syntax, "{}", source);
        assert_eq!(error.get_token(), Some(token), "{}", source);
    }
}

#[test]
fn test_text_outside_key_pattern_fails() {
    let error = parse_source("XYZ").unwrap_err();

    assert_eq!(error.get_error_class(), ErrorClass::Lexical);
}

#[test]
fn test_unresolved_key() {
    let pattern = Regex::new("[a-z]+").unwrap();
    let tokens = tokenize("b & a", &pattern).unwrap();
    let resolve = |text: &str| -> Vec<String> {
        if text == "a" {
            vec![]
        } else {
            vec![text.to_string()]
        }
    };

    let error = parse(tokens, &resolve).unwrap_err();

    assert_eq!(error.get_error_name(), "UnresolvedKey");
    assert_eq!(error.get_error_class(), ErrorClass::Resolution);
    assert_eq!(error.get_token(), Some("a"));
    assert_eq!(error.get_position().0, 4);
}

#[test]
fn test_only_first_predicate_is_kept() {
    let pattern = Regex::new("[a-z]+").unwrap();
    let tokens = tokenize("a", &pattern).unwrap();
    let resolve = |text: &str| vec![format!("{}1", text), format!("{}2", text)];

    assert_eq!(parse(tokens, &resolve).unwrap(), var("a1"));
}

#[test]
fn test_resolver_called_once_per_key_in_order() {
    let pattern = Regex::new("[a-z]+").unwrap();
    let tokens = tokenize("(a | b) & !c", &pattern).unwrap();
    let calls = RefCell::new(vec![]);
    let resolve = |text: &str| {
        calls.borrow_mut().push(text.to_string());
        vec![text.to_string()]
    };

    parse(tokens, &resolve).unwrap();

    assert_eq!(calls.into_inner(), vec!["a", "b", "c"]);
}

#[test]
fn test_parse_without_eof_token() {
    let pattern = Regex::new("[a-z]+").unwrap();
    let mut tokens = tokenize("a & b", &pattern).unwrap();
    tokens.pop();

    assert_eq!(
        parse(tokens, &identity).unwrap(),
        Expr::and(var("a"), var("b"))
    );
}

#[test]
fn test_deep_negation_is_rejected() {
    let source = format!("{}a", "!".repeat(200_000));
    let error = parse_source(&source).unwrap_err();

    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert_eq!(error.get_error_class(), ErrorClass::Syntax);
    assert_eq!(error.get_position().0, DEFAULT_MAX_DEPTH);
}

#[test]
fn test_deep_grouping_is_rejected() {
    let source = format!("{}a{}", "(".repeat(200_000), ")".repeat(200_000));
    let error = parse_source(&source).unwrap_err();

    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert_eq!(error.get_position().0, DEFAULT_MAX_DEPTH);
}

#[test]
fn test_long_chain_depth_limit() {
    let keys = |n: usize| vec!["a"; n].join(" | ");

    let expr = parse_source(&keys(DEFAULT_MAX_DEPTH)).unwrap();
    assert_eq!(expr.depth(), DEFAULT_MAX_DEPTH);

    let error = parse_source(&keys(DEFAULT_MAX_DEPTH + 1)).unwrap_err();
    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert_eq!(error.get_token(), Some("|"));
}

#[test]
fn test_custom_max_depth() {
    let pattern = Regex::new("[a-z]+").unwrap();
    let parse_limited = |source: &str| parse_with_max_depth(tokenize(source, &pattern)?, &identity, 2);

    assert_eq!(parse_limited("!a").unwrap(), SearchExpression::not(var("a")));
    assert_eq!(parse_limited("((a & b))").unwrap(), SearchExpression::and(var("a"), var("b")));
    assert_eq!(parse_limited("!!a").unwrap_err().get_error_name(), "NestingTooDeep");
    assert_eq!(parse_limited("a & b & c").unwrap_err().get_error_name(), "NestingTooDeep");
    assert_eq!(parse_limited("(((a)))").unwrap_err().get_error_name(), "NestingTooDeep");
}
