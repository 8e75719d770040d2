use crate::{
    ast::expressions::SearchExpression,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    resolver::PredicateResolver,
};

use super::parser::Parser;

/// A parsed subtree together with its depth.
pub type Parsed<P> = (SearchExpression<P>, usize);

/// `orChain := andChain ( '|' andChain )*`
pub fn parse_or_chain<R>(parser: &mut Parser<R>) -> Result<Parsed<R::Predicate>, Error>
where
    R: PredicateResolver + ?Sized,
{
    let (mut left, mut depth) = parse_and_chain(parser)?;

    while parser.current_token_kind() == TokenKind::Or {
        let operator = parser.advance().clone();
        let (right, right_depth) = parse_and_chain(parser)?;
        depth = parser.check_depth(1 + depth.max(right_depth), &operator)?;
        left = SearchExpression::or(left, right);
    }

    Ok((left, depth))
}

/// `andChain := term ( '&' term )*`
pub fn parse_and_chain<R>(parser: &mut Parser<R>) -> Result<Parsed<R::Predicate>, Error>
where
    R: PredicateResolver + ?Sized,
{
    let (mut left, mut depth) = parse_term(parser)?;

    while parser.current_token_kind() == TokenKind::And {
        let operator = parser.advance().clone();
        let (right, right_depth) = parse_term(parser)?;
        depth = parser.check_depth(1 + depth.max(right_depth), &operator)?;
        left = SearchExpression::and(left, right);
    }

    Ok((left, depth))
}

/// `term := KEY | '!' term | '(' orChain ')'`
pub fn parse_term<R>(parser: &mut Parser<R>) -> Result<Parsed<R::Predicate>, Error>
where
    R: PredicateResolver + ?Sized,
{
    match parser.current_token_kind() {
        TokenKind::Key => {
            let token = parser.advance().clone();
            Ok((parser.resolve_key(&token)?, 1))
        }
        TokenKind::Not => {
            parser.enter()?;
            let operator = parser.advance().clone();
            let (body, body_depth) = parse_term(parser)?;
            parser.leave();

            let depth = parser.check_depth(1 + body_depth, &operator)?;
            Ok((SearchExpression::not(body), depth))
        }
        TokenKind::OpenParen => {
            parser.enter()?;
            let grouped = parse_grouping(parser)?;
            parser.leave();
            Ok(grouped)
        }
        _ => {
            let token = parser.current_token();
            let message = if token.kind == TokenKind::EOF {
                "query ended where a search key was expected"
            } else if token.is_one_of_many(&[TokenKind::And, TokenKind::Or]) {
                "operator is missing a search key on its left"
            } else {
                "expected a search key, `!` or `(`"
            };

            Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: token.value.clone(),
                    message: String::from(message),
                },
                token.position(),
            ))
        }
    }
}

fn parse_grouping<R>(parser: &mut Parser<R>) -> Result<Parsed<R::Predicate>, Error>
where
    R: PredicateResolver + ?Sized,
{
    parser.expect(TokenKind::OpenParen)?;
    let parsed = parse_or_chain(parser)?;

    let unclosed = Error::new(
        ErrorImpl::UnclosedParen {
            token: parser.current_token().value.clone(),
        },
        parser.get_position(),
    );
    parser.expect_error(TokenKind::CloseParen, Some(unclosed))?;

    Ok(parsed)
}
