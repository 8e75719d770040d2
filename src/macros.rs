//! Utility macros for the query lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a default lexer handler for fixed operator tokens

/// Creates a Token instance.
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Key, "tit:rust".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        $crate::lexer::tokens::Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a default lexer handler for single operator tokens.
///
/// The generated handler pushes a token with the given kind and literal
/// value, then advances the lexer past the match.
///
/// # Example
///
/// ```ignore
/// RegexPattern {
///     regex: OPEN_PAREN.clone(),
///     handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "("),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, len: usize| {
            let start = lexer.pos;
            lexer.push($crate::MK_TOKEN!(
                $kind,
                String::from($value),
                $crate::Span {
                    start: $crate::Position(start),
                    end: $crate::Position(start + len),
                }
            ));
            lexer.advance_n(len);
        }
    };
}
