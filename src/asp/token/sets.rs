//! Token sets used by consumers of the stream.
//!
//!     The lexer does not suppress anything: whitespace, newlines and comments are real tokens
//!     so that highlighting and formatting can see them. A parser declares which kinds it
//!     treats as whitespace and comments and filters them out before building a tree. Block
//!     markers are never filtered, they behave like braces.

use super::core::{Token, TokenKind};

/// A small, fixed set of token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(&'static [TokenKind]);

impl TokenSet {
    pub const fn new(kinds: &'static [TokenKind]) -> Self {
        TokenSet(kinds)
    }

    pub fn contains(&self, kind: TokenKind) -> bool {
        self.0.contains(&kind)
    }
}

pub const WHITESPACE_TOKENS: TokenSet = TokenSet::new(&[TokenKind::Whitespace, TokenKind::Newline]);

pub const COMMENT_TOKENS: TokenSet = TokenSet::new(&[TokenKind::Comment]);

/// Drop whitespace and comment tokens, keeping everything a parser folds into a tree.
pub fn significant<I>(tokens: I) -> impl Iterator<Item = Token>
where
    I: IntoIterator<Item = Token>,
{
    tokens.into_iter().filter(|token| {
        !WHITESPACE_TOKENS.contains(token.kind) && !COMMENT_TOKENS.contains(token.kind)
    })
}
