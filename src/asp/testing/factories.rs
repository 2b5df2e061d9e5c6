//! Terse constructors for expected tokens.

use crate::asp::token::{Token, TokenKind};

pub fn mk_token(kind: TokenKind, start: usize, end: usize) -> Token {
    Token::new(kind, start, end)
}

/// Build a token vector from `(kind, start, end)` triples.
pub fn mk_tokens(specs: &[(TokenKind, usize, usize)]) -> Vec<Token> {
    specs
        .iter()
        .map(|&(kind, start, end)| mk_token(kind, start, end))
        .collect()
}

/// Project a token vector onto its kinds.
pub fn kinds(tokens: Vec<Token>) -> Vec<TokenKind> {
    tokens.into_iter().map(|token| token.kind).collect()
}

/// Project a token vector onto the text each token covers.
pub fn texts<'a>(source: &'a str, tokens: &[Token]) -> Vec<&'a str> {
    tokens.iter().map(|token| token.text(source)).collect()
}
