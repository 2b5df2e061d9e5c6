//! Core token kinds for BUILD files.
//!
//!     The kind set is closed: every token the lexer yields carries one of these values. The
//!     names returned by [`TokenKind::name`] are stable and are what the textual and JSON dumps
//!     print.

use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// All lexical categories of the BUILD language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "&'static str")]
pub enum TokenKind {
    // Literals and names
    Ident,
    IntLit,
    StrLit,
    DocString,
    Comment,

    // Operators
    Plus,
    Minus,
    Times,
    Divide,
    Percent,
    LeftChev,
    RightChev,
    Equals,
    NotEquals,
    Gte,
    Lte,
    Eq,
    Pipe,

    // Punctuation
    Colon,
    Comma,
    LBrack,
    RBrack,
    LBrace,
    RBrace,
    LParen,
    RParen,

    // Keywords
    And,
    Or,
    Is,
    Not,
    In,
    If,
    Elif,
    Else,
    Pass,
    Continue,
    Def,
    True,
    False,

    // Layout
    Whitespace,
    Newline,
    OpenBlock,
    CloseBlock,

    BadCharacter,
}

/// Reserved words and the kinds they lex to, in matcher declaration order.
pub const KEYWORDS: &[(&str, TokenKind)] = &[
    ("pass", TokenKind::Pass),
    ("continue", TokenKind::Continue),
    ("def", TokenKind::Def),
    ("False", TokenKind::False),
    ("True", TokenKind::True),
    ("and", TokenKind::And),
    ("or", TokenKind::Or),
    ("is", TokenKind::Is),
    ("if", TokenKind::If),
    ("elif", TokenKind::Elif),
    ("else", TokenKind::Else),
    ("not", TokenKind::Not),
    ("in", TokenKind::In),
];


impl TokenKind {
    /// Stable upper-snake name of the kind.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Ident => "IDENT",
            TokenKind::IntLit => "INT_LIT",
            TokenKind::StrLit => "STR_LIT",
            TokenKind::DocString => "DOC_STRING",
            TokenKind::Comment => "COMMENT",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Times => "TIMES",
            TokenKind::Divide => "DIVIDE",
            TokenKind::Percent => "PERCENT",
            TokenKind::LeftChev => "LEFT_CHEV",
            TokenKind::RightChev => "RIGHT_CHEV",
            TokenKind::Equals => "EQUALS",
            TokenKind::NotEquals => "NOT_EQUALS",
            TokenKind::Gte => "GTE",
            TokenKind::Lte => "LTE",
            TokenKind::Eq => "EQ",
            TokenKind::Pipe => "PIPE",
            TokenKind::Colon => "COLON",
            TokenKind::Comma => "COMMA",
            TokenKind::LBrack => "LBRACK",
            TokenKind::RBrack => "RBRACK",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::And => "AND",
            TokenKind::Or => "OR",
            TokenKind::Is => "IS",
            TokenKind::Not => "NOT",
            TokenKind::In => "IN",
            TokenKind::If => "IF",
            TokenKind::Elif => "ELIF",
            TokenKind::Else => "ELSE",
            TokenKind::Pass => "PASS",
            TokenKind::Continue => "CONTINUE",
            TokenKind::Def => "DEF",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Whitespace => "WHITE_SPACE",
            TokenKind::Newline => "EOL",
            TokenKind::OpenBlock => "OPEN_BLOCK",
            TokenKind::CloseBlock => "CLOSE_BLOCK",
            TokenKind::BadCharacter => "BAD_CHARACTER",
        }
    }

    /// Check if this kind is a reserved word
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::And
                | TokenKind::Or
                | TokenKind::Is
                | TokenKind::Not
                | TokenKind::In
                | TokenKind::If
                | TokenKind::Elif
                | TokenKind::Else
                | TokenKind::Pass
                | TokenKind::Continue
                | TokenKind::Def
                | TokenKind::True
                | TokenKind::False
        )
    }

    /// Check if this kind is an arithmetic, comparison or assignment operator
    pub fn is_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Times
                | TokenKind::Divide
                | TokenKind::Percent
                | TokenKind::LeftChev
                | TokenKind::RightChev
                | TokenKind::Equals
                | TokenKind::NotEquals
                | TokenKind::Gte
                | TokenKind::Lte
                | TokenKind::Eq
                | TokenKind::Pipe
        )
    }

    /// Whitespace, newlines and comments: kept in the stream, skipped by the parser.
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::Newline | TokenKind::Comment
        )
    }

    pub fn is_block_marker(self) -> bool {
        matches!(self, TokenKind::OpenBlock | TokenKind::CloseBlock)
    }
}

impl From<TokenKind> for &'static str {
    fn from(kind: TokenKind) -> Self {
        kind.name()
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One lexical unit: a kind plus a half-open byte range into the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }

    pub fn span(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Zero-length tokens are only ever synthesized close blocks.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The source text covered by this token, or an empty string if the span is not valid
    /// for `source`.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source.get(self.span()).unwrap_or("")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}..{}", self.kind, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_keyword_is_a_keyword_kind() {
        for (word, kind) in KEYWORDS {
            assert!(kind.is_keyword(), "{word} maps to non-keyword {kind}");
            assert!(!kind.is_operator());
        }
    }

    #[test]
    fn test_categories_are_disjoint() {
        let kinds = [
            TokenKind::Ident,
            TokenKind::Plus,
            TokenKind::LParen,
            TokenKind::Def,
            TokenKind::Whitespace,
            TokenKind::OpenBlock,
        ];
        for kind in kinds {
            let hits = [
                kind.is_keyword(),
                kind.is_operator(),
                kind.is_trivia(),
                kind.is_block_marker(),
            ]
            .iter()
            .filter(|hit| **hit)
            .count();
            assert!(hits <= 1, "{kind} falls into {hits} categories");
        }
    }

    #[test]
    fn test_token_text() {
        let source = "foo = 1";
        let token = Token::new(TokenKind::Eq, 4, 5);
        assert_eq!(token.text(source), "=");
        assert_eq!(token.len(), 1);
        assert!(!token.is_empty());
        assert_eq!(token.to_string(), "EQ 4..5");
    }

    #[test]
    fn test_token_text_out_of_bounds_is_empty() {
        let token = Token::new(TokenKind::CloseBlock, 10, 10);
        assert_eq!(token.text("abc"), "");
        assert!(token.is_empty());
    }

    #[test]
    fn test_kind_serializes_as_name() {
        let json = serde_json::to_string(&TokenKind::OpenBlock).unwrap();
        assert_eq!(json, "\"OPEN_BLOCK\"");
    }
}
