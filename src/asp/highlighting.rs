//! Syntax highlighting
//!
//!     Highlighting is a pure consumer of the token stream: every token kind maps to at most
//!     one display style and nothing else is inspected. Whitespace, newlines and the
//!     synthesized block markers carry no style, so they never show up as spans.
//!
//!     The styles are deliberately coarse, the usual editor palette categories, so a
//!     frontend can map them onto whatever theme it has.

use crate::asp::lexing::AspLexer;
use crate::asp::token::TokenKind;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HighlightStyle {
    Keyword,
    Identifier,
    Number,
    String,
    DocComment,
    LineComment,
    OperationSign,
    Braces,
    Brackets,
    Parentheses,
    Comma,
    /// Used for `:`, the closest thing BUILD files have to a statement separator.
    Semicolon,
    BadCharacter,
}

impl HighlightStyle {
    pub fn name(self) -> &'static str {
        match self {
            HighlightStyle::Keyword => "keyword",
            HighlightStyle::Identifier => "identifier",
            HighlightStyle::Number => "number",
            HighlightStyle::String => "string",
            HighlightStyle::DocComment => "doc-comment",
            HighlightStyle::LineComment => "line-comment",
            HighlightStyle::OperationSign => "operation-sign",
            HighlightStyle::Braces => "braces",
            HighlightStyle::Brackets => "brackets",
            HighlightStyle::Parentheses => "parentheses",
            HighlightStyle::Comma => "comma",
            HighlightStyle::Semicolon => "semicolon",
            HighlightStyle::BadCharacter => "bad-character",
        }
    }
}

impl fmt::Display for HighlightStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The style of a token kind, or `None` for kinds that are not highlighted.
pub fn style_for(kind: TokenKind) -> Option<HighlightStyle> {
    let style = match kind {
        k if k.is_keyword() => HighlightStyle::Keyword,
        k if k.is_operator() => HighlightStyle::OperationSign,
        TokenKind::Ident => HighlightStyle::Identifier,
        TokenKind::IntLit => HighlightStyle::Number,
        TokenKind::StrLit => HighlightStyle::String,
        TokenKind::DocString => HighlightStyle::DocComment,
        TokenKind::Comment => HighlightStyle::LineComment,
        TokenKind::LBrace | TokenKind::RBrace => HighlightStyle::Braces,
        TokenKind::LBrack | TokenKind::RBrack => HighlightStyle::Brackets,
        TokenKind::LParen | TokenKind::RParen => HighlightStyle::Parentheses,
        TokenKind::Comma => HighlightStyle::Comma,
        TokenKind::Colon => HighlightStyle::Semicolon,
        TokenKind::BadCharacter => HighlightStyle::BadCharacter,
        _ => return None,
    };
    Some(style)
}

/// A styled byte range of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HighlightSpan {
    pub start: usize,
    pub end: usize,
    pub style: HighlightStyle,
}

/// Lex `source` and return the styled spans, in source order.
pub fn highlight(source: &str) -> Vec<HighlightSpan> {
    AspLexer::new(source)
        .filter_map(|token| {
            style_for(token.kind).map(|style| HighlightSpan {
                start: token.start,
                end: token.end,
                style,
            })
        })
        .collect()
}
