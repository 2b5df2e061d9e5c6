//! Token matchers
//!
//!     A matcher tries to recognize one token kind at a given byte offset of the buffer. It
//!     either reports no match or the matched text together with the kind it produces.
//!     Matchers hold configuration only (a literal, a compiled pattern or a pair of
//!     delimiters); they never carry state between calls and are shared freely between lexer
//!     instances and threads.
//!
//!     Matchers look at the whole buffer, not only at the lexer's effective end offset. The
//!     lexer is the one that rejects a token that runs past the range it was asked to lex.
//!
//! Strategies
//!
//!     StringMatcher:       literal prefix (operators), optionally with an identifier
//!                          boundary check (keywords).
//!     RegexMatcher:        anchored pattern (identifiers, integers, comments, whitespace,
//!                          newlines).
//!     QuotedStringMatcher: single line `"..."` / `'...'` with backslash escapes.
//!     DocStringMatcher:    multi-line `"""..."""` / `'''...'''`.
//!     BlockStartMatcher:   `:` followed by optional spaces and a newline.

use crate::asp::token::TokenKind;
use regex::Regex;

/// A successful match: the matched text and the kind it lexes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matched<'a> {
    pub text: &'a str,
    pub kind: TokenKind,
}

impl<'a> Matched<'a> {
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Trait for token recognizers
pub trait TokenMatcher: Send + Sync {
    /// Try to match a token starting at byte offset `pos` of `buffer`.
    fn match_at<'a>(&self, buffer: &'a str, pos: usize) -> Option<Matched<'a>>;
}

/// Characters that may continue an identifier.
pub fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Matches a literal string, used for operators and keywords.
#[derive(Debug, Clone)]
pub struct StringMatcher {
    literal: &'static str,
    kind: TokenKind,
    keyword: bool,
}

impl StringMatcher {
    pub fn new(literal: &'static str, kind: TokenKind) -> Self {
        Self {
            literal,
            kind,
            keyword: false,
        }
    }

    /// A keyword matcher refuses to match when the literal runs straight into an identifier,
    /// so `definition` is never lexed as `def` + `inition`.
    ///
    /// Only an identifier character (`[A-Za-z0-9_]`) blocks the match. Punctuation is a
    /// boundary too, so `True)` lexes as TRUE RPAREN and `def(` as DEF LPAREN. Accepting only
    /// end of buffer, a space or a newline would turn both into identifiers.
    pub fn keyword(literal: &'static str, kind: TokenKind) -> Self {
        Self {
            literal,
            kind,
            keyword: true,
        }
    }
}

impl TokenMatcher for StringMatcher {
    fn match_at<'a>(&self, buffer: &'a str, pos: usize) -> Option<Matched<'a>> {
        let rest = buffer.get(pos..)?;
        if !rest.starts_with(self.literal) {
            return None;
        }
        let (text, after) = rest.split_at(self.literal.len());
        if self.keyword && after.chars().next().is_some_and(is_ident_char) {
            return None;
        }
        Some(Matched {
            text,
            kind: self.kind,
        })
    }
}

/// Matches a regular expression anchored at the current offset.
#[derive(Debug, Clone)]
pub struct RegexMatcher {
    regex: Regex,
    kind: TokenKind,
}

impl RegexMatcher {
    pub fn new(pattern: &str, kind: TokenKind) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{pattern})"))?;
        Ok(Self { regex, kind })
    }
}

impl TokenMatcher for RegexMatcher {
    fn match_at<'a>(&self, buffer: &'a str, pos: usize) -> Option<Matched<'a>> {
        let rest = buffer.get(pos..)?;
        let found = self.regex.find(rest)?;
        if found.is_empty() {
            return None;
        }
        Some(Matched {
            text: found.as_str(),
            kind: self.kind,
        })
    }
}

/// Matches a quoted string literal that must terminate on the line it starts on.
///
/// A backslash escapes the character after it, so `"a\"b"` is one literal. An unterminated
/// literal is not a match at all.
#[derive(Debug, Clone)]
pub struct QuotedStringMatcher {
    quote: char,
    kind: TokenKind,
}

impl QuotedStringMatcher {
    pub fn new(quote: char, kind: TokenKind) -> Self {
        Self { quote, kind }
    }
}

impl TokenMatcher for QuotedStringMatcher {
    fn match_at<'a>(&self, buffer: &'a str, pos: usize) -> Option<Matched<'a>> {
        let rest = buffer.get(pos..)?;
        let mut chars = rest.char_indices();
        match chars.next() {
            Some((_, c)) if c == self.quote => {}
            _ => return None,
        }

        while let Some((idx, c)) = chars.next() {
            match c {
                // An escaped line break still ends the line.
                '\\' => match chars.next() {
                    Some((_, '\n' | '\r')) | None => return None,
                    Some(_) => {}
                },
                '\n' | '\r' => return None,
                c if c == self.quote => {
                    return Some(Matched {
                        text: &rest[..idx + c.len_utf8()],
                        kind: self.kind,
                    });
                }
                _ => {}
            }
        }
        None
    }
}

/// Matches a triple-quoted doc string, which may span any number of lines.
#[derive(Debug, Clone)]
pub struct DocStringMatcher {
    delimiter: &'static str,
    kind: TokenKind,
}

impl DocStringMatcher {
    pub fn new(delimiter: &'static str, kind: TokenKind) -> Self {
        Self { delimiter, kind }
    }
}

impl TokenMatcher for DocStringMatcher {
    fn match_at<'a>(&self, buffer: &'a str, pos: usize) -> Option<Matched<'a>> {
        let rest = buffer.get(pos..)?;
        let body = rest.strip_prefix(self.delimiter)?;
        let close = body.find(self.delimiter)?;
        let len = self.delimiter.len() * 2 + close;
        Some(Matched {
            text: &rest[..len],
            kind: self.kind,
        })
    }
}

/// Matches a block start: a colon, any number of spaces, then a newline (`\n` or `\r\n`).
///
/// The match covers the colon through the newline. This is the only token that can open an
/// indentation block.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockStartMatcher;

impl TokenMatcher for BlockStartMatcher {
    fn match_at<'a>(&self, buffer: &'a str, pos: usize) -> Option<Matched<'a>> {
        let rest = buffer.get(pos..)?;
        let after_colon = rest.strip_prefix(':')?;
        let after_spaces = after_colon.trim_start_matches(' ');
        let newline = if after_spaces.starts_with("\r\n") {
            2
        } else if after_spaces.starts_with('\n') {
            1
        } else {
            return None;
        };
        let len = rest.len() - after_spaces.len() + newline;
        Some(Matched {
            text: &rest[..len],
            kind: TokenKind::OpenBlock,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of<'a>(m: Option<Matched<'a>>) -> Option<&'a str> {
        m.map(|m| m.text)
    }

    #[test]
    fn test_string_matcher_prefix() {
        let m = StringMatcher::new("==", TokenKind::Equals);
        assert_eq!(text_of(m.match_at("a == b", 2)), Some("=="));
        assert_eq!(text_of(m.match_at("a = b", 2)), None);
        assert_eq!(text_of(m.match_at("=", 0)), None);
    }

    #[test]
    fn test_string_matcher_past_end_of_buffer() {
        let m = StringMatcher::new("+", TokenKind::Plus);
        assert_eq!(m.match_at("+", 1), None);
        assert_eq!(m.match_at("+", 5), None);
    }

    #[test]
    fn test_keyword_boundary() {
        let m = StringMatcher::keyword("def", TokenKind::Def);
        assert_eq!(text_of(m.match_at("def", 0)), Some("def"));
        assert_eq!(text_of(m.match_at("def foo", 0)), Some("def"));
        assert_eq!(text_of(m.match_at("def\n", 0)), Some("def"));
        assert_eq!(text_of(m.match_at("def(", 0)), Some("def"));
        let t = StringMatcher::keyword("True", TokenKind::True);
        assert_eq!(text_of(t.match_at("f(True)", 2)), Some("True"));
        assert_eq!(m.match_at("definition", 0), None);
        assert_eq!(m.match_at("def_x", 0), None);
        assert_eq!(m.match_at("def1", 0), None);
    }

    #[test]
    fn test_regex_matcher_is_anchored() {
        let m = RegexMatcher::new("[0-9]+", TokenKind::IntLit).unwrap();
        assert_eq!(text_of(m.match_at("x = 123", 4)), Some("123"));
        assert_eq!(m.match_at("x = 123", 0), None);
    }

    #[test]
    fn test_regex_matcher_rejects_empty_match() {
        let m = RegexMatcher::new("#[^\\r\\n]*|a*", TokenKind::Comment).unwrap();
        assert_eq!(m.match_at("b", 0), None);
        assert_eq!(text_of(m.match_at("# hi\nb", 0)), Some("# hi"));
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        assert!(RegexMatcher::new("(", TokenKind::Ident).is_err());
    }

    #[test]
    fn test_quoted_string() {
        let m = QuotedStringMatcher::new('"', TokenKind::StrLit);
        assert_eq!(text_of(m.match_at("x = \"abc\" y", 4)), Some("\"abc\""));
        assert_eq!(text_of(m.match_at("\"\"", 0)), Some("\"\""));
        assert_eq!(m.match_at("'abc'", 0), None);
    }

    #[test]
    fn test_quoted_string_escapes() {
        let m = QuotedStringMatcher::new('"', TokenKind::StrLit);
        assert_eq!(text_of(m.match_at(r#""a\"b""#, 0)), Some(r#""a\"b""#));
        assert_eq!(text_of(m.match_at(r#""a\\" b""#, 0)), Some(r#""a\\""#));
    }

    #[test]
    fn test_quoted_string_unterminated() {
        let m = QuotedStringMatcher::new('"', TokenKind::StrLit);
        assert_eq!(m.match_at("\"a", 0), None);
        assert_eq!(m.match_at("\"a\nb\"", 0), None);
        assert_eq!(m.match_at("\"a\\\nb\"", 0), None);
        assert_eq!(m.match_at("\"a\\", 0), None);
    }

    #[test]
    fn test_quoted_string_multibyte() {
        let m = QuotedStringMatcher::new('\'', TokenKind::StrLit);
        assert_eq!(text_of(m.match_at("'héllo'", 0)), Some("'héllo'"));
    }

    #[test]
    fn test_doc_string_spans_lines() {
        let m = DocStringMatcher::new("\"\"\"", TokenKind::DocString);
        let source = "\"\"\"line1\nline2\"\"\"";
        assert_eq!(text_of(m.match_at(source, 0)), Some(source));
        assert_eq!(text_of(m.match_at("\"\"\"\"\"\" x", 0)), Some("\"\"\"\"\"\""));
        assert_eq!(m.match_at("\"\"\"never closed", 0), None);
        assert_eq!(m.match_at("\"\"", 0), None);
    }

    #[test]
    fn test_block_start() {
        let m = BlockStartMatcher;
        assert_eq!(text_of(m.match_at("foo:\n", 3)), Some(":\n"));
        assert_eq!(text_of(m.match_at("foo:    \n", 3)), Some(":    \n"));
        assert_eq!(text_of(m.match_at("foo:\r\n", 3)), Some(":\r\n"));
        assert_eq!(m.match_at("foo: x\n", 3), None);
        assert_eq!(m.match_at("foo:", 3), None);
        assert_eq!(m.match_at("foo:   ", 3), None);
        assert_eq!(
            m.match_at("a:\n", 1).map(|m| m.kind),
            Some(TokenKind::OpenBlock)
        );
    }
}
