//! Matcher table and disambiguation
//!
//!     Several matchers can succeed at the same offset: `=` and `==`, `def` the keyword and
//!     `def` the identifier, `""` the empty string and `"""` the doc string. Which one wins is
//!     decided by [`MatcherTable::longest_match`], never by whatever order a container happens
//!     to iterate in:
//!
//!         1. The longest match wins.
//!         2. Among matches of equal length, the matcher declared first wins.
//!
//!     Rule 1 keeps operators whole (`==` over `=`, `>=` over `>`), prefers a block start
//!     (`:\n`) over a bare colon and a doc string over the empty string that starts it. Rule 2
//!     lets keywords, which are declared before the identifier pattern, win the tie against
//!     an identifier of the same text.

use super::matchers::{
    BlockStartMatcher, DocStringMatcher, Matched, QuotedStringMatcher, RegexMatcher,
    StringMatcher, TokenMatcher,
};
use crate::asp::token::{TokenKind, KEYWORDS};
use once_cell::sync::Lazy;

const OPERATORS: &[(&str, TokenKind)] = &[
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Times),
    ("/", TokenKind::Divide),
    ("%", TokenKind::Percent),
    ("<", TokenKind::LeftChev),
    (">", TokenKind::RightChev),
    ("==", TokenKind::Equals),
    ("!=", TokenKind::NotEquals),
    (">=", TokenKind::Gte),
    ("<=", TokenKind::Lte),
    ("=", TokenKind::Eq),
    (",", TokenKind::Comma),
    ("[", TokenKind::LBrack),
    ("]", TokenKind::RBrack),
    ("{", TokenKind::LBrace),
    ("}", TokenKind::RBrace),
    ("(", TokenKind::LParen),
    (")", TokenKind::RParen),
    ("|", TokenKind::Pipe),
];

const PATTERNS: &[(&str, TokenKind)] = &[
    (r"\r\n|\r|\n", TokenKind::Newline),
    (r" +", TokenKind::Whitespace),
    (r"#[^\r\n]*", TokenKind::Comment),
    (r"[0-9]+", TokenKind::IntLit),
    (r"[A-Za-z_][A-Za-z0-9_]*", TokenKind::Ident),
];

/// The default BUILD file matchers, built once per process.
pub static DEFAULT_MATCHERS: Lazy<MatcherTable> = Lazy::new(MatcherTable::build_default);

/// An ordered list of matchers. Declaration order is the tie-break order.
pub struct MatcherTable {
    matchers: Vec<Box<dyn TokenMatcher>>,
}

impl MatcherTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            matchers: Vec::new(),
        }
    }

    /// Append a matcher. Matchers added earlier win ties of equal length.
    pub fn add_matcher<M: TokenMatcher + 'static>(&mut self, matcher: M) {
        self.matchers.push(Box::new(matcher));
    }

    /// Builder-style variant of [`add_matcher`](Self::add_matcher).
    pub fn with<M: TokenMatcher + 'static>(mut self, matcher: M) -> Self {
        self.add_matcher(matcher);
        self
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Run every matcher at `pos` and pick the winner: longest match, earliest declared on
    /// ties. Empty matches are ignored.
    pub fn longest_match<'a>(&self, buffer: &'a str, pos: usize) -> Option<Matched<'a>> {
        let mut best: Option<Matched<'a>> = None;
        for matcher in &self.matchers {
            let Some(candidate) = matcher.match_at(buffer, pos) else {
                continue;
            };
            if candidate.is_empty() {
                continue;
            }
            if best.map_or(true, |current| candidate.len() > current.len()) {
                best = Some(candidate);
            }
        }
        best
    }

    fn build_default() -> Self {
        let mut table = MatcherTable::new();

        for (literal, kind) in OPERATORS {
            table.add_matcher(StringMatcher::new(*literal, *kind));
        }
        for (word, kind) in KEYWORDS {
            table.add_matcher(StringMatcher::keyword(*word, *kind));
        }

        table.add_matcher(BlockStartMatcher);
        table.add_matcher(StringMatcher::new(":", TokenKind::Colon));

        table.add_matcher(DocStringMatcher::new("\"\"\"", TokenKind::DocString));
        table.add_matcher(DocStringMatcher::new("'''", TokenKind::DocString));
        table.add_matcher(QuotedStringMatcher::new('"', TokenKind::StrLit));
        table.add_matcher(QuotedStringMatcher::new('\'', TokenKind::StrLit));

        for (pattern, kind) in PATTERNS {
            let matcher = RegexMatcher::new(pattern, *kind)
                .unwrap_or_else(|e| panic!("built-in pattern {pattern:?} is invalid: {e}"));
            table.add_matcher(matcher);
        }

        table
    }
}

impl Default for MatcherTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn winner(source: &str) -> Option<(TokenKind, &str)> {
        DEFAULT_MATCHERS
            .longest_match(source, 0)
            .map(|m| (m.kind, m.text))
    }

    #[rstest]
    #[case("==", TokenKind::Equals, "==")]
    #[case("!=", TokenKind::NotEquals, "!=")]
    #[case(">=1", TokenKind::Gte, ">=")]
    #[case("<=", TokenKind::Lte, "<=")]
    #[case("= =", TokenKind::Eq, "=")]
    #[case("> ", TokenKind::RightChev, ">")]
    fn test_operators_are_not_split(
        #[case] source: &str,
        #[case] kind: TokenKind,
        #[case] text: &str,
    ) {
        assert_eq!(winner(source), Some((kind, text)));
    }

    #[test]
    fn test_keywords_win_ties_against_identifiers() {
        for (word, kind) in KEYWORDS {
            assert_eq!(winner(word), Some((*kind, *word)), "keyword {word}");
        }
    }

    #[test]
    fn test_longer_identifier_beats_keyword_prefix() {
        assert_eq!(winner("definition"), Some((TokenKind::Ident, "definition")));
        assert_eq!(winner("iffy"), Some((TokenKind::Ident, "iffy")));
        assert_eq!(winner("Trueish"), Some((TokenKind::Ident, "Trueish")));
    }

    #[test]
    fn test_doc_string_beats_empty_string() {
        assert_eq!(
            winner("\"\"\"doc\"\"\""),
            Some((TokenKind::DocString, "\"\"\"doc\"\"\""))
        );
        assert_eq!(winner("\"\" x"), Some((TokenKind::StrLit, "\"\"")));
    }

    #[test]
    fn test_block_start_beats_colon() {
        assert_eq!(winner(":  \nx"), Some((TokenKind::OpenBlock, ":  \n")));
        assert_eq!(winner(": x"), Some((TokenKind::Colon, ":")));
    }

    #[test]
    fn test_no_match() {
        assert_eq!(winner("$"), None);
        assert_eq!(winner("\t"), None);
        assert_eq!(winner(""), None);
    }

    #[test]
    fn test_tie_goes_to_first_declared() {
        let table = MatcherTable::new()
            .with(StringMatcher::new("ab", TokenKind::Plus))
            .with(StringMatcher::new("ab", TokenKind::Minus));
        assert_eq!(table.longest_match("ab", 0).map(|m| m.kind), Some(TokenKind::Plus));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_empty_table_matches_nothing() {
        let table = MatcherTable::default();
        assert!(table.is_empty());
        assert_eq!(table.longest_match("abc", 0), None);
    }
}
