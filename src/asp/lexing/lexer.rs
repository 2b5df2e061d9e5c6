//! The BUILD file lexer
//!
//!     The lexer is a pull cursor over an immutable buffer. It is restartable over any sub-range
//!     and keeps no token list: the current token is located, read through the accessors, and
//!     replaced on the next advance.
//!
//! State
//!
//!     Everything the lexer knows lives in a [`LexerState`] value: the position, the effective
//!     end offset, the located token and the indentation stack. The transitions are the plain
//!     functions [`locate`] and [`advance`], which take a state and return the next one. The
//!     [`AspLexer`] cursor only wraps them with the start/current-token/advance interface a
//!     parser expects.
//!
//!     After [`AspLexer::start`] and after every [`AspLexer::advance`] the current token is
//!     already located, so the accessors are plain reads and can be called any number of times.
//!
//! Termination
//!
//!     Every advance either moves the position forward or, once the end offset is reached,
//!     pops one indentation level while emitting a zero-length CloseBlock. The stack depth
//!     reported by [`AspLexer::state`] therefore strictly decreases while trailing blocks are
//!     drained, and the stream ends only when the position is at the end and the depth is 1
//!     (see [`AspLexer::is_finished`]).
//!
//!     A missing current token does not by itself mean the stream is over. When the next
//!     token would run past the end offset it is dropped and the cursor reports no token
//!     while the position is still short of the end. The following advance skips to the end
//!     offset and drains the open blocks. The iterator follows the same rule, so a sub-range
//!     that stops mid-token still yields a balanced stream.
//!
//! Sub-ranges
//!
//!     Lexing `[from, to)` starts with a fresh `[0]` stack. The tokens of a sub-range match
//!     those of a full lex from the same offset only when `from` is a token boundary at the top
//!     level; callers restarting inside a block must account for the nesting themselves.

use super::indentation::{measure_indent, resolve, Boundary, IndentationStack, Resolution};
use super::table::{MatcherTable, DEFAULT_MATCHERS};
use crate::asp::token::{Token, TokenKind};

/// Whether the token at the current position has been located yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Located {
    Pending,
    Token(Token),
    /// Nothing to read: end of range, or the next token would overrun it.
    Nothing,
}

/// The complete lexer state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerState {
    position: usize,
    end: usize,
    located: Located,
    indents: IndentationStack,
}

impl LexerState {
    /// A fresh state for lexing `[from, end)`.
    pub fn new(from: usize, end: usize) -> Self {
        Self {
            position: from,
            end,
            located: Located::Pending,
            indents: IndentationStack::new(),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn indents(&self) -> &IndentationStack {
        &self.indents
    }

    /// The located token, if any. `None` both before location and when there is nothing left.
    pub fn token(&self) -> Option<Token> {
        match self.located {
            Located::Token(token) => Some(token),
            Located::Pending | Located::Nothing => None,
        }
    }
}

/// Locate the token at the current position, if it is not located already.
pub fn locate(mut state: LexerState, buffer: &str, table: &MatcherTable) -> LexerState {
    if state.located != Located::Pending {
        return state;
    }
    if state.position >= state.end {
        state.located = Located::Nothing;
        return state;
    }

    let pos = state.position;
    let (kind, len) = match table.longest_match(buffer, pos) {
        Some(matched) => (matched.kind, matched.len()),
        None => (TokenKind::BadCharacter, char_len_at(buffer, pos)),
    };

    if pos + len > state.end {
        tracing::trace!(pos, len, end = state.end, "token overruns lexing range");
        state.located = Located::Nothing;
        return state;
    }

    let provisional = Token::new(kind, pos, pos + len);
    let token = settle(provisional, buffer, &mut state);
    state.located = Located::Token(token);
    state
}

/// Commit the current token and locate the next one, or close a trailing block at the end.
pub fn advance(state: LexerState, buffer: &str, table: &MatcherTable) -> LexerState {
    let mut state = locate(state, buffer, table);
    state.position = match state.located {
        Located::Token(token) => token.end,
        // An overrun abandons the rest of the range.
        Located::Pending | Located::Nothing => state.end,
    };
    state.located = Located::Pending;

    if state.position < state.end {
        return locate(state, buffer, table);
    }

    state.located = match state.indents.pop() {
        Some(level) => {
            tracing::trace!(pos = state.position, level, "closing block at end of range");
            Located::Token(Token::new(
                TokenKind::CloseBlock,
                state.position,
                state.position,
            ))
        }
        None => Located::Nothing,
    };
    state
}

/// Turn a provisional newline or block start into its final token, updating the stack.
fn settle(token: Token, buffer: &str, state: &mut LexerState) -> Token {
    let boundary = match token.kind {
        TokenKind::Newline => Boundary::Newline,
        TokenKind::OpenBlock => Boundary::BlockStart,
        _ => return token,
    };

    let next_indent = measure_indent(buffer, token.end, state.end);
    match resolve(boundary, next_indent, &state.indents) {
        Resolution::Plain => token,
        Resolution::Open(level) => {
            state.indents.push(level);
            tracing::trace!(pos = token.start, level, "open block");
            token
        }
        Resolution::Close => {
            let level = state.indents.pop();
            tracing::trace!(pos = token.start, ?level, "close block");
            Token::new(TokenKind::CloseBlock, token.start, token.end)
        }
        Resolution::Demote => {
            tracing::trace!(pos = token.start, ?next_indent, "block start opens nothing");
            Token::new(TokenKind::Colon, token.start, token.start + 1)
        }
    }
}

/// Byte length of the character at `pos`, so a bad character never splits a code point.
fn char_len_at(buffer: &str, pos: usize) -> usize {
    buffer
        .get(pos..)
        .and_then(|rest| rest.chars().next())
        .map_or(1, char::len_utf8)
}

fn floor_char_boundary(buffer: &str, mut idx: usize) -> usize {
    idx = idx.min(buffer.len());
    while !buffer.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

/// Pull-based lexer over a BUILD source buffer.
///
/// Also an [`Iterator`] over the remaining tokens.
#[derive(Clone)]
pub struct AspLexer<'a> {
    buffer: &'a str,
    table: &'a MatcherTable,
    state: LexerState,
}

impl<'a> AspLexer<'a> {
    /// Lex the whole of `buffer` with the default matchers.
    pub fn new(buffer: &'a str) -> Self {
        Self::with_table(buffer, &DEFAULT_MATCHERS)
    }

    /// Lex the whole of `buffer` with a custom matcher table.
    pub fn with_table(buffer: &'a str, table: &'a MatcherTable) -> Self {
        let mut lexer = Self {
            buffer,
            table,
            state: LexerState::new(0, 0),
        };
        lexer.start(buffer, 0, 0);
        lexer
    }

    /// Restart over `buffer[from..to]`. A `to` of 0 means the end of the buffer.
    ///
    /// Offsets past the buffer are clamped, and offsets inside a multi-byte character are
    /// moved back to its start. The indentation stack is reset to `[0]`.
    pub fn start(&mut self, buffer: &'a str, from: usize, to: usize) {
        let end = if to == 0 {
            buffer.len()
        } else {
            floor_char_boundary(buffer, to)
        };
        let from = floor_char_boundary(buffer, from.min(end));
        self.buffer = buffer;
        self.state = locate(LexerState::new(from, end), buffer, self.table);
    }

    pub fn token(&self) -> Option<Token> {
        self.state.token()
    }

    pub fn token_kind(&self) -> Option<TokenKind> {
        self.token().map(|token| token.kind)
    }

    /// Start of the current token, or the current position if there is none.
    pub fn token_start(&self) -> usize {
        self.token().map_or(self.state.position, |token| token.start)
    }

    /// End of the current token, or the current position if there is none.
    pub fn token_end(&self) -> usize {
        self.token().map_or(self.state.position, |token| token.end)
    }

    pub fn token_text(&self) -> Option<&'a str> {
        self.token().map(|token| token.text(self.buffer))
    }

    pub fn advance(&mut self) {
        let state = std::mem::replace(&mut self.state, LexerState::new(0, 0));
        self.state = advance(state, self.buffer, self.table);
    }

    /// Depth of the indentation stack. Opaque to callers beyond "strictly decreases while
    /// draining trailing close blocks".
    pub fn state(&self) -> usize {
        self.state.indents.depth()
    }

    pub fn buffer_end(&self) -> usize {
        self.state.end
    }

    pub fn position(&self) -> usize {
        self.state.position
    }

    /// True once the position is at the end offset and every block has been closed.
    pub fn is_finished(&self) -> bool {
        self.state.position >= self.state.end && self.state.indents.depth() == 1
    }
}

impl Iterator for AspLexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.token() {
                self.advance();
                return Some(token);
            }
            if self.is_finished() {
                return None;
            }
            // Dropped overrun: skip to the end and drain.
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asp::testing::factories::{kinds, mk_token};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_accessors_are_idempotent() {
        let lexer = AspLexer::new("foo = 1");
        for _ in 0..3 {
            assert_eq!(lexer.token_kind(), Some(TokenKind::Ident));
            assert_eq!(lexer.token_start(), 0);
            assert_eq!(lexer.token_end(), 3);
            assert_eq!(lexer.token_text(), Some("foo"));
        }
        assert_eq!(lexer.position(), 0);
    }

    #[test]
    fn test_advance_walks_tokens() {
        let source = "foo = def _foo_bar1():\npass";
        let mut lexer = AspLexer::new(source);
        assert_eq!(lexer.token_text(), Some("foo"));
        lexer.advance();
        lexer.advance();
        assert_eq!(lexer.token_text(), Some("="));
        assert_eq!(
            lexer.token_text(),
            source.get(lexer.token_start()..lexer.token_end())
        );
    }

    #[test]
    fn test_empty_buffer() {
        let mut lexer = AspLexer::new("");
        assert_eq!(lexer.token(), None);
        assert_eq!(lexer.state(), 1);
        lexer.advance();
        assert_eq!(lexer.token(), None);
        assert_eq!(lexer.position(), 0);
    }

    #[test]
    fn test_bad_character_is_one_char() {
        let tokens: Vec<Token> = AspLexer::new("a$é").collect();
        assert_eq!(
            tokens,
            vec![
                mk_token(TokenKind::Ident, 0, 1),
                mk_token(TokenKind::BadCharacter, 1, 2),
                mk_token(TokenKind::BadCharacter, 2, 4),
            ]
        );
    }

    #[test]
    fn test_unterminated_string_degrades() {
        let tokens: Vec<Token> = AspLexer::new("\"a").collect();
        assert_eq!(
            tokens,
            vec![
                mk_token(TokenKind::BadCharacter, 0, 1),
                mk_token(TokenKind::Ident, 1, 2),
            ]
        );
    }

    #[test]
    fn test_end_of_buffer_drains_one_block_per_advance() {
        let mut lexer = AspLexer::new("a:\n  b:\n    c");
        let mut last_state = lexer.state();
        while lexer.position() < lexer.buffer_end() {
            last_state = lexer.state();
            lexer.advance();
        }
        assert_eq!(last_state, 3);

        assert_eq!(lexer.token(), Some(mk_token(TokenKind::CloseBlock, 13, 13)));
        assert_eq!(lexer.state(), 2);
        lexer.advance();
        assert_eq!(lexer.token(), Some(mk_token(TokenKind::CloseBlock, 13, 13)));
        assert_eq!(lexer.state(), 1);
        lexer.advance();
        assert_eq!(lexer.token(), None);
        assert_eq!(lexer.position(), 13);
    }

    #[test]
    fn test_block_start_without_body_is_a_colon() {
        let source = "foo:\n";
        assert_eq!(
            kinds(AspLexer::new(source).collect()),
            vec![TokenKind::Ident, TokenKind::Colon, TokenKind::Newline]
        );
    }

    #[test]
    fn test_block_start_without_indent_is_a_colon() {
        let source = "foo:\nbar";
        assert_eq!(
            kinds(AspLexer::new(source).collect()),
            vec![
                TokenKind::Ident,
                TokenKind::Colon,
                TokenKind::Newline,
                TokenKind::Ident
            ]
        );
    }

    #[test]
    fn test_restart_resets_state() {
        let source = "a:\n  b";
        let mut lexer = AspLexer::new(source);
        lexer.advance();
        assert_eq!(lexer.state(), 2);
        lexer.start(source, 0, 0);
        assert_eq!(lexer.state(), 1);
        assert_eq!(lexer.token_text(), Some("a"));
    }

    #[test]
    fn test_sub_range_stops_before_overrun() {
        // The doc string extends past offset 6, so nothing is located there.
        let source = "x = \"\"\"abc\"\"\"";
        let mut lexer = AspLexer::new(source);
        lexer.start(source, 0, 6);
        for _ in 0..4 {
            lexer.advance();
        }
        assert_eq!(lexer.position(), 4);
        assert_eq!(lexer.token(), None);
        assert!(!lexer.is_finished());

        lexer.advance();
        assert_eq!(lexer.position(), 6);
        assert_eq!(lexer.token(), None);
        assert!(lexer.is_finished());
    }

    #[test]
    fn test_overrun_inside_a_block_still_closes_it() {
        let source = "a:\n  \"\"\"x\"\"\"";
        let expected = vec![
            mk_token(TokenKind::Ident, 0, 1),
            mk_token(TokenKind::OpenBlock, 1, 3),
            mk_token(TokenKind::Whitespace, 3, 5),
            mk_token(TokenKind::CloseBlock, 8, 8),
        ];

        let mut lexer = AspLexer::new(source);
        lexer.start(source, 0, 8);
        let iterated: Vec<Token> = lexer.clone().collect();
        assert_eq!(iterated, expected);

        let mut pulled = Vec::new();
        while !lexer.is_finished() {
            if let Some(token) = lexer.token() {
                pulled.push(token);
            }
            lexer.advance();
        }
        assert_eq!(pulled, expected);
        assert_eq!(lexer.state(), 1);
    }

    #[test]
    fn test_sub_range_offsets_are_clamped() {
        let source = "é = 1";
        let mut lexer = AspLexer::new(source);
        lexer.start(source, 1, 100);
        assert_eq!(lexer.token_start(), 0);
        assert_eq!(lexer.buffer_end(), source.len());
    }

    #[test]
    fn test_pure_transitions() {
        let source = "a:\n  b";
        let state = locate(LexerState::new(0, source.len()), source, &DEFAULT_MATCHERS);
        assert_eq!(state.token(), Some(mk_token(TokenKind::Ident, 0, 1)));
        let again = locate(state.clone(), source, &DEFAULT_MATCHERS);
        assert_eq!(again, state);

        let state = advance(state, source, &DEFAULT_MATCHERS);
        assert_eq!(state.token(), Some(mk_token(TokenKind::OpenBlock, 1, 3)));
        assert_eq!(state.indents().levels(), &[0, 2]);
    }
}
