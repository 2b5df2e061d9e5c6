//! Lexer
//!
//!     This module holds the tokenizer for BUILD files: a set of matchers, the disambiguation
//!     table that picks among them, the indentation tracker, and the pull cursor that drives
//!     them over a buffer.
//!
//! The Lexing Pass
//!
//!     At each offset:
//!         1. Every matcher in the [table](table) is tried and the longest match wins, ties
//!            going to the matcher declared first. If nothing matches, one character is
//!            emitted as BadCharacter so the lexer always moves forward.
//!
//!         2. A newline or a block start (`:` spaces newline) is provisional. The
//!            [indentation](indentation) tracker measures the next non-blank line and decides
//!            whether it opens a block, closes one, or stays what it is.
//!
//!         3. At the end of the range, every block still open is closed with a zero-length
//!            CloseBlock token, one per advance.
//!
//! Indentation Handling
//!
//!     Blocks become OpenBlock/CloseBlock tokens, which map nicely to braces in c-style
//!     syntaxes. Whitespace, newlines and comments stay in the stream; filtering them is up to
//!     the consumer (see [token sets](crate::asp::token::sets)).

pub mod indentation;
pub mod lexer;
pub mod matchers;
pub mod table;

pub use indentation::{measure_indent, IndentationStack};
pub use lexer::{AspLexer, LexerState};
pub use matchers::{Matched, TokenMatcher};
pub use table::{MatcherTable, DEFAULT_MATCHERS};

use crate::asp::error::AspError;
use crate::asp::token::Token;

/// Lex a whole source buffer.
pub fn tokenize(source: &str) -> Vec<Token> {
    AspLexer::new(source).collect()
}

/// Lex `source[from..to]` with a fresh indentation stack. A `to` of 0 means the end of the
/// buffer.
pub fn tokenize_range(source: &str, from: usize, to: usize) -> Vec<Token> {
    let mut lexer = AspLexer::new(source);
    lexer.start(source, from, to);
    lexer.collect()
}

/// Parse a `FROM..TO` lexing range. Either bound may be omitted: `..TO` starts at 0 and
/// `FROM..` runs to the end of the buffer (returned as a `to` of 0).
pub fn parse_range(text: &str) -> Result<(usize, usize), AspError> {
    let invalid = || AspError::InvalidRange(text.to_string());
    let (from, to) = text.split_once("..").ok_or_else(invalid)?;
    let bound = |part: &str| -> Result<usize, AspError> {
        let part = part.trim();
        if part.is_empty() {
            Ok(0)
        } else {
            part.parse().map_err(|_| invalid())
        }
    };
    let (from, to) = (bound(from)?, bound(to)?);
    if to != 0 && from > to {
        return Err(invalid());
    }
    Ok((from, to))
}
