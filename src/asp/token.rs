//! Token types shared across the lexer, its consumers, and tooling.
//!
//! Token Layers
//!
//!     Source Tokens:
//!         Produced directly by a matcher at the current offset: identifiers, literals,
//!         operators, keywords, comments, whitespace and newlines. Their span always covers
//!         the exact source text that was matched.
//!
//!     Structural Tokens:
//!         OpenBlock and CloseBlock. These play the role that `{` and `}` play in brace
//!         languages. An OpenBlock is the re-interpretation of a `:` that ends a line, a
//!         CloseBlock is either a re-interpretation of the newline that ends a block, or a
//!         zero-length token synthesized at the end of the buffer for every block still open.
//!         See [indentation](crate::asp::lexing::indentation).
//!
//!     Fallback Tokens:
//!         BadCharacter covers exactly one character that no matcher accepted. The lexer never
//!         fails; it degrades into these instead.

pub mod core;
pub mod formatting;
pub mod sets;

pub use self::core::{Token, TokenKind, KEYWORDS};
pub use formatting::{detokenize, to_json, to_simple_string};
pub use sets::{significant, TokenSet, COMMENT_TOKENS, WHITESPACE_TOKENS};
