//! Main module for asp library functionality

pub mod config;
pub mod error;
pub mod folding;
pub mod highlighting;
pub mod lexing;
pub mod testing;
pub mod token;

pub use error::AspError;
pub use lexing::{tokenize, tokenize_range, AspLexer};
pub use token::{Token, TokenKind};
