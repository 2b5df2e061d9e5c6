//! Token dumps and the detokenizer
//!
//! This module turns a token stream back into text, either as a human readable dump or as the
//! original source slice.
//!
//! The detokenizer works purely from spans: since every matched token starts exactly where the
//! previous one ended, concatenating the covered text reproduces the lexed slice. This is
//! useful for:
//!
//! - Round-trip testing (source -> tokens -> source)
//! - Spotting gaps or overlaps introduced by a lexer change
//! - Debugging and visualization of token streams

use super::core::Token;
use serde::Serialize;

/// A token together with the text it covers, as written by the JSON dump.
#[derive(Debug, Serialize)]
struct TokenRecord<'a> {
    #[serde(flatten)]
    token: Token,
    text: &'a str,
}

/// One token per line: `KIND start..end "text"`.
pub fn to_simple_string(source: &str, tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push_str(&format!("{} {:?}\n", token, token.text(source)));
    }
    out
}

/// Pretty JSON array of `{ kind, start, end, text }` objects.
pub fn to_json(source: &str, tokens: &[Token]) -> Result<String, serde_json::Error> {
    let records: Vec<TokenRecord<'_>> = tokens
        .iter()
        .map(|token| TokenRecord {
            token: *token,
            text: token.text(source),
        })
        .collect();
    serde_json::to_string_pretty(&records)
}

/// Reconstruct source text from token spans.
///
/// Zero-length tokens (synthesized close blocks) contribute nothing.
pub fn detokenize(source: &str, tokens: &[Token]) -> String {
    tokens.iter().map(|token| token.text(source)).collect()
}
