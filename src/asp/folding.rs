//! Block folding
//!
//!     The lexer guarantees that OpenBlock and CloseBlock tokens nest like braces. This
//!     module is the consumer side of that contract: it pairs them up into collapsible
//!     regions, and checks the contract itself for streams that came from elsewhere.
//!
//!     A region covers the block body only, from the end of the block-start token (just
//!     after its newline) to the start of the token that closes it. The header line stays
//!     visible when the region is collapsed.

use crate::asp::token::{Token, TokenKind};
use serde::Serialize;
use thiserror::Error;

/// A collapsible block body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FoldRegion {
    pub start: usize,
    pub end: usize,
    /// 1 for a top-level block, 2 for a block nested in it, and so on.
    pub depth: usize,
}

impl FoldRegion {
    /// Number of lines the body spans, ignoring trailing line breaks.
    pub fn line_count(&self, source: &str) -> usize {
        source
            .get(self.start..self.end)
            .map_or(0, |body| body.trim_end().lines().count())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BalanceError {
    #[error("close block at offset {offset} has no matching open block")]
    UnexpectedClose { offset: usize },

    #[error("{count} block(s) still open at offset {end}")]
    Unclosed { count: usize, end: usize },
}

/// Pair every OpenBlock with its CloseBlock and return the non-empty bodies, sorted by
/// start offset.
///
/// Unmatched markers are skipped; use [`check_balance`] to reject such streams.
pub fn fold_regions(tokens: &[Token]) -> Vec<FoldRegion> {
    let mut open: Vec<Token> = Vec::new();
    let mut regions = Vec::new();

    for token in tokens {
        match token.kind {
            TokenKind::OpenBlock => open.push(*token),
            TokenKind::CloseBlock => {
                let Some(opener) = open.pop() else {
                    continue;
                };
                if opener.end < token.start {
                    regions.push(FoldRegion {
                        start: opener.end,
                        end: token.start,
                        depth: open.len() + 1,
                    });
                }
            }
            _ => {}
        }
    }

    regions.sort_by_key(|region| (region.start, region.depth));
    regions
}

/// Check that block markers nest like braces, returning the deepest nesting reached.
pub fn check_balance(tokens: &[Token]) -> Result<usize, BalanceError> {
    let mut depth = 0usize;
    let mut max_depth = 0usize;

    for token in tokens {
        match token.kind {
            TokenKind::OpenBlock => {
                depth += 1;
                max_depth = max_depth.max(depth);
            }
            TokenKind::CloseBlock => {
                depth = depth.checked_sub(1).ok_or(BalanceError::UnexpectedClose {
                    offset: token.start,
                })?;
            }
            _ => {}
        }
    }

    if depth > 0 {
        let end = tokens.last().map_or(0, |token| token.end);
        return Err(BalanceError::Unclosed { count: depth, end });
    }
    Ok(max_depth)
}
