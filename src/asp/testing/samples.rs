//! Curated BUILD sources from `docs/samples/`.
//!
//! The files are embedded at compile time, so tests never depend on the working directory.

use crate::asp::lexing::tokenize;
use crate::asp::token::Token;

/// A sample source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    /// A single `go_library` call spread over several lines.
    SimpleRule,
    /// A rule definition with a doc string, comments and if/elif/else blocks.
    BuildDefs,
    /// Three levels of nesting and a dedent that skips a level.
    NestedBlocks,
    /// Unterminated strings and characters outside the language.
    Malformed,
}

impl Sample {
    pub const ALL: [Sample; 4] = [
        Sample::SimpleRule,
        Sample::BuildDefs,
        Sample::NestedBlocks,
        Sample::Malformed,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Sample::SimpleRule => "simple_rule.build",
            Sample::BuildDefs => "build_defs.build_defs",
            Sample::NestedBlocks => "nested_blocks.build_defs",
            Sample::Malformed => "malformed.build",
        }
    }

    pub fn source(self) -> &'static str {
        match self {
            Sample::SimpleRule => include_str!("../../../docs/samples/simple_rule.build"),
            Sample::BuildDefs => include_str!("../../../docs/samples/build_defs.build_defs"),
            Sample::NestedBlocks => {
                include_str!("../../../docs/samples/nested_blocks.build_defs")
            }
            Sample::Malformed => include_str!("../../../docs/samples/malformed.build"),
        }
    }

    pub fn tokenize(self) -> Vec<Token> {
        tokenize(self.source())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asp::folding::check_balance;
    use crate::asp::token::{detokenize, TokenKind};

    #[test]
    fn test_samples_tile_their_source() {
        for sample in Sample::ALL {
            let tokens = sample.tokenize();
            assert_eq!(detokenize(sample.source(), &tokens), sample.source(), "{sample:?}");
        }
    }

    #[test]
    fn test_samples_are_balanced() {
        for sample in Sample::ALL {
            assert!(check_balance(&sample.tokenize()).is_ok(), "{sample:?}");
        }
    }

    #[test]
    fn test_only_the_malformed_sample_has_bad_characters() {
        for sample in Sample::ALL {
            let bad = sample
                .tokenize()
                .iter()
                .any(|token| token.kind == TokenKind::BadCharacter);
            assert_eq!(bad, sample == Sample::Malformed, "{sample:?}");
        }
    }
}
