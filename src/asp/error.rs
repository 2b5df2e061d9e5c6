//! Errors for the fallible surfaces around the lexer
//!
//!     Lexing itself cannot fail: anything unrecognized becomes a BadCharacter token. What
//!     can fail is everything around it, reading sources, loading configuration, writing
//!     dumps and checking block structure, and those failures are collected here.

use crate::asp::folding::BalanceError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AspError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to serialize tokens: {0}")]
    Json(#[from] serde_json::Error),

    /// A lexing range that is not of the form `FROM..TO`.
    #[error("invalid range '{0}', expected FROM..TO")]
    InvalidRange(String),

    #[error(transparent)]
    Unbalanced(#[from] BalanceError),
}

impl AspError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AspError::Io {
            path: path.into(),
            source,
        }
    }
}
