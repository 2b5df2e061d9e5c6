//! Configuration for the asp binary
//!
//!     Only the command-line surface is configurable: how `asp tokens` prints the stream and
//!     which folds `asp folds` reports. The lexer itself has no settings.
//!
//!     Precedence, lowest first: `defaults/asp.default.toml` (compiled in), the file passed
//!     with `--config`, then individual flags.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../../defaults/asp.default.toml");

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AspConfig {
    pub tokens: TokensConfig,
    pub folding: FoldingConfig,
}

/// Controls the token dump.
#[derive(Debug, Clone, Deserialize)]
pub struct TokensConfig {
    pub format: DumpFormat,
    pub skip_trivia: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DumpFormat {
    Simple,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FoldingConfig {
    pub min_lines: usize,
}

/// Builds an [`AspConfig`]: embedded defaults, then an optional user file, then flags.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            builder: Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    /// Layer a user TOML file. The file must exist.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).format(FileFormat::Toml));
        self
    }

    /// `--format`: override `tokens.format`. Unknown names fail in [`build`](Self::build).
    pub fn dump_format(self, format: &str) -> Result<Self, ConfigError> {
        self.set("tokens.format", format)
    }

    /// `--skip-trivia`: force `tokens.skip_trivia` on.
    pub fn skip_trivia(self) -> Result<Self, ConfigError> {
        self.set("tokens.skip_trivia", true)
    }

    fn set(mut self, key: &str, value: impl Into<ValueKind>) -> Result<Self, ConfigError> {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<AspConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
