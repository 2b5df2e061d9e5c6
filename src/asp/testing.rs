//! Testing utilities
//!
//!     Helpers shared by the unit tests next to the code and the integration tests under
//!     `tests/`.
//!
//! Sample Sources
//!
//!     Hand-written BUILD snippets drift: a missing space or a tab where spaces were meant
//!     silently changes the block structure a test exercises. Tests that need more than a
//!     line or two of source should load one of the curated files in `docs/samples/` through
//!     [samples] instead of inlining it. Each sample is checked for balanced blocks by the
//!     tests in this module, so a broken sample fails loudly in one place.
//!
//! Token Factories
//!
//!     [factories] builds expected tokens tersely, so assertions read as a list of
//!     `(kind, start, end)` triples.

pub mod factories;
pub mod samples;

pub use factories::{kinds, mk_token, mk_tokens};
pub use samples::Sample;
