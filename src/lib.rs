//! # asp
//!
//! An indentation-aware lexer for Please BUILD files (`BUILD`, `*.plz`, `*.build_defs`).
//!
//! File Layout
//!
//!     The library follows a src/asp/<area> layout. Token definitions live in `token`, the
//!     tokenizer proper (matchers, indentation tracking and the pull cursor) lives in `lexing`,
//!     and the consumers that only read the token stream (highlighting and folding) sit next
//!     to it. Configuration and errors are shared by the `asp` binary.
//!
//!     src/asp
//!       ├── token         Token kinds, token sets, dumps
//!       ├── lexing        Matchers, indentation stack, lexer cursor
//!       ├── highlighting  Token kind -> display style
//!       ├── folding       Block spans -> collapsible regions
//!       └── config        Layered TOML configuration
//!
//! For sample sources used across tests, see the [testing module](asp::testing).

pub mod asp;
