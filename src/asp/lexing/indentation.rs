//! Indentation tracking
//!
//!     BUILD files delimit blocks by indentation, like Python. The lexer turns that into
//!     brace-like OpenBlock/CloseBlock tokens with a stack of the indentation levels that are
//!     currently open. The stack starts as `[0]`, is strictly increasing from bottom to top, and
//!     its bottom entry is never popped.
//!
//! Block Synthesis
//!
//!     Two kinds of matched tokens are provisional, their final kind depends on the line that
//!     follows them:
//!
//!         Block start (`:` spaces newline): if the next non-blank line is deeper than the
//!         current level, its indentation is pushed and the token becomes an OpenBlock.
//!         Otherwise there is no block to open and the lexer emits a plain colon instead.
//!
//!         Newline: if the next non-blank line is exactly at the enclosing level (second
//!         from top), one level is popped and the newline becomes a CloseBlock. A newline pops
//!         at most one level. A line that dedents past the enclosing level pops nothing; the
//!         blocks it skipped close on a later newline that lands on their enclosing level, or
//!         at the end of the buffer.
//!
//!     When the next line cannot be measured because the buffer ends first, nothing is pushed
//!     or popped here. Blocks still open at the end of the buffer are closed by the lexer with
//!     zero-length CloseBlock tokens, one per advance.

/// The stack of currently open indentation levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentationStack {
    levels: Vec<u32>,
}

impl IndentationStack {
    pub fn new() -> Self {
        Self { levels: vec![0] }
    }

    /// Number of entries, always at least 1.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    pub fn top(&self) -> u32 {
        self.levels.last().copied().unwrap_or(0)
    }

    /// The level enclosing the innermost block, if any block is open.
    pub fn enclosing(&self) -> Option<u32> {
        self.levels.len().checked_sub(2).map(|idx| self.levels[idx])
    }

    /// Open a block at `level`. Returns false, leaving the stack untouched, unless `level` is
    /// deeper than the current top.
    pub fn push(&mut self, level: u32) -> bool {
        if level <= self.top() {
            return false;
        }
        self.levels.push(level);
        true
    }

    /// Close the innermost block. The bottom level is never popped.
    pub fn pop(&mut self) -> Option<u32> {
        if self.levels.len() > 1 {
            self.levels.pop()
        } else {
            None
        }
    }

    pub fn levels(&self) -> &[u32] {
        &self.levels
    }
}

impl Default for IndentationStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Indentation of the next non-blank line at or after `from`.
///
/// Counts spaces; a line break resets the count (blank lines are skipped) and any other
/// character ends the measurement. Returns `None` if `end` (or the end of the buffer) is
/// reached first.
pub fn measure_indent(buffer: &str, from: usize, end: usize) -> Option<u32> {
    let end = end.min(buffer.len());
    let bytes = buffer.as_bytes();
    let mut indent = 0;
    for &byte in bytes.get(from..end)? {
        match byte {
            b' ' => indent += 1,
            b'\n' | b'\r' => indent = 0,
            _ => return Some(indent),
        }
    }
    None
}

/// The provisional tokens whose kind depends on the following line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Newline,
    BlockStart,
}

/// What a provisional token turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Keep a newline as a newline.
    Plain,
    /// Push this level; the token becomes an OpenBlock.
    Open(u32),
    /// Pop one level; the newline becomes a CloseBlock.
    Close,
    /// The block start opens nothing; only its colon is emitted.
    Demote,
}

/// Decide the final kind of a provisional token, given the indentation of the next line.
pub fn resolve(boundary: Boundary, next_indent: Option<u32>, stack: &IndentationStack) -> Resolution {
    match (boundary, next_indent) {
        (Boundary::Newline, None) => Resolution::Plain,
        (Boundary::Newline, Some(level)) => match stack.enclosing() {
            Some(enclosing) if level == enclosing => Resolution::Close,
            _ => Resolution::Plain,
        },
        (Boundary::BlockStart, Some(level)) if level > stack.top() => Resolution::Open(level),
        (Boundary::BlockStart, _) => Resolution::Demote,
    }
}
