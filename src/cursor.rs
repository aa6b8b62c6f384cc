//! The lexer callback surface (§4.A, §6) and a thin wrapper adding the
//! handful of primitives every dispatcher needs on top of it.

use crate::token::Token;

/// Mirrors the host's `TSLexer` callback surface, abstracted to a trait so
/// the scanner can be driven by a real host or by [`crate::testing::StrCursor`]
/// in tests without depending on tree-sitter's C ABI.
pub trait LexerCursor {
    /// The byte about to be consumed, as a `char`. Implementations decode
    /// UTF-8 lazily; ASCII-only dispatch code should prefer comparing
    /// against `char` literals directly.
    fn lookahead(&self) -> char;

    /// True once the cursor has reached the end of input.
    fn eof(&self) -> bool;

    /// Column of the current position, 0-based, counting UTF-8 codepoints
    /// since the last line start seen by the host.
    fn get_column(&self) -> u32;

    /// Consume the current lookahead character. `skip` marks the consumed
    /// range as insignificant whitespace for error recovery, matching
    /// `TSLexer::advance`'s second argument.
    fn advance(&mut self, skip: bool);

    /// Mark the current position as the end of the token about to be
    /// returned from `scan`.
    fn mark_end(&mut self);

    /// Record which token code `scan` is about to report as found.
    fn set_result_symbol(&mut self, token: Token);
}

/// Adds the CR-swallowing `advance` wrapper and run-counting helpers of
/// §4.A on top of any [`LexerCursor`].
///
/// Grounded on `tree-sitter-djot-inline/src/scanner.c`'s `advance`, which
/// swallows a bare `\r` at the single lowest-level primitive rather than
/// re-checking at every call site (see `SPEC_FULL.md`, "Supplemented
/// features").
pub struct Cursor<'a, C: LexerCursor> {
    inner: &'a mut C,
}

impl<'a, C: LexerCursor> Cursor<'a, C> {
    pub fn new(inner: &'a mut C) -> Self {
        Cursor { inner }
    }

    pub fn lookahead(&self) -> char {
        self.inner.lookahead()
    }

    pub fn eof(&self) -> bool {
        self.inner.eof()
    }

    pub fn get_column(&self) -> u32 {
        self.inner.get_column()
    }

    pub fn mark_end(&mut self) {
        self.inner.mark_end();
    }

    pub fn set_result_symbol(&mut self, token: Token) {
        self.inner.set_result_symbol(token);
    }

    /// Consumes the current lookahead, swallowing a following bare `\r`
    /// immediately so no other call site ever observes one.
    pub fn advance(&mut self, skip: bool) {
        self.inner.advance(skip);
        if self.inner.lookahead() == '\r' {
            self.inner.advance(skip);
        }
    }

    /// Consumes a run of `ch` and returns how many were consumed.
    pub fn count_run(&mut self, ch: char) -> u32 {
        let mut count = 0;
        while self.lookahead() == ch {
            self.advance(false);
            count += 1;
        }
        count
    }

    /// Consumes a run of plain spaces/tabs and returns how many columns
    /// they covered (§4.A: "tabs add 4 columns" — a flat `+4` per tab, not
    /// tab-stop rounding).
    pub fn count_whitespace(&mut self) -> u32 {
        let mut columns = 0;
        loop {
            match self.lookahead() {
                ' ' => {
                    self.advance(true);
                    columns += 1;
                }
                '\t' => {
                    self.advance(true);
                    columns += 4;
                }
                _ => break,
            }
        }
        columns
    }

    /// Consumes a single occurrence of `ch` if present, returning whether
    /// it matched. The cursor is left untouched on a non-match.
    pub fn eat(&mut self, ch: char) -> bool {
        if self.lookahead() == ch {
            self.advance(false);
            true
        } else {
            false
        }
    }
}
