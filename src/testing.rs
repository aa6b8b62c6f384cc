//! A `LexerCursor` over a `&str`, standing in for a real host during tests.
//!
//! Grounded on `intl_markdown`'s `tests/harness.rs` (`parse`/`parse_to_ast`
//! helpers used by every spec test file): a small, crate-internal helper
//! that lets tests drive the thing under test without a real outer host.

use crate::token::Token;
use std::str::Chars;

/// Drives a [`crate::cursor::LexerCursor`] over an in-memory string. Not
/// `#[cfg(test)]`-gated since integration tests under `tests/` need it too.
pub struct StrCursor<'a> {
    source: &'a str,
    byte_pos: usize,
    column: u32,
    end_byte_pos: usize,
    end_column: u32,
    result_symbol: Option<Token>,
}

impl<'a> StrCursor<'a> {
    pub fn new(source: &'a str) -> Self {
        StrCursor {
            source,
            byte_pos: 0,
            column: 0,
            end_byte_pos: 0,
            end_column: 0,
            result_symbol: None,
        }
    }

    fn chars_from_here(&self) -> Chars<'a> {
        self.source[self.byte_pos..].chars()
    }

    pub fn byte_pos(&self) -> usize {
        self.byte_pos
    }

    pub fn end_byte_pos(&self) -> usize {
        self.end_byte_pos
    }

    pub fn result_symbol(&self) -> Option<Token> {
        self.result_symbol
    }

    /// Remaining, not-yet-consumed input, for assertions in tests.
    pub fn remaining(&self) -> &'a str {
        &self.source[self.byte_pos..]
    }

    /// Rewinds the raw cursor back to the last committed `mark_end`,
    /// discarding any further lookahead a prior `scan` call left behind.
    /// A real host does this itself before every call into the external
    /// scanner (its lexer is always positioned at the last token
    /// boundary, never wherever a rejected recognizer's speculative
    /// `advance`s happened to land); tests driving several `scan` calls
    /// over the same [`StrCursor`] must call this between them to get the
    /// same behavior.
    pub fn reset_to_mark(&mut self) {
        self.byte_pos = self.end_byte_pos;
        self.column = self.end_column;
    }
}

impl<'a> super::cursor::LexerCursor for StrCursor<'a> {
    fn lookahead(&self) -> char {
        self.chars_from_here().next().unwrap_or('\0')
    }

    fn eof(&self) -> bool {
        self.byte_pos >= self.source.len()
    }

    fn get_column(&self) -> u32 {
        self.column
    }

    fn advance(&mut self, _skip: bool) {
        if let Some(ch) = self.chars_from_here().next() {
            self.byte_pos += ch.len_utf8();
            if ch == '\n' {
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
    }

    fn mark_end(&mut self) {
        self.end_byte_pos = self.byte_pos;
        self.end_column = self.column;
    }

    fn set_result_symbol(&mut self, token: Token) {
        self.result_symbol = Some(token);
    }
}
