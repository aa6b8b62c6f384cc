//! The top-level `Scanner` (§3) and its single entry point, implementing
//! the strict dispatch order of §4.I.
//!
//! Grounded on `intl_markdown::parser::ICUMarkdownParser`'s shape (one
//! struct owning all mutable parse state, one entry method, small
//! `dispatch::*` helpers it delegates to in turn) and
//! `examples/original_source/src/scanner.c`'s top-level
//! `tree_sitter_djot_external_scanner_scan`, whose body is exactly this:
//! a `valid_symbols`-gated cascade of if-statements tried in priority
//! order until one commits.

use crate::block::BlockStack;
use crate::context::ScanContext;
use crate::cursor::{Cursor, LexerCursor};
use crate::dispatch::{block, inline, newline, verbatim};
use crate::inline::InlineStack;
use crate::serialize::{self, DecodedState, Flags};
use crate::token::{BlockKind, Token, TokenSet};

/// The scanner's full persisted state (§3). Every field here is exactly
/// what [`crate::serialize::serialize`]/[`crate::serialize::deserialize`]
/// round-trip; nothing else survives between `scan` calls.
#[derive(Debug, Default)]
pub struct Scanner {
    open_blocks: BlockStack,
    open_inline: InlineStack,
    blocks_to_close: u8,
    pending_terminal: Option<(Token, u8)>,
    block_quote_level: u8,
    indent: u8,
    flags: Flags,
}

impl Scanner {
    /// `create()` of §6: a fresh scanner with empty stacks. Tearing one
    /// down (§6's `destroy`) needs no code of its own in Rust — dropping
    /// the value frees its two `Vec`-backed stacks like any other value.
    pub fn new() -> Self {
        Scanner::default()
    }

    /// The single entry point the host calls with its current
    /// `valid_symbols` set (§6 `scan`). Tries recognizers in the strict
    /// priority order of §4.I, stopping at the first one that commits.
    /// Returns whether a token was produced; on `true` the lexer's
    /// `result_symbol` has already been set by whichever recognizer
    /// matched.
    pub fn scan<C: LexerCursor>(&mut self, lexer: &mut C, valid: &TokenSet) -> bool {
        let mut cursor = Cursor::new(lexer);

        // 1. Grammar recovery: always wins, zero-width.
        if valid.contains(Token::Error) {
            cursor.set_result_symbol(Token::Error);
            return true;
        }

        // 2. Block-close cascade / EOF eviction (§4.I item 2, §9
        // "Recursive block-close cascade", §7 taxonomy item 4 "EOF with
        // open blocks").
        if let Some(_token) = self.try_cascade(&mut cursor, valid) {
            return true;
        }

        let mut ctx = self.context();

        // At the start of a fresh line, re-derive the two per-line
        // registers block-level recognizers read: how many columns of
        // leading whitespace precede this line's content (`indent`, used
        // by list-item/footnote/table-caption continuation checks) and
        // how many `> ` markers a nested block quote has already
        // consumed this line (`block_quote_level`, rebuilt from scratch
        // by `dispatch::block::try_block_quote` as it walks them). Both
        // are free lookahead: `count_whitespace` never calls `mark_end`,
        // so a call that ultimately commits nothing leaves the next
        // `scan` resuming from the same line start.
        if cursor.get_column() == 0 {
            *ctx.indent = cursor.count_whitespace().min(255) as u8;
            *ctx.block_quote_level = 0;
        }

        // 3/4/5/8/9. Block-level handlers, their embedded delayed
        // `CLOSE_PARAGRAPH` guards, the per-character block recognizers,
        // and the table-caption/ordered-list/block-attribute scans all
        // live together in `dispatch::block::dispatch` (see its own doc
        // comment for the exact grouping it covers).
        if verbatim::try_content(&mut cursor, valid, ctx.open_inline) {
            return true;
        }
        if verbatim::try_end(&mut cursor, valid, ctx.open_inline) {
            return true;
        }
        if let Some(_token) = block::dispatch(&mut cursor, valid, &mut ctx) {
            return true;
        }

        // 6. Non-whitespace check: none of the inline span markers are
        // whitespace, so a plain lookahead guard before trying them is
        // sufficient — there is no separate whitespace-consuming step
        // needed here.
        if cursor.lookahead() != ' ' && cursor.lookahead() != '\t' {
            // 7. Inline span dispatchers (ten bracketed/single kinds,
            // plus inline verbatim's own begin, which shares backtick
            // priority with the fenced code blocks just tried above).
            if verbatim::try_begin(&mut cursor, valid, ctx.open_inline) {
                return true;
            }
            if let Some(_token) = inline::dispatch(&mut cursor, valid, &mut ctx) {
                return true;
            }
        }

        // 10. Hard line break.
        if let Some(_token) = try_hard_line_break(&mut cursor, valid) {
            return true;
        }

        // 11. Close-open-list-if-needed cascade: a list left on top of
        // the stack with nothing else claiming this position closes here
        // rather than waiting for EOF.
        if valid.contains(Token::BlockClose)
            && matches!(ctx.open_blocks.peek(), Some(b) if matches!(b.kind, BlockKind::List(_)))
        {
            ctx.open_blocks.pop();
            cursor.mark_end();
            cursor.set_result_symbol(Token::BlockClose);
            return true;
        }

        // 12. Newline & EOF.
        newline::dispatch(&mut cursor, valid, &mut ctx).is_some()
    }

    /// Item 2 of §4.I: continue an in-progress cascade, or start one by
    /// evicting the top frame outright at EOF. The delayed terminal
    /// token recorded by [`ScanContext::schedule_close`] is not emitted
    /// directly here — once `blocks_to_close` reaches zero the next
    /// full dispatch naturally re-tries the original closing recognizer
    /// (e.g. `dispatch::block::try_div_or_definition`), which by then
    /// sees its target at the top of the stack and commits the terminal
    /// token itself, fence bytes and all. `pending_terminal` is cleared
    /// here purely so it never lingers in the serialized state past the
    /// cascade that scheduled it.
    fn try_cascade<C: LexerCursor>(&mut self, cursor: &mut Cursor<C>, valid: &TokenSet) -> Option<Token> {
        if !valid.contains(Token::BlockClose) {
            return None;
        }
        if self.blocks_to_close > 0 {
            self.blocks_to_close -= 1;
            self.open_blocks.pop();
            if self.blocks_to_close == 0 {
                self.pending_terminal = None;
            }
            cursor.mark_end();
            cursor.set_result_symbol(Token::BlockClose);
            return Some(Token::BlockClose);
        }
        if cursor.eof() && !self.open_blocks.is_empty() {
            self.open_blocks.pop();
            cursor.mark_end();
            cursor.set_result_symbol(Token::BlockClose);
            return Some(Token::BlockClose);
        }
        None
    }

    fn context(&mut self) -> ScanContext<'_> {
        ScanContext {
            open_blocks: &mut self.open_blocks,
            open_inline: &mut self.open_inline,
            blocks_to_close: &mut self.blocks_to_close,
            pending_terminal: &mut self.pending_terminal,
            block_quote_level: &mut self.block_quote_level,
            indent: &mut self.indent,
            flags: &mut self.flags,
        }
    }

    /// §6 `serialize`: packs the full persisted state into the host's
    /// buffer format.
    pub fn serialize(&self) -> Vec<u8> {
        serialize::serialize(
            self.blocks_to_close,
            self.block_quote_level,
            self.indent,
            self.flags,
            self.pending_terminal,
            &self.open_blocks,
            &self.open_inline,
        )
    }

    /// §6 `deserialize`: discards all existing frames and restores from
    /// a buffer produced by [`Self::serialize`]. `false` on a malformed
    /// buffer, matching the host's expectation that deserialize failures
    /// leave it able to fall back to a fresh parse.
    pub fn deserialize(&mut self, bytes: &[u8]) -> bool {
        let Some(DecodedState {
            blocks_to_close,
            block_quote_level,
            indent,
            flags,
            pending_terminal,
            blocks,
            inlines,
        }) = serialize::deserialize(bytes)
        else {
            return false;
        };
        self.blocks_to_close = blocks_to_close;
        self.block_quote_level = block_quote_level;
        self.indent = indent;
        self.flags = flags;
        self.pending_terminal = pending_terminal;
        self.open_blocks = blocks;
        self.open_inline = inlines;
        true
    }
}

/// A literal `\` immediately before a line ending (§4.I item 10).
fn try_hard_line_break<C: LexerCursor>(cursor: &mut Cursor<C>, valid: &TokenSet) -> Option<Token> {
    if !valid.contains(Token::HardLineBreak) || cursor.lookahead() != '\\' {
        return None;
    }
    cursor.advance(false);
    if cursor.lookahead() != '\n' {
        return None;
    }
    cursor.advance(false);
    cursor.mark_end();
    cursor.set_result_symbol(Token::HardLineBreak);
    Some(Token::HardLineBreak)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StrCursor;

    #[test]
    fn error_symbol_wins_immediately() {
        let mut scanner = Scanner::new();
        let mut cursor = StrCursor::new("anything");
        let valid = TokenSet::from_tokens(&[Token::Error]);
        assert!(scanner.scan(&mut cursor, &valid));
        assert_eq!(cursor.result_symbol(), Some(Token::Error));
        assert_eq!(cursor.end_byte_pos(), 0);
    }

    #[test]
    fn eof_with_open_block_evicts_before_eof_token() {
        let mut scanner = Scanner::new();
        scanner.open_blocks.push(crate::block::Block::new(BlockKind::Div, 3));
        let mut cursor = StrCursor::new("");
        let valid = TokenSet::from_tokens(&[Token::BlockClose, Token::EofOrNewline]);
        assert!(scanner.scan(&mut cursor, &valid));
        assert_eq!(cursor.result_symbol(), Some(Token::BlockClose));
        assert!(scanner.open_blocks.is_empty());

        let mut cursor2 = StrCursor::new("");
        assert!(scanner.scan(&mut cursor2, &valid));
        assert_eq!(cursor2.result_symbol(), Some(Token::EofOrNewline));
    }

    #[test]
    fn hard_line_break_requires_newline_immediately_after_backslash() {
        let mut scanner = Scanner::new();
        let mut cursor = StrCursor::new("\\\nrest");
        let valid = TokenSet::from_tokens(&[Token::HardLineBreak]);
        assert!(scanner.scan(&mut cursor, &valid));
        assert_eq!(cursor.result_symbol(), Some(Token::HardLineBreak));
        assert_eq!(cursor.remaining(), "rest");
    }

    #[test]
    fn serialize_round_trips_through_a_fresh_scanner() {
        let mut scanner = Scanner::new();
        scanner.open_blocks.push(crate::block::Block::new(BlockKind::Div, 3));
        let bytes = scanner.serialize();

        let mut restored = Scanner::new();
        assert!(restored.deserialize(&bytes));
        assert_eq!(restored.serialize(), bytes);
    }

    #[test]
    fn verbatim_span_opens_and_closes_through_scan() {
        let mut scanner = Scanner::new();
        let mut cursor = StrCursor::new("`code`");
        let begin_valid = TokenSet::from_tokens(&[Token::VerbatimBegin]);
        assert!(scanner.scan(&mut cursor, &begin_valid));
        assert_eq!(cursor.result_symbol(), Some(Token::VerbatimBegin));

        cursor.reset_to_mark();
        let content_valid = TokenSet::from_tokens(&[Token::VerbatimContent]);
        assert!(scanner.scan(&mut cursor, &content_valid));
        assert_eq!(cursor.result_symbol(), Some(Token::VerbatimContent));

        cursor.reset_to_mark();
        let end_valid = TokenSet::from_tokens(&[Token::VerbatimEnd]);
        assert!(scanner.scan(&mut cursor, &end_valid));
        assert_eq!(cursor.result_symbol(), Some(Token::VerbatimEnd));
    }
}
