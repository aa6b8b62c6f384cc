//! The bundle of mutable references every dispatcher needs into the
//! scanner's persisted state (§3). `Scanner::scan` (in `scanner.rs`)
//! borrows its own fields into one of these once per call and passes it
//! down to whichever dispatcher it tries; this keeps every `dispatch::*`
//! function signature to `(cursor, valid, ctx)` instead of a long list of
//! individually-borrowed fields, the same way `intl_markdown::parser::mod`
//! threads a single `&mut ParserContext`-shaped receiver through its many
//! small recognizer methods rather than passing each field separately.

use crate::block::BlockStack;
use crate::inline::InlineStack;
use crate::serialize::Flags;
use crate::token::Token;

pub struct ScanContext<'s> {
    pub open_blocks: &'s mut BlockStack,
    pub open_inline: &'s mut InlineStack,
    pub blocks_to_close: &'s mut u8,
    pub pending_terminal: &'s mut Option<(Token, u8)>,
    pub block_quote_level: &'s mut u8,
    pub indent: &'s mut u8,
    pub flags: &'s mut Flags,
}

impl<'s> ScanContext<'s> {
    /// Schedules a multi-frame close: the next `blocks_to_close` calls
    /// each emit a plain `BLOCK_CLOSE`, and once that count reaches zero
    /// the held-back `terminal` token (e.g. `DIV_END`) fires, consuming
    /// `terminal_width` further bytes at that point (§4.I, §9
    /// "Recursive block-close cascade").
    pub fn schedule_close(&mut self, frames_above_target: usize, terminal: Token, terminal_width: u8) {
        if frames_above_target == 0 {
            *self.pending_terminal = Some((terminal, terminal_width));
        } else {
            *self.blocks_to_close = frames_above_target as u8;
            *self.pending_terminal = Some((terminal, terminal_width));
        }
    }
}
