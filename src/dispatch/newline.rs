//! The `NEWLINE_INLINE` / `NEWLINE` / `EOF_OR_NEWLINE` precedence
//! dispatcher (§4.F).
//!
//! Grounded on `intl_markdown::lexer::Lexer::consume_whitespace`'s
//! blank-line/hard-line-break disambiguation: look one further character
//! ahead before deciding what a line ending means, rather than committing
//! to a token the instant `\n` is seen.
//!
//! `CLOSE_PARAGRAPH` is deliberately not decided here: per §8 scenario 1,
//! a plain paragraph's closing blank line is signalled by a bare
//! `NEWLINE` (the grammar reads "`NEWLINE` while a paragraph is open" as
//! the close), while the *nested-block-demotion* sense of
//! `CLOSE_PARAGRAPH` (§4.F "(a) a block-closing marker ... is the next
//! thing on the line") is resolved earlier, by `dispatch::block`'s own
//! closing recognizers, before this dispatcher ever runs (§4.I). Deciding
//! it here too would require peeking past the newline to classify the
//! next line, which is not reversible — this dispatcher never advances
//! past a lookahead it might still need for a different token.
//!
//! `TABLE_ROW_END_NEWLINE` is tried first, ahead of the other three
//! (§4.F: "tried first if the top frame is `TableRow`"), since a newline
//! while a table row is open always means the row, never a paragraph or
//! plain block boundary.

use crate::context::ScanContext;
use crate::cursor::{Cursor, LexerCursor};
use crate::token::{BlockKind, Token, TokenSet};

/// Tries the newline/EOF family. Returns the token committed, if any.
/// Never partially consumes: on EOF with nothing matching, or on a
/// non-newline lookahead, returns `None` untouched.
pub fn dispatch<C: LexerCursor>(cursor: &mut Cursor<C>, valid: &TokenSet, ctx: &mut ScanContext) -> Option<Token> {
    if valid.contains(Token::TableRowEndNewline)
        && cursor.lookahead() == '\n'
        && matches!(ctx.open_blocks.peek(), Some(b) if b.kind == BlockKind::TableRow)
    {
        cursor.advance(false);
        cursor.mark_end();
        ctx.open_blocks.pop();
        cursor.set_result_symbol(Token::TableRowEndNewline);
        return Some(Token::TableRowEndNewline);
    }

    if cursor.eof() {
        if valid.contains(Token::EofOrNewline) {
            cursor.set_result_symbol(Token::EofOrNewline);
            return Some(Token::EofOrNewline);
        }
        return None;
    }

    if cursor.lookahead() != '\n' {
        return None;
    }

    if valid.contains(Token::EofOrNewline) && !valid.contains(Token::Newline) {
        cursor.advance(false);
        cursor.mark_end();
        cursor.set_result_symbol(Token::EofOrNewline);
        return Some(Token::EofOrNewline);
    }

    if valid.contains(Token::NewlineInline) {
        cursor.advance(false);
        cursor.mark_end();
        cursor.set_result_symbol(Token::NewlineInline);
        return Some(Token::NewlineInline);
    }

    if valid.contains(Token::Newline) {
        cursor.advance(false);
        cursor.mark_end();
        cursor.set_result_symbol(Token::Newline);
        return Some(Token::Newline);
    }

    None
}
