//! The shared tick-counted verbatim/fence engine (§4.G), driving both
//! inline verbatim spans and fenced code blocks.
//!
//! Grounded directly on
//! `examples/original_source/tree-sitter-djot-inline/src/scanner.c`'s
//! `parse_verbatim_start`/`parse_verbatim_content`/`parse_verbatim_end` —
//! this crate generalizes the same three-function shape to also drive
//! `CODE_BLOCK_BEGIN`/`CODE_BLOCK_END` (§4.D "Code blocks"), since both
//! constructs are "a run of `k` identical delimiter characters must be
//! matched by an identical-length run to close".
//!
//! A subtlety carried over from the original `parse_verbatim_content`:
//! when a candidate closing tick run turns out to be the wrong length,
//! the bytes are folded into the content and `mark_end` is called
//! immediately; when it's the right length, `mark_end` is deliberately
//! *not* called after counting it, so the host's lexer resumes there on
//! the next `scan` call and the closing run is free to be recognized as
//! its own token.

use crate::cursor::{Cursor, LexerCursor};
use crate::inline::{Inline, InlineStack};
use crate::token::{InlineKind, Token, TokenSet};

/// Counts a leading run of backticks without consulting any stack state.
/// Shared by inline verbatim opens and fenced-code-block opens/closes.
pub fn count_ticks<C: LexerCursor>(cursor: &mut Cursor<C>) -> u32 {
    cursor.count_run('`')
}

/// Opens an inline verbatim span (`` ` ``, ``` `` ```, ...). Pushes an
/// `Inline` frame carrying the tick count so the matching close requires
/// exactly that many (§3).
pub fn try_begin<C: LexerCursor>(
    cursor: &mut Cursor<C>,
    valid: &TokenSet,
    open_inline: &mut InlineStack,
) -> bool {
    if !valid.contains(Token::VerbatimBegin) || cursor.lookahead() != '`' {
        return false;
    }
    let ticks = count_ticks(cursor);
    if ticks == 0 {
        return false;
    }
    open_inline.push(Inline::new(InlineKind::Verbatim, ticks.min(255) as u8));
    cursor.mark_end();
    cursor.set_result_symbol(Token::VerbatimBegin);
    true
}

/// True if the innermost open inline span is a verbatim span — callers use
/// this to short-circuit every other inline recognizer while inside one
/// (§4.D: "Inside a code block, no nested block can open" has the same
/// shape for blocks; this is the inline analogue).
pub fn is_open(open_inline: &InlineStack) -> bool {
    matches!(open_inline.peek(), Some(frame) if frame.kind == InlineKind::Verbatim)
}

/// Returns `true` if the line starting at the current (already-consumed)
/// newline is blank, without leaving any trace beyond where the cursor was
/// already going to advance to as content.
fn at_blank_line<C: LexerCursor>(cursor: &mut Cursor<C>) -> bool {
    debug_assert_eq!(cursor.lookahead(), '\n');
    cursor.advance(false);
    loop {
        match cursor.lookahead() {
            ' ' | '\t' => cursor.advance(false),
            '\n' => return true,
            _ => return cursor.eof(),
        }
    }
}

/// Consumes verbatim content up to, but not including, either a matching
/// tick run or a force-closing blank line.
pub fn try_content<C: LexerCursor>(
    cursor: &mut Cursor<C>,
    valid: &TokenSet,
    open_inline: &InlineStack,
) -> bool {
    if !valid.contains(Token::VerbatimContent) {
        return false;
    }
    let Some(frame) = open_inline.peek() else {
        return false;
    };
    if frame.kind != InlineKind::Verbatim || cursor.eof() {
        return false;
    }
    let want = frame.datum as u32;
    let mut consumed_anything = false;

    loop {
        if cursor.eof() {
            cursor.mark_end();
            break;
        }
        match cursor.lookahead() {
            '`' => {
                let ticks = count_ticks(cursor);
                consumed_anything = true;
                if ticks == want {
                    // Deliberately no `mark_end` here: these ticks become
                    // next call's VERBATIM_END, not this call's content.
                    break;
                }
                cursor.mark_end();
            }
            '\n' => {
                // Tentatively end content before the newline; the probe
                // below consumes forward to decide whether it's blank,
                // since the cursor can't un-consume.
                cursor.mark_end();
                if at_blank_line(cursor) {
                    // Blank line force-closes the span (§4.G); leave the
                    // newline itself unconsumed for the newline dispatcher.
                    break;
                }
                // Not blank after all: the newline and any leading
                // whitespace the probe walked over belong to the content.
                cursor.mark_end();
                consumed_anything = true;
            }
            _ => {
                cursor.advance(false);
                cursor.mark_end();
                consumed_anything = true;
            }
        }
    }

    let _ = consumed_anything;
    cursor.set_result_symbol(Token::VerbatimContent);
    true
}

/// Closes a verbatim span: either a matching tick run, or EOF (§8: "EOF
/// with open blocks ... successful synthetic closes" applies equally to
/// an unterminated verbatim span).
pub fn try_end<C: LexerCursor>(
    cursor: &mut Cursor<C>,
    valid: &TokenSet,
    open_inline: &mut InlineStack,
) -> bool {
    if !valid.contains(Token::VerbatimEnd) {
        return false;
    }
    let Some(frame) = open_inline.peek() else {
        return false;
    };
    if frame.kind != InlineKind::Verbatim {
        return false;
    }

    if cursor.eof() {
        open_inline.pop();
        cursor.mark_end();
        cursor.set_result_symbol(Token::VerbatimEnd);
        return true;
    }

    let want = frame.datum as u32;
    if cursor.lookahead() != '`' {
        return false;
    }
    let ticks = count_ticks(cursor);
    if ticks != want {
        return false;
    }
    open_inline.pop();
    cursor.mark_end();
    cursor.set_result_symbol(Token::VerbatimEnd);
    true
}

/// Tries to open a fenced code block: `` ``` `` or longer, on an
/// otherwise-blank-prefixed line. Returns the fence length on success.
pub fn try_open_fence<C: LexerCursor>(cursor: &mut Cursor<C>) -> Option<u32> {
    if cursor.lookahead() != '`' {
        return None;
    }
    let ticks = count_ticks(cursor);
    if ticks < 3 {
        return None;
    }
    Some(ticks)
}

/// Tries to match a closing fence of exactly `want` backticks at the
/// current (start-of-line) position, with nothing but whitespace
/// following on the line.
pub fn try_close_fence<C: LexerCursor>(cursor: &mut Cursor<C>, want: u32) -> bool {
    if cursor.lookahead() != '`' {
        return false;
    }
    let ticks = count_ticks(cursor);
    ticks == want
}
