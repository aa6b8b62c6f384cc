//! The unified inline span dispatcher (§4.E): the ten bracketed/single
//! span kinds (verbatim is its own construct, handled entirely by
//! `dispatch::verbatim`).
//!
//! Grounded on `examples/discord-discord-intl/crates/intl_markdown/src/delimiter.rs`'s
//! `Delimiter` trait — that file keeps one struct per emphasis-like
//! construct, each separately tracking whether it can open/close and how
//! many marker characters it consumes. This module generalizes the same
//! open/close/count shape across all ten kinds by keying off
//! `InlineKind::style()` instead of one impl per kind, since every kind
//! here reduces to the same three shapes (bracketed-or-single,
//! bracketed-only, single-only) rather than needing bespoke behavior per
//! marker character.
//!
//! Ambiguity pruning and the bracket/link lookahead memo are both
//! described in full in §4.E; see the doc comments on
//! `try_open`/`try_close` below for where each is implemented.

use crate::context::ScanContext;
use crate::cursor::{Cursor, LexerCursor};
use crate::dispatch::verbatim;
use crate::serialize::Flags;
use crate::token::{InlineKind, SpanStyle, Token, TokenSet};

/// The bare marker character that opens a span without a surrounding
/// `{...}`. `ParensSpan` and `SquareBracketSpan` are `SingleOnly` but
/// still open on a bare character, unlike `CurlyBracketSpan` (which is
/// the `{...}` span itself and so has no "bare" form at all).
fn bare_open_kind(ch: char) -> Option<InlineKind> {
    match ch {
        '_' => Some(InlineKind::Emphasis),
        '*' => Some(InlineKind::Strong),
        '^' => Some(InlineKind::Superscript),
        '~' => Some(InlineKind::Subscript),
        '(' => Some(InlineKind::ParensSpan),
        '[' => Some(InlineKind::SquareBracketSpan),
        _ => None,
    }
}

/// The kind a marker character selects immediately after an opening `{`.
/// Only the kinds with a bracketed form at all are listed here; a `{` not
/// followed by one of these is `CurlyBracketSpan` itself.
fn bracketed_open_kind(ch: char) -> Option<InlineKind> {
    match ch {
        '_' => Some(InlineKind::Emphasis),
        '*' => Some(InlineKind::Strong),
        '^' => Some(InlineKind::Superscript),
        '~' => Some(InlineKind::Subscript),
        '=' => Some(InlineKind::Highlighted),
        '+' => Some(InlineKind::Insert),
        '-' => Some(InlineKind::Delete),
        _ => None,
    }
}

/// Registers a fresh open span, bumping the fallback counter of any
/// already-open span of the same kind (§4.E "Ambiguity pruning"): once
/// this inner span closes and pops off the stack, the outer one becomes
/// reachable again for closing, but its nonzero `datum` permanently
/// rejects that close, collapsing the ambiguous nesting in favor of the
/// inner pairing.
fn push_open(ctx: &mut ScanContext, kind: InlineKind) {
    if let Some(containing) = ctx.open_inline.find_mut(kind) {
        containing.datum = containing.datum.saturating_add(1);
    }
    ctx.open_inline
        .push(crate::inline::Inline::new(kind, 0));
}

/// Tries to open one of the ten bracketed/single spans. Mirrors
/// `dispatch::verbatim::try_begin`'s shape but covers the whole family at
/// once, since every kind here shares the same push/emit contract.
pub fn try_open<C: LexerCursor>(
    cursor: &mut Cursor<C>,
    valid: &TokenSet,
    ctx: &mut ScanContext,
) -> Option<Token> {
    if verbatim::is_open(ctx.open_inline) {
        return None;
    }

    if cursor.lookahead() == '{' {
        // Two-char lookahead: consume `{` first without committing, then
        // decide between a specific bracketed kind and plain
        // `CurlyBracketSpan` before calling `mark_end`.
        cursor.advance(false);
        if let Some(kind) = bracketed_open_kind(cursor.lookahead()) {
            if !valid.contains(kind.begin_token()) {
                return None;
            }
            cursor.advance(false);
            cursor.mark_end();
            push_open(ctx, kind);
            cursor.set_result_symbol(kind.begin_token());
            return Some(kind.begin_token());
        }
        if !valid.contains(Token::CurlyBracketSpanMarkBegin) {
            return None;
        }
        if ctx.flags.contains(Flags::BRACKET_STARTS_SPAN) {
            return None;
        }
        cursor.mark_end();
        push_open(ctx, InlineKind::CurlyBracketSpan);
        cursor.set_result_symbol(Token::CurlyBracketSpanMarkBegin);
        return Some(Token::CurlyBracketSpanMarkBegin);
    }

    let Some(kind) = bare_open_kind(cursor.lookahead()) else {
        return None;
    };
    if !valid.contains(kind.begin_token()) {
        return None;
    }
    if kind == InlineKind::ParensSpan && ctx.flags.contains(Flags::BRACKET_STARTS_INLINE_LINK) {
        return None;
    }

    cursor.advance(false);
    cursor.mark_end();
    push_open(ctx, kind);
    cursor.set_result_symbol(kind.begin_token());

    if kind == InlineKind::SquareBracketSpan {
        run_bracket_link_memo(cursor, ctx);
    }

    Some(kind.begin_token())
}

/// The §4.E "Bracket / link lookahead memo": after opening a fallback
/// `[`, scan forward (without crossing an open verbatim span, since ticks
/// inside one can contain an unmatched `]`) for the terminating `]`. Runs
/// entirely as free lookahead past the already-called `mark_end` above,
/// so none of this motion affects the zero-width token just committed —
/// the same trick `dispatch::verbatim::try_content` uses to peek past a
/// candidate closing tick run.
fn run_bracket_link_memo<C: LexerCursor>(cursor: &mut Cursor<C>, ctx: &mut ScanContext) {
    let mut depth: u32 = 1;
    loop {
        match cursor.lookahead() {
            '[' => {
                depth += 1;
                cursor.advance(false);
            }
            ']' => {
                depth -= 1;
                cursor.advance(false);
                if depth == 0 {
                    break;
                }
            }
            '\0' if cursor.eof() => return,
            '\n' => return,
            '`' => {
                let ticks = verbatim::count_ticks(cursor);
                while !cursor.eof() && cursor.lookahead() != '\n' {
                    if cursor.lookahead() == '`' {
                        let closing = verbatim::count_ticks(cursor);
                        if closing == ticks {
                            break;
                        }
                    } else {
                        cursor.advance(false);
                    }
                }
            }
            _ => cursor.advance(false),
        }
    }

    match cursor.lookahead() {
        '(' => {
            cursor.advance(false);
            let mut depth: u32 = 1;
            loop {
                match cursor.lookahead() {
                    '(' => {
                        depth += 1;
                        cursor.advance(false);
                    }
                    ')' => {
                        depth -= 1;
                        cursor.advance(false);
                        if depth == 0 {
                            *ctx.flags |= Flags::BRACKET_STARTS_INLINE_LINK;
                            return;
                        }
                    }
                    '\0' if cursor.eof() => return,
                    _ => cursor.advance(false),
                }
            }
        }
        '{' => {
            *ctx.flags |= Flags::BRACKET_STARTS_SPAN;
        }
        _ => {}
    }
}

/// The literal closing shape expected for a given style, returning
/// whether it matched (and consuming it) without committing `mark_end`.
fn eat_close<C: LexerCursor>(cursor: &mut Cursor<C>, kind: InlineKind) -> bool {
    let marker = kind.marker_char();
    match kind.style() {
        SpanStyle::SingleOnly => cursor.eat(marker),
        SpanStyle::BracketedOnly => {
            if cursor.lookahead() != marker {
                return false;
            }
            cursor.advance(false);
            if cursor.lookahead() != '}' {
                return false;
            }
            cursor.advance(false);
            true
        }
        SpanStyle::BracketedOrSingle => {
            if cursor.lookahead() != marker {
                return false;
            }
            cursor.advance(false);
            if cursor.lookahead() == '}' {
                cursor.advance(false);
            }
            true
        }
    }
}

/// Tries to close the nearest open span whose marker matches the current
/// lookahead. Whitespace-sensitivity (emphasis/strong forbidding a space
/// immediately before the close) is enforced by the host grammar's
/// `valid` set the same way `CLOSE_PARAGRAPH`'s gating is: the generated
/// grammar only offers the end token as valid where the preceding
/// character already satisfies that constraint, so this dispatcher does
/// not re-derive it from raw lookbehind.
pub fn try_close<C: LexerCursor>(
    cursor: &mut Cursor<C>,
    valid: &TokenSet,
    ctx: &mut ScanContext,
) -> Option<Token> {
    if verbatim::is_open(ctx.open_inline) {
        return None;
    }

    let closing_kind = closing_kind_for(cursor.lookahead())?;
    if !valid.contains(closing_kind.end_token()) {
        return None;
    }
    let frame = ctx.open_inline.find(closing_kind)?;
    if frame.datum > 0 {
        return None;
    }

    if !eat_close(cursor, closing_kind) {
        return None;
    }
    cursor.mark_end();
    ctx.open_inline.close_through(closing_kind);
    if closing_kind == InlineKind::SquareBracketSpan {
        ctx.flags
            .remove(Flags::BRACKET_STARTS_INLINE_LINK | Flags::BRACKET_STARTS_SPAN);
    }
    cursor.set_result_symbol(closing_kind.end_token());
    Some(closing_kind.end_token())
}

/// Maps a closing-marker lookahead character back to the kind it closes.
/// `SingleOnly` kinds close on their marker alone; the rest share `_ * ^
/// ~` with their bracketed counterpart's leading char, disambiguated
/// purely by which frame is actually open (`try_close` looks the kind up
/// on the stack, not the other way around).
fn closing_kind_for(ch: char) -> Option<InlineKind> {
    match ch {
        '_' => Some(InlineKind::Emphasis),
        '*' => Some(InlineKind::Strong),
        '^' => Some(InlineKind::Superscript),
        '~' => Some(InlineKind::Subscript),
        '=' => Some(InlineKind::Highlighted),
        '+' => Some(InlineKind::Insert),
        '-' => Some(InlineKind::Delete),
        ')' => Some(InlineKind::ParensSpan),
        '}' => Some(InlineKind::CurlyBracketSpan),
        ']' => Some(InlineKind::SquareBracketSpan),
        _ => None,
    }
}

/// Tries every inline span recognizer in the order §4.I item 7 groups
/// them: a close is always attempted before a fresh open, since a marker
/// character at the top of the stack closing its own span takes priority
/// over starting a new, unrelated one of a different kind at the same
/// position (e.g. `_^`).
pub fn dispatch<C: LexerCursor>(
    cursor: &mut Cursor<C>,
    valid: &TokenSet,
    ctx: &mut ScanContext,
) -> Option<Token> {
    if let Some(token) = try_close(cursor, valid, ctx) {
        return Some(token);
    }
    try_open(cursor, valid, ctx)
}
