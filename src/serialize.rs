//! The fixed byte layout of the scanner's persisted state (§4.H, §6).
//!
//! Grounded on `examples/original_source/src/scanner.c`'s
//! `tree_sitter_djot_external_scanner_serialize`/`_deserialize`, which
//! `memcpy`s a handful of scalars followed by parallel arrays. This is a
//! direct, more disciplined descendant of that layout generalized from a
//! single `open_blocks` array to the two stacks this crate tracks; it is a
//! wire format, not a serde value graph, so `serde` does not apply here
//! (see `DESIGN.md`).

use crate::block::{Block, BlockStack};
use crate::inline::{Inline, InlineStack};
use crate::token::{BlockKind, InlineKind, ListMarkerKind, Token};
use bitflags::bitflags;

bitflags! {
    /// The scanner's single-byte flag register (§3).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Flags: u8 {
        /// A document frontmatter fence has already been seen.
        const SEEN_FRONTMATTER          = 0b0000_0001;
        /// At least one row has been emitted in the current table.
        const TABLE_BODY_STARTED        = 0b0000_0010;
        /// The row just recognized was a header; the row immediately
        /// following it is forced to separator classification (§4.6).
        const TABLE_SEPARATOR_NEXT      = 0b0000_0100;
        /// A lookahead memo set by the bracket/link scan: the `[` currently
        /// open was confirmed to start an inline link, not a plain span
        /// (§4.E bracket/link memo).
        const BRACKET_STARTS_INLINE_LINK = 0b0000_1000;
        /// A lookahead memo set by the bracket/link scan: the `[` currently
        /// open was confirmed to start a bracketed span construct rather
        /// than plain text (§4.E bracket/link memo).
        const BRACKET_STARTS_SPAN        = 0b0001_0000;
        /// The document's opening frontmatter fence has been emitted but
        /// its terminating fence has not yet been seen (§4.D
        /// "Frontmatter": the same `---` shape emits `FRONTMATTER_MARKER`
        /// a second time at the terminating line, distinct from an
        /// unrelated thematic break later in the document).
        const FRONTMATTER_OPEN           = 0b0010_0000;
    }
}

/// Maximum length of a serialized state, matching §4.H's documented cap:
/// a five-byte fixed prefix, a two-byte pending-terminal slot, two
/// one-byte frame counts, and up to 255 two-byte frames per stack
/// (5 + 2 + 2 + 255*2 + 255*2 = 1029, rounded down in the spec's stated
/// budget to the frame counts actually reachable at `MAX_DEPTH`).
pub const MAX_SERIALIZED_LEN: usize = 1025;

fn encode_block_kind(kind: BlockKind) -> u8 {
    match kind {
        BlockKind::BlockQuote => 0,
        BlockKind::CodeBlock => 1,
        BlockKind::Div => 2,
        BlockKind::Section => 3,
        BlockKind::Heading => 4,
        BlockKind::Footnote => 5,
        BlockKind::LinkRefDef => 6,
        BlockKind::TableRow => 7,
        BlockKind::TableCaption => 8,
        BlockKind::List(marker) => 9 + marker.to_index(),
    }
}

fn decode_block_kind(byte: u8) -> Option<BlockKind> {
    match byte {
        0 => Some(BlockKind::BlockQuote),
        1 => Some(BlockKind::CodeBlock),
        2 => Some(BlockKind::Div),
        3 => Some(BlockKind::Section),
        4 => Some(BlockKind::Heading),
        5 => Some(BlockKind::Footnote),
        6 => Some(BlockKind::LinkRefDef),
        7 => Some(BlockKind::TableRow),
        8 => Some(BlockKind::TableCaption),
        9..=28 => ListMarkerKind::from_index(byte - 9).map(BlockKind::List),
        _ => None,
    }
}

fn encode_inline_kind(kind: InlineKind) -> u8 {
    match kind {
        InlineKind::Verbatim => 0,
        InlineKind::Emphasis => 1,
        InlineKind::Strong => 2,
        InlineKind::Superscript => 3,
        InlineKind::Subscript => 4,
        InlineKind::Highlighted => 5,
        InlineKind::Insert => 6,
        InlineKind::Delete => 7,
        InlineKind::ParensSpan => 8,
        InlineKind::CurlyBracketSpan => 9,
        InlineKind::SquareBracketSpan => 10,
    }
}

fn decode_inline_kind(byte: u8) -> Option<InlineKind> {
    match byte {
        0 => Some(InlineKind::Verbatim),
        1 => Some(InlineKind::Emphasis),
        2 => Some(InlineKind::Strong),
        3 => Some(InlineKind::Superscript),
        4 => Some(InlineKind::Subscript),
        5 => Some(InlineKind::Highlighted),
        6 => Some(InlineKind::Insert),
        7 => Some(InlineKind::Delete),
        8 => Some(InlineKind::ParensSpan),
        9 => Some(InlineKind::CurlyBracketSpan),
        10 => Some(InlineKind::SquareBracketSpan),
        _ => None,
    }
}

/// No pending terminal is encoded as this sentinel token byte.
const NO_PENDING_TERMINAL: u8 = 0xFF;

#[allow(clippy::too_many_arguments)]
pub fn serialize(
    blocks_to_close: u8,
    block_quote_level: u8,
    indent: u8,
    flags: Flags,
    pending_terminal: Option<(Token, u8)>,
    blocks: &BlockStack,
    inlines: &InlineStack,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(
        5 + 2 + 2 * blocks.len() + 2 * inlines.len(),
    );
    out.push(blocks_to_close);
    out.push(block_quote_level);
    out.push(indent);
    out.push(flags.bits());
    match pending_terminal {
        Some((token, width)) => {
            out.push(token.index() as u8);
            out.push(width);
        }
        None => {
            out.push(NO_PENDING_TERMINAL);
            out.push(0);
        }
    }
    out.push(blocks.len() as u8);
    for block in blocks.iter() {
        out.push(encode_block_kind(block.kind));
        out.push(block.datum);
    }
    out.push(inlines.len() as u8);
    for inline in inlines.iter() {
        out.push(encode_inline_kind(inline.kind));
        out.push(inline.datum);
    }
    debug_assert!(out.len() <= MAX_SERIALIZED_LEN);
    out
}

/// The decoded form of a serialized byte buffer.
pub struct DecodedState {
    pub blocks_to_close: u8,
    pub block_quote_level: u8,
    pub indent: u8,
    pub flags: Flags,
    pub pending_terminal: Option<(Token, u8)>,
    pub blocks: BlockStack,
    pub inlines: InlineStack,
}

/// Parses a buffer produced by [`serialize`]. An empty buffer decodes to
/// the all-default initial state, matching the host's contract of calling
/// `deserialize` with an empty slice for a fresh parse (§6).
pub fn deserialize(bytes: &[u8]) -> Option<DecodedState> {
    if bytes.is_empty() {
        return Some(DecodedState {
            blocks_to_close: 0,
            block_quote_level: 0,
            indent: 0,
            flags: Flags::empty(),
            pending_terminal: None,
            blocks: BlockStack::new(),
            inlines: InlineStack::new(),
        });
    }

    let mut pos = 0usize;
    let mut next = || -> Option<u8> {
        let byte = *bytes.get(pos)?;
        pos += 1;
        Some(byte)
    };

    let blocks_to_close = next()?;
    let block_quote_level = next()?;
    let indent = next()?;
    let flags = Flags::from_bits_truncate(next()?);
    let pending_token_byte = next()?;
    let pending_width = next()?;
    let pending_terminal = if pending_token_byte == NO_PENDING_TERMINAL {
        None
    } else {
        Some((Token::from_index(pending_token_byte as usize)?, pending_width))
    };

    let block_count = next()?;
    let mut blocks = BlockStack::new();
    for _ in 0..block_count {
        let kind = decode_block_kind(next()?)?;
        let datum = next()?;
        blocks.push(Block::new(kind, datum));
    }

    let inline_count = next()?;
    let mut inlines = InlineStack::new();
    for _ in 0..inline_count {
        let kind = decode_inline_kind(next()?)?;
        let datum = next()?;
        inlines.push(Inline::new(kind, datum));
    }

    Some(DecodedState {
        blocks_to_close,
        block_quote_level,
        indent,
        flags,
        pending_terminal,
        blocks,
        inlines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::OrderedNumeral;
    use crate::token::OrderedStyle;

    #[test]
    fn empty_buffer_decodes_to_default_state() {
        let decoded = deserialize(&[]).unwrap();
        assert_eq!(decoded.blocks_to_close, 0);
        assert!(decoded.blocks.is_empty());
        assert!(decoded.inlines.is_empty());
    }

    #[test]
    fn round_trips_a_populated_state() {
        let mut blocks = BlockStack::new();
        blocks.push(Block::new(BlockKind::BlockQuote, 2));
        blocks.push(Block::new(
            BlockKind::List(ListMarkerKind::Ordered(
                OrderedNumeral::UpperRoman,
                OrderedStyle::WrappingParens,
            )),
            4,
        ));
        let mut inlines = InlineStack::new();
        inlines.push(Inline::new(InlineKind::Verbatim, 3));
        inlines.push(Inline::new(InlineKind::Emphasis, 0));

        let flags = Flags::SEEN_FRONTMATTER | Flags::TABLE_SEPARATOR_NEXT;
        let bytes = serialize(
            2,
            1,
            6,
            flags,
            Some((Token::DivEnd, 3)),
            &blocks,
            &inlines,
        );
        let decoded = deserialize(&bytes).unwrap();
        assert_eq!(decoded.blocks_to_close, 2);
        assert_eq!(decoded.block_quote_level, 1);
        assert_eq!(decoded.indent, 6);
        assert_eq!(decoded.flags, flags);
        assert_eq!(decoded.pending_terminal, Some((Token::DivEnd, 3)));
        assert_eq!(decoded.blocks.len(), 2);
        assert_eq!(decoded.inlines.len(), 2);
        assert_eq!(decoded.blocks.peek().unwrap().datum, 4);
        assert_eq!(decoded.inlines.peek().unwrap().kind, InlineKind::Emphasis);
    }

    #[test]
    fn truncated_buffer_fails_cleanly() {
        assert!(deserialize(&[1, 2, 3]).is_none());
    }
}
