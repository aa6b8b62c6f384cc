//! The inline stack (§4.C), generalizing `intl_markdown::delimiter`'s
//! per-kind delimiter structs (`EmphasisDelimiter`, `StrikethroughDelimiter`)
//! and `tree-sitter-djot-inline/src/scanner.c`'s single-purpose
//! `verbatim_tick_count` register into one closed `InlineKind` set whose
//! frames each carry one `datum` byte.

use crate::token::InlineKind;

/// One open inline span. `datum` is the tick count for `Verbatim` spans
/// (how many backticks opened it, so the matching closer must have the
/// same count) and a fallback/ambiguity counter for every other kind
/// (§4.E: "a per-frame fallback counter prunes spans that can never
/// close without crossing a block boundary").
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Inline {
    pub kind: InlineKind,
    pub datum: u8,
}

impl Inline {
    pub fn new(kind: InlineKind, datum: u8) -> Self {
        Inline { kind, datum }
    }
}

/// Mirrors [`crate::block::MAX_DEPTH`] — both stacks share the 255-frame
/// ceiling of the serialized format's single length byte (§4.H).
pub const MAX_DEPTH: usize = 255;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InlineStack {
    frames: Vec<Inline>,
}

impl InlineStack {
    pub fn new() -> Self {
        InlineStack { frames: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn push(&mut self, inline: Inline) -> bool {
        if self.frames.len() >= MAX_DEPTH {
            return false;
        }
        self.frames.push(inline);
        true
    }

    pub fn pop(&mut self) -> Option<Inline> {
        self.frames.pop()
    }

    pub fn peek(&self) -> Option<&Inline> {
        self.frames.last()
    }

    pub fn peek_mut(&mut self) -> Option<&mut Inline> {
        self.frames.last_mut()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Inline> {
        self.frames.iter()
    }

    /// Nearest open span of `kind`, searching from the top, for the
    /// close-search in the inline dispatcher (§4.E).
    pub fn find(&self, kind: InlineKind) -> Option<&Inline> {
        self.frames.iter().rev().find(|span| span.kind == kind)
    }

    /// Mutable counterpart of [`Self::find`], for bumping the fallback
    /// counter of the nearest open span of `kind` when a nested span of the
    /// same kind opens inside it (§4.E ambiguity pruning).
    pub fn find_mut(&mut self, kind: InlineKind) -> Option<&mut Inline> {
        self.frames.iter_mut().rev().find(|span| span.kind == kind)
    }

    /// Pops spans from the top down to (and including) the nearest frame
    /// of `kind`, returning whether one was found and closed.
    pub fn close_through(&mut self, kind: InlineKind) -> bool {
        match self.frames.iter().rev().position(|span| span.kind == kind) {
            Some(distance_from_top) => {
                let new_len = self.frames.len() - distance_from_top - 1;
                self.frames.truncate(new_len);
                true
            }
            None => false,
        }
    }

    /// Clears every open span, used when a block boundary is crossed and
    /// no inline span may remain open across it (§4.C invariant).
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
