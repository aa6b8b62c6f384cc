//! The flat token enumeration this scanner emits (§6) and the two small
//! closed-set enums backing the block/inline stacks (§3).
//!
//! `Token`'s numeric values are part of the contract with the host's
//! generated grammar ("Their numeric values must match the grammar's
//! `externals` declaration", §6), so variants are never reordered once
//! assigned; new tokens are always appended.

/// One of the ~70 codes the scanner can hand back to the host via
/// [`crate::cursor::LexerCursor::set_result_symbol`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Token {
    Error = 0,
    BlockClose,
    CloseParagraph,
    Newline,
    NewlineInline,
    EofOrNewline,

    BlockQuoteBegin,
    BlockQuoteContinuation,

    HeadingBegin,
    HeadingContinuation,

    DivBegin,
    DivEnd,

    CodeBlockBegin,
    CodeBlockEnd,

    ListItemEnd,
    ListMarkerDash,
    ListMarkerStar,
    ListMarkerPlus,
    ListMarkerTaskBegin,
    ListMarkerDefinition,
    ListMarkerOrderedDecimalPeriod,
    ListMarkerOrderedDecimalParen,
    ListMarkerOrderedDecimalParens,
    ListMarkerOrderedLowerAlphaPeriod,
    ListMarkerOrderedLowerAlphaParen,
    ListMarkerOrderedLowerAlphaParens,
    ListMarkerOrderedUpperAlphaPeriod,
    ListMarkerOrderedUpperAlphaParen,
    ListMarkerOrderedUpperAlphaParens,
    ListMarkerOrderedLowerRomanPeriod,
    ListMarkerOrderedLowerRomanParen,
    ListMarkerOrderedLowerRomanParens,
    ListMarkerOrderedUpperRomanPeriod,
    ListMarkerOrderedUpperRomanParen,
    ListMarkerOrderedUpperRomanParens,

    ThematicBreakDash,
    ThematicBreakStar,

    FrontmatterMarker,

    FootnoteMarkBegin,
    FootnoteEnd,

    LinkRefDefMarkBegin,
    LinkRefDefLabelEnd,

    TableHeaderBegin,
    TableSeparatorBegin,
    TableRowBegin,
    TableCellEnd,
    TableRowEndNewline,

    TableCaptionBegin,
    TableCaptionEnd,

    BlockAttributeBegin,
    InlineCommentBegin,

    EmphasisMarkBegin,
    EmphasisEnd,
    StrongMarkBegin,
    StrongEnd,
    SuperscriptMarkBegin,
    SuperscriptEnd,
    SubscriptMarkBegin,
    SubscriptEnd,
    HighlightedMarkBegin,
    HighlightedEnd,
    InsertMarkBegin,
    InsertEnd,
    DeleteMarkBegin,
    DeleteEnd,
    ParensSpanMarkBegin,
    ParensSpanEnd,
    CurlyBracketSpanMarkBegin,
    CurlyBracketSpanEnd,
    SquareBracketSpanMarkBegin,
    SquareBracketSpanEnd,

    VerbatimBegin,
    VerbatimContent,
    VerbatimEnd,

    HardLineBreak,
}

/// Number of token codes in [`Token`]. Kept in lockstep with the enum by
/// the exhaustive match in [`Token::all`].
pub const TOKEN_COUNT: usize = 75;

impl Token {
    pub fn index(self) -> usize {
        self as u16 as usize
    }

    /// Inverse of [`Token::index`], for decoding the serialized state
    /// (§4.H). `None` for any value outside the current token set.
    pub fn from_index(index: usize) -> Option<Token> {
        Token::all().get(index).copied()
    }

    /// All token variants, in declaration order. Used by tests and by
    /// `TokenSet` construction helpers.
    pub fn all() -> [Token; TOKEN_COUNT] {
        use Token::*;
        [
            Error,
            BlockClose,
            CloseParagraph,
            Newline,
            NewlineInline,
            EofOrNewline,
            BlockQuoteBegin,
            BlockQuoteContinuation,
            HeadingBegin,
            HeadingContinuation,
            DivBegin,
            DivEnd,
            CodeBlockBegin,
            CodeBlockEnd,
            ListItemEnd,
            ListMarkerDash,
            ListMarkerStar,
            ListMarkerPlus,
            ListMarkerTaskBegin,
            ListMarkerDefinition,
            ListMarkerOrderedDecimalPeriod,
            ListMarkerOrderedDecimalParen,
            ListMarkerOrderedDecimalParens,
            ListMarkerOrderedLowerAlphaPeriod,
            ListMarkerOrderedLowerAlphaParen,
            ListMarkerOrderedLowerAlphaParens,
            ListMarkerOrderedUpperAlphaPeriod,
            ListMarkerOrderedUpperAlphaParen,
            ListMarkerOrderedUpperAlphaParens,
            ListMarkerOrderedLowerRomanPeriod,
            ListMarkerOrderedLowerRomanParen,
            ListMarkerOrderedLowerRomanParens,
            ListMarkerOrderedUpperRomanPeriod,
            ListMarkerOrderedUpperRomanParen,
            ListMarkerOrderedUpperRomanParens,
            ThematicBreakDash,
            ThematicBreakStar,
            FrontmatterMarker,
            FootnoteMarkBegin,
            FootnoteEnd,
            LinkRefDefMarkBegin,
            LinkRefDefLabelEnd,
            TableHeaderBegin,
            TableSeparatorBegin,
            TableRowBegin,
            TableCellEnd,
            TableRowEndNewline,
            TableCaptionBegin,
            TableCaptionEnd,
            BlockAttributeBegin,
            InlineCommentBegin,
            EmphasisMarkBegin,
            EmphasisEnd,
            StrongMarkBegin,
            StrongEnd,
            SuperscriptMarkBegin,
            SuperscriptEnd,
            SubscriptMarkBegin,
            SubscriptEnd,
            HighlightedMarkBegin,
            HighlightedEnd,
            InsertMarkBegin,
            InsertEnd,
            DeleteMarkBegin,
            DeleteEnd,
            ParensSpanMarkBegin,
            ParensSpanEnd,
            CurlyBracketSpanMarkBegin,
            CurlyBracketSpanEnd,
            SquareBracketSpanMarkBegin,
            SquareBracketSpanEnd,
            VerbatimBegin,
            VerbatimContent,
            VerbatimEnd,
            HardLineBreak,
        ]
    }
}

/// A bit-set over [`Token`], standing in for the host's
/// `valid_symbols: &[bool]` array (§6). Stored as a single `u128` since
/// [`TOKEN_COUNT`] comfortably fits below 128.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenSet(u128);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    pub fn new() -> Self {
        Self::EMPTY
    }

    pub fn from_tokens(tokens: &[Token]) -> Self {
        let mut set = Self::EMPTY;
        for &token in tokens {
            set.insert(token);
        }
        set
    }

    pub fn insert(&mut self, token: Token) {
        self.0 |= 1u128 << token.index();
    }

    pub fn contains(&self, token: Token) -> bool {
        self.0 & (1u128 << token.index()) != 0
    }

    pub fn any(&self, tokens: &[Token]) -> bool {
        tokens.iter().any(|&t| self.contains(t))
    }
}

impl FromIterator<Token> for TokenSet {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for token in iter {
            set.insert(token);
        }
        set
    }
}

/// The block-level container kinds from §3. `List` carries the marker
/// family as data rather than being split into 20 flat variants, but the
/// mapping from a list-marker [`Token`] to a [`ListMarkerKind`] is still a
/// total function, per the design note in §9.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    BlockQuote,
    CodeBlock,
    Div,
    Section,
    Heading,
    Footnote,
    LinkRefDef,
    TableRow,
    TableCaption,
    List(ListMarkerKind),
}

/// The 20 list-marker families from §3: five "simple" families and 15
/// ordered-numeral families (5 numeral kinds × 3 punctuation styles).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListMarkerKind {
    Dash,
    Star,
    Plus,
    Task,
    Definition,
    Ordered(OrderedNumeral, OrderedStyle),
}

/// Tie-break order when a marker like `i.` is ambiguous between a roman
/// numeral and a letter: decimal first, then roman is preferred over
/// alpha, and case distinguishes within a family (§4.D "Lists").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OrderedNumeral {
    Decimal,
    LowerRoman,
    UpperRoman,
    LowerAlpha,
    UpperAlpha,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrderedStyle {
    /// `1.`
    Period,
    /// `1)`
    SingleParen,
    /// `(1)`
    WrappingParens,
}

/// Canonical order of the 20 list-marker families, used to encode/decode
/// a [`ListMarkerKind`] as a single byte in the serialized state (§4.H).
const ALL_LIST_MARKER_KINDS: [ListMarkerKind; 20] = {
    use OrderedNumeral::*;
    use OrderedStyle::*;
    [
        ListMarkerKind::Dash,
        ListMarkerKind::Star,
        ListMarkerKind::Plus,
        ListMarkerKind::Task,
        ListMarkerKind::Definition,
        ListMarkerKind::Ordered(Decimal, Period),
        ListMarkerKind::Ordered(Decimal, SingleParen),
        ListMarkerKind::Ordered(Decimal, WrappingParens),
        ListMarkerKind::Ordered(LowerAlpha, Period),
        ListMarkerKind::Ordered(LowerAlpha, SingleParen),
        ListMarkerKind::Ordered(LowerAlpha, WrappingParens),
        ListMarkerKind::Ordered(UpperAlpha, Period),
        ListMarkerKind::Ordered(UpperAlpha, SingleParen),
        ListMarkerKind::Ordered(UpperAlpha, WrappingParens),
        ListMarkerKind::Ordered(LowerRoman, Period),
        ListMarkerKind::Ordered(LowerRoman, SingleParen),
        ListMarkerKind::Ordered(LowerRoman, WrappingParens),
        ListMarkerKind::Ordered(UpperRoman, Period),
        ListMarkerKind::Ordered(UpperRoman, SingleParen),
        ListMarkerKind::Ordered(UpperRoman, WrappingParens),
    ]
};

impl ListMarkerKind {
    /// Position of this family in [`ALL_LIST_MARKER_KINDS`].
    pub fn to_index(self) -> u8 {
        ALL_LIST_MARKER_KINDS
            .iter()
            .position(|&kind| kind == self)
            .expect("every ListMarkerKind appears in ALL_LIST_MARKER_KINDS") as u8
    }

    pub fn from_index(index: u8) -> Option<ListMarkerKind> {
        ALL_LIST_MARKER_KINDS.get(index as usize).copied()
    }

    /// The begin token a marker of this family emits. Total over the 20
    /// families, as required by §9.
    pub fn marker_token(self) -> Token {
        use OrderedNumeral::*;
        use OrderedStyle::*;
        match self {
            ListMarkerKind::Dash => Token::ListMarkerDash,
            ListMarkerKind::Star => Token::ListMarkerStar,
            ListMarkerKind::Plus => Token::ListMarkerPlus,
            ListMarkerKind::Task => Token::ListMarkerTaskBegin,
            ListMarkerKind::Definition => Token::ListMarkerDefinition,
            ListMarkerKind::Ordered(Decimal, Period) => Token::ListMarkerOrderedDecimalPeriod,
            ListMarkerKind::Ordered(Decimal, SingleParen) => Token::ListMarkerOrderedDecimalParen,
            ListMarkerKind::Ordered(Decimal, WrappingParens) => {
                Token::ListMarkerOrderedDecimalParens
            }
            ListMarkerKind::Ordered(LowerAlpha, Period) => Token::ListMarkerOrderedLowerAlphaPeriod,
            ListMarkerKind::Ordered(LowerAlpha, SingleParen) => {
                Token::ListMarkerOrderedLowerAlphaParen
            }
            ListMarkerKind::Ordered(LowerAlpha, WrappingParens) => {
                Token::ListMarkerOrderedLowerAlphaParens
            }
            ListMarkerKind::Ordered(UpperAlpha, Period) => Token::ListMarkerOrderedUpperAlphaPeriod,
            ListMarkerKind::Ordered(UpperAlpha, SingleParen) => {
                Token::ListMarkerOrderedUpperAlphaParen
            }
            ListMarkerKind::Ordered(UpperAlpha, WrappingParens) => {
                Token::ListMarkerOrderedUpperAlphaParens
            }
            ListMarkerKind::Ordered(LowerRoman, Period) => Token::ListMarkerOrderedLowerRomanPeriod,
            ListMarkerKind::Ordered(LowerRoman, SingleParen) => {
                Token::ListMarkerOrderedLowerRomanParen
            }
            ListMarkerKind::Ordered(LowerRoman, WrappingParens) => {
                Token::ListMarkerOrderedLowerRomanParens
            }
            ListMarkerKind::Ordered(UpperRoman, Period) => Token::ListMarkerOrderedUpperRomanPeriod,
            ListMarkerKind::Ordered(UpperRoman, SingleParen) => {
                Token::ListMarkerOrderedUpperRomanParen
            }
            ListMarkerKind::Ordered(UpperRoman, WrappingParens) => {
                Token::ListMarkerOrderedUpperRomanParens
            }
        }
    }
}

/// The inline span kinds from §3.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InlineKind {
    Verbatim,
    Emphasis,
    Strong,
    Superscript,
    Subscript,
    Highlighted,
    Insert,
    Delete,
    ParensSpan,
    CurlyBracketSpan,
    SquareBracketSpan,
}

impl InlineKind {
    pub fn marker_char(self) -> char {
        match self {
            InlineKind::Verbatim => '`',
            InlineKind::Emphasis => '_',
            InlineKind::Strong => '*',
            InlineKind::Superscript => '^',
            InlineKind::Subscript => '~',
            InlineKind::Highlighted => '=',
            InlineKind::Insert => '+',
            InlineKind::Delete => '-',
            InlineKind::ParensSpan => ')',
            InlineKind::CurlyBracketSpan => '}',
            InlineKind::SquareBracketSpan => ']',
        }
    }

    pub fn begin_token(self) -> Token {
        match self {
            InlineKind::Verbatim => Token::VerbatimBegin,
            InlineKind::Emphasis => Token::EmphasisMarkBegin,
            InlineKind::Strong => Token::StrongMarkBegin,
            InlineKind::Superscript => Token::SuperscriptMarkBegin,
            InlineKind::Subscript => Token::SubscriptMarkBegin,
            InlineKind::Highlighted => Token::HighlightedMarkBegin,
            InlineKind::Insert => Token::InsertMarkBegin,
            InlineKind::Delete => Token::DeleteMarkBegin,
            InlineKind::ParensSpan => Token::ParensSpanMarkBegin,
            InlineKind::CurlyBracketSpan => Token::CurlyBracketSpanMarkBegin,
            InlineKind::SquareBracketSpan => Token::SquareBracketSpanMarkBegin,
        }
    }

    pub fn end_token(self) -> Token {
        match self {
            InlineKind::Verbatim => Token::VerbatimEnd,
            InlineKind::Emphasis => Token::EmphasisEnd,
            InlineKind::Strong => Token::StrongEnd,
            InlineKind::Superscript => Token::SuperscriptEnd,
            InlineKind::Subscript => Token::SubscriptEnd,
            InlineKind::Highlighted => Token::HighlightedEnd,
            InlineKind::Insert => Token::InsertEnd,
            InlineKind::Delete => Token::DeleteEnd,
            InlineKind::ParensSpan => Token::ParensSpanEnd,
            InlineKind::CurlyBracketSpan => Token::CurlyBracketSpanEnd,
            InlineKind::SquareBracketSpan => Token::SquareBracketSpanEnd,
        }
    }

    /// "bracketed-or-single", "bracketed-only", or "single-only" per the
    /// span-style column in §4.E.
    pub fn style(self) -> SpanStyle {
        match self {
            InlineKind::Emphasis | InlineKind::Superscript | InlineKind::Subscript => {
                SpanStyle::BracketedOrSingle
            }
            InlineKind::Strong => SpanStyle::BracketedOrSingle,
            InlineKind::Highlighted | InlineKind::Insert | InlineKind::Delete => {
                SpanStyle::BracketedOnly
            }
            InlineKind::ParensSpan
            | InlineKind::CurlyBracketSpan
            | InlineKind::SquareBracketSpan => SpanStyle::SingleOnly,
            InlineKind::Verbatim => SpanStyle::SingleOnly,
        }
    }

    /// Whitespace-sensitivity of the closer, per the table in §4.E: a
    /// plain-character close cannot be preceded by whitespace for the
    /// emphasis-family markers.
    pub fn whitespace_sensitive(self) -> bool {
        matches!(self, InlineKind::Emphasis | InlineKind::Strong)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpanStyle {
    BracketedOrSingle,
    BracketedOnly,
    SingleOnly,
}
