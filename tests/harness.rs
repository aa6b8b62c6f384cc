use djot_scanner::testing::StrCursor;
use djot_scanner::{LexerCursor, Scanner, Token, TokenSet};
use test_case::test_case;

/// Drives one `scan` call and asserts the token it returned, mirroring the
/// shape of the teacher's own `parse`/`parse_to_ast` harness helpers: one
/// place every scenario test below calls through instead of repeating the
/// same assertion boilerplate at each call site.
fn expect(scanner: &mut Scanner, cursor: &mut StrCursor, valid: &[Token], want: Token) {
    // A real host's lexer is always positioned at the last committed token
    // boundary before it calls into the external scanner; `StrCursor`
    // needs telling explicitly (see `StrCursor::reset_to_mark`).
    cursor.reset_to_mark();
    let set = TokenSet::from_tokens(valid);
    assert!(
        scanner.scan(cursor, &set),
        "expected {want:?}, scan returned false"
    );
    assert_eq!(cursor.result_symbol(), Some(want));
}

/// Scenario: a thematic break is preferred over a dash list marker when
/// both are grammatically valid at the same position, since the marker
/// run continues past where a plain list item's text would start.
#[test]
fn thematic_break_preferred_over_list_marker() {
    let mut scanner = Scanner::new();
    let mut cursor = StrCursor::new("- - -\n");
    expect(
        &mut scanner,
        &mut cursor,
        &[Token::ListMarkerDash, Token::ThematicBreakDash],
        Token::ThematicBreakDash,
    );
    assert_eq!(cursor.remaining(), "\n");
}

/// Scenario: an inline verbatim span opens, consumes its body up to the
/// matching tick run, and closes, without ever touching the block stack.
#[test]
fn verbatim_span_round_trips_through_the_scanner() {
    let mut scanner = Scanner::new();
    let mut cursor = StrCursor::new("`code`");
    expect(&mut scanner, &mut cursor, &[Token::VerbatimBegin], Token::VerbatimBegin);
    expect(&mut scanner, &mut cursor, &[Token::VerbatimContent], Token::VerbatimContent);
    expect(&mut scanner, &mut cursor, &[Token::VerbatimEnd], Token::VerbatimEnd);
    assert_eq!(cursor.remaining(), "");
}

/// Scenario: `"> > "` opens two nested block quotes; the quote markers
/// are the only part of the line the external scanner claims, the rest
/// belongs to the host's own tokenizer.
#[test]
fn nested_block_quote_opens_one_frame_per_marker() {
    let mut scanner = Scanner::new();
    let mut cursor = StrCursor::new("> > q\n");

    expect(
        &mut scanner,
        &mut cursor,
        &[Token::BlockQuoteBegin],
        Token::BlockQuoteBegin,
    );
    expect(
        &mut scanner,
        &mut cursor,
        &[Token::BlockQuoteBegin],
        Token::BlockQuoteBegin,
    );
    assert_eq!(cursor.remaining(), "q\n");
}

/// Scenario: with two block-quote frames already open, end of input
/// evicts one frame per call via `BLOCK_CLOSE` before the final
/// `EOF_OR_NEWLINE`, independent of whatever text and newline preceded it.
#[test]
fn open_block_quotes_close_one_frame_per_call_at_eof() {
    let mut scanner = Scanner::new();
    let mut cursor = StrCursor::new("> > ");
    expect(
        &mut scanner,
        &mut cursor,
        &[Token::BlockQuoteBegin],
        Token::BlockQuoteBegin,
    );
    expect(
        &mut scanner,
        &mut cursor,
        &[Token::BlockQuoteBegin],
        Token::BlockQuoteBegin,
    );

    let mut eof_cursor = StrCursor::new("");
    expect(
        &mut scanner,
        &mut eof_cursor,
        &[Token::BlockClose],
        Token::BlockClose,
    );
    expect(
        &mut scanner,
        &mut eof_cursor,
        &[Token::BlockClose],
        Token::BlockClose,
    );
    expect(
        &mut scanner,
        &mut eof_cursor,
        &[Token::EofOrNewline],
        Token::EofOrNewline,
    );
}

/// Scenario: a div opens on the `:::` fence alone, leaving the class name
/// and its leading space to the host's own tokenizer.
#[test]
fn div_begin_consumes_only_the_fence() {
    let mut scanner = Scanner::new();
    let mut cursor = StrCursor::new("::: note\n");
    expect(&mut scanner, &mut cursor, &[Token::DivBegin], Token::DivBegin);
    assert_eq!(cursor.remaining(), " note\n");
}

/// The three bullet-marker families each open a plain list item on
/// `marker` + a single space, leaving the item's own text to the host.
#[test_case("- text", Token::ListMarkerDash; "dash marker")]
#[test_case("* text", Token::ListMarkerStar; "star marker")]
#[test_case("+ text", Token::ListMarkerPlus; "plus marker")]
fn bullet_marker_opens_a_list_item(input: &str, marker: Token) {
    let mut scanner = Scanner::new();
    let mut cursor = StrCursor::new(input);
    expect(&mut scanner, &mut cursor, &[marker], marker);
    assert_eq!(cursor.remaining(), "text");
}

/// Scenario: a table row opens on its leading `|`, each interior `|`
/// closes the current cell, and the row's own newline is claimed by
/// `TABLE_ROW_END_NEWLINE` rather than falling through to a plain
/// `NEWLINE` (§4.F: "tried first if the top frame is `TableRow`").
#[test]
fn table_row_closes_its_cells_then_its_own_newline() {
    let mut scanner = Scanner::new();
    let mut cursor = StrCursor::new("|a|b|\n");
    expect(
        &mut scanner,
        &mut cursor,
        &[Token::TableHeaderBegin, Token::TableRowBegin, Token::TableSeparatorBegin],
        Token::TableHeaderBegin,
    );
    assert_eq!(cursor.remaining(), "a|b|\n");

    // Advance the host's own tokenizer past the cell text by hand, then
    // hand the pipe back to the scanner: each manual `advance` mimics the
    // host's own text token committing past the cell body, recorded as a
    // new mark exactly as a real host's lexer would leave it.
    cursor.reset_to_mark();
    for _ in 0.."a".len() {
        cursor.advance(false);
    }
    cursor.mark_end();
    expect(&mut scanner, &mut cursor, &[Token::TableCellEnd], Token::TableCellEnd);
    assert_eq!(cursor.remaining(), "b|\n");

    cursor.reset_to_mark();
    for _ in 0.."b".len() {
        cursor.advance(false);
    }
    cursor.mark_end();
    expect(&mut scanner, &mut cursor, &[Token::TableCellEnd], Token::TableCellEnd);
    assert_eq!(cursor.remaining(), "\n");

    expect(
        &mut scanner,
        &mut cursor,
        &[Token::TableRowEndNewline, Token::Newline],
        Token::TableRowEndNewline,
    );
    assert_eq!(cursor.remaining(), "");
}
