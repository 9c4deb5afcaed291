// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Regex matching and scrollback search over live terminal content.

use pretty_assertions::assert_eq;

use super::fixtures::{term, term_sized};
use crate::search::{RegexFlags, Span};
use crate::selection::{HalfCell, Selection};
use crate::units::AbsRow;

#[test]
fn test_url_match_at_cell() {
    let (mut t, _) = term();
    let tag = t.match_add(r"https?://\S+", RegexFlags::default()).unwrap();
    assert_eq!(tag, 0);
    t.feed(b"see http://example.org now");

    let hit = t.check_at(AbsRow::new(0), 10).unwrap();
    assert_eq!(hit.tag, 0);
    assert_eq!(hit.text, "http://example.org");
    assert_eq!(
        hit.span,
        Span {
            start: (AbsRow::new(0), 4),
            end: (AbsRow::new(0), 22),
        }
    );
    assert!(t.check_at(AbsRow::new(0), 2).is_none());
}

#[test]
fn test_match_cache_survives_repeat_queries_but_not_writes() {
    let (mut t, _) = term();
    t.match_add(r"https?://\S+", RegexFlags::default()).unwrap();
    t.feed(b"http://a.example");
    assert!(t.check_at(AbsRow::new(0), 3).is_some());
    assert!(t.check_at(AbsRow::new(0), 4).is_some());
    // New output invalidates the cached result.
    t.feed(b"\x1b[1;1H\x1b[2Kplain text here");
    assert!(t.check_at(AbsRow::new(0), 3).is_none());
}

#[test]
fn test_match_cursor_hint_travels_with_hit() {
    let (mut t, _) = term();
    t.match_add_with_cursor(r"https?://\S+", RegexFlags::default(), Some("pointer"))
        .unwrap();
    t.feed(b"http://a.example");
    let hit = t.check_at(AbsRow::new(0), 3).unwrap();
    assert_eq!(hit.cursor_hint.as_deref(), Some("pointer"));
}

#[test]
fn test_match_compile_error_surfaces() {
    let (mut t, _) = term();
    assert!(t.match_add("(oops", RegexFlags::default()).is_err());
}

#[test]
fn test_match_spans_soft_wrapped_rows() {
    let (mut t, _) = term_sized(4, 10);
    t.match_add(r"https?://\S+", RegexFlags::default()).unwrap();
    t.feed(b"http://example.org");
    // Wrapped across rows 0 and 1.
    let hit = t.check_at(AbsRow::new(1), 3).unwrap();
    assert_eq!(hit.text, "http://example.org");
    assert_eq!(hit.span.start, (AbsRow::new(0), 0));
    assert_eq!(hit.span.end, (AbsRow::new(1), 8));
}

#[test]
fn test_search_walks_and_wraps() {
    let (mut t, _) = term_sized(3, 20);
    t.feed(b"needle one\r\nfiller\r\nfiller\r\nneedle two\r\nfiller");
    t.set_search("needle", RegexFlags::default()).unwrap();

    // Viewport top is row 2; searching backwards finds the needle in
    // scrollback.
    let back = t.search_next(false).unwrap();
    assert_eq!(back.start.0, AbsRow::new(0));

    // Anchor a selection on the hit and continue forward: the next needle
    // is below.
    let select = |span: Span| {
        Selection::new(
            HalfCell::new(span.start.0, span.start.1 * 2),
            HalfCell::new(span.end.0, span.end.1 * 2),
            false,
        )
    };
    t.set_selection(Some(select(back)));
    let next = t.search_next(true).unwrap();
    assert_eq!(next.start.0, AbsRow::new(3));

    // Forward again from the bottom: nothing below, so the search wraps.
    t.wrap_around = true;
    t.set_selection(Some(select(next)));
    let wrapped = t.search_next(true).unwrap();
    assert_eq!(wrapped.start.0, AbsRow::new(0));

    // Without wrap-around it reports no match instead.
    t.wrap_around = false;
    assert!(t.search_next(true).is_none());
}

#[test]
fn test_word_at_boundaries() {
    let (mut t, _) = term();
    t.feed(b"hello world");
    let word = t.word_at(AbsRow::new(0), 2).unwrap();
    assert_eq!(word.start, (AbsRow::new(0), 0));
    assert_eq!(word.end, (AbsRow::new(0), 5));
    assert!(t.word_at(AbsRow::new(0), 5).is_none(), "space is not a word");
    let second = t.word_at(AbsRow::new(0), 8).unwrap();
    assert_eq!(second.start, (AbsRow::new(0), 6));
}

#[test]
fn test_selection_text_extraction() {
    let (mut t, _) = term();
    t.feed(b"alpha beta\r\ngamma");
    t.set_selection(Some(Selection::new(
        HalfCell::new(AbsRow::new(0), 6 * 2),
        HalfCell::new(AbsRow::new(1), 5 * 2),
        false,
    )));
    assert_eq!(t.selection_text().as_deref(), Some("beta\ngamma"));
}

#[test]
fn test_block_selection_text() {
    let (mut t, _) = term();
    t.feed(b"abcdef\r\nghijkl\r\nmnopqr");
    t.set_selection(Some(Selection::new(
        HalfCell::new(AbsRow::new(0), 1 * 2),
        HalfCell::new(AbsRow::new(2), 4 * 2),
        true,
    )));
    assert_eq!(t.selection_text().as_deref(), Some("bcd\nhij\nnop"));
}
