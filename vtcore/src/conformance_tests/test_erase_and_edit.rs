// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Erase, insert/delete and scroll-region behaviour, including the erase
//! colour contract.

use pretty_assertions::assert_eq;

use super::fixtures::{term, term_sized, text};
use crate::color::CellColor;
use crate::units::AbsRow;

#[test]
fn test_erase_line_uses_current_background() {
    let (mut t, _) = term();
    t.feed(b"abcdef\x1b[44m\x1b[3G\x1b[K");
    let row = t.state().screen().row(0).unwrap().clone();
    assert_eq!(text(&t, 0), "ab");
    // Erased cells carry the SGR background, an erased marker, no fragment.
    for col in 2..6 {
        let cell = row.cells[col];
        assert!(cell.is_erased(), "col {col}");
        assert!(!cell.is_fragment());
        assert_eq!(cell.columns(), 1);
        assert_eq!(cell.colors.back(), CellColor::Palette(4));
    }
    // The cursor did not move.
    assert_eq!(t.cursor(), (AbsRow::new(0), 2));
}

#[test]
fn test_erase_display_variants() {
    let (mut t, _) = term_sized(4, 10);
    t.feed(b"aaa\r\nbbb\r\nccc\r\nddd");
    // Cursor to row 1 col 2, erase to end of display.
    t.feed(b"\x1b[2;2H\x1b[0J");
    assert_eq!(text(&t, 0), "aaa");
    assert_eq!(text(&t, 1), "b");
    assert_eq!(text(&t, 2), "");
    assert_eq!(text(&t, 3), "");

    let (mut t, _) = term_sized(4, 10);
    t.feed(b"aaa\r\nbbb\r\nccc\r\nddd");
    t.feed(b"\x1b[2;2H\x1b[1J");
    assert_eq!(text(&t, 0), "");
    assert_eq!(text(&t, 1), "  b");
    assert_eq!(text(&t, 2), "ccc");
}

#[test]
fn test_erase_scrollback_with_ed3() {
    let (mut t, _) = term_sized(2, 10);
    t.feed(b"one\r\ntwo\r\nthree");
    assert!(t.read_row(AbsRow::new(0)).is_some());
    t.feed(b"\x1b[3J");
    // History is gone; the visible screen stays.
    assert_eq!(text(&t, 0), "two");
    assert!(t.read_row(AbsRow::new(0)).is_none());
}

#[test]
fn test_ech_erases_without_shifting() {
    let (mut t, _) = term();
    t.feed(b"abcdef\x1b[2G\x1b[3X");
    assert_eq!(text(&t, 0), "a   ef");
}

#[test]
fn test_ich_and_dch_shift_within_line() {
    let (mut t, _) = term();
    t.feed(b"abcdef\x1b[1G\x1b[2@");
    assert_eq!(text(&t, 0), "  abcdef");
    t.feed(b"\x1b[1G\x1b[2P");
    assert_eq!(text(&t, 0), "abcdef");
}

#[test]
fn test_wide_glyph_never_leaves_lone_fragment() {
    let (mut t, _) = term();
    t.feed("語".as_bytes());
    // Erase only the head cell; the fragment must go too.
    t.feed(b"\x1b[1G\x1b[1X");
    let row = t.state().screen().row(0).unwrap().clone();
    assert!(row.cells[0].is_erased());
    assert!(!row.cells[1].is_fragment());
    assert!(row.cells[1].is_erased());
}

#[test]
fn test_insert_and_delete_lines_respect_region() {
    let (mut t, _) = term_sized(4, 10);
    t.feed(b"aaa\r\nbbb\r\nccc\r\nddd");
    // Region rows 2..3 (1-based), cursor to region top, delete one line.
    t.feed(b"\x1b[2;3r\x1b[2;1H\x1b[M");
    assert_eq!(text(&t, 0), "aaa");
    assert_eq!(text(&t, 1), "ccc");
    assert_eq!(text(&t, 2), "");
    assert_eq!(text(&t, 3), "ddd");

    t.feed(b"\x1b[2;1H\x1b[L");
    assert_eq!(text(&t, 1), "");
    assert_eq!(text(&t, 2), "ccc");
    assert_eq!(text(&t, 3), "ddd");
}

#[test]
fn test_scroll_region_confines_linefeed() {
    let (mut t, _) = term_sized(4, 10);
    t.feed(b"aaa\r\nbbb\r\nccc\r\nddd");
    // Region rows 1..2; cursor at region bottom; LF scrolls only the region.
    t.feed(b"\x1b[1;2r\x1b[2;1H\nnew");
    assert_eq!(text(&t, 0), "bbb");
    assert_eq!(text(&t, 1), "new");
    assert_eq!(text(&t, 2), "ccc");
    assert_eq!(text(&t, 3), "ddd");
}

#[test]
fn test_su_sd_scroll_without_cursor_motion() {
    let (mut t, _) = term_sized(3, 10);
    t.feed(b"aaa\r\nbbb\r\nccc");
    let cursor = t.cursor();
    let grid_before = cursor.0.offset_from(t.state().screen().insert_delta);
    t.feed(b"\x1b[1S");
    let after = t.cursor();
    let grid_after = after.0.offset_from(t.state().screen().insert_delta);
    assert_eq!(text(&t, 0), "bbb");
    assert_eq!(text(&t, 2), "");
    assert_eq!(grid_before, grid_after, "cursor keeps its screen position");

    t.feed(b"\x1b[1T");
    assert_eq!(text(&t, 0), "");
    assert_eq!(text(&t, 1), "bbb");
}

#[test]
fn test_decaln_fills_screen() {
    let (mut t, _) = term_sized(2, 4);
    t.feed(b"\x1b#8");
    assert_eq!(text(&t, 0), "EEEE");
    assert_eq!(text(&t, 1), "EEEE");
    assert_eq!(t.cursor(), (t.state().screen().insert_delta, 0));
}

#[test]
fn test_decstbm_invalid_region_snaps_to_full() {
    let (mut t, _) = term_sized(4, 10);
    t.feed(b"\x1b[3;2r");
    assert_eq!(t.state().screen().scroll_top, 0);
    assert_eq!(t.state().screen().scroll_bottom, 3);
}
