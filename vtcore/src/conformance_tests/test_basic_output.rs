// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Plain output: printing, cursor motion, wrapping, wide characters, tabs.

use pretty_assertions::assert_eq;

use super::fixtures::{term, term_sized, text};
use crate::color::CellColor;
use crate::units::AbsRow;
use crate::unistr::Unistr;

#[test]
fn test_hello_two_lines() {
    let (mut t, _) = term();
    t.feed(b"Hello\r\nWorld");
    assert_eq!(text(&t, 0), "Hello");
    assert_eq!(text(&t, 1), "World");
    assert_eq!(t.cursor(), (AbsRow::new(1), 5));
}

#[test]
fn test_cursor_back_overwrites() {
    let (mut t, _) = term();
    t.feed(b"AB\x1b[3DCD");
    assert_eq!(text(&t, 0), "CD");
    assert_eq!(t.cursor(), (AbsRow::new(0), 2));
}

#[test]
fn test_sgr_red_bold_then_reset() {
    let (mut t, _) = term();
    t.feed(b"\x1b[1;31mR\x1b[0mN");
    let row = t.state().screen().row(0).unwrap().clone();
    assert_eq!(row.cells[0].colors.fore(), CellColor::Palette(1));
    assert!(row.cells[0].attrs.bold());
    assert_eq!(row.cells[1].colors.fore(), CellColor::Default);
    assert!(!row.cells[1].attrs.bold());
}

#[test]
fn test_autowrap_marks_soft_wrap() {
    let (mut t, _) = term_sized(4, 4);
    t.feed(b"abcdef");
    assert_eq!(text(&t, 0), "abcd");
    assert_eq!(text(&t, 1), "ef");
    assert!(t.state().screen().row(0).unwrap().attrs.soft_wrapped);
    assert!(!t.state().screen().row(1).unwrap().attrs.soft_wrapped);
}

#[test]
fn test_autowrap_off_overwrites_last_column() {
    let (mut t, _) = term_sized(4, 4);
    t.feed(b"\x1b[?7labcdef");
    assert_eq!(text(&t, 0), "abcf");
    assert_eq!(t.cursor(), (AbsRow::new(0), 4));
}

#[test]
fn test_wide_character_occupies_two_cells() {
    let (mut t, _) = term();
    t.feed("語x".as_bytes());
    let row = t.state().screen().row(0).unwrap().clone();
    assert_eq!(row.cells[0].c, Unistr::from_char('語'));
    assert_eq!(row.cells[0].columns(), 2);
    assert!(row.cells[1].is_fragment());
    assert_eq!(row.cells[2].c, Unistr::from_char('x'));
    assert_eq!(t.cursor(), (AbsRow::new(0), 3));
}

#[test]
fn test_combining_accent_attaches_to_previous_cell() {
    let (mut t, _) = term();
    t.feed("e\u{0301}x".as_bytes());
    let row = t.state().screen().row(0).unwrap().clone();
    assert_eq!(row.cells[0].c, Unistr::from_char('e').append_accent('\u{0301}'));
    assert_eq!(row.cells[1].c, Unistr::from_char('x'));
    assert_eq!(t.cursor(), (AbsRow::new(0), 2));
}

#[test]
fn test_tab_moves_to_stops() {
    let (mut t, _) = term();
    t.feed(b"a\tb\tc");
    let row = t.state().screen().row(0).unwrap().clone();
    assert_eq!(row.cells[8].c, Unistr::from_char('b'));
    assert_eq!(row.cells[16].c, Unistr::from_char('c'));
}

#[test]
fn test_tab_set_and_clear() {
    let (mut t, _) = term();
    // Clear all stops, set one at column 5 (cursor there via CHA).
    t.feed(b"\x1b[3g\x1b[6G\x1bH\r\ta");
    let row = t.state().screen().row(0).unwrap().clone();
    assert_eq!(row.cells[5].c, Unistr::from_char('a'));
}

#[test]
fn test_scrolling_pushes_history() {
    let (mut t, _) = term_sized(3, 10);
    t.feed(b"one\r\ntwo\r\nthree\r\nfour");
    // "one" scrolled into history; viewport shows two/three/four.
    assert_eq!(text(&t, 0), "two");
    assert_eq!(text(&t, 2), "four");
    let first = t.read_row(AbsRow::new(0)).unwrap();
    assert_eq!(first.text().trim_end(), "one");
}

#[test]
fn test_rep_repeats_last_graphic() {
    let (mut t, _) = term();
    t.feed(b"x\x1b[4b");
    assert_eq!(text(&t, 0), "xxxxx");
}

#[test]
fn test_line_feed_with_lnm_returns_carriage() {
    let (mut t, _) = term();
    t.feed(b"\x1b[20hab\ncd");
    assert_eq!(text(&t, 0), "ab");
    assert_eq!(text(&t, 1), "cd");
}

#[test]
fn test_dec_graphics_charset() {
    let (mut t, _) = term();
    t.feed(b"\x1b(0qx\x1b(Bq");
    let row = t.state().screen().row(0).unwrap().clone();
    assert_eq!(row.cells[0].c, Unistr::from_char('─'));
    assert_eq!(row.cells[1].c, Unistr::from_char('│'));
    assert_eq!(row.cells[2].c, Unistr::from_char('q'));
}

#[test]
fn test_nel_and_ri() {
    let (mut t, _) = term();
    t.feed(b"one\x1bEtwo\x1bMup");
    assert_eq!(text(&t, 0), "oneup");
    assert_eq!(text(&t, 1), "two");
}
