// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! SIXEL images through the full DCS pipeline.

use pretty_assertions::assert_eq;

use super::fixtures::{term, text};
use crate::sixel::argb;
use crate::units::AbsRow;

#[test]
fn test_two_band_image_decodes() {
    let (mut t, _) = term();
    // Register 0 red, register 1 green; 8 columns of full sixels per band.
    t.feed(b"\x1bP0;1;0q#0;2;100;0;0#1;2;0;100;0#0!8~-#1!8~\x1b\\");
    assert_eq!(t.images().len(), 1);
    let placed = &t.images()[0];
    assert_eq!(placed.row, AbsRow::new(0));
    assert_eq!(placed.col, 0);
    assert_eq!(placed.image.width, 8);
    assert_eq!(placed.image.height, 12);
    let red = argb(0xFF, 255, 0, 0);
    let green = argb(0xFF, 0, 255, 0);
    for y in 0..6 {
        for x in 0..8 {
            assert_eq!(placed.image.pixels[y * 8 + x], red, "({x},{y})");
        }
    }
    for y in 6..12 {
        for x in 0..8 {
            assert_eq!(placed.image.pixels[y * 8 + x], green, "({x},{y})");
        }
    }
}

#[test]
fn test_cursor_advances_by_cell_width() {
    let (mut t, _) = term();
    // 25 pixels wide at the default 10px cells → 3 cells.
    t.feed(b"\x1bP0;0;0q!25~\x1b\\");
    assert_eq!(t.cursor(), (AbsRow::new(0), 3));
    // Text continues after the image.
    t.feed(b"x");
    let row = t.state().screen().row(0).unwrap().clone();
    assert_eq!(row.cells[3].c, crate::unistr::Unistr::from_char('x'));
}

#[test]
fn test_text_flows_around_sixel_stream() {
    let (mut t, _) = term();
    t.feed(b"before\x1bP0;0;0q~~\x1b\\after");
    assert!(text(&t, 0).starts_with("before"));
    assert!(text(&t, 0).contains("after"));
    assert_eq!(t.images().len(), 1);
}

#[test]
fn test_malformed_sixel_data_is_total() {
    let (mut t, _) = term();
    // Garbage registers, oversized repeats, stray params: never a panic,
    // parsing continues to ST, and the terminal still works afterwards.
    t.feed(b"\x1bP9;9;9q#99999;9;999;999;999!0!99999~$$--\x1b\\ok");
    assert!(text(&t, 0).contains("ok"));
}

#[test]
fn test_reset_discards_active_sixel() {
    let (mut t, _) = term();
    // Hook a sixel stream but never finish it.
    t.feed(b"\x1bP0;0;0q#1~~~");
    t.reset(false, false);
    assert!(t.images().is_empty());
    t.feed(b"plain");
    assert_eq!(text(&t, 0), "plain");
}
