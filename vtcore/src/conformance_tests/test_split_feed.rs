// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Chunking invariance: any split of the byte stream yields the same state.

use pretty_assertions::assert_eq;

use super::fixtures::term_sized;
use crate::terminal::Terminal;

/// A stream exercising printing, CSI with params, SGR, OSC, DCS (sixel),
/// C1 controls, UTF-8 multibyte and malformed input.
fn stream() -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"Hello \x1b[1;31mred\x1b[0m plain\r\n");
    bytes.extend_from_slice("wide \u{8a9e} combining e\u{0301}\r\n".as_bytes());
    bytes.extend_from_slice(b"\x1b]2;some title\x07");
    bytes.extend_from_slice(b"\x1b[3;4HX\x1b[2;2r\x1b[r");
    bytes.extend_from_slice(b"\x1bP0;0;0q#1!4~-!4~\x1b\\");
    bytes.extend_from_slice(&[0xC2, 0x9B]);
    bytes.extend_from_slice(b"5;6Hpos\x1b[K");
    bytes.extend_from_slice(&[0xFF, 0xC3]);
    bytes.extend_from_slice(b" tail\x1b[4h ins\x1b[4l");
    bytes
}

fn snapshot(t: &Terminal) -> Vec<String> {
    let mut out = Vec::new();
    for grid in 0..t.rows() {
        out.push(t.row_text(grid));
    }
    out.push(format!("cursor={:?}", t.cursor()));
    out.push(format!("title={}", t.state().title));
    out.push(format!("images={}", t.images().len()));
    out
}

#[test]
fn test_any_split_yields_identical_state() {
    let bytes = stream();
    let (mut reference, _) = term_sized(8, 40);
    reference.feed(&bytes);
    let expected = snapshot(&reference);

    for split in 0..=bytes.len() {
        let (mut t, _) = term_sized(8, 40);
        let (a, b) = bytes.split_at(split);
        t.feed(a);
        t.feed(b);
        assert_eq!(snapshot(&t), expected, "split at byte {split}");
    }
}

#[test]
fn test_byte_at_a_time_matches_one_shot() {
    let bytes = stream();
    let (mut reference, _) = term_sized(8, 40);
    reference.feed(&bytes);

    let (mut t, _) = term_sized(8, 40);
    for &b in &bytes {
        t.feed(&[b]);
    }
    assert_eq!(snapshot(&t), snapshot(&reference));
}
