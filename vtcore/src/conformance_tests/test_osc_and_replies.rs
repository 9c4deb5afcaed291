// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! OSC handling, hyperlinks, and query/response sequences.

use pretty_assertions::assert_eq;

use super::fixtures::{term, text};
use crate::units::AbsRow;

#[test]
fn test_titles_reach_embedder() {
    let (mut t, events) = term();
    t.feed(b"\x1b]2;window title\x07\x1b]1;icon\x07");
    assert_eq!(t.state().title, "window title");
    assert_eq!(t.state().icon_title, "icon");
    let lines = events.borrow();
    assert!(lines.contains(&"title:window title".to_string()));
    assert!(lines.contains(&"icon:icon".to_string()));
}

#[test]
fn test_title_stack_push_pop() {
    let (mut t, _) = term();
    t.feed(b"\x1b]2;first\x07\x1b[22t\x1b]2;second\x07\x1b[23t");
    assert_eq!(t.state().title, "first");
}

#[test]
fn test_hyperlink_cells_resolve_target() {
    let (mut t, events) = term();
    t.feed(b"\x1b]8;id=x;http://example.org\x07LINK\x1b]8;;\x07plain");
    // Cells written inside the OSC 8 span carry the link.
    t.hover(AbsRow::new(0), 1);
    t.hover(AbsRow::new(0), 6);
    let lines = events.borrow();
    assert!(lines.contains(&"hover:http://example.org".to_string()));
    assert!(lines.contains(&"hover:-".to_string()));
}

#[test]
fn test_cursor_position_report() {
    let (mut t, _) = term();
    t.feed(b"\x1b[3;7H\x1b[6n");
    assert_eq!(t.drain_output(), b"\x1b[3;7R");
}

#[test]
fn test_cpr_respects_origin_mode() {
    let (mut t, _) = term();
    t.feed(b"\x1b[5;10r\x1b[?6h\x1b[2;3H\x1b[6n");
    assert_eq!(t.drain_output(), b"\x1b[2;3R");
}

#[test]
fn test_device_attributes() {
    let (mut t, _) = term();
    t.feed(b"\x1b[c");
    assert_eq!(t.drain_output(), b"\x1b[?62;1;4;6;9;15;22c");
    t.feed(b"\x1b[>c");
    assert_eq!(t.drain_output(), b"\x1b[>65;6003;1c");
}

#[test]
fn test_operating_status() {
    let (mut t, _) = term();
    t.feed(b"\x1b[5n");
    assert_eq!(t.drain_output(), b"\x1b[0n");
}

#[test]
fn test_color_query_replies_xparsecolor() {
    let (mut t, _) = term();
    // Set palette 1 then query it back, plus the default foreground.
    t.feed(b"\x1b]4;1;rgb:12/34/56\x07\x1b]4;1;?\x07\x1b]10;?\x07");
    let out = String::from_utf8(t.drain_output()).unwrap();
    assert!(out.contains("\x1b]4;1;rgb:1212/3434/5656\x07"));
    assert!(out.contains("\x1b]10;rgb:e5e5/e5e5/e5e5\x07"));
}

#[test]
fn test_decrqss_replies() {
    let (mut t, _) = term();
    t.feed(b"\x1b[1;31m\x1b[3;10r");
    t.feed(b"\x1bP$qm\x1b\\");
    let sgr = String::from_utf8(t.drain_output()).unwrap();
    assert!(sgr.starts_with("\x1bP1$r"), "{sgr:?}");
    assert!(sgr.contains("0;1;31m"), "{sgr:?}");

    t.feed(b"\x1bP$qr\x1b\\");
    assert_eq!(t.drain_output(), b"\x1bP1$r3;10r\x1b\\");

    t.feed(b"\x1bP$qz\x1b\\");
    assert_eq!(t.drain_output(), b"\x1bP0$r\x1b\\");
}

#[test]
fn test_window_size_reports() {
    let (mut t, _) = term();
    t.feed(b"\x1b[18t");
    assert_eq!(t.drain_output(), b"\x1b[8;24;80t");
    t.feed(b"\x1b[14t");
    // 24 rows × 20px, 80 cols × 10px with the default cell metrics.
    assert_eq!(t.drain_output(), b"\x1b[4;480;800t");
}

#[test]
fn test_resize_request_event() {
    let (mut t, events) = term();
    t.feed(b"\x1b[8;30;100t");
    assert!(events.borrow().contains(&"resize:100x30".to_string()));
}

#[test]
fn test_cwd_report() {
    let (mut t, events) = term();
    t.feed(b"\x1b]7;file://host/home/user\x07");
    assert!(
        events
            .borrow()
            .contains(&"cwd:file://host/home/user".to_string())
    );
}

#[test]
fn test_clipboard_write_forwarded() {
    let (mut t, events) = term();
    t.feed(b"\x1b]52;c;aGVsbG8=\x07");
    assert!(
        events
            .borrow()
            .contains(&"copy:Clipboard:aGVsbG8=".to_string())
    );
}

#[test]
fn test_bell_throttled() {
    let (mut t, events) = term();
    t.feed(b"\x07\x07\x07");
    assert_eq!(
        events.borrow().iter().filter(|l| *l == "bell").count(),
        1,
        "bells within the throttle window coalesce"
    );
}

#[test]
fn test_cursor_style_event() {
    let (mut t, events) = term();
    t.feed(b"\x1b[6 q");
    assert!(events.borrow().contains(&"cursor-style:SteadyBar".to_string()));
}

#[test]
fn test_write_contents_round_trips_text() {
    let (mut t, _) = term();
    t.feed(b"first line\r\nsecond\r\n");
    let mut out = Vec::new();
    t.write_contents(&mut out, false).unwrap();
    let dump = String::from_utf8(out).unwrap();
    assert!(dump.starts_with("first line\nsecond\n"));
    assert_eq!(text(&t, 0), "first line");
}
