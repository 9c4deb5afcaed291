// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Mode switching: alternate screen, DECOM, DECSC/DECRC, DECCOLM,
//! XTSAVE/XTRESTORE, mouse/paste modes.

use pretty_assertions::assert_eq;

use super::fixtures::{term, term_sized, text};
use crate::color::CellColor;
use crate::input::{MouseButton, MouseEvent, MouseEventKind, Modifiers};
use crate::screen::{MouseEncoding, MouseProtocol};
use crate::units::AbsRow;

#[test]
fn test_alt_screen_1049_round_trip() {
    let (mut t, _) = term();
    t.feed(b"main content");
    let cursor_before = t.cursor();
    t.feed(b"\x1b[?1049h");
    assert!(t.state().modes.alternate_screen);
    t.feed(b"ALT");
    assert_eq!(text(&t, 0), "ALT");
    t.feed(b"\x1b[?1049l");
    assert!(!t.state().modes.alternate_screen);
    // Main screen content and cursor are back; the alt content is gone.
    assert_eq!(text(&t, 0), "main content");
    assert_eq!(t.cursor(), cursor_before);
}

#[test]
fn test_alt_screen_47_switches_without_save() {
    let (mut t, _) = term();
    t.feed(b"normal\x1b[?47halt\x1b[?47l");
    assert_eq!(text(&t, 0), "normal");
    assert!(!t.state().modes.alternate_screen);
}

#[test]
fn test_decsc_decrc_restores_state() {
    let (mut t, _) = term();
    t.feed(b"\x1b[5;10H\x1b[1;31m\x1b7");
    t.feed(b"\x1b[HX\x1b[0m\x1b[42m");
    t.feed(b"\x1b8");
    // Position, SGR and origin mode restored by DECRC.
    assert_eq!(t.cursor(), (AbsRow::new(4), 9));
    assert_eq!(t.state().attrs.colors.fore(), CellColor::Palette(1));
    assert!(t.state().attrs.attrs.bold());
    assert_eq!(t.state().attrs.colors.back(), CellColor::Default);
    // Content written between save and restore is untouched.
    assert_eq!(text(&t, 0), "X");
}

#[test]
fn test_decrc_without_save_resets() {
    let (mut t, _) = term();
    t.feed(b"\x1b[5;5H\x1b[1m\x1b8");
    assert_eq!(t.cursor(), (AbsRow::new(0), 0));
    assert!(!t.state().attrs.attrs.bold());
}

#[test]
fn test_origin_mode_biases_addressing() {
    let (mut t, _) = term_sized(10, 20);
    t.feed(b"\x1b[3;8r\x1b[?6h");
    // Home is the region top under DECOM.
    assert_eq!(t.cursor(), (AbsRow::new(2), 0));
    t.feed(b"\x1b[1;1HX");
    assert_eq!(text(&t, 2), "X");
    // Rows clamp to the region bottom.
    t.feed(b"\x1b[99;1HY");
    assert_eq!(text(&t, 7), "Y");
}

#[test]
fn test_deccolm_gated_by_mode_40() {
    let (mut t, _) = term();
    t.feed(b"\x1b[?3h");
    assert_eq!(t.cols(), 80, "DECCOLM ignored without mode 40");
    t.feed(b"\x1b[?40h\x1b[?3h");
    assert_eq!(t.cols(), 132);
    assert_eq!(text(&t, 0), "", "column change clears the screen");
    t.feed(b"\x1b[?3l");
    assert_eq!(t.cols(), 80);
}

#[test]
fn test_xtsave_xtrestore() {
    let (mut t, _) = term();
    t.feed(b"\x1b[?7l");
    t.feed(b"\x1b[?7s");
    t.feed(b"\x1b[?7h");
    assert!(t.state().modes.autowrap);
    t.feed(b"\x1b[?7r");
    assert!(!t.state().modes.autowrap, "restored the saved (off) value");
}

#[test]
fn test_mouse_mode_selection() {
    let (mut t, _) = term();
    t.feed(b"\x1b[?1002h\x1b[?1006h");
    assert_eq!(t.state().modes.mouse_protocol, MouseProtocol::Drag);
    assert_eq!(t.state().modes.mouse_encoding, MouseEncoding::Sgr);

    let reported = t.send_mouse(MouseEvent {
        kind: MouseEventKind::Press,
        button: MouseButton::Left,
        col: 2,
        row: 1,
        mods: Modifiers::NONE,
    });
    assert!(reported);
    assert_eq!(t.drain_output(), b"\x1b[<0;3;2M");

    // Turning the protocol off stops reporting.
    t.feed(b"\x1b[?1002l");
    assert_eq!(t.state().modes.mouse_protocol, MouseProtocol::None);
}

#[test]
fn test_bracketed_paste_mode() {
    let (mut t, _) = term();
    t.paste("hi");
    assert_eq!(t.drain_output(), b"hi");
    t.feed(b"\x1b[?2004h");
    t.paste("hi");
    assert_eq!(t.drain_output(), b"\x1b[200~hi\x1b[201~");
}

#[test]
fn test_focus_reporting_gated() {
    let (mut t, _) = term();
    t.send_focus(true);
    assert!(t.drain_output().is_empty());
    t.feed(b"\x1b[?1004h");
    t.send_focus(true);
    t.send_focus(false);
    assert_eq!(t.drain_output(), b"\x1b[I\x1b[O");
}

#[test]
fn test_application_cursor_keys_mode() {
    let (mut t, _) = term();
    t.send_key(crate::input::Key::Up, Modifiers::NONE);
    assert_eq!(t.drain_output(), b"\x1b[A");
    t.feed(b"\x1b[?1h");
    t.send_key(crate::input::Key::Up, Modifiers::NONE);
    assert_eq!(t.drain_output(), b"\x1bOA");
}

#[test]
fn test_insert_mode_shifts_text() {
    let (mut t, _) = term();
    t.feed(b"world\x1b[4h\x1b[1GHi ");
    assert_eq!(text(&t, 0), "Hi world");
    t.feed(b"\x1b[4l\x1b[1GYo!");
    assert_eq!(text(&t, 0), "Yo!world");
}

#[test]
fn test_reverse_video_flips_palette_flag() {
    let (mut t, _) = term();
    t.feed(b"\x1b[?5h");
    assert!(t.state().palette.reversed);
    t.feed(b"\x1b[?5l");
    assert!(!t.state().palette.reversed);
}

#[test]
fn test_hard_reset_clears_modes_and_screen() {
    let (mut t, _) = term();
    t.feed(b"junk\x1b[?6h\x1b[1;31m\x1b[?1049h");
    t.feed(b"\x1bc");
    assert!(!t.state().modes.origin);
    assert!(!t.state().modes.alternate_screen);
    assert!(!t.state().attrs.attrs.bold());
    assert_eq!(t.state().attrs.colors.fore(), CellColor::Default);
    assert_eq!(text(&t, 0), "");
}
