// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! SM/RM, DECSET/DECRST (with side effects), XTSAVE/XTRESTORE, and charset
//! designation.

use crate::parser::Params;
use crate::screen::{MouseEncoding, MouseProtocol};
use crate::screen::modes::{ecma, private};

use super::super::performer::Performer;
use super::super::protocols::esc_codes;
use super::cursor_ops;

pub fn set_mode(p: &mut Performer<'_>, params: &Params, private_marker: bool) {
    walk(p, params, private_marker, true);
}

pub fn reset_mode(p: &mut Performer<'_>, params: &Params, private_marker: bool) {
    walk(p, params, private_marker, false);
}

fn walk(p: &mut Performer<'_>, params: &Params, private_marker: bool, enable: bool) {
    for i in 0..params.len().max(1) {
        let Some(mode) = params.get(i) else { continue };
        if private_marker {
            apply_private(p, mode, enable);
        } else {
            apply_ecma(p, mode, enable);
        }
    }
}

fn apply_ecma(p: &mut Performer<'_>, mode: u16, on: bool) {
    match mode {
        ecma::IRM => p.state.modes.insert = on,
        ecma::SRM => p.state.modes.send_receive = on,
        ecma::LNM => p.state.modes.newline = on,
        ecma::BDSM => p.state.modes.bidi_support = on,
        other => tracing::warn!(other, on, "unknown ECMA mode ignored"),
    }
}

#[allow(clippy::too_many_lines)]
fn apply_private(p: &mut Performer<'_>, mode: u16, on: bool) {
    use private as m;
    match mode {
        m::DECCKM => p.state.modes.application_cursor = on,
        m::DECANM => p.state.modes.ansi = true, // VT52 mode is not supported.
        m::DECCOLM => column_mode(p, on),
        m::DECSCLM => p.state.modes.smooth_scroll = on,
        m::DECSCNM => {
            p.state.modes.reverse_video = on;
            p.state.palette.reversed = on;
        }
        m::DECOM => {
            p.state.modes.origin = on;
            let screen = p.state.screen_mut();
            let home = if on { screen.scroll_top } else { 0 };
            screen.cursor.row = screen.row_abs(home);
            screen.cursor.col = if on { screen.left_margin } else { 0 };
        }
        m::DECAWM => p.state.modes.autowrap = on,
        m::DECARM => p.state.modes.autorepeat = on,
        m::DECTCEM => p.state.modes.cursor_visible = on,
        m::ALLOW_DECCOLM => p.state.modes.allow_column_change = on,
        m::DECLRMM => {
            p.state.modes.lr_margin_mode = on;
            if !on {
                let screen = p.state.screen_mut();
                screen.left_margin = 0;
                screen.right_margin = screen.cols - 1;
            }
        }
        m::ALT_SCREEN_47 => p.state.switch_screen(on),
        m::ALT_SCREEN_1047 => {
            if on {
                p.state.switch_screen(true);
            } else {
                if p.state.modes.alternate_screen {
                    let erase = p.state.erase;
                    p.state.alternate.clear_all(&erase);
                }
                p.state.switch_screen(false);
            }
        }
        m::SAVE_CURSOR_1048 => {
            if on {
                cursor_ops::save_cursor(p);
            } else {
                cursor_ops::restore_cursor(p);
            }
        }
        m::ALT_SCREEN_SAVE_1049 => {
            if on {
                cursor_ops::save_cursor(p);
                p.state.switch_screen(true);
                let erase = p.state.erase;
                p.state.alternate.clear_all(&erase);
            } else {
                p.state.switch_screen(false);
                cursor_ops::restore_cursor(p);
            }
        }
        m::FOCUS_EVENTS => p.state.modes.focus_events = on,
        m::ALTERNATE_SCROLL => p.state.modes.alternate_scroll = on,
        m::URGENT_ON_BELL => p.state.modes.urgent_on_bell = on,
        m::BRACKETED_PASTE => p.state.modes.bracketed_paste = on,
        m::MOUSE_PRESS => set_mouse_protocol(p, MouseProtocol::Press, on),
        m::MOUSE_DRAG => set_mouse_protocol(p, MouseProtocol::Drag, on),
        m::MOUSE_MOTION => set_mouse_protocol(p, MouseProtocol::Motion, on),
        m::MOUSE_PRESS_HILITE => {
            tracing::warn!("mouse highlight tracking (1001) not supported");
        }
        m::MOUSE_UTF8 => set_mouse_encoding(p, MouseEncoding::Utf8, on),
        m::MOUSE_SGR => set_mouse_encoding(p, MouseEncoding::Sgr, on),
        m::MOUSE_URXVT => set_mouse_encoding(p, MouseEncoding::Urxvt, on),
        other => tracing::warn!(other, on, "unknown private mode ignored"),
    }
}

fn set_mouse_protocol(p: &mut Performer<'_>, protocol: MouseProtocol, on: bool) {
    let modes = &mut p.state.modes;
    if on {
        modes.mouse_protocol = protocol;
    } else if modes.mouse_protocol == protocol {
        modes.mouse_protocol = MouseProtocol::None;
    }
}

fn set_mouse_encoding(p: &mut Performer<'_>, encoding: MouseEncoding, on: bool) {
    let modes = &mut p.state.modes;
    if on {
        modes.mouse_encoding = encoding;
    } else if modes.mouse_encoding == encoding {
        modes.mouse_encoding = MouseEncoding::Legacy;
    }
}

/// DECCOLM: honoured only when mode 40 allows it; switches between 80 and
/// 132 columns, clears the screen and homes the cursor.
fn column_mode(p: &mut Performer<'_>, to_132: bool) {
    p.state.modes.column_132 = to_132;
    if !p.state.modes.allow_column_change {
        return;
    }
    let cols = if to_132 { 132 } else { 80 };
    let rows = p.state.rows();
    let erase = p.state.erase;
    let scrollback = p.state.config.effective_scrollback_rows();
    let rewrap = false; // DECCOLM clears; reflow would be wasted work.
    p.state.normal.resize(rows, cols, scrollback, rewrap, &erase);
    p.state.alternate.resize(rows, cols, 0, rewrap, &erase);
    p.state.tabstops.resize(cols, true);
    p.state.normal.clear_all(&erase);
    p.state.alternate.clear_all(&erase);
    #[allow(clippy::cast_possible_truncation)]
    p.events.resize_requested(cols as u16, rows as u16);
}

/// XTSAVE (`CSI ? Pm s`).
pub fn save_modes(p: &mut Performer<'_>, params: &Params) {
    for i in 0..params.len() {
        if let Some(mode) = params.get(i) {
            p.state.modes.save_private(mode);
        }
    }
}

/// XTRESTORE (`CSI ? Pm r`).
pub fn restore_modes(p: &mut Performer<'_>, params: &Params) {
    for i in 0..params.len() {
        if let Some(mode) = params.get(i) {
            if let Some(value) = p.state.modes.restore_private(mode) {
                apply_private(p, mode, value);
            }
        }
    }
}

/// `ESC ( F` / `ESC ) F`: designate a charset into G0/G1.
pub fn designate_charset(p: &mut Performer<'_>, slot: usize, final_byte: u8) {
    use crate::dispatch::charset::CharsetSlot;
    let designated = match final_byte {
        esc_codes::CHARSET_DEC_GRAPHICS => CharsetSlot::LineDrawing,
        esc_codes::CHARSET_ASCII => CharsetSlot::None,
        other => {
            // NRCS and other legacy sets are out of scope; fall back to
            // pass-through.
            tracing::warn!(other, "unsupported charset designation, using ASCII");
            CharsetSlot::None
        }
    };
    p.state.charset.g[slot.min(1)] = designated;
}
