// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Terminal mode state: ECMA modes (SM/RM) and DEC private modes
//! (DECSET/DECRST), each with a current value, a default, and an XTSAVE
//! slot.
//!
//! Only the flags themselves live here. Modes whose toggling has side
//! effects (alternate screen, DECCOLM, DECOM, reverse video...) are flipped
//! by the dispatcher's mode operations, which apply the side effects against
//! the screens before recording the new value.

use rustc_hash::FxHashMap;

/// Mouse event classes reported to the child, per DECSET 1000/1002/1003.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum MouseProtocol {
    #[default]
    None,
    /// `?1000`: button press/release only.
    Press,
    /// `?1002`: press/release plus motion while a button is down.
    Drag,
    /// `?1003`: all motion.
    Motion,
}

/// Wire encoding for mouse reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum MouseEncoding {
    /// `CSI M Cb Cx Cy` with coordinates clamped to byte range.
    #[default]
    Legacy,
    /// `?1005`: UTF-8 extended coordinates.
    Utf8,
    /// `?1015`: urxvt decimal encoding.
    Urxvt,
    /// `?1006`: SGR `CSI < Cb;Cx;Cy M/m`.
    Sgr,
}

/// ECMA-48 mode numbers the core recognises.
pub mod ecma {
    pub const IRM: u16 = 4;
    pub const SRM: u16 = 12;
    pub const LNM: u16 = 20;
    /// BDSM; bidirectional support mode (ECMA-48 TR).
    pub const BDSM: u16 = 8;
}

/// DEC private mode numbers the core recognises.
pub mod private {
    pub const DECCKM: u16 = 1;
    pub const DECANM: u16 = 2;
    pub const DECCOLM: u16 = 3;
    pub const DECSCLM: u16 = 4;
    pub const DECSCNM: u16 = 5;
    pub const DECOM: u16 = 6;
    pub const DECAWM: u16 = 7;
    pub const DECARM: u16 = 8;
    pub const DECTCEM: u16 = 25;
    pub const ALLOW_DECCOLM: u16 = 40;
    pub const DECLRMM: u16 = 69;
    pub const ALT_SCREEN_47: u16 = 47;
    pub const MOUSE_PRESS: u16 = 1000;
    pub const MOUSE_PRESS_HILITE: u16 = 1001;
    pub const MOUSE_DRAG: u16 = 1002;
    pub const MOUSE_MOTION: u16 = 1003;
    pub const FOCUS_EVENTS: u16 = 1004;
    pub const MOUSE_UTF8: u16 = 1005;
    pub const MOUSE_SGR: u16 = 1006;
    pub const ALTERNATE_SCROLL: u16 = 1007;
    pub const MOUSE_URXVT: u16 = 1015;
    pub const ALT_SCREEN_1047: u16 = 1047;
    pub const SAVE_CURSOR_1048: u16 = 1048;
    pub const ALT_SCREEN_SAVE_1049: u16 = 1049;
    pub const URGENT_ON_BELL: u16 = 1042;
    pub const BRACKETED_PASTE: u16 = 2004;
}

/// Current mode flags. Defaults mirror a fresh VT with autowrap on and the
/// cursor visible.
#[derive(Debug, Clone, PartialEq)]
pub struct Modes {
    // ECMA.
    pub insert: bool,
    pub send_receive: bool,
    pub newline: bool,
    /// BDSM: when off, paragraphs resolve with implicit (UBA) direction.
    pub bidi_support: bool,

    // DEC private.
    pub application_cursor: bool,
    pub ansi: bool,
    pub column_132: bool,
    pub smooth_scroll: bool,
    pub reverse_video: bool,
    pub origin: bool,
    pub autowrap: bool,
    pub autorepeat: bool,
    pub cursor_visible: bool,
    pub allow_column_change: bool,
    /// DECLRMM: DECSLRM is honoured only while set.
    pub lr_margin_mode: bool,
    pub alternate_screen: bool,
    pub focus_events: bool,
    pub alternate_scroll: bool,
    pub urgent_on_bell: bool,
    pub bracketed_paste: bool,
    pub mouse_protocol: MouseProtocol,
    pub mouse_encoding: MouseEncoding,

    /// XTSAVE slots (`CSI ? Pm s` / `CSI ? Pm r`), keyed by mode number.
    saved_private: FxHashMap<u16, bool>,
}

impl Default for Modes {
    fn default() -> Self {
        Self {
            insert: false,
            send_receive: false,
            newline: false,
            bidi_support: true,
            application_cursor: false,
            ansi: true,
            column_132: false,
            smooth_scroll: false,
            reverse_video: false,
            origin: false,
            autowrap: true,
            autorepeat: true,
            cursor_visible: true,
            allow_column_change: false,
            lr_margin_mode: false,
            alternate_screen: false,
            focus_events: false,
            alternate_scroll: false,
            urgent_on_bell: false,
            bracketed_paste: false,
            mouse_protocol: MouseProtocol::default(),
            mouse_encoding: MouseEncoding::default(),
            saved_private: FxHashMap::default(),
        }
    }
}

impl Modes {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Current value of a private mode, `None` for unrecognised numbers.
    #[must_use]
    pub fn private_value(&self, mode: u16) -> Option<bool> {
        use private as m;
        Some(match mode {
            m::DECCKM => self.application_cursor,
            m::DECANM => self.ansi,
            m::DECCOLM => self.column_132,
            m::DECSCLM => self.smooth_scroll,
            m::DECSCNM => self.reverse_video,
            m::DECOM => self.origin,
            m::DECAWM => self.autowrap,
            m::DECARM => self.autorepeat,
            m::DECTCEM => self.cursor_visible,
            m::ALLOW_DECCOLM => self.allow_column_change,
            m::DECLRMM => self.lr_margin_mode,
            m::ALT_SCREEN_47 | m::ALT_SCREEN_1047 | m::ALT_SCREEN_SAVE_1049 => {
                self.alternate_screen
            }
            m::FOCUS_EVENTS => self.focus_events,
            m::ALTERNATE_SCROLL => self.alternate_scroll,
            m::URGENT_ON_BELL => self.urgent_on_bell,
            m::BRACKETED_PASTE => self.bracketed_paste,
            m::MOUSE_PRESS => self.mouse_protocol == MouseProtocol::Press,
            m::MOUSE_DRAG => self.mouse_protocol == MouseProtocol::Drag,
            m::MOUSE_MOTION => self.mouse_protocol == MouseProtocol::Motion,
            m::MOUSE_UTF8 => self.mouse_encoding == MouseEncoding::Utf8,
            m::MOUSE_SGR => self.mouse_encoding == MouseEncoding::Sgr,
            m::MOUSE_URXVT => self.mouse_encoding == MouseEncoding::Urxvt,
            _ => return None,
        })
    }

    /// XTSAVE: remember the current value of `mode`.
    pub fn save_private(&mut self, mode: u16) {
        if let Some(value) = self.private_value(mode) {
            self.saved_private.insert(mode, value);
        }
    }

    /// XTRESTORE: the value to restore for `mode`: the saved value if one
    /// exists, otherwise the mode's default.
    #[must_use]
    pub fn restore_private(&mut self, mode: u16) -> Option<bool> {
        if let Some(&saved) = self.saved_private.get(&mode) {
            return Some(saved);
        }
        Self::private_default(mode)
    }

    /// Power-on default for a private mode.
    #[must_use]
    pub fn private_default(mode: u16) -> Option<bool> {
        use private as m;
        Some(match mode {
            m::DECANM | m::DECAWM | m::DECARM | m::DECTCEM => true,
            m::DECCKM | m::DECCOLM | m::DECSCLM | m::DECSCNM | m::DECOM
            | m::ALLOW_DECCOLM | m::DECLRMM | m::ALT_SCREEN_47 | m::ALT_SCREEN_1047
            | m::ALT_SCREEN_SAVE_1049 | m::FOCUS_EVENTS | m::ALTERNATE_SCROLL
            | m::URGENT_ON_BELL | m::BRACKETED_PASTE | m::MOUSE_PRESS
            | m::MOUSE_DRAG | m::MOUSE_MOTION | m::MOUSE_UTF8 | m::MOUSE_SGR
            | m::MOUSE_URXVT | m::SAVE_CURSOR_1048 | m::MOUSE_PRESS_HILITE => false,
            _ => return None,
        })
    }
}
