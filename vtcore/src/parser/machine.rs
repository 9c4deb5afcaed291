// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The ECMA-48 control-sequence state machine.
//!
//! States and transitions follow the canonical DEC/xterm parser: `Ground`,
//! `Escape(_intermediate)`, `Csi_entry/param/intermediate/ignore`,
//! `Dcs_entry/param/intermediate/passthrough/ignore`, `Osc_string` and
//! `Sos_pm_apc_string`. Departures from the letter of the canonical table
//! are deliberate:
//!
//! - `:` is a sub-parameter separator (SGR `38:2::R:G:B`) rather than a trip
//!   to the ignore state;
//! - C1 controls decoded from UTF-8 (U+0080..=U+009F) map to their ESC-Fe
//!   equivalents when 8-bit controls are accepted, and print otherwise;
//! - too many intermediates or parameters swallow the excess instead of
//!   desynchronising.
//!
//! The machine consumes Unicode scalar values (the UTF-8 decoder runs
//! upstream) and never errors: malformed input lands in an ignore state and
//! the next well-formed sequence proceeds normally. All state lives in the
//! [`Parser`] value, so a byte stream may be split at any position and fed in
//! chunks with identical results.

use smallvec::SmallVec;

use super::params::Params;
use super::perform::Perform;

/// Intermediate bytes retained per sequence; more moves to the ignore state.
const MAX_INTERMEDIATES: usize = 4;

/// OSC string bytes retained; the tail of an oversized string is dropped.
const MAX_OSC_LEN: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    #[default]
    Ground,
    Escape,
    EscapeIntermediate,
    CsiEntry,
    CsiParam,
    CsiIntermediate,
    CsiIgnore,
    DcsEntry,
    DcsParam,
    DcsIntermediate,
    DcsPassthrough,
    DcsIgnore,
    OscString,
    SosPmApcString,
}

/// The control-sequence parser.
#[derive(Debug, Default)]
pub struct Parser {
    state: State,
    params: Params,
    intermediates: SmallVec<[u8; MAX_INTERMEDIATES]>,
    osc_buf: Vec<u8>,
    /// A DCS hook is active; leaving `DcsPassthrough` must unhook.
    hooked: bool,
    /// Accept 8-bit C1 controls (mapped to ESC-Fe); when off they print.
    accept_c1: bool,
}

impl Parser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            accept_c1: true,
            ..Self::default()
        }
    }

    /// Toggle 8-bit C1 control acceptance.
    pub fn set_accept_c1(&mut self, accept: bool) { self.accept_c1 = accept; }

    /// Hard reset (RIS, or terminal reset): drops any in-flight sequence,
    /// unhooking an active DCS consumer.
    pub fn reset(&mut self, performer: &mut impl Perform) {
        self.leave_string_state_abort(performer);
        self.clear_sequence();
        self.state = State::Ground;
    }

    /// Feed one decoded scalar value.
    pub fn advance(&mut self, performer: &mut impl Perform, c: char) {
        let cp = c as u32;

        // "Anywhere" transitions take priority over every state.
        match cp {
            0x18 | 0x1A => {
                // CAN / SUB: abort without dispatch.
                self.leave_string_state_abort(performer);
                self.clear_sequence();
                self.state = State::Ground;
                #[allow(clippy::cast_possible_truncation)]
                performer.execute(cp as u8);
                return;
            }
            0x1B => {
                self.leave_string_state_finish(performer);
                self.clear_sequence();
                self.state = State::Escape;
                return;
            }
            0x80..=0x9F if self.accept_c1 => {
                #[allow(clippy::cast_possible_truncation)]
                self.c1_control(performer, cp as u8);
                return;
            }
            _ => {}
        }

        match self.state {
            State::Ground => self.ground(performer, c),
            State::Escape => self.escape(performer, c),
            State::EscapeIntermediate => self.escape_intermediate(performer, c),
            State::CsiEntry => self.csi_entry(performer, c),
            State::CsiParam => self.csi_param(performer, c),
            State::CsiIntermediate => self.csi_intermediate(performer, c),
            State::CsiIgnore => self.csi_ignore(performer, c),
            State::DcsEntry => self.dcs_entry(performer, c),
            State::DcsParam => self.dcs_param(performer, c),
            State::DcsIntermediate => self.dcs_intermediate(performer, c),
            State::DcsPassthrough => self.dcs_passthrough(performer, c),
            State::DcsIgnore => {}
            State::OscString => self.osc_string(performer, c),
            State::SosPmApcString => {}
        }
    }

    /// Feed a decoded string.
    pub fn advance_str(&mut self, performer: &mut impl Perform, input: &str) {
        for c in input.chars() {
            self.advance(performer, c);
        }
    }

    // ───────────────────────── helpers ─────────────────────────

    fn clear_sequence(&mut self) {
        self.params.clear();
        self.intermediates.clear();
    }

    /// Orderly exit from a string state: OSC dispatches, DCS unhooks.
    fn leave_string_state_finish(&mut self, performer: &mut impl Perform) {
        match self.state {
            State::OscString => self.dispatch_osc(performer, false),
            State::DcsPassthrough => self.finish_unhook(performer),
            _ => {}
        }
    }

    /// Aborting exit (CAN/SUB): OSC output is discarded, DCS still unhooks
    /// so the consumer can drop partial state.
    fn leave_string_state_abort(&mut self, performer: &mut impl Perform) {
        match self.state {
            State::OscString => self.osc_buf.clear(),
            State::DcsPassthrough => self.finish_unhook(performer),
            _ => {}
        }
    }

    fn finish_unhook(&mut self, performer: &mut impl Perform) {
        if self.hooked {
            performer.unhook();
            self.hooked = false;
        }
    }

    fn c1_control(&mut self, performer: &mut impl Perform, byte: u8) {
        // 0x9C (ST) finishes strings; any other C1 also terminates an open
        // string before acting.
        self.leave_string_state_finish(performer);
        self.clear_sequence();
        match byte {
            0x90 => self.state = State::DcsEntry,
            0x9B => self.state = State::CsiEntry,
            0x9D => {
                self.osc_buf.clear();
                self.state = State::OscString;
            }
            0x98 | 0x9E | 0x9F => self.state = State::SosPmApcString,
            0x9C => self.state = State::Ground,
            _ => {
                // ESC-Fe equivalent: C1 X ≡ ESC (X - 0x40).
                self.state = State::Ground;
                performer.esc_dispatch(&[], byte - 0x40);
            }
        }
    }

    fn is_c0(cp: u32) -> bool {
        matches!(cp, 0x00..=0x17 | 0x19 | 0x1C..=0x1F)
    }

    /// Collect an intermediate byte; returns false when the sequence has too
    /// many and must be ignored.
    fn collect(&mut self, byte: u8) -> bool {
        if self.intermediates.len() < MAX_INTERMEDIATES {
            self.intermediates.push(byte);
            true
        } else {
            false
        }
    }

    fn dispatch_csi(&mut self, performer: &mut impl Perform, final_byte: char) {
        self.params.finish();
        performer.csi_dispatch(&self.params, &self.intermediates, final_byte);
        self.clear_sequence();
        self.state = State::Ground;
    }

    fn dispatch_esc(&mut self, performer: &mut impl Perform, final_byte: u8) {
        let intermediates = std::mem::take(&mut self.intermediates);
        performer.esc_dispatch(&intermediates, final_byte);
        self.clear_sequence();
        self.state = State::Ground;
    }

    fn hook_dcs(&mut self, performer: &mut impl Perform, final_byte: char) {
        self.params.finish();
        performer.hook(&self.params, &self.intermediates, final_byte);
        self.hooked = true;
        self.state = State::DcsPassthrough;
    }

    fn dispatch_osc(&mut self, performer: &mut impl Perform, bell_terminated: bool) {
        let slices: Vec<&[u8]> = self.osc_buf.split(|&b| b == b';').collect();
        performer.osc_dispatch(&slices, bell_terminated);
        self.osc_buf.clear();
    }

    // ───────────────────────── states ─────────────────────────

    fn ground(&mut self, performer: &mut impl Perform, c: char) {
        let cp = c as u32;
        if Self::is_c0(cp) {
            #[allow(clippy::cast_possible_truncation)]
            performer.execute(cp as u8);
        } else if cp != 0x7F {
            performer.print(c);
        }
    }

    /// Abort a non-string sequence on a stray printable ≥ U+00A0: back to
    /// ground, and the character prints rather than vanishing.
    fn abort_print(&mut self, performer: &mut impl Perform, c: char) {
        self.clear_sequence();
        self.state = State::Ground;
        performer.print(c);
    }

    fn escape(&mut self, performer: &mut impl Perform, c: char) {
        let cp = c as u32;
        match cp {
            _ if Self::is_c0(cp) => {
                #[allow(clippy::cast_possible_truncation)]
                performer.execute(cp as u8);
            }
            0x20..=0x2F => {
                #[allow(clippy::cast_possible_truncation)]
                let ok = self.collect(cp as u8);
                self.state = if ok { State::EscapeIntermediate } else { State::Ground };
            }
            0x50 => {
                self.clear_sequence();
                self.state = State::DcsEntry;
            }
            0x58 | 0x5E | 0x5F => self.state = State::SosPmApcString,
            0x5B => {
                self.clear_sequence();
                self.state = State::CsiEntry;
            }
            0x5D => {
                self.osc_buf.clear();
                self.state = State::OscString;
            }
            0x30..=0x7E => {
                #[allow(clippy::cast_possible_truncation)]
                self.dispatch_esc(performer, cp as u8);
            }
            0x7F => {}
            _ => self.abort_print(performer, c),
        }
    }

    fn escape_intermediate(&mut self, performer: &mut impl Perform, c: char) {
        let cp = c as u32;
        match cp {
            _ if Self::is_c0(cp) => {
                #[allow(clippy::cast_possible_truncation)]
                performer.execute(cp as u8);
            }
            0x20..=0x2F => {
                #[allow(clippy::cast_possible_truncation)]
                if !self.collect(cp as u8) {
                    self.state = State::Ground;
                }
            }
            0x30..=0x7E => {
                #[allow(clippy::cast_possible_truncation)]
                self.dispatch_esc(performer, cp as u8);
            }
            0x7F => {}
            _ => self.abort_print(performer, c),
        }
    }

    fn csi_entry(&mut self, performer: &mut impl Perform, c: char) {
        let cp = c as u32;
        match cp {
            _ if Self::is_c0(cp) => {
                #[allow(clippy::cast_possible_truncation)]
                performer.execute(cp as u8);
            }
            0x20..=0x2F => {
                #[allow(clippy::cast_possible_truncation)]
                let ok = self.collect(cp as u8);
                self.state = if ok { State::CsiIntermediate } else { State::CsiIgnore };
            }
            0x30..=0x39 => {
                #[allow(clippy::cast_possible_truncation)]
                self.params.accumulate_digit((cp as u8) - b'0');
                self.state = State::CsiParam;
            }
            0x3A => {
                self.params.next_subparam();
                self.state = State::CsiParam;
            }
            0x3B => {
                self.params.next_param();
                self.state = State::CsiParam;
            }
            0x3C..=0x3F => {
                // Private marker.
                #[allow(clippy::cast_possible_truncation)]
                let ok = self.collect(cp as u8);
                self.state = if ok { State::CsiParam } else { State::CsiIgnore };
            }
            0x40..=0x7E => self.dispatch_csi(performer, c),
            0x7F => {}
            _ => self.abort_print(performer, c),
        }
    }

    fn csi_param(&mut self, performer: &mut impl Perform, c: char) {
        let cp = c as u32;
        match cp {
            _ if Self::is_c0(cp) => {
                #[allow(clippy::cast_possible_truncation)]
                performer.execute(cp as u8);
            }
            0x30..=0x39 => {
                #[allow(clippy::cast_possible_truncation)]
                self.params.accumulate_digit((cp as u8) - b'0');
            }
            0x3A => self.params.next_subparam(),
            0x3B => self.params.next_param(),
            0x3C..=0x3F => self.state = State::CsiIgnore,
            0x20..=0x2F => {
                #[allow(clippy::cast_possible_truncation)]
                let ok = self.collect(cp as u8);
                self.state = if ok { State::CsiIntermediate } else { State::CsiIgnore };
            }
            0x40..=0x7E => self.dispatch_csi(performer, c),
            0x7F => {}
            _ => self.abort_print(performer, c),
        }
    }

    fn csi_intermediate(&mut self, performer: &mut impl Perform, c: char) {
        let cp = c as u32;
        match cp {
            _ if Self::is_c0(cp) => {
                #[allow(clippy::cast_possible_truncation)]
                performer.execute(cp as u8);
            }
            0x20..=0x2F => {
                #[allow(clippy::cast_possible_truncation)]
                if !self.collect(cp as u8) {
                    self.state = State::CsiIgnore;
                }
            }
            0x30..=0x3F => self.state = State::CsiIgnore,
            0x40..=0x7E => self.dispatch_csi(performer, c),
            0x7F => {}
            _ => self.abort_print(performer, c),
        }
    }

    fn csi_ignore(&mut self, performer: &mut impl Perform, c: char) {
        let cp = c as u32;
        if Self::is_c0(cp) {
            #[allow(clippy::cast_possible_truncation)]
            performer.execute(cp as u8);
        } else if (0x40..=0x7E).contains(&cp) {
            self.clear_sequence();
            self.state = State::Ground;
        }
    }

    fn dcs_entry(&mut self, performer: &mut impl Perform, c: char) {
        let cp = c as u32;
        match cp {
            _ if Self::is_c0(cp) => {}
            0x20..=0x2F => {
                #[allow(clippy::cast_possible_truncation)]
                let ok = self.collect(cp as u8);
                self.state = if ok { State::DcsIntermediate } else { State::DcsIgnore };
            }
            0x30..=0x39 => {
                #[allow(clippy::cast_possible_truncation)]
                self.params.accumulate_digit((cp as u8) - b'0');
                self.state = State::DcsParam;
            }
            0x3A => {
                self.params.next_subparam();
                self.state = State::DcsParam;
            }
            0x3B => {
                self.params.next_param();
                self.state = State::DcsParam;
            }
            0x3C..=0x3F => {
                #[allow(clippy::cast_possible_truncation)]
                let ok = self.collect(cp as u8);
                self.state = if ok { State::DcsParam } else { State::DcsIgnore };
            }
            0x40..=0x7E => self.hook_dcs(performer, c),
            0x7F => {}
            _ => self.state = State::DcsIgnore,
        }
    }

    fn dcs_param(&mut self, performer: &mut impl Perform, c: char) {
        let cp = c as u32;
        match cp {
            _ if Self::is_c0(cp) => {}
            0x30..=0x39 => {
                #[allow(clippy::cast_possible_truncation)]
                self.params.accumulate_digit((cp as u8) - b'0');
            }
            0x3A => self.params.next_subparam(),
            0x3B => self.params.next_param(),
            0x3C..=0x3F => self.state = State::DcsIgnore,
            0x20..=0x2F => {
                #[allow(clippy::cast_possible_truncation)]
                let ok = self.collect(cp as u8);
                self.state = if ok { State::DcsIntermediate } else { State::DcsIgnore };
            }
            0x40..=0x7E => self.hook_dcs(performer, c),
            0x7F => {}
            _ => self.state = State::DcsIgnore,
        }
    }

    fn dcs_intermediate(&mut self, performer: &mut impl Perform, c: char) {
        let cp = c as u32;
        match cp {
            _ if Self::is_c0(cp) => {}
            0x20..=0x2F => {
                #[allow(clippy::cast_possible_truncation)]
                if !self.collect(cp as u8) {
                    self.state = State::DcsIgnore;
                }
            }
            0x30..=0x3F => self.state = State::DcsIgnore,
            0x40..=0x7E => self.hook_dcs(performer, c),
            0x7F => {}
            _ => self.state = State::DcsIgnore,
        }
    }

    fn dcs_passthrough(&mut self, performer: &mut impl Perform, c: char) {
        let cp = c as u32;
        match cp {
            0x00..=0x7E => {
                #[allow(clippy::cast_possible_truncation)]
                performer.put(cp as u8);
            }
            // 0x7F and non-ASCII have no meaning inside a DCS body.
            _ => {}
        }
    }

    fn osc_string(&mut self, performer: &mut impl Perform, c: char) {
        let cp = c as u32;
        match cp {
            0x07 => {
                self.dispatch_osc(performer, true);
                self.state = State::Ground;
            }
            0x00..=0x06 | 0x08..=0x17 | 0x19 | 0x1C..=0x1F => {}
            _ => {
                if self.osc_buf.len() + c.len_utf8() <= MAX_OSC_LEN {
                    let mut buf = [0u8; 4];
                    self.osc_buf
                        .extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                }
            }
        }
    }
}
