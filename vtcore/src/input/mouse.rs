// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Mouse → PTY byte translation.
//!
//! Which events report at all is the protocol (`?1000`/`?1002`/`?1003`);
//! how they serialise is the encoding (legacy clamped bytes, urxvt decimal,
//! SGR). Buttons 4..7 (wheel) carry bit 64; motion carries bit 32; modifier
//! bits ride on 4/8/16.

use crate::screen::{MouseEncoding, MouseProtocol};

use super::keyboard::Modifiers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
    /// Motion with no button held.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    Press,
    Release,
    Motion,
}

/// A mouse event in 0-based grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub button: MouseButton,
    pub col: usize,
    pub row: usize,
    pub mods: Modifiers,
}

fn button_bits(button: MouseButton) -> u16 {
    match button {
        MouseButton::Left => 0,
        MouseButton::Middle => 1,
        MouseButton::Right | MouseButton::None => 2,
        MouseButton::WheelUp => 64,
        MouseButton::WheelDown => 64 + 1,
    }
}

/// True when `event` reports under `protocol`.
fn reportable(event: MouseEvent, protocol: MouseProtocol) -> bool {
    match protocol {
        MouseProtocol::None => false,
        MouseProtocol::Press => event.kind != MouseEventKind::Motion,
        MouseProtocol::Drag => {
            event.kind != MouseEventKind::Motion || event.button != MouseButton::None
        }
        MouseProtocol::Motion => true,
    }
}

/// Encode one mouse event; returns false when the active protocol does not
/// report it (nothing is written).
pub fn encode_mouse(
    event: MouseEvent,
    protocol: MouseProtocol,
    encoding: MouseEncoding,
    out: &mut Vec<u8>,
) -> bool {
    if !reportable(event, protocol) {
        return false;
    }
    let mut cb = button_bits(event.button);
    if event.kind == MouseEventKind::Motion {
        cb += 32;
        if event.button == MouseButton::None {
            cb = 32 + 3;
        }
    }
    if event.mods.shift() {
        cb += 4;
    }
    if event.mods.alt() {
        cb += 8;
    }
    if event.mods.ctrl() {
        cb += 16;
    }

    match encoding {
        MouseEncoding::Sgr => {
            let terminator = if event.kind == MouseEventKind::Release { 'm' } else { 'M' };
            out.extend_from_slice(
                format!("\x1b[<{cb};{};{}{terminator}", event.col + 1, event.row + 1)
                    .as_bytes(),
            );
        }
        MouseEncoding::Urxvt => {
            let cb = if event.kind == MouseEventKind::Release { 3 + 32 } else { cb + 32 };
            out.extend_from_slice(
                format!("\x1b[{cb};{};{}M", event.col + 1, event.row + 1).as_bytes(),
            );
        }
        // 1005 UTF-8 coordinates share the legacy frame; coordinates past
        // the byte range clamp rather than widen.
        MouseEncoding::Legacy | MouseEncoding::Utf8 => {
            let cb = if event.kind == MouseEventKind::Release { 3 } else { cb };
            let clamp = |v: usize| -> u8 {
                #[allow(clippy::cast_possible_truncation)]
                ((v + 33).min(255) as u8)
            };
            #[allow(clippy::cast_possible_truncation)]
            out.extend_from_slice(&[
                0x1B,
                b'[',
                b'M',
                (cb + 32).min(255) as u8,
                clamp(event.col),
                clamp(event.row),
            ]);
        }
    }
    true
}

/// Focus change reports (`?1004`): `CSI I` on focus in, `CSI O` on focus
/// out.
pub fn encode_focus(focus_in: bool, out: &mut Vec<u8>) {
    out.extend_from_slice(if focus_in { b"\x1b[I" } else { b"\x1b[O" });
}
