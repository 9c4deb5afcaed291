// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Keyboard → PTY byte translation, xterm conventions.
//!
//! The encoding of a key depends on the modifier set and on two terminal
//! modes: DECCKM (application cursor keys: `SS3 A` instead of `CSI A`) and
//! DECKPAM (application keypad). Modified special keys use the xterm
//! modifier-parameter form `CSI 1;m X` where `m - 1` is the modifier
//! bitmask.

/// A key the embedder's input layer resolved from its toolkit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    Delete,
    /// Function keys, 1-based.
    F(u8),
}

/// Modifier bitmask, xterm numbering (shift 1, alt 2, ctrl 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: u8 = 1;
    pub const ALT: u8 = 2;
    pub const CTRL: u8 = 4;

    #[must_use]
    pub fn shift(self) -> bool { self.0 & Self::SHIFT != 0 }

    #[must_use]
    pub fn alt(self) -> bool { self.0 & Self::ALT != 0 }

    #[must_use]
    pub fn ctrl(self) -> bool { self.0 & Self::CTRL != 0 }

    /// The xterm modifier parameter (`bitmask + 1`), or `None` when no
    /// modifier is held.
    fn param(self) -> Option<u8> { (self.0 != 0).then_some(self.0 + 1) }
}

/// Encode one key event. `application_cursor` is DECCKM, `application_keypad`
/// is DECKPAM.
pub fn encode_key(
    key: Key,
    mods: Modifiers,
    application_cursor: bool,
    application_keypad: bool,
    out: &mut Vec<u8>,
) {
    let _ = application_keypad; // keypad-specific keys arrive pre-resolved
    match key {
        Key::Char(c) => encode_char(c, mods, out),
        Key::Enter => {
            if mods.alt() {
                out.push(0x1B);
            }
            out.push(b'\r');
        }
        Key::Tab => {
            if mods.shift() {
                out.extend_from_slice(b"\x1b[Z");
            } else {
                out.push(b'\t');
            }
        }
        Key::Backspace => {
            if mods.alt() {
                out.push(0x1B);
            }
            out.push(0x7F);
        }
        Key::Escape => out.push(0x1B),
        Key::Up => cursor_key(b'A', mods, application_cursor, out),
        Key::Down => cursor_key(b'B', mods, application_cursor, out),
        Key::Right => cursor_key(b'C', mods, application_cursor, out),
        Key::Left => cursor_key(b'D', mods, application_cursor, out),
        Key::Home => cursor_key(b'H', mods, application_cursor, out),
        Key::End => cursor_key(b'F', mods, application_cursor, out),
        Key::Insert => tilde_key(2, mods, out),
        Key::Delete => tilde_key(3, mods, out),
        Key::PageUp => tilde_key(5, mods, out),
        Key::PageDown => tilde_key(6, mods, out),
        Key::F(n) => function_key(n, mods, out),
    }
}

fn encode_char(c: char, mods: Modifiers, out: &mut Vec<u8>) {
    if mods.alt() {
        out.push(0x1B);
    }
    if mods.ctrl() {
        // Ctrl maps letters (and a few symbols) into the C0 range.
        let folded = c.to_ascii_lowercase();
        let byte = match folded {
            'a'..='z' => Some(folded as u8 & 0x1F),
            '@' | ' ' => Some(0x00),
            '[' => Some(0x1B),
            '\\' => Some(0x1C),
            ']' => Some(0x1D),
            '^' => Some(0x1E),
            '_' | '/' => Some(0x1F),
            '?' => Some(0x7F),
            _ => None,
        };
        if let Some(byte) = byte {
            out.push(byte);
            return;
        }
    }
    let mut buf = [0u8; 4];
    out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}

fn cursor_key(final_byte: u8, mods: Modifiers, application: bool, out: &mut Vec<u8>) {
    match mods.param() {
        Some(param) => {
            out.extend_from_slice(format!("\x1b[1;{param}{}", char::from(final_byte)).as_bytes());
        }
        None if application => {
            out.extend_from_slice(&[0x1B, b'O', final_byte]);
        }
        None => {
            out.extend_from_slice(&[0x1B, b'[', final_byte]);
        }
    }
}

fn tilde_key(code: u8, mods: Modifiers, out: &mut Vec<u8>) {
    match mods.param() {
        Some(param) => {
            out.extend_from_slice(format!("\x1b[{code};{param}~").as_bytes());
        }
        None => out.extend_from_slice(format!("\x1b[{code}~").as_bytes()),
    }
}

fn function_key(n: u8, mods: Modifiers, out: &mut Vec<u8>) {
    match n {
        1..=4 => {
            let final_byte = b'P' + (n - 1);
            match mods.param() {
                Some(param) => out.extend_from_slice(
                    format!("\x1b[1;{param}{}", char::from(final_byte)).as_bytes(),
                ),
                None => out.extend_from_slice(&[0x1B, b'O', final_byte]),
            }
        }
        5..=12 => {
            // Terminfo-style codes with the historical gaps.
            let code = match n {
                5 => 15,
                6 => 17,
                7 => 18,
                8 => 19,
                9 => 20,
                10 => 21,
                11 => 23,
                _ => 24,
            };
            tilde_key(code, mods, out);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::{Key, Modifiers, encode_key};

    fn encode(key: Key, mods: Modifiers, app_cursor: bool) -> Vec<u8> {
        let mut out = Vec::new();
        encode_key(key, mods, app_cursor, false, &mut out);
        out
    }

    #[test]
    fn test_plain_char() {
        assert_eq!(encode(Key::Char('a'), Modifiers::NONE, false), b"a");
        assert_eq!(encode(Key::Char('é'), Modifiers::NONE, false), "é".as_bytes());
    }

    #[test]
    fn test_ctrl_char() {
        assert_eq!(encode(Key::Char('c'), Modifiers(Modifiers::CTRL), false), [0x03]);
        assert_eq!(encode(Key::Char('A'), Modifiers(Modifiers::CTRL), false), [0x01]);
        assert_eq!(encode(Key::Char(' '), Modifiers(Modifiers::CTRL), false), [0x00]);
    }

    #[test]
    fn test_alt_prefixes_escape() {
        assert_eq!(encode(Key::Char('x'), Modifiers(Modifiers::ALT), false), b"\x1bx");
        assert_eq!(
            encode(Key::Char('c'), Modifiers(Modifiers::ALT | Modifiers::CTRL), false),
            [0x1B, 0x03]
        );
    }

    #[test]
    fn test_cursor_keys_follow_decckm() {
        assert_eq!(encode(Key::Up, Modifiers::NONE, false), b"\x1b[A");
        assert_eq!(encode(Key::Up, Modifiers::NONE, true), b"\x1bOA");
        // Modifiers force the CSI form regardless of DECCKM.
        assert_eq!(
            encode(Key::Up, Modifiers(Modifiers::CTRL), true),
            b"\x1b[1;5A"
        );
    }

    #[test]
    fn test_editing_keys() {
        assert_eq!(encode(Key::Delete, Modifiers::NONE, false), b"\x1b[3~");
        assert_eq!(encode(Key::PageUp, Modifiers(Modifiers::SHIFT), false), b"\x1b[5;2~");
        assert_eq!(encode(Key::Tab, Modifiers(Modifiers::SHIFT), false), b"\x1b[Z");
    }

    #[test]
    fn test_function_keys() {
        assert_eq!(encode(Key::F(1), Modifiers::NONE, false), b"\x1bOP");
        assert_eq!(encode(Key::F(5), Modifiers::NONE, false), b"\x1b[15~");
        assert_eq!(encode(Key::F(12), Modifiers::NONE, false), b"\x1b[24~");
        assert_eq!(
            encode(Key::F(1), Modifiers(Modifiers::CTRL), false),
            b"\x1b[1;5P"
        );
    }
}
