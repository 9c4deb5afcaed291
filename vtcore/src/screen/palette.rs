// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The colour palette: 256 regular entries plus the named slots.
//!
//! Rendering is out of scope, but the palette itself is core state: OSC 4
//! mutates entries, OSC 10/11/12 mutate the named defaults, the matching
//! query forms read them back in `rgb:RRRR/GGGG/BBBB` form, and DECSCNM
//! flips a global reverse flag without rewriting any cell.

use crate::color::{
    CURSOR_BG, CURSOR_FG, DEFAULT_BG, DEFAULT_FG, PALETTE_SLOTS,
};

/// One palette entry, 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }

    /// The `rgb:RRRR/GGGG/BBBB` form used in OSC colour query replies,
    /// with each channel widened to 16 bits.
    #[must_use]
    pub fn to_xparsecolor(self) -> String {
        let wide = |c: u8| u16::from(c) << 8 | u16::from(c);
        format!("rgb:{:04x}/{:04x}/{:04x}", wide(self.r), wide(self.g), wide(self.b))
    }

    /// Parse `rgb:RR/GG/BB`-style (4/8/12/16 bit per channel) or `#RRGGBB`
    /// specifications, as accepted by OSC 4/10/11/12 set forms.
    #[must_use]
    pub fn parse(spec: &str) -> Option<Self> {
        if let Some(hex) = spec.strip_prefix('#') {
            if hex.len() == 6 {
                let v = u32::from_str_radix(hex, 16).ok()?;
                #[allow(clippy::cast_possible_truncation)]
                return Some(Self::new((v >> 16) as u8, (v >> 8) as u8, v as u8));
            }
            return None;
        }
        let body = spec.strip_prefix("rgb:")?;
        let mut channels = body.split('/');
        let mut parse_channel = || -> Option<u8> {
            let part = channels.next()?;
            if part.is_empty() || part.len() > 4 {
                return None;
            }
            let v = u16::from_str_radix(part, 16).ok()?;
            // Scale to 8 bits from however many hex digits were given.
            let bits = 4 * part.len() as u32;
            #[allow(clippy::cast_possible_truncation)]
            Some(if bits == 8 {
                v as u8
            } else {
                ((u32::from(v) * 255) / ((1u32 << bits) - 1)) as u8
            })
        };
        let r = parse_channel()?;
        let g = parse_channel()?;
        let b = parse_channel()?;
        channels.next().is_none().then_some(Self::new(r, g, b))
    }
}

/// The standard 16 ANSI colours (xterm defaults).
const ANSI_16: [Rgb; 16] = [
    Rgb::new(0, 0, 0),
    Rgb::new(205, 0, 0),
    Rgb::new(0, 205, 0),
    Rgb::new(205, 205, 0),
    Rgb::new(0, 0, 238),
    Rgb::new(205, 0, 205),
    Rgb::new(0, 205, 205),
    Rgb::new(229, 229, 229),
    Rgb::new(127, 127, 127),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(255, 255, 0),
    Rgb::new(92, 92, 255),
    Rgb::new(255, 0, 255),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 255, 255),
];

/// Palette state: regular + named entries, and the DECSCNM reverse flag.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    entries: Vec<Rgb>,
    /// DECSCNM: render with foreground/background globally exchanged.
    pub reversed: bool,
}

impl Default for Palette {
    fn default() -> Self {
        let mut entries = vec![Rgb::default(); usize::from(PALETTE_SLOTS)];
        entries[..16].copy_from_slice(&ANSI_16);
        // 6×6×6 colour cube.
        for i in 0..216 {
            let level = |n: usize| -> u8 {
                if n == 0 { 0 } else { (40 * n + 55) as u8 }
            };
            entries[16 + i] = Rgb::new(
                level(i / 36),
                level((i / 6) % 6),
                level(i % 6),
            );
        }
        // Grayscale ramp.
        for i in 0..24 {
            let v = (8 + 10 * i) as u8;
            entries[232 + i] = Rgb::new(v, v, v);
        }
        // Named slots.
        entries[usize::from(DEFAULT_FG)] = Rgb::new(229, 229, 229);
        entries[usize::from(DEFAULT_BG)] = Rgb::new(0, 0, 0);
        entries[usize::from(crate::color::BOLD_FG)] = Rgb::new(255, 255, 255);
        entries[usize::from(crate::color::HIGHLIGHT_FG)] = Rgb::new(0, 0, 0);
        entries[usize::from(crate::color::HIGHLIGHT_BG)] = Rgb::new(181, 213, 255);
        entries[usize::from(CURSOR_BG)] = Rgb::new(229, 229, 229);
        entries[usize::from(CURSOR_FG)] = Rgb::new(0, 0, 0);
        Self {
            entries,
            reversed: false,
        }
    }
}

impl Palette {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn get(&self, idx: u16) -> Option<Rgb> {
        self.entries.get(usize::from(idx)).copied()
    }

    pub fn set(&mut self, idx: u16, rgb: Rgb) {
        if let Some(slot) = self.entries.get_mut(usize::from(idx)) {
            *slot = rgb;
        }
    }

    /// Reset one entry (or all, with `None`) to the defaults.
    pub fn reset(&mut self, idx: Option<u16>) {
        let defaults = Palette::default();
        match idx {
            Some(idx) => {
                if let Some(value) = defaults.get(idx) {
                    self.set(idx, value);
                }
            }
            None => self.entries = defaults.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Palette, Rgb};
    use crate::color::DEFAULT_FG;

    #[test]
    fn test_cube_and_grayscale() {
        let p = Palette::default();
        assert_eq!(p.get(16), Some(Rgb::new(0, 0, 0)));
        assert_eq!(p.get(231), Some(Rgb::new(255, 255, 255)));
        assert_eq!(p.get(244), Some(Rgb::new(128, 128, 128)));
        assert_eq!(p.get(196), Some(Rgb::new(255, 0, 0)));
    }

    #[test]
    fn test_xparsecolor_round_trip() {
        let rgb = Rgb::new(0x12, 0x34, 0x56);
        let spec = rgb.to_xparsecolor();
        assert_eq!(spec, "rgb:1212/3434/5656");
        assert_eq!(Rgb::parse(&spec), Some(rgb));
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!(Rgb::parse("#ff8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(Rgb::parse("rgb:ff/80/00"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(Rgb::parse("rgb:f/8/0"), Some(Rgb::new(255, 136, 0)));
        assert_eq!(Rgb::parse("nonsense"), None);
        assert_eq!(Rgb::parse("rgb:ff/80"), None);
    }

    #[test]
    fn test_set_and_reset() {
        let mut p = Palette::default();
        let original = p.get(1).unwrap();
        p.set(1, Rgb::new(1, 2, 3));
        assert_eq!(p.get(1), Some(Rgb::new(1, 2, 3)));
        p.reset(Some(1));
        assert_eq!(p.get(1), Some(original));

        p.set(DEFAULT_FG, Rgb::new(9, 9, 9));
        p.reset(None);
        assert_eq!(p.get(DEFAULT_FG), Some(Rgb::new(229, 229, 229)));
    }
}
