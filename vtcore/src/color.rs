// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Packed cell colours.
//!
//! Each cell carries three colours; foreground, background and decoration
//! (underline); packed into one `u64` so the cell record stays fixed-size:
//!
//! ```text
//! bit  0 ──────────── 24   25 ──────────── 49   50 ──────── 63
//!      foreground (25)      background (25)      deco (14)
//! ```
//!
//! A 25-bit field encodes either a palette index (0..=511: 256 regular
//! colours plus the named entries starting at [`DEFAULT_FG`]), a 24-bit RGB
//! literal (flagged by bit 24), or the "default" sentinel. The 14-bit deco
//! field has no room for RGB literals; RGB decoration colours are quantised
//! to the closest entry of the 256-colour cube on the way in.
//!
//! The encoding is private to this module: construct and inspect colours only
//! through [`CellColor`] and the [`ColorTriple`] accessors.

/// First named palette index: the default foreground colour.
pub const DEFAULT_FG: u16 = 256;
/// Default background colour.
pub const DEFAULT_BG: u16 = 257;
/// Foreground used for bold text when bold-is-bright is configured.
pub const BOLD_FG: u16 = 258;
/// Highlight (selection) foreground.
pub const HIGHLIGHT_FG: u16 = 259;
/// Highlight (selection) background.
pub const HIGHLIGHT_BG: u16 = 260;
/// Cursor cell background.
pub const CURSOR_BG: u16 = 261;
/// Cursor cell foreground.
pub const CURSOR_FG: u16 = 262;

/// Number of addressable palette slots (regular + named).
pub const PALETTE_SLOTS: u16 = 263;

const RGB_FLAG: u32 = 0x0100_0000;
const FIELD_DEFAULT: u32 = 0x00FF_FFFF;
const FIELD_MASK: u64 = 0x01FF_FFFF;

const BACK_SHIFT: u32 = 25;
const DECO_SHIFT: u32 = 50;
const DECO_MASK: u64 = 0x3FFF;
const DECO_DEFAULT: u32 = 0x3FFF;

/// One cell colour in unpacked form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellColor {
    /// Use the screen default for this field (foreground, background or
    /// "decoration follows foreground").
    Default,
    /// Palette index: 0..=255 regular, 256..=262 named slots.
    Palette(u16),
    /// 24-bit truecolor literal.
    Rgb(u8, u8, u8),
}

impl CellColor {
    fn pack(self) -> u32 {
        match self {
            CellColor::Default => FIELD_DEFAULT,
            CellColor::Palette(idx) => u32::from(idx.min(PALETTE_SLOTS - 1)),
            CellColor::Rgb(r, g, b) => {
                RGB_FLAG | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
            }
        }
    }

    fn unpack(raw: u32) -> Self {
        if raw == FIELD_DEFAULT {
            CellColor::Default
        } else if raw & RGB_FLAG != 0 {
            #[allow(clippy::cast_possible_truncation)]
            CellColor::Rgb((raw >> 16) as u8, (raw >> 8) as u8, raw as u8)
        } else {
            #[allow(clippy::cast_possible_truncation)]
            CellColor::Palette(raw as u16)
        }
    }

    /// Quantise to the 256-colour palette: the 6×6×6 cube plus the grayscale
    /// ramp. Used where a packed field cannot hold an RGB literal.
    #[must_use]
    pub fn quantized_to_palette(self) -> Self {
        match self {
            CellColor::Rgb(r, g, b) => {
                if r == g && g == b {
                    // Grayscale ramp 232..=255 covers 8..=238 in steps of 10.
                    if r < 8 {
                        CellColor::Palette(16)
                    } else if r > 238 {
                        CellColor::Palette(231)
                    } else {
                        CellColor::Palette(232 + u16::from((r - 8) / 10))
                    }
                } else {
                    let level = |c: u8| -> u16 {
                        if c < 48 {
                            0
                        } else if c < 115 {
                            1
                        } else {
                            u16::from((c - 35) / 40)
                        }
                    };
                    CellColor::Palette(16 + 36 * level(r) + 6 * level(g) + level(b))
                }
            }
            other => other,
        }
    }
}

/// The packed (foreground, background, decoration) triple of one cell.
///
/// Stored as two 32-bit words rather than a `u64` so [`Cell`] stays 4-byte
/// aligned and exactly 20 bytes.
///
/// [`Cell`]: crate::cell::Cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorTriple([u32; 2]);

impl Default for ColorTriple {
    fn default() -> Self { Self::DEFAULT }
}

const DEFAULT_PACKED: u64 = (FIELD_DEFAULT as u64)
    | ((FIELD_DEFAULT as u64) << BACK_SHIFT)
    | ((DECO_DEFAULT as u64) << DECO_SHIFT);

impl ColorTriple {
    /// All three fields set to their screen defaults.
    pub const DEFAULT: ColorTriple = ColorTriple::from_u64(DEFAULT_PACKED);

    const fn packed(self) -> u64 {
        (self.0[0] as u64) | ((self.0[1] as u64) << 32)
    }

    fn set_packed(&mut self, value: u64) {
        *self = Self::from_u64(value);
    }

    #[must_use]
    pub fn fore(self) -> CellColor {
        #[allow(clippy::cast_possible_truncation)]
        CellColor::unpack((self.packed() & FIELD_MASK) as u32)
    }

    #[must_use]
    pub fn back(self) -> CellColor {
        #[allow(clippy::cast_possible_truncation)]
        CellColor::unpack(((self.packed() >> BACK_SHIFT) & FIELD_MASK) as u32)
    }

    #[must_use]
    pub fn deco(self) -> CellColor {
        #[allow(clippy::cast_possible_truncation)]
        let raw = ((self.packed() >> DECO_SHIFT) & DECO_MASK) as u32;
        if raw == DECO_DEFAULT {
            CellColor::Default
        } else {
            #[allow(clippy::cast_possible_truncation)]
            CellColor::Palette(raw as u16)
        }
    }

    pub fn set_fore(&mut self, color: CellColor) {
        self.set_packed((self.packed() & !FIELD_MASK) | u64::from(color.pack()));
    }

    pub fn set_back(&mut self, color: CellColor) {
        self.set_packed(
            (self.packed() & !(FIELD_MASK << BACK_SHIFT))
                | (u64::from(color.pack()) << BACK_SHIFT),
        );
    }

    /// Set the decoration colour. RGB literals are quantised to the
    /// 256-colour cube first.
    pub fn set_deco(&mut self, color: CellColor) {
        let raw = match color.quantized_to_palette() {
            CellColor::Default => DECO_DEFAULT,
            CellColor::Palette(idx) => u32::from(idx) & 0x1FF,
            CellColor::Rgb(..) => unreachable!("quantized above"),
        };
        self.set_packed(
            (self.packed() & !(DECO_MASK << DECO_SHIFT)) | (u64::from(raw) << DECO_SHIFT),
        );
    }

    #[must_use]
    pub fn with_fore(mut self, color: CellColor) -> Self {
        self.set_fore(color);
        self
    }

    #[must_use]
    pub fn with_back(mut self, color: CellColor) -> Self {
        self.set_back(color);
        self
    }

    #[must_use]
    pub fn with_deco(mut self, color: CellColor) -> Self {
        self.set_deco(color);
        self
    }

    /// Raw packed value, used by the attribute stream encoder.
    #[must_use]
    pub const fn as_u64(self) -> u64 { self.packed() }

    /// Rebuild from a raw packed value read back from the attribute stream.
    #[must_use]
    pub const fn from_u64(raw: u64) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        Self([raw as u32, (raw >> 32) as u32])
    }
}
