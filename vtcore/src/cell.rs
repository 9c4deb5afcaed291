// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The fixed-layout cell record.
//!
//! One [`Cell`] describes one grid position: an interned grapheme cluster
//! ([`Unistr`]), a packed attribute word, the packed colour triple and a
//! hyperlink index. The record is 20 bytes and `Copy`; rows clone and move
//! cells freely without touching the intern table.
//!
//! Wide glyphs occupy several consecutive cells: the leftmost ("head") cell
//! has `fragment == false` and `columns` set to the glyph's visual span; the
//! remaining cells are fragments carrying the same `c`. A row never contains
//! a fragment without its head to the left.

use crate::color::ColorTriple;
use crate::unistr::Unistr;

/// Hyperlink index sentinel: the cell is a hyperlink but the target now lives
/// only in the ring's attribute stream (the row was frozen and thawed).
pub const HYPERLINK_TARGET_IN_STREAM: u32 = 0xFFFF_FFFF;

/// Underline styles, two bits in the attribute word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
#[repr(u8)]
pub enum Underline {
    #[default]
    None = 0,
    Single = 1,
    Double = 2,
    Curly = 3,
}

impl Underline {
    fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            1 => Underline::Single,
            2 => Underline::Double,
            3 => Underline::Curly,
            _ => Underline::None,
        }
    }
}

const FRAGMENT_BIT: u32 = 1 << 0;
const COLUMNS_SHIFT: u32 = 1;
const COLUMNS_MASK: u32 = 0b1111 << COLUMNS_SHIFT;
const BOLD_BIT: u32 = 1 << 5;
const ITALIC_BIT: u32 = 1 << 6;
const UNDERLINE_SHIFT: u32 = 7;
const UNDERLINE_MASK: u32 = 0b11 << UNDERLINE_SHIFT;
const STRIKETHROUGH_BIT: u32 = 1 << 9;
const REVERSE_BIT: u32 = 1 << 10;
const BLINK_BIT: u32 = 1 << 11;
const DIM_BIT: u32 = 1 << 12;
const INVISIBLE_BIT: u32 = 1 << 13;
const OVERLINE_BIT: u32 = 1 << 14;

/// Every attribute bit except fragment/columns, for the stream encoder which
/// stores layout bits and style bits separately.
pub(crate) const STYLE_BITS_MASK: u32 =
    BOLD_BIT | ITALIC_BIT | UNDERLINE_MASK | STRIKETHROUGH_BIT | REVERSE_BIT
        | BLINK_BIT | DIM_BIT | INVISIBLE_BIT | OVERLINE_BIT;

/// Packed per-cell attribute word (fragment, columns, style flags).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellAttrs(u32);

macro_rules! flag_accessors {
    ($get:ident, $set:ident, $bit:expr) => {
        #[must_use]
        pub const fn $get(self) -> bool { self.0 & $bit != 0 }

        pub const fn $set(&mut self, on: bool) {
            if on {
                self.0 |= $bit;
            } else {
                self.0 &= !$bit;
            }
        }
    };
}

impl CellAttrs {
    flag_accessors!(bold, set_bold, BOLD_BIT);
    flag_accessors!(italic, set_italic, ITALIC_BIT);
    flag_accessors!(strikethrough, set_strikethrough, STRIKETHROUGH_BIT);
    flag_accessors!(reverse, set_reverse, REVERSE_BIT);
    flag_accessors!(blink, set_blink, BLINK_BIT);
    flag_accessors!(dim, set_dim, DIM_BIT);
    flag_accessors!(invisible, set_invisible, INVISIBLE_BIT);
    flag_accessors!(overline, set_overline, OVERLINE_BIT);

    #[must_use]
    pub const fn fragment(self) -> bool { self.0 & FRAGMENT_BIT != 0 }

    pub const fn set_fragment(&mut self, on: bool) {
        if on {
            self.0 |= FRAGMENT_BIT;
        } else {
            self.0 &= !FRAGMENT_BIT;
        }
    }

    /// Visual column span of the owning glyph, 0..=8.
    #[must_use]
    pub const fn columns(self) -> u8 {
        ((self.0 & COLUMNS_MASK) >> COLUMNS_SHIFT) as u8
    }

    pub fn set_columns(&mut self, columns: u8) {
        debug_assert!(columns <= 8, "glyph span out of range: {columns}");
        self.0 = (self.0 & !COLUMNS_MASK)
            | ((u32::from(columns) << COLUMNS_SHIFT) & COLUMNS_MASK);
    }

    #[must_use]
    pub fn underline(self) -> Underline {
        Underline::from_bits((self.0 & UNDERLINE_MASK) >> UNDERLINE_SHIFT)
    }

    pub fn set_underline(&mut self, underline: Underline) {
        self.0 =
            (self.0 & !UNDERLINE_MASK) | (u32::from(underline as u8) << UNDERLINE_SHIFT);
    }

    /// Style flags only, with the layout bits (fragment, columns) cleared.
    #[must_use]
    pub(crate) const fn style_bits(self) -> u32 { self.0 & STYLE_BITS_MASK }

    pub(crate) fn set_style_bits(&mut self, bits: u32) {
        self.0 = (self.0 & !STYLE_BITS_MASK) | (bits & STYLE_BITS_MASK);
    }
}

/// One grid position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub c: Unistr,
    pub attrs: CellAttrs,
    pub colors: ColorTriple,
    pub hyperlink_idx: u32,
}

impl Cell {
    /// An erased cell carrying the given fill colours. Erased cells render as
    /// a single-width space.
    #[must_use]
    pub fn erased(colors: ColorTriple) -> Self {
        let mut attrs = CellAttrs::default();
        attrs.set_columns(1);
        Self {
            c: Unistr::ERASED,
            attrs,
            colors,
            hyperlink_idx: 0,
        }
    }

    /// A glyph head cell.
    #[must_use]
    pub fn glyph(c: Unistr, columns: u8, style: Cell) -> Self {
        let mut attrs = style.attrs;
        attrs.set_fragment(false);
        attrs.set_columns(columns);
        Self {
            c,
            attrs,
            colors: style.colors,
            hyperlink_idx: style.hyperlink_idx,
        }
    }

    /// The continuation cell for a wide glyph: same cluster and style, with
    /// the fragment bit set.
    #[must_use]
    pub fn fragment_of(head: Cell) -> Self {
        let mut cell = head;
        cell.attrs.set_fragment(true);
        cell
    }

    #[must_use]
    pub const fn is_erased(&self) -> bool { self.c.is_erased() }

    #[must_use]
    pub const fn is_fragment(&self) -> bool { self.attrs.fragment() }

    #[must_use]
    pub const fn columns(&self) -> u8 { self.attrs.columns() }
}

#[cfg(test)]
mod tests {
    use super::{Cell, CellAttrs, Underline};
    use crate::color::ColorTriple;
    use crate::unistr::Unistr;

    #[test]
    fn test_cell_is_20_bytes() {
        assert_eq!(std::mem::size_of::<Cell>(), 20);
    }

    #[test]
    fn test_flag_bits_do_not_interfere() {
        let mut attrs = CellAttrs::default();
        attrs.set_bold(true);
        attrs.set_columns(2);
        attrs.set_underline(Underline::Curly);
        attrs.set_fragment(true);
        assert!(attrs.bold());
        assert!(!attrs.italic());
        assert_eq!(attrs.columns(), 2);
        assert_eq!(attrs.underline(), Underline::Curly);
        assert!(attrs.fragment());

        attrs.set_fragment(false);
        assert_eq!(attrs.columns(), 2);
        assert_eq!(attrs.underline(), Underline::Curly);
    }

    #[test]
    fn test_style_bits_exclude_layout() {
        let mut attrs = CellAttrs::default();
        attrs.set_bold(true);
        attrs.set_fragment(true);
        attrs.set_columns(2);
        let mut copy = CellAttrs::default();
        copy.set_style_bits(attrs.style_bits());
        assert!(copy.bold());
        assert!(!copy.fragment());
        assert_eq!(copy.columns(), 0);
    }

    #[test]
    fn test_erased_cell() {
        let cell = Cell::erased(ColorTriple::DEFAULT);
        assert!(cell.is_erased());
        assert!(!cell.is_fragment());
        assert_eq!(cell.columns(), 1);
    }

    #[test]
    fn test_wide_glyph_fragment() {
        let style = Cell::erased(ColorTriple::DEFAULT);
        let head = Cell::glyph(Unistr::from_char('全'), 2, style);
        let frag = Cell::fragment_of(head);
        assert!(!head.is_fragment());
        assert!(frag.is_fragment());
        assert_eq!(frag.c, head.c);
        assert_eq!(frag.columns(), 2);
    }
}
