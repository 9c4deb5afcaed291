// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Per-row logical ⇄ visual mapping produced by the bidi pass.
//!
//! `width == 0` encodes the trivial LTR row: identity mapping, no shaping,
//! no RTL cells. The renderer asks in visual order; selection and search ask
//! in logical order; both directions stay bijective on `[0, width)`.

use crate::unistr::Unistr;

/// The resolved mapping for one displayed row.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BidiRow {
    /// 0 = trivial LTR (identity, nothing shaped).
    width: usize,
    log2vis: Vec<u16>,
    vis2log: Vec<u16>,
    vis_rtl: Vec<bool>,
    /// Shaped base code point per visual column, where Arabic shaping
    /// replaced it.
    vis_shaped_base: Vec<Option<char>>,
    base_rtl: bool,
    has_foreign: bool,
}

impl BidiRow {
    /// The trivial LTR row.
    #[must_use]
    pub fn trivial() -> Self { Self::default() }

    #[must_use]
    pub(crate) fn build(
        vis2log: Vec<u16>,
        vis_rtl: Vec<bool>,
        vis_shaped_base: Vec<Option<char>>,
        base_rtl: bool,
        has_foreign: bool,
    ) -> Self {
        let width = vis2log.len();
        let mut log2vis = vec![0u16; width];
        for (v, &l) in vis2log.iter().enumerate() {
            if let Some(slot) = log2vis.get_mut(usize::from(l)) {
                #[allow(clippy::cast_possible_truncation)]
                {
                    *slot = v as u16;
                }
            }
        }
        Self {
            width,
            log2vis,
            vis2log,
            vis_rtl,
            vis_shaped_base,
            base_rtl,
            has_foreign,
        }
    }

    /// Width the mapping was resolved for; 0 for the trivial row.
    #[must_use]
    pub fn width(&self) -> usize { self.width }

    #[must_use]
    pub fn is_trivial(&self) -> bool { self.width == 0 }

    #[must_use]
    pub fn base_rtl(&self) -> bool { self.base_rtl }

    /// True when any cell resolved to the opposite directionality of the
    /// paragraph base.
    #[must_use]
    pub fn has_foreign(&self) -> bool { self.has_foreign }

    /// Visual column of a logical cell.
    #[must_use]
    pub fn log2vis(&self, col: usize) -> usize {
        if col < self.width {
            usize::from(self.log2vis[col])
        } else {
            col
        }
    }

    /// Logical cell of a visual column.
    #[must_use]
    pub fn vis2log(&self, col: usize) -> usize {
        if col < self.width {
            usize::from(self.vis2log[col])
        } else {
            col
        }
    }

    /// Directionality at a visual column; off-row columns take the paragraph
    /// base direction.
    #[must_use]
    pub fn vis_is_rtl(&self, col: usize) -> bool {
        self.vis_rtl.get(col).copied().unwrap_or(self.base_rtl)
    }

    /// Directionality of a logical cell.
    #[must_use]
    pub fn log_is_rtl(&self, col: usize) -> bool {
        if col < self.width {
            self.vis_is_rtl(self.log2vis(col))
        } else {
            self.base_rtl
        }
    }

    /// The cluster to draw at a visual column: the shaped base with the
    /// original combining accents re-applied, or `fallback` untouched when
    /// nothing was shaped there.
    #[must_use]
    pub fn vis_get_shaped(&self, col: usize, fallback: Unistr) -> Unistr {
        match self.vis_shaped_base.get(col).copied().flatten() {
            Some(base) => fallback.replace_base(base),
            None => fallback,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BidiRow;
    use crate::unistr::Unistr;

    #[test]
    fn test_trivial_row_is_identity() {
        let row = BidiRow::trivial();
        assert!(row.is_trivial());
        assert_eq!(row.log2vis(5), 5);
        assert_eq!(row.vis2log(7), 7);
        assert!(!row.vis_is_rtl(3));
        let u = Unistr::from_char('x');
        assert_eq!(row.vis_get_shaped(0, u), u);
    }

    #[test]
    fn test_mappings_are_inverse() {
        // Pure RTL of width 4.
        let row = BidiRow::build(
            vec![3, 2, 1, 0],
            vec![true; 4],
            vec![None; 4],
            true,
            false,
        );
        for i in 0..4 {
            assert_eq!(row.log2vis(row.vis2log(i)), i);
            assert_eq!(row.vis2log(row.log2vis(i)), i);
        }
        assert!(row.vis_is_rtl(0));
        // Off-row columns take the base direction.
        assert!(row.vis_is_rtl(10));
    }

    #[test]
    fn test_shaped_base_replacement() {
        let row = BidiRow::build(
            vec![0],
            vec![true],
            vec![Some('\u{FEED}')],
            true,
            false,
        );
        let original = Unistr::from_char('\u{0648}').append_accent('\u{0651}');
        let shaped = row.vis_get_shaped(0, original);
        assert_eq!(shaped.base(), '\u{FEED}');
        assert_eq!(shaped.accents(), original.accents());
    }
}
