// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Paragraph reflow on column resize.
//!
//! A paragraph is a maximal run of soft-wrapped rows. On resize, each
//! in-memory paragraph is flattened to its logical cell sequence and re-split
//! at the new width, breaking before any glyph whose span would not fit the
//! remaining space. The cursor keeps its logical offset within its
//! paragraph. Rows already frozen to the streams keep their original wrap.

use std::collections::VecDeque;

use crate::cell::Cell;
use crate::color::ColorTriple;
use crate::ring::Ring;
use crate::row::{Row, RowAttrs};
use crate::units::AbsRow;

/// Cursor position re-anchored by [`rewrap_ring`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorAnchor {
    pub row: AbsRow,
    pub col: usize,
}

/// Reflow every in-memory paragraph of `ring` to `new_cols` columns and
/// re-anchor `cursor` to its logical offset.
pub fn rewrap_ring(ring: &mut Ring, new_cols: usize, fill: &Cell, cursor: &mut CursorAnchor) {
    let new_cols = new_cols.max(1);
    let delta = ring.delta().as_u64();
    let old_rows: Vec<Row> = ring.take_all_rows().into();

    let mut new_rows: VecDeque<Row> = VecDeque::new();
    let mut mapped_cursor: Option<(usize, usize)> = None;

    let mut i = 0usize;
    while i < old_rows.len() {
        // Paragraph rows [i, end): every row before `end - 1` is
        // soft-wrapped into its successor.
        let mut last = i;
        while last + 1 < old_rows.len() && old_rows[last].attrs.soft_wrapped {
            last += 1;
        }
        let end = last + 1;

        // Flatten, tracking the cursor's logical cell offset.
        let bidi = old_rows[i].attrs.bidi_flags;
        let tail_soft_wrap = old_rows[last].attrs.soft_wrapped;
        let mut cells: Vec<Cell> = Vec::new();
        let mut cursor_offset: Option<usize> = None;
        for (k, row) in old_rows[i..end].iter().enumerate() {
            if cursor.row.as_u64() == delta + (i + k) as u64 {
                cursor_offset = Some(cells.len() + cursor.col.min(row.len()));
            }
            let mut row_cells = row.cells.clone();
            if k + 1 == end - i {
                trim_trailing_fill(&mut row_cells);
            }
            cells.extend(row_cells);
        }

        // Re-split at the new width, glyph by glyph.
        let mut cur = Row::with_attrs(RowAttrs {
            soft_wrapped: true,
            bidi_flags: bidi,
        });
        let mut g = 0usize;
        while g < cells.len() {
            let span = 1 + cells[g + 1..]
                .iter()
                .take_while(|c| c.is_fragment())
                .count();
            if !cur.cells.is_empty() && cur.cells.len() + span > new_cols {
                new_rows.push_back(std::mem::replace(
                    &mut cur,
                    Row::with_attrs(RowAttrs {
                        soft_wrapped: true,
                        bidi_flags: bidi,
                    }),
                ));
            }
            for offset in 0..span {
                if cursor_offset == Some(g + offset) {
                    mapped_cursor =
                        Some((new_rows.len(), cur.cells.len().min(new_cols)));
                }
                cur.cells.push(cells[g + offset]);
            }
            cur.truncate_clean(new_cols, fill);
            g += span;
        }
        cur.attrs.soft_wrapped = tail_soft_wrap;
        new_rows.push_back(cur);

        // Cursor past the paragraph's stored cells (or on trimmed fill).
        if let Some(offset) = cursor_offset {
            if mapped_cursor.is_none() {
                let spill = offset.saturating_sub(cells.len());
                let last_idx = new_rows.len() - 1;
                let base = new_rows[last_idx].len();
                mapped_cursor = Some((last_idx, (base + spill).min(new_cols)));
            }
        }
        i = end;
    }

    if let Some((row_idx, col)) = mapped_cursor {
        cursor.row = AbsRow(delta + row_idx as u64);
        cursor.col = col;
    }
    ring.put_rows(new_rows);
}

/// Drop trailing cells that are plain erased fill with default colours; they
/// carry no content and would otherwise pad the paragraph.
fn trim_trailing_fill(cells: &mut Vec<Cell>) {
    while cells.last().is_some_and(|c| {
        c.is_erased() && c.colors == ColorTriple::DEFAULT && c.hyperlink_idx == 0
    }) {
        cells.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::{CursorAnchor, rewrap_ring};
    use crate::cell::Cell;
    use crate::color::ColorTriple;
    use crate::ring::Ring;
    use crate::row::Row;
    use crate::units::AbsRow;
    use crate::unistr::Unistr;

    fn fill() -> Cell { Cell::erased(ColorTriple::DEFAULT) }

    fn push_paragraph(ring: &mut Ring, text: &str, cols: usize) {
        let chars: Vec<char> = text.chars().collect();
        for chunk in chars.chunks(cols) {
            let mut row = Row::new();
            for (i, &c) in chunk.iter().enumerate() {
                row.set_cell(i, Cell::glyph(Unistr::from_char(c), 1, fill()), &fill());
            }
            row.attrs.soft_wrapped = true;
            ring.append(row);
        }
        if let Some(last) = ring.get_mut(ring.next_row().saturating_sub(1)) {
            last.attrs.soft_wrapped = false;
        }
    }

    fn window_text(ring: &mut Ring) -> Vec<String> {
        let delta = ring.delta();
        (0..ring.len() as u64)
            .map(|i| ring.read_row(delta + i).unwrap().text())
            .collect()
    }

    #[test]
    fn test_narrowing_splits_paragraph() {
        let mut ring = Ring::new(32, 64);
        push_paragraph(&mut ring, "abcdefgh", 8);
        let mut cursor = CursorAnchor {
            row: AbsRow::new(0),
            col: 5,
        };
        rewrap_ring(&mut ring, 4, &fill(), &mut cursor);
        assert_eq!(window_text(&mut ring), vec!["abcd", "efgh"]);
        assert!(ring.get(AbsRow::new(0)).unwrap().attrs.soft_wrapped);
        assert!(!ring.get(AbsRow::new(1)).unwrap().attrs.soft_wrapped);
        // Cursor was on 'f' (offset 5) and follows it.
        assert_eq!(cursor.row, AbsRow::new(1));
        assert_eq!(cursor.col, 1);
    }

    #[test]
    fn test_widening_merges_paragraph() {
        let mut ring = Ring::new(32, 64);
        push_paragraph(&mut ring, "abcdefgh", 4);
        assert_eq!(ring.len(), 2);
        let mut cursor = CursorAnchor {
            row: AbsRow::new(1),
            col: 2,
        };
        rewrap_ring(&mut ring, 10, &fill(), &mut cursor);
        assert_eq!(window_text(&mut ring), vec!["abcdefgh"]);
        // Cursor was on 'g' (offset 6).
        assert_eq!(cursor.row, AbsRow::new(0));
        assert_eq!(cursor.col, 6);
    }

    #[test]
    fn test_round_trip_restores_contents() {
        let mut ring = Ring::new(32, 64);
        push_paragraph(&mut ring, "the quick brown fox jumps", 12);
        let before = window_text(&mut ring);
        let mut cursor = CursorAnchor {
            row: AbsRow::new(0),
            col: 0,
        };
        rewrap_ring(&mut ring, 7, &fill(), &mut cursor);
        rewrap_ring(&mut ring, 12, &fill(), &mut cursor);
        assert_eq!(window_text(&mut ring), before);
    }

    #[test]
    fn test_hard_wrapped_rows_do_not_merge() {
        let mut ring = Ring::new(32, 64);
        push_paragraph(&mut ring, "one", 8);
        push_paragraph(&mut ring, "two", 8);
        let mut cursor = CursorAnchor {
            row: AbsRow::new(1),
            col: 0,
        };
        rewrap_ring(&mut ring, 20, &fill(), &mut cursor);
        assert_eq!(window_text(&mut ring), vec!["one", "two"]);
        assert_eq!(cursor.row, AbsRow::new(1));
    }

    #[test]
    fn test_wide_glyph_breaks_before_split() {
        let mut ring = Ring::new(32, 64);
        let mut row = Row::new();
        row.set_cell(0, Cell::glyph(Unistr::from_char('a'), 1, fill()), &fill());
        let wide = Cell::glyph(Unistr::from_char('語'), 2, fill());
        row.set_cell(1, wide, &fill());
        row.set_cell(2, Cell::fragment_of(wide), &fill());
        ring.append(row);
        let mut cursor = CursorAnchor {
            row: AbsRow::new(0),
            col: 1,
        };
        // Width 2 cannot hold 'a' + the wide glyph on one row.
        rewrap_ring(&mut ring, 2, &fill(), &mut cursor);
        assert_eq!(ring.len(), 2);
        assert_eq!(ring.get(AbsRow::new(0)).unwrap().text(), "a");
        assert_eq!(ring.get(AbsRow::new(1)).unwrap().text(), "語");
        assert_eq!(cursor.row, AbsRow::new(1));
        assert_eq!(cursor.col, 0);
    }
}
