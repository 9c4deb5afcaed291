// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! One screen: a ring of rows, a cursor, a viewport anchor and scrolling
//! regions.
//!
//! There are exactly two instances per terminal; normal and alternate; and
//! they differ only in scrollback: the alternate screen's ring is bounded to
//! the visible rows, so its scrolled-off content is discarded rather than
//! frozen.
//!
//! Grid rows are 0-based positions inside the viewport
//! `[insert_delta, insert_delta + rows)`; the cursor is tracked by absolute
//! ring row so scrollback motion never moves it. `cursor.col == cols` is the
//! pending-wrap state: the next graphic wraps before writing when autowrap is
//! on.

use crate::cell::{Cell, HYPERLINK_TARGET_IN_STREAM};
use crate::ring::{CursorAnchor, Ring, rewrap_ring};
use crate::row::Row;
use crate::units::AbsRow;

/// Cursor position: absolute ring row, grid column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub row: AbsRow,
    /// `0..=cols`; the value `cols` is the pending-wrap state.
    pub col: usize,
}

/// Snapshot taken by DECSC and restored by DECRC. The charset and mode parts
/// are owned by the dispatcher state; it stores them here opaquely.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedCursor {
    /// Cursor row relative to the viewport top.
    pub rel_row: usize,
    pub col: usize,
    /// SGR template in effect (colours + style flags).
    pub attrs: Cell,
    /// Erase colours in effect.
    pub erase: Cell,
    pub origin: bool,
    pub reverse: bool,
    pub autowrap: bool,
    /// Charset slot state `(g0, g1, active)` encoded by the dispatcher.
    pub charset: (u8, u8, u8),
}

/// A screen: ring + cursor + viewport + scrolling regions.
#[derive(Debug)]
pub struct Screen {
    pub ring: Ring,
    pub rows: usize,
    pub cols: usize,
    pub cursor: Cursor,
    /// Viewport anchor: the absolute row shown at the top when scrolled to
    /// the bottom.
    pub insert_delta: AbsRow,
    /// Fractional view scroll position, in absolute row units.
    pub scroll_delta: f64,
    /// 0-based inclusive vertical scrolling region (DECSTBM).
    pub scroll_top: usize,
    pub scroll_bottom: usize,
    /// 0-based inclusive horizontal margins (DECSLRM).
    pub left_margin: usize,
    pub right_margin: usize,
    pub saved: Option<SavedCursor>,
    has_scrollback: bool,
}

impl Screen {
    #[must_use]
    pub fn new(rows: usize, cols: usize, scrollback_rows: u64) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let max_rows = rows.saturating_add(
            usize::try_from(scrollback_rows).unwrap_or(usize::MAX),
        );
        // Every cell of the in-memory window may carry a distinct hyperlink.
        let link_capacity = u32::try_from(
            (rows.next_power_of_two() * cols * 4).min(1 << 20),
        )
        .unwrap_or(1 << 20);
        let mut ring = Ring::new(max_rows, link_capacity);
        for _ in 0..rows {
            ring.append(Row::new());
        }
        Self {
            ring,
            rows,
            cols,
            cursor: Cursor::default(),
            insert_delta: AbsRow::new(0),
            scroll_delta: 0.0,
            scroll_top: 0,
            scroll_bottom: rows - 1,
            left_margin: 0,
            right_margin: cols - 1,
            saved: None,
            has_scrollback: scrollback_rows > 0,
        }
    }

    // ─────────────────── rows and coordinates ───────────────────

    /// Absolute row of a grid position.
    #[must_use]
    pub fn row_abs(&self, grid_row: usize) -> AbsRow {
        self.insert_delta + grid_row as u64
    }

    /// Grid row of an absolute row, when visible.
    #[must_use]
    pub fn grid_of(&self, abs: AbsRow) -> Option<usize> {
        if abs < self.insert_delta {
            return None;
        }
        #[allow(clippy::cast_possible_truncation)]
        let grid = (abs - self.insert_delta) as usize;
        (grid < self.rows).then_some(grid)
    }

    /// The cursor's grid row (clamped into the viewport).
    #[must_use]
    pub fn cursor_grid_row(&self) -> usize {
        #[allow(clippy::cast_possible_truncation)]
        let rel = self.cursor.row.offset_from(self.insert_delta) as usize;
        rel.min(self.rows - 1)
    }

    fn ensure_rows_to(&mut self, abs: AbsRow) {
        while self.ring.next_row() <= abs {
            self.ring.append(Row::new());
        }
    }

    /// Mutable access to a visible grid row, creating it if the ring has not
    /// reached it yet.
    pub fn row_mut(&mut self, grid_row: usize) -> &mut Row {
        let abs = self.row_abs(grid_row.min(self.rows - 1));
        self.ensure_rows_to(abs);
        self.ring.get_mut(abs).expect("visible row exists")
    }

    /// Shared access to a visible grid row (empty rows read as erased).
    #[must_use]
    pub fn row(&self, grid_row: usize) -> Option<&Row> {
        self.ring.get(self.row_abs(grid_row))
    }

    // ─────────────────── viewport scrolling ───────────────────

    /// True when the view tracks the live bottom.
    #[must_use]
    pub fn at_bottom(&self) -> bool {
        #[allow(clippy::cast_precision_loss)]
        let bottom = self.insert_delta.as_u64() as f64;
        (self.scroll_delta - bottom).abs() < 1e-9
    }

    /// Jump the view back to the live bottom.
    pub fn scroll_to_bottom(&mut self) {
        #[allow(clippy::cast_precision_loss)]
        {
            self.scroll_delta = self.insert_delta.as_u64() as f64;
        }
    }

    /// Move the view by `delta` rows (negative = into history), clamped to
    /// the available range.
    pub fn scroll_view(&mut self, delta: f64) {
        #[allow(clippy::cast_precision_loss)]
        let low = self.ring.first_row().as_u64() as f64;
        #[allow(clippy::cast_precision_loss)]
        let high = self.insert_delta.as_u64() as f64;
        self.scroll_delta = (self.scroll_delta + delta).clamp(low, high);
    }

    /// Integer top row of the rendered viewport.
    #[must_use]
    pub fn view_top(&self) -> AbsRow {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        AbsRow::new(self.scroll_delta.floor().max(0.0) as u64)
    }

    // ─────────────────── vertical scrolling ───────────────────

    #[must_use]
    fn full_width_margins(&self) -> bool {
        self.left_margin == 0 && self.right_margin == self.cols - 1
    }

    #[must_use]
    fn full_screen_region(&self) -> bool {
        self.scroll_top == 0 && self.scroll_bottom == self.rows - 1
    }

    /// Scroll the region up `n` rows (content moves up). With the full
    /// screen as region on a scrollback screen, scrolled-off rows enter
    /// history; otherwise they are discarded.
    pub fn scroll_region_up(&mut self, n: usize, fill: &Cell) {
        let n = n.min(self.scroll_bottom - self.scroll_top + 1);
        if n == 0 {
            return;
        }
        if self.full_screen_region() && self.full_width_margins() && self.has_scrollback
        {
            let was_at_bottom = self.at_bottom();
            // Rows slide into scrollback: advance the viewport instead of
            // rotating cells.
            self.ensure_rows_to(self.row_abs(self.rows - 1));
            for _ in 0..n {
                self.ring.append(Row::new());
            }
            self.insert_delta += n as u64;
            self.cursor.row += n as u64;
            if was_at_bottom {
                self.scroll_to_bottom();
            }
            return;
        }
        if self.full_width_margins() {
            for _ in 0..n {
                let top = self.row_abs(self.scroll_top);
                let bottom = self.row_abs(self.scroll_bottom);
                self.ensure_rows_to(bottom);
                self.release_links_in_abs_row(top, 0, usize::MAX);
                self.ring.take(top);
                self.ring.insert(bottom, fill_row(fill, self.cols));
            }
            return;
        }
        self.shift_margin_cells(n, true, fill);
    }

    /// Scroll the region down `n` rows (content moves down).
    pub fn scroll_region_down(&mut self, n: usize, fill: &Cell) {
        let n = n.min(self.scroll_bottom - self.scroll_top + 1);
        if n == 0 {
            return;
        }
        if self.full_width_margins() {
            for _ in 0..n {
                let bottom = self.row_abs(self.scroll_bottom);
                self.ensure_rows_to(bottom);
                self.release_links_in_abs_row(bottom, 0, usize::MAX);
                self.ring.take(bottom);
                self.ring.insert(self.row_abs(self.scroll_top), fill_row(fill, self.cols));
            }
            return;
        }
        self.shift_margin_cells(n, false, fill);
    }

    /// Margin-restricted scroll: splice cells between the margins only.
    fn shift_margin_cells(&mut self, n: usize, up: bool, fill: &Cell) {
        let (l, r) = (self.left_margin, self.right_margin);
        let (top, bottom) = (self.scroll_top, self.scroll_bottom);
        let height = bottom - top + 1;
        let n = n.min(height);
        let take_span = |row: &Row| -> Vec<Cell> {
            (l..=r).map(|c| row.cell_or_fill(c, fill)).collect()
        };
        if up {
            for dst in top..=bottom {
                let src = dst + n;
                let span = if src <= bottom {
                    let abs = self.row_abs(src);
                    self.ensure_rows_to(abs);
                    take_span(self.ring.get(abs).expect("ensured"))
                } else {
                    vec![*fill; r - l + 1]
                };
                self.write_margin_span(dst, l, &span, fill);
            }
        } else {
            for dst in (top..=bottom).rev() {
                let span = if dst >= top + n {
                    let abs = self.row_abs(dst - n);
                    self.ensure_rows_to(abs);
                    take_span(self.ring.get(abs).expect("ensured"))
                } else {
                    vec![*fill; r - l + 1]
                };
                self.write_margin_span(dst, l, &span, fill);
            }
        }
    }

    fn write_margin_span(&mut self, grid_row: usize, start: usize, span: &[Cell], fill: &Cell) {
        self.release_links_in(grid_row, start, start + span.len());
        let row = self.row_mut(grid_row);
        // Clean glyphs straddling the span boundaries.
        row.erase_glyph_spanning(start, fill);
        if !span.is_empty() {
            row.erase_glyph_spanning(start + span.len() - 1, fill);
        }
        for (i, cell) in span.iter().enumerate() {
            row.set_cell(start + i, *cell, fill);
        }
    }

    // ─────────────────── line insert/delete ───────────────────

    /// IL: insert `n` blank lines at the cursor row, pushing lines below it
    /// down within the scrolling region.
    pub fn insert_lines(&mut self, n: usize, fill: &Cell) {
        let grid = self.cursor_grid_row();
        if grid < self.scroll_top || grid > self.scroll_bottom {
            return;
        }
        let n = n.min(self.scroll_bottom - grid + 1);
        for _ in 0..n {
            let bottom = self.row_abs(self.scroll_bottom);
            self.ensure_rows_to(bottom);
            self.release_links_in_abs_row(bottom, 0, usize::MAX);
            self.ring.take(bottom);
            self.ring.insert(self.row_abs(grid), fill_row(fill, self.cols));
        }
    }

    /// DL: delete `n` lines at the cursor row, pulling lines below it up
    /// within the scrolling region.
    pub fn delete_lines(&mut self, n: usize, fill: &Cell) {
        let grid = self.cursor_grid_row();
        if grid < self.scroll_top || grid > self.scroll_bottom {
            return;
        }
        let n = n.min(self.scroll_bottom - grid + 1);
        for _ in 0..n {
            let at = self.row_abs(grid);
            self.ensure_rows_to(self.row_abs(self.scroll_bottom));
            self.release_links_in_abs_row(at, 0, usize::MAX);
            self.ring.take(at);
            self.ring
                .insert(self.row_abs(self.scroll_bottom), fill_row(fill, self.cols));
        }
    }

    // ─────────────────── cell writes and erasure ───────────────────

    fn release_links_in_abs_row(&mut self, abs: AbsRow, start: usize, end: usize) {
        let Some(row) = self.ring.get(abs) else { return };
        let end = end.min(row.len());
        let released: Vec<u32> = row.cells[start.min(end)..end]
            .iter()
            .map(|c| c.hyperlink_idx)
            .filter(|&idx| idx != 0 && idx != HYPERLINK_TARGET_IN_STREAM)
            .collect();
        for idx in released {
            self.ring.links.release(idx);
        }
    }

    /// Release hyperlink references held by cells about to be overwritten.
    pub fn release_links_in(&mut self, grid_row: usize, start: usize, end: usize) {
        self.release_links_in_abs_row(self.row_abs(grid_row), start, end);
    }

    /// Write one glyph (head + fragments) at the cursor position. The caller
    /// has resolved width, combining and wrapping; the cursor is not moved.
    pub fn put_glyph(&mut self, glyph: Cell, width: usize, fill: &Cell) {
        let width = width.max(1).min(self.cols);
        let grid = self.cursor_grid_row();
        let col = self.cursor.col.min(self.cols - width);
        self.release_links_in(grid, col, col + width);
        let row = self.row_mut(grid);
        // Take out any wide glyphs the write lands on, whole.
        for i in col..col + width {
            if row.get(i).is_some_and(|c| c.is_fragment() || c.columns() > 1) {
                row.erase_glyph_spanning(i, fill);
            }
        }
        row.set_cell(col, glyph, fill);
        for i in 1..width {
            row.set_cell(col + i, Cell::fragment_of(glyph), fill);
        }
        if glyph.hyperlink_idx != 0 {
            // One reference per written cell; the dispatcher's own "current
            // hyperlink" reference is separate.
            for _ in 0..width {
                self.ring.links.add_ref(glyph.hyperlink_idx);
            }
        }
    }

    /// ECH and friends: erase `[start, end)` of a grid row with `fill`.
    pub fn erase_in_row(&mut self, grid_row: usize, start: usize, end: usize, fill: &Cell) {
        let end = end.min(self.cols);
        if start >= end {
            return;
        }
        self.release_links_in(grid_row, start, end);
        let row = self.row_mut(grid_row);
        row.ensure_len(end, fill);
        row.erase_range(start, end, fill);
    }

    /// Erase whole grid rows `[top, bottom]` with `fill`.
    pub fn erase_rows(&mut self, top: usize, bottom: usize, fill: &Cell) {
        for grid in top..=bottom.min(self.rows - 1) {
            self.release_links_in(grid, 0, usize::MAX);
            let cols = self.cols;
            let row = self.row_mut(grid);
            row.cells.clear();
            row.attrs.soft_wrapped = false;
            row.ensure_len(cols, fill);
        }
    }

    // ─────────────────── resize ───────────────────

    /// Apply new dimensions. With `rewrap` set, soft-wrapped paragraphs
    /// reflow to the new width and the cursor keeps its logical offset;
    /// otherwise rows are truncated (grown rows read as erased).
    pub fn resize(
        &mut self,
        new_rows: usize,
        new_cols: usize,
        scrollback_rows: u64,
        rewrap: bool,
        fill: &Cell,
    ) {
        let new_rows = new_rows.max(1);
        let new_cols = new_cols.max(1);
        self.ring.set_max_rows(new_rows.saturating_add(
            usize::try_from(scrollback_rows).unwrap_or(usize::MAX),
        ));
        self.has_scrollback = scrollback_rows > 0;

        if rewrap && new_cols != self.cols {
            let mut anchor = CursorAnchor {
                row: self.cursor.row,
                col: self.cursor.col,
            };
            rewrap_ring(&mut self.ring, new_cols, fill, &mut anchor);
            self.cursor.row = anchor.row;
            self.cursor.col = anchor.col;
        } else if new_cols < self.cols {
            let delta = self.ring.delta();
            for i in 0..self.ring.len() {
                if let Some(row) = self.ring.get_mut(delta + i as u64) {
                    let truncated = row.len() > new_cols;
                    row.truncate_clean(new_cols, fill);
                    if truncated {
                        row.attrs.soft_wrapped = false;
                    }
                }
            }
        }

        self.rows = new_rows;
        self.cols = new_cols;
        self.scroll_top = 0;
        self.scroll_bottom = new_rows - 1;
        self.left_margin = 0;
        self.right_margin = new_cols - 1;
        self.cursor.col = self.cursor.col.min(new_cols);

        // Keep the cursor inside the viewport: prefer keeping history above.
        let next = self.ring.next_row();
        if self.cursor.row >= next {
            self.cursor.row = next.saturating_sub(1).max(self.ring.delta());
        }
        let min_anchor = self.cursor.row.saturating_sub(new_rows as u64 - 1);
        if self.insert_delta > self.cursor.row {
            self.insert_delta = self.cursor.row;
        }
        if self.insert_delta < min_anchor {
            self.insert_delta = min_anchor;
        }
        if self.insert_delta < self.ring.delta() {
            self.insert_delta = self.ring.delta();
        }
        self.ensure_rows_to(self.row_abs(new_rows - 1));
        self.scroll_to_bottom();
    }

    /// Wipe the screen content (RIS / alternate-screen clear): every visible
    /// row erased, cursor home, regions reset.
    pub fn clear_all(&mut self, fill: &Cell) {
        self.erase_rows(0, self.rows - 1, fill);
        self.cursor = Cursor {
            row: self.insert_delta,
            col: 0,
        };
        self.scroll_top = 0;
        self.scroll_bottom = self.rows - 1;
        self.left_margin = 0;
        self.right_margin = self.cols - 1;
    }
}

fn fill_row(fill: &Cell, cols: usize) -> Row {
    let mut row = Row::new();
    row.ensure_len(cols, fill);
    row
}

#[cfg(test)]
mod tests {
    use super::Screen;
    use crate::cell::Cell;
    use crate::color::{CellColor, ColorTriple};
    use crate::units::AbsRow;
    use crate::unistr::Unistr;

    fn fill() -> Cell { Cell::erased(ColorTriple::DEFAULT) }

    fn put_text(screen: &mut Screen, text: &str) {
        for c in text.chars() {
            let glyph = Cell::glyph(Unistr::from_char(c), 1, fill());
            screen.put_glyph(glyph, 1, &fill());
            screen.cursor.col += 1;
        }
    }

    fn grid_text(screen: &Screen, grid_row: usize) -> String {
        screen.row(grid_row).map(crate::row::Row::text).unwrap_or_default()
    }

    #[test]
    fn test_new_screen_geometry() {
        let screen = Screen::new(24, 80, 100);
        assert_eq!(screen.rows, 24);
        assert_eq!(screen.cols, 80);
        assert_eq!(screen.scroll_bottom, 23);
        assert_eq!(screen.ring.len(), 24);
        assert!(screen.at_bottom());
    }

    #[test]
    fn test_put_glyph_and_read_back() {
        let mut screen = Screen::new(4, 10, 0);
        put_text(&mut screen, "hey");
        assert_eq!(grid_text(&screen, 0), "hey");
        assert_eq!(screen.cursor.col, 3);
    }

    #[test]
    fn test_scroll_up_full_region_pushes_history() {
        let mut screen = Screen::new(2, 10, 100);
        put_text(&mut screen, "one");
        screen.scroll_region_up(1, &fill());
        // Viewport advanced; the old row is above the new viewport top.
        assert_eq!(screen.insert_delta, AbsRow::new(1));
        assert_eq!(screen.ring.read_row(AbsRow::new(0)).unwrap().text(), "one");
        assert!(screen.at_bottom());
    }

    #[test]
    fn test_scroll_up_without_scrollback_rotates() {
        let mut screen = Screen::new(2, 10, 0);
        put_text(&mut screen, "top");
        screen.scroll_region_up(1, &fill());
        assert_eq!(screen.insert_delta, AbsRow::new(0));
        assert_eq!(grid_text(&screen, 0).trim_end(), "");
        // "top" fell off; alternate-style screens keep no history.
    }

    #[test]
    fn test_restricted_region_scroll() {
        let mut screen = Screen::new(4, 10, 100);
        for (i, word) in ["aaa", "bbb", "ccc", "ddd"].iter().enumerate() {
            screen.cursor.row = screen.row_abs(i);
            screen.cursor.col = 0;
            put_text(&mut screen, word);
        }
        screen.scroll_top = 1;
        screen.scroll_bottom = 2;
        screen.scroll_region_up(1, &fill());
        assert_eq!(grid_text(&screen, 0), "aaa");
        assert_eq!(grid_text(&screen, 1), "ccc");
        assert_eq!(grid_text(&screen, 2).trim_end(), "");
        assert_eq!(grid_text(&screen, 3), "ddd");
        // No history was produced.
        assert_eq!(screen.insert_delta, AbsRow::new(0));
    }

    #[test]
    fn test_scroll_down_region() {
        let mut screen = Screen::new(3, 10, 100);
        for (i, word) in ["aaa", "bbb", "ccc"].iter().enumerate() {
            screen.cursor.row = screen.row_abs(i);
            screen.cursor.col = 0;
            put_text(&mut screen, word);
        }
        screen.scroll_region_down(1, &fill());
        assert_eq!(grid_text(&screen, 0).trim_end(), "");
        assert_eq!(grid_text(&screen, 1), "aaa");
        assert_eq!(grid_text(&screen, 2), "bbb");
    }

    #[test]
    fn test_margin_restricted_scroll_touches_margins_only() {
        let mut screen = Screen::new(2, 6, 0);
        screen.cursor.row = screen.row_abs(0);
        put_text(&mut screen, "abcdef");
        screen.cursor.row = screen.row_abs(1);
        screen.cursor.col = 0;
        put_text(&mut screen, "ABCDEF");
        screen.left_margin = 1;
        screen.right_margin = 4;
        screen.scroll_region_up(1, &fill());
        assert_eq!(grid_text(&screen, 0), "aBCDEf");
        assert_eq!(grid_text(&screen, 1), "A    F");
    }

    #[test]
    fn test_insert_and_delete_lines() {
        let mut screen = Screen::new(3, 10, 10);
        for (i, word) in ["aaa", "bbb", "ccc"].iter().enumerate() {
            screen.cursor.row = screen.row_abs(i);
            screen.cursor.col = 0;
            put_text(&mut screen, word);
        }
        screen.cursor.row = screen.row_abs(1);
        screen.insert_lines(1, &fill());
        assert_eq!(grid_text(&screen, 0), "aaa");
        assert_eq!(grid_text(&screen, 1).trim_end(), "");
        assert_eq!(grid_text(&screen, 2), "bbb");

        screen.delete_lines(1, &fill());
        assert_eq!(grid_text(&screen, 1), "bbb");
        assert_eq!(grid_text(&screen, 2).trim_end(), "");
    }

    #[test]
    fn test_erase_preserves_fill_colors() {
        let mut screen = Screen::new(2, 10, 0);
        put_text(&mut screen, "xyz");
        let mut colored = fill();
        colored.colors.set_back(CellColor::Palette(4));
        screen.erase_in_row(0, 1, 3, &colored);
        let row = screen.row(0).unwrap();
        assert!(!row.cells[0].is_erased());
        assert!(row.cells[1].is_erased());
        assert_eq!(row.cells[1].colors.back(), CellColor::Palette(4));
        assert_eq!(row.cells[2].colors.back(), CellColor::Palette(4));
    }

    #[test]
    fn test_wide_glyph_overwrite_clears_whole_glyph() {
        let mut screen = Screen::new(2, 10, 0);
        let wide = Cell::glyph(Unistr::from_char('語'), 2, fill());
        screen.put_glyph(wide, 2, &fill());
        // Overwrite the fragment cell only.
        screen.cursor.col = 1;
        let narrow = Cell::glyph(Unistr::from_char('x'), 1, fill());
        screen.put_glyph(narrow, 1, &fill());
        let row = screen.row(0).unwrap();
        assert!(row.cells[0].is_erased(), "head of the split glyph is erased");
        assert_eq!(row.cells[1].c, Unistr::from_char('x'));
    }

    #[test]
    fn test_resize_without_rewrap_truncates() {
        let mut screen = Screen::new(2, 8, 0);
        put_text(&mut screen, "abcdefgh");
        screen.resize(2, 4, 0, false, &fill());
        assert_eq!(screen.cols, 4);
        assert_eq!(grid_text(&screen, 0), "abcd");
        assert_eq!(screen.right_margin, 3);
    }

    #[test]
    fn test_resize_with_rewrap_reflows_cursor() {
        let mut screen = Screen::new(4, 8, 10);
        put_text(&mut screen, "abcdefgh");
        // Mark as one soft-wrapped paragraph of one row.
        screen.row_mut(0).attrs.soft_wrapped = false;
        screen.cursor.col = 6;
        screen.resize(4, 4, 10, true, &fill());
        assert_eq!(grid_text(&screen, 0), "abcd");
        assert_eq!(grid_text(&screen, 1), "efgh");
        assert_eq!(screen.cursor.row, AbsRow::new(1));
        assert_eq!(screen.cursor.col, 2);
    }

    #[test]
    fn test_clear_all_homes_cursor() {
        let mut screen = Screen::new(3, 10, 0);
        put_text(&mut screen, "dirty");
        screen.scroll_top = 1;
        screen.clear_all(&fill());
        assert_eq!(grid_text(&screen, 0).trim_end(), "");
        assert_eq!(screen.cursor.col, 0);
        assert_eq!(screen.cursor.row, screen.insert_delta);
        assert_eq!(screen.scroll_top, 0);
    }
}
