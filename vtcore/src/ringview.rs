// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! RingView: a paragraph-aligned cache over the ring.
//!
//! Rendering and search want a consistent snapshot of a row range together
//! with its bidi mappings, decoupled from ongoing ring mutation. The view
//! extends the requested range up and down to paragraph boundaries (capped
//! by the paragraph cutoff), copies the rows, and runs the bidi pass per
//! paragraph. Any ring mutation invalidates the view; `update` rebuilds it
//! on demand. `pause` releases the buffers; the next `update` reallocates.

use crate::bidi::{BidiConfig, BidiRow, resolve_paragraph};
use crate::ring::Ring;
use crate::row::Row;
use crate::units::AbsRow;

/// Cached, paragraph-aligned window of rows plus their bidi mappings.
#[derive(Debug, Default)]
pub struct RingView {
    /// First cached row.
    top: AbsRow,
    rows: Vec<Row>,
    bidi: Vec<BidiRow>,
    /// Requested range (the part guaranteed to have bidi data).
    start: AbsRow,
    len: usize,
    valid: bool,
    paused: bool,
}

impl RingView {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Set the row range the embedder is about to read. Invalidates the
    /// cache if it moved.
    pub fn set_rows(&mut self, start: AbsRow, len: usize) {
        if self.start != start || self.len != len {
            self.start = start;
            self.len = len;
            self.valid = false;
        }
    }

    /// Drop the cached data (ring mutated).
    pub fn invalidate(&mut self) { self.valid = false; }

    /// Release all buffers; the view stays usable and reallocates on the
    /// next [`update`](Self::update).
    pub fn pause(&mut self) {
        self.rows = Vec::new();
        self.bidi = Vec::new();
        self.valid = false;
        self.paused = true;
    }

    #[must_use]
    pub fn is_paused(&self) -> bool { self.paused }

    /// Rebuild the cache if invalid: widen to paragraph boundaries, copy
    /// rows, run the bidi pass per paragraph.
    pub fn update(&mut self, ring: &mut Ring, cols: usize, config: BidiConfig) {
        if self.valid || self.len == 0 {
            return;
        }
        self.paused = false;

        // Walk up to the paragraph start (a row is a continuation when the
        // row above is soft-wrapped).
        let mut top = self.start.as_u64();
        let floor = ring.first_row().as_u64();
        let max_up = config.max_paragraph_lines as u64;
        while top > floor
            && self.start.as_u64() - top < max_up
            && ring.is_soft_wrapped(AbsRow::new(top - 1))
        {
            top -= 1;
        }
        // Walk down past the requested end to the paragraph end.
        let mut end = (self.start.as_u64() + self.len as u64).min(ring.next_row().as_u64());
        let ceiling = ring.next_row().as_u64();
        let mut down = 0u64;
        while end < ceiling
            && down < config.max_paragraph_lines as u64
            && end > 0
            && ring.is_soft_wrapped(AbsRow::new(end - 1))
        {
            end += 1;
            down += 1;
        }

        self.top = AbsRow::new(top);
        self.rows = (top..end)
            .map(|r| ring.read_row(AbsRow::new(r)).unwrap_or_default())
            .collect();

        // Resolve paragraph by paragraph.
        self.bidi = Vec::with_capacity(self.rows.len());
        let mut i = 0usize;
        while i < self.rows.len() {
            let mut last = i;
            while last + 1 < self.rows.len() && self.rows[last].attrs.soft_wrapped {
                last += 1;
            }
            let resolved = resolve_paragraph(&self.rows[i..=last], cols, config);
            self.bidi.extend(resolved);
            i = last + 1;
        }
        self.valid = true;
    }

    #[must_use]
    pub fn is_valid(&self) -> bool { self.valid }

    /// The cached copy of a row, when inside the window.
    #[must_use]
    pub fn row(&self, at: AbsRow) -> Option<&Row> {
        if !self.valid || at < self.top {
            return None;
        }
        #[allow(clippy::cast_possible_truncation)]
        self.rows.get((at - self.top) as usize)
    }

    /// The bidi mapping of a row, when inside the window.
    #[must_use]
    pub fn bidi_row(&self, at: AbsRow) -> Option<&BidiRow> {
        if !self.valid || at < self.top {
            return None;
        }
        #[allow(clippy::cast_possible_truncation)]
        self.bidi.get((at - self.top) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::RingView;
    use crate::bidi::BidiConfig;
    use crate::cell::Cell;
    use crate::color::ColorTriple;
    use crate::ring::Ring;
    use crate::row::{Row, bidi_flags};
    use crate::units::AbsRow;
    use crate::unistr::Unistr;

    fn config() -> BidiConfig {
        BidiConfig {
            enable_bidi: true,
            enable_shaping: true,
            max_paragraph_lines: 500,
        }
    }

    fn fill() -> Cell { Cell::erased(ColorTriple::DEFAULT) }

    fn push_row(ring: &mut Ring, text: &str, soft_wrapped: bool) {
        let mut row = Row::new();
        for (i, c) in text.chars().enumerate() {
            row.set_cell(i, Cell::glyph(Unistr::from_char(c), 1, fill()), &fill());
        }
        row.attrs.soft_wrapped = soft_wrapped;
        row.attrs.bidi_flags = bidi_flags::IMPLICIT | bidi_flags::AUTO;
        ring.append(row);
    }

    #[test]
    fn test_view_covers_requested_range() {
        let mut ring = Ring::new(16, 64);
        for i in 0..6 {
            push_row(&mut ring, &format!("line{i}"), false);
        }
        let mut view = RingView::new();
        view.set_rows(AbsRow::new(2), 3);
        view.update(&mut ring, 10, config());
        assert!(view.is_valid());
        assert_eq!(view.row(AbsRow::new(2)).unwrap().text(), "line2");
        assert_eq!(view.row(AbsRow::new(4)).unwrap().text(), "line4");
        assert!(view.bidi_row(AbsRow::new(3)).unwrap().is_trivial());
    }

    #[test]
    fn test_view_widens_to_paragraph_boundaries() {
        let mut ring = Ring::new(16, 64);
        push_row(&mut ring, "aaa", true);
        push_row(&mut ring, "bbb", true);
        push_row(&mut ring, "ccc", false);
        let mut view = RingView::new();
        // Request only the middle row; the view must pull in rows 0 and 2.
        view.set_rows(AbsRow::new(1), 1);
        view.update(&mut ring, 4, config());
        assert!(view.row(AbsRow::new(0)).is_some());
        assert!(view.row(AbsRow::new(2)).is_some());
    }

    #[test]
    fn test_invalidate_and_rebuild() {
        let mut ring = Ring::new(16, 64);
        push_row(&mut ring, "old", false);
        let mut view = RingView::new();
        view.set_rows(AbsRow::new(0), 1);
        view.update(&mut ring, 4, config());
        assert_eq!(view.row(AbsRow::new(0)).unwrap().text(), "old");

        // Mutate the ring; the cached copy is stale until invalidated.
        ring.get_mut(AbsRow::new(0)).unwrap().set_cell(
            0,
            Cell::glyph(Unistr::from_char('N'), 1, fill()),
            &fill(),
        );
        assert_eq!(view.row(AbsRow::new(0)).unwrap().text(), "old");
        view.invalidate();
        view.update(&mut ring, 4, config());
        assert_eq!(view.row(AbsRow::new(0)).unwrap().text(), "Nld");
    }

    #[test]
    fn test_pause_releases_and_resumes() {
        let mut ring = Ring::new(16, 64);
        push_row(&mut ring, "text", false);
        let mut view = RingView::new();
        view.set_rows(AbsRow::new(0), 1);
        view.update(&mut ring, 8, config());
        view.pause();
        assert!(view.is_paused());
        assert!(view.row(AbsRow::new(0)).is_none());
        view.update(&mut ring, 8, config());
        assert!(!view.is_paused());
        assert_eq!(view.row(AbsRow::new(0)).unwrap().text(), "text");
    }

    #[test]
    fn test_rtl_rows_get_bidi_data() {
        let mut ring = Ring::new(16, 64);
        push_row(&mut ring, "שלום", false);
        let mut view = RingView::new();
        view.set_rows(AbsRow::new(0), 1);
        view.update(&mut ring, 6, config());
        let bidi = view.bidi_row(AbsRow::new(0)).unwrap();
        assert!(bidi.base_rtl());
        assert_eq!(bidi.width(), 6);
    }
}
