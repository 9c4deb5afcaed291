// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The row ring: a bounded in-memory window over an unbounded logical row
//! sequence, with frozen rows paged out to the backing streams.
//!
//! Logical row indices `[0, ∞)` grow monotonically. The window
//! `[delta, delta + len)` is held in memory as a `VecDeque`; appending past
//! capacity freezes the front row into the three append-only streams and
//! advances `delta`. Frozen rows are immutable, only read back for
//! rendering, selection and search, so every in-memory row is writable.

use std::collections::VecDeque;

use crate::cell::HYPERLINK_TARGET_IN_STREAM;
use crate::ring::codec::{
    self, DecodedRow, ROW_RECORD_SIZE, RowRecord,
};
use crate::ring::hyperlink::HyperlinkTable;
use crate::ring::stream::AppendStream;
use crate::row::{Row, RowAttrs};
use crate::units::AbsRow;

/// Bounded window + paged-out scrollback for one screen.
#[derive(Debug)]
pub struct Ring {
    max_rows: usize,
    /// Lowest in-memory row index.
    delta: u64,
    rows: VecDeque<Row>,
    /// Lowest row index present in the streams (raised by history clears).
    first_frozen: u64,
    text_stream: AppendStream,
    attr_stream: AppendStream,
    row_stream: AppendStream,
    pub links: HyperlinkTable,
}

impl Ring {
    #[must_use]
    pub fn new(max_rows: usize, link_capacity: u32) -> Self {
        Self {
            max_rows: max_rows.max(1),
            delta: 0,
            rows: VecDeque::new(),
            first_frozen: 0,
            text_stream: AppendStream::new(),
            attr_stream: AppendStream::new(),
            row_stream: AppendStream::new(),
            links: HyperlinkTable::new(link_capacity),
        }
    }

    #[must_use]
    pub fn max_rows(&self) -> usize { self.max_rows }

    /// Lowest in-memory row index.
    #[must_use]
    pub fn delta(&self) -> AbsRow { AbsRow(self.delta) }

    /// Lowest still-mutable row index. Rows freeze at eviction time, so this
    /// coincides with [`delta`](Self::delta).
    #[must_use]
    pub fn writable(&self) -> AbsRow { self.delta() }

    /// In-memory window length.
    #[must_use]
    pub fn len(&self) -> usize { self.rows.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// One past the highest existing row index.
    #[must_use]
    pub fn next_row(&self) -> AbsRow { AbsRow(self.delta + self.rows.len() as u64) }

    /// True for every row that ever existed and has not been dropped by a
    /// history clear; including frozen rows.
    #[must_use]
    pub fn contains(&self, r: AbsRow) -> bool {
        r.as_u64() >= self.first_frozen && r < self.next_row()
    }

    #[must_use]
    pub fn is_in_memory(&self, r: AbsRow) -> bool {
        r.as_u64() >= self.delta && r < self.next_row()
    }

    fn slot(&self, r: AbsRow) -> Option<usize> {
        #[allow(clippy::cast_possible_truncation)]
        self.is_in_memory(r).then(|| (r.as_u64() - self.delta) as usize)
    }

    #[must_use]
    pub fn get(&self, r: AbsRow) -> Option<&Row> {
        self.slot(r).and_then(|i| self.rows.get(i))
    }

    pub fn get_mut(&mut self, r: AbsRow) -> Option<&mut Row> {
        self.slot(r).and_then(|i| self.rows.get_mut(i))
    }

    /// Append a row at the high end, freezing the front row first when the
    /// window is at capacity. Returns the new row's index.
    pub fn append(&mut self, row: Row) -> AbsRow {
        if self.rows.len() >= self.max_rows {
            self.freeze_front();
        }
        let at = self.next_row();
        self.rows.push_back(row);
        at
    }

    /// Insert a row at `r ∈ [delta, delta+len]`, shifting later rows up. May
    /// evict the front when at capacity.
    pub fn insert(&mut self, r: AbsRow, row: Row) {
        if self.rows.len() >= self.max_rows {
            self.freeze_front();
        }
        #[allow(clippy::cast_possible_truncation)]
        let slot = (r.as_u64().max(self.delta) - self.delta) as usize;
        let slot = slot.min(self.rows.len());
        self.rows.insert(slot, row);
    }

    /// Remove an in-memory row, shifting later rows down.
    pub fn remove(&mut self, r: AbsRow) -> Option<Row> {
        let slot = self.slot(r)?;
        let row = self.rows.remove(slot)?;
        self.release_row_links(&row);
        Some(row)
    }

    /// Remove an in-memory row without touching hyperlink refcounts; used
    /// when the row is re-inserted elsewhere (scrolling).
    pub fn take(&mut self, r: AbsRow) -> Option<Row> {
        let slot = self.slot(r)?;
        self.rows.remove(slot)
    }

    /// Soft-wrap flag, consulting the streams for frozen rows.
    pub fn is_soft_wrapped(&mut self, r: AbsRow) -> bool {
        if let Some(row) = self.get(r) {
            return row.attrs.soft_wrapped;
        }
        self.frozen_record(r).is_some_and(|rec| rec.soft_wrapped)
    }

    /// Copy of any existing row: a clone of the in-memory row, or a decode
    /// from the streams for frozen rows. `None` once a row has been dropped
    /// (history clear, stream failure).
    pub fn read_row(&mut self, r: AbsRow) -> Option<Row> {
        if let Some(row) = self.get(r) {
            return Some(row.clone());
        }
        self.read_frozen(r).map(|d| d.row)
    }

    /// The hyperlink target of a cell, resolving the in-stream sentinel for
    /// frozen rows.
    pub fn hyperlink_at(&mut self, r: AbsRow, col: usize) -> Option<String> {
        if let Some(row) = self.get(r) {
            let idx = row.get(col)?.hyperlink_idx;
            return match idx {
                0 => None,
                HYPERLINK_TARGET_IN_STREAM => None,
                idx => self.links.get(idx).map(str::to_owned),
            };
        }
        let decoded = self.read_frozen(r)?;
        decoded
            .links
            .into_iter()
            .find_map(|(i, target)| (i == col).then_some(target))
    }

    /// Freeze the front row into the streams and advance `delta`.
    pub(crate) fn freeze_front(&mut self) {
        let Some(row) = self.rows.pop_front() else {
            return;
        };
        let record = RowRecord {
            text_start: self.text_stream.len(),
            attr_start: self.attr_stream.len(),
            soft_wrapped: row.attrs.soft_wrapped,
            bidi_flags: row.attrs.bidi_flags,
        };
        let (mut text, mut attrs) = (Vec::new(), Vec::new());
        codec::encode_row(&row, &self.links, &mut text, &mut attrs);
        self.row_stream.append(&record.encode());
        self.text_stream.append(&text);
        self.attr_stream.append(&attrs);
        self.release_row_links(&row);
        self.delta += 1;
    }

    fn release_row_links(&mut self, row: &Row) {
        for cell in &row.cells {
            match cell.hyperlink_idx {
                0 | HYPERLINK_TARGET_IN_STREAM => {}
                idx => self.links.release(idx),
            }
        }
    }

    fn frozen_record(&mut self, r: AbsRow) -> Option<RowRecord> {
        if r.as_u64() < self.first_frozen || r.as_u64() >= self.delta {
            return None;
        }
        let offset = (r.as_u64() - self.first_frozen) * ROW_RECORD_SIZE as u64;
        let mut raw = [0u8; ROW_RECORD_SIZE];
        self.row_stream.read_exact_at(offset, &mut raw)?;
        Some(RowRecord::decode(&raw))
    }

    fn read_frozen(&mut self, r: AbsRow) -> Option<DecodedRow> {
        let record = self.frozen_record(r)?;
        let (text_end, attr_end) = match self.frozen_record(r + 1) {
            Some(next) => (next.text_start, next.attr_start),
            None => (self.text_stream.len(), self.attr_stream.len()),
        };
        #[allow(clippy::cast_possible_truncation)]
        let mut text = vec![0u8; (text_end - record.text_start) as usize];
        self.text_stream.read_exact_at(record.text_start, &mut text)?;
        #[allow(clippy::cast_possible_truncation)]
        let mut attrs = vec![0u8; (attr_end - record.attr_start) as usize];
        self.attr_stream.read_exact_at(record.attr_start, &mut attrs)?;
        codec::decode_row(
            &attrs,
            &text,
            RowAttrs {
                soft_wrapped: record.soft_wrapped,
                bidi_flags: record.bidi_flags,
            },
        )
    }

    /// Shrink or grow the window bound. Shrinking freezes excess front rows.
    pub fn set_max_rows(&mut self, max_rows: usize) {
        self.max_rows = max_rows.max(1);
        while self.rows.len() > self.max_rows {
            self.freeze_front();
        }
    }

    /// Drop the frozen history: the streams are reset (backing files
    /// released) and frozen indices become unreachable. In-memory rows are
    /// untouched.
    pub fn clear_history(&mut self) {
        self.text_stream.reset();
        self.attr_stream.reset();
        self.row_stream.reset();
        self.first_frozen = self.delta;
        tracing::debug!(delta = self.delta, "scrollback history cleared");
    }

    /// Discard in-memory rows below `bound` without freezing them (used by
    /// the clear-scrollback operation together with
    /// [`clear_history`](Self::clear_history)).
    pub fn drop_front_until(&mut self, bound: AbsRow) {
        while self.delta < bound.as_u64() {
            let Some(row) = self.rows.pop_front() else { break };
            self.release_row_links(&row);
            self.delta += 1;
        }
    }

    /// Lowest reachable row index (frozen or in-memory).
    #[must_use]
    pub fn first_row(&self) -> AbsRow { AbsRow(self.first_frozen) }

    /// Move the whole in-memory window out, leaving it empty. `delta` is
    /// unchanged; the caller must follow up with [`put_rows`](Self::put_rows).
    pub(crate) fn take_all_rows(&mut self) -> VecDeque<Row> {
        std::mem::take(&mut self.rows)
    }

    /// Replace the in-memory window (after a rewrap), freezing front rows as
    /// needed to honour the capacity bound.
    pub(crate) fn put_rows(&mut self, rows: VecDeque<Row>) {
        self.rows = rows;
        while self.rows.len() > self.max_rows {
            self.freeze_front();
        }
    }
}
