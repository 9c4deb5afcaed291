// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Per-ring hyperlink table.
//!
//! Cells carry a small hyperlink index instead of the full `"id;uri"` target;
//! this table owns the strings. Index 0 means "no hyperlink" and
//! [`HYPERLINK_TARGET_IN_STREAM`](crate::cell::HYPERLINK_TARGET_IN_STREAM)
//! marks cells whose target now lives only in the ring's attribute stream.
//!
//! Entries are reference-counted by live cell use. When the last referencing
//! cell is overwritten or frozen out to the streams, the index returns to the
//! free list and may be handed out again for a different target.

use rustc_hash::FxHashMap;

#[derive(Debug, Default)]
struct Entry {
    target: Box<str>,
    refs: u32,
}

/// Index ↔ `"id;uri"` mapping with refcounted reuse.
#[derive(Debug)]
pub struct HyperlinkTable {
    /// Slot 0 is reserved for "no hyperlink" and never allocated.
    entries: Vec<Entry>,
    reverse: FxHashMap<Box<str>, u32>,
    free: Vec<u32>,
    capacity: u32,
}

impl HyperlinkTable {
    /// `capacity` bounds how many distinct targets can be live at once; it is
    /// rounded up so every cell of the in-memory window could carry a unique
    /// index.
    #[must_use]
    pub fn new(capacity: u32) -> Self {
        Self {
            entries: vec![Entry::default()],
            reverse: FxHashMap::default(),
            free: Vec::new(),
            capacity: capacity.next_power_of_two().max(64),
        }
    }

    /// Look up or allocate the index for `target`, taking one reference.
    /// Returns 0 when the table is full (the cell is written without a link).
    pub fn acquire(&mut self, target: &str) -> u32 {
        if target.is_empty() {
            return 0;
        }
        if let Some(&idx) = self.reverse.get(target) {
            self.entries[idx as usize].refs += 1;
            return idx;
        }
        let idx = if let Some(idx) = self.free.pop() {
            idx
        } else if (self.entries.len() as u32) < self.capacity {
            #[allow(clippy::cast_possible_truncation)]
            let idx = self.entries.len() as u32;
            self.entries.push(Entry::default());
            idx
        } else {
            tracing::warn!("hyperlink table full, dropping link target");
            return 0;
        };
        let boxed: Box<str> = target.into();
        self.entries[idx as usize] = Entry {
            target: boxed.clone(),
            refs: 1,
        };
        self.reverse.insert(boxed, idx);
        idx
    }

    /// Take an additional reference on an existing index (cell copied).
    pub fn add_ref(&mut self, idx: u32) {
        if let Some(entry) = self.valid_entry_mut(idx) {
            entry.refs += 1;
        }
    }

    /// Release one reference; frees the slot when the count reaches zero.
    pub fn release(&mut self, idx: u32) {
        let Some(entry) = self.valid_entry_mut(idx) else {
            return;
        };
        entry.refs = entry.refs.saturating_sub(1);
        if entry.refs == 0 {
            let target = std::mem::take(&mut entry.target);
            self.reverse.remove(&target);
            self.free.push(idx);
        }
    }

    /// The `"id;uri"` target for a live index.
    #[must_use]
    pub fn get(&self, idx: u32) -> Option<&str> {
        let entry = self.entries.get(idx as usize)?;
        (idx != 0 && entry.refs > 0).then_some(&*entry.target)
    }

    fn valid_entry_mut(&mut self, idx: u32) -> Option<&mut Entry> {
        if idx == 0 || idx as usize >= self.entries.len() {
            return None;
        }
        let entry = &mut self.entries[idx as usize];
        (entry.refs > 0 || !entry.target.is_empty()).then_some(entry)
    }

    /// Drop every entry (ring reset).
    pub fn clear(&mut self) {
        self.entries.truncate(1);
        self.reverse.clear();
        self.free.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::HyperlinkTable;

    #[test]
    fn test_acquire_dedupes() {
        let mut table = HyperlinkTable::new(64);
        let a = table.acquire("id1;https://example.org");
        let b = table.acquire("id1;https://example.org");
        assert_eq!(a, b);
        assert_ne!(a, 0);
        assert_eq!(table.get(a), Some("id1;https://example.org"));
    }

    #[test]
    fn test_release_frees_and_reuses() {
        let mut table = HyperlinkTable::new(64);
        let a = table.acquire(";https://one.example");
        table.acquire(";https://one.example"); // refs = 2
        table.release(a);
        assert!(table.get(a).is_some());
        table.release(a);
        assert!(table.get(a).is_none());

        let b = table.acquire(";https://two.example");
        assert_eq!(b, a, "freed slot is reused");
        assert_eq!(table.get(b), Some(";https://two.example"));
    }

    #[test]
    fn test_empty_target_is_no_link() {
        let mut table = HyperlinkTable::new(64);
        assert_eq!(table.acquire(""), 0);
        assert!(table.get(0).is_none());
    }

    #[test]
    fn test_capacity_exhaustion_degrades_to_no_link() {
        let mut table = HyperlinkTable::new(1); // rounds up to 64
        for i in 0..63 {
            assert_ne!(table.acquire(&format!(";https://x{i}.example")), 0);
        }
        assert_eq!(table.acquire(";https://overflow.example"), 0);
    }
}
