// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Append-only byte streams backing the scrollback ring.
//!
//! Each stream is a logically unbounded byte sequence with three operations:
//! O(1) append, O(1) truncate-tail, and positioned reads. Data lives in a
//! write-behind buffer until a block fills, then spills to an anonymous file
//! created with [`tempfile::tempfile`]: which unlinks the file immediately,
//! so the space is reclaimed when the process exits no matter how. A small
//! LRU of read blocks keeps render/search passes over cold history from
//! hitting the disk once per row.
//!
//! IO failures never surface past this module's `Option` results: a broken
//! stream stops accepting data and reads of lost regions come back `None`.
//! Callers treat a missing row as discarded, which is the contracted
//! degradation for scrollback under resource failure.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

/// Spill granularity and read-cache block size.
const BLOCK_SIZE: usize = 64 * 1024;

/// Number of decompressed blocks kept for reads.
const CACHE_BLOCKS: usize = 4;

#[derive(Debug)]
pub(crate) struct AppendStream {
    file: Option<File>,
    /// Bytes durably in `file`.
    flushed_len: u64,
    /// Write-behind tail, not yet spilled.
    pending: Vec<u8>,
    /// LRU of `(block_index, data)` read blocks; most recent at the back.
    cache: VecDeque<(u64, Box<[u8]>)>,
    /// Set after the first IO failure; the stream drops appends from then on.
    broken: bool,
}

impl AppendStream {
    pub(crate) fn new() -> Self {
        Self {
            file: None,
            flushed_len: 0,
            pending: Vec::new(),
            cache: VecDeque::new(),
            broken: false,
        }
    }

    /// Total length (flushed + pending).
    pub(crate) fn len(&self) -> u64 { self.flushed_len + self.pending.len() as u64 }

    pub(crate) fn is_broken(&self) -> bool { self.broken }

    /// Append bytes; spills full blocks to the backing file.
    pub(crate) fn append(&mut self, bytes: &[u8]) {
        if self.broken {
            return;
        }
        self.pending.extend_from_slice(bytes);
        if self.pending.len() >= BLOCK_SIZE {
            self.spill();
        }
    }

    fn spill(&mut self) {
        let result = (|| -> std::io::Result<()> {
            if self.file.is_none() {
                self.file = Some(tempfile::tempfile()?);
            }
            let file = self.file.as_mut().expect("file created above");
            file.seek(SeekFrom::Start(self.flushed_len))?;
            file.write_all(&self.pending)?;
            Ok(())
        })();
        match result {
            Ok(()) => {
                self.flushed_len += self.pending.len() as u64;
                self.pending.clear();
                // The tail block on disk changed; drop anything cached.
                self.cache.clear();
            }
            Err(err) => {
                tracing::error!("scrollback stream spill failed, history below this point is lost: {err}");
                self.broken = true;
                self.pending.clear();
            }
        }
    }

    /// Truncate to `new_len` bytes. O(1): either shortens the pending tail or
    /// cuts the file length.
    pub(crate) fn truncate(&mut self, new_len: u64) {
        if new_len >= self.len() {
            return;
        }
        if new_len >= self.flushed_len {
            #[allow(clippy::cast_possible_truncation)]
            self.pending.truncate((new_len - self.flushed_len) as usize);
            return;
        }
        self.pending.clear();
        self.cache.clear();
        if let Some(file) = self.file.as_mut() {
            if let Err(err) = file.set_len(new_len) {
                tracing::error!("scrollback stream truncate failed: {err}");
                self.broken = true;
                return;
            }
        }
        self.flushed_len = new_len;
    }

    /// Read exactly `out.len()` bytes starting at `offset`. Returns `None`
    /// when the range is out of bounds or the stream is broken.
    pub(crate) fn read_exact_at(&mut self, offset: u64, out: &mut [u8]) -> Option<()> {
        let end = offset.checked_add(out.len() as u64)?;
        if self.broken || end > self.len() {
            return None;
        }
        let mut written = 0usize;
        // File-backed portion, via the block cache.
        if offset < self.flushed_len {
            #[allow(clippy::cast_possible_truncation)]
            let file_span = (end.min(self.flushed_len) - offset) as usize;
            let mut pos = offset;
            while written < file_span {
                let block_idx = pos / BLOCK_SIZE as u64;
                let block = self.block(block_idx)?;
                #[allow(clippy::cast_possible_truncation)]
                let in_block = (pos % BLOCK_SIZE as u64) as usize;
                let take = (block.len() - in_block).min(file_span - written);
                out[written..written + take]
                    .copy_from_slice(&block[in_block..in_block + take]);
                written += take;
                pos += take as u64;
            }
        }
        // Pending tail.
        if written < out.len() {
            #[allow(clippy::cast_possible_truncation)]
            let start = (offset.max(self.flushed_len) - self.flushed_len) as usize;
            let take = out.len() - written;
            out[written..].copy_from_slice(&self.pending[start..start + take]);
        }
        Some(())
    }

    /// Fetch (and cache) the file block with the given index.
    fn block(&mut self, block_idx: u64) -> Option<&[u8]> {
        if let Some(pos) = self.cache.iter().position(|(idx, _)| *idx == block_idx) {
            // Move to the back (most recently used).
            let entry = self.cache.remove(pos).expect("position came from iter");
            self.cache.push_back(entry);
            return self.cache.back().map(|(_, data)| &**data);
        }
        let start = block_idx * BLOCK_SIZE as u64;
        #[allow(clippy::cast_possible_truncation)]
        let size = (self.flushed_len - start).min(BLOCK_SIZE as u64) as usize;
        let mut data = vec![0u8; size];
        let file = self.file.as_mut()?;
        let result = file
            .seek(SeekFrom::Start(start))
            .and_then(|_| file.read_exact(&mut data));
        if let Err(err) = result {
            tracing::error!("scrollback stream read failed: {err}");
            self.broken = true;
            return None;
        }
        if self.cache.len() >= CACHE_BLOCKS {
            self.cache.pop_front();
        }
        self.cache.push_back((block_idx, data.into_boxed_slice()));
        self.cache.back().map(|(_, data)| &**data)
    }

    /// Drop everything, including the backing file.
    pub(crate) fn reset(&mut self) {
        self.file = None;
        self.flushed_len = 0;
        self.pending.clear();
        self.cache.clear();
        self.broken = false;
    }
}
