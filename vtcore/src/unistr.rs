// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Interned grapheme clusters.
//!
//! A [`Unistr`] is a 32-bit opaque identifier for one grapheme cluster.
//! Values below `0x8000_0000` are Unicode scalar values used directly; larger
//! values index a process-global intern table holding (base scalar, combining
//! accent list) chains. A cell therefore stays 4 bytes wide no matter how
//! many combining accents pile onto it.
//!
//! The table grows monotonically for the lifetime of the process and ids stay
//! valid across ring and terminal lifetimes, so a frozen scrollback row can be
//! rehydrated years of output later and still resolve its clusters. Interior
//! synchronisation (a read-mostly lock) lets independent terminals on
//! separate threads share the table; these are the only locks in the core.
//!
//! Exhaustion of the 31-bit intern space is not a recoverable condition; it
//! means billions of distinct accent chains, so it aborts.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::sync::{OnceLock, RwLock};

const INTERN_BASE: u32 = 0x8000_0000;

/// One link in an accent chain: the preceding cluster id plus one appended
/// combining scalar.
#[derive(Debug, Clone, Copy)]
struct InternEntry {
    prev: u32,
    accent: char,
}

#[derive(Debug, Default)]
struct InternTable {
    entries: Vec<InternEntry>,
    lookup: FxHashMap<(u32, char), u32>,
}

fn table() -> &'static RwLock<InternTable> {
    static TABLE: OnceLock<RwLock<InternTable>> = OnceLock::new();
    TABLE.get_or_init(|| RwLock::new(InternTable::default()))
}

/// Opaque 32-bit identifier for a grapheme cluster.
///
/// `Unistr::ERASED` (id 0) marks an erased cell, rendered as a space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Unistr(u32);

impl Unistr {
    /// The erased-cell marker.
    pub const ERASED: Unistr = Unistr(0);

    #[must_use]
    pub const fn from_char(c: char) -> Self { Self(c as u32) }

    #[must_use]
    pub const fn as_u32(self) -> u32 { self.0 }

    #[must_use]
    pub const fn from_u32(raw: u32) -> Self { Self(raw) }

    #[must_use]
    pub const fn is_erased(self) -> bool { self.0 == 0 }

    const fn is_interned(self) -> bool { self.0 >= INTERN_BASE }

    /// Append a combining accent, returning the id of the extended cluster.
    ///
    /// Identical (cluster, accent) pairs always return the identical id.
    #[must_use]
    pub fn append_accent(self, accent: char) -> Unistr {
        let key = (self.0, accent);
        if let Some(&id) = table().read().expect("unistr table poisoned").lookup.get(&key)
        {
            return Unistr(id);
        }
        let mut guard = table().write().expect("unistr table poisoned");
        // Racing appenders may have inserted between the locks.
        if let Some(&id) = guard.lookup.get(&key) {
            return Unistr(id);
        }
        let next = u32::try_from(guard.entries.len())
            .ok()
            .and_then(|n| n.checked_add(INTERN_BASE))
            .expect("unistr intern table exhausted");
        guard.entries.push(InternEntry {
            prev: self.0,
            accent,
        });
        guard.lookup.insert(key, next);
        Unistr(next)
    }

    /// The base scalar of the cluster.
    #[must_use]
    pub fn base(self) -> char {
        let mut id = self.0;
        if id >= INTERN_BASE {
            let guard = table().read().expect("unistr table poisoned");
            while id >= INTERN_BASE {
                id = guard.entries[(id - INTERN_BASE) as usize].prev;
            }
        }
        char::from_u32(id).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    /// Replace the base scalar, keeping the accent list.
    #[must_use]
    pub fn replace_base(self, new_base: char) -> Unistr {
        if !self.is_interned() {
            return Unistr::from_char(new_base);
        }
        let mut out = Unistr::from_char(new_base);
        for accent in self.accents() {
            out = out.append_accent(accent);
        }
        out
    }

    /// Scalar count of the cluster (base + accents). Zero for [`ERASED`].
    ///
    /// [`ERASED`]: Unistr::ERASED
    #[must_use]
    pub fn len(self) -> usize {
        if self.is_erased() {
            return 0;
        }
        if !self.is_interned() {
            return 1;
        }
        let guard = table().read().expect("unistr table poisoned");
        let mut id = self.0;
        let mut n = 1usize;
        while id >= INTERN_BASE {
            id = guard.entries[(id - INTERN_BASE) as usize].prev;
            n += 1;
        }
        n
    }

    #[must_use]
    pub fn is_empty(self) -> bool { self.is_erased() }

    /// The combining accents, in append order.
    #[must_use]
    pub fn accents(self) -> SmallVec<[char; 4]> {
        let mut accents: SmallVec<[char; 4]> = SmallVec::new();
        if self.is_interned() {
            let guard = table().read().expect("unistr table poisoned");
            let mut id = self.0;
            while id >= INTERN_BASE {
                let entry = guard.entries[(id - INTERN_BASE) as usize];
                accents.push(entry.accent);
                id = entry.prev;
            }
        }
        accents.reverse();
        accents
    }

    /// Expand to the full scalar sequence (base first). Empty for [`ERASED`].
    ///
    /// [`ERASED`]: Unistr::ERASED
    #[must_use]
    pub fn chars(self) -> SmallVec<[char; 4]> {
        if self.is_erased() {
            return SmallVec::new();
        }
        let mut out: SmallVec<[char; 4]> = SmallVec::new();
        out.push(self.base());
        out.extend(self.accents());
        out
    }

    /// Append the cluster's UTF-8 expansion to `out`. An erased cell appends
    /// nothing.
    pub fn append_utf8(self, out: &mut Vec<u8>) {
        let mut buf = [0u8; 4];
        for c in self.chars() {
            out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        }
    }

    /// Append the cluster to a `String`.
    pub fn append_to_string(self, out: &mut String) {
        for c in self.chars() {
            out.push(c);
        }
    }
}

impl From<char> for Unistr {
    fn from(c: char) -> Self { Self::from_char(c) }
}

impl std::fmt::Display for Unistr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in self.chars() {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}
