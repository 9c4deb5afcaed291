// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Row storage: bounded in-memory window, paged-out scrollback, hyperlink
//! table and resize reflow.
//!
//! - [`ring`]: the [`Ring`] itself: window management, freeze/evict, reads
//!   of frozen rows.
//! - [`stream`]: append-only byte streams over anonymous temp files.
//! - [`codec`]: row ⇄ stream record encoding.
//! - [`hyperlink`]: refcounted `"id;uri"` interning per ring.
//! - [`rewrap`]: paragraph reflow on column resize.

// Attach.
pub mod codec;
pub mod hyperlink;
pub mod rewrap;
#[allow(clippy::module_inception)]
pub mod ring;
pub mod stream;

// Re-export.
pub use hyperlink::HyperlinkTable;
pub use rewrap::{CursorAnchor, rewrap_ring};
pub use ring::Ring;
