// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Regex matching over grid content.
//!
//! [`regex`] wraps pattern compilation (the only fallible part); [`matcher`]
//! holds the tagged match table with cached hit-testing, plus the
//! scrollback search walk.

// Attach.
pub mod matcher;
#[allow(clippy::module_inception)]
pub mod regex;

// Re-export.
pub use matcher::{MatchHit, MatchSet, Span, search};
pub use regex::{RegexFlags, RegexPurpose, SearchError, TermRegex};
