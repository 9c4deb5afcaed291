// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The terminal: state plus facade.
//!
//! [`state`] holds the mutable model the dispatcher operates on;
//! [`terminal`] wraps it with the parser, decoders and queues into the
//! public [`Terminal`].

// Attach.
pub mod state;
#[allow(clippy::module_inception)]
pub mod terminal;

// Re-export.
pub use state::{DcsConsumer, LastGraphic, PlacedImage, TermState};
pub use terminal::Terminal;
