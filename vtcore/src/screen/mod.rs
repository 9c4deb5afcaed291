// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Screen state: the grid-and-cursor model the dispatcher mutates.
//!
//! - [`screen`]: the [`Screen`] itself (ring, cursor, viewport, regions).
//! - [`modes`]: ECMA and DEC private mode flags with XTSAVE slots.
//! - [`palette`]: the 256-colour palette plus named slots and the DECSCNM
//!   reverse flag.

// Attach.
pub mod modes;
pub mod palette;
#[allow(clippy::module_inception)]
pub mod screen;

// Re-export.
pub use modes::{Modes, MouseEncoding, MouseProtocol};
pub use palette::{Palette, Rgb};
pub use screen::{Cursor, SavedCursor, Screen};
