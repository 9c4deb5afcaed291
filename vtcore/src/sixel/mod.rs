// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! SIXEL raster decoding.
//!
//! The decoder is a sub-parser: the control parser recognises `DCS … q`,
//! hands every string-body byte to [`SixelContext::put`], and on unhook
//! [`SixelContext::finish`] yields the indexed raster resolved to RGBA.
//!
//! A sixel data byte (`?`..`~`) encodes six vertical pixels with the LSB on
//! top. Pixels are stored interleaved per 6-pixel scanline in indexed
//! colour; unset pixels stay transparent until resolution, where they take
//! the background register (alpha 0 when the introducer asked for a
//! transparent background). Malformed input never rejects the stream: out of
//! range registers wrap, oversized images clamp, and parsing continues to ST.

// Attach.
pub mod color;
#[allow(clippy::module_inception)]
pub mod context;

// Re-export.
pub use color::{argb, sixel_default_palette};
pub use context::{SixelContext, SixelImage, MAX_HEIGHT, MAX_WIDTH, NUM_REGISTERS};
