// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Per-terminal configuration and process-wide tunables.
//!
//! The core does no configuration-file or command-line parsing; the embedder
//! constructs a [`TerminalConfig`] and hands it to
//! [`Terminal::new`](crate::Terminal::new).

use std::time::Duration;

/// Hard cap on scrollback rows when the embedder asks for unlimited history.
pub const MAX_SCROLLBACK_ROWS: u64 = 64 * 1024 * 1024;

/// Default distance between tab stops.
pub const TAB_WIDTH: usize = 8;

/// Bounded work slice: `Terminal::feed` returns to the caller once this much
/// wall-clock time has been consumed, preserving parser state for the next
/// chunk.
pub const MAX_PROCESS_TIME: Duration = Duration::from_millis(100);

/// Minimum spacing of bell callbacks delivered to the embedder.
pub const BELL_THROTTLE: Duration = Duration::from_millis(100);

/// Paragraphs longer than this many rows skip the full bidirectional
/// algorithm and take the explicit path.
pub const DEFAULT_MAX_PARAGRAPH_LINES: usize = 500;

/// Configuration for one [`Terminal`](crate::Terminal) instance.
///
/// All fields have working defaults; use the `with_*` builders to adjust.
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalConfig {
    /// Scrollback rows kept beyond the visible screen. `0` disables
    /// scrollback, `-1` requests the practical maximum
    /// ([`MAX_SCROLLBACK_ROWS`]).
    pub scrollback_lines: i64,
    /// Display width of East Asian ambiguous-width characters: 1 or 2.
    pub ambiguous_width: u8,
    /// Reflow soft-wrapped paragraphs on column resize. When off, rows are
    /// truncated or padded instead (the grid always adopts the new width).
    pub rewrap_on_resize: bool,
    /// Run the Unicode bidirectional algorithm over displayed paragraphs.
    pub enable_bidi: bool,
    /// Shape Arabic text to presentation forms.
    pub enable_shaping: bool,
    /// Paragraph-length cutoff for the full bidirectional algorithm.
    pub max_paragraph_lines: usize,
    /// Incoming-queue size above which the reader should stop consuming from
    /// the PTY.
    pub backpressure_high_water: usize,
    /// Queue size below which the reader may resume.
    pub backpressure_low_water: usize,
    /// Reset the SIXEL color registers on every `DCS q` entry when the
    /// introducer requests private registers.
    pub sixel_private_registers_reset: bool,
    /// Nominal cell size in pixels, used to convert SIXEL rasters to cell
    /// spans and to answer pixel-size queries (`CSI 14 t`).
    pub cell_width_px: u16,
    pub cell_height_px: u16,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            scrollback_lines: 512,
            ambiguous_width: 1,
            rewrap_on_resize: true,
            enable_bidi: true,
            enable_shaping: true,
            max_paragraph_lines: DEFAULT_MAX_PARAGRAPH_LINES,
            backpressure_high_water: 1024 * 1024,
            backpressure_low_water: 256 * 1024,
            sixel_private_registers_reset: true,
            cell_width_px: 10,
            cell_height_px: 20,
        }
    }
}

impl TerminalConfig {
    #[must_use]
    pub fn with_scrollback_lines(mut self, lines: i64) -> Self {
        self.scrollback_lines = lines;
        self
    }

    #[must_use]
    pub fn with_ambiguous_width(mut self, width: u8) -> Self {
        debug_assert!(width == 1 || width == 2);
        self.ambiguous_width = width.clamp(1, 2);
        self
    }

    #[must_use]
    pub fn with_rewrap_on_resize(mut self, rewrap: bool) -> Self {
        self.rewrap_on_resize = rewrap;
        self
    }

    #[must_use]
    pub fn with_bidi(mut self, enable: bool) -> Self {
        self.enable_bidi = enable;
        self
    }

    #[must_use]
    pub fn with_shaping(mut self, enable: bool) -> Self {
        self.enable_shaping = enable;
        self
    }

    #[must_use]
    pub fn with_max_paragraph_lines(mut self, lines: usize) -> Self {
        self.max_paragraph_lines = lines.max(1);
        self
    }

    #[must_use]
    pub fn with_sixel_private_registers_reset(mut self, reset: bool) -> Self {
        self.sixel_private_registers_reset = reset;
        self
    }

    /// Effective scrollback row count after clamping the sentinel values.
    #[must_use]
    pub fn effective_scrollback_rows(&self) -> u64 {
        if self.scrollback_lines < 0 {
            MAX_SCROLLBACK_ROWS
        } else {
            #[allow(clippy::cast_sign_loss)]
            (self.scrollback_lines as u64).min(MAX_SCROLLBACK_ROWS)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MAX_SCROLLBACK_ROWS, TerminalConfig};

    #[test]
    fn test_scrollback_sentinels() {
        let unlimited = TerminalConfig::default().with_scrollback_lines(-1);
        assert_eq!(unlimited.effective_scrollback_rows(), MAX_SCROLLBACK_ROWS);

        let none = TerminalConfig::default().with_scrollback_lines(0);
        assert_eq!(none.effective_scrollback_rows(), 0);
    }

    #[test]
    fn test_ambiguous_width_clamped() {
        let cfg = TerminalConfig::default().with_ambiguous_width(2);
        assert_eq!(cfg.ambiguous_width, 2);
    }
}
