// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # vtcore
//!
//! The data-processing core of a virtual terminal emulator. It consumes the
//! byte stream of a PTY child process, interprets ECMA-48 / DEC / xterm
//! control sequences, maintains a scrollback-capable grid of cells, resolves
//! bidirectional text for display, matches regular expressions against
//! visible content, and exposes a read model (rows, cursor, selection,
//! matches) and a write model (feed bytes, user input, resize, reset) to an
//! embedding presentation layer.
//!
//! ```text
//! PTY bytes ──► [optional PCTERM convert] ──► UTF-8 decoder ──► Parser ──►
//!    events ──► Dispatcher ──► Ring (rows + scrollback) ──► RingView ──► render
//!                    └──► SIXEL subparser (while DCS q is active)
//! ```
//!
//! What is deliberately *not* here: widget/windowing integration, font and
//! glyph work, PTY creation and child supervision, configuration-file
//! parsing. The core is toolkit-agnostic; the embedder implements
//! [`TerminalEvents`] and drives a [`Terminal`].
//!
//! # Quick start
//!
//! ```rust
//! use vtcore::{NullEvents, Terminal, TerminalConfig};
//!
//! let mut term = Terminal::new(24, 80, TerminalConfig::default(), Box::new(NullEvents));
//! term.feed(b"hello \x1b[1;31mworld\x1b[0m\r\n");
//! assert_eq!(term.row_text(0).trim_end(), "hello world");
//! ```
//!
//! # Concurrency
//!
//! The core is single-threaded cooperative: all entry points take `&mut
//! self` and processing returns after a bounded slice. Independent
//! terminals may live on separate threads; the only shared state is the
//! process-wide [`Unistr`] intern table, which synchronises internally.

// Attach.
pub mod bidi;
pub mod cell;
pub mod color;
pub mod config;
pub mod dispatch;
pub mod events;
pub mod input;
pub mod parser;
pub mod pcterm;
pub mod ring;
pub mod ringview;
pub mod row;
pub mod screen;
pub mod search;
pub mod selection;
pub mod sixel;
pub mod tabstops;
pub mod terminal;
pub mod units;
pub mod unistr;
pub mod utf8;
pub mod width;

// Conformance tests: end-to-end byte-stream scenarios over the public API.
#[cfg(test)]
mod conformance_tests;

// Re-export.
pub use bidi::{BidiConfig, BidiRow, mirror};
pub use cell::{Cell, CellAttrs, HYPERLINK_TARGET_IN_STREAM, Underline};
pub use color::{CellColor, ColorTriple};
pub use config::TerminalConfig;
pub use events::{
    ClipboardSelection, CursorStyle, NullEvents, TerminalEvents, WindowOp,
};
pub use input::{Key, Modifiers, MouseButton, MouseEvent, MouseEventKind};
pub use parser::{Params, Parser, Perform};
pub use pcterm::{CharsetConverter, Cp437Converter};
pub use ring::Ring;
pub use ringview::RingView;
pub use row::{Row, RowAttrs};
pub use screen::{Modes, Palette, Rgb, Screen};
pub use search::{MatchHit, RegexFlags, SearchError, Span};
pub use selection::{HalfCell, ResolvedSelection, Selection};
pub use sixel::{SixelContext, SixelImage};
pub use tabstops::Tabstops;
pub use terminal::{PlacedImage, Terminal};
pub use units::{AbsRow, Col, Row as GridRow, TermCol, TermRow, abs_row, col, row};
pub use unistr::Unistr;
pub use utf8::Utf8Decoder;
