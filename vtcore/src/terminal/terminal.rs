// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The terminal facade.
//!
//! [`Terminal`] owns the state, the parser and the decoders, and exposes the
//! two surfaces the embedder programs against:
//!
//! - the **write model**: [`feed`](Terminal::feed) PTY bytes (queued, then
//!   processed in bounded slices), user input encoding, resize, reset;
//! - the **read model**: rows, cursor, selection, match hit-testing,
//!   search, the paragraph-aligned [`RingView`], and `write_contents`.
//!
//! Processing is strictly single-threaded: every entry point takes `&mut
//! self`, and embedder callbacks must not re-enter. Parser state persists
//! across slices, so any split of the byte stream produces the same final
//! state.

use std::collections::VecDeque;
use std::io::Write;
use std::time::Instant;

use crate::cell::Cell;
use crate::config::{MAX_PROCESS_TIME, TerminalConfig};
use crate::dispatch::Performer;
use crate::events::TerminalEvents;
use crate::input::{
    self, Key, Modifiers, MouseEvent, encode_paste,
};
use crate::parser::Parser;
use crate::pcterm::CharsetConverter;
use crate::ringview::RingView;
use crate::row::Row;
use crate::search::{
    MatchHit, MatchSet, RegexFlags, RegexPurpose, SearchError, Span, TermRegex, search,
};
use crate::selection::Selection;
use crate::terminal::state::{PlacedImage, TermState};
use crate::units::AbsRow;
use crate::utf8::Utf8Decoder;

/// Bytes handed to the parser per inner step; slices end between steps.
const CHUNK: usize = 4096;

/// End-of-stream drain interval before `eof` fires.
const EOS_DRAIN: std::time::Duration = std::time::Duration::from_millis(100);

/// One virtual terminal.
pub struct Terminal {
    state: TermState,
    parser: Parser,
    utf8: Utf8Decoder,
    pcterm: Option<Box<dyn CharsetConverter>>,
    events: Box<dyn TerminalEvents>,
    /// Reply/input bytes bound for the PTY.
    out: Vec<u8>,
    /// Incoming bytes not yet processed (backpressure accounting).
    queue: VecDeque<u8>,
    view: RingView,
    matches: MatchSet,
    search_regex: Option<TermRegex>,
    pub wrap_around: bool,
    selection: Option<Selection>,
    last_hover: Option<String>,
    eos_at: Option<Instant>,
    eos_fired: bool,
    pending_exit: Option<i32>,
}

impl std::fmt::Debug for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Terminal")
            .field("rows", &self.state.rows())
            .field("cols", &self.state.cols())
            .field("queued", &self.queue.len())
            .finish_non_exhaustive()
    }
}

impl Terminal {
    #[must_use]
    pub fn new(
        rows: usize,
        cols: usize,
        config: TerminalConfig,
        events: Box<dyn TerminalEvents>,
    ) -> Self {
        Self {
            state: TermState::new(rows, cols, config),
            parser: Parser::new(),
            utf8: Utf8Decoder::new(),
            pcterm: None,
            events,
            out: Vec::new(),
            queue: VecDeque::new(),
            view: RingView::new(),
            matches: MatchSet::new(),
            search_regex: None,
            wrap_around: true,
            selection: None,
            last_hover: None,
            eos_at: None,
            eos_fired: false,
            pending_exit: None,
        }
    }

    /// Install (or remove) a legacy-charset converter; the byte stream is
    /// routed through it before UTF-8 decoding.
    pub fn set_charset_converter(&mut self, converter: Option<Box<dyn CharsetConverter>>) {
        self.pcterm = converter;
    }

    // ─────────────────── write model: byte stream ───────────────────

    /// Queue PTY bytes and process a bounded slice.
    ///
    /// Returns true when work remains queued; call
    /// [`process`](Terminal::process) again (next scheduler turn) until it
    /// returns false.
    pub fn feed(&mut self, bytes: &[u8]) -> bool {
        self.queue.extend(bytes);
        self.process()
    }

    /// Process queued bytes for at most one time slice. Returns true when
    /// more work remains.
    pub fn process(&mut self) -> bool {
        let started = Instant::now();
        let had_work = !self.queue.is_empty();
        let cursor_before = self.cursor();

        while !self.queue.is_empty() && started.elapsed() < MAX_PROCESS_TIME {
            let take = self.queue.len().min(CHUNK);
            let chunk: Vec<u8> = self.queue.drain(..take).collect();
            self.run_bytes(&chunk);
        }

        if had_work {
            self.view.invalidate();
            self.matches.invalidate();
            self.events.contents_changed();
            if self.cursor() != cursor_before {
                self.events.cursor_moved();
            }
        }
        let more = !self.queue.is_empty();
        if !more {
            self.maybe_fire_eof();
        }
        more
    }

    fn run_bytes(&mut self, bytes: &[u8]) {
        let converted;
        let input: &[u8] = match self.pcterm.as_mut() {
            Some(converter) => {
                let mut buffer = Vec::with_capacity(bytes.len());
                let consumed = converter.convert(bytes, &mut buffer);
                if consumed < bytes.len() {
                    // Stateful converter stopped early; revisit the tail.
                    for &b in bytes[consumed..].iter().rev() {
                        self.queue.push_front(b);
                    }
                }
                converted = buffer;
                &converted
            }
            None => bytes,
        };
        let mut performer = Performer {
            state: &mut self.state,
            events: &mut *self.events,
            out: &mut self.out,
        };
        let parser = &mut self.parser;
        self.utf8
            .feed(input, &mut |c| parser.advance(&mut performer, c));
    }

    /// Backpressure: true while the reader should keep consuming from the
    /// PTY.
    #[must_use]
    pub fn wants_input(&self) -> bool {
        self.queue.len() < self.state.config.backpressure_high_water
    }

    /// Low-water check for resuming a paused reader.
    #[must_use]
    pub fn drained_below_low_water(&self) -> bool {
        self.queue.len() <= self.state.config.backpressure_low_water
    }

    /// The PTY reached end of stream; `eof` fires after the drain interval.
    pub fn pty_eof(&mut self) {
        if self.eos_at.is_none() {
            self.eos_at = Some(Instant::now());
        }
    }

    /// The child exited; forwarded to the embedder after the EOS drain.
    pub fn child_exited(&mut self, status: i32) {
        self.pending_exit = Some(status);
        self.pty_eof();
    }

    fn maybe_fire_eof(&mut self) {
        if self.eos_fired {
            return;
        }
        let Some(at) = self.eos_at else { return };
        if at.elapsed() >= EOS_DRAIN {
            self.eos_fired = true;
            self.events.eof();
            if let Some(status) = self.pending_exit.take() {
                self.events.child_exited(status);
            }
        }
    }

    // ─────────────────── write model: control ───────────────────

    /// Resize the grid. Soft-wrapped paragraphs reflow when configured.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        let rows = rows.max(1);
        let cols = cols.max(1);
        if rows == self.state.rows() && cols == self.state.cols() {
            return;
        }
        let erase = self.state.erase;
        let scrollback = self.state.config.effective_scrollback_rows();
        let rewrap = self.state.config.rewrap_on_resize;
        self.state.normal.resize(rows, cols, scrollback, rewrap, &erase);
        self.state.alternate.resize(rows, cols, 0, false, &erase);
        self.state.tabstops.resize(cols, true);
        self.view.invalidate();
        self.matches.invalidate();
        self.selection = None;
        self.events.contents_changed();
        tracing::debug!(rows, cols, "terminal resized");
    }

    /// Atomically discard parser state, active DCS hooks, the alternate
    /// screen, saved cursors and the palette; optionally tab stops and the
    /// scrollback history.
    pub fn reset(&mut self, clear_tabstops: bool, clear_history: bool) {
        let mut performer = Performer {
            state: &mut self.state,
            events: &mut *self.events,
            out: &mut self.out,
        };
        self.parser.reset(&mut performer);
        self.utf8.reset();
        self.state.hard_reset(clear_tabstops, clear_history);
        self.selection = None;
        self.view.invalidate();
        self.matches.invalidate();
        self.events.contents_changed();
    }

    // ─────────────────── write model: user input ───────────────────

    pub fn send_key(&mut self, key: Key, mods: Modifiers) {
        input::encode_key(
            key,
            mods,
            self.state.modes.application_cursor,
            self.state.keypad_application,
            &mut self.out,
        );
    }

    /// Returns true when the active mouse protocol reported the event.
    pub fn send_mouse(&mut self, event: MouseEvent) -> bool {
        input::encode_mouse(
            event,
            self.state.modes.mouse_protocol,
            self.state.modes.mouse_encoding,
            &mut self.out,
        )
    }

    /// Focus change; reported to the child only under `?1004`.
    pub fn send_focus(&mut self, focus_in: bool) {
        if self.state.modes.focus_events {
            input::encode_focus(focus_in, &mut self.out);
        }
    }

    pub fn paste(&mut self, text: &str) {
        encode_paste(text, self.state.modes.bracketed_paste, &mut self.out);
    }

    /// Take the bytes queued for the PTY (query replies + encoded input).
    pub fn drain_output(&mut self) -> Vec<u8> { std::mem::take(&mut self.out) }

    // ─────────────────── read model ───────────────────

    #[must_use]
    pub fn rows(&self) -> usize { self.state.rows() }

    #[must_use]
    pub fn cols(&self) -> usize { self.state.cols() }

    /// Full state access for renderers (read-only).
    #[must_use]
    pub fn state(&self) -> &TermState { &self.state }

    /// Cursor as (absolute row, column).
    #[must_use]
    pub fn cursor(&self) -> (AbsRow, usize) {
        let screen = self.state.screen();
        (screen.cursor.row, screen.cursor.col)
    }

    #[must_use]
    pub fn cursor_visible(&self) -> bool { self.state.modes.cursor_visible }

    /// Text of a visible grid row.
    #[must_use]
    pub fn row_text(&self, grid_row: usize) -> String {
        self.state
            .screen()
            .row(grid_row)
            .map(Row::text)
            .unwrap_or_default()
    }

    /// A copy of any reachable row, frozen history included.
    pub fn read_row(&mut self, row: AbsRow) -> Option<Row> {
        self.state.screen_mut().ring.read_row(row)
    }

    /// Decoded SIXEL images in arrival order.
    #[must_use]
    pub fn images(&self) -> &[PlacedImage] { &self.state.images }

    /// Scroll the view by `delta` rows (negative = into history).
    pub fn scroll_view(&mut self, delta: f64) {
        self.state.screen_mut().scroll_view(delta);
    }

    pub fn scroll_to_bottom(&mut self) { self.state.screen_mut().scroll_to_bottom(); }

    /// Update and borrow the paragraph-aligned view for `[start, start+len)`.
    pub fn view_rows(&mut self, start: AbsRow, len: usize) -> &RingView {
        let config = crate::bidi::BidiConfig {
            enable_bidi: self.state.config.enable_bidi && self.state.modes.bidi_support,
            enable_shaping: self.state.config.enable_shaping,
            max_paragraph_lines: self.state.config.max_paragraph_lines,
        };
        let cols = self.state.cols();
        self.view.set_rows(start, len);
        self.view.update(&mut self.state.screen_mut().ring, cols, config);
        &self.view
    }

    /// Release the view's buffers until the next `view_rows`.
    pub fn pause_view(&mut self) { self.view.pause(); }

    // ─────────────────── matches and search ───────────────────

    /// Register a hyperlink-style match pattern; returns its tag.
    pub fn match_add(&mut self, pattern: &str, flags: RegexFlags) -> Result<u32, SearchError> {
        let regex = TermRegex::new(pattern, RegexPurpose::Match, flags)?;
        Ok(self.matches.add(regex))
    }

    /// Like [`match_add`](Terminal::match_add), with a pointer-shape hint
    /// reported back in hits over this pattern.
    pub fn match_add_with_cursor(
        &mut self,
        pattern: &str,
        flags: RegexFlags,
        cursor_hint: Option<&str>,
    ) -> Result<u32, SearchError> {
        let regex = TermRegex::new(pattern, RegexPurpose::Match, flags)?;
        Ok(self.matches.add_with_cursor(regex, cursor_hint))
    }

    pub fn match_remove(&mut self, tag: u32) { self.matches.remove(tag); }

    /// Which registered pattern, if any, covers the cell.
    pub fn check_at(&mut self, row: AbsRow, col: usize) -> Option<MatchHit> {
        let max_lines = self.state.config.max_paragraph_lines;
        self.matches
            .check_at(&mut self.state.screen_mut().ring, row, col, max_lines)
    }

    /// Install the search pattern.
    pub fn set_search(&mut self, pattern: &str, flags: RegexFlags) -> Result<(), SearchError> {
        self.search_regex = Some(TermRegex::new(pattern, RegexPurpose::Search, flags)?);
        Ok(())
    }

    pub fn clear_search(&mut self) { self.search_regex = None; }

    /// Walk rows away from the selection (or the viewport top) looking for
    /// the search pattern.
    pub fn search_next(&mut self, forward: bool) -> Option<Span> {
        let regex = self.search_regex.as_ref()?;
        let from = match self.selection.map(|s| s.resolve()) {
            Some(sel) if forward => sel.end.0 + 1,
            Some(sel) => sel.start.0.saturating_sub(1),
            None => self.state.screen().view_top(),
        };
        let max_lines = self.state.config.max_paragraph_lines;
        search(
            &mut self.state.screen_mut().ring,
            regex,
            from,
            forward,
            self.wrap_around,
            max_lines,
        )
    }

    // ─────────────────── selection and hover ───────────────────

    pub fn set_selection(&mut self, selection: Option<Selection>) {
        if self.selection != selection {
            self.selection = selection;
            self.events.selection_changed();
        }
    }

    #[must_use]
    pub fn selection(&self) -> Option<Selection> { self.selection }

    /// Extract the selected text (logical order, rows joined with newlines
    /// except across soft wraps).
    pub fn selection_text(&mut self) -> Option<String> {
        let resolved = self.selection?.resolve();
        if resolved.is_empty() {
            return None;
        }
        let mut text = String::new();
        let cols = self.state.cols();
        let ring = &mut self.state.screen_mut().ring;
        for r in resolved.start.0.as_u64()..=resolved.end.0.as_u64() {
            let at = AbsRow::new(r);
            let Some(row) = ring.read_row(at) else { continue };
            let (from, to) = if resolved.block {
                (resolved.start.1, resolved.end.1)
            } else {
                let from = if at == resolved.start.0 { resolved.start.1 } else { 0 };
                let to = if at == resolved.end.0 { resolved.end.1 } else { cols };
                (from, to)
            };
            let mut line = String::new();
            for col in from..to.min(row.len()) {
                let cell = row.cells[col];
                if cell.is_fragment() {
                    continue;
                }
                if cell.is_erased() {
                    line.push(' ');
                } else {
                    cell.c.append_to_string(&mut line);
                }
            }
            text.push_str(line.trim_end());
            let joined_by_wrap = !resolved.block && row.attrs.soft_wrapped;
            if r < resolved.end.0.as_u64() && !joined_by_wrap {
                text.push('\n');
            }
        }
        Some(text)
    }

    /// Word boundaries around a cell, for double-click selection. Uses
    /// Unicode word segmentation over the row's logical text; returns `None`
    /// on whitespace or outside the stored row.
    pub fn word_at(&mut self, row: AbsRow, col: usize) -> Option<Span> {
        use unicode_segmentation::UnicodeSegmentation;
        let row_data = self.read_row(row)?;
        let mut text = String::new();
        let mut byte_to_col = Vec::new();
        for (cell_col, cell) in row_data.cells.iter().enumerate() {
            if cell.is_fragment() {
                continue;
            }
            let before = text.len();
            if cell.is_erased() {
                text.push(' ');
            } else {
                cell.c.append_to_string(&mut text);
            }
            for _ in before..text.len() {
                byte_to_col.push(cell_col);
            }
        }
        let target = byte_to_col.iter().rposition(|&c| c <= col)?;
        if byte_to_col[target] != col && !row_data.cells.get(col).is_some_and(Cell::is_fragment) {
            return None;
        }
        for (start, word) in text.split_word_bound_indices() {
            let end = start + word.len();
            if start <= target && target < end {
                if word.trim().is_empty() {
                    return None;
                }
                let end_col = byte_to_col
                    .get(end)
                    .copied()
                    .unwrap_or(row_data.len());
                return Some(Span {
                    start: (row, byte_to_col[start]),
                    end: (row, end_col),
                });
            }
        }
        None
    }

    /// Hit-test the hyperlink under the pointer and notify the embedder when
    /// the hover target changed.
    pub fn hover(&mut self, row: AbsRow, col: usize) {
        let target = self.state.screen_mut().ring.hyperlink_at(row, col);
        if target != self.last_hover {
            self.last_hover = target;
            let uri = self
                .last_hover
                .as_deref()
                .map(|t| t.split_once(';').map_or(t, |(_, uri)| uri));
            self.events.hyperlink_hover_changed(uri);
        }
    }

    // ─────────────────── serialisation ───────────────────

    /// Walk the active screen's ring (frozen history included) and emit
    /// UTF-8 text, optionally with SGR attributes. Read-only.
    pub fn write_contents(
        &mut self,
        out: &mut dyn Write,
        with_attributes: bool,
    ) -> std::io::Result<()> {
        let ring = &mut self.state.screen_mut().ring;
        let first = ring.first_row().as_u64();
        let last = ring.next_row().as_u64();
        let mut previous: Option<Cell> = None;
        for r in first..last {
            let Some(row) = ring.read_row(AbsRow::new(r)) else { continue };
            let mut line = Vec::new();
            for cell in &row.cells {
                if cell.is_fragment() {
                    continue;
                }
                if with_attributes && previous.map(|p| (p.attrs.style_bits(), p.colors))
                    != Some((cell.attrs.style_bits(), cell.colors))
                {
                    line.extend_from_slice(cell_sgr(cell).as_bytes());
                    previous = Some(*cell);
                }
                if cell.is_erased() {
                    line.push(b' ');
                } else {
                    cell.c.append_utf8(&mut line);
                }
            }
            // Trailing blanks carry no information.
            while line.last() == Some(&b' ') {
                line.pop();
            }
            out.write_all(&line)?;
            if !row.attrs.soft_wrapped {
                out.write_all(b"\n")?;
            }
        }
        if with_attributes {
            out.write_all(b"\x1b[0m")?;
        }
        Ok(())
    }
}

/// Minimal SGR transition for one cell's style.
fn cell_sgr(cell: &Cell) -> String {
    use crate::color::CellColor;
    let mut parts: Vec<String> = vec!["0".into()];
    if cell.attrs.bold() {
        parts.push("1".into());
    }
    if cell.attrs.dim() {
        parts.push("2".into());
    }
    if cell.attrs.italic() {
        parts.push("3".into());
    }
    if cell.attrs.underline() != crate::cell::Underline::None {
        parts.push("4".into());
    }
    if cell.attrs.reverse() {
        parts.push("7".into());
    }
    if cell.attrs.strikethrough() {
        parts.push("9".into());
    }
    match cell.colors.fore() {
        CellColor::Default => {}
        CellColor::Palette(idx) if idx < 8 => parts.push(format!("{}", 30 + idx)),
        CellColor::Palette(idx) if idx < 16 => parts.push(format!("{}", 90 + idx - 8)),
        CellColor::Palette(idx) => parts.push(format!("38;5;{idx}")),
        CellColor::Rgb(r, g, b) => parts.push(format!("38;2;{r};{g};{b}")),
    }
    match cell.colors.back() {
        CellColor::Default => {}
        CellColor::Palette(idx) if idx < 8 => parts.push(format!("{}", 40 + idx)),
        CellColor::Palette(idx) if idx < 16 => parts.push(format!("{}", 100 + idx - 8)),
        CellColor::Palette(idx) => parts.push(format!("48;5;{idx}")),
        CellColor::Rgb(r, g, b) => parts.push(format!("48;2;{r};{g};{b}")),
    }
    format!("\x1b[{}m", parts.join(";"))
}
