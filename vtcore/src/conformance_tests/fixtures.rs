// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Shared fixtures: a standard 24×80 terminal and an event recorder.

use std::cell::RefCell;
use std::rc::Rc;

use crate::events::{ClipboardSelection, CursorStyle, TerminalEvents, WindowOp};
use crate::terminal::Terminal;
use crate::config::TerminalConfig;

/// Events captured as readable lines, shared with the test body.
#[derive(Debug, Default)]
pub struct Recorder {
    pub lines: Rc<RefCell<Vec<String>>>,
}

impl Recorder {
    pub fn new() -> (Self, Rc<RefCell<Vec<String>>>) {
        let lines = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                lines: Rc::clone(&lines),
            },
            lines,
        )
    }

    fn push(&self, line: String) { self.lines.borrow_mut().push(line); }
}

impl TerminalEvents for Recorder {
    fn bell(&mut self) { self.push("bell".into()); }

    fn title_changed(&mut self, title: &str) { self.push(format!("title:{title}")); }

    fn icon_title_changed(&mut self, title: &str) {
        self.push(format!("icon:{title}"));
    }

    fn cwd_uri_changed(&mut self, uri: &str) { self.push(format!("cwd:{uri}")); }

    fn resize_requested(&mut self, cols: u16, rows: u16) {
        self.push(format!("resize:{cols}x{rows}"));
    }

    fn hyperlink_hover_changed(&mut self, uri: Option<&str>) {
        self.push(format!("hover:{}", uri.unwrap_or("-")));
    }

    fn copy_request(&mut self, selection: ClipboardSelection, data: &str) {
        self.push(format!("copy:{selection}:{data}"));
    }

    fn window_op(&mut self, op: WindowOp) { self.push(format!("winop:{op:?}")); }

    fn cursor_style_changed(&mut self, style: CursorStyle) {
        self.push(format!("cursor-style:{style}"));
    }

    fn eof(&mut self) { self.push("eof".into()); }
}

/// A 24×80 terminal with default configuration and an event recorder.
pub fn term() -> (Terminal, Rc<RefCell<Vec<String>>>) {
    let (recorder, lines) = Recorder::new();
    (
        Terminal::new(24, 80, TerminalConfig::default(), Box::new(recorder)),
        lines,
    )
}

/// A terminal with explicit geometry.
pub fn term_sized(rows: usize, cols: usize) -> (Terminal, Rc<RefCell<Vec<String>>>) {
    let (recorder, lines) = Recorder::new();
    (
        Terminal::new(rows, cols, TerminalConfig::default(), Box::new(recorder)),
        lines,
    )
}

/// Row text with trailing blanks removed.
pub fn text(term: &Terminal, grid_row: usize) -> String {
    term.row_text(grid_row).trim_end().to_owned()
}
