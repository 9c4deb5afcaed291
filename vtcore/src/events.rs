// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! One-way callbacks from the core to the embedding presentation layer.
//!
//! The terminal holds a single `&mut dyn TerminalEvents` per processing call;
//! every method has an empty default so embedders implement only what they
//! present. Callbacks must not re-enter the terminal; queue any data to feed
//! and feed it after the call returns.

/// Which clipboard an OSC 52 exchange targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum ClipboardSelection {
    Clipboard,
    Primary,
}

/// Cursor shape requested via DECSCUSR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum CursorStyle {
    #[default]
    Default,
    BlinkBlock,
    SteadyBlock,
    BlinkUnderline,
    SteadyUnderline,
    BlinkBar,
    SteadyBar,
}

/// Window manipulations (`CSI … t`) forwarded to the embedder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowOp {
    Deiconify,
    Iconify,
    Move { x: i32, y: i32 },
    ResizePixels { width: u32, height: u32 },
    Raise,
    Lower,
    Refresh,
    ResizeCells { cols: u16, rows: u16 },
    Maximize,
    Unmaximize,
    Fullscreen,
    ExitFullscreen,
}

/// Embedder callback surface.
pub trait TerminalEvents {
    /// BEL received (already throttled to the minimum spacing).
    fn bell(&mut self) {}

    fn title_changed(&mut self, title: &str) { let _ = title; }

    fn icon_title_changed(&mut self, title: &str) { let _ = title; }

    /// OSC 7: the shell reported its working directory.
    fn cwd_uri_changed(&mut self, uri: &str) { let _ = uri; }

    /// OSC 6: the shell reported its current file.
    fn cwf_uri_changed(&mut self, uri: &str) { let _ = uri; }

    fn cursor_moved(&mut self) {}

    fn contents_changed(&mut self) {}

    fn selection_changed(&mut self) {}

    /// Child exit status, forwarded after the end-of-stream drain.
    fn child_exited(&mut self, status: i32) {}

    /// The stream requested a grid resize (DECCOLM, `CSI 8 t`).
    fn resize_requested(&mut self, cols: u16, rows: u16) {
        let _ = (cols, rows);
    }

    fn hyperlink_hover_changed(&mut self, uri: Option<&str>) { let _ = uri; }

    /// OSC 52 write: `data` is the raw base64 payload; policy (and decoding)
    /// is the embedder's.
    fn copy_request(&mut self, selection: ClipboardSelection, data: &str) {
        let _ = (selection, data);
    }

    /// OSC 52 query: the embedder may answer with an OSC 52 reply if policy
    /// allows.
    fn paste_request(&mut self, selection: ClipboardSelection) { let _ = selection; }

    /// OSC-carried terminal properties (notifications, icon images, …).
    fn termprop_changed(&mut self, name: &str, value: &str) {
        let _ = (name, value);
    }

    fn window_op(&mut self, op: WindowOp) { let _ = op; }

    fn cursor_style_changed(&mut self, style: CursorStyle) { let _ = style; }

    /// PTY end-of-stream, after the drain interval.
    fn eof(&mut self) {}
}

/// No-op events sink, for tests and headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEvents;

impl TerminalEvents for NullEvents {}
