// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The mutable terminal state the dispatcher operates on.
//!
//! [`TermState`] owns both screens, the mode and palette state, the current
//! SGR template, charset slots, tab stops, the active DCS consumer and the
//! decoded image list. The [`Terminal`](crate::Terminal) facade wraps it
//! together with the parser and decoders; dispatcher operation modules take
//! a performer holding `&mut TermState`.

use std::time::Instant;

use crate::cell::Cell;
use crate::config::TerminalConfig;
use crate::dispatch::charset::CharsetState;
use crate::events::CursorStyle;
use crate::screen::{Modes, Palette, Screen};
use crate::sixel::{SixelContext, SixelImage};
use crate::tabstops::Tabstops;
use crate::units::AbsRow;
use crate::unistr::Unistr;

/// Bound on the XTWINOPS title stack depth.
const TITLE_STACK_MAX: usize = 10;

/// Active DCS string consumer, selected at hook time.
#[derive(Debug, Default)]
pub enum DcsConsumer {
    #[default]
    None,
    /// `DCS … q`: SIXEL raster.
    Sixel(SixelContext),
    /// `DCS $ q`: DECRQSS request body.
    Rqss(Vec<u8>),
}

/// A decoded SIXEL image anchored to grid content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedImage {
    pub row: AbsRow,
    pub col: usize,
    pub image: SixelImage,
}

/// The most recently printed glyph, for REP and combining-accent append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastGraphic {
    pub row: AbsRow,
    pub col: usize,
    pub c: Unistr,
    pub width: usize,
}

/// Everything the sequence dispatcher reads and mutates.
#[derive(Debug)]
pub struct TermState {
    pub config: TerminalConfig,
    pub modes: Modes,
    pub palette: Palette,
    pub normal: Screen,
    pub alternate: Screen,
    pub tabstops: Tabstops,
    pub charset: CharsetState,

    /// Current SGR template: style bits, colours, and the active hyperlink
    /// index carried into every written cell.
    pub attrs: Cell,
    /// Erase colours: the fill cell for ED/EL/ECH/DCH and scrolling.
    pub erase: Cell,

    pub title: String,
    pub icon_title: String,
    title_stack: Vec<(String, String)>,

    pub cursor_style: CursorStyle,
    pub keypad_application: bool,

    pub dcs: DcsConsumer,
    pub images: Vec<PlacedImage>,
    pub last_graphic: Option<LastGraphic>,
    pub last_bell: Option<Instant>,
}

impl TermState {
    #[must_use]
    pub fn new(rows: usize, cols: usize, config: TerminalConfig) -> Self {
        let scrollback = config.effective_scrollback_rows();
        Self {
            normal: Screen::new(rows, cols, scrollback),
            alternate: Screen::new(rows, cols, 0),
            tabstops: Tabstops::new(cols),
            modes: Modes::default(),
            palette: Palette::default(),
            charset: CharsetState::default(),
            attrs: Cell::erased(crate::color::ColorTriple::DEFAULT),
            erase: Cell::erased(crate::color::ColorTriple::DEFAULT),
            title: String::new(),
            icon_title: String::new(),
            title_stack: Vec::new(),
            cursor_style: CursorStyle::default(),
            keypad_application: false,
            dcs: DcsConsumer::None,
            images: Vec::new(),
            last_graphic: None,
            last_bell: None,
            config,
        }
    }

    /// The screen sequences currently draw to.
    #[must_use]
    pub fn screen(&self) -> &Screen {
        if self.modes.alternate_screen {
            &self.alternate
        } else {
            &self.normal
        }
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        if self.modes.alternate_screen {
            &mut self.alternate
        } else {
            &mut self.normal
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize { self.screen().rows }

    #[must_use]
    pub fn cols(&self) -> usize { self.screen().cols }

    /// Recompute the erase cell after an SGR change: erased cells carry the
    /// current colours (the "erase colour" contract).
    pub fn refresh_erase_cell(&mut self) {
        self.erase = Cell::erased(self.attrs.colors);
    }

    /// Swap the current hyperlink index, adjusting table references.
    pub fn set_current_hyperlink(&mut self, idx: u32) {
        let old = self.attrs.hyperlink_idx;
        if old == idx {
            return;
        }
        if old != 0 {
            self.screen_mut().ring.links.release(old);
        }
        self.attrs.hyperlink_idx = idx;
    }

    /// XTWINOPS 22: push the window/icon titles.
    pub fn push_titles(&mut self) {
        if self.title_stack.len() >= TITLE_STACK_MAX {
            self.title_stack.remove(0);
        }
        self.title_stack
            .push((self.title.clone(), self.icon_title.clone()));
    }

    /// XTWINOPS 23: pop the window/icon titles. Returns the restored pair.
    pub fn pop_titles(&mut self) -> Option<(String, String)> {
        let (title, icon) = self.title_stack.pop()?;
        self.title = title.clone();
        self.icon_title = icon.clone();
        Some((title, icon))
    }

    /// Invalidate REP/combining state (any cursor motion does this).
    pub fn forget_last_graphic(&mut self) { self.last_graphic = None; }

    /// Resolve a cell colour to concrete RGB through the palette.
    /// `default_idx` names the palette slot used for the `Default` sentinel.
    #[must_use]
    pub fn resolve_color(&self, color: crate::color::CellColor, default_idx: u16) -> crate::screen::Rgb {
        use crate::color::CellColor;
        match color {
            CellColor::Default => self.palette.get(default_idx).unwrap_or_default(),
            CellColor::Palette(idx) => self.palette.get(idx).unwrap_or_default(),
            CellColor::Rgb(r, g, b) => crate::screen::Rgb::new(r, g, b),
        }
    }

    /// Flip between the normal and alternate screens.
    pub fn switch_screen(&mut self, to_alternate: bool) {
        if self.modes.alternate_screen == to_alternate {
            return;
        }
        self.modes.alternate_screen = to_alternate;
        self.forget_last_graphic();
        tracing::debug!(alternate = to_alternate, "screen switched");
    }

    /// Full RIS: both screens wiped, every mode, charset and attribute back
    /// to defaults; scrollback retained unless `clear_history`.
    pub fn hard_reset(&mut self, clear_tabstops: bool, clear_history: bool) {
        let rows = self.rows();
        let cols = self.cols();
        self.modes = Modes::default();
        self.palette = Palette::default();
        self.charset = CharsetState::default();
        self.attrs = Cell::erased(crate::color::ColorTriple::DEFAULT);
        self.refresh_erase_cell();
        self.cursor_style = CursorStyle::default();
        self.keypad_application = false;
        self.dcs = DcsConsumer::None;
        self.images.clear();
        self.last_graphic = None;
        self.title_stack.clear();
        if clear_tabstops {
            self.tabstops.clear();
        } else {
            self.tabstops.reset();
        }
        let erase = self.erase;
        self.alternate = Screen::new(rows, cols, 0);
        self.normal.saved = None;
        self.normal.clear_all(&erase);
        if clear_history {
            self.normal.ring.clear_history();
        }
        tracing::debug!(clear_tabstops, clear_history, "terminal hard reset");
    }
}

#[cfg(test)]
mod tests {
    use super::TermState;
    use crate::config::TerminalConfig;

    #[test]
    fn test_screen_selection_follows_mode() {
        let mut state = TermState::new(24, 80, TerminalConfig::default());
        assert!(std::ptr::eq(state.screen(), &state.normal));
        state.modes.alternate_screen = true;
        assert!(std::ptr::eq(state.screen(), &state.alternate));
    }

    #[test]
    fn test_title_stack_bounded() {
        let mut state = TermState::new(4, 10, TerminalConfig::default());
        for i in 0..20 {
            state.title = format!("t{i}");
            state.push_titles();
        }
        let mut depth = 0;
        while state.pop_titles().is_some() {
            depth += 1;
        }
        assert_eq!(depth, 10);
        // The oldest entries were dropped, so the last popped is t10.
        // (pop order: t19 .. t10)
    }

    #[test]
    fn test_hard_reset_restores_defaults() {
        let mut state = TermState::new(4, 10, TerminalConfig::default());
        state.modes.origin = true;
        state.attrs.attrs.set_bold(true);
        state.title = "x".into();
        state.push_titles();
        state.hard_reset(false, false);
        assert!(!state.modes.origin);
        assert!(!state.attrs.attrs.bold());
        assert!(state.pop_titles().is_none());
        assert!(state.tabstops.get(8));
    }
}
