// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Cursor motion, tabulation, and DECSC/DECRC.
//!
//! Parameters default to 1 and clamp into the grid. Relative motion is
//! confined by the scrolling region when the cursor starts inside it; CUP,
//! CHA and VPA are absolute, biased by the region origin when DECOM is set.
//! Every motion clears the pending-wrap state and invalidates the
//! REP/combining anchor.

use crate::parser::Params;
use crate::screen::SavedCursor;

use super::super::performer::Performer;

/// Clear pending wrap: a cursor sitting past the right edge moves back onto
/// the last column.
fn clear_pending_wrap(p: &mut Performer<'_>) {
    let screen = p.state.screen_mut();
    screen.cursor.col = screen.cursor.col.min(screen.cols - 1);
}

fn moved(p: &mut Performer<'_>) { p.state.forget_last_graphic(); }

pub fn cursor_up(p: &mut Performer<'_>, params: &Params) {
    let n = usize::from(params.get_nonzero_or(0, 1));
    clear_pending_wrap(p);
    let screen = p.state.screen_mut();
    let grid = screen.cursor_grid_row();
    let top = if grid >= screen.scroll_top { screen.scroll_top } else { 0 };
    let new_grid = grid.saturating_sub(n).max(top);
    screen.cursor.row = screen.row_abs(new_grid);
    moved(p);
}

pub fn cursor_down(p: &mut Performer<'_>, params: &Params) {
    let n = usize::from(params.get_nonzero_or(0, 1));
    clear_pending_wrap(p);
    let screen = p.state.screen_mut();
    let grid = screen.cursor_grid_row();
    let bottom = if grid <= screen.scroll_bottom {
        screen.scroll_bottom
    } else {
        screen.rows - 1
    };
    let new_grid = (grid + n).min(bottom);
    screen.cursor.row = screen.row_abs(new_grid);
    moved(p);
}

pub fn cursor_forward(p: &mut Performer<'_>, params: &Params) {
    let n = usize::from(params.get_nonzero_or(0, 1));
    clear_pending_wrap(p);
    let screen = p.state.screen_mut();
    let right = if screen.cursor.col <= screen.right_margin {
        screen.right_margin
    } else {
        screen.cols - 1
    };
    screen.cursor.col = (screen.cursor.col + n).min(right);
    moved(p);
}

pub fn cursor_backward(p: &mut Performer<'_>, params: &Params) {
    let n = usize::from(params.get_nonzero_or(0, 1));
    clear_pending_wrap(p);
    let screen = p.state.screen_mut();
    let left = if screen.cursor.col >= screen.left_margin {
        screen.left_margin
    } else {
        0
    };
    screen.cursor.col = screen.cursor.col.saturating_sub(n).max(left);
    moved(p);
}

pub fn cursor_next_line(p: &mut Performer<'_>, params: &Params) {
    cursor_down(p, params);
    let screen = p.state.screen_mut();
    screen.cursor.col = screen.left_margin;
}

pub fn cursor_prev_line(p: &mut Performer<'_>, params: &Params) {
    cursor_up(p, params);
    let screen = p.state.screen_mut();
    screen.cursor.col = screen.left_margin;
}

/// CHA / HPA: absolute column, 1-based; biased by the left margin under
/// DECOM.
pub fn cursor_column(p: &mut Performer<'_>, params: &Params) {
    let col = usize::from(params.get_nonzero_or(0, 1)) - 1;
    let origin = p.state.modes.origin;
    let screen = p.state.screen_mut();
    let col = if origin {
        (screen.left_margin + col).min(screen.right_margin)
    } else {
        col.min(screen.cols - 1)
    };
    screen.cursor.col = col;
    moved(p);
}

/// VPA: absolute row, 1-based; biased by the region top under DECOM.
pub fn cursor_row_absolute(p: &mut Performer<'_>, params: &Params) {
    let row = usize::from(params.get_nonzero_or(0, 1)) - 1;
    clear_pending_wrap(p);
    let origin = p.state.modes.origin;
    let screen = p.state.screen_mut();
    let grid = if origin {
        (screen.scroll_top + row).min(screen.scroll_bottom)
    } else {
        row.min(screen.rows - 1)
    };
    screen.cursor.row = screen.row_abs(grid);
    moved(p);
}

/// CUP / HVP.
pub fn cursor_position(p: &mut Performer<'_>, params: &Params) {
    let row = usize::from(params.get_nonzero_or(0, 1)) - 1;
    let col = usize::from(params.get_nonzero_or(1, 1)) - 1;
    let origin = p.state.modes.origin;
    let screen = p.state.screen_mut();
    let (grid, col) = if origin {
        (
            (screen.scroll_top + row).min(screen.scroll_bottom),
            (screen.left_margin + col).min(screen.right_margin),
        )
    } else {
        (row.min(screen.rows - 1), col.min(screen.cols - 1))
    };
    screen.cursor.row = screen.row_abs(grid);
    screen.cursor.col = col;
    moved(p);
}

/// HT / CHT: forward `n` tab stops, stopping at the right edge.
pub fn tab_forward(p: &mut Performer<'_>, params: &Params) {
    let n = usize::from(params.get_nonzero_or(0, 1));
    clear_pending_wrap(p);
    for _ in 0..n {
        let col = p.state.screen().cursor.col;
        let right = p.state.screen().right_margin;
        let next = p.state.tabstops.next_after(col).unwrap_or(right).min(right);
        p.state.screen_mut().cursor.col = next.max(col);
    }
    moved(p);
}

/// CBT: backward `n` tab stops, stopping at the left edge.
pub fn tab_backward(p: &mut Performer<'_>, params: &Params) {
    let n = usize::from(params.get_nonzero_or(0, 1));
    clear_pending_wrap(p);
    for _ in 0..n {
        let col = p.state.screen().cursor.col;
        let prev = p.state.tabstops.previous_before(col).unwrap_or(0);
        p.state.screen_mut().cursor.col = prev;
    }
    moved(p);
}

/// TBC: 0 clears the stop at the cursor, 3 clears all stops.
pub fn tab_clear(p: &mut Performer<'_>, params: &Params) {
    match params.get_or(0, 0) {
        0 => {
            let col = p.state.screen().cursor.col.min(p.state.cols() - 1);
            p.state.tabstops.unset(col);
        }
        3 => p.state.tabstops.clear(),
        other => tracing::warn!(other, "TBC with unsupported selector ignored"),
    }
}

/// HTS: set a stop at the cursor column.
pub fn tab_set(p: &mut Performer<'_>) {
    let col = p.state.screen().cursor.col.min(p.state.cols() - 1);
    p.state.tabstops.set(col);
}

/// DECSC: snapshot cursor, SGR template, erase colours, origin/autowrap
/// flags and charset slots.
pub fn save_cursor(p: &mut Performer<'_>) {
    let snapshot = SavedCursor {
        rel_row: p.state.screen().cursor_grid_row(),
        col: p.state.screen().cursor.col,
        attrs: p.state.attrs,
        erase: p.state.erase,
        origin: p.state.modes.origin,
        reverse: p.state.modes.reverse_video,
        autowrap: p.state.modes.autowrap,
        charset: p.state.charset.encode(),
    };
    p.state.screen_mut().saved = Some(snapshot);
}

/// DECRC: restore the snapshot; with none saved, reset to the power-on
/// cursor state.
pub fn restore_cursor(p: &mut Performer<'_>) {
    let saved = p.state.screen().saved.clone();
    match saved {
        Some(saved) => {
            p.state.attrs = saved.attrs;
            p.state.erase = saved.erase;
            p.state.modes.origin = saved.origin;
            p.state.modes.reverse_video = saved.reverse;
            p.state.modes.autowrap = saved.autowrap;
            p.state.charset = crate::dispatch::charset::CharsetState::decode(saved.charset);
            let screen = p.state.screen_mut();
            let grid = saved.rel_row.min(screen.rows - 1);
            screen.cursor.row = screen.row_abs(grid);
            screen.cursor.col = saved.col.min(screen.cols);
        }
        None => {
            p.state.attrs = crate::cell::Cell::erased(crate::color::ColorTriple::DEFAULT);
            p.state.refresh_erase_cell();
            p.state.modes.origin = false;
            p.state.charset = crate::dispatch::charset::CharsetState::default();
            let screen = p.state.screen_mut();
            screen.cursor.row = screen.insert_delta;
            screen.cursor.col = 0;
        }
    }
    moved(p);
}
