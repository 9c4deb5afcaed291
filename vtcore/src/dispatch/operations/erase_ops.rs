// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! ED / EL / ECH and DECALN.
//!
//! Erasure fills with the erase cell (erased marker plus the current SGR
//! colours) and never moves the cursor. A glyph partially covered by an
//! erase is taken out whole; no lone fragment survives.

use crate::cell::Cell;
use crate::parser::Params;
use crate::unistr::Unistr;

use super::super::performer::Performer;

/// ED: 0 = cursor→end, 1 = start→cursor, 2 = all, 3 = scrollback too.
pub fn erase_display(p: &mut Performer<'_>, params: &Params) {
    let erase = p.state.erase;
    let screen = p.state.screen_mut();
    let grid = screen.cursor_grid_row();
    let col = screen.cursor.col.min(screen.cols - 1);
    match params.get_or(0, 0) {
        0 => {
            let cols = screen.cols;
            screen.erase_in_row(grid, col, cols, &erase);
            if grid + 1 < screen.rows {
                screen.erase_rows(grid + 1, screen.rows - 1, &erase);
            }
        }
        1 => {
            if grid > 0 {
                screen.erase_rows(0, grid - 1, &erase);
            }
            screen.erase_in_row(grid, 0, col + 1, &erase);
        }
        2 => screen.erase_rows(0, screen.rows - 1, &erase),
        3 => {
            // Scrollback clear: everything above the viewport goes, frozen
            // and in-memory alike.
            let top = screen.insert_delta;
            screen.ring.drop_front_until(top);
            screen.ring.clear_history();
            screen.scroll_to_bottom();
        }
        other => tracing::warn!(other, "ED with unsupported selector ignored"),
    }
}

/// EL: 0 = cursor→end, 1 = start→cursor, 2 = whole line.
pub fn erase_line(p: &mut Performer<'_>, params: &Params) {
    let erase = p.state.erase;
    let screen = p.state.screen_mut();
    let grid = screen.cursor_grid_row();
    let col = screen.cursor.col.min(screen.cols - 1);
    let cols = screen.cols;
    match params.get_or(0, 0) {
        0 => screen.erase_in_row(grid, col, cols, &erase),
        1 => screen.erase_in_row(grid, 0, col + 1, &erase),
        2 => screen.erase_in_row(grid, 0, cols, &erase),
        other => tracing::warn!(other, "EL with unsupported selector ignored"),
    }
}

/// ECH: erase `n` cells from the cursor, no shifting.
pub fn erase_chars(p: &mut Performer<'_>, params: &Params) {
    let n = usize::from(params.get_nonzero_or(0, 1));
    let erase = p.state.erase;
    let screen = p.state.screen_mut();
    let grid = screen.cursor_grid_row();
    let col = screen.cursor.col.min(screen.cols - 1);
    let cols = screen.cols;
    screen.erase_in_row(grid, col, (col + n).min(cols), &erase);
}

/// DECALN: fill the screen with `E`, reset margins, home the cursor.
pub fn alignment_test(p: &mut Performer<'_>) {
    let template = p.state.attrs;
    let screen = p.state.screen_mut();
    screen.scroll_top = 0;
    screen.scroll_bottom = screen.rows - 1;
    screen.left_margin = 0;
    screen.right_margin = screen.cols - 1;
    let glyph = Cell::glyph(Unistr::from_char('E'), 1, template);
    for grid in 0..p.state.screen().rows {
        let cols = p.state.screen().cols;
        let screen = p.state.screen_mut();
        screen.release_links_in(grid, 0, usize::MAX);
        let row = screen.row_mut(grid);
        row.cells.clear();
        row.ensure_len(cols, &glyph);
        row.attrs.soft_wrapped = false;
    }
    let screen = p.state.screen_mut();
    screen.cursor.row = screen.insert_delta;
    screen.cursor.col = 0;
    p.state.forget_last_graphic();
}
