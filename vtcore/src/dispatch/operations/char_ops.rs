// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Graphic character insertion plus ICH/DCH/REP.
//!
//! `print_char` is the hot path: charset translation, combining-accent
//! attachment, east-asian width, DECAWM wrapping with soft-wrap marking,
//! insert mode, and the glyph write itself.

use crate::cell::Cell;
use crate::parser::Params;
use crate::row::bidi_flags;
use crate::terminal::state::LastGraphic;
use crate::unistr::Unistr;
use crate::width::{char_columns, char_is_combining};

use super::super::performer::Performer;

pub fn print_char(p: &mut Performer<'_>, c: char) {
    let c = p.state.charset.translate(c);

    if char_is_combining(c) {
        attach_accent(p, c);
        return;
    }

    let width = char_columns(c, p.state.config.ambiguous_width);
    if width == 0 {
        return;
    }
    write_glyph(p, Unistr::from_char(c), width);
}

/// Append a combining accent to the most recently printed glyph; with no
/// anchor (start of line, after motion) the accent is dropped.
fn attach_accent(p: &mut Performer<'_>, accent: char) {
    let Some(last) = p.state.last_graphic else {
        return;
    };
    let composed = last.c.append_accent(accent);
    let screen = p.state.screen_mut();
    if let Some(grid) = screen.grid_of(last.row) {
        let row = screen.row_mut(grid);
        for i in 0..last.width {
            if let Some(cell) = row.cells.get_mut(last.col + i) {
                cell.c = composed;
            }
        }
    }
    p.state.last_graphic = Some(LastGraphic {
        c: composed,
        ..last
    });
}

fn write_glyph(p: &mut Performer<'_>, cluster: Unistr, width: usize) {
    let erase = p.state.erase;
    let autowrap = p.state.modes.autowrap;
    let insert = p.state.modes.insert;
    let bidi = if p.state.modes.bidi_support {
        bidi_flags::IMPLICIT | bidi_flags::AUTO
    } else {
        0
    };

    let screen = p.state.screen_mut();
    let width = width.min(screen.cols);
    let boundary = if screen.cursor.col <= screen.right_margin {
        screen.right_margin + 1
    } else {
        screen.cols
    };

    if screen.cursor.col + width > boundary {
        if autowrap {
            let grid = screen.cursor_grid_row();
            screen.row_mut(grid).attrs.soft_wrapped = true;
            screen.cursor.col = screen.left_margin;
            if grid == screen.scroll_bottom {
                screen.scroll_region_up(1, &erase);
            } else if grid < screen.rows - 1 {
                screen.cursor.row = screen.row_abs(grid + 1);
            }
        } else {
            screen.cursor.col = boundary - width;
        }
    }

    let screen = p.state.screen_mut();
    if insert {
        let boundary = if screen.cursor.col <= screen.right_margin {
            screen.right_margin + 1
        } else {
            screen.cols
        };
        let col = screen.cursor.col;
        screen.release_links_in(
            screen.cursor_grid_row(),
            boundary.saturating_sub(width),
            boundary,
        );
        let grid = screen.cursor_grid_row();
        screen.row_mut(grid).insert_cells(col, width, boundary, &erase);
    }

    let glyph = Cell::glyph(
        cluster,
        u8::try_from(width).unwrap_or(1),
        p.state.attrs,
    );
    let screen = p.state.screen_mut();
    let col = screen.cursor.col;
    let row = screen.cursor.row;
    screen.put_glyph(glyph, width, &erase);
    let grid = screen.cursor_grid_row();
    screen.row_mut(grid).attrs.bidi_flags = bidi;
    screen.cursor.col = col + width;

    p.state.last_graphic = Some(LastGraphic {
        row,
        col,
        c: cluster,
        width,
    });
}

/// ICH: insert blank cells at the cursor, shifting the tail towards the
/// right margin.
pub fn insert_chars(p: &mut Performer<'_>, params: &Params) {
    let n = usize::from(params.get_nonzero_or(0, 1));
    let erase = p.state.erase;
    let screen = p.state.screen_mut();
    let col = screen.cursor.col.min(screen.cols - 1);
    let boundary = if col <= screen.right_margin {
        screen.right_margin + 1
    } else {
        screen.cols
    };
    let grid = screen.cursor_grid_row();
    screen.release_links_in(grid, boundary.saturating_sub(n).max(col), boundary);
    screen.row_mut(grid).insert_cells(col, n, boundary, &erase);
    p.state.forget_last_graphic();
}

/// DCH: delete cells at the cursor, pulling the tail left and filling at the
/// right margin with erase-coloured blanks.
pub fn delete_chars(p: &mut Performer<'_>, params: &Params) {
    let n = usize::from(params.get_nonzero_or(0, 1));
    let erase = p.state.erase;
    let screen = p.state.screen_mut();
    let col = screen.cursor.col.min(screen.cols - 1);
    let boundary = if col <= screen.right_margin {
        screen.right_margin + 1
    } else {
        screen.cols
    };
    let n = n.min(boundary - col);
    let grid = screen.cursor_grid_row();
    screen.release_links_in(grid, col, col + n);
    let row = screen.row_mut(grid);
    if boundary < row.len() {
        // A right margin is in effect: splice within it so cells beyond the
        // margin stay put.
        row.ensure_len(boundary, &erase);
        let tail: Vec<Cell> = row.cells[col + n..boundary].to_vec();
        for (i, cell) in tail.iter().enumerate() {
            row.cells[col + i] = *cell;
        }
        for i in boundary - n..boundary {
            row.cells[i] = erase;
        }
    } else {
        row.delete_cells(col, n, &erase);
    }
    p.state.forget_last_graphic();
}

/// REP: repeat the preceding graphic character.
pub fn repeat_preceding(p: &mut Performer<'_>, params: &Params) {
    let n = usize::from(params.get_nonzero_or(0, 1));
    let Some(last) = p.state.last_graphic else {
        return;
    };
    for _ in 0..n {
        write_glyph(p, last.c, last.width);
    }
}
