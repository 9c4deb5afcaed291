// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! C0 control handling plus the index-family ESC motions.

use std::time::Instant;

use crate::config::BELL_THROTTLE;

use super::super::performer::Performer;
use super::super::protocols::esc_codes;

pub fn execute(p: &mut Performer<'_>, byte: u8) {
    match byte {
        esc_codes::BEL => bell(p),
        esc_codes::BACKSPACE => backspace(p),
        esc_codes::TAB => {
            super::cursor_ops::tab_forward(p, &crate::parser::Params::new());
        }
        esc_codes::LINE_FEED | esc_codes::VERTICAL_TAB | esc_codes::FORM_FEED => {
            index_down(p);
            if p.state.modes.newline {
                carriage_return(p);
            }
        }
        esc_codes::CARRIAGE_RETURN => carriage_return(p),
        esc_codes::SHIFT_OUT => p.state.charset.active = 1,
        esc_codes::SHIFT_IN => p.state.charset.active = 0,
        _ => {}
    }
}

/// BEL, throttled to the minimum spacing the embedder contract requires.
fn bell(p: &mut Performer<'_>) {
    let now = Instant::now();
    let due = p
        .state
        .last_bell
        .is_none_or(|last| now.duration_since(last) >= BELL_THROTTLE);
    if due {
        p.state.last_bell = Some(now);
        p.events.bell();
    }
}

fn backspace(p: &mut Performer<'_>) {
    let screen = p.state.screen_mut();
    screen.cursor.col = screen.cursor.col.min(screen.cols - 1);
    let left = if screen.cursor.col >= screen.left_margin {
        screen.left_margin
    } else {
        0
    };
    screen.cursor.col = screen.cursor.col.saturating_sub(1).max(left);
    p.state.forget_last_graphic();
}

fn carriage_return(p: &mut Performer<'_>) {
    let screen = p.state.screen_mut();
    screen.cursor.col = if screen.cursor.col >= screen.left_margin {
        screen.left_margin
    } else {
        0
    };
    p.state.forget_last_graphic();
}

/// IND / LF: down one row, scrolling at the region bottom.
pub fn index_down(p: &mut Performer<'_>) {
    let erase = p.state.erase;
    let screen = p.state.screen_mut();
    screen.cursor.col = screen.cursor.col.min(screen.cols - 1);
    let grid = screen.cursor_grid_row();
    if grid == screen.scroll_bottom {
        screen.scroll_region_up(1, &erase);
    } else if grid < screen.rows - 1 {
        screen.cursor.row = screen.row_abs(grid + 1);
    }
    p.state.forget_last_graphic();
}

/// NEL: index plus carriage return.
pub fn next_line(p: &mut Performer<'_>) {
    index_down(p);
    carriage_return(p);
}

/// RI: up one row, scrolling at the region top.
pub fn reverse_index(p: &mut Performer<'_>) {
    let erase = p.state.erase;
    let screen = p.state.screen_mut();
    screen.cursor.col = screen.cursor.col.min(screen.cols - 1);
    let grid = screen.cursor_grid_row();
    if grid == screen.scroll_top {
        screen.scroll_region_down(1, &erase);
    } else if grid > 0 {
        screen.cursor.row = screen.row_abs(grid - 1);
    }
    p.state.forget_last_graphic();
}
