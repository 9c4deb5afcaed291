// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Scrolling region and horizontal margin selection.

use crate::parser::Params;

use super::super::performer::Performer;

/// DECSTBM: 1-based inclusive top/bottom. An invalid region snaps to the
/// full screen; the cursor homes (to the region origin under DECOM).
pub fn set_top_bottom_margins(p: &mut Performer<'_>, params: &Params) {
    let rows = p.state.rows();
    let top = usize::from(params.get_nonzero_or(0, 1));
    let bottom = usize::from(params.get_nonzero_or(1, u16::try_from(rows).unwrap_or(u16::MAX)));
    let (top, bottom) = if top < bottom && bottom <= rows {
        (top - 1, bottom - 1)
    } else {
        (0, rows - 1)
    };
    let origin = p.state.modes.origin;
    let screen = p.state.screen_mut();
    screen.scroll_top = top;
    screen.scroll_bottom = bottom;
    let (home_row, home_col) = if origin {
        (top, screen.left_margin)
    } else {
        (0, 0)
    };
    screen.cursor.row = screen.row_abs(home_row);
    screen.cursor.col = home_col;
    p.state.forget_last_graphic();
}

/// DECSLRM: 1-based inclusive left/right margins (DECLRMM gates the
/// dispatch). Invalid margins snap to the full width.
pub fn set_left_right_margins(p: &mut Performer<'_>, params: &Params) {
    let cols = p.state.cols();
    let left = usize::from(params.get_nonzero_or(0, 1));
    let right = usize::from(params.get_nonzero_or(1, u16::try_from(cols).unwrap_or(u16::MAX)));
    let (left, right) = if left < right && right <= cols {
        (left - 1, right - 1)
    } else {
        (0, cols - 1)
    };
    let origin = p.state.modes.origin;
    let screen = p.state.screen_mut();
    screen.left_margin = left;
    screen.right_margin = right;
    let (home_row, home_col) = if origin {
        (screen.scroll_top, left)
    } else {
        (0, 0)
    };
    screen.cursor.row = screen.row_abs(home_row);
    screen.cursor.col = home_col;
    p.state.forget_last_graphic();
}
