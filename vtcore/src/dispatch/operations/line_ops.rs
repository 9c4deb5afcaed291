// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! IL / DL and SU / SD.

use crate::parser::Params;

use super::super::performer::Performer;

/// IL: insert blank lines at the cursor row (cursor to the left margin).
pub fn insert_lines(p: &mut Performer<'_>, params: &Params) {
    let n = usize::from(params.get_nonzero_or(0, 1));
    let erase = p.state.erase;
    let screen = p.state.screen_mut();
    screen.insert_lines(n, &erase);
    screen.cursor.col = screen.left_margin;
    p.state.forget_last_graphic();
}

/// DL: delete lines at the cursor row (cursor to the left margin).
pub fn delete_lines(p: &mut Performer<'_>, params: &Params) {
    let n = usize::from(params.get_nonzero_or(0, 1));
    let erase = p.state.erase;
    let screen = p.state.screen_mut();
    screen.delete_lines(n, &erase);
    screen.cursor.col = screen.left_margin;
    p.state.forget_last_graphic();
}

/// SU: scroll the region up without moving the cursor's screen position.
pub fn scroll_up(p: &mut Performer<'_>, params: &Params) {
    let n = usize::from(params.get_nonzero_or(0, 1));
    let erase = p.state.erase;
    p.state.screen_mut().scroll_region_up(n, &erase);
    p.state.forget_last_graphic();
}

/// SD: scroll the region down without moving the cursor's screen position.
pub fn scroll_down(p: &mut Performer<'_>, params: &Params) {
    let n = usize::from(params.get_nonzero_or(0, 1));
    let erase = p.state.erase;
    p.state.screen_mut().scroll_region_down(n, &erase);
    p.state.forget_last_graphic();
}
