// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Query/response sequences: DSR, CPR and device attributes.

use crate::parser::Params;

use super::super::performer::Performer;

/// DSR: 5 reports operating status, 6 reports the cursor position (DECOM
/// biases the reported row; the private form replies with the `?` marker).
pub fn device_status(p: &mut Performer<'_>, params: &Params, private: bool) {
    match params.get_or(0, 0) {
        5 => p.reply("\x1b[0n"),
        6 => {
            let origin = p.state.modes.origin;
            let screen = p.state.screen();
            let grid = screen.cursor_grid_row();
            let row = if origin {
                grid.saturating_sub(screen.scroll_top) + 1
            } else {
                grid + 1
            };
            let col = screen.cursor.col.min(screen.cols - 1) + 1;
            let reply = if private {
                format!("\x1b[?{row};{col}R")
            } else {
                format!("\x1b[{row};{col}R")
            };
            p.reply(&reply);
        }
        other => tracing::warn!(other, "DSR with unsupported selector ignored"),
    }
}

/// DA1: VT220-class with sixel (4), selective erase (6), ANSI colours (22).
pub fn primary_device_attributes(p: &mut Performer<'_>) {
    p.reply("\x1b[?62;1;4;6;9;15;22c");
}

/// DA2: terminal identity and firmware version.
pub fn secondary_device_attributes(p: &mut Performer<'_>) {
    p.reply("\x1b[>65;6003;1c");
}

/// DA3: unit id.
pub fn tertiary_device_attributes(p: &mut Performer<'_>) {
    p.reply("\x1bP!|00000000\x1b\\");
}
