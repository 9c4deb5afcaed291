// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! `CSI … t` window manipulation and DECSCUSR.
//!
//! Window operations are observable events for the embedder; the core's own
//! state changes are limited to the title stack and the size-report replies.

use crate::events::{CursorStyle, WindowOp};
use crate::parser::Params;

use super::super::performer::Performer;

#[allow(clippy::too_many_lines)]
pub fn window_op(p: &mut Performer<'_>, params: &Params) {
    let arg = |i: usize| i32::from(params.get_or(i, 0));
    match params.get_or(0, 0) {
        1 => p.events.window_op(WindowOp::Deiconify),
        2 => p.events.window_op(WindowOp::Iconify),
        3 => p.events.window_op(WindowOp::Move {
            x: arg(1),
            y: arg(2),
        }),
        4 => p.events.window_op(WindowOp::ResizePixels {
            height: u32::from(params.get_or(1, 0)),
            width: u32::from(params.get_or(2, 0)),
        }),
        5 => p.events.window_op(WindowOp::Raise),
        6 => p.events.window_op(WindowOp::Lower),
        7 => p.events.window_op(WindowOp::Refresh),
        8 => {
            let rows = params.get_or(1, 0);
            let cols = params.get_or(2, 0);
            p.events.window_op(WindowOp::ResizeCells { cols, rows });
            if rows > 0 && cols > 0 {
                p.events.resize_requested(cols, rows);
            }
        }
        9 => {
            let op = if params.get_or(1, 0) == 1 {
                WindowOp::Maximize
            } else {
                WindowOp::Unmaximize
            };
            p.events.window_op(op);
        }
        10 => {
            let op = if params.get_or(1, 0) == 1 {
                WindowOp::Fullscreen
            } else {
                WindowOp::ExitFullscreen
            };
            p.events.window_op(op);
        }
        14 => {
            // Report text area size in pixels.
            let height = p.state.rows() * usize::from(p.state.config.cell_height_px);
            let width = p.state.cols() * usize::from(p.state.config.cell_width_px);
            let reply = format!("\x1b[4;{height};{width}t");
            p.reply(&reply);
        }
        18 => {
            let reply = format!("\x1b[8;{};{}t", p.state.rows(), p.state.cols());
            p.reply(&reply);
        }
        22 => p.state.push_titles(),
        23 => {
            if let Some((title, icon)) = p.state.pop_titles() {
                p.events.title_changed(&title);
                p.events.icon_title_changed(&icon);
            }
        }
        other => tracing::warn!(other, "window op ignored"),
    }
}

/// DECSCUSR (`CSI Ps SP q`): record and forward the cursor style.
pub fn set_cursor_style(p: &mut Performer<'_>, params: &Params) {
    let style = match params.get_or(0, 0) {
        0 => CursorStyle::Default,
        1 => CursorStyle::BlinkBlock,
        2 => CursorStyle::SteadyBlock,
        3 => CursorStyle::BlinkUnderline,
        4 => CursorStyle::SteadyUnderline,
        5 => CursorStyle::BlinkBar,
        6 => CursorStyle::SteadyBar,
        other => {
            tracing::warn!(other, "unknown cursor style ignored");
            return;
        }
    };
    p.state.cursor_style = style;
    p.events.cursor_style_changed(style);
}
