// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! DCS routing: the SIXEL hook and DECRQSS.
//!
//! Other device control strings are swallowed. The SIXEL sub-parser consumes
//! the string body byte by byte; on unhook the finished raster is attached
//! at the cursor and the cursor advances by the image's width in cells.

use crate::color::{DEFAULT_BG, DEFAULT_FG};
use crate::parser::Params;
use crate::sixel::{SixelContext, argb};
use crate::terminal::state::{DcsConsumer, PlacedImage};

use super::super::performer::Performer;
use super::sgr_ops;

/// DECRQSS request bodies are tiny; anything longer is noise.
const RQSS_MAX: usize = 64;

/// Map the DECSIXEL `P1` aspect selector to a numerator/denominator pair.
fn aspect_from_selector(selector: u16) -> (u16, u16) {
    match selector {
        2 => (5, 1),
        3 | 4 => (3, 1),
        7..=9 => (1, 1),
        _ => (2, 1),
    }
}

pub fn hook(p: &mut Performer<'_>, params: &Params, intermediates: &[u8], final_byte: char) {
    p.state.dcs = match (final_byte, intermediates) {
        ('q', []) => {
            let aspect = aspect_from_selector(params.get_or(0, 0));
            let transparent_bg = params.get_or(1, 0) == 1;
            let fg = p.state.resolve_color(p.state.attrs.colors.fore(), DEFAULT_FG);
            let bg = p.state.resolve_color(p.state.attrs.colors.back(), DEFAULT_BG);
            DcsConsumer::Sixel(SixelContext::new(
                aspect,
                transparent_bg,
                argb(0xFF, fg.r, fg.g, fg.b),
                argb(0xFF, bg.r, bg.g, bg.b),
                p.state.config.sixel_private_registers_reset,
            ))
        }
        ('q', [b'$']) => DcsConsumer::Rqss(Vec::new()),
        _ => {
            tracing::warn!(%final_byte, "unsupported DCS ignored");
            DcsConsumer::None
        }
    };
}

pub fn put(p: &mut Performer<'_>, byte: u8) {
    match &mut p.state.dcs {
        DcsConsumer::Sixel(ctx) => ctx.put(byte),
        DcsConsumer::Rqss(buf) => {
            if buf.len() < RQSS_MAX {
                buf.push(byte);
            }
        }
        DcsConsumer::None => {}
    }
}

pub fn unhook(p: &mut Performer<'_>) {
    match std::mem::take(&mut p.state.dcs) {
        DcsConsumer::Sixel(ctx) => finish_sixel(p, ctx),
        DcsConsumer::Rqss(buf) => rqss_reply(p, &buf),
        DcsConsumer::None => {}
    }
}

fn finish_sixel(p: &mut Performer<'_>, ctx: SixelContext) {
    let Some(image) = ctx.finish() else { return };
    let cell_px = usize::from(p.state.config.cell_width_px).max(1);
    let span_cells = image.width.div_ceil(cell_px);
    let screen = p.state.screen_mut();
    let row = screen.cursor.row;
    let col = screen.cursor.col.min(screen.cols - 1);
    screen.cursor.col = (col + span_cells).min(screen.cols);
    p.state.images.push(PlacedImage {
        row,
        col,
        image,
    });
    p.state.forget_last_graphic();
    p.events.contents_changed();
}

/// DECRQSS: `DCS $ q <setting> ST` → `DCS 1 $ r <value><setting> ST`, or a
/// `0` report for unrecognised settings.
fn rqss_reply(p: &mut Performer<'_>, body: &[u8]) {
    let setting = std::str::from_utf8(body).unwrap_or("");
    let reply = match setting {
        "m" => Some(format!("{}m", sgr_ops::current_sgr_params(p))),
        "r" => {
            let screen = p.state.screen();
            Some(format!(
                "{};{}r",
                screen.scroll_top + 1,
                screen.scroll_bottom + 1
            ))
        }
        "s" => {
            let screen = p.state.screen();
            Some(format!(
                "{};{}s",
                screen.left_margin + 1,
                screen.right_margin + 1
            ))
        }
        " q" => Some(format!("{} q", p.state.cursor_style as u8)),
        _ => None,
    };
    match reply {
        Some(data) => {
            let full = format!("\x1bP1$r{data}\x1b\\");
            p.reply(&full);
        }
        None => p.reply("\x1bP0$r\x1b\\"),
    }
}
