// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! SGR: Select Graphic Rendition.
//!
//! Parameters are walked left to right; each code consumes one or more
//! parameters (`38;5;N`, `38;2;R;G;B`) or arrives as a single colon group
//! (`38:2::R:G:B`, `4:3`). Unknown codes are skipped without aborting the
//! rest of the sequence. After the walk the erase cell is refreshed so
//! subsequent erasure uses the new colours.

use crate::cell::Underline;
use crate::color::CellColor;
use crate::parser::Params;

use super::super::performer::Performer;

pub fn set_graphics_rendition(p: &mut Performer<'_>, params: &Params) {
    if params.is_empty() {
        reset(p);
        p.state.refresh_erase_cell();
        return;
    }
    let mut i = 0;
    while i < params.len() {
        if params.has_subparams(i) {
            apply_colon_group(p, params.subparams(i));
            i += 1;
        } else {
            i = apply_semicolon(p, params, i);
        }
    }
    p.state.refresh_erase_cell();
}

fn reset(p: &mut Performer<'_>) {
    let attrs = &mut p.state.attrs;
    attrs.attrs.set_style_bits(0);
    attrs.attrs.set_underline(Underline::None);
    attrs.colors = crate::color::ColorTriple::DEFAULT;
}

/// One semicolon-separated code; returns the index after everything it
/// consumed.
#[allow(clippy::too_many_lines)]
fn apply_semicolon(p: &mut Performer<'_>, params: &Params, i: usize) -> usize {
    let code = params.get_or(i, 0);
    match code {
        0 => {
            reset(p);
            return i + 1;
        }
        38 | 48 | 58 => return apply_extended_color(p, params, i),
        _ => {}
    }
    let attrs = &mut p.state.attrs;
    match code {
        1 => attrs.attrs.set_bold(true),
        2 => attrs.attrs.set_dim(true),
        3 => attrs.attrs.set_italic(true),
        4 => attrs.attrs.set_underline(Underline::Single),
        5 | 6 => attrs.attrs.set_blink(true),
        7 => attrs.attrs.set_reverse(true),
        8 => attrs.attrs.set_invisible(true),
        9 => attrs.attrs.set_strikethrough(true),
        21 => attrs.attrs.set_underline(Underline::Double),
        22 => {
            attrs.attrs.set_bold(false);
            attrs.attrs.set_dim(false);
        }
        23 => attrs.attrs.set_italic(false),
        24 => attrs.attrs.set_underline(Underline::None),
        25 => attrs.attrs.set_blink(false),
        27 => attrs.attrs.set_reverse(false),
        28 => attrs.attrs.set_invisible(false),
        29 => attrs.attrs.set_strikethrough(false),
        30..=37 => attrs.colors.set_fore(CellColor::Palette(code - 30)),
        39 => attrs.colors.set_fore(CellColor::Default),
        40..=47 => attrs.colors.set_back(CellColor::Palette(code - 40)),
        49 => attrs.colors.set_back(CellColor::Default),
        53 => attrs.attrs.set_overline(true),
        55 => attrs.attrs.set_overline(false),
        59 => attrs.colors.set_deco(CellColor::Default),
        90..=97 => attrs.colors.set_fore(CellColor::Palette(code - 90 + 8)),
        100..=107 => attrs.colors.set_back(CellColor::Palette(code - 100 + 8)),
        other => {
            tracing::warn!(other, "unknown SGR code skipped");
        }
    }
    i + 1
}

/// `38;5;N`, `38;2;R;G;B` and the 48/58 variants; returns the index after
/// the consumed parameters.
fn apply_extended_color(p: &mut Performer<'_>, params: &Params, i: usize) -> usize {
    let target = params.get_or(i, 0);
    match params.get(i + 1) {
        Some(5) => {
            let idx = params.get_or(i + 2, 0).min(255);
            set_target_color(p, target, CellColor::Palette(idx));
            i + 3
        }
        Some(2) => {
            let channel = |k: usize| -> u8 {
                #[allow(clippy::cast_possible_truncation)]
                (params.get_or(i + 2 + k, 0).min(255) as u8)
            };
            set_target_color(p, target, CellColor::Rgb(channel(0), channel(1), channel(2)));
            i + 5
        }
        _ => {
            tracing::warn!(target, "extended SGR colour with unknown space skipped");
            i + 2
        }
    }
}

/// A colon sub-parameter group: `4:style`, `38:5:N`, `38:2::R:G:B`.
fn apply_colon_group(p: &mut Performer<'_>, group: &[u16]) {
    match group.first().copied().unwrap_or(0) {
        4 => {
            let style = match group.get(1).copied().unwrap_or(0) {
                1 => Underline::Single,
                2 => Underline::Double,
                3 => Underline::Curly,
                _ => Underline::None,
            };
            p.state.attrs.attrs.set_underline(style);
        }
        target @ (38 | 48 | 58) => match group.get(1) {
            Some(5) => {
                let idx = group.get(2).copied().unwrap_or(0).min(255);
                set_target_color(p, target, CellColor::Palette(idx));
            }
            Some(2) => {
                // With a colourspace id the components are the last three.
                let tail = &group[group.len().saturating_sub(3)..];
                #[allow(clippy::cast_possible_truncation)]
                let channel = |k: usize| tail.get(k).copied().unwrap_or(0).min(255) as u8;
                set_target_color(p, target, CellColor::Rgb(channel(0), channel(1), channel(2)));
            }
            _ => {
                tracing::warn!(target, "extended SGR colour with unknown space skipped");
            }
        },
        other => {
            tracing::warn!(other, "unknown SGR colon group skipped");
        }
    }
}

fn set_target_color(p: &mut Performer<'_>, target: u16, color: CellColor) {
    match target {
        38 => p.state.attrs.colors.set_fore(color),
        48 => p.state.attrs.colors.set_back(color),
        58 => p.state.attrs.colors.set_deco(color),
        _ => {}
    }
}

/// Rebuild the parameter string describing the current SGR template, for the
/// DECRQSS `m` reply.
#[must_use]
pub fn current_sgr_params(p: &Performer<'_>) -> String {
    let attrs = &p.state.attrs;
    let mut parts: Vec<String> = vec!["0".into()];
    if attrs.attrs.bold() {
        parts.push("1".into());
    }
    if attrs.attrs.dim() {
        parts.push("2".into());
    }
    if attrs.attrs.italic() {
        parts.push("3".into());
    }
    match attrs.attrs.underline() {
        Underline::None => {}
        Underline::Single => parts.push("4".into()),
        Underline::Double => parts.push("21".into()),
        Underline::Curly => parts.push("4:3".into()),
    }
    if attrs.attrs.blink() {
        parts.push("5".into());
    }
    if attrs.attrs.reverse() {
        parts.push("7".into());
    }
    if attrs.attrs.invisible() {
        parts.push("8".into());
    }
    if attrs.attrs.strikethrough() {
        parts.push("9".into());
    }
    if attrs.attrs.overline() {
        parts.push("53".into());
    }
    push_color(&mut parts, attrs.colors.fore(), 30, 38);
    push_color(&mut parts, attrs.colors.back(), 40, 48);
    if attrs.colors.deco() != CellColor::Default {
        push_color(&mut parts, attrs.colors.deco(), 0, 58);
    }
    parts.join(";")
}

fn push_color(parts: &mut Vec<String>, color: CellColor, base: u16, extended: u16) {
    match color {
        CellColor::Default => {}
        CellColor::Palette(idx) if idx < 8 && base > 0 => {
            parts.push((base + idx).to_string());
        }
        CellColor::Palette(idx) if (8..16).contains(&idx) && base > 0 => {
            parts.push((base + 60 + idx - 8).to_string());
        }
        CellColor::Palette(idx) => parts.push(format!("{extended}:5:{idx}")),
        CellColor::Rgb(r, g, b) => parts.push(format!("{extended}:2::{r}:{g}:{b}")),
    }
}
