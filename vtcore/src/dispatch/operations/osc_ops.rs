// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! OSC dispatch: titles, palette, working directory, hyperlinks, clipboard
//! and colour queries.
//!
//! The string body arrives already split on `;`. Queries reply through the
//! output queue using the same terminator the request used (BEL or ST), the
//! way xterm echoes it back.

use crate::color::{CURSOR_BG, DEFAULT_BG, DEFAULT_FG};
use crate::events::ClipboardSelection;
use crate::screen::Rgb;

use super::super::performer::Performer;
use super::super::protocols::osc_codes;

fn terminator(bell_terminated: bool) -> &'static str {
    if bell_terminated { "\x07" } else { "\x1b\\" }
}

pub fn dispatch_osc(p: &mut Performer<'_>, params: &[&[u8]], bell_terminated: bool) {
    let Some(code) = params
        .first()
        .and_then(|s| std::str::from_utf8(s).ok())
        .and_then(|s| s.parse::<u16>().ok())
    else {
        return;
    };
    let arg = |i: usize| -> &str {
        params
            .get(i)
            .and_then(|s| std::str::from_utf8(s).ok())
            .unwrap_or("")
    };

    match code {
        osc_codes::SET_TITLE_AND_ICON => {
            let title = arg(1).to_owned();
            p.state.title.clone_from(&title);
            p.state.icon_title.clone_from(&title);
            p.events.title_changed(&title);
            p.events.icon_title_changed(&title);
        }
        osc_codes::SET_ICON_TITLE => {
            let title = arg(1).to_owned();
            p.state.icon_title.clone_from(&title);
            p.events.icon_title_changed(&title);
        }
        osc_codes::SET_TITLE => {
            let title = arg(1).to_owned();
            p.state.title.clone_from(&title);
            p.events.title_changed(&title);
        }
        osc_codes::SET_PALETTE_COLOR => palette_pairs(p, params, bell_terminated),
        osc_codes::SET_CWF_URI => p.events.cwf_uri_changed(arg(1)),
        osc_codes::SET_CWD_URI => p.events.cwd_uri_changed(arg(1)),
        osc_codes::HYPERLINK => hyperlink(p, params),
        osc_codes::SET_DEFAULT_FG => {
            named_color(p, DEFAULT_FG, code, arg(1), bell_terminated);
        }
        osc_codes::SET_DEFAULT_BG => {
            named_color(p, DEFAULT_BG, code, arg(1), bell_terminated);
        }
        osc_codes::SET_CURSOR_COLOR => {
            named_color(p, CURSOR_BG, code, arg(1), bell_terminated);
        }
        osc_codes::CLIPBOARD => clipboard(p, arg(1), arg(2)),
        osc_codes::RESET_PALETTE_COLOR => {
            if params.len() <= 1 || arg(1).is_empty() {
                p.state.palette.reset(None);
            } else {
                for i in 1..params.len() {
                    if let Ok(idx) = arg(i).parse::<u16>() {
                        p.state.palette.reset(Some(idx));
                    }
                }
            }
        }
        osc_codes::RESET_DEFAULT_FG => p.state.palette.reset(Some(DEFAULT_FG)),
        osc_codes::RESET_DEFAULT_BG => p.state.palette.reset(Some(DEFAULT_BG)),
        osc_codes::RESET_CURSOR_COLOR => p.state.palette.reset(Some(CURSOR_BG)),
        osc_codes::NOTIFY => {
            if arg(1) == "notify" {
                let value = format!("{};{}", arg(2), arg(3));
                p.events.termprop_changed("notification", &value);
            }
        }
        other => tracing::warn!(other, "unknown OSC ignored"),
    }
}

/// OSC 4: `idx;spec` pairs; `spec == "?"` queries.
fn palette_pairs(p: &mut Performer<'_>, params: &[&[u8]], bell_terminated: bool) {
    let mut i = 1;
    while i + 1 < params.len() {
        let idx = std::str::from_utf8(params[i])
            .ok()
            .and_then(|s| s.parse::<u16>().ok());
        let spec = std::str::from_utf8(params[i + 1]).unwrap_or("");
        if let Some(idx) = idx {
            if spec == "?" {
                if let Some(rgb) = p.state.palette.get(idx) {
                    let reply = format!(
                        "\x1b]4;{idx};{}{}",
                        rgb.to_xparsecolor(),
                        terminator(bell_terminated)
                    );
                    p.reply(&reply);
                }
            } else if let Some(rgb) = Rgb::parse(spec) {
                p.state.palette.set(idx, rgb);
            }
        }
        i += 2;
    }
}

/// OSC 10/11/12 set or query a named colour slot.
fn named_color(
    p: &mut Performer<'_>,
    slot: u16,
    code: u16,
    spec: &str,
    bell_terminated: bool,
) {
    if spec == "?" {
        if let Some(rgb) = p.state.palette.get(slot) {
            let reply = format!(
                "\x1b]{code};{}{}",
                rgb.to_xparsecolor(),
                terminator(bell_terminated)
            );
            p.reply(&reply);
        }
    } else if let Some(rgb) = Rgb::parse(spec) {
        p.state.palette.set(slot, rgb);
    }
}

/// OSC 8: `params;uri`. An empty URI ends the hyperlink; the interned form
/// is `"id;uri"` with the id taken from the `id=` key.
fn hyperlink(p: &mut Performer<'_>, params: &[&[u8]]) {
    let link_params = params
        .get(1)
        .and_then(|s| std::str::from_utf8(s).ok())
        .unwrap_or("");
    // The URI may itself contain `;`: rejoin everything past the params.
    let uri = params[2.min(params.len())..]
        .iter()
        .map(|s| String::from_utf8_lossy(s).into_owned())
        .collect::<Vec<_>>()
        .join(";");

    if uri.is_empty() {
        p.state.set_current_hyperlink(0);
        return;
    }
    let id = link_params
        .split(':')
        .find_map(|kv| kv.strip_prefix("id="))
        .unwrap_or("");
    let target = format!("{id};{uri}");
    let idx = p.state.screen_mut().ring.links.acquire(&target);
    p.state.set_current_hyperlink(idx);
}

/// OSC 52: `selection;payload` where the payload is base64 (or `?` to
/// query). Policy and decoding belong to the embedder.
fn clipboard(p: &mut Performer<'_>, selection: &str, payload: &str) {
    let selection = if selection.contains('p') {
        ClipboardSelection::Primary
    } else {
        ClipboardSelection::Clipboard
    };
    if payload == "?" {
        p.events.paste_request(selection);
    } else {
        p.events.copy_request(selection, payload);
    }
}
