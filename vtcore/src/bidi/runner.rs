// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The bidi pass over one paragraph.
//!
//! A paragraph (maximal soft-wrap run of rows) is flattened to its logical
//! glyph sequence, levels are resolved by the Unicode bidirectional
//! algorithm (`unicode-bidi`), Arabic letters are shaped to presentation
//! forms, and each display row is reordered line by line into a
//! [`BidiRow`]. Wide glyphs stay contiguous: their cells emit in reverse
//! visual order inside RTL runs and never cross a row boundary.
//!
//! Pure-LTR rows with nothing shaped collapse to the trivial mapping.
//! Paragraphs longer than the configured cutoff, and paragraphs whose flags
//! request explicit direction, take the explicit path: identity or
//! reversed mapping, with shaping (but no reordering) still applied to
//! explicit RTL when enabled.

use unicode_bidi::{BidiClass, BidiInfo, Level, bidi_class};

use crate::row::{Row, bidi_flags};

use super::bidi_row::BidiRow;
use super::shape::shape;

/// One glyph of the flattened paragraph.
#[derive(Debug, Clone, Copy)]
struct Glyph {
    /// Row index within the paragraph.
    row: usize,
    /// Leftmost (logical) column of the glyph.
    col: usize,
    /// Cells occupied.
    span: usize,
    /// Base character (erased cells read as space).
    ch: char,
}

/// Configuration subset the runner needs.
#[derive(Debug, Clone, Copy)]
pub struct BidiConfig {
    pub enable_bidi: bool,
    pub enable_shaping: bool,
    pub max_paragraph_lines: usize,
}

/// Resolve one paragraph into per-row mappings, one [`BidiRow`] per input
/// row.
#[must_use]
pub fn resolve_paragraph(rows: &[Row], cols: usize, config: BidiConfig) -> Vec<BidiRow> {
    if rows.is_empty() || cols == 0 {
        return Vec::new();
    }
    let flags = rows[0].attrs.bidi_flags;
    let implicit = config.enable_bidi
        && flags & bidi_flags::IMPLICIT != 0
        && rows.len() <= config.max_paragraph_lines;
    let rtl_flag = flags & bidi_flags::RTL != 0;
    let auto = flags & bidi_flags::AUTO != 0;

    let glyphs = flatten(rows, cols);
    let chars: Vec<char> = glyphs.iter().map(|g| g.ch).collect();

    if implicit {
        implicit_paragraph(rows.len(), cols, &glyphs, &chars, rtl_flag, auto, config)
    } else {
        explicit_paragraph(rows.len(), cols, &glyphs, &chars, rtl_flag, config)
    }
}

fn flatten(rows: &[Row], cols: usize) -> Vec<Glyph> {
    let mut glyphs = Vec::new();
    for (row_idx, row) in rows.iter().enumerate() {
        let mut col = 0usize;
        while col < cols {
            match row.get(col) {
                Some(cell) if cell.is_fragment() => {
                    // Head was emitted already; nothing to add.
                    col += 1;
                }
                Some(cell) if !cell.is_erased() => {
                    let span = usize::from(cell.columns()).max(1).min(cols - col);
                    glyphs.push(Glyph {
                        row: row_idx,
                        col,
                        span,
                        ch: cell.c.base(),
                    });
                    col += span;
                }
                _ => {
                    glyphs.push(Glyph {
                        row: row_idx,
                        col,
                        span: 1,
                        ch: ' ',
                    });
                    col += 1;
                }
            }
        }
    }
    glyphs
}

fn implicit_paragraph(
    row_count: usize,
    cols: usize,
    glyphs: &[Glyph],
    chars: &[char],
    rtl_flag: bool,
    auto: bool,
    config: BidiConfig,
) -> Vec<BidiRow> {
    // Fast path: nothing right-to-left anywhere.
    let needs_uba = chars.iter().any(|&c| {
        matches!(
            bidi_class(c),
            BidiClass::R | BidiClass::AL | BidiClass::AN | BidiClass::RLE
                | BidiClass::RLO | BidiClass::RLI
        )
    });
    if !needs_uba && !rtl_flag {
        return vec![BidiRow::trivial(); row_count];
    }

    let base_rtl = if auto {
        // Weak direction: first strong character decides, the flag is the
        // fallback.
        chars
            .iter()
            .find_map(|&c| match bidi_class(c) {
                BidiClass::L => Some(false),
                BidiClass::R | BidiClass::AL => Some(true),
                _ => None,
            })
            .unwrap_or(rtl_flag)
    } else {
        rtl_flag
    };

    let text: String = chars.iter().collect();
    let base_level = if base_rtl { Level::rtl() } else { Level::ltr() };
    let info = BidiInfo::new(&text, Some(base_level));

    // Per-glyph resolved level.
    let mut levels: Vec<u8> = Vec::with_capacity(glyphs.len());
    for (byte_idx, _) in text.char_indices() {
        levels.push(info.levels[byte_idx].number());
    }

    let shaped: Vec<Option<char>> = if config.enable_shaping {
        shape(chars)
    } else {
        vec![None; chars.len()]
    };

    let base_parity = u8::from(base_rtl);
    let mut out = Vec::with_capacity(row_count);
    for row_idx in 0..row_count {
        let items: Vec<usize> = (0..glyphs.len())
            .filter(|&i| glyphs[i].row == row_idx)
            .collect();
        // L1: trailing whitespace returns to the paragraph level.
        let mut row_levels: Vec<u8> = items.iter().map(|&i| levels[i]).collect();
        for (k, &i) in items.iter().enumerate().rev() {
            if chars[i] == ' ' {
                row_levels[k] = base_parity;
            } else {
                break;
            }
        }

        let row_trivial = !base_rtl
            && row_levels.iter().all(|&l| l % 2 == 0)
            && items.iter().all(|&i| shaped[i].is_none());
        if row_trivial {
            out.push(BidiRow::trivial());
            continue;
        }

        let order = reorder_line(&row_levels);
        let mut vis2log = Vec::with_capacity(cols);
        let mut vis_rtl = Vec::with_capacity(cols);
        let mut vis_shaped = Vec::with_capacity(cols);
        for &k in &order {
            let glyph = glyphs[items[k]];
            let level = row_levels[k];
            let odd = level % 2 == 1;
            let cells: Vec<usize> = if odd {
                (0..glyph.span).rev().map(|d| glyph.col + d).collect()
            } else {
                (0..glyph.span).map(|d| glyph.col + d).collect()
            };
            for cell in cells {
                #[allow(clippy::cast_possible_truncation)]
                vis2log.push(cell as u16);
                vis_rtl.push(odd);
                vis_shaped.push(shaped[items[k]]);
            }
        }
        let has_foreign = row_levels.iter().any(|&l| l % 2 != base_parity % 2);
        out.push(BidiRow::build(
            vis2log, vis_rtl, vis_shaped, base_rtl, has_foreign,
        ));
    }
    out
}

/// UAX #9 rule L2 on one line: repeatedly reverse maximal runs at or above
/// each level, from the highest down to the lowest odd level.
fn reorder_line(levels: &[u8]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..levels.len()).collect();
    let Some(&max) = levels.iter().max() else {
        return order;
    };
    let Some(&min_odd) = levels.iter().filter(|&&l| l % 2 == 1).min() else {
        return order;
    };
    let mut level = max;
    while level >= min_odd {
        let mut i = 0;
        while i < order.len() {
            if levels[order[i]] >= level {
                let start = i;
                while i < order.len() && levels[order[i]] >= level {
                    i += 1;
                }
                order[start..i].reverse();
            } else {
                i += 1;
            }
        }
        if level == 0 {
            break;
        }
        level -= 1;
    }
    order
}

fn explicit_paragraph(
    row_count: usize,
    cols: usize,
    glyphs: &[Glyph],
    chars: &[char],
    rtl: bool,
    config: BidiConfig,
) -> Vec<BidiRow> {
    if !rtl {
        return vec![BidiRow::trivial(); row_count];
    }
    let shaped: Vec<Option<char>> = if config.enable_shaping {
        shape(chars)
    } else {
        vec![None; chars.len()]
    };
    let mut out = Vec::with_capacity(row_count);
    for row_idx in 0..row_count {
        let mut vis2log = vec![0u16; cols];
        let mut vis_shaped = vec![None; cols];
        for v in 0..cols {
            #[allow(clippy::cast_possible_truncation)]
            {
                vis2log[v] = (cols - 1 - v) as u16;
            }
        }
        for (i, glyph) in glyphs.iter().enumerate() {
            if glyph.row != row_idx || shaped[i].is_none() {
                continue;
            }
            for d in 0..glyph.span {
                let vis = cols - 1 - (glyph.col + d).min(cols - 1);
                vis_shaped[vis] = shaped[i];
            }
        }
        out.push(BidiRow::build(
            vis2log,
            vec![true; cols],
            vis_shaped,
            true,
            false,
        ));
    }
    out
}
