// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Bidi mirroring.
//!
//! Paired punctuation swaps glyphs in RTL context (`(` renders as `)`), per
//! the Unicode bidi-mirroring data. Box-drawing characters are not mirror
//! pairs in Unicode, but terminals drawing frames in RTL paragraphs want
//! them flipped horizontally, so an extra table covers U+2500..U+257F when
//! the row carries the box-mirror flag.

use crate::unistr::Unistr;

/// Mirror pairs applied in both directions (the common subset of the
/// Unicode `BidiMirroring` data seen in terminal content).
const MIRROR_PAIRS: &[(char, char)] = &[
    ('(', ')'),
    ('<', '>'),
    ('[', ']'),
    ('{', '}'),
    ('«', '»'),
    ('‹', '›'),
    ('⁽', '⁾'),
    ('₍', '₎'),
    ('∈', '∋'),
    ('≤', '≥'),
    ('≺', '≻'),
    ('⊂', '⊃'),
    ('⊆', '⊇'),
    ('⌈', '⌉'),
    ('⌊', '⌋'),
];

/// Two-way lookup: the CJK/angle brackets first, then [`MIRROR_PAIRS`].
fn mirror_pair(c: char) -> Option<char> {
    match c {
        '⟨' => return Some('⟩'),
        '⟩' => return Some('⟨'),
        '⟦' => return Some('⟧'),
        '⟧' => return Some('⟦'),
        '⟪' => return Some('⟫'),
        '⟫' => return Some('⟪'),
        '〈' => return Some('〉'),
        '〉' => return Some('〈'),
        '《' => return Some('》'),
        '》' => return Some('《'),
        '「' => return Some('」'),
        '」' => return Some('「'),
        '『' => return Some('』'),
        '』' => return Some('『'),
        '【' => return Some('】'),
        '】' => return Some('【'),
        '〔' => return Some('〕'),
        '〕' => return Some('〔'),
        _ => {}
    }
    for &(a, b) in MIRROR_PAIRS {
        if c == a {
            return Some(b);
        }
        if c == b {
            return Some(a);
        }
    }
    None
}

/// Horizontal flips within the box-drawing block.
const BOX_PAIRS: &[(char, char)] = &[
    ('┌', '┐'),
    ('└', '┘'),
    ('├', '┤'),
    ('┍', '┑'),
    ('┎', '┒'),
    ('┏', '┓'),
    ('┕', '┙'),
    ('┖', '┚'),
    ('┗', '┛'),
    ('┝', '┥'),
    ('┞', '┦'),
    ('┟', '┧'),
    ('┠', '┨'),
    ('┡', '┩'),
    ('┢', '┪'),
    ('┣', '┫'),
    ('┭', '┮'),
    ('┱', '┲'),
    ('┵', '┶'),
    ('┹', '┺'),
    ('┽', '┾'),
    ('╃', '╄'),
    ('╅', '╆'),
    ('╉', '╊'),
    ('╒', '╕'),
    ('╓', '╖'),
    ('╔', '╗'),
    ('╘', '╛'),
    ('╙', '╜'),
    ('╚', '╝'),
    ('╞', '╡'),
    ('╟', '╢'),
    ('╠', '╣'),
    ('╭', '╮'),
    ('╰', '╯'),
    ('╱', '╲'),
    ('╴', '╶'),
    ('╸', '╺'),
    ('╼', '╾'),
];

fn box_mirror(c: char) -> Option<char> {
    if !('\u{2500}'..='\u{257F}').contains(&c) {
        return None;
    }
    for &(a, b) in BOX_PAIRS {
        if c == a {
            return Some(b);
        }
        if c == b {
            return Some(a);
        }
    }
    None
}

/// The mirrored form of a cluster, preserving combining accents. `None`
/// when the base has no mirror.
#[must_use]
pub fn mirror(u: Unistr, box_drawing: bool) -> Option<Unistr> {
    let base = u.base();
    let mirrored = mirror_pair(base)
        .or_else(|| if box_drawing { box_mirror(base) } else { None })?;
    Some(u.replace_base(mirrored))
}
