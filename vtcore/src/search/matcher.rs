// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Hit-testing registered match patterns against grid content, and walking
//! the scrollback with a search pattern.
//!
//! Row text is extracted paragraph by paragraph with a parallel byte →
//! `(row, col)` attribution array, so a byte-offset match maps straight back
//! to grid cells. `check_at` caches its result per probe point: a positive
//! hit with its span, or a negative span stretching to the nearest match
//! boundary on either side, so mouse motion across a row asks the regex
//! engine once.

use crate::ring::Ring;
use crate::units::AbsRow;

use super::regex::TermRegex;

/// A half-open span over grid cells: `start` inclusive, `end` exclusive,
/// in (row, logical column) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: (AbsRow, usize),
    pub end: (AbsRow, usize),
}

impl Span {
    fn contains(&self, row: AbsRow, col: usize) -> bool {
        (row, col) >= self.start && (row, col) < self.end
    }
}

/// A successful `check_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchHit {
    pub tag: u32,
    pub text: String,
    pub span: Span,
    /// Pointer shape the embedder should show over this match (e.g.
    /// `"pointer"` for links), as registered with the pattern.
    pub cursor_hint: Option<String>,
}

#[derive(Debug)]
struct MatchEntry {
    regex: TermRegex,
    tag: u32,
    cursor_hint: Option<Box<str>>,
}

#[derive(Debug, Clone)]
enum Cached {
    Hit(MatchHit),
    Miss(Span),
}

/// Extracted paragraph: joined text plus per-byte source attribution.
struct ParagraphText {
    text: String,
    /// One entry per byte of `text`.
    source: Vec<(AbsRow, usize)>,
    /// One past the last cell of the paragraph.
    end: (AbsRow, usize),
    /// Paragraph row range, inclusive.
    first: AbsRow,
    last: AbsRow,
    /// Stored cell count per row, aligned to `first`.
    row_lens: Vec<usize>,
}

impl ParagraphText {
    /// Byte index of the cell covering `(row, col)`, walking left over
    /// fragment cells (which emit no bytes of their own).
    fn probe(&self, row: AbsRow, col: usize) -> Option<usize> {
        #[allow(clippy::cast_possible_truncation)]
        let row_len = *self
            .row_lens
            .get(row.offset_from(self.first) as usize)?;
        if col >= row_len {
            return None;
        }
        let i = self.source.partition_point(|&(r, c)| (r, c) <= (row, col));
        let candidate = i.checked_sub(1)?;
        (self.source[candidate].0 == row).then_some(candidate)
    }
}

/// The ordered table of match patterns, with the one-entry result cache.
#[derive(Debug, Default)]
pub struct MatchSet {
    entries: Vec<MatchEntry>,
    next_tag: u32,
    cache: Option<Cached>,
}

impl MatchSet {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Register a pattern; returns its tag. Tags increase monotonically.
    pub fn add(&mut self, regex: TermRegex) -> u32 {
        self.add_with_cursor(regex, None)
    }

    /// Register a pattern together with the pointer shape to show over its
    /// matches.
    pub fn add_with_cursor(&mut self, regex: TermRegex, cursor_hint: Option<&str>) -> u32 {
        let tag = self.next_tag;
        self.next_tag += 1;
        self.entries.push(MatchEntry {
            regex,
            tag,
            cursor_hint: cursor_hint.map(Into::into),
        });
        self.cache = None;
        tag
    }

    /// Remove a pattern by tag.
    pub fn remove(&mut self, tag: u32) {
        self.entries.retain(|e| e.tag != tag);
        self.cache = None;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cache = None;
    }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Drop the cached result (grid contents changed).
    pub fn invalidate(&mut self) { self.cache = None; }

    /// Which match, if any, covers the cell `(row, col)`.
    pub fn check_at(
        &mut self,
        ring: &mut Ring,
        row: AbsRow,
        col: usize,
        max_lines: usize,
    ) -> Option<MatchHit> {
        match &self.cache {
            Some(Cached::Hit(hit)) if hit.span.contains(row, col) => {
                return Some(hit.clone());
            }
            Some(Cached::Miss(span)) if span.contains(row, col) => return None,
            _ => {}
        }

        let para = extract_paragraph(ring, row, max_lines)?;
        let probe = para.probe(row, col)?;

        let mut best: Option<MatchHit> = None;
        // Nearest match boundaries around a miss, for the negative span.
        let mut miss_start = (para.source.first().copied())?;
        let mut miss_end = para.end;
        for entry in &self.entries {
            for found in entry.regex.as_regex().find_iter(&para.text) {
                if found.start() <= probe && probe < found.end() {
                    let hit = MatchHit {
                        tag: entry.tag,
                        text: found.as_str().to_owned(),
                        span: Span {
                            start: para.source[found.start()],
                            end: span_end_pair(&para, found.end()),
                        },
                        cursor_hint: entry.cursor_hint.as_deref().map(str::to_owned),
                    };
                    // The first (lowest-tag) covering match wins.
                    if best.is_none() {
                        best = Some(hit);
                    }
                } else if found.end() <= probe {
                    miss_start = miss_start.max(span_end_pair(&para, found.end()));
                } else {
                    miss_end = miss_end.min(para.source[found.start()]);
                }
            }
            if best.is_some() {
                break;
            }
        }

        match best {
            Some(hit) => {
                self.cache = Some(Cached::Hit(hit.clone()));
                Some(hit)
            }
            None => {
                self.cache = Some(Cached::Miss(Span {
                    start: miss_start,
                    end: miss_end,
                }));
                None
            }
        }
    }
}

/// The cell position one past a match ending at `byte_end`.
fn span_end_pair(para: &ParagraphText, byte_end: usize) -> (AbsRow, usize) {
    match para.source.get(byte_end) {
        Some(&pos) => pos,
        None => para.end,
    }
}

/// Extract the soft-wrap paragraph containing `row`, joined in logical
/// order.
fn extract_paragraph(
    ring: &mut Ring,
    row: AbsRow,
    max_lines: usize,
) -> Option<ParagraphText> {
    if !ring.contains(row) {
        return None;
    }
    let floor = ring.first_row().as_u64();
    let ceiling = ring.next_row().as_u64();
    let mut first = row.as_u64();
    while first > floor
        && (row.as_u64() - first) < max_lines as u64
        && ring.is_soft_wrapped(AbsRow::new(first - 1))
    {
        first -= 1;
    }
    let mut last = row.as_u64();
    while last + 1 < ceiling
        && (last - row.as_u64()) < max_lines as u64
        && ring.is_soft_wrapped(AbsRow::new(last))
    {
        last += 1;
    }

    let mut text = String::new();
    let mut source = Vec::new();
    let mut row_lens = Vec::new();
    let mut end = (row, 0usize);
    for r in first..=last {
        let abs = AbsRow::new(r);
        let row_data = ring.read_row(abs).unwrap_or_default();
        let mut col = 0usize;
        for cell in &row_data.cells {
            if cell.is_fragment() {
                col += 1;
                continue;
            }
            let before = text.len();
            if cell.is_erased() {
                text.push(' ');
            } else {
                cell.c.append_to_string(&mut text);
            }
            for _ in before..text.len() {
                source.push((abs, col));
            }
            col += 1;
        }
        row_lens.push(row_data.len());
        end = (abs, col);
    }
    Some(ParagraphText {
        text,
        source,
        end,
        first: AbsRow::new(first),
        last: AbsRow::new(last),
        row_lens,
    })
}

/// Walk paragraphs away from `from`, returning the first span the search
/// pattern matches. `forward` walks towards newer rows; with `wrap_around`
/// the walk continues from the opposite end of the ring.
pub fn search(
    ring: &mut Ring,
    regex: &TermRegex,
    from: AbsRow,
    forward: bool,
    wrap_around: bool,
    max_lines: usize,
) -> Option<Span> {
    let floor = ring.first_row().as_u64();
    let ceiling = ring.next_row().as_u64();
    if floor >= ceiling {
        return None;
    }
    let total = ceiling - floor;
    let mut r = from.as_u64().clamp(floor, ceiling.saturating_sub(1));

    let mut visited = 0u64;
    while visited < total {
        let para = extract_paragraph(ring, AbsRow::new(r), max_lines)?;
        let hit = if forward {
            regex.as_regex().find(&para.text)
        } else {
            regex.as_regex().find_iter(&para.text).last()
        };
        if let Some(found) = hit {
            // Empty matches never count as found text.
            if found.start() < found.end() {
                return Some(Span {
                    start: para.source[found.start()],
                    end: span_end_pair(&para, found.end()),
                });
            }
        }
        visited += para.last.as_u64() - para.first.as_u64() + 1;
        if forward {
            let next = para.last.as_u64() + 1;
            if next >= ceiling {
                if !wrap_around {
                    return None;
                }
                r = floor;
            } else {
                r = next;
            }
        } else if para.first.as_u64() > floor {
            r = para.first.as_u64() - 1;
        } else if wrap_around {
            r = ceiling - 1;
        } else {
            return None;
        }
    }
    None
}
