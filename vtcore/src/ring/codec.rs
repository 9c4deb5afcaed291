// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Row ⇄ stream encoding.
//!
//! A frozen row is split across the ring's three streams:
//!
//! - **text stream**: the UTF-8 expansion of each glyph in logical order
//!   (head cells only; erased cells contribute a space), terminated by one
//!   `0x00` delimiter per row;
//! - **attr stream**: one fixed 14-byte record per cell (`attr word:u32`,
//!   `colors:u64`, `hyperlink_len:u16`, all little-endian) followed by
//!   `hyperlink_len` bytes of the `"id;uri"` target;
//! - **row stream**: one fixed 18-byte record per row holding the start
//!   offsets into the other two streams plus the row attributes.
//!
//! The format is bit-exact within a process but is not a public wire format.

use crate::cell::{Cell, CellAttrs, HYPERLINK_TARGET_IN_STREAM};
use crate::color::ColorTriple;
use crate::ring::hyperlink::HyperlinkTable;
use crate::row::{Row, RowAttrs};
use crate::unistr::Unistr;
use crate::width::char_is_combining;

/// Fixed size of one record in the row stream.
pub(crate) const ROW_RECORD_SIZE: usize = 18;

/// Fixed prefix size of one cell record in the attr stream.
pub(crate) const ATTR_RECORD_SIZE: usize = 14;

/// One row-stream record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RowRecord {
    pub text_start: u64,
    pub attr_start: u64,
    pub soft_wrapped: bool,
    pub bidi_flags: u8,
}

impl RowRecord {
    pub(crate) fn encode(self) -> [u8; ROW_RECORD_SIZE] {
        let mut out = [0u8; ROW_RECORD_SIZE];
        out[0..8].copy_from_slice(&self.text_start.to_le_bytes());
        out[8..16].copy_from_slice(&self.attr_start.to_le_bytes());
        out[16] = u8::from(self.soft_wrapped);
        out[17] = self.bidi_flags;
        out
    }

    pub(crate) fn decode(raw: &[u8; ROW_RECORD_SIZE]) -> Self {
        Self {
            text_start: u64::from_le_bytes(raw[0..8].try_into().expect("8 bytes")),
            attr_start: u64::from_le_bytes(raw[8..16].try_into().expect("8 bytes")),
            soft_wrapped: raw[16] != 0,
            bidi_flags: raw[17],
        }
    }
}

/// Serialise one row into the text and attr byte buffers.
pub(crate) fn encode_row(
    row: &Row,
    links: &HyperlinkTable,
    text: &mut Vec<u8>,
    attrs: &mut Vec<u8>,
) {
    for cell in &row.cells {
        if !cell.is_fragment() {
            if cell.is_erased() {
                text.push(b' ');
            } else {
                cell.c.append_utf8(text);
            }
        }
        let target = match cell.hyperlink_idx {
            0 | HYPERLINK_TARGET_IN_STREAM => None,
            idx => links.get(idx),
        };
        let link_bytes = target.map_or(&[] as &[u8], str::as_bytes);
        #[allow(clippy::cast_possible_truncation)]
        let link_len = link_bytes.len().min(u16::MAX as usize) as u16;

        attrs.extend_from_slice(&attr_word(cell).to_le_bytes());
        attrs.extend_from_slice(&cell.colors.as_u64().to_le_bytes());
        attrs.extend_from_slice(&link_len.to_le_bytes());
        attrs.extend_from_slice(&link_bytes[..usize::from(link_len)]);
    }
    text.push(0x00);
}

fn attr_word(cell: &Cell) -> u32 {
    let mut attrs = CellAttrs::default();
    attrs.set_fragment(cell.is_fragment());
    attrs.set_columns(cell.columns());
    attrs.set_style_bits(cell.attrs.style_bits());
    // CellAttrs is already the packed representation; round-trip through the
    // accessors keeps the stream layout pinned to the cell layout.
    let mut word = 0u32;
    word |= u32::from(attrs.fragment());
    word |= u32::from(attrs.columns()) << 1;
    word |= attrs.style_bits();
    word
}

/// A row rebuilt from the streams, plus any hyperlink targets its cells
/// carried (cell index, `"id;uri"`).
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DecodedRow {
    pub row: Row,
    pub links: Vec<(usize, String)>,
}

/// Rebuild a row from its attr-stream and text-stream slices. `text` must
/// include the trailing `0x00` delimiter; `attrs` must span exactly the
/// row's cell records.
pub(crate) fn decode_row(
    attrs: &[u8],
    text: &[u8],
    row_attrs: RowAttrs,
) -> Option<DecodedRow> {
    let text_str = std::str::from_utf8(text).ok()?;
    let mut chars = text_str.chars().filter(|&c| c != '\0').peekable();

    let mut row = Row::with_attrs(row_attrs);
    let mut links = Vec::new();
    let mut pos = 0usize;
    let mut prev_head = Unistr::ERASED;

    while pos + ATTR_RECORD_SIZE <= attrs.len() {
        let word = u32::from_le_bytes(attrs[pos..pos + 4].try_into().ok()?);
        let colors =
            ColorTriple::from_u64(u64::from_le_bytes(attrs[pos + 4..pos + 12].try_into().ok()?));
        let link_len =
            usize::from(u16::from_le_bytes(attrs[pos + 12..pos + 14].try_into().ok()?));
        pos += ATTR_RECORD_SIZE;
        if pos + link_len > attrs.len() {
            return None;
        }
        let link = if link_len > 0 {
            Some(String::from_utf8_lossy(&attrs[pos..pos + link_len]).into_owned())
        } else {
            None
        };
        pos += link_len;

        let fragment = word & 1 != 0;
        let c = if fragment {
            prev_head
        } else {
            match chars.next() {
                // A space in the text stream is an erased cell; a typed space
                // round-trips to the same rendering.
                None | Some(' ') => Unistr::ERASED,
                Some(base) => {
                    let mut cluster = Unistr::from_char(base);
                    while chars.peek().is_some_and(|&c| char_is_combining(c)) {
                        cluster =
                            cluster.append_accent(chars.next().expect("peeked above"));
                    }
                    cluster
                }
            }
        };
        if !fragment {
            prev_head = c;
        }

        let mut cell_attrs = CellAttrs::default();
        cell_attrs.set_fragment(fragment);
        #[allow(clippy::cast_possible_truncation)]
        cell_attrs.set_columns(((word >> 1) & 0b1111) as u8);
        cell_attrs.set_style_bits(word);

        let cell_index = row.cells.len();
        if let Some(target) = link {
            links.push((cell_index, target));
        }
        row.cells.push(Cell {
            c,
            attrs: cell_attrs,
            colors,
            hyperlink_idx: if links.last().is_some_and(|(i, _)| *i == cell_index) {
                HYPERLINK_TARGET_IN_STREAM
            } else {
                0
            },
        });
    }
    Some(DecodedRow { row, links })
}

#[cfg(test)]
mod tests {
    use super::{DecodedRow, ROW_RECORD_SIZE, RowRecord, decode_row, encode_row};
    use crate::cell::Cell;
    use crate::color::{CellColor, ColorTriple};
    use crate::ring::hyperlink::HyperlinkTable;
    use crate::row::{Row, RowAttrs};
    use crate::unistr::Unistr;

    fn fill() -> Cell { Cell::erased(ColorTriple::DEFAULT) }

    #[test]
    fn test_row_record_round_trip() {
        let record = RowRecord {
            text_start: 1234,
            attr_start: 56789,
            soft_wrapped: true,
            bidi_flags: 0b0101,
        };
        let raw: [u8; ROW_RECORD_SIZE] = record.encode();
        assert_eq!(RowRecord::decode(&raw), record);
    }

    #[test]
    fn test_plain_text_round_trip() {
        let mut row = Row::new();
        for (i, c) in "Hi there".chars().enumerate() {
            row.set_cell(i, Cell::glyph(Unistr::from_char(c), 1, fill()), &fill());
        }
        row.attrs.soft_wrapped = true;

        let links = HyperlinkTable::new(64);
        let (mut text, mut attrs) = (Vec::new(), Vec::new());
        encode_row(&row, &links, &mut text, &mut attrs);
        assert_eq!(*text.last().unwrap(), 0x00);

        let DecodedRow { row: decoded, links } =
            decode_row(&attrs, &text, row.attrs).unwrap();
        assert!(links.is_empty());
        assert_eq!(decoded.text(), "Hi there");
        assert!(decoded.attrs.soft_wrapped);
    }

    #[test]
    fn test_wide_and_combining_round_trip() {
        let mut row = Row::new();
        let wide = Cell::glyph(Unistr::from_char('語'), 2, fill());
        row.set_cell(0, wide, &fill());
        row.set_cell(1, Cell::fragment_of(wide), &fill());
        let composed = Unistr::from_char('e').append_accent('\u{0301}');
        row.set_cell(2, Cell::glyph(composed, 1, fill()), &fill());

        let links = HyperlinkTable::new(64);
        let (mut text, mut attrs) = (Vec::new(), Vec::new());
        encode_row(&row, &links, &mut text, &mut attrs);

        let decoded = decode_row(&attrs, &text, RowAttrs::default()).unwrap().row;
        assert_eq!(decoded.len(), 3);
        assert!(!decoded.cells[0].is_fragment());
        assert!(decoded.cells[1].is_fragment());
        assert_eq!(decoded.cells[1].c, decoded.cells[0].c);
        assert_eq!(decoded.cells[0].columns(), 2);
        assert_eq!(decoded.cells[2].c, composed);
    }

    #[test]
    fn test_colors_and_styles_round_trip() {
        let mut styled = fill();
        styled.attrs.set_bold(true);
        styled.colors.set_fore(CellColor::Palette(1));
        styled.colors.set_back(CellColor::Rgb(1, 2, 3));
        let mut row = Row::new();
        row.set_cell(0, Cell::glyph(Unistr::from_char('R'), 1, styled), &fill());

        let links = HyperlinkTable::new(64);
        let (mut text, mut attrs) = (Vec::new(), Vec::new());
        encode_row(&row, &links, &mut text, &mut attrs);

        let decoded = decode_row(&attrs, &text, RowAttrs::default()).unwrap().row;
        assert!(decoded.cells[0].attrs.bold());
        assert_eq!(decoded.cells[0].colors.fore(), CellColor::Palette(1));
        assert_eq!(decoded.cells[0].colors.back(), CellColor::Rgb(1, 2, 3));
    }

    #[test]
    fn test_hyperlink_target_travels_with_cell() {
        let mut links = HyperlinkTable::new(64);
        let idx = links.acquire("tag;https://example.org");
        let mut cell = Cell::glyph(Unistr::from_char('L'), 1, fill());
        cell.hyperlink_idx = idx;
        let mut row = Row::new();
        row.set_cell(0, cell, &fill());

        let (mut text, mut attrs) = (Vec::new(), Vec::new());
        encode_row(&row, &links, &mut text, &mut attrs);

        let DecodedRow { row: decoded, links: decoded_links } =
            decode_row(&attrs, &text, RowAttrs::default()).unwrap();
        assert_eq!(decoded_links, vec![(0, "tag;https://example.org".to_string())]);
        assert_eq!(
            decoded.cells[0].hyperlink_idx,
            crate::cell::HYPERLINK_TARGET_IN_STREAM
        );
    }

    #[test]
    fn test_erased_cells_round_trip_as_erased() {
        let mut row = Row::new();
        row.set_cell(2, Cell::glyph(Unistr::from_char('x'), 1, fill()), &fill());
        let links = HyperlinkTable::new(64);
        let (mut text, mut attrs) = (Vec::new(), Vec::new());
        encode_row(&row, &links, &mut text, &mut attrs);
        let decoded = decode_row(&attrs, &text, RowAttrs::default()).unwrap().row;
        assert!(decoded.cells[0].is_erased());
        assert!(decoded.cells[1].is_erased());
        assert_eq!(decoded.text(), "  x");
    }
}
