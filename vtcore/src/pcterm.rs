// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Legacy-charset ("PCTERM") pre-decoding.
//!
//! When a converter is installed on the terminal, the raw PTY byte stream is
//! routed through it before UTF-8 decoding; when none is installed the input
//! is treated as UTF-8 directly. The converter contract is deliberately
//! narrow (bytes in, UTF-8 bytes out) so embedders can plug in any legacy
//! encoding without the core learning charset tables.
//!
//! [`Cp437Converter`] is the one conversion shipped in-tree: the classic PC
//! code page used by DOS-era BBS content, which is what PCTERM mode exists
//! for. Bytes below 0x80 pass through untouched (control sequences must keep
//! working); the high half maps through a fixed table.

/// Byte-stream converter to UTF-8, consulted ahead of the UTF-8 decoder.
pub trait CharsetConverter: std::fmt::Debug + Send {
    /// Convert `input`, appending UTF-8 to `out`; returns the number of
    /// input bytes consumed (converters for stateful encodings may consume
    /// less than the full slice and see the remainder again next call).
    fn convert(&mut self, input: &[u8], out: &mut Vec<u8>) -> usize;

    /// Name of the charset this converter decodes, e.g. `"CP437"`.
    fn charset(&self) -> &str;
}

/// IBM code page 437, high half (0x80..=0xFF).
const CP437_HIGH: [char; 128] = [
    'Ç', 'ü', 'é', 'â', 'ä', 'à', 'å', 'ç', 'ê', 'ë', 'è', 'ï', 'î', 'ì', 'Ä', 'Å',
    'É', 'æ', 'Æ', 'ô', 'ö', 'ò', 'û', 'ù', 'ÿ', 'Ö', 'Ü', '¢', '£', '¥', '₧', 'ƒ',
    'á', 'í', 'ó', 'ú', 'ñ', 'Ñ', 'ª', 'º', '¿', '⌐', '¬', '½', '¼', '¡', '«', '»',
    '░', '▒', '▓', '│', '┤', '╡', '╢', '╖', '╕', '╣', '║', '╗', '╝', '╜', '╛', '┐',
    '└', '┴', '┬', '├', '─', '┼', '╞', '╟', '╚', '╔', '╩', '╦', '╠', '═', '╬', '╧',
    '╨', '╤', '╥', '╙', '╘', '╒', '╓', '╫', '╪', '┘', '┌', '█', '▄', '▌', '▐', '▀',
    'α', 'ß', 'Γ', 'π', 'Σ', 'σ', 'µ', 'τ', 'Φ', 'Θ', 'Ω', 'δ', '∞', 'φ', 'ε', '∩',
    '≡', '±', '≥', '≤', '⌠', '⌡', '÷', '≈', '°', '∙', '·', '√', 'ⁿ', '²', '■', '\u{A0}',
];

/// CP437 → UTF-8 converter. Stateless; always consumes its whole input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cp437Converter;

impl CharsetConverter for Cp437Converter {
    fn convert(&mut self, input: &[u8], out: &mut Vec<u8>) -> usize {
        let mut buf = [0u8; 4];
        for &b in input {
            if b < 0x80 {
                out.push(b);
            } else {
                let c = CP437_HIGH[usize::from(b - 0x80)];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
        input.len()
    }

    fn charset(&self) -> &str { "CP437" }
}
