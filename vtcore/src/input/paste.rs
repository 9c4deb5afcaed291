// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Paste encoding.
//!
//! Bracketed paste (`?2004`) wraps the payload in `CSI 200 ~` / `CSI 201 ~`
//! so the application can distinguish pasted text from typed text. Control
//! characters that could smuggle sequences into a shell are filtered from
//! the payload either way: everything below 0x20 except CR and TAB, DEL,
//! and the C1 range. Newlines become carriage returns, which is what the
//! line discipline expects from "typed" line breaks.

const BRACKET_START: &[u8] = b"\x1b[200~";
const BRACKET_END: &[u8] = b"\x1b[201~";

/// Encode pasted text for the child.
pub fn encode_paste(text: &str, bracketed: bool, out: &mut Vec<u8>) {
    if bracketed {
        out.extend_from_slice(BRACKET_START);
    }
    let mut buf = [0u8; 4];
    for c in text.chars() {
        let c = if c == '\n' { '\r' } else { c };
        let keep = match c {
            '\r' | '\t' => true,
            '\u{00}'..='\u{1F}' | '\u{7F}' | '\u{80}'..='\u{9F}' => false,
            _ => true,
        };
        if keep {
            out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        }
    }
    if bracketed {
        out.extend_from_slice(BRACKET_END);
    }
}
