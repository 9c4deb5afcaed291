// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! C0 bytes and ESC final bytes the dispatcher recognises.

// C0 controls.
pub const BEL: u8 = 0x07;
pub const BACKSPACE: u8 = 0x08;
pub const TAB: u8 = 0x09;
pub const LINE_FEED: u8 = 0x0A;
pub const VERTICAL_TAB: u8 = 0x0B;
pub const FORM_FEED: u8 = 0x0C;
pub const CARRIAGE_RETURN: u8 = 0x0D;
pub const SHIFT_OUT: u8 = 0x0E;
pub const SHIFT_IN: u8 = 0x0F;

// ESC finals.
pub const DECSC_SAVE_CURSOR: u8 = b'7';
pub const DECRC_RESTORE_CURSOR: u8 = b'8';
pub const DECKPAM_KEYPAD_APPLICATION: u8 = b'=';
pub const DECKPNM_KEYPAD_NUMERIC: u8 = b'>';
pub const IND_INDEX_DOWN: u8 = b'D';
pub const NEL_NEXT_LINE: u8 = b'E';
pub const HTS_TAB_SET: u8 = b'H';
pub const RI_REVERSE_INDEX: u8 = b'M';
pub const SS2_SINGLE_SHIFT_2: u8 = b'N';
pub const SS3_SINGLE_SHIFT_3: u8 = b'O';
pub const DECID_IDENTIFY: u8 = b'Z';
pub const RIS_RESET: u8 = b'c';
pub const ST_STRING_TERMINATOR: u8 = b'\\';

// Charset designation (with `(` or `)` intermediate).
pub const G0_INTERMEDIATE: u8 = b'(';
pub const G1_INTERMEDIATE: u8 = b')';
pub const CHARSET_ASCII: u8 = b'B';
pub const CHARSET_DEC_GRAPHICS: u8 = b'0';

// DECALN (with `#` intermediate).
pub const HASH_INTERMEDIATE: u8 = b'#';
pub const DECALN_ALIGNMENT_TEST: u8 = b'8';
