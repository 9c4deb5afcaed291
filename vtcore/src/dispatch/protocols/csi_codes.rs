// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! CSI final bytes and private markers.
//!
//! Names follow the DEC/xterm mnemonics; the dispatch match in
//! [`performer`](crate::dispatch::performer) routes on these.

// Cursor movement.
pub const CUU_CURSOR_UP: char = 'A';
pub const CUD_CURSOR_DOWN: char = 'B';
pub const CUF_CURSOR_FORWARD: char = 'C';
pub const CUB_CURSOR_BACKWARD: char = 'D';
pub const CNL_CURSOR_NEXT_LINE: char = 'E';
pub const CPL_CURSOR_PREV_LINE: char = 'F';
pub const CHA_CURSOR_COLUMN: char = 'G';
pub const CUP_CURSOR_POSITION: char = 'H';
pub const HVP_CURSOR_POSITION: char = 'f';
pub const VPA_ROW_ABSOLUTE: char = 'd';
pub const HPA_COLUMN_ABSOLUTE: char = '`';
pub const VPR_ROW_RELATIVE: char = 'e';
pub const HPR_COLUMN_RELATIVE: char = 'a';

// Tabulation.
pub const CHT_TAB_FORWARD: char = 'I';
pub const CBT_TAB_BACKWARD: char = 'Z';
pub const TBC_TAB_CLEAR: char = 'g';

// Erase and edit.
pub const ED_ERASE_DISPLAY: char = 'J';
pub const EL_ERASE_LINE: char = 'K';
pub const IL_INSERT_LINE: char = 'L';
pub const DL_DELETE_LINE: char = 'M';
pub const ICH_INSERT_CHAR: char = '@';
pub const DCH_DELETE_CHAR: char = 'P';
pub const ECH_ERASE_CHAR: char = 'X';
pub const REP_REPEAT: char = 'b';

// Scrolling and margins.
pub const SU_SCROLL_UP: char = 'S';
pub const SD_SCROLL_DOWN: char = 'T';
pub const DECSTBM_SET_MARGINS: char = 'r';
pub const SCOSC_DECSLRM: char = 's';
pub const SCORC_RESTORE_CURSOR: char = 'u';

// Modes and reports.
pub const SM_SET_MODE: char = 'h';
pub const RM_RESET_MODE: char = 'l';
pub const SGR_SET_GRAPHICS: char = 'm';
pub const DSR_DEVICE_STATUS: char = 'n';
pub const DA_DEVICE_ATTRIBUTES: char = 'c';
pub const DECSCUSR_CURSOR_STYLE: char = 'q';
pub const WINDOW_OPS: char = 't';

// Private parameter markers (carried in the intermediates).
pub const PRIVATE_QUESTION: u8 = b'?';
pub const PRIVATE_GT: u8 = b'>';
pub const PRIVATE_EQ: u8 = b'=';

// Intermediates.
pub const INTERMEDIATE_SPACE: u8 = b' ';
pub const INTERMEDIATE_DOLLAR: u8 = b'$';
