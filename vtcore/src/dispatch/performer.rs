// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The sequence dispatcher: routes parsed events to operation modules.
//!
//! [`Performer`] borrows the terminal state, the embedder callback handle and
//! the reply queue for the duration of one processing slice, and implements
//! [`Perform`]. It contains no terminal logic of its own; each match arm is
//! a one-line delegation into `operations::*`, which is where parameters are
//! interpreted and the screens are mutated.
//!
//! Unknown sequences are logged at warn level and otherwise ignored; the
//! dispatcher never fails.

use crate::events::TerminalEvents;
use crate::parser::{Params, Perform};
use crate::terminal::state::TermState;

use super::operations::{char_ops, control_ops, cursor_ops, dcs_ops, erase_ops,
                        line_ops, margin_ops, mode_ops, osc_ops, reply_ops, sgr_ops,
                        window_ops};
use super::protocols::{csi_codes, esc_codes};

/// One processing slice's view of the terminal.
pub struct Performer<'a> {
    pub state: &'a mut TermState,
    pub events: &'a mut dyn TerminalEvents,
    /// Bytes queued for the PTY (query replies).
    pub out: &'a mut Vec<u8>,
}

impl Performer<'_> {
    /// Queue a reply towards the child process.
    pub fn reply(&mut self, data: &str) { self.out.extend_from_slice(data.as_bytes()); }

    fn has_intermediate(intermediates: &[u8], byte: u8) -> bool {
        intermediates.contains(&byte)
    }
}

impl Perform for Performer<'_> {
    fn print(&mut self, c: char) { char_ops::print_char(self, c); }

    fn execute(&mut self, byte: u8) { control_ops::execute(self, byte); }

    #[allow(clippy::too_many_lines)]
    fn csi_dispatch(&mut self, params: &Params, intermediates: &[u8], final_byte: char) {
        let private_q =
            Self::has_intermediate(intermediates, csi_codes::PRIVATE_QUESTION);
        let private_gt = Self::has_intermediate(intermediates, csi_codes::PRIVATE_GT);
        let private_eq = Self::has_intermediate(intermediates, csi_codes::PRIVATE_EQ);
        let space = Self::has_intermediate(intermediates, csi_codes::INTERMEDIATE_SPACE);
        let dollar =
            Self::has_intermediate(intermediates, csi_codes::INTERMEDIATE_DOLLAR);

        match final_byte {
            csi_codes::CUU_CURSOR_UP => cursor_ops::cursor_up(self, params),
            csi_codes::CUD_CURSOR_DOWN | csi_codes::VPR_ROW_RELATIVE => {
                cursor_ops::cursor_down(self, params);
            }
            csi_codes::CUF_CURSOR_FORWARD | csi_codes::HPR_COLUMN_RELATIVE => {
                cursor_ops::cursor_forward(self, params);
            }
            csi_codes::CUB_CURSOR_BACKWARD => cursor_ops::cursor_backward(self, params),
            csi_codes::CNL_CURSOR_NEXT_LINE => cursor_ops::cursor_next_line(self, params),
            csi_codes::CPL_CURSOR_PREV_LINE => cursor_ops::cursor_prev_line(self, params),
            csi_codes::CHA_CURSOR_COLUMN | csi_codes::HPA_COLUMN_ABSOLUTE => {
                cursor_ops::cursor_column(self, params);
            }
            csi_codes::CUP_CURSOR_POSITION | csi_codes::HVP_CURSOR_POSITION => {
                cursor_ops::cursor_position(self, params);
            }
            csi_codes::VPA_ROW_ABSOLUTE => cursor_ops::cursor_row_absolute(self, params),

            csi_codes::CHT_TAB_FORWARD => cursor_ops::tab_forward(self, params),
            csi_codes::CBT_TAB_BACKWARD => cursor_ops::tab_backward(self, params),
            csi_codes::TBC_TAB_CLEAR => cursor_ops::tab_clear(self, params),

            csi_codes::ED_ERASE_DISPLAY => erase_ops::erase_display(self, params),
            csi_codes::EL_ERASE_LINE => erase_ops::erase_line(self, params),
            csi_codes::ECH_ERASE_CHAR => erase_ops::erase_chars(self, params),
            csi_codes::ICH_INSERT_CHAR => char_ops::insert_chars(self, params),
            csi_codes::DCH_DELETE_CHAR => char_ops::delete_chars(self, params),
            csi_codes::REP_REPEAT => char_ops::repeat_preceding(self, params),

            csi_codes::IL_INSERT_LINE => line_ops::insert_lines(self, params),
            csi_codes::DL_DELETE_LINE => line_ops::delete_lines(self, params),
            csi_codes::SU_SCROLL_UP => line_ops::scroll_up(self, params),
            csi_codes::SD_SCROLL_DOWN => line_ops::scroll_down(self, params),

            csi_codes::DECSTBM_SET_MARGINS => {
                if private_q {
                    mode_ops::restore_modes(self, params);
                } else {
                    margin_ops::set_top_bottom_margins(self, params);
                }
            }
            csi_codes::SCOSC_DECSLRM => {
                if private_q {
                    mode_ops::save_modes(self, params);
                } else if self.state.modes.lr_margin_mode && !params.is_empty() {
                    margin_ops::set_left_right_margins(self, params);
                } else {
                    cursor_ops::save_cursor(self);
                }
            }
            csi_codes::SCORC_RESTORE_CURSOR => cursor_ops::restore_cursor(self),

            csi_codes::SM_SET_MODE => mode_ops::set_mode(self, params, private_q),
            csi_codes::RM_RESET_MODE => mode_ops::reset_mode(self, params, private_q),
            csi_codes::SGR_SET_GRAPHICS => sgr_ops::set_graphics_rendition(self, params),

            csi_codes::DSR_DEVICE_STATUS => reply_ops::device_status(self, params, private_q),
            csi_codes::DA_DEVICE_ATTRIBUTES => {
                if private_gt {
                    reply_ops::secondary_device_attributes(self);
                } else if private_eq {
                    reply_ops::tertiary_device_attributes(self);
                } else {
                    reply_ops::primary_device_attributes(self);
                }
            }
            csi_codes::DECSCUSR_CURSOR_STYLE if space => {
                window_ops::set_cursor_style(self, params);
            }
            csi_codes::WINDOW_OPS => window_ops::window_op(self, params),

            _ if dollar => {
                tracing::warn!(%final_byte, "DECRQM/rectangular CSI ignored");
            }
            _ => {
                tracing::warn!(%final_byte, "unknown CSI sequence ignored");
            }
        }
    }

    fn esc_dispatch(&mut self, intermediates: &[u8], final_byte: u8) {
        match (intermediates.first(), final_byte) {
            (None, esc_codes::DECSC_SAVE_CURSOR) => cursor_ops::save_cursor(self),
            (None, esc_codes::DECRC_RESTORE_CURSOR) => cursor_ops::restore_cursor(self),
            (None, esc_codes::DECKPAM_KEYPAD_APPLICATION) => {
                self.state.keypad_application = true;
            }
            (None, esc_codes::DECKPNM_KEYPAD_NUMERIC) => {
                self.state.keypad_application = false;
            }
            (None, esc_codes::IND_INDEX_DOWN) => control_ops::index_down(self),
            (None, esc_codes::NEL_NEXT_LINE) => control_ops::next_line(self),
            (None, esc_codes::HTS_TAB_SET) => cursor_ops::tab_set(self),
            (None, esc_codes::RI_REVERSE_INDEX) => control_ops::reverse_index(self),
            (None, esc_codes::DECID_IDENTIFY) => {
                reply_ops::primary_device_attributes(self);
            }
            (None, esc_codes::RIS_RESET) => {
                self.state.hard_reset(false, false);
            }
            (None, esc_codes::ST_STRING_TERMINATOR) => {}
            (Some(&esc_codes::G0_INTERMEDIATE), byte) => {
                mode_ops::designate_charset(self, 0, byte);
            }
            (Some(&esc_codes::G1_INTERMEDIATE), byte) => {
                mode_ops::designate_charset(self, 1, byte);
            }
            (Some(&esc_codes::HASH_INTERMEDIATE), esc_codes::DECALN_ALIGNMENT_TEST) => {
                erase_ops::alignment_test(self);
            }
            _ => {
                tracing::warn!(final_byte, "unknown ESC sequence ignored");
            }
        }
    }

    fn osc_dispatch(&mut self, params: &[&[u8]], bell_terminated: bool) {
        osc_ops::dispatch_osc(self, params, bell_terminated);
    }

    fn hook(&mut self, params: &Params, intermediates: &[u8], final_byte: char) {
        dcs_ops::hook(self, params, intermediates, final_byte);
    }

    fn put(&mut self, byte: u8) { dcs_ops::put(self, byte); }

    fn unhook(&mut self) { dcs_ops::unhook(self); }
}
