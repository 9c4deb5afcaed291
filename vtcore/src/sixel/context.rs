// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The SIXEL decoding context: register file, scanline buffer and the
//! command sub-parser driven from the DCS string body.

use smallvec::SmallVec;

use super::color::{argb, color_from_hls, color_from_rgb_pct, sixel_default_palette};

/// Hard bound on image width, in pixels.
pub const MAX_WIDTH: usize = 4096;

/// Hard bound on image height, in pixels. Divisible by 6 so the bound falls
/// on a scanline boundary.
pub const MAX_HEIGHT: usize = 4092;

/// Colour registers available to the stream (power of two: out-of-range
/// register parameters wrap by masking).
pub const NUM_REGISTERS: usize = 1024;

/// Pixel sentinel: not written by any sixel.
const UNSET: u16 = u16::MAX;

/// A finished image: dimensions plus resolved RGBA pixels (row-major,
/// packed ARGB words).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SixelImage {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

/// Command sub-parser state: either raw data, or collecting parameters for
/// `!`, `"` or `#`.
#[derive(Debug, Clone, Default)]
enum CmdState {
    #[default]
    Data,
    Params {
        cmd: u8,
        params: SmallVec<[u16; 8]>,
        accumulating: bool,
    },
}

/// One 6-pixel-high scanline: interleaved indexed pixels (6 per column) plus
/// the OR of all sixel data bytes seen on it.
#[derive(Debug, Clone, Default)]
struct Scanline {
    pixels: Vec<u16>,
    mask: u8,
    width: usize,
}

/// Live decoding state for one `DCS q` stream.
#[derive(Debug)]
pub struct SixelContext {
    aspect: (u16, u16),
    transparent_bg: bool,
    raster_width: usize,
    raster_height: usize,
    registers: Box<[u32; NUM_REGISTERS]>,
    current: usize,
    repeat: usize,
    x: usize,
    scanlines: Vec<Scanline>,
    /// Scanlines past [`MAX_HEIGHT`] drop their data but parsing continues.
    past_height: bool,
    state: CmdState,
    /// Background colour used for unset pixels at resolution.
    background: u32,
}

impl SixelContext {
    /// Begin a stream. `aspect` and `transparent_bg` come from the DCS
    /// introducer parameters; `foreground`/`background` are the screen
    /// colours for registers 1 and 0; `reset_registers` applies the VT340
    /// power-on palette first (private colour registers).
    #[must_use]
    pub fn new(
        aspect: (u16, u16),
        transparent_bg: bool,
        foreground: u32,
        background: u32,
        reset_registers: bool,
    ) -> Self {
        let mut registers = Box::new([0u32; NUM_REGISTERS]);
        if reset_registers {
            sixel_default_palette(&mut registers[..]);
        }
        registers[0] = if transparent_bg {
            background & 0x00FF_FFFF
        } else {
            background
        };
        registers[1] = foreground;
        Self {
            aspect: (aspect.0.max(1), aspect.1.max(1)),
            transparent_bg,
            raster_width: 0,
            raster_height: 0,
            registers,
            current: 1,
            repeat: 1,
            x: 0,
            scanlines: vec![Scanline::default()],
            past_height: false,
            state: CmdState::Data,
            background,
        }
    }

    /// Pixel aspect ratio from the introducer/DECGRA; carried for embedders
    /// that honour it, unused by decoding itself.
    #[must_use]
    pub fn aspect(&self) -> (u16, u16) { self.aspect }

    /// Feed one string-body byte.
    pub fn put(&mut self, byte: u8) {
        if let CmdState::Params { .. } = self.state {
            if self.param_byte(byte) {
                return;
            }
            // Fall through: `byte` terminated the command and is reprocessed
            // as data.
        }
        self.data_byte(byte);
    }

    /// Handle a byte while collecting parameters. Returns true when the byte
    /// was consumed.
    fn param_byte(&mut self, byte: u8) -> bool {
        let CmdState::Params {
            cmd,
            params,
            accumulating,
        } = &mut self.state
        else {
            return false;
        };
        match byte {
            b'0'..=b'9' => {
                if !*accumulating {
                    params.push(0);
                    *accumulating = true;
                }
                let last = params.last_mut().expect("pushed above");
                *last = last.saturating_mul(10).saturating_add(u16::from(byte - b'0'));
                true
            }
            b';' => {
                if !*accumulating {
                    params.push(0);
                }
                *accumulating = false;
                true
            }
            _ => {
                let cmd = *cmd;
                let params = std::mem::take(params);
                self.state = CmdState::Data;
                self.run_command(cmd, &params);
                false
            }
        }
    }

    fn data_byte(&mut self, byte: u8) {
        match byte {
            0x3F..=0x7E => self.draw_sixel(byte - 0x3F),
            b'!' | b'"' | b'#' => {
                self.state = CmdState::Params {
                    cmd: byte,
                    params: SmallVec::new(),
                    accumulating: false,
                };
            }
            b'$' => self.graphics_carriage_return(),
            // DECGNL; '+' is the undocumented DECGCH (cursor home), which
            // the VT240 lineage treats as a plain next-line.
            b'-' | b'+' => self.graphics_next_line(),
            _ => {}
        }
    }

    fn draw_sixel(&mut self, data: u8) {
        let repeat = std::mem::replace(&mut self.repeat, 1);
        if self.past_height {
            return;
        }
        let scanline = self.scanlines.last_mut().expect("always one scanline");
        scanline.mask |= data;
        let end = (self.x + repeat).min(MAX_WIDTH);
        if end > scanline.width {
            scanline.pixels.resize(end * 6, UNSET);
            scanline.width = end;
        }
        if data != 0 {
            #[allow(clippy::cast_possible_truncation)]
            let register = self.current as u16;
            for x in self.x..end {
                for bit in 0..6 {
                    if data & (1 << bit) != 0 {
                        scanline.pixels[x * 6 + bit] = register;
                    }
                }
            }
        }
        self.x = end;
    }

    fn graphics_carriage_return(&mut self) {
        self.repeat = 1;
        self.x = 0;
    }

    fn graphics_next_line(&mut self) {
        self.repeat = 1;
        self.x = 0;
        if self.past_height {
            return;
        }
        if (self.scanlines.len() + 1) * 6 > MAX_HEIGHT {
            self.past_height = true;
            return;
        }
        self.scanlines.push(Scanline::default());
    }

    fn run_command(&mut self, cmd: u8, params: &[u16]) {
        match cmd {
            b'!' => {
                // DECGRI - repeat introducer.
                self.repeat = usize::from(*params.first().unwrap_or(&1)).clamp(1, MAX_WIDTH);
            }
            b'"' => self.raster_attributes(params),
            b'#' => self.color_introducer(params),
            _ => {}
        }
    }

    /// DECGRA: aspect ratio and raster dimensions; honoured only before any
    /// sixel data.
    fn raster_attributes(&mut self, params: &[u16]) {
        self.repeat = 1;
        let seen_data = self.x > 0
            || self.scanlines.len() > 1
            || self.scanlines.first().is_some_and(|s| s.mask != 0);
        if seen_data {
            return;
        }
        let num = params.first().copied().unwrap_or(1).max(1);
        let den = params.get(1).copied().unwrap_or(1).max(1);
        self.aspect = (num, den);
        self.raster_width = usize::from(params.get(2).copied().unwrap_or(0)).min(MAX_WIDTH);
        self.raster_height =
            usize::from(params.get(3).copied().unwrap_or(0)).min(MAX_HEIGHT);
    }

    /// DECGCI: select the current register, optionally redefining it.
    fn color_introducer(&mut self, params: &[u16]) {
        self.repeat = 1;
        let register = usize::from(params.first().copied().unwrap_or(0)) & (NUM_REGISTERS - 1);
        self.current = register;
        if params.len() < 2 {
            return;
        }
        match params.get(1) {
            Some(1) => {
                // HLS.
                let h = params.get(2).copied().unwrap_or(0);
                let l = params.get(3).copied().unwrap_or(0);
                let s = params.get(4).copied().unwrap_or(0);
                if h > 360 || l > 100 || s > 100 {
                    tracing::warn!(h, l, s, "sixel HLS components out of range, ignored");
                    return;
                }
                self.registers[register] = color_from_hls(h, l, s);
            }
            Some(2) => {
                // RGB.
                let r = params.get(2).copied().unwrap_or(0);
                let g = params.get(3).copied().unwrap_or(0);
                let b = params.get(4).copied().unwrap_or(0);
                if r > 100 || g > 100 || b > 100 {
                    tracing::warn!(r, g, b, "sixel RGB components out of range, ignored");
                    return;
                }
                self.registers[register] = color_from_rgb_pct(r, g, b);
            }
            _ => {}
        }
    }

    /// Actual (data-driven) extents so far.
    fn data_extents(&self) -> (usize, usize) {
        let width = self.scanlines.iter().map(|s| s.width).max().unwrap_or(0);
        let mut height = 0usize;
        for (i, scanline) in self.scanlines.iter().enumerate() {
            if scanline.mask != 0 {
                let msb = 7 - scanline.mask.leading_zeros() as usize;
                height = i * 6 + msb + 1;
            }
        }
        (width, height)
    }

    /// Finish the stream and resolve the raster to ARGB pixels. Returns
    /// `None` for an empty image.
    #[must_use]
    pub fn finish(mut self) -> Option<SixelImage> {
        // Flush a pending command (stream ended inside parameters).
        if let CmdState::Params { cmd, params, .. } = std::mem::take(&mut self.state) {
            self.run_command(cmd, &params);
        }
        let (data_width, data_height) = self.data_extents();
        let width = data_width.max(self.raster_width).min(MAX_WIDTH);
        let height = data_height.max(self.raster_height).min(MAX_HEIGHT);
        if width == 0 || height == 0 {
            return None;
        }
        let background = if self.transparent_bg {
            self.background & 0x00FF_FFFF
        } else {
            self.registers[0]
        };
        let mut pixels = vec![background; width * height];
        for y in 0..height {
            let Some(scanline) = self.scanlines.get(y / 6) else { break };
            let bit = y % 6;
            for x in 0..scanline.width.min(width) {
                let index = scanline.pixels[x * 6 + bit];
                if index != UNSET {
                    pixels[y * width + x] = self.registers[usize::from(index)];
                }
            }
        }
        tracing::debug!(width, height, "sixel image decoded");
        Some(SixelImage {
            width,
            height,
            pixels,
        })
    }
}
