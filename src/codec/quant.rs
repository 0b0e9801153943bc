// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromacode

//! Interval quantization of channel intensities.
//!
//! The 8-bit intensity domain is split into a filler zone
//! (`0 ..= filler_max`, "no data") and a run of `interval_len`-wide
//! quantization intervals covering `filler_max+1 ..= 255`. Each interval
//! represents one symbol; the canonical intensity written for a symbol is
//! its interval midpoint (the *anchor*). Decoding maps any intensity back
//! to the interval containing it, so a channel value may drift anywhere
//! within its interval without changing the decoded symbol.

use crate::codec::config::CodecConfig;

/// A quantized payload unit. Valid symbols are `0 .. interval_count`;
/// [`FILLER_SYMBOL`] marks a channel that carries no payload.
pub type Symbol = i32;

/// Sentinel for "no data" (filler pixels and padding channels).
pub const FILLER_SYMBOL: Symbol = -1;

/// Maps symbols to anchor intensities and intensities back to symbols.
#[derive(Debug, Clone, Copy)]
pub struct Quantizer {
    interval_len: u32,
    filler_max: u8,
    interval_count: i32,
}

impl Quantizer {
    pub fn new(config: &CodecConfig) -> Self {
        Self {
            interval_len: config.interval_len,
            filler_max: config.filler_max,
            interval_count: config.interval_count(),
        }
    }

    /// Number of quantization intervals.
    pub fn interval_count(&self) -> i32 {
        self.interval_count
    }

    /// Canonical intensity for a symbol: the midpoint of its interval.
    ///
    /// The last interval may be shorter than `interval_len` when the range
    /// does not divide evenly; its midpoint is computed over the clipped
    /// extent. Out-of-range indices clamp to the last interval.
    pub fn anchor(&self, symbol: Symbol) -> u8 {
        let index = symbol.clamp(0, self.interval_count - 1) as u32;
        let start = self.filler_max as u32 + 1 + index * self.interval_len;
        let end = (start + self.interval_len - 1).min(255);
        (start + (end - start) / 2) as u8
    }

    /// Whether an intensity falls in the filler zone.
    pub fn is_filler(&self, value: u8) -> bool {
        value <= self.filler_max
    }

    /// Decode an intensity to its symbol, or [`FILLER_SYMBOL`] for filler.
    ///
    /// Total over all byte values: intensities past the last interval
    /// clamp to it rather than failing.
    pub fn decode_symbol(&self, value: u8) -> Symbol {
        if self.is_filler(value) {
            return FILLER_SYMBOL;
        }
        let adjusted = (value - (self.filler_max + 1)) as u32;
        let index = (adjusted / self.interval_len) as i32;
        index.min(self.interval_count - 1)
    }
}
