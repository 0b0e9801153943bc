// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromacode

//! Canvas sizing.
//!
//! Two strategies: fixed square tiers keyed on the raw payload size
//! (fast to reason about, wasteful for small payloads) and adaptive
//! sizing, which computes the minimal near-square canvas for the
//! FEC-augmented byte count. Adaptive sizing always yields enough pixels
//! by construction; a fixed tier can be too small for an oversized
//! payload, in which case placement fails before writing anything.

use tracing::debug;

use crate::codec::config::CodecConfig;

/// Symbols required to carry `byte_len` bytes.
pub fn symbols_needed(byte_len: usize, config: &CodecConfig) -> usize {
    (byte_len * 8).div_ceil(config.bits_per_symbol() as usize)
}

/// Pixels required to carry `symbol_count` symbols.
pub fn pixels_needed(symbol_count: usize, config: &CodecConfig) -> usize {
    symbol_count.div_ceil(config.symbols_per_pixel)
}

/// Pick a fixed square tier from the raw (pre-FEC) payload size.
pub fn fixed_tier(payload_len: usize, config: &CodecConfig) -> (u32, u32) {
    let edge = if payload_len <= config.small_threshold {
        config.small_size
    } else if payload_len <= config.medium_threshold {
        config.medium_size
    } else {
        config.large_size
    };
    (edge, edge)
}

/// Compute the minimal canvas for a FEC-augmented payload of `byte_len`
/// bytes, floored at the configured minimum dimension.
pub fn adaptive(byte_len: usize, config: &CodecConfig) -> (u32, u32) {
    let total_symbols = symbols_needed(byte_len, config);
    let pixels = pixels_needed(total_symbols, config);

    let side = (pixels as f64).sqrt().ceil() as u32;
    let width = side.max(config.min_dimension).max(1);
    let height = ((pixels as u64).div_ceil(width as u64) as u32).max(config.min_dimension);

    debug!(byte_len, pixels, width, height, "adaptive canvas");
    (width, height)
}
