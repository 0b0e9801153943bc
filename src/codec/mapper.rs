// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromacode

//! Symbol ↔ pixel mapping.
//!
//! Placement fills a pure-black RGB canvas in row-major raster order,
//! `symbols_per_pixel` symbols per pixel, writing the anchor intensity of
//! each symbol into one color channel. Extraction walks the full canvas
//! back out: a pixel whose color channels are all filler yields filler
//! symbols, anything else decodes channel by channel.
//!
//! No length field exists in the pixel stream. Extraction therefore
//! always produces `width * height * symbols_per_pixel` symbols and the
//! FEC layer trims the payload afterwards.

use crate::codec::config::CodecConfig;
use crate::codec::error::CodecError;
use crate::codec::quant::{Quantizer, Symbol, FILLER_SYMBOL};

/// Channels written by [`place`] — always plain RGB.
pub const PLACED_CHANNELS: usize = 3;

/// Render a symbol sequence onto a fresh canvas.
///
/// The canvas starts fully black (every channel in the filler zone);
/// pixels past the payload stay that way and read back as filler.
///
/// # Errors
/// [`CodecError::CapacityExceeded`] if the symbols need more pixels than
/// `width * height`. Checked before any allocation or write.
pub fn place(
    symbols: &[Symbol],
    width: u32,
    height: u32,
    config: &CodecConfig,
) -> Result<Vec<u8>, CodecError> {
    let per_pixel = config.symbols_per_pixel;
    debug_assert!(per_pixel <= PLACED_CHANNELS);

    let available = width as usize * height as usize;
    let required = symbols.len().div_ceil(per_pixel);
    if required > available {
        return Err(CodecError::CapacityExceeded {
            required,
            available,
        });
    }

    let quant = Quantizer::new(config);
    let mut canvas = vec![0u8; available * PLACED_CHANNELS];

    for (i, &symbol) in symbols.iter().enumerate() {
        let pixel = i / per_pixel;
        let channel = i % per_pixel;
        canvas[pixel * PLACED_CHANNELS + channel] = quant.anchor(symbol);
    }

    Ok(canvas)
}

/// Read every symbol back out of a pixel buffer, in raster order.
///
/// `channels` is the stride of `pixels` (3 or 4; an alpha channel is
/// ignored). Output length is always `width * height * symbols_per_pixel`:
/// filler pixels contribute [`FILLER_SYMBOL`]s, everything else decodes
/// each color channel independently.
pub fn extract(
    pixels: &[u8],
    width: u32,
    height: u32,
    channels: usize,
    config: &CodecConfig,
) -> Vec<Symbol> {
    let per_pixel = config.symbols_per_pixel;
    let quant = Quantizer::new(config);
    let total_pixels = width as usize * height as usize;
    let mut symbols = Vec::with_capacity(total_pixels * per_pixel);

    for pixel in pixels.chunks_exact(channels).take(total_pixels) {
        let is_filler_pixel =
            quant.is_filler(pixel[0]) && quant.is_filler(pixel[1]) && quant.is_filler(pixel[2]);
        if is_filler_pixel {
            for _ in 0..per_pixel {
                symbols.push(FILLER_SYMBOL);
            }
        } else {
            for channel in 0..per_pixel {
                symbols.push(quant.decode_symbol(pixel[channel]));
            }
        }
    }

    symbols
}
