// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromacode

//! Pixel-domain cleanup of a rendered canvas.
//!
//! Re-quantizes every color channel of an already-rendered image back to
//! its nearest valid anchor and normalizes filler pixels to pure black.
//! This removes small intensity drift (scanner noise, slight editing)
//! *before* it accumulates past interval boundaries — purely a pixel
//! operation, independent of the FEC layer.

use tracing::info;

use crate::codec::config::CodecConfig;
use crate::codec::quant::{Quantizer, FILLER_SYMBOL};

/// Channel-level statistics from a correction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CorrectionStats {
    /// Color channels already sitting exactly on an anchor.
    pub correct_channels: usize,
    /// Color channels moved onto an anchor.
    pub adjusted_channels: usize,
    /// Pixels whose color channels were all in the filler zone.
    pub filler_pixels: usize,
    /// Total pixels examined.
    pub total_pixels: usize,
}

impl CorrectionStats {
    /// Fraction of payload-bearing channels that needed adjustment:
    /// `adjusted / (total color channels - filler channels)`.
    pub fn corruption_ratio(&self) -> f32 {
        let carrying = self.total_pixels * 3 - self.filler_pixels * 3;
        if carrying == 0 {
            return 0.0;
        }
        self.adjusted_channels as f32 / carrying as f32
    }

    /// True when the image was already anchor-pure black-on-filler.
    pub fn is_pristine(&self) -> bool {
        self.adjusted_channels == 0
    }
}

/// Re-anchor every pixel of the buffer.
///
/// `channels` must be 3 or 4; a fourth (alpha) channel is carried through
/// unchanged. Filler pixels are snapped to pure black. Within a
/// payload-bearing pixel, a channel that itself reads as filler is
/// written as 0.
pub fn correct_pixels(
    pixels: &[u8],
    width: u32,
    height: u32,
    channels: usize,
    config: &CodecConfig,
) -> (Vec<u8>, CorrectionStats) {
    debug_assert!(channels >= 3);

    let quant = Quantizer::new(config);
    let total_pixels = width as usize * height as usize;
    let mut out = Vec::with_capacity(total_pixels * channels);
    let mut stats = CorrectionStats {
        total_pixels,
        ..CorrectionStats::default()
    };

    for pixel in pixels.chunks_exact(channels).take(total_pixels) {
        let is_filler_pixel =
            quant.is_filler(pixel[0]) && quant.is_filler(pixel[1]) && quant.is_filler(pixel[2]);

        if is_filler_pixel {
            stats.filler_pixels += 1;
            out.extend_from_slice(&[0, 0, 0]);
        } else {
            for &value in &pixel[..3] {
                let symbol = quant.decode_symbol(value);
                if symbol == FILLER_SYMBOL {
                    out.push(0);
                } else {
                    let anchor = quant.anchor(symbol);
                    out.push(anchor);
                    if value == anchor {
                        stats.correct_channels += 1;
                    } else {
                        stats.adjusted_channels += 1;
                    }
                }
            }
        }

        if channels > 3 {
            out.extend_from_slice(&pixel[3..]);
        }
    }

    info!(
        adjusted = stats.adjusted_channels,
        filler = stats.filler_pixels,
        ratio = stats.corruption_ratio(),
        "correction pass finished"
    );

    (out, stats)
}
