// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromacode

//! Whole-buffer encode and decode pipelines.
//!
//! Encode: payload → parity append → bit stream → symbols → canvas.
//! Decode: canvas → symbols → bit stream → bytes → parity verify/trim.
//!
//! Both operate purely on pixel buffers; reading and writing container
//! files is the caller's business (see [`crate::raster`]). Each call owns
//! its buffers end to end — nothing is shared or retained between calls.

use tracing::{info, warn};

use crate::codec::bits;
use crate::codec::capacity;
use crate::codec::config::CodecConfig;
use crate::codec::error::CodecError;
use crate::codec::fec::{Fec, FecReport};
use crate::codec::mapper;

/// Canvas sizing strategy for encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeMode {
    /// Fixed square tiers selected by payload size.
    Auto,
    /// Minimal canvas computed from the payload.
    Adaptive,
}

/// A rendered canvas: 3-channel RGB pixel buffer plus its geometry.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// A decoded payload plus the parity verification outcome.
///
/// `fec.clean == false` means the payload may contain uncorrectable
/// damage; the bytes are still the best available reconstruction.
#[derive(Debug, Clone)]
pub struct DecodedPayload {
    pub data: Vec<u8>,
    pub fec: FecReport,
}

/// Encode a payload into a fresh canvas.
///
/// Tier selection (`Auto`) keys on the raw payload size; adaptive sizing
/// keys on the parity-augmented size, since that is what must fit.
///
/// # Errors
/// [`CodecError::CapacityExceeded`] when the payload outgrows the chosen
/// fixed tier. Adaptive sizing cannot fail this way.
pub fn encode_payload(
    data: &[u8],
    mode: SizeMode,
    config: &CodecConfig,
) -> Result<EncodedImage, CodecError> {
    let mut buf = data.to_vec();
    Fec::new(config).encode(&mut buf);

    let (width, height) = match mode {
        SizeMode::Auto => capacity::fixed_tier(data.len(), config),
        SizeMode::Adaptive => capacity::adaptive(buf.len(), config),
    };

    let bit_stream = bits::bytes_to_bits(&buf);
    let symbols =
        bits::bits_to_symbols(&bit_stream, config.bits_per_symbol(), config.interval_count());

    info!(
        payload_len = data.len(),
        with_parity = buf.len(),
        symbols = symbols.len(),
        width,
        height,
        "encoding payload"
    );

    let pixels = mapper::place(&symbols, width, height, config)?;
    Ok(EncodedImage {
        pixels,
        width,
        height,
    })
}

/// Decode a payload from a pixel buffer.
///
/// The expected bit count is derived from the full canvas capacity —
/// there is no embedded length field — and the parity split trims the
/// result to the original payload length.
///
/// # Errors
/// [`CodecError::GeometryMismatch`] if the buffer is shorter than
/// `width * height * channels`. Parity failure is NOT an error; it is
/// reported through [`DecodedPayload::fec`].
pub fn decode_pixels(
    pixels: &[u8],
    width: u32,
    height: u32,
    channels: usize,
    config: &CodecConfig,
) -> Result<DecodedPayload, CodecError> {
    let expected_len = width as usize * height as usize * channels;
    if pixels.len() < expected_len {
        return Err(CodecError::GeometryMismatch {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let symbols = mapper::extract(pixels, width, height, channels, config);

    let expected_bits = width as usize
        * height as usize
        * config.symbols_per_pixel
        * config.bits_per_symbol() as usize;
    let bit_stream = bits::symbols_to_bits(&symbols, config.bits_per_symbol(), expected_bits);
    let mut data = bits::bits_to_bytes(&bit_stream);

    info!(
        symbols = symbols.len(),
        recovered_bits = bit_stream.len(),
        recovered_bytes = data.len(),
        "extracted payload candidate"
    );

    let report = Fec::new(config).verify_and_correct(&mut data);
    if !report.clean {
        warn!(
            unresolved = report.unresolved,
            "payload may contain uncorrectable errors"
        );
    }

    Ok(DecodedPayload { data, fec: report })
}

/// Encode a payload straight to raster container bytes.
///
/// Convenience wrapper tying [`encode_payload`] to the container
/// boundary; the canvas is always written with 3 channels.
pub fn encode_to_container(
    data: &[u8],
    mode: SizeMode,
    format: crate::raster::RasterFormat,
    config: &CodecConfig,
) -> Result<Vec<u8>, CodecError> {
    let img = encode_payload(data, mode, config)?;
    Ok(crate::raster::encode(
        &img.pixels,
        img.width,
        img.height,
        3,
        format,
    )?)
}

/// Decode a payload straight from raster container bytes.
///
/// Canvas geometry and channel count come from the container header, as
/// the pixel stream itself carries neither.
pub fn decode_container(bytes: &[u8], config: &CodecConfig) -> Result<DecodedPayload, CodecError> {
    let img = crate::raster::decode(bytes)?;
    decode_pixels(
        &img.pixels,
        img.width,
        img.height,
        img.channels as usize,
        config,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 131 + 7) as u8).collect()
    }

    #[test]
    fn adaptive_roundtrip_exact_lengths() {
        // Multiples of 4 are the exact-inverse lengths for ratio 0.25.
        let config = CodecConfig::default();
        for len in [4usize, 8, 96, 256, 1024] {
            let original = payload(len);
            let img = encode_payload(&original, SizeMode::Adaptive, &config).unwrap();
            let out = decode_pixels(&img.pixels, img.width, img.height, 3, &config).unwrap();
            assert!(out.fec.clean, "len={len}");
            assert_eq!(out.data, original, "len={len}");
        }
    }

    #[test]
    fn auto_tier_roundtrip() {
        let config = CodecConfig::default();
        let original = payload(64);
        let img = encode_payload(&original, SizeMode::Auto, &config).unwrap();
        assert_eq!((img.width, img.height), (128, 128));
        let out = decode_pixels(&img.pixels, img.width, img.height, 3, &config).unwrap();
        assert!(out.fec.clean);
        assert_eq!(out.data, original);
    }

    #[test]
    fn oversized_payload_rejects_fixed_tier() {
        // Shrink the tiers so a modest payload overflows the canvas.
        let config = CodecConfig {
            small_size: 4,
            medium_size: 4,
            large_size: 4,
            ..CodecConfig::default()
        };
        let err = encode_payload(&payload(400), SizeMode::Auto, &config).unwrap_err();
        assert!(matches!(err, CodecError::CapacityExceeded { .. }));
    }

    #[test]
    fn empty_payload_encodes_to_blank_canvas() {
        let config = CodecConfig::default();
        let img = encode_payload(&[], SizeMode::Adaptive, &config).unwrap();
        assert!(img.pixels.iter().all(|&v| v == 0));
        let out = decode_pixels(&img.pixels, img.width, img.height, 3, &config).unwrap();
        assert!(out.fec.clean);
        assert!(out.data.is_empty());
    }

    #[test]
    fn geometry_mismatch_rejected() {
        let config = CodecConfig::default();
        let err = decode_pixels(&[0u8; 10], 4, 4, 3, &config).unwrap_err();
        assert!(matches!(err, CodecError::GeometryMismatch { .. }));
    }

    #[test]
    fn container_level_roundtrip() {
        let config = CodecConfig::default();
        let original = payload(128);
        let bytes = encode_to_container(
            &original,
            SizeMode::Adaptive,
            crate::raster::RasterFormat::Png,
            &config,
        )
        .unwrap();
        let out = decode_container(&bytes, &config).unwrap();
        assert!(out.fec.clean);
        assert_eq!(out.data, original);
    }

    #[test]
    fn container_decode_rejects_garbage() {
        let config = CodecConfig::default();
        let err = decode_container(b"definitely not a raster file", &config).unwrap_err();
        assert!(matches!(err, CodecError::Raster(_)));
    }

    #[test]
    fn decode_tolerates_alpha_channel() {
        let config = CodecConfig::default();
        let original = payload(32);
        let img = encode_payload(&original, SizeMode::Adaptive, &config).unwrap();

        // Expand RGB to RGBA the way a container might hand it back.
        let mut rgba = Vec::with_capacity(img.pixels.len() / 3 * 4);
        for px in img.pixels.chunks_exact(3) {
            rgba.extend_from_slice(px);
            rgba.push(255);
        }

        let out = decode_pixels(&rgba, img.width, img.height, 4, &config).unwrap();
        assert!(out.fec.clean);
        assert_eq!(out.data, original);
    }
}
