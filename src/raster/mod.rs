// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromacode

//! Raster container boundary.
//!
//! Thin wrapper over the `image` crate exposing exactly the contract the
//! codec needs: `decode(bytes) -> (width, height, channels, pixels)` and
//! `encode(pixels, geometry, format) -> bytes`. Canvas geometry lives in
//! the container header, never in the pixel stream.
//!
//! Decoded buffers are normalized to at least 3 channels: grayscale
//! inputs have their luminance replicated into RGB (dropping any alpha),
//! so the codec can always read three color channels per pixel.

pub mod error;

use std::io::Cursor;

use image::DynamicImage;
use tracing::debug;

pub use error::RasterError;

/// Output container formats the encoder can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    /// Lossless, compressed. The default.
    Png,
    /// Uncompressed, maximally compatible.
    Bmp,
}

impl RasterFormat {
    /// Conventional file extension.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Bmp => "bmp",
        }
    }
}

impl From<RasterFormat> for image::ImageFormat {
    fn from(f: RasterFormat) -> Self {
        match f {
            RasterFormat::Png => image::ImageFormat::Png,
            RasterFormat::Bmp => image::ImageFormat::Bmp,
        }
    }
}

/// A decoded raster image, normalized to 3 or 4 channels.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub pixels: Vec<u8>,
}

/// Decode a container byte stream into a normalized pixel buffer.
///
/// # Errors
/// [`RasterError::Image`] on unreadable or corrupt input.
pub fn decode(bytes: &[u8]) -> Result<RasterImage, RasterError> {
    let img = image::load_from_memory(bytes)?;
    let (width, height) = (img.width(), img.height());

    let (channels, pixels) = match img {
        DynamicImage::ImageRgb8(rgb) => (3, rgb.into_raw()),
        DynamicImage::ImageRgba8(rgba) => (4, rgba.into_raw()),
        // Grayscale and exotic formats: replicate luminance into RGB.
        other => (3, other.into_rgb8().into_raw()),
    };

    debug!(width, height, channels, "decoded raster container");
    Ok(RasterImage {
        width,
        height,
        channels,
        pixels,
    })
}

/// Encode a pixel buffer into a container byte stream.
///
/// # Errors
/// [`RasterError::UnsupportedChannels`] for channel counts other than 3
/// or 4; [`RasterError::Image`] if the underlying codec fails.
pub fn encode(
    pixels: &[u8],
    width: u32,
    height: u32,
    channels: u8,
    format: RasterFormat,
) -> Result<Vec<u8>, RasterError> {
    let color = match channels {
        3 => image::ExtendedColorType::Rgb8,
        4 => image::ExtendedColorType::Rgba8,
        n => return Err(RasterError::UnsupportedChannels(n)),
    };

    let mut out = Cursor::new(Vec::new());
    image::write_buffer_with_format(&mut out, pixels, width, height, color, format.into())?;
    Ok(out.into_inner())
}

/// Expand a 3-channel buffer to RGBA with opaque alpha. A 4-channel
/// buffer passes through unchanged.
pub fn expand_to_rgba(pixels: &[u8], channels: u8) -> Vec<u8> {
    if channels == 4 {
        return pixels.to_vec();
    }
    let mut out = Vec::with_capacity(pixels.len() / 3 * 4);
    for px in pixels.chunks_exact(3) {
        out.extend_from_slice(px);
        out.push(255);
    }
    out
}
