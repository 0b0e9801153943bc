// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromacode

//! Error type for the raster container boundary.

use core::fmt;

/// Errors from decoding or encoding a raster container.
#[derive(Debug)]
pub enum RasterError {
    /// The underlying image codec failed (unreadable, corrupt, or
    /// unsupported container data).
    Image(image::ImageError),
    /// A pixel buffer with a channel count the container cannot carry.
    UnsupportedChannels(u8),
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Image(e) => write!(f, "image codec: {e}"),
            Self::UnsupportedChannels(n) => write!(f, "unsupported channel count: {n}"),
        }
    }
}

impl std::error::Error for RasterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Image(e) => Some(e),
            Self::UnsupportedChannels(_) => None,
        }
    }
}

impl From<image::ImageError> for RasterError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e)
    }
}
