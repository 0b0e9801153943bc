// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromacode

//! Error types for the codec pipeline.
//!
//! Hard failures only: capacity violations and container propagation.
//! FEC correction failure is deliberately NOT represented here — it is a
//! degraded success carried in [`crate::codec::fec::FecReport`].

use core::fmt;

/// Errors that can occur while encoding or decoding a payload.
#[derive(Debug)]
pub enum CodecError {
    /// The symbol sequence needs more pixels than the canvas provides.
    CapacityExceeded {
        /// Pixels the payload requires.
        required: usize,
        /// Pixels the canvas offers.
        available: usize,
    },
    /// The pixel buffer does not match the declared geometry.
    GeometryMismatch {
        expected: usize,
        actual: usize,
    },
    /// The raster container collaborator failed.
    Raster(crate::raster::RasterError),
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded { required, available } => write!(
                f,
                "canvas too small: payload needs {required} pixels, canvas has {available}"
            ),
            Self::GeometryMismatch { expected, actual } => write!(
                f,
                "pixel buffer length {actual} does not match geometry ({expected} expected)"
            ),
            Self::Raster(e) => write!(f, "raster container: {e}"),
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Raster(e) => Some(e),
            _ => None,
        }
    }
}

impl From<crate::raster::RasterError> for CodecError {
    fn from(e: crate::raster::RasterError) -> Self {
        Self::Raster(e)
    }
}
