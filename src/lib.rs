// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromacode

//! # chromacode
//!
//! Visual data codec: converts an arbitrary binary payload into a raster
//! image and reconstructs the payload from that image, tolerating
//! pixel-level corruption via built-in redundancy.
//!
//! Payload bytes are expanded with XOR-parity redundancy, packed into
//! fixed-width symbols, and written as quantized channel intensities —
//! one symbol per color channel, three symbols per pixel. Unused canvas
//! stays pure black (the filler zone). Decoding re-quantizes each channel
//! to its interval, inverts the bit packing, and verifies/repairs the
//! parity bytes.
//!
//! The codec survives accidental pixel damage (a scratch, a few flipped
//! channel values) but NOT lossy recompression — store the output as PNG
//! or BMP, never JPEG.
//!
//! The raster container (`raster` module) wraps the `image` crate behind
//! a minimal decode/encode contract. The payload layer (`codec` module)
//! operates purely on pixel buffers and never touches files.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use chromacode::{encode_payload, decode_pixels, SizeMode, CodecConfig};
//!
//! let config = CodecConfig::default();
//! let img = encode_payload(b"hello world!", SizeMode::Adaptive, &config).unwrap();
//! let out = decode_pixels(&img.pixels, img.width, img.height, 3, &config).unwrap();
//! assert!(out.data.starts_with(b"hello world!"));
//! ```

pub mod codec;
pub mod raster;

pub use codec::config::CodecConfig;
pub use codec::correct::{correct_pixels, CorrectionStats};
pub use codec::detect::{detect_file_type, is_text_data};
pub use codec::error::CodecError;
pub use codec::fec::FecReport;
pub use codec::pipeline::{
    decode_container, decode_pixels, encode_payload, encode_to_container, DecodedPayload,
    EncodedImage, SizeMode,
};
pub use raster::{RasterError, RasterFormat, RasterImage};
