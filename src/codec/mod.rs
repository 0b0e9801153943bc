// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromacode

//! The payload layer: quantization, bit packing, parity redundancy,
//! sizing, symbol placement and pixel-domain cleanup.
//!
//! All components receive an immutable [`config::CodecConfig`] and own
//! their buffers for the duration of one call. None of them reads files,
//! parses containers, or knows about the CLI.

pub mod bits;
pub mod capacity;
pub mod config;
pub mod correct;
pub mod detect;
pub mod error;
pub mod fec;
pub mod mapper;
pub mod pipeline;
pub mod quant;

pub use config::CodecConfig;
pub use correct::{correct_pixels, CorrectionStats};
pub use error::CodecError;
pub use fec::{Fec, FecReport};
pub use pipeline::{
    decode_container, decode_pixels, encode_payload, encode_to_container, DecodedPayload,
    EncodedImage, SizeMode,
};
pub use quant::{Quantizer, Symbol, FILLER_SYMBOL};
