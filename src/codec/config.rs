// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromacode

//! Codec configuration.
//!
//! A [`CodecConfig`] is constructed once and passed by reference into every
//! operation. It is never mutated after construction, so a single value can
//! be shared freely across threads for independent encode/decode calls.
//!
//! The defaults reproduce the shipped wire format: images encoded with the
//! default configuration decode with the default configuration, on any
//! machine. Changing `interval_len`, `filler_max` or `fec_redundancy`
//! changes the wire format — both sides must agree.

/// Immutable codec configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct CodecConfig {
    /// Quantization interval length in intensity steps.
    pub interval_len: u32,
    /// Highest channel intensity still treated as filler (no data).
    /// Everything at or below this value reads as "no payload here".
    pub filler_max: u8,
    /// FEC redundancy ratio: `floor(len * fec_redundancy)` parity bytes
    /// are appended to every payload.
    pub fec_redundancy: f32,
    /// Symbols stored per pixel (one per color channel).
    pub symbols_per_pixel: usize,
    /// Minimum canvas edge length for adaptive sizing.
    pub min_dimension: u32,
    /// Edge length of the small fixed-tier canvas.
    pub small_size: u32,
    /// Edge length of the medium fixed-tier canvas.
    pub medium_size: u32,
    /// Edge length of the large fixed-tier canvas.
    pub large_size: u32,
    /// Payloads up to this many bytes select the small tier.
    pub small_threshold: usize,
    /// Payloads up to this many bytes select the medium tier.
    pub medium_threshold: usize,
    /// Individual FEC mismatch warnings beyond this count are summarized.
    pub max_fec_warnings: usize,
    /// Reserved toggle for a stronger error-correcting code. Accepted in
    /// configuration for forward compatibility but not implemented: the
    /// XOR-parity scheme runs regardless of this flag.
    pub advanced_fec: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            interval_len: 5,
            filler_max: 10,
            fec_redundancy: 0.25,
            symbols_per_pixel: 3,
            min_dimension: 16,
            small_size: 128,
            medium_size: 512,
            large_size: 1024,
            small_threshold: 96 * 1024,
            medium_threshold: 1024 * 1024,
            max_fec_warnings: 15,
            advanced_fec: false,
        }
    }
}

impl CodecConfig {
    /// Number of quantization intervals available above the filler zone.
    ///
    /// `ceil((256 - (filler_max + 1)) / interval_len)` — the intensity range
    /// `filler_max+1 ..= 255` cut into `interval_len`-wide slices, with a
    /// final short slice if the range does not divide evenly.
    pub fn interval_count(&self) -> i32 {
        let available = 256 - (self.filler_max as u32 + 1);
        available.div_ceil(self.interval_len) as i32
    }

    /// Payload bits carried per symbol: `floor(log2(interval_count))`.
    ///
    /// Every value a symbol group can take must land inside a distinct
    /// interval, so only full power-of-two capacity is usable.
    pub fn bits_per_symbol(&self) -> u32 {
        (self.interval_count() as u32).ilog2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_interval_count() {
        // 256 - 11 = 245 usable steps, L=5 ⇒ 49 intervals.
        let config = CodecConfig::default();
        assert_eq!(config.interval_count(), 49);
        assert_eq!(config.bits_per_symbol(), 5);
    }

    #[test]
    fn uneven_range_rounds_up() {
        // 245 steps at L=4 ⇒ 61.25 ⇒ 62 intervals (last one short).
        let config = CodecConfig {
            interval_len: 4,
            ..CodecConfig::default()
        };
        assert_eq!(config.interval_count(), 62);
    }

    #[test]
    fn power_of_two_configuration() {
        // filler_max=127 leaves 128 steps; L=4 ⇒ exactly 32 intervals.
        let config = CodecConfig {
            interval_len: 4,
            filler_max: 127,
            ..CodecConfig::default()
        };
        assert_eq!(config.interval_count(), 32);
        assert_eq!(config.bits_per_symbol(), 5);
    }

    #[test]
    fn filler_zone_never_reaches_first_interval() {
        // Invariant: filler_max < 256 - L, so interval 0 starts above it.
        let config = CodecConfig::default();
        assert!((config.filler_max as u32) < 256 - config.interval_len);
    }
}
