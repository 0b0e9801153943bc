// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromacode

//! XOR-parity forward error correction.
//!
//! Encoding appends `floor(len * fec_redundancy)` parity bytes to the
//! payload. Parity byte `i` is the XOR of the 8 source bytes at positions
//! `(j * parity_len + i) mod len` for `j` in `0..8`. Decoding recomputes
//! every parity byte and, on mismatch, searches the 8 contributing
//! positions × 8 bit positions for a single-bit flip that reconciles that
//! parity byte, accepting the first hypothesis that does.
//!
//! Two things about this scheme are deliberate and must not be "improved"
//! without breaking compatibility with previously encoded images:
//!
//! - The encode-side length formula (`floor(len * r)`) and the
//!   decode-side split (`floor(total / (1 + r))`) are not exact inverses
//!   for every payload length. Lengths where they do invert round-trip
//!   cleanly; others decode with spurious parity mismatches and a
//!   degraded-success report.
//! - Single-parity XOR carries no minimum-distance guarantee. Several
//!   flip hypotheses can reconcile the same parity byte, and the
//!   first-match rule may repair the wrong position while still
//!   reconciling. The outcome is reproducible, not always correct.
//!
//! Correction failure is never an error: the caller gets the best-effort
//! buffer and a [`FecReport`] saying whether every parity byte matched.

use tracing::{debug, warn};

use crate::codec::config::CodecConfig;

/// Minimum buffer length worth verifying; anything shorter passes through.
const MIN_VERIFY_LEN: usize = 5;

/// Number of source bytes contributing to each parity byte.
const SOURCES_PER_PARITY: usize = 8;

/// Outcome of [`Fec::verify_and_correct`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FecReport {
    /// True when every parity byte matched after correction.
    pub clean: bool,
    /// Source bytes rewritten by accepted flip hypotheses.
    pub corrected: usize,
    /// Parity bytes still mismatched after correction.
    pub unresolved: usize,
}

impl FecReport {
    fn pass_through() -> Self {
        Self {
            clean: true,
            corrected: 0,
            unresolved: 0,
        }
    }
}

/// Stateless XOR-parity encoder/corrector.
#[derive(Debug, Clone, Copy)]
pub struct Fec {
    redundancy: f32,
    max_warnings: usize,
}

impl Fec {
    pub fn new(config: &CodecConfig) -> Self {
        Self {
            redundancy: config.fec_redundancy,
            max_warnings: config.max_fec_warnings,
        }
    }

    /// Parity bytes appended to a payload of `len` bytes.
    ///
    /// Computed in f32 and truncated, matching the wire format exactly.
    pub fn parity_len(&self, len: usize) -> usize {
        (len as f32 * self.redundancy) as usize
    }

    /// Append parity bytes to `data` in place. No-op for an empty buffer.
    pub fn encode(&self, data: &mut Vec<u8>) {
        let original_len = data.len();
        if original_len == 0 {
            return;
        }

        let parity_len = self.parity_len(original_len);
        let mut parity = Vec::with_capacity(parity_len);
        for i in 0..parity_len {
            let mut byte = 0u8;
            for j in 0..SOURCES_PER_PARITY {
                byte ^= data[(j * parity_len + i) % original_len];
            }
            parity.push(byte);
        }
        data.extend_from_slice(&parity);

        debug!(original_len, parity_len, "appended parity bytes");
    }

    /// Verify parity and attempt single-bit correction.
    ///
    /// On the correction path `data` is replaced by the original-length
    /// slice — corrected as far as the scheme allows — whether or not
    /// every parity byte could be reconciled. Buffers shorter than
    /// [`MIN_VERIFY_LEN`], or whose parity region is empty, pass through
    /// untouched.
    pub fn verify_and_correct(&self, data: &mut Vec<u8>) -> FecReport {
        if data.len() < MIN_VERIFY_LEN {
            return FecReport::pass_through();
        }

        // Mirror of the encode-side sizing rule; see module docs for the
        // payload lengths where the two formulas drift apart.
        let original_len = (data.len() as f32 / (1.0 + self.redundancy)) as usize;
        let parity_len = data.len() - original_len;
        if parity_len == 0 || original_len == 0 {
            return FecReport::pass_through();
        }

        let mut corrected = data[..original_len].to_vec();

        let clean_on_arrival = (0..parity_len)
            .all(|i| recompute_parity(&corrected, parity_len, i) == data[original_len + i]);
        if clean_on_arrival {
            *data = corrected;
            return FecReport::pass_through();
        }

        // Correction pass. Repairs accumulate: a byte fixed for one parity
        // block feeds into the recomputation for the next.
        let mut repairs = 0usize;
        for i in 0..parity_len {
            let calculated = recompute_parity(&corrected, parity_len, i);
            let stored = data[original_len + i];
            if calculated == stored {
                continue;
            }

            'hypotheses: for j in 0..SOURCES_PER_PARITY {
                let index = (j * parity_len + i) % original_len;
                let original_byte = corrected[index];
                for bit in 0..8 {
                    let test_byte = original_byte ^ (1u8 << bit);
                    if calculated ^ original_byte ^ test_byte == stored {
                        corrected[index] = test_byte;
                        repairs += 1;
                        debug!(position = index, parity_block = i, "corrected byte");
                        break 'hypotheses;
                    }
                }
            }
        }

        // Full re-verification against the repaired buffer.
        let mut unresolved = 0usize;
        for i in 0..parity_len {
            if recompute_parity(&corrected, parity_len, i) != data[original_len + i] {
                unresolved += 1;
                if unresolved <= self.max_warnings {
                    warn!(parity_block = i, "uncorrectable parity mismatch");
                }
            }
        }
        if unresolved > self.max_warnings {
            warn!(
                omitted = unresolved - self.max_warnings,
                "further parity mismatches not listed"
            );
        }

        *data = corrected;
        FecReport {
            clean: unresolved == 0,
            corrected: repairs,
            unresolved,
        }
    }
}

/// XOR of the 8 source bytes feeding parity byte `i`.
fn recompute_parity(original: &[u8], parity_len: usize, i: usize) -> u8 {
    let mut byte = 0u8;
    for j in 0..SOURCES_PER_PARITY {
        byte ^= original[(j * parity_len + i) % original.len()];
    }
    byte
}
