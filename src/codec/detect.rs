// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromacode

//! Payload content sniffing.
//!
//! Only used to pick a file extension for decoded output — never to
//! alter the bytes. Magic signatures first, then a printable-character
//! heuristic to separate text from opaque binary.

/// Minimum printable-character ratio for text classification.
const TEXT_THRESHOLD: f32 = 0.85;

/// Maximum control-character ratio for text classification.
const CONTROL_THRESHOLD: f32 = 0.05;

/// Bytes inspected by [`is_text_data`].
const SNIFF_LEN: usize = 1000;

/// Known magic signatures, checked in order.
const SIGNATURES: &[(&str, &[u8])] = &[
    ("zip", &[0x50, 0x4B, 0x03, 0x04]),
    ("doc", &[0xD0, 0xCF, 0x11, 0xE0]),
    ("pdf", &[0x25, 0x50, 0x44, 0x46]),
    ("png", &[0x89, 0x50, 0x4E, 0x47]),
    ("jpg", &[0xFF, 0xD8, 0xFF, 0xE0]),
    ("jpg", &[0xFF, 0xD8, 0xFF, 0xE1]),
    ("gif", &[0x47, 0x49, 0x46, 0x38]),
    ("bmp", &[0x42, 0x4D]),
];

/// Heuristic text detection over the first [`SNIFF_LEN`] bytes.
///
/// NUL bytes over 5% or control characters over 2% classify as binary
/// immediately; otherwise the printable ratio must clear
/// [`TEXT_THRESHOLD`] with control characters under [`CONTROL_THRESHOLD`].
pub fn is_text_data(data: &[u8]) -> bool {
    if data.is_empty() {
        return false;
    }

    let check = &data[..data.len().min(SNIFF_LEN)];
    let mut printable = 0usize;
    let mut control = 0usize;
    let mut nulls = 0usize;

    for &c in check {
        match c {
            32..=126 | 9 | 10 | 13 => printable += 1,
            0 => {
                nulls += 1;
                if nulls > check.len() / 20 {
                    return false;
                }
            }
            c if c < 32 => {
                control += 1;
                if control > check.len() / 50 {
                    return false;
                }
            }
            // High bytes: likely part of a UTF-8 multibyte sequence.
            _ => printable += 1,
        }
    }

    let printable_ratio = printable as f32 / check.len() as f32;
    let control_ratio = control as f32 / check.len() as f32;
    printable_ratio > TEXT_THRESHOLD && control_ratio < CONTROL_THRESHOLD
}

/// Pick a file extension for a decoded payload.
///
/// Magic signatures win; unsigned payloads fall back to `txt` or `bin`
/// by the text heuristic.
pub fn detect_file_type(data: &[u8]) -> &'static str {
    if data.len() >= 4 {
        for (ext, sig) in SIGNATURES {
            if data.len() >= sig.len() && data.starts_with(sig) {
                return ext;
            }
        }
    }
    if is_text_data(data) {
        "txt"
    } else {
        "bin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_magic_signatures() {
        assert_eq!(detect_file_type(&[0x50, 0x4B, 0x03, 0x04, 0, 0]), "zip");
        assert_eq!(detect_file_type(&[0x25, 0x50, 0x44, 0x46, b'-']), "pdf");
        assert_eq!(detect_file_type(&[0x89, 0x50, 0x4E, 0x47, 0x0D]), "png");
        assert_eq!(detect_file_type(&[0xFF, 0xD8, 0xFF, 0xE0, 0]), "jpg");
        assert_eq!(detect_file_type(&[0xFF, 0xD8, 0xFF, 0xE1, 0]), "jpg");
        assert_eq!(detect_file_type(&[0x42, 0x4D, 0, 0]), "bmp");
    }

    #[test]
    fn plain_text_detected() {
        let data = b"The quick brown fox jumps over the lazy dog.\nAnd again.\n";
        assert!(is_text_data(data));
        assert_eq!(detect_file_type(data), "txt");
    }

    #[test]
    fn utf8_text_detected() {
        let data = "Grüße aus Köln — ¡hola señor!\n".as_bytes();
        assert!(is_text_data(data));
    }

    #[test]
    fn binary_noise_detected() {
        let data: Vec<u8> = (0..600).map(|i| (i * 7 % 256) as u8).collect();
        assert_eq!(detect_file_type(&data), "bin");
    }

    #[test]
    fn nul_heavy_data_is_binary() {
        let mut data = vec![b'a'; 100];
        for i in (0..100).step_by(10) {
            data[i] = 0;
        }
        assert!(!is_text_data(&data));
    }

    #[test]
    fn empty_is_binary() {
        assert!(!is_text_data(&[]));
        assert_eq!(detect_file_type(&[]), "bin");
    }

    #[test]
    fn short_unsigned_payload_falls_through() {
        assert_eq!(detect_file_type(b"hi"), "txt");
    }
}
