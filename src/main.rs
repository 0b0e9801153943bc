// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/chromacode

//! Command-line frontend: encode, decode, correct.
//!
//! All codec logic lives in the library; this binary only reads and
//! writes files, picks output names, and reports outcomes. Hard failures
//! abort before any output file is created; a degraded FEC result still
//! writes the best-effort payload and warns.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use chromacode::{
    correct_pixels, decode_container, detect_file_type, encode_to_container, raster, CodecConfig,
    RasterFormat, SizeMode,
};

#[derive(Parser)]
#[command(name = "chromacode", version, about = "Store files as damage-tolerant raster images")]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a file into a raster image.
    Encode {
        /// File to encode.
        input: PathBuf,
        /// Compute the minimal canvas instead of a fixed size tier.
        #[arg(long)]
        adaptive: bool,
        /// Container format for the encoded image.
        #[arg(long, value_enum, default_value = "png")]
        format: OutputFormat,
        /// Output path (default: `<input>_encoded.<format>`).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Extract the payload from an encoded image.
    Decode {
        /// Image to decode (PNG or BMP; JPEG only with --force).
        input: PathBuf,
        /// Proceed even if the input looks like a lossy JPEG.
        #[arg(long)]
        force: bool,
        /// Output path (default: `<input>_decoded.<detected-ext>`).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Re-anchor a damaged image without decoding it.
    Correct {
        /// Image to clean up (PNG or BMP).
        input: PathBuf,
        /// Output path (default: `<input>_corrected.bmp`).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy)]
enum OutputFormat {
    Png,
    Bmp,
}

impl From<OutputFormat> for RasterFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Png => RasterFormat::Png,
            OutputFormat::Bmp => RasterFormat::Bmp,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let config = CodecConfig::default();

    match cli.command {
        Command::Encode {
            input,
            adaptive,
            format,
            output,
        } => encode_command(&input, adaptive, format.into(), output, &config),
        Command::Decode {
            input,
            force,
            output,
        } => decode_command(&input, force, output, &config),
        Command::Correct { input, output } => correct_command(&input, output, &config),
    }
}

fn encode_command(
    input: &Path,
    adaptive: bool,
    format: RasterFormat,
    output: Option<PathBuf>,
    config: &CodecConfig,
) -> Result<()> {
    let data = fs::read(input).with_context(|| format!("cannot read {}", input.display()))?;
    info!(bytes = data.len(), "read input file");

    let mode = if adaptive {
        SizeMode::Adaptive
    } else {
        SizeMode::Auto
    };
    let bytes = encode_to_container(&data, mode, format, config)?;

    let out_path = output.unwrap_or_else(|| sibling_path(input, "_encoded", format.extension()));
    fs::write(&out_path, bytes)
        .with_context(|| format!("cannot write {}", out_path.display()))?;

    info!(output = %out_path.display(), "encoded image written");
    Ok(())
}

fn decode_command(
    input: &Path,
    force: bool,
    output: Option<PathBuf>,
    config: &CodecConfig,
) -> Result<()> {
    let bytes = fs::read(input).with_context(|| format!("cannot read {}", input.display()))?;

    if looks_like_jpeg(input, &bytes) {
        if !force {
            bail!(
                "{} is a JPEG; lossy recompression destroys encoded data. \
                 Pass --force to try anyway.",
                input.display()
            );
        }
        warn!("decoding a JPEG input; expect heavy damage");
    }

    let decoded = decode_container(&bytes, config)?;
    if !decoded.fec.clean {
        warn!(
            unresolved = decoded.fec.unresolved,
            "output may contain uncorrectable errors"
        );
    }

    let ext = detect_file_type(&decoded.data);
    let out_path = output.unwrap_or_else(|| sibling_path(input, "_decoded", ext));
    fs::write(&out_path, &decoded.data)
        .with_context(|| format!("cannot write {}", out_path.display()))?;

    info!(
        bytes = decoded.data.len(),
        kind = ext,
        output = %out_path.display(),
        "payload extracted"
    );
    Ok(())
}

fn correct_command(input: &Path, output: Option<PathBuf>, config: &CodecConfig) -> Result<()> {
    let bytes = fs::read(input).with_context(|| format!("cannot read {}", input.display()))?;

    if looks_like_jpeg(input, &bytes) {
        bail!("JPEG input is not supported for correction; use PNG or BMP");
    }

    let img = raster::decode(&bytes)?;
    let (corrected, stats) = correct_pixels(
        &img.pixels,
        img.width,
        img.height,
        img.channels as usize,
        config,
    );

    if stats.is_pristine() {
        info!("image is already anchor-pure; writing through unchanged");
    } else {
        let ratio_percent = f64::from(stats.corruption_ratio()) * 100.0;
        info!(
            adjusted = stats.adjusted_channels,
            ratio_percent,
            "re-anchored drifted channels"
        );
    }

    // Corrected output is always written as 32-bit BMP.
    let rgba = raster::expand_to_rgba(&corrected, img.channels);
    let out = raster::encode(&rgba, img.width, img.height, 4, RasterFormat::Bmp)?;
    let out_path = output.unwrap_or_else(|| sibling_path(input, "_corrected", "bmp"));
    fs::write(&out_path, out)
        .with_context(|| format!("cannot write {}", out_path.display()))?;

    info!(output = %out_path.display(), "corrected image written");
    Ok(())
}

/// `dir/name.ext` → `dir/name<suffix>.<new_ext>`.
fn sibling_path(input: &Path, suffix: &str, ext: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{stem}{suffix}.{ext}"))
}

/// JPEG sniff: extension plus SOI/APP0-APP1 magic, as a cheap guard
/// against feeding lossy containers into the codec.
fn looks_like_jpeg(path: &Path, bytes: &[u8]) -> bool {
    let ext_says_jpeg = path
        .extension()
        .map(|e| {
            let e = e.to_ascii_lowercase();
            e == "jpg" || e == "jpeg"
        })
        .unwrap_or(false);
    let magic_says_jpeg = bytes.len() >= 4
        && bytes[0] == 0xFF
        && bytes[1] == 0xD8
        && bytes[2] == 0xFF
        && (bytes[3] == 0xE0 || bytes[3] == 0xE1);
    ext_says_jpeg || magic_says_jpeg
}
