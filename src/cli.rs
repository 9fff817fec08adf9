// Copyright (c) 2026 the stealth-pnginfo contributors
// SPDX-License-Identifier: GPL-3.0-only

//! Command-line interface definition.
//!
//! Two subcommands mirror the two codec operations: `embed` hides a JSON
//! metadata object in an image's pixel LSBs, `extract` recovers it.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Hide generation metadata in the pixel LSBs of lossless images.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Parser, Debug)]
pub enum Commands {
    /// Embed a JSON metadata object into an image.
    Embed(EmbedArgs),

    /// Extract previously embedded metadata from an image.
    Extract(ExtractArgs),
}

/// Which channel LSBs carry the payload.
#[derive(ValueEnum, Copy, Clone, Debug)]
pub enum EmbedMode {
    /// One bit per pixel in the alpha channel.
    Alpha,
    /// Three bits per pixel in the R, G and B channels.
    Rgb,
}

#[derive(Parser, Debug)]
pub struct EmbedArgs {
    /// Cover image (PNG, BMP, ...). Converted to RGBA before embedding.
    #[arg(short, long)]
    pub image: PathBuf,

    /// File holding the metadata as a single JSON object.
    #[arg(short, long)]
    pub metadata: PathBuf,

    /// Output path for the stego image. Use a lossless format.
    #[arg(short, long)]
    pub dest: PathBuf,

    /// Channels that carry the payload bits.
    #[arg(long, value_enum, default_value = "alpha")]
    pub mode: EmbedMode,

    /// Embed the metadata without gzip compression.
    #[arg(long)]
    pub no_compress: bool,
}

#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// Image to read the hidden metadata from.
    #[arg(short, long)]
    pub image: PathBuf,

    /// Write the recovered JSON here instead of printing it.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
