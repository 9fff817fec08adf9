// Copyright (c) 2026 the stealth-pnginfo contributors
// SPDX-License-Identifier: GPL-3.0-only

//! Subcommand handlers.
//!
//! Coordinate file I/O around the codec: load images, parse the metadata
//! JSON, call [`embed`]/[`extract`] and report the outcome to the user.

use crate::cli::{EmbedArgs, EmbedMode, ExtractArgs};
use crate::channel::Mode;
use crate::metadata::Metadata;
use crate::pipeline::{embed, extract};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;

impl From<EmbedMode> for Mode {
    fn from(mode: EmbedMode) -> Self {
        match mode {
            EmbedMode::Alpha => Mode::Alpha,
            EmbedMode::Rgb => Mode::Rgb,
        }
    }
}

/// Handle the `embed` subcommand.
pub fn handle_embed(args: EmbedArgs) -> Result<()> {
    let meta_text = fs::read_to_string(&args.metadata).with_context(|| {
        format!(
            "Unable to read metadata file: {}",
            args.metadata.to_string_lossy().red().bold()
        )
    })?;
    let metadata: Metadata = serde_json::from_str(&meta_text).with_context(|| {
        format!(
            "Metadata file is not a single JSON object: {}",
            args.metadata.to_string_lossy().red().bold()
        )
    })?;

    // to_rgba8 adds an opaque alpha channel when the source has none,
    // which is what alpha mode requires.
    let mut img = image::open(&args.image)
        .with_context(|| {
            format!(
                "Unable to open image file: {}",
                args.image.to_string_lossy().red().bold()
            )
        })?
        .to_rgba8();

    embed(&mut img, &metadata, args.mode.into(), !args.no_compress)
        .context("The metadata does not fit in this image")?;

    img.save(&args.dest).with_context(|| {
        format!(
            "Unable to write stego image: {}",
            args.dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "Metadata embedded and saved: {}",
        args.dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// Handle the `extract` subcommand.
///
/// An image without hidden metadata is not a failure; it prints a notice
/// and exits cleanly.
pub fn handle_extract(args: ExtractArgs) -> Result<()> {
    let img = image::open(&args.image)
        .with_context(|| {
            format!(
                "Unable to open image file: {}",
                args.image.to_string_lossy().red().bold()
            )
        })?
        .to_rgba8();

    let Some(text) = extract(&img).with_context(|| {
        format!(
            "Image carries a damaged stealth frame: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?
    else {
        println!("{}", "No stealth metadata found in this image.".yellow());
        return Ok(());
    };

    match args.output {
        Some(path) => {
            fs::write(&path, &text).with_context(|| {
                format!(
                    "Unable to write metadata file: {}",
                    path.to_string_lossy().red().bold()
                )
            })?;
            println!(
                "Metadata recovered and saved: {}",
                path.to_string_lossy().green().bold()
            );
        }
        None => println!("{text}"),
    }
    Ok(())
}
