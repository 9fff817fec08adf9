// Copyright (c) 2026 the stealth-pnginfo contributors
// SPDX-License-Identifier: GPL-3.0-only

//! # stealth-pnginfo
//!
//! Steganographic codec that hides a UTF-8 JSON metadata object in the
//! least-significant bits of an image's pixel channels, and recovers it
//! losslessly. Two embedding modes exist:
//!
//! - **Alpha**: one bit per pixel, in the alpha channel LSB. Invisible and
//!   the default, but the alpha channel must survive (PNG, not JPEG).
//! - **Rgb**: three bits per pixel, in the R/G/B channel LSBs. Works on
//!   images without alpha; each channel changes by at most 1.
//!
//! The payload is wrapped in a self-describing frame (ASCII magic marker,
//! big-endian bit count, payload bits) and optionally gzip-compressed; the
//! magic alone tells a reader which channels carry the frame and whether
//! to gunzip (`stealth_pnginfo`/`stealth_pngcomp` in alpha,
//! `stealth_rgbinfo`/`stealth_rgbcomp` in RGB). Pixels are walked in
//! raster order. The codec neither encrypts nor authenticates anything and
//! does not survive lossy recoding.
//!
//! # Quick start
//!
//! ```rust
//! use stealth_pnginfo::{embed, extract, Metadata, Mode};
//!
//! let mut img = image::RgbaImage::from_pixel(64, 64, image::Rgba([0, 0, 0, 255]));
//! let mut meta = Metadata::new();
//! meta.insert("prompt".into(), serde_json::Value::String("\"a cat\"".into()));
//!
//! embed(&mut img, &meta, Mode::Alpha, false).unwrap();
//! let text = extract(&img).unwrap().unwrap();
//! assert_eq!(text, r#"{"prompt": "\"a cat\""}"#);
//! ```

pub mod bits;
pub mod channel;
pub mod cli;
pub mod compress;
pub mod error;
pub mod frame;
pub mod handler;
pub mod metadata;
pub mod pipeline;

pub use channel::Mode;
pub use error::StealthError;
pub use metadata::{to_json_string, Metadata};
pub use pipeline::{embed, extract};
