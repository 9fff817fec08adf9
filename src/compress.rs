// Copyright (c) 2026 the stealth-pnginfo contributors
// SPDX-License-Identifier: GPL-3.0-only

//! Optional gzip compression stage for the payload.
//!
//! The wire format uses gzip (RFC 1952) so that payloads interoperate with
//! the other writers and readers of this scheme. Which stage to apply on
//! extraction is decided by the frame magic alone.

use crate::error::StealthError;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// Decompressed size cap. Guards against decompression bombs: a hostile
/// image could otherwise declare a tiny payload that inflates without bound.
const MAX_DECOMPRESSED_BYTES: usize = 16 * 1024 * 1024;

/// Compress `data` as a gzip stream.
pub fn compress(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).expect("gzip write into a Vec cannot fail");
    encoder.finish().expect("gzip finish into a Vec cannot fail")
}

/// Decompress a gzip stream extracted from a frame.
///
/// Returns [`StealthError::Decompression`] for anything that is not a
/// complete, well-formed gzip stream within the size cap.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, StealthError> {
    let mut output = Vec::new();
    let decoder = GzDecoder::new(data);
    decoder
        .take(MAX_DECOMPRESSED_BYTES as u64 + 1)
        .read_to_end(&mut output)
        .map_err(|_| StealthError::Decompression)?;
    if output.len() > MAX_DECOMPRESSED_BYTES {
        return Err(StealthError::Decompression);
    }
    Ok(output)
}
