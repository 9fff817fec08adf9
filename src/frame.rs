// Copyright (c) 2026 the stealth-pnginfo contributors
// SPDX-License-Identifier: GPL-3.0-only

//! Payload frame construction and parsing.
//!
//! The frame is the self-describing container written into the pixel LSBs:
//!
//! ```text
//! [15 bytes] magic marker (ASCII, selects mode and compression variant)
//! [ 4 bytes] payload length in bits (big-endian u32)
//! [ N bytes] payload (raw or gzip-compressed UTF-8 JSON)
//! ```
//!
//! Four magics are defined, one per (mode, compression) pair; the marker
//! alone tells a reader which channels carry the frame and whether the
//! payload needs decompression, so no flag bytes exist. All four are a
//! stable wire contract: images written by any conforming tool carry
//! exactly these markers, and each channel stream only ever matches its
//! own mode's pair.
//!
//! A missing or unrecognized magic is not an error — it is the normal
//! "plain image" case and parses to `None`.

use crate::bits::BitReader;
use crate::channel::Mode;
use crate::error::StealthError;

/// Magic marker for an uncompressed payload in the alpha channel.
pub const MAGIC_ALPHA_RAW: &[u8; 15] = b"stealth_pnginfo";

/// Magic marker for a gzip-compressed payload in the alpha channel.
pub const MAGIC_ALPHA_COMPRESSED: &[u8; 15] = b"stealth_pngcomp";

/// Magic marker for an uncompressed payload in the RGB channels.
pub const MAGIC_RGB_RAW: &[u8; 15] = b"stealth_rgbinfo";

/// Magic marker for a gzip-compressed payload in the RGB channels.
pub const MAGIC_RGB_COMPRESSED: &[u8; 15] = b"stealth_rgbcomp";

/// Magic marker size in bits.
pub const MAGIC_BITS: usize = MAGIC_ALPHA_RAW.len() * 8; // 120

/// Length field size in bits.
pub const LENGTH_BITS: usize = 32;

/// Fixed frame overhead: magic + length field.
pub const FRAME_OVERHEAD_BITS: usize = MAGIC_BITS + LENGTH_BITS; // 152

/// The magic written for a given (mode, compression) pair.
pub fn magic_for(mode: Mode, compressed: bool) -> &'static [u8; 15] {
    match (mode, compressed) {
        (Mode::Alpha, false) => MAGIC_ALPHA_RAW,
        (Mode::Alpha, true) => MAGIC_ALPHA_COMPRESSED,
        (Mode::Rgb, false) => MAGIC_RGB_RAW,
        (Mode::Rgb, true) => MAGIC_RGB_COMPRESSED,
    }
}

/// A successfully parsed frame.
pub struct ParsedFrame {
    /// True when the payload was written under a compressed-variant magic.
    pub compressed: bool,
    /// The framed payload bytes, still compressed if `compressed` is set.
    pub payload: Vec<u8>,
}

/// Build a frame around `payload` for the given embedding mode.
///
/// The caller must have verified that `payload.len() * 8` fits in the u32
/// length field; the embed path does this as part of its capacity check.
pub fn build_frame(payload: &[u8], mode: Mode, compressed: bool) -> Vec<u8> {
    debug_assert!(payload.len() <= (u32::MAX as usize) / 8);

    let magic = magic_for(mode, compressed);
    let mut frame = Vec::with_capacity(magic.len() + 4 + payload.len());
    frame.extend_from_slice(magic);
    frame.extend_from_slice(&((payload.len() * 8) as u32).to_be_bytes());
    frame.extend_from_slice(payload);
    frame
}

/// Parse the leading bits of an LSB stream extracted under `mode`.
///
/// Only the two magics belonging to `mode` match — an alpha stream never
/// yields an RGB frame or vice versa, mirroring every other reader of the
/// format. `Ok(None)` means neither magic is present: the image simply
/// carries no payload in these channels. After a magic match the frame is
/// committed: a length field that is cut off, not a whole number of bytes,
/// or larger than the remaining stream is a
/// [`StealthError::TruncatedFrame`].
pub fn parse_frame(data: &[u8], mode: Mode) -> Result<Option<ParsedFrame>, StealthError> {
    let mut reader = BitReader::new(data);

    if reader.remaining() < MAGIC_BITS {
        return Ok(None);
    }
    let magic = reader.read_bytes(MAGIC_BITS / 8)?;
    let compressed = if magic == magic_for(mode, false) {
        false
    } else if magic == magic_for(mode, true) {
        true
    } else {
        return Ok(None);
    };

    let bit_count = reader.read_bits(LENGTH_BITS as u8)? as usize;
    if bit_count % 8 != 0 || bit_count > reader.remaining() {
        return Err(StealthError::TruncatedFrame);
    }
    let payload = reader.read_bytes(bit_count / 8)?;

    Ok(Some(ParsedFrame { compressed, payload }))
}
