// Copyright (c) 2026 the stealth-pnginfo contributors
// SPDX-License-Identifier: GPL-3.0-only

//! Embed/extract pipelines.
//!
//! Embedding: serialize the metadata map to JSON, optionally gzip it, wrap
//! it in a frame, then write the frame bits into successive channel-mapper
//! targets. Only the LSB of each targeted channel changes; every other bit
//! of the image is left alone.
//!
//! Extraction: collect the LSB stream for a candidate mode, look for that
//! mode's frame, undo compression, and return the embedded string. Each
//! mode has its own magic pair (`stealth_png*` in alpha, `stealth_rgb*` in
//! RGB), so a stream can only ever match the magics of the channels it was
//! read from; alpha is tried before RGB. Once a magic matches, any
//! inconsistency behind it is an error rather than a reason to try the
//! next mode: a matched magic means the frame is ours.

use crate::bits::{BitReader, BitWriter};
use crate::channel::{self, Mode};
use crate::compress;
use crate::error::StealthError;
use crate::frame;
use crate::metadata::{self, Metadata};
use image::RgbaImage;

/// Decode trial order. Shared convention; see the module docs.
const TRIAL_MODES: [Mode; 2] = [Mode::Alpha, Mode::Rgb];

/// Embed `metadata` into `image` under the given mode.
///
/// The image is mutated in place: the LSBs of the mode-selected channels in
/// raster order, nothing else. The magic written identifies both the mode
/// and, with `compressed`, the gzip variant, so readers need no extra flag.
///
/// # Errors
/// [`StealthError::CapacityExceeded`] when the framed payload has more bits
/// than the image offers under `mode`.
pub fn embed(
    image: &mut RgbaImage,
    metadata: &Metadata,
    mode: Mode,
    compressed: bool,
) -> Result<(), StealthError> {
    let json = metadata::to_json_string(metadata);
    let payload = if compressed {
        compress::compress(json.as_bytes())
    } else {
        json.into_bytes()
    };

    let (width, height) = image.dimensions();
    let available = mode.capacity_bits(width, height);
    let needed = frame::FRAME_OVERHEAD_BITS + payload.len() * 8;
    // The second clause also enforces the u32 limit of the length field:
    // no real image offers 2^32 LSB slots.
    if payload.len() > (u32::MAX as usize) / 8 || needed > available {
        return Err(StealthError::CapacityExceeded { needed, available });
    }

    let frame = frame::build_frame(&payload, mode, compressed);
    let mut reader = BitReader::new(&frame);
    for (x, y, ch) in channel::targets(width, height, mode).take(needed) {
        let bit = reader.read_bit()?;
        let pixel = image.get_pixel_mut(x, y);
        pixel.0[ch] = (pixel.0[ch] & 0xFE) | bit;
    }
    Ok(())
}

/// Recover the embedded metadata string from `image`, if any.
///
/// Returns `Ok(None)` for images that carry no recognizable frame — the
/// expected common case, never an error.
///
/// # Errors
/// - [`StealthError::TruncatedFrame`] when a magic matches but the frame
///   behind it cannot be satisfied.
/// - [`StealthError::Decompression`] when the compressed variant fails to
///   gunzip.
/// - [`StealthError::InvalidUtf8`] when the payload is not UTF-8.
pub fn extract(image: &RgbaImage) -> Result<Option<String>, StealthError> {
    for mode in TRIAL_MODES {
        let stream = collect_lsbs(image, mode);
        let Some(parsed) = frame::parse_frame(&stream, mode)? else {
            continue;
        };
        let bytes = if parsed.compressed {
            compress::decompress(&parsed.payload)?
        } else {
            parsed.payload
        };
        let text = String::from_utf8(bytes).map_err(|_| StealthError::InvalidUtf8)?;
        return Ok(Some(text));
    }
    Ok(None)
}

/// Pack the LSB stream for one mode into bytes, MSB-first.
fn collect_lsbs(image: &RgbaImage, mode: Mode) -> Vec<u8> {
    let (width, height) = image.dimensions();
    let mut writer = BitWriter::new();
    for (x, y, ch) in channel::targets(width, height, mode) {
        writer.write_bit(image.get_pixel(x, y).0[ch] & 1);
    }
    writer.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn cat_metadata() -> Metadata {
        let mut meta = Metadata::new();
        meta.insert("prompt".into(), Value::String("\"a cat\"".into()));
        meta
    }

    fn opaque_image(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, image::Rgba([120, 33, 7, 255]))
    }

    #[test]
    fn roundtrip_alpha_raw() {
        let mut img = opaque_image(64, 64);
        embed(&mut img, &cat_metadata(), Mode::Alpha, false).unwrap();
        let text = extract(&img).unwrap().unwrap();
        assert_eq!(text, r#"{"prompt": "\"a cat\""}"#);
    }

    #[test]
    fn roundtrip_rgb_compressed() {
        let mut img = opaque_image(64, 64);
        embed(&mut img, &cat_metadata(), Mode::Rgb, true).unwrap();
        let text = extract(&img).unwrap().unwrap();
        assert_eq!(text, r#"{"prompt": "\"a cat\""}"#);
    }

    #[test]
    fn capacity_error_carries_counts() {
        let mut img = opaque_image(8, 8);
        match embed(&mut img, &cat_metadata(), Mode::Alpha, false) {
            Err(StealthError::CapacityExceeded { needed, available }) => {
                assert_eq!(available, 64);
                assert!(needed > available);
            }
            other => panic!("expected CapacityExceeded, got {other:?}"),
        }
    }

    #[test]
    fn plain_image_extracts_none() {
        let img = opaque_image(32, 32);
        assert!(extract(&img).unwrap().is_none());
    }

    #[test]
    fn only_target_lsbs_change() {
        let original = opaque_image(64, 64);
        let mut stego = original.clone();
        embed(&mut stego, &cat_metadata(), Mode::Alpha, false).unwrap();
        for (before, after) in original.pixels().zip(stego.pixels()) {
            assert_eq!(before.0[0], after.0[0]);
            assert_eq!(before.0[1], after.0[1]);
            assert_eq!(before.0[2], after.0[2]);
            assert_eq!(before.0[3] & 0xFE, after.0[3] & 0xFE);
        }
    }

    #[test]
    fn rgb_mode_leaves_alpha_alone() {
        let original = opaque_image(64, 64);
        let mut stego = original.clone();
        embed(&mut stego, &cat_metadata(), Mode::Rgb, false).unwrap();
        for (before, after) in original.pixels().zip(stego.pixels()) {
            assert_eq!(before.0[3], after.0[3]);
            assert_eq!(before.0[0] & 0xFE, after.0[0] & 0xFE);
            assert_eq!(before.0[1] & 0xFE, after.0[1] & 0xFE);
            assert_eq!(before.0[2] & 0xFE, after.0[2] & 0xFE);
        }
    }

    #[test]
    fn each_mode_writes_its_own_magic() {
        // The first 15 bytes of the carrying channels' LSB stream are the
        // mode's magic; other readers of the format key on exactly this.
        let mut img = opaque_image(64, 64);
        embed(&mut img, &cat_metadata(), Mode::Rgb, false).unwrap();
        let stream = collect_lsbs(&img, Mode::Rgb);
        assert_eq!(&stream[..15], frame::MAGIC_RGB_RAW);

        let mut img = opaque_image(64, 64);
        embed(&mut img, &cat_metadata(), Mode::Alpha, true).unwrap();
        let stream = collect_lsbs(&img, Mode::Alpha);
        assert_eq!(&stream[..15], frame::MAGIC_ALPHA_COMPRESSED);
    }

    #[test]
    fn matched_magic_with_bad_length_is_an_error() {
        // Hand-write a magic plus an absurd length into the alpha LSBs.
        let mut img = opaque_image(16, 16);
        let mut bad = frame::MAGIC_ALPHA_RAW.to_vec();
        bad.extend_from_slice(&u32::MAX.to_be_bytes());
        let mut reader = BitReader::new(&bad);
        for (x, y, ch) in channel::targets(16, 16, Mode::Alpha).take(bad.len() * 8) {
            let bit = reader.read_bit().unwrap();
            let pixel = img.get_pixel_mut(x, y);
            pixel.0[ch] = (pixel.0[ch] & 0xFE) | bit;
        }
        assert!(matches!(extract(&img), Err(StealthError::TruncatedFrame)));
    }
}
