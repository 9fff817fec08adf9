// Copyright (c) 2026 the stealth-pnginfo contributors
// SPDX-License-Identifier: GPL-3.0-only

//! Embedding modes and the logical-bit-to-channel mapping.
//!
//! A mode decides which channel LSBs of an RGBA pixel carry payload bits.
//! The mapping walks pixels in raster order (row-major, left-to-right,
//! top-to-bottom) and, in RGB mode, visits R, G, B within a pixel before
//! moving on. Encode and decode rely on this sequence being identical;
//! nothing in the frame records which mode was used.

/// Which channel LSBs carry the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One bit per pixel, in the alpha channel. The image must carry an
    /// alpha channel (callers add an opaque one first if absent).
    Alpha,
    /// Three bits per pixel, in the R, G and B channels, in that order.
    Rgb,
}

impl Mode {
    /// Payload bits carried by each pixel.
    pub fn bits_per_pixel(self) -> usize {
        match self {
            Self::Alpha => 1,
            Self::Rgb => 3,
        }
    }

    /// Total LSB slots an image of the given dimensions offers.
    pub fn capacity_bits(self, width: u32, height: u32) -> usize {
        width as usize * height as usize * self.bits_per_pixel()
    }
}

/// Deterministic, exhaustible sequence of `(x, y, channel)` LSB targets.
///
/// `channel` indexes into an RGBA pixel: 0–2 for R/G/B, 3 for alpha.
pub struct ChannelTargets {
    width: u32,
    height: u32,
    mode: Mode,
    index: usize,
}

/// Iterate the LSB targets for an image of the given dimensions.
pub fn targets(width: u32, height: u32, mode: Mode) -> ChannelTargets {
    ChannelTargets {
        width,
        height,
        mode,
        index: 0,
    }
}

impl Iterator for ChannelTargets {
    type Item = (u32, u32, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.mode.capacity_bits(self.width, self.height) {
            return None;
        }
        let bpp = self.mode.bits_per_pixel();
        let pixel = (self.index / bpp) as u32;
        let channel = match self.mode {
            Mode::Alpha => 3,
            Mode::Rgb => self.index % bpp,
        };
        self.index += 1;
        Some((pixel % self.width, pixel / self.width, channel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity() {
        assert_eq!(Mode::Alpha.capacity_bits(64, 64), 4096);
        assert_eq!(Mode::Rgb.capacity_bits(64, 64), 12288);
        assert_eq!(Mode::Alpha.capacity_bits(8, 8), 64);
        assert_eq!(Mode::Alpha.capacity_bits(0, 10), 0);
    }

    #[test]
    fn alpha_raster_order() {
        let seq: Vec<_> = targets(2, 2, Mode::Alpha).collect();
        assert_eq!(seq, vec![(0, 0, 3), (1, 0, 3), (0, 1, 3), (1, 1, 3)]);
    }

    #[test]
    fn rgb_channel_order_within_pixel() {
        let seq: Vec<_> = targets(2, 1, Mode::Rgb).collect();
        assert_eq!(
            seq,
            vec![(0, 0, 0), (0, 0, 1), (0, 0, 2), (1, 0, 0), (1, 0, 1), (1, 0, 2)]
        );
    }

    #[test]
    fn exhausts_at_capacity() {
        assert_eq!(targets(3, 5, Mode::Alpha).count(), 15);
        assert_eq!(targets(3, 5, Mode::Rgb).count(), 45);
        assert_eq!(targets(0, 5, Mode::Rgb).count(), 0);
    }

    #[test]
    fn rgb_advances_rows() {
        let seq: Vec<_> = targets(2, 2, Mode::Rgb).collect();
        assert_eq!(seq[6], (0, 1, 0));
        assert_eq!(seq[11], (1, 1, 2));
    }
}
