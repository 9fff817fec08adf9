// Copyright (c) 2026 the stealth-pnginfo contributors
// SPDX-License-Identifier: GPL-3.0-only

//! Bit-level I/O over byte buffers.
//!
//! Provides [`BitWriter`] for packing single bits into bytes and
//! [`BitReader`] for pulling them back out. Both operate MSB-first within
//! each byte; this ordering is part of the wire contract and must match
//! between the pixel side and the frame side.

use crate::error::StealthError;

/// Packs bits into a byte buffer, MSB-first.
pub struct BitWriter {
    output: Vec<u8>,
    buf: u8,
    bits_used: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self {
            output: Vec::new(),
            buf: 0,
            bits_used: 0,
        }
    }

    /// Append a single bit (`bit` must be 0 or 1).
    pub fn write_bit(&mut self, bit: u8) {
        debug_assert!(bit <= 1);
        self.buf = (self.buf << 1) | bit;
        self.bits_used += 1;
        if self.bits_used == 8 {
            self.output.push(self.buf);
            self.buf = 0;
            self.bits_used = 0;
        }
    }

    /// Append `count` bits (1–32) from the low bits of `value`, MSB-first.
    pub fn write_bits(&mut self, value: u32, count: u8) {
        debug_assert!(count >= 1 && count <= 32);
        for i in (0..count).rev() {
            self.write_bit(((value >> i) & 1) as u8);
        }
    }

    /// Total number of bits written so far.
    pub fn bit_len(&self) -> usize {
        self.output.len() * 8 + self.bits_used as usize
    }

    /// Flush, padding a partial final byte with zero bits.
    pub fn into_bytes(mut self) -> Vec<u8> {
        if self.bits_used > 0 {
            self.buf <<= 8 - self.bits_used;
            self.output.push(self.buf);
        }
        self.output
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads bits out of a byte slice, MSB-first.
///
/// Reads past the end fail with [`StealthError::TruncatedFrame`] — the
/// reader never fabricates bits.
pub struct BitReader<'a> {
    data: &'a [u8],
    bit_pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, bit_pos: 0 }
    }

    /// Number of unread bits.
    pub fn remaining(&self) -> usize {
        self.data.len() * 8 - self.bit_pos
    }

    /// Read a single bit.
    pub fn read_bit(&mut self) -> Result<u8, StealthError> {
        if self.bit_pos >= self.data.len() * 8 {
            return Err(StealthError::TruncatedFrame);
        }
        let byte = self.data[self.bit_pos / 8];
        let bit = (byte >> (7 - self.bit_pos % 8)) & 1;
        self.bit_pos += 1;
        Ok(bit)
    }

    /// Read `count` bits (1–32), returned right-aligned.
    pub fn read_bits(&mut self, count: u8) -> Result<u32, StealthError> {
        debug_assert!(count >= 1 && count <= 32);
        if (count as usize) > self.remaining() {
            return Err(StealthError::TruncatedFrame);
        }
        let mut value = 0u32;
        for _ in 0..count {
            value = (value << 1) | self.read_bit()? as u32;
        }
        Ok(value)
    }

    /// Read `count` whole bytes.
    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>, StealthError> {
        if self.bit_pos % 8 == 0 {
            // Byte-aligned fast path.
            let start = self.bit_pos / 8;
            let end = start.checked_add(count).ok_or(StealthError::TruncatedFrame)?;
            if end > self.data.len() {
                return Err(StealthError::TruncatedFrame);
            }
            self.bit_pos += count * 8;
            return Ok(self.data[start..end].to_vec());
        }
        (0..count).map(|_| self.read_bits(8).map(|b| b as u8)).collect()
    }
}
