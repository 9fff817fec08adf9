// Copyright (c) 2026 the stealth-pnginfo contributors
// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the stealth codec.
//!
//! [`StealthError`] covers every failure mode of embedding and extraction.
//! Absence of a payload is deliberately *not* an error: a plain image is a
//! normal input for `extract`, which reports it as `Ok(None)`.

use core::fmt;

/// Errors that can occur during stealth embedding or extraction.
#[derive(Debug)]
pub enum StealthError {
    /// The framed payload does not fit in the image's bit capacity for the
    /// requested embedding mode. Encode only.
    CapacityExceeded {
        /// Frame size in bits (magic + length field + payload).
        needed: usize,
        /// Available LSB slots for the requested mode.
        available: usize,
    },
    /// A magic marker was recognized but the frame behind it is unusable:
    /// the length field is cut off, declares more bits than the image holds,
    /// or is not a whole number of bytes. Decode only.
    TruncatedFrame,
    /// The compressed-variant magic was recognized but the payload is not a
    /// valid gzip stream. Decode only.
    Decompression,
    /// The extracted payload is not valid UTF-8. Decode only.
    InvalidUtf8,
}

impl fmt::Display for StealthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded { needed, available } => {
                write!(f, "payload needs {needed} bits but the image provides {available}")
            }
            Self::TruncatedFrame => write!(f, "embedded frame is truncated or its length field is corrupt"),
            Self::Decompression => write!(f, "embedded payload is not a valid gzip stream"),
            Self::InvalidUtf8 => write!(f, "embedded payload is not valid UTF-8"),
        }
    }
}

impl std::error::Error for StealthError {}
