// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Capacity estimation.
//!
//! Reports how many message bytes a carrier can hold and how large the
//! embedded message for a given secret will be, so a caller can warn before
//! committing to an encode. Nothing here mutates the carrier.

use crate::pixels::PixelBuffer;
use crate::stego::crypto;
use crate::stego::error::StegoError;
use crate::stego::lsb;
use crate::stego::message;
use crate::stego::payload::SecretPayload;
use crate::stego::random::SecureRandom;

/// Throwaway password used only to measure encrypted size.
///
/// AES-GCM output length does not depend on the key, so any password gives
/// the same size as the real one.
const ESTIMATE_PASSWORD: &str = "estimate-pass-12345";

/// Space a carrier offers for the embedded message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    /// Pixels after the 32-pixel length prefix (one bit each).
    pub usable_bits: usize,
    /// `usable_bits / 8`.
    pub usable_bytes: usize,
}

/// Available versus projected space for one carrier/secret pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityReport {
    pub usable_bits: usize,
    pub usable_bytes: usize,
    /// Byte length of the `identifier|envelope` message that would be embedded.
    pub projected_encrypted_bytes: usize,
    /// `projected_encrypted_bytes > usable_bytes`.
    pub over_capacity: bool,
}

/// Usable capacity of a carrier.
pub fn capacity(carrier: &PixelBuffer) -> Capacity {
    let usable_bits = lsb::usable_bits(carrier);
    Capacity { usable_bits, usable_bytes: usable_bits / 8 }
}

/// Projected byte length of the embedded message for a serialized secret.
///
/// Runs the real encryption path (fresh identifier, throwaway password) and
/// measures the composed message.
pub fn estimate<R: SecureRandom + ?Sized>(serialized: &str, rng: &mut R) -> Result<usize, StegoError> {
    let identifier = message::generate_identifier(rng)?;
    let envelope = crypto::encrypt(serialized.as_bytes(), ESTIMATE_PASSWORD, rng)?;
    Ok(message::compose(&identifier, &envelope).len())
}

/// Compare a carrier's capacity with the projected size of `payload`.
pub fn report<R: SecureRandom + ?Sized>(
    carrier: &PixelBuffer,
    payload: &SecretPayload,
    rng: &mut R,
) -> Result<CapacityReport, StegoError> {
    let Capacity { usable_bits, usable_bytes } = capacity(carrier);
    let projected = estimate(&payload.serialize()?, rng)?;
    Ok(CapacityReport {
        usable_bits,
        usable_bytes,
        projected_encrypted_bytes: projected,
        over_capacity: projected > usable_bytes,
    })
}
