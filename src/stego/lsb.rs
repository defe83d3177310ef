// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! LSB embedding and extraction.
//!
//! One bit is stored per pixel, in the least-significant bit of the red
//! channel, in pixel order:
//!
//! ```text
//! pixels 0..32           message length in bits (u32, MSB first)
//! pixels 32..32+len      message bits (MSB first within each byte)
//! ```
//!
//! No other channel and no pixel beyond `32 + len` is modified.

use tracing::trace;

use crate::pixels::PixelBuffer;
use crate::stego::error::StegoError;

/// Pixels reserved for the length prefix.
pub const LENGTH_PREFIX_BITS: usize = 32;

/// Channel whose LSB carries the data (0 = red).
pub const EMBED_CHANNEL: usize = 0;

/// Restartable MSB-first bit expansion of a byte slice.
#[derive(Debug, Clone)]
pub struct BitStream<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> BitStream<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }
}

impl Iterator for BitStream<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let byte = *self.bytes.get(self.pos / 8)?;
        let bit = (byte >> (7 - self.pos % 8)) & 1;
        self.pos += 1;
        Some(bit)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.bytes.len() * 8 - self.pos;
        (left, Some(left))
    }
}

impl ExactSizeIterator for BitStream<'_> {}

/// Convert bytes to a bit vector (MSB first within each byte).
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    BitStream::new(bytes).collect()
}

/// Convert a bit vector (MSB first) back to bytes.
/// Pads the last byte with zero bits if `bits.len()` is not a multiple of 8.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(bits.len().div_ceil(8));
    for chunk in bits.chunks(8) {
        let mut byte = 0u8;
        for (i, &bit) in chunk.iter().enumerate() {
            byte |= (bit & 1) << (7 - i);
        }
        bytes.push(byte);
    }
    bytes
}

/// Number of message bits the carrier can hold after the length prefix.
///
/// Clamped to `u32::MAX`, the largest value the prefix can express.
pub fn usable_bits(carrier: &PixelBuffer) -> usize {
    carrier
        .pixel_count()
        .saturating_sub(LENGTH_PREFIX_BITS)
        .min(u32::MAX as usize)
}

#[inline]
fn set_lsb(carrier: &mut PixelBuffer, index: usize, bit: u8) {
    let c = carrier.channel_mut(index, EMBED_CHANNEL);
    *c = (*c & 0xFE) | (bit & 1);
}

#[inline]
fn get_lsb(carrier: &PixelBuffer, index: usize) -> u8 {
    carrier.channel(index, EMBED_CHANNEL) & 1
}

/// Write the length prefix followed by `bits` into the carrier.
///
/// The caller has already checked `bits.len()` against [`usable_bits`].
fn write_prefixed<I>(carrier: &mut PixelBuffer, bits: I)
where
    I: ExactSizeIterator<Item = u8>,
{
    // Fits in u32: usable_bits is clamped to u32::MAX.
    let prefix = (bits.len() as u32).to_be_bytes();
    for (i, bit) in BitStream::new(&prefix).enumerate() {
        set_lsb(carrier, i, bit);
    }
    for (i, bit) in bits.enumerate() {
        set_lsb(carrier, LENGTH_PREFIX_BITS + i, bit);
    }
}

fn check_capacity(carrier: &PixelBuffer, required_bits: u64) -> Result<(), StegoError> {
    let available = usable_bits(carrier) as u64;
    if required_bits > available {
        return Err(StegoError::CapacityExceeded { required_bits, available_bits: available });
    }
    Ok(())
}

/// Embed an arbitrary bit sequence (one `0`/`1` per element) with its length
/// prefix.
///
/// # Errors
/// [`StegoError::CapacityExceeded`] if `bits.len()` exceeds
/// [`usable_bits`] for this carrier.
pub fn embed_bits(carrier: &mut PixelBuffer, bits: &[u8]) -> Result<(), StegoError> {
    check_capacity(carrier, bits.len() as u64)?;
    write_prefixed(carrier, bits.iter().copied());
    trace!(bits = bits.len(), "embedded bit sequence");
    Ok(())
}

/// Embed a message byte string into the carrier.
///
/// Bits are streamed straight from `message`; no per-bit buffer is built.
pub fn embed(carrier: &mut PixelBuffer, message: &[u8]) -> Result<(), StegoError> {
    check_capacity(carrier, message.len() as u64 * 8)?;
    write_prefixed(carrier, BitStream::new(message));
    trace!(bytes = message.len(), "embedded message");
    Ok(())
}

/// Validate the length prefix and return the number of bits it declares.
fn declared_bits(carrier: &PixelBuffer) -> Result<usize, StegoError> {
    let pixels = carrier.pixel_count();
    if pixels <= LENGTH_PREFIX_BITS {
        return Err(StegoError::NoEmbeddedData);
    }

    let declared = (0..LENGTH_PREFIX_BITS)
        .fold(0u32, |acc, i| (acc << 1) | get_lsb(carrier, i) as u32) as usize;
    if declared == 0 {
        return Err(StegoError::NoEmbeddedData);
    }

    let available = pixels - LENGTH_PREFIX_BITS;
    if declared > available {
        return Err(StegoError::TruncatedCarrier {
            declared_bits: declared as u64,
            available_bits: available as u64,
        });
    }
    Ok(declared)
}

/// Read the length prefix and the bits it declares.
///
/// # Errors
/// - [`StegoError::NoEmbeddedData`] if the carrier has fewer than 33 pixels or
///   the prefix is zero.
/// - [`StegoError::TruncatedCarrier`] if the prefix declares more bits than
///   the carrier holds.
pub fn extract_bits(carrier: &PixelBuffer) -> Result<Vec<u8>, StegoError> {
    let declared = declared_bits(carrier)?;
    trace!(bits = declared, "extracting bit sequence");
    Ok((LENGTH_PREFIX_BITS..LENGTH_PREFIX_BITS + declared)
        .map(|i| get_lsb(carrier, i))
        .collect())
}

/// Extract the embedded message bytes, packing bits as they are read.
///
/// # Errors
/// As [`extract_bits`], plus [`StegoError::InvalidEncoding`] if the bit count
/// is not a multiple of 8.
pub fn extract(carrier: &PixelBuffer) -> Result<Vec<u8>, StegoError> {
    let declared = declared_bits(carrier)?;
    if declared % 8 != 0 {
        return Err(StegoError::InvalidEncoding);
    }

    trace!(bytes = declared / 8, "extracting message");
    let start = LENGTH_PREFIX_BITS;
    Ok((0..declared / 8)
        .map(|byte| {
            let first = start + byte * 8;
            (first..first + 8).fold(0u8, |acc, i| (acc << 1) | get_lsb(carrier, i))
        })
        .collect())
}

/// Extract the embedded message as UTF-8 text.
pub fn extract_message(carrier: &PixelBuffer) -> Result<String, StegoError> {
    String::from_utf8(extract(carrier)?).map_err(|_| StegoError::InvalidEncoding)
}
