// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Error types for the steganography pipeline.
//!
//! [`StegoError`] covers all failure modes from carrier validation through
//! encryption, embedding, extraction and decryption. Every failure is terminal
//! for the call that produced it.

use thiserror::Error;

/// Errors that can occur during steganographic encoding or decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StegoError {
    /// The carrier is not a usable RGBA pixel buffer (wrong length, undecodable
    /// container, zero-sized image).
    #[error("invalid carrier: {0}")]
    InvalidCarrier(String),

    /// The message does not fit into the carrier's usable bits.
    #[error(
        "message too large for this image: need {} bytes, have {} bytes",
        .required_bits.div_ceil(8),
        .available_bits / 8
    )]
    CapacityExceeded {
        /// Bits the message needs (excluding the length prefix).
        required_bits: u64,
        /// Bits the carrier offers after the length prefix.
        available_bits: u64,
    },

    /// The caller-supplied password is shorter than the minimum length.
    #[error("password must be at least {min} characters (got {actual})")]
    PasswordTooWeak {
        /// Minimum accepted length in characters.
        min: usize,
        /// Length of the rejected password in characters.
        actual: usize,
    },

    /// The carrier holds no length prefix (zero, or too few pixels to hold one).
    #[error("no encoded data found in this image")]
    NoEmbeddedData,

    /// The length prefix promises more bits than the carrier has pixels for.
    #[error("carrier truncated: prefix declares {declared_bits} bits, only {available_bits} available")]
    TruncatedCarrier {
        /// Bit count read from the length prefix.
        declared_bits: u64,
        /// Pixels available after the prefix.
        available_bits: u64,
    },

    /// The extracted bits do not form whole bytes of valid UTF-8.
    #[error("extracted data is not valid UTF-8 text")]
    InvalidEncoding,

    /// The extracted message has no `|` delimiter.
    #[error("no valid encoded data found (missing delimiter)")]
    MalformedMessage,

    /// The embedded identifier differs from the one supplied for decoding.
    #[error("provided image ID does not match embedded ID")]
    IdentifierMismatch,

    /// Wrong password, corrupted envelope, or malformed envelope bytes.
    #[error("decryption failed (wrong password or corrupted data)")]
    DecryptionFailed,

    /// AES-GCM refused to encrypt the plaintext.
    #[error("encryption failed")]
    EncryptionFailed,

    /// The secret payload cannot be serialized into the wire format.
    #[error("invalid secret payload: {0}")]
    InvalidPayload(&'static str),

    /// The secure random source could not produce bytes.
    #[error("secure random source unavailable")]
    RandomUnavailable,
}

/// Convenience alias used throughout the `stego` module.
pub type Result<T> = core::result::Result<T, StegoError>;
