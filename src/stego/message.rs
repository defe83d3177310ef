// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Embedded message composition and parsing.
//!
//! The message is the exact UTF-8 string written into the carrier:
//!
//! ```text
//! <identifier>|<base64 envelope>
//! ```
//!
//! The identifier is a non-secret tag. It is checked against the caller's
//! value before any key derivation so a wrong image fails fast.

use tracing::debug;

use crate::stego::error::StegoError;
use crate::stego::random::{self, SecureRandom};

/// Separator between identifier and envelope.
pub const DELIMITER: char = '|';

/// Prefix of generated identifiers.
pub const IDENTIFIER_PREFIX: &str = "IMG-";

/// Length of the random suffix of generated identifiers.
const IDENTIFIER_SUFFIX_LEN: usize = 9;

const IDENTIFIER_CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generate a fresh identifier: `IMG-<unix millis>-<9 random [0-9A-Z]>`.
pub fn generate_identifier<R: SecureRandom + ?Sized>(rng: &mut R) -> Result<String, StegoError> {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix = random::random_string(rng, IDENTIFIER_CHARSET, IDENTIFIER_SUFFIX_LEN)?;
    Ok(format!("{IDENTIFIER_PREFIX}{millis}-{suffix}"))
}

/// Reject identifiers that cannot round-trip through [`parse`].
///
/// # Errors
/// [`StegoError::InvalidPayload`] if the identifier is empty, contains `|`,
/// or has surrounding whitespace (which [`verify_identifier`] would trim).
pub fn validate_identifier(identifier: &str) -> Result<(), StegoError> {
    if identifier.is_empty() {
        return Err(StegoError::InvalidPayload("identifier is empty"));
    }
    if identifier.contains(DELIMITER) {
        return Err(StegoError::InvalidPayload("identifier contains '|'"));
    }
    if identifier.trim() != identifier {
        return Err(StegoError::InvalidPayload("identifier has surrounding whitespace"));
    }
    Ok(())
}

/// Join identifier and envelope into the embedded message.
pub fn compose(identifier: &str, envelope: &str) -> String {
    let mut msg = String::with_capacity(identifier.len() + 1 + envelope.len());
    msg.push_str(identifier);
    msg.push(DELIMITER);
    msg.push_str(envelope);
    msg
}

/// Split an extracted message at the first `|` into `(identifier, envelope)`.
///
/// # Errors
/// [`StegoError::MalformedMessage`] if there is no delimiter.
pub fn parse(message: &str) -> Result<(&str, &str), StegoError> {
    message.split_once(DELIMITER).ok_or(StegoError::MalformedMessage)
}

/// Check the embedded identifier against the one supplied for decoding.
///
/// Surrounding whitespace in `supplied` is ignored (pasted identifiers often
/// carry a trailing newline); the comparison itself is byte-exact.
pub fn verify_identifier(embedded: &str, supplied: &str) -> Result<(), StegoError> {
    if embedded.as_bytes() != supplied.trim().as_bytes() {
        debug!("identifier mismatch");
        return Err(StegoError::IdentifierMismatch);
    }
    Ok(())
}
