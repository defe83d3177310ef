// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Encode/decode pipeline.
//!
//! Encode: serialize secret → encrypt → compose `id|envelope` → LSB embed.
//! Decode: LSB extract → parse → verify identifier → decrypt → deserialize.
//!
//! Each operation takes an explicit request and returns one result; there is
//! no shared session state.

use std::fmt;

use tracing::debug;

use crate::pixels::PixelBuffer;
use crate::stego::crypto;
use crate::stego::error::StegoError;
use crate::stego::lsb;
use crate::stego::message;
use crate::stego::payload::SecretPayload;
use crate::stego::random::{self, SecureRandom};

/// Stand-in printed for passwords by the `Debug` impls below.
const REDACTED: &str = "[REDACTED]";

/// How the encode password is chosen.
#[derive(Clone, PartialEq, Eq)]
pub enum PasswordChoice {
    /// Generate a random 16-character password.
    Generate,
    /// Use the caller's password (at least 8 characters).
    Custom(String),
}

impl fmt::Debug for PasswordChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generate => f.write_str("Generate"),
            Self::Custom(_) => f.debug_tuple("Custom").field(&REDACTED).finish(),
        }
    }
}

/// Everything needed to hide one secret.
#[derive(Debug, Clone)]
pub struct EncodeRequest {
    pub carrier: PixelBuffer,
    pub payload: SecretPayload,
    pub password: PasswordChoice,
    /// Identifier to embed; `None` generates a fresh one.
    pub identifier: Option<String>,
}

/// Result of a successful encode.
///
/// `carrier` must be re-encoded with a lossless container; `identifier` and
/// `password` are both required to decode.
#[derive(Clone)]
pub struct EncodeResult {
    pub carrier: PixelBuffer,
    pub identifier: String,
    pub password: String,
}

impl fmt::Debug for EncodeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncodeResult")
            .field("carrier", &self.carrier)
            .field("identifier", &self.identifier)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Everything needed to recover a secret.
#[derive(Clone, Copy)]
pub struct DecodeRequest<'a> {
    pub carrier: &'a PixelBuffer,
    pub identifier: &'a str,
    pub password: &'a str,
}

impl fmt::Debug for DecodeRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodeRequest")
            .field("carrier", self.carrier)
            .field("identifier", &self.identifier)
            .field("password", &REDACTED)
            .finish()
    }
}

/// Encode using the OS random source.
///
/// # Errors
/// - [`StegoError::PasswordTooWeak`] if a custom password is too short.
/// - [`StegoError::InvalidPayload`] if the secret cannot be serialized.
/// - [`StegoError::CapacityExceeded`] if the message does not fit.
pub fn encode(request: EncodeRequest) -> Result<EncodeResult, StegoError> {
    encode_with_rng(request, &mut random::os_rng())
}

/// Encode with an injected random source (identifier, password, salt, nonce).
pub fn encode_with_rng<R: SecureRandom + ?Sized>(
    request: EncodeRequest,
    rng: &mut R,
) -> Result<EncodeResult, StegoError> {
    let EncodeRequest { mut carrier, payload, password, identifier } = request;

    let password = match password {
        PasswordChoice::Custom(pw) => {
            crypto::validate_password(&pw)?;
            pw
        }
        PasswordChoice::Generate => crypto::generate_password(rng)?,
    };

    let serialized = payload.serialize()?;
    let identifier = match identifier {
        Some(id) => {
            message::validate_identifier(&id)?;
            id
        }
        None => message::generate_identifier(rng)?,
    };

    let envelope = crypto::encrypt(serialized.as_bytes(), &password, rng)?;
    let composed = message::compose(&identifier, &envelope);

    debug!(
        payload_bytes = serialized.len(),
        message_bytes = composed.len(),
        usable_bits = lsb::usable_bits(&carrier),
        "embedding message"
    );
    lsb::embed(&mut carrier, composed.as_bytes())?;

    Ok(EncodeResult { carrier, identifier, password })
}

/// Recover the secret hidden in a carrier.
///
/// # Errors
/// - [`StegoError::NoEmbeddedData`] / [`StegoError::TruncatedCarrier`] /
///   [`StegoError::InvalidEncoding`] if extraction fails.
/// - [`StegoError::MalformedMessage`] if the message has no delimiter.
/// - [`StegoError::IdentifierMismatch`] if the identifier differs (checked
///   before decryption).
/// - [`StegoError::DecryptionFailed`] for a wrong password or corrupted data.
pub fn decode(request: &DecodeRequest<'_>) -> Result<SecretPayload, StegoError> {
    let extracted = lsb::extract_message(request.carrier)?;
    let (identifier, envelope) = message::parse(&extracted)?;
    message::verify_identifier(identifier, request.identifier)?;

    debug!(envelope_len = envelope.len(), "identifier verified, decrypting");
    let plaintext = crypto::decrypt(envelope, request.password)?;
    let text = String::from_utf8(plaintext).map_err(|_| StegoError::InvalidEncoding)?;

    Ok(SecretPayload::deserialize(&text))
}
