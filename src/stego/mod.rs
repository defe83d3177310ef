// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Steganographic encoding and decoding.
//!
//! The encode chain is:
//!
//! 1. [`payload`]: serialize the secret (text or `FILE:` record).
//! 2. [`crypto`]: PBKDF2-SHA256 key derivation + AES-256-GCM, base64 envelope.
//! 3. [`message`]: prepend the identifier, `id|envelope`.
//! 4. [`lsb`]: write a 32-bit length prefix and the message bits into the
//!    red-channel LSBs.
//!
//! [`pipeline::decode`] reverses it, checking the identifier before any key
//! derivation. [`capacity`] answers "will it fit?" without touching the
//! carrier.

pub mod error;
pub mod random;
pub mod crypto;
pub mod payload;
pub mod message;
pub mod lsb;
pub mod capacity;
mod pipeline;

pub use error::StegoError;
pub use capacity::{capacity, report as capacity_report, Capacity, CapacityReport};
pub use payload::SecretPayload;
pub use pipeline::{decode, encode, encode_with_rng, DecodeRequest, EncodeRequest, EncodeResult, PasswordChoice};
