// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! # pixelveil-core
//!
//! Hides a password-encrypted secret in the least-significant bits of an
//! image's red channel and recovers it given the matching identifier and
//! password.
//!
//! - One bit per pixel, 32-pixel length prefix, pixel order.
//! - PBKDF2-HMAC-SHA256 (100,000 iterations) + AES-256-GCM; salt and nonce
//!   are fresh per encode.
//! - The embedded message is `identifier|base64(salt ∥ nonce ∥ ciphertext)`.
//!
//! The carrier must be stored losslessly (PNG); recompression destroys the
//! hidden data.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use pixelveil_core::{decode, encode, DecodeRequest, EncodeRequest, PasswordChoice, PixelBuffer, SecretPayload};
//!
//! let carrier = PixelBuffer::filled(100, 100, 0x80).unwrap();
//! let out = encode(EncodeRequest {
//!     carrier,
//!     payload: SecretPayload::Text("hello".into()),
//!     password: PasswordChoice::Custom("correct-horse".into()),
//!     identifier: None,
//! }).unwrap();
//! let secret = decode(&DecodeRequest {
//!     carrier: &out.carrier,
//!     identifier: &out.identifier,
//!     password: &out.password,
//! }).unwrap();
//! assert_eq!(secret, SecretPayload::Text("hello".into()));
//! ```

pub mod pixels;
pub mod stego;
#[cfg(feature = "image-io")]
pub mod image_io;

pub use pixels::PixelBuffer;
pub use stego::{decode, encode, encode_with_rng, DecodeRequest, EncodeRequest, EncodeResult, PasswordChoice};
pub use stego::{capacity, capacity_report, Capacity, CapacityReport};
pub use stego::{SecretPayload, StegoError};
#[cfg(feature = "image-io")]
pub use image_io::{decode_image, encode_png};
