// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Container decode/encode via the `image` crate.
//!
//! Covers can be PNG, JPEG or BMP; output is always PNG because any lossy
//! recompression destroys the embedded bits.

use std::io::Cursor;

use image::{DynamicImage, ImageOutputFormat, RgbaImage};

use crate::pixels::PixelBuffer;
use crate::stego::error::StegoError;

/// Decode an image file into an RGBA8 carrier.
///
/// # Errors
/// [`StegoError::InvalidCarrier`] if the bytes are not a supported image.
pub fn decode_image(bytes: &[u8]) -> Result<PixelBuffer, StegoError> {
    let img = image::load_from_memory(bytes).map_err(|e| StegoError::InvalidCarrier(e.to_string()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer::from_rgba(width, height, rgba.into_raw())
}

/// Encode a carrier as PNG.
pub fn encode_png(carrier: &PixelBuffer) -> Result<Vec<u8>, StegoError> {
    let rgba = RgbaImage::from_raw(carrier.width(), carrier.height(), carrier.as_bytes().to_vec())
        .ok_or_else(|| StegoError::InvalidCarrier("buffer does not match dimensions".into()))?;

    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(rgba)
        .write_to(&mut out, ImageOutputFormat::Png)
        .map_err(|e| StegoError::InvalidCarrier(e.to_string()))?;
    Ok(out.into_inner())
}
