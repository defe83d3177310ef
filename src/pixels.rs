// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! RGBA8 pixel buffer used as the steganographic carrier.

use crate::stego::error::StegoError;

/// Channels per pixel (red, green, blue, alpha).
pub const CHANNELS: usize = 4;

/// A decoded image: `width × height` pixels, 4 bytes each, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes.
    ///
    /// # Errors
    /// [`StegoError::InvalidCarrier`] if `data.len() != width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self, StegoError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|p| p.checked_mul(CHANNELS))
            .ok_or_else(|| StegoError::InvalidCarrier(format!("{width}x{height} overflows")))?;
        if data.len() != expected {
            return Err(StegoError::InvalidCarrier(format!(
                "expected {expected} bytes for {width}x{height} RGBA, got {}",
                data.len()
            )));
        }
        Ok(Self { width, height, data })
    }

    /// A buffer with every channel set to `value`.
    pub fn filled(width: u32, height: u32, value: u8) -> Result<Self, StegoError> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|p| p.checked_mul(CHANNELS))
            .ok_or_else(|| StegoError::InvalidCarrier(format!("{width}x{height} overflows")))?;
        Self::from_rgba(width, height, vec![value; len])
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels (`width × height`).
    pub fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS
    }

    /// Flat RGBA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, returning the flat RGBA bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Read channel `channel` of pixel `index`.
    #[inline]
    pub fn channel(&self, index: usize, channel: usize) -> u8 {
        self.data[index * CHANNELS + channel]
    }

    /// Mutable access to channel `channel` of pixel `index`.
    #[inline]
    pub fn channel_mut(&mut self, index: usize, channel: usize) -> &mut u8 {
        &mut self.data[index * CHANNELS + channel]
    }
}
