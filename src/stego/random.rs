// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Secure random source shared by every randomness consumer.
//!
//! Salt, nonce, identifier and generated-password randomness all flow through
//! [`SecureRandom`], so callers can inject a seeded generator for
//! reproducible tests while production code uses the OS CSPRNG.

use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::stego::error::StegoError;

/// A cryptographically secure byte source.
///
/// Blanket-implemented for every `RngCore + CryptoRng`, so both
/// [`rand::rngs::OsRng`] and [`ChaCha20Rng`] qualify.
pub trait SecureRandom: RngCore + CryptoRng {}

impl<R: RngCore + CryptoRng + ?Sized> SecureRandom for R {}

/// The default randomness source: the operating system CSPRNG.
pub fn os_rng() -> rand::rngs::OsRng {
    rand::rngs::OsRng
}

/// A deterministic ChaCha20 generator for tests and reproducible vectors.
///
/// Never use a fixed seed for real encodes: salts and nonces would repeat.
pub fn seeded(seed: [u8; 32]) -> ChaCha20Rng {
    ChaCha20Rng::from_seed(seed)
}

/// Fill `dest` from `rng`, mapping generator failure to
/// [`StegoError::RandomUnavailable`].
pub fn fill<R: SecureRandom + ?Sized>(rng: &mut R, dest: &mut [u8]) -> Result<(), StegoError> {
    rng.try_fill_bytes(dest).map_err(|_| StegoError::RandomUnavailable)
}

/// Draw a fresh random array of `N` bytes.
pub fn random_array<const N: usize, R: SecureRandom + ?Sized>(rng: &mut R) -> Result<[u8; N], StegoError> {
    let mut out = [0u8; N];
    fill(rng, &mut out)?;
    Ok(out)
}

/// Draw `len` characters uniformly from an ASCII `charset`.
///
/// Uses rejection sampling on single bytes so every character is equally
/// likely regardless of the charset size.
pub fn random_string<R: SecureRandom + ?Sized>(
    rng: &mut R,
    charset: &[u8],
    len: usize,
) -> Result<String, StegoError> {
    debug_assert!(!charset.is_empty() && charset.len() <= 256 && charset.is_ascii());

    // Largest multiple of charset.len() that fits in a byte.
    let limit = 256 - (256 % charset.len());
    let mut out = String::with_capacity(len);
    let mut buf = [0u8; 32];
    while out.len() < len {
        fill(rng, &mut buf)?;
        for &b in &buf {
            if (b as usize) < limit {
                out.push(charset[b as usize % charset.len()] as char);
                if out.len() == len {
                    break;
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_rng_is_reproducible() {
        let a: [u8; 16] = random_array(&mut seeded([7; 32])).unwrap();
        let b: [u8; 16] = random_array(&mut seeded([7; 32])).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_differ() {
        let a: [u8; 16] = random_array(&mut seeded([1; 32])).unwrap();
        let b: [u8; 16] = random_array(&mut seeded([2; 32])).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn os_rng_fills() {
        let a: [u8; 32] = random_array(&mut os_rng()).unwrap();
        let b: [u8; 32] = random_array(&mut os_rng()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn random_string_respects_charset_and_length() {
        let charset = b"ABC";
        let s = random_string(&mut seeded([3; 32]), charset, 200).unwrap();
        assert_eq!(s.len(), 200);
        assert!(s.bytes().all(|c| charset.contains(&c)));
        // 200 draws from three symbols should hit all of them.
        for c in charset {
            assert!(s.as_bytes().contains(c));
        }
    }

    #[test]
    fn random_string_zero_length() {
        let s = random_string(&mut seeded([0; 32]), b"xyz", 0).unwrap();
        assert!(s.is_empty());
    }
}
