// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Password-based authenticated encryption for the embedded payload.
//!
//! A 256-bit key is derived from the password with PBKDF2-HMAC-SHA256
//! (100,000 iterations, random 16-byte salt) and used for AES-256-GCM with a
//! random 96-bit nonce. The result travels as one base64 string:
//!
//! ```text
//! base64( [16 bytes] salt ∥ [12 bytes] nonce ∥ [N + 16 bytes] ciphertext+tag )
//! ```
//!
//! Decryption failures are deliberately undifferentiated: a wrong password, a
//! flipped bit and a truncated envelope all report
//! [`StegoError::DecryptionFailed`].

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::stego::error::StegoError;
use crate::stego::random::{self, SecureRandom};

/// PBKDF2 salt length in bytes.
pub const SALT_LEN: usize = 16;
/// AES-GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;
/// AES-GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;
/// Derived key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;
/// PBKDF2-HMAC-SHA256 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Binary envelope overhead: salt + nonce + tag = 44 bytes.
pub const ENVELOPE_OVERHEAD: usize = SALT_LEN + NONCE_LEN + TAG_LEN;

/// Minimum length (in characters) of a caller-chosen password.
pub const MIN_PASSWORD_LEN: usize = 8;
/// Length of passwords produced by [`generate_password`].
pub const GENERATED_PASSWORD_LEN: usize = 16;

const PASSWORD_CHARSET: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

/// Derive the AES-256 key from a password and salt.
pub fn derive_key(password: &str, salt: &[u8]) -> Zeroizing<[u8; KEY_LEN]> {
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut *key);
    key
}

/// Encrypt `plaintext` under `password` with a fresh salt and nonce from `rng`.
///
/// Returns the base64 envelope string.
pub fn encrypt<R: SecureRandom + ?Sized>(
    plaintext: &[u8],
    password: &str,
    rng: &mut R,
) -> Result<String, StegoError> {
    let salt: [u8; SALT_LEN] = random::random_array(rng)?;
    let nonce: [u8; NONCE_LEN] = random::random_array(rng)?;
    encrypt_with(plaintext, password, &salt, &nonce)
}

/// Encrypt with caller-provided salt and nonce.
///
/// Only for reproducible vectors; real encodes go through [`encrypt`].
pub fn encrypt_with(
    plaintext: &[u8],
    password: &str,
    salt: &[u8; SALT_LEN],
    nonce: &[u8; NONCE_LEN],
) -> Result<String, StegoError> {
    let key = derive_key(password, salt);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&*key));

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(nonce), plaintext)
        .map_err(|_| StegoError::EncryptionFailed)?;

    let mut combined = Vec::with_capacity(SALT_LEN + NONCE_LEN + ciphertext.len());
    combined.extend_from_slice(salt);
    combined.extend_from_slice(nonce);
    combined.extend_from_slice(&ciphertext);

    Ok(STANDARD.encode(combined))
}

/// Decrypt a base64 envelope produced by [`encrypt`].
pub fn decrypt(envelope: &str, password: &str) -> Result<Vec<u8>, StegoError> {
    let combined = STANDARD
        .decode(envelope.trim())
        .map_err(|_| StegoError::DecryptionFailed)?;

    if combined.len() < ENVELOPE_OVERHEAD {
        return Err(StegoError::DecryptionFailed);
    }

    let (salt, rest) = combined.split_at(SALT_LEN);
    let (nonce, ciphertext) = rest.split_at(NONCE_LEN);

    let key = derive_key(password, salt);
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&*key));

    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| StegoError::DecryptionFailed)
}

/// Length of the base64 envelope for a plaintext of `plaintext_len` bytes.
pub fn envelope_len(plaintext_len: usize) -> usize {
    (ENVELOPE_OVERHEAD + plaintext_len).div_ceil(3) * 4
}

/// Reject caller-chosen passwords shorter than [`MIN_PASSWORD_LEN`] characters.
pub fn validate_password(password: &str) -> Result<(), StegoError> {
    let actual = password.chars().count();
    if actual < MIN_PASSWORD_LEN {
        return Err(StegoError::PasswordTooWeak { min: MIN_PASSWORD_LEN, actual });
    }
    Ok(())
}

/// Generate a random 16-character password from letters, digits and `!@#$%^&*`.
pub fn generate_password<R: SecureRandom + ?Sized>(rng: &mut R) -> Result<String, StegoError> {
    random::random_string(rng, PASSWORD_CHARSET, GENERATED_PASSWORD_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stego::random::seeded;

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let msg = b"Hello, steganography!";
        let password = "secret123";

        let env = encrypt(msg, password, &mut seeded([1; 32])).unwrap();
        let pt = decrypt(&env, password).unwrap();
        assert_eq!(pt, msg);
    }

    #[test]
    fn wrong_password_fails() {
        let env = encrypt(b"secret message", "correct-pw", &mut seeded([2; 32])).unwrap();
        let result = decrypt(&env, "wrong-pw");
        assert_eq!(result, Err(StegoError::DecryptionFailed));
    }

    #[test]
    fn empty_message_works() {
        let env = encrypt(b"", "password", &mut seeded([3; 32])).unwrap();
        assert_eq!(decrypt(&env, "password").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn envelope_layout() {
        let salt = [0xAA; SALT_LEN];
        let nonce = [0xBB; NONCE_LEN];
        let env = encrypt_with(b"abc", "password", &salt, &nonce).unwrap();
        let raw = STANDARD.decode(&env).unwrap();

        assert_eq!(raw.len(), SALT_LEN + NONCE_LEN + 3 + TAG_LEN);
        assert_eq!(&raw[..SALT_LEN], &salt);
        assert_eq!(&raw[SALT_LEN..SALT_LEN + NONCE_LEN], &nonce);
        assert_eq!(env.len(), envelope_len(3));
    }

    #[test]
    fn envelope_len_matches_real_output() {
        let mut rng = seeded([4; 32]);
        for n in [0usize, 1, 2, 3, 5, 47, 100] {
            let env = encrypt(&vec![b'x'; n], "password", &mut rng).unwrap();
            assert_eq!(env.len(), envelope_len(n), "length mismatch for {n} bytes");
        }
    }

    #[test]
    fn tampered_ciphertext_fails() {
        let env = encrypt(b"integrity", "password", &mut seeded([5; 32])).unwrap();
        let mut raw = STANDARD.decode(&env).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0x01;
        let tampered = STANDARD.encode(raw);
        assert_eq!(decrypt(&tampered, "password"), Err(StegoError::DecryptionFailed));
    }

    #[test]
    fn malformed_envelopes_fail_opaquely() {
        assert_eq!(decrypt("not base64 !!", "password"), Err(StegoError::DecryptionFailed));
        assert_eq!(decrypt("", "password"), Err(StegoError::DecryptionFailed));
        let short = STANDARD.encode([0u8; ENVELOPE_OVERHEAD - 1]);
        assert_eq!(decrypt(&short, "password"), Err(StegoError::DecryptionFailed));
    }

    #[test]
    fn ciphertext_differs_per_encryption() {
        let mut rng = seeded([6; 32]);
        let a = encrypt(b"same message", "password", &mut rng).unwrap();
        let b = encrypt(b"same message", "password", &mut rng).unwrap();
        assert_ne!(a, b, "fresh salt and nonce must change the envelope");
    }

    #[test]
    fn key_differs_by_salt_and_password() {
        let k1 = derive_key("pass", &[0u8; SALT_LEN]);
        let k2 = derive_key("pass", &[1u8; SALT_LEN]);
        let k3 = derive_key("pass2", &[0u8; SALT_LEN]);
        assert_ne!(k1, k2);
        assert_ne!(k1, k3);
        assert_eq!(k1, derive_key("pass", &[0u8; SALT_LEN]));
    }

    #[test]
    fn password_minimum_length() {
        assert!(validate_password("12345678").is_ok());
        assert_eq!(
            validate_password("1234567"),
            Err(StegoError::PasswordTooWeak { min: 8, actual: 7 })
        );
        // Counted in characters, not bytes.
        assert!(validate_password("ééééééé").is_err());
    }

    #[test]
    fn generated_password_shape() {
        let pw = generate_password(&mut seeded([9; 32])).unwrap();
        assert_eq!(pw.len(), GENERATED_PASSWORD_LEN);
        assert!(pw.bytes().all(|c| PASSWORD_CHARSET.contains(&c)));
        assert!(validate_password(&pw).is_ok());
    }
}
