//! AES-256-GCM over raw byte sequences.
//!
//! Blob layout, relied on by every stored record and companion image file:
//!
//! ```text
//! [ nonce (12 bytes) | ciphertext (len(plaintext) bytes) | tag (16 bytes) ]
//! ```

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use rand::{rngs::OsRng, RngCore};

use super::key::{derive_key, DerivedKey};
use crate::error::{NotesError, Result};

/// Nonce length in bytes (96 bits).
pub const NONCE_LENGTH: usize = 12;

/// Authentication tag length in bytes (128 bits).
pub const TAG_LENGTH: usize = 16;

/// Encrypt `plaintext` under a key derived from `pin` and `salt`.
///
/// A fresh random nonce is generated on every call. Output is
/// `nonce ‖ ciphertext ‖ tag`, i.e. `plaintext.len() + 28` bytes.
///
/// Text and image belonging to the same note must be encrypted with the same
/// salt; see [`crate::note::SealedNote`].
///
/// # Errors
///
/// - `InvalidInput` for an empty PIN or a salt that is not 16 bytes
/// - `Environment` if the cipher provider fails
pub fn encrypt_bytes(plaintext: &[u8], pin: &[u8], salt: &[u8]) -> Result<Vec<u8>> {
    let key = derive_key(pin, salt)?;
    seal_with_key(&key, plaintext)
}

/// Decrypt a `nonce ‖ ciphertext ‖ tag` blob.
///
/// # Errors
///
/// - `MalformedInput` if the blob is no longer than the nonce; the cipher is
///   never invoked in that case
/// - `AuthenticationFailure` if the tag does not verify (wrong PIN, wrong
///   salt and corrupted data are indistinguishable)
/// - `InvalidInput` for an empty PIN or a salt that is not 16 bytes
pub fn decrypt_bytes(blob: &[u8], pin: &[u8], salt: &[u8]) -> Result<Vec<u8>> {
    if blob.len() <= NONCE_LENGTH {
        return Err(NotesError::MalformedInput);
    }
    let key = derive_key(pin, salt)?;
    open_with_key(&key, blob)
}

pub(crate) fn seal_with_key(key: &DerivedKey, plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| NotesError::Environment(format!("Failed to create cipher: {}", e)))?;

    let mut nonce_bytes = [0u8; NONCE_LENGTH];
    OsRng.fill_bytes(&mut nonce_bytes);

    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
        .map_err(|e| NotesError::Environment(format!("Encryption failed: {}", e)))?;

    let mut blob = Vec::with_capacity(NONCE_LENGTH + ciphertext.len());
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);

    tracing::debug!(plaintext_len = plaintext.len(), blob_len = blob.len(), "sealed blob");
    Ok(blob)
}

pub(crate) fn open_with_key(key: &DerivedKey, blob: &[u8]) -> Result<Vec<u8>> {
    if blob.len() <= NONCE_LENGTH {
        return Err(NotesError::MalformedInput);
    }
    let (nonce_bytes, body) = blob.split_at(NONCE_LENGTH);

    let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| NotesError::Environment(format!("Failed to create cipher: {}", e)))?;

    cipher
        .decrypt(Nonce::from_slice(nonce_bytes), body)
        .map_err(|_| NotesError::AuthenticationFailure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::key::{generate_salt, Salt};

    const PIN: &[u8] = b"123456";
    const SALT: Salt = *b"0123456789abcdef";

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let plaintext = b"Hello, World! This is a secret note.";

        let blob = encrypt_bytes(plaintext, PIN, &SALT).unwrap();
        let decrypted = decrypt_bytes(&blob, PIN, &SALT).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_blob_layout_length() {
        let plaintext = vec![0xA5u8; 10_000];

        let blob = encrypt_bytes(&plaintext, PIN, &SALT).unwrap();

        assert_eq!(blob.len(), NONCE_LENGTH + 10_000 + TAG_LENGTH);
        assert_eq!(blob.len(), 10_028);
        assert_eq!(decrypt_bytes(&blob, PIN, &SALT).unwrap(), plaintext);
    }

    #[test]
    fn test_empty_plaintext_round_trip() {
        let blob = encrypt_bytes(b"", PIN, &SALT).unwrap();
        assert_eq!(blob.len(), NONCE_LENGTH + TAG_LENGTH);

        let decrypted = decrypt_bytes(&blob, PIN, &SALT).unwrap();
        assert!(decrypted.is_empty());
    }

    #[test]
    fn test_wrong_pin_fails() {
        let blob = encrypt_bytes(b"secret", PIN, &SALT).unwrap();

        let result = decrypt_bytes(&blob, b"000000", &SALT);
        assert!(matches!(result, Err(NotesError::AuthenticationFailure)));
    }

    #[test]
    fn test_wrong_salt_fails() {
        let blob = encrypt_bytes(b"secret", PIN, &SALT).unwrap();

        let result = decrypt_bytes(&blob, PIN, &generate_salt());
        assert!(matches!(result, Err(NotesError::AuthenticationFailure)));
    }

    #[test]
    fn test_same_inputs_different_nonce() {
        let blob1 = encrypt_bytes(b"same plaintext", PIN, &SALT).unwrap();
        let blob2 = encrypt_bytes(b"same plaintext", PIN, &SALT).unwrap();

        assert_ne!(blob1[..NONCE_LENGTH], blob2[..NONCE_LENGTH]);
        assert_ne!(blob1, blob2);
    }

    #[test]
    fn test_short_blob_rejected_as_malformed() {
        let result = decrypt_bytes(&[1, 2, 3, 4, 5], PIN, &SALT);
        assert!(matches!(result, Err(NotesError::MalformedInput)));

        let result = decrypt_bytes(&[0u8; NONCE_LENGTH], PIN, &SALT);
        assert!(matches!(result, Err(NotesError::MalformedInput)));

        let result = decrypt_bytes(&[], PIN, &SALT);
        assert!(matches!(result, Err(NotesError::MalformedInput)));
    }

    #[test]
    fn test_blob_without_full_tag_fails_authentication() {
        let result = decrypt_bytes(&[0u8; NONCE_LENGTH + 4], PIN, &SALT);
        assert!(matches!(result, Err(NotesError::AuthenticationFailure)));
    }

    #[test]
    fn test_every_bit_flip_detected() {
        let key = derive_key(PIN, &SALT).unwrap();
        let blob = seal_with_key(&key, b"Hello").unwrap();

        for index in 0..blob.len() {
            for bit in 0..8 {
                let mut tampered = blob.clone();
                tampered[index] ^= 1 << bit;
                let result = open_with_key(&key, &tampered);
                assert!(
                    matches!(result, Err(NotesError::AuthenticationFailure)),
                    "flip of byte {} bit {} was not detected",
                    index,
                    bit
                );
            }
        }
    }

    #[test]
    fn test_truncated_blob_fails() {
        let blob = encrypt_bytes(b"secret note", PIN, &SALT).unwrap();

        let result = decrypt_bytes(&blob[..blob.len() - 1], PIN, &SALT);
        assert!(result.unwrap_err().is_decryption_failure());
    }

    #[test]
    fn test_invalid_salt_length_is_input_error() {
        let result = encrypt_bytes(b"secret", PIN, b"too-short");
        assert!(matches!(result, Err(NotesError::InvalidInput(_))));
    }
}
