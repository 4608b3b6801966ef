//! Text payloads: UTF-8 text sealed under a fresh salt and stored as base64.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use zeroize::Zeroizing;

use super::cipher::{decrypt_bytes, encrypt_bytes};
use super::key::{generate_salt, Salt, SALT_LENGTH};
use crate::error::{NotesError, Result};

/// Result of encrypting a piece of text.
///
/// `salt` is not secret and is stored next to `encrypted_data`; without the
/// exact salt the payload cannot be decrypted, even with the right PIN.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPayload {
    /// Per-payload random salt
    pub salt: Salt,
    /// Standard base64 (padded) of `nonce ‖ ciphertext ‖ tag`
    pub encrypted_data: String,
}

impl EncryptedPayload {
    /// Rebuild a payload from a base64 salt and its encrypted data.
    pub fn from_parts(salt_base64: &str, encrypted_data: impl Into<String>) -> Result<Self> {
        Ok(Self {
            salt: decode_salt(salt_base64)?,
            encrypted_data: encrypted_data.into(),
        })
    }

    /// Salt in the same text encoding as `encrypted_data`.
    pub fn salt_base64(&self) -> String {
        STANDARD.encode(self.salt)
    }

    /// Decrypt this payload with `pin`.
    pub fn decrypt(&self, pin: &[u8]) -> Result<String> {
        decrypt(&self.encrypted_data, &self.salt, pin)
    }
}

/// Encrypt text under a fresh random salt.
///
/// # Examples
///
/// ```
/// use notes_core::{decrypt, encrypt};
///
/// let payload = encrypt("Hello, World!", b"123456").unwrap();
/// let text = decrypt(&payload.encrypted_data, &payload.salt, b"123456").unwrap();
/// assert_eq!(text, "Hello, World!");
/// ```
pub fn encrypt(plain_text: &str, pin: &[u8]) -> Result<EncryptedPayload> {
    let salt = generate_salt();
    let blob = encrypt_bytes(plain_text.as_bytes(), pin, &salt)?;
    Ok(EncryptedPayload {
        salt,
        encrypted_data: STANDARD.encode(blob),
    })
}

/// Decrypt base64 `encrypted_data` produced by [`encrypt`].
///
/// Invalid base64, a failed tag check and invalid UTF-8 all surface as a
/// decryption failure; no partial text is ever returned.
pub fn decrypt(encrypted_data: &str, salt: &[u8], pin: &[u8]) -> Result<String> {
    let blob = decode_text(encrypted_data).ok_or(NotesError::MalformedInput)?;
    let plain = Zeroizing::new(decrypt_bytes(&blob, pin, salt)?);
    std::str::from_utf8(&plain)
        .map(str::to_owned)
        .map_err(|_| NotesError::MalformedInput)
}

/// Decode a base64 salt, checking its length.
pub fn decode_salt(salt_base64: &str) -> Result<Salt> {
    let bytes = decode_text(salt_base64)
        .ok_or_else(|| NotesError::InvalidInput("Salt is not valid base64".to_string()))?;
    <Salt>::try_from(bytes.as_slice()).map_err(|_| {
        NotesError::InvalidInput(format!(
            "Salt must be exactly {} bytes (got {})",
            SALT_LENGTH,
            bytes.len()
        ))
    })
}

// Other encoders wrap base64 at 76 columns; accept that on the way in.
pub(crate) fn decode_text(value: &str) -> Option<Vec<u8>> {
    let compact: String = value
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    STANDARD.decode(compact).ok()
}
