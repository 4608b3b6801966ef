//! Key derivation using PBKDF2-HMAC-SHA256.
//!
//! Every encrypted record carries its own random salt, so the same PIN yields
//! a different key per record. Keys are derived on demand and dropped (and
//! zeroized) as soon as the operation that needed them returns.

use hmac::Hmac;
use pbkdf2::pbkdf2;
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;
use zeroize::ZeroizeOnDrop;

use crate::error::{NotesError, Result};

/// PBKDF2 iteration count.
///
/// Fixed by the on-disk format: changing it makes every existing record
/// undecryptable.
pub const PBKDF2_ITERATIONS: u32 = 65_536;

/// Length of derived key in bytes (256 bits for AES-256).
pub const KEY_LENGTH: usize = 32;

/// Length of the per-record salt in bytes.
pub const SALT_LENGTH: usize = 16;

/// Per-record salt. Not secret; stored next to the ciphertext.
pub type Salt = [u8; SALT_LENGTH];

/// A cryptographic key derived from a PIN.
///
/// Key material is zeroized from memory when dropped.
#[derive(ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LENGTH],
}

impl DerivedKey {
    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate encryption operations.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &"[REDACTED]")
            .finish()
    }
}

/// Derive an encryption key from a PIN and a record salt.
///
/// The PIN may be any non-empty byte sequence; the application's six-digit
/// rule lives in [`crate::crypto::validate_pin`], not here.
///
/// # Errors
///
/// - `InvalidInput` if the PIN is empty or the salt is not exactly 16 bytes
/// - `Environment` if the PBKDF2 primitive rejects its parameters
///
/// # Examples
///
/// ```
/// use notes_core::crypto::{derive_key, generate_salt};
///
/// let salt = generate_salt();
/// let key = derive_key(b"123456", &salt).unwrap();
/// assert_eq!(key.as_bytes().len(), 32);
/// ```
pub fn derive_key(pin: &[u8], salt: &[u8]) -> Result<DerivedKey> {
    if pin.is_empty() {
        return Err(NotesError::InvalidInput("PIN cannot be empty".to_string()));
    }

    if salt.len() != SALT_LENGTH {
        return Err(NotesError::InvalidInput(format!(
            "Salt must be exactly {} bytes (got {})",
            SALT_LENGTH,
            salt.len()
        )));
    }

    tracing::debug!(iterations = PBKDF2_ITERATIONS, "deriving record key");

    let mut key = [0u8; KEY_LENGTH];
    pbkdf2::<Hmac<Sha256>>(pin, salt, PBKDF2_ITERATIONS, &mut key)
        .map_err(|e| NotesError::Environment(format!("PBKDF2 failed: {}", e)))?;

    Ok(DerivedKey { key })
}

/// Generate a fresh random salt from the OS CSPRNG.
pub fn generate_salt() -> Salt {
    let mut salt = [0u8; SALT_LENGTH];
    OsRng.fill_bytes(&mut salt);
    salt
}
