//! # SecureNotes Core
//!
//! PIN-derived, per-record authenticated encryption for note text and
//! attached images.
//!
//! This crate only transforms bytes. Persistence, salt storage and user
//! presence checks belong to the caller.
//!
//! ## Architecture
//!
//! - **crypto**: key derivation, AES-256-GCM blobs, base64 text payloads, PIN policy
//! - **note**: note text and image sealed together under one salt
//! - **rekey**: parallel re-encryption of many notes under a new PIN
//!
//! Every operation is a pure function of its inputs apart from drawing
//! randomness, and is safe to call from many threads at once. Key derivation
//! is deliberately slow (tens of milliseconds); interactive callers should run
//! it off their UI thread.

pub mod crypto;
pub mod error;
pub mod note;
pub mod rekey;

pub use crypto::{decrypt, decrypt_bytes, encrypt, encrypt_bytes, EncryptedPayload, Salt};
pub use error::{NotesError, Result};
pub use note::{OpenedNote, SealedNote};
pub use rekey::{rekey_all, RekeySummary};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
