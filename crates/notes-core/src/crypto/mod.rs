//! Cryptographic operations for SecureNotes.
//!
//! - **PBKDF2-HMAC-SHA256** (65 536 rounds) turns a PIN and a per-record salt
//!   into a 256-bit key
//! - **AES-256-GCM** seals the record with a random 96-bit nonce
//!
//! ## Security Model
//!
//! - Every encryption draws a fresh salt (text payloads) and a fresh nonce
//! - Keys are derived per call and zeroized on drop, never cached
//! - Wrong PIN, wrong salt and tampered data fail identically
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of stored notes and companion image files
//! - Equality inference between records with identical content
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - Offline brute force of a six-digit PIN by a patient attacker; the
//!   iteration count only slows it down

pub mod cipher;
pub mod key;
pub mod payload;
pub mod pin;

pub use cipher::{decrypt_bytes, encrypt_bytes, NONCE_LENGTH, TAG_LENGTH};
pub use key::{derive_key, generate_salt, DerivedKey, Salt, KEY_LENGTH, SALT_LENGTH};
pub use payload::{decode_salt, decrypt, encrypt, EncryptedPayload};
pub use pin::{validate_pin, PinPolicy};
