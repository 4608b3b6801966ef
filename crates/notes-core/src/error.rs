//! Error types for SecureNotes core operations.
//!
//! Decryption deliberately has two variants that render identically. Callers
//! should branch on [`NotesError::is_decryption_failure`] and show a single
//! generic message; the variant itself is only useful in tests.

use thiserror::Error;

/// Result type alias for SecureNotes operations.
pub type Result<T> = std::result::Result<T, NotesError>;

/// Core error type for SecureNotes operations.
#[derive(Debug, Error)]
pub enum NotesError {
    /// Ciphertext too short, or its text encoding / plaintext encoding is invalid
    #[error("Decryption failed")]
    MalformedInput,

    /// Authentication tag mismatch (wrong PIN, wrong salt or corrupted data)
    #[error("Decryption failed")]
    AuthenticationFailure,

    /// Cryptographic provider unavailable or misbehaving
    #[error("Cryptographic environment error: {0}")]
    Environment(String),

    /// Invalid caller input (empty PIN, wrong salt length, PIN policy)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl NotesError {
    /// True for every failure a caller should report as "incorrect PIN".
    pub fn is_decryption_failure(&self) -> bool {
        matches!(
            self,
            NotesError::MalformedInput | NotesError::AuthenticationFailure
        )
    }
}
