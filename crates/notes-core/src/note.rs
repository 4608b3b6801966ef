//! Sealed notes: note text and its optional image, linked under one salt.
//!
//! A note's text and its attached image are encrypted under the same salt so
//! that one PIN entry opens both. They must be stored and replaced together:
//! re-encrypting only one half leaves the other undecryptable.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use zeroize::Zeroize;

use crate::crypto::cipher::{open_with_key, seal_with_key};
use crate::crypto::key::{derive_key, generate_salt, Salt};
use crate::crypto::payload::decode_text;
use crate::error::{NotesError, Result};

/// An encrypted note as the storage layer keeps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedNote {
    /// Salt shared by `content` and `image`
    pub salt: Salt,
    /// Base64 `nonce ‖ ciphertext ‖ tag` of the UTF-8 text
    pub content: String,
    /// Raw `nonce ‖ ciphertext ‖ tag` of the attached image, if any
    pub image: Option<Vec<u8>>,
}

/// Plaintext of a [`SealedNote`]. Zeroized on drop.
pub struct OpenedNote {
    content: String,
    image: Option<Vec<u8>>,
}

impl OpenedNote {
    /// Decrypted note text.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Decrypted image bytes, if the note has an image.
    pub fn image(&self) -> Option<&[u8]> {
        self.image.as_deref()
    }
}

impl Drop for OpenedNote {
    fn drop(&mut self) {
        self.content.zeroize();
        if let Some(image) = self.image.as_mut() {
            image.zeroize();
        }
    }
}

impl std::fmt::Debug for OpenedNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenedNote")
            .field("content", &"[REDACTED]")
            .field("image_len", &self.image.as_ref().map(Vec::len))
            .finish()
    }
}

impl SealedNote {
    /// Reassemble a note loaded from storage.
    pub fn from_parts(salt: Salt, content: impl Into<String>, image: Option<Vec<u8>>) -> Self {
        Self {
            salt,
            content: content.into(),
            image,
        }
    }

    /// Encrypt text and an optional image under one fresh salt.
    pub fn seal(content: &str, image: Option<&[u8]>, pin: &[u8]) -> Result<Self> {
        let salt = generate_salt();
        let key = derive_key(pin, &salt)?;

        let content_blob = seal_with_key(&key, content.as_bytes())?;
        let image = image.map(|bytes| seal_with_key(&key, bytes)).transpose()?;

        Ok(Self {
            salt,
            content: STANDARD.encode(content_blob),
            image,
        })
    }

    /// Decrypt both halves. Either half failing fails the whole note.
    pub fn open(&self, pin: &[u8]) -> Result<OpenedNote> {
        let key = derive_key(pin, &self.salt)?;

        let blob = decode_text(&self.content).ok_or(NotesError::MalformedInput)?;
        let text = open_with_key(&key, &blob)?;
        let content = String::from_utf8(text).map_err(|e| {
            e.into_bytes().zeroize();
            NotesError::MalformedInput
        })?;

        // Dropping `opened` on an image failure zeroizes the text.
        let mut opened = OpenedNote {
            content,
            image: None,
        };
        if let Some(blob) = self.image.as_deref() {
            opened.image = Some(open_with_key(&key, blob)?);
        }

        Ok(opened)
    }

    /// Re-encrypt under a new salt, optionally replacing the text.
    ///
    /// The image (if any) is carried over and re-encrypted too, since the
    /// old ciphertext is bound to the old salt.
    pub fn reseal(
        &self,
        old_pin: &[u8],
        new_content: Option<&str>,
        new_pin: &[u8],
    ) -> Result<Self> {
        let opened = self.open(old_pin)?;
        let content = new_content.unwrap_or(opened.content());
        Self::seal(content, opened.image(), new_pin)
    }
}
