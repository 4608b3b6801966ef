//! One-JSON-file-per-note store.
//!
//! Layout inside the notes directory:
//!
//! ```text
//! <id>.json          NoteRecord
//! <id>-<gen>.img     companion image (raw blob when the note is encrypted)
//! ```
//!
//! Every image write gets a fresh `<gen>` name, so the image a record points
//! at is never overwritten in place. Writes are staged next to their final
//! paths and only renamed into place once every file of a batch is on disk.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use notes_core::crypto::decode_salt;
use notes_core::SealedNote;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::DELETED_TITLE;
use crate::errors::{core_error, CliError};
use crate::fs::{rename_with_fallback, write_atomic};

const RECORD_EXTENSION: &str = "json";
const IMAGE_EXTENSION: &str = "img";
const STAGED_SUFFIX: &str = "staged";

/// A stored note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoteRecord {
    pub id: Uuid,
    pub title: String,
    /// Plain text, or base64 ciphertext when `is_encrypted`
    pub content: String,
    pub is_encrypted: bool,
    /// Base64 salt shared by `content` and the image file
    #[serde(default)]
    pub salt: Option<String>,
    #[serde(default)]
    pub image_file: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl NoteRecord {
    pub fn plain(title: String, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            content,
            is_encrypted: false,
            salt: None,
            image_file: None,
            updated_at: Utc::now(),
        }
    }

    pub fn encrypted(title: String, sealed: &SealedNote) -> Self {
        let mut record = Self::plain(title, String::new());
        record.apply_sealed(sealed);
        record
    }

    /// Replace content and salt with a freshly sealed note.
    pub fn apply_sealed(&mut self, sealed: &SealedNote) {
        self.content = sealed.content.clone();
        self.salt = Some(STANDARD.encode(sealed.salt));
        self.is_encrypted = true;
        self.updated_at = Utc::now();
    }

    /// Rebuild the sealed form from this record and its image bytes.
    pub fn to_sealed(&self, image: Option<Vec<u8>>) -> anyhow::Result<SealedNote> {
        let salt = self.salt.as_deref().ok_or_else(|| {
            anyhow::anyhow!("Note {} is marked encrypted but has no salt", self.id)
        })?;
        let salt = decode_salt(salt).map_err(core_error)?;
        Ok(SealedNote::from_parts(salt, self.content.clone(), image))
    }

    /// Blank the record the way a delete does: no title, content or salt.
    pub fn scrub(&mut self) {
        self.title = DELETED_TITLE.to_string();
        self.content.clear();
        self.is_encrypted = false;
        self.salt = None;
        self.image_file = None;
        self.updated_at = Utc::now();
    }
}

/// A note write whose files are on disk but not yet visible to readers.
///
/// Made visible by [`NoteStore::commit`]; dropped writes are undone with
/// [`StagedNote::discard`].
#[derive(Debug)]
pub struct StagedNote {
    staged_path: PathBuf,
    record_path: PathBuf,
    new_image: Option<PathBuf>,
    old_image: Option<PathBuf>,
}

impl StagedNote {
    /// Remove the staged record and the new image. Old files are untouched.
    pub fn discard(self) {
        let _ = std::fs::remove_file(&self.staged_path);
        if let Some(path) = &self.new_image {
            let _ = std::fs::remove_file(path);
        }
    }
}

/// Notes directory handle.
pub struct NoteStore {
    dir: PathBuf,
}

impl NoteStore {
    /// Create the directory if needed and return a handle.
    pub fn create(dir: &Path) -> anyhow::Result<Self> {
        std::fs::create_dir_all(dir).map_err(|e| {
            anyhow::anyhow!("Failed to create notes directory {}: {}", dir.display(), e)
        })?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    /// Open an existing notes directory.
    pub fn open(dir: &Path) -> anyhow::Result<Self> {
        if !dir.is_dir() {
            return Err(CliError::not_found(
                format!("No notes directory at {}", dir.display()),
                "Run:\n  securenotes init",
            )
            .into());
        }
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, id: &Uuid) -> PathBuf {
        self.dir.join(format!("{}.{}", id, RECORD_EXTENSION))
    }

    fn staged_path(&self, id: &Uuid) -> PathBuf {
        self.dir.join(format!("{}.{}.{}", id, RECORD_EXTENSION, STAGED_SUFFIX))
    }

    fn image_path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// All records, most recently updated first.
    pub fn list(&self) -> anyhow::Result<Vec<NoteRecord>> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| {
            anyhow::anyhow!("Failed to read notes directory {}: {}", self.dir.display(), e)
        })?;

        let mut records = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            records.push(read_record(&path)?);
        }
        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(records)
    }

    /// Find a record by full UUID or unique prefix.
    pub fn find(&self, id: &str) -> anyhow::Result<NoteRecord> {
        if let Ok(parsed) = Uuid::parse_str(id) {
            let path = self.record_path(&parsed);
            if path.exists() {
                return read_record(&path);
            }
            return Err(note_not_found(id));
        }

        let prefix = id.to_ascii_lowercase();
        let mut matches: Vec<NoteRecord> = self
            .list()?
            .into_iter()
            .filter(|record| record.id.to_string().starts_with(&prefix))
            .collect();
        match matches.len() {
            0 => Err(note_not_found(id)),
            1 => Ok(matches.remove(0)),
            n => Err(CliError::invalid_input(format!(
                "Note ID prefix \"{}\" is ambiguous ({} matches)",
                id, n
            ))
            .into()),
        }
    }

    /// Read the companion image file of a record, if it has one.
    pub fn read_image(&self, record: &NoteRecord) -> anyhow::Result<Option<Vec<u8>>> {
        let Some(file_name) = record.image_file.as_deref() else {
            return Ok(None);
        };
        let path = self.image_path(file_name);
        let bytes = std::fs::read(&path)
            .map_err(|e| anyhow::anyhow!("Failed to read image {}: {}", path.display(), e))?;
        Ok(Some(bytes))
    }

    /// Write a record and, when given, its image bytes.
    ///
    /// Either the new record and image both become visible or neither does.
    pub fn save(&self, record: &mut NoteRecord, image: Option<&[u8]>) -> anyhow::Result<()> {
        let staged = self.stage(record, image)?;
        self.commit(vec![staged])
    }

    /// Write a record and its image to staging paths.
    ///
    /// The image goes to a new file name; the record's `image_file` is
    /// updated to point at it. On error nothing is left behind.
    pub fn stage(
        &self,
        record: &mut NoteRecord,
        image: Option<&[u8]>,
    ) -> anyhow::Result<StagedNote> {
        let mut staged = StagedNote {
            staged_path: self.staged_path(&record.id),
            record_path: self.record_path(&record.id),
            new_image: None,
            old_image: None,
        };

        if let Some(bytes) = image {
            let file_name = format!(
                "{}-{}.{}",
                record.id,
                Uuid::new_v4().simple(),
                IMAGE_EXTENSION
            );
            let path = self.image_path(&file_name);
            write_atomic(&path, bytes)
                .map_err(|e| anyhow::anyhow!("Failed to write image {}: {}", path.display(), e))?;
            staged.new_image = Some(path);
            staged.old_image = record
                .image_file
                .replace(file_name)
                .map(|old| self.image_path(&old));
        }

        let written = serde_json::to_vec_pretty(record)
            .map_err(anyhow::Error::from)
            .and_then(|contents| {
                write_atomic(&staged.staged_path, &contents).map_err(|e| {
                    anyhow::anyhow!("Failed to write note {}: {}", record.id, e)
                })
            });
        if let Err(err) = written {
            staged.discard();
            return Err(err);
        }
        Ok(staged)
    }

    /// Move staged records into place, then remove the images they replaced.
    pub fn commit(&self, staged: Vec<StagedNote>) -> anyhow::Result<()> {
        let mut replaced = Vec::new();
        for note in staged {
            rename_with_fallback(&note.staged_path, &note.record_path).map_err(|e| {
                anyhow::anyhow!("Failed to write note {}: {}", note.record_path.display(), e)
            })?;
            tracing::debug!(path = %note.record_path.display(), "saved note");
            replaced.extend(note.old_image);
        }
        for path in replaced {
            if let Err(e) = std::fs::remove_file(&path) {
                tracing::warn!(path = %path.display(), error = %e, "could not remove old image");
            }
        }
        Ok(())
    }

    /// Delete a record file.
    pub fn remove(&self, record: &NoteRecord) -> anyhow::Result<()> {
        let path = self.record_path(&record.id);
        std::fs::remove_file(&path)
            .map_err(|e| anyhow::anyhow!("Failed to remove note {}: {}", path.display(), e))
    }

    /// Delete the companion image file of a record, if any.
    pub fn remove_image(&self, record: &NoteRecord) -> anyhow::Result<()> {
        if let Some(file_name) = record.image_file.as_deref() {
            let path = self.image_path(file_name);
            match std::fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(anyhow::anyhow!(
                        "Failed to remove image {}: {}",
                        path.display(),
                        e
                    ))
                }
            }
        }
        Ok(())
    }
}

fn read_record(path: &Path) -> anyhow::Result<NoteRecord> {
    let contents = std::fs::read(path)
        .map_err(|e| anyhow::anyhow!("Failed to read note {}: {}", path.display(), e))?;
    serde_json::from_slice(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse note {}: {}", path.display(), e))
}

fn note_not_found(id: &str) -> anyhow::Error {
    CliError::not_found(
        format!("Note not found: {}", id),
        "Run `securenotes list` to see note IDs.",
    )
    .into()
}
