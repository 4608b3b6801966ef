//! JSON output formatting.

use notes_core::EncryptedPayload;

use crate::store::NoteRecord;

/// Summary of a note for `list --json`. Never includes content.
pub fn record_summary_json(record: &NoteRecord) -> serde_json::Value {
    serde_json::json!({
        "id": record.id,
        "title": record.title,
        "is_encrypted": record.is_encrypted,
        "has_image": record.image_file.is_some(),
        "updated_at": record.updated_at,
    })
}

/// A note with its (decrypted) text for `show --json`.
pub fn record_json(record: &NoteRecord, content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": record.id,
        "title": record.title,
        "is_encrypted": record.is_encrypted,
        "has_image": record.image_file.is_some(),
        "updated_at": record.updated_at,
        "content": content,
    })
}

/// Salt and payload printed by `encrypt`.
pub fn payload_json(payload: &EncryptedPayload) -> serde_json::Value {
    serde_json::json!({
        "salt": payload.salt_base64(),
        "encrypted_data": payload.encrypted_data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_omits_content() {
        let record = NoteRecord::plain("Title".into(), "body text".into());
        let value = record_summary_json(&record);

        assert_eq!(value["title"], "Title");
        assert_eq!(value["is_encrypted"], false);
        assert!(value.get("content").is_none());
    }

    #[test]
    fn test_payload_json_fields() {
        let payload = notes_core::encrypt("hi", b"123456").unwrap();
        let value = payload_json(&payload);

        assert_eq!(value["salt"], payload.salt_base64());
        assert_eq!(value["encrypted_data"], payload.encrypted_data);
    }
}
