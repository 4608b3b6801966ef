use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use notes_core::crypto::{decode_salt, generate_salt};
use notes_core::{decrypt, decrypt_bytes, encrypt, encrypt_bytes, SealedNote};

struct TempFile {
    path: PathBuf,
}

impl TempFile {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be available")
            .as_nanos();
        let filename = format!("{}_{}_{}.img", prefix, std::process::id(), nanos);
        let path = std::env::temp_dir().join(filename);
        Self { path }
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

#[test]
fn test_image_file_round_trip() {
    let temp = TempFile::new("notes_image_round_trip");
    let pin = b"123456";
    let salt = generate_salt();
    let image: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();

    let encrypted = encrypt_bytes(&image, pin, &salt).expect("encryption should succeed");
    assert_eq!(encrypted.len(), 10_028);
    fs::write(&temp.path, &encrypted).expect("write should succeed");

    let on_disk = fs::read(&temp.path).expect("read should succeed");
    assert_ne!(on_disk[12..10_012], image[..]);

    let decrypted = decrypt_bytes(&on_disk, pin, &salt).expect("decryption should succeed");
    assert_eq!(decrypted, image);
}

#[test]
fn test_image_file_wrong_pin_fails() {
    let temp = TempFile::new("notes_image_wrong_pin");
    let salt = generate_salt();

    let encrypted = encrypt_bytes(b"not really a png", b"123456", &salt).unwrap();
    fs::write(&temp.path, &encrypted).unwrap();

    let on_disk = fs::read(&temp.path).unwrap();
    let result = decrypt_bytes(&on_disk, b"654321", &salt);
    assert!(result.unwrap_err().is_decryption_failure());
}

#[test]
fn test_stored_text_record_round_trip() {
    // Text column and salt column as an application would persist them.
    let payload = encrypt("Hello, World!", b"123456").unwrap();
    let stored_salt = payload.salt_base64();
    let stored_content = payload.encrypted_data.clone();

    let salt = decode_salt(&stored_salt).unwrap();
    assert_eq!(decrypt(&stored_content, &salt, b"123456").unwrap(), "Hello, World!");
    assert!(decrypt(&stored_content, &salt, b"000000").is_err());
}

#[test]
fn test_note_and_image_survive_storage() {
    let temp = TempFile::new("notes_sealed_note");
    let sealed = SealedNote::seal("holiday photo", Some(&[0xFFu8, 0xD8, 0xFF, 0xE0][..]), b"123456")
        .unwrap();
    fs::write(&temp.path, sealed.image.as_ref().unwrap()).unwrap();

    let reloaded = SealedNote::from_parts(
        sealed.salt,
        sealed.content.clone(),
        Some(fs::read(&temp.path).unwrap()),
    );
    let opened = reloaded.open(b"123456").unwrap();
    assert_eq!(opened.content(), "holiday photo");
    assert_eq!(opened.image(), Some(&[0xFFu8, 0xD8, 0xFF, 0xE0][..]));
}

#[test]
fn test_concurrent_encryption_is_independent() {
    let pin: Arc<[u8]> = Arc::from(&b"123456"[..]);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let pin = Arc::clone(&pin);
            thread::spawn(move || {
                let text = format!("note number {}", i);
                let payload = encrypt(&text, &pin).unwrap();
                let decrypted = decrypt(&payload.encrypted_data, &payload.salt, &pin).unwrap();
                assert_eq!(decrypted, text);
                payload
            })
        })
        .collect();

    let payloads: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for (i, a) in payloads.iter().enumerate() {
        for b in &payloads[i + 1..] {
            assert_ne!(a.salt, b.salt);
            assert_ne!(a.encrypted_data, b.encrypted_data);
        }
    }
}
