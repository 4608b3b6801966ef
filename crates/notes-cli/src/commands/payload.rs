use secrecy::ExposeSecret;

use notes_core::crypto::decode_salt;
use notes_core::{decrypt, encrypt};

use super::read_text_arg;
use crate::app::configured_pin_policy;
use crate::cli::{DecryptArgs, EncryptArgs};
use crate::errors::core_error;
use crate::output::payload_json;
use crate::pin::{read_new_pin, read_pin, PIN_ENV};

/// Encrypt standalone text. Needs no notes directory.
///
/// The PIN is held to the configured policy, as for `add`.
pub fn handle_encrypt(args: &EncryptArgs) -> anyhow::Result<()> {
    let text = read_text_arg(args.text.clone(), "text")?;
    let pin = read_new_pin(PIN_ENV, "PIN", configured_pin_policy()?)?;

    let payload = encrypt(text.as_str(), pin.expose_secret().as_bytes()).map_err(core_error)?;
    println!("{}", serde_json::to_string_pretty(&payload_json(&payload))?);
    Ok(())
}

/// Decrypt a payload printed by `encrypt`.
pub fn handle_decrypt(args: &DecryptArgs) -> anyhow::Result<()> {
    let salt = decode_salt(&args.salt).map_err(core_error)?;
    let data = read_text_arg(args.data.clone(), "data")?;
    let pin = read_pin()?;

    let text = decrypt(data.as_str(), &salt, pin.expose_secret().as_bytes()).map_err(core_error)?;
    println!("{}", text);
    Ok(())
}
