//! PIN input: environment variable first, then a hidden prompt.

use std::io::IsTerminal;

use dialoguer::Password;
use notes_core::crypto::{validate_pin, PinPolicy};
use secrecy::{ExposeSecret, SecretString};

use crate::errors::core_error;

/// Environment variable holding the current PIN.
pub const PIN_ENV: &str = "NOTES_PIN";

/// Environment variable holding the replacement PIN for `rekey`.
pub const NEW_PIN_ENV: &str = "NOTES_NEW_PIN";

/// Read the PIN used to open existing notes.
///
/// Not checked against the policy: a PIN that cannot be right fails the same
/// way a wrong one does.
pub fn read_pin() -> anyhow::Result<SecretString> {
    read_from_env_or_prompt(PIN_ENV, "PIN", false)
}

/// Read a PIN that will encrypt new data, and check it against `policy`.
pub fn read_new_pin(
    env_var: &str,
    prompt: &str,
    policy: PinPolicy,
) -> anyhow::Result<SecretString> {
    let pin = read_from_env_or_prompt(env_var, prompt, true)?;
    validate_pin(pin.expose_secret(), policy).map_err(core_error)?;
    Ok(pin)
}

fn read_from_env_or_prompt(
    env_var: &str,
    prompt: &str,
    confirm: bool,
) -> anyhow::Result<SecretString> {
    if let Ok(value) = std::env::var(env_var) {
        if !value.trim().is_empty() {
            return Ok(SecretString::from(value));
        }
    }
    if !std::io::stdin().is_terminal() {
        return Err(anyhow::anyhow!(
            "No PIN provided and no TTY available. Set {}.",
            env_var
        ));
    }

    let mut password = Password::new().with_prompt(prompt);
    if confirm {
        password = password.with_confirmation("Confirm PIN", "PINs do not match");
    }
    let value = password
        .interact()
        .map_err(|e| anyhow::anyhow!("Failed to read PIN: {}", e))?;
    Ok(SecretString::from(value))
}
