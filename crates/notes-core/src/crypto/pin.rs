//! PIN validation.
//!
//! The encryption primitives accept any non-empty byte sequence. This is the
//! gate applications put in front of them.

use crate::error::{NotesError, Result};

/// Required PIN length under [`PinPolicy::SixDigit`].
pub const PIN_DIGITS: usize = 6;

/// Which PINs an application accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinPolicy {
    /// Exactly six ASCII digits
    #[default]
    SixDigit,
    /// Any non-blank passphrase
    Any,
}

/// Validate a PIN against `policy`.
///
/// # Examples
///
/// ```
/// use notes_core::crypto::{validate_pin, PinPolicy};
///
/// assert!(validate_pin("123456", PinPolicy::SixDigit).is_ok());
/// assert!(validate_pin("12345", PinPolicy::SixDigit).is_err());
/// assert!(validate_pin("correct horse", PinPolicy::Any).is_ok());
/// ```
pub fn validate_pin(pin: &str, policy: PinPolicy) -> Result<()> {
    if pin.trim().is_empty() {
        return Err(NotesError::InvalidInput("PIN cannot be empty".to_string()));
    }

    match policy {
        PinPolicy::Any => Ok(()),
        PinPolicy::SixDigit => {
            if pin.len() != PIN_DIGITS || !pin.bytes().all(|b| b.is_ascii_digit()) {
                return Err(NotesError::InvalidInput(format!(
                    "PIN must be exactly {} digits",
                    PIN_DIGITS
                )));
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_digit_pins() {
        assert!(validate_pin("123456", PinPolicy::SixDigit).is_ok());
        assert!(validate_pin("000000", PinPolicy::SixDigit).is_ok());
    }

    #[test]
    fn test_six_digit_rejects_wrong_length() {
        let result = validate_pin("12345", PinPolicy::SixDigit);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("exactly 6 digits"));
        assert!(validate_pin("1234567", PinPolicy::SixDigit).is_err());
    }

    #[test]
    fn test_six_digit_rejects_non_digits() {
        assert!(validate_pin("12345a", PinPolicy::SixDigit).is_err());
        assert!(validate_pin("12 456", PinPolicy::SixDigit).is_err());
        // Non-ASCII digits are not accepted either.
        assert!(validate_pin("١٢٣٤٥٦", PinPolicy::SixDigit).is_err());
    }

    #[test]
    fn test_empty_rejected_for_every_policy() {
        assert!(validate_pin("", PinPolicy::SixDigit).is_err());
        assert!(validate_pin("", PinPolicy::Any).is_err());
        assert!(validate_pin("  \t", PinPolicy::Any).is_err());
    }

    #[test]
    fn test_any_policy_accepts_passphrases() {
        assert!(validate_pin("a longer passphrase", PinPolicy::Any).is_ok());
        assert!(validate_pin("1", PinPolicy::Any).is_ok());
    }
}
