//! Batch re-keying of sealed notes when the PIN changes.
//!
//! Each note has its own salt, so every note is an independent job. Jobs run
//! on the rayon pool; results come back in input order.

use rayon::prelude::*;

use crate::error::Result;
use crate::note::SealedNote;

/// Re-seal every note under `new_pin`.
///
/// A note that fails to open with `old_pin` yields an error in its slot and
/// does not affect the others.
pub fn rekey_all(notes: &[SealedNote], old_pin: &[u8], new_pin: &[u8]) -> Vec<Result<SealedNote>> {
    tracing::debug!(count = notes.len(), "re-keying notes");
    notes
        .par_iter()
        .map(|note| note.reseal(old_pin, None, new_pin))
        .collect()
}

/// Outcome counts of a [`rekey_all`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RekeySummary {
    /// Notes re-sealed under the new PIN
    pub rekeyed: usize,
    /// Notes that did not open with the old PIN
    pub failed: usize,
}

impl RekeySummary {
    /// Count the successes and failures of a batch.
    pub fn from_results<T>(results: &[Result<T>]) -> Self {
        let rekeyed = results.iter().filter(|result| result.is_ok()).count();
        Self {
            rekeyed,
            failed: results.len() - rekeyed,
        }
    }

    /// True when every note was re-keyed.
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OLD_PIN: &[u8] = b"111111";
    const NEW_PIN: &[u8] = b"222222";

    #[test]
    fn test_rekey_preserves_order_and_content() {
        let notes: Vec<SealedNote> = (0..4)
            .map(|i| SealedNote::seal(&format!("note {}", i), None, OLD_PIN).unwrap())
            .collect();

        let results = rekey_all(&notes, OLD_PIN, NEW_PIN);
        assert_eq!(results.len(), 4);

        for (i, result) in results.into_iter().enumerate() {
            let rekeyed = result.unwrap();
            assert!(rekeyed.open(OLD_PIN).is_err());
            assert_eq!(rekeyed.open(NEW_PIN).unwrap().content(), format!("note {}", i));
        }
    }

    #[test]
    fn test_rekey_isolates_failures() {
        let good = SealedNote::seal("good", Some(&b"img"[..]), OLD_PIN).unwrap();
        let foreign = SealedNote::seal("foreign", None, b"999999").unwrap();

        let results = rekey_all(&[good, foreign], OLD_PIN, NEW_PIN);

        assert!(results[0].is_ok());
        assert!(results[1].as_ref().unwrap_err().is_decryption_failure());

        let summary = RekeySummary::from_results(&results);
        assert_eq!(
            summary,
            RekeySummary {
                rekeyed: 1,
                failed: 1
            }
        );
        assert!(!summary.is_complete());
    }

    #[test]
    fn test_rekey_empty() {
        let results = rekey_all(&[], OLD_PIN, NEW_PIN);
        assert!(results.is_empty());
        assert!(RekeySummary::from_results(&results).is_complete());
    }
}
