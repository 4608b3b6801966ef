use secrecy::ExposeSecret;

use notes_core::{rekey_all, RekeySummary, SealedNote};

use crate::app::AppContext;
use crate::errors::{core_error, CliError};
use crate::pin::{read_new_pin, read_pin, NEW_PIN_ENV};
use crate::store::{NoteRecord, StagedNote};

/// Re-encrypt every encrypted note under a new PIN.
///
/// All notes are re-keyed in memory first; nothing is written unless every
/// one of them opened with the current PIN. New files are staged for every
/// note before any of them is moved into place, so a failed write leaves the
/// store entirely under the old PIN.
pub fn handle_rekey(ctx: &AppContext) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let mut records: Vec<NoteRecord> = store
        .list()?
        .into_iter()
        .filter(|record| record.is_encrypted)
        .collect();

    if records.is_empty() {
        if !ctx.quiet {
            println!("No encrypted notes to re-key");
        }
        return Ok(());
    }

    let old_pin = read_pin()?;
    let new_pin = read_new_pin(NEW_PIN_ENV, "New PIN", ctx.pin_policy)?;

    let sealed = records
        .iter()
        .map(|record| {
            let image = store.read_image(record)?;
            record.to_sealed(image)
        })
        .collect::<anyhow::Result<Vec<SealedNote>>>()?;

    let results = rekey_all(
        &sealed,
        old_pin.expose_secret().as_bytes(),
        new_pin.expose_secret().as_bytes(),
    );
    let summary = RekeySummary::from_results(&results);
    tracing::debug!(rekeyed = summary.rekeyed, failed = summary.failed, "re-key finished");

    if !summary.is_complete() {
        if summary.rekeyed == 0 {
            return Err(CliError::auth_failed_with_hint(
                crate::constants::INCORRECT_PIN,
                "No notes were changed.",
            )
            .into());
        }
        return Err(CliError::auth_failed_with_hint(
            format!(
                "{} of {} notes did not open with the current PIN",
                summary.failed,
                results.len()
            ),
            "No notes were changed.",
        )
        .into());
    }

    let mut staged = Vec::with_capacity(records.len());
    for (record, result) in records.iter_mut().zip(results) {
        let written = result.map_err(core_error).and_then(|resealed| {
            record.apply_sealed(&resealed);
            store.stage(record, resealed.image.as_deref())
        });
        match written {
            Ok(note) => staged.push(note),
            Err(err) => {
                staged.into_iter().for_each(StagedNote::discard);
                return Err(err.context("No notes were changed"));
            }
        }
    }
    store.commit(staged)?;

    if !ctx.quiet {
        println!("Re-keyed {} notes", summary.rekeyed);
    }
    Ok(())
}
