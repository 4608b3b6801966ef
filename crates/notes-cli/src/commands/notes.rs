use secrecy::ExposeSecret;
use zeroize::Zeroizing;

use notes_core::SealedNote;

use super::read_text_arg;
use crate::app::AppContext;
use crate::cli::{AddArgs, DeleteArgs, EditArgs, ListArgs, ShowArgs};
use crate::errors::{core_error, CliError};
use crate::fs::write_atomic;
use crate::output::{record_json, record_summary_json};
use crate::pin::{read_new_pin, read_pin, PIN_ENV};
use crate::store::{NoteRecord, NoteStore};

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let body = read_text_arg(args.body.clone(), "body")?;
    let image = match args.image.as_deref() {
        Some(path) => Some(Zeroizing::new(std::fs::read(path).map_err(|e| {
            anyhow::anyhow!("Failed to read image {}: {}", path, e)
        })?)),
        None => None,
    };

    let record = if args.plain {
        let mut record = NoteRecord::plain(args.title.clone(), body.to_string());
        store.save(&mut record, image.as_deref().map(Vec::as_slice))?;
        record
    } else {
        let pin = read_new_pin(PIN_ENV, "PIN", ctx.pin_policy)?;
        let sealed = SealedNote::seal(
            body.as_str(),
            image.as_deref().map(Vec::as_slice),
            pin.expose_secret().as_bytes(),
        )
        .map_err(core_error)?;
        let mut record = NoteRecord::encrypted(args.title.clone(), &sealed);
        store.save(&mut record, sealed.image.as_deref())?;
        record
    };

    if !ctx.quiet {
        println!("Added note {}", record.id);
    }
    Ok(())
}

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let records = store.list()?;

    if args.json {
        let values: Vec<_> = records.iter().map(record_summary_json).collect();
        println!("{}", serde_json::to_string_pretty(&values)?);
        return Ok(());
    }

    if !ctx.quiet {
        println!("ID | UPDATED_AT | LOCKED | TITLE");
    }
    for record in records {
        let locked = if record.is_encrypted { "yes" } else { "no" };
        println!(
            "{} | {} | {} | {}",
            record.id,
            record.updated_at.format("%Y-%m-%d %H:%M"),
            locked,
            record.title
        );
    }
    Ok(())
}

pub fn handle_show(ctx: &AppContext, args: &ShowArgs) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let record = store.find(&args.id)?;

    let (content, image) = if record.is_encrypted {
        let pin = read_pin()?;
        let opened = open_record(&store, &record, pin.expose_secret().as_bytes())?;
        (
            Zeroizing::new(opened.content().to_string()),
            opened.image().map(|bytes| Zeroizing::new(bytes.to_vec())),
        )
    } else {
        (
            Zeroizing::new(record.content.clone()),
            store.read_image(&record)?.map(Zeroizing::new),
        )
    };

    if let Some(path) = args.image_out.as_deref() {
        let bytes = image
            .as_ref()
            .ok_or_else(|| CliError::invalid_input(format!("Note {} has no image", record.id)))?;
        write_atomic(std::path::Path::new(path), bytes.as_slice())
            .map_err(|e| anyhow::anyhow!("Failed to write image {}: {}", path, e))?;
        if !ctx.quiet {
            eprintln!("Image written to {}", path);
        }
    }

    if args.json {
        let value = record_json(&record, content.as_str());
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        if !ctx.quiet {
            println!("# {}", record.title);
        }
        println!("{}", content.as_str());
    }
    Ok(())
}

pub fn handle_edit(ctx: &AppContext, args: &EditArgs) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let mut record = store.find(&args.id)?;
    let body = read_text_arg(args.body.clone(), "body")?;

    if record.is_encrypted {
        let pin = read_pin()?;
        let pin = pin.expose_secret().as_bytes();
        let image = store.read_image(&record)?;
        // New salt: the image must be re-encrypted along with the text.
        let resealed = record
            .to_sealed(image)?
            .reseal(pin, Some(body.as_str()), pin)
            .map_err(core_error)?;
        record.apply_sealed(&resealed);
        store.save(&mut record, resealed.image.as_deref())?;
    } else {
        record.content = body.to_string();
        record.updated_at = chrono::Utc::now();
        store.save(&mut record, None)?;
    }

    if !ctx.quiet {
        println!("Updated note {}", record.id);
    }
    Ok(())
}

pub fn handle_delete(ctx: &AppContext, args: &DeleteArgs) -> anyhow::Result<()> {
    let store = ctx.store()?;
    let mut record = store.find(&args.id)?;

    // Scrubbed record is written over the old one before it is unlinked.
    store.remove_image(&record)?;
    record.scrub();
    store.save(&mut record, None)?;
    store.remove(&record)?;

    if !ctx.quiet {
        println!("Deleted note {}", record.id);
    }
    Ok(())
}

fn open_record(
    store: &NoteStore,
    record: &NoteRecord,
    pin: &[u8],
) -> anyhow::Result<notes_core::OpenedNote> {
    let image = store.read_image(record)?;
    record.to_sealed(image)?.open(pin).map_err(core_error)
}
