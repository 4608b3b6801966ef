use std::path::PathBuf;

use crate::app::resolve_config_path;
use crate::cli::{Cli, InitArgs};
use crate::config::{default_notes_path, write_config, NotesConfig};
use crate::errors::CliError;
use crate::store::NoteStore;

pub fn handle_init(cli: &Cli, args: &InitArgs) -> anyhow::Result<()> {
    let config_path = resolve_config_path()?;
    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {}\nUse --force to overwrite it.",
            config_path.display()
        ))
        .into());
    }

    let notes_dir = match args.path.clone().or_else(|| cli.notes_dir.clone()) {
        Some(path) => PathBuf::from(path),
        None => default_notes_path()?,
    };

    let store = NoteStore::create(&notes_dir)?;
    write_config(&config_path, &NotesConfig::new(notes_dir, args.pin_policy))?;

    if !cli.quiet {
        println!("Initialized notes directory at {}", store.dir().display());
        println!("Config written to {}", config_path.display());
    }
    Ok(())
}
