//! Resolution of config, notes directory and PIN policy for a command.

use std::path::PathBuf;

use notes_core::crypto::PinPolicy;

use crate::cli::Cli;
use crate::config::{default_config_path, read_config, NotesConfig};
use crate::errors::CliError;
use crate::store::NoteStore;

/// Settings every note command runs with.
pub struct AppContext {
    pub notes_dir: PathBuf,
    pub pin_policy: PinPolicy,
    pub quiet: bool,
}

impl AppContext {
    /// Resolve from `--notes-dir`/`NOTES_DIR` and the config file.
    ///
    /// The flag wins over the config's path; the PIN policy always comes from
    /// the config when one exists.
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let config_path = resolve_config_path()?;
        let config = if config_path.exists() {
            Some(read_config(&config_path)?)
        } else {
            None
        };

        let notes_dir = match (&cli.notes_dir, &config) {
            (Some(dir), _) => PathBuf::from(dir),
            (None, Some(config)) => PathBuf::from(&config.notes.path),
            (None, None) => {
                return Err(CliError::not_found(
                    format!("No config found at {}", config_path.display()),
                    "Run:\n  securenotes init\n\nOr point at a notes directory:\n  NOTES_DIR=/path/to/notes securenotes list",
                )
                .into())
            }
        };

        let pin_policy = policy_from(config.as_ref());

        Ok(Self {
            notes_dir,
            pin_policy,
            quiet: cli.quiet,
        })
    }

    pub fn store(&self) -> anyhow::Result<NoteStore> {
        NoteStore::open(&self.notes_dir)
    }
}

/// PIN policy from the config file, or the default when there is none.
///
/// For commands that encrypt without needing a notes directory.
pub fn configured_pin_policy() -> anyhow::Result<PinPolicy> {
    let config_path = resolve_config_path()?;
    if !config_path.exists() {
        return Ok(PinPolicy::default());
    }
    Ok(policy_from(Some(&read_config(&config_path)?)))
}

fn policy_from(config: Option<&NotesConfig>) -> PinPolicy {
    config
        .map(|config| PinPolicy::from(config.security.pin_policy))
        .unwrap_or_default()
}

/// Resolve the config file path, checking NOTES_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("NOTES_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}
