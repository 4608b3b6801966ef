use std::path::{Path, PathBuf};

use clap::ValueEnum;
use notes_core::crypto::PinPolicy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct NotesConfig {
    pub notes: NotesSection,
    #[serde(default)]
    pub security: SecuritySection,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NotesSection {
    pub path: String,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct SecuritySection {
    #[serde(default)]
    pub pin_policy: PinPolicySetting,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum PinPolicySetting {
    /// Exactly six digits
    #[default]
    SixDigit,
    /// Any non-blank passphrase
    Any,
}

impl From<PinPolicySetting> for PinPolicy {
    fn from(setting: PinPolicySetting) -> Self {
        match setting {
            PinPolicySetting::SixDigit => PinPolicy::SixDigit,
            PinPolicySetting::Any => PinPolicy::Any,
        }
    }
}

impl NotesConfig {
    pub fn new(notes_path: PathBuf, pin_policy: PinPolicySetting) -> Self {
        Self {
            notes: NotesSection {
                path: notes_path.to_string_lossy().to_string(),
            },
            security: SecuritySection { pin_policy },
        }
    }
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_config_dir()?.join("config.toml"))
}

pub fn default_notes_path() -> anyhow::Result<PathBuf> {
    Ok(xdg_data_dir()?.join("notes"))
}

pub fn read_config(path: &Path) -> anyhow::Result<NotesConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config {}: {}", path.display(), e))?;
    toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config {}: {}", path.display(), e))
}

pub fn write_config(path: &Path, config: &NotesConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create config directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }
    let contents =
        toml::to_string_pretty(config).map_err(|e| anyhow::anyhow!("TOML error: {}", e))?;
    std::fs::write(path, contents)
        .map_err(|e| anyhow::anyhow!("Failed to write config {}: {}", path.display(), e))?;
    Ok(())
}

pub fn xdg_config_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_CONFIG_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("securenotes"));
        }
    }
    Ok(home_dir()?.join(".config").join("securenotes"))
}

pub fn xdg_data_dir() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("XDG_DATA_HOME") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value).join("securenotes"));
        }
    }
    Ok(home_dir()?.join(".local").join("share").join("securenotes"))
}

fn home_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .map_err(|_| anyhow::anyhow!("HOME is not set; cannot resolve default paths"))?;
    Ok(PathBuf::from(home))
}
