use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use notes_core::VERSION;

use crate::config::PinPolicySetting;

/// SecureNotes - PIN-protected notes with encrypted image attachments
#[derive(Parser)]
#[command(name = "securenotes")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the notes directory
    #[arg(short = 'd', long, global = true, env = "NOTES_DIR")]
    pub notes_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create the config file and notes directory
    Init(InitArgs),

    /// Add a new note (encrypted unless --plain)
    Add(AddArgs),

    /// List notes without decrypting them
    List(ListArgs),

    /// Decrypt and show a note
    Show(ShowArgs),

    /// Replace the text of a note
    Edit(EditArgs),

    /// Scrub and remove a note and its image
    Delete(DeleteArgs),

    /// Re-encrypt every encrypted note under a new PIN
    Rekey,

    /// Encrypt text and print the salt and payload as JSON
    Encrypt(EncryptArgs),

    /// Decrypt a payload produced by `encrypt`
    Decrypt(DecryptArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Notes directory to create (defaults to the XDG data dir)
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Which PINs are accepted for new notes
    #[arg(long, value_enum, default_value_t = PinPolicySetting::SixDigit)]
    pub pin_policy: PinPolicySetting,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    /// Note title
    #[arg(short, long)]
    pub title: String,

    /// Note body (read from stdin when omitted)
    #[arg(long)]
    pub body: Option<String>,

    /// Image file to attach
    #[arg(long, value_name = "FILE")]
    pub image: Option<String>,

    /// Store the note unencrypted
    #[arg(long)]
    pub plain: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    /// Note ID (full UUID or prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Write the decrypted image to this file
    #[arg(long, value_name = "FILE")]
    pub image_out: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `edit` command
#[derive(Args)]
pub struct EditArgs {
    /// Note ID (full UUID or prefix)
    #[arg(value_name = "ID")]
    pub id: String,

    /// New note body (read from stdin when omitted)
    #[arg(long)]
    pub body: Option<String>,
}

/// Arguments for the `delete` command
#[derive(Args)]
pub struct DeleteArgs {
    /// Note ID (full UUID or prefix)
    #[arg(value_name = "ID")]
    pub id: String,
}

/// Arguments for the `encrypt` command
#[derive(Args)]
pub struct EncryptArgs {
    /// Text to encrypt (read from stdin when omitted)
    #[arg(long)]
    pub text: Option<String>,
}

/// Arguments for the `decrypt` command
#[derive(Args)]
pub struct DecryptArgs {
    /// Base64 salt printed by `encrypt`
    #[arg(long)]
    pub salt: String,

    /// Base64 payload (read from stdin when omitted)
    #[arg(long)]
    pub data: Option<String>,
}
