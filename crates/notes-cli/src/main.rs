//! SecureNotes CLI - PIN-protected notes with encrypted image attachments
//!
//! This is the command-line interface for SecureNotes. Notes live as one JSON
//! file each in a notes directory; all cryptography is delegated to
//! `notes-core`.

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod fs;
mod output;
mod pin;
mod store;

use app::AppContext;
use cli::{Cli, Commands};
use errors::CliError;

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        if let Some(cli_err) = err.downcast_ref::<CliError>() {
            cli_err.exit();
        }
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Init(args) => commands::handle_init(cli, args),
        Commands::Encrypt(args) => commands::handle_encrypt(args),
        Commands::Decrypt(args) => commands::handle_decrypt(args),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "securenotes", &mut std::io::stdout());
            Ok(())
        }
        Commands::Add(args) => commands::handle_add(&AppContext::load(cli)?, args),
        Commands::List(args) => commands::handle_list(&AppContext::load(cli)?, args),
        Commands::Show(args) => commands::handle_show(&AppContext::load(cli)?, args),
        Commands::Edit(args) => commands::handle_edit(&AppContext::load(cli)?, args),
        Commands::Delete(args) => commands::handle_delete(&AppContext::load(cli)?, args),
        Commands::Rekey => commands::handle_rekey(&AppContext::load(cli)?),
    }
}

/// Log to stderr, filtered by `NOTES_LOG` (default `warn`).
fn init_logging() {
    let filter = EnvFilter::try_from_env("NOTES_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
