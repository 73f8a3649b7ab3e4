//! Lockbox CLI - password-locked files and notes in an untrusted record store
//!
//! This is the command-line interface for Lockbox. Records are encrypted
//! before they reach the store; the store only ever sees ciphertext and
//! public parameters.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod logging;

use clap::Parser;
use lockbox_core::VERSION;

use crate::app::AppContext;
use crate::cli::{Cli, Commands, NoteSubcommand};
use crate::commands::{files, init, misc, notes, records};
use crate::errors::exit_code_for;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let ctx = AppContext::new(&cli);
    logging::init(ctx.log_filter().as_deref());

    if let Err(e) = run(&ctx, &cli).await {
        let error_msg = format!("{}", e);
        eprintln!("Error: {}", error_msg);
        if let Some(hint) = extract_error_hint(&error_msg) {
            eprintln!("{}", hint);
        }
        std::process::exit(exit_code_for(&e));
    }
}

/// Provide a hint for common error messages that do not carry one.
fn extract_error_hint(error: &str) -> Option<String> {
    if error.contains("\nHint:") {
        // Already printed as part of the message.
        return None;
    }

    let error_lower = error.to_lowercase();

    if error_lower.contains("record") && error_lower.contains("not found") {
        return Some("Hint: Run `lockbox list` to find record IDs.".to_string());
    }

    if error_lower.contains("invalid record id") {
        return Some(
            "Hint: Record IDs are UUIDs (e.g., 7a2e3c0b-1234-5678-9abc-def012345678).".to_string(),
        );
    }

    if error_lower.contains("incorrect password") {
        return Some("Hint: Set LOCKBOX_PASSWORD or enter the password when prompted.".to_string());
    }

    if error_lower.contains("tampered") {
        return Some(
            "Hint: The password matched but the ciphertext did not. Restore the record from a backup."
                .to_string(),
        );
    }

    None
}

async fn run(ctx: &AppContext<'_>, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Init(args)) => {
            init::handle_init(ctx, args)?;
        }
        Some(Commands::LockFile(args)) => {
            files::handle_lock_file(ctx, args).await?;
        }
        Some(Commands::UnlockFile(args)) => {
            files::handle_unlock_file(ctx, args).await?;
        }
        Some(Commands::Note { command }) => match command {
            NoteSubcommand::New(args) => {
                notes::handle_new(ctx, args).await?;
            }
            NoteSubcommand::Show(args) => {
                notes::handle_show(ctx, args).await?;
            }
            NoteSubcommand::Edit(args) => {
                notes::handle_edit(ctx, args).await?;
            }
        },
        Some(Commands::List(args)) => {
            records::handle_list(ctx, args).await?;
        }
        Some(Commands::Inspect(args)) => {
            records::handle_inspect(ctx, args).await?;
        }
        Some(Commands::Completions { shell }) => {
            misc::handle_completions(*shell)?;
        }
        None => {
            println!("Lockbox v{}", VERSION);
            println!("\nQuickstart:");
            println!("  lockbox init");
            println!("  lockbox lock-file report.csv");
            println!("  lockbox note new --title \"Ideas\" --content \"...\"");
            println!("  lockbox list");
            println!("\nRun `lockbox --help` for full usage.");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_for_missing_record() {
        let hint = extract_error_hint("Not found: Record 7a2e not found").unwrap();
        assert!(hint.contains("lockbox list"));
    }

    #[test]
    fn test_no_hint_when_message_carries_one() {
        assert!(extract_error_hint("Too many failed password attempts.\nHint: x").is_none());
    }
}
