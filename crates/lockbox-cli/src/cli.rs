use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use lockbox_core::VERSION;

/// Lockbox - password-locked files and notes in an untrusted record store
#[derive(Parser)]
#[command(name = "lockbox")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the record store (SQLite file)
    #[arg(short, long, global = true, env = "LOCKBOX_STORE")]
    pub store: Option<String>,

    /// Path to the config file
    #[arg(long, global = true, env = "LOCKBOX_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Path where the record store will be created
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Default log filter written to the config (e.g. "info")
    #[arg(long)]
    pub log_filter: Option<String>,

    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `lock-file` command
#[derive(Args)]
pub struct LockFileArgs {
    /// File to encrypt
    #[arg(value_name = "PATH")]
    pub path: String,

    /// Plaintext display label stored next to the ciphertext
    #[arg(long)]
    pub label: Option<String>,

    /// MIME type (guessed from the extension if omitted)
    #[arg(long)]
    pub mime_type: Option<String>,

    /// Do not store the original filename
    #[arg(long)]
    pub no_name: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `unlock-file` command
#[derive(Args)]
pub struct UnlockFileArgs {
    /// Record ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Where to write the decrypted file (defaults to the original name)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<String>,

    /// Overwrite the output file if it exists
    #[arg(long)]
    pub force: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Note subcommands
#[derive(Subcommand)]
pub enum NoteSubcommand {
    /// Lock a new note
    New(NoteNewArgs),

    /// Unlock and print a note
    Show(NoteShowArgs),

    /// Unlock, edit and re-lock a note
    Edit(NoteEditArgs),
}

/// Arguments for `note new`
#[derive(Args)]
pub struct NoteNewArgs {
    /// Note title
    #[arg(long)]
    pub title: String,

    /// Note content (overrides stdin/editor)
    #[arg(long)]
    pub content: Option<String>,

    /// Plaintext display label
    #[arg(long)]
    pub label: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for `note show`
#[derive(Args)]
pub struct NoteShowArgs {
    /// Record ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for `note edit`
#[derive(Args)]
pub struct NoteEditArgs {
    /// Record ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Replace the title
    #[arg(long)]
    pub title: Option<String>,

    /// Replace the content (overrides stdin/editor)
    #[arg(long)]
    pub content: Option<String>,

    /// Disable interactive prompts
    #[arg(long)]
    pub no_input: bool,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `inspect` command
#[derive(Args)]
pub struct InspectArgs {
    /// Record ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Print the stored wire form
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a config file and create the record store
    Init(InitArgs),

    /// Encrypt a file into the store
    LockFile(LockFileArgs),

    /// Decrypt a stored file
    UnlockFile(UnlockFileArgs),

    /// Work with locked notes
    Note {
        #[command(subcommand)]
        command: NoteSubcommand,
    },

    /// List stored records
    List(ListArgs),

    /// Show the public parameters of a record (never decrypts)
    Inspect(InspectArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_name = "SHELL")]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_note_new() {
        let cli = Cli::try_parse_from([
            "lockbox", "note", "new", "--title", "Meeting notes", "--content", "Q3",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Note {
                command: NoteSubcommand::New(args),
            }) => {
                assert_eq!(args.title, "Meeting notes");
                assert_eq!(args.content.as_deref(), Some("Q3"));
            }
            _ => panic!("expected note new"),
        }
    }

    #[test]
    fn test_parse_global_store() {
        let cli = Cli::try_parse_from(["lockbox", "list", "--store", "/tmp/x.db"]).unwrap();
        assert_eq!(cli.store.as_deref(), Some("/tmp/x.db"));
    }
}
