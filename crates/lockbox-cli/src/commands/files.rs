//! `lock-file` and `unlock-file`.

use std::path::{Path, PathBuf};

use lockbox_core::{DocumentSession, FilePlaintext, RecordId};

use crate::app::{unlock_with_retry, AppContext};
use crate::cli::{LockFileArgs, UnlockFileArgs};
use crate::constants::DEFAULT_FILE_LABEL;
use crate::errors::CliError;
use crate::helpers::{guess_mime_type, is_interactive, prompt_new_password};

pub async fn handle_lock_file(ctx: &AppContext<'_>, args: &LockFileArgs) -> anyhow::Result<()> {
    let path = Path::new(&args.path);
    let bytes =
        std::fs::read(path).map_err(|e| CliError::UnreadableInput(path.to_path_buf(), e))?;
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string);
    let mime_type = args
        .mime_type
        .clone()
        .unwrap_or_else(|| guess_mime_type(path).to_string());
    // The label is stored in the clear, so it never defaults to the file name.
    let label = args
        .label
        .clone()
        .unwrap_or_else(|| DEFAULT_FILE_LABEL.to_string());
    let stored_name = if args.no_name { None } else { file_name };

    let store = ctx.open_store()?;
    let password = prompt_new_password(is_interactive(args.no_input))?;

    let document = FilePlaintext::new(bytes, stored_name, mime_type);
    let mut session = DocumentSession::new(store, document);
    let id = session.lock(&password, &label).await?;

    if ctx.quiet() {
        println!("{}", id);
    } else {
        println!("Locked {} as {}", path.display(), id);
    }
    Ok(())
}

pub async fn handle_unlock_file(
    ctx: &AppContext<'_>,
    args: &UnlockFileArgs,
) -> anyhow::Result<()> {
    let id: RecordId = args.id.parse()?;
    let store = ctx.open_store()?;
    let mut session = DocumentSession::<FilePlaintext, _>::open(store, id).await?;
    unlock_with_retry(&mut session, is_interactive(args.no_input)).await?;

    let file = session
        .plaintext()
        .ok_or_else(|| anyhow::anyhow!("Record {} did not unlock", id))?;
    let output = output_path(args.output.as_deref(), file.file_name.as_deref(), &id);
    if output.exists() && !args.force {
        return Err(CliError::WouldOverwrite(output).into());
    }
    std::fs::write(&output, &file.bytes)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", output.display(), e))?;

    if ctx.quiet() {
        println!("{}", output.display());
    } else {
        println!(
            "Unlocked {} ({}, {} bytes) to {}",
            id,
            file.mime_type,
            file.bytes.len(),
            output.display()
        );
    }
    session.close()?;
    Ok(())
}

/// `--output`, else the decrypted original name, else the record ID.
///
/// Only the final component of a stored name is used.
fn output_path(output: Option<&str>, file_name: Option<&str>, id: &RecordId) -> PathBuf {
    if let Some(path) = output {
        return PathBuf::from(path);
    }
    file_name
        .and_then(|name| Path::new(name).file_name())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("{}.bin", id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_prefers_flag() {
        let id = RecordId::new();
        let path = output_path(Some("out.csv"), Some("report.csv"), &id);
        assert_eq!(path, PathBuf::from("out.csv"));
    }

    #[test]
    fn test_output_path_strips_directories_from_stored_name() {
        let id = RecordId::new();
        let path = output_path(None, Some("../../etc/passwd"), &id);
        assert_eq!(path, PathBuf::from("passwd"));
    }

    #[test]
    fn test_output_path_falls_back_to_id() {
        let id = RecordId::new();
        let path = output_path(None, None, &id);
        assert_eq!(path, PathBuf::from(format!("{}.bin", id)));
    }
}
