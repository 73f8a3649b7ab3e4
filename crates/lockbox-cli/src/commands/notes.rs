//! `note new`, `note show` and `note edit`.

use lockbox_core::{DocumentSession, NotePlaintext, RecordId};

use crate::app::{unlock_with_retry, AppContext};
use crate::cli::{NoteEditArgs, NoteNewArgs, NoteShowArgs};
use crate::constants::DEFAULT_NOTE_LABEL;
use crate::helpers::{is_interactive, prompt_new_password, read_note_content};

pub async fn handle_new(ctx: &AppContext<'_>, args: &NoteNewArgs) -> anyhow::Result<()> {
    let content = read_note_content(args.no_input, args.content.clone(), None)?;
    let label = args
        .label
        .clone()
        .unwrap_or_else(|| DEFAULT_NOTE_LABEL.to_string());

    let store = ctx.open_store()?;
    let password = prompt_new_password(is_interactive(args.no_input))?;

    let mut session = DocumentSession::new(store, NotePlaintext::new(args.title.as_str(), content));
    let id = session.lock(&password, &label).await?;

    if ctx.quiet() {
        println!("{}", id);
    } else {
        println!("Locked note {}", id);
    }
    Ok(())
}

pub async fn handle_show(ctx: &AppContext<'_>, args: &NoteShowArgs) -> anyhow::Result<()> {
    let id: RecordId = args.id.parse()?;
    let store = ctx.open_store()?;
    let mut session = DocumentSession::<NotePlaintext, _>::open(store, id).await?;
    unlock_with_retry(&mut session, is_interactive(args.no_input)).await?;

    let label = session
        .record()
        .map(|record| record.label.clone())
        .unwrap_or_default();
    let note = session
        .plaintext()
        .ok_or_else(|| anyhow::anyhow!("Record {} did not unlock", id))?;

    if args.json {
        let value = serde_json::json!({
            "id": id,
            "label": label,
            "title": note.title,
            "content": note.content,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        if !ctx.quiet() {
            println!("# {}", note.title);
            println!();
        }
        println!("{}", note.content);
    }

    session.close()?;
    Ok(())
}

/// Unlock, apply the changes and re-lock under fresh parameters.
///
/// With only `--title`, the content is kept.
pub async fn handle_edit(ctx: &AppContext<'_>, args: &NoteEditArgs) -> anyhow::Result<()> {
    let id: RecordId = args.id.parse()?;
    let store = ctx.open_store()?;
    let mut session = DocumentSession::<NotePlaintext, _>::open(store, id).await?;
    unlock_with_retry(&mut session, is_interactive(args.no_input)).await?;

    let new_content = if args.content.is_none() && args.title.is_some() {
        None
    } else {
        let current = session
            .plaintext()
            .map(|note| note.content.clone())
            .unwrap_or_default();
        Some(read_note_content(
            args.no_input,
            args.content.clone(),
            Some(&current),
        )?)
    };

    let note = session.plaintext_mut()?;
    if let Some(title) = &args.title {
        note.title = title.clone();
    }
    if let Some(content) = new_content {
        note.content = content;
    }

    session.save().await?;
    session.close()?;

    if !ctx.quiet() {
        println!("Updated note {}", id);
    }
    Ok(())
}
