//! `list` and `inspect`. Neither asks for a password.

use lockbox_core::{wire, RecordId, RecordStore, SealedPayload};

use crate::app::AppContext;
use crate::cli::{InspectArgs, ListArgs};

pub async fn handle_list(ctx: &AppContext<'_>, args: &ListArgs) -> anyhow::Result<()> {
    let store = ctx.open_store()?;
    let records = store.list().await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        if !ctx.quiet() {
            println!("No records.");
        }
        return Ok(());
    }

    for record in records {
        if ctx.quiet() {
            println!("{}", record.id);
        } else {
            println!(
                "{}  {:<4}  {}  {}",
                record.id,
                record.kind.as_str(),
                record.updated_at.format("%Y-%m-%d %H:%M"),
                record.label
            );
        }
    }
    Ok(())
}

/// Print the public parameters of a record. Never decrypts.
pub async fn handle_inspect(ctx: &AppContext<'_>, args: &InspectArgs) -> anyhow::Result<()> {
    let id: RecordId = args.id.parse()?;
    let store = ctx.open_store()?;
    let record = store.fetch(&id).await?;

    if args.json {
        println!("{}", wire::to_json(&record)?);
        return Ok(());
    }

    println!("ID:        {}", id);
    println!("Kind:      {}", record.kind());
    println!("Label:     {}", record.label);
    if let Some(mime_type) = &record.mime_type {
        println!("MIME type: {}", mime_type);
    }
    println!("Salt:      {}", record.salt());
    println!("IV:        {}", record.nonce());
    println!("Cipher:    {} bytes", record.cipher_len());
    println!(
        "Verifier:  {}",
        if record.verification_digest.is_some() {
            "present"
        } else {
            "absent"
        }
    );
    if let SealedPayload::File { name, .. } = &record.payload {
        println!(
            "File name: {}",
            if name.is_some() { "encrypted" } else { "not stored" }
        );
    }
    Ok(())
}
