use std::path::PathBuf;

use lockbox_core::SqliteStore;

use crate::app::AppContext;
use crate::cli::InitArgs;
use crate::config::{default_store_path, write_config, LockboxConfig};
use crate::errors::CliError;

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let config_path = ctx.config_path()?;
    if config_path.exists() && !args.force {
        return Err(CliError::WouldOverwrite(config_path).into());
    }

    let store_path = match &args.path {
        Some(path) => PathBuf::from(path),
        None => default_store_path()?,
    };

    SqliteStore::open(&store_path)?;
    tracing::info!(store = %store_path.display(), "record store ready");

    let config = LockboxConfig::new(store_path.clone(), args.log_filter.clone());
    write_config(&config_path, &config)?;

    if !ctx.quiet() {
        println!("Record store: {}", store_path.display());
        println!("Config: {}", config_path.display());
    }
    Ok(())
}
