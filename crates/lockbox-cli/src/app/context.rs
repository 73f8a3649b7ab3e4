//! Application context for the Lockbox CLI.
//!
//! Provides a unified context that combines CLI arguments with
//! lazily-loaded configuration.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;

use lockbox_core::SqliteStore;

use crate::cli::Cli;
use crate::config::{default_config_path, default_store_path, read_config, LockboxConfig};
use crate::errors::CliError;

/// Application context that bundles CLI args with configuration.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<LockboxConfig>,
}

impl<'a> AppContext<'a> {
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Config file location: `--config`, else the XDG default.
    pub fn config_path(&self) -> anyhow::Result<PathBuf> {
        match &self.cli.config {
            Some(path) => Ok(PathBuf::from(path)),
            None => default_config_path(),
        }
    }

    /// Get the configuration, loading it lazily. A missing file means defaults.
    pub fn config(&self) -> anyhow::Result<&LockboxConfig> {
        self.config.get_or_try_init(|| {
            let path = self.config_path()?;
            if path.exists() {
                read_config(&path)
            } else {
                Ok(LockboxConfig::default())
            }
        })
    }

    pub fn log_filter(&self) -> Option<String> {
        self.config()
            .ok()
            .and_then(|config| config.logging.filter.clone())
    }

    /// Store location: `--store`, then the config, then the XDG default.
    pub fn store_path(&self) -> anyhow::Result<PathBuf> {
        if let Some(path) = &self.cli.store {
            return Ok(PathBuf::from(path));
        }
        if let Some(path) = &self.config()?.store.path {
            return Ok(PathBuf::from(path));
        }
        default_store_path()
    }

    /// Open the existing record store.
    pub fn open_store(&self) -> anyhow::Result<SqliteStore> {
        let path = self.store_path()?;
        if !path.exists() {
            return Err(CliError::StoreMissing(path).into());
        }
        Ok(SqliteStore::open(&path)?)
    }
}
