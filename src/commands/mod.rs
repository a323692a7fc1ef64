//! Top-level subcommand orchestration.
pub mod clean;
pub mod init;
pub mod open;
pub mod show;
pub mod token;

use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::error::SettingsError;
use crate::settings::{Settings, SettingsStore};

/// Settings loaded for a command, with the file they came from.
#[derive(Debug)]
pub struct Loaded {
    /// Store the settings were read through.
    pub store: SettingsStore,
    /// Decoded settings, or defaults when no file exists.
    pub settings: Settings,
    /// File that was read, or `None` when defaults are in use.
    pub source: Option<PathBuf>,
}

impl Loaded {
    /// Read the settings named by `--config` under `--root`.
    ///
    /// A missing file is not an error: defaults are returned with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or decoded.
    pub fn load(global: &GlobalOpts) -> Result<Self, SettingsError> {
        let store = global.store();
        let mut settings = Settings::named(&global.config);
        let source = match store.read(&mut settings) {
            Ok(path) => {
                tracing::debug!("settings read from {}", path.display());
                Some(path)
            }
            Err(SettingsError::NotFound { path }) => {
                tracing::warn!("{} not found, using defaults", path.display());
                None
            }
            Err(e) => return Err(e),
        };
        Ok(Self {
            store,
            settings,
            source,
        })
    }
}
