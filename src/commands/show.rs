//! Command: print the effective settings.
use anyhow::{Context as _, Result};

use super::Loaded;
use crate::cli::GlobalOpts;
use crate::logging::STAGE_TARGET;

/// Print the settings as they would be recorded.
///
/// # Errors
///
/// Returns an error if an existing settings file cannot be read or decoded.
pub fn run(global: &GlobalOpts) -> Result<()> {
    let loaded = Loaded::load(global)?;
    let heading = loaded.source.as_ref().map_or_else(
        || "Default settings".to_string(),
        |path| format!("Settings from {}", path.display()),
    );
    tracing::info!(target: STAGE_TARGET, "{heading}");

    let text = serde_yaml::to_string(&loaded.settings).context("encoding settings")?;
    for line in text.lines().filter(|l| !l.is_empty()) {
        tracing::info!("{line}");
    }
    Ok(())
}
