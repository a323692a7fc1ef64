//! Command: write the settings document.
use anyhow::Result;

use crate::cli::{GlobalOpts, InitOpts};
use crate::logging::STAGE_TARGET;
use crate::settings::Settings;

/// Record default settings, unless a settings file already exists.
///
/// # Errors
///
/// Returns an error if the document cannot be written.
pub fn run(global: &GlobalOpts, opts: &InitOpts) -> Result<()> {
    let store = global.store();
    let settings = Settings::named(&global.config);

    if !opts.force
        && let Some(existing) = store.layout().resolve_read(&settings.file)
    {
        tracing::info!(
            "{} already exists, use --force to overwrite",
            existing.display()
        );
        return Ok(());
    }

    tracing::info!(target: STAGE_TARGET, "Recording settings");
    let recorded = store.record(&settings)?;
    if let Some(reason) = &recorded.fallback {
        tracing::debug!("working directory skipped: {reason}");
    }
    tracing::info!("wrote {}", recorded.path.display());
    Ok(())
}
