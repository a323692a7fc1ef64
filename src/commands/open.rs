//! Command: open the enabled resource files and route logging into them.
use anyhow::{Context as _, Result};

use super::Loaded;
use crate::cli::GlobalOpts;
use crate::logging::{self, LogHandle, STAGE_TARGET};
use crate::resources::{ResourceFiles, Role};

/// Open every enabled resource file and attach the logs and errors files to
/// the running subscriber.
///
/// When `files.clean` is set, existing files are removed first.
///
/// # Errors
///
/// Returns an error if the settings cannot be loaded, a file cannot be
/// opened, or the logger cannot be reconfigured.
pub fn run(global: &GlobalOpts, log: &LogHandle) -> Result<()> {
    let loaded = Loaded::load(global)?;
    let files = &loaded.settings.files;
    let resources = ResourceFiles::new(&global.root);

    if files.clean {
        tracing::info!(target: STAGE_TARGET, "Cleaning resource files");
        let removed = resources.purge(files)?;
        tracing::info!("{} file(s) removed", removed.len());
    }

    tracing::info!(target: STAGE_TARGET, "Opening resource files");
    let mut sinks = resources.open(files)?;
    for role in Role::ALL {
        if let Some(sink) = sinks.get_mut(role) {
            let path = sink.path().to_path_buf();
            logging::write_session_header(sink, "open")
                .with_context(|| format!("writing header to {}", path.display()))?;
        }
    }

    let paths = sinks.paths();
    if paths.is_empty() {
        tracing::info!("no resource files enabled");
    }
    for (role, path) in paths {
        tracing::info!("{}: {}", role.label(), path.display());
    }

    log.attach(sinks.take(Role::Logs), sinks.take(Role::Errors))?;
    tracing::debug!("resource files attached");
    Ok(())
}
