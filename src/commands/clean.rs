//! Command: remove the working directory.
use anyhow::Result;

use crate::cli::GlobalOpts;

/// Delete the working directory and everything in it.
///
/// Running it when the directory is already gone is not an error.
///
/// # Errors
///
/// Returns an error if the directory exists but cannot be removed.
pub fn run(global: &GlobalOpts) -> Result<()> {
    let store = global.store();
    let work_dir = store.layout().work_dir();
    if store.delete_work_dir()? {
        tracing::info!("removed {}", work_dir.display());
    } else {
        tracing::info!("{} does not exist", work_dir.display());
    }
    Ok(())
}
