//! File-system helpers shared by the settings store and resource files.
//!
//! Every file and directory created here requests [`PERMISSION`] on Unix
//! (subject to the process umask).
use std::fs::{self, DirBuilder, File, OpenOptions};
use std::io::{self, Write as _};
use std::path::Path;

/// Mode requested for created files and directories.
pub const PERMISSION: u32 = 0o775;

/// Return open options that create the file with [`PERMISSION`] if absent.
fn create_options() -> OpenOptions {
    let mut opts = OpenOptions::new();
    opts.create(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt as _;
        opts.mode(PERMISSION);
    }
    opts
}

/// Write `data` to `path`, creating or truncating the file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or written.
pub fn write_file(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = create_options().write(true).truncate(true).open(path)?;
    file.write_all(data)?;
    file.sync_all()
}

/// Open `path` for appending, creating it if absent. Existing content is kept.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or created.
pub fn open_append(path: &Path) -> io::Result<File> {
    create_options().append(true).open(path)
}

/// Create a single directory level at `path`.
///
/// # Errors
///
/// Returns an error if the parent is missing, the path is occupied, or the
/// directory cannot be created.
pub fn create_dir(path: &Path) -> io::Result<()> {
    let mut builder = DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt as _;
        builder.mode(PERMISSION);
    }
    builder.create(path)
}

/// Remove the directory tree at `path`.
///
/// Returns `Ok(false)` when nothing exists at `path`.
///
/// # Errors
///
/// Returns an error if the path exists but cannot be removed.
pub fn remove_dir_tree(path: &Path) -> io::Result<bool> {
    if path.symlink_metadata().is_err() {
        return Ok(false);
    }
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Remove the file at `path`. Returns `Ok(false)` when it does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn remove_file_if_exists(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}
