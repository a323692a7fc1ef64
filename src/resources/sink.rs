//! Append-only, synchronously flushed output file.
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::fs;

/// An output file opened for appending.
///
/// Every write is flushed to disk before it returns, so another process
/// tailing the file always sees complete writes in order.
#[derive(Debug)]
pub struct LogSink {
    file: File,
    path: PathBuf,
}

impl LogSink {
    /// Open `path` for appending, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or created.
    pub fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let file = fs::open_append(&path)?;
        Ok(Self { file, path })
    }

    /// Return the path the sink writes to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.file.write(buf)?;
        self.file.sync_data()?;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.sync_data()
    }
}
