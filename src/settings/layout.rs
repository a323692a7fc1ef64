//! Path resolution for files that may live in the working directory.
//!
//! Resolution is a two-step contract: a `resolve_*` call inspects the
//! filesystem and returns a candidate path, and the caller then acts on that
//! candidate. Nothing is cached between calls, so the working directory may
//! appear or disappear between the two steps; the caller sees whatever error
//! the action produces.
use std::path::{Path, PathBuf};

use super::WORK_DIR;

/// A convention for where a logical file name lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convention {
    /// `<root>/.realize/<name>`.
    Namespaced,
    /// `<root>/<name>`, used before the working directory existed.
    Legacy,
}

impl Convention {
    /// Conventions tried by reads, most preferred first.
    pub const READ_ORDER: [Self; 2] = [Self::Namespaced, Self::Legacy];

    /// Return the path of `name` under this convention.
    #[must_use]
    pub fn path(self, layout: &Layout, name: &Path) -> PathBuf {
        match self {
            Self::Namespaced => layout.work_dir().join(name),
            Self::Legacy => layout.root.join(name),
        }
    }
}

/// The invocation root and its working directory.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use realize_cli::settings::Layout;
///
/// let layout = Layout::new("/project");
/// assert_eq!(layout.work_dir(), Path::new("/project/.realize"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    /// Create a layout rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Return the invocation root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Return the working directory path (whether or not it exists).
    #[must_use]
    pub fn work_dir(&self) -> PathBuf {
        self.root.join(WORK_DIR)
    }

    /// Return `true` if the working directory currently exists as a directory.
    #[must_use]
    pub fn has_work_dir(&self) -> bool {
        self.work_dir().is_dir()
    }

    /// Return the first existing candidate for `name` in [`Convention::READ_ORDER`].
    #[must_use]
    pub fn resolve_read(&self, name: impl AsRef<Path>) -> Option<PathBuf> {
        let name = name.as_ref();
        Convention::READ_ORDER
            .iter()
            .map(|convention| convention.path(self, name))
            .find(|path| path.is_file())
    }

    /// Return the convention a write of a new file should use right now.
    #[must_use]
    pub fn write_convention(&self) -> Convention {
        if self.has_work_dir() {
            Convention::Namespaced
        } else {
            Convention::Legacy
        }
    }

    /// Return where a write of `name` should go right now.
    #[must_use]
    pub fn resolve_write(&self, name: impl AsRef<Path>) -> PathBuf {
        self.write_convention().path(self, name.as_ref())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;

    fn layout() -> (tempfile::TempDir, Layout) {
        let dir = tempfile::tempdir().unwrap();
        let layout = Layout::new(dir.path());
        (dir, layout)
    }

    #[test]
    fn convention_paths() {
        let layout = Layout::new("/p");
        let name = Path::new("realize.yaml");
        assert_eq!(
            Convention::Namespaced.path(&layout, name),
            Path::new("/p/.realize/realize.yaml")
        );
        assert_eq!(
            Convention::Legacy.path(&layout, name),
            Path::new("/p/realize.yaml")
        );
    }

    #[test]
    fn read_prefers_namespaced_copy() {
        let (_dir, layout) = layout();
        fs::create_dir(layout.work_dir()).unwrap();
        fs::write(layout.work_dir().join("realize.yaml"), "").unwrap();
        fs::write(layout.root().join("realize.yaml"), "").unwrap();
        assert_eq!(
            layout.resolve_read("realize.yaml"),
            Some(layout.work_dir().join("realize.yaml"))
        );
    }

    #[test]
    fn read_falls_back_to_legacy_copy() {
        let (_dir, layout) = layout();
        fs::create_dir(layout.work_dir()).unwrap();
        fs::write(layout.root().join("realize.yaml"), "").unwrap();
        assert_eq!(
            layout.resolve_read("realize.yaml"),
            Some(layout.root().join("realize.yaml"))
        );
    }

    #[test]
    fn read_finds_nothing() {
        let (_dir, layout) = layout();
        assert_eq!(layout.resolve_read("realize.yaml"), None);
    }

    #[test]
    fn write_follows_working_directory_presence() {
        let (_dir, layout) = layout();
        assert_eq!(layout.write_convention(), Convention::Legacy);
        assert_eq!(
            layout.resolve_write("logs.log"),
            layout.root().join("logs.log")
        );

        fs::create_dir(layout.work_dir()).unwrap();
        assert_eq!(layout.write_convention(), Convention::Namespaced);
        assert_eq!(
            layout.resolve_write("logs.log"),
            layout.work_dir().join("logs.log")
        );
    }

    #[test]
    fn a_file_named_like_the_working_directory_is_not_a_working_directory() {
        let (_dir, layout) = layout();
        fs::write(layout.work_dir(), "").unwrap();
        assert!(!layout.has_work_dir());
        assert_eq!(layout.write_convention(), Convention::Legacy);
    }
}
