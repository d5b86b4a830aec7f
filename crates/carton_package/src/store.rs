//! The versioned package store seam.

use std::path::{Path, PathBuf};

/// Resolves published packages to their on-disk location.
///
/// Versioned packages are immutable once published, so the cache performs
/// no staleness check on them; resolution either yields a directory holding
/// a prebuilt artifact or nothing.
pub trait PackageStore: Send + Sync {
    /// Resolves the directory holding the prebuilt artifact for `name` at
    /// `version`, or `None` if the store has no such package.
    fn package_path(&self, name: &str, version: &str) -> Option<PathBuf>;
}

/// A [`PackageStore`] laid out on the local filesystem as
/// `<root>/<name>/<version>/`.
pub struct FsPackageStore {
    root: PathBuf,
}

impl FsPackageStore {
    /// Creates a store rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PackageStore for FsPackageStore {
    fn package_path(&self, name: &str, version: &str) -> Option<PathBuf> {
        let dir = self.root.join(name).join(version);
        dir.is_dir().then_some(dir)
    }
}
