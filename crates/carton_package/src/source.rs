//! The source-description seam for local packages.

use std::path::{Path, PathBuf};

use crate::map::PackageMap;

/// Describes a local package's source tree to the build cache.
///
/// The cache consumes only two facts: where the source lives (recorded in
/// snapshots so moving a package invalidates its dependents' caches) and
/// which packages must be compiled first because they provide build-time
/// plugins. Everything else about the source is the compiler's business.
pub trait PackageSource: Send + Sync {
    /// The package's name.
    fn name(&self) -> &str;

    /// Root directory of the package's source tree.
    fn source_root(&self) -> &Path;

    /// Names of packages that must be compiled before this one, in the
    /// order they must be built.
    fn build_first_dependency_names(&self, map: &PackageMap) -> Vec<String>;
}

/// A [`PackageSource`] with a fixed dependency list.
///
/// Sufficient for embedders whose build-first dependencies are declared
/// statically rather than discovered by scanning the source tree; also the
/// source used throughout the cache's own tests.
pub struct StaticPackageSource {
    name: String,
    source_root: PathBuf,
    build_first: Vec<String>,
}

impl StaticPackageSource {
    /// Creates a source description with the given name, root, and ordered
    /// build-first dependency names.
    pub fn new(
        name: impl Into<String>,
        source_root: impl Into<PathBuf>,
        build_first: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source_root: source_root.into(),
            build_first,
        }
    }
}

impl PackageSource for StaticPackageSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn source_root(&self) -> &Path {
        &self.source_root
    }

    fn build_first_dependency_names(&self, _map: &PackageMap) -> Vec<String> {
        self.build_first.clone()
    }
}
