//! The package map: what every package in a build session is.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::source::PackageSource;

/// How one package in the map is obtained.
///
/// Immutable for the lifetime of a build session.
#[derive(Clone)]
pub enum PackageInfo {
    /// Built from a source tree in the current project.
    Local {
        /// The package's source description.
        source: Arc<dyn PackageSource>,
    },
    /// Loaded prebuilt from a package store; immutable once published.
    Versioned {
        /// The published version to load.
        version: String,
    },
}

impl fmt::Debug for PackageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageInfo::Local { source } => f
                .debug_struct("Local")
                .field("name", &source.name())
                .field("source_root", &source.source_root())
                .finish(),
            PackageInfo::Versioned { version } => f
                .debug_struct("Versioned")
                .field("version", version)
                .finish(),
        }
    }
}

/// Mapping from package name to [`PackageInfo`].
///
/// Supplied by the embedding tool and only queried by the cache. Iteration
/// order is deterministic (sorted by name) so a rootless build is
/// reproducible.
#[derive(Clone, Debug, Default)]
pub struct PackageMap {
    packages: HashMap<String, PackageInfo>,
}

impl PackageMap {
    /// Creates an empty package map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a local package, named by its source description.
    pub fn insert_local(&mut self, source: Arc<dyn PackageSource>) {
        self.packages
            .insert(source.name().to_string(), PackageInfo::Local { source });
    }

    /// Adds a versioned package.
    pub fn insert_versioned(&mut self, name: impl Into<String>, version: impl Into<String>) {
        self.packages.insert(
            name.into(),
            PackageInfo::Versioned {
                version: version.into(),
            },
        );
    }

    /// Looks up a package by name.
    pub fn get_info(&self, name: &str) -> Option<&PackageInfo> {
        self.packages.get(name)
    }

    /// Returns `true` if the map describes the named package.
    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// Returns the number of packages in the map.
    pub fn len(&self) -> usize {
        self.packages.len()
    }

    /// Returns `true` if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Returns every package name, sorted.
    pub fn package_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.packages.keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns a new map restricted to the named packages.
    ///
    /// Names absent from this map are skipped.
    pub fn subset(&self, names: &[String]) -> PackageMap {
        let mut subset = PackageMap::new();
        for name in names {
            if let Some(info) = self.packages.get(name) {
                subset.packages.insert(name.clone(), info.clone());
            }
        }
        subset
    }

    /// Records the current version/location of every package in the map.
    pub fn snapshot(&self) -> PackageMapSnapshot {
        let mut packages = BTreeMap::new();
        for (name, info) in &self.packages {
            let entry = match info {
                PackageInfo::Local { source } => SnapshotEntry::Local {
                    source_root: source.source_root().to_path_buf(),
                },
                PackageInfo::Versioned { version } => SnapshotEntry::Versioned {
                    version: version.clone(),
                },
            };
            packages.insert(name.clone(), entry);
        }
        PackageMapSnapshot { packages }
    }

    /// Returns `true` if every package recorded in the snapshot is still
    /// present in this map with the same kind, version, and location.
    ///
    /// A cached build is only reusable when this holds for its recorded
    /// plugin-provider snapshot.
    pub fn is_superset_of_snapshot(&self, snapshot: &PackageMapSnapshot) -> bool {
        snapshot.packages.iter().all(|(name, recorded)| {
            match (self.packages.get(name), recorded) {
                (Some(PackageInfo::Local { source }), SnapshotEntry::Local { source_root }) => {
                    source.source_root() == source_root
                }
                (Some(PackageInfo::Versioned { version }), SnapshotEntry::Versioned { version: recorded_version }) => {
                    version == recorded_version
                }
                _ => false,
            }
        })
    }
}

/// A persisted record of package versions and locations at build time.
///
/// Stored in the build-info sidecar so the next session can tell whether
/// any plugin-provider package changed since the cached build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMapSnapshot {
    /// Recorded entries by package name.
    pub packages: BTreeMap<String, SnapshotEntry>,
}

/// One package's recorded version or location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SnapshotEntry {
    /// A local package, identified by where its source lived.
    Local {
        /// Root of the source tree at build time.
        source_root: PathBuf,
    },
    /// A versioned package, identified by its published version.
    Versioned {
        /// The version in use at build time.
        version: String,
    },
}
