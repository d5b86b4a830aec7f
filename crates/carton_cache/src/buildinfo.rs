//! Build-info sidecar recording what a cached build depended on.
//!
//! Stored as `buildinfo.json` next to the serialized artifact. It records
//! the plugin-provider package versions/locations in use at build time and
//! the watch conditions covering every compiled unit and the build plugins.
//! Loading is fail-safe: a missing or unparsable sidecar is a cache miss.

use std::path::Path;

use carton_package::PackageMapSnapshot;
use carton_watch::WatchSet;
use serde::{Deserialize, Serialize};

use crate::error::CacheError;

/// File name of the build-info sidecar within a package cache directory.
pub const BUILD_INFO_FILE: &str = "buildinfo.json";

/// Metadata persisted alongside a locally built artifact.
///
/// Read-only once loaded; written once per successful build-and-save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildInfo {
    /// Versions/locations of the plugin-provider packages the build used.
    pub plugin_providers: PackageMapSnapshot,

    /// Watch conditions recorded per compiled unit.
    pub unit_watch_sets: Vec<WatchSet>,

    /// Watch conditions covering build-plugin inputs.
    pub plugin_watch_set: WatchSet,
}

impl BuildInfo {
    /// Loads the sidecar from a package cache directory, returning `None`
    /// if the file doesn't exist or can't be parsed.
    pub fn load(package_dir: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(package_dir.join(BUILD_INFO_FILE)).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Saves the sidecar into a package cache directory, creating it if
    /// needed.
    pub fn save(&self, package_dir: &Path) -> Result<(), CacheError> {
        std::fs::create_dir_all(package_dir).map_err(|e| CacheError::Io {
            path: package_dir.to_path_buf(),
            source: e,
        })?;
        let json = serde_json::to_string_pretty(self).map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;
        let path = package_dir.join(BUILD_INFO_FILE);
        std::fs::write(&path, json).map_err(|e| CacheError::Io { path, source: e })
    }

    /// Merges the plugin watch set with every per-unit watch set into one
    /// combined set, evaluated as a whole by the freshness check.
    pub fn merged_watch_set(&self) -> WatchSet {
        let mut merged = self.plugin_watch_set.clone();
        for unit in &self.unit_watch_sets {
            merged.merge(unit);
        }
        merged
    }
}
