//! The compiler seam and the read-only registry view it receives.

use std::collections::HashMap;

use carton_common::{CartonResult, InternalError};
use carton_diagnostics::BuildMessages;
use carton_package::{Artifact, PackageMap, PackageSource};
use carton_watch::WatchSet;

/// Read-only, by-name access to the artifacts built so far this session.
///
/// Handed to the compiler so it can fetch the already-built artifacts of a
/// package's build-first dependencies (the cache guarantees those are
/// registered before the package itself is compiled). The compiler never
/// sees the mutable registry.
pub struct BuiltArtifacts<'a> {
    artifacts: &'a HashMap<String, Artifact>,
}

impl<'a> BuiltArtifacts<'a> {
    pub(crate) fn new(artifacts: &'a HashMap<String, Artifact>) -> Self {
        Self { artifacts }
    }

    /// Returns the built artifact for `name`.
    ///
    /// It is a programming error to request a package that has not
    /// completed an ensure-built pass this session.
    pub fn get(&self, name: &str) -> CartonResult<&'a Artifact> {
        self.artifacts
            .get(name)
            .ok_or_else(|| InternalError::new(format!("package {name} not yet built")))
    }

    /// Returns `true` if `name` has been built this session.
    pub fn contains(&self, name: &str) -> bool {
        self.artifacts.contains_key(name)
    }
}

/// Everything a compilation run reports back to the cache.
pub struct CompileResult {
    /// The compiled artifact. Discarded (and replaced with an empty
    /// placeholder) if the run recorded errors.
    pub artifact: Artifact,

    /// Names of the packages that provided build-time plugins; the cache
    /// snapshots their versions/locations into the build info.
    pub plugin_provider_package_names: Vec<String>,

    /// Watch conditions recorded per compiled unit.
    pub unit_watch_sets: Vec<WatchSet>,

    /// Watch conditions covering build-plugin inputs.
    pub plugin_watch_set: WatchSet,
}

/// Turns a local package's source description into a built artifact.
///
/// Implemented by the embedding tool; the cache invokes it only when the
/// on-disk build is missing or stale. Compile problems are recorded into
/// `messages` (the cache checks the current job afterward), not raised.
pub trait Compiler {
    /// Compiles one local package.
    ///
    /// `built` exposes the artifacts of every package already built this
    /// session, including the package's own build-first dependencies.
    fn compile(
        &self,
        source: &dyn PackageSource,
        map: &PackageMap,
        built: BuiltArtifacts<'_>,
        messages: &BuildMessages,
    ) -> CompileResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_resolves_built_artifacts() {
        let mut artifacts = HashMap::new();
        artifacts.insert("dep".to_string(), Artifact::new("dep", vec![1]));
        let view = BuiltArtifacts::new(&artifacts);

        assert!(view.contains("dep"));
        assert_eq!(view.get("dep").unwrap().name(), "dep");
    }

    #[test]
    fn unbuilt_name_is_a_programming_error() {
        let artifacts = HashMap::new();
        let view = BuiltArtifacts::new(&artifacts);
        let err = view.get("nope").unwrap_err();
        assert!(err.message.contains("not yet built"));
    }
}
