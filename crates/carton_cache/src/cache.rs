//! The build orchestrator: dependency-first traversal with cycle recovery
//! and a memoized session registry.

use std::collections::HashMap;
use std::path::PathBuf;

use carton_common::{CartonResult, InternalError};
use carton_config::CartonConfig;
use carton_diagnostics::BuildMessages;
use carton_package::{
    Artifact, FsPackageStore, PackageInfo, PackageMap, PackageSource, PackageStore,
};

use crate::artifact;
use crate::buildinfo::BuildInfo;
use crate::compiler::{BuiltArtifacts, Compiler};
use crate::freshness;

/// An in-process build cache for one build session.
///
/// Builds every required package's artifact exactly once, in dependency
/// order. Local packages are compiled (or reloaded from the cache
/// directory when still fresh); versioned packages are loaded prebuilt
/// from the package store. The registry of built artifacts is append-only:
/// an entry, once inserted, is never replaced or removed for the lifetime
/// of the cache instance.
///
/// At most one `build_packages` call may be in flight per instance,
/// enforced by `&mut self`. The cache directory is not locked against
/// concurrent processes; embedders sharing one cache directory across
/// processes need their own advisory locking.
pub struct PackageCache {
    /// Where artifacts and build-info sidecars persist. `None` disables
    /// persistence entirely.
    cache_dir: Option<PathBuf>,

    /// Resolves versioned packages to prebuilt artifact directories.
    /// `None` makes any versioned package a fatal configuration error.
    store: Option<Box<dyn PackageStore>>,

    /// Compiles local packages when their cached build is missing or stale.
    compiler: Box<dyn Compiler>,

    /// Session registry: name → built artifact. Append-only.
    artifacts: HashMap<String, Artifact>,
}

impl PackageCache {
    /// Creates a cache with no cache directory and no package store.
    ///
    /// Such a cache recompiles every local package each session and cannot
    /// load versioned packages; add capabilities with
    /// [`with_cache_dir`](Self::with_cache_dir) and
    /// [`with_store`](Self::with_store).
    pub fn new(compiler: Box<dyn Compiler>) -> Self {
        Self {
            cache_dir: None,
            store: None,
            compiler,
            artifacts: HashMap::new(),
        }
    }

    /// Creates a cache configured from a loaded `carton.toml`.
    ///
    /// Applies the cache directory and, when a store root is configured,
    /// an [`FsPackageStore`] rooted there.
    pub fn from_config(compiler: Box<dyn Compiler>, config: &CartonConfig) -> Self {
        let mut cache = Self::new(compiler);
        if let Some(dir) = &config.cache.dir {
            cache = cache.with_cache_dir(dir.clone());
        }
        if let Some(root) = &config.store.root {
            cache = cache.with_store(Box::new(FsPackageStore::new(root.clone())));
        }
        cache
    }

    /// Enables on-disk persistence under the given directory.
    ///
    /// The directory is created lazily on the first save.
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    /// Enables loading versioned packages from the given store.
    pub fn with_store(mut self, store: Box<dyn PackageStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Builds the closure of packages needed for a session.
    ///
    /// With `roots`, builds the named packages and everything they
    /// transitively require; without, builds every package in the map (in
    /// sorted name order, so rootless builds are reproducible).
    ///
    /// Recoverable problems — circular dependencies, compile failures,
    /// unreadable versioned artifacts — are recorded into `messages` and
    /// degrade to empty artifacts so dependents can still be attempted.
    /// `Err` is reserved for misuse: a required package missing from the
    /// map, or a versioned package with no store configured.
    pub fn build_packages(
        &mut self,
        map: &PackageMap,
        roots: Option<&[String]>,
        messages: &BuildMessages,
    ) -> CartonResult<()> {
        let mut on_stack = Vec::new();
        match roots {
            Some(names) => {
                for name in names {
                    self.ensure_package_built(name, map, &mut on_stack, messages)?;
                }
            }
            None => {
                for name in map.package_names() {
                    self.ensure_package_built(&name, map, &mut on_stack, messages)?;
                }
            }
        }
        debug_assert!(on_stack.is_empty());
        Ok(())
    }

    /// Returns the built artifact for `name`.
    ///
    /// It is a programming error to request a package before an
    /// ensure-built pass has completed for it — either after
    /// [`build_packages`](Self::build_packages) returns, or (from the
    /// compiler) for a package's own build-first dependencies.
    pub fn artifact(&self, name: &str) -> CartonResult<&Artifact> {
        self.artifacts
            .get(name)
            .ok_or_else(|| InternalError::new(format!("package {name} not yet built")))
    }

    /// Returns `true` if `name` has been built this session.
    pub fn is_built(&self, name: &str) -> bool {
        self.artifacts.contains_key(name)
    }

    /// Returns every built package name, sorted.
    pub fn built_package_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.artifacts.keys().cloned().collect();
        names.sort();
        names
    }

    /// Builds one package and everything it requires, exactly once.
    ///
    /// `on_stack` holds the dependency names on the current recursive
    /// descent; a dependency found there closes a cycle, which is reported
    /// and recovered by not enforcing that one edge.
    fn ensure_package_built(
        &mut self,
        name: &str,
        map: &PackageMap,
        on_stack: &mut Vec<String>,
        messages: &BuildMessages,
    ) -> CartonResult<()> {
        if self.artifacts.contains_key(name) {
            return Ok(());
        }

        let info = map
            .get_info(name)
            .ok_or_else(|| InternalError::new(format!("depend on unknown package {name}")))?;

        match info {
            PackageInfo::Local { source } => {
                for dep in source.build_first_dependency_names(map) {
                    if on_stack.iter().any(|n| n == &dep) {
                        messages.record_error(format!(
                            "circular dependency between packages {name} and {dep}"
                        ));
                        // recover by not enforcing this edge
                        continue;
                    }
                    on_stack.push(dep.clone());
                    self.ensure_package_built(&dep, map, on_stack, messages)?;
                    on_stack.pop();
                }

                // A cycle may have already built this package further down
                // the descent; the registry is append-only, so never build
                // twice.
                if self.artifacts.contains_key(name) {
                    return Ok(());
                }
                self.build_local_package(name, &**source, map, messages)
            }
            PackageInfo::Versioned { version } => {
                self.load_versioned_package(name, version, messages)
            }
        }
    }

    /// Loads a prebuilt versioned package from the store.
    ///
    /// Versioned packages and their dependencies need no building; the
    /// artifact is loaded as published. No staleness check is performed —
    /// published packages are immutable.
    fn load_versioned_package(
        &mut self,
        name: &str,
        version: &str,
        messages: &BuildMessages,
    ) -> CartonResult<()> {
        let store = self.store.as_deref().ok_or_else(|| {
            InternalError::new(format!(
                "cannot load versioned package {name} without a package store"
            ))
        })?;

        let artifact = messages.enter_job(format!("loading package {name}@{version}"), || {
            let loaded = store
                .package_path(name, version)
                .and_then(|dir| artifact::load_artifact(&dir))
                .filter(|artifact| artifact.name() == name);
            match loaded {
                Some(artifact) => artifact,
                None => {
                    messages.record_error(format!(
                        "unable to load package {name}@{version} from the package store"
                    ));
                    Artifact::empty(name)
                }
            }
        });

        self.artifacts.insert(name.to_string(), artifact);
        Ok(())
    }

    /// Builds or reloads one local package, inside its own job scope.
    fn build_local_package(
        &mut self,
        name: &str,
        source: &dyn PackageSource,
        map: &PackageMap,
        messages: &BuildMessages,
    ) -> CartonResult<()> {
        messages.enter_job(format!("building package {name}"), || {
            let package_dir = self.cache_dir.as_ref().map(|dir| dir.join(name));

            // Do we have an up-to-date build on disk?
            let build_info = package_dir.as_deref().and_then(BuildInfo::load);
            if freshness::is_up_to_date(build_info.as_ref(), map) {
                if let Some(dir) = &package_dir {
                    if let Some(artifact) = artifact::load_artifact(dir) {
                        self.artifacts.insert(name.to_string(), artifact);
                        return Ok(());
                    }
                }
                // Corrupt cached artifact: fall through and recompile.
            }

            let result = self.compiler.compile(
                source,
                map,
                BuiltArtifacts::new(&self.artifacts),
                messages,
            );

            if messages.has_errors_in_current_job() {
                // Recover by registering an empty artifact so dependents
                // can still build and report their own problems.
                self.artifacts.insert(name.to_string(), Artifact::empty(name));
                return Ok(());
            }

            let providers = map.subset(&result.plugin_provider_package_names);
            if let Some(dir) = &package_dir {
                artifact::save_artifact(&result.artifact, dir).map_err(|e| {
                    InternalError::new(format!("failed to save artifact for {name}: {e}"))
                })?;
                let info = BuildInfo {
                    plugin_providers: providers.snapshot(),
                    unit_watch_sets: result.unit_watch_sets,
                    plugin_watch_set: result.plugin_watch_set,
                };
                info.save(dir).map_err(|e| {
                    InternalError::new(format!("failed to save build info for {name}: {e}"))
                })?;
            }

            self.artifacts.insert(name.to_string(), result.artifact);
            Ok(())
        })
    }
}
