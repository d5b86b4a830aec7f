//! Package descriptions consumed by the Carton build cache.
//!
//! A [`PackageMap`] describes every package a build session may need: each
//! entry is either [`Local`](PackageInfo::Local) (built from a source tree)
//! or [`Versioned`](PackageInfo::Versioned) (loaded prebuilt from a package
//! store). The map is supplied by the embedding tool and never mutated by
//! the cache.

#![warn(missing_docs)]

pub mod artifact;
pub mod map;
pub mod source;
pub mod store;

pub use artifact::Artifact;
pub use map::{PackageInfo, PackageMap, PackageMapSnapshot, SnapshotEntry};
pub use source::{PackageSource, StaticPackageSource};
pub use store::{FsPackageStore, PackageStore};
