//! The Carton package build cache.
//!
//! Given a [`PackageMap`](carton_package::PackageMap) and an optional root
//! set, a [`PackageCache`] builds every required package's artifact exactly
//! once per session, in dependency order, recovering from circular
//! dependencies and compile failures, and persists artifacts plus their
//! watch-condition metadata so unchanged packages reload from disk instead
//! of recompiling.

#![warn(missing_docs)]

pub mod artifact;
pub mod buildinfo;
pub mod cache;
pub mod compiler;
pub mod error;
pub mod freshness;

pub use buildinfo::BuildInfo;
pub use cache::PackageCache;
pub use compiler::{BuiltArtifacts, CompileResult, Compiler};
pub use error::CacheError;
pub use freshness::is_up_to_date;
