//! Watch sets: filesystem conditions certifying a cached build is valid.
//!
//! A [`WatchSet`] records what the filesystem looked like when a package was
//! built: which input files existed and their content fingerprints. A cached
//! artifact is reusable only while every recorded condition still holds.

#![warn(missing_docs)]

pub mod set;

pub use set::{FileCondition, WatchSet};
