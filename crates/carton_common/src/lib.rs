//! Shared foundational types used across the Carton build cache.
//!
//! This crate provides content hashing for cache invalidation and the common
//! result types separating internal bugs from user-facing build problems.

#![warn(missing_docs)]

pub mod hash;
pub mod result;

pub use hash::ContentHash;
pub use result::{CartonResult, InternalError};
