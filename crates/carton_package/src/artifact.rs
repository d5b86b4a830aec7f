//! The built, loadable representation of one package.

use serde::{Deserialize, Serialize};

/// The compiled output of one package.
///
/// The cache treats the compiled contents as opaque bytes; their internal
/// layout belongs to the compiler. An artifact is created once — by the
/// compiler, by deserialization from disk, or as an empty placeholder —
/// and never mutated after it enters the session registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    name: String,
    contents: Vec<u8>,
}

impl Artifact {
    /// Creates an artifact with compiled contents.
    pub fn new(name: impl Into<String>, contents: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            contents,
        }
    }

    /// Creates the degraded placeholder registered when a package fails to
    /// build, so its dependents can still be attempted.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: Vec::new(),
        }
    }

    /// The package this artifact belongs to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The compiled contents, opaque to the cache.
    pub fn contents(&self) -> &[u8] {
        &self.contents
    }

    /// Returns `true` for the degraded placeholder.
    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}
