//! Common result and error types for the Carton build cache.

/// The standard result type for fallible cache operations.
///
/// `Ok` contains the result value (which may be partial or degraded after
/// error recovery). `Err` indicates a programmer or configuration error —
/// a misuse of the cache, not a problem with the user's packages. Package
/// build problems are reported through the diagnostics capture and the
/// operation still returns `Ok`.
pub type CartonResult<T> = Result<T, InternalError>;

/// A fatal error indicating the cache was misused or misconfigured.
///
/// Examples: depending on a package the map does not describe, loading a
/// versioned package with no store configured, or requesting an artifact
/// that has not been built. These are bugs in the embedding tool, not
/// recoverable build failures.
#[derive(Debug, thiserror::Error)]
#[error("internal build-cache error: {message}")]
pub struct InternalError {
    /// Description of the misuse.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}
