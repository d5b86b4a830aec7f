//! Error types for cache disk operations.

use std::path::PathBuf;

/// Errors that can occur while persisting cache state.
///
/// Cache *reads* are fail-safe — corruption or missing files are cache
/// misses, not errors — so this enum only surfaces from writes, where
/// silently losing a build would leave the cache directory inconsistent.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// An I/O error occurred while writing cache files.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A serialization error occurred.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the serialization failure.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display() {
        let err = CacheError::Io {
            path: PathBuf::from("/cache/app/artifact.bin"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("cache I/O error"));
        assert!(msg.contains("artifact.bin"));
    }

    #[test]
    fn serialization_error_display() {
        let err = CacheError::Serialization {
            reason: "invalid length".to_string(),
        };
        assert!(err.to_string().contains("invalid length"));
    }
}
