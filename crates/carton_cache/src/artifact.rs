//! On-disk artifact serialization with header validation.
//!
//! Each package directory — under the build cache or inside a package
//! store — holds one `artifact.bin`: a binary header (magic bytes, format
//! version, payload checksum) followed by the bincode-encoded
//! [`Artifact`]. Loading validates the header; any mismatch is a cache
//! miss, never an error.

use std::path::{Path, PathBuf};

use carton_common::ContentHash;
use carton_package::Artifact;
use serde::{Deserialize, Serialize};

use crate::error::CacheError;

/// File name of the serialized artifact within a package directory.
pub const ARTIFACT_FILE: &str = "artifact.bin";

/// Magic bytes identifying a Carton artifact file.
const ARTIFACT_MAGIC: [u8; 4] = *b"CRTN";

/// Current artifact file format version. Increment on breaking changes to
/// the header or payload encoding.
const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// Header prepended to every serialized artifact for validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ArtifactHeader {
    /// Magic bytes: must be `b"CRTN"`.
    magic: [u8; 4],
    /// Artifact file format version.
    format_version: u32,
    /// Content hash of the payload (for corruption detection).
    checksum: ContentHash,
}

/// Returns the artifact file path within a package directory.
pub fn artifact_path(package_dir: &Path) -> PathBuf {
    package_dir.join(ARTIFACT_FILE)
}

/// Serializes an artifact into `<package_dir>/artifact.bin`.
///
/// Creates the directory if needed. The payload is bincode-encoded and
/// preceded by a 4-byte header length, the header, then the payload.
pub fn save_artifact(artifact: &Artifact, package_dir: &Path) -> Result<(), CacheError> {
    std::fs::create_dir_all(package_dir).map_err(|e| CacheError::Io {
        path: package_dir.to_path_buf(),
        source: e,
    })?;

    let payload = bincode::serde::encode_to_vec(artifact, bincode::config::standard()).map_err(
        |e| CacheError::Serialization {
            reason: e.to_string(),
        },
    )?;

    let header = ArtifactHeader {
        magic: ARTIFACT_MAGIC,
        format_version: ARTIFACT_FORMAT_VERSION,
        checksum: ContentHash::from_bytes(&payload),
    };
    let header_bytes = bincode::serde::encode_to_vec(&header, bincode::config::standard())
        .map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;

    // Layout: 4-byte header length (little-endian) + header + payload
    let header_len = header_bytes.len() as u32;
    let mut output = Vec::with_capacity(4 + header_bytes.len() + payload.len());
    output.extend_from_slice(&header_len.to_le_bytes());
    output.extend_from_slice(&header_bytes);
    output.extend_from_slice(&payload);

    let path = artifact_path(package_dir);
    std::fs::write(&path, &output).map_err(|e| CacheError::Io { path, source: e })
}

/// Deserializes the artifact in `<package_dir>/artifact.bin`, validating
/// its header.
///
/// Returns `None` if the file is missing or truncated, the magic or format
/// version doesn't match, the checksum doesn't verify, or the payload
/// doesn't decode. This is fail-safe: corruption routes to recompilation.
pub fn load_artifact(package_dir: &Path) -> Option<Artifact> {
    let raw = std::fs::read(artifact_path(package_dir)).ok()?;

    if raw.len() < 4 {
        return None;
    }
    let header_len = u32::from_le_bytes(raw[..4].try_into().ok()?) as usize;
    if raw.len() < 4 + header_len {
        return None;
    }

    let header: ArtifactHeader =
        bincode::serde::decode_from_slice(&raw[4..4 + header_len], bincode::config::standard())
            .ok()?
            .0;
    if header.magic != ARTIFACT_MAGIC {
        return None;
    }
    if header.format_version != ARTIFACT_FORMAT_VERSION {
        return None;
    }

    let payload = &raw[4 + header_len..];
    if ContentHash::from_bytes(payload) != header.checksum {
        return None;
    }

    bincode::serde::decode_from_slice(payload, bincode::config::standard())
        .ok()
        .map(|(artifact, _)| artifact)
}
