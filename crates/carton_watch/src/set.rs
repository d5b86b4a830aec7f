//! Sets of file watch conditions with merge and evaluation.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use carton_common::ContentHash;
use serde::{Deserialize, Serialize};

/// The recorded state of one watched file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileCondition {
    /// The file must not exist.
    Absent,
    /// The file must exist with exactly this content fingerprint.
    Content(ContentHash),
}

/// A set of filesystem conditions that must all hold for a cached build
/// to be reusable.
///
/// Serialized into the build-info sidecar alongside the artifact, then
/// re-evaluated on the next build to decide whether to recompile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchSet {
    files: BTreeMap<PathBuf, FileCondition>,
}

impl WatchSet {
    /// Creates an empty watch set. An empty set is trivially up to date.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no conditions are recorded.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Returns the number of recorded conditions.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Records the current on-disk state of `path` as a condition: its
    /// content fingerprint if readable, otherwise required absence.
    pub fn watch_file(&mut self, path: &Path) {
        let condition = match std::fs::read(path) {
            Ok(bytes) => FileCondition::Content(ContentHash::from_bytes(&bytes)),
            Err(_) => FileCondition::Absent,
        };
        self.files.insert(path.to_path_buf(), condition);
    }

    /// Records that `path` must exist with the given fingerprint.
    pub fn require_content(&mut self, path: impl Into<PathBuf>, hash: ContentHash) {
        self.files.insert(path.into(), FileCondition::Content(hash));
    }

    /// Records that `path` must not exist.
    pub fn require_absent(&mut self, path: impl Into<PathBuf>) {
        self.files.insert(path.into(), FileCondition::Absent);
    }

    /// Unions another set's conditions into this one.
    ///
    /// When both sets watch the same path, the existing condition wins;
    /// if the file actually changed, either condition fails evaluation.
    pub fn merge(&mut self, other: &WatchSet) {
        for (path, condition) in &other.files {
            self.files.entry(path.clone()).or_insert(*condition);
        }
    }

    /// Evaluates every condition against the filesystem.
    ///
    /// Returns `true` iff all conditions still hold: absent files are still
    /// absent and watched contents still match their recorded fingerprints.
    pub fn is_up_to_date(&self) -> bool {
        self.files.iter().all(|(path, condition)| match condition {
            FileCondition::Absent => !path.exists(),
            FileCondition::Content(expected) => match std::fs::read(path) {
                Ok(bytes) => ContentHash::from_bytes(&bytes) == *expected,
                Err(_) => false,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_is_up_to_date() {
        let ws = WatchSet::new();
        assert!(ws.is_empty());
        assert!(ws.is_up_to_date());
    }

    #[test]
    fn watch_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.src");
        std::fs::write(&path, "contents").unwrap();

        let mut ws = WatchSet::new();
        ws.watch_file(&path);
        assert_eq!(ws.len(), 1);
        assert!(ws.is_up_to_date());
    }

    #[test]
    fn modified_file_invalidates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.src");
        std::fs::write(&path, "before").unwrap();

        let mut ws = WatchSet::new();
        ws.watch_file(&path);
        std::fs::write(&path, "after").unwrap();
        assert!(!ws.is_up_to_date());
    }

    #[test]
    fn deleted_file_invalidates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.src");
        std::fs::write(&path, "contents").unwrap();

        let mut ws = WatchSet::new();
        ws.watch_file(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(!ws.is_up_to_date());
    }

    #[test]
    fn watch_missing_file_records_absence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not-there.src");

        let mut ws = WatchSet::new();
        ws.watch_file(&path);
        assert!(ws.is_up_to_date());

        // Creating the file breaks the absence condition.
        std::fs::write(&path, "now it exists").unwrap();
        assert!(!ws.is_up_to_date());
    }

    #[test]
    fn merge_unions_conditions() {
        let mut a = WatchSet::new();
        a.require_absent("/watched/a");
        let mut b = WatchSet::new();
        b.require_absent("/watched/b");

        a.merge(&b);
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn merge_keeps_existing_condition_on_conflict() {
        let hash_one = ContentHash::from_bytes(b"one");
        let hash_two = ContentHash::from_bytes(b"two");

        let mut a = WatchSet::new();
        a.require_content("/watched/file", hash_one);
        let mut b = WatchSet::new();
        b.require_content("/watched/file", hash_two);

        a.merge(&b);
        assert_eq!(a.len(), 1);
        let mut expected = WatchSet::new();
        expected.require_content("/watched/file", hash_one);
        assert_eq!(a, expected);
    }

    #[test]
    fn one_failing_condition_fails_the_set() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.src");
        std::fs::write(&good, "stable").unwrap();

        let mut ws = WatchSet::new();
        ws.watch_file(&good);
        ws.require_content(dir.path().join("gone.src"), ContentHash::from_bytes(b"x"));
        assert!(!ws.is_up_to_date());
    }

    #[test]
    fn serde_roundtrip() {
        let mut ws = WatchSet::new();
        ws.require_content("/src/lib.src", ContentHash::from_bytes(b"lib"));
        ws.require_absent("/src/generated.src");

        let json = serde_json::to_string(&ws).unwrap();
        let back: WatchSet = serde_json::from_str(&json).unwrap();
        assert_eq!(ws, back);
    }
}
