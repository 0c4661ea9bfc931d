//! # Artifact Module
//!
//! The "model": a flat string-to-string mapping decoded from
//! `<model_dir>/model.txt`.
//!
//! The mapping is loaded once and never mutated afterwards. There is no
//! `insert` or `remove` on purpose; the only way to build one is from JSON
//! text or from an existing map.

use crate::error::{AdapterError, AdapterResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name of the artifact inside the model directory.
pub const MODEL_FILE: &str = "model.txt";

/// Immutable key-value lookup table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Artifact {
    entries: BTreeMap<String, String>,
}

impl Artifact {
    /// Resolve the artifact path for a model directory.
    #[must_use]
    pub fn path_in(model_dir: &Path) -> PathBuf {
        model_dir.join(MODEL_FILE)
    }

    /// Load the artifact from `<model_dir>/model.txt`.
    ///
    /// IO and decode failures are returned with the offending path attached.
    pub fn load(model_dir: impl AsRef<Path>) -> AdapterResult<Self> {
        let path = Self::path_in(model_dir.as_ref());
        let text = std::fs::read_to_string(&path).map_err(|source| AdapterError::ArtifactIo {
            path: path.clone(),
            source,
        })?;
        let artifact = Self::from_json_str(&text)
            .map_err(|source| AdapterError::ArtifactDecode { path: path.clone(), source })?;

        tracing::debug!(path = %path.display(), entries = artifact.len(), "artifact loaded");
        Ok(artifact)
    }

    /// Decode an artifact from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Exact-match lookup.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the artifact has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<BTreeMap<String, String>> for Artifact {
    fn from(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Artifact {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn model_dir_with(content: &str) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MODEL_FILE), content).unwrap();
        dir
    }

    #[test]
    fn load_reads_model_txt() {
        let dir = model_dir_with(r#"{"a": "x", "b": "y"}"#);
        let artifact = Artifact::load(dir.path()).unwrap();

        assert_eq!(artifact.len(), 2);
        assert_eq!(artifact.get("a"), Some("x"));
        assert_eq!(artifact.get("b"), Some("y"));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        match Artifact::load(dir.path()) {
            Err(AdapterError::ArtifactIo { path, .. }) => {
                assert_eq!(path, dir.path().join(MODEL_FILE));
            }
            other => panic!("expected ArtifactIo, got {other:?}"),
        }
    }

    #[test]
    fn load_invalid_json_is_decode_error() {
        let dir = model_dir_with("not json");
        assert!(matches!(
            Artifact::load(dir.path()),
            Err(AdapterError::ArtifactDecode { .. })
        ));
    }

    #[test]
    fn load_rejects_non_string_values() {
        let dir = model_dir_with(r#"{"a": 1}"#);
        assert!(matches!(
            Artifact::load(dir.path()),
            Err(AdapterError::ArtifactDecode { .. })
        ));
    }

    #[test]
    fn load_rejects_lone_surrogate_key() {
        let dir = model_dir_with(r#"{"\udc00": "x"}"#);
        assert!(matches!(
            Artifact::load(dir.path()),
            Err(AdapterError::ArtifactDecode { .. })
        ));
    }

    #[test]
    fn load_rejects_top_level_array() {
        let dir = model_dir_with(r#"["a", "x"]"#);
        assert!(Artifact::load(dir.path()).is_err());
    }

    #[test]
    fn empty_object_is_empty_artifact() {
        let artifact = Artifact::from_json_str("{}").unwrap();
        assert!(artifact.is_empty());
    }

    #[test]
    fn lookup_is_exact_match() {
        let artifact: Artifact = [("Key", "v")].into_iter().collect();
        assert_eq!(artifact.get("Key"), Some("v"));
        assert_eq!(artifact.get("key"), None);
        assert_eq!(artifact.get("Key "), None);
    }

    #[test]
    fn later_duplicate_key_wins() {
        let artifact = Artifact::from_json_str(r#"{"a": "first", "a": "second"}"#).unwrap();
        assert_eq!(artifact.len(), 1);
        assert_eq!(artifact.get("a"), Some("second"));
    }
}
