//! Read-only access to source documents, addressed by filename.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid document name '{0}'")]
    InvalidName(String),

    #[error("failed to read document '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("document '{name}' is not valid JSON: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// What to do with a document that exists but fails to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedDocumentPolicy {
    /// Log and treat the document like a missing one.
    #[default]
    Skip,
    /// Fail the whole call.
    Fail,
}

impl std::str::FromStr for MalformedDocumentPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" => Ok(Self::Skip),
            "fail" => Ok(Self::Fail),
            other => Err(format!("unknown malformed document policy '{other}'")),
        }
    }
}

/// A name-addressed store of JSON source documents.
///
/// Carried in `AppState` as `Arc<dyn DocumentStore>`.
pub trait DocumentStore: Send + Sync {
    /// Loads and parses a document. `Ok(None)` means the document does not exist.
    fn load(&self, name: &str) -> Result<Option<Value>, StoreError>;
}

/// Loads a document, applying the malformed-document policy: under
/// [`MalformedDocumentPolicy::Skip`] a parse failure is logged and reported
/// as absent.
pub fn load_with_policy(
    store: &dyn DocumentStore,
    name: &str,
    policy: MalformedDocumentPolicy,
) -> Result<Option<Value>, StoreError> {
    match store.load(name) {
        Err(err @ StoreError::Parse { .. }) if policy == MalformedDocumentPolicy::Skip => {
            warn!("Skipping malformed document: {err}");
            Ok(None)
        }
        other => other,
    }
}

/// Document names are bare filenames: no separators, not `.` or `..`.
pub fn is_bare_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Documents stored as `<root>/<name>` on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> Result<PathBuf, StoreError> {
        if !is_bare_name(name) {
            return Err(StoreError::InvalidName(name.to_string()));
        }
        Ok(self.root.join(name))
    }
}

impl DocumentStore for FsDocumentStore {
    fn load(&self, name: &str) -> Result<Option<Value>, StoreError> {
        let path = self.resolve(name)?;
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Document {name} not found under {}", self.root.display());
                return Ok(None);
            }
            Err(source) => {
                return Err(StoreError::Io {
                    name: name.to_string(),
                    source,
                })
            }
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Parse {
                name: name.to_string(),
                source,
            })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;

    use super::*;

    /// In-memory store. Documents added with `with_malformed` fail to parse.
    #[derive(Default)]
    pub struct MemoryStore {
        docs: HashMap<String, Result<Value, String>>,
    }

    impl MemoryStore {
        pub fn with(mut self, name: &str, doc: Value) -> Self {
            self.docs.insert(name.to_string(), Ok(doc));
            self
        }

        pub fn with_malformed(mut self, name: &str, raw: &str) -> Self {
            self.docs.insert(name.to_string(), Err(raw.to_string()));
            self
        }
    }

    impl DocumentStore for MemoryStore {
        fn load(&self, name: &str) -> Result<Option<Value>, StoreError> {
            match self.docs.get(name) {
                None => Ok(None),
                Some(Ok(doc)) => Ok(Some(doc.clone())),
                Some(Err(raw)) => serde_json::from_str(raw)
                    .map(Some)
                    .map_err(|source| StoreError::Parse {
                        name: name.to_string(),
                        source,
                    }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_existing_document() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("life.json"), r#"[{"title": "A"}]"#).unwrap();
        let store = FsDocumentStore::new(dir.path());
        assert_eq!(store.load("life.json").unwrap(), Some(json!([{"title": "A"}])));
    }

    #[test]
    fn test_missing_document_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsDocumentStore::new(dir.path());
        assert_eq!(store.load("nope.json").unwrap(), None);
    }

    #[test]
    fn test_object_keys_keep_document_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("m.json"), r#"{"zeta": [], "alpha": []}"#).unwrap();
        let store = FsDocumentStore::new(dir.path());
        let value = store.load("m.json").unwrap().unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_path_traversal_rejected() {
        let store = FsDocumentStore::new("/tmp");
        assert!(matches!(store.load("../etc/passwd"), Err(StoreError::InvalidName(_))));
        assert!(matches!(store.load(".."), Err(StoreError::InvalidName(_))));
        assert!(matches!(store.load(""), Err(StoreError::InvalidName(_))));
    }

    #[test]
    fn test_bare_names() {
        assert!(is_bare_name("money.json"));
        assert!(!is_bare_name("sub/x.json"));
        assert!(!is_bare_name("sub\\x.json"));
        assert!(!is_bare_name("."));
    }

    #[test]
    fn test_read_failure_is_fatal_even_when_skipping() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("money.json")).unwrap();
        let store = FsDocumentStore::new(dir.path());

        assert!(matches!(store.load("money.json"), Err(StoreError::Io { .. })));
        assert!(matches!(
            load_with_policy(&store, "money.json", MalformedDocumentPolicy::Skip),
            Err(StoreError::Io { .. })
        ));
    }

    #[test]
    fn test_malformed_document_policy() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), "{oops").unwrap();
        let store = FsDocumentStore::new(dir.path());

        assert!(matches!(store.load("bad.json"), Err(StoreError::Parse { .. })));
        assert_eq!(
            load_with_policy(&store, "bad.json", MalformedDocumentPolicy::Skip).unwrap(),
            None
        );
        assert!(matches!(
            load_with_policy(&store, "bad.json", MalformedDocumentPolicy::Fail),
            Err(StoreError::Parse { .. })
        ));
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("skip".parse::<MalformedDocumentPolicy>(), Ok(MalformedDocumentPolicy::Skip));
        assert_eq!(" FAIL ".parse::<MalformedDocumentPolicy>(), Ok(MalformedDocumentPolicy::Fail));
        assert!("retry".parse::<MalformedDocumentPolicy>().is_err());
    }
}
