//! Context sampling for the assistant prompt.
//!
//! Each document is reduced to a handful of labels so the prompt stays small.
//! The sample is illustrative only and never feeds the catalog.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use tracing::debug;

use crate::catalog::store::{load_with_policy, DocumentStore, MalformedDocumentPolicy, StoreError};

/// Maximum labels taken from an array or from an object's top-level keys.
pub const SAMPLE_LIMIT: usize = 5;

pub const DEFAULT_CONTEXT_DOCUMENTS: &[&str] = &[
    "buisness.json",
    "arts.json",
    "career.json",
    "career1.json",
    "commerce.json",
    "data.json",
    "life.json",
    "money.json",
    "non-degree.json",
];

const STREAMS_KEY: &str = "streams";
const LABEL_KEYS: &[&str] = &["title", "career_name", "name"];

/// Document name → sampled labels, in document-list order. Array items with
/// no usable label are kept as `None` so the count reflects the source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextSample {
    documents: Vec<(String, Vec<Option<String>>)>,
}

impl ContextSample {
    pub fn document_names(&self) -> Vec<&str> {
        self.documents.iter().map(|(name, _)| name.as_str()).collect()
    }
}

impl Serialize for ContextSample {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.documents.len()))?;
        for (name, labels) in &self.documents {
            map.serialize_entry(name, labels)?;
        }
        map.end()
    }
}

pub struct ContextSampler<'a> {
    store: &'a dyn DocumentStore,
    documents: &'a [String],
    policy: MalformedDocumentPolicy,
}

impl<'a> ContextSampler<'a> {
    pub fn new(
        store: &'a dyn DocumentStore,
        documents: &'a [String],
        policy: MalformedDocumentPolicy,
    ) -> Self {
        Self {
            store,
            documents,
            policy,
        }
    }

    /// Samples every existing document. Missing documents are left out.
    pub fn build_context(&self) -> Result<ContextSample, StoreError> {
        let mut sample = ContextSample::default();
        for name in self.documents {
            if sample.documents.iter().any(|(seen, _)| seen == name) {
                continue;
            }
            let Some(doc) = load_with_policy(self.store, name, self.policy)? else {
                continue;
            };
            let labels = sample_document(&doc);
            debug!("Sampled {} labels from {name}", labels.len());
            sample.documents.push((name.clone(), labels));
        }
        Ok(sample)
    }
}

/// Reduces one document to its sample:
/// - array: labels of the first [`SAMPLE_LIMIT`] items
/// - object with a `streams` object: every stream key
/// - other object: the first [`SAMPLE_LIMIT`] top-level keys
/// - anything else: nothing
pub fn sample_document(doc: &Value) -> Vec<Option<String>> {
    match doc {
        Value::Array(items) => items.iter().take(SAMPLE_LIMIT).map(item_label).collect(),
        Value::Object(obj) => match obj.get(STREAMS_KEY).and_then(Value::as_object) {
            Some(streams) => streams.keys().cloned().map(Some).collect(),
            None => obj.keys().take(SAMPLE_LIMIT).cloned().map(Some).collect(),
        },
        _ => Vec::new(),
    }
}

fn item_label(item: &Value) -> Option<String> {
    LABEL_KEYS
        .iter()
        .filter_map(|key| item.get(key).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
