//! Catalog aggregation: registry → documents → shapes → normalized entries.
//!
//! Everything is recomputed from the store on each call. There is no cache.

use thiserror::Error;
use tracing::debug;

use crate::catalog::models::{Category, CategoryMetadata, NormalizedEntry};
use crate::catalog::normalize::normalize_entry;
use crate::catalog::registry::CategoryRegistry;
use crate::catalog::shape::DocumentShape;
use crate::catalog::store::{load_with_policy, DocumentStore, MalformedDocumentPolicy, StoreError};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("category '{0}' not found")]
    UnknownCategory(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct Aggregator<'a> {
    registry: &'a CategoryRegistry,
    store: &'a dyn DocumentStore,
    policy: MalformedDocumentPolicy,
}

impl<'a> Aggregator<'a> {
    pub fn new(
        registry: &'a CategoryRegistry,
        store: &'a dyn DocumentStore,
        policy: MalformedDocumentPolicy,
    ) -> Self {
        Self {
            registry,
            store,
            policy,
        }
    }

    /// Every category in registry order with its aggregated entries.
    pub fn catalog(&self) -> Result<Vec<Category>, CatalogError> {
        self.registry
            .iter()
            .map(|meta| self.build_category(meta))
            .collect()
    }

    /// One category. An unknown key is [`CatalogError::UnknownCategory`];
    /// a known key whose documents are all missing is an empty category.
    pub fn category(&self, key: &str) -> Result<Category, CatalogError> {
        let meta = self
            .registry
            .metadata_for(key)
            .ok_or_else(|| CatalogError::UnknownCategory(key.to_string()))?;
        self.build_category(meta)
    }

    /// Entries are concatenated in document-list order, then source order
    /// within each document. Duplicates are kept.
    fn build_category(&self, meta: &CategoryMetadata) -> Result<Category, CatalogError> {
        let token = meta.title_token();
        let mut sources: Vec<NormalizedEntry> = Vec::new();

        for name in &meta.documents {
            let Some(doc) = load_with_policy(self.store, name, self.policy)? else {
                continue;
            };
            let shape = DocumentShape::detect(&doc);
            let before = sources.len();
            sources.extend(shape.entries(token).into_iter().map(normalize_entry));
            debug!(
                "Category {}: {} entries from {name} ({})",
                meta.id,
                sources.len() - before,
                shape.name()
            );
        }

        Ok(Category::new(meta, sources))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::catalog::store::test_support::MemoryStore;

    fn names(category: &Category) -> Vec<&str> {
        category
            .sources
            .iter()
            .map(|s| s.name.as_deref().unwrap_or(""))
            .collect()
    }

    #[test]
    fn test_money_bucketed_document() {
        let store = MemoryStore::default().with(
            "money.json",
            json!({
                "stocks": [{"title": "A", "link": "https://youtu.be/abcdefghijk"}],
                "tax": [{"name": "B", "url": "http://x"}]
            }),
        );
        let registry = CategoryRegistry::builtin();
        let aggregator = Aggregator::new(&registry, &store, MalformedDocumentPolicy::Skip);

        let money = aggregator.category("money-finance").unwrap();
        assert_eq!(money.title, "Money & Finance");
        assert_eq!(money.sources.len(), 2);

        let a = &money.sources[0];
        assert_eq!(a.name.as_deref(), Some("A"));
        assert_eq!(a.link.as_deref(), Some("https://youtu.be/abcdefghijk"));
        assert_eq!(a.video_id.as_deref(), Some("abcdefghijk"));
        assert_eq!(a.info, "YouTube Tutorial");

        let b = &money.sources[1];
        assert_eq!(b.name.as_deref(), Some("B"));
        assert_eq!(b.link.as_deref(), Some("http://x"));
        assert_eq!(b.video_id, None);
        assert_eq!(b.info, "YouTube Tutorial");
    }

    #[test]
    fn test_documents_concatenate_in_mapping_order_without_dedup() {
        let store = MemoryStore::default()
            .with("career1.json", json!([{"title": "C"}, {"title": "A"}]))
            .with(
                "career.json",
                json!({"careerSkills": [{"title": "A"}, {"title": "B"}]}),
            );
        let registry = CategoryRegistry::builtin();
        let aggregator = Aggregator::new(&registry, &store, MalformedDocumentPolicy::Skip);

        let career = aggregator.category("career-skills").unwrap();
        assert_eq!(names(&career), vec!["A", "B", "C", "A"]);
    }

    #[test]
    fn test_grouped_document_uses_title_token() {
        let store = MemoryStore::default().with(
            "real.json",
            json!({"learnConcepts": [
                {"category": "Life Skills", "sources": [{"title": "wrong"}]},
                {"category": "Real-World Knowledge", "sources": [{"title": "right"}]},
            ]}),
        );
        let registry = CategoryRegistry::builtin();
        let aggregator = Aggregator::new(&registry, &store, MalformedDocumentPolicy::Skip);

        assert_eq!(names(&aggregator.category("real-world").unwrap()), vec!["right"]);
    }

    #[test]
    fn test_unknown_category_is_not_found() {
        let store = MemoryStore::default();
        let registry = CategoryRegistry::builtin();
        let aggregator = Aggregator::new(&registry, &store, MalformedDocumentPolicy::Skip);

        assert!(matches!(
            aggregator.category("cooking"),
            Err(CatalogError::UnknownCategory(k)) if k == "cooking"
        ));
    }

    #[test]
    fn test_known_category_without_documents_is_empty() {
        let store = MemoryStore::default();
        let registry = CategoryRegistry::builtin();
        let aggregator = Aggregator::new(&registry, &store, MalformedDocumentPolicy::Skip);

        let offbeat = aggregator.category("offbeat-careers").unwrap();
        assert_eq!(offbeat.id, "offbeat-careers");
        assert!(offbeat.sources.is_empty());
    }

    #[test]
    fn test_catalog_covers_every_category_in_order() {
        let store = MemoryStore::default()
            .with("life.json", json!([{"title": "L"}]))
            .with("offbeat.json", json!(17));
        let registry = CategoryRegistry::builtin();
        let aggregator = Aggregator::new(&registry, &store, MalformedDocumentPolicy::Skip);

        let catalog = aggregator.catalog().unwrap();
        let ids: Vec<_> = catalog.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, registry.list_categories());
        let life = catalog.iter().find(|c| c.id == "life-skills").unwrap();
        assert_eq!(names(life), vec!["L"]);
        let offbeat = catalog.iter().find(|c| c.id == "offbeat-careers").unwrap();
        assert!(offbeat.sources.is_empty());
    }

    #[test]
    fn test_malformed_document_skipped_under_skip_policy() {
        let store = MemoryStore::default()
            .with_malformed("career.json", "{broken")
            .with("career1.json", json!([{"title": "ok"}]));
        let registry = CategoryRegistry::builtin();
        let aggregator = Aggregator::new(&registry, &store, MalformedDocumentPolicy::Skip);

        assert_eq!(names(&aggregator.category("career-skills").unwrap()), vec!["ok"]);
        assert_eq!(aggregator.catalog().unwrap().len(), 6);
    }

    #[test]
    fn test_malformed_document_fails_catalog_under_fail_policy() {
        let store = MemoryStore::default()
            .with_malformed("career.json", "{broken")
            .with("life.json", json!([{"title": "L"}]));
        let registry = CategoryRegistry::builtin();
        let aggregator = Aggregator::new(&registry, &store, MalformedDocumentPolicy::Fail);

        assert!(matches!(
            aggregator.catalog(),
            Err(CatalogError::Store(StoreError::Parse { .. }))
        ));
        // Categories that don't touch the broken document still resolve.
        assert_eq!(names(&aggregator.category("life-skills").unwrap()), vec!["L"]);
    }
}
