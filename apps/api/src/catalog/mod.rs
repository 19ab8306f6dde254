// Concept hub catalog: merges curated JSON documents into uniform categories.
// Pipeline: registry -> store -> shape -> normalize, driven by the aggregator.
// Nothing is cached; every request re-reads the documents.

pub mod aggregator;
pub mod handlers;
pub mod models;
pub mod normalize;
pub mod registry;
pub mod shape;
pub mod store;
pub mod video_id;

pub use registry::CategoryRegistry;
pub use store::{DocumentStore, FsDocumentStore, MalformedDocumentPolicy};
